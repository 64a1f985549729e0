use anyhow::Result;
use std::path::Path;

use sitegrant_runtime::{FileAuthority, RequestPolicy};

pub async fn grant(grants: &Path, origins: &[String]) -> Result<()> {
    let authority = FileAuthority::open(grants, RequestPolicy::DenyAll).await?;
    authority.grant(origins).await?;
    println!(
        "Granted {} origin(s) in {}",
        origins.len(),
        authority.path().display()
    );
    Ok(())
}

pub async fn revoke(grants: &Path, origins: &[String]) -> Result<()> {
    let authority = FileAuthority::open(grants, RequestPolicy::DenyAll).await?;
    let removed = authority.revoke(origins).await?;
    println!(
        "Revoked {} origin(s) in {}",
        removed,
        authority.path().display()
    );
    Ok(())
}

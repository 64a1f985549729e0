use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use sitegrant_core::{ClassifierConfig, ManifestDescriptor};
use sitegrant_runtime::{FileAuthority, GrantCoordinator, RequestPolicy};

use crate::output::{print_report, OutputFormat, Report};

/// Request every required origin, then show the reconciled groups
pub async fn execute(
    manifest: &Path,
    grants: &Path,
    config: ClassifierConfig,
    policy: RequestPolicy,
    output: OutputFormat,
) -> Result<()> {
    let descriptor = ManifestDescriptor::from_file(manifest)?;
    let authority = FileAuthority::open(grants, policy).await?;
    let coordinator = GrantCoordinator::from_manifest(&descriptor, config, Arc::new(authority))?;

    let granted = coordinator.request_grants().await?;

    let groups = coordinator.snapshot();
    print_report(
        &Report {
            granted: Some(granted),
            groups: &groups,
        },
        output,
    )
}

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use sitegrant_core::{ClassifierConfig, ManifestDescriptor};
use sitegrant_runtime::{FileAuthority, GrantCoordinator, RequestPolicy};

use crate::output::{print_report, OutputFormat, Report};

/// Reconcile every group against the grants file
pub async fn execute(
    manifest: &Path,
    grants: &Path,
    config: ClassifierConfig,
    output: OutputFormat,
) -> Result<()> {
    let descriptor = ManifestDescriptor::from_file(manifest)?;
    let authority = FileAuthority::open(grants, RequestPolicy::DenyAll).await?;
    let coordinator = GrantCoordinator::from_manifest(&descriptor, config, Arc::new(authority))?;

    coordinator.check_status().await?;

    let groups = coordinator.snapshot();
    print_report(
        &Report {
            granted: None,
            groups: &groups,
        },
        output,
    )
}

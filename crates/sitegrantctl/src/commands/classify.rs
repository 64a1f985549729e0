use anyhow::Result;
use std::path::Path;

use sitegrant_core::{Classifier, ClassifierConfig, ManifestDescriptor};

use crate::output::{print_report, OutputFormat, Report};

/// Classify a manifest without consulting any grants
pub fn execute(manifest: &Path, config: ClassifierConfig, output: OutputFormat) -> Result<()> {
    let descriptor = ManifestDescriptor::from_file(manifest)?;
    let requirements = Classifier::new(config)?.classify(&descriptor);

    let groups = requirements.snapshot();
    print_report(
        &Report {
            granted: None,
            groups: &groups,
        },
        output,
    )
}

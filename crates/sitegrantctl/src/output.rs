//! Terminal rendering of requirement groups

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use sitegrant_core::{GrantStatus, GroupSnapshot};

/// ANSI color codes for terminal styling
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
}

use colors::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table
    Wide,
    Json,
    Yaml,
}

/// Full command result for machine-readable formats
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted: Option<bool>,
    pub groups: &'a [GroupSnapshot],
}

pub fn print_report(report: &Report<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(report)?),
        OutputFormat::Wide => {
            if let Some(granted) = report.granted {
                println!("Request {}", if granted { "granted" } else { "not granted" });
            }
            print_table(report.groups);
        }
    }
    Ok(())
}

fn print_table(groups: &[GroupSnapshot]) {
    let use_colors = atty::is(atty::Stream::Stdout);

    println!("\n{:<20} {:<9} {}", "GROUP", "STATUS", "ORIGINS");
    println!("{}", "=".repeat(72));

    for group in groups {
        let mut origins = group.matches.clone();
        if let Some(extra) = &group.extra_origins {
            origins.extend(extra.iter().cloned());
        }
        let origins = if origins.is_empty() {
            "-".to_string()
        } else {
            origins.join(", ")
        };

        let status = format!("{:<9}", group.status.to_string());
        let status = if use_colors {
            format!("{}{}{}", status_color(group.status), status, RESET)
        } else {
            status
        };

        let label = if use_colors {
            format!("{}{:<20}{}", BOLD, group.label, RESET)
        } else {
            format!("{:<20}", group.label)
        };

        println!("{} {} {}", label, status, origins);
    }
}

fn status_color(status: GrantStatus) -> &'static str {
    match status {
        GrantStatus::Granted => GREEN,
        GrantStatus::Denied => RED,
        GrantStatus::Unknown => YELLOW,
    }
}

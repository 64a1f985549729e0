//! Shell completion generation for sitegrantctl
//!
//! Commands:
//! - sitegrantctl completion bash  > /etc/bash_completion.d/sitegrantctl
//! - sitegrantctl completion zsh   > ~/.zsh/completion/_sitegrantctl
//! - sitegrantctl completion fish  > ~/.config/fish/completions/sitegrantctl.fish

use anyhow::Result;
use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate, Shell as ClapShell};
use std::io;

use crate::cli::Cli;

/// Supported shells for completion
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
    Elvish,
}

impl From<Shell> for ClapShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => ClapShell::Bash,
            Shell::Zsh => ClapShell::Zsh,
            Shell::Fish => ClapShell::Fish,
            Shell::Powershell => ClapShell::PowerShell,
            Shell::Elvish => ClapShell::Elvish,
        }
    }
}

/// Generate shell completion script
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    let clap_shell: ClapShell = shell.into();
    generate(clap_shell, &mut cmd, name, &mut io::stdout());

    if let Shell::Bash = shell {
        eprintln!();
        eprintln!("# Load in the current shell:");
        eprintln!("#    source <(sitegrantctl completion bash)");
    }

    Ok(())
}

//! Shell completion generation command.
//!
//! Prints a completion script for bash, zsh, fish, `PowerShell` or elvish to
//! stdout, with installation hints on stderr.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "tablebook";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            for line in install_hint(self.shell) {
                eprintln!("# {line}");
            }
            eprintln!();
        }

        generate(self.shell, &mut Cli::command(), BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

fn install_hint(shell: Shell) -> &'static [&'static str] {
    match shell {
        Shell::Bash => &[
            "Install with:",
            "  tablebook completions bash > ~/.local/share/bash-completion/completions/tablebook",
            "or add to ~/.bashrc:",
            "  eval \"$(tablebook completions bash)\"",
        ],
        Shell::Zsh => &[
            "Install with (~/.zsh/completions must be on $fpath):",
            "  tablebook completions zsh > ~/.zsh/completions/_tablebook",
        ],
        Shell::Fish => &[
            "Install with:",
            "  tablebook completions fish > ~/.config/fish/completions/tablebook.fish",
        ],
        Shell::PowerShell => &[
            "Add to your profile:",
            "  tablebook completions powershell | Out-String | Invoke-Expression",
        ],
        _ => &[],
    }
}

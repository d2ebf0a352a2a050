//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, `PowerShell` and elvish.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::FocuslogError;

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error for an unknown shell name.
pub fn completions(shell: &str, install: bool) -> Result<String, FocuslogError> {
    let shell_type = shell_from_str(shell).ok_or_else(|| {
        FocuslogError::Config(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(completion_install_instructions(shell_type))
    } else {
        generate_completions(shell_type)
    }
}

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, FocuslogError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "focuslog", &mut buf);
    String::from_utf8(buf).map_err(|e| FocuslogError::Config(format!("UTF-8 error: {e}")))
}

/// Get shell from string name.
#[must_use]
pub fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}

/// Get installation instructions for shell completions.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r"# Add to ~/.bashrc or ~/.bash_profile:
source <(focuslog completions bash)

# Or save to a file:
focuslog completions bash > /usr/local/etc/bash_completion.d/focuslog
"
        .to_string(),

        Shell::Zsh => r"# Add to ~/.zshrc (before compinit):
source <(focuslog completions zsh)

# Or save to your fpath:
focuslog completions zsh > ~/.zsh/completions/_focuslog
"
        .to_string(),

        Shell::Fish => r"# Save to fish completions directory:
focuslog completions fish > ~/.config/fish/completions/focuslog.fish
"
        .to_string(),

        Shell::PowerShell => r"# Add to your PowerShell profile ($PROFILE):
focuslog completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => r"# Save to elvish completions directory:
focuslog completions elvish > ~/.elvish/lib/focuslog.elv

# Then add to ~/.elvish/rc.elv:
use focuslog
"
        .to_string(),

        _ => "Unknown shell".to_string(),
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "focuslog")]
#[command(about = "A terminal time tracker with a stopwatch, Pomodoro cycles and session reports")]
#[command(long_about = "focuslog - track where your time goes

Log freeform work with a stopwatch, or run Pomodoro cycles where each
finished focus period is logged automatically and followed by a break.
Summarize the session or export it as a spreadsheet.

QUICK START:
  focuslog                  Open the tracker
  focuslog tui --pomodoro   Open with the Pomodoro toggle on
  focuslog config init      Write a default config file

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  focuslog <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this config file instead of ~/.focuslog/config.yaml
    #[arg(long, global = true, env = "FOCUSLOG_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive tracker (default)
    ///
    /// Enter a task name and category, then start the stopwatch. Stopping
    /// logs the elapsed time. With the Pomodoro toggle on, Start runs a
    /// focus countdown instead; when it reaches zero the period is logged
    /// and a break starts.
    ///
    /// # Keys
    ///
    ///   Tab / Shift-Tab   Move between task name, category and controls
    ///   Enter             Start, pause or resume
    ///   Esc               Leave a text field for the controls
    ///
    /// On the controls:
    ///
    ///   Space   Start, pause or resume
    ///   s       Stop (press twice to discard unlabeled time)
    ///   p       Toggle Pomodoro
    ///   r       Generate report
    ///   d       Download CSV
    ///   x       Dismiss error
    ///   q       Quit
    ///
    /// # Examples
    ///
    ///   focuslog tui
    ///   focuslog tui --pomodoro --focus 50m --break 10m
    #[command(alias = "ui")]
    Tui(TuiArgs),

    /// Show or create the configuration file
    ///
    /// # Examples
    ///
    ///   focuslog config show
    ///   focuslog config show -o json
    ///   focuslog config init --force
    ///   focuslog config path
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Outputs completion script for the specified shell.
    /// Redirect to a file or source directly.
    ///
    /// Example: focuslog completions bash > ~/.bash_completion.d/focuslog
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct TuiArgs {
    /// Start with the Pomodoro toggle on
    #[arg(long, short = 'p')]
    pub pomodoro: bool,

    /// Focus length for this run (e.g. 25m, 1h, 90s, or plain minutes)
    #[arg(long, value_name = "DURATION")]
    pub focus: Option<String>,

    /// Break length for this run
    #[arg(long = "break", value_name = "DURATION")]
    pub break_length: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["focuslog"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output, OutputFormat::Pretty);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_tui_flags() {
        let cli =
            Cli::try_parse_from(["focuslog", "tui", "-p", "--focus", "50m", "--break", "10"])
                .unwrap();
        let Some(Commands::Tui(args)) = cli.command else {
            panic!("expected tui");
        };
        assert!(args.pomodoro);
        assert_eq!(args.focus.as_deref(), Some("50m"));
        assert_eq!(args.break_length.as_deref(), Some("10"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "focuslog", "config", "show", "-o", "json", "--config", "/tmp/c.yaml", "-v",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yaml")));
        assert!(cli.verbose);
    }
}

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "protocheck", version, about = "Pre-commit proto linter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Color mode
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Repository root (overrides auto-discovery)
    #[arg(long, global = true)]
    pub root: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pre-commit checks (newline convention + proto lint)
    Check {
        /// Directory or file to check instead of changed files
        #[arg(long, group = "scope")]
        path: Option<String>,

        /// Specific files to check, space separated
        #[arg(long, group = "scope", num_args = 1..)]
        files: Vec<String>,
    },

    /// Download the prototool binary into third_party
    Install,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

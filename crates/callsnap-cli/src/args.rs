use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "callsnap")]
#[command(about = "Inspect recorded function calls and archived outputs", long_about = None)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Project root holding callsnap.toml, data/ and output/.
    /// Defaults to CALLSNAP_ROOT, then the current directory.
    #[arg(long, global = true)]
    pub root: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Delete the global index (data/main.json)")]
    Reset,

    #[command(about = "List global index entries, one per function")]
    Index,

    #[command(about = "List the recorded history of one function")]
    History { target: String, function: String },

    #[command(about = "List every function that has a history")]
    Targets,

    #[command(about = "Print an archived output")]
    Output {
        target: String,
        function: String,

        /// Run id to read; defaults to the configured or environment run id
        #[arg(long)]
        run_id: Option<String>,
    },

    #[command(about = "Print the run id a recording would use")]
    RunId {
        /// Arguments to derive the run id from, as a test runner would pass them
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    #[command(about = "Manage callsnap.toml")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Write a default callsnap.toml if none exists")]
    Init,

    #[command(about = "Print the effective configuration")]
    Show,
}

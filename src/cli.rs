use clap::{Parser, ValueEnum};

/// Extract course sections from a saved registration page and hand them to
/// the schedule viewer.
#[derive(Debug, Parser)]
#[command(name = "jadwal", version)]
pub struct Args {
    /// Path to the saved registration page HTML, or "-" to read stdin.
    pub input: String,

    /// Log output format.
    #[arg(long, value_enum, default_value = "pretty")]
    pub tracing: TracingFormat,

    /// Skip the settle delay regardless of configuration.
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TracingFormat {
    Pretty,
    Json,
}

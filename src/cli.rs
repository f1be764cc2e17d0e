use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum VerbosityLevel {
    /// Only show critical errors
    Quiet,
    /// Show standard information
    #[default]
    Normal,
    /// Show detailed information
    Verbose,
    /// Show all available debugging information
    Debug,
}

impl VerbosityLevel {
    /// Log level used when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "warn",
            VerbosityLevel::Verbose => "info",
            VerbosityLevel::Debug => "debug",
        }
    }
}

/// Response formats the service understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResponseFormat {
    Csv,
    Geojson,
    Kml,
    Quakeml,
    Text,
    Xml,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Csv => "csv",
            ResponseFormat::Geojson => "geojson",
            ResponseFormat::Kml => "kml",
            ResponseFormat::Quakeml => "quakeml",
            ResponseFormat::Text => "text",
            ResponseFormat::Xml => "xml",
        }
    }
}

/// How `params` and `describe` print registry contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Query the USGS earthquake event service
#[derive(Parser, Debug, Clone)]
#[command(name = "quakequery")]
#[command(about = "Discover the earthquake event service's parameters and run validated searches")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (TOML or JSON)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Service base URL, ending in '/'
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout", global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose output (repeat for debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        global = true
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search for events and print the raw response body
    Query {
        /// Events on or after this date (YYYY-MM-DD)
        #[arg(long = "start")]
        start: String,

        /// Events on or before this date (YYYY-MM-DD); defaults to now
        #[arg(long = "end")]
        end: Option<String>,

        /// Events updated after this date (YYYY-MM-DD)
        #[arg(long = "updated-after")]
        updated_after: Option<String>,

        /// Response format (the request is always sent as geojson)
        #[arg(long = "format", value_enum)]
        format: Option<ResponseFormat>,
    },

    /// List the parameters the service accepts
    Params {
        #[arg(long = "output", value_enum, default_value_t = OutputFormat::Human)]
        output: OutputFormat,
    },

    /// Show a single parameter's definition
    Describe {
        /// Parameter name
        name: String,

        #[arg(long = "output", value_enum, default_value_t = OutputFormat::Human)]
        output: OutputFormat,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else {
            match self.verbose {
                0 => VerbosityLevel::Normal,
                1 => VerbosityLevel::Verbose,
                _ => VerbosityLevel::Debug,
            }
        }
    }
}

use clap::{ArgAction, Parser};
use errata_import::application::dto::SourceFormat;
use log::LevelFilter;
use std::path::PathBuf;

/// Import CentOS errata announcements into a Spacewalk server
#[derive(Parser, Debug)]
#[command(name = "errata-import")]
#[command(version)]
#[command(
    about = "Import CentOS errata announcements into a Spacewalk server",
    long_about = None
)]
pub struct Args {
    /// Announcement input file (required for the digest and archive formats)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Configuration file (defaults to ./errata-import.config.yml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Input format: digest, archive or mail-archive
    #[arg(short, long)]
    pub format: Option<SourceFormat>,

    /// Errata server host name or URL
    #[arg(short, long)]
    pub server: Option<String>,

    /// Errata server login
    #[arg(short, long)]
    pub login: Option<String>,

    /// Errata server password
    #[arg(long, env = "ERRATA_IMPORT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Distribution major version the advisories must target, e.g. 9
    #[arg(long, value_name = "VERSION")]
    pub target_version: Option<String>,

    /// Package search strategies, in order (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "STRATEGIES")]
    pub search_strategies: Option<Vec<String>>,

    /// Maximum number of advisories to read from the mail archive
    #[arg(long, value_name = "N")]
    pub max_errata: Option<usize>,

    /// Download upstream advisory descriptions
    #[arg(long)]
    pub scrape_descriptions: bool,

    /// Base URL of the web mail archive
    #[arg(long, value_name = "URL")]
    pub mail_archive_url: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Dry run: prepare advisories and print them without contacting the server
    #[arg(short, long)]
    pub test: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level selected by `-v`/`-q`
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

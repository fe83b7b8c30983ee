//! CLI command definitions

use clap::{Parser, ValueEnum};
use scout_domain::Effort;
use std::path::PathBuf;

/// Research effort accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EffortArg {
    /// 1 search query, 1 research loop
    Low,
    /// 3 search queries, 3 research loops
    Medium,
    /// 5 search queries, 10 research loops
    High,
}

impl From<EffortArg> for Effort {
    fn from(arg: EffortArg) -> Self {
        match arg {
            EffortArg::Low => Effort::Low,
            EffortArg::Medium => Effort::Medium,
            EffortArg::High => Effort::High,
        }
    }
}

/// CLI arguments for scout
#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(author, version, about = "Terminal chat front-end for a streaming research agent")]
#[command(long_about = r#"
scout talks to a LangGraph research agent and shows its work as it happens:
the search queries it generates, the sources it reads, its reflections, and
finally the answer, typed out as it arrives.

Configuration files are loaded from (in priority order):
1. --config <path>            Explicit config file
2. ./scout.toml, ./.scout.toml  Project-level config
3. ~/.config/scout/config.toml  Global config
SCOUT_* environment variables override files (e.g. SCOUT_BACKEND__BASE_URL).

Example:
  scout
  scout --url http://localhost:2024 --effort high
  scout -m gemini-2.5-pro -vv --log-file /tmp/scout.log
"#)]
pub struct Cli {
    /// Agent backend base URL (overrides backend.base_url)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Model to select once the model list is loaded
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Initial research effort
    #[arg(short, long, value_enum)]
    pub effort: Option<EffortArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};

use crate::notification::{Anchor, QueueConfig, DEFAULT_DURATION_MS, DEFAULT_MAX_TOASTS};
use crate::theme::Theme;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Write a trace log to this file
    #[arg(long)]
    pub log_path: Option<String>,

    /// Number of toasts kept on screen before the oldest is evicted
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_TOASTS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_toasts: usize,

    /// Display time of a toast, zero or less keeps it until dismissed
    #[arg(long, default_value_t = DEFAULT_DURATION_MS, allow_negative_numbers = true)]
    pub toast_duration_ms: i64,

    #[arg(long, value_enum, default_value_t = Anchor::BottomRight)]
    pub anchor: Anchor,

    #[arg(long, value_enum, default_value_t = ThemeArg::Dark)]
    pub theme: ThemeArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dark,
    SolarizedDark,
}

pub fn load_config() -> Config {
    Config::from_args(Args::parse())
}

#[derive(Clone, Debug)]
pub struct Config {
    pub log_path: Option<String>,
    pub queue: QueueConfig,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: None,
            queue: QueueConfig::default(),
            theme: Theme::Dark,
        }
    }
}

impl Config {
    fn from_args(args: Args) -> Config {
        Config {
            log_path: args.log_path,
            queue: QueueConfig {
                max_toasts: args.max_toasts,
                default_duration_ms: args.toast_duration_ms,
                anchor: args.anchor,
            },
            theme: match args.theme {
                ThemeArg::Dark => Theme::Dark,
                ThemeArg::SolarizedDark => Theme::SolarizedDark,
            },
        }
    }
}

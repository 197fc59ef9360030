use crate::config::{Config, OutputFormat};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Copy, Clone)]
pub(crate) struct Format(OutputFormat);

impl ValueEnum for Format {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self(OutputFormat::Text), Self(OutputFormat::Json)]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.0.as_str()))
    }
}

/// `nesrom` CLI Config Options
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
#[must_use]
pub struct Opts {
    /// The `iNES` ROM files to decode.
    #[arg(required = true)]
    pub(crate) paths: Vec<PathBuf>,
    /// Output format. [default: 'text']
    #[arg(short, long, value_enum)]
    pub(crate) format: Option<Format>,
    /// Show the unofficial flags 10 byte.
    #[arg(long)]
    pub(crate) flags10: bool,
    /// Custom Config path.
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,
    /// "Default Config" (skip user config)
    #[arg(long)]
    pub(crate) clean: bool,
}

impl Opts {
    /// Extends a base `Config` with CLI options
    pub fn extend(&self, base: Config) -> Config {
        Config {
            format: self.format.map(|format| format.0).unwrap_or(base.format),
            show_flags10: self.flags10 || base.show_flags10,
        }
    }
}

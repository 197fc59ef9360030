//! Inspect `iNES` cartridge images.
//!
//! USAGE:
//!     nesrom [OPTIONS] <PATHS>...
//!
//! FLAGS:
//!         --flags10    Show the unofficial flags 10 byte.
//!         --clean      Skip the user config.
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! OPTIONS:
//!     -f, --format <format>    Output format [default: text] [possible values: text, json]
//!     -c, --config <config>    Custom Config path.
//!
//! ARGS:
//!     <PATHS>...    The `iNES` ROM files to decode.

pub mod config;
pub mod logging;
pub mod opts;
pub mod report;

use anyhow::Context;
use clap::Parser;
use config::Config;
use nesrom_core::rom::RomImage;
use std::{io::Write, path::PathBuf, process::ExitCode};
use tracing::debug;

fn main() -> anyhow::Result<ExitCode> {
    logging::init();

    let opts = opts::Opts::parse();
    debug!("CLI Options: {opts:?}");

    let base = if opts.clean {
        Config::default()
    } else {
        Config::load(opts.config.clone())
    };
    let config = opts.extend(base);

    let ok = run(
        &opts.paths,
        &config,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;
    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Decode each path, writing reports to `out` and one line per decode failure to `err_out`.
///
/// Returns `false` if any path failed to decode.
fn run(
    paths: &[PathBuf],
    config: &Config,
    out: &mut impl Write,
    err_out: &mut impl Write,
) -> anyhow::Result<bool> {
    let mut ok = true;
    for path in paths {
        let rom = match RomImage::from_path(path) {
            Ok(rom) => rom,
            Err(err) => {
                writeln!(err_out, "{}: {err}", path.display())?;
                ok = false;
                continue;
            }
        };
        let report = report::render(&rom, config)
            .with_context(|| format!("failed to render report for {path:?}"))?;
        writeln!(out, "{report}")?;
    }
    Ok(ok)
}

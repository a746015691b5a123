use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gtfs_facts::config::CompileConfig;
use gtfs_facts::error::CompileError;
use gtfs_facts::facts::FactWriter;
use gtfs_facts::feed::load_feed;
use gtfs_facts::pipeline::compile;

/// Environment variable overriding the availability mask length.
const MASK_LENGTH_VAR: &str = "GTFS_FACTS_MASK_LENGTH";

/// Exit status when the feed itself is malformed.
const DATA_ERROR_STATUS: u8 = 2;

const DEFAULT_INPUT_DIR: &str = "data";
const DEFAULT_OUTPUT_DIR: &str = "tables";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_INPUT_DIR.to_string()));
    let output = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()));

    let config = config_from_env();

    match run(&input, &output, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_data_error() => {
            error!("feed rejected: {e}");
            ExitCode::from(DATA_ERROR_STATUS)
        }
        Err(e) => {
            error!("compile failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn config_from_env() -> CompileConfig {
    let config = CompileConfig::default();
    match std::env::var(MASK_LENGTH_VAR) {
        Ok(value) => match value.parse() {
            Ok(mask_length) => config.with_mask_length(mask_length),
            Err(_) => {
                warn!(
                    value = %value,
                    default = config.mask_length,
                    "ignoring invalid {MASK_LENGTH_VAR}"
                );
                config
            }
        },
        Err(_) => config,
    }
}

fn run(input: &Path, output: &Path, config: &CompileConfig) -> Result<(), CompileError> {
    info!(input = %input.display(), output = %output.display(), "compiling feed");

    let feed = load_feed(input)?;
    let compiled = compile(&feed, config)?;

    // Nothing is written unless the whole compile succeeded
    let writer = FactWriter::new(output);
    writer.write_all(&compiled.facts())?;
    writer.write_report(&compiled.report)?;

    if !compiled.report.dropped.is_empty() {
        warn!(
            dropped = compiled.report.dropped.len(),
            "some trips produced no departure"
        );
    }
    info!(output = %output.display(), "fact files written");
    Ok(())
}

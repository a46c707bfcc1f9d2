//! sincvol — render one tone-mapped slice of a 3D-FFT'd windowed-sinc volume
//!
//! One fixed run: fill the grid, transform it, write the raster, exit.
//! The only accepted argument is an optional config file path; see
//! `sincvol_core::config` for the full search order and the YAML schema.

use std::path::PathBuf;
use std::process::ExitCode;

use sincvol_core::config::PipelineConfig;
use sincvol_core::{logging, pipeline};
use tracing::{error, info};

fn main() -> ExitCode {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    // Config errors happen before the subscriber exists, so they go to
    // stderr directly.
    let config = match PipelineConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("sincvol: {}", err);
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.log);

    if let Err(err) = config.validate() {
        error!(error = %err, "configuration rejected");
        return ExitCode::FAILURE;
    }

    match pipeline::run(&config) {
        Ok(report) => {
            info!(
                path = %report.output.display(),
                bytes = report.bytes_written,
                "run complete"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "pipeline failed");
            ExitCode::FAILURE
        }
    }
}

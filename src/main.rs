use anyhow::Result;
use clap::Parser;
use oca_port::cli::CliArgs;
use oca_port::config::{log_level, Settings};
use oca_port::styling;
use oca_port_core::error::CoreError;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let cli_verbose = args.verbose;
    let loaded = load(args);

    // RUST_LOG wins over the merged verbose flag
    let verbose = loaded
        .as_ref()
        .map_or(cli_verbose, |(_, settings)| settings.verbose);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    let result = loaded.and_then(|(cwd, settings)| oca_port::run(&settings, &cwd, color));
    match result {
        Ok(()) => {
            debug!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!(error = %format!("{:#}", err), "Run failed");
            let color = color && std::io::stderr().is_terminal();
            match err.downcast_ref::<CoreError>() {
                Some(core_err) => eprintln!("{}", styling::render_error(core_err, color)),
                None => eprintln!("{} {:#}", styling::fail("Error:", color), err),
            }
            ExitCode::FAILURE
        }
    }
}

fn load(args: CliArgs) -> Result<(PathBuf, Settings)> {
    let cwd = std::env::current_dir()?;
    let settings = oca_port::load_settings(args, &cwd)?;
    Ok((cwd, settings))
}

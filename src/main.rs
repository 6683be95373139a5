use clap::Parser;
use color_eyre::eyre::Report;
use env_logger::Env;
use log::{debug, info};
use std::io;
use std::process::ExitCode;

use rps_upstream::{run, Args, RedisStore, RegistrarError};

fn main() -> ExitCode {
    // Initialize error reporting
    if let Err(err) = color_eyre::install() {
        eprintln!("Failed to install error reporter: {}", err);
    }

    // Help and version are not failures
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(&RegistrarError::from(err));
        }
    };

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut stdout = io::stdout().lock();
    match run(&args, RedisStore::connect, &mut stdout) {
        Ok(registration) => {
            info!("Upstream registration completed ({})", registration.key);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = ExitCode::from(&err);
            debug!("Upstream registration failed with exit code {}", err.exit_code());
            eprintln!("Error: {:?}", Report::new(err));
            code
        }
    }
}

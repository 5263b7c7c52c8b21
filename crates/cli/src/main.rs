use std::process::ExitCode;

use clap::Parser;
use env_logger::{Builder, Env};
use flayground_cli::cli::{Cli, wait_for_enter};

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let pause = cli.pause_on_error();
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:?}");
            if pause {
                wait_for_enter();
            }
            ExitCode::FAILURE
        }
    }
}

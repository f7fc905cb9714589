mod command;
mod config;
mod constants;
mod data_mgmt;
mod helpers;
mod interfaces;
mod plot;
mod readers;

use anyhow::{anyhow, Result};
use dotenv::dotenv;
use env_logger::Env;

use crate::constants::{defaults, envvars};

const CMD_RUN: &str = "run";
const CMD_PLOT: &str = "plot";

fn main() -> Result<()> {
    let _ = dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL))
        .init();

    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some(CMD_RUN) => command::run(),
        Some(CMD_PLOT) => command::plot(),
        _ => Err(anyhow!("Subcommand must be one of 'run', 'plot'")),
    }
}

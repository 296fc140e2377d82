use crate::cli::run;

pub mod cli;
mod config;
pub mod domain;
pub mod http;
pub mod quiz;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    run()
}

use clap::Parser;
use env_logger::Env;
use log::*;

use srnakit::cli::{run, Args};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{e}");
        std::process::exit(1);
    }
}

use clap::Parser;
use log::{error, info, LevelFilter};
use lolviz::Config;
use std::{process, str::FromStr};

fn main() {
    let cfg = Config::parse();

    // Logger first, so every later step can report.
    let log_level = LevelFilter::from_str(&cfg.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'info' instead.",
            cfg.log_level
        );
        LevelFilter::Info
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!("Starting lolviz with log level: {}", log_level);

    if let Err(err) = lolviz::run(&cfg) {
        error!(err:err; "Run failed");
        process::exit(1);
    }

    info!("Completed successfully");
}

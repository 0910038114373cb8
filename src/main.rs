use std::process;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use fqmer::{cli::Args, config::Config, run};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::new(args.k, args.min_quality).unwrap_or_else(|e| {
        eprintln!(
            "{}\n {}",
            "Configuration error:".blue().bold(),
            e.to_string().blue()
        );
        process::exit(1);
    });

    if !args.quiet {
        eprintln!("{}: {}", "k-length".bold(), args.k.to_string().blue().bold());
        eprintln!(
            "{}: {}",
            "quality cutoff".bold(),
            args.min_quality.to_string().blue().bold()
        );
        eprintln!(
            "{}: {}",
            "data".bold(),
            args.path.display().to_string().underline().bold().blue()
        );
        eprintln!();
    }

    if let Err(e) = run::run(&args.path, &config, args.format) {
        eprintln!(
            "{}\n {}",
            "Application error:".blue().bold(),
            e.to_string().blue()
        );
        process::exit(1);
    }
}

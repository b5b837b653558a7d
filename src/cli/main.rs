//! statsbomb-tables: flatten open-data documents into tables

use clap::Parser;

use statsbomb_tables::cli::{Cli, run};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}

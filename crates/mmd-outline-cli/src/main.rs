//! mmd-outline CLI - Derive text outlines from Mermaid diagram sources

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    let app = cli::OutlineApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use anyhow::Result;
use clap::Parser;
use randscatter::cli::Cli;

fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Run the main application logic from the library
    if let Err(e) = randscatter::run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

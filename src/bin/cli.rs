// src/bin/cli.rs
use pricewatch::cli;

fn main() -> color_eyre::Result<()> {
    cli::run()
}

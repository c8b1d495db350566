use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "tp", about = concat!("tagpane v", env!("CARGO_PKG_VERSION"), " - edit audio tags from the terminal"), version)]
struct Cli {
    /// Directory to list audio files from (defaults to the current directory)
    dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let dir = cli.dir.unwrap_or_else(|| PathBuf::from("."));

    if let Err(e) = tagpane::tui::run(&dir) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

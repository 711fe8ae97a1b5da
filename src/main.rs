use anyhow::Result;
use clap::Parser;
use jukebox::{Catalog, Menu, PlaylistDirectory};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jukebox")]
#[command(about = "Organize a song library into playlists from the console", long_about = None)]
struct Args {
    /// Path to the tab-delimited song catalog
    #[arg(default_value = "songs.csv")]
    catalog: String,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in the catalog path
    let catalog_path = shellexpand::tilde(&args.catalog);

    log::info!("Loading song catalog from {}", catalog_path);
    let catalog = Catalog::load(PathBuf::from(catalog_path.as_ref()).as_path())?;

    println!("SUCCESS! {} songs were loaded.\n", catalog.len());

    let mut directory = PlaylistDirectory::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();

    let mut menu = Menu::new(
        &catalog,
        &mut directory,
        stdin.lock(),
        stdout.lock(),
        stderr.lock(),
    );
    menu.run()?;

    Ok(())
}

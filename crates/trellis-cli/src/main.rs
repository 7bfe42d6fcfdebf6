use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use trellis_config::{CONFIG_FILENAME, Config};
use trellis_engine::{io, parsing};

#[derive(Parser)]
#[command(
    name = "trellis",
    version,
    about = "Turn a markdown outline into a task-board tree"
)]
struct Cli {
    /// Markdown note to parse
    note: PathBuf,

    /// Extra config file, applied after the default layers
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the parsed tree structure
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layer order: cwd, home, the note's own directory, then any -c file.
    let mut config_paths = Config::default_paths();
    if let Some(dir) = cli.note.parent().filter(|d| !d.as_os_str().is_empty()) {
        config_paths.push(dir.join(CONFIG_FILENAME));
    }
    if let Some(extra) = &cli.config {
        config_paths.push(extra.clone());
    }

    let _config = match Config::load_layered(&config_paths) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config: {e}");
            process::exit(1);
        }
    };

    let lines = match io::read_note(&cli.note) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("Error: Failed to read '{}': {e}", cli.note.display());
            process::exit(1);
        }
    };

    let tree = match parsing::parse(&lines) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if cli.verbose {
        print!("{tree}");
    }

    Ok(())
}

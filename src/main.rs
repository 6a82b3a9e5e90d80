use clap::Parser;
use setlist::time::total_running_time;
use setlist::{
    to_json, ParseOutcome, ParserConfig, RandomIds, SequentialIds, SetlistError, SetlistParser,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "setlist")]
#[command(about = "Convert a plain-text setlist into JSON song records")]
#[command(version)]
struct Args {
    /// Setlist text file (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Write the JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML file with marker and gap settings
    #[arg(short, long, env = "SETLIST_CONFIG")]
    config: Option<PathBuf>,

    /// Number songs song-1, song-2, ... instead of random UUIDs
    #[arg(long)]
    sequential_ids: bool,

    /// Print the total running time of the show to stderr
    #[arg(long)]
    total: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SetlistError> {
    let config = match &args.config {
        Some(path) => {
            let config = ParserConfig::load(path)?;
            info!("Loaded configuration from {}", path.display());
            config
        }
        None => ParserConfig::default(),
    };
    let gap_seconds = config.gap_seconds;

    let source = read_input(args.input.as_deref())?;

    let outcome: ParseOutcome = if args.sequential_ids {
        SetlistParser::with_ids(config, SequentialIds::new()).parse(&source)
    } else {
        SetlistParser::with_ids(config, RandomIds).parse(&source)
    };

    if outcome.dropped > 0 {
        warn!(
            "Skipped {} block(s) missing a title or duration",
            outcome.dropped
        );
    }

    let json = to_json(&outcome.songs)?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", json)).map_err(|source| SetlistError::Io {
                path: path.clone(),
                source,
            })?;
            info!("Wrote {} songs to {}", outcome.songs.len(), path.display());
        }
        None => println!("{}", json),
    }

    if args.total {
        eprintln!(
            "Total running time: {}",
            total_running_time(&outcome.songs, gap_seconds)
        );
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, SetlistError> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| SetlistError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => io::read_to_string(io::stdin()).map_err(|source| SetlistError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        }),
    }
}

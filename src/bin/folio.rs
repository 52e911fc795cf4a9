use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out diary entries into pages.
    Layout(LayoutArgs),
    /// Print the default layout configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input entries JSON (an array of entries).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output pages JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Layout configuration JSON; omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Config => cmd_config(),
    }
}

fn read_entries(path: &Path) -> anyhow::Result<Vec<folio::Entry>> {
    let f = File::open(path).with_context(|| format!("open entries '{}'", path.display()))?;
    let entries: Vec<folio::Entry> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse entries JSON '{}'", path.display()))?;
    Ok(entries)
}

fn read_config(path: Option<&Path>) -> anyhow::Result<folio::LayoutConfig> {
    let Some(path) = path else {
        return Ok(folio::LayoutConfig::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let cfg = folio::LayoutConfig::from_json(&s)
        .with_context(|| format!("load config '{}'", path.display()))?;
    Ok(cfg)
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let entries = read_entries(&args.in_path)?;
    let config = read_config(args.config.as_deref())?;
    let engine = folio::LayoutEngine::new(config)?;
    let output = engine.process_entries(&entries);

    let f = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    let mut w = BufWriter::new(f);
    if args.pretty {
        serde_json::to_writer_pretty(&mut w, &output)?;
    } else {
        serde_json::to_writer(&mut w, &output)?;
    }
    w.flush()?;

    eprintln!(
        "wrote {} ({} pages, {} entries)",
        args.out.display(),
        output.pages.len(),
        entries.len()
    );
    if !output.dropped.is_empty() {
        eprintln!("dropped {} photo(s) that fit nowhere", output.dropped.len());
    }
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(&folio::LayoutConfig::default())?;
    println!("{s}");
    Ok(())
}

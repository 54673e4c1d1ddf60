use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rankrace::RaceConfig;

#[derive(Parser, Debug)]
#[command(name = "rankrace", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the keyframe sequence and write it as JSON.
    Frames(FramesArgs),
    /// Print dataset diagnostics without writing frames.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input records JSON (an array of {entity, time, value} objects;
    /// "name" and "year" are accepted as aliases).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path for the keyframe sequence.
    #[arg(long)]
    out: PathBuf,

    /// Distinct ranks to show; every position below shares the overflow rank.
    #[arg(long, default_value_t = RaceConfig::default().top_n)]
    top_n: usize,

    /// Interpolated sub-frames per snapshot interval.
    #[arg(long, default_value_t = RaceConfig::default().steps)]
    steps: usize,

    /// Per-frame tick in milliseconds, forwarded to consumers.
    #[arg(long, default_value_t = RaceConfig::default().tick_ms)]
    tick_ms: u64,

    /// Seed for deterministic color assignment.
    #[arg(long, default_value_t = RaceConfig::default().seed)]
    seed: u64,

    /// Write JSON lines (one frame per line) instead of a JSON array.
    #[arg(long)]
    jsonl: bool,

    /// Pretty-print the JSON array output.
    #[arg(long)]
    pretty: bool,

    /// Print the sequence fingerprint to stderr.
    #[arg(long)]
    fingerprint: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input records JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read_records_json(path: &Path) -> anyhow::Result<Vec<rankrace::RawRecord>> {
    let f = File::open(path).with_context(|| format!("open records '{}'", path.display()))?;
    let r = BufReader::new(f);
    let records: Vec<rankrace::RawRecord> =
        serde_json::from_reader(r).with_context(|| "parse records JSON")?;
    Ok(records)
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let records = read_records_json(&args.in_path)?;
    let observations = rankrace::observations(records)?;

    let config = RaceConfig {
        top_n: args.top_n,
        steps: args.steps,
        tick_ms: args.tick_ms,
        seed: args.seed,
    };
    let race = rankrace::build_race(&observations, &config)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let file = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    let mut out = BufWriter::new(file);

    if args.jsonl {
        let mut sink = rankrace::JsonLinesSink::new(&mut out);
        rankrace::play(&race, &mut sink)?;
    } else if args.pretty {
        serde_json::to_writer_pretty(&mut out, race.keyframes())
            .with_context(|| "encode keyframes JSON")?;
        out.write_all(b"\n")?;
    } else {
        serde_json::to_writer(&mut out, race.keyframes())
            .with_context(|| "encode keyframes JSON")?;
        out.write_all(b"\n")?;
    }
    out.flush()
        .with_context(|| format!("flush output '{}'", args.out.display()))?;

    if args.fingerprint {
        eprintln!("fingerprint: {}", race.fingerprint());
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let records = read_records_json(&args.in_path)?;
    let record_count = records.len();
    let observations = rankrace::observations(records)?;

    let entities = rankrace::aggregate::roster(&observations);
    let snapshots = rankrace::aggregate::snapshots(&observations)?;
    let config = RaceConfig::default();
    let race = rankrace::build_race(&observations, &config)?;

    eprintln!("dataset diagnostics:");
    eprintln!("  records:     {record_count}");
    eprintln!("  entities:    {}", entities.len());
    eprintln!("  snapshots:   {}", snapshots.len());
    if let (Some(first), Some(last)) = (snapshots.first(), snapshots.last()) {
        eprintln!("  time span:   {} .. {}", first.time.0, last.time.0);
    }
    eprintln!("  keyframes:   {} (steps={})", race.len(), config.steps);
    eprintln!("  fingerprint: {}", race.fingerprint());
    Ok(())
}

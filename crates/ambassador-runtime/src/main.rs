//! Ambassador Runtime: replay a transaction log against the reward program.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use ambassador_rewards::prelude::*;
use ambassador_runtime::replay;
use ambassador_telemetry::{init_logging, TelemetryConfig};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

/// Replay JSON-lines transactions against an in-memory ledger.
#[derive(Parser, Debug)]
#[command(name = "ambassador-runtime")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Transaction log, one JSON object per line ("-" for stdin)
    input: PathBuf,

    /// Program configuration (JSON); reference parameters if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Id of the hosted program instance
    #[arg(long, default_value = "1")]
    program_id: u64,

    /// Initial state snapshot (JSON)
    #[arg(long)]
    restore: Option<PathBuf>,

    /// Write the final snapshot here instead of stdout
    #[arg(long)]
    snapshot_out: Option<PathBuf>,

    /// Emit the final snapshot in the flat key/value layout
    #[arg(long)]
    kv: bool,

    /// Skip post-transition invariant checks
    #[arg(long)]
    no_invariants: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&TelemetryConfig::from_env()).context("initializing logging")?;

    let program = match &args.config {
        Some(path) => ProgramConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ProgramConfig::default(),
    };

    let store = InMemoryStateStore::new();
    if let Some(path) = &args.restore {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        store.restore(StateSnapshot::from_json(&raw)?)?;
    }

    let service = RewardProgramService::new(
        store,
        program,
        ServiceConfig {
            program_id: ProgramId(args.program_id),
            check_invariants: !args.no_invariants,
        },
    );

    let stdout = io::stdout();
    let summary = if args.input.as_os_str() == "-" {
        replay(&service, io::stdin().lock(), stdout.lock())?
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("opening {}", args.input.display()))?;
        replay(&service, BufReader::new(file), stdout.lock())?
    };

    let stats = service.stats();
    info!(
        processed = summary.processed,
        approved = summary.approved,
        rejected = stats.rejected,
        "replay finished"
    );

    let snapshot = service.snapshot()?;
    let rendered = if args.kv {
        serde_json::to_string_pretty(&snapshot.to_kv())?
    } else {
        snapshot.to_json()?
    };

    match &args.snapshot_out {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("writing snapshot {}", path.display()))?,
        None => {
            let mut out = BufWriter::new(stdout.lock());
            writeln!(out, "{rendered}")?;
            out.flush()?;
        }
    }

    Ok(())
}

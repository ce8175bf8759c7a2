mod verify;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hashchain_core::{constants::DEMO_PAYLOADS, Block, Chain};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use verify::Verdict;

#[derive(Parser, Debug)]
#[command(name = "hashchain")]
#[command(about = "Build and verify a hash-linked chain of records")]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. info, debug)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an in-memory chain, print it, then check every link
    Demo {
        /// Payload to append; repeat for several blocks (default: Hello, Bye)
        #[arg(long = "data")]
        data: Vec<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Check a JSON chain dump produced by `demo --format json`
    Verify {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Demo { data, format } => demo(data, format),
        Command::Verify { file, format } => verify_file(&file, format),
    }
}

fn demo(data: Vec<String>, format: Format) -> Result<()> {
    let payloads = if data.is_empty() {
        DEMO_PAYLOADS.iter().map(|s| s.to_string()).collect()
    } else {
        data
    };

    let mut chain = Chain::new();
    for payload in payloads {
        let block = chain.append(payload)?;
        info!(index = block.index, hash = %block.hash, "appended");
    }

    let verdicts: Vec<Verdict> = chain
        .validate()
        .into_iter()
        .map(|(position, valid)| Verdict {
            position,
            valid,
            reason: None,
        })
        .collect();

    match format {
        Format::Json => {
            let out = json!({ "chain": chain.blocks(), "verdicts": verdicts });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Text => {
            for block in chain.blocks() {
                print_block(block);
            }
            print_verdicts(&verdicts);
        }
    }
    Ok(())
}

fn verify_file(path: &Path, format: Format) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let values = verify::blocks_from_json(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    info!(blocks = values.len(), "verifying chain dump");

    let verdicts = verify::verify_values(&values);
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&verdicts)?),
        Format::Text => print_verdicts(&verdicts),
    }

    let invalid = verdicts.iter().filter(|v| !v.valid).count();
    if invalid > 0 {
        bail!("{invalid} invalid block(s)");
    }
    Ok(())
}

fn print_block(block: &Block) {
    println!(
        "#{} ts={} prev={:?} hash={} data={:?}",
        block.index, block.timestamp, block.previous_hash, block.hash, block.data
    );
}

fn print_verdicts(verdicts: &[Verdict]) {
    for v in verdicts {
        match (&v.reason, v.valid) {
            (_, true) => println!("Block[{}] is valid.", v.position),
            (Some(reason), false) => println!("Block[{}] is invalid: {reason}", v.position),
            (None, false) => println!("Block[{}] is invalid.", v.position),
        }
    }
}

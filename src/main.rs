use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use seqops::prelude::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "seqops", about = "Index, split, splice and group whitespace-separated tokens")]
struct Cli {
    /// Trace cursor lifecycle events on stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Read tokens from this file instead of stdin.
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the positions of every token equal to TARGET.
    Indices {
        /// Token to look for.
        target: String,
        /// Only the first N positions.
        #[arg(long, conflicts_with = "last")]
        first: Option<usize>,
        /// Only the last N positions.
        #[arg(long)]
        last: Option<usize>,
    },
    /// Print one chunk of tokens per line.
    #[command(group(ArgGroup::new("mode").required(true).args(["separator", "size", "parts", "per_worker"])))]
    Split {
        /// Split on this token (dropped from the output).
        #[arg(long)]
        separator: Option<String>,
        /// Chunks of at most N tokens.
        #[arg(long)]
        size: Option<usize>,
        /// About N chunks of equal size.
        #[arg(long)]
        parts: Option<usize>,
        /// One chunk per worker (SEQOPS_PARTITIONS or available parallelism).
        #[arg(long)]
        per_worker: bool,
    },
    /// Print each group as `key<TAB>tokens`, in order of first occurrence.
    Group {
        /// Grouping key.
        #[arg(long, value_enum, default_value_t = GroupKey::Identity)]
        by: GroupKey,
    },
    /// Insert ITEMS before position AT.
    Insert {
        /// Zero-based insertion position; past the end appends.
        #[arg(long)]
        at: usize,
        /// Tokens to insert.
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Remove COUNT tokens starting at START.
    Remove {
        /// First position removed.
        #[arg(long)]
        start: usize,
        /// Number of tokens removed.
        #[arg(long)]
        count: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GroupKey {
    /// The token itself.
    Identity,
    /// Its first character.
    FirstChar,
    /// Its length in characters.
    Len,
}

impl GroupKey {
    fn key(self, token: &str) -> String {
        match self {
            GroupKey::Identity => token.to_string(),
            GroupKey::FirstChar => token.chars().next().map(String::from).unwrap_or_default(),
            GroupKey::Len => token.chars().count().to_string(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let tokens = read_tokens(cli.input.as_ref())?;
    debug!(tokens = tokens.len(), "input read");

    match cli.command {
        Commands::Indices {
            target,
            first,
            last,
        } => run_indices(&tokens, &target, first, last)?,
        Commands::Split {
            separator,
            size,
            parts,
            per_worker,
        } => run_split(&tokens, separator, size, parts, per_worker)?,
        Commands::Group { by } => run_group(&tokens, by),
        Commands::Insert { at, items } => print_line(tokens.iter().insert_range(at, items.iter())),
        Commands::Remove { start, count } => {
            let kept = tokens
                .iter()
                .remove_range(start, count)
                .with_context(|| format!("cannot remove {count} tokens at {start}"))?;
            print_line(kept);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "seqops=trace" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn read_tokens(path: Option<&PathBuf>) -> Result<Vec<String>> {
    let contents = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read input from stdin")?;
            buffer
        }
    };
    Ok(contents.split_whitespace().map(str::to_string).collect())
}

fn run_indices(
    tokens: &[String],
    target: &str,
    first: Option<usize>,
    last: Option<usize>,
) -> Result<()> {
    let source = tokens.iter().map(String::as_str);
    let positions: Vec<usize> = match (first, last) {
        (Some(n), _) => source
            .first_n_indices_of(target, n)
            .context("invalid --first")?
            .into_iter()
            .collect(),
        (None, Some(n)) => source
            .last_n_indices_of(target, n)
            .context("invalid --last")?
            .into_iter()
            .collect(),
        (None, None) => source.indices_of(target).into_iter().collect(),
    };
    for position in positions {
        println!("{position}");
    }
    Ok(())
}

fn run_split(
    tokens: &[String],
    separator: Option<String>,
    size: Option<usize>,
    parts: Option<usize>,
    per_worker: bool,
) -> Result<()> {
    let source = tokens.iter();
    let chunks: Vec<Vec<&String>> = if let Some(separator) = separator {
        source.split_by(&separator).into_iter().collect()
    } else if let Some(size) = size {
        source.chunks_of(size).context("invalid --size")?.into_iter().collect()
    } else if let Some(parts) = parts {
        source.split_into(parts).context("invalid --parts")?.into_iter().collect()
    } else if per_worker {
        let config = PartitionConfig::from_env()
            .with_context(|| format!("invalid {}", PartitionConfig::ENV_VAR))?;
        debug!(partitions = config.partitions(), "splitting per worker");
        source.split_per_worker(&config).into_iter().collect()
    } else {
        Vec::new()
    };
    for chunk in chunks {
        print_line(chunk);
    }
    Ok(())
}

fn run_group(tokens: &[String], by: GroupKey) {
    let groups = tokens.iter().group_by(move |token| by.key(token));
    for group in &groups {
        let (key, items) = group.into_parts();
        println!("{key}\t{}", join(items));
    }
}

fn print_line<'a>(tokens: impl IntoIterator<Item = &'a String>) {
    println!("{}", join(tokens));
}

fn join<'a>(tokens: impl IntoIterator<Item = &'a String>) -> String {
    tokens
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use genodist::io::{read_fasta, truncate_to_common_length};
use genodist::render::{edit_positions, elided_alignment, full_alignment};
use genodist::{compare_against, decode_sequence, hamming, Comparison, ResultTable, SearchConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "genodist", about = "Banded edit distance between whole genomes")]
struct Cli {
    /// Log search progress to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare a base genome against one or more others.
    Compare {
        /// Base genome (FASTA; first record is used).
        base: PathBuf,
        /// Genomes to compare against the base.
        #[arg(required = true)]
        others: Vec<PathBuf>,
        /// Matching columns shown around each difference.
        #[arg(long, default_value_t = 1)]
        context: usize,
        /// Print the whole alignment instead of the elided view.
        #[arg(long)]
        full: bool,
        /// Band radius tried first.
        #[arg(long, default_value_t = 1)]
        initial_radius: usize,
        /// Worker threads (default: one per core).
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Count mismatched positions between two genomes.
    Hamming {
        /// First genome.
        a: PathBuf,
        /// Second genome.
        b: PathBuf,
    },
    /// Validate and normalise a genome, printing the decoded sequence.
    Encode {
        /// Genome to encode.
        fasta: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compare {
            base,
            others,
            context,
            full,
            initial_radius,
            threads,
        } => run_compare(base, others, context, full, initial_radius, threads)?,
        Commands::Hamming { a, b } => run_hamming(a, b)?,
        Commands::Encode { fasta } => run_encode(fasta)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "genodist=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<genodist::PackedSequence> {
    read_fasta(path).with_context(|| format!("failed to load genome from {}", path.display()))
}

fn run_compare(
    base_path: PathBuf,
    other_paths: Vec<PathBuf>,
    context: usize,
    full: bool,
    initial_radius: usize,
    threads: Option<usize>,
) -> Result<()> {
    let mut sequences = Vec::with_capacity(other_paths.len() + 1);
    sequences.push(load(&base_path)?);
    for path in &other_paths {
        sequences.push(load(path)?);
    }

    let common = truncate_to_common_length(&mut sequences);
    info!(genomes = sequences.len(), common, "truncated to common length");

    let (base, others) = sequences
        .split_first()
        .context("no base genome loaded")?;
    let config = SearchConfig::default().with_initial_radius(initial_radius);
    let table = ResultTable::with_slots(others.len());

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build().context("failed to build thread pool")?;
    pool.install(|| compare_against(base, others, &config, &table))
        .context("batch comparison failed")?;

    for (slot, path) in other_paths.iter().enumerate() {
        let result = table
            .get(slot)
            .with_context(|| format!("no result for {}", path.display()))?;
        print_comparison(path, base, &others[slot], result, common, context, full);
    }

    Ok(())
}

fn print_comparison(
    path: &Path,
    base: &genodist::PackedSequence,
    other: &genodist::PackedSequence,
    result: &Comparison,
    common: usize,
    context: usize,
    full: bool,
) {
    let positions = edit_positions(&result.edits);
    println!(
        "{}\tdistance={}\tidentity={:.3}%\tsubstitutions={}\tgaps_base={}\tgaps_other={}",
        path.display(),
        result.distance,
        result.percent_identity(common),
        positions.substitutions.len(),
        positions.gaps_a.len(),
        positions.gaps_b.len(),
    );

    if full {
        let (row_a, row_b) = full_alignment(base, other, &result.edits);
        println!("{row_a}\n{row_b}");
    } else {
        let view = elided_alignment(base, other, &result.edits, context);
        println!("{}\n{}\n{}", view.a, view.markers, view.b);
    }
}

fn run_hamming(a_path: PathBuf, b_path: PathBuf) -> Result<()> {
    let a = load(&a_path)?;
    let b = load(&b_path)?;
    ensure!(
        a.len() == b.len(),
        "genomes differ in length ({} vs {}); hamming needs equal lengths",
        a.len(),
        b.len()
    );
    let distance = hamming(&a, &b)?;
    println!("{distance}");
    Ok(())
}

fn run_encode(path: PathBuf) -> Result<()> {
    let sequence = load(&path)?;
    println!(
        ">{}\tlen={}\tfingerprint={}",
        path.display(),
        sequence.len(),
        sequence.fingerprint().to_hex()
    );
    println!("{}", decode_sequence(&sequence));
    Ok(())
}

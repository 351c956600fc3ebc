mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::Config;
use pairalign_core::fasta::{read_records, read_sequence, write_alignment_file};
use pairalign_core::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pairalign")]
#[command(about = "Pairwise sequence comparison: edit distance, LCS, global and local alignment")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file (defaults to ./pairalign.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// First and second sequence files; every record of a file is joined into one sequence
#[derive(Args)]
struct PairArgs {
    /// FASTA file holding the first sequence
    first: PathBuf,

    /// FASTA file holding the second sequence
    second: PathBuf,
}

#[derive(Args)]
struct ScoringArgs {
    /// Reward for a match column
    #[arg(long = "match")]
    match_score: Option<f64>,

    /// Penalty for a mismatch column
    #[arg(long = "mismatch")]
    mismatch_penalty: Option<f64>,

    /// Penalty for a gap column
    #[arg(long = "gap")]
    gap_penalty: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit (Levenshtein) distance between two sequences
    Edit {
        #[command(flatten)]
        pair: PairArgs,

        /// Also print one minimum-edit alignment
        #[arg(long)]
        show_alignment: bool,
    },

    /// Longest common subsequence of two sequences
    Lcs {
        #[command(flatten)]
        pair: PairArgs,
    },

    /// Global alignment with a linear gap penalty
    Global {
        #[command(flatten)]
        pair: PairArgs,

        #[command(flatten)]
        scoring: ScoringArgs,

        /// Write the alignment as FASTA
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Best local alignment between substrings of two sequences
    Local {
        #[command(flatten)]
        pair: PairArgs,

        #[command(flatten)]
        scoring: ScoringArgs,

        /// Write the alignment as FASTA
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Count k-mers shared by two sequences
    Kmers {
        #[command(flatten)]
        pair: PairArgs,

        /// k-mer length (overrides the config file)
        #[arg(short)]
        k: Option<usize>,
    },

    /// Pairwise edit-distance matrix over every record of one file
    Distances {
        /// FASTA file with one pattern per record
        input: PathBuf,
    },
}

#[derive(Serialize)]
struct EditReport {
    distance: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    alignment: Option<AlignmentRows>,
}

#[derive(Serialize)]
struct LcsReport {
    length: usize,
    subsequence: String,
}

#[derive(Serialize)]
struct AlignmentRows {
    top: String,
    bottom: String,
}

impl From<&Alignment> for AlignmentRows {
    fn from(alignment: &Alignment) -> Self {
        Self {
            top: String::from_utf8_lossy(&alignment.top).into_owned(),
            bottom: String::from_utf8_lossy(&alignment.bottom).into_owned(),
        }
    }
}

#[derive(Serialize)]
struct GlobalReport {
    scoring: Scoring,
    score: f64,
    identity: f32,
    alignment: AlignmentRows,
}

#[derive(Serialize)]
struct LocalReport {
    scoring: Scoring,
    score: f64,
    start0: usize,
    end0: usize,
    start1: usize,
    end1: usize,
    alignment: AlignmentRows,
}

#[derive(Serialize)]
struct KmerReport {
    k: usize,
    shared: usize,
}

#[derive(Serialize)]
struct DistanceReport {
    ids: Vec<String>,
    distances: Vec<Vec<usize>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Edit { pair, show_alignment } => cmd_edit(&pair, show_alignment, cli.json),
        Commands::Lcs { pair } => cmd_lcs(&pair, cli.json),
        Commands::Global { pair, scoring, output } => {
            let scoring = resolve_scoring(&config, &scoring);
            cmd_global(&pair, &scoring, output.as_deref(), cli.json)
        }
        Commands::Local { pair, scoring, output } => {
            let scoring = resolve_scoring(&config, &scoring);
            cmd_local(&pair, &scoring, output.as_deref(), cli.json)
        }
        Commands::Kmers { pair, k } => cmd_kmers(&pair, k.unwrap_or(config.kmer.k), cli.json),
        Commands::Distances { input } => cmd_distances(&input, cli.json),
    }
}

fn resolve_scoring(config: &Config, args: &ScoringArgs) -> Scoring {
    config.scoring_with(args.match_score, args.mismatch_penalty, args.gap_penalty)
}

fn load_pair(pair: &PairArgs) -> Result<(Vec<u8>, Vec<u8>)> {
    let first = read_sequence(&pair.first)
        .with_context(|| format!("Failed to read sequence from {}", pair.first.display()))?;
    let second = read_sequence(&pair.second)
        .with_context(|| format!("Failed to read sequence from {}", pair.second.display()))?;

    log::info!(
        "Loaded sequences: {} ({} bp) vs {} ({} bp)",
        pair.first.display(),
        first.len(),
        pair.second.display(),
        second.len()
    );
    Ok((first, second))
}

fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

fn save_alignment(alignment: &Alignment, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        write_alignment_file(alignment, path)
            .with_context(|| format!("Failed to write alignment to {}", path.display()))?;
        log::info!("Alignment written to {}", path.display());
    }
    Ok(())
}

fn cmd_edit(pair: &PairArgs, show_alignment: bool, json: bool) -> Result<()> {
    let (a, b) = load_pair(pair)?;
    let distance = edit_distance(&a, &b)?;
    let alignment = if show_alignment {
        Some(edit_alignment(&a, &b)?)
    } else {
        None
    };

    if json {
        return print_json(&EditReport {
            distance,
            alignment: alignment.as_ref().map(AlignmentRows::from),
        });
    }

    println!("Edit distance: {}", distance);
    if let Some(alignment) = alignment {
        println!("{}", alignment);
    }
    Ok(())
}

fn cmd_lcs(pair: &PairArgs, json: bool) -> Result<()> {
    let (a, b) = load_pair(pair)?;
    let subsequence = longest_common_subsequence(&a, &b)?;
    let report = LcsReport {
        length: subsequence.len(),
        subsequence: String::from_utf8_lossy(&subsequence).into_owned(),
    };

    if json {
        return print_json(&report);
    }

    println!("LCS length: {}", report.length);
    println!("{}", report.subsequence);
    Ok(())
}

fn cmd_global(pair: &PairArgs, scoring: &Scoring, output: Option<&Path>, json: bool) -> Result<()> {
    let (a, b) = load_pair(pair)?;
    let alignment = global_alignment(&a, &b, scoring)?;
    save_alignment(&alignment, output)?;

    let report = GlobalReport {
        scoring: *scoring,
        score: alignment.score(scoring),
        identity: alignment.identity(),
        alignment: AlignmentRows::from(&alignment),
    };

    if json {
        return print_json(&report);
    }

    println!("Score: {}", report.score);
    println!("Identity: {:.1}%", report.identity);
    println!("{}", alignment);
    Ok(())
}

fn cmd_local(pair: &PairArgs, scoring: &Scoring, output: Option<&Path>, json: bool) -> Result<()> {
    let (a, b) = load_pair(pair)?;
    let local = local_alignment(&a, &b, scoring)?;

    if local.is_empty() {
        log::warn!("No positive-scoring local alignment found");
    } else {
        save_alignment(&local.alignment, output)?;
    }

    let (start0, end0, start1, end1) = local.bounds();
    let report = LocalReport {
        scoring: *scoring,
        score: local.score,
        start0,
        end0,
        start1,
        end1,
        alignment: AlignmentRows::from(&local.alignment),
    };

    if json {
        return print_json(&report);
    }

    println!("Score: {}", report.score);
    println!("First: [{}, {})  Second: [{}, {})", start0, end0, start1, end1);
    println!("{}", local.alignment);
    Ok(())
}

fn cmd_kmers(pair: &PairArgs, k: usize, json: bool) -> Result<()> {
    let (a, b) = load_pair(pair)?;
    let report = KmerReport {
        k,
        shared: count_shared_kmers(&a, &b, k),
    };

    if json {
        return print_json(&report);
    }

    println!("Shared {}-mers: {}", report.k, report.shared);
    Ok(())
}

fn cmd_distances(input: &Path, json: bool) -> Result<()> {
    let records = read_records(input)
        .with_context(|| format!("Failed to read records from {}", input.display()))?;
    log::info!("Computing pairwise distances for {} records", records.len());

    let patterns: Vec<&[u8]> = records.iter().map(|record| record.seq.as_slice()).collect();
    let report = DistanceReport {
        distances: edit_distance_matrix(patterns.as_slice())?,
        ids: records.into_iter().map(|record| record.id).collect(),
    };

    if json {
        return print_json(&report);
    }

    for (id, row) in report.ids.iter().zip(&report.distances) {
        let cells: Vec<String> = row.iter().map(|d| d.to_string()).collect();
        println!("{}\t{}", id, cells.join("\t"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_overrides() {
        let cli = Cli::try_parse_from([
            "pairalign", "--json", "global", "a.fa", "b.fa", "--match", "2", "--gap", "0.5",
        ])
        .unwrap();
        assert!(cli.json);

        let Commands::Global { pair, scoring, output } = cli.command else {
            panic!("expected the global subcommand");
        };
        assert_eq!(pair.first, PathBuf::from("a.fa"));
        assert_eq!(pair.second, PathBuf::from("b.fa"));
        assert!(output.is_none());
        assert_eq!(
            resolve_scoring(&Config::default(), &scoring),
            Scoring::new(2.0, 1.0, 0.5)
        );
    }

    #[test]
    fn test_parse_kmers() {
        let cli = Cli::try_parse_from(["pairalign", "kmers", "a.fa", "b.fa", "-k", "5"]).unwrap();
        assert!(matches!(cli.command, Commands::Kmers { k: Some(5), .. }));
    }

    #[test]
    fn test_missing_argument() {
        assert!(Cli::try_parse_from(["pairalign", "edit", "a.fa"]).is_err());
    }

    #[test]
    fn test_alignment_rows() {
        let alignment = Alignment::new(b"AC-T".to_vec(), b"ACGT".to_vec());
        let rows = AlignmentRows::from(&alignment);
        assert_eq!(rows.top, "AC-T");
        assert_eq!(rows.bottom, "ACGT");
    }
}

//! Rank command - score a contaminant batch against a reference sequence.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::parsing::fasta;
use crate::scoring::ContaminationDetector;

/// Arguments for the rank command
#[derive(Args)]
pub struct RankArgs {
    /// Reference FASTA file (the first record is the reference sequence)
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Contaminant batch FASTA file, one record per candidate
    #[arg(required = true)]
    pub contaminants: PathBuf,

    /// Number of top contaminants to report
    #[arg(short = 'k', long = "top", default_value = "20")]
    pub top: usize,

    /// Minimum length a matched segment must reach to count
    #[arg(short = 'l', long = "threshold", default_value = "7")]
    pub threshold: usize,

    /// Print only the record ids of the winners, sorted, comma-separated
    #[arg(long)]
    pub sorted_ids: bool,
}

/// One row of ranked output
#[derive(Debug, Serialize)]
struct RankedContaminant {
    rank: usize,
    id: String,
    score: usize,
    bases: usize,
}

/// Execute the rank command
///
/// # Errors
///
/// Returns an error if inputs cannot be parsed, the threshold is zero, or a
/// sequence contains the reserved terminator byte.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: RankArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let reference = fasta::read_reference(&args.reference)?;
    if verbose {
        eprintln!(
            "Reference {}: {} bases",
            reference.id,
            reference.sequence.len()
        );
    }

    let records = fasta::read_fasta_records(&args.contaminants)?;
    if verbose {
        eprintln!("Scoring {} contaminant records", records.len());
    }

    let mut detector = ContaminationDetector::new(&reference.sequence, args.threshold)?;

    // Scores per sequence, and record ids queued per sequence so duplicate
    // sequences in the batch map back to distinct ids.
    let mut scores: HashMap<String, usize> = HashMap::new();
    let mut ids_by_sequence: HashMap<String, Vec<String>> = HashMap::new();

    for record in &records {
        let score = detector.add_contaminant(&record.sequence)?;
        scores.insert(record.sequence.clone(), score);
        ids_by_sequence
            .entry(record.sequence.clone())
            .or_default()
            .push(record.id.clone());
    }

    let ranked = rank_rows(&mut detector, args.top, &scores, &mut ids_by_sequence);

    if args.sorted_ids {
        println!("{}", sorted_id_list(&ranked));
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_text(&reference.id, &detector, &ranked),
        OutputFormat::Json => print_json(&reference.id, &detector, &ranked)?,
        OutputFormat::Tsv => print_tsv(&ranked),
    }

    Ok(())
}

/// Pull the top-k sequences out of the detector and resolve them back to
/// record ids and scores.
fn rank_rows(
    detector: &mut ContaminationDetector,
    k: usize,
    scores: &HashMap<String, usize>,
    ids_by_sequence: &mut HashMap<String, Vec<String>>,
) -> Vec<RankedContaminant> {
    detector
        .top_contaminants(k)
        .into_iter()
        .enumerate()
        .map(|(index, sequence)| {
            let ids = ids_by_sequence.entry(sequence.clone()).or_default();
            let id = if ids.is_empty() {
                sequence.clone()
            } else {
                ids.remove(0)
            };
            RankedContaminant {
                rank: index + 1,
                id,
                score: scores.get(&sequence).copied().unwrap_or(0),
                bases: sequence.len(),
            }
        })
        .collect()
}

/// Comma-separated winner ids, sorted numerically when every id is a number
fn sorted_id_list(ranked: &[RankedContaminant]) -> String {
    let mut ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
    let numeric: Option<Vec<u64>> = ids.iter().map(|id| id.parse().ok()).collect();
    match numeric {
        Some(mut numbers) => {
            numbers.sort_unstable();
            numbers
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        }
        None => {
            ids.sort_unstable();
            ids.join(", ")
        }
    }
}

fn print_text(reference_id: &str, detector: &ContaminationDetector, ranked: &[RankedContaminant]) {
    println!(
        "\nTop {} of {} contaminants vs {} (threshold {})",
        ranked.len(),
        detector.len(),
        reference_id,
        detector.threshold(),
    );
    for row in ranked {
        println!(
            "  {:>3}. {}  score={} ({} bases)",
            row.rank, row.id, row.score, row.bases
        );
    }
}

fn print_json(
    reference_id: &str,
    detector: &ContaminationDetector,
    ranked: &[RankedContaminant],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "reference": reference_id,
        "threshold": detector.threshold(),
        "contaminants": detector.len(),
        "top": ranked,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(ranked: &[RankedContaminant]) {
    println!("rank\tid\tscore\tbases");
    for row in ranked {
        println!("{}\t{}\t{}\t{}", row.rank, row.id, row.score, row.bases);
    }
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use improve::prove::stage_name;
use improve::util::read_rows;
use improve::{prove, Finding, Options, Proof, Row};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "improve", version)]
#[command(about = "Find the fixed bells, complete extents and round blocks in a touch")]
struct Args {
    /// File with one row per line
    input: PathBuf,

    /// Prove the last row even if it repeats the first
    #[arg(long)]
    no_round_block: bool,

    /// Stop after the first analysis pass
    #[arg(long)]
    single_pass: bool,

    /// Most analysis passes to run on a false remainder
    #[arg(long, default_value_t = Options::default().max_passes)]
    max_passes: usize,

    /// Log analysis passes to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn extent_text(count: usize) -> &'static str {
    if count == 1 {
        "extent"
    } else {
        "extents"
    }
}

/// Lines describing `proof`, for the touch made of `rows`
fn report(rows: &[Row], proof: &Proof) -> Vec<String> {
    if let [row] = rows {
        return vec![format!("Parsed only one row {row}.")];
    }
    let mut lines = vec![
        format!("Detected stage as {}.", proof.stage),
        format!("Parsed {} rows.", proof.rows),
    ];

    let mut effective_stage = proof.stage;
    let mut fixed = String::new();
    for finding in &proof.findings {
        match finding {
            Finding::RoundBlock {
                is_round_block: true,
                first,
                ..
            } => {
                if first.is_rounds() {
                    lines.push("Touch is a Round Block starting with Rounds.".to_string());
                } else {
                    lines.push(format!("Touch is a Round Block starting with {first}."));
                }
            },
            Finding::RoundBlock {
                is_round_block: false,
                first,
                last,
            } => {
                lines.push(format!(
                    "Touch is a Non-Round Block starting with {first} and finishing with {last}."
                ));
                lines.push("The final row will be included in the proof.".to_string());
            },
            Finding::FixedBells {
                mask,
            } => {
                fixed = mask.to_string();
            },
            Finding::ExtentCount {
                count,
                effective_stage: stage,
            } => {
                effective_stage = *stage;
                lines.push(format!(
                    "Contains {count} {} {} with {fixed} as fixed bell(s).",
                    stage_name(*stage),
                    extent_text(*count),
                ));
            },
            Finding::RemainderSize {
                count,
                distinct,
            } => {
                if *count == 0 {
                    lines.push("No rows remain.".to_string());
                } else if *distinct {
                    lines.push(format!(
                        "The remaining {count} {} rows are distinct.",
                        stage_name(effective_stage),
                    ));
                } else {
                    lines.push(format!("The remaining {count} rows contain repeated rows."));
                }
            },
        }
    }
    lines.push(
        if proof.is_true() {
            "Touch is true."
        } else {
            "Touch is false."
        }
        .to_string(),
    );
    lines
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("iMprove v{}", env!("CARGO_PKG_VERSION"));
    let rows = match read_rows(&args.input) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        },
    };
    let options = Options {
        round_block: !args.no_round_block,
        iterate: !args.single_pass,
        max_passes: args.max_passes,
    };
    for line in report(&rows, &prove(&rows, &options)) {
        println!("{line}");
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use improve::util::parse_rows;
    use pretty_assertions::assert_eq;

    use super::*;

    fn lines_for(text: &str) -> Vec<String> {
        let rows = parse_rows(text).unwrap();
        report(&rows, &prove(&rows, &Options::default()))
    }

    #[test]
    fn single_row_is_named() {
        assert_eq!(lines_for("132546\n"), vec!["Parsed only one row 132546."]);
    }

    #[test]
    fn extent_of_singles_from_rounds() {
        assert_eq!(
            lines_for("123\n132\n312\n321\n231\n213\n123\n"),
            vec![
                "Detected stage as 3.",
                "Parsed 7 rows.",
                "Touch is a Round Block starting with Rounds.",
                "Contains 1 Singles extent with xxx as fixed bell(s).",
                "No rows remain.",
                "Touch is true.",
            ],
        );
    }

    #[test]
    fn repeated_rows_are_reported_false() {
        let lines = lines_for("1234\n1234\n1234\n");
        assert_eq!(lines.last().map(String::as_str), Some("Touch is false."));
        assert!(lines.contains(&"The remaining 2 rows contain repeated rows.".to_string()));
    }
}

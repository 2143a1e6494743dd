use std::io;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

mod internal_util;
pub mod prove;
pub mod util;

pub use prove::{
    analyse,
    Analysis,
    FixedBell,
    FixedBells,
    Remainder,
    RoundBlock,
    Row,
    Stage,
};

/// Anything that can stop a touch from being read.
///
/// The analysis itself cannot fail; every error comes from parsing or
/// reading the input.
#[derive(Error, Debug)]
pub enum Error {
    /// A row is not a permutation of the bells of its stage.
    #[error("invalid row: {token}")]
    InvalidPermutation { token: String },

    /// A row is a different length to the first row.
    #[error("row on line {line} has {found} bells, expected {expected}")]
    RowLengthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// No rows at all.
    #[error("no rows found")]
    EmptyInput,

    /// A stage with no bells, or more bells than have symbols.
    #[error("invalid stage: {stage}")]
    InvalidStage { stage: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// How far [`prove`] should go.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Options {
    /// Leave out the last row when it repeats the first
    pub round_block: bool,
    /// Keep analysing a remainder that still contains repeated rows
    pub iterate: bool,
    /// Upper bound on analysis passes; `0` stops after the round block check
    pub max_passes: usize,
}
impl Default for Options {
    fn default() -> Self {
        Self {
            round_block: true,
            iterate: true,
            max_passes: 8,
        }
    }
}

/// A single fact established about a touch, in the order it was found.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Finding {
    /// Whether the touch ends with the row it started with
    RoundBlock {
        is_round_block: bool,
        first: Row,
        last: Row,
    },
    /// The bells fixed throughout the rows being analysed
    FixedBells { mask: FixedBells },
    /// Complete extents found at the stage left once fixed bells are removed
    ExtentCount { count: usize, effective_stage: usize },
    /// Rows outside the complete extents; `distinct` if none are repeated
    RemainderSize { count: usize, distinct: bool },
}

/// Everything [`prove`] found out about a touch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Proof {
    pub stage: usize,
    /// Number of rows supplied, including any closing row
    pub rows: usize,
    pub findings: Vec<Finding>,
}
impl Proof {
    pub fn is_round_block(&self) -> Option<bool> {
        self.findings.iter().find_map(|finding| {
            match finding {
                Finding::RoundBlock {
                    is_round_block, ..
                } => Some(*is_round_block),
                _ => None,
            }
        })
    }

    /// Complete extents found across every pass
    pub fn complete_extents(&self) -> usize {
        self.findings
            .iter()
            .map(|finding| {
                match finding {
                    Finding::ExtentCount {
                        count, ..
                    } => *count,
                    _ => 0,
                }
            })
            .sum()
    }

    fn last_remainder(&self) -> Option<(usize, bool)> {
        self.findings.iter().rev().find_map(|finding| {
            match finding {
                Finding::RemainderSize {
                    count,
                    distinct,
                } => Some((*count, *distinct)),
                _ => None,
            }
        })
    }

    /// Rows left over after the last pass
    pub fn remainder(&self) -> usize {
        self.last_remainder().map_or(0, |(count, _)| count)
    }

    /// Is every row outside the complete extents different from every other?
    pub fn is_true(&self) -> bool {
        self.last_remainder().is_none_or(|(_, distinct)| distinct)
    }
}

/// Prove a touch: decide whether it is a round block, then repeatedly find
/// the fixed bells and take out complete extents until the remainder has no
/// repeated rows (or no more progress can be made).
///
/// A touch of fewer than two rows has nothing to prove; its proof has no
/// findings.
pub fn prove(rows: &[Row], options: &Options) -> Proof {
    let mut proof = Proof {
        stage: rows.first().map_or(0, Row::stage),
        rows: rows.len(),
        findings: Vec::new(),
    };
    if rows.len() < 2 {
        return proof;
    }

    let mut remaining = if options.round_block {
        let block = RoundBlock::classify(rows);
        if let (Some(first), Some(last)) = (block.first(), block.last()) {
            proof.findings.push(Finding::RoundBlock {
                is_round_block: block.is_round(),
                first: first.clone(),
                last: last.clone(),
            });
        }
        block.proved_rows().to_vec()
    } else {
        rows.to_vec()
    };
    if remaining.len() < 2 {
        return proof;
    }

    let max_passes = if options.iterate {
        options.max_passes
    } else {
        options.max_passes.min(1)
    };
    for pass in 1..=max_passes {
        let mask = FixedBells::detect(&remaining)
            .expect("a pass always has at least two rows to analyse");
        let analysis = analyse(&remaining, &mask);
        debug!(pass, fixed = %mask, "finished pass");
        proof.findings.push(Finding::FixedBells {
            mask,
        });
        proof.findings.push(Finding::ExtentCount {
            count: analysis.complete_extents,
            effective_stage: analysis.effective_stage,
        });
        proof.findings.push(Finding::RemainderSize {
            count: analysis.remainder.len(),
            distinct: analysis.remainder.is_distinct(),
        });

        if analysis.remainder.is_distinct() || analysis.complete_extents == 0 {
            break;
        }
        remaining = analysis.remainder.rows().cloned().collect();
    }
    proof
}

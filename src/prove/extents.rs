use std::collections::HashMap;
use std::iter::empty;

use either::Either;
use frozenset::FrozenSet;
use tracing::debug;

use crate::internal_util::factorial;
use crate::prove::{FixedBells, Row};

/// A set of rows with no repeats, remembering the order they arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Rows in input order
    rows: Vec<Row>,
    /// The same rows, for membership tests
    members: FrozenSet<Row>,
}
impl Bucket {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn contains(&self, row: &Row) -> bool {
        self.members.contains(row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// Split `rows` into buckets, none of which holds a row twice.
///
/// Each row goes into the first bucket that does not already hold it, and a
/// bucket is only opened when every existing one does. A row occurring `k`
/// times therefore lands once in each of buckets `0..k`, so there are as many
/// buckets as the greatest multiplicity of any row, and the `k`th occurrence
/// of a row always goes to bucket `k - 1`.
pub fn allocate_buckets(rows: &[Row]) -> Vec<Bucket> {
    let mut occurrences = HashMap::<&Row, usize>::new();
    let mut buckets: Vec<Vec<Row>> = Vec::new();
    for row in rows {
        let seen = occurrences.entry(row).or_insert(0);
        let index = *seen;
        *seen += 1;
        if index == buckets.len() {
            buckets.push(Vec::new());
        }
        buckets[index].push(row.clone());
    }
    buckets
        .into_iter()
        .map(|rows| {
            Bucket {
                members: rows.iter().cloned().collect(),
                rows,
            }
        })
        .collect()
}

/// What is left once the complete extents have been taken out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remainder {
    /// Every row belonged to a complete extent
    None,
    /// A single partial extent; its rows are distinct
    Distinct(Vec<Row>),
    /// Several partial buckets flattened together, bucket by bucket. Some rows
    /// are repeated, so these are worth analysing again.
    Mixed(Vec<Row>),
}
impl Remainder {
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Distinct(rows) | Self::Mixed(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Are all the remaining rows different from each other?
    pub fn is_distinct(&self) -> bool {
        !matches!(self, Self::Mixed(_))
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        match self {
            Self::None => Either::Left(empty()),
            Self::Distinct(rows) | Self::Mixed(rows) => Either::Right(rows.iter()),
        }
    }
}

/// Result of a single pass of [`analyse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Bells not fixed by the mask
    pub effective_stage: usize,
    /// Rows in an extent at `effective_stage`
    pub extent_size: u128,
    pub complete_extents: usize,
    pub remainder: Remainder,
}

/// Count the complete extents in `rows`, given which bells are fixed.
///
/// Extents are counted from the first bucket onwards and counting stops at the
/// first bucket that is not exactly an extent in size; a full bucket after a
/// short one is left in the remainder. `fixed` may be empty, meaning no bells
/// are fixed.
///
/// With fewer than two bells free to move there is no extent to complete, so
/// rows that all agree are never counted as extents; each repeat of them is
/// left in the remainder.
pub fn analyse(rows: &[Row], fixed: &FixedBells) -> Analysis {
    let stage = rows.first().map_or(fixed.stage(), Row::stage);
    let effective_stage = stage.saturating_sub(fixed.num_fixed());
    let extent_size = factorial(effective_stage);

    let mut buckets = allocate_buckets(rows);
    let num_buckets = buckets.len();
    let complete_extents = if effective_stage < 2 {
        0
    } else {
        buckets
            .iter()
            .take_while(|bucket| bucket.len() as u128 == extent_size)
            .count()
    };
    buckets.drain(..complete_extents);

    let remainder = match buckets.len() {
        0 => Remainder::None,
        1 => {
            Remainder::Distinct(
                buckets
                    .pop()
                    .expect("there is exactly one bucket")
                    .into_rows(),
            )
        },
        _ => {
            Remainder::Mixed(
                buckets
                    .into_iter()
                    .flat_map(Bucket::into_rows)
                    .collect(),
            )
        },
    };
    debug!(
        rows = rows.len(),
        effective_stage,
        buckets = num_buckets,
        complete_extents,
        remainder = remainder.len(),
        "analysed rows"
    );

    Analysis {
        effective_stage,
        extent_size,
        complete_extents,
        remainder,
    }
}

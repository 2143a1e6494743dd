use std::fmt::{self, Display};
use std::ops::Index;
use std::str::FromStr;

use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::internal_util::factorial;
use crate::{Error, Result};

/// Bell symbols in place notation order; bell `n` (zero-based) is written as
/// `BELLS[n]`.
pub const BELLS: &[u8] = b"1234567890ETABCDFGHJKLMNPQRSUVWYZ";

/// The largest stage that can be written with [`BELLS`].
pub const MAX_STAGE: usize = BELLS.len();

/// Zero-based bell index for a symbol, if it is one.
pub fn bell_index(symbol: char) -> Option<u8> {
    let symbol = u8::try_from(symbol.to_ascii_uppercase()).ok()?;
    BELLS
        .iter()
        .position(|&b| b == symbol)
        .map(|i| u8::try_from(i).expect("BELLS has fewer than 256 symbols"))
}

/// Symbol for a zero-based bell index.
pub fn bell_symbol(bell: u8) -> char {
    char::from(BELLS[usize::from(bell)])
}

/// Conventional name for a number of bells, falling back to `Stage n`.
pub fn stage_name(stage: usize) -> String {
    const NAMES: [&str; 21] = [
        "Two",
        "Singles",
        "Minimus",
        "Doubles",
        "Minor",
        "Triples",
        "Major",
        "Caters",
        "Royal",
        "Cinques",
        "Maximus",
        "Sextuples",
        "Fourteen",
        "Septuples",
        "Sixteen",
        "Octuples",
        "Eighteen",
        "Nonuples",
        "Twenty",
        "Decuples",
        "Twenty-two",
    ];
    stage
        .checked_sub(2)
        .and_then(|i| NAMES.get(i))
        .map_or_else(|| format!("Stage {stage}"), ToString::to_string)
}

/// Number of bells in a row.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stage(usize);
impl Stage {
    /// # Errors
    ///
    /// A stage of zero, or one with more bells than there are symbols in
    /// [`BELLS`], is rejected.
    pub fn new(bells: usize) -> Result<Self> {
        if bells == 0 || bells > MAX_STAGE {
            return Err(Error::InvalidStage {
                stage: bells,
            });
        }
        Ok(Self(bells))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn name(self) -> String {
        stage_name(self.0)
    }

    /// Number of rows in an extent at this stage (`stage!`)
    pub fn extent_size(self) -> u128 {
        factorial(self.0)
    }
}
impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A single row: a permutation of the bells `0..stage`.
///
/// Two rows are equal exactly when their bells are in the same order, and the
/// derived [`Hash`] follows the same structure.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Row {
    bells: Vec<u8>,
}
impl Row {
    /// Rounds (the identity row) on `stage` bells
    pub fn rounds(stage: Stage) -> Self {
        Self {
            bells: (0..stage.get())
                .map(|b| u8::try_from(b).expect("stage is at most MAX_STAGE"))
                .collect(),
        }
    }

    /// Build a row from zero-based bell indices.
    ///
    /// # Errors
    ///
    /// Fails unless `bells` contains each of `0..bells.len()` exactly once.
    pub fn from_values(bells: Vec<u8>) -> Result<Self> {
        let stage = bells.len();
        if stage == 0
            || stage > MAX_STAGE
            || !bells.iter().all(|&b| usize::from(b) < stage)
            || !bells.iter().all_unique()
        {
            return Err(Error::InvalidPermutation {
                token: format!("{bells:?}"),
            });
        }
        Ok(Self {
            bells,
        })
    }

    /// Parse a row written in bell symbols, e.g. `"132546"`.
    ///
    /// # Errors
    ///
    /// The token must be exactly `stage` symbols long and name every bell of
    /// that stage once.
    pub fn parse(stage: Stage, token: &str) -> Result<Self> {
        let invalid = || {
            Error::InvalidPermutation {
                token: token.to_string(),
            }
        };
        if token.chars().count() != stage.get() {
            return Err(invalid());
        }
        let bells = token
            .chars()
            .map(|c| {
                bell_index(c)
                    .filter(|&b| usize::from(b) < stage.get())
                    .ok_or_else(invalid)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_values(bells).map_err(|_| invalid())
    }

    pub fn stage(&self) -> usize {
        self.bells.len()
    }

    pub fn values(&self) -> &[u8] {
        &self.bells
    }

    /// Is this row rounds (every bell in its home position)?
    pub fn is_rounds(&self) -> bool {
        self.bells
            .iter()
            .enumerate()
            .all(|(place, &bell)| usize::from(bell) == place)
    }
}
impl Index<usize> for Row {
    type Output = u8;

    fn index(&self, place: usize) -> &u8 {
        &self.bells[place]
    }
}
impl FromStr for Row {
    type Err = Error;

    /// Parse a row, taking the stage from the length of the token
    fn from_str(token: &str) -> Result<Self> {
        Self::parse(Stage::new(token.chars().count())?, token)
    }
}
impl Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bells.iter().map(|&b| bell_symbol(b)).join(""))
    }
}

/// One place of a [`FixedBells`] mask.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixedBell {
    /// This bell stays in this place in every row
    Fixed(u8),
    /// At least two rows disagree about this place
    Moving,
}

/// Which places hold the same bell throughout a set of rows.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedBells {
    places: Vec<FixedBell>,
}
impl FixedBells {
    /// A mask with no fixed bells
    pub fn none(stage: usize) -> Self {
        Self {
            places: vec![FixedBell::Moving; stage],
        }
    }

    /// Find the fixed bells of `rows`; `None` if there are no rows.
    ///
    /// A single row fixes every bell.
    pub fn detect<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Option<Self> {
        let mut rows = rows.into_iter();
        let first = rows.next()?;
        let initial = Self {
            places: first.values().iter().copied().map(FixedBell::Fixed).collect(),
        };
        Some(rows.fold(initial, |mask, row| mask.restrict(row)))
    }

    /// Mask for the rows seen so far plus `row`
    #[must_use]
    pub fn restrict(self, row: &Row) -> Self {
        debug_assert_eq!(self.stage(), row.stage());
        Self {
            places: self
                .places
                .into_iter()
                .zip(row.values())
                .map(|(place, &bell)| {
                    match place {
                        FixedBell::Fixed(fixed) if fixed == bell => place,
                        _ => FixedBell::Moving,
                    }
                })
                .collect(),
        }
    }

    pub fn stage(&self) -> usize {
        self.places.len()
    }

    pub fn places(&self) -> &[FixedBell] {
        &self.places
    }

    pub fn num_fixed(&self) -> usize {
        self.places
            .iter()
            .filter(|place| matches!(place, FixedBell::Fixed(_)))
            .count()
    }

    /// Number of bells left free to move
    pub fn effective_stage(&self) -> usize {
        self.stage() - self.num_fixed()
    }
}
impl Display for FixedBells {
    /// Fixed bells by symbol, moving places as `x`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            &self
                .places
                .iter()
                .map(|place| {
                    match place {
                        FixedBell::Fixed(bell) => bell_symbol(*bell),
                        FixedBell::Moving => 'x',
                    }
                })
                .join(""),
        )
    }
}

use crate::internal_util::ends;
use crate::prove::Row;

/// Whether a touch comes round to the row it started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundBlock<'a> {
    rows: &'a [Row],
    is_round: bool,
}
impl<'a> RoundBlock<'a> {
    /// Compare the first and last rows. Fewer than two rows never make a round
    /// block.
    pub fn classify(rows: &'a [Row]) -> Self {
        Self {
            rows,
            is_round: ends(rows).is_some_and(|(first, last)| first == last),
        }
    }

    pub fn is_round(&self) -> bool {
        self.is_round
    }

    pub fn first(&self) -> Option<&'a Row> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&'a Row> {
        self.rows.last()
    }

    /// The rows to prove: the closing row of a round block only confirms that
    /// the touch came round, so it is left out. Otherwise every row, including
    /// the last, is proved.
    pub fn proved_rows(&self) -> &'a [Row] {
        if self.is_round {
            &self.rows[..self.rows.len() - 1]
        } else {
            self.rows
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rows(tokens: &str) -> Vec<Row> {
        tokens
            .split_whitespace()
            .map(|t| t.parse().unwrap())
            .collect()
    }

    #[test]
    fn closing_row_is_dropped() {
        let input = rows("123 132 312 321 231 213 123");
        let block = RoundBlock::classify(&input);
        assert!(block.is_round());
        assert_eq!(block.proved_rows(), &input[..6]);
        assert_eq!(block.first(), block.last());
    }

    #[test]
    fn open_touch_keeps_its_last_row() {
        let input = rows("2314 3241 2143");
        let block = RoundBlock::classify(&input);
        assert!(!block.is_round());
        assert_eq!(block.proved_rows(), &input[..]);
        assert_eq!(block.last().map(ToString::to_string), Some("2143".to_string()));
    }

    #[test]
    fn short_touches_are_not_round() {
        let single = rows("1234");
        assert!(!RoundBlock::classify(&single).is_round());
        assert_eq!(RoundBlock::classify(&single).proved_rows().len(), 1);
        assert!(!RoundBlock::classify(&[]).is_round());
    }
}

use std::fs;
use std::path::Path;

use tracing::info;

use crate::prove::{Row, Stage};
use crate::{Error, Result};

/// Parse a touch written one row per line, e.g.
///
/// ```text
/// 123456
/// 214365
/// 241635
/// ```
///
/// - Blank lines are skipped
/// - Trailing or leading whitespace is ignored
/// - The stage is the length of the first row
///
/// # Errors
///
/// Fails if there are no rows, if a row is a different length to the first,
/// or if a row is not a permutation of the bells of that stage.
pub fn parse_rows(text: &str) -> Result<Vec<Row>> {
    let lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect::<Vec<_>>();
    let (_, first) = lines.first().ok_or(Error::EmptyInput)?;
    let stage = Stage::new(first.chars().count())?;
    info!(stage = stage.get(), "detected stage as {}", stage.name());

    let rows = lines
        .into_iter()
        .map(|(line, token)| {
            let found = token.chars().count();
            if found != stage.get() {
                return Err(Error::RowLengthMismatch {
                    line,
                    expected: stage.get(),
                    found,
                });
            }
            Row::parse(stage, token)
        })
        .collect::<Result<Vec<_>>>()?;
    info!(rows = rows.len(), "parsed rows");
    Ok(rows)
}

/// See [`parse_rows`]. Reads the touch from a file.
///
/// # Errors
///
/// As [`parse_rows`], plus any error reading the file.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    parse_rows(&fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reads_rows_skipping_blank_lines() {
        let rows = parse_rows("  123456\n\n214365 \n\t\n241635\n").unwrap();
        assert_eq!(rows.iter().join(" "), "123456 214365 241635");
    }

    #[test]
    fn stage_comes_from_the_first_row() {
        let rows = parse_rows("1234567890ET\n2143658709TE").unwrap();
        assert_eq!(rows[0].stage(), 12);
        assert!(rows[0].is_rounds());
    }

    #[test]
    fn rejects_rows_of_another_length() {
        assert!(matches!(
            parse_rows("12345\n21354\n\n1234\n"),
            Err(Error::RowLengthMismatch {
                line: 4,
                expected: 5,
                found: 4,
            })
        ));
    }

    #[test]
    fn rejects_non_permutations() {
        assert!(matches!(
            parse_rows("1234\n1233"),
            Err(Error::InvalidPermutation { token }) if token == "1233"
        ));
        assert!(matches!(
            parse_rows("1234\n12x4"),
            Err(Error::InvalidPermutation { .. })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(parse_rows(""), Err(Error::EmptyInput)));
        assert!(matches!(parse_rows(" \n\n  \n"), Err(Error::EmptyInput)));
    }

    #[test]
    fn reports_missing_files() {
        assert!(matches!(
            read_rows("/nonexistent/touch.txt"),
            Err(Error::Io(_))
        ));
    }
}

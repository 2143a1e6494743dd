/// n!
///
/// Exact for every stage that can be written down (n <= 33 fits in a `u128`).
pub(crate) fn factorial(n: usize) -> u128 {
    (1..=n as u128).product()
}

/// The first and last items of a slice, if it has at least two.
pub(crate) fn ends<T>(items: &[T]) -> Option<(&T, &T)> {
    match items {
        [first, .., last] => Some((first, last)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn factorials() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(3), 6);
        assert_eq!(factorial(8), 40_320);
        assert_eq!(factorial(20), 2_432_902_008_176_640_000);
        assert_eq!(factorial(33), 8_683_317_618_811_886_495_518_194_401_280_000_000);
    }

    #[test]
    fn ends_needs_two_items() {
        assert_eq!(ends::<u8>(&[]), None);
        assert_eq!(ends(&[1]), None);
        assert_eq!(ends(&[1, 2]), Some((&1, &2)));
        assert_eq!(ends(&[1, 2, 3]), Some((&1, &3)));
    }
}

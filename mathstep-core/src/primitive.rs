//! Helpers for building, parsing and factoring [`Integer`]s and [`Rational`]s.

use rug::{Integer, Rational};

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Parses a decimal literal, such as `24`, `-3` or `1.25`, into an exact [`Rational`].
///
/// Returns [`None`] if the string is not made of ASCII digits with at most one decimal point.
pub fn rational_from_str(s: &str) -> Option<Rational> {
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let numer = Integer::from_str_radix(&format!("{}{}", whole, frac), 10).ok()?;
    let denom = Integer::from(Integer::u_pow_u(10, frac.len() as u32));
    let value = Rational::from((numer, denom));
    Some(if negative { -value } else { value })
}

/// Returns the prime factors of the absolute value of `n` in ascending order, with repetition.
///
/// `0` and `1` have no prime factors, so an empty list is returned for them.
pub fn prime_factors(n: &Integer) -> Vec<Integer> {
    let mut n = Integer::from(n.abs_ref());
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }

    let mut divisor = int(2);
    while Integer::from(&divisor * &divisor) <= n {
        while n.is_divisible(&divisor) {
            n /= &divisor;
            factors.push(divisor.clone());
        }
        divisor += 1;
    }
    if n > 1 {
        factors.push(n);
    }

    factors
}

/// Returns true if `n` is a composite integer, i.e. it has more than one prime factor.
pub fn is_composite(n: &Integer) -> bool {
    prime_factors(n).len() > 1
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decimal_literals() {
        assert_eq!(rational_from_str("24"), Some(rational(24)));
        assert_eq!(rational_from_str("1.25"), Some(rational((5, 4))));
        assert_eq!(rational_from_str("-0.5"), Some(rational((-1, 2))));
        assert_eq!(rational_from_str("1.2.3"), None);
        assert_eq!(rational_from_str("x"), None);
    }

    #[test]
    fn factorize() {
        assert_eq!(prime_factors(&int(24)), vec![int(2), int(2), int(2), int(3)]);
        assert_eq!(prime_factors(&int(30)), vec![int(2), int(3), int(5)]);
        assert_eq!(prime_factors(&int(-49)), vec![int(7), int(7)]);
        assert_eq!(prime_factors(&int(13)), vec![int(13)]);
        assert!(prime_factors(&int(1)).is_empty());
    }

    #[test]
    fn composite() {
        assert!(is_composite(&int(6)));
        assert!(!is_composite(&int(7)));
        assert!(!is_composite(&int(1)));
    }
}

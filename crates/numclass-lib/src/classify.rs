//! Pure classification of integers.
//!
//! Every function here is total over `i64`: negative values, zero, and the
//! extremes of the range are all accepted without overflow. Work is done on the
//! unsigned magnitude with an integer square root bounding trial division.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag describing a property of a number that is reported in the
/// `properties` list of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    /// Equal to the sum of its digits each raised to the digit count.
    Armstrong,
    /// Divisible by two.
    Even,
    /// Not divisible by two.
    Odd,
}

impl Property {
    /// The wire tag for this property.
    pub fn as_str(self) -> &'static str {
        match self {
            Property::Armstrong => "armstrong",
            Property::Even => "even",
            Property::Odd => "odd",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The deterministic part of a classification result.
///
/// Two classifications of the same number are always equal; only the trivia
/// fact attached by the service may vary between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub number: i64,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<Property>,
    pub digit_sum: u64,
}

impl Classification {
    /// Classify `number`.
    ///
    /// Primality and perfection use trial division up to `sqrt(|n|)`, so values
    /// near the ends of the `i64` range take noticeably longer than small ones.
    /// A prime's proper divisor sum is 1, so perfection is only checked for
    /// non-primes.
    pub fn of(number: i64) -> Self {
        let is_prime = is_prime(number);
        Self {
            number,
            is_prime,
            is_perfect: !is_prime && is_perfect(number),
            properties: classify_properties(number),
            digit_sum: digit_sum(number),
        }
    }

    /// Whether the classified number is even.
    pub fn is_even(&self) -> bool {
        self.properties.contains(&Property::Even)
    }
}

/// Returns `true` when `n` is prime. Anything at or below 1 is not prime.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let n = n.unsigned_abs();
    let limit = isqrt(n);
    let mut divisor = 3;
    while divisor <= limit {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Returns `true` when `n` equals the sum of its proper positive divisors.
///
/// Divisors are collected in pairs `(i, n / i)` for `i` up to `sqrt(n)`, seeded
/// with the unit divisor. One is not perfect: its only proper divisor sum is 0.
pub fn is_perfect(n: i64) -> bool {
    if n <= 1 {
        return false;
    }

    let n = n.unsigned_abs();
    let limit = isqrt(n);
    let mut total: u64 = 1;
    for i in 2..=limit {
        if n % i != 0 {
            continue;
        }
        total += i;
        let pair = n / i;
        if pair != i {
            total += pair;
        }
        // total <= n held before this step, so it cannot have wrapped.
        if total > n {
            return false;
        }
    }
    total == n
}

/// Returns `true` when `n` is an Armstrong (narcissistic) number.
///
/// Negative numbers are never Armstrong numbers. Zero is: its single digit
/// raised to the first power is itself.
pub fn is_armstrong(n: i64) -> bool {
    if n < 0 {
        return false;
    }

    let magnitude = n.unsigned_abs();
    let digits = decimal_digits(magnitude);
    let power = digits.len() as u32;
    let sum: u128 = digits.iter().map(|&d| u128::from(d).pow(power)).sum();
    sum == u128::from(magnitude)
}

/// Sum of the decimal digits of `|n|`.
pub fn digit_sum(n: i64) -> u64 {
    decimal_digits(n.unsigned_abs())
        .into_iter()
        .map(u64::from)
        .sum()
}

/// Ordered property tags: `armstrong` first when it applies, then exactly one
/// of `even` or `odd`.
pub fn classify_properties(n: i64) -> Vec<Property> {
    let mut properties = Vec::with_capacity(2);
    if is_armstrong(n) {
        properties.push(Property::Armstrong);
    }
    if n % 2 == 0 {
        properties.push(Property::Even);
    } else {
        properties.push(Property::Odd);
    }
    properties
}

/// Least-significant-first decimal digits; zero yields a single `0`.
fn decimal_digits(mut value: u64) -> Vec<u8> {
    if value == 0 {
        return vec![0];
    }
    let mut digits = Vec::with_capacity(20);
    while value > 0 {
        digits.push((value % 10) as u8);
        value /= 10;
    }
    digits
}

/// Floor of the square root of `n`.
fn isqrt(n: u64) -> u64 {
    let n_wide = u128::from(n);
    let mut root = (n as f64).sqrt() as u64;
    while u128::from(root) * u128::from(root) > n_wide {
        root -= 1;
    }
    while u128::from(root + 1) * u128::from(root + 1) <= n_wide {
        root += 1;
    }
    root
}

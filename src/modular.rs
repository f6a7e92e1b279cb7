//! Modular arithmetic helpers.
//!
//! Pure functions over `i64`. Operand-domain violations are reported as
//! [`SdesError::InvalidOperand`] so they can never be confused with a
//! numeric result.

use crate::error::SdesError;

/// Checks primality by trial division up to `⌈√n⌉`.
///
/// Returns `false` for `n <= 1`.
///
/// # Examples
///
/// ```
/// use sdes::modular::is_prime;
///
/// assert!(is_prime(683));
/// assert!(!is_prime(899));
/// ```
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    let limit = (n as f64).sqrt().ceil() as i64;
    !(2..=limit).any(|d| n % d == 0)
}

/// Returns `true` for primes congruent to 3 mod 4 (Blum primes).
pub fn is_blum_prime(v: u64) -> bool {
    v % 4 == 3 && i64::try_from(v).is_ok_and(is_prime)
}

/// Greatest common divisor by the iterative Euclidean algorithm.
///
/// # Errors
/// Returns [`SdesError::InvalidOperand`] if either operand is not positive.
pub fn gcd(a: i64, b: i64) -> Result<i64, SdesError> {
    if a <= 0 || b <= 0 {
        return Err(SdesError::InvalidOperand);
    }
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    Ok(a)
}

/// Returns `true` if `gcd(a, b) == 1`.
///
/// A zero or negative operand is never relatively prime to anything.
pub fn is_relatively_prime(a: i64, b: i64) -> bool {
    matches!(gcd(a, b), Ok(1))
}

/// Extended Euclidean algorithm.
///
/// # Returns
/// `(g, s, t)` such that `a*s + b*t == g` and `g = gcd(|a|, |b|)`.
///
/// # Errors
/// Returns [`SdesError::InvalidOperand`] if either operand is zero.
pub fn extended_gcd(a: i64, b: i64) -> Result<(i64, i64, i64), SdesError> {
    if a == 0 || b == 0 {
        return Err(SdesError::InvalidOperand);
    }
    let mut u = (a.abs(), 1i64, 0i64);
    let mut v = (b.abs(), 0i64, 1i64);
    while v.0 != 0 {
        let q = u.0 / v.0;
        let r = (u.0 - q * v.0, u.1 - q * v.1, u.2 - q * v.2);
        u = v;
        v = r;
    }
    let (g, mut s, mut t) = u;
    if a < 0 {
        s = -s;
    }
    if b < 0 {
        t = -t;
    }
    Ok((g, s, t))
}

/// Multiplicative inverse of the smaller operand modulo the larger one.
///
/// The operands are normalised so that the larger is the modulus, which
/// makes the call symmetric in its arguments.
///
/// # Returns
/// `Some(inverse)` in `[0, modulus)`, or `None` when the operands are not
/// relatively prime.
///
/// # Errors
/// Returns [`SdesError::InvalidOperand`] if either operand is not positive.
///
/// # Examples
///
/// ```
/// use sdes::modular::multiplicative_inverse;
///
/// assert_eq!(multiplicative_inverse(3, 7), Ok(Some(5)));
/// assert_eq!(multiplicative_inverse(4, 8), Ok(None));
/// ```
pub fn multiplicative_inverse(a: i64, m: i64) -> Result<Option<i64>, SdesError> {
    if a < 1 || m < 1 {
        return Err(SdesError::InvalidOperand);
    }
    let (modulus, value) = if m > a { (m, a) } else { (a, m) };
    let (g, _, t) = extended_gcd(modulus, value)?;
    if g != 1 {
        return Ok(None);
    }
    Ok(Some(t.rem_euclid(modulus)))
}

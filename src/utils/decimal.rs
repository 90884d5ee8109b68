//! Arbitrary-precision exponentials for values that overflow `f64`.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{FromPrimitive, ToPrimitive, Zero};

/// Extra digits carried through range reduction and squaring.
const GUARD_DIGITS: u64 = 10;

/// `e^x` rounded to `precision` significant digits. NaN and infinite inputs
/// map to zero.
///
/// The argument is halved until it is at most 1, the exponential of the
/// reduced value is summed as a fixed-point Taylor series, and the result is
/// squared back once per halving.
pub fn exp(x: f64, precision: u64) -> BigDecimal {
    if !x.is_finite() {
        return BigDecimal::zero();
    }

    let mut halvings = 0u32;
    let mut reduced = x.abs();
    while reduced > 1.0 {
        reduced /= 2.0;
        halvings += 1;
    }

    let guard = GUARD_DIGITS + halvings as u64;
    let working_scale = (precision + guard) as i64;
    let unit = BigInt::from(10).pow(working_scale as u32);

    let magnitude = BigDecimal::from_f64(x.abs()).unwrap_or_else(BigDecimal::zero);
    let (mantissa, exponent) = magnitude.as_bigint_and_exponent();
    let scaled = if exponent <= working_scale {
        mantissa * BigInt::from(10).pow((working_scale - exponent) as u32)
    } else {
        mantissa / BigInt::from(10).pow((exponent - working_scale) as u32)
    };
    let r = scaled / BigInt::from(2).pow(halvings);

    let mut sum = unit.clone();
    let mut term = unit.clone();
    let mut n = 1u32;
    loop {
        term = term * &r / &unit / n;
        if term.is_zero() {
            break;
        }
        sum += &term;
        n += 1;
    }

    let mut value = BigDecimal::new(sum, working_scale);
    for _ in 0..halvings {
        value = (&value * &value).with_prec(precision + guard);
    }

    if x < 0.0 {
        reciprocal(&value, precision)
    } else {
        value.with_prec(precision)
    }
}

fn reciprocal(value: &BigDecimal, precision: u64) -> BigDecimal {
    let (mantissa, exponent) = value.as_bigint_and_exponent();
    let digits = mantissa.to_string().len() as u64;
    let shift = precision + GUARD_DIGITS + digits;
    let quotient = BigInt::from(10).pow(shift as u32) / mantissa;
    BigDecimal::new(quotient, shift as i64 - exponent).with_prec(precision)
}

/// Base-10 logarithm of a decimal, accurate to `f64` precision even when the
/// value itself is outside the `f64` range. Zero and negative values give
/// negative infinity.
pub fn log10(value: &BigDecimal) -> f64 {
    if value.sign() != Sign::Plus {
        return f64::NEG_INFINITY;
    }
    let (mantissa, scale) = value.with_prec(17).as_bigint_and_exponent();
    match mantissa.to_f64() {
        Some(mantissa) => mantissa.log10() - scale as f64,
        None => f64::NEG_INFINITY,
    }
}

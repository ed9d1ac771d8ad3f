//! Number helpers over IEEE-754 doubles
//!
//! Values carry plain `f64` numbers. The helpers here pin down the exact
//! integer and identity semantics the rest of the workspace relies on.

use thiserror::Error;

const TWO_POW_32: f64 = 4_294_967_296.0;
const TWO_POW_31: f64 = 2_147_483_648.0;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("input must be non-negative, got {0}")]
    NegativeInput(i64),

    #[error("expected an integer, got {0}")]
    NotAnInteger(f64),

    #[error("Overflow: result too large")]
    Overflow,
}

/// Truncate to a signed 32-bit integer, wrapping modulo 2^32.
///
/// NaN and infinities map to 0. This is the conversion applied by bitwise
/// operators on doubles, so `to_int32(2^31) == i32::MIN`.
pub fn to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    let wrapped = n.trunc().rem_euclid(TWO_POW_32);
    if wrapped >= TWO_POW_31 {
        (wrapped - TWO_POW_32) as i32
    } else {
        wrapped as i32
    }
}

/// True when `n` survives 32-bit truncation unchanged.
///
/// Deliberately narrow: integers outside the i32 range fail.
pub fn is_int32(n: f64) -> bool {
    n.is_finite() && f64::from(to_int32(n)) == n
}

/// Identity comparison for doubles: NaN equals NaN, `0.0` and `-0.0` differ.
pub fn same_value(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    a.to_bits() == b.to_bits()
}

/// Convert an integral double to `i64`.
pub fn to_i64(n: f64) -> Result<i64, NumberError> {
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(NumberError::NotAnInteger(n));
    }
    // i64::MAX is not representable; the closest double above it is 2^63
    if n >= 9_223_372_036_854_775_808.0 || n < -9_223_372_036_854_775_808.0 {
        return Err(NumberError::Overflow);
    }
    Ok(n as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_int32_wraps() {
        assert_eq!(to_int32(3.7), 3);
        assert_eq!(to_int32(-3.7), -3);
        assert_eq!(to_int32(TWO_POW_31), i32::MIN);
        assert_eq!(to_int32(TWO_POW_32), 0);
        assert_eq!(to_int32(TWO_POW_32 + 5.0), 5);
        assert_eq!(to_int32(f64::NAN), 0);
        assert_eq!(to_int32(f64::INFINITY), 0);
    }

    #[test]
    fn test_is_int32() {
        assert!(is_int32(0.0));
        assert!(is_int32(-0.0));
        assert!(is_int32(2_147_483_647.0));
        assert!(is_int32(-2_147_483_648.0));
        assert!(!is_int32(TWO_POW_31));
        assert!(!is_int32(3.5));
        assert!(!is_int32(f64::NAN));
        assert!(!is_int32(f64::NEG_INFINITY));
    }

    #[test]
    fn test_same_value() {
        assert!(same_value(f64::NAN, f64::NAN));
        assert!(same_value(1.5, 1.5));
        assert!(!same_value(0.0, -0.0));
        assert!(!same_value(1.0, 2.0));
    }

    #[test]
    fn test_to_i64() {
        assert_eq!(to_i64(42.0), Ok(42));
        assert_eq!(to_i64(-7.0), Ok(-7));
        assert_eq!(to_i64(1.5), Err(NumberError::NotAnInteger(1.5)));
        assert_eq!(to_i64(1e19), Err(NumberError::Overflow));
        assert!(to_i64(f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn prop_int32_range_is_integer(n in -1_000_000i32..=1_000_000) {
            prop_assert!(is_int32(f64::from(n)));
        }

        #[test]
        fn prop_half_offsets_are_not_integer(n in -1_000_000i32..=1_000_000) {
            prop_assert!(!is_int32(f64::from(n) + 0.5));
        }
    }
}

//! Integer exponentiation with a defined failure domain

use crate::error::{Result, SatArtError};

/// Raise `base` to `exp` using truncating integer semantics.
///
/// Negative exponents truncate toward zero: `1` and `-1` keep their
/// magnitude, every other nonzero base yields `0`. This mirrors integer
/// division of `1 / base^|exp|` and is intentional.
///
/// `0^exp` with `exp <= 0` has no integer value and is reported as
/// [`SatArtError::Arithmetic`], as is overflow of `i64`.
pub fn int_power(base: i64, exp: i64) -> Result<i64> {
    if exp < 0 {
        return match base {
            0 => Err(SatArtError::Arithmetic(format!(
                "0^{} requested with a negative exponent",
                exp
            ))),
            1 => Ok(1),
            -1 => Ok(if exp % 2 == 0 { 1 } else { -1 }),
            _ => Ok(0),
        };
    }

    if exp == 0 {
        if base == 0 {
            return Err(SatArtError::Arithmetic("0^0 requested".to_string()));
        }
        return Ok(1);
    }

    let mut value: i64 = 1;
    for _ in 0..exp {
        value = value.checked_mul(base).ok_or_else(|| {
            SatArtError::Arithmetic(format!("{}^{} overflows a 64-bit integer", base, exp))
        })?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_exponents() {
        assert_eq!(int_power(2, 0).unwrap(), 1);
        assert_eq!(int_power(2, 1).unwrap(), 2);
        assert_eq!(int_power(2, 10).unwrap(), 1024);
        assert_eq!(int_power(-3, 3).unwrap(), -27);
        assert_eq!(int_power(0, 5).unwrap(), 0);
    }

    #[test]
    fn test_negative_exponents_truncate() {
        assert_eq!(int_power(1, -4).unwrap(), 1);
        assert_eq!(int_power(-1, -3).unwrap(), -1);
        assert_eq!(int_power(-1, -2).unwrap(), 1);
        assert_eq!(int_power(2, -1).unwrap(), 0);
        assert_eq!(int_power(-7, -2).unwrap(), 0);
    }

    #[test]
    fn test_zero_base_domain_errors() {
        assert!(matches!(int_power(0, 0), Err(SatArtError::Arithmetic(_))));
        assert!(matches!(int_power(0, -1), Err(SatArtError::Arithmetic(_))));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert!(int_power(2, 63).is_err());
        assert_eq!(int_power(2, 62).unwrap(), 1 << 62);
    }
}

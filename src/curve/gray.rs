//! Reflected binary Gray code

/// Convert a binary index to its Gray code
#[inline]
pub fn to_gray(d: u64) -> u64 {
    d ^ (d >> 1)
}

/// Convert a Gray code back to the binary index it encodes
#[inline]
pub fn from_gray(mut g: u64) -> u64 {
    let mut d = 0;
    while g != 0 {
        d ^= g;
        g >>= 1;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        let expected = [0, 1, 3, 2, 6, 7, 5, 4];
        for (d, &g) in expected.iter().enumerate() {
            assert_eq!(to_gray(d as u64), g);
            assert_eq!(from_gray(g), d as u64);
        }
    }

    #[test]
    fn test_inverse_over_16_bits() {
        for v in 0..(1u64 << 16) {
            assert_eq!(from_gray(to_gray(v)), v);
            assert_eq!(to_gray(from_gray(v)), v);
        }
    }

    #[test]
    fn test_consecutive_codes_differ_in_one_bit() {
        for d in 0..4096u64 {
            let diff = to_gray(d) ^ to_gray(d + 1);
            assert_eq!(diff.count_ones(), 1, "codes for {} and {} differ in more than one bit", d, d + 1);
        }
    }

    #[test]
    fn test_high_bits() {
        let g = u64::MAX;
        assert_eq!(to_gray(from_gray(g)), g);
        assert_eq!(from_gray(to_gray(u64::MAX)), u64::MAX);
    }
}

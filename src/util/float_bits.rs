use std::fmt::Display;

use assert2::assert;

/// Number of representable single precision values between `a` and `b`.
/// Positive and negative zero are the same value. Returns `None` if either input is NaN.
pub fn ulp_distance(a: f32, b: f32) -> Option<u64> {
    if a.is_nan() || b.is_nan() {
        return None;
    }
    Some(ordinal(a).abs_diff(ordinal(b)))
}

/// Maps floats to integers so that adjacent floats map to adjacent integers.
fn ordinal(x: f32) -> i64 {
    let bits = x.to_bits();
    let magnitude = (bits & 0x7fff_ffff) as i64;
    if bits & 0x8000_0000 != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Splits `x` into `hi + lo` using Veltkamp's algorithm with the constant `2^s + 1`.
///
/// `hi` keeps the `24 - s` leading significant bits of `x`, `lo` the rest
/// (it fits in `s - 1` bits plus sign). The sum is exact unless `x * (2^s + 1)`
/// overflows.
pub fn veltkamp_split(x: f32, s: u32) -> (f32, f32) {
    assert!((1..24).contains(&s), "split point must leave bits on both sides");

    let c = ((1u32 << s) + 1) as f32;
    let gamma = c * x;
    let delta = x - gamma;
    let hi = gamma + delta;
    let lo = x - hi;
    (hi, lo)
}

/// Formats a float as its raw bit pattern followed by its decimal value.
#[derive(Copy, Clone, Debug)]
pub struct BitsDisplay(pub f32);

impl Display for BitsDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08x} {:.6}", self.0.to_bits(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;
    use proptest::prop_assert;
    use test_case::test_case;
    use test_strategy::proptest;

    #[test_case(1.0, 1.0, 0 ; "same")]
    #[test_case(0.0, -0.0, 0 ; "signed_zeros")]
    #[test_case(1.0, f32::from_bits(0x3f80_0001), 1 ; "next_up")]
    #[test_case(f32::from_bits(1), -f32::from_bits(1), 2 ; "across_zero")]
    #[test_case(f32::MAX, f32::INFINITY, 1 ; "to_infinity")]
    fn ulp_distance_cases(a: f32, b: f32, expected: u64) {
        assert!(ulp_distance(a, b) == Some(expected));
        assert!(ulp_distance(b, a) == Some(expected));
    }

    #[test]
    fn ulp_distance_nan() {
        assert!(ulp_distance(f32::NAN, 1.0) == None);
        assert!(ulp_distance(1.0, f32::NAN) == None);
    }

    #[test]
    fn split_of_next_after_one() {
        let x = f32::from_bits(0x3f80_0001);
        let (hi, lo) = veltkamp_split(x, 12);
        assert!(hi == 1.0);
        assert!(lo == x - 1.0);
    }

    #[proptest]
    fn split_is_exact(#[strategy(1e-10f32..1e10f32)] x: f32, #[strategy(2u32..23)] s: u32) {
        let (hi, lo) = veltkamp_split(x, s);
        prop_assert!(hi + lo == x);

        let low_bits_mask = (1u32 << s) - 1;
        prop_assert!(
            hi.to_bits() & low_bits_mask == 0,
            "{:08x} has more than {} significant bits",
            hi.to_bits(),
            24 - s
        );
    }

    #[test]
    fn bits_display() {
        assert!(BitsDisplay(1.0).to_string() == "3f800000 1.000000");
        assert!(BitsDisplay(-2.5).to_string() == "c0200000 -2.500000");
    }
}

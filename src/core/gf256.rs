//! Arithmetic in GF(2^8) reduced by the AES polynomial x^8 + x^4 + x^3 + x + 1 (0x11B).
//! Addition is XOR; only multiplication needs a routine.

/// Low byte of the AES reduction polynomial (the x^8 term is implied).
const REDUCTION: u8 = 0x1B;

/// Multiply by x ("xtime"). Branchless so the forward MixColumns fast path stays tight.
// adapted from https://crypto.stackexchange.com/a/71206
#[inline(always)]
pub(crate) fn dbl(a: u8) -> u8 {
    (a << 1) ^ (REDUCTION & (0u8).wrapping_sub((a >> 7) & 1))
}

/// Full GF(2^8) product of `a` and `b` via the peasant's algorithm.
/// Total function: every pair of bytes has a product.
#[inline(always)]
pub fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut p = 0u8;
    while a != 0 && b != 0 {
        if b & 1 != 0 {
            p ^= a;
        }
        a = dbl(a);
        b >>= 1;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fips_197_examples() {
        // FIPS-197 section 4.2: {57} • {83} = {c1}, {57} • {13} = {fe}
        assert_eq!(gf_mul(0x57, 0x83), 0xc1);
        assert_eq!(gf_mul(0x57, 0x13), 0xfe);

        // section 4.2.1 xtime chain
        assert_eq!(dbl(0x57), 0xae);
        assert_eq!(dbl(0xae), 0x47);
        assert_eq!(dbl(0x47), 0x8e);
        assert_eq!(dbl(0x8e), 0x07);
    }

    #[test]
    fn identity_and_zero() {
        for a in 0..=255u8 {
            assert_eq!(gf_mul(a, 1), a);
            assert_eq!(gf_mul(1, a), a);
            assert_eq!(gf_mul(a, 0), 0);
            assert_eq!(gf_mul(a, 2), dbl(a));
        }
    }

    #[test]
    fn commutative() {
        for a in (0..=255u8).step_by(7) {
            for b in (0..=255u8).step_by(11) {
                assert_eq!(gf_mul(a, b), gf_mul(b, a));
            }
        }
    }

    #[test]
    fn inverse_mix_coefficients_undo_forward() {
        // {0e}•{02} ^ {0b}•{01} ^ {0d}•{01} ^ {09}•{03} = {01}: the two MDS matrices are inverse
        let row = gf_mul(0x0e, 0x02) ^ gf_mul(0x0b, 0x01) ^ gf_mul(0x0d, 0x01) ^ gf_mul(0x09, 0x03);
        assert_eq!(row, 0x01);
    }
}

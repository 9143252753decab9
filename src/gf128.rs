//! GF(2^128) arithmetic for GHASH, using the GCM bit order (x^0 is the most significant bit
//! of the first byte) and the polynomial x^128 + x^7 + x^2 + x + 1.

/// Reduction constant: the low terms x^7 + x^2 + x + 1, bit-reflected into the top byte.
const GHASH_R: u128 = 0xE100_0000_0000_0000_0000_0000_0000_0000;

/// Multiply two field elements (NIST SP 800-38D Algorithm 1).
#[inline(always)]
pub fn gf_mul(x: [u8; 16], y: [u8; 16]) -> [u8; 16] {
    let x = u128::from_be_bytes(x);
    let mut v = u128::from_be_bytes(y);
    let mut z: u128 = 0;

    // process x bits from MSB -> LSB
    for i in 0..128 {
        let bit = (x >> (127 - i)) & 1;
        // if bit == 1, z ^= v (branchless)
        z ^= v & (0u128.wrapping_sub(bit));
        v = mul_x(v);
    }

    z.to_be_bytes()
}

/// Multiply by x: one right shift in GCM bit order, folding the carry back in with R.
#[inline(always)]
fn mul_x(v: u128) -> u128 {
    let lsb = v & 1;
    (v >> 1) ^ (GHASH_R & (0u128.wrapping_sub(lsb)))
}

/// Running GHASH accumulator `G_i = (G_{i-1} ⊕ X_i) • H`.
///
/// Blocks must be folded in order: AAD, then ciphertext, then the length block.
/// Partial blocks are zero padded on the right.
pub(crate) struct Ghash {
    h: [u8; 16],
    acc: [u8; 16],
}

impl Ghash {
    pub(crate) fn new(h: [u8; 16]) -> Self {
        Self { h, acc: [0u8; 16] }
    }

    /// Fold `data` in as a sequence of 16-byte blocks, zero padding the last one.
    pub(crate) fn update(&mut self, data: &[u8]) {
        for chunk in data.chunks(16) {
            for (a, b) in self.acc.iter_mut().zip(chunk) {
                *a ^= b;
            }
            self.acc = gf_mul(self.acc, self.h);
        }
    }

    /// Fold in `len(A) || len(C)` as 64-bit big-endian bit counts and return the digest.
    pub(crate) fn finalize(mut self, aad_len: usize, ct_len: usize) -> [u8; 16] {
        let mut len = [0u8; 16];
        len[..8].copy_from_slice(&((aad_len as u64) * 8).to_be_bytes());
        len[8..].copy_from_slice(&((ct_len as u64) * 8).to_be_bytes());
        self.update(&len);
        self.acc
    }
}

use super::constants::SBOX_INV;
use super::gf256::gf_mul;
use super::util::add_round_key;

/// Inverse cipher. Decrypts one 16 byte block, consuming the round keys in reverse.
///
/// Intermediate rounds add the round key before InvMixColumns, mirroring the forward round.
#[inline(always)]
pub fn decrypt_block(ciphertext: &[u8; 16], round_keys: &[[u8; 16]]) -> [u8; 16] {
    let mut state = *ciphertext;
    let nr = round_keys.len() - 1;

    add_round_key(&mut state, &round_keys[nr]);

    for round_key in round_keys[1..nr].iter().rev() {
        shift_rows_inv(&mut state);
        sub_bytes_inv(&mut state);
        add_round_key(&mut state, round_key);
        mix_columns_inv(&mut state);
    }

    shift_rows_inv(&mut state);
    sub_bytes_inv(&mut state);
    add_round_key(&mut state, &round_keys[0]);

    state
}

/// Inverse SubBytes step. Each byte is substituted using the inverse SBOX.
#[inline(always)]
pub(crate) fn sub_bytes_inv(state: &mut [u8; 16]) {
    for byte in state {
        *byte = SBOX_INV[*byte as usize];
    }
}

/// Inverse ShiftRows step. Row `r` rotates right by `r` positions.
#[inline(always)]
pub(crate) fn shift_rows_inv(state: &mut [u8; 16]) {
    // for row,col of the output, the source byte sits at column (col + 4 - row) mod 4
    let s = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[col * 4 + row] = s[((col + 4 - row) & 3) * 4 + row];
        }
    }
}

/// Inverse MixColumns step. Each column is multiplied by the inverse matrix in GF(2^8).
/// [ b0 ]      [ 0e  0b  0d  09 ]  [ d0 ]
/// | b1 |  =   | 09  0e  0b  0d |  | d1 |
/// | b2 |      | 0d  09  0e  0b |  | d2 |
/// [ b3 ]      [ 0b  0d  09  0e ]  [ d3 ]
#[inline(always)]
pub(crate) fn mix_columns_inv(state: &mut [u8; 16]) {
    for col in state.chunks_exact_mut(4) {
        let (a, b, c, d) = (col[0], col[1], col[2], col[3]);
        col[0] = gf_mul(0x0e, a) ^ gf_mul(0x0b, b) ^ gf_mul(0x0d, c) ^ gf_mul(0x09, d);
        col[1] = gf_mul(0x09, a) ^ gf_mul(0x0e, b) ^ gf_mul(0x0b, c) ^ gf_mul(0x0d, d);
        col[2] = gf_mul(0x0d, a) ^ gf_mul(0x09, b) ^ gf_mul(0x0e, c) ^ gf_mul(0x0b, d);
        col[3] = gf_mul(0x0b, a) ^ gf_mul(0x0d, b) ^ gf_mul(0x09, c) ^ gf_mul(0x0e, d);
    }
}

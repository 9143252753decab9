use rayon::prelude::*;

use crate::core::encrypt_block;
use crate::error::*;
use crate::modes::util::{PARALLEL_THRESHOLD, to_block, xor_chunks};

/// **Cipher feedback** encryption (CFB-128): `S_i = E(Y_{i-1})`, `Y_i = C_i = P_i ⊕ S_i`, `Y_0 = IV`.
///
/// A short final block is XORed with a truncated keystream block, so output length equals input length.
pub fn cfb_encrypt(plaintext: &[u8], round_keys: &[[u8; 16]], iv: &[u8; 16]) -> Result<Vec<u8>> {
    let mut ciphertext = Vec::with_capacity(plaintext.len());
    let mut feedback = *iv;
    for chunk in plaintext.chunks(16) {
        let keystream = encrypt_block(&feedback, round_keys);
        feedback = xor_chunks(&keystream, chunk);
        ciphertext.extend_from_slice(&feedback[..chunk.len()]);
    }
    Ok(ciphertext)
}

/// **Cipher feedback** decryption: `P_i = C_i ⊕ E(C_{i-1})`.
///
/// The keystream depends only on ciphertext, so large inputs are decrypted in parallel.
pub fn cfb_decrypt(ciphertext: &[u8], round_keys: &[[u8; 16]], iv: &[u8; 16]) -> Result<Vec<u8>> {
    if ciphertext.len() > PARALLEL_THRESHOLD {
        Ok(cfb_dec_parallel(ciphertext, round_keys, iv))
    } else {
        Ok(cfb_dec_serial(ciphertext, round_keys, iv))
    }
}

pub(crate) fn cfb_dec_serial(ciphertext: &[u8], round_keys: &[[u8; 16]], iv: &[u8; 16]) -> Vec<u8> {
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    let mut feedback = *iv;
    for chunk in ciphertext.chunks(16) {
        let keystream = encrypt_block(&feedback, round_keys);
        plaintext.extend_from_slice(&xor_chunks(&keystream, chunk)[..chunk.len()]);
        feedback = to_block(chunk);
    }
    plaintext
}

pub(crate) fn cfb_dec_parallel(ciphertext: &[u8], round_keys: &[[u8; 16]], iv: &[u8; 16]) -> Vec<u8> {
    let mut plaintext = vec![0u8; ciphertext.len()];
    plaintext
        .par_chunks_mut(16)
        .zip(ciphertext.par_chunks(16))
        .enumerate()
        .for_each(|(i, (out, chunk))| {
            let feedback = if i == 0 {
                *iv
            } else {
                to_block(&ciphertext[(i - 1) * 16..i * 16])
            };
            let keystream = encrypt_block(&feedback, round_keys);
            out.copy_from_slice(&xor_chunks(&keystream, chunk)[..chunk.len()]);
        });
    plaintext
}

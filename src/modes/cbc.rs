use rayon::prelude::*;

use crate::core::{decrypt_block, encrypt_block};
use crate::error::*;
use crate::modes::Mode;
use crate::modes::util::{PARALLEL_THRESHOLD, to_block, xor_chunks};

/// **Cipher block chaining** encryption: `Y_0 = IV`, `Y_i = E(P_i ⊕ Y_{i-1})`.
///
/// Strictly sequential: each block's input depends on the previous ciphertext block.
pub fn cbc_encrypt(plaintext: &[u8], round_keys: &[[u8; 16]], iv: &[u8; 16]) -> Result<Vec<u8>> {
    if plaintext.len() % 16 != 0 {
        return Err(Error::MisalignedPlaintext {
            mode: Mode::Cbc,
            len: plaintext.len(),
        });
    }

    let mut ciphertext = Vec::with_capacity(plaintext.len());
    let mut prev = *iv;
    for chunk in plaintext.chunks_exact(16) {
        prev = encrypt_block(&xor_chunks(&prev, chunk), round_keys);
        ciphertext.extend_from_slice(&prev);
    }

    Ok(ciphertext)
}

/// **Cipher block chaining** decryption: `P_i = D(C_i) ⊕ C_{i-1}`. Output is still padded.
///
/// Every ciphertext block is known up front, so large inputs are decrypted in parallel.
pub fn cbc_decrypt(ciphertext: &[u8], round_keys: &[[u8; 16]], iv: &[u8; 16]) -> Result<Vec<u8>> {
    if ciphertext.len() % 16 != 0 {
        return Err(Error::MisalignedCiphertext {
            mode: Mode::Cbc,
            len: ciphertext.len(),
        });
    }

    if ciphertext.len() > PARALLEL_THRESHOLD {
        Ok(cbc_dec_parallel(ciphertext, round_keys, iv))
    } else {
        Ok(cbc_dec_serial(ciphertext, round_keys, iv))
    }
}

pub(crate) fn cbc_dec_serial(ciphertext: &[u8], round_keys: &[[u8; 16]], iv: &[u8; 16]) -> Vec<u8> {
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    let mut prev = *iv;
    for chunk in ciphertext.chunks_exact(16) {
        let block = to_block(chunk);
        plaintext.extend_from_slice(&xor_chunks(&decrypt_block(&block, round_keys), &prev));
        prev = block;
    }
    plaintext
}

pub(crate) fn cbc_dec_parallel(ciphertext: &[u8], round_keys: &[[u8; 16]], iv: &[u8; 16]) -> Vec<u8> {
    let mut plaintext = vec![0u8; ciphertext.len()];
    plaintext
        .par_chunks_exact_mut(16)
        .enumerate()
        .for_each(|(i, out)| {
            let block = to_block(&ciphertext[i * 16..i * 16 + 16]);
            let prev: &[u8] = if i == 0 { iv } else { &ciphertext[(i - 1) * 16..i * 16] };
            out.copy_from_slice(&xor_chunks(&decrypt_block(&block, round_keys), prev));
        });
    plaintext
}

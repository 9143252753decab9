use rayon::prelude::*;

use crate::core::{decrypt_block, encrypt_block};
use crate::error::*;
use crate::modes::Mode;
use crate::modes::util::{PARALLEL_THRESHOLD, to_block};

type BlockFn = fn(&[u8; 16], &[[u8; 16]]) -> [u8; 16];

/// **Electronic codebook** encryption: `C_i = E(P_i)`. Input must already be block aligned.
pub fn ecb_encrypt(plaintext: &[u8], round_keys: &[[u8; 16]]) -> Result<Vec<u8>> {
    if plaintext.len() % 16 != 0 {
        return Err(Error::MisalignedPlaintext {
            mode: Mode::Ecb,
            len: plaintext.len(),
        });
    }
    Ok(ecb_dispatch(plaintext, round_keys, encrypt_block))
}

/// **Electronic codebook** decryption: `P_i = D(C_i)`. Output is still padded.
pub fn ecb_decrypt(ciphertext: &[u8], round_keys: &[[u8; 16]]) -> Result<Vec<u8>> {
    if ciphertext.len() % 16 != 0 {
        return Err(Error::MisalignedCiphertext {
            mode: Mode::Ecb,
            len: ciphertext.len(),
        });
    }
    Ok(ecb_dispatch(ciphertext, round_keys, decrypt_block))
}

fn ecb_dispatch(input: &[u8], round_keys: &[[u8; 16]], f: BlockFn) -> Vec<u8> {
    if input.len() > PARALLEL_THRESHOLD {
        ecb_core_parallel(input, round_keys, f)
    } else {
        ecb_core_serial(input, round_keys, f)
    }
}

/// Applies `f` to every 16-byte block in order.
pub(crate) fn ecb_core_serial(input: &[u8], round_keys: &[[u8; 16]], f: BlockFn) -> Vec<u8> {
    let mut output = vec![0u8; input.len()];
    for (inp, out) in input.chunks_exact(16).zip(output.chunks_exact_mut(16)) {
        out.copy_from_slice(&f(&to_block(inp), round_keys));
    }
    output
}

/// Blocks are independent, so they are spread across the rayon pool.
pub(crate) fn ecb_core_parallel(input: &[u8], round_keys: &[[u8; 16]], f: BlockFn) -> Vec<u8> {
    let mut output = vec![0u8; input.len()];
    output
        .par_chunks_exact_mut(16)
        .zip(input.par_chunks_exact(16))
        .for_each(|(out, inp)| out.copy_from_slice(&f(&to_block(inp), round_keys)));
    output
}

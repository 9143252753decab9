use rayon::prelude::*;

use crate::core::encrypt_block;
use crate::error::*;
use crate::modes::util::{PARALLEL_THRESHOLD, block_count, ctr_block, xor_chunks};

/// **Counter mode**: `S_i = E(nonce || ctr_start + i)`, `C_i = P_i ⊕ S_i`.
///
/// Symmetric, so it serves both directions. Returns [CounterOverflow](Error::CounterOverflow)
/// if the 32-bit counter would wrap before the last block.
pub fn ctr_apply(
    input: &[u8],
    round_keys: &[[u8; 16]],
    nonce: &[u8; 12],
    ctr_start: u32,
) -> Result<Vec<u8>> {
    check_counter_span(input.len(), ctr_start)?;
    if input.len() > PARALLEL_THRESHOLD {
        Ok(ctr_core_parallel(input, round_keys, nonce, ctr_start))
    } else {
        Ok(ctr_core_serial(input, round_keys, nonce, ctr_start))
    }
}

fn check_counter_span(len: usize, ctr_start: u32) -> Result<()> {
    let num_blocks = block_count(len).ok_or(Error::CounterOverflow)?;
    if num_blocks > 0 {
        ctr_start
            .checked_add(num_blocks - 1)
            .ok_or(Error::CounterOverflow)?;
    }
    Ok(())
}

/// Every keystream block is independent, so chunks are processed across the rayon pool.
/// The counter span must already be checked.
pub(crate) fn ctr_core_parallel(
    input: &[u8],
    round_keys: &[[u8; 16]],
    nonce: &[u8; 12],
    ctr_start: u32,
) -> Vec<u8> {
    let mut output = vec![0u8; input.len()];

    output
        .par_chunks_mut(16)
        .zip(input.par_chunks(16))
        .enumerate()
        .for_each(|(i, (out_chunk, in_chunk))| {
            let ctr = ctr_start.wrapping_add(i as u32);
            let keystream = encrypt_block(&ctr_block(nonce, ctr), round_keys);
            out_chunk.copy_from_slice(&xor_chunks(&keystream, in_chunk)[..in_chunk.len()]);
        });

    output
}

/// Serial counterpart of [ctr_core_parallel], used for small inputs.
pub(crate) fn ctr_core_serial(
    input: &[u8],
    round_keys: &[[u8; 16]],
    nonce: &[u8; 12],
    ctr_start: u32,
) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    let mut ctr = ctr_start;

    for chunk in input.chunks(16) {
        let keystream = encrypt_block(&ctr_block(nonce, ctr), round_keys);
        output.extend_from_slice(&xor_chunks(&keystream, chunk)[..chunk.len()]);
        ctr = ctr.wrapping_add(1);
    }

    output
}

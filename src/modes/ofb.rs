use crate::core::encrypt_block;
use crate::error::*;
use crate::modes::util::xor_chunks;

/// **Output feedback**: `S_0 = IV`, `S_i = E(S_{i-1})`, `C_i = P_i ⊕ S_i`.
///
/// Encryption and decryption are the same operation. The keystream chain is sequential, and
/// a short final block uses a truncated keystream block.
pub fn ofb_apply(input: &[u8], round_keys: &[[u8; 16]], iv: &[u8; 16]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(input.len());
    let mut keystream = *iv;
    for chunk in input.chunks(16) {
        keystream = encrypt_block(&keystream, round_keys);
        output.extend_from_slice(&xor_chunks(&keystream, chunk)[..chunk.len()]);
    }
    Ok(output)
}

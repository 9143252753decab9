/// Inputs larger than this many bytes are processed on the rayon pool where the mode allows it.
pub const PARALLEL_THRESHOLD: usize = 4 * 1024;

/// Forms the CTR/GCM counter block `nonce (12 bytes) || ctr (u32 big-endian)`.
#[inline(always)]
pub(crate) fn ctr_block(nonce: &[u8; 12], ctr: u32) -> [u8; 16] {
    let cb = ctr.to_be_bytes();
    [
        nonce[00], nonce[01], nonce[02], nonce[03], nonce[04], nonce[05], nonce[06], nonce[07],
        nonce[08], nonce[09], nonce[10], nonce[11], cb[00], cb[01], cb[02], cb[03],
    ]
}

/// XORs up to 16 bytes of `chunk` into a copy of `y`. Bytes of `y` past `chunk.len()` are kept.
#[inline(always)]
pub(crate) fn xor_chunks(y: &[u8; 16], chunk: &[u8]) -> [u8; 16] {
    let mut out: [u8; 16] = *y;
    for (o, c) in out.iter_mut().zip(chunk) {
        *o ^= c;
    }
    out
}

/// Copies a chunk of at most 16 bytes into a block, zero filling the tail.
#[inline(always)]
pub(crate) fn to_block(chunk: &[u8]) -> [u8; 16] {
    let mut block = [0u8; 16];
    block[..chunk.len()].copy_from_slice(chunk);
    block
}

/// Number of 16-byte blocks needed to cover `len` bytes, as a 32-bit counter span.
#[inline(always)]
pub(crate) fn block_count(len: usize) -> Option<u32> {
    u32::try_from(len.div_ceil(16)).ok()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctr_block_is_big_endian() {
        let block = ctr_block(&[0xaa; 12], 0x0102_0304);
        assert_eq!(&block[..12], &[0xaa; 12]);
        assert_eq!(&block[12..], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn xor_partial_chunk_keeps_tail() {
        let out = xor_chunks(&[0xff; 16], &[0x0f, 0xf0]);
        assert_eq!(&out[..2], &[0xf0, 0x0f]);
        assert_eq!(&out[2..], &[0xff; 14]);
    }

    #[test]
    fn block_counts() {
        assert_eq!(block_count(0), Some(0));
        assert_eq!(block_count(1), Some(1));
        assert_eq!(block_count(16), Some(1));
        assert_eq!(block_count(17), Some(2));
    }
}

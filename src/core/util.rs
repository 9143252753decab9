/// AddRoundKey: XOR the state with a 16-byte round key. Self-inverse, so shared by both directions.
#[inline(always)]
pub(crate) fn add_round_key(state: &mut [u8; 16], round_key: &[u8; 16]) {
    for i in 0..16 {
        state[i] ^= round_key[i];
    }
}

//! Block cipher modes of operation. Each mode works on already padded input and a round key
//! schedule; IV lengths are checked by [Cipher](crate::Cipher) before a mode is entered.

mod cbc;
mod cfb;
mod ctr;
mod ecb;
mod gcm;
mod ofb;
pub(crate) mod util;

use std::fmt;

pub use cbc::{cbc_decrypt, cbc_encrypt};
pub use cfb::{cfb_decrypt, cfb_encrypt};
pub use ctr::ctr_apply;
pub use ecb::{ecb_decrypt, ecb_encrypt};
pub use gcm::{compute_tag, gcm_decrypt, gcm_encrypt};
pub use ofb::ofb_apply;
pub use util::PARALLEL_THRESHOLD;

/// Mode of operation.
///
/// | Mode | IV      | Chaining                              |
/// |------|---------|---------------------------------------|
/// | ECB  | none    | every block independent               |
/// | CBC  | 16 bytes| plaintext XOR previous ciphertext     |
/// | CFB  | 16 bytes| keystream from previous ciphertext    |
/// | OFB  | 16 bytes| keystream from previous keystream     |
/// | CTR  | 12 bytes| keystream from nonce and counter      |
/// | GCM  | 12 bytes| CTR plus a GHASH authentication tag   |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Ecb,
    Cbc,
    Cfb,
    Ofb,
    Ctr,
    Gcm,
}

impl Mode {
    pub const ALL: [Mode; 6] = [Mode::Ecb, Mode::Cbc, Mode::Cfb, Mode::Ofb, Mode::Ctr, Mode::Gcm];

    /// Required IV/nonce length in bytes. ECB takes no IV.
    pub const fn iv_len(self) -> usize {
        match self {
            Mode::Ecb => 0,
            Mode::Cbc | Mode::Cfb | Mode::Ofb => 16,
            Mode::Ctr | Mode::Gcm => 12,
        }
    }

    /// True for modes whose input must be a whole number of blocks (ECB, CBC).
    /// The others are stream-like and accept a short final block.
    pub const fn is_block_aligned(self) -> bool {
        matches!(self, Mode::Ecb | Mode::Cbc)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Mode::Ecb => "ECB",
            Mode::Cbc => "CBC",
            Mode::Cfb => "CFB",
            Mode::Ofb => "OFB",
            Mode::Ctr => "CTR",
            Mode::Gcm => "GCM",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iv_lengths() {
        assert_eq!(Mode::Ecb.iv_len(), 0);
        assert_eq!(Mode::Cbc.iv_len(), 16);
        assert_eq!(Mode::Cfb.iv_len(), 16);
        assert_eq!(Mode::Ofb.iv_len(), 16);
        assert_eq!(Mode::Ctr.iv_len(), 12);
        assert_eq!(Mode::Gcm.iv_len(), 12);
    }
}

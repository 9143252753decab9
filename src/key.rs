//! Defines the [`Key`] struct, which holds a valid AES key of 128, 192, or 256 bits,
//! and the FIPS-197 key expansion that turns it into a schedule of round key words.

use zeroize::Zeroize;

use crate::core::constants::{RCON, SBOX};
use crate::error::{Error, Result};
use crate::util::{random_bytes, xor_words};

/// Supported AES key sizes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    Bits128,
    Bits192,
    Bits256,
}

impl KeySize {
    /// Key length in bytes (16, 24, or 32).
    pub const fn len(self) -> usize {
        match self {
            KeySize::Bits128 => 16,
            KeySize::Bits192 => 24,
            KeySize::Bits256 => 32,
        }
    }

    /// `Nk`: number of 32-bit words in the key.
    pub const fn words(self) -> usize {
        self.len() / 4
    }

    /// `Nr`: number of rounds, `Nk + 6`.
    pub const fn rounds(self) -> usize {
        self.words() + 6
    }
}

#[derive(Clone, PartialEq, Eq)]
enum KeyBytes {
    K128([u8; 16]),
    K192([u8; 24]),
    K256([u8; 32]),
}

/// Contains a valid AES key. Can be instantiated with a random key, or built from a slice
/// of bytes that is 16, 24, or 32 bytes long.
/// A `key` object is required to instantiate a [Cipher](crate::Cipher).
///
/// The key bytes are wiped when the `Key` is dropped.
///
/// ## Examples
/// ```
/// # fn main() -> aesmodes::Result<()> {
/// use aesmodes::{Key, KeySize};
///
/// let random = Key::random(KeySize::Bits192)?;
/// assert_eq!(random.as_bytes().len(), 24);
///
/// let key_bytes = [0x2bu8; 32];
/// let key = Key::try_from_slice(&key_bytes[..16])?;
/// assert_eq!(key.size(), KeySize::Bits128);
/// assert_eq!(key.rounds(), 10);
///
/// // anything other than 16, 24, or 32 bytes is an InvalidKeyLength error
/// assert!(Key::try_from_slice(&key_bytes[..20]).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    bytes: KeyBytes,
}

impl Key {
    /// Generate a random key of the given size. Returns Error if OsRng fails.
    pub fn random(size: KeySize) -> Result<Self> {
        let bytes = match size {
            KeySize::Bits128 => KeyBytes::K128(random_bytes()?),
            KeySize::Bits192 => KeyBytes::K192(random_bytes()?),
            KeySize::Bits256 => KeyBytes::K256(random_bytes()?),
        };
        Ok(Self { bytes })
    }

    /// Generate a random 128-bit key. Returns Error if OsRng fails.
    pub fn rand_key_128() -> Result<Self> {
        Self::random(KeySize::Bits128)
    }

    /// Generate a random 192-bit key. Returns Error if OsRng fails.
    pub fn rand_key_192() -> Result<Self> {
        Self::random(KeySize::Bits192)
    }

    /// Generate a random 256-bit key. Returns Error if OsRng fails.
    pub fn rand_key_256() -> Result<Self> {
        Self::random(KeySize::Bits256)
    }

    /// Attempts to build a key from a slice of bytes. Will return an InvalidKeyLength error
    /// if the input slice is anything other than 16, 24, or 32 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let invalid = || Error::InvalidKeyLength { len: bytes.len() };
        let bytes = match bytes.len() {
            16 => KeyBytes::K128(bytes.try_into().map_err(|_| invalid())?),
            24 => KeyBytes::K192(bytes.try_into().map_err(|_| invalid())?),
            32 => KeyBytes::K256(bytes.try_into().map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };
        Ok(Self { bytes })
    }

    /// Returns a reference to the internal key as a slice of bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.bytes {
            KeyBytes::K128(k) => k,
            KeyBytes::K192(k) => k,
            KeyBytes::K256(k) => k,
        }
    }

    pub fn size(&self) -> KeySize {
        match self.bytes {
            KeyBytes::K128(_) => KeySize::Bits128,
            KeyBytes::K192(_) => KeySize::Bits192,
            KeyBytes::K256(_) => KeySize::Bits256,
        }
    }

    /// Number of rounds (`Nr`) for this key: 10, 12, or 14.
    pub fn rounds(&self) -> usize {
        self.size().rounds()
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key")
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        match &mut self.bytes {
            KeyBytes::K128(k) => k.zeroize(),
            KeyBytes::K192(k) => k.zeroize(),
            KeyBytes::K256(k) => k.zeroize(),
        }
    }
}

/// AES key schedule (FIPS-197 KeyExpansion). Returns `4 * (Nr + 1)` words: 44, 52, or 60
/// for AES-128, AES-192, and AES-256 respectively. The first `Nk` words are the key itself.
pub fn expand_key(key: &Key) -> Vec<[u8; 4]> {
    let key = key.as_bytes();

    // Variable names match FIPS-197, NIST specification: https://doi.org/10.6028/NIST.FIPS.197-upd1
    // Nk   The number of 32-bit words comprising the key
    // Nr   The number of rounds. 10, 12, and 14 for AES-128, AES-192, and AES-256, respectively
    // w    The result of the key schedule, an array of words that form round keys
    // Nw   The total number of words generated by the key schedule (including initial key)
    let nk = key.len() / 4;
    let nr = nk + 6;
    let nw = (nr + 1) * 4;

    let mut w: Vec<[u8; 4]> = Vec::with_capacity(nw);
    w.extend(key.chunks_exact(4).map(|c| [c[0], c[1], c[2], c[3]]));

    for i in nk..nw {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            // SubWord(RotWord(temp)) ^ Rcon[i / Nk]
            temp = [
                SBOX[temp[1] as usize] ^ RCON[i / nk],
                SBOX[temp[2] as usize],
                SBOX[temp[3] as usize],
                SBOX[temp[0] as usize],
            ];
        } else if nk > 6 && i % nk == 4 {
            // additional substitution for AES-256 only
            temp = temp.map(|b| SBOX[b as usize]);
        }

        // w[i] = temp ⊕ w[i − Nk]
        w.push(xor_words(&temp, &w[i - nk]));
    }

    w
}

/// Groups the schedule into 16-byte round keys, four consecutive words each, laid out
/// column-major to match the cipher state.
pub(crate) fn round_keys(words: &[[u8; 4]]) -> Vec<[u8; 16]> {
    words
        .chunks_exact(4)
        .map(|cols| {
            let mut rk = [0u8; 16];
            for (col, word) in cols.iter().enumerate() {
                rk[col * 4..col * 4 + 4].copy_from_slice(word);
            }
            rk
        })
        .collect()
}

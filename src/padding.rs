//! Reversible block alignment applied before encryption and removed after decryption.
//!
//! For every scheme except [Padding::None], `n = 16 - (len % 16)` bytes are appended, so
//! `n` is always in `1..=16` and already aligned input gains a whole block.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::util::random_fill;

/// Padding scheme.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Padding {
    /// No padding. The caller guarantees block alignment for ECB/CBC.
    None,
    /// `n` zero bytes. Unpadding strips every trailing zero, so data ending in zeros is lossy.
    ZeroPadding,
    /// `n` bytes each equal to `n`.
    #[default]
    Pkcs7,
    /// `n - 1` random bytes, then `n`.
    Iso10126,
    /// `n - 1` zero bytes, then `n`.
    AnsiX923,
}

impl Padding {
    pub const ALL: [Padding; 5] = [
        Padding::None,
        Padding::ZeroPadding,
        Padding::Pkcs7,
        Padding::Iso10126,
        Padding::AnsiX923,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Padding::None => "None",
            Padding::ZeroPadding => "ZeroPadding",
            Padding::Pkcs7 => "PKCS7",
            Padding::Iso10126 => "ISO10126",
            Padding::AnsiX923 => "ANSIX923",
        }
    }

    /// Returns `data` extended to a multiple of 16 bytes. Only ISO 10126 can fail (OS RNG).
    pub fn pad(self, data: &[u8]) -> Result<Vec<u8>> {
        if self == Padding::None {
            return Ok(data.to_vec());
        }

        let n = 16 - data.len() % 16;
        let mut out = Vec::with_capacity(data.len() + n);
        out.extend_from_slice(data);

        match self {
            Padding::None => {}
            Padding::ZeroPadding => out.resize(data.len() + n, 0),
            Padding::Pkcs7 => out.resize(data.len() + n, n as u8),
            Padding::AnsiX923 => {
                out.resize(data.len() + n - 1, 0);
                out.push(n as u8);
            }
            Padding::Iso10126 => {
                out.resize(data.len() + n - 1, 0);
                random_fill(&mut out[data.len()..])?;
                out.push(n as u8);
            }
        }

        Ok(out)
    }

    /// Removes and validates padding, returning the original data.
    pub fn unpad(self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.unpadded_slice(data)?.to_vec())
    }

    /// Borrowing form of [unpad](Padding::unpad).
    pub fn unpadded_slice(self, data: &[u8]) -> Result<&[u8]> {
        if self == Padding::None {
            return Ok(data);
        }
        if data.is_empty() || data.len() % 16 != 0 {
            return Err(self.invalid("padded input must be a non-empty multiple of 16 bytes"));
        }

        if self == Padding::ZeroPadding {
            let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            return Ok(&data[..end]);
        }

        let n = data[data.len() - 1] as usize;
        if n == 0 || n > 16 {
            return Err(self.invalid("final byte is not a length in 1..=16"));
        }

        let start = data.len() - n;
        let filler = &data[start..data.len() - 1];
        let valid = match self {
            Padding::Pkcs7 => filler.iter().all(|&b| b as usize == n),
            Padding::AnsiX923 => filler.iter().all(|&b| b == 0),
            _ => true,
        };
        if !valid {
            return Err(self.invalid("filler bytes do not match the scheme"));
        }

        Ok(&data[..start])
    }

    fn invalid(self, context: &'static str) -> Error {
        Error::InvalidPadding {
            scheme: self.name(),
            context,
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the scheme names `None`, `ZeroPadding`, `PKCS7`, `ISO10126`, `ANSIX923` (any case).
impl FromStr for Padding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Padding::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnsupportedPadding(s.to_string()))
    }
}

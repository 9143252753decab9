//! AES (FIPS-197) with the ECB, CBC, CFB, OFB, CTR and GCM modes of operation.
//!
//! The main entry point is [Cipher], built once from a [Key]. The free functions in this module
//! take raw key bytes instead and expand the key on every call, which is convenient for one-off
//! operations.
//!
//! ## Example
//! ```
//! # fn main() -> aesmodes::Result<()> {
//! use aesmodes::{Cipher, Key, Mode, Padding};
//!
//! // generate a random 256-bit key and instantiate a cipher with it
//! let key = Key::rand_key_256()?;
//! let cipher = Cipher::new(&key);
//!
//! // seal generates the IV and frames it with the ciphertext
//! let sealed = cipher.seal(Mode::Gcm, b"Hello, World!", Padding::None, Some(b"header".as_slice()))?;
//! let (plaintext, aad) = cipher.open(Mode::Gcm, &sealed, Padding::None)?;
//!
//! assert_eq!(plaintext, b"Hello, World!");
//! assert_eq!(aad.as_deref(), Some(b"header".as_slice()));
//! # Ok(())
//! # }
//! ```

mod cipher;
mod core;
mod error;
mod gf128;
mod key;
mod modes;
mod padding;
mod util;

pub use cipher::Cipher;
pub use error::{Error, Result};
pub use key::{Key, KeySize, expand_key};
pub use modes::{Mode, PARALLEL_THRESHOLD};
pub use padding::Padding;

fn block(bytes: &[u8]) -> Result<[u8; 16]> {
    bytes
        .try_into()
        .map_err(|_| Error::InvalidBlockLength { len: bytes.len() })
}

/// Encrypts one 16-byte block under a 16, 24 or 32 byte key.
///
/// ```
/// # fn main() -> aesmodes::Result<()> {
/// let key: Vec<u8> = (0u8..16).collect();
/// let pt = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
/// let ct = aesmodes::encrypt_block(&key, &pt)?;
/// assert_eq!(ct[..4], [0x69u8, 0xc4, 0xe0, 0xd8]);
/// assert_eq!(aesmodes::decrypt_block(&key, &ct)?, pt);
/// # Ok(())
/// # }
/// ```
pub fn encrypt_block(key: &[u8], plaintext: &[u8]) -> Result<[u8; 16]> {
    let cipher = Cipher::new(&Key::try_from_slice(key)?);
    Ok(cipher.encrypt_block(&block(plaintext)?))
}

/// Decrypts one 16-byte block under a 16, 24 or 32 byte key.
pub fn decrypt_block(key: &[u8], ciphertext: &[u8]) -> Result<[u8; 16]> {
    let cipher = Cipher::new(&Key::try_from_slice(key)?);
    Ok(cipher.decrypt_block(&block(ciphertext)?))
}

/// Pads and encrypts `plaintext` under `mode`. See [Cipher::encrypt].
pub fn mode_encrypt(mode: Mode, key: &[u8], plaintext: &[u8], iv: &[u8], padding: Padding) -> Result<Vec<u8>> {
    Cipher::new(&Key::try_from_slice(key)?).encrypt(mode, plaintext, iv, padding)
}

/// Decrypts `ciphertext` under `mode`, leaving any padding in place. See [Cipher::decrypt].
pub fn mode_decrypt(mode: Mode, key: &[u8], ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    Cipher::new(&Key::try_from_slice(key)?).decrypt(mode, ciphertext, iv)
}

/// AES-GCM with a 12-byte IV. Returns `(ciphertext, tag)`.
pub fn gcm_encrypt(key: &[u8], plaintext: &[u8], iv: &[u8], aad: &[u8]) -> Result<(Vec<u8>, [u8; 16])> {
    Cipher::new(&Key::try_from_slice(key)?).gcm_encrypt(plaintext, iv, aad)
}

/// AES-GCM decryption. Fails with [Error::AuthFailed] without releasing plaintext if the tag
/// does not verify.
pub fn gcm_decrypt(key: &[u8], ciphertext: &[u8], iv: &[u8], aad: &[u8], tag: &[u8]) -> Result<Vec<u8>> {
    Cipher::new(&Key::try_from_slice(key)?).gcm_decrypt(ciphertext, iv, aad, tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::util::test_util::{KEY_128, KEY_192, hex_to_arr_16};

    #[test]
    fn block_functions_validate_lengths() {
        assert!(matches!(
            encrypt_block(&KEY_128, &[0u8; 15]),
            Err(Error::InvalidBlockLength { len: 15 })
        ));
        assert!(matches!(
            decrypt_block(&KEY_128, &[0u8; 17]),
            Err(Error::InvalidBlockLength { len: 17 })
        ));
        assert!(matches!(
            encrypt_block(&KEY_128[..10], &[0u8; 16]),
            Err(Error::InvalidKeyLength { len: 10 })
        ));
    }

    #[test]
    fn fips_197_appendix_c_192() -> Result<()> {
        let key: Vec<u8> = (0u8..24).collect();
        let pt = hex_to_arr_16("00112233445566778899aabbccddeeff");
        let ct = encrypt_block(&key, &pt)?;
        assert_eq!(ct, hex_to_arr_16("dda97ca4864cdfe06eaf70a0ec0d7191"));
        assert_eq!(decrypt_block(&key, &ct)?, pt);
        Ok(())
    }

    #[test]
    fn free_functions_match_cipher() -> Result<()> {
        let iv = [7u8; 16];
        let ct = mode_encrypt(Mode::Cbc, &KEY_192, b"free function", &iv, Padding::Pkcs7)?;
        let padded = mode_decrypt(Mode::Cbc, &KEY_192, &ct, &iv)?;
        assert_eq!(Padding::Pkcs7.unpad(&padded)?, b"free function");

        let cipher = Cipher::new(&Key::try_from_slice(&KEY_192)?);
        assert_eq!(cipher.encrypt(Mode::Cbc, b"free function", &iv, Padding::Pkcs7)?, ct);
        Ok(())
    }

    #[test]
    fn gcm_free_functions() -> Result<()> {
        let iv = [9u8; 12];
        let (ct, tag) = gcm_encrypt(&KEY_128, b"attack at dawn", &iv, b"v1")?;
        assert_eq!(gcm_decrypt(&KEY_128, &ct, &iv, b"v1", &tag)?, b"attack at dawn");
        assert!(matches!(
            gcm_decrypt(&KEY_128, &ct, &iv, b"v2", &tag),
            Err(Error::AuthFailed)
        ));
        Ok(())
    }
}

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::{decrypt_block, encrypt_block};
use crate::error::{Error, Result};
use crate::key::{Key, expand_key, round_keys};
use crate::modes::*;
use crate::padding::Padding;
use crate::util::random_fill;

/// Provides encryption and decryption for AES in every supported [Mode].
/// Instantiated with an AES [Key], which is expanded once into round keys and stored in the instance.
/// The round keys are wiped when the `Cipher` is dropped.
///
/// Two interfaces are offered:
/// - [encrypt](Cipher::encrypt) / [decrypt](Cipher::decrypt) take the IV explicitly and return the
///   raw mode output (for GCM, `ciphertext || tag`).
/// - [seal](Cipher::seal) / [open](Cipher::open) generate the IV and frame it into the output.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Cipher {
    round_keys: Vec<[u8; 16]>,
}

impl Cipher {
    /// Runs the key schedule and stores the resulting `Nr + 1` round keys.
    pub fn new(key: &Key) -> Self {
        Self {
            round_keys: round_keys(&expand_key(key)),
        }
    }

    /// Getter for internal round keys. Returned as a slice of 16-byte arrays.
    pub fn round_keys(&self) -> &[[u8; 16]] {
        &self.round_keys
    }

    /// Number of rounds (`Nr`) this cipher runs.
    pub fn rounds(&self) -> usize {
        self.round_keys.len() - 1
    }

    /// Encrypts a single 16-byte block.
    pub fn encrypt_block(&self, block: &[u8; 16]) -> [u8; 16] {
        encrypt_block(block, &self.round_keys)
    }

    /// Decrypts a single 16-byte block.
    pub fn decrypt_block(&self, block: &[u8; 16]) -> [u8; 16] {
        decrypt_block(block, &self.round_keys)
    }

    /// Pads `plaintext` with `padding` and encrypts it under `mode`.
    ///
    /// `iv` must be exactly [Mode::iv_len] bytes (empty for ECB). With [Padding::None], ECB and
    /// CBC require block-aligned plaintext while the stream-like modes accept any length.
    ///
    /// For GCM the output is `ciphertext || tag (16 bytes)` with no AAD; use
    /// [gcm_encrypt](Cipher::gcm_encrypt) to authenticate additional data.
    pub fn encrypt(&self, mode: Mode, plaintext: &[u8], iv: &[u8], padding: Padding) -> Result<Vec<u8>> {
        check_iv(mode, iv)?;
        let padded = padding.pad(plaintext)?;
        let rk = &self.round_keys;

        match mode {
            Mode::Ecb => ecb_encrypt(&padded, rk),
            Mode::Cbc => cbc_encrypt(&padded, rk, &iv_array(mode, iv)?),
            Mode::Cfb => cfb_encrypt(&padded, rk, &iv_array(mode, iv)?),
            Mode::Ofb => ofb_apply(&padded, rk, &iv_array(mode, iv)?),
            Mode::Ctr => ctr_apply(&padded, rk, &iv_array(mode, iv)?, 0),
            Mode::Gcm => {
                let (mut out, tag) = gcm_encrypt(&padded, rk, &iv_array(mode, iv)?, &[])?;
                out.extend_from_slice(&tag);
                Ok(out)
            }
        }
    }

    /// Inverse of [encrypt](Cipher::encrypt) without removing padding.
    ///
    /// ECB and CBC reject ciphertext that is not a multiple of 16 bytes. GCM input must end with
    /// the 16-byte tag, which is verified before any plaintext is returned.
    pub fn decrypt(&self, mode: Mode, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        check_iv(mode, iv)?;
        let rk = &self.round_keys;

        match mode {
            Mode::Ecb => ecb_decrypt(ciphertext, rk),
            Mode::Cbc => cbc_decrypt(ciphertext, rk, &iv_array(mode, iv)?),
            Mode::Cfb => cfb_decrypt(ciphertext, rk, &iv_array(mode, iv)?),
            Mode::Ofb => ofb_apply(ciphertext, rk, &iv_array(mode, iv)?),
            Mode::Ctr => ctr_apply(ciphertext, rk, &iv_array(mode, iv)?, 0),
            Mode::Gcm => {
                if ciphertext.len() < 16 {
                    return Err(Error::InvalidCiphertext {
                        len: ciphertext.len(),
                        context: "GCM input shorter than the 16-byte tag",
                    });
                }
                let (ct, tag) = ciphertext.split_at(ciphertext.len() - 16);
                self.gcm_decrypt(ct, iv, &[], tag)
            }
        }
    }

    /// [decrypt](Cipher::decrypt) followed by [Padding::unpad].
    pub fn decrypt_unpad(&self, mode: Mode, ciphertext: &[u8], iv: &[u8], padding: Padding) -> Result<Vec<u8>> {
        padding.unpad(&self.decrypt(mode, ciphertext, iv)?)
    }

    /// **Galois/counter mode** encryption with additional authenticated data.
    ///
    /// The AAD is included in the computation of the tag but **not encrypted**. No padding is
    /// applied; the ciphertext has the same length as the plaintext. Returns `(ciphertext, tag)`.
    ///
    /// **Important**: the same IV must never be reused with the same key.
    pub fn gcm_encrypt(&self, plaintext: &[u8], iv: &[u8], aad: &[u8]) -> Result<(Vec<u8>, [u8; 16])> {
        check_iv(Mode::Gcm, iv)?;
        gcm_encrypt(plaintext, &self.round_keys, &iv_array(Mode::Gcm, iv)?, aad)
    }

    /// **Galois/counter mode** decryption.
    ///
    /// Returns:
    /// - the plaintext if the tag was authenticated.
    /// - [AuthFailed](Error::AuthFailed) if the computed tag did not match `tag`.
    /// - [InvalidCiphertext](Error::InvalidCiphertext) if `tag` is not 16 bytes.
    pub fn gcm_decrypt(&self, ciphertext: &[u8], iv: &[u8], aad: &[u8], tag: &[u8]) -> Result<Vec<u8>> {
        check_iv(Mode::Gcm, iv)?;
        let tag: [u8; 16] = tag.try_into().map_err(|_| Error::InvalidCiphertext {
            len: tag.len(),
            context: "GCM tag must be 16 bytes",
        })?;
        gcm_decrypt(ciphertext, &self.round_keys, &iv_array(Mode::Gcm, iv)?, aad, &tag)
    }

    /// Encrypts under a freshly generated random IV and frames the result so that
    /// [open](Cipher::open) needs only the key, mode and padding.
    ///
    /// Output is formatted as:
    /// - ECB: `Ciphertext`
    /// - CBC, CFB, OFB: `IV (16 bytes) || Ciphertext`
    /// - CTR: `IV (12 bytes) || Ciphertext`
    /// - GCM: `IV (12 bytes) || AAD length (4 bytes) || AAD || Ciphertext || Tag (16 bytes)`
    ///
    /// `aad` is only accepted for GCM.
    pub fn seal(&self, mode: Mode, plaintext: &[u8], padding: Padding, aad: Option<&[u8]>) -> Result<Vec<u8>> {
        let mut iv = vec![0u8; mode.iv_len()];
        random_fill(&mut iv)?;
        self.seal_with_iv(mode, plaintext, &iv, padding, aad)
    }

    /// Deterministic form of [seal](Cipher::seal) with a caller-supplied IV.
    pub fn seal_with_iv(
        &self,
        mode: Mode,
        plaintext: &[u8],
        iv: &[u8],
        padding: Padding,
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        if mode != Mode::Gcm {
            if aad.is_some() {
                return Err(Error::AadNotSupported { mode });
            }
            let mut out = iv.to_vec();
            out.extend(self.encrypt(mode, plaintext, iv, padding)?);
            return Ok(out);
        }

        let aad = aad.unwrap_or(&[]);
        let aad_len = u32::try_from(aad.len()).map_err(|_| Error::InvalidCiphertext {
            len: aad.len(),
            context: "AAD longer than u32::MAX bytes",
        })?;

        let padded = padding.pad(plaintext)?;
        let (ct, tag) = self.gcm_encrypt(&padded, iv, aad)?;

        let mut out = Vec::with_capacity(iv.len() + 4 + aad.len() + ct.len() + 16);
        out.extend_from_slice(iv);
        out.extend_from_slice(&aad_len.to_be_bytes());
        out.extend_from_slice(aad);
        out.extend_from_slice(&ct);
        out.extend_from_slice(&tag);
        Ok(out)
    }

    /// Reverses [seal](Cipher::seal). Returns `(plaintext, AAD)` where the AAD is `Some` only for
    /// GCM messages that carried a non-empty AAD.
    ///
    /// Returns:
    /// - [AuthFailed](Error::AuthFailed) if a GCM tag did not verify.
    /// - [InvalidCiphertext](Error::InvalidCiphertext) if the message does not match the framing.
    /// - [InvalidPadding](Error::InvalidPadding) if the decrypted padding is malformed.
    pub fn open(&self, mode: Mode, message: &[u8], padding: Padding) -> Result<(Vec<u8>, Option<Vec<u8>>)> {
        if mode != Mode::Gcm {
            if message.len() < mode.iv_len() {
                return Err(Error::InvalidCiphertext {
                    len: message.len(),
                    context: "missing IV prefix",
                });
            }
            let (iv, ct) = message.split_at(mode.iv_len());
            return Ok((self.decrypt_unpad(mode, ct, iv, padding)?, None));
        }

        // minimum size is 32 bytes -> 12 (iv) + 4 (aad_len) + 16 (tag)
        if message.len() < 32 {
            return Err(Error::InvalidCiphertext {
                len: message.len(),
                context: "insufficient bytes for valid GCM",
            });
        }

        let (iv, rest) = message.split_at(12);
        let (aad_len, rest) = rest.split_at(4);
        let aad_len = u32::from_be_bytes([aad_len[0], aad_len[1], aad_len[2], aad_len[3]]) as usize;
        if rest.len() < aad_len + 16 {
            return Err(Error::InvalidCiphertext {
                len: message.len(),
                context: "insufficient bytes given aad_len",
            });
        }

        let (aad, rest) = rest.split_at(aad_len);
        let (ct, tag) = rest.split_at(rest.len() - 16);

        let padded = self.gcm_decrypt(ct, iv, aad, tag)?;
        let plaintext = padding.unpad(&padded)?;

        let aad = if aad.is_empty() { None } else { Some(aad.to_vec()) };
        Ok((plaintext, aad))
    }
}

fn check_iv(mode: Mode, iv: &[u8]) -> Result<()> {
    if iv.len() != mode.iv_len() {
        return Err(Error::InvalidIvLength {
            mode,
            len: iv.len(),
            expected: mode.iv_len(),
        });
    }
    Ok(())
}

fn iv_array<const N: usize>(mode: Mode, iv: &[u8]) -> Result<[u8; N]> {
    iv.try_into().map_err(|_| Error::InvalidIvLength {
        mode,
        len: iv.len(),
        expected: N,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::PARALLEL_THRESHOLD;
    use crate::modes::util::test_util::{BLOCK_IV, CTR_IV, KEY_128, KEY_256, PLAINTEXT, pattern};

    fn iv_for(mode: Mode) -> Vec<u8> {
        match mode.iv_len() {
            0 => Vec::new(),
            12 => CTR_IV.to_vec(),
            _ => BLOCK_IV.to_vec(),
        }
    }

    #[test]
    fn round_trip_every_mode_and_padding() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_256)?);
        let schemes = [Padding::Pkcs7, Padding::Iso10126, Padding::AnsiX923];

        for mode in Mode::ALL {
            let iv = iv_for(mode);
            for padding in schemes {
                for len in [0, 1, 15, 16, 17, 40, 64] {
                    let pt = &PLAINTEXT[..len];
                    let ct = cipher.encrypt(mode, pt, &iv, padding)?;
                    assert_eq!(cipher.decrypt_unpad(mode, &ct, &iv, padding)?, pt, "{mode} {padding} {len}");
                }
            }
        }
        Ok(())
    }

    #[test]
    fn unpadded_lengths() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);
        let pt = &PLAINTEXT[..37];

        for mode in [Mode::Cfb, Mode::Ofb, Mode::Ctr] {
            let iv = iv_for(mode);
            let ct = cipher.encrypt(mode, pt, &iv, Padding::None)?;
            assert_eq!(ct.len(), 37);
            assert_eq!(cipher.decrypt(mode, &ct, &iv)?, pt);
        }

        let ct = cipher.encrypt(Mode::Gcm, pt, &CTR_IV, Padding::None)?;
        assert_eq!(ct.len(), 37 + 16);

        assert!(matches!(
            cipher.encrypt(Mode::Ecb, pt, &[], Padding::None),
            Err(Error::MisalignedPlaintext { mode: Mode::Ecb, len: 37 })
        ));
        assert!(matches!(
            cipher.encrypt(Mode::Cbc, pt, &BLOCK_IV, Padding::None),
            Err(Error::MisalignedPlaintext { mode: Mode::Cbc, len: 37 })
        ));
        assert!(matches!(
            cipher.decrypt(Mode::Cbc, pt, &BLOCK_IV),
            Err(Error::MisalignedCiphertext { mode: Mode::Cbc, len: 37 })
        ));
        Ok(())
    }

    #[test]
    fn decrypt_returns_padded_plaintext() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);
        let ct = cipher.encrypt(Mode::Cbc, b"hello", &BLOCK_IV, Padding::Pkcs7)?;
        let padded = cipher.decrypt(Mode::Cbc, &ct, &BLOCK_IV)?;
        assert_eq!(padded.len(), 16);
        assert_eq!(&padded[..5], b"hello");
        assert_eq!(&padded[5..], &[11u8; 11]);
        Ok(())
    }

    #[test]
    fn iv_length_is_checked() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);

        assert!(matches!(
            cipher.encrypt(Mode::Cbc, b"data", &CTR_IV, Padding::Pkcs7),
            Err(Error::InvalidIvLength { mode: Mode::Cbc, len: 12, expected: 16 })
        ));
        assert!(matches!(
            cipher.encrypt(Mode::Ctr, b"data", &BLOCK_IV, Padding::Pkcs7),
            Err(Error::InvalidIvLength { mode: Mode::Ctr, len: 16, expected: 12 })
        ));
        assert!(matches!(
            cipher.encrypt(Mode::Ecb, b"data", &BLOCK_IV, Padding::Pkcs7),
            Err(Error::InvalidIvLength { mode: Mode::Ecb, len: 16, expected: 0 })
        ));
        assert!(matches!(
            cipher.gcm_decrypt(b"data", &BLOCK_IV, &[], &[0u8; 16]),
            Err(Error::InvalidIvLength { mode: Mode::Gcm, .. })
        ));
        Ok(())
    }

    #[test]
    fn gcm_detects_tampering() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);
        let mut ct = cipher.encrypt(Mode::Gcm, &PLAINTEXT, &CTR_IV, Padding::None)?;
        ct[3] ^= 0x01;
        assert!(matches!(cipher.decrypt(Mode::Gcm, &ct, &CTR_IV), Err(Error::AuthFailed)));

        assert!(matches!(
            cipher.decrypt(Mode::Gcm, &[0u8; 15], &CTR_IV),
            Err(Error::InvalidCiphertext { len: 15, .. })
        ));
        assert!(matches!(
            cipher.gcm_decrypt(&ct, &CTR_IV, &[], &[0u8; 8]),
            Err(Error::InvalidCiphertext { len: 8, .. })
        ));
        Ok(())
    }

    #[test]
    fn seal_framing_lengths() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);
        let pt = &PLAINTEXT[..20];

        // padded plaintext is 32 bytes for every mode
        for (mode, expected) in [
            (Mode::Ecb, 32),
            (Mode::Cbc, 16 + 32),
            (Mode::Cfb, 16 + 32),
            (Mode::Ofb, 16 + 32),
            (Mode::Ctr, 12 + 32),
            (Mode::Gcm, 12 + 4 + 32 + 16),
        ] {
            let sealed = cipher.seal(mode, pt, Padding::Pkcs7, None)?;
            assert_eq!(sealed.len(), expected, "{mode}");
            assert_eq!(cipher.open(mode, &sealed, Padding::Pkcs7)?, (pt.to_vec(), None));
        }
        Ok(())
    }

    #[test]
    fn seal_with_iv_prefixes_iv() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);
        let sealed = cipher.seal_with_iv(Mode::Ctr, &PLAINTEXT, &CTR_IV, Padding::None, None)?;
        assert_eq!(sealed[..12], CTR_IV);
        assert_eq!(sealed[12..], cipher.encrypt(Mode::Ctr, &PLAINTEXT, &CTR_IV, Padding::None)?);
        Ok(())
    }

    #[test]
    fn seal_gcm_with_aad() -> Result<()> {
        let cipher = Cipher::new(&Key::rand_key_256()?);
        let aad = b"header".as_slice();

        let sealed = cipher.seal(Mode::Gcm, b"Hello, World!", Padding::None, Some(aad))?;
        assert_eq!(sealed[12..16], 6u32.to_be_bytes());
        assert_eq!(&sealed[16..22], aad);

        let (pt, recovered) = cipher.open(Mode::Gcm, &sealed, Padding::None)?;
        assert_eq!(pt, b"Hello, World!");
        assert_eq!(recovered.as_deref(), Some(aad));

        // iv, aad_len, aad, ciphertext, tag
        for i in [0, 13, 17, 25, sealed.len() - 1] {
            let mut bad = sealed.clone();
            bad[i] ^= 0x04;
            assert!(cipher.open(Mode::Gcm, &bad, Padding::None).is_err(), "byte {i}");
        }
        Ok(())
    }

    #[test]
    fn open_rejects_bad_framing() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);

        assert!(matches!(
            cipher.open(Mode::Gcm, &[0u8; 31], Padding::None),
            Err(Error::InvalidCiphertext { len: 31, .. })
        ));

        // aad_len claims more bytes than the message holds
        let mut msg = vec![0u8; 40];
        msg[12..16].copy_from_slice(&100u32.to_be_bytes());
        assert!(matches!(
            cipher.open(Mode::Gcm, &msg, Padding::None),
            Err(Error::InvalidCiphertext { .. })
        ));

        assert!(matches!(
            cipher.open(Mode::Cbc, &[0u8; 10], Padding::Pkcs7),
            Err(Error::InvalidCiphertext { len: 10, .. })
        ));
        Ok(())
    }

    #[test]
    fn aad_rejected_outside_gcm() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);
        assert!(matches!(
            cipher.seal(Mode::Ctr, b"data", Padding::None, Some(b"aad".as_slice())),
            Err(Error::AadNotSupported { mode: Mode::Ctr })
        ));
        Ok(())
    }

    #[test]
    fn large_inputs_round_trip() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_256)?);
        let pt = pattern(PARALLEL_THRESHOLD * 3 + 11);
        for mode in Mode::ALL {
            let sealed = cipher.seal(mode, &pt, Padding::Pkcs7, None)?;
            assert_eq!(cipher.open(mode, &sealed, Padding::Pkcs7)?.0, pt, "{mode}");
        }
        Ok(())
    }

    #[test]
    fn block_functions_invert() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);
        assert_eq!(cipher.rounds(), 10);
        let block = [0x42u8; 16];
        assert_eq!(cipher.decrypt_block(&cipher.encrypt_block(&block)), block);
        Ok(())
    }
}

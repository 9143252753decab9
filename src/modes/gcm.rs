use subtle::ConstantTimeEq;

use crate::core::encrypt_block;
use crate::error::*;
use crate::gf128::Ghash;
use crate::modes::ctr::ctr_apply;
use crate::modes::util::{ctr_block, xor_chunks};

/*
https://csrc.nist.rip/groups/ST/toolkit/BCM/documents/proposedmodes/gcm/gcm-spec.pdf

H = block of 0s encrypted with key
start with accumulator s = 0
for each 16-byte block b:
    s = (s ^ b) * H (GF128 multiplication)

where blocks are:
    - all AAD blocks (padded)
    - all ciphertext blocks (padded)
    - one block comprised aad.len || ct.len

final tag = s ^ encrypt_block(J0, key)

where J0 is:
    - IV || 1u32 (initial ctr block for ctr = 1)

and the data itself is CTR encrypted from ctr = 2.
*/

/// First counter value used for data blocks; counter 1 is reserved for the tag mask.
const GCM_CTR_START: u32 = 2;

/// **Galois/counter mode** encryption. Returns `(ciphertext, tag)`.
///
/// The CTR keystream runs in parallel for large inputs; GHASH is folded afterwards in block order.
pub fn gcm_encrypt(
    plaintext: &[u8],
    round_keys: &[[u8; 16]],
    iv: &[u8; 12],
    aad: &[u8],
) -> Result<(Vec<u8>, [u8; 16])> {
    let ciphertext = ctr_apply(plaintext, round_keys, iv, GCM_CTR_START)?;
    let tag = compute_tag(&ciphertext, round_keys, iv, aad);
    Ok((ciphertext, tag))
}

/// **Galois/counter mode** decryption.
///
/// The tag is recomputed over the ciphertext and AAD and compared in constant time before any
/// plaintext is produced; a mismatch returns [AuthFailed](Error::AuthFailed).
pub fn gcm_decrypt(
    ciphertext: &[u8],
    round_keys: &[[u8; 16]],
    iv: &[u8; 12],
    aad: &[u8],
    tag: &[u8; 16],
) -> Result<Vec<u8>> {
    let computed = compute_tag(ciphertext, round_keys, iv, aad);
    if !bool::from(computed[..].ct_eq(&tag[..])) {
        return Err(Error::AuthFailed);
    }
    ctr_apply(ciphertext, round_keys, iv, GCM_CTR_START)
}

/// Computes the GCM authentication tag `GHASH_H(A, C) ⊕ E(J0)` for a 96-bit IV.
pub fn compute_tag(
    ciphertext: &[u8],
    round_keys: &[[u8; 16]],
    iv: &[u8; 12],
    aad: &[u8],
) -> [u8; 16] {
    // hash subkey is the encryption of the all-zero block
    let h = encrypt_block(&[0u8; 16], round_keys);
    let j0_e = encrypt_block(&ctr_block(iv, 1), round_keys);

    let mut ghash = Ghash::new(h);
    ghash.update(aad);
    ghash.update(ciphertext);
    let s = ghash.finalize(aad.len(), ciphertext.len());

    xor_chunks(&s, &j0_e)
}

// gcm vectors from the GCM specification, test cases 1-4
#[cfg(test)]
mod test_gcm {
    use super::*;
    use crate::cipher::Cipher;
    use crate::key::Key;
    use crate::modes::util::PARALLEL_THRESHOLD;
    use crate::modes::util::test_util::{hex_to_arr_12, hex_to_arr_16, hex_to_bytes, pattern};

    const TC3_KEY: &str = "feffe9928665731c6d6a8f9467308308";
    const TC3_IV: &str = "cafebabefacedbaddecaf888";
    const TC3_PT: &str = "d9313225f88406e5a55909c5aff5269a\
                          86a7a9531534f7da2e4c303d8a318a72\
                          1c3c0c95956809532fcf0e2449a6b525\
                          b16aedf5aa0de657ba637b391aafd255";
    const TC3_CT: &str = "42831ec2217774244b7221b784d0d49c\
                          e3aa212f2c02a4e035c17e2329aca12e\
                          21d514b25466931c7d8f6a5aac84aa05\
                          1ba30b396a0aac973d58e091473f5985";
    const TC4_AAD: &str = "feedfacedeadbeeffeedfacedeadbeefabaddad2";

    fn cipher(key_hex: &str) -> Result<Cipher> {
        Ok(Cipher::new(&Key::try_from_slice(&hex_to_bytes(key_hex))?))
    }

    #[test]
    fn tag_no_pt_no_aad() -> Result<()> {
        let cipher = cipher("00000000000000000000000000000000")?;
        let iv = [0u8; 12];
        let (ct, tag) = gcm_encrypt(&[], cipher.round_keys(), &iv, &[])?;
        assert!(ct.is_empty());
        assert_eq!(tag, hex_to_arr_16("58e2fccefa7e3061367f1d57a4e7455a"));
        Ok(())
    }

    #[test]
    fn zero_key_one_block() -> Result<()> {
        let cipher = cipher("00000000000000000000000000000000")?;
        let iv = [0u8; 12];
        let (ct, tag) = gcm_encrypt(&[0u8; 16], cipher.round_keys(), &iv, &[])?;
        assert_eq!(ct, hex_to_bytes("0388dace60b6a392f328c2b971b2fe78"));
        assert_eq!(tag, hex_to_arr_16("ab6e47d42cec13bdf53a67b21257bddf"));
        Ok(())
    }

    #[test]
    fn test_case_3() -> Result<()> {
        let cipher = cipher(TC3_KEY)?;
        let iv = hex_to_arr_12(TC3_IV);
        let (ct, tag) = gcm_encrypt(&hex_to_bytes(TC3_PT), cipher.round_keys(), &iv, &[])?;
        assert_eq!(ct, hex_to_bytes(TC3_CT));
        assert_eq!(tag, hex_to_arr_16("4d5c2af327cd64a62cf35abd2ba6fab4"));

        let pt = gcm_decrypt(&ct, cipher.round_keys(), &iv, &[], &tag)?;
        assert_eq!(pt, hex_to_bytes(TC3_PT));
        Ok(())
    }

    #[test]
    fn test_case_4_with_aad() -> Result<()> {
        let cipher = cipher(TC3_KEY)?;
        let iv = hex_to_arr_12(TC3_IV);
        let pt = hex_to_bytes(TC3_PT);
        let aad = hex_to_bytes(TC4_AAD);

        let (ct, tag) = gcm_encrypt(&pt[..60], cipher.round_keys(), &iv, &aad)?;
        assert_eq!(ct, hex_to_bytes(TC3_CT)[..60]);
        assert_eq!(tag, hex_to_arr_16("5bc94fbc3221a5db94fae95ae7121a47"));

        assert_eq!(gcm_decrypt(&ct, cipher.round_keys(), &iv, &aad, &tag)?, pt[..60]);
        Ok(())
    }

    #[test]
    fn tampering_fails_closed() -> Result<()> {
        let cipher = cipher(TC3_KEY)?;
        let iv = hex_to_arr_12(TC3_IV);
        let aad = hex_to_bytes(TC4_AAD);
        let (ct, tag) = gcm_encrypt(&hex_to_bytes(TC3_PT), cipher.round_keys(), &iv, &aad)?;

        let mut bad_ct = ct.clone();
        bad_ct[5] ^= 0x10;
        assert!(matches!(
            gcm_decrypt(&bad_ct, cipher.round_keys(), &iv, &aad, &tag),
            Err(Error::AuthFailed)
        ));

        let mut bad_aad = aad.clone();
        bad_aad[0] ^= 0x01;
        assert!(matches!(
            gcm_decrypt(&ct, cipher.round_keys(), &iv, &bad_aad, &tag),
            Err(Error::AuthFailed)
        ));

        let mut bad_tag = tag;
        bad_tag[15] ^= 0x80;
        assert!(matches!(
            gcm_decrypt(&ct, cipher.round_keys(), &iv, &aad, &bad_tag),
            Err(Error::AuthFailed)
        ));

        // truncating the ciphertext changes the length block
        assert!(gcm_decrypt(&ct[..ct.len() - 1], cipher.round_keys(), &iv, &aad, &tag).is_err());
        Ok(())
    }

    #[test]
    fn large_input_round_trip() -> Result<()> {
        let cipher = cipher(TC3_KEY)?;
        let iv = hex_to_arr_12(TC3_IV);
        let pt = pattern(PARALLEL_THRESHOLD * 2 + 3);
        let (ct, tag) = gcm_encrypt(&pt, cipher.round_keys(), &iv, b"header")?;
        assert_eq!(gcm_decrypt(&ct, cipher.round_keys(), &iv, b"header", &tag)?, pt);
        Ok(())
    }
}

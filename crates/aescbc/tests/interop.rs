//! End-to-end behaviour of `CipherContext` across engines and key sizes.

use aescbc::{
    pad, unpad_strict, AesKey, Backend, BackendKind, CipherContext, CipherError, Iv,
    LegacyEngine, PaddingFault, PaddingMode, BLOCK_SIZE,
};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

const KEY_LENGTHS: [usize; 3] = [16, 24, 32];

fn random_bytes(rng: &mut ChaCha20Rng, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}

fn context(kind: BackendKind, key: &[u8], iv: &[u8]) -> CipherContext {
    CipherContext::builder()
        .key(key)
        .iv(iv)
        .backend(kind)
        .build()
        .expect("valid configuration")
}

#[test]
fn round_trip_every_key_size_and_engine() {
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    for key_len in KEY_LENGTHS {
        for kind in BackendKind::ALL {
            let key = random_bytes(&mut rng, key_len);
            let iv = random_bytes(&mut rng, BLOCK_SIZE);
            let ctx = context(kind, &key, &iv);
            for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 100] {
                let plaintext = random_bytes(&mut rng, len);
                let ciphertext = ctx.encrypt(&plaintext).unwrap();
                assert_eq!(ciphertext.len() % BLOCK_SIZE, 0);
                assert_eq!(ciphertext.len(), (len / BLOCK_SIZE + 1) * BLOCK_SIZE);
                assert_eq!(ctx.decrypt(&ciphertext).unwrap(), plaintext);
            }
        }
    }
}

#[test]
fn engines_interoperate() {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    for _ in 0..50 {
        let key_len = KEY_LENGTHS[rng.gen_range(0..KEY_LENGTHS.len())];
        let key = random_bytes(&mut rng, key_len);
        let iv = random_bytes(&mut rng, BLOCK_SIZE);
        let len = rng.gen_range(0..80);
        let plaintext = random_bytes(&mut rng, len);

        let modern = context(BackendKind::Modern, &key, &iv);
        let legacy = context(BackendKind::Legacy, &key, &iv);

        let from_modern = modern.encrypt(&plaintext).unwrap();
        let from_legacy = legacy.encrypt(&plaintext).unwrap();
        assert_eq!(from_modern, from_legacy);
        assert_eq!(legacy.decrypt(&from_modern).unwrap(), plaintext);
        assert_eq!(modern.decrypt(&from_legacy).unwrap(), plaintext);
    }
}

#[test]
fn encryption_is_deterministic() {
    for kind in BackendKind::ALL {
        let ctx = context(kind, &[7u8; 32], &[9u8; BLOCK_SIZE]);
        let first = ctx.encrypt(b"same input, same output").unwrap();
        let second = ctx.encrypt(b"same input, same output").unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn different_iv_changes_ciphertext() {
    let a = context(BackendKind::Modern, &[7u8; 16], &[0u8; BLOCK_SIZE]);
    let b = context(BackendKind::Modern, &[7u8; 16], &[1u8; BLOCK_SIZE]);
    assert_ne!(a.encrypt(b"message").unwrap(), b.encrypt(b"message").unwrap());
}

#[test]
fn nist_sp800_38a_aes256_cbc() {
    let key = hex::decode("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4")
        .unwrap();
    let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
    let plain = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();
    for kind in BackendKind::ALL {
        let ct = context(kind, &key, &iv).encrypt(&plain).unwrap();
        assert_eq!(hex::encode(&ct[..BLOCK_SIZE]), "f58c4c04d6e5f1ba779eabfb5f7bfbd6");
    }
}

#[test]
fn padding_codec_examples() {
    let padded = pad(&[0xaa; 16], 16).unwrap();
    assert_eq!(padded.len(), 32);
    assert!(padded[16..].iter().all(|&b| b == 0x10));

    let padded = pad(b"ABC", 16).unwrap();
    assert_eq!(&padded[..3], b"ABC");
    assert!(padded[3..].iter().all(|&b| b == 0x0d));
    assert_eq!(padded.len(), 16);
    assert_eq!(unpad_strict(&padded).unwrap(), b"ABC");
}

#[test]
fn malformed_ciphertext_lengths_are_rejected() {
    for kind in BackendKind::ALL {
        let ctx = context(kind, &[3u8; 16], &[4u8; BLOCK_SIZE]);
        assert_eq!(
            ctx.decrypt(&[]),
            Err(CipherError::InvalidDataLength { len: 0 })
        );
        assert_eq!(
            ctx.decrypt(&[0u8; 20]),
            Err(CipherError::InvalidDataLength { len: 20 })
        );
    }
}

/// Ciphertext whose decrypted tail is `.. 01 02 03`: only the length byte
/// looks like padding.
fn corrupt_tail_ciphertext(key: &[u8], iv: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut block = [0x41u8; BLOCK_SIZE];
    block[13..].copy_from_slice(&[0x01, 0x02, 0x03]);
    // Encrypting block || full padding block and dropping the last block
    // leaves the raw CBC encryption of `block` alone.
    let ctx = context(BackendKind::Legacy, key, iv);
    let mut ct = ctx.encrypt(&block).unwrap();
    ct.truncate(BLOCK_SIZE);
    (ct, block.to_vec())
}

#[test]
fn strict_unpadding_rejects_corrupt_padding() {
    let (ct, _) = corrupt_tail_ciphertext(&[5u8; 16], &[6u8; BLOCK_SIZE]);
    for kind in BackendKind::ALL {
        let ctx = context(kind, &[5u8; 16], &[6u8; BLOCK_SIZE]);
        assert!(matches!(
            ctx.decrypt(&ct),
            Err(CipherError::PaddingError(_))
        ));
    }
    let legacy = context(BackendKind::Legacy, &[5u8; 16], &[6u8; BLOCK_SIZE]);
    assert_eq!(
        legacy.decrypt(&ct),
        Err(CipherError::PaddingError(PaddingFault::Mismatch { pad: 3 }))
    );
}

#[test]
fn strict_unpadding_rejects_overlong_padding_on_every_engine() {
    let key = [5u8; 16];
    let iv = [6u8; BLOCK_SIZE];
    // Two blocks of 0x20 decrypt to a length byte covering both blocks.
    let ct = LegacyEngine
        .raw_encrypt(&[0x20; 32], &AesKey::from_slice(&key).unwrap(), &Iv::from(iv))
        .unwrap();
    for kind in BackendKind::ALL {
        let ctx = context(kind, &key, &iv);
        assert!(
            matches!(ctx.decrypt(&ct), Err(CipherError::PaddingError(_))),
            "{kind} accepted padding longer than a block"
        );
    }
}

#[test]
fn permissive_unpadding_truncates_by_length_byte() {
    let (ct, block) = corrupt_tail_ciphertext(&[5u8; 16], &[6u8; BLOCK_SIZE]);
    let mut ctx = context(BackendKind::Legacy, &[5u8; 16], &[6u8; BLOCK_SIZE]);
    ctx.set_padding_mode(PaddingMode::Permissive);
    assert_eq!(ctx.decrypt(&ct).unwrap(), &block[..13]);
}

#[test]
fn context_is_shareable_across_threads() {
    let ctx = context(BackendKind::Legacy, &[8u8; 24], &[2u8; BLOCK_SIZE]);
    let expected = ctx.encrypt(b"shared").unwrap();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let ct = ctx.encrypt(b"shared").unwrap();
                assert_eq!(ct, expected);
                assert_eq!(ctx.decrypt(&ct).unwrap(), b"shared");
            });
        }
    });
}

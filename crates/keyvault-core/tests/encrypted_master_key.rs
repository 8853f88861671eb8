use keyvault_core::hd::seed_from_mnemonic;
use keyvault_core::{decrypt, derive_child_key, ExtendedKey, KdfParams, KeyvaultError, PasswordCipher};
use proptest::prelude::*;

// Small enough that the suite stays fast; the blob records them anyway.
const FAST: KdfParams = KdfParams::new(256, 1, 1);

fn cipher() -> PasswordCipher {
    PasswordCipher::new(FAST).expect("params should be valid")
}

fn master() -> ExtendedKey {
    let seed = seed_from_mnemonic(
        "test test test test test test test test test test test junk",
        "",
    );
    ExtendedKey::from_seed(seed.as_bytes()).expect("master key should derive")
}

#[test]
fn test_store_and_restore_master_key() {
    let master = master();
    let password = b"wallet-password-123";

    let serialized = master.to_base58();
    let blob = cipher()
        .encrypt(password, serialized.as_bytes())
        .expect("encrypt should succeed");

    // Any cipher instance can open it; params travel with the blob.
    let restored = decrypt(password, &blob).expect("decrypt should succeed");
    let restored = String::from_utf8(restored).expect("utf8");
    let restored = ExtendedKey::from_base58(&restored).expect("parse should succeed");

    assert_eq!(restored, master);
    let key = derive_child_key(&restored, "m/44'/60'/0'/0/0").expect("derive");
    assert_eq!(
        hex::encode(&key.private_key_bytes().expect("private")[..]),
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
    );
}

#[test]
fn test_store_master_key_as_hex() {
    let master = master();
    let encoded = hex::encode(&master.to_bytes()[..]);

    let blob = cipher()
        .encrypt(b"pw", encoded.as_bytes())
        .expect("encrypt should succeed");
    let restored = cipher().decrypt(b"pw", &blob).expect("decrypt should succeed");

    assert_eq!(restored, encoded.as_bytes());
}

#[test]
fn test_wrong_password_on_stored_key() {
    let blob = cipher()
        .encrypt(b"right", master().to_base58().as_bytes())
        .expect("encrypt should succeed");

    assert_eq!(
        cipher().decrypt(b"wrong", &blob),
        Err(KeyvaultError::Authentication)
    );
}

#[test]
fn test_truncated_blob_is_malformed() {
    let blob = cipher().encrypt(b"pw", b"data").expect("encrypt should succeed");
    assert!(matches!(
        cipher().decrypt(b"pw", &blob[..20]),
        Err(KeyvaultError::MalformedInput(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_round_trip(
        password in proptest::collection::vec(any::<u8>(), 0..32),
        plaintext in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let blob = cipher().encrypt(&password, &plaintext).unwrap();
        prop_assert_eq!(blob.len(), plaintext.len() + 57);
        prop_assert_eq!(cipher().decrypt(&password, &blob).unwrap(), plaintext);
    }

    #[test]
    fn prop_single_bit_flip_rejected(
        plaintext in proptest::collection::vec(any::<u8>(), 1..64),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut blob = cipher().encrypt(b"pw", &plaintext).unwrap();
        let i = position.index(blob.len());
        blob[i] ^= 1 << bit;
        prop_assert!(cipher().decrypt(b"pw", &blob).is_err());
    }
}

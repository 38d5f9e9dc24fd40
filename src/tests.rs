#![cfg(test)]

use hex_literal::hex;
use serde::Deserialize;

pub(crate) type TestCase<'a, const N: usize> = ([u8; N], [u8; 16], [u8; 16]);

pub(crate) static AES_128_TESTS: &[TestCase<'_, 16>] = &[
    (
        hex!("2b7e151628aed2a6abf7158809cf4f3c"),
        hex!("3243f6a8885a308d313198a2e0370734"),
        hex!("3925841d02dc09fbdc118597196a0b32"),
    ),
    (
        hex!("000102030405060708090a0b0c0d0e0f"),
        hex!("00112233445566778899aabbccddeeff"),
        hex!("69c4e0d86a7b0430d8cdb78070b4c55a"),
    ),
];

pub(crate) static AES_192_TESTS: &[TestCase<'_, 24>] = &[(
    hex!("000102030405060708090a0b0c0d0e0f1011121314151617"),
    hex!("00112233445566778899aabbccddeeff"),
    hex!("dda97ca4864cdfe06eaf70a0ec0d7191"),
)];

pub(crate) static AES_256_TESTS: &[TestCase<'_, 32>] = &[(
    hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f"),
    hex!("00112233445566778899aabbccddeeff"),
    hex!("8ea2b7ca516745bfeafc49904b496089"),
)];

impl TestVectors {
    pub fn load() -> Self {
        static DATA: &str =
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/acvp.json"));
        serde_json::from_str(DATA).unwrap()
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TestVectors {
    pub test_groups: Vec<TestGroup>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TestGroup {
    pub direction: String,
    pub tests: Vec<Aft>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Aft {
    pub tc_id: usize,
    #[serde(with = "hex::serde")]
    pub pt: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub key: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub ct: Vec<u8>,
}

macro_rules! impl_acvp {
    ($name:ident, $aes:ty) => {
        #[test]
        fn $name() {
            use $crate::{
                tests::{Aft, TestVectors},
                BLOCK_SIZE,
            };

            let vectors = TestVectors::load();
            for group in vectors.test_groups {
                let encrypt = group.direction == "encrypt";
                for Aft { tc_id, pt, key, ct } in group.tests {
                    let aes = <$aes>::new(&key);
                    let mut got = if encrypt { pt.clone() } else { ct.clone() };
                    assert_eq!(got.len() % BLOCK_SIZE, 0, "#{tc_id}");

                    if encrypt {
                        for block in got.chunks_exact_mut(BLOCK_SIZE) {
                            aes.encrypt_block(block.try_into().unwrap());
                        }
                        assert_eq!(got, ct, "#{tc_id}: `encrypt_block`");
                        for block in got.chunks_exact_mut(BLOCK_SIZE) {
                            aes.decrypt_block(block.try_into().unwrap());
                        }
                        assert_eq!(got, pt, "#{tc_id}: `decrypt_block`");
                    } else {
                        for block in got.chunks_exact_mut(BLOCK_SIZE) {
                            aes.decrypt_block(block.try_into().unwrap());
                        }
                        assert_eq!(got, pt, "#{tc_id}: `decrypt_block`");
                        for block in got.chunks_exact_mut(BLOCK_SIZE) {
                            aes.encrypt_block(block.try_into().unwrap());
                        }
                        assert_eq!(got, ct, "#{tc_id}: `encrypt_block`");
                    }
                }
            }
        }
    };
}
pub(crate) use impl_acvp;

macro_rules! impl_test_aes {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        enum $name {
            Aes128(Aes128),
            Aes192(Aes192),
            Aes256(Aes256),
        }
        impl $name {
            pub fn new(key: &[u8]) -> Self {
                match key.len() {
                    16 => Self::Aes128(Aes128::new(key.try_into().unwrap())),
                    24 => Self::Aes192(Aes192::new(key.try_into().unwrap())),
                    32 => Self::Aes256(Aes256::new(key.try_into().unwrap())),
                    n => panic!("invalid key length: {n}"),
                }
            }

            pub fn encrypt_block(&self, block: &mut Block) {
                match self {
                    Self::Aes128(aes) => aes.encrypt_block(block),
                    Self::Aes192(aes) => aes.encrypt_block(block),
                    Self::Aes256(aes) => aes.encrypt_block(block),
                }
            }

            pub fn decrypt_block(&self, block: &mut Block) {
                match self {
                    Self::Aes128(aes) => aes.decrypt_block(block),
                    Self::Aes192(aes) => aes.decrypt_block(block),
                    Self::Aes256(aes) => aes.decrypt_block(block),
                }
            }
        }
    };
}
pub(crate) use impl_test_aes;

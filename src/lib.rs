//! Constant time AES.
//!
//! # Warning
//!
//! This is low-level cryptography. It must only be used for
//! implementing high-level constructions. It must only be used
//! as a fallback for platforms without AES intrinsics. Do NOT
//! use this code unless you know exactly what you are doing. If
//! in doubt, use [`aes-gcm`] instead.
//!
//! [`aes-gcm`]: https://crates.io/crates/aes-gcm

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(any(test, doctest, feature = "std")), no_std)]

pub mod aes16;
mod tests;

/// The size in bytes of an AES block.
pub const BLOCK_SIZE: usize = 16;

/// An AES block.
pub type Block = [u8; BLOCK_SIZE];

cfg_if::cfg_if! {
    if #[cfg(feature = "zeroize")] {
        pub(crate) use zeroize::Zeroizing;
    } else {
        pub(crate) struct Zeroizing<T>(core::marker::PhantomData<T>);
        impl<T> Zeroizing<T> {
            #[inline(always)]
            pub fn new(v: T) -> T {
                v
            }
        }
    }
}

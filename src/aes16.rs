/*
 * Copyright (c) 2016 Pieter Wuille
 *
 * Permission is hereby granted, free of charge, to any person obtaining
 * a copy of this software and associated documentation files (the
 * "Software"), to deal in the Software without restriction, including
 * without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to
 * permit persons to whom the Software is furnished to do so, subject to
 * the following conditions:
 *
 * The above copyright notice and this permission notice shall be
 * included in all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
 * EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
 * MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS
 * BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN
 * ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
 * CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Constant time 16-bit bitsliced AES from [ctaes].
//!
//! One AES block at a time: each of the eight `u16` slice words
//! carries one bit plane of all 16 state bytes, so every Boolean
//! operation on a slice word applies the same gate to the whole
//! state at once. No lookup tables, no secret-dependent branches
//! or indices.
//!
//! [ctaes]: https://github.com/bitcoin-core/ctaes

use crate::{Block, Zeroizing, BLOCK_SIZE};

// Slice word `i` holds bit `i` (bit 0 is least significant) of
// the 16 state bytes, at these bit positions:
//  0  1  2  3
//  4  5  6  7
//  8  9 10 11
// 12 13 14 15
// i.e. position `r*4 + c` is the byte at row `r`, column `c`.

macro_rules! impl_aes {
    (
        $name:ident,
        $k:literal,
        $n:literal,
        $doc:expr $(,)?
    ) => {
        #[doc = $doc]
        #[derive(Clone, Debug)]
        pub struct $name {
            rounds: [[u16; 8]; $n],
        }

        impl $name {
            /// The size in octets of an AES key.
            pub const KEY_SIZE: usize = $k;

            /// The size in octets of an AES block.
            pub const BLOCK_SIZE: usize = BLOCK_SIZE;

            /// Initializes the AES block cipher.
            pub fn new(key: &[u8; $k]) -> Self {
                let mut rounds = [[0; 8]; $n];
                key_schedule(&mut rounds, key);
                Self { rounds }
            }

            /// Encrypts one block in place.
            #[inline]
            pub fn encrypt_block(&self, block: &mut Block) {
                encrypt(&self.rounds, block);
            }

            /// Decrypts one block in place.
            #[inline]
            pub fn decrypt_block(&self, block: &mut Block) {
                decrypt(&self.rounds, block);
            }
        }

        #[cfg(feature = "zeroize")]
        impl zeroize::ZeroizeOnDrop for $name {}

        impl Drop for $name {
            #[inline]
            fn drop(&mut self) {
                #[cfg(feature = "zeroize")]
                // SAFETY: `self` is a flat type and will not be
                // used after the method returns.
                unsafe {
                    zeroize::zeroize_flat_type(self);
                }
            }
        }
    };
}
impl_aes!(Aes128, 16, 11, "AES-128");
impl_aes!(Aes192, 24, 13, "AES-192");
impl_aes!(Aes256, 32, 15, "AES-256");

/// Performs the AES key schedule, writing the bitsliced round
/// keys to `rounds`.
///
/// `K` and `N` must be one of:
/// - 16 and 11 for AES-128
/// - 24 and 13 for AES-192
/// - 32 and 15 for AES-256
#[allow(
    clippy::indexing_slicing,
    clippy::unwrap_used,
    reason = "The compiler can prove the indices are in bounds."
)]
#[allow(
    clippy::arithmetic_side_effects,
    reason = "The compiler can prove none of the arithmetic overflows, panics, etc."
)]
fn key_schedule<const K: usize, const N: usize>(rounds: &mut [[u16; 8]; N], key: &[u8; K]) {
    const {
        assert!((K == 16 && N == 11) || (K == 24 && N == 13) || (K == 32 && N == 15));
    }

    let nk = K / 4;

    // A ring buffer holding the last 8 round key words; 4 are
    // consumed in every round.
    let mut rk = Zeroizing::new([0u32; 8]);
    // The one-byte round constant.
    let mut rcon: u8 = 0x01;
    // The number of the word being generated, modulo `nk`.
    let mut pos = 0;

    // The first `nk` round key words are the key itself.
    for (i, k) in key.chunks_exact(4).enumerate() {
        rk[i] = u32::from_be_bytes(k.try_into().unwrap());
        if i & 3 == 3 {
            // Four round key words are complete; bitslice them
            // into the next round key slot.
            rounds[i / 4] = load_words([rk[i - 3], rk[i - 2], rk[i - 1], rk[i]]);
        }
    }

    for i in nk..4 * N {
        // The previous round key word.
        let mut tmp = rk[(i + 7) & 7];
        if pos == 0 {
            tmp = sub_word(tmp.rotate_left(8)) ^ (u32::from(rcon) << 24);
            // The next round constant: multiply by x modulo
            // x^8 + x^4 + x^3 + x + 1.
            rcon = ((rcon >> 7).wrapping_neg() & 0x1B) ^ (rcon << 1);
        } else if nk > 6 && pos == 4 {
            tmp = sub_word(tmp);
        }
        pos += 1;
        if pos == nk {
            pos = 0;
        }
        rk[i & 7] = rk[(i + 8 - nk) & 7] ^ tmp;
        if i & 3 == 3 {
            rounds[i / 4] =
                load_words([rk[(i + 5) & 7], rk[(i + 6) & 7], rk[(i + 7) & 7], rk[i & 7]]);
        }
    }
}

/// Applies the S-box to the 4 bytes of an unsliced word.
#[inline(always)]
fn sub_word(x: u32) -> u32 {
    // Pack bit `i` of each byte into the low 4 bits of slice
    // word `i`.
    let mut q = [0u16; 8];
    let mut v = x;
    for slice in &mut q {
        *slice = ((v & 1) | ((v >> 7) & 2) | ((v >> 14) & 4) | ((v >> 21) & 8)) as u16;
        v >>= 1;
    }
    sub_bytes(&mut q);
    let mut r = 0;
    for (b, slice) in q.iter().enumerate() {
        let t = u32::from(*slice);
        r |= ((t & 1) | ((t & 2) << 7) | ((t & 4) << 14) | ((t & 8) << 21)) << b;
    }
    r
}

/// Encrypts one block.
///
/// `N` must be one of:
/// - 11 for AES-128
/// - 13 for AES-192
/// - 15 for AES-256
#[inline(always)]
#[allow(
    clippy::indexing_slicing,
    reason = "The compiler can prove the indices are in bounds."
)]
fn encrypt<const N: usize>(rounds: &[[u16; 8]; N], block: &mut Block) {
    const {
        assert!(N == 11 || N == 13 || N == 15);
    }

    let mut q = load_bytes(block);

    add_round_key(&mut q, &rounds[0]);
    for rk in &rounds[1..N - 1] {
        sub_bytes(&mut q);
        shift_rows(&mut q);
        mix_columns(&mut q);
        add_round_key(&mut q, rk);
    }
    sub_bytes(&mut q);
    shift_rows(&mut q);
    add_round_key(&mut q, &rounds[N - 1]);

    save_bytes(block, &q);
}

/// Decrypts one block.
///
/// This is the straight inverse cipher: the same round keys as
/// encryption, consumed in reverse, with `AddRoundKey` applied
/// before `InvMixColumns` inside the loop.
///
/// `N` must be one of:
/// - 11 for AES-128
/// - 13 for AES-192
/// - 15 for AES-256
#[inline(always)]
#[allow(
    clippy::indexing_slicing,
    reason = "The compiler can prove the indices are in bounds."
)]
fn decrypt<const N: usize>(rounds: &[[u16; 8]; N], block: &mut Block) {
    const {
        assert!(N == 11 || N == 13 || N == 15);
    }

    let mut q = load_bytes(block);

    add_round_key(&mut q, &rounds[N - 1]);
    for rk in rounds[1..N - 1].iter().rev() {
        inv_shift_rows(&mut q);
        inv_sub_bytes(&mut q);
        add_round_key(&mut q, rk);
        inv_mix_columns(&mut q);
    }
    inv_shift_rows(&mut q);
    inv_sub_bytes(&mut q);
    add_round_key(&mut q, &rounds[0]);

    save_bytes(block, &q);
}

/// Bitslices 4 big-endian 32-bit words, one per state column,
/// the most significant byte of each word being row 0.
#[inline(always)]
fn load_words(words: [u32; 4]) -> [u16; 8] {
    let mut q = [0u16; 8];
    for (c, mut w) in words.into_iter().enumerate() {
        for r in 0..4 {
            let v = (w >> 24) as u8;
            w <<= 8;
            for (i, slice) in q.iter_mut().enumerate() {
                *slice |= u16::from((v >> i) & 1) << (r * 4 + c);
            }
        }
    }
    q
}

/// Bitslices 16 bytes of data, in column-major AES order.
#[inline(always)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    reason = "The compiler can prove the indices are in bounds."
)]
fn load_bytes(block: &Block) -> [u16; 8] {
    load_words([
        u32::from_be_bytes(block[0..4].try_into().unwrap()),
        u32::from_be_bytes(block[4..8].try_into().unwrap()),
        u32::from_be_bytes(block[8..12].try_into().unwrap()),
        u32::from_be_bytes(block[12..16].try_into().unwrap()),
    ])
}

/// Inverse of [`load_bytes`]: converts the 8 slice words back
/// into 16 bytes of data.
#[inline(always)]
fn save_bytes(block: &mut Block, q: &[u16; 8]) {
    for (j, byte) in block.iter_mut().enumerate() {
        let (c, r) = (j / 4, j % 4);
        let mut v = 0;
        for (b, slice) in q.iter().enumerate() {
            v |= (((*slice >> (r * 4 + c)) & 1) as u8) << b;
        }
        *byte = v;
    }
}

/// The shared non-linear middle section of the S-box circuit: the
/// GF(2^4) inverse of the tower-field construction, the only part
/// containing AND gates. Both [`sub_bytes`] and [`inv_sub_bytes`]
/// wrap this same network in different linear layers; expands to
/// the eighteen multiplier outputs `(M46, ..., M63)`.
macro_rules! sbox_middle {
    (
        $t1:expr, $t2:expr, $t3:expr, $t4:expr, $t6:expr, $t8:expr, $t9:expr, $t10:expr,
        $t13:expr, $t14:expr, $t15:expr, $t16:expr, $t17:expr, $t19:expr, $t20:expr, $t22:expr,
        $t23:expr, $t24:expr, $t25:expr, $t26:expr, $t27:expr, $d:expr $(,)?
    ) => {{
        let m1 = $t13 & $t6;
        let m6 = $t3 & $t16;
        let m11 = $t1 & $t15;
        let m13 = ($t4 & $t27) ^ m11;
        let m15 = ($t2 & $t10) ^ m11;
        let m20 = $t14 ^ m1 ^ ($t23 & $t8) ^ m13;
        let m21 = ($t19 & $d) ^ m1 ^ $t24 ^ m15;
        let m22 = $t26 ^ m6 ^ ($t22 & $t9) ^ m13;
        let m23 = ($t20 & $t17) ^ m6 ^ m15 ^ $t25;
        let m25 = m22 & m20;
        let m37 = m21 ^ ((m20 ^ m21) & (m23 ^ m25));
        let m38 = m20 ^ m25 ^ (m21 | (m20 & m23));
        let m39 = m23 ^ ((m22 ^ m23) & (m21 ^ m25));
        let m40 = m22 ^ m25 ^ (m23 | (m21 & m22));
        let m41 = m38 ^ m40;
        let m42 = m37 ^ m39;
        let m43 = m37 ^ m38;
        let m44 = m39 ^ m40;
        let m45 = m42 ^ m41;
        (
            m44 & $t6,
            m40 & $t8,
            m39 & $d,
            m43 & $t16,
            m38 & $t9,
            m37 & $t17,
            m42 & $t15,
            m45 & $t27,
            m41 & $t10,
            m44 & $t13,
            m40 & $t23,
            m39 & $t19,
            m43 & $t3,
            m38 & $t22,
            m37 & $t20,
            m42 & $t1,
            m45 & $t4,
            m41 & $t2,
        )
    }};
}

/// `SubBytes`.
///
/// The AES S-box applied to all 16 lanes of the bitsliced state
/// at once, as the depth-16 Boyar-Peralta circuit. Slice words
/// 0 to 7 hold bits 0 to 7 of each S-box input.
#[inline(always)]
fn sub_bytes(q: &mut [u16; 8]) {
    let u0 = q[7];
    let u1 = q[6];
    let u2 = q[5];
    let u3 = q[4];
    let u4 = q[3];
    let u5 = q[2];
    let u6 = q[1];
    let u7 = q[0];

    // Linear preprocessing.
    let t1 = u0 ^ u3;
    let t2 = u0 ^ u5;
    let t3 = u0 ^ u6;
    let t4 = u3 ^ u5;
    let t5 = u4 ^ u6;
    let t6 = t1 ^ t5;
    let t7 = u1 ^ u2;
    let t8 = u7 ^ t6;
    let t9 = u7 ^ t7;
    let t10 = t6 ^ t7;
    let t11 = u1 ^ u5;
    let t12 = u2 ^ u5;
    let t13 = t3 ^ t4;
    let t14 = t6 ^ t11;
    let t15 = t5 ^ t11;
    let t16 = t5 ^ t12;
    let t17 = t9 ^ t16;
    let t18 = u3 ^ u7;
    let t19 = t7 ^ t18;
    let t20 = t1 ^ t19;
    let t21 = u6 ^ u7;
    let t22 = t7 ^ t21;
    let t23 = t2 ^ t22;
    let t24 = t2 ^ t10;
    let t25 = t20 ^ t17;
    let t26 = t3 ^ t16;
    let t27 = t1 ^ t12;
    let d = u7;

    // Non-linear transformation.
    let (m46, m47, m48, m49, m50, m51, m52, m53, m54, m55, m56, m57, m58, m59, m60, m61, m62, m63) =
        sbox_middle!(
            t1, t2, t3, t4, t6, t8, t9, t10, t13, t14, t15, t16, t17, t19, t20, t22, t23, t24,
            t25, t26, t27, d,
        );

    // Linear postprocessing.
    let l0 = m61 ^ m62;
    let l1 = m50 ^ m56;
    let l2 = m46 ^ m48;
    let l3 = m47 ^ m55;
    let l4 = m54 ^ m58;
    let l5 = m49 ^ m61;
    let l6 = m62 ^ l5;
    let l7 = m46 ^ l3;
    let l8 = m51 ^ m59;
    let l9 = m52 ^ m53;
    let l10 = m53 ^ l4;
    let l11 = m60 ^ l2;
    let l12 = m48 ^ m51;
    let l13 = m50 ^ l0;
    let l14 = m52 ^ m61;
    let l15 = m55 ^ l1;
    let l16 = m56 ^ l0;
    let l17 = m57 ^ l1;
    let l18 = m58 ^ l8;
    let l19 = m63 ^ l4;
    let l20 = l0 ^ l1;
    let l21 = l1 ^ l7;
    let l22 = l3 ^ l12;
    let l23 = l18 ^ l2;
    let l24 = l15 ^ l9;
    let l25 = l6 ^ l10;
    let l26 = l7 ^ l9;
    let l27 = l8 ^ l10;
    let l28 = l11 ^ l14;
    let l29 = l11 ^ l17;

    q[7] = l6 ^ l24;
    q[6] = !(l16 ^ l26);
    q[5] = !(l19 ^ l28);
    q[4] = l6 ^ l21;
    q[3] = l20 ^ l22;
    q[2] = l25 ^ l29;
    q[1] = !(l13 ^ l27);
    q[0] = !(l6 ^ l23);
}

/// Inverse of `SubBytes`.
///
/// Different linear layers around the same non-linear middle:
/// the preprocessing undoes the S-box's output affine transform
/// and the postprocessing undoes its input side.
#[inline(always)]
fn inv_sub_bytes(q: &mut [u16; 8]) {
    let u0 = q[7];
    let u1 = q[6];
    let u2 = q[5];
    let u3 = q[4];
    let u4 = q[3];
    let u5 = q[2];
    let u6 = q[1];
    let u7 = q[0];

    // Linear preprocessing.
    let t23 = u0 ^ u3;
    let t22 = !(u1 ^ u3);
    let t2 = !(u0 ^ u1);
    let t1 = u3 ^ u4;
    let t24 = !(u4 ^ u7);
    let r5 = u6 ^ u7;
    let t8 = !(u1 ^ t23);
    let t19 = t22 ^ r5;
    let t9 = !(u7 ^ t1);
    let t10 = t2 ^ t24;
    let t13 = t2 ^ r5;
    let t3 = t1 ^ r5;
    let t25 = !(u2 ^ t1);
    let r13 = u1 ^ u6;
    let t17 = !(u2 ^ t19);
    let t20 = t24 ^ r13;
    let t4 = u4 ^ t8;
    let r17 = !(u2 ^ u5);
    let r18 = !(u5 ^ u6);
    let r19 = !(u2 ^ u4);
    let d = u0 ^ r17;
    let t6 = t22 ^ r17;
    let t16 = r13 ^ r19;
    let t27 = t1 ^ r18;
    let t15 = t10 ^ t27;
    let t14 = t10 ^ r18;
    let t26 = t3 ^ t16;

    // Non-linear transformation, identical to `sub_bytes`.
    let (m46, m47, m48, m49, m50, m51, m52, m53, m54, m55, m56, m57, m58, m59, m60, m61, m62, m63) =
        sbox_middle!(
            t1, t2, t3, t4, t6, t8, t9, t10, t13, t14, t15, t16, t17, t19, t20, t22, t23, t24,
            t25, t26, t27, d,
        );

    // Linear postprocessing.
    let p0 = m52 ^ m61;
    let p1 = m58 ^ m59;
    let p2 = m54 ^ m62;
    let p3 = m47 ^ m50;
    let p4 = m48 ^ m56;
    let p5 = m46 ^ m51;
    let p6 = m49 ^ m60;
    let p7 = p0 ^ p1;
    let p8 = m50 ^ m53;
    let p9 = m55 ^ m63;
    let p10 = m57 ^ p4;
    let p11 = p0 ^ p3;
    let p12 = m46 ^ m48;
    let p13 = m49 ^ m51;
    let p14 = m49 ^ m62;
    let p15 = m54 ^ m59;
    let p16 = m57 ^ m61;
    let p17 = m58 ^ p2;
    let p18 = m63 ^ p5;
    let p19 = p2 ^ p3;
    let p20 = p4 ^ p6;
    let p22 = p2 ^ p7;
    let p23 = p7 ^ p8;
    let p24 = p5 ^ p7;
    let p25 = p6 ^ p10;
    let p26 = p9 ^ p11;
    let p27 = p10 ^ p18;
    let p28 = p11 ^ p25;
    let p29 = p15 ^ p20;

    q[7] = p13 ^ p22;
    q[6] = p26 ^ p29;
    q[5] = p17 ^ p28;
    q[4] = p12 ^ p22;
    q[3] = p23 ^ p27;
    q[2] = p19 ^ p24;
    q[1] = p14 ^ p23;
    q[0] = p9 ^ p16;
}

/// `ShiftRows`: left-rotate row `r` by `r` columns, for each
/// slice word independently.
#[inline(always)]
fn shift_rows(q: &mut [u16; 8]) {
    for x in q {
        *x = (*x & 0x000F)
            | ((*x & 0x0010) << 3)
            | ((*x & 0x00E0) >> 1)
            | ((*x & 0x0300) << 2)
            | ((*x & 0x0C00) >> 2)
            | ((*x & 0x7000) << 1)
            | ((*x & 0x8000) >> 3);
    }
}

/// Inverse of `ShiftRows`.
#[inline(always)]
fn inv_shift_rows(q: &mut [u16; 8]) {
    for x in q {
        *x = (*x & 0x000F)
            | ((*x & 0x0070) << 1)
            | ((*x & 0x0080) >> 3)
            | ((*x & 0x0300) << 2)
            | ((*x & 0x0C00) >> 2)
            | ((*x & 0x1000) << 3)
            | ((*x & 0xE000) >> 1);
    }
}

/// `AddRoundKey`.
#[inline(always)]
fn add_round_key(q: &mut [u16; 8], rk: &[u16; 8]) {
    for (q, k) in q.iter_mut().zip(rk) {
        *q ^= *k;
    }
}

/// `MixColumns`.
#[inline(always)]
fn mix_columns(q: &mut [u16; 8]) {
    // b(r,c) = 02*a(r,c) + 02*a(r+1,c) + a(r+1,c) + a(r+2,c) + a(r+3,c)
    //
    // Rotating a slice word right by 4 bits steps the row index
    // by one, so `a ^ rot4(a)` is a(r,c) + a(r+1,c) per bit.
    let [a0, a1, a2, a3, a4, a5, a6, a7] = *q;

    let a0_01 = a0 ^ a0.rotate_right(4);
    let a0_123 = a0_01.rotate_right(4) ^ a0.rotate_right(12);
    let a1_01 = a1 ^ a1.rotate_right(4);
    let a1_123 = a1_01.rotate_right(4) ^ a1.rotate_right(12);
    let a2_01 = a2 ^ a2.rotate_right(4);
    let a2_123 = a2_01.rotate_right(4) ^ a2.rotate_right(12);
    let a3_01 = a3 ^ a3.rotate_right(4);
    let a3_123 = a3_01.rotate_right(4) ^ a3.rotate_right(12);
    let a4_01 = a4 ^ a4.rotate_right(4);
    let a4_123 = a4_01.rotate_right(4) ^ a4.rotate_right(12);
    let a5_01 = a5 ^ a5.rotate_right(4);
    let a5_123 = a5_01.rotate_right(4) ^ a5.rotate_right(12);
    let a6_01 = a6 ^ a6.rotate_right(4);
    let a6_123 = a6_01.rotate_right(4) ^ a6.rotate_right(12);
    let a7_01 = a7 ^ a7.rotate_right(4);
    let a7_123 = a7_01.rotate_right(4) ^ a7.rotate_right(12);

    q[0] = a7_01 ^ a0_123;
    q[1] = a7_01 ^ a0_01 ^ a1_123;
    q[2] = a1_01 ^ a2_123;
    q[3] = a7_01 ^ a2_01 ^ a3_123;
    q[4] = a7_01 ^ a3_01 ^ a4_123;
    q[5] = a4_01 ^ a5_123;
    q[6] = a5_01 ^ a6_123;
    q[7] = a6_01 ^ a7_123;
}

/// Inverse of `MixColumns`.
#[inline(always)]
fn inv_mix_columns(q: &mut [u16; 8]) {
    // b(r,c) = 0e*a(r,c) + 0b*a(r+1,c) + 0d*a(r+2,c) + 09*a(r+3,c)
    //        = 08*(a(r,c) + a(r+1,c) + a(r+2,c) + a(r+3,c))
    //        + 04*(a(r,c) + a(r+2,c))
    //        + 02*(a(r,c) + a(r+1,c))
    //        + 01*(a(r+1,c) + a(r+2,c) + a(r+3,c))
    let [a0, a1, a2, a3, a4, a5, a6, a7] = *q;

    let a0_01 = a0 ^ a0.rotate_right(4);
    let a0_12 = a0_01.rotate_right(4);
    let a0_123 = a0_12 ^ a0.rotate_right(12);
    let a0_0123 = a0 ^ a0_123;
    let a0_02 = a0_01 ^ a0_12;
    let a1_01 = a1 ^ a1.rotate_right(4);
    let a1_12 = a1_01.rotate_right(4);
    let a1_123 = a1_12 ^ a1.rotate_right(12);
    let a1_0123 = a1 ^ a1_123;
    let a1_02 = a1_01 ^ a1_12;
    let a2_01 = a2 ^ a2.rotate_right(4);
    let a2_12 = a2_01.rotate_right(4);
    let a2_123 = a2_12 ^ a2.rotate_right(12);
    let a2_0123 = a2 ^ a2_123;
    let a2_02 = a2_01 ^ a2_12;
    let a3_01 = a3 ^ a3.rotate_right(4);
    let a3_12 = a3_01.rotate_right(4);
    let a3_123 = a3_12 ^ a3.rotate_right(12);
    let a3_0123 = a3 ^ a3_123;
    let a3_02 = a3_01 ^ a3_12;
    let a4_01 = a4 ^ a4.rotate_right(4);
    let a4_12 = a4_01.rotate_right(4);
    let a4_123 = a4_12 ^ a4.rotate_right(12);
    let a4_0123 = a4 ^ a4_123;
    let a4_02 = a4_01 ^ a4_12;
    let a5_01 = a5 ^ a5.rotate_right(4);
    let a5_12 = a5_01.rotate_right(4);
    let a5_123 = a5_12 ^ a5.rotate_right(12);
    let a5_0123 = a5 ^ a5_123;
    let a5_02 = a5_01 ^ a5_12;
    let a6_01 = a6 ^ a6.rotate_right(4);
    let a6_12 = a6_01.rotate_right(4);
    let a6_123 = a6_12 ^ a6.rotate_right(12);
    let a6_0123 = a6 ^ a6_123;
    let a6_02 = a6_01 ^ a6_12;
    let a7_01 = a7 ^ a7.rotate_right(4);
    let a7_12 = a7_01.rotate_right(4);
    let a7_123 = a7_12 ^ a7.rotate_right(12);
    let a7_0123 = a7 ^ a7_123;
    let a7_02 = a7_01 ^ a7_12;

    q[0] = a0_123 ^ a7_01 ^ a6_02 ^ a5_0123;
    q[1] = a1_123 ^ a0_01 ^ a7_12 ^ a6_02 ^ a5_0123 ^ a6_0123;
    q[2] = a2_123 ^ a1_01 ^ a0_02 ^ a7_02 ^ a6_0123 ^ a7_0123;
    q[3] = a3_123 ^ a2_01 ^ a7_01 ^ a1_02 ^ a6_02 ^ a0_0123 ^ a5_0123 ^ a7_0123;
    q[4] = a4_123 ^ a3_01 ^ a7_12 ^ a2_02 ^ a6_02 ^ a1_0123 ^ a5_0123 ^ a6_0123;
    q[5] = a5_123 ^ a4_01 ^ a3_02 ^ a7_02 ^ a2_0123 ^ a6_0123 ^ a7_0123;
    q[6] = a6_123 ^ a5_01 ^ a4_02 ^ a3_0123 ^ a7_0123;
    q[7] = a7_123 ^ a6_01 ^ a5_02 ^ a4_0123;
}

//! AES key expansion
//!
//! Expands 16/24/32-byte key material into the word schedules consumed by
//! the block pipelines: forward round keys `EK`, decryption round keys
//! `DK` (reversed, with InvMixColumns folded into the interior quartets so
//! the fused inverse-round table applies directly), and the two final-round
//! byte masks `ME` and `MD`.
//!
//! Key words pass through the bitsliced S-box only; the expansion makes no
//! data-dependent table access.

use super::gf::inv_mix_column;
use super::sbox::sbox_word;
use crate::security::EphemeralSecret;

/// Round constants, placed in the high byte
const RCON: [u32; 10] = [
    0x0100_0000,
    0x0200_0000,
    0x0400_0000,
    0x0800_0000,
    0x1000_0000,
    0x2000_0000,
    0x4000_0000,
    0x8000_0000,
    0x1B00_0000,
    0x3600_0000,
];

/// Widest schedule is AES-256: 4 * (14 + 1) words, padded to the stride
/// the expansion loop writes with
const SCHEDULE_MAX: usize = 64;

/// Expand `key` into the four schedule pieces
///
/// `ek` and `dk` must hold `key.len() + 24` words; the final forward round
/// key lands in `me` and the first in `md` instead of the word schedules.
pub(crate) fn key_schedule(
    key: &[u8],
    ek: &mut [u32],
    dk: &mut [u32],
    me: &mut [u8; 16],
    md: &mut [u8; 16],
) {
    let x = key.len() / 4;
    let rounds = x + 6;
    let total = 4 * (rounds + 1);

    debug_assert!(x == 4 || x == 6 || x == 8);
    debug_assert_eq!(ek.len(), key.len() + 24);
    debug_assert_eq!(dk.len(), key.len() + 24);

    // Working schedules hold the full expansion, including the round keys
    // that end up in the byte masks; wiped when they fall out of scope.
    let mut xek = EphemeralSecret::new([0u32; SCHEDULE_MAX]);
    let mut xdk = EphemeralSecret::new([0u32; SCHEDULE_MAX]);

    for (i, chunk) in key.chunks_exact(4).enumerate() {
        xek[i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    let mut i = x;
    while i < total {
        xek[i] = xek[i - x] ^ RCON[(i - x) / x] ^ sbox_word(xek[i - 1].rotate_left(8));

        for j in 1..x {
            if i + j == total {
                break;
            }

            // AES-256 substitutes the middle word of each stretch as well
            xek[i + j] = xek[i + j - x]
                ^ if x == 8 && j == 4 {
                    sbox_word(xek[i + j - 1])
                } else {
                    xek[i + j - 1]
                };
        }

        i += x;
    }

    // Decryption keys are the encryption keys in reverse round order
    for i in (0..total).step_by(4) {
        xdk[i..i + 4].copy_from_slice(&xek[total - 4 - i..total - i]);
    }

    // The fused decrypt table produces InvSubBytes∘InvMixColumns, so the
    // interior round keys must absorb one InvMixColumns each; the first
    // and last quartets are plain AddRoundKey material and stay untouched.
    for w in xdk[4..4 * rounds].iter_mut() {
        *w = inv_mix_column(*w);
    }

    for i in 0..4 {
        me[4 * i..4 * i + 4].copy_from_slice(&xek[4 * rounds + i].to_be_bytes());
        md[4 * i..4 * i + 4].copy_from_slice(&xek[i].to_be_bytes());
    }

    ek.copy_from_slice(&xek[..ek.len()]);
    dk.copy_from_slice(&xdk[..dk.len()]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(key: &[u8]) -> (Vec<u32>, Vec<u32>, [u8; 16], [u8; 16]) {
        let words = key.len() + 24;
        let mut ek = vec![0u32; words];
        let mut dk = vec![0u32; words];
        let mut me = [0u8; 16];
        let mut md = [0u8; 16];
        key_schedule(key, &mut ek, &mut dk, &mut me, &mut md);
        (ek, dk, me, md)
    }

    #[test]
    fn test_aes128_expansion_fips197_a1() {
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let (ek, _, me, md) = expand(&key);

        // w[0..4] and the first words of the FIPS 197 A.1 walkthrough
        assert_eq!(ek[0], 0x2b7e1516);
        assert_eq!(ek[3], 0x09cf4f3c);
        assert_eq!(ek[4], 0xa0fafe17);
        assert_eq!(ek[5], 0x88542cb1);
        assert_eq!(ek[32], 0xead27321);
        assert_eq!(ek[39], 0x575c006e);

        // w[40..44] is lifted out into the final-round mask
        let expect_me = hex::decode("d014f9a8c9ee2589e13f0cc8b6630ca6").unwrap();
        assert_eq!(me.as_slice(), expect_me.as_slice());

        // the decrypt mask is the whitening key itself
        assert_eq!(md.as_slice(), key.as_slice());
    }

    #[test]
    fn test_schedule_lengths() {
        for len in [16usize, 24, 32] {
            let key = vec![0u8; len];
            let (ek, dk, _, _) = expand(&key);
            assert_eq!(ek.len(), len + 24);
            assert_eq!(dk.len(), len + 24);
        }
    }

    #[test]
    fn test_decrypt_keys_mirror_encrypt_keys() {
        let key = hex::decode("000102030405060708090a0b0c0d0e0f1011121314151617").unwrap();
        let (ek, dk, me, _) = expand(&key);
        let total = key.len() + 28;

        // The first decrypt quartet is the final forward round key (also
        // lifted into the encrypt mask), with no InvMixColumns applied
        for j in 0..4 {
            let mask_word = u32::from_be_bytes([
                me[4 * j],
                me[4 * j + 1],
                me[4 * j + 2],
                me[4 * j + 3],
            ]);
            assert_eq!(dk[j], mask_word);
        }

        // Interior quartets carry exactly one InvMixColumns each
        for i in (4..dk.len()).step_by(4) {
            for j in 0..4 {
                assert_eq!(dk[i + j], inv_mix_column(ek[total - 4 - i + j]));
            }
        }
    }
}

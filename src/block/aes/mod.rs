//! AES block cipher, software implementation
//!
//! This is the portable "base" provider: the path taken when no hardware
//! AES instructions are available. Its side-channel posture comes from two
//! structural choices rather than from auditing generated code:
//!
//! - Encryption substitutes bytes through a bitsliced Boolean circuit
//!   ([`sbox`]), so no memory address on the encrypt path depends on
//!   secret data. Two blocks are pushed through each round together when
//!   the input allows it.
//! - Decryption uses the fused InvSubBytes∘InvMixColumns table, and every
//!   call walks all cache lines of that table (and of the inverse S-box)
//!   before the first secret-indexed load ([`tables::prefetch_tables`]).
//!
//! State words hold the 4x4 byte matrix column-major, big-endian within
//! each word; byte 0 of a word is row 0 of its column.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{validate, Error, Result};
use crate::params::{AES128_KEY_SIZE, AES192_KEY_SIZE, AES256_KEY_SIZE, AES_BLOCK_SIZE};
use crate::security::{SecretBuffer, SecretWords};
use crate::types::SecretBytes;

use super::{AesVariant, BlockCipher, CipherAlgorithm};

mod gf;
mod sbox;
mod schedule;
mod tables;

use tables::SD;


/// Byte `n` of `w`, counting from the most significant
#[inline(always)]
fn get_byte(n: usize, w: u32) -> u8 {
    (w >> (24 - 8 * n)) as u8
}

#[inline(always)]
fn make_u32(b0: u8, b1: u8, b2: u8, b3: u8) -> u32 {
    u32::from_be_bytes([b0, b1, b2, b3])
}

/// Word `i` of `bytes`, big-endian
#[inline(always)]
fn load_be(bytes: &[u8], i: usize) -> u32 {
    u32::from_be_bytes([
        bytes[4 * i],
        bytes[4 * i + 1],
        bytes[4 * i + 2],
        bytes[4 * i + 3],
    ])
}

/// One output column of ShiftRows∘MixColumns
///
/// `v0..v3` are the substituted state columns, passed pre-rotated so that
/// byte `r` of `v_r` is the byte ShiftRows moves into this column. The
/// MixColumns rows [2 3 1 1], rotating right per row, are assembled from
/// the x2 and x3 multiples of the gathered column.
#[inline(always)]
fn mix_shift_column(v0: u32, v1: u32, v2: u32, v3: u32) -> u32 {
    let s = make_u32(get_byte(0, v0), get_byte(1, v1), get_byte(2, v2), get_byte(3, v3));

    let s2 = gf::xtime_32(s);
    let s3 = s2 ^ s;

    let z0 = make_u32(get_byte(0, s2), get_byte(0, s), get_byte(0, s), get_byte(0, s3));
    let z1 = make_u32(get_byte(1, s3), get_byte(1, s2), get_byte(1, s), get_byte(1, s));
    let z2 = make_u32(get_byte(2, s), get_byte(2, s3), get_byte(2, s2), get_byte(2, s));
    let z3 = make_u32(get_byte(3, s), get_byte(3, s), get_byte(3, s3), get_byte(3, s2));

    z0 ^ z1 ^ z2 ^ z3
}

/// One full forward round over a single block
fn enc_round(b: &mut [u32; 4], k: &[u32]) {
    let mut s = *b;
    sbox::sbox_word_x4(&mut s);

    b[0] = mix_shift_column(s[0], s[1], s[2], s[3]) ^ k[0];
    b[1] = mix_shift_column(s[1], s[2], s[3], s[0]) ^ k[1];
    b[2] = mix_shift_column(s[2], s[3], s[0], s[1]) ^ k[2];
    b[3] = mix_shift_column(s[3], s[0], s[1], s[2]) ^ k[3];
}

/// One full forward round over two blocks sharing the round keys
fn enc_round_x2(b: &mut [u32; 8], k: &[u32]) {
    let mut s = *b;
    sbox::sbox_word_x8(&mut s);

    b[0] = mix_shift_column(s[0], s[1], s[2], s[3]) ^ k[0];
    b[1] = mix_shift_column(s[1], s[2], s[3], s[0]) ^ k[1];
    b[2] = mix_shift_column(s[2], s[3], s[0], s[1]) ^ k[2];
    b[3] = mix_shift_column(s[3], s[0], s[1], s[2]) ^ k[3];
    b[4] = mix_shift_column(s[4], s[5], s[6], s[7]) ^ k[0];
    b[5] = mix_shift_column(s[5], s[6], s[7], s[4]) ^ k[1];
    b[6] = mix_shift_column(s[6], s[7], s[4], s[5]) ^ k[2];
    b[7] = mix_shift_column(s[7], s[4], s[5], s[6]) ^ k[3];
}

/// Final round: ShiftRows placement of the substituted state, XOR `ME`
fn store_final_enc(b: &[u32; 4], me: &[u8; 16], out: &mut [u8]) {
    out[0] = get_byte(0, b[0]) ^ me[0];
    out[1] = get_byte(1, b[1]) ^ me[1];
    out[2] = get_byte(2, b[2]) ^ me[2];
    out[3] = get_byte(3, b[3]) ^ me[3];
    out[4] = get_byte(0, b[1]) ^ me[4];
    out[5] = get_byte(1, b[2]) ^ me[5];
    out[6] = get_byte(2, b[3]) ^ me[6];
    out[7] = get_byte(3, b[0]) ^ me[7];
    out[8] = get_byte(0, b[2]) ^ me[8];
    out[9] = get_byte(1, b[3]) ^ me[9];
    out[10] = get_byte(2, b[0]) ^ me[10];
    out[11] = get_byte(3, b[1]) ^ me[11];
    out[12] = get_byte(0, b[3]) ^ me[12];
    out[13] = get_byte(1, b[0]) ^ me[13];
    out[14] = get_byte(2, b[1]) ^ me[14];
    out[15] = get_byte(3, b[2]) ^ me[15];
}

/// Encrypt whole blocks in place
///
/// Pairs of blocks share each bitsliced S-box evaluation; a trailing odd
/// block runs through the single-width pipeline.
fn encrypt_blocks_inner(ek: &[u32], me: &[u8; 16], data: &mut [u8]) {
    let mut pairs = data.chunks_exact_mut(2 * AES_BLOCK_SIZE);

    for pair in &mut pairs {
        let mut b = [0u32; 8];
        for (i, w) in b.iter_mut().enumerate() {
            *w = load_be(pair, i) ^ ek[i % 4];
        }

        enc_round_x2(&mut b, &ek[4..8]);

        let mut r = 8;
        while r < ek.len() {
            enc_round_x2(&mut b, &ek[r..r + 4]);
            enc_round_x2(&mut b, &ek[r + 4..r + 8]);
            r += 8;
        }

        sbox::sbox_word_x8(&mut b);

        let (first, second) = pair.split_at_mut(AES_BLOCK_SIZE);
        store_final_enc(&[b[0], b[1], b[2], b[3]], me, first);
        store_final_enc(&[b[4], b[5], b[6], b[7]], me, second);
    }

    let rem = pairs.into_remainder();
    if !rem.is_empty() {
        let mut b = [0u32; 4];
        for (i, w) in b.iter_mut().enumerate() {
            *w = load_be(rem, i) ^ ek[i];
        }

        enc_round(&mut b, &ek[4..8]);

        let mut r = 8;
        while r < ek.len() {
            enc_round(&mut b, &ek[r..r + 4]);
            enc_round(&mut b, &ek[r + 4..r + 8]);
            r += 8;
        }

        sbox::sbox_word_x4(&mut b);
        store_final_enc(&b, me, rem);
    }
}

/// One inverse-round output column through the fused table
///
/// The source columns realise InvShiftRows; rotating the table entries
/// moves each product into its row of this column.
#[inline(always)]
fn inv_round_col(td: &[u32; 256], k: u32, v0: u32, v1: u32, v2: u32, v3: u32) -> u32 {
    k ^ td[get_byte(0, v0) as usize]
        ^ td[get_byte(1, v1) as usize].rotate_right(8)
        ^ td[get_byte(2, v2) as usize].rotate_right(16)
        ^ td[get_byte(3, v3) as usize].rotate_right(24)
}

/// Decrypt whole blocks in place
fn decrypt_blocks_inner(dk: &[u32], md: &[u8; 16], data: &mut [u8]) {
    let td = tables::td();

    // Walk the tables before the first secret-dependent index. The
    // returned accumulator is zero; folding it into the state keeps the
    // reads live on every call.
    let z = tables::prefetch_tables(td);

    for block in data.chunks_exact_mut(AES_BLOCK_SIZE) {
        let mut t = [0u32; 4];
        for (i, w) in t.iter_mut().enumerate() {
            *w = load_be(block, i) ^ dk[i];
        }
        t[0] ^= z;

        let mut b = [
            inv_round_col(td, dk[4], t[0], t[3], t[2], t[1]),
            inv_round_col(td, dk[5], t[1], t[0], t[3], t[2]),
            inv_round_col(td, dk[6], t[2], t[1], t[0], t[3]),
            inv_round_col(td, dk[7], t[3], t[2], t[1], t[0]),
        ];

        let mut r = 8;
        while r < dk.len() {
            let t = [
                inv_round_col(td, dk[r], b[0], b[3], b[2], b[1]),
                inv_round_col(td, dk[r + 1], b[1], b[0], b[3], b[2]),
                inv_round_col(td, dk[r + 2], b[2], b[1], b[0], b[3]),
                inv_round_col(td, dk[r + 3], b[3], b[2], b[1], b[0]),
            ];

            b = [
                inv_round_col(td, dk[r + 4], t[0], t[3], t[2], t[1]),
                inv_round_col(td, dk[r + 5], t[1], t[0], t[3], t[2]),
                inv_round_col(td, dk[r + 6], t[2], t[1], t[0], t[3]),
                inv_round_col(td, dk[r + 7], t[3], t[2], t[1], t[0]),
            ];

            r += 8;
        }

        // Final round: InvSubBytes with InvShiftRows indexing, XOR MD
        block[0] = SD[get_byte(0, b[0]) as usize] ^ md[0];
        block[1] = SD[get_byte(1, b[3]) as usize] ^ md[1];
        block[2] = SD[get_byte(2, b[2]) as usize] ^ md[2];
        block[3] = SD[get_byte(3, b[1]) as usize] ^ md[3];
        block[4] = SD[get_byte(0, b[1]) as usize] ^ md[4];
        block[5] = SD[get_byte(1, b[0]) as usize] ^ md[5];
        block[6] = SD[get_byte(2, b[3]) as usize] ^ md[6];
        block[7] = SD[get_byte(3, b[2]) as usize] ^ md[7];
        block[8] = SD[get_byte(0, b[2]) as usize] ^ md[8];
        block[9] = SD[get_byte(1, b[1]) as usize] ^ md[9];
        block[10] = SD[get_byte(2, b[0]) as usize] ^ md[10];
        block[11] = SD[get_byte(3, b[3]) as usize] ^ md[11];
        block[12] = SD[get_byte(0, b[3]) as usize] ^ md[12];
        block[13] = SD[get_byte(1, b[2]) as usize] ^ md[13];
        block[14] = SD[get_byte(2, b[1]) as usize] ^ md[14];
        block[15] = SD[get_byte(3, b[0]) as usize] ^ md[15];
    }
}

/// Round-key material for one cipher instance
///
/// The word schedules and byte masks are created together by `set_key`,
/// never mutated afterwards, and wiped on drop.
#[derive(Clone, Zeroize)]
struct AesKeys<const W: usize> {
    ek: SecretWords<W>,
    dk: SecretWords<W>,
    me: SecretBuffer<16>,
    md: SecretBuffer<16>,
}

impl<const W: usize> AesKeys<W> {
    fn expand(key: &[u8]) -> Self {
        let mut keys = Self {
            ek: SecretWords::zeroed(),
            dk: SecretWords::zeroed(),
            me: SecretBuffer::zeroed(),
            md: SecretBuffer::zeroed(),
        };

        let mut me = [0u8; 16];
        let mut md = [0u8; 16];
        schedule::key_schedule(
            key,
            keys.ek.as_mut_slice(),
            keys.dk.as_mut_slice(),
            &mut me,
            &mut md,
        );

        keys.me = SecretBuffer::new(me);
        keys.md = SecretBuffer::new(md);
        me.zeroize();
        md.zeroize();
        keys
    }
}

macro_rules! aes_variant {
    (
        $(#[$doc:meta])*
        $name:ident, $algo:ident, $algo_doc:expr, $algo_name:expr,
        $key_size:expr, $rounds:expr, $ek_words:expr
    ) => {
        #[doc = $algo_doc]
        pub enum $algo {}

        impl CipherAlgorithm for $algo {
            const KEY_SIZE: usize = $key_size;
            const BLOCK_SIZE: usize = AES_BLOCK_SIZE;

            fn name() -> &'static str {
                $algo_name
            }
        }

        impl AesVariant for $algo {
            const ROUNDS: usize = $rounds;
            const EK_WORDS: usize = $ek_words;
        }

        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            keys: Option<AesKeys<{ $ek_words }>>,
        }

        impl $name {
            /// Creates a new, unkeyed cipher instance
            pub fn new() -> Self {
                Self { keys: None }
            }

            fn keys(&self, operation: &'static str) -> Result<&AesKeys<{ $ek_words }>> {
                self.keys.as_ref().ok_or(Error::KeyNotSet { operation })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl BlockCipher for $name {
            type Algorithm = $algo;
            type Key = SecretBytes<{ $key_size }>;

            fn new() -> Self {
                $name::new()
            }

            fn set_key(&mut self, key: &[u8]) -> Result<()> {
                validate::key_length($algo_name, key.len(), $key_size)?;
                self.keys = Some(AesKeys::expand(key));
                Ok(())
            }

            fn encrypt_n(&self, input: &[u8], output: &mut [u8], blocks: usize) -> Result<()> {
                let keys = self.keys("encrypt_n")?;
                let n = blocks * AES_BLOCK_SIZE;
                validate::min_length("AES input", input.len(), n)?;
                validate::min_length("AES output", output.len(), n)?;

                output[..n].copy_from_slice(&input[..n]);
                encrypt_blocks_inner(keys.ek.as_slice(), keys.me.as_array(), &mut output[..n]);
                Ok(())
            }

            fn decrypt_n(&self, input: &[u8], output: &mut [u8], blocks: usize) -> Result<()> {
                let keys = self.keys("decrypt_n")?;
                let n = blocks * AES_BLOCK_SIZE;
                validate::min_length("AES input", input.len(), n)?;
                validate::min_length("AES output", output.len(), n)?;

                output[..n].copy_from_slice(&input[..n]);
                decrypt_blocks_inner(keys.dk.as_slice(), keys.md.as_array(), &mut output[..n]);
                Ok(())
            }

            fn encrypt_blocks(&self, data: &mut [u8]) -> Result<()> {
                let keys = self.keys("encrypt_blocks")?;
                validate::block_multiple("AES buffer", data.len(), AES_BLOCK_SIZE)?;

                encrypt_blocks_inner(keys.ek.as_slice(), keys.me.as_array(), data);
                Ok(())
            }

            fn decrypt_blocks(&self, data: &mut [u8]) -> Result<()> {
                let keys = self.keys("decrypt_blocks")?;
                validate::block_multiple("AES buffer", data.len(), AES_BLOCK_SIZE)?;

                decrypt_blocks_inner(keys.dk.as_slice(), keys.md.as_array(), data);
                Ok(())
            }

            fn clear(&mut self) {
                // Dropping the schedule zeroizes every word of key material
                self.keys = None;
            }

            fn provider(&self) -> &'static str {
                // Hardware providers ("aesni", "armv8", "power8", "vperm")
                // report themselves when compiled in; this crate is the
                // portable path.
                "base"
            }

            fn parallelism(&self) -> u8 {
                4
            }

            fn generate_key<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Key {
                SecretBytes::random(rng)
            }
        }
    };
}

aes_variant!(
    /// AES-128 block cipher
    Aes128,
    Aes128Algorithm,
    "Type-level constants for AES-128",
    "AES-128",
    AES128_KEY_SIZE,
    10,
    40
);

aes_variant!(
    /// AES-192 block cipher
    Aes192,
    Aes192Algorithm,
    "Type-level constants for AES-192",
    "AES-192",
    AES192_KEY_SIZE,
    12,
    48
);

aes_variant!(
    /// AES-256 block cipher
    Aes256,
    Aes256Algorithm,
    "Type-level constants for AES-256",
    "AES-256",
    AES256_KEY_SIZE,
    14,
    56
);

//! SHA3-256 Engine
//!
//! Sponge construction per FIPS 202: a 1600-bit Keccak permutation state
//! absorbs input at a rate of 136 bytes (capacity 512 bits) and squeezes a
//! 32-byte digest.

/// Bytes absorbed per permutation (the sponge rate).
pub const RATE: usize = 136;

/// Lanes in the Keccak-f[1600] state (5 x 5 x 64 bits).
const LANES: usize = 25;

const ROUNDS: usize = 24;

/// Iota round constants.
const RC: [u64; ROUNDS] = [
    0x0000000000000001, 0x0000000000008082, 0x800000000000808a, 0x8000000080008000,
    0x000000000000808b, 0x0000000080000001, 0x8000000080008081, 0x8000000000008009,
    0x000000000000008a, 0x0000000000000088, 0x0000000080008009, 0x000000008000000a,
    0x000000008000808b, 0x800000000000008b, 0x8000000000008089, 0x8000000000008003,
    0x8000000000008002, 0x8000000000000080, 0x000000000000800a, 0x800000008000000a,
    0x8000000080008081, 0x8000000000008080, 0x0000000080000001, 0x8000000080008008,
];

/// Rho rotation offsets, in the pi traversal order below.
const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14,
    27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Lane visit order for the combined rho/pi step.
const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4,
    15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// The Keccak-f[1600] permutation: 24 rounds of theta, rho, pi, chi, iota.
fn keccak_f(state: &mut [u64; LANES]) {
    for &rc in RC.iter() {
        // Theta: column parities folded back into every lane.
        let mut parity = [0u64; 5];
        for x in 0..5 {
            parity[x] = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let d = parity[(x + 4) % 5] ^ parity[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                state[x + 5 * y] ^= d;
            }
        }

        // Rho and pi: rotate each lane and move it to its new position.
        let mut carried = state[1];
        for (&target, &offset) in PI.iter().zip(RHO.iter()) {
            let displaced = state[target];
            state[target] = carried.rotate_left(offset);
            carried = displaced;
        }

        // Chi: nonlinear row mixing.
        for y in 0..5 {
            let row = [
                state[5 * y],
                state[5 * y + 1],
                state[5 * y + 2],
                state[5 * y + 3],
                state[5 * y + 4],
            ];
            for x in 0..5 {
                state[5 * y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
            }
        }

        // Iota: round constant into lane (0, 0).
        state[0] ^= rc;
    }
}

/// Incremental SHA3-256 hasher.
///
/// All state is inline; no allocation is performed at any point. The sponge
/// needs no running length counter: padding depends only on the buffered
/// remainder.
#[derive(Debug, Clone)]
pub struct Sha3_256 {
    state: [u64; LANES],
    buffer: [u8; RATE],
    buffer_len: usize,
}

impl Sha3_256 {
    /// Creates a hasher in the initial (all-zero) state.
    pub const fn new() -> Self {
        Self {
            state: [0u64; LANES],
            buffer: [0u8; RATE],
            buffer_len: 0,
        }
    }

    /// XORs one rate-sized chunk into the state and permutes.
    fn absorb(&mut self, chunk: &[u8]) {
        debug_assert_eq!(chunk.len(), RATE);
        for (lane, bytes) in self.state.iter_mut().zip(chunk.chunks_exact(8)) {
            let mut le = [0u8; 8];
            le.copy_from_slice(bytes);
            *lane ^= u64::from_le_bytes(le);
        }
        keccak_f(&mut self.state);
    }

    /// Absorbs input bytes, permuting on each completed 136-byte chunk.
    ///
    /// Bytes are copied into the internal buffer; nothing borrowed from
    /// `input` outlives the call.
    pub fn update(&mut self, mut input: &[u8]) {
        // Top up a partial chunk left over from a previous call.
        if self.buffer_len > 0 {
            let take = (RATE - self.buffer_len).min(input.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&input[..take]);
            self.buffer_len += take;
            input = &input[take..];
            if self.buffer_len < RATE {
                return;
            }
            let chunk = self.buffer;
            self.absorb(&chunk);
            self.buffer_len = 0;
        }

        // Whole chunks straight from the input.
        let mut chunks = input.chunks_exact(RATE);
        for chunk in &mut chunks {
            self.absorb(chunk);
        }

        // Stash the tail for the next call.
        let rest = chunks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    /// Pads the final chunk, permutes once more, and squeezes the digest.
    pub fn finalize(mut self) -> [u8; 32] {
        // SHA-3 domain separation byte 0x06 directly after the message,
        // zeros up to the last rate byte, top bit of that byte set. When
        // one byte of rate remains the two pad bytes share it (0x86).
        self.buffer[self.buffer_len..].fill(0);
        self.buffer[self.buffer_len] = 0x06;
        self.buffer[RATE - 1] |= 0x80;
        let chunk = self.buffer;
        self.absorb(&chunk);

        // 32 bytes <= rate, so a single squeeze suffices.
        let mut digest = [0u8; 32];
        for (out, lane) in digest.chunks_exact_mut(8).zip(self.state) {
            out.copy_from_slice(&lane.to_le_bytes());
        }
        digest
    }

    /// One-shot hash of a byte slice.
    pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

impl Default for Sha3_256 {
    fn default() -> Self {
        Self::new()
    }
}

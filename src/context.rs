//! Hash Context
//!
//! Runtime algorithm selection and the context lifecycle:
//! Uninitialized -> Ready -> Finalized, with re-initialization always
//! allowed. The context is a tagged union whose discriminator word is the
//! single source of truth for which engine may touch the remaining bytes.

use core::fmt;
use core::mem;

use crate::sha256::{self, Sha256};
use crate::sha3::{self, Sha3_256};

/// Algorithm identifier for SHA-256. Part of the external contract.
pub const SHA256_ALG_ID: u32 = 0;

/// Algorithm identifier for SHA3-256. Part of the external contract.
pub const SHA3_256_ALG_ID: u32 = 1;

/// Discriminator magic. Tags carrying this pattern in the high bytes are
/// states this library wrote; anything else in the first word of a context
/// buffer is treated as uninitialized memory.
const TAG_MAGIC: u64 = 0x4843_5458_0000_0000; // "HCTX"

const TAG_SHA256: u64 = TAG_MAGIC | SHA256_ALG_ID as u64;
const TAG_SHA3_256: u64 = TAG_MAGIC | SHA3_256_ALG_ID as u64;
const TAG_FINALIZED: u64 = TAG_MAGIC | 0xffff;

/// Errors from context operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// Algorithm identifier outside the supported set.
    UnsupportedAlgorithm(u32),
    /// The operation requires a context that was initialized and has not
    /// been finalized.
    NotReady,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::UnsupportedAlgorithm(id) => {
                write!(f, "unsupported algorithm identifier {}", id)
            }
            ContextError::NotReady => write!(f, "context is not in the ready state"),
        }
    }
}

/// One supported algorithm and its fixed parameters.
///
/// The set is closed: identifiers resolve by equality match, so an
/// out-of-range value is an error rather than whichever variant happens to
/// be declared last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// SHA-256 (Merkle-Damgard, FIPS 180-4).
    Sha256,
    /// SHA3-256 (Keccak sponge, FIPS 202).
    Sha3_256,
}

impl Algorithm {
    /// Maps a numeric identifier to an algorithm.
    pub fn resolve(identifier: u32) -> Result<Self, ContextError> {
        match identifier {
            SHA256_ALG_ID => Ok(Algorithm::Sha256),
            SHA3_256_ALG_ID => Ok(Algorithm::Sha3_256),
            other => Err(ContextError::UnsupportedAlgorithm(other)),
        }
    }

    /// The identifier this algorithm resolves from.
    pub const fn id(self) -> u32 {
        match self {
            Algorithm::Sha256 => SHA256_ALG_ID,
            Algorithm::Sha3_256 => SHA3_256_ALG_ID,
        }
    }

    /// Bytes consumed per compression / absorption step.
    pub const fn block_size(self) -> usize {
        match self {
            Algorithm::Sha256 => sha256::BLOCK_SIZE,
            Algorithm::Sha3_256 => sha3::RATE,
        }
    }

    /// Digest length in bytes. Fixed at 32 for every supported algorithm.
    pub const fn digest_size(self) -> usize {
        32
    }
}

/// The hash state machine behind the opaque context buffer.
///
/// `repr(u64)` with explicitly assigned discriminants puts the tag in the
/// first 8 bytes of the buffer, where the FFI boundary can check it before
/// interpreting anything else. A context holds whichever engine state its
/// tag names, or nothing once finalized.
///
/// A single context must not be driven from multiple threads at once; the
/// engine performs no internal synchronization. Distinct contexts are
/// independent.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone)]
#[repr(u64)]
pub enum HashContext {
    /// Ready, running SHA-256.
    Sha256(Sha256) = TAG_SHA256,
    /// Ready, running SHA3-256.
    Sha3_256(Sha3_256) = TAG_SHA3_256,
    /// Consumed by a successful finalize; unusable until re-initialized.
    Finalized = TAG_FINALIZED,
}

impl HashContext {
    /// Creates a ready context for the given algorithm identifier.
    pub fn new(algorithm_id: u32) -> Result<Self, ContextError> {
        // Validate-then-construct: a variant is only built from a resolved
        // algorithm, never by assuming the identifier is in range.
        match Algorithm::resolve(algorithm_id)? {
            Algorithm::Sha256 => Ok(HashContext::Sha256(Sha256::new())),
            Algorithm::Sha3_256 => Ok(HashContext::Sha3_256(Sha3_256::new())),
        }
    }

    /// Whether `tag` is a discriminator this library writes.
    pub(crate) fn is_valid_tag(tag: u64) -> bool {
        matches!(tag, TAG_SHA256 | TAG_SHA3_256 | TAG_FINALIZED)
    }

    /// The active algorithm, or `None` once finalized.
    pub fn algorithm(&self) -> Option<Algorithm> {
        match self {
            HashContext::Sha256(_) => Some(Algorithm::Sha256),
            HashContext::Sha3_256(_) => Some(Algorithm::Sha3_256),
            HashContext::Finalized => None,
        }
    }

    /// Absorbs input into the active engine.
    ///
    /// A zero-length input is a no-op, but still requires a ready context.
    pub fn update(&mut self, input: &[u8]) -> Result<(), ContextError> {
        match self {
            HashContext::Sha256(engine) => engine.update(input),
            HashContext::Sha3_256(engine) => engine.update(input),
            HashContext::Finalized => return Err(ContextError::NotReady),
        }
        Ok(())
    }

    /// Produces the digest and moves the context to `Finalized`.
    pub fn finalize(&mut self) -> Result<[u8; 32], ContextError> {
        match mem::replace(self, HashContext::Finalized) {
            HashContext::Sha256(engine) => Ok(engine.finalize()),
            HashContext::Sha3_256(engine) => Ok(engine.finalize()),
            HashContext::Finalized => Err(ContextError::NotReady),
        }
    }
}

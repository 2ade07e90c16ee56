//! # Crypto Context
//!
//! Incremental SHA-256 / SHA3-256 hashing in caller-owned, fixed-size
//! buffers, exposed through a stable C calling surface.
//!
//! ## Algorithms
//!
//! - **SHA-256**: Merkle-Damgard construction, FIPS 180-4, 256-bit output
//! - **SHA3-256**: Keccak sponge, FIPS 202, 256-bit output
//!
//! The algorithm is selected at context initialization by a numeric
//! identifier ([`SHA256_ALG_ID`], [`SHA3_256_ALG_ID`]). The identifier set
//! is closed and validated by equality match, so a value crossing the C
//! boundary that names no algorithm is a well-defined error instead of
//! silently selecting one.
//!
//! ## Design
//!
//! - Pure Rust, no dynamic allocation anywhere in the engine
//! - All state lives in a caller-owned 360-byte buffer; suitable for
//!   embedded use
//! - Every operation runs to completion synchronously; outcomes are
//!   reported only through return codes
//! - A single context is not internally synchronized and must not be
//!   driven from multiple threads at once; distinct contexts are fully
//!   independent
//!
//! ## Usage (Rust)
//!
//! ```
//! use crypto_context::{HashContext, SHA3_256_ALG_ID};
//!
//! let mut ctx = HashContext::new(SHA3_256_ALG_ID).unwrap();
//! ctx.update(b"hel").unwrap();
//! ctx.update(b"lo").unwrap();
//! let digest = ctx.finalize().unwrap();
//! assert_eq!(digest.len(), 32);
//! ```
//!
//! C callers use `crypto_init` / `crypto_update` / `crypto_finalize` from
//! `include/crypto_api.h` against a caller-allocated `CryptoContext`.
//!
//! ## Features
//!
//! - `std` (default): links the standard library so the `staticlib` /
//!   `cdylib` artifacts carry its panic handler. Build with
//!   `--no-default-features` for freestanding targets and supply your own
//!   `#[panic_handler]`; the engine itself never touches std.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod context;
pub mod ffi;
pub mod sha256;
pub mod sha3;

pub use context::{Algorithm, ContextError, HashContext, SHA256_ALG_ID, SHA3_256_ALG_ID};
pub use ffi::{
    CryptoContext, CryptoDigest, CryptoResult, CRYPTO_CONTEXT_STATE_SIZE, CRYPTO_DIGEST_SIZE,
};
pub use sha256::Sha256;
pub use sha3::Sha3_256;

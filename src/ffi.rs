//! C Calling Surface
//!
//! The boundary layer: validates pointers and the context discriminator,
//! hands typed state to the engines, and maps internal outcomes onto a
//! small set of ABI-stable result codes. It writes only to caller-supplied
//! memory, allocates nothing, and holds no reference past the call.

use core::mem::MaybeUninit;
use core::ptr;
use core::slice;

use log::debug;
use static_assertions as sa;

use crate::context::{ContextError, HashContext};

/// Number of 64-bit words in the opaque context buffer (360 bytes).
pub const CRYPTO_CONTEXT_STATE_SIZE: usize = 45;

/// Byte length of every digest produced by this library.
pub const CRYPTO_DIGEST_SIZE: usize = 32;

/// Result codes returned across the C boundary.
///
/// External callers branch on the raw integer values, so the assignments
/// below are pinned forever; new codes may only be appended. The internal
/// error type is kept separate (`ContextError`) and mapped here via `From`
/// so refactors inside the engine can never renumber this contract.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoResult {
    /// Operation completed; outputs are valid.
    Success = 0,
    /// Unclassified internal fault. Reserved; not produced today.
    Failure = 1,
    /// A required pointer argument was null.
    PointerCannotBeNull = 2,
    /// Algorithm identifier outside the supported set.
    BadOrUnsupportedAlgorithm = 3,
    /// The context was never initialized, was already finalized, or does
    /// not carry a discriminator this library wrote.
    UninitializedOrCorruptedContext = 4,
}

impl From<ContextError> for CryptoResult {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::UnsupportedAlgorithm(_) => CryptoResult::BadOrUnsupportedAlgorithm,
            ContextError::NotReady => CryptoResult::UninitializedOrCorruptedContext,
        }
    }
}

/// Opaque context buffer, allocated and owned by the caller.
///
/// Declared as an array of 64-bit words so caller allocations carry the
/// alignment the internal state needs. Callers must not interpret the
/// contents; the layout is not part of the external contract.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CryptoContext {
    pub state: [u64; CRYPTO_CONTEXT_STATE_SIZE],
}

/// Digest output buffer.
///
/// Transparent over a plain byte array so the generated C type is
/// `uint8_t[CRYPTO_DIGEST_SIZE]` rather than a wrapper struct.
#[repr(transparent)]
#[derive(Debug, Clone, Copy)]
pub struct CryptoDigest(pub [u8; CRYPTO_DIGEST_SIZE]);

// The internal state machine must fit the opaque buffer, and the buffer's
// word alignment must satisfy it.
sa::const_assert!(
    core::mem::size_of::<HashContext>() <= core::mem::size_of::<CryptoContext>()
);
sa::const_assert!(
    core::mem::align_of::<HashContext>() <= core::mem::align_of::<CryptoContext>()
);

/// Reinterprets the caller's buffer as the internal state machine, but only
/// after the discriminator word passes validation. Anything else in that
/// word means the buffer was never initialized by us (or was scribbled on),
/// and reading further would be interpreting garbage as engine state.
///
/// # Safety
/// `ctx` must be non-null, aligned, and point to a full `CryptoContext`.
/// The buffer may be entirely uninitialized: the discriminator word is
/// read through `MaybeUninit` and frozen into an integer before the
/// comparison, so no uninitialized byte is ever interpreted as a typed
/// value.
unsafe fn context_mut<'a>(ctx: *mut CryptoContext) -> Option<&'a mut HashContext> {
    let tag = ptr::read(ctx.cast::<MaybeUninit<u64>>()).assume_init();
    if HashContext::is_valid_tag(tag) {
        Some(&mut *ctx.cast::<HashContext>())
    } else {
        None
    }
}

/// Initializes `ctx` for the given algorithm, overwriting any prior state.
///
/// Always legal to call, whatever lifecycle position the buffer was in.
/// On a bad identifier the buffer is left untouched.
///
/// # Safety
/// `ctx` must be null or point to caller-owned memory of at least
/// `CRYPTO_CONTEXT_STATE_SIZE` 64-bit words.
#[must_use]
#[no_mangle]
pub unsafe extern "C" fn crypto_init(ctx: *mut CryptoContext, algorithm_id: u32) -> CryptoResult {
    if ctx.is_null() {
        return CryptoResult::PointerCannotBeNull;
    }
    match HashContext::new(algorithm_id) {
        Ok(fresh) => {
            ptr::write(ctx.cast::<HashContext>(), fresh);
            CryptoResult::Success
        }
        Err(err) => {
            debug!("crypto_init rejected: {}", err);
            err.into()
        }
    }
}

/// Absorbs `length` bytes from `input` into an initialized context.
///
/// Zero-length input is a no-op on a ready context. Consumed bytes are
/// copied; `input` is not retained past the call.
///
/// # Safety
/// `ctx` must be null or a context buffer as for [`crypto_init`]; `input`
/// must be null or valid for reads of `length` bytes.
#[must_use]
#[no_mangle]
pub unsafe extern "C" fn crypto_update(
    ctx: *mut CryptoContext,
    input: *const u8,
    length: usize,
) -> CryptoResult {
    if ctx.is_null() || (input.is_null() && length > 0) {
        return CryptoResult::PointerCannotBeNull;
    }
    let Some(context) = context_mut(ctx) else {
        debug!("crypto_update on an uninitialized context");
        return CryptoResult::UninitializedOrCorruptedContext;
    };
    // A null-but-empty input never reaches from_raw_parts.
    let data: &[u8] = if length == 0 {
        &[]
    } else {
        slice::from_raw_parts(input, length)
    };
    match context.update(data) {
        Ok(()) => CryptoResult::Success,
        Err(err) => {
            debug!("crypto_update rejected: {}", err);
            err.into()
        }
    }
}

/// Finalizes the digest into `output` and consumes the context.
///
/// On any result other than `Success` the output buffer is not written.
/// After success the context rejects further calls until re-initialized.
///
/// # Safety
/// `ctx` as for [`crypto_init`]; `output` must be null or valid for writes
/// of `CRYPTO_DIGEST_SIZE` bytes.
#[must_use]
#[no_mangle]
pub unsafe extern "C" fn crypto_finalize(
    ctx: *mut CryptoContext,
    output: *mut CryptoDigest,
) -> CryptoResult {
    if ctx.is_null() || output.is_null() {
        return CryptoResult::PointerCannotBeNull;
    }
    let Some(context) = context_mut(ctx) else {
        debug!("crypto_finalize on an uninitialized context");
        return CryptoResult::UninitializedOrCorruptedContext;
    };
    match context.finalize() {
        Ok(digest) => {
            ptr::write(output, CryptoDigest(digest));
            CryptoResult::Success
        }
        Err(err) => {
            debug!("crypto_finalize rejected: {}", err);
            err.into()
        }
    }
}

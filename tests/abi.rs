//! Contract tests through the C surface: pinned result-code values,
//! lifecycle enforcement, and the pointer preconditions.

use crypto_context::ffi::{crypto_finalize, crypto_init, crypto_update};
use crypto_context::{
    CryptoContext, CryptoDigest, CryptoResult, Sha256, CRYPTO_CONTEXT_STATE_SIZE,
    CRYPTO_DIGEST_SIZE, SHA256_ALG_ID, SHA3_256_ALG_ID,
};

fn context() -> CryptoContext {
    CryptoContext {
        state: [0u64; CRYPTO_CONTEXT_STATE_SIZE],
    }
}

fn digest() -> CryptoDigest {
    CryptoDigest([0u8; CRYPTO_DIGEST_SIZE])
}

#[test]
fn result_codes_are_pinned() {
    // External callers branch on these integers; a renumbering is an ABI
    // break even if every Rust test still passes.
    assert_eq!(CryptoResult::Success as u32, 0);
    assert_eq!(CryptoResult::Failure as u32, 1);
    assert_eq!(CryptoResult::PointerCannotBeNull as u32, 2);
    assert_eq!(CryptoResult::BadOrUnsupportedAlgorithm as u32, 3);
    assert_eq!(CryptoResult::UninitializedOrCorruptedContext as u32, 4);
}

#[test]
fn algorithm_ids_are_pinned() {
    assert_eq!(SHA256_ALG_ID, 0);
    assert_eq!(SHA3_256_ALG_ID, 1);
}

#[test]
fn context_buffer_is_360_bytes() {
    assert_eq!(core::mem::size_of::<CryptoContext>(), 360);
    assert_eq!(core::mem::align_of::<CryptoContext>(), 8);
    assert_eq!(core::mem::size_of::<CryptoDigest>(), 32);
}

#[test]
fn full_cycle_through_the_abi() {
    let mut ctx = context();
    let mut out = digest();
    let input = sample(1000);
    unsafe {
        assert_eq!(crypto_init(&mut ctx, SHA256_ALG_ID), CryptoResult::Success);
        assert_eq!(
            crypto_update(&mut ctx, input.as_ptr(), input.len()),
            CryptoResult::Success
        );
        assert_eq!(crypto_finalize(&mut ctx, &mut out), CryptoResult::Success);
    }
    assert_eq!(out.0, Sha256::hash_bytes(&input));
}

#[test]
fn interleaved_contexts_do_not_interfere() {
    let mut a = context();
    let mut b = context();
    let mut out_a = digest();
    let mut out_b = digest();
    unsafe {
        assert_eq!(crypto_init(&mut a, SHA256_ALG_ID), CryptoResult::Success);
        assert_eq!(crypto_init(&mut b, SHA3_256_ALG_ID), CryptoResult::Success);
        assert_eq!(crypto_update(&mut a, b"hel".as_ptr(), 3), CryptoResult::Success);
        assert_eq!(crypto_update(&mut b, b"hel".as_ptr(), 3), CryptoResult::Success);
        assert_eq!(crypto_update(&mut a, b"lo".as_ptr(), 2), CryptoResult::Success);
        assert_eq!(crypto_update(&mut b, b"lo".as_ptr(), 2), CryptoResult::Success);
        assert_eq!(crypto_finalize(&mut a, &mut out_a), CryptoResult::Success);
        assert_eq!(crypto_finalize(&mut b, &mut out_b), CryptoResult::Success);
    }
    assert_eq!(out_a.0, Sha256::hash_bytes(b"hello"));
    assert_eq!(out_b.0, crypto_context::Sha3_256::hash_bytes(b"hello"));
}

#[test]
fn garbage_discriminator_is_treated_as_uninitialized() {
    let mut ctx = context();
    // Scribble a plausible-looking but unknown tag into the first word.
    ctx.state[0] = 0xdead_beef_dead_beef;
    let mut out = digest();
    unsafe {
        assert_eq!(
            crypto_update(&mut ctx, b"abc".as_ptr(), 3),
            CryptoResult::UninitializedOrCorruptedContext
        );
        assert_eq!(
            crypto_finalize(&mut ctx, &mut out),
            CryptoResult::UninitializedOrCorruptedContext
        );
    }
    assert_eq!(out.0, [0u8; CRYPTO_DIGEST_SIZE]);
}

#[test]
fn never_written_buffer_is_rejected() {
    // A caller-allocated buffer that was never passed to crypto_init.
    // Only the discriminator word is made deterministic; the rest stays
    // uninitialized, as it would in a fresh C stack allocation.
    let mut raw = core::mem::MaybeUninit::<CryptoContext>::uninit();
    let ctx = raw.as_mut_ptr();
    let mut out = digest();
    unsafe {
        ctx.cast::<u64>().write(0x0123_4567_89ab_cdef);
        assert_eq!(
            crypto_update(ctx, b"abc".as_ptr(), 3),
            CryptoResult::UninitializedOrCorruptedContext
        );
        assert_eq!(
            crypto_finalize(ctx, &mut out),
            CryptoResult::UninitializedOrCorruptedContext
        );
        // Initialization makes the same memory usable.
        assert_eq!(crypto_init(ctx, SHA256_ALG_ID), CryptoResult::Success);
        assert_eq!(crypto_update(ctx, b"hello".as_ptr(), 5), CryptoResult::Success);
        assert_eq!(crypto_finalize(ctx, &mut out), CryptoResult::Success);
    }
    assert_eq!(out.0, Sha256::hash_bytes(b"hello"));
}

#[test]
fn init_recovers_any_context() {
    let mut ctx = context();
    ctx.state[0] = u64::MAX;
    let mut out = digest();
    unsafe {
        assert_eq!(crypto_init(&mut ctx, SHA3_256_ALG_ID), CryptoResult::Success);
        assert_eq!(crypto_update(&mut ctx, b"hello".as_ptr(), 5), CryptoResult::Success);
        assert_eq!(crypto_finalize(&mut ctx, &mut out), CryptoResult::Success);
    }
    assert_eq!(out.0, crypto_context::Sha3_256::hash_bytes(b"hello"));
}

#[test]
fn distinct_contexts_are_thread_independent() {
    // The safe state machine is plain data, so moving contexts to other
    // threads must be allowed and produce the same digests.
    let handles: Vec<_> = [SHA256_ALG_ID, SHA3_256_ALG_ID]
        .into_iter()
        .map(|id| {
            std::thread::spawn(move || {
                let data = sample(2048);
                let mut ctx = crypto_context::HashContext::new(id).unwrap();
                for piece in data.chunks(97) {
                    ctx.update(piece).unwrap();
                }
                (id, ctx.finalize().unwrap())
            })
        })
        .collect();
    for handle in handles {
        let (id, threaded) = handle.join().unwrap();
        let data = sample(2048);
        let mut ctx = crypto_context::HashContext::new(id).unwrap();
        ctx.update(&data).unwrap();
        assert_eq!(ctx.finalize().unwrap(), threaded);
    }
}

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

//! Streaming properties of the safe Rust surface: the digest must never
//! depend on how the input was split across update calls, and a re-used
//! context must behave exactly like a fresh one.

use crypto_context::{Algorithm, HashContext, SHA256_ALG_ID, SHA3_256_ALG_ID};

const ALGORITHM_IDS: [u32; 2] = [SHA256_ALG_ID, SHA3_256_ALG_ID];

/// A deterministic input long enough to span several blocks of both
/// algorithms (SHA-256: 64, SHA3-256: 136).
fn sample_input(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(7)).collect()
}

fn digest_one_shot(id: u32, data: &[u8]) -> [u8; 32] {
    let mut ctx = HashContext::new(id).unwrap();
    ctx.update(data).unwrap();
    ctx.finalize().unwrap()
}

fn digest_chunked(id: u32, data: &[u8], chunk: usize) -> [u8; 32] {
    let mut ctx = HashContext::new(id).unwrap();
    for piece in data.chunks(chunk) {
        ctx.update(piece).unwrap();
    }
    ctx.finalize().unwrap()
}

#[test]
fn split_invariance() {
    let data = sample_input(1337);
    for id in ALGORITHM_IDS {
        let reference = digest_one_shot(id, &data);
        for chunk in [1, 2, 3, 7, 63, 64, 65, 135, 136, 137, 500] {
            assert_eq!(
                digest_chunked(id, &data, chunk),
                reference,
                "algorithm {} split into {}-byte updates diverged",
                id,
                chunk
            );
        }
    }
}

#[test]
fn chunk_sizes_straddling_the_block_boundary() {
    // Exercise the partial-buffer top-up path right at each algorithm's
    // block size.
    for id in ALGORITHM_IDS {
        let block = Algorithm::resolve(id).unwrap().block_size();
        for len in [block - 1, block, block + 1, 2 * block, 2 * block + 5] {
            let data = sample_input(len);
            let reference = digest_one_shot(id, &data);
            assert_eq!(digest_chunked(id, &data, block - 1), reference);
            assert_eq!(digest_chunked(id, &data, block), reference);
        }
    }
}

#[test]
fn empty_updates_do_not_change_the_digest() {
    let data = sample_input(200);
    for id in ALGORITHM_IDS {
        let reference = digest_one_shot(id, &data);

        let mut ctx = HashContext::new(id).unwrap();
        ctx.update(&[]).unwrap();
        ctx.update(&data[..100]).unwrap();
        ctx.update(&[]).unwrap();
        ctx.update(&data[100..]).unwrap();
        ctx.update(&[]).unwrap();
        assert_eq!(ctx.finalize().unwrap(), reference);
    }
}

#[test]
fn finalize_without_update_is_the_empty_digest() {
    for id in ALGORITHM_IDS {
        let mut ctx = HashContext::new(id).unwrap();
        let immediate = ctx.finalize().unwrap();
        assert_eq!(immediate, digest_one_shot(id, &[]));
    }
}

#[test]
fn long_inputs_keep_a_32_byte_digest() {
    let data = sample_input(4096);
    for id in ALGORITHM_IDS {
        let digest = digest_one_shot(id, &data);
        assert_eq!(digest.len(), Algorithm::resolve(id).unwrap().digest_size());
    }
}

#[test]
fn reused_context_matches_a_fresh_one() {
    let first = sample_input(300);
    let second = sample_input(77);
    for id in ALGORITHM_IDS {
        let mut ctx = HashContext::new(id).unwrap();
        ctx.update(&first).unwrap();
        ctx.finalize().unwrap();

        // Full reset through the same context memory.
        let other = ALGORITHM_IDS[(id as usize + 1) % 2];
        ctx = HashContext::new(other).unwrap();
        ctx.update(&second).unwrap();
        assert_eq!(ctx.finalize().unwrap(), digest_one_shot(other, &second));
    }
}

#[test]
fn algorithms_disagree_on_the_same_input() {
    let data = sample_input(64);
    assert_ne!(
        digest_one_shot(SHA256_ALG_ID, &data),
        digest_one_shot(SHA3_256_ALG_ID, &data)
    );
}

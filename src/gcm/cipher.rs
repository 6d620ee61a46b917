//! Single-block AES-128 collaborator
//!
//! GCM needs exactly one primitive from a block cipher: the forward
//! permutation of one 16-byte block under a 16-byte key. The substitution
//! and permutation layers themselves come from the `aes` crate; no mode
//! of operation from that crate is used; chaining is built here.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Block};

/// AES-128 forward encryption of a single block, no chaining, no padding
///
/// Stateless: the key schedule is recomputed per call, matching the
/// engine's call-independent resource model.
pub fn encrypt_block(key: &[u8; 16], block: &[u8; 16]) -> [u8; 16] {
    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut state = Block::clone_from_slice(block);
    cipher.encrypt_block(&mut state);
    state.into()
}

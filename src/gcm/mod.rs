//! Galois/Counter Mode per NIST SP 800-38D
//!
//! GCTR applies the AES counter-mode keystream; GHASH authenticates by
//! evaluating the padded input as a polynomial over GF(2^128) at the hash
//! subkey (Horner's method). [`encrypt`] and [`decrypt`] are the
//! authenticated entry points; every call is independent and stateless.
//!
//! On decrypt, the tag is verified before any keystream is applied, so a
//! failed authentication never releases plaintext.

mod cipher;

pub use cipher::encrypt_block;

use tracing::{debug, trace};

use crate::{GcmError, GF2_128};

/// Cipher block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Tag lengths permitted by NIST SP 800-38D, in bytes
pub const PERMITTED_TAG_LENGTHS: [usize; 7] = [4, 8, 12, 13, 14, 15, 16];

/// Plaintext bound: 2^39 - 256 bits, as bytes
const PLAINTEXT_MAX: u64 = (1 << 36) - 32;

/// Associated-data bound in bytes
const ASSOC_DATA_MAX: u64 = (1 << 61) - 1;

/// IV length bounds in bytes
const IV_MIN: u64 = 1;
const IV_MAX: u64 = (1 << 61) - 1;

/// Zero bytes needed to extend `len` to a multiple of the block size
fn zero_pad_len(len: usize) -> usize {
    (BLOCK_SIZE - len % BLOCK_SIZE) % BLOCK_SIZE
}

/// Increment the 32-bit big-endian counter in the last 4 bytes of a block
///
/// The first 12 bytes pass through untouched; the counter wraps silently
/// modulo 2^32, as SP 800-38D specifies.
pub fn increment_counter(block: &[u8; 16]) -> [u8; 16] {
    let mut out = *block;
    let counter = u32::from_be_bytes([out[12], out[13], out[14], out[15]]);
    out[12..].copy_from_slice(&counter.wrapping_add(1).to_be_bytes());
    out
}

/// Counter-mode keystream application (GCTR)
///
/// Splits `data` into 16-byte blocks, xoring block i against the
/// encryption of the i-th counter block; a short final block truncates
/// the keystream to match. Empty input short-circuits to empty output
/// with no cipher invocations. Encryption and decryption are the same
/// operation.
pub fn gctr(key: &[u8; 16], initial_counter_block: &[u8; 16], data: &[u8]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(data.len());
    let mut counter_block = *initial_counter_block;
    for block in data.chunks(BLOCK_SIZE) {
        let keystream = cipher::encrypt_block(key, &counter_block);
        out.extend(block.iter().zip(keystream.iter()).map(|(d, k)| d ^ k));
        counter_block = increment_counter(&counter_block);
    }
    out
}

/// Galois hash over 16-byte blocks (GHASH)
///
/// Horner evaluation in GF(2^128): `g = (g + block) * H` per block, with
/// blocks and the subkey decoded via the bit-reversed byte convention.
/// Fails with [`GcmError::Parameter`] unless the input length is an exact
/// multiple of 16.
pub fn ghash(subkey: &[u8; 16], data: &[u8]) -> Result<[u8; 16], GcmError> {
    if data.len() % BLOCK_SIZE != 0 {
        return Err(GcmError::Parameter(format!(
            "GHASH input length must be a multiple of {BLOCK_SIZE} bytes, got {}",
            data.len()
        )));
    }
    let subkey_element = GF2_128.element_from_bytes(subkey)?;
    let mut accumulator = GF2_128.zero();
    for block in data.chunks(BLOCK_SIZE) {
        accumulator = accumulator
            .add(&GF2_128.element_from_bytes(block)?)
            .multiply(&subkey_element);
    }
    let mut out = [0u8; BLOCK_SIZE];
    out.copy_from_slice(&accumulator.to_bytes());
    Ok(out)
}

/// Build the exact byte string GHASH authenticates
///
/// `AD ‖ pad ‖ C ‖ pad ‖ be64(bits(AD)) ‖ be64(bits(C))`, each pad
/// extending its section to a block boundary with zero bytes.
pub fn gcm_pad(assoc_data: &[u8], cipher_text: &[u8]) -> Vec<u8> {
    let mut padded = Vec::with_capacity(
        assoc_data.len()
            + zero_pad_len(assoc_data.len())
            + cipher_text.len()
            + zero_pad_len(cipher_text.len())
            + BLOCK_SIZE,
    );
    padded.extend_from_slice(assoc_data);
    padded.resize(padded.len() + zero_pad_len(assoc_data.len()), 0);
    padded.extend_from_slice(cipher_text);
    padded.resize(padded.len() + zero_pad_len(cipher_text.len()), 0);
    padded.extend_from_slice(&(assoc_data.len() as u64 * 8).to_be_bytes());
    padded.extend_from_slice(&(cipher_text.len() as u64 * 8).to_be_bytes());
    padded
}

/// Derive the pre-counter block J0 from the initialization value
///
/// A 96-bit IV takes the fast path `IV ‖ 00000001`; any other length is
/// absorbed through GHASH with a 64-bit big-endian bit count appended.
fn derive_counter_zero(subkey: &[u8; 16], initial_value: &[u8]) -> Result<[u8; 16], GcmError> {
    if initial_value.len() == 12 {
        let mut j0 = [0u8; BLOCK_SIZE];
        j0[..12].copy_from_slice(initial_value);
        j0[15] = 1;
        Ok(j0)
    } else {
        trace!(iv_len = initial_value.len(), "deriving J0 through GHASH");
        let mut padded = initial_value.to_vec();
        padded.resize(padded.len() + zero_pad_len(initial_value.len()) + 8, 0);
        padded.extend_from_slice(&(initial_value.len() as u64 * 8).to_be_bytes());
        ghash(subkey, &padded)
    }
}

/// Check the SP 800-38D size bounds before any cipher work
fn validate_lengths(
    data_len: usize,
    assoc_len: usize,
    iv_len: usize,
    tag_length: usize,
) -> Result<(), GcmError> {
    if data_len as u64 > PLAINTEXT_MAX {
        return Err(GcmError::Parameter(format!(
            "data exceeds max length {PLAINTEXT_MAX} bytes: {data_len}"
        )));
    }
    if assoc_len as u64 > ASSOC_DATA_MAX {
        return Err(GcmError::Parameter(format!(
            "associated data exceeds max length {ASSOC_DATA_MAX} bytes: {assoc_len}"
        )));
    }
    if (iv_len as u64) < IV_MIN || iv_len as u64 > IV_MAX {
        return Err(GcmError::Parameter(format!(
            "initialization value length {iv_len} outside [{IV_MIN}, {IV_MAX}] bytes"
        )));
    }
    if !PERMITTED_TAG_LENGTHS.contains(&tag_length) {
        return Err(GcmError::Parameter(format!(
            "tag length {tag_length} bytes not permitted"
        )));
    }
    Ok(())
}

/// GCM authenticated encryption
///
/// Returns `(ciphertext, tag)`; the ciphertext has the plaintext's length
/// and the tag is truncated to `tag_length` bytes. All size bounds are
/// checked up front and violations fail with [`GcmError::Parameter`]
/// before any cipher call.
pub fn encrypt(
    key: &[u8; 16],
    initial_value: &[u8],
    plain_text: &[u8],
    assoc_data: &[u8],
    tag_length: usize,
) -> Result<(Vec<u8>, Vec<u8>), GcmError> {
    validate_lengths(plain_text.len(), assoc_data.len(), initial_value.len(), tag_length)?;
    debug!(
        plain = plain_text.len(),
        assoc = assoc_data.len(),
        iv = initial_value.len(),
        "gcm encrypt"
    );
    let subkey = cipher::encrypt_block(key, &[0u8; BLOCK_SIZE]);
    let counter_zero = derive_counter_zero(&subkey, initial_value)?;
    // Keystream for the payload starts one block past J0; J0 itself
    // encrypts the hash block into the tag
    let cipher_text = gctr(key, &increment_counter(&counter_zero), plain_text);
    let hash_block = ghash(&subkey, &gcm_pad(assoc_data, &cipher_text))?;
    let mut tag = gctr(key, &counter_zero, &hash_block);
    tag.truncate(tag_length);
    Ok((cipher_text, tag))
}

/// GCM authenticated decryption
///
/// Recomputes the expected tag over the received ciphertext and verifies
/// it before any keystream is applied; on mismatch fails with
/// [`GcmError::Authentication`] and releases nothing. On success returns
/// the plaintext paired with the associated data it was bound to.
pub fn decrypt(
    key: &[u8; 16],
    initial_value: &[u8],
    cipher_text: &[u8],
    assoc_data: &[u8],
    tag: &[u8],
    tag_length: usize,
) -> Result<(Vec<u8>, Vec<u8>), GcmError> {
    validate_lengths(cipher_text.len(), assoc_data.len(), initial_value.len(), tag_length)?;
    if tag.len() != tag_length {
        return Err(GcmError::Parameter(format!(
            "tag length {} does not match expected {tag_length}",
            tag.len()
        )));
    }
    debug!(
        cipher = cipher_text.len(),
        assoc = assoc_data.len(),
        iv = initial_value.len(),
        "gcm decrypt"
    );
    let subkey = cipher::encrypt_block(key, &[0u8; BLOCK_SIZE]);
    let counter_zero = derive_counter_zero(&subkey, initial_value)?;
    let hash_block = ghash(&subkey, &gcm_pad(assoc_data, cipher_text))?;
    let mut derived_tag = gctr(key, &counter_zero, &hash_block);
    derived_tag.truncate(tag_length);
    if derived_tag != tag {
        return Err(GcmError::Authentication);
    }
    let plain_text = gctr(key, &increment_counter(&counter_zero), cipher_text);
    Ok((plain_text, assoc_data.to_vec()))
}

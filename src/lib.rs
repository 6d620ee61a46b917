//! # AES-GCM over hand-rolled GF(2^128) arithmetic
//!
//! This library implements the authenticated-encryption mode of
//! NIST SP 800-38D from first principles:
//!
//! 1. **GF(2)[x] ring arithmetic**: polynomials over the two-element field,
//!    stored as bitmasks; add is xor, multiply is shift-and-xor
//! 2. **GF(2^k) field**: the polynomial ring modulo an irreducible
//!    polynomial, instantiated as GF(2^128) for GHASH
//! 3. **GCM engine**: GHASH, GCTR, counter-block derivation and the
//!    authenticated encrypt/decrypt entry points
//!
//! The only borrowed primitive is the single-block AES-128 forward
//! permutation (the `aes` crate); every field operation underneath GHASH
//! is implemented here in software, correctness-first.
//!
//! ## Usage Example
//!
//! ```
//! use gf2gcm::gcm;
//!
//! let key = [0x42u8; 16];
//! let iv = [0x24u8; 12];
//! let (cipher, tag) = gcm::encrypt(&key, &iv, b"attack at dawn", b"header", 16)?;
//! let (plain, assoc) = gcm::decrypt(&key, &iv, &cipher, b"header", &tag, 16)?;
//! assert_eq!(plain, b"attack at dawn");
//! assert_eq!(assoc, b"header");
//! # Ok::<(), gf2gcm::GcmError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules - leaves first
pub mod algebra; // GF(2)[x] ring and GF(2^k) field arithmetic
pub mod gcm; // GHASH/GCTR and the AEAD entry points

// Re-exports for convenience
pub use algebra::{FieldElement, Gf2Poly, Gf2k, GF2_128};

use thiserror::Error;

/// Errors surfaced by field construction and the GCM engine
///
/// Every failure here is deterministic for a given input; there is no
/// transient class and nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GcmError {
    /// Defining polynomial degree does not match the field width
    #[error("defining polynomial must have degree {expected}, got {found}")]
    InvalidField {
        /// Requested field width k
        expected: usize,
        /// Actual degree of the supplied polynomial (-1 for zero)
        found: i64,
    },

    /// Value has too many significant bits to live in the field
    #[error("value needs {needed} significant bits but the field holds only {width}")]
    ValueTooLarge {
        /// Significant bits of the offending value
        needed: usize,
        /// Field width k
        width: usize,
    },

    /// Polynomial shares a nontrivial factor with the modulus (or is zero)
    #[error("no inverse: gcd with the modulus is not 1")]
    NoInverse,

    /// Length/size precondition violated before any cipher work
    #[error("invalid parameter: {0}")]
    Parameter(String),

    /// Tag verification failed on decrypt; no plaintext was released
    #[error("authentication tag failed to validate ciphertext")]
    Authentication,
}

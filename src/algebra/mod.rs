//! Characteristic-2 algebra: the GF(2)[x] ring and GF(2^k) fields
//!
//! [`Gf2Poly`] provides field-independent ring arithmetic on polynomials
//! over GF(2); [`Gf2k`] turns that ring into a finite field by fixing an
//! irreducible modulus. [`GF2_128`] is the one field instance the GCM
//! engine uses.

mod field;
mod polynomial;

pub use field::{FieldElement, Gf2k};
pub use polynomial::Gf2Poly;

use std::sync::LazyLock;

/// The field GF(2^128) used by GHASH, defined by x^128 + x^7 + x^2 + x + 1
///
/// Process-wide, constructed on first use, never mutated afterwards; it
/// may be shared across threads without locking.
pub static GF2_128: LazyLock<Gf2k> = LazyLock::new(|| {
    let modulus = Gf2Poly::x_to(128).add(&Gf2Poly::from_int(0b1000_0111));
    Gf2k::new(128, modulus).expect("degree-128 modulus is checked above")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ghash_field_modulus() {
        assert_eq!(GF2_128.width(), 128);
        assert_eq!(GF2_128.modulus().degree(), 128);
        assert_eq!(
            GF2_128.modulus().to_string(),
            "x^128 + x^7 + x^2 + x + 1"
        );
    }
}

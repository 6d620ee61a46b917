//! The finite field GF(2^k)
//!
//! A [`Gf2k`] descriptor pairs a width k with an irreducible defining
//! polynomial of degree k; elements are polynomials of degree < k that
//! defer all ring arithmetic to [`Gf2Poly`] modulo the field polynomial.
//!
//! Byte (de)serialization uses the GHASH wire convention of NIST
//! SP 800-38D: within each byte the bit order is reversed, so the
//! leftmost wire bit of the first byte is the coefficient of x^0. This is
//! the one place naive big-endian assumptions silently break tags.

use crate::{GcmError, Gf2Poly};

/// Descriptor for the field GF(2^k)
///
/// Constant after construction; safe to share read-only across threads.
/// Two descriptors are equal only if both the width and the defining
/// polynomial match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gf2k {
    /// Field width: the field has 2^k elements
    k: usize,
    /// Irreducible defining polynomial of degree exactly k
    ///
    /// Irreducibility is an implementer precondition, not checked at
    /// runtime; a reducible polynomial surfaces later as `NoInverse` on a
    /// nonzero element.
    modulus: Gf2Poly,
}

impl Gf2k {
    /// Construct the field descriptor
    ///
    /// Fails with [`GcmError::InvalidField`] unless `modulus` has degree
    /// exactly `k`.
    pub fn new(k: usize, modulus: Gf2Poly) -> Result<Self, GcmError> {
        if modulus.degree() != k as i64 {
            return Err(GcmError::InvalidField {
                expected: k,
                found: modulus.degree(),
            });
        }
        Ok(Self { k, modulus })
    }

    /// Field width k
    pub fn width(&self) -> usize {
        self.k
    }

    /// The defining polynomial
    pub fn modulus(&self) -> &Gf2Poly {
        &self.modulus
    }

    /// The additive identity
    pub fn zero(&self) -> FieldElement<'_> {
        FieldElement {
            poly: Gf2Poly::zero(),
            field: self,
        }
    }

    /// The multiplicative identity
    pub fn one(&self) -> FieldElement<'_> {
        FieldElement {
            poly: Gf2Poly::one(),
            field: self,
        }
    }

    /// Wrap an integer bitmask as a field element
    ///
    /// Fails with [`GcmError::ValueTooLarge`] when the value needs more
    /// than k significant bits (value >= 2^k).
    pub fn element(&self, value: u128) -> Result<FieldElement<'_>, GcmError> {
        self.element_from_poly(Gf2Poly::from_int(value))
    }

    /// Wrap a polynomial as a field element
    ///
    /// Same bound check as [`Self::element`]: the degree must stay
    /// below k.
    pub fn element_from_poly(&self, poly: Gf2Poly) -> Result<FieldElement<'_>, GcmError> {
        if poly.degree() >= self.k as i64 {
            return Err(GcmError::ValueTooLarge {
                needed: (poly.degree() + 1) as usize,
                width: self.k,
            });
        }
        Ok(FieldElement { poly, field: self })
    }

    /// Decode a byte block using the GHASH bit convention
    ///
    /// Each byte is bit-reversed and the bytes are read positionally
    /// little-endian, so the first wire bit maps to the x^0 coefficient.
    /// A block of ceil(k/8) bytes always fits; longer blocks fail with
    /// [`GcmError::ValueTooLarge`] once they carry more than k
    /// significant bits.
    pub fn element_from_bytes(&self, block: &[u8]) -> Result<FieldElement<'_>, GcmError> {
        let mut limbs = vec![0u64; block.len().div_ceil(8)];
        for (j, &byte) in block.iter().enumerate() {
            limbs[j / 8] |= u64::from(byte.reverse_bits()) << (8 * (j % 8));
        }
        self.element_from_poly(Gf2Poly::from_limbs(limbs))
    }
}

/// An element of GF(2^k): a polynomial of degree < k bound to its field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldElement<'f> {
    poly: Gf2Poly,
    field: &'f Gf2k,
}

impl<'f> FieldElement<'f> {
    /// The underlying polynomial
    pub fn poly(&self) -> &Gf2Poly {
        &self.poly
    }

    /// The field this element belongs to
    pub fn field(&self) -> &'f Gf2k {
        self.field
    }

    /// True for the additive identity
    pub fn is_zero(&self) -> bool {
        self.poly.is_zero()
    }

    /// Mixing elements of different fields is a caller bug; the modulus
    /// used would be ambiguous
    fn check_same_field(&self, other: &Self) {
        debug_assert!(
            std::ptr::eq(self.field, other.field) || self.field == other.field,
            "field elements belong to different fields"
        );
    }

    /// Field addition: coefficient-wise xor
    pub fn add(&self, other: &Self) -> Self {
        self.check_same_field(other);
        Self {
            poly: self.poly.add(&other.poly),
            field: self.field,
        }
    }

    /// Field subtraction, identical to addition in characteristic 2
    pub fn subtract(&self, other: &Self) -> Self {
        self.add(other)
    }

    /// Additive inverse: the element itself
    pub fn negate(&self) -> Self {
        self.clone()
    }

    /// Field multiplication: carry-less multiply reduced by the defining
    /// polynomial
    pub fn multiply(&self, other: &Self) -> Self {
        self.check_same_field(other);
        Self {
            poly: self.poly.modmul(&other.poly, &self.field.modulus),
            field: self.field,
        }
    }

    /// Exponentiation by square-and-multiply modulo the field polynomial
    pub fn pow(&self, exponent: u128) -> Self {
        Self {
            poly: self.poly.pow(exponent, Some(&self.field.modulus)),
            field: self.field,
        }
    }

    /// Multiplicative inverse
    ///
    /// Fails with [`GcmError::NoInverse`] only for the zero element when
    /// the defining polynomial is irreducible.
    pub fn invert(&self) -> Result<Self, GcmError> {
        Ok(Self {
            poly: self.poly.modular_inverse(&self.field.modulus)?,
            field: self.field,
        })
    }

    /// Field division: `a / b == a * b^-1`
    pub fn divide(&self, other: &Self) -> Result<Self, GcmError> {
        Ok(self.multiply(&other.invert()?))
    }

    /// Encode as ceil(k/8) bytes, inverting
    /// [`Gf2k::element_from_bytes`]
    pub fn to_bytes(&self) -> Vec<u8> {
        let len = self.field.k.div_ceil(8);
        let limbs = self.poly.limbs();
        (0..len)
            .map(|j| {
                let limb = limbs.get(j / 8).copied().unwrap_or(0);
                ((limb >> (8 * (j % 8))) as u8).reverse_bits()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf16() -> Gf2k {
        // x^4 + x + 1, irreducible over GF(2)
        Gf2k::new(4, Gf2Poly::from_int(0b10011)).unwrap()
    }

    #[test]
    fn construction_checks_modulus_degree() {
        let err = Gf2k::new(4, Gf2Poly::from_int(0b101)).unwrap_err();
        assert_eq!(
            err,
            GcmError::InvalidField {
                expected: 4,
                found: 2
            }
        );
    }

    #[test]
    fn element_rejects_oversized_values() {
        let field = gf16();
        assert!(field.element(0b1111).is_ok());
        assert_eq!(
            field.element(0b10000),
            Err(GcmError::ValueTooLarge {
                needed: 5,
                width: 4
            })
        );
    }

    #[test]
    fn fields_with_different_moduli_are_distinct() {
        // Both degree 4; x^4 + x^3 + 1 is the other irreducible choice
        let a = gf16();
        let b = Gf2k::new(4, Gf2Poly::from_int(0b11001)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn multiply_reduces_by_field_polynomial() {
        let field = gf16();
        // x^3 * x = x^4 = x + 1 mod (x^4 + x + 1)
        let a = field.element(0b1000).unwrap();
        let x = field.element(0b0010).unwrap();
        assert_eq!(a.multiply(&x), field.element(0b0011).unwrap());
    }

    #[test]
    fn invert_and_divide() {
        let field = gf16();
        let a = field.element(0b0110).unwrap();
        assert_eq!(a.multiply(&a.invert().unwrap()), field.one());
        assert_eq!(a.divide(&a).unwrap(), field.one());
        assert_eq!(field.zero().invert(), Err(GcmError::NoInverse));
    }

    #[test]
    fn byte_convention_maps_first_wire_bit_to_x0() {
        let field = crate::GF2_128.clone();
        // 0x80 = wire bits 1000...0, so only the x^0 coefficient is set
        let mut block = [0u8; 16];
        block[0] = 0x80;
        let element = field.element_from_bytes(&block).unwrap();
        assert_eq!(element.poly(), &Gf2Poly::one());
        assert_eq!(element.to_bytes(), block.to_vec());
        // Last wire bit of the block is x^127
        let mut block = [0u8; 16];
        block[15] = 0x01;
        let element = field.element_from_bytes(&block).unwrap();
        assert_eq!(element.poly(), &Gf2Poly::x_to(127));
    }

    #[test]
    fn to_bytes_pads_to_field_width() {
        let field = crate::GF2_128.clone();
        assert_eq!(field.zero().to_bytes(), vec![0u8; 16]);
        assert_eq!(field.one().to_bytes()[0], 0x80);
    }
}

//! Polynomials over GF(2), the two-element field
//!
//! A polynomial is a bitmask: bit i holds the coefficient of x^i.
//! Addition is xor, so every polynomial is its own additive inverse and
//! subtraction coincides with addition. Arbitrary degrees are supported
//! via a little-endian vector of 64-bit limbs.

use std::fmt;

use crate::GcmError;

/// Bits per limb
const LIMB_BITS: usize = 64;

/// A polynomial with coefficients in GF(2)
///
/// Immutable value type: every operation returns a fresh polynomial.
/// Invariant: the limb vector carries no trailing zero limbs, so the
/// zero polynomial is the empty vector and equality is limb identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gf2Poly {
    /// Little-endian limbs: limb j holds coefficients x^(64j) .. x^(64j+63)
    limbs: Vec<u64>,
}

impl Gf2Poly {
    /// The zero polynomial
    pub fn zero() -> Self {
        Self { limbs: Vec::new() }
    }

    /// The constant polynomial 1
    pub fn one() -> Self {
        Self { limbs: vec![1] }
    }

    /// Polynomial from an integer bitmask (bit i = coefficient of x^i)
    pub fn from_int(value: u128) -> Self {
        let mut poly = Self {
            limbs: vec![value as u64, (value >> LIMB_BITS) as u64],
        };
        poly.normalize();
        poly
    }

    /// Polynomial from raw little-endian limbs
    pub fn from_limbs(limbs: Vec<u64>) -> Self {
        let mut poly = Self { limbs };
        poly.normalize();
        poly
    }

    /// The monomial x^n
    pub fn x_to(n: usize) -> Self {
        let mut poly = Self::zero();
        poly.set_bit(n);
        poly
    }

    /// Degree of the polynomial: -1 for zero, else the highest set bit
    pub fn degree(&self) -> i64 {
        match self.limbs.last() {
            None => -1,
            Some(top) => {
                let high = self.limbs.len() - 1;
                (high * LIMB_BITS) as i64 + (LIMB_BITS - 1 - top.leading_zeros() as usize) as i64
            }
        }
    }

    /// True for the zero polynomial
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Coefficient of x^i
    pub fn bit(&self, i: usize) -> bool {
        match self.limbs.get(i / LIMB_BITS) {
            Some(limb) => (limb >> (i % LIMB_BITS)) & 1 == 1,
            None => false,
        }
    }

    /// Borrow the little-endian limbs
    pub fn limbs(&self) -> &[u64] {
        &self.limbs
    }

    /// Set the coefficient of x^i to 1
    fn set_bit(&mut self, i: usize) {
        let index = i / LIMB_BITS;
        if index >= self.limbs.len() {
            self.limbs.resize(index + 1, 0);
        }
        self.limbs[index] |= 1u64 << (i % LIMB_BITS);
    }

    /// Drop trailing zero limbs to restore the representation invariant
    fn normalize(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }

    /// In-place xor, the primitive under add/subtract and reduction
    fn xor_assign(&mut self, other: &Self) {
        if other.limbs.len() > self.limbs.len() {
            self.limbs.resize(other.limbs.len(), 0);
        }
        for (limb, &rhs) in self.limbs.iter_mut().zip(other.limbs.iter()) {
            *limb ^= rhs;
        }
        self.normalize();
    }

    /// Add two polynomials: coefficient-wise xor
    ///
    /// In characteristic 2 this is also subtraction, and every polynomial
    /// is its own negation.
    pub fn add(&self, other: &Self) -> Self {
        let mut sum = self.clone();
        sum.xor_assign(other);
        sum
    }

    /// Multiply by x^n
    pub fn shift_left(&self, n: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let words = n / LIMB_BITS;
        let bits = n % LIMB_BITS;
        let mut limbs = vec![0u64; self.limbs.len() + words + 1];
        for (j, &limb) in self.limbs.iter().enumerate() {
            limbs[j + words] |= limb << bits;
            if bits > 0 {
                limbs[j + words + 1] |= limb >> (LIMB_BITS - bits);
            }
        }
        Self::from_limbs(limbs)
    }

    /// Carry-less multiplication
    ///
    /// For every set bit i of `self`, accumulate `other * x^i` by xor.
    /// The product degree is deg(a) + deg(b), or -1 if either side is zero.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut product = Self::zero();
        for (j, &limb) in self.limbs.iter().enumerate() {
            let mut word = limb;
            while word != 0 {
                let i = j * LIMB_BITS + word.trailing_zeros() as usize;
                product.xor_assign(&other.shift_left(i));
                word &= word - 1;
            }
        }
        product
    }

    /// Euclidean long division
    ///
    /// Returns (quotient, remainder) with `self == quotient*divisor + remainder`
    /// and deg(remainder) < deg(divisor). Because the only nonzero
    /// coefficient is 1, each step xors a shifted copy of the divisor off
    /// the remainder and records that shift in the quotient.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is the zero polynomial.
    pub fn divmod(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "polynomial division by zero");
        let mut quotient = Self::zero();
        let mut remainder = self.clone();
        let divisor_degree = divisor.degree();
        while remainder.degree() >= divisor_degree {
            let shift = (remainder.degree() - divisor_degree) as usize;
            quotient.set_bit(shift);
            remainder.xor_assign(&divisor.shift_left(shift));
        }
        (quotient, remainder)
    }

    /// Remainder of Euclidean division
    pub fn rem(&self, modulus: &Self) -> Self {
        self.divmod(modulus).1
    }

    /// Multiply modulo another polynomial in a single interleaved pass
    ///
    /// Folds the modulus into the shifting operand whenever its degree
    /// reaches deg(modulus), so intermediates never grow past the modulus.
    /// Operands of degree >= deg(modulus) are reduced up front.
    pub fn modmul(&self, other: &Self, modulus: &Self) -> Self {
        let modulus_degree = modulus.degree();
        let a = if self.degree() >= modulus_degree {
            self.rem(modulus)
        } else {
            self.clone()
        };
        let mut b = if other.degree() >= modulus_degree {
            other.rem(modulus)
        } else {
            other.clone()
        };
        let mut product = Self::zero();
        let bits = (a.degree() + 1) as usize;
        for i in 0..bits {
            if a.bit(i) {
                product.xor_assign(&b);
            }
            b = b.shift_left(1);
            // deg(b) can reach deg(modulus) but never exceed it, so one
            // xor is a full reduction
            if b.degree() == modulus_degree {
                b.xor_assign(modulus);
            }
        }
        product
    }

    /// Square-and-multiply exponentiation, optionally modular
    ///
    /// With a modulus the intermediates stay below deg(modulus) via
    /// [`Self::modmul`]; without one the result grows freely. An exponent
    /// of 0 yields the constant polynomial 1.
    pub fn pow(&self, exponent: u128, modulus: Option<&Self>) -> Self {
        let mul = |a: &Self, b: &Self| match modulus {
            Some(m) => a.modmul(b, m),
            None => a.multiply(b),
        };
        let mut register = self.clone();
        let mut result = Self::one();
        let mut exponent = exponent;
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = mul(&result, &register);
            }
            register = mul(&register, &register);
            exponent >>= 1;
        }
        result
    }

    /// Iterative extended Euclidean algorithm
    ///
    /// Returns (gcd, s, t) with `gcd == self*s + other*t`. When the gcd is
    /// the constant polynomial 1, `s` is the inverse of `self` modulo
    /// `other`.
    pub fn extended_euclidean(&self, other: &Self) -> (Self, Self, Self) {
        let mut s_prev = Self::one();
        let mut s = Self::zero();
        let mut t_prev = Self::zero();
        let mut t = Self::one();
        let mut r_prev = self.clone();
        let mut r = other.clone();
        while !r.is_zero() {
            let (quotient, remainder) = r_prev.divmod(&r);
            // r_next = r_prev - q*r, and subtraction is addition here
            r_prev = std::mem::replace(&mut r, remainder);
            let s_next = s_prev.add(&quotient.multiply(&s));
            s_prev = std::mem::replace(&mut s, s_next);
            let t_next = t_prev.add(&quotient.multiply(&t));
            t_prev = std::mem::replace(&mut t, t_next);
        }
        (r_prev, s_prev, t_prev)
    }

    /// Greatest common divisor
    pub fn gcd(&self, other: &Self) -> Self {
        let (gcd, _, _) = self.extended_euclidean(other);
        gcd
    }

    /// Inverse modulo another polynomial
    ///
    /// Fails with [`GcmError::NoInverse`] when `self` and `modulus` share a
    /// nontrivial factor, which includes `self` being zero.
    pub fn modular_inverse(&self, modulus: &Self) -> Result<Self, GcmError> {
        let (gcd, s, _) = self.extended_euclidean(modulus);
        if gcd == Self::one() {
            Ok(s)
        } else {
            Err(GcmError::NoInverse)
        }
    }
}

impl fmt::Display for Gf2Poly {
    /// Render as a sum of monomials, highest degree first: `x^7 + x + 1`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for i in (0..=self.degree() as usize).rev() {
            if !self.bit(i) {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            match i {
                0 => write!(f, "1")?,
                1 => write!(f, "x")?,
                _ => write!(f, "x^{i}")?,
            }
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_tracks_highest_bit() {
        assert_eq!(Gf2Poly::zero().degree(), -1);
        assert_eq!(Gf2Poly::one().degree(), 0);
        assert_eq!(Gf2Poly::from_int(0b1011).degree(), 3);
        assert_eq!(Gf2Poly::x_to(128).degree(), 128);
    }

    #[test]
    fn addition_is_xor() {
        let a = Gf2Poly::from_int(0b1100);
        let b = Gf2Poly::from_int(0b1010);
        assert_eq!(a.add(&b), Gf2Poly::from_int(0b0110));
        assert_eq!(a.add(&a), Gf2Poly::zero());
    }

    #[test]
    fn multiply_small_products() {
        // (x + 1)^2 = x^2 + 1 in characteristic 2
        let x_plus_1 = Gf2Poly::from_int(0b11);
        assert_eq!(x_plus_1.multiply(&x_plus_1), Gf2Poly::from_int(0b101));
        // (x^2 + x)(x + 1) = x^3 + x
        let a = Gf2Poly::from_int(0b110);
        assert_eq!(a.multiply(&x_plus_1), Gf2Poly::from_int(0b1010));
        assert_eq!(a.multiply(&Gf2Poly::zero()), Gf2Poly::zero());
    }

    #[test]
    fn multiply_crosses_limb_boundary() {
        let a = Gf2Poly::x_to(63);
        let b = Gf2Poly::x_to(65);
        assert_eq!(a.multiply(&b), Gf2Poly::x_to(128));
    }

    #[test]
    fn divmod_satisfies_division_identity() {
        let a = Gf2Poly::from_int(0b100110101);
        let b = Gf2Poly::from_int(0b1101);
        let (q, r) = a.divmod(&b);
        assert!(r.degree() < b.degree());
        assert_eq!(q.multiply(&b).add(&r), a);
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn divmod_by_zero_panics() {
        let _ = Gf2Poly::one().divmod(&Gf2Poly::zero());
    }

    #[test]
    fn modmul_matches_multiply_then_reduce() {
        let m = Gf2Poly::from_int(0b10011); // x^4 + x + 1
        let a = Gf2Poly::from_int(0b1011);
        let b = Gf2Poly::from_int(0b1101);
        assert_eq!(a.modmul(&b, &m), a.multiply(&b).rem(&m));
        // Oversized operands are reduced first
        let big = Gf2Poly::from_int(0b1100101);
        assert_eq!(big.modmul(&b, &m), big.multiply(&b).rem(&m));
    }

    #[test]
    fn pow_zero_exponent_is_one() {
        let a = Gf2Poly::from_int(0b1101);
        assert_eq!(a.pow(0, None), Gf2Poly::one());
        let m = Gf2Poly::from_int(0b10011);
        assert_eq!(a.pow(0, Some(&m)), Gf2Poly::one());
    }

    #[test]
    fn pow_matches_repeated_multiply() {
        let a = Gf2Poly::from_int(0b1101);
        assert_eq!(a.pow(3, None), a.multiply(&a).multiply(&a));
        let m = Gf2Poly::from_int(0b10011);
        assert_eq!(a.pow(3, Some(&m)), a.modmul(&a, &m).modmul(&a, &m));
    }

    #[test]
    fn extended_euclidean_bezout_identity() {
        let a = Gf2Poly::from_int(0b101101);
        let b = Gf2Poly::from_int(0b10011);
        let (gcd, s, t) = a.extended_euclidean(&b);
        assert_eq!(a.multiply(&s).add(&b.multiply(&t)), gcd);
    }

    #[test]
    fn modular_inverse_round_trips() {
        // x^4 + x + 1 is irreducible over GF(2)
        let m = Gf2Poly::from_int(0b10011);
        let a = Gf2Poly::from_int(0b0110);
        let inv = a.modular_inverse(&m).unwrap();
        assert_eq!(a.modmul(&inv, &m), Gf2Poly::one());
    }

    #[test]
    fn modular_inverse_of_zero_fails() {
        let m = Gf2Poly::from_int(0b10011);
        assert_eq!(
            Gf2Poly::zero().modular_inverse(&m),
            Err(GcmError::NoInverse)
        );
    }

    #[test]
    fn display_renders_monomials() {
        assert_eq!(Gf2Poly::zero().to_string(), "0");
        assert_eq!(Gf2Poly::from_int(0b10000111).to_string(), "x^7 + x^2 + x + 1");
    }
}

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Mul;
use std::ops::MulAssign;
use std::ops::Neg;
use std::ops::Sub;

use arbitrary::Arbitrary;
use get_size2::GetSize;
use itertools::EitherOrBoth;
use itertools::Itertools;
use num_traits::One;
use num_traits::Zero;
use serde::Deserialize;
use serde::Serialize;

use crate::error::TellegenError;
use crate::math::traits::Ring;

impl<R: Ring> Zero for Polynomial<R> {
    fn zero() -> Self {
        Self {
            coefficients: vec![],
        }
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl<R: Ring> One for Polynomial<R> {
    fn one() -> Self {
        Self {
            coefficients: vec![R::ONE],
        }
    }

    fn is_one(&self) -> bool {
        self.degree() == 0 && self.coefficients[0].is_one()
    }
}

/// A univariate polynomial with coefficients in a [ring](Ring), in monomial form.
#[derive(Clone, Arbitrary, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Polynomial<R: Ring> {
    /// The polynomial's coefficients, in order of increasing degree. That is, the polynomial's
    /// leading coefficient is the last element of the vector.
    pub coefficients: Vec<R>,
}

impl<R: Ring> Debug for Polynomial<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Polynomial")
            .field("coefficients", &self.coefficients)
            .finish()
    }
}

// Not derived because `PartialEq` is also not derived.
impl<R: Ring> Hash for Polynomial<R> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        let num_significant = usize::try_from(self.degree() + 1).unwrap_or(0);
        self.coefficients[..num_significant].hash(state);
    }
}

impl<R: Ring> GetSize for Polynomial<R> {
    fn get_heap_size(&self) -> usize {
        self.coefficients.get_heap_size()
    }
}

impl<R: Ring> Display for Polynomial<R> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let degree = match self.degree() {
            -1 => return write!(f, "0"),
            d => d as usize,
        };

        for pow in (0..=degree).rev() {
            let coeff = self.coefficients[pow];
            if coeff.is_zero() {
                continue;
            }

            if pow != degree {
                write!(f, " + ")?;
            }
            if !coeff.is_one() || pow == 0 {
                write!(f, "{coeff}")?;
            }
            match pow {
                0 => (),
                1 => write!(f, "x")?,
                _ => write!(f, "x^{pow}")?,
            }
        }

        Ok(())
    }
}

// Manually implemented to correctly handle leading zeros.
impl<R: Ring> PartialEq for Polynomial<R> {
    fn eq(&self, other: &Self) -> bool {
        if self.degree() != other.degree() {
            return false;
        }

        self.coefficients
            .iter()
            .zip(other.coefficients.iter())
            .all(|(x, y)| x == y)
    }
}

impl<R: Ring> Eq for Polynomial<R> {}

impl<R: Ring> Polynomial<R> {
    /// [Karatsuba multiplication](Self::karatsuba_multiply) is slower than
    /// [naïve multiplication](Self::naive_multiply) if either operand has fewer
    /// coefficients than this threshold.
    ///
    /// Tune with the “Naïve” and “Karatsuba” rows of
    /// `cargo bench --bench transposed_multiplication`.
    pub(crate) const KARATSUBA_CUTOFF_THRESHOLD: usize = 32;

    pub const fn new(coefficients: Vec<R>) -> Self {
        Self { coefficients }
    }

    pub fn normalize(&mut self) {
        while self.coefficients.last().is_some_and(Zero::is_zero) {
            self.coefficients.pop();
        }
    }

    pub fn from_constant(constant: R) -> Self {
        Self {
            coefficients: vec![constant],
        }
    }

    /// The monomial `x^n`.
    pub fn x_to_the(n: usize) -> Self {
        let mut coefficients = vec![R::ZERO; n + 1];
        coefficients[n] = R::ONE;
        Self { coefficients }
    }

    pub fn degree(&self) -> isize {
        let mut deg = self.coefficients.len() as isize - 1;
        while deg >= 0 && self.coefficients[deg as usize].is_zero() {
            deg -= 1;
        }

        deg // -1 for the zero polynomial
    }

    /// The coefficient of `x^i`, which is zero beyond the stored coefficients.
    pub fn coefficient(&self, i: usize) -> R {
        self.coefficients.get(i).copied().unwrap_or(R::ZERO)
    }

    /// The first `len` coefficients, padded with zeros if the polynomial has
    /// fewer. Coefficients of `x^len` and above are dropped.
    pub fn padded_coefficients(&self, len: usize) -> Vec<R> {
        let mut coefficients = self.coefficients.iter().copied().take(len).collect_vec();
        coefficients.resize(len, R::ZERO);
        coefficients
    }

    /// The coefficient of the polynomial's term of highest power. `None` if (and only if) `self`
    /// [is zero](Self::is_zero).
    ///
    /// Furthermore, is never `Some(R::ZERO)`.
    pub fn leading_coefficient(&self) -> Option<R> {
        match self.degree() {
            -1 => None,
            n => Some(self.coefficients[n as usize]),
        }
    }

    pub fn is_monic(&self) -> bool {
        self.leading_coefficient().is_some_and(|lc| lc.is_one())
    }

    /// The degree of `self` if it can serve as the modulus of a quotient ring
    /// `R[x]/(self)` in which every algorithm of this crate works.
    ///
    /// # Errors
    ///
    /// Fails if `self` is not monic or is constant.
    pub fn modulus_degree(&self) -> Result<usize, TellegenError> {
        if !self.is_monic() {
            return Err(TellegenError::NotMonic);
        }

        match usize::try_from(self.degree()) {
            Ok(0) | Err(_) => Err(TellegenError::ZeroDegreeModulus),
            Ok(degree) => Ok(degree),
        }
    }

    pub fn evaluate(&self, x: R) -> R {
        let mut acc = R::ZERO;
        for &c in self.coefficients.iter().rev() {
            acc = c + x * acc;
        }

        acc
    }

    pub fn formal_derivative(&self) -> Self {
        // not `enumerate()`ing: `Ring` is trait-bound to `From<u64>` but not `From<usize>`
        let coefficients = (0..)
            .zip(&self.coefficients)
            .map(|(i, &coefficient)| R::from(i) * coefficient)
            .skip(1)
            .collect();

        Self { coefficients }
    }

    pub fn reverse(&self) -> Self {
        let degree = self.degree();
        Self::new(
            self.coefficients
                .iter()
                .take((degree + 1) as usize)
                .copied()
                .rev()
                .collect_vec(),
        )
    }

    /// The reversal `x^(len-1) · self(1/x)` with respect to length `len`, that
    /// is, the first `len` coefficients in reverse order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tellegen::prelude::*;
    /// let f = Polynomial::<Zn<7>>::new(zn_vec![1, 2]);        // 2x + 1
    /// let g = f.reverse_to_length(4);                         // x³ + 2x²
    /// assert_eq!(Polynomial::new(zn_vec![7; 0, 0, 2, 1]), g);
    /// ```
    pub fn reverse_to_length(&self, len: usize) -> Self {
        let mut coefficients = self.padded_coefficients(len);
        coefficients.reverse();
        Self::new(coefficients)
    }

    pub fn shift_coefficients_mut(&mut self, power: usize) {
        self.coefficients.splice(0..0, vec![R::ZERO; power]);
    }

    /// Multiply a polynomial with x^power
    #[must_use]
    pub fn shift_coefficients(&self, power: usize) -> Self {
        let mut coefficients: Vec<R> = self.coefficients.clone();
        coefficients.splice(0..0, vec![R::ZERO; power]);
        Self { coefficients }
    }

    /// `self / x^n`, discarding the remainder.
    ///
    /// The counterpart of [`Self::mod_x_to_the_n`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use tellegen::prelude::*;
    /// let f = Polynomial::<Zn<7>>::new(zn_vec![0, 1, 2, 3, 4]);
    /// let g = f.div_x_to_the_n(2);                            // 4x² + 3x + 2
    /// assert_eq!(Polynomial::new(zn_vec![7; 2, 3, 4]), g);
    /// ```
    pub fn div_x_to_the_n(&self, n: usize) -> Self {
        let start = n.min(self.coefficients.len());
        Self::new(self.coefficients[start..].to_vec())
    }

    /// `self % x^n`
    ///
    /// A special case of [Self::reduce], and faster.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tellegen::prelude::*;
    /// let f = Polynomial::<Zn<7>>::new(zn_vec![0, 1, 2, 3, 4]);
    /// let g = f.mod_x_to_the_n(2);                            // 1x¹ + 0
    /// assert_eq!(Polynomial::new(zn_vec![7; 0, 1]), g);
    /// ```
    pub fn mod_x_to_the_n(&self, n: usize) -> Self {
        let num_coefficients_to_retain = n.min(self.coefficients.len());
        Self::new(self.coefficients[..num_coefficients_to_retain].into())
    }

    /// Multiply a polynomial with a scalar, _i.e._, compute `scalar · self(x)`.
    pub fn scalar_mul_mut(&mut self, scalar: R) {
        for coefficient in &mut self.coefficients {
            *coefficient *= scalar;
        }
    }

    /// Multiply a polynomial with a scalar, _i.e._, compute `scalar · self(x)`.
    #[must_use]
    pub fn scalar_mul(&self, scalar: R) -> Self {
        let new_coeffs = self.coefficients.iter().map(|&c| c * scalar).collect();
        Polynomial::new(new_coeffs)
    }

    /// Multiply `self` by `other`.
    ///
    /// Prefer this over [`self * other`](Self::mul) when only references are
    /// at hand. Chooses the fastest multiplication strategy.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let Ok(degree_lhs) = usize::try_from(self.degree()) else {
            return Self::zero();
        };
        let Ok(degree_rhs) = usize::try_from(other.degree()) else {
            return Self::zero();
        };

        if degree_lhs.min(degree_rhs) < Self::KARATSUBA_CUTOFF_THRESHOLD {
            self.naive_multiply(other)
        } else {
            self.karatsuba_multiply(other)
        }
    }

    /// The product `self · other mod x^n`.
    #[must_use]
    pub fn mul_low(&self, other: &Self, n: usize) -> Self {
        self.mod_x_to_the_n(n)
            .multiply(&other.mod_x_to_the_n(n))
            .mod_x_to_the_n(n)
    }

    /// Use [Self::multiply] instead. Only `pub` to allow benchmarking; not considered part of the
    /// public API.
    #[doc(hidden)]
    pub fn naive_multiply(&self, other: &Self) -> Self {
        let Ok(degree_lhs) = usize::try_from(self.degree()) else {
            return Self::zero();
        };
        let Ok(degree_rhs) = usize::try_from(other.degree()) else {
            return Self::zero();
        };

        let mut product = vec![R::ZERO; degree_lhs + degree_rhs + 1];
        for i in 0..=degree_lhs {
            for j in 0..=degree_rhs {
                product[i + j] += self.coefficients[i] * other.coefficients[j];
            }
        }

        Self::new(product)
    }

    /// Use [Self::multiply] instead. Only `pub` to allow benchmarking; not considered part of the
    /// public API.
    ///
    /// This method is asymptotically faster than [naive multiplication](Self::naive_multiply).
    /// For polynomials of low degree, it is slower.
    ///
    /// The time complexity of this method is in O(n^log₂(3)), where `n` is the larger of the two
    /// degrees. It works over any ring, unlike NTT-based multiplication.
    #[doc(hidden)]
    pub fn karatsuba_multiply(&self, other: &Self) -> Self {
        let Ok(degree_lhs) = usize::try_from(self.degree()) else {
            return Self::zero();
        };
        let Ok(degree_rhs) = usize::try_from(other.degree()) else {
            return Self::zero();
        };

        let lhs = &self.coefficients[..=degree_lhs];
        let rhs = &other.coefficients[..=degree_rhs];
        Self::new(Self::karatsuba(lhs, rhs))
    }

    fn karatsuba(lhs: &[R], rhs: &[R]) -> Vec<R> {
        if lhs.is_empty() || rhs.is_empty() {
            return vec![];
        }
        if lhs.len().min(rhs.len()) < Self::KARATSUBA_CUTOFF_THRESHOLD {
            return Self::schoolbook(lhs, rhs);
        }

        // split: lhs = l0 + l1·x^half, rhs = r0 + r1·x^half
        let half = lhs.len().max(rhs.len()) / 2;
        let (l0, l1) = lhs.split_at(half.min(lhs.len()));
        let (r0, r1) = rhs.split_at(half.min(rhs.len()));

        let z0 = Self::karatsuba(l0, r0);
        let z2 = Self::karatsuba(l1, r1);
        let mut z1 = Self::karatsuba(&Self::add_slices(l0, l1), &Self::add_slices(r0, r1));
        for (z, &c) in z1.iter_mut().zip(&z0) {
            *z -= c;
        }
        for (z, &c) in z1.iter_mut().zip(&z2) {
            *z -= c;
        }

        // Entries beyond the true product's length are zero and get dropped.
        let mut product = vec![R::ZERO; lhs.len() + rhs.len() - 1];
        let summands = [(0, z0), (half, z1), (2 * half, z2)];
        for (offset, summand) in summands {
            for (p, c) in product.iter_mut().skip(offset).zip(summand) {
                *p += c;
            }
        }

        product
    }

    fn schoolbook(lhs: &[R], rhs: &[R]) -> Vec<R> {
        let mut product = vec![R::ZERO; lhs.len() + rhs.len() - 1];
        for (i, &l) in lhs.iter().enumerate() {
            for (j, &r) in rhs.iter().enumerate() {
                product[i + j] += l * r;
            }
        }

        product
    }

    fn add_slices(lhs: &[R], rhs: &[R]) -> Vec<R> {
        lhs.iter()
            .zip_longest(rhs)
            .map(|pair| match pair {
                EitherOrBoth::Both(&l, &r) => l + r,
                EitherOrBoth::Left(&l) => l,
                EitherOrBoth::Right(&r) => r,
            })
            .collect()
    }

    /// Return (quotient, remainder).
    ///
    /// # Errors
    ///
    /// Fails if the `divisor` is zero, or if its leading coefficient is not a
    /// unit of the ring. The latter is impossible over a field.
    pub fn divide(&self, divisor: &Self) -> Result<(Self, Self), TellegenError> {
        let divisor_lc_inv = divisor
            .leading_coefficient()
            .ok_or(TellegenError::DivisionByZero)?
            .try_inverse()
            .ok_or(TellegenError::NotInvertible)?;

        let Ok(quotient_degree) = usize::try_from(self.degree() - divisor.degree()) else {
            // self.degree() < divisor.degree()
            return Ok((Self::zero(), self.to_owned()));
        };

        // quotient is built from back to front, must be reversed later
        let mut rev_quotient = Vec::with_capacity(quotient_degree + 1);
        let mut remainder = self.clone();
        remainder.normalize();

        // The divisor is also iterated back to front.
        // It is normalized manually to avoid it being a `&mut` argument.
        let rev_divisor = divisor.coefficients.iter().rev();
        let normal_rev_divisor = rev_divisor.skip_while(|c| c.is_zero());

        for _ in 0..=quotient_degree {
            let Some(remainder_lc) = remainder.coefficients.pop() else {
                break;
            };
            let quotient_coeff = remainder_lc * divisor_lc_inv;
            rev_quotient.push(quotient_coeff);

            if quotient_coeff.is_zero() {
                continue;
            }

            // don't use `.degree()` to still count leading zeros in intermittent remainders
            let remainder_degree = remainder.coefficients.len().saturating_sub(1);

            // skip divisor's leading coefficient: it has already been dealt with
            for (i, &divisor_coeff) in normal_rev_divisor.clone().skip(1).enumerate() {
                remainder.coefficients[remainder_degree - i] -= quotient_coeff * divisor_coeff;
            }
        }

        rev_quotient.reverse();
        let quotient = Self::new(rev_quotient);

        Ok((quotient, remainder))
    }

    /// Divide (with remainder) and throw away the quotient. Note that the self
    /// object is the numerator and the argument is the denominator (or
    /// modulus).
    pub fn reduce(&self, modulus: &Self) -> Result<Self, TellegenError> {
        if self.degree() < modulus.degree() {
            return Ok(self.clone());
        }

        let (_quotient, remainder) = self.divide(modulus)?;
        Ok(remainder)
    }

    /// `self · other mod modulus`
    pub fn multiply_mod(&self, other: &Self, modulus: &Self) -> Result<Self, TellegenError> {
        self.multiply(other).reduce(modulus)
    }

    /// `self^pow mod modulus`, by square-and-multiply.
    pub fn mod_pow(&self, pow: u64, modulus: &Self) -> Result<Self, TellegenError> {
        let mut acc = Self::one().reduce(modulus)?;
        let base = self.reduce(modulus)?;
        let bit_length = u64::BITS - pow.leading_zeros();
        for i in 0..bit_length {
            acc = acc.multiply_mod(&acc, modulus)?;
            if pow & (1 << (bit_length - 1 - i)) != 0 {
                acc = acc.multiply_mod(&base, modulus)?;
            }
        }

        Ok(acc)
    }

    /// Extended Euclidean algorithm with polynomials. Computes the greatest
    /// common divisor `gcd` as a monic polynomial, as well as the corresponding
    /// Bézout coefficients `a` and `b`, satisfying `gcd = a·x + b·y`
    ///
    /// # Errors
    ///
    /// Fails if some remainder has a leading coefficient that is not a unit,
    /// which can only happen over rings that are not fields.
    ///
    /// # Example
    ///
    /// ```
    /// # use tellegen::prelude::*;
    /// let x = Polynomial::<Zn<17>>::new(zn_vec![1, 0, 1]);
    /// let y = Polynomial::<Zn<17>>::new(zn_vec![1, 1]);
    /// let (gcd, a, b) = Polynomial::xgcd(x.clone(), y.clone()).unwrap();
    /// assert_eq!(gcd, a * x + b * y);
    /// ```
    pub fn xgcd(mut x: Self, mut y: Self) -> Result<(Self, Self, Self), TellegenError> {
        let (mut a_factor, mut a1) = (Self::one(), Self::zero());
        let (mut b_factor, mut b1) = (Self::zero(), Self::one());

        while !y.is_zero() {
            let (quotient, remainder) = x.divide(&y)?;
            let c = a_factor - quotient.multiply(&a1);
            let d = b_factor - quotient.multiply(&b1);

            x = y;
            y = remainder;
            a_factor = a1;
            a1 = c;
            b_factor = b1;
            b1 = d;
        }

        // normalize result to ensure the gcd, _i.e._, `x` has leading coefficient 1
        let lc = x.leading_coefficient().unwrap_or(R::ONE);
        let lc_inv = lc.try_inverse().ok_or(TellegenError::NotInvertible)?;
        let normalize = |mut poly: Self| {
            poly.scalar_mul_mut(lc_inv);
            poly.normalize();
            poly
        };

        let [x, a, b] = [x, a_factor, b_factor].map(normalize);
        Ok((x, a, b))
    }

    /// The multiplicative inverse of `self` in the quotient ring `R[x]/(modulus)`.
    ///
    /// # Errors
    ///
    /// Fails with [`TellegenError::NotInvertible`] if `self` and the modulus
    /// share a common factor.
    pub fn inverse_mod(&self, modulus: &Self) -> Result<Self, TellegenError> {
        let (gcd, a, _) = Self::xgcd(self.reduce(modulus)?, modulus.clone())?;
        if gcd.degree() != 0 {
            return Err(TellegenError::NotInvertible);
        }

        a.reduce(modulus)
    }

    /// Compute a polynomial g(X) from a given polynomial f(X) such that
    /// g(X) * f(X) = 1 mod X^n , where n is the precision.
    ///
    /// In formal terms, g(X) is the approximate multiplicative inverse in
    /// the formal power series ring, where elements obey the same
    /// algebraic rules as polynomials do but can have an infinite number of
    /// coefficients. To represent these elements on a computer, one has to
    /// truncate the coefficient vectors somewhere. The resulting truncation
    /// error is considered "small" when it lives on large powers of X. This
    /// function works by applying Newton's method in this ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use num_traits::One;
    /// # use tellegen::prelude::*;
    /// let precision = 8;
    /// let f = Polynomial::<Zn<101>>::new(zn_vec![42, 1, 2, 3]);
    /// let g = f.formal_power_series_inverse_newton(precision).unwrap();
    /// assert!(g.mul_low(&f, precision).is_one());
    /// ```
    ///
    /// # Errors
    ///
    /// Fails when f(X) is not invertible in the formal power series ring,
    /// _i.e._, when its constant coefficient is not a unit.
    pub fn formal_power_series_inverse_newton(
        &self,
        precision: usize,
    ) -> Result<Self, TellegenError> {
        let constant_inverse = self
            .coefficient(0)
            .try_inverse()
            .ok_or(TellegenError::NotInvertible)?;
        if precision == 0 {
            return Ok(Self::zero());
        }

        let two = Self::from_constant(R::ONE + R::ONE);
        let mut f = Self::from_constant(constant_inverse);
        let mut current_precision = 1;
        while current_precision < precision {
            current_precision = (2 * current_precision).min(precision);
            let error = self.mul_low(&f, current_precision);
            f = f.mul_low(&(two.clone() - error), current_precision);
        }

        Ok(f)
    }

    /// Whether `self` has no repeated factor, _i.e._, whether it is coprime to
    /// its formal derivative.
    ///
    /// Over a perfect field, this is equivalent to `self` having no repeated
    /// root in any extension field.
    pub fn is_squarefree(&self) -> Result<bool, TellegenError> {
        if self.is_zero() {
            return Ok(false);
        }

        let (gcd, _, _) = Self::xgcd(self.clone(), self.formal_derivative())?;
        Ok(gcd.degree() == 0)
    }
}

impl<const N: usize, R, E> From<[E; N]> for Polynomial<R>
where
    R: Ring,
    E: Into<R>,
{
    fn from(coefficients: [E; N]) -> Self {
        Self::new(coefficients.into_iter().map(|x| x.into()).collect())
    }
}

impl<R, E> From<Vec<E>> for Polynomial<R>
where
    R: Ring,
    E: Into<R>,
{
    fn from(coefficients: Vec<E>) -> Self {
        Self::new(coefficients.into_iter().map(|c| c.into()).collect())
    }
}

impl<R: Ring> Add for Polynomial<R> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let summed: Vec<R> = self
            .coefficients
            .into_iter()
            .zip_longest(other.coefficients)
            .map(|a| match a {
                EitherOrBoth::Both(l, r) => l + r,
                EitherOrBoth::Left(l) => l,
                EitherOrBoth::Right(r) => r,
            })
            .collect();

        Self {
            coefficients: summed,
        }
    }
}

impl<R: Ring> AddAssign for Polynomial<R> {
    fn add_assign(&mut self, rhs: Self) {
        let rhs_len = rhs.coefficients.len();
        let self_len = self.coefficients.len();
        for i in 0..std::cmp::min(self_len, rhs_len) {
            self.coefficients[i] += rhs.coefficients[i];
        }

        if rhs_len > self_len {
            self.coefficients
                .extend_from_slice(&rhs.coefficients[self_len..]);
        }
    }
}

impl<R: Ring> Sub for Polynomial<R> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        let coefficients = self
            .coefficients
            .into_iter()
            .zip_longest(other.coefficients)
            .map(|a| match a {
                EitherOrBoth::Both(l, r) => l - r,
                EitherOrBoth::Left(l) => l,
                EitherOrBoth::Right(r) => -r,
            })
            .collect();

        Self { coefficients }
    }
}

impl<R: Ring> Mul for Polynomial<R> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.multiply(&other)
    }
}

impl<R: Ring> MulAssign<R> for Polynomial<R> {
    fn mul_assign(&mut self, scalar: R) {
        self.scalar_mul_mut(scalar);
    }
}

impl<R: Ring> Neg for Polynomial<R> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.scalar_mul_mut(-R::ONE);
        self
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod test_polynomials {
    use num_traits::ConstOne;
    use num_traits::ConstZero;
    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;
    use test_strategy::proptest;

    use super::*;
    use crate::math::zn::Zn;
    use crate::zn_vec;

    /// A prime large enough that random polynomials practically never have
    /// unexpected common factors.
    const P: u64 = 1_000_000_007;

    type F = Zn<P>;
    type Z12 = Zn<12>;

    impl<const N: u64> proptest::arbitrary::Arbitrary for Polynomial<Zn<N>> {
        type Parameters = ();

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            arb().boxed()
        }

        type Strategy = BoxedStrategy<Self>;
    }

    fn poly(coefficients: &[i64]) -> Polynomial<F> {
        Polynomial::new(coefficients.iter().map(|&c| F::from(c)).collect())
    }

    fn monic_polynomial(degree: usize) -> impl Strategy<Value = Polynomial<F>> {
        vec(arb::<F>(), degree).prop_map(|mut coefficients| {
            coefficients.push(F::ONE);
            Polynomial::new(coefficients)
        })
    }

    #[test]
    fn polynomial_can_be_debug_printed() {
        let polynomial = poly(&[1, 2, 3]);
        println!("{polynomial:?}");
    }

    #[test]
    fn polynomial_display_test() {
        assert_eq!("0", poly(&[]).to_string());
        assert_eq!("0", poly(&[0, 0]).to_string());
        assert_eq!("1", poly(&[1]).to_string());
        assert_eq!("x + 2", poly(&[2, 1]).to_string());
        assert_eq!("3x^2 + 1", poly(&[1, 0, 3, 0]).to_string());
    }

    #[proptest]
    fn spurious_leading_zeros_dont_affect_equality(
        polynomial: Polynomial<F>,
        #[strategy(0usize..30)] num_leading_zeros: usize,
    ) {
        let mut coefficients = polynomial.coefficients.clone();
        coefficients.extend(vec![F::ZERO; num_leading_zeros]);
        let padded = Polynomial::new(coefficients);
        prop_assert_eq!(&polynomial, &padded);

        let hash = |p: &Polynomial<F>| {
            use std::hash::Hasher;
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            p.hash(&mut hasher);
            hasher.finish()
        };
        prop_assert_eq!(hash(&polynomial), hash(&padded));
    }

    #[proptest]
    fn normalizing_removes_spurious_leading_zeros(
        #[filter(!#polynomial.is_zero())] polynomial: Polynomial<F>,
        #[strategy(0usize..30)] num_leading_zeros: usize,
    ) {
        let mut padded = polynomial.clone();
        padded.coefficients.extend(vec![F::ZERO; num_leading_zeros]);
        padded.normalize();
        prop_assert_eq!(polynomial.degree() + 1, padded.coefficients.len() as isize);
    }

    #[proptest]
    fn leading_coefficient_of_non_zero_polynomial_is_some(
        #[filter(!#polynomial.is_zero())] polynomial: Polynomial<F>,
    ) {
        let leading_coefficient = polynomial.leading_coefficient().unwrap();
        prop_assert!(!leading_coefficient.is_zero());
    }

    #[test]
    fn leading_coefficient_of_zero_polynomial_is_none() {
        assert!(poly(&[0, 0, 0]).leading_coefficient().is_none());
        assert!(!poly(&[0, 0, 0]).is_monic());
    }

    #[proptest]
    fn polynomial_multiplication_is_commutative(a: Polynomial<F>, b: Polynomial<F>) {
        prop_assert_eq!(a.multiply(&b), b.multiply(&a));
    }

    #[proptest]
    fn polynomial_multiplication_is_associative(
        a: Polynomial<F>,
        b: Polynomial<F>,
        c: Polynomial<F>,
    ) {
        prop_assert_eq!(a.multiply(&b).multiply(&c), a.multiply(&b.multiply(&c)));
    }

    #[proptest]
    fn polynomial_multiplication_is_distributive(
        a: Polynomial<F>,
        b: Polynomial<F>,
        c: Polynomial<F>,
    ) {
        let lhs = a.clone() * (b.clone() + c.clone());
        let rhs = a.clone() * b + a * c;
        prop_assert_eq!(lhs, rhs);
    }

    #[proptest]
    fn polynomial_subtraction_of_self_is_zero(a: Polynomial<F>) {
        prop_assert!((a.clone() - a).is_zero());
    }

    #[proptest(cases = 50)]
    fn karatsuba_and_naive_multiplication_are_equivalent(
        #[strategy(vec(arb(), 0..200))] a: Vec<F>,
        #[strategy(vec(arb(), 0..200))] b: Vec<F>,
    ) {
        let a = Polynomial::new(a);
        let b = Polynomial::new(b);
        prop_assert_eq!(a.naive_multiply(&b), a.karatsuba_multiply(&b));
    }

    #[test]
    fn karatsuba_handles_very_unbalanced_operands() {
        let a = Polynomial::new((0..40).map(F::from).collect());
        let b = Polynomial::new((0..777).map(|i: u64| F::from(i * i + 1)).collect());
        assert_eq!(a.naive_multiply(&b), a.karatsuba_multiply(&b));
        assert_eq!(b.naive_multiply(&a), b.karatsuba_multiply(&a));
    }

    #[proptest]
    fn mul_low_is_truncated_product(
        a: Polynomial<F>,
        b: Polynomial<F>,
        #[strategy(0usize..40)] n: usize,
    ) {
        prop_assert_eq!(a.multiply(&b).mod_x_to_the_n(n), a.mul_low(&b, n));
    }

    #[proptest]
    fn division_satisfies_euclidean_identity(
        a: Polynomial<F>,
        #[filter(!#b.is_zero())] b: Polynomial<F>,
    ) {
        let (quotient, remainder) = a.divide(&b).unwrap();
        prop_assert!(remainder.degree() < b.degree());
        prop_assert_eq!(a, quotient * b + remainder);
    }

    #[test]
    fn dividing_by_zero_fails() {
        let err = poly(&[1, 2]).divide(&poly(&[0])).unwrap_err();
        assert_eq!(TellegenError::DivisionByZero, err);
    }

    #[test]
    fn dividing_by_polynomial_with_non_unit_leading_coefficient_fails() {
        let numerator = Polynomial::<Z12>::new(vec![Z12::new(1), Z12::new(0), Z12::new(1)]);
        let denominator = Polynomial::<Z12>::new(vec![Z12::new(1), Z12::new(2)]);
        let err = numerator.divide(&denominator).unwrap_err();
        assert_eq!(TellegenError::NotInvertible, err);
    }

    #[test]
    fn leading_zeros_dont_affect_polynomial_division() {
        let numerator = poly(&[1, 2, 3, 4, 0, 0]);
        let denominator = poly(&[1, 1, 0]);
        let (quotient, remainder) = numerator.divide(&denominator).unwrap();
        let (quotient_normalized, remainder_normalized) =
            poly(&[1, 2, 3, 4]).divide(&poly(&[1, 1])).unwrap();
        assert_eq!(quotient_normalized, quotient);
        assert_eq!(remainder_normalized, remainder);
    }

    #[proptest]
    fn xgcd_computes_bezout_coefficients(a: Polynomial<F>, b: Polynomial<F>) {
        let (gcd, s, t) = Polynomial::xgcd(a.clone(), b.clone()).unwrap();
        prop_assert_eq!(&gcd, &(s * a.clone() + t * b.clone()));
        if !gcd.is_zero() {
            prop_assert!(gcd.is_monic());
            prop_assert!(a.reduce(&gcd).unwrap().is_zero());
            prop_assert!(b.reduce(&gcd).unwrap().is_zero());
        }
    }

    #[proptest]
    fn inverse_mod_is_inverse(
        #[strategy(monic_polynomial(5))] modulus: Polynomial<F>,
        #[filter(!#a.reduce(&#modulus).unwrap().is_zero())] a: Polynomial<F>,
    ) {
        // with overwhelming probability, `a` is coprime to the modulus
        let Ok(inverse) = a.inverse_mod(&modulus) else {
            return Ok(());
        };
        prop_assert!(a.multiply_mod(&inverse, &modulus).unwrap().is_one());
    }

    #[test]
    fn non_coprime_polynomial_has_no_inverse_mod() {
        let modulus = poly(&[-1, 0, 1]); // (x - 1)(x + 1)
        let a = poly(&[1, 1]);
        assert_eq!(Err(TellegenError::NotInvertible), a.inverse_mod(&modulus));
    }

    #[proptest]
    fn formal_power_series_inverse_is_inverse(
        #[filter(!#f.coefficient(0).is_zero())] f: Polynomial<F>,
        #[strategy(0usize..70)] precision: usize,
    ) {
        let g = f.formal_power_series_inverse_newton(precision).unwrap();
        let product = g.mul_low(&f, precision);
        prop_assert_eq!(Polynomial::one().mod_x_to_the_n(precision), product);
    }

    #[test]
    fn formal_power_series_inverse_needs_unit_constant_term() {
        let f = poly(&[0, 1]);
        assert_eq!(
            Err(TellegenError::NotInvertible),
            f.formal_power_series_inverse_newton(4)
        );
    }

    #[proptest]
    fn mod_pow_agrees_with_repeated_multiplication(
        #[strategy(monic_polynomial(4))] modulus: Polynomial<F>,
        base: Polynomial<F>,
        #[strategy(0u64..20)] exponent: u64,
    ) {
        let mut expected = Polynomial::one();
        for _ in 0..exponent {
            expected = expected.multiply_mod(&base, &modulus).unwrap();
        }
        prop_assert_eq!(expected, base.mod_pow(exponent, &modulus).unwrap());
    }

    #[test]
    fn only_monic_non_constant_polynomials_are_moduli() {
        assert_eq!(Ok(2), poly(&[1, 0, 1]).modulus_degree());
        assert_eq!(Ok(1), poly(&[5, 1, 0, 0]).modulus_degree());
        assert_eq!(Err(TellegenError::NotMonic), poly(&[1, 2]).modulus_degree());
        assert_eq!(Err(TellegenError::NotMonic), poly(&[]).modulus_degree());
        assert_eq!(
            Err(TellegenError::ZeroDegreeModulus),
            poly(&[1]).modulus_degree()
        );
    }

    #[test]
    fn formal_derivative_of_monomials() {
        let f = poly(&[5, 3, 0, 2]); // 2x³ + 3x + 5
        assert_eq!(poly(&[3, 0, 6]), f.formal_derivative());
        assert!(poly(&[7]).formal_derivative().is_zero());
    }

    #[test]
    fn squarefreeness_is_detected() {
        assert!(poly(&[1, 0, 1]).is_squarefree().unwrap());
        assert!(!poly(&[1, 2, 1]).is_squarefree().unwrap());
        assert!(!poly(&[]).is_squarefree().unwrap());

        // x^5 - 1 = (x - 1)^5 in characteristic 5
        let f = Polynomial::<Zn<5>>::new(zn_vec![-1, 0, 0, 0, 0, 1]);
        assert!(!f.is_squarefree().unwrap());
    }

    #[proptest]
    fn reversing_to_length_twice_is_identity(
        #[strategy(vec(arb(), 0..20))] coefficients: Vec<F>,
    ) {
        let len = coefficients.len();
        let f = Polynomial::new(coefficients);
        prop_assert_eq!(&f, &f.reverse_to_length(len).reverse_to_length(len));
    }

    #[proptest]
    fn shifting_down_undoes_shifting_up(a: Polynomial<F>, #[strategy(0usize..30)] n: usize) {
        prop_assert_eq!(&a, &a.shift_coefficients(n).div_x_to_the_n(n));
    }

    #[proptest]
    fn splitting_at_a_power_of_x_recombines(a: Polynomial<F>, #[strategy(0usize..30)] n: usize) {
        let low = a.mod_x_to_the_n(n);
        let high = a.div_x_to_the_n(n).shift_coefficients(n);
        prop_assert_eq!(a, low + high);
    }

    #[proptest]
    fn evaluation_is_ring_homomorphism(a: Polynomial<F>, b: Polynomial<F>, x: F) {
        prop_assert_eq!(a.evaluate(x) * b.evaluate(x), a.multiply(&b).evaluate(x));
        prop_assert_eq!(a.evaluate(x) + b.evaluate(x), (a + b).evaluate(x));
    }

    #[test]
    fn padded_coefficients_pad_and_truncate() {
        let f = poly(&[1, 2, 3]);
        let padded: Vec<F> = zn_vec![1, 2, 3, 0, 0];
        let truncated: Vec<F> = zn_vec![1, 2];
        assert_eq!(padded, f.padded_coefficients(5));
        assert_eq!(truncated, f.padded_coefficients(2));
        assert_eq!(F::ZERO, f.coefficient(10));
    }

    #[proptest]
    fn serialization_and_deserialization_to_and_from_json_is_identity(a: Polynomial<F>) {
        let serialized = serde_json::to_string(&a).unwrap();
        let deserialized: Polynomial<F> = serde_json::from_str(&serialized).unwrap();
        prop_assert_eq!(a, deserialized);
    }

    #[proptest]
    fn heap_size_accounts_for_all_coefficients(a: Polynomial<F>) {
        prop_assert_eq!(8 * a.coefficients.capacity(), a.get_heap_size());
    }
}

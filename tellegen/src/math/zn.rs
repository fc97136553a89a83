use std::fmt;
use std::fmt::Formatter;
use std::hash::Hash;
use std::iter::Product;
use std::iter::Sum;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Mul;
use std::ops::MulAssign;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;

use arbitrary::Arbitrary;
use arbitrary::Unstructured;
use get_size2::GetSize;
use num_traits::ConstOne;
use num_traits::ConstZero;
use num_traits::One;
use num_traits::Zero;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::StandardUniform;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::math::traits::Inverse;
use crate::math::traits::Ring;

/// Element of the residue ring ℤ/Nℤ, in canonical representation `0..N`.
///
/// The ring is a field if and only if `N` is prime. For composite `N`, the
/// elements sharing a factor with `N` have no [inverse](Inverse::try_inverse),
/// which is what makes the ring useful for exercising the failure paths of
/// algorithms that assume a field.
#[derive(Copy, Clone, Default, Hash, PartialEq, Eq, GetSize)]
#[repr(transparent)]
pub struct Zn<const N: u64>(u64);

/// Simplifies constructing vectors of [residue ring elements][Zn].
///
/// The modulus is inferred from the context, or given explicitly as the first
/// argument.
///
/// # Examples
///
/// ```
/// # use tellegen::prelude::*;
/// let a: Vec<Zn<11>> = zn_vec![1, 2, -1];
/// let b = zn_vec![11; 1, 2, 10];
/// assert_eq!(a, b);
/// ```
#[macro_export]
macro_rules! zn_vec {
    ($n:literal; $($b:expr),* $(,)?) => {
        vec![$($crate::math::zn::Zn::<$n>::from($b as i64)),*]
    };
    ($($b:expr),* $(,)?) => {
        vec![$($crate::math::zn::Zn::from($b as i64)),*]
    };
}

impl<const N: u64> fmt::Debug for Zn<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Zn").field(&self.0).finish()
    }
}

impl<const N: u64> fmt::Display for Zn<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'a, const N: u64> Arbitrary<'a> for Zn<N> {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        u.arbitrary().map(Zn::new)
    }
}

impl<const N: u64> Serialize for Zn<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value().serialize(serializer)
    }
}

impl<'de, const N: u64> Deserialize<'de> for Zn<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::new(u64::deserialize(deserializer)?))
    }
}

impl<const N: u64> Sum for Zn<N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |a, b| a + b)
    }
}

impl<const N: u64> Product for Zn<N> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |a, b| a * b)
    }
}

impl<const N: u64> Zn<N> {
    /// The modulus `N`.
    pub const MODULUS: u64 = {
        assert!(N > 1, "the residue ring needs a modulus of at least 2");
        N
    };

    pub const MAX: u64 = Self::MODULUS - 1;

    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value % Self::MODULUS)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    #[must_use]
    #[inline]
    pub const fn mod_pow(&self, exp: u64) -> Self {
        let mut acc = 1 % Self::MODULUS;
        let bit_length = u64::BITS - exp.leading_zeros();
        let mut i = 0;
        while i < bit_length {
            acc = Self::mul_reduce(acc, acc);
            if exp & (1 << (bit_length - 1 - i)) != 0 {
                acc = Self::mul_reduce(acc, self.0);
            }
            i += 1;
        }

        Self(acc)
    }

    #[inline(always)]
    const fn mul_reduce(lhs: u64, rhs: u64) -> u64 {
        ((lhs as u128 * rhs as u128) % N as u128) as u64
    }
}

macro_rules! impl_from_unsigned_int_for_zn {
    ($($t:ident),+ $(,)?) => {$(
        impl<const N: u64> From<$t> for Zn<N> {
            fn from(value: $t) -> Self {
                Self::new(u64::from(value))
            }
        }
    )+};
}

impl_from_unsigned_int_for_zn!(u8, u16, u32, u64);

impl<const N: u64> From<usize> for Zn<N> {
    fn from(value: usize) -> Self {
        // `usize` is at most 64 bits wide on every supported platform
        Self::new(value as u64)
    }
}

impl<const N: u64> From<i64> for Zn<N> {
    fn from(value: i64) -> Self {
        let reduced = i128::from(value).rem_euclid(i128::from(N));
        Self(reduced as u64)
    }
}

impl<const N: u64> From<i32> for Zn<N> {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl<const N: u64> From<Zn<N>> for u64 {
    fn from(elem: Zn<N>) -> Self {
        elem.value()
    }
}

impl<const N: u64> Inverse for Zn<N> {
    /// Extended Euclidean algorithm on the representative and the modulus.
    fn try_inverse(&self) -> Option<Self> {
        let (mut old_r, mut r) = (i128::from(self.0), i128::from(N));
        let (mut old_s, mut s) = (1_i128, 0_i128);
        while r != 0 {
            let quotient = old_r / r;
            (old_r, r) = (r, old_r - quotient * r);
            (old_s, s) = (s, old_s - quotient * s);
        }

        // old_r is gcd(self, N)
        (old_r == 1).then(|| Self(old_s.rem_euclid(i128::from(N)) as u64))
    }
}

impl<const N: u64> Distribution<Zn<N>> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Zn<N> {
        Zn::new(rng.random_range(0..=Zn::<N>::MAX))
    }
}

impl<const N: u64> Ring for Zn<N> {}

impl<const N: u64> Zero for Zn<N> {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const N: u64> ConstZero for Zn<N> {
    const ZERO: Self = Self::new(0);
}

impl<const N: u64> One for Zn<N> {
    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn is_one(&self) -> bool {
        self == &Self::ONE
    }
}

impl<const N: u64> ConstOne for Zn<N> {
    const ONE: Self = Self::new(1);
}

impl<const N: u64> Add for Zn<N> {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        // Compute a + b = a - (N - b) to avoid overflowing u64.
        let (x1, c1) = self.0.overflowing_sub(N - rhs.0);
        if c1 {
            Self(x1.wrapping_add(N))
        } else {
            Self(x1)
        }
    }
}

impl<const N: u64> AddAssign for Zn<N> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl<const N: u64> SubAssign for Zn<N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs
    }
}

impl<const N: u64> MulAssign for Zn<N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const N: u64> Mul for Zn<N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(Self::mul_reduce(self.0, rhs.0))
    }
}

impl<const N: u64> Neg for Zn<N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl<const N: u64> Sub for Zn<N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let (x1, c1) = self.0.overflowing_sub(rhs.0);
        if c1 {
            Self(x1.wrapping_add(N))
        } else {
            Self(x1)
        }
    }
}

use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Mul;
use std::ops::MulAssign;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;

use get_size2::GetSize;
use num_traits::ConstOne;
use num_traits::ConstZero;
use num_traits::Zero;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub trait Inverse
where
    Self: Sized + Zero,
{
    /// The multiplicative inverse: `a * a.try_inverse().unwrap() == 1`, or `None`
    /// if `self` is not a unit. In a field, only zero is not a unit.
    fn try_inverse(&self) -> Option<Self>;

    fn is_unit(&self) -> bool {
        self.try_inverse().is_some()
    }
}

/// The capabilities every coefficient ring must provide: addition, subtraction,
/// multiplication, negation, equality, zero, one, and inversion where
/// possible.
///
/// Polynomials, matrices, and all transposed algorithms are generic over this
/// trait. Two operands belong to the same ring if and only if they have the
/// same type.
pub trait Ring:
    Copy
    + Debug
    + Display
    + Eq
    + Serialize
    + DeserializeOwned
    + Hash
    + GetSize
    + ConstZero
    + ConstOne
    + Add<Output = Self>
    + Mul<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + MulAssign
    + SubAssign
    + Inverse
    + From<u64>
    + Send
    + Sync
{
}

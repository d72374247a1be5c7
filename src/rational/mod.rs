//! Exact rational numbers over `rug::Integer`
//!
//! A `Rational` is always kept in canonical form: the denominator is
//! positive, numerator and denominator share no common factor, and zero is
//! stored as `0/1`. Every operation returns a fresh, reduced value.

mod convert;

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use rug::{ops::Pow, Complete, Integer};

use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct Rational {
    numer: Integer,
    denom: Integer,
}

impl Rational {
    /// Validates and reduces an externally supplied pair.
    pub fn new(numer: impl Into<Integer>, denom: impl Into<Integer>) -> Result<Self> {
        let denom = denom.into();
        if denom == 0 {
            return Err(Error::DivideByZero);
        }

        Ok(Self::normalized(numer.into(), denom))
    }

    /// `whole + numer / denom`
    pub fn from_mixed(
        whole: impl Into<Integer>,
        numer: impl Into<Integer>,
        denom: impl Into<Integer>,
    ) -> Result<Self> {
        let (mut numer, mut denom) = (numer.into(), denom.into());
        if denom == 0 {
            return Err(Error::DivideByZero);
        }
        if denom < 0 {
            numer = -numer;
            denom = -denom;
        }

        let whole: Integer = whole.into();
        numer += whole * &denom;
        Ok(Self::reduced(numer, denom))
    }

    pub fn from_integer(n: impl Into<Integer>) -> Self {
        Self {
            numer: n.into(),
            denom: Integer::from(1),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    pub fn one() -> Self {
        Self::from_integer(1)
    }

    /// Moves the sign onto the numerator, then reduces. `denom` must be non-zero.
    fn normalized(numer: Integer, denom: Integer) -> Self {
        if denom < 0 {
            Self::reduced(-numer, -denom)
        } else {
            Self::reduced(numer, denom)
        }
    }

    /// Divides out the gcd. `denom` must be positive.
    fn reduced(mut numer: Integer, mut denom: Integer) -> Self {
        if numer == 0 {
            return Self::zero();
        }

        let gcd = Integer::from(numer.gcd_ref(&denom));
        if gcd != 1 {
            numer.div_exact_mut(&gcd);
            denom.div_exact_mut(&gcd);
        }

        Self { numer, denom }
    }

    pub fn numer(&self) -> &Integer {
        &self.numer
    }

    pub fn denom(&self) -> &Integer {
        &self.denom
    }

    pub fn into_numer_denom(self) -> (Integer, Integer) {
        (self.numer, self.denom)
    }

    pub fn is_zero(&self) -> bool {
        self.numer == 0
    }

    pub fn is_integer(&self) -> bool {
        self.denom == 1
    }

    /// -1, 0 or 1
    pub fn signum(&self) -> i32 {
        match self.numer.cmp0() {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            numer: self.numer.clone().abs(),
            denom: self.denom.clone(),
        }
    }

    fn add_ref(&self, rhs: &Self) -> Self {
        let ad = (&self.numer * &rhs.denom).complete();
        let bc = (&rhs.numer * &self.denom).complete();
        let bd = (&self.denom * &rhs.denom).complete();

        Self::reduced(ad + bc, bd)
    }

    fn sub_ref(&self, rhs: &Self) -> Self {
        let ad = (&self.numer * &rhs.denom).complete();
        let bc = (&rhs.numer * &self.denom).complete();
        let bd = (&self.denom * &rhs.denom).complete();

        Self::reduced(ad - bc, bd)
    }

    fn mul_ref(&self, rhs: &Self) -> Self {
        let ac = (&self.numer * &rhs.numer).complete();
        let bd = (&self.denom * &rhs.denom).complete();

        Self::reduced(ac, bd)
    }

    fn neg_ref(&self) -> Self {
        Self {
            numer: (-&self.numer).complete(),
            denom: self.denom.clone(),
        }
    }

    pub fn try_div(&self, rhs: &Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivideByZero);
        }

        let ad = (&self.numer * &rhs.denom).complete();
        let bc = (&self.denom * &rhs.numer).complete();

        Ok(Self::normalized(ad, bc))
    }

    /// Remainder of truncating division; the sign follows `self`.
    pub fn try_rem(&self, rhs: &Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivideByZero);
        }

        let ad = (&self.numer * &rhs.denom).complete();
        let bc = (&self.denom * &rhs.numer).complete();
        let bd = (&self.denom * &rhs.denom).complete();

        Ok(Self::reduced(ad % bc, bd))
    }

    /// `(self / rhs, self % rhs)` from one set of cross products.
    pub fn div_rem(&self, rhs: &Self) -> Result<(Self, Self)> {
        if rhs.is_zero() {
            return Err(Error::DivideByZero);
        }

        let ad = (&self.numer * &rhs.denom).complete();
        let bc = (&self.denom * &rhs.numer).complete();
        let bd = (&self.denom * &rhs.denom).complete();

        let rem = (&ad % &bc).complete();
        Ok((Self::normalized(ad, bc), Self::reduced(rem, bd)))
    }

    pub fn recip(&self) -> Result<Self> {
        match self.numer.cmp0() {
            Ordering::Equal => Err(Error::DivideByZero),
            Ordering::Less => Ok(Self {
                numer: (-&self.denom).complete(),
                denom: (-&self.numer).complete(),
            }),
            Ordering::Greater => Ok(Self {
                numer: self.denom.clone(),
                denom: self.numer.clone(),
            }),
        }
    }

    /// Raises to an integer power. `x^0` is 1 for every `x`, including zero.
    pub fn pow(&self, exponent: &Integer) -> Result<Self> {
        let base = match exponent.cmp0() {
            Ordering::Equal => return Ok(Self::one()),
            Ordering::Greater => self.clone(),
            Ordering::Less if self.is_zero() => {
                return Err(Error::InvalidArgument(
                    "zero raised to a negative power".to_string(),
                ))
            }
            Ordering::Less => self.recip()?,
        };
        let exponent = exponent.clone().abs();

        // 0, 1 and -1 stay bounded however large the exponent
        if base.is_integer() && base.numer.significant_bits() <= 1 {
            let numer = if base.numer < 0 && exponent.is_even() {
                Integer::from(1)
            } else {
                base.numer
            };
            return Ok(Self::from_integer(numer));
        }

        let exponent = exponent.to_u32().ok_or(Error::Overflow("u32 exponent"))?;
        let (numer, denom) = base.into_numer_denom();

        Ok(Self::reduced(numer.pow(exponent), denom.pow(exponent)))
    }

    /// Quotient of the numerator by the denominator, truncated toward zero.
    pub fn whole_part(&self) -> Integer {
        (&self.numer / &self.denom).complete()
    }

    /// `self - whole_part()`, carrying the sign of `self`.
    pub fn fraction_part(&self) -> Self {
        Self::reduced((&self.numer % &self.denom).complete(), self.denom.clone())
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rational {}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let ad = (&self.numer * &other.denom).complete();
        let cb = (&other.numer * &self.denom).complete();
        ad.cmp(&cb)
    }
}

impl PartialEq<Integer> for Rational {
    fn eq(&self, other: &Integer) -> bool {
        self.numer == (other * &self.denom).complete()
    }
}

impl PartialEq<i64> for Rational {
    fn eq(&self, other: &i64) -> bool {
        self.numer == (&self.denom * *other).complete()
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

macro_rules! binary_op {
    ($Trait:ident, $method:ident, $imp:ident) => {
        impl $Trait<&Rational> for &Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                self.$imp(rhs)
            }
        }

        impl $Trait<Rational> for &Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                self.$imp(&rhs)
            }
        }

        impl $Trait<&Rational> for Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                self.$imp(rhs)
            }
        }

        impl $Trait<Rational> for Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                self.$imp(&rhs)
            }
        }
    };
}

binary_op!(Add, add, add_ref);
binary_op!(Sub, sub, sub_ref);
binary_op!(Mul, mul, mul_ref);

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        self.neg_ref()
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(mut self) -> Rational {
        self.numer = -self.numer;
        self
    }
}

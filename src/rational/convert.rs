use rug::{Complete, Integer};

use super::Rational;
use crate::decimal::Decimal;
use crate::error::{Error, Result};

/// Integers up to 2^53 in magnitude convert to `f64` exactly.
const F64_EXACT_BITS: u32 = f64::MANTISSA_DIGITS;
/// Largest power of ten below `f64::MAX`.
const F64_MAX_SCALE: u32 = 308;

const F64_FRACTION_BITS: u32 = f64::MANTISSA_DIGITS - 1;
const F64_EXPONENT_BIAS: i32 = 1023;

macro_rules! integer_conversions {
    ($($T:ty => $to:ident),* $(,)?) => {$(
        impl From<$T> for Rational {
            fn from(n: $T) -> Self {
                Rational::from_integer(n)
            }
        }

        impl TryFrom<&Rational> for $T {
            type Error = Error;

            fn try_from(value: &Rational) -> Result<$T> {
                value.to_integer().$to().ok_or(Error::Overflow(stringify!($T)))
            }
        }

        impl TryFrom<Rational> for $T {
            type Error = Error;

            fn try_from(value: Rational) -> Result<$T> {
                <$T>::try_from(&value)
            }
        }
    )*};
}

integer_conversions! {
    i8 => to_i8,
    i16 => to_i16,
    i32 => to_i32,
    i64 => to_i64,
    i128 => to_i128,
    isize => to_isize,
    u8 => to_u8,
    u16 => to_u16,
    u32 => to_u32,
    u64 => to_u64,
    u128 => to_u128,
    usize => to_usize,
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Rational::from_integer(n)
    }
}

impl From<&Integer> for Rational {
    fn from(n: &Integer) -> Self {
        Rational::from_integer(n.clone())
    }
}

impl From<Decimal> for Rational {
    fn from(value: Decimal) -> Self {
        Rational::from_decimal(value)
    }
}

impl TryFrom<f64> for Rational {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Rational::from_f64(value)
    }
}

impl TryFrom<&Rational> for Decimal {
    type Error = Error;

    fn try_from(value: &Rational) -> Result<Self> {
        value.to_decimal()
    }
}

impl Rational {
    /// Exact binary value of a finite float.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "cannot represent {value} as a rational"
            )));
        }

        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> F64_FRACTION_BITS) & 0x7ff) as i32;
        let fraction = bits & ((1 << F64_FRACTION_BITS) - 1);

        // subnormals have no implicit leading bit and the minimum exponent
        let (significand, exponent) = if biased == 0 {
            (fraction, 1 - F64_EXPONENT_BIAS)
        } else {
            (fraction | 1 << F64_FRACTION_BITS, biased - F64_EXPONENT_BIAS)
        };

        let mut numer = Integer::from(significand);
        if negative {
            numer = -numer;
        }
        let mut denom = Integer::from(1) << F64_FRACTION_BITS;
        if exponent > 0 {
            numer <<= exponent.unsigned_abs();
        } else {
            denom <<= exponent.unsigned_abs();
        }

        Ok(Self::reduced(numer, denom))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        let mut numer = Integer::from(value.magnitude());
        if value.is_sign_negative() {
            numer = -numer;
        }
        let denom = Integer::u_pow_u(10, value.scale()).complete();

        Self::reduced(numer, denom)
    }

    /// Truncates toward zero.
    pub fn to_integer(&self) -> Integer {
        self.whole_part()
    }

    /// Values too large become signed infinity; values below `1e-308` in
    /// magnitude become signed zero.
    pub fn to_f64(&self) -> f64 {
        if self.numer.significant_bits() <= F64_EXACT_BITS
            && self.denom.significant_bits() <= F64_EXACT_BITS
        {
            return self.numer.to_f64() / self.denom.to_f64();
        }

        let negative = self.numer < 0;
        let mut scaled = Integer::u_pow_u(10, F64_MAX_SCALE).complete();
        scaled *= &self.numer;
        scaled /= &self.denom;

        if scaled == 0 {
            return if negative { -0.0 } else { 0.0 };
        }

        let mut dropped = 0;
        while scaled.significant_bits() > f64::MAX_EXP as u32 {
            if dropped == F64_MAX_SCALE {
                return if negative {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                };
            }
            scaled /= 10;
            dropped += 1;
        }

        scaled.to_f64() / 10f64.powi((F64_MAX_SCALE - dropped) as i32)
    }

    /// Truncates to the largest scale whose magnitude fits in 96 bits.
    pub fn to_decimal(&self) -> Result<Decimal> {
        let negative = self.numer < 0;
        let mut scaled = Integer::u_pow_u(10, Decimal::MAX_SCALE).complete();
        scaled *= &self.numer;
        scaled /= &self.denom;

        if scaled == 0 {
            return Ok(Decimal::ZERO);
        }
        scaled.abs_mut();

        let mut scale = Decimal::MAX_SCALE;
        while scaled.significant_bits() > 96 {
            if scale == 0 {
                return Err(Error::Overflow("Decimal"));
            }
            scaled /= 10;
            scale -= 1;
        }
        while scale > 0 && scaled.is_divisible_u(10) {
            scaled /= 10;
            scale -= 1;
        }

        let magnitude = scaled.to_u128().ok_or(Error::Overflow("Decimal"))?;
        Decimal::new(magnitude, scale, negative)
    }
}

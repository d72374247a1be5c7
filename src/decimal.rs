//! 96-bit fixed-point decimal
//!
//! The value is `(-1)^sign * magnitude / 10^scale`, laid out as four 32-bit
//! words: `lo`, `mid`, `hi` hold the magnitude and `flags` holds the scale in
//! bits 16..24 and the sign in bit 31. Every other flag bit must be zero.

use std::fmt;

use crate::error::{Error, Result};

const SCALE_SHIFT: u32 = 16;
const SCALE_MASK: u32 = 0x00ff_0000;
const SIGN_MASK: u32 = 0x8000_0000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Decimal {
    lo: u32,
    mid: u32,
    hi: u32,
    flags: u32,
}

impl Decimal {
    pub const MAX_SCALE: u32 = 28;
    pub const MAX_MAGNITUDE: u128 = (1 << 96) - 1;
    pub const ZERO: Decimal = Decimal {
        lo: 0,
        mid: 0,
        hi: 0,
        flags: 0,
    };

    pub fn new(magnitude: u128, scale: u32, negative: bool) -> Result<Self> {
        if magnitude > Self::MAX_MAGNITUDE {
            return Err(Error::Overflow("Decimal"));
        }
        if scale > Self::MAX_SCALE {
            return Err(Error::InvalidArgument(format!(
                "decimal scale {scale} exceeds {}",
                Self::MAX_SCALE
            )));
        }

        let mut flags = scale << SCALE_SHIFT;
        if negative {
            flags |= SIGN_MASK;
        }

        Ok(Self {
            lo: magnitude as u32,
            mid: (magnitude >> 32) as u32,
            hi: (magnitude >> 64) as u32,
            flags,
        })
    }

    /// Reads the `[lo, mid, hi, flags]` layout, rejecting reserved flag bits
    /// and scales above 28.
    pub fn from_bits(bits: [u32; 4]) -> Result<Self> {
        let [lo, mid, hi, flags] = bits;

        if flags & !(SCALE_MASK | SIGN_MASK) != 0 {
            return Err(Error::InvalidArgument(format!(
                "reserved decimal flag bits set in {flags:#010x}"
            )));
        }
        let scale = (flags & SCALE_MASK) >> SCALE_SHIFT;
        if scale > Self::MAX_SCALE {
            return Err(Error::InvalidArgument(format!(
                "decimal scale {scale} exceeds {}",
                Self::MAX_SCALE
            )));
        }

        Ok(Self { lo, mid, hi, flags })
    }

    pub fn to_bits(self) -> [u32; 4] {
        [self.lo, self.mid, self.hi, self.flags]
    }

    pub fn magnitude(self) -> u128 {
        (self.hi as u128) << 64 | (self.mid as u128) << 32 | self.lo as u128
    }

    pub fn scale(self) -> u32 {
        (self.flags & SCALE_MASK) >> SCALE_SHIFT
    }

    pub fn is_sign_negative(self) -> bool {
        self.flags & SIGN_MASK != 0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = self.scale() as usize;
        let digits = format!("{:0>width$}", self.magnitude(), width = scale + 1);
        let (whole, fraction) = digits.split_at(digits.len() - scale);

        if self.is_sign_negative() && self.magnitude() != 0 {
            write!(f, "-")?;
        }
        write!(f, "{whole}")?;
        if !fraction.is_empty() {
            write!(f, ".{fraction}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_layout() {
        let d = Decimal::new(12345, 2, true).unwrap();
        assert_eq!(d.to_bits(), [12345, 0, 0, 0x8002_0000]);
        assert_eq!(Decimal::from_bits(d.to_bits()).unwrap(), d);

        let max = Decimal::new(Decimal::MAX_MAGNITUDE, 0, false).unwrap();
        assert_eq!(max.to_bits(), [u32::MAX, u32::MAX, u32::MAX, 0]);
    }

    #[test]
    fn malformed_bits_are_rejected() {
        assert!(matches!(
            Decimal::from_bits([1, 0, 0, 0x0000_0001]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Decimal::from_bits([1, 0, 0, 29 << 16]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Decimal::from_bits([1, 0, 0, 0x4000_0000]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn out_of_range_parts() {
        assert_eq!(
            Decimal::new(1 << 96, 0, false),
            Err(Error::Overflow("Decimal"))
        );
        assert!(Decimal::new(1, 29, false).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Decimal::new(12345, 2, true).unwrap().to_string(), "-123.45");
        assert_eq!(Decimal::new(5, 3, false).unwrap().to_string(), "0.005");
        assert_eq!(Decimal::new(42, 0, false).unwrap().to_string(), "42");
        assert_eq!(Decimal::ZERO.to_string(), "0");
    }
}

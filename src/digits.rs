//! Exact decimal expansion of a rational, one block of digits at a time

use rug::{Complete, Integer};

use crate::error::{Error, Result};
use crate::rational::Rational;

/// Blocks of `width` fractional digits of a rational's magnitude.
///
/// Each step multiplies the remaining fraction by `10^width` and reads off the
/// whole part, so no rounding ever happens.
pub struct DigitBlocks {
    fraction: Rational,
    scale: Rational,
    width: usize,
}

impl DigitBlocks {
    pub fn new(value: &Rational, width: u32) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidArgument(
                "digit blocks must be at least one digit wide".to_string(),
            ));
        }

        Ok(Self {
            fraction: value.abs().fraction_part(),
            scale: Rational::from(Integer::u_pow_u(10, width).complete()),
            width: width as usize,
        })
    }
}

impl Iterator for DigitBlocks {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let scaled = &self.fraction * &self.scale;
        let block = scaled.whole_part().to_string();
        self.fraction = scaled.fraction_part();

        Some(format!("{block:0>width$}", width = self.width))
    }
}

/// Renders `value` with exactly `digits` fractional digits, truncated.
#[tracing::instrument(skip(value))]
pub fn to_decimal_string(value: &Rational, digits: usize, block_width: u32) -> Result<String> {
    let blocks = DigitBlocks::new(value, block_width)?;

    let mut out = String::new();
    if value.signum() < 0 {
        out.push('-');
    }
    out.push_str(&value.whole_part().abs().to_string());
    if digits == 0 {
        return Ok(out);
    }

    out.push('.');
    let whole_len = out.len();
    for block in blocks.take(digits.div_ceil(block_width as usize)) {
        out.push_str(&block);
    }
    out.truncate(whole_len + digits);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn blocks_are_zero_padded() {
        let blocks: Vec<_> = DigitBlocks::new(&r(1, 40), 4).unwrap().take(3).collect();
        assert_eq!(blocks, ["0250", "0000", "0000"]);

        let blocks: Vec<_> = DigitBlocks::new(&r(1, 7), 3).unwrap().take(4).collect();
        assert_eq!(blocks, ["142", "857", "142", "857"]);
    }

    #[test]
    fn renders_requested_length() {
        assert_eq!(to_decimal_string(&r(22, 7), 10, 3).unwrap(), "3.1428571428");
        assert_eq!(to_decimal_string(&r(22, 7), 10, 10).unwrap(), "3.1428571428");
        assert_eq!(to_decimal_string(&r(22, 7), 1, 10).unwrap(), "3.1");
        assert_eq!(to_decimal_string(&r(22, 7), 0, 10).unwrap(), "3");
        assert_eq!(to_decimal_string(&r(5, 1), 4, 2).unwrap(), "5.0000");
    }

    #[test]
    fn negative_values() {
        assert_eq!(to_decimal_string(&r(-1, 8), 5, 2).unwrap(), "-0.12500");
        assert_eq!(to_decimal_string(&r(-3, 2), 2, 1).unwrap(), "-1.50");
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(matches!(
            to_decimal_string(&r(1, 3), 5, 0),
            Err(Error::InvalidArgument(_))
        ));
    }
}

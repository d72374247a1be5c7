//! Fixed-iteration Newton square root over exact rationals

use tracing::trace;

use crate::error::{Error, Result};
use crate::rational::Rational;

/// Enough for about 2000 correct digits of `sqrt(10005)`.
pub const SQRT_ITERATIONS: u32 = 18;

/// Runs exactly `iterations` steps of `b = (b + s/b) / 2` starting at `b = s`.
///
/// There is no convergence check: every step roughly doubles both the number
/// of correct digits and the size of the numerator and denominator.
#[tracing::instrument(skip(s), fields(s = %s))]
pub fn newton_sqrt(s: &Rational, iterations: u32) -> Result<Rational> {
    match s.signum() {
        0 => return Ok(Rational::zero()),
        -1 => {
            return Err(Error::InvalidArgument(format!(
                "square root of negative number {s}"
            )))
        }
        _ => {}
    }

    let half = Rational::new(1, 2)?;
    let mut b = s.clone();

    for i in 0..iterations {
        b = (&b + s.try_div(&b)?) * &half;
        trace!(iteration = i + 1, bits = b.numer().significant_bits(), "newton step");
    }

    Ok(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digits::to_decimal_string;

    #[test]
    fn perfect_squares() {
        let x = newton_sqrt(&Rational::from(144), 10).unwrap();
        assert!((x.to_f64() - 12.0).abs() < 1e-12);

        let quarter = newton_sqrt(&Rational::new(1, 4).unwrap(), 8).unwrap();
        assert!((quarter.to_f64() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn sqrt_10005() {
        let root = newton_sqrt(&Rational::from(10005), SQRT_ITERATIONS).unwrap();
        // sqrt(10005) = 100.02499687578100594479218787635777800159502436869631...
        assert_eq!(
            to_decimal_string(&root, 45, 15).unwrap(),
            "100.024996875781005944792187876357778001595024368"
        );
    }

    #[test]
    fn zero_iterations_returns_the_guess() {
        let s = Rational::from(10005);
        assert_eq!(newton_sqrt(&s, 0).unwrap(), s);
    }

    #[test]
    fn edge_inputs() {
        assert_eq!(newton_sqrt(&Rational::zero(), 18).unwrap(), Rational::zero());
        assert!(matches!(
            newton_sqrt(&Rational::from(-4), 18),
            Err(Error::InvalidArgument(_))
        ));
    }
}

//! Chudnovsky series summed term by term over exact rationals
//!
//! ```text
//!                     426880 * sqrt(10005)
//!  pi = ---------------------------------------------
//!         _inf_
//!         \     (6k)! * (13591409 + 545140134 * k)
//!          \    -----------------------------------
//!          /     (3k)! * (k!)^3 * (-640320)^(3k)
//!         /____
//!          k=0
//! ```

use rug::Integer;
use tracing::{debug, info};

use crate::digits::to_decimal_string;
use crate::error::Result;
use crate::rational::Rational;
use crate::sqrt::{newton_sqrt, SQRT_ITERATIONS};

const A: u32 = 13591409;
const B: u32 = 545140134;
/// -640320^3
const X_STEP: i64 = -262537412640768000;
const SQRT_ARG: u32 = 10005;
const PI_SCALE: u32 = 426880;

pub const DIGITS_PER_ITER: f64 = 14.1816474627254776555;

/// Engine parameters. The defaults are the reference term count, Newton
/// iteration count and block width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub terms: u32,
    pub sqrt_iterations: u32,
    pub block_width: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terms: 400,
            sqrt_iterations: SQRT_ITERATIONS,
            block_width: 10,
        }
    }
}

impl Config {
    /// Rough number of correct fractional digits this configuration yields.
    ///
    /// Newton needs about eight steps to get close to `sqrt(10005)` from
    /// 10005 and doubles the correct digits with each step after that.
    pub fn supported_digits(&self) -> usize {
        let series = (self.terms + 1) as f64 * DIGITS_PER_ITER;
        let sqrt = 2f64.powi(self.sqrt_iterations as i32 - 7);

        series.min(sqrt) as usize
    }
}

/// Running state of the series: `k` steps by 12 each term (`6 + 12n`), `m`
/// is the multinomial ratio, `l` the linear term, `x` the power of
/// `-640320^3` and `s` the partial sum.
#[derive(Clone, Debug)]
pub struct ChudnovskySeries {
    term: u32,
    k: Rational,
    m: Rational,
    l: Rational,
    x: Rational,
    s: Rational,
}

impl Default for ChudnovskySeries {
    fn default() -> Self {
        Self::new()
    }
}

impl ChudnovskySeries {
    pub fn new() -> Self {
        Self {
            term: 0,
            k: Rational::from(6),
            m: Rational::one(),
            l: Rational::from(A),
            x: Rational::one(),
            s: Rational::from(A),
        }
    }

    /// Number of terms added after the initial `k = 0` term.
    pub fn terms(&self) -> u32 {
        self.term
    }

    pub fn sum(&self) -> &Rational {
        &self.s
    }

    pub fn next_term(&mut self) -> Result<()> {
        let three = Integer::from(3);
        let index = Rational::from(self.term + 1);

        let ratio = &self.k.pow(&three)? - &(&Rational::from(16) * &self.k);
        self.m = (&self.m * &ratio).try_div(&index.pow(&three)?)?;
        self.l = &self.l + &Rational::from(B);
        self.x = &self.x * &Rational::from(X_STEP);
        self.s = &self.s + &(&self.m * &self.l).try_div(&self.x)?;
        self.k = &self.k + &Rational::from(12);
        self.term += 1;

        Ok(())
    }

    /// Adds terms until `max_k` of them have been summed.
    #[tracing::instrument(skip(self))]
    pub fn sum_to(&mut self, max_k: u32) -> Result<()> {
        while self.term < max_k {
            self.next_term()?;
        }
        debug!(
            numer_bits = self.s.numer().significant_bits(),
            denom_bits = self.s.denom().significant_bits(),
            "series sum"
        );

        Ok(())
    }

    /// `426880 * sqrt(10005) / S` for the terms summed so far.
    #[tracing::instrument(skip(self), fields(terms = self.term))]
    pub fn pi(&self, sqrt_iterations: u32) -> Result<Rational> {
        let root = newton_sqrt(&Rational::from(SQRT_ARG), sqrt_iterations)?;
        info!("Done sqrt");

        let pi = (&Rational::from(PI_SCALE) * &root).try_div(&self.s)?;
        info!("Done pi");

        Ok(pi)
    }
}

pub fn compute_pi(config: &Config) -> Result<Rational> {
    let mut series = ChudnovskySeries::new();
    series.sum_to(config.terms)?;
    info!("Done summing");

    series.pi(config.sqrt_iterations)
}

/// `3.` followed by exactly `digits` digits of the approximation.
pub fn pi_digits(config: &Config, digits: usize) -> Result<String> {
    let pi = compute_pi(config)?;
    to_decimal_string(&pi, digits, config.block_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    // http://www.numberworld.org/digits/Pi/
    const PI_100: &str = "3.\
        1415926535897932384626433832795028841971693993751\
        058209749445923078164062862089986280348253421170679";

    #[test]
    fn first_term_recurrence() {
        let mut series = ChudnovskySeries::new();
        series.next_term().unwrap();

        // (6)! / ((3)! * (1!)^3) = 120
        assert_eq!(series.m, Rational::from(120));
        assert_eq!(series.l, Rational::from(A + B));
        assert_eq!(series.x, Rational::from(X_STEP));
        assert_eq!(series.k, Rational::from(18));
        assert_eq!(series.terms(), 1);
    }

    #[test]
    fn sum_to_is_idempotent() {
        let mut series = ChudnovskySeries::new();
        series.sum_to(3).unwrap();
        let sum = series.sum().clone();
        series.sum_to(3).unwrap();
        series.sum_to(2).unwrap();
        assert_eq!(series.terms(), 3);
        assert_eq!(*series.sum(), sum);
    }

    #[test]
    fn one_term() {
        let config = Config {
            terms: 1,
            ..Config::default()
        };
        assert_eq!(pi_digits(&config, 10).unwrap(), "3.1415926535");
    }

    #[test]
    fn verify_first_100_digits() {
        let pi = pi_digits(&Config::default(), 100).unwrap();
        assert_eq!(pi, PI_100);

        let last_10 = &pi[pi.len() - 10..];
        assert_eq!(last_10, "3421170679");
    }

    #[test]
    fn supported_digits() {
        let config = Config::default();
        assert_eq!(config.supported_digits(), 2048);

        let short = Config {
            terms: 1,
            ..Config::default()
        };
        assert_eq!(short.supported_digits(), 28);
    }
}

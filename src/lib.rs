//! Digits of pi from the Chudnovsky series, computed entirely in exact
//! rational arithmetic over GMP integers.

pub mod chudnovsky;
pub mod decimal;
pub mod digits;
pub mod error;
pub mod rational;
pub mod sqrt;

pub use decimal::Decimal;
pub use error::{Error, Result};
pub use rational::Rational;

use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const INR_CURRENCY_CODE: &str = "INR";

//--------------------------------------       Paise         ---------------------------------------------------------
/// An amount of Indian rupees, held in the smallest currency unit (1/100 of a rupee).
///
/// This is the representation the payment gateway expects, and the one used in storage, so that rupee amounts never
/// pass through floating point arithmetic once they are inside the system.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Paise(i64);

op!(binary Paise, Add, add);
op!(binary Paise, Sub, sub);
op!(inplace Paise, AddAssign, add_assign);
op!(inplace Paise, SubAssign, sub_assign);
op!(unary Paise, Neg, neg);

impl Sum for Paise {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in paise: {0}")]
pub struct PaiseConversionError(String);

impl From<i64> for Paise {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl TryFrom<f64> for Paise {
    type Error = PaiseConversionError;

    /// Converts a decimal rupee amount into paise, rounding to the nearest paisa.
    fn try_from(rupees: f64) -> Result<Self, Self::Error> {
        let paise = (rupees * 100.0).round();
        if !paise.is_finite() || paise.abs() > i64::MAX as f64 {
            return Err(PaiseConversionError(format!("{rupees} is not a valid rupee amount")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(paise as i64))
    }
}

impl Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}₹{}.{:02}", abs / 100, abs % 100)
    }
}

impl Paise {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    pub fn as_rupees(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decimal_conversion_rounds_to_nearest_paisa() {
        assert_eq!(Paise::try_from(132.50).unwrap(), Paise::from(13250));
        assert_eq!(Paise::try_from(0.01).unwrap(), Paise::from(1));
        assert_eq!(Paise::try_from(19.999).unwrap(), Paise::from(2000));
        assert_eq!(Paise::try_from(0.0).unwrap(), Paise::from(0));
        assert!(Paise::try_from(f64::NAN).is_err());
        assert!(Paise::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Paise::from(13250).to_string(), "₹132.50");
        assert_eq!(Paise::from(1).to_string(), "₹0.01");
        assert_eq!(Paise::from_rupees(100).to_string(), "₹100.00");
        assert_eq!(Paise::from(-505).to_string(), "-₹5.05");
    }

    #[test]
    fn arithmetic() {
        let mut total = Paise::from(100);
        total += Paise::from(50);
        assert_eq!(total - Paise::from(25), Paise::from(125));
        let sum: Paise = [Paise::from(1), Paise::from(2), Paise::from(3)].into_iter().sum();
        assert_eq!(sum, Paise::from(6));
        assert!(!Paise::from(0).is_positive());
        assert_eq!(Paise::from(13250).as_rupees(), 132.5);
    }
}

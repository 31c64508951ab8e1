use std::{
    fmt,
    ops::{Add, AddAssign},
};

use crate::EngineError;

/// Largest representable amount: 10 digits total, 2 of them fractional.
const MAX_CENTIMOS: i64 = 9_999_999_999;

/// Money amount represented as **integer céntimos**.
///
/// Use this type for all monetary values in the engine to avoid
/// floating-point drift. Amounts cross the API boundary as JSON numbers, so
/// conversion happens through [`Monto::try_from_f64`] (which rejects more
/// than two decimals) and [`Monto::as_f64`].
///
/// # Examples
///
/// ```rust
/// use engine::Monto;
///
/// let monto = Monto::new(12_50);
/// assert_eq!(monto.centimos(), 1250);
/// assert_eq!(monto.to_string(), "12.50€");
/// assert_eq!(Monto::try_from_f64(12.5).unwrap(), monto);
/// assert!(Monto::try_from_f64(12.345).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Monto(i64);

impl Monto {
    pub const ZERO: Monto = Monto(0);

    /// Creates a new amount from integer céntimos.
    #[must_use]
    pub const fn new(centimos: i64) -> Self {
        Self(centimos)
    }

    /// Returns the raw value in céntimos.
    #[must_use]
    pub const fn centimos(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Converts a JSON number into céntimos.
    ///
    /// Validation rules:
    /// - must be finite
    /// - max 2 fractional digits (rejects `12.345`)
    /// - max 10 digits in total (rejects `123456789.99`... and larger)
    pub fn try_from_f64(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::Validation(
                "amount must be a finite number".to_string(),
            ));
        }

        let centimos = (value * 100.0).round();
        if centimos.abs() > MAX_CENTIMOS as f64 {
            return Err(EngineError::Validation(
                "amount cannot have more than ten digits".to_string(),
            ));
        }
        // Exact for any in-range value with at most two decimals; anything
        // with a third decimal fails to round-trip.
        if centimos / 100.0 != value {
            return Err(EngineError::Validation(
                "amount cannot have more than two decimal places".to_string(),
            ));
        }

        Ok(Monto(centimos as i64))
    }

    /// Returns the amount as a JSON-friendly number.
    ///
    /// Exact for every value within the ten-digit range.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Monto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let euros = abs / 100;
        let centimos = abs % 100;
        write!(f, "{sign}{euros}.{centimos:02}€")
    }
}

impl From<i64> for Monto {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Monto> for i64 {
    fn from(value: Monto) -> Self {
        value.0
    }
}

impl Add for Monto {
    type Output = Monto;

    fn add(self, rhs: Monto) -> Self::Output {
        Monto(self.0 + rhs.0)
    }
}

impl AddAssign for Monto {
    fn add_assign(&mut self, rhs: Monto) {
        self.0 += rhs.0;
    }
}

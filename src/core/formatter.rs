//! Numeric rounding and display helpers shared by every report panel.

use std::fmt;

/// Shown wherever a value is missing or a ratio has no defined result
pub const PLACEHOLDER: &str = "—";

/// Default rounding precision (four decimal places)
pub const DEFAULT_PRECISION: f64 = 10_000.0;

// Beyond this the scaled value has no fractional part left to round.
const EXACT_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Round `value` to `log10(precision)` decimal places, half-up.
///
/// The epsilon nudge makes values like `1.005` round up even though their
/// binary representation sits just below the midpoint. Non-finite input is
/// returned unchanged.
pub fn round(value: f64, precision: f64) -> f64 {
    if !value.is_finite() || !precision.is_finite() || precision <= 0.0 {
        return value;
    }
    let scaled = (value + f64::EPSILON) * precision;
    if scaled.abs() >= EXACT_LIMIT {
        return value;
    }
    (scaled + 0.5).floor() / precision
}

/// Render a number the way the report shows it: integral values without a
/// fractional part, everything else with the shortest exact representation.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{}", value)
}

/// Rounding configuration carried by the panel builders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Formatter {
    precision: f64,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Formatter {
    /// Formatter rounding to `decimals` decimal places
    pub fn with_decimals(decimals: u32) -> Self {
        Self {
            precision: 10f64.powi(decimals.min(15) as i32),
        }
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn round(&self, value: f64) -> f64 {
        round(value, self.precision)
    }

    /// `count / total * 100`, rounded, or [`Percent::Undefined`] for a zero total
    pub fn percent(&self, count: u64, total: u64) -> Percent {
        Percent::of(count, total, self)
    }
}

/// A percentage of a column's record count
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percent {
    Value(f64),
    Undefined,
}

impl Percent {
    pub fn of(count: u64, total: u64, formatter: &Formatter) -> Self {
        if total == 0 {
            return Percent::Undefined;
        }
        let ratio = count as f64 / total as f64 * 100.0;
        if ratio.is_finite() {
            Percent::Value(formatter.round(ratio))
        } else {
            Percent::Undefined
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Percent::Value(v) => Some(*v),
            Percent::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Percent::Value(_))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percent::Value(v) => write!(f, "{}%", format_number(*v)),
            Percent::Undefined => f.write_str(PLACEHOLDER),
        }
    }
}

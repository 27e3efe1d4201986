//! Transition durations
//!
//! Durations arrive as bare numbers or unit-suffixed strings and are
//! needed in two forms: milliseconds for timeout scheduling and a
//! unit-annotated seconds string for the transition declaration. Bare
//! numeric input is always seconds; strings carry an explicit `s` or
//! `ms` suffix.

use std::str::FromStr;

/// Duration parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("duration {0:?} has no 's' or 'ms' unit suffix")]
    MissingUnit(String),

    #[error("duration {0:?} is not a number")]
    BadNumber(String),
}

/// A transition duration, stored in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duration {
    ms: f64,
}

impl Duration {
    /// Duration from seconds
    pub fn from_secs(secs: f64) -> Self {
        Self { ms: secs * 1000.0 }
    }

    /// Duration from milliseconds
    pub fn from_millis(ms: f64) -> Self {
        Self { ms }
    }

    /// Milliseconds, for timeout scheduling
    pub fn millis(&self) -> f64 {
        self.ms
    }

    /// Unit-annotated seconds form for the transition declaration
    pub fn css(&self) -> String {
        format!("{}s", self.ms / 1000.0)
    }
}

/// 0.3 s, the default transition duration
impl Default for Duration {
    fn default() -> Self {
        Self::from_secs(0.3)
    }
}

/// Bare numbers are seconds
impl From<f64> for Duration {
    fn from(secs: f64) -> Self {
        Self::from_secs(secs)
    }
}

impl FromStr for Duration {
    type Err = DurationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if let Some(number) = raw.strip_suffix("ms") {
            number
                .trim()
                .parse()
                .map(Self::from_millis)
                .map_err(|_| DurationError::BadNumber(raw.to_string()))
        } else if let Some(number) = raw.strip_suffix('s') {
            number
                .trim()
                .parse()
                .map(Self::from_secs)
                .map_err(|_| DurationError::BadNumber(raw.to_string()))
        } else {
            Err(DurationError::MissingUnit(raw.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_input_is_seconds() {
        let d = Duration::from(2.0);
        assert_eq!(d.millis(), 2000.0);
        assert_eq!(d.css(), "2s");
    }

    #[test]
    fn parses_both_unit_suffixes() {
        let secs: Duration = "0.3s".parse().unwrap();
        assert_eq!(secs.millis(), 300.0);
        assert_eq!(secs.css(), "0.3s");

        let millis: Duration = "450ms".parse().unwrap();
        assert_eq!(millis.millis(), 450.0);

        assert_eq!(" 2s ".parse::<Duration>().unwrap().millis(), 2000.0);
    }

    #[test]
    fn rejects_missing_or_bad_input() {
        assert_eq!(
            "300".parse::<Duration>(),
            Err(DurationError::MissingUnit("300".to_string()))
        );
        assert_eq!(
            "fasts".parse::<Duration>(),
            Err(DurationError::BadNumber("fasts".to_string()))
        );
    }

    #[test]
    fn default_is_three_tenths_of_a_second() {
        assert_eq!(Duration::default().millis(), 300.0);
        assert_eq!(Duration::default().css(), "0.3s");
    }
}

//! Axis label formatting.
//!
//! The timeline widget hands tick positions to the formatter in whichever
//! representation its scale math produced. Instead of probing values for
//! conversion capabilities at runtime, the accepted representations form a
//! closed tagged union with one conversion per variant and an explicit
//! fallback: a value with no extractable calendar year is rendered with its
//! direct string form rather than failing.

use chrono::{DateTime, Datelike};

use crate::models::CalendarPoint;

/// A calendar-point-like tick position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisInstant {
    /// An exact calendar point.
    Point(CalendarPoint),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// The widget's interpolated scale position, in fractional epoch millis.
    Fractional(f64),
}

impl std::fmt::Display for AxisInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisInstant::Point(p) => write!(f, "{}", p.date()),
            AxisInstant::EpochMillis(ms) => write!(f, "{}", ms),
            AxisInstant::Fractional(ms) => write!(f, "{}", ms),
        }
    }
}

impl AxisInstant {
    /// Extract the calendar year, if the value normalizes to one.
    fn year(&self) -> Option<i32> {
        match self {
            AxisInstant::Point(p) => Some(p.year()),
            AxisInstant::EpochMillis(ms) => {
                DateTime::from_timestamp_millis(*ms).map(|dt| dt.year())
            }
            AxisInstant::Fractional(ms) => {
                if !ms.is_finite() || ms.abs() >= i64::MAX as f64 {
                    return None;
                }
                DateTime::from_timestamp_millis(*ms as i64).map(|dt| dt.year())
            }
        }
    }
}

/// Format a tick label in BC/AD form.
///
/// Negative years render as `"N BC"`, everything else as `"N AD"`. Year 0 is
/// deliberately `"0 AD"` — the traditional BC/AD calendar has no year zero,
/// but the proleptic axis does, and it reads as AD here. Values that cannot
/// be normalized fall back to their direct string form.
pub fn format_axis_label(instant: &AxisInstant) -> String {
    match instant.year() {
        Some(year) if year < 0 => format!("{} BC", -(year as i64)),
        Some(year) => format!("{} AD", year),
        None => instant.to_string(),
    }
}

/// Convenience for year-valued ticks, which is what the terminal widget
/// produces.
pub fn format_year_label(year: i32) -> String {
    format_axis_label(&AxisInstant::Point(CalendarPoint::from_year(year)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bc_ad_convention() {
        assert_eq!(format_year_label(-44), "44 BC");
        assert_eq!(format_year_label(0), "0 AD");
        assert_eq!(format_year_label(1900), "1900 AD");
        assert_eq!(format_year_label(-1), "1 BC");
        assert_eq!(format_year_label(1), "1 AD");
    }

    #[test]
    fn test_epoch_millis_variant() {
        assert_eq!(
            format_axis_label(&AxisInstant::EpochMillis(0)),
            "1970 AD"
        );
        let bc = CalendarPoint::from_year(-500).epoch_millis();
        assert_eq!(format_axis_label(&AxisInstant::EpochMillis(bc)), "500 BC");
    }

    #[test]
    fn test_fractional_variant() {
        let ms = CalendarPoint::from_year(1900).epoch_millis() as f64 + 0.75;
        assert_eq!(format_axis_label(&AxisInstant::Fractional(ms)), "1900 AD");
    }

    #[test]
    fn test_fallback_arm() {
        assert_eq!(
            format_axis_label(&AxisInstant::Fractional(f64::NAN)),
            "NaN"
        );
        assert_eq!(
            format_axis_label(&AxisInstant::Fractional(f64::INFINITY)),
            "inf"
        );
        // chrono cannot represent this many millis as a date.
        assert_eq!(
            format_axis_label(&AxisInstant::EpochMillis(i64::MAX)),
            i64::MAX.to_string()
        );
    }
}

//! Domain models for the author timeline.
//!
//! The input is a JSON array of `AuthorRecord` objects with integer calendar
//! years (negative = BC). Years are converted to `CalendarPoint`s, a
//! year-precision point in proleptic-Gregorian time where year 0 and negative
//! years round-trip exactly.

#![allow(dead_code)]

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::item::Rgb8;

/// Item identifier: the data source uses both strings and integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::Int(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Item kind as understood by the timeline widget.
///
/// `point` and `range` are the two the data source emits; `box` and
/// `background` are widget-recognized variants passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Point,
    Range,
    Box,
    Background,
}

impl ItemKind {
    /// Resolve a possibly-absent kind: records with an end year are ranges,
    /// the rest are points.
    pub fn infer(kind: Option<ItemKind>, end: Option<i32>) -> ItemKind {
        kind.unwrap_or(if end.is_some() {
            ItemKind::Range
        } else {
            ItemKind::Point
        })
    }

    /// Whether the `end` field is meaningful for this kind.
    pub fn has_end(&self) -> bool {
        matches!(self, ItemKind::Range | ItemKind::Background)
    }
}

/// One raw record per author/work, as served by the data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRecord {
    pub id: ItemId,
    pub content: String,
    #[serde(default)]
    pub start: Option<i32>,
    #[serde(default)]
    pub end: Option<i32>,
    #[serde(default)]
    pub occupations: Vec<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<ItemKind>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
}

impl AuthorRecord {
    /// Primary occupation, if any.
    pub fn primary_occupation(&self) -> Option<&str> {
        self.occupations.first().map(String::as_str)
    }
}

/// Milliseconds in a 365-day year, the unit the widget's zoom bounds use.
pub const MS_PER_YEAR: i64 = 1000 * 60 * 60 * 24 * 365;

/// A year-precision point in proleptic-Gregorian time.
///
/// Wraps Jan 1 of the target year. chrono's calendar has a year 0, so BC
/// years are represented exactly rather than shifted by one the way naive
/// date-construction APIs shift them. Years beyond chrono's ±262143 range
/// clamp to the calendar bounds instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarPoint(NaiveDate);

impl CalendarPoint {
    pub fn from_year(year: i32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(if year < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        });
        CalendarPoint(date)
    }

    /// The calendar year, exact for any year in chrono's range.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Milliseconds since the Unix epoch, the widget's zoom unit.
    pub fn epoch_millis(&self) -> i64 {
        self.0
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0)
    }
}

impl From<NaiveDate> for CalendarPoint {
    fn from(date: NaiveDate) -> Self {
        CalendarPoint(date)
    }
}

/// The renderable unit the timeline widget consumes, one per `AuthorRecord`.
///
/// `start`/`end` are `None` iff the source year was null. `style` is the
/// CSS-like descriptor derived from the occupation palette (empty string for
/// zero occupations); `bands` carries the same palette colors in resolved
/// form so the terminal renderer does not re-parse the descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualItem {
    pub id: ItemId,
    pub content: String,
    pub start: Option<CalendarPoint>,
    pub end: Option<CalendarPoint>,
    pub kind: ItemKind,
    pub title: Option<String>,
    pub class_name: Option<String>,
    pub style: String,
    pub bands: Vec<Rgb8>,
}

impl VisualItem {
    /// Year span used for stacking and hit-testing. Point items occupy a
    /// single year.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let start = self.start?.year();
        let end = self
            .end
            .filter(|_| self.kind.has_end())
            .map(|p| p.year())
            .unwrap_or(start);
        Some((start.min(end), start.max(end)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_round_trip() {
        for year in [-4713, -500, -44, -1, 0, 1, 476, 1900, 2024] {
            assert_eq!(CalendarPoint::from_year(year).year(), year);
        }
    }

    #[test]
    fn test_year_zero_is_not_skipped() {
        let bc1 = CalendarPoint::from_year(-1);
        let zero = CalendarPoint::from_year(0);
        let ad1 = CalendarPoint::from_year(1);
        assert!(bc1 < zero && zero < ad1);
        assert_eq!(zero.year(), 0);
    }

    #[test]
    fn test_epoch_millis_sign() {
        assert_eq!(CalendarPoint::from_year(1970).epoch_millis(), 0);
        assert!(CalendarPoint::from_year(-500).epoch_millis() < 0);
        assert!(CalendarPoint::from_year(2000).epoch_millis() > 0);
    }

    #[test]
    fn test_record_deserialization() {
        let json = r#"{
            "id": 1,
            "content": "Cicero",
            "start": -106,
            "end": -43,
            "occupations": ["politician", "philosopher"],
            "type": "range",
            "title": "Marcus Tullius Cicero",
            "className": "roman"
        }"#;
        let record: AuthorRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, ItemId::Int(1));
        assert_eq!(record.start, Some(-106));
        assert_eq!(record.kind, Some(ItemKind::Range));
        assert_eq!(record.class_name.as_deref(), Some("roman"));
        assert_eq!(record.primary_occupation(), Some("politician"));
    }

    #[test]
    fn test_record_minimal_fields() {
        let json = r#"{"id": "homer", "content": "Homer"}"#;
        let record: AuthorRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, ItemId::Text("homer".to_string()));
        assert!(record.start.is_none());
        assert!(record.end.is_none());
        assert!(record.occupations.is_empty());
        assert!(record.kind.is_none());
    }

    #[test]
    fn test_kind_inference() {
        assert_eq!(ItemKind::infer(None, Some(-43)), ItemKind::Range);
        assert_eq!(ItemKind::infer(None, None), ItemKind::Point);
        assert_eq!(ItemKind::infer(Some(ItemKind::Box), Some(10)), ItemKind::Box);
    }
}

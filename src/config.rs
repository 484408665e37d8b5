//! Timeline widget configuration.
//!
//! The widget is configured the way the original browser collaborator was:
//! zoom bounds expressed in milliseconds, a default visible range, an
//! axis-label formatter callback used for both minor and major ticks, scroll
//! enablement flags, and an item-stacking flag.

use crate::axis::{format_axis_label, AxisInstant};
use crate::models::{CalendarPoint, MS_PER_YEAR};

/// Tick label formatter callback type.
pub type AxisFormatter = fn(&AxisInstant) -> String;

/// Configuration handed to the timeline widget, built once at startup.
#[derive(Debug, Clone)]
pub struct TimelineOptions {
    /// Smallest visible span, in milliseconds.
    pub zoom_min_ms: i64,
    /// Largest visible span, in milliseconds.
    pub zoom_max_ms: i64,
    /// Default visible range start.
    pub view_start: CalendarPoint,
    /// Default visible range end.
    pub view_end: CalendarPoint,
    /// Formatter for minor tick labels.
    pub minor_labels: AxisFormatter,
    /// Formatter for major tick labels.
    pub major_labels: AxisFormatter,
    pub horizontal_scroll: bool,
    pub vertical_scroll: bool,
    /// Stack overlapping items into separate rows.
    pub stack: bool,
    /// Rows of margin between stacked items.
    pub item_margin: u16,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            zoom_min_ms: 10 * MS_PER_YEAR,   // 10 years min zoom
            zoom_max_ms: 3000 * MS_PER_YEAR, // 3000 years max zoom
            view_start: CalendarPoint::from_year(-500), // classical antiquity
            view_end: CalendarPoint::from_year(0),
            minor_labels: format_axis_label,
            major_labels: format_axis_label,
            horizontal_scroll: true,
            vertical_scroll: true,
            stack: true,
            item_margin: 0,
        }
    }
}

impl TimelineOptions {
    /// Zoom bounds converted to whole years, as the terminal scale uses.
    pub fn zoom_bounds_years(&self) -> (i64, i64) {
        (
            (self.zoom_min_ms / MS_PER_YEAR).max(1),
            (self.zoom_max_ms / MS_PER_YEAR).max(1),
        )
    }

    /// Default visible span in years.
    pub fn default_span_years(&self) -> i64 {
        (self.view_end.year() as i64 - self.view_start.year() as i64).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zoom_bounds() {
        let options = TimelineOptions::default();
        assert_eq!(options.zoom_bounds_years(), (10, 3000));
    }

    #[test]
    fn test_default_view_range() {
        let options = TimelineOptions::default();
        assert_eq!(options.view_start.year(), -500);
        assert_eq!(options.view_end.year(), 0);
        assert_eq!(options.default_span_years(), 500);
    }

    #[test]
    fn test_formatter_callback() {
        let options = TimelineOptions::default();
        let label = (options.minor_labels)(&AxisInstant::Point(CalendarPoint::from_year(-300)));
        assert_eq!(label, "300 BC");
    }
}

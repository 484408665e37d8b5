//! Timeline widget.
//!
//! Renders the `VisualItem` collection on a horizontal year axis: range items
//! as bars, point items as markers, with overlapping items stacked into rows.
//! The widget consumes only the item list, a `TimelineOptions` configuration
//! and a `TimelineState`; everything it needs is derived from those.
//!
//! Multi-occupation items are striped: each band color owns a fixed run of
//! columns and the pattern cycles along the bar, the cell-grid equivalent of
//! the style descriptor's repeating diagonal gradient.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::axis::AxisInstant;
use crate::config::TimelineOptions;
use crate::models::{CalendarPoint, ItemKind, VisualItem};
use crate::theme::{colors, styles};

const BLOCK_FULL: char = '█';
const BLOCK_LEFT: char = '▌';
const BLOCK_RIGHT: char = '▐';
const POINT_MARKER: char = '◆';
const OPEN_END: char = '╶';

/// Columns per stripe band in multi-color bars.
const STRIPE_COLUMNS: u16 = 2;

/// Candidate axis tick steps, in years.
const TICK_STEPS: &[i64] = &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1000];

/// Scroll/zoom/selection state, kept by the app across frames.
#[derive(Debug, Clone)]
pub struct TimelineState {
    /// Offset of the viewport's left edge in years, relative to the
    /// configured default view start.
    pub scroll_offset: i64,
    /// Selected item index, into the item list.
    pub selected: Option<usize>,
    /// Zoom level (years per column).
    pub years_per_column: f64,
}

impl TimelineState {
    /// Initial state: the configured default view fills an 80-column span.
    pub fn new(options: &TimelineOptions) -> Self {
        Self {
            scroll_offset: 0,
            selected: None,
            years_per_column: options.default_span_years() as f64 / 80.0,
        }
    }

    /// Scroll toward earlier years.
    pub fn scroll_left(&mut self, columns: i64) {
        self.scroll_offset -= (columns as f64 * self.years_per_column).ceil() as i64;
    }

    /// Scroll toward later years.
    pub fn scroll_right(&mut self, columns: i64) {
        self.scroll_offset += (columns as f64 * self.years_per_column).ceil() as i64;
    }

    pub fn select_previous(&mut self, total: usize) {
        if total == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i > 0 => i - 1,
            Some(_) => total - 1,
            None => 0,
        });
    }

    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i < total - 1 => i + 1,
            Some(_) => 0,
            None => 0,
        });
    }

    /// Zoom in, bounded below by the options' minimum visible span.
    pub fn zoom_in(&mut self, options: &TimelineOptions, viewport_columns: u16) {
        let (min_years, _) = options.zoom_bounds_years();
        let next = self.years_per_column / 2.0;
        if next * viewport_columns.max(1) as f64 >= min_years as f64 {
            self.years_per_column = next;
        }
    }

    /// Zoom out, bounded above by the options' maximum visible span.
    pub fn zoom_out(&mut self, options: &TimelineOptions, viewport_columns: u16) {
        let (_, max_years) = options.zoom_bounds_years();
        let next = self.years_per_column * 2.0;
        if next * viewport_columns.max(1) as f64 <= max_years as f64 {
            self.years_per_column = next;
        }
    }

    /// Back to the configured default view.
    pub fn reset_view(&mut self, options: &TimelineOptions) {
        self.scroll_offset = 0;
        self.years_per_column = options.default_span_years() as f64 / 80.0;
    }

    /// Scroll so the given item's start sits a quarter-viewport from the
    /// left edge.
    pub fn jump_to_item(
        &mut self,
        item: &VisualItem,
        options: &TimelineOptions,
        viewport_columns: u16,
    ) {
        let Some((start_year, _)) = stacking_span(item) else {
            return;
        };
        let lead_years = (viewport_columns as f64 / 4.0 * self.years_per_column) as i64;
        self.scroll_offset =
            start_year as i64 - options.view_start.year() as i64 - lead_years;
    }
}

/// Year interval used for stacking; falls back to the end year when the
/// start is open.
fn stacking_span(item: &VisualItem) -> Option<(i32, i32)> {
    item.year_span().or_else(|| {
        let end = item.end?.year();
        Some((end, end))
    })
}

/// Assign each item a row. With stacking on, an item takes the first row
/// where it overlaps no earlier occupant; with stacking off every item gets
/// its own row in input order. `margin` adds blank rows between occupied
/// ones.
pub fn assign_rows(items: &[VisualItem], stack: bool, margin: u16) -> Vec<u16> {
    let step = 1 + margin;
    if !stack {
        return (0..items.len()).map(|i| i as u16 * step).collect();
    }

    let mut row_intervals: Vec<Vec<(i32, i32)>> = Vec::new();
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let span = stacking_span(item).unwrap_or((i32::MIN, i32::MAX));
        let row = row_intervals
            .iter()
            .position(|occupants| {
                occupants
                    .iter()
                    .all(|&(a, b)| span.1 < a || span.0 > b)
            })
            .unwrap_or(row_intervals.len());
        if row == row_intervals.len() {
            row_intervals.push(Vec::new());
        }
        row_intervals[row].push(span);
        rows.push(row as u16 * step);
    }
    rows
}

/// The timeline rendering widget.
pub struct TimelineWidget<'a> {
    items: &'a [VisualItem],
    options: &'a TimelineOptions,
    state: &'a TimelineState,
    title: &'a str,
}

impl<'a> TimelineWidget<'a> {
    pub fn new(
        items: &'a [VisualItem],
        options: &'a TimelineOptions,
        state: &'a TimelineState,
    ) -> Self {
        Self {
            items,
            options,
            state,
            title: " Author Timeline ",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Year at the viewport's left edge.
    fn viewport_start_year(&self) -> i64 {
        self.options.view_start.year() as i64 + self.state.scroll_offset
    }

    /// Convert a year to a raw column position (may be outside the
    /// viewport).
    fn year_to_column_raw(&self, year: i32) -> i64 {
        let from_edge = year as i64 - self.viewport_start_year();
        (from_edge as f64 / self.state.years_per_column).floor() as i64
    }

    /// Year under a viewport column.
    fn column_to_year(&self, column: u16) -> i64 {
        self.viewport_start_year()
            + (column as f64 * self.state.years_per_column).floor() as i64
    }

    /// Pick a tick step that keeps labels at least eight columns apart.
    fn tick_step(&self) -> i64 {
        let min_years = (8.0 * self.state.years_per_column).ceil() as i64;
        TICK_STEPS
            .iter()
            .copied()
            .find(|step| *step >= min_years)
            .unwrap_or(1000)
    }

    /// Render tick labels plus the axis line (two rows).
    fn render_time_axis(&self, area: Rect, buf: &mut Buffer) {
        let step = self.tick_step();
        let mut last_label_end: i64 = -2;

        for col in 0..area.width {
            let year = self.column_to_year(col);
            let next_year = self.column_to_year(col + 1);

            // First column whose span crosses a tick boundary gets the label.
            let tick = (year..next_year.max(year + 1)).find(|y| y.rem_euclid(step) == 0);
            if let Some(tick_year) = tick {
                if (col as i64) > last_label_end {
                    let instant =
                        AxisInstant::Point(CalendarPoint::from_year(tick_year as i32));
                    let label = (self.options.minor_labels)(&instant);
                    if col + label.len() as u16 <= area.width {
                        buf.set_string(area.x + col, area.y, &label, styles::text_dim());
                        last_label_end = col as i64 + label.len() as i64;
                    }
                }
            }

            // Axis line, with the AD/BC boundary called out.
            let crosses_era = year <= 0 && next_year > 0;
            let (ch, style) = if crosses_era {
                ('┃', Style::default().fg(colors::ERA_MARKER).add_modifier(Modifier::BOLD))
            } else if tick.is_some() {
                ('┴', Style::default().fg(colors::BORDER))
            } else {
                ('─', Style::default().fg(colors::BORDER_DIM))
            };
            let pos = (area.x + col, area.y + 1);
            buf[pos].set_char(ch);
            buf[pos].set_style(style);
        }
    }

    /// Band color for a column at the given offset within a bar.
    fn band_color(item: &VisualItem, bar_column: u16) -> ratatui::style::Color {
        match item.bands.as_slice() {
            [] => colors::UNSTYLED_ITEM,
            [only] => only.cell_color(),
            bands => {
                let band = (bar_column / STRIPE_COLUMNS) as usize % bands.len();
                bands[band].cell_color()
            }
        }
    }

    fn render_point_item(
        &self,
        area: Rect,
        buf: &mut Buffer,
        item: &VisualItem,
        row: u16,
        is_selected: bool,
    ) {
        let Some(start) = item.start.or(item.end) else {
            return;
        };
        let col = self.year_to_column_raw(start.year());
        if col < 0 || col >= area.width as i64 {
            return;
        }
        let col = col as u16;

        let marker_style = Style::default()
            .fg(Self::band_color(item, 0))
            .add_modifier(if is_selected {
                Modifier::BOLD | Modifier::REVERSED
            } else {
                Modifier::BOLD
            });
        buf.set_string(area.x + col, area.y + row, POINT_MARKER.to_string(), marker_style);

        let label_col = col + 2;
        if label_col < area.width {
            let available = (area.width - label_col) as usize;
            let label: String = item.content.chars().take(available).collect();
            let label_style = if is_selected {
                styles::selected()
            } else {
                styles::text()
            };
            buf.set_string(area.x + label_col, area.y + row, &label, label_style);
        }
    }

    fn render_range_item(
        &self,
        area: Rect,
        buf: &mut Buffer,
        item: &VisualItem,
        row: u16,
        is_selected: bool,
    ) {
        // Open-ended sides extend to the viewport edge.
        let start_raw = item
            .start
            .map(|p| self.year_to_column_raw(p.year()))
            .unwrap_or(0);
        let end_raw = item
            .end
            .map(|p| self.year_to_column_raw(p.year()))
            .unwrap_or(area.width as i64 - 1);

        if end_raw < 0 || start_raw >= area.width as i64 {
            return;
        }

        let visible_start = start_raw.clamp(0, area.width as i64 - 1) as u16;
        let visible_end = end_raw.clamp(0, area.width as i64 - 1) as u16;
        if visible_end < visible_start {
            return;
        }

        for col in visible_start..=visible_end {
            let bar_column = (col as i64 - start_raw).max(0) as u16;
            let ch = if col as i64 == start_raw && item.start.is_some() {
                BLOCK_LEFT
            } else if col as i64 == end_raw && item.end.is_some() {
                BLOCK_RIGHT
            } else if col == visible_end && item.end.is_none() {
                OPEN_END
            } else {
                BLOCK_FULL
            };

            let mut style = Style::default().fg(Self::band_color(item, bar_column));
            if is_selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            let pos = (area.x + col, area.y + row);
            buf[pos].set_char(ch);
            buf[pos].set_style(style);
        }

        // Content label over the bar, dark on the pastel fill.
        let label_col = visible_start + 1;
        if label_col <= visible_end {
            let available = (visible_end - label_col + 1) as usize;
            let label: String = item.content.chars().take(available).collect();
            let mut style = Style::default()
                .fg(colors::BG_DARK)
                .bg(Self::band_color(
                    item,
                    (label_col as i64 - start_raw).max(0) as u16,
                ));
            if is_selected {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            buf.set_string(area.x + label_col, area.y + row, &label, style);
        }
    }

    fn render_legend(&self, area: Rect, buf: &mut Buffer) {
        let legend_y = area.y + area.height - 1;
        if self.options.horizontal_scroll {
            buf.set_string(area.x + 1, legend_y, "◀ h", styles::text_hint());
            buf.set_string(
                area.x + area.width.saturating_sub(4),
                legend_y,
                "l ▶",
                styles::text_hint(),
            );
        }
        let zoom = format!(" {:.1} yr/col ", self.state.years_per_column);
        if area.width > zoom.len() as u16 + 10 {
            buf.set_string(
                area.x + (area.width - zoom.len() as u16) / 2,
                legend_y,
                &zoom,
                styles::text_hint(),
            );
        }
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .title_style(styles::title_accent())
            .borders(Borders::ALL)
            .border_style(styles::border())
            .style(Style::default().bg(colors::BG_DARK));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 20 || inner.height < 4 {
            return;
        }

        self.render_time_axis(Rect::new(inner.x, inner.y, inner.width, 2), buf);

        let items_area = Rect::new(
            inner.x,
            inner.y + 2,
            inner.width,
            inner.height.saturating_sub(2),
        );
        let rows = assign_rows(self.items, self.options.stack, self.options.item_margin);
        let scroll_rows = if self.options.vertical_scroll {
            // Keep the selected item's row in view.
            self.state
                .selected
                .and_then(|i| rows.get(i).copied())
                .map(|row| row.saturating_sub(items_area.height.saturating_sub(1)))
                .unwrap_or(0)
        } else {
            0
        };

        for (index, item) in self.items.iter().enumerate() {
            let row = rows[index].saturating_sub(scroll_rows);
            if rows[index] < scroll_rows || row >= items_area.height {
                continue;
            }
            let is_selected = self.state.selected == Some(index);
            match item.kind {
                ItemKind::Range | ItemKind::Background => {
                    self.render_range_item(items_area, buf, item, row, is_selected)
                }
                ItemKind::Point | ItemKind::Box => {
                    self.render_point_item(items_area, buf, item, row, is_selected)
                }
            }
        }

        self.render_legend(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::build_item;
    use crate::models::{AuthorRecord, ItemId};

    fn item(id: i64, start: Option<i32>, end: Option<i32>) -> VisualItem {
        build_item(&AuthorRecord {
            id: ItemId::Int(id),
            content: format!("author-{}", id),
            start,
            end,
            occupations: vec!["poet".to_string()],
            kind: None,
            title: None,
            class_name: None,
        })
    }

    #[test]
    fn test_stacking_separates_overlaps() {
        let items = vec![
            item(1, Some(-100), Some(-20)),
            item(2, Some(-50), Some(10)), // overlaps 1
            item(3, Some(20), Some(60)),  // clear of both
        ];
        let rows = assign_rows(&items, true, 0);
        assert_eq!(rows[0], 0);
        assert_eq!(rows[1], 1);
        assert_eq!(rows[2], 0);
    }

    #[test]
    fn test_stacking_disabled_gives_distinct_rows() {
        let items = vec![item(1, Some(0), Some(10)), item(2, Some(100), Some(110))];
        let rows = assign_rows(&items, false, 0);
        assert_eq!(rows, vec![0, 1]);
    }

    #[test]
    fn test_stacking_margin_spreads_rows() {
        let items = vec![
            item(1, Some(-100), Some(-20)),
            item(2, Some(-50), Some(10)),
        ];
        let rows = assign_rows(&items, true, 1);
        assert_eq!(rows, vec![0, 2]);
    }

    #[test]
    fn test_point_items_stack_against_ranges() {
        let items = vec![item(1, Some(-100), Some(-20)), item(2, Some(-60), None)];
        let rows = assign_rows(&items, true, 0);
        assert_ne!(rows[0], rows[1]);
    }

    #[test]
    fn test_zoom_clamps_to_options() {
        let options = TimelineOptions::default();
        let mut state = TimelineState::new(&options);

        // Zoom all the way in: visible span must not fall under 10 years.
        for _ in 0..32 {
            state.zoom_in(&options, 80);
        }
        assert!(state.years_per_column * 80.0 >= 10.0);

        // Zoom all the way out: span must not exceed 3000 years.
        for _ in 0..32 {
            state.zoom_out(&options, 80);
        }
        assert!(state.years_per_column * 80.0 <= 3000.0);
    }

    #[test]
    fn test_default_state_spans_default_view() {
        let options = TimelineOptions::default();
        let state = TimelineState::new(&options);
        let span = state.years_per_column * 80.0;
        assert!((span - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_selection_wraps() {
        let options = TimelineOptions::default();
        let mut state = TimelineState::new(&options);
        state.select_next(3);
        assert_eq!(state.selected, Some(0));
        state.select_previous(3);
        assert_eq!(state.selected, Some(2));
        state.select_next(3);
        assert_eq!(state.selected, Some(0));
    }
}

//! Timeline item builder.
//!
//! Turns a raw `AuthorRecord` into a renderable `VisualItem`: integer years
//! become `CalendarPoint`s, and the occupation list becomes a CSS-like style
//! descriptor — a solid fill for one occupation, a repeating 10-unit striped
//! gradient for several.
//!
//! Styling uses a fixed palette, separate from the general-purpose hash
//! colorer in `color.rs`: an ordered list of (matcher, color) pairs evaluated
//! in priority order, matched as a case-insensitive substring of the
//! occupation.

use ratatui::style::Color;

use crate::models::{AuthorRecord, CalendarPoint, ItemKind, VisualItem};

/// A palette entry, kept as plain bytes so it can live in a const table and
/// print as the exact `#RRGGBB` text the style descriptors carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    pub fn cell_color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Ordered occupation palette: first matcher that is a substring of the
/// lowercased occupation wins.
pub const OCCUPATION_PALETTE: &[(&str, Rgb8)] = &[
    ("philosopher", Rgb8(0xB3, 0xCD, 0xE3)),   // pastel blue
    ("historian", Rgb8(0xFB, 0xB4, 0xAE)),     // pastel red
    ("poet", Rgb8(0xCC, 0xEB, 0xC5)),          // pastel green
    ("politician", Rgb8(0xDE, 0xCB, 0xE4)),    // pastel purple
    ("writer", Rgb8(0xFE, 0xD9, 0xA6)),        // pastel orange
    ("tragedian", Rgb8(0xFF, 0xFF, 0xCC)),     // pastel yellow
    ("mathematician", Rgb8(0xE5, 0xD8, 0xBD)), // pastel brown
];

/// Fill for occupations no palette entry matches.
pub const UNMATCHED_COLOR: Rgb8 = Rgb8(0xE0, 0xE0, 0xE0);

/// Border for solid single-occupation fills.
const SOLID_BORDER: &str = "#999";
/// Border for striped multi-occupation fills.
const STRIPE_BORDER: &str = "#666";

/// Width of one stripe band in the gradient descriptor, in px units.
const STRIPE_WIDTH: u32 = 10;

/// Resolve one occupation against the palette.
pub fn palette_color(occupation: &str) -> Rgb8 {
    let lowered = occupation.to_lowercase();
    OCCUPATION_PALETTE
        .iter()
        .find(|(matcher, _)| lowered.contains(matcher))
        .map(|(_, color)| *color)
        .unwrap_or(UNMATCHED_COLOR)
}

/// Resolve every occupation in order. Order matters for stripe bands, not
/// for the colors themselves.
pub fn band_colors(occupations: &[String]) -> Vec<Rgb8> {
    occupations.iter().map(|o| palette_color(o)).collect()
}

/// Build the CSS-like style descriptor for a band list.
///
/// Empty -> empty string. One band -> solid fill. Several -> a repeating
/// 45-degree gradient with each color owning one 10px band in sequence, so
/// the pattern cycles with period `bands.len() * 10`.
fn style_descriptor(bands: &[Rgb8]) -> String {
    match bands {
        [] => String::new(),
        [color] => format!(
            "background-color: {}; border-color: {};",
            color, SOLID_BORDER
        ),
        _ => {
            let steps: Vec<String> = bands
                .iter()
                .enumerate()
                .map(|(i, color)| {
                    let from = i as u32 * STRIPE_WIDTH;
                    let to = (i as u32 + 1) * STRIPE_WIDTH;
                    format!("{} {}px {}px", color, from, to)
                })
                .collect();
            format!(
                "background: repeating-linear-gradient(45deg, {}); border-color: {};",
                steps.join(", "),
                STRIPE_BORDER
            )
        }
    }
}

/// Build the renderable item for one record. Total for well-formed records:
/// missing years stay `None`, a missing occupation list means no coloring.
pub fn build_item(record: &AuthorRecord) -> VisualItem {
    let bands = band_colors(&record.occupations);
    VisualItem {
        id: record.id.clone(),
        content: record.content.clone(),
        start: record.start.map(CalendarPoint::from_year),
        end: record.end.map(CalendarPoint::from_year),
        kind: ItemKind::infer(record.kind, record.end),
        title: record.title.clone(),
        class_name: record.class_name.clone(),
        style: style_descriptor(&bands),
        bands,
    }
}

/// Build items for a whole load, preserving input order.
pub fn build_items(records: &[AuthorRecord]) -> Vec<VisualItem> {
    records.iter().map(build_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;

    fn record(occupations: &[&str]) -> AuthorRecord {
        AuthorRecord {
            id: ItemId::Int(1),
            content: "Seneca".to_string(),
            start: Some(-4),
            end: Some(65),
            occupations: occupations.iter().map(|s| s.to_string()).collect(),
            kind: Some(ItemKind::Range),
            title: None,
            class_name: None,
        }
    }

    #[test]
    fn test_no_occupations_empty_style() {
        let item = build_item(&record(&[]));
        assert_eq!(item.style, "");
        assert!(item.bands.is_empty());
    }

    #[test]
    fn test_single_occupation_solid_style() {
        let item = build_item(&record(&["philosopher"]));
        assert_eq!(
            item.style,
            "background-color: #B3CDE3; border-color: #999;"
        );
    }

    #[test]
    fn test_two_occupations_striped_style() {
        let item = build_item(&record(&["philosopher", "poet"]));
        assert_eq!(
            item.style,
            "background: repeating-linear-gradient(45deg, \
             #B3CDE3 0px 10px, #CCEBC5 10px 20px); border-color: #666;"
        );
    }

    #[test]
    fn test_three_band_period() {
        let item = build_item(&record(&["poet", "historian", "politician"]));
        assert!(item.style.contains("#CCEBC5 0px 10px"));
        assert!(item.style.contains("#FBB4AE 10px 20px"));
        assert!(item.style.contains("#DECBE4 20px 30px"));
    }

    #[test]
    fn test_substring_and_case_matching() {
        assert_eq!(palette_color("Stoic Philosopher"), Rgb8(0xB3, 0xCD, 0xE3));
        assert_eq!(palette_color("LYRIC POET"), Rgb8(0xCC, 0xEB, 0xC5));
        assert_eq!(palette_color("playwright"), UNMATCHED_COLOR);
    }

    #[test]
    fn test_palette_priority_order() {
        // Matches both "poet" and nothing earlier in the list; "poet" wins
        // over the unmatched default, and an occupation matching two entries
        // takes the earlier one.
        assert_eq!(palette_color("philosopher-poet"), Rgb8(0xB3, 0xCD, 0xE3));
    }

    #[test]
    fn test_null_years_propagate() {
        let mut rec = record(&["poet"]);
        rec.start = None;
        rec.end = None;
        rec.kind = None;
        let item = build_item(&rec);
        assert!(item.start.is_none());
        assert!(item.end.is_none());
        assert_eq!(item.kind, ItemKind::Point);
    }

    #[test]
    fn test_years_preserved_exactly() {
        let item = build_item(&record(&[]));
        assert_eq!(item.start.unwrap().year(), -4);
        assert_eq!(item.end.unwrap().year(), 65);
    }

    #[test]
    fn test_payload_to_items() {
        // One point-type and one range-type record, end to end from JSON.
        let payload = r#"[
            {"id": 1, "content": "Assassination of Caesar", "start": -44,
             "type": "point", "occupations": []},
            {"id": 2, "content": "Tacitus", "start": 56, "end": 120,
             "type": "range", "occupations": ["historian", "politician"]}
        ]"#;
        let records: Vec<AuthorRecord> = serde_json::from_str(payload).unwrap();
        let items = build_items(&records);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, ItemId::Int(1));
        assert_eq!(items[0].content, "Assassination of Caesar");
        assert!(items[0].start.is_some());
        assert!(items[0].end.is_none());
        assert_eq!(items[0].style, "");

        assert_eq!(items[1].id, ItemId::Int(2));
        assert!(items[1].start.is_some());
        assert_eq!(items[1].end.unwrap().year(), 120);
        assert!(items[1].style.contains("#FBB4AE 0px 10px"));
        assert!(items[1].style.contains("#DECBE4 10px 20px"));
    }
}

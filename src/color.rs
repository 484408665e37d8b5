//! Occupation color resolver.
//!
//! Maps an arbitrary occupation string to a deterministic pastel HSL color.
//! The hash matches the classic `s.charCodeAt(i) + ((hash << 5) - hash)`
//! string hash under 32-bit signed wrapping semantics; the wraparound is
//! load-bearing, so every step stays in `i32`.

use ratatui::style::Color;

/// Neutral fallback for missing or empty occupations.
pub const NEUTRAL_COLOR: &str = "#888";

/// An HSL color in the pastel band the resolver emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    /// Hue in degrees, 0..360.
    pub hue: u16,
    /// Saturation percent, 65..90.
    pub saturation: u8,
    /// Lightness percent, 75..85.
    pub lightness: u8,
}

impl Hsl {
    /// Convert to RGB for terminal cells.
    pub fn to_rgb(self) -> Color {
        let h = self.hue as f64 / 360.0;
        let s = self.saturation as f64 / 100.0;
        let l = self.lightness as f64 / 100.0;

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let r = hue_to_channel(p, q, h + 1.0 / 3.0);
        let g = hue_to_channel(p, q, h);
        let b = hue_to_channel(p, q, h - 1.0 / 3.0);

        Color::Rgb(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        )
    }
}

impl std::fmt::Display for Hsl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// 32-bit signed string hash over code points, wrapping after every step.
fn hash_code(s: &str) -> i32 {
    let mut hash: i32 = 0;
    for c in s.chars() {
        hash = (c as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
    }
    hash
}

/// Derive the pastel HSL color for a non-empty occupation string.
pub fn occupation_hsl(occupation: &str) -> Hsl {
    let hash = hash_code(occupation);
    Hsl {
        hue: (hash % 360).unsigned_abs() as u16,
        saturation: 65 + (hash % 25).unsigned_abs() as u8,
        lightness: 75 + (hash % 10).unsigned_abs() as u8,
    }
}

/// Resolve an occupation to a color string.
///
/// Missing or empty input yields the neutral gray constant; everything else
/// yields a deterministic `hsl(H, S%, L%)` string. Pure and total.
pub fn resolve_color(occupation: Option<&str>) -> String {
    match occupation {
        None | Some("") => NEUTRAL_COLOR.to_string(),
        Some(s) => occupation_hsl(s).to_string(),
    }
}

/// Terminal color for an occupation, neutral gray when absent.
pub fn occupation_cell_color(occupation: Option<&str>) -> Color {
    match occupation {
        None | Some("") => Color::Rgb(0x88, 0x88, 0x88),
        Some(s) => occupation_hsl(s).to_rgb(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        assert_eq!(
            resolve_color(Some("philosopher")),
            resolve_color(Some("philosopher"))
        );
        assert_eq!(resolve_color(Some("poet")), resolve_color(Some("poet")));
    }

    #[test]
    fn test_neutral_for_missing() {
        assert_eq!(resolve_color(None), "#888");
        assert_eq!(resolve_color(Some("")), "#888");
    }

    #[test]
    fn test_component_ranges() {
        for s in [
            "philosopher",
            "historian",
            "poet",
            "a",
            "épigrammatiste",
            "律詩人",
        ] {
            let hsl = occupation_hsl(s);
            assert!(hsl.hue < 360, "hue out of range for {:?}", s);
            assert!(
                (65..90).contains(&hsl.saturation),
                "saturation out of range for {:?}",
                s
            );
            assert!(
                (75..85).contains(&hsl.lightness),
                "lightness out of range for {:?}",
                s
            );
        }
    }

    #[test]
    fn test_known_vectors() {
        // "a" hashes to 97: hue 97, sat 65 + 97 % 25 = 87, light 75 + 97 % 10 = 82.
        assert_eq!(resolve_color(Some("a")), "hsl(97, 87%, 82%)");
        // "ab": 97 * 31 + 98 = 3105.
        assert_eq!(
            occupation_hsl("ab"),
            Hsl {
                hue: (3105 % 360) as u16,
                saturation: 65 + (3105 % 25) as u8,
                lightness: 75 + (3105 % 10) as u8,
            }
        );
    }

    #[test]
    fn test_long_string_wraps_without_panic() {
        let long = "mathematician".repeat(50);
        let hsl = occupation_hsl(&long);
        assert!(hsl.hue < 360);
    }

    #[test]
    fn test_hsl_to_rgb_is_light() {
        // Pastel band: every channel should sit well above mid-gray.
        let Color::Rgb(r, g, b) = occupation_hsl("poet").to_rgb() else {
            panic!("expected rgb");
        };
        assert!(r > 100 || g > 100 || b > 100);
    }
}

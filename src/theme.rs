//! Color theme for the TUI chrome.
//!
//! A warm, low-contrast dark palette that lets the pastel occupation colors
//! carry the visual weight of the timeline itself.

#![allow(dead_code)]

use ratatui::style::Color;

pub mod colors {
    use super::Color;

    // === Background ===
    /// Primary background
    pub const BG_DARK: Color = Color::Rgb(0x16, 0x15, 0x14);
    /// Medium-contrast panels
    pub const BG_MEDIUM: Color = Color::Rgb(0x1C, 0x1B, 0x19);
    /// Highlighted/selected rows
    pub const BG_HIGHLIGHT: Color = Color::Rgb(0x2A, 0x28, 0x26);

    // === Foreground ===
    /// Primary text
    pub const FG_PRIMARY: Color = Color::Rgb(0xC8, 0xC5, 0xBE);
    /// Secondary text
    pub const FG_DIM: Color = Color::Rgb(0x73, 0x70, 0x69);
    /// Hints and placeholders
    pub const FG_HINT: Color = Color::Rgb(0x52, 0x50, 0x4C);

    // === Accents ===
    /// Errors and load failures
    pub const RED: Color = Color::Rgb(0xC4, 0x6E, 0x6E);
    /// Success / loaded
    pub const GREEN: Color = Color::Rgb(0x8A, 0x9A, 0x7B);
    /// Warnings, the era boundary marker
    pub const YELLOW: Color = Color::Rgb(0xC4, 0xB2, 0x8A);
    /// Info, selection accents
    pub const BLUE: Color = Color::Rgb(0x8B, 0xA4, 0xB0);
    /// Titles
    pub const PURPLE: Color = Color::Rgb(0x95, 0x7F, 0xB8);

    // === UI elements ===
    pub const BORDER: Color = Color::Rgb(0x6E, 0x6B, 0x64);
    pub const BORDER_DIM: Color = Color::Rgb(0x38, 0x37, 0x35);
    pub const BORDER_ACCENT: Color = BLUE;

    /// Marker for the AD/BC boundary (year 0) on the axis.
    pub const ERA_MARKER: Color = YELLOW;
    /// Bar fill for items whose style descriptor is empty.
    pub const UNSTYLED_ITEM: Color = Color::Rgb(0x9A, 0x97, 0x90);
}

/// Semantic styling helpers
pub mod styles {
    use super::colors;
    use ratatui::style::{Modifier, Style};

    pub fn text() -> Style {
        Style::default().fg(colors::FG_PRIMARY)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(colors::FG_DIM)
    }

    pub fn text_hint() -> Style {
        Style::default().fg(colors::FG_HINT)
    }

    pub fn success() -> Style {
        Style::default().fg(colors::GREEN)
    }

    pub fn error() -> Style {
        Style::default().fg(colors::RED)
    }

    pub fn warning() -> Style {
        Style::default().fg(colors::YELLOW)
    }

    pub fn info() -> Style {
        Style::default().fg(colors::BLUE)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(colors::BG_DARK)
            .bg(colors::BLUE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(colors::BORDER)
    }

    pub fn border_dim() -> Style {
        Style::default().fg(colors::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(colors::BORDER_ACCENT)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_accent() -> Style {
        Style::default()
            .fg(colors::PURPLE)
            .add_modifier(Modifier::BOLD)
    }
}

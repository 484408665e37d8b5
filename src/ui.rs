//! UI rendering module.
//!
//! All ratatui drawing lives here: the header, the timeline with its detail
//! pane, the diagnostic log pane, and the overlays (load-failure popup, help).

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, LogLevel};
use crate::axis::format_year_label;
use crate::color::{occupation_cell_color, resolve_color};
use crate::theme::{colors, styles};
use crate::timeline::TimelineWidget;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(colors::BG_DARK));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header / status
            Constraint::Min(10),    // Timeline + details
            Constraint::Length(5),  // Log pane
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_logs(frame, app, chunks[2]);

    if app.error_popup.is_some() {
        render_error_popup(frame, app, area);
    }

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(app.status_text())
        .style(styles::text_dim())
        .block(
            Block::default()
                .title(" Author Timeline ")
                .title_style(styles::title())
                .borders(Borders::ALL)
                .border_style(styles::border())
                .style(Style::default().bg(colors::BG_MEDIUM)),
        );
    frame.render_widget(status, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    if app.items.is_empty() {
        render_empty_state(frame, area, app.is_loading);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let timeline = TimelineWidget::new(&app.items, &app.options, &app.timeline_state);
    frame.render_widget(timeline, chunks[0]);

    render_detail_pane(frame, app, chunks[1]);
}

/// Detail pane for the selected author.
fn render_detail_pane(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Details ")
        .title_style(styles::title_accent())
        .borders(Borders::ALL)
        .border_style(styles::border())
        .style(Style::default().bg(colors::BG_MEDIUM));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(item) = app.selected_item() else {
        let hint = Paragraph::new("j/k to select an author")
            .style(styles::text_hint())
            .alignment(Alignment::Center);
        frame.render_widget(hint, inner);
        return;
    };
    let record = app.selected_record();

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        item.content.clone(),
        styles::title(),
    )));
    if let Some(title) = &item.title {
        lines.push(Line::from(Span::styled(title.clone(), styles::text_dim())));
    }
    lines.push(Line::default());

    let start_label = item
        .start
        .map(|p| format_year_label(p.year()))
        .unwrap_or_else(|| "—".to_string());
    let end_label = item
        .end
        .map(|p| format_year_label(p.year()))
        .unwrap_or_else(|| "—".to_string());
    lines.push(Line::from(vec![
        Span::styled("Years: ", styles::text_dim()),
        Span::styled(format!("{} – {}", start_label, end_label), styles::text()),
    ]));

    // Occupation chips, colored by the general-purpose hash colorer.
    if let Some(record) = record {
        if !record.occupations.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Occupations", styles::text_dim())));
            for occupation in &record.occupations {
                lines.push(Line::from(vec![
                    Span::styled(
                        "▐█▌ ",
                        Style::default().fg(occupation_cell_color(Some(occupation))),
                    ),
                    Span::styled(occupation.clone(), styles::text()),
                    Span::styled(
                        format!("  {}", resolve_color(Some(occupation))),
                        styles::text_hint(),
                    ),
                ]));
            }
        }
    }

    if !item.style.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Style", styles::text_dim())));
        lines.push(Line::from(Span::styled(
            item.style.clone(),
            styles::text_hint(),
        )));
    }

    if let Some(class_name) = &item.class_name {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Class: ", styles::text_dim()),
            Span::styled(class_name.clone(), styles::text()),
        ]));
    }

    let details = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(details, inner);
}

fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .logs
        .iter()
        .rev()
        .take(area.height.saturating_sub(2) as usize)
        .map(|entry| {
            let (prefix, color) = match entry.level {
                LogLevel::Info => ("i", colors::BLUE),
                LogLevel::Success => ("+", colors::GREEN),
                LogLevel::Error => ("x", colors::RED),
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", prefix), Style::default().fg(color)),
                Span::styled(&entry.message, styles::text_dim()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Log ")
            .title_style(Style::default().fg(colors::FG_DIM))
            .borders(Borders::ALL)
            .border_style(styles::border_dim())
            .style(Style::default().bg(colors::BG_DARK)),
    );

    frame.render_widget(list, area);
}

/// Placeholder while loading, or when the load produced no items.
fn render_empty_state(frame: &mut Frame, area: Rect, is_loading: bool) {
    let text = if is_loading {
        "Loading author data..."
    } else {
        "No authors to display"
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_dim())
        .style(Style::default().bg(colors::BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let vertical_center = Rect::new(
        inner.x,
        inner.y + inner.height / 2,
        inner.width,
        1.min(inner.height),
    );
    let paragraph = Paragraph::new(text)
        .style(styles::text_hint())
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, vertical_center);
}

/// Load failure popup, shown in place of the visualization.
fn render_error_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(popup) = app.error_popup.as_ref() else {
        return;
    };

    let popup_area = centered_rect(60, 9, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", popup.title))
        .title_style(Style::default().fg(colors::RED).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::RED))
        .style(Style::default().bg(colors::BG_MEDIUM));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let body = Paragraph::new(format!(
        "{}\n\nPress Esc to dismiss, r to retry.",
        popup.message
    ))
    .style(styles::text())
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center);
    frame.render_widget(body, inner);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(46, 14, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keys ")
        .title_style(styles::title())
        .borders(Borders::ALL)
        .border_style(styles::border_focused())
        .style(Style::default().bg(colors::BG_MEDIUM));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let entries = [
        ("h / l", "Scroll earlier / later (Shift: faster)"),
        ("j / k", "Select next / previous author"),
        ("Enter", "Center on selection"),
        ("+ / -", "Zoom in / out"),
        ("t", "Reset to default view"),
        ("r", "Refresh data"),
        ("?", "Toggle this help"),
        ("q", "Quit"),
    ];

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!(" {:<7}", key), styles::info()),
                Span::styled(*desc, styles::text()),
            ])
        })
        .collect();

    let help = Paragraph::new(lines);
    frame.render_widget(help, inner);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

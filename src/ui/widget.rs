use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::render::DefaultView;

use super::theme::{ACTIVE_HIGHLIGHT, BORDER, HEADER_TEXT, STATUS_ERROR, STATUS_OK};

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Longest error message shown before truncation.
const MAX_ERROR_CHARS: usize = 60;

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

impl From<DefaultView> for Text<'static> {
    fn from(view: DefaultView) -> Self {
        match view {
            DefaultView::Blank => Text::default(),

            DefaultView::Spinner { label } => Text::from(vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled(format!("  {} ", spinner_frame(0)), Style::default().fg(STATUS_OK)),
                    Span::styled(label, Style::default().fg(HEADER_TEXT)),
                ]),
            ]),

            DefaultView::Error {
                message,
                retry_label,
                retry,
            } => {
                let mut lines = vec![
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("  Error: ", Style::default().fg(STATUS_ERROR)),
                        Span::styled(
                            truncate_error(&message, MAX_ERROR_CHARS),
                            Style::default().fg(HEADER_TEXT),
                        ),
                    ]),
                ];
                if retry.is_some() {
                    lines.push(Line::from(""));
                    lines.push(retry_button(&retry_label));
                }
                Text::from(lines)
            }
        }
    }
}

fn retry_button(label: &str) -> Line<'static> {
    let style = Style::default()
        .fg(HEADER_TEXT)
        .bg(ACTIVE_HIGHLIGHT)
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!(" {} ", label), style),
    ])
}

/// Draw `text` inside a bordered, titled box.
pub fn render_view(frame: &mut Frame, area: Rect, title: &str, text: Text<'static>) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER));

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Truncate error message to fit in the view.
fn truncate_error(error: &str, max_chars: usize) -> String {
    if error.chars().count() <= max_chars {
        error.to_string()
    } else {
        let kept: String = error.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Create a centered rect of given size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    symbols::border,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::util::colors;

const HINTS: &str = "Tab focus · Enter submit/open · Space preview · Ctrl-C quit";

/// Outer frame plus the status line under it. The status line carries a
/// transient notice when one is set, the key hints otherwise.
pub struct Chrome<'a> {
    status: Option<&'a str>,
}

impl<'a> Chrome<'a> {
    pub fn new(status: Option<&'a str>) -> Self {
        Self { status }
    }

    /// Area left for the view inside the frame, above the status line.
    /// Kept in step with `render`.
    pub fn content_area(area: Rect) -> Rect {
        let [frame, _status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        Block::default().borders(Borders::ALL).inner(frame)
    }
}

impl Widget for Chrome<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let [frame, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::NEUTRAL))
            .title_top(" MoodTune ")
            .title_alignment(Alignment::Center)
            .render(frame, buf);

        let (text, style) = match self.status {
            Some(notice) => (notice, Style::default().fg(colors::ERROR)),
            None => (HINTS, Style::default().fg(colors::NEUTRAL)),
        };
        Paragraph::new(Line::from(text))
            .style(style)
            .alignment(Alignment::Center)
            .render(status_area, buf);
    }
}

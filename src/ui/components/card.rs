use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    audio::state::{ControlIcon, ControlVisual},
    model::Track,
    util::colors,
};

pub const PLAY_GLYPH: &str = "󰐊";
pub const PAUSE_GLYPH: &str = "󰏤";

/// Height every card and skeleton occupies, borders included.
pub const CARD_HEIGHT: u16 = 5;

/// One recommended track: title, artist, and the play/pause control line.
/// Tracks without a preview get a de-emphasized, inert control stub.
pub struct TrackCard<'a> {
    track: &'a Track,
    visual: ControlVisual,
    selected: bool,
}

impl<'a> TrackCard<'a> {
    pub fn new(track: &'a Track, visual: ControlVisual, selected: bool) -> Self {
        Self {
            track,
            visual,
            selected,
        }
    }
}

/// The cells of a card that act as its play/pause control (the glyph and
/// its label on the control line). Mouse handling tests this region first;
/// a hit here never falls through to the card's open-link action.
pub fn control_area(card: Rect) -> Rect {
    if card.width < 4 || card.height < CARD_HEIGHT {
        return Rect::new(card.x, card.y, 0, 0);
    }
    Rect {
        x: card.x + 2,
        y: card.y + 3,
        width: card.width.saturating_sub(4).min(12),
        height: 1,
    }
}

impl Widget for TrackCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.selected {
            Style::default().fg(colors::PRIMARY)
        } else if self.visual.playing_marker {
            Style::default().fg(colors::SECONDARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(border_style);
        if self.visual.playing_marker {
            block = block.title_bottom(
                Line::from(" ♫ playing ").style(Style::default().fg(colors::SECONDARY)),
            );
        }

        let control_line = if self.track.has_preview() {
            match self.visual.icon {
                ControlIcon::Play => Line::from(vec![
                    Span::styled(PLAY_GLYPH, Style::default().fg(colors::PRIMARY)),
                    Span::raw(" Preview"),
                ]),
                ControlIcon::Pause => Line::from(vec![
                    Span::styled(PAUSE_GLYPH, Style::default().fg(colors::ACCENT)),
                    Span::raw(" Playing"),
                ]),
            }
        } else {
            Line::from(Span::styled(
                format!("{PLAY_GLYPH} No preview"),
                Style::default().fg(colors::NEUTRAL),
            ))
        };

        let lines = vec![
            Line::from(Span::styled(
                self.track.song_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.track.artist.clone(),
                Style::default().fg(colors::NEUTRAL).add_modifier(Modifier::ITALIC),
            )),
            control_line,
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

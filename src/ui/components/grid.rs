use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    audio::state::ControlVisual,
    request::lifecycle::RequestPhase,
    ui::components::card::{CARD_HEIGHT, TrackCard},
    util::colors,
};

/// Fixed number of placeholder cards shown while a request is in flight.
pub const SKELETON_CARD_COUNT: usize = 8;

pub const GRID_COLUMNS: usize = 4;

/// Row-major card rectangles for `count` items, clipped to the area.
pub fn card_layout(area: Rect, count: usize) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(count);
    let column_width = area.width / GRID_COLUMNS as u16;
    if column_width < 6 {
        return rects;
    }

    for i in 0..count {
        let row = (i / GRID_COLUMNS) as u16;
        let col = (i % GRID_COLUMNS) as u16;
        let y = area.y + row * CARD_HEIGHT;
        if y + CARD_HEIGHT > area.y + area.height {
            break;
        }
        rects.push(Rect {
            x: area.x + col * column_width,
            y,
            width: column_width,
            height: CARD_HEIGHT,
        });
    }

    rects
}

/// Card rectangles for a settled result set. The first row of the results
/// area belongs to the mood label; cards start below it.
pub fn song_card_areas(area: Rect, count: usize) -> Vec<Rect> {
    let grid = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(1),
        ..area
    };
    card_layout(grid, count)
}

/// The whole results area, rendered from the request phase: an idle hint,
/// the skeleton set, the error region (cards hidden), the single no-songs
/// placeholder, or one card per track in received order.
pub struct ResultsGrid<'a> {
    phase: &'a RequestPhase,
    visuals: &'a [ControlVisual],
    selected: Option<usize>,
}

impl<'a> ResultsGrid<'a> {
    pub fn new(
        phase: &'a RequestPhase,
        visuals: &'a [ControlVisual],
        selected: Option<usize>,
    ) -> Self {
        Self {
            phase,
            visuals,
            selected,
        }
    }
}

impl Widget for ResultsGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.phase {
            RequestPhase::Idle => {
                Paragraph::new("Tell me how you feel and press Enter.")
                    .style(Style::default().fg(colors::NEUTRAL))
                    .alignment(Alignment::Center)
                    .render(area, buf);
            }
            RequestPhase::Loading => {
                for rect in card_layout(area, SKELETON_CARD_COUNT) {
                    render_skeleton(rect, buf);
                }
            }
            RequestPhase::Error(message) => {
                Paragraph::new(format!("Error: {message}"))
                    .style(Style::default().fg(colors::ERROR))
                    .alignment(Alignment::Center)
                    .render(area, buf);
            }
            RequestPhase::Success(recommendation) if recommendation.songs.is_empty() => {
                let placeholder = Rect {
                    height: area.height.min(CARD_HEIGHT),
                    ..area
                };
                Paragraph::new("No songs found for this mood. Try different words.")
                    .style(Style::default().fg(colors::NEUTRAL))
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_set(border::ROUNDED)
                            .border_style(Style::default().fg(colors::NEUTRAL)),
                    )
                    .render(placeholder, buf);
            }
            RequestPhase::Success(recommendation) => {
                let label = Line::from(vec![
                    Span::styled(
                        "Mood: ",
                        Style::default().fg(colors::NEUTRAL),
                    ),
                    Span::styled(
                        recommendation.mood.clone(),
                        Style::default()
                            .fg(colors::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]);
                Paragraph::new(label).render(
                    Rect {
                        height: area.height.min(1),
                        ..area
                    },
                    buf,
                );

                let areas = song_card_areas(area, recommendation.songs.len());
                for (i, (track, rect)) in
                    recommendation.songs.iter().zip(areas).enumerate()
                {
                    let visual = self.visuals.get(i).copied().unwrap_or_default();
                    TrackCard::new(track, visual, self.selected == Some(i)).render(rect, buf);
                }
            }
        }
    }
}

fn render_skeleton(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(colors::NEUTRAL));
    let inner = block.inner(area);
    block.render(area, buf);

    let style = Style::default().fg(colors::NEUTRAL);
    if inner.width >= 4 && inner.height >= 2 {
        let wide = "░".repeat(inner.width.saturating_sub(2) as usize);
        let narrow = "░".repeat((inner.width / 2) as usize);
        buf.set_string(inner.x, inner.y, wide, style);
        buf.set_string(inner.x, inner.y + 1, narrow, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Recommendation, Track};
    use crate::ui::components::card::PLAY_GLYPH;
    use ratatui::{Terminal, backend::TestBackend};

    fn track(name: &str, artist: &str, preview: Option<&str>) -> Track {
        Track {
            id: None,
            song_name: name.to_string(),
            artist: artist.to_string(),
            image_url: None,
            preview_url: preview.map(str::to_string),
            spotify_url: format!("spotify://{name}"),
        }
    }

    fn render(phase: &RequestPhase, visuals: &[ControlVisual]) -> String {
        let mut terminal = Terminal::new(TestBackend::new(88, 24)).expect("terminal");
        terminal
            .draw(|f| f.render_widget(ResultsGrid::new(phase, visuals, None), f.area()))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn count_cards(text: &str) -> usize {
        text.matches('╭').count()
    }

    #[test]
    fn loading_renders_the_fixed_skeleton_set() {
        let text = render(&RequestPhase::Loading, &[]);
        assert_eq!(count_cards(&text), SKELETON_CARD_COUNT);
    }

    #[test]
    fn success_renders_one_card_per_song_in_received_order() {
        let phase = RequestPhase::Success(Recommendation {
            mood: "happy".to_string(),
            songs: vec![
                track("Alpha", "One", Some("u1")),
                track("Bravo", "Two", Some("u2")),
                track("Charlie", "Three", Some("u3")),
            ],
        });
        let text = render(&phase, &[]);

        assert_eq!(count_cards(&text), 3);
        let a = text.find("Alpha").expect("first card");
        let b = text.find("Bravo").expect("second card");
        let c = text.find("Charlie").expect("third card");
        assert!(a < b && b < c, "cards out of received order");
    }

    #[test]
    fn success_shows_the_mood_label() {
        let phase = RequestPhase::Success(Recommendation {
            mood: "happy".to_string(),
            songs: vec![track("Alpha", "One", None)],
        });
        let text = render(&phase, &[]);
        assert!(text.contains("Mood: happy"));
    }

    #[test]
    fn empty_result_renders_exactly_one_placeholder_and_zero_cards() {
        let phase = RequestPhase::Success(Recommendation {
            mood: "fear".to_string(),
            songs: vec![],
        });
        let text = render(&phase, &[]);
        assert!(text.contains("No songs found"));
        assert_eq!(count_cards(&text), 1);
        assert!(!text.contains(PLAY_GLYPH));
    }

    #[test]
    fn error_shows_message_and_hides_results() {
        let phase = RequestPhase::Error("rate limited".to_string());
        let text = render(&phase, &[]);
        assert!(text.contains("Error: rate limited"));
        assert_eq!(count_cards(&text), 0);
    }

    #[test]
    fn single_track_scenario_renders_an_enabled_control() {
        let phase = RequestPhase::Success(Recommendation {
            mood: "happy".to_string(),
            songs: vec![track("X", "Y", Some("u1"))],
        });
        let text = render(&phase, &[]);
        assert_eq!(count_cards(&text), 1);
        assert!(text.contains("X"));
        assert!(text.contains("Y"));
        assert!(text.contains(&format!("{PLAY_GLYPH} Preview")));
    }

    #[test]
    fn card_layout_is_row_major_and_clipped() {
        let area = Rect::new(0, 0, 80, CARD_HEIGHT * 2);
        let rects = card_layout(area, 12);
        // two rows fit
        assert_eq!(rects.len(), GRID_COLUMNS * 2);
        assert_eq!(rects[0].y, 0);
        assert_eq!(rects[GRID_COLUMNS].y, CARD_HEIGHT);
        assert!(rects[1].x > rects[0].x);
    }
}

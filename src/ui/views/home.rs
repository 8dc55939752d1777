use async_trait::async_trait;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    audio::state::{ControlHandle, ControlVisual},
    event::events::Event,
    model::{Language, MoodRequest, Preference},
    request::lifecycle::RequestPhase,
    ui::{
        components::{
            card,
            grid::{self, GRID_COLUMNS, ResultsGrid},
            spinner::Spinner,
        },
        context::AppContext,
        state::AppState,
        traits::{Action, View},
    },
    util::colors,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Message,
    Language,
    Preference,
    Results,
}

/// The one view: the submission form on top, the results area below it.
pub struct Home {
    message: String,
    language: Language,
    preference: Preference,
    focus: Focus,
    selected: usize,
    /// Card rectangles from the last render, for mouse hit-testing.
    card_areas: Vec<Rect>,
}

impl Default for Home {
    fn default() -> Self {
        Self {
            message: String::new(),
            language: Language::default(),
            preference: Preference::default(),
            focus: Focus::Message,
            selected: 0,
            card_areas: Vec::new(),
        }
    }
}

impl Home {
    fn submit(&self, ctx: &AppContext) {
        let message = self.message.trim();
        if message.is_empty() {
            return;
        }

        // Deliberately not gated on submit_enabled: overlapping submits are
        // allowed and the last settlement wins.
        let _ = ctx.event_tx.send(Event::Submit(MoodRequest {
            message: message.to_string(),
            language: self.language.code().to_string(),
            preference: self.preference.code().to_string(),
        }));
    }

    fn song_count(ctx: &AppContext) -> usize {
        match ctx.lifecycle.phase() {
            RequestPhase::Success(r) => r.songs.len(),
            _ => 0,
        }
    }

    fn toggle_selected(&self, ctx: &AppContext) {
        if let RequestPhase::Success(r) = ctx.lifecycle.phase()
            && let Some(track) = r.songs.get(self.selected)
            && let Some(url) = &track.preview_url
        {
            let _ = ctx.event_tx.send(Event::TogglePreview {
                url: url.clone(),
                control: ControlHandle(self.selected),
            });
        }
    }

    fn open_selected(&self, ctx: &AppContext) {
        if let RequestPhase::Success(r) = ctx.lifecycle.phase()
            && let Some(track) = r.songs.get(self.selected)
        {
            let _ = ctx
                .event_tx
                .send(Event::OpenLink(track.spotify_url.clone()));
        }
    }

    fn move_selection(&mut self, ctx: &AppContext, dx: isize, dy: isize) {
        let count = Self::song_count(ctx);
        if count == 0 {
            return;
        }
        let current = self.selected.min(count - 1) as isize;
        let next = current + dx + dy * GRID_COLUMNS as isize;
        self.selected = if next >= 0 && (next as usize) < count {
            next as usize
        } else {
            current as usize
        };
    }

    fn render_message(&self, f: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Message;
        let border_color = if focused {
            colors::PRIMARY
        } else {
            colors::NEUTRAL
        };

        // keep the tail (and the cursor) visible in a narrow field
        let inner_width = area.width.saturating_sub(3) as usize;
        let mut shown: &str = &self.message;
        while shown.width() > inner_width && !shown.is_empty() {
            let mut chars = shown.chars();
            chars.next();
            shown = chars.as_str();
        }

        let mut spans = vec![Span::raw(shown.to_string())];
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(colors::PRIMARY)));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(border_color))
            .title("How are you feeling?");
        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_options(&self, f: &mut Frame, area: Rect, ctx: &AppContext) {
        let [language_area, preference_area, submit_area] = Layout::horizontal([
            Constraint::Length(22),
            Constraint::Length(26),
            Constraint::Min(16),
        ])
        .areas(area);

        self.render_selector(
            f,
            language_area,
            "Language",
            self.language.label(),
            self.focus == Focus::Language,
        );
        self.render_selector(
            f,
            preference_area,
            "Vibe",
            self.preference.label(),
            self.focus == Focus::Preference,
        );

        if ctx.lifecycle.submit_enabled() {
            let button = Paragraph::new(Line::from(Span::styled(
                "▶ Recommend",
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .border_style(Style::default().fg(colors::PRIMARY)),
            );
            f.render_widget(button, submit_area);
        } else {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(colors::NEUTRAL));
            let inner = block.inner(submit_area);
            f.render_widget(block, submit_area);
            f.render_widget(
                Spinner::default()
                    .with_style(Style::default().fg(colors::PRIMARY))
                    .with_label("Finding songs...".to_string()),
                inner,
            );
        }
    }

    fn render_selector(&self, f: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
        let border_color = if focused {
            colors::PRIMARY
        } else {
            colors::NEUTRAL
        };
        let selector = Paragraph::new(format!("◂ {value} ▸"))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .border_style(Style::default().fg(border_color))
                    .title(title.to_string()),
            );
        f.render_widget(selector, area);
    }
}

#[async_trait]
impl View for Home {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        let [message_area, options_area, results_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .areas(area);

        self.render_message(f, message_area);
        self.render_options(f, options_area, ctx);

        let (visuals, selected) = match ctx.lifecycle.phase() {
            RequestPhase::Success(r) if !r.songs.is_empty() => {
                let visuals: Vec<ControlVisual> = (0..r.songs.len())
                    .map(|i| ctx.playback.visual(ControlHandle(i)))
                    .collect();
                let selected = (self.focus == Focus::Results)
                    .then(|| self.selected.min(r.songs.len() - 1));
                (visuals, selected)
            }
            _ => (Vec::new(), None),
        };

        self.card_areas = match ctx.lifecycle.phase() {
            RequestPhase::Success(r) if !r.songs.is_empty() => {
                grid::song_card_areas(results_area, r.songs.len())
            }
            _ => Vec::new(),
        };

        f.render_widget(
            ResultsGrid::new(ctx.lifecycle.phase(), &visuals, selected),
            results_area,
        );
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        match self.focus {
            Focus::Message => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
                KeyCode::Enter => {
                    self.submit(ctx);
                    Some(Action::None)
                }
                KeyCode::Tab => {
                    self.focus = Focus::Language;
                    Some(Action::None)
                }
                KeyCode::BackTab | KeyCode::Esc => {
                    self.focus = Focus::Results;
                    Some(Action::None)
                }
                KeyCode::Backspace => {
                    self.message.pop();
                    Some(Action::None)
                }
                KeyCode::Char(c) => {
                    self.message.push(c);
                    Some(Action::None)
                }
                _ => Some(Action::None),
            },
            Focus::Language => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    self.language = self.language.prev();
                    Some(Action::None)
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.language = self.language.next();
                    Some(Action::None)
                }
                KeyCode::Enter => {
                    self.submit(ctx);
                    Some(Action::None)
                }
                KeyCode::Tab => {
                    self.focus = Focus::Preference;
                    Some(Action::None)
                }
                KeyCode::BackTab | KeyCode::Char('/') => {
                    self.focus = Focus::Message;
                    Some(Action::None)
                }
                _ => None,
            },
            Focus::Preference => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                    self.preference = self.preference.toggled();
                    Some(Action::None)
                }
                KeyCode::Enter => {
                    self.submit(ctx);
                    Some(Action::None)
                }
                KeyCode::Tab => {
                    self.focus = Focus::Results;
                    Some(Action::None)
                }
                KeyCode::BackTab => {
                    self.focus = Focus::Language;
                    Some(Action::None)
                }
                KeyCode::Char('/') => {
                    self.focus = Focus::Message;
                    Some(Action::None)
                }
                _ => None,
            },
            Focus::Results => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    self.move_selection(ctx, -1, 0);
                    Some(Action::None)
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.move_selection(ctx, 1, 0);
                    Some(Action::None)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection(ctx, 0, 1);
                    Some(Action::None)
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection(ctx, 0, -1);
                    Some(Action::None)
                }
                // Space toggles the preview; Enter opens the track link.
                // Distinct bindings so the control never also opens the
                // card.
                KeyCode::Char(' ') => {
                    self.toggle_selected(ctx);
                    Some(Action::None)
                }
                KeyCode::Enter => {
                    self.open_selected(ctx);
                    Some(Action::None)
                }
                KeyCode::Tab => {
                    self.focus = Focus::Message;
                    Some(Action::None)
                }
                KeyCode::BackTab => {
                    self.focus = Focus::Preference;
                    Some(Action::None)
                }
                KeyCode::Char('/') => {
                    self.focus = Focus::Message;
                    Some(Action::None)
                }
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
        }
    }

    async fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return None;
        }

        let position = Position::new(mouse.column, mouse.row);
        let songs = match ctx.lifecycle.phase() {
            RequestPhase::Success(r) => &r.songs,
            _ => return None,
        };

        for (i, card_area) in self.card_areas.iter().enumerate() {
            if !card_area.contains(position) {
                continue;
            }
            let Some(track) = songs.get(i) else { break };
            self.focus = Focus::Results;
            self.selected = i;

            if card::control_area(*card_area).contains(position) {
                // The control swallows its clicks; a hit here never reaches
                // the card's open-link action. Without a preview the
                // control is inert.
                if let Some(url) = &track.preview_url {
                    let _ = ctx.event_tx.send(Event::TogglePreview {
                        url: url.clone(),
                        control: ControlHandle(i),
                    });
                }
            } else {
                let _ = ctx
                    .event_tx
                    .send(Event::OpenLink(track.spotify_url.clone()));
            }
            return Some(Action::None);
        }

        None
    }

    fn on_paste(&mut self, text: &str) {
        if self.focus == Focus::Message {
            self.message.push_str(text);
        }
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        if let Event::RecommendationsFetched(_, recommendation) = event {
            self.selected = 0;
            if !recommendation.songs.is_empty() {
                self.focus = Focus::Results;
            }
        }
    }
}

use crate::event::events::Event;
use crate::ui::context::AppContext;
use crate::ui::state::AppState;
use async_trait::async_trait;
use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    None,
}

#[async_trait]
pub trait View: Send {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext);

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action>;

    async fn handle_mouse(
        &mut self,
        _mouse: MouseEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        None
    }

    fn on_paste(&mut self, _text: &str) {}

    async fn on_event(&mut self, _event: &Event, _ctx: &AppContext) {}
}

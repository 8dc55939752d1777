use std::sync::Arc;

use flume::Receiver;

use ratatui::Frame;

use crate::{
    audio::{coordinator::PlaybackCoordinator, engine::PreviewEngine},
    event::events::Event,
    http::ApiService,
    request::lifecycle::RequestLifecycle,
    ui::{
        components::app::Chrome,
        context::AppContext,
        state::AppState,
        traits::View,
        views::Home,
    },
    util::task::TaskManager,
};

use super::util::handler::EventHandler;

pub struct App {
    pub event_rx: Receiver<Event>,
    pub ctx: AppContext,
    pub state: AppState,
    pub home: Home,
    pub task_manager: TaskManager,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let api = Arc::new(ApiService::from_env());
        let engine = PreviewEngine::new(event_tx.clone())?;

        let ctx = AppContext {
            api,
            event_tx,
            lifecycle: RequestLifecycle::new(),
            playback: PlaybackCoordinator::new(engine),
        };

        Ok(Self {
            event_rx,
            ctx,
            state: AppState::default(),
            home: Home::default(),
            task_manager: TaskManager::new(),
            has_focus: true,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = super::tui::Tui::new()?.mouse(true).paste(true);
        tui.enter()?;

        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        if !self.has_focus {
            return;
        }

        let area = frame.area();
        frame.render_widget(Chrome::new(self.state.ui.status.as_deref()), area);
        let content = Chrome::content_area(area);
        self.home.render(frame, content, &self.state, &self.ctx);
    }
}

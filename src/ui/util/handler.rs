use std::process::Command;

use ratatui::crossterm::event::KeyEvent;
use tracing::{debug, warn};

use crate::{
    event::events::Event,
    ui::{
        app::App,
        input::InputHandler,
        traits::{Action, View},
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<()> {
        if let Some(evt) = tui.next().await {
            Self::handle_terminal_event(app, evt, tui).await?;
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_app_event(app, evt).await;
        }

        Ok(())
    }

    async fn handle_terminal_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<()> {
        match evt {
            TerminalEvent::Quit => app.should_quit = true,
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Mouse(mouse) => {
                if let Some(action) = app.home.handle_mouse(mouse, &app.state, &app.ctx).await {
                    Self::dispatch_action(app, action);
                }
            }
            TerminalEvent::Paste(text) => app.home.on_paste(&text),
            _ => {}
        }

        Ok(())
    }

    async fn handle_key_event(app: &mut App, key: KeyEvent) {
        if let Some(action) = app.home.handle_input(key, &app.state, &app.ctx).await {
            Self::dispatch_action(app, action);
            return;
        }

        if let Some(event) = InputHandler::handle_key(key) {
            let _ = app.ctx.event_tx.send(event);
        }
    }

    pub async fn handle_app_event(app: &mut App, evt: Event) {
        app.home.on_event(&evt, &app.ctx).await;

        match evt {
            Event::Submit(request) => {
                app.state.ui.status = None;
                let seq = app.ctx.lifecycle.submit(&request);
                // Skeletons replace the grid, so every recorded control
                // handle just went stale.
                app.ctx.playback.detach_controls();

                let api = app.ctx.api.clone();
                let tx = app.ctx.event_tx.clone();
                // Per-submit key: an overlapping submit must not abort the
                // previous call, both settle on their own.
                app.task_manager.spawn(&format!("predict_{seq}"), async move {
                    match api.classify(&request).await {
                        Ok(recommendation) => {
                            let _ = tx.send(Event::RecommendationsFetched(seq, recommendation));
                        }
                        Err(e) => {
                            let _ = tx.send(Event::FetchError(seq, e.user_message().to_string()));
                        }
                    }
                });
            }
            Event::RecommendationsFetched(seq, recommendation) => {
                app.ctx.playback.detach_controls();
                app.ctx.lifecycle.settle(seq, Ok(recommendation));
            }
            Event::FetchError(seq, message) => {
                app.ctx.lifecycle.settle(seq, Err(message));
            }
            Event::TogglePreview { url, control } => {
                app.ctx.playback.toggle(&url, control);
            }
            Event::PreviewPaused => app.ctx.playback.on_pause(),
            Event::PreviewEnded => app.ctx.playback.on_ended(),
            Event::PreviewStarted(url) => {
                debug!(url = url.as_str(), "preview_started");
            }
            Event::PreviewError(message) => {
                app.ctx.playback.on_ended();
                app.state.ui.status = Some(format!("Preview unavailable: {message}"));
            }
            Event::OpenLink(url) => open_external(&url),
            Event::Quit => app.should_quit = true,
        }
    }

    fn dispatch_action(app: &mut App, action: Action) {
        match action {
            Action::Quit => app.should_quit = true,
            Action::None => {}
        }
    }
}

fn open_external(url: &str) {
    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", url]).spawn()
    } else {
        Command::new("xdg-open").arg(url).spawn()
    };

    if let Err(e) = result {
        warn!(url, error = %e, "open_link_failed");
    }
}

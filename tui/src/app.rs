use anyhow::Result;
use crossterm::event;
use katalab_core::{AppEvent, BackendClient, ChatPanel, EventSender, SemanticSearchPanel};
use ratatui::{backend::Backend, Frame, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use crate::{
    components::{ChatComponent, GraphComponent, SearchComponent, StatusComponent},
    handlers::{EventHandler, InputHandler},
    renderer::ForceGraphRenderer,
    state::AppState,
    utils::{layout, terminal},
};

/// Main application
pub struct App {
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new(
        backend: Arc<dyn BackendClient>,
        event_sender: EventSender,
        event_receiver: mpsc::UnboundedReceiver<AppEvent>,
    ) -> Self {
        let renderer = Arc::new(ForceGraphRenderer::new());
        let graph_slot = renderer.slot();

        let chat = ChatPanel::new(backend.clone(), event_sender.clone());
        let search = SemanticSearchPanel::new(backend, renderer, event_sender);

        Self {
            state: AppState::new(chat, search, graph_slot, event_receiver),
        }
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        let mut terminal = terminal::setup()?;

        info!("TUI initialized, starting main loop");

        // Main application loop
        let result = self.run_app(&mut terminal).await;

        // Restore terminal
        terminal::restore(&mut terminal)?;

        result
    }

    /// Main application loop
    async fn run_app<B: Backend + std::io::Write>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        loop {
            self.state.update_cursor_blink();
            self.state.expire_alert();
            self.state.tick_graph();

            // Draw UI
            terminal.draw(|f| self.ui(f))?;

            // Handle events with timeout to ensure UI responsiveness
            tokio::select! {
                // Handle terminal events (keyboard input)
                terminal_event = async {
                    if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                        event::read().ok()
                    } else {
                        None
                    }
                } => {
                    if let Some(event) = terminal_event {
                        InputHandler::handle_event(&mut self.state, event);
                    }
                },

                // Handle application events (backend completions)
                app_event = self.state.event_receiver.recv() => {
                    if let Some(event) = app_event {
                        EventHandler::handle_event(&mut self.state, event);
                    }
                },

                // Timeout to ensure regular UI updates
                _ = tokio::time::sleep(Duration::from_millis(50)) => {},
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the user interface
    fn ui(&mut self, f: &mut Frame) {
        let main_chunks = layout::create_main_layout(f.size());

        SearchComponent::render_input(&mut self.state, f, main_chunks[0]);

        // Body: results table + relationship graph side by side
        let body_chunks = layout::create_results_layout(main_chunks[1]);
        SearchComponent::render_results(&mut self.state, f, body_chunks[0]);
        GraphComponent::render(&mut self.state, f, body_chunks[1]);

        StatusComponent::render(&self.state, f, main_chunks[2]);

        // Floating chatbot overlay (render on top)
        if self.state.chat.is_open() {
            ChatComponent::render(&mut self.state, f);
        }
    }
}

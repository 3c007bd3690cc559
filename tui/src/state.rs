use katalab_core::{AppEvent, ChatPanel, SemanticSearchPanel};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::renderer::SharedGraphSlot;

const ALERT_DURATION: Duration = Duration::from_secs(3);

/// Application state
pub struct AppState {
    /// The floating chatbot panel
    pub chat: ChatPanel,

    /// The semantic lab panel
    pub search: SemanticSearchPanel,

    /// Event receiver for handling app events
    pub event_receiver: mpsc::UnboundedReceiver<AppEvent>,

    /// Current search input text and cursor (byte index)
    pub search_input: String,
    pub search_cursor: usize,

    /// Current chat input text and cursor (byte index)
    pub chat_input: String,
    pub chat_cursor: usize,

    /// Whether the application should quit
    pub should_quit: bool,

    /// Currently focused panel (0 = search input, 1 = results, 2 = graph)
    pub focused_panel: usize,

    /// Chat transcript scroll state
    pub chat_scroll: usize,

    /// Whether to auto-scroll the chat to the newest message
    pub auto_scroll_chat: bool,

    /// Transient alert shown in the status line (validation failures)
    pub alert: Option<(String, Instant)>,

    /// Whether cursor is visible (for blinking effect)
    pub cursor_visible: bool,

    /// Last time cursor blinked
    pub last_cursor_blink: Instant,

    /// Simulation slot shared with the graph renderer
    pub graph_slot: SharedGraphSlot,

    last_graph_tick: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        chat: ChatPanel,
        search: SemanticSearchPanel,
        graph_slot: SharedGraphSlot,
        event_receiver: mpsc::UnboundedReceiver<AppEvent>,
    ) -> Self {
        Self {
            chat,
            search,
            event_receiver,
            search_input: String::new(),
            search_cursor: 0,
            chat_input: String::new(),
            chat_cursor: 0,
            should_quit: false,
            focused_panel: 0,
            chat_scroll: 0,
            auto_scroll_chat: true,
            alert: None,
            cursor_visible: true,
            last_cursor_blink: Instant::now(),
            graph_slot,
            last_graph_tick: Instant::now(),
        }
    }

    /// Update cursor blinking state
    pub fn update_cursor_blink(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_cursor_blink).as_millis() >= 500 {
            self.cursor_visible = !self.cursor_visible;
            self.last_cursor_blink = now;
        }
    }

    /// Show a transient alert in the status line
    pub fn flash_alert(&mut self, text: &str) {
        self.alert = Some((text.to_string(), Instant::now()));
    }

    /// Drop the alert once it has been on screen long enough
    pub fn expire_alert(&mut self) {
        if let Some((_, since)) = &self.alert {
            if since.elapsed() >= ALERT_DURATION {
                self.alert = None;
            }
        }
    }

    /// Advance the force simulation by the elapsed wall time
    pub fn tick_graph(&mut self) {
        let now = Instant::now();
        let dt = now
            .duration_since(self.last_graph_tick)
            .as_secs_f32()
            .min(0.1);
        self.last_graph_tick = now;

        if let Ok(mut slot) = self.graph_slot.lock() {
            if let Some(sim) = slot.as_mut() {
                sim.tick(dt);
            }
        }
    }
}

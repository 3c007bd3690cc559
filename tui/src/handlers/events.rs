use katalab_core::AppEvent;
use tracing::{debug, error};

use crate::state::AppState;

/// Handles application events from the panels' spawned exchanges
pub struct EventHandler;

impl EventHandler {
    /// Handle application events
    pub fn handle_event(state: &mut AppState, event: AppEvent) {
        debug!("Handling app event: {:?}", event);
        match event {
            AppEvent::ChatReply { id, reply } => {
                state.chat.resolve_reply(id, reply);
                // Show the newest message
                state.auto_scroll_chat = true;
            }
            AppEvent::ChatFailed { id, error } => {
                error!("Chatbot exchange failed: {}", error);
                state.chat.resolve_failure(id);
                state.auto_scroll_chat = true;
            }
            AppEvent::SearchLoaded { term, results } => {
                debug!("Search '{}' returned {} results", term, results.len());
                state.search.complete(term, results);
            }
            AppEvent::SearchFailed { term, error } => {
                error!("Search '{}' failed: {}", term, error);
                state.search.fail(term);
            }
            AppEvent::Quit => {
                state.should_quit = true;
            }
        }
    }
}

pub mod backend;
pub mod chat;
pub mod events;
pub mod graph;
pub mod render;
pub mod search;

// Re-export main types for convenience
pub use backend::{BackendClient, BackendError, BackendFactory, BackendInfo, SimilarityResult};
pub use chat::{ChatMessage, ChatPanel, Sender, SubmitOutcome};
pub use events::{AppEvent, EventBus, EventSender};
pub use graph::{GraphEdge, GraphModel, GraphNode};
pub use render::{GraphConfig, GraphHandle, GraphRenderer, NodeShape, PhysicsSettings};
pub use search::{SearchOutcome, SearchPhase, SemanticSearchPanel};

use crate::backend::{BackendClient, SimilarityResult};
use crate::events::EventSender;
use crate::graph::GraphModel;
use crate::render::{GraphConfig, GraphHandle, GraphRenderer};
use std::sync::Arc;

/// Fixed message shown in the table area when a search fails
pub const SEARCH_FAILURE_TEXT: &str = "Gagal mengambil data.";

/// Validation alert for an empty search term
pub const EMPTY_TERM_ALERT: &str = "Masukkan kata!";

/// Where the panel is in its Idle → Pending → {Loaded, Empty, Failed} cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Pending,
    Loaded,
    Empty,
    Failed,
}

/// Result of a search attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Exchange started; a loaded or failed event will follow
    Started,
    /// Trimmed term was empty, nothing was sent
    EmptyTerm,
    /// The previous exchange is still in flight
    Busy,
}

/// Semantic lab panel: one similarity exchange per search, rendered as
/// a table and a force-directed graph derived from the same result set.
pub struct SemanticSearchPanel {
    backend: Arc<dyn BackendClient>,
    renderer: Arc<dyn GraphRenderer>,
    event_sender: EventSender,
    config: GraphConfig,
    phase: SearchPhase,
    term: String,
    results: Vec<SimilarityResult>,
    graph: Option<GraphHandle>,
}

impl SemanticSearchPanel {
    pub fn new(
        backend: Arc<dyn BackendClient>,
        renderer: Arc<dyn GraphRenderer>,
        event_sender: EventSender,
    ) -> Self {
        Self {
            backend,
            renderer,
            event_sender,
            config: GraphConfig::default(),
            phase: SearchPhase::Idle,
            term: String::new(),
            results: Vec::new(),
            graph: None,
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn results(&self) -> &[SimilarityResult] {
        &self.results
    }

    pub fn graph(&self) -> Option<GraphHandle> {
        self.graph
    }

    pub fn is_processing(&self) -> bool {
        self.phase == SearchPhase::Pending
    }

    /// Clear the previous presentation and fetch similarity results for
    /// the term. Completions arrive as events keyed by the term.
    pub fn search(&mut self, term: &str) -> SearchOutcome {
        let term = term.trim();
        if term.is_empty() {
            return SearchOutcome::EmptyTerm;
        }
        if self.phase == SearchPhase::Pending {
            tracing::debug!("search rejected, exchange still in flight");
            return SearchOutcome::Busy;
        }

        self.results.clear();
        self.hide_graph();
        self.term = term.to_string();
        self.phase = SearchPhase::Pending;

        let backend = self.backend.clone();
        let sender = self.event_sender.clone();
        let term = self.term.clone();
        tokio::spawn(async move {
            match backend.similar_words(&term).await {
                Ok(results) => {
                    let _ = sender.send_search_loaded(term, results);
                }
                Err(error) => {
                    let _ = sender.send_search_failed(term, error);
                }
            }
        });

        SearchOutcome::Started
    }

    /// Apply results for the exchange started by `search`
    pub fn complete(&mut self, term: String, results: Vec<SimilarityResult>) {
        if self.phase != SearchPhase::Pending || term != self.term {
            tracing::debug!(%term, "dropping completion for a superseded search");
            return;
        }

        if results.is_empty() {
            self.phase = SearchPhase::Empty;
            return;
        }

        self.results = results;
        self.phase = SearchPhase::Loaded;

        // Destroy-then-create: the old visualization must be gone before
        // a new one exists on the surface.
        let model = GraphModel::build(&self.term, &self.results);
        self.hide_graph();
        self.graph = Some(self.renderer.create(&model, &self.config));
    }

    /// Mark the exchange failed; the table area falls back to the fixed
    /// failure text and the graph stays hidden.
    pub fn fail(&mut self, term: String) {
        if self.phase != SearchPhase::Pending || term != self.term {
            return;
        }
        self.results.clear();
        self.phase = SearchPhase::Failed;
    }

    fn hide_graph(&mut self) {
        if let Some(handle) = self.graph.take() {
            self.renderer.destroy(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::events::{AppEvent, EventBus};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Renderer that records every create/destroy and the last model
    #[derive(Default)]
    struct RecordingRenderer {
        next: AtomicU64,
        created: AtomicU64,
        destroyed: Mutex<Vec<GraphHandle>>,
        last_model: Mutex<Option<GraphModel>>,
    }

    impl GraphRenderer for RecordingRenderer {
        fn create(&self, model: &GraphModel, _config: &GraphConfig) -> GraphHandle {
            self.created.fetch_add(1, Ordering::SeqCst);
            *self.last_model.lock().unwrap() = Some(model.clone());
            GraphHandle(self.next.fetch_add(1, Ordering::SeqCst))
        }

        fn destroy(&self, handle: GraphHandle) {
            self.destroyed.lock().unwrap().push(handle);
        }
    }

    struct Harness {
        panel: SemanticSearchPanel,
        renderer: Arc<RecordingRenderer>,
        receiver: tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
    }

    fn harness(delay_ms: u64) -> Harness {
        let bus = EventBus::new();
        let sender = bus.sender();
        let backend = Arc::new(MockBackend::new().with_delay(Duration::from_millis(delay_ms)));
        let renderer = Arc::new(RecordingRenderer::default());
        Harness {
            panel: SemanticSearchPanel::new(backend, renderer.clone(), sender),
            renderer,
            receiver: bus.into_receiver(),
        }
    }

    async fn settle(harness: &mut Harness) {
        match harness.receiver.recv().await.unwrap() {
            AppEvent::SearchLoaded { term, results } => harness.panel.complete(term, results),
            AppEvent::SearchFailed { term, .. } => harness.panel.fail(term),
            other => panic!("Unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_term_is_a_validation_failure() {
        let mut h = harness(10);

        assert_eq!(h.panel.search(""), SearchOutcome::EmptyTerm);
        assert_eq!(h.panel.search("   "), SearchOutcome::EmptyTerm);
        assert_eq!(h.panel.phase(), SearchPhase::Idle);
        assert_eq!(h.renderer.created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_builds_table_rows_and_graph() {
        let mut h = harness(10);

        assert_eq!(h.panel.search("alay"), SearchOutcome::Started);
        assert_eq!(h.panel.phase(), SearchPhase::Pending);
        settle(&mut h).await;

        assert_eq!(h.panel.phase(), SearchPhase::Loaded);
        let results = h.panel.results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].word, "santai");
        assert_eq!(format!("{:.3}", results[0].score), "0.820");
        assert_eq!(format!("{:.3}", results[1].score), "0.770");

        assert!(h.panel.graph().is_some());
        assert_eq!(h.renderer.created.load(Ordering::SeqCst), 1);

        let model = h.renderer.last_model.lock().unwrap().clone().unwrap();
        assert_eq!(model.nodes.len(), 3);
        assert_eq!(model.edges.len(), 2);
        assert_eq!(model.nodes[0].label, "alay");
        assert_eq!(model.edges[0].label, "0.82");
        assert_eq!(model.edges[1].label, "0.77");
        assert!(model.edges[0].width > model.edges[1].width);
    }

    #[tokio::test]
    async fn test_new_search_destroys_previous_graph() {
        let mut h = harness(10);

        h.panel.search("alay");
        settle(&mut h).await;
        let first = h.panel.graph().unwrap();

        h.panel.search("woles");
        // Clearing the presentation tears the old instance down before
        // the request is even answered
        assert!(h.panel.graph().is_none());
        assert!(h.renderer.destroyed.lock().unwrap().contains(&first));

        settle(&mut h).await;
        assert_eq!(h.panel.phase(), SearchPhase::Loaded);
        assert_eq!(h.renderer.created.load(Ordering::SeqCst), 2);
        assert_ne!(h.panel.graph(), Some(first));
    }

    #[tokio::test]
    async fn test_unknown_term_yields_empty_presentation() {
        let mut h = harness(10);

        h.panel.search("zzzzz");
        settle(&mut h).await;

        assert_eq!(h.panel.phase(), SearchPhase::Empty);
        assert!(h.panel.results().is_empty());
        assert!(h.panel.graph().is_none());
        assert_eq!(h.renderer.created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_yields_failed_presentation() {
        let mut h = harness(10);

        h.panel.search("network error");
        settle(&mut h).await;

        assert_eq!(h.panel.phase(), SearchPhase::Failed);
        assert!(h.panel.results().is_empty());
        assert!(h.panel.graph().is_none());

        // Panel stays usable for the next search
        assert_eq!(h.panel.search("alay"), SearchOutcome::Started);
        settle(&mut h).await;
        assert_eq!(h.panel.phase(), SearchPhase::Loaded);
    }

    #[tokio::test]
    async fn test_search_while_pending_is_rejected() {
        let mut h = harness(200);

        assert_eq!(h.panel.search("alay"), SearchOutcome::Started);
        assert_eq!(h.panel.search("woles"), SearchOutcome::Busy);
        assert_eq!(h.panel.term(), "alay");
    }
}

use crate::graph::GraphModel;

/// Opaque handle to one live graph visualization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphHandle(pub u64);

/// Node shape drawn by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Dot,
}

/// Parameters of the force simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsSettings {
    pub enabled: bool,
    pub repulsion: f32,
    pub spring: f32,
    pub damping: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            repulsion: 150.0,
            spring: 0.05,
            damping: 0.9,
        }
    }
}

/// Fixed configuration every graph is created with
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    pub node_shape: NodeShape,
    pub node_border_width: f64,
    pub smooth_edges: bool,
    pub physics: PhysicsSettings,
    pub improved_layout: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_shape: NodeShape::Dot,
            node_border_width: 2.0,
            smooth_edges: true,
            physics: PhysicsSettings::default(),
            improved_layout: true,
        }
    }
}

/// Visualization capability the search panel draws through. A handle
/// stays valid until passed to `destroy`; the panel destroys the old
/// instance before creating a new one.
pub trait GraphRenderer: Send + Sync {
    /// Create a visualization for `model`, returning a handle to it
    fn create(&self, model: &GraphModel, config: &GraphConfig) -> GraphHandle;

    /// Tear down a previously created visualization
    fn destroy(&self, handle: GraphHandle);
}

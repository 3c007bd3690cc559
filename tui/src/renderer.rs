use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use katalab_core::{GraphConfig, GraphHandle, GraphModel, GraphRenderer};

// Simulation world, independent of the terminal size
const WORLD_WIDTH: f64 = 200.0;
const WORLD_HEIGHT: f64 = 200.0;
const SEED_RADIUS: f64 = 60.0;

/// Per-node visual payload carried through the simulation
#[derive(Clone, Debug, Default)]
pub struct NodeVisual {
    pub label: String,
    pub color: String,
    pub size: f64,
    pub font_size: u16,
}

/// Edge visuals kept alongside the simulation, by node index
#[derive(Clone, Debug)]
pub struct EdgeVisual {
    pub source: DefaultNodeIdx,
    pub target: DefaultNodeIdx,
    pub label: String,
    pub width: f64,
}

/// A live force-directed layout for one graph model
pub struct GraphSim {
    pub handle: GraphHandle,
    pub graph: ForceGraph<NodeVisual, ()>,
    pub edges: Vec<EdgeVisual>,
    physics: bool,
}

impl GraphSim {
    pub fn tick(&mut self, dt: f32) {
        if self.physics {
            self.graph.update(dt);
        }
    }
}

pub type SharedGraphSlot = Arc<Mutex<Option<GraphSim>>>;

/// GraphRenderer backed by a force_graph simulation. The drawing
/// component shares the slot and paints whatever simulation is live;
/// `destroy` empties the slot so stale layouts can never linger.
pub struct ForceGraphRenderer {
    slot: SharedGraphSlot,
    next_handle: AtomicU64,
}

impl ForceGraphRenderer {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            next_handle: AtomicU64::new(1),
        }
    }

    pub fn slot(&self) -> SharedGraphSlot {
        self.slot.clone()
    }
}

impl Default for ForceGraphRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphRenderer for ForceGraphRenderer {
    fn create(&self, model: &GraphModel, config: &GraphConfig) -> GraphHandle {
        let mut graph = ForceGraph::new(SimulationParameters {
            force_charge: config.physics.repulsion,
            force_spring: config.physics.spring,
            force_max: 100.0,
            node_speed: 3000.0,
            damping_factor: config.physics.damping,
        });

        let mut id_to_idx = HashMap::new();
        for (i, node) in model.nodes.iter().enumerate() {
            // The hub sits in the middle; neighbors seed on a circle so
            // the layout heuristic starts untangled
            let angle = (i as f64) * 2.0 * PI / model.nodes.len().max(1) as f64;
            let (x, y) = if i == 0 || !config.improved_layout {
                ((WORLD_WIDTH / 2.0) as f32, (WORLD_HEIGHT / 2.0) as f32)
            } else {
                (
                    (WORLD_WIDTH / 2.0 + SEED_RADIUS * angle.cos()) as f32,
                    (WORLD_HEIGHT / 2.0 + SEED_RADIUS * angle.sin()) as f32,
                )
            };

            let idx = graph.add_node(NodeData {
                x,
                y,
                mass: (node.size / 2.0) as f32,
                is_anchor: false,
                user_data: NodeVisual {
                    label: node.label.clone(),
                    color: node.color.to_string(),
                    size: node.size,
                    font_size: node.font_size,
                },
            });
            id_to_idx.insert(node.id.clone(), idx);
        }

        let mut edges = Vec::with_capacity(model.edges.len());
        for edge in &model.edges {
            if let (Some(&src), Some(&tgt)) = (id_to_idx.get(&edge.from), id_to_idx.get(&edge.to))
            {
                graph.add_edge(src, tgt, EdgeData::default());
                edges.push(EdgeVisual {
                    source: src,
                    target: tgt,
                    label: edge.label.clone(),
                    width: edge.width,
                });
            }
        }

        let handle = GraphHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        let sim = GraphSim {
            handle,
            graph,
            edges,
            physics: config.physics.enabled,
        };
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(sim);
        }
        handle
    }

    fn destroy(&self, handle: GraphHandle) {
        if let Ok(mut slot) = self.slot.lock() {
            if slot.as_ref().map(|sim| sim.handle) == Some(handle) {
                *slot = None;
            }
        }
    }
}

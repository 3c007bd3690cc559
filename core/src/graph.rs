use crate::backend::SimilarityResult;

// Style policy is fixed per role; only edge width follows the data.
pub const CENTER_COLOR: &str = "#0d47a1";
pub const CENTER_FONT_COLOR: &str = "#fff";
pub const CENTER_FONT_SIZE: u16 = 20;
pub const CENTER_SIZE: f64 = 30.0;

pub const NEIGHBOR_COLOR: &str = "#00b894";
pub const NEIGHBOR_FONT_COLOR: &str = "#222";
pub const NEIGHBOR_FONT_SIZE: u16 = 16;
pub const NEIGHBOR_SIZE: f64 = 20.0;

pub const EDGE_COLOR: &str = "#b2bec3";
pub const EDGE_BASE_WIDTH: f64 = 2.0;
pub const EDGE_WIDTH_SCALE: f64 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub color: &'static str,
    pub font_color: &'static str,
    pub font_size: u16,
    pub size: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub label: String,
    pub color: &'static str,
    pub width: f64,
}

/// Node/edge shape handed to the graph renderer. Rebuilt from scratch
/// for every result set; never mutated in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphModel {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphModel {
    /// Build the center-plus-neighbors model for one result set: the
    /// query term in the middle, one node and one scored edge per result.
    pub fn build(term: &str, results: &[SimilarityResult]) -> Self {
        let mut nodes = Vec::with_capacity(results.len() + 1);
        let mut edges = Vec::with_capacity(results.len());

        nodes.push(GraphNode {
            id: term.to_string(),
            label: term.to_string(),
            color: CENTER_COLOR,
            font_color: CENTER_FONT_COLOR,
            font_size: CENTER_FONT_SIZE,
            size: CENTER_SIZE,
        });

        for result in results {
            nodes.push(GraphNode {
                id: result.word.clone(),
                label: result.word.clone(),
                color: NEIGHBOR_COLOR,
                font_color: NEIGHBOR_FONT_COLOR,
                font_size: NEIGHBOR_FONT_SIZE,
                size: NEIGHBOR_SIZE,
            });
            edges.push(GraphEdge {
                from: term.to_string(),
                to: result.word.clone(),
                label: format!("{:.2}", result.score),
                color: EDGE_COLOR,
                width: EDGE_BASE_WIDTH + result.score * EDGE_WIDTH_SCALE,
            });
        }

        Self { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(entries: &[(&str, f64)]) -> Vec<SimilarityResult> {
        entries
            .iter()
            .map(|(word, score)| SimilarityResult {
                word: (*word).to_string(),
                score: *score,
            })
            .collect()
    }

    #[test]
    fn test_build_center_plus_neighbors() {
        let model = GraphModel::build("alay", &results(&[("santai", 0.82), ("woles", 0.77)]));

        assert_eq!(model.nodes.len(), 3);
        assert_eq!(model.edges.len(), 2);

        let center = &model.nodes[0];
        assert_eq!(center.id, "alay");
        assert_eq!(center.color, CENTER_COLOR);
        assert_eq!(center.size, CENTER_SIZE);

        let neighbor = &model.nodes[1];
        assert_eq!(neighbor.id, "santai");
        assert_eq!(neighbor.color, NEIGHBOR_COLOR);

        assert_eq!(model.edges[0].from, "alay");
        assert_eq!(model.edges[0].to, "santai");
        assert_eq!(model.edges[0].label, "0.82");
        assert_eq!(model.edges[1].label, "0.77");
    }

    #[test]
    fn test_edge_width_increases_with_score() {
        let model = GraphModel::build(
            "alay",
            &results(&[("a", 0.1), ("b", 0.5), ("c", 0.51), ("d", 0.99)]),
        );

        let widths: Vec<f64> = model.edges.iter().map(|e| e.width).collect();
        for pair in widths.windows(2) {
            assert!(pair[1] > pair[0], "width must grow with score: {:?}", widths);
        }
        assert!((widths[0] - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_results_build_only_center() {
        let model = GraphModel::build("alay", &[]);
        assert_eq!(model.nodes.len(), 1);
        assert!(model.edges.is_empty());
    }
}

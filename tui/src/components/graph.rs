use std::collections::HashMap;

use force_graph::DefaultNodeIdx;
use katalab_core::SearchPhase;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::renderer::NodeVisual;
use crate::state::AppState;

const GRAPH_PLACEHOLDER: &str = "Graf akan muncul setelah pencarian.";

/// Component that paints the live force-directed layout
pub struct GraphComponent;

impl GraphComponent {
    pub fn render(state: &mut AppState, f: &mut Frame, area: Rect) {
        let focused = state.focused_panel == 2 && !state.chat.is_open();
        let border_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let title = if focused {
            " Graf Relasi [FOCUSED] "
        } else {
            " Graf Relasi "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        // The graph stays hidden for everything but a loaded result set
        if state.search.phase() != SearchPhase::Loaded {
            let placeholder = Paragraph::new(GRAPH_PLACEHOLDER)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(placeholder, area);
            return;
        }

        let slot = state.graph_slot.clone();
        let guard = match slot.lock() {
            Ok(guard) => guard,
            Err(_) => return,
        };
        let Some(sim) = guard.as_ref() else {
            let placeholder = Paragraph::new(GRAPH_PLACEHOLDER)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(placeholder, area);
            return;
        };

        // Snapshot positions once; edges refer to nodes by index
        let mut positions: HashMap<DefaultNodeIdx, (f64, f64)> = HashMap::new();
        let mut nodes: Vec<(f64, f64, NodeVisual)> = Vec::new();
        sim.graph.visit_nodes(|node| {
            let (x, y) = (node.x() as f64, node.y() as f64);
            positions.insert(node.index(), (x, y));
            nodes.push((x, y, node.data.user_data.clone()));
        });

        let (x_bounds, y_bounds) = bounds(&nodes);
        let edges = &sim.edges;

        let canvas = Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                // Edges first so nodes paint over them
                for edge in edges {
                    let (Some(&(x1, y1)), Some(&(x2, y2))) =
                        (positions.get(&edge.source), positions.get(&edge.target))
                    else {
                        continue;
                    };
                    ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: edge_shade(edge.width),
                    });
                    ctx.print(
                        (x1 + x2) / 2.0,
                        (y1 + y2) / 2.0,
                        Span::styled(edge.label.clone(), Style::default().fg(Color::Gray)),
                    );
                }

                for (x, y, visual) in &nodes {
                    ctx.draw(&Circle {
                        x: *x,
                        y: *y,
                        radius: visual.size / 4.0,
                        color: hex_color(&visual.color),
                    });

                    let label_style = if visual.font_size >= 18 {
                        // The hub label is larger in the source style
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    ctx.print(
                        x + visual.size / 4.0 + 1.0,
                        *y,
                        Span::styled(visual.label.clone(), label_style),
                    );
                }
            });

        f.render_widget(canvas, area);
    }
}

/// World-space bounds with a margin so labels stay inside the frame
fn bounds(nodes: &[(f64, f64, NodeVisual)]) -> ([f64; 2], [f64; 2]) {
    let mut min_x = f64::MAX;
    let mut max_x = f64::MIN;
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;

    for (x, y, _) in nodes {
        min_x = min_x.min(*x);
        max_x = max_x.max(*x);
        min_y = min_y.min(*y);
        max_y = max_y.max(*y);
    }

    if nodes.is_empty() {
        return ([0.0, 1.0], [0.0, 1.0]);
    }

    let pad_x = ((max_x - min_x) * 0.25).max(20.0);
    let pad_y = ((max_y - min_y) * 0.25).max(10.0);
    (
        [min_x - pad_x, max_x + pad_x],
        [min_y - pad_y, max_y + pad_y],
    )
}

/// Stronger similarity reads as a brighter edge
fn edge_shade(width: f64) -> Color {
    if width >= 5.5 {
        Color::White
    } else if width >= 4.0 {
        Color::Gray
    } else {
        Color::DarkGray
    }
}

/// Parse "#rgb" / "#rrggbb" into a terminal color
fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    let (r, g, b) = match digits.len() {
        3 => {
            let parse = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
            match (parse(0), parse(1), parse(2)) {
                (Ok(r), Ok(g), Ok(b)) => (r, g, b),
                _ => return Color::White,
            }
        }
        6 => {
            let parse = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
            match (parse(0), parse(2), parse(4)) {
                (Ok(r), Ok(g), Ok(b)) => (r, g, b),
                _ => return Color::White,
            }
        }
        _ => return Color::White,
    };
    Color::Rgb(r, g, b)
}

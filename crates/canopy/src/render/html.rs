//! Interactive renderer: self-contained vis.js network document.
//!
//! Emits one HTML file embedding the node/edge payload; the vis-network
//! runtime is pulled from a CDN at view time, so rendering itself needs
//! no external engine and only surfaces decode and file-write errors.

use super::color::score_color_hsl;
use super::label::{display_token, score_breakdown};
use crate::decode::TokenDecoder;
use crate::error::Result;
use crate::tree::CompletionTree;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Maximum decoded-token display length in HTML labels.
const HTML_LABEL_LEN: usize = 15;

#[derive(Debug, Serialize)]
struct VisNode {
    id: u32,
    label: String,
    title: String,
    shape: &'static str,
    color: VisColor,
    /// Node size scales with pass count.
    value: usize,
    font: VisFont,
    #[serde(rename = "leafStats")]
    leaf_stats: LeafStats,
}

#[derive(Debug, Serialize)]
struct VisColor {
    background: String,
    border: String,
}

#[derive(Debug, Serialize)]
struct VisFont {
    size: u32,
}

/// Endpoint statistics surfaced to the click handler.
#[derive(Debug, Serialize)]
struct LeafStats {
    total: usize,
    correct: Option<usize>,
    incorrect: Option<usize>,
    score: Option<f64>,
}

#[derive(Debug, Serialize)]
struct VisEdge {
    from: u32,
    to: u32,
    arrows: &'static str,
    color: EdgeColor,
    smooth: Smooth,
}

#[derive(Debug, Serialize)]
struct EdgeColor {
    color: &'static str,
    highlight: &'static str,
}

#[derive(Debug, Serialize)]
struct Smooth {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "forceDirection")]
    force_direction: &'static str,
    roundness: f64,
}

/// Render the graph as an interactive HTML document at `path`.
pub fn render_html<P: AsRef<Path>>(
    tree: &CompletionTree,
    decoder: &dyn TokenDecoder,
    path: P,
) -> Result<()> {
    let (nodes, edges) = build_network(tree, decoder)?;

    let document = TEMPLATE
        .replace("__NODES__", &serde_json::to_string(&nodes)?)
        .replace("__EDGES__", &serde_json::to_string(&edges)?);

    fs::write(path.as_ref(), document)?;
    info!(path = %path.as_ref().display(), "HTML visualization saved");
    Ok(())
}

/// Walk the graph once and build the vis.js payload.
fn build_network(
    tree: &CompletionTree,
    decoder: &dyn TokenDecoder,
) -> Result<(Vec<VisNode>, Vec<VisEdge>)> {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for id in tree.walk() {
        let node = tree.node(id);
        let text = escape_html(&display_token(decoder, node.token_id(), HTML_LABEL_LEN)?);

        let mut title = match node.token_id() {
            Some(token) => format!("Token: '{text}'\nID: {token}"),
            None => "Root".to_string(),
        };
        title.push_str(&format!("\nPaths: {}", node.pass_count()));
        let breakdown = if node.leaf_count() > 0 {
            score_breakdown(node)
        } else {
            None
        };
        match breakdown {
            Some((correct, incorrect, mean)) => {
                title.push_str(&format!(
                    "\nEndpoints: {} ({correct}\u{2713}/{incorrect}\u{2717} {:.1}%)",
                    node.leaf_count(),
                    mean * 100.0
                ));
            }
            None => title.push_str(&format!("\nEndpoints: {}", node.leaf_count())),
        }

        let (shape, color) = if node.token_id().is_none() {
            (
                "circle",
                VisColor {
                    background: "lightgray".to_string(),
                    border: "black".to_string(),
                },
            )
        } else {
            let c = score_color_hsl(node.mean_score());
            let shape = if node.is_endpoint() { "box" } else { "ellipse" };
            (
                shape,
                VisColor {
                    background: c.background,
                    border: c.border,
                },
            )
        };

        nodes.push(VisNode {
            id: id.index() as u32,
            label: format!("{text}\nN:{}", node.pass_count()),
            title,
            shape,
            color,
            value: node.pass_count(),
            font: VisFont { size: 10 },
            leaf_stats: LeafStats {
                total: node.leaf_count(),
                correct: breakdown.map(|(c, _, _)| c),
                incorrect: breakdown.map(|(_, i, _)| i),
                score: node.mean_score(),
            },
        });

        for (_, child) in node.children() {
            edges.push(VisEdge {
                from: id.index() as u32,
                to: child.index() as u32,
                arrows: "to",
                color: EdgeColor {
                    color: "#cccccc",
                    highlight: "#888888",
                },
                smooth: Smooth {
                    kind: "cubicBezier",
                    force_direction: "vertical",
                    roundness: 0.4,
                },
            });
        }
    }

    Ok((nodes, edges))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Completion Tree Visualization</title>
    <script type="text/javascript" src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
    <style type="text/css">
        #network {
            width: 100%;
            height: 90vh;
            border: 1px solid lightgray;
            background-color: #f8f8f8;
        }
        body, html {
            margin: 0;
            padding: 0;
            overflow: hidden;
            font-family: sans-serif;
            display: flex;
            flex-direction: column;
            height: 100vh;
        }
        #node-info {
            padding: 10px;
            border-top: 1px solid lightgray;
            background-color: #eee;
            font-size: 0.9em;
            height: 10vh;
            overflow-y: auto;
        }
        #node-info strong { margin-right: 5px; }
        #node-info span { margin-right: 15px; }
    </style>
</head>
<body>

<div id="network"></div>
<div id="node-info">Click a node to see statistics.</div>

<script type="text/javascript">
    var nodes = new vis.DataSet(__NODES__);
    var edges = new vis.DataSet(__EDGES__);

    var container = document.getElementById('network');
    var data = { nodes: nodes, edges: edges };
    var options = {
        layout: {
            hierarchical: {
                enabled: true,
                levelSeparation: 150,
                nodeSpacing: 100,
                treeSpacing: 200,
                blockShifting: true,
                edgeMinimization: true,
                parentCentralization: true,
                direction: 'UD',
                sortMethod: 'directed'
            }
        },
        interaction: {
            dragNodes: true,
            dragView: true,
            hover: true,
            zoomView: true,
            tooltipDelay: 200
        },
        physics: { enabled: false },
        nodes: {
            shape: 'dot',
            size: 16,
            font: { size: 10, color: '#333' },
            borderWidth: 1.5
        },
        edges: {
            width: 1,
            color: { inherit: 'both' },
            smooth: {
                enabled: true,
                type: "cubicBezier",
                forceDirection: 'vertical',
                roundness: 0.4
            }
        },
        scaling: {
            min: 10,
            max: 50,
            label: { enabled: true, min: 8, max: 20 }
        }
    };
    var network = new vis.Network(container, data, options);

    var nodeInfoDiv = document.getElementById('node-info');

    network.on("click", function (params) {
        if (params.nodes.length > 0) {
            var nodeId = params.nodes[0];
            var nodeData = nodes.get(nodeId);
            var stats = nodeData.leafStats;
            var output = "<strong>Selected Node:</strong> " + (nodeData.label.split('\n')[0] || nodeData.id) + " (ID: " + nodeData.id + ")";

            if (stats) {
                output += "<br><strong>Endpoints:</strong> ";
                output += "<span>Total: " + stats.total + "</span> ";
                if (stats.correct !== null && stats.incorrect !== null && stats.score !== null) {
                    var scoreText = (stats.score * 100).toFixed(1) + '%';
                    output += "<span>" + stats.correct + " ✓ / " + stats.incorrect + " ✗ (" + scoreText + ")</span>";
                }
            } else {
                output += "<br>No statistics available for this node.";
            }
            nodeInfoDiv.innerHTML = output;
        } else {
            nodeInfoDiv.innerHTML = "Click a node to see statistics.";
        }
    });

    network.on("stabilizationIterationsDone", function () {
        network.setOptions({ physics: false });
    });
</script>

</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CanopyError;
    use crate::tree::TokenId;

    fn decoder(id: TokenId) -> Option<String> {
        match id {
            1 => Some("<a>".to_string()),
            2 => Some("b".to_string()),
            3 => Some("c".to_string()),
            4 => Some("d".to_string()),
            _ => None,
        }
    }

    fn sample_tree() -> CompletionTree {
        CompletionTree::builder()
            .completions(vec![vec![1, 2, 3], vec![4, 2, 3]])
            .scores(vec![1.0, 0.0])
            .build()
            .unwrap()
    }

    #[test]
    fn network_matches_graph_shape() {
        let tree = sample_tree();
        let (nodes, edges) = build_network(&tree, &decoder).unwrap();

        assert_eq!(nodes.len(), tree.node_count());
        // Shared suffix: two edges converge on the shared node.
        assert_eq!(edges.len(), 5);
        let root = &nodes[0];
        assert_eq!(root.shape, "circle");
        assert_eq!(root.value, 2);
    }

    #[test]
    fn labels_are_html_escaped() {
        let tree = sample_tree();
        let (nodes, _) = build_network(&tree, &decoder).unwrap();
        let escaped = nodes.iter().find(|n| n.label.contains("&lt;a&gt;"));
        assert!(escaped.is_some());
    }

    #[test]
    fn endpoint_stats_reach_the_click_panel() {
        let tree = sample_tree();
        let (nodes, _) = build_network(&tree, &decoder).unwrap();
        let endpoint = nodes.iter().find(|n| n.shape == "box").unwrap();
        assert_eq!(endpoint.leaf_stats.total, 2);
        assert_eq!(endpoint.leaf_stats.correct, Some(1));
        assert_eq!(endpoint.leaf_stats.incorrect, Some(1));
        assert_eq!(endpoint.leaf_stats.score, Some(0.5));
    }

    #[test]
    fn decode_failure_propagates() {
        let tree = sample_tree();
        let bad = |_: TokenId| -> Option<String> { None };
        let err = build_network(&tree, &bad).unwrap_err();
        assert!(matches!(err, CanopyError::DecodeFailure { .. }));
    }

    #[test]
    fn document_embeds_the_payload() {
        let tree = sample_tree();
        let path = std::env::temp_dir().join("canopy_render_html_test.html");
        render_html(&tree, &decoder, &path).unwrap();

        let document = fs::read_to_string(&path).unwrap();
        assert!(document.contains("vis.DataSet"));
        assert!(document.contains("\"leafStats\""));
        assert!(!document.contains("__NODES__"));
        fs::remove_file(&path).ok();
    }
}

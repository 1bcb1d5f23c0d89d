//! Score-to-color gradient shared by both renderers.
//!
//! Mean scores map onto a continuous red (0.0) through yellow (0.5) to
//! green (1.0) gradient. Nodes without scores render neutral grey.

/// Fill and border colors for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeColor {
    pub background: String,
    pub border: String,
}

/// Red/green/blue channels for a clamped score.
fn gradient_rgb(score: f64) -> (f64, f64, f64) {
    let score = score.clamp(0.0, 1.0);
    if score < 0.5 {
        // Red (255,0,0) to yellow (255,255,0).
        (255.0, 255.0 * (score * 2.0), 0.0)
    } else {
        // Yellow (255,255,0) to green (0,255,0).
        (255.0 * (1.0 - (score - 0.5) * 2.0), 255.0, 0.0)
    }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Hex colors for the graphviz renderer. Border is 20% darker.
pub(crate) fn score_color_hex(score: Option<f64>) -> NodeColor {
    let Some(score) = score else {
        return NodeColor {
            background: "#D8D8D8".to_string(),
            border: "#A9A9A9".to_string(),
        };
    };

    let (r, g, b) = gradient_rgb(score);
    let border_factor = 0.8;
    NodeColor {
        background: format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b)),
        border: format!(
            "#{:02x}{:02x}{:02x}",
            channel(r * border_factor),
            channel(g * border_factor),
            channel(b * border_factor)
        ),
    }
}

/// Edge tint for the graphviz renderer, 60% brightness of the node
/// gradient; plain grey when no score is available.
pub(crate) fn edge_color_hex(score: Option<f64>) -> String {
    let Some(score) = score else {
        return "#888888".to_string();
    };
    let (r, g, b) = gradient_rgb(score);
    let edge_factor = 0.6;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(r * edge_factor),
        channel(g * edge_factor),
        channel(b)
    )
}

/// HSL colors for the HTML renderer. Border is 15 points darker.
pub(crate) fn score_color_hsl(score: Option<f64>) -> NodeColor {
    let Some(score) = score else {
        return NodeColor {
            background: "hsl(0, 0%, 85%)".to_string(),
            border: "hsl(0, 0%, 65%)".to_string(),
        };
    };

    // Red (0°) through yellow (60°) to green (120°).
    let hue = score.clamp(0.0, 1.0) * 120.0;
    let saturation = 85.0;
    let lightness = 65.0;
    let border_lightness: f64 = lightness - 15.0;
    NodeColor {
        background: format!("hsl({hue:.1}, {saturation:.1}%, {lightness:.1}%)"),
        border: format!("hsl({hue:.1}, {saturation:.1}%, {:.1}%)", border_lightness.max(0.0)),
    }
}

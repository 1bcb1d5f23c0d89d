//! Node label shaping shared by both renderers.

use crate::decode::TokenDecoder;
use crate::error::Result;
use crate::tree::{Node, TokenId};

/// Decode a token for display: whitespace is made visible and long
/// strings are truncated. The root (no token) displays as `ROOT`.
pub(crate) fn display_token(
    decoder: &dyn TokenDecoder,
    token_id: Option<TokenId>,
    max_length: usize,
) -> Result<String> {
    let Some(token_id) = token_id else {
        return Ok("ROOT".to_string());
    };

    let decoded = decoder.decode_token(token_id)?;
    let visible = decoded
        .replace('\n', "<NL>")
        .replace(' ', "<SP>")
        .replace('\t', "<TAB>");

    if visible.chars().count() > max_length {
        let keep: String = visible.chars().take(max_length.saturating_sub(3)).collect();
        Ok(format!("{keep}..."))
    } else {
        Ok(visible)
    }
}

/// Endpoint statistics for a node when scores are available:
/// (endpoints counted correct, counted incorrect, mean score).
pub(crate) fn score_breakdown(node: &Node) -> Option<(usize, usize, f64)> {
    let mean = node.mean_score()?;
    let leaves = node.leaf_count();
    let correct = (mean.clamp(0.0, 1.0) * leaves as f64).round() as usize;
    Some((correct, leaves - correct, mean))
}

//! Static renderer: DOT emission plus an external graphviz layout run.
//!
//! The graph is emitted as DOT text and handed to the external `dot`
//! binary for PDF layout. Graphviz is the only external engine in the
//! crate; when it is missing the failure is recoverable through
//! [`PdfOptions::fail_silently`].

use super::color::{edge_color_hex, score_color_hex};
use super::label::{display_token, score_breakdown};
use crate::decode::TokenDecoder;
use crate::error::{CanopyError, Result};
use crate::tree::CompletionTree;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Options for [`render_pdf`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfOptions {
    /// Open the produced file with the platform viewer afterwards.
    pub view: bool,
    /// On a missing/broken layout engine, log a warning and return
    /// `Ok(false)` instead of an error.
    pub fail_silently: bool,
}

/// Maximum decoded-token display length in PDF labels.
const PDF_LABEL_LEN: usize = 20;

/// Render the graph to a PDF at `path` (a `.pdf` extension is appended
/// when missing).
///
/// Returns `Ok(true)` on success. With `fail_silently`, a missing or
/// failing layout engine yields `Ok(false)`; decode and I/O failures
/// always propagate.
pub fn render_pdf<P: AsRef<Path>>(
    tree: &CompletionTree,
    decoder: &dyn TokenDecoder,
    path: P,
    options: &PdfOptions,
) -> Result<bool> {
    render_with_engine(tree, decoder, path.as_ref(), options, "dot")
}

/// [`render_pdf`] with the layout command injectable, so the
/// missing-engine path can be driven without uninstalling graphviz.
fn render_with_engine(
    tree: &CompletionTree,
    decoder: &dyn TokenDecoder,
    path: &Path,
    options: &PdfOptions,
    engine: &str,
) -> Result<bool> {
    if let Err(e) = Command::new(engine).arg("-V").output() {
        let msg = format!(
            "graphviz '{engine}' not found in PATH ({e}); install graphviz to enable PDF rendering"
        );
        if options.fail_silently {
            warn!("{msg}; skipping PDF render");
            return Ok(false);
        }
        return Err(CanopyError::RenderEngineUnavailable(msg));
    }

    let dot_source = to_dot(tree, decoder)?;
    let pdf_path = ensure_pdf_extension(path);

    match run_dot(engine, &dot_source, &pdf_path) {
        Ok(()) => {}
        Err(CanopyError::RenderEngineUnavailable(msg)) if options.fail_silently => {
            warn!("{msg}; skipping PDF render");
            return Ok(false);
        }
        Err(e) => return Err(e),
    }
    info!(path = %pdf_path.display(), "PDF visualization saved");

    if options.view {
        open_file(&pdf_path);
    }
    Ok(true)
}

/// Emit the graph as DOT text.
///
/// Callers that want to drive graphviz themselves (or another DOT
/// consumer) can take this instead of [`render_pdf`].
pub fn to_dot(tree: &CompletionTree, decoder: &dyn TokenDecoder) -> Result<String> {
    let mut out = String::new();
    out.push_str("digraph completions {\n");
    out.push_str("    bgcolor=\"#FFFFF0\";\n");
    out.push_str("    rankdir=TB;\n");
    out.push_str("    ranksep=0.5;\n");
    out.push_str("    nodesep=0.3;\n");
    out.push_str("    splines=ortho;\n");
    out.push_str("    fontname=\"Helvetica\";\n");
    out.push_str("    node [fontname=\"Helvetica\", fontsize=10, margin=\"0.1,0.05\"];\n\n");

    for id in tree.walk() {
        let node = tree.node(id);
        let text = escape_dot(&display_token(decoder, node.token_id(), PDF_LABEL_LEN)?);

        let mut label = match node.token_id() {
            Some(token) => format!("\\\"{text}\\\"\\nT:{token}\\nN:{}", node.pass_count()),
            None => format!("{text}\\nN:{}", node.pass_count()),
        };
        if node.leaf_count() > 0 {
            write!(label, "\\nL:{}", node.leaf_count()).unwrap();
            if let Some((correct, incorrect, mean)) = score_breakdown(node) {
                write!(
                    label,
                    " ({correct}\u{2713}/{incorrect}\u{2717} {:.0}%)",
                    mean * 100.0
                )
                .unwrap();
            }
        }

        let color = score_color_hex(node.mean_score());
        let (shape, extra) = if node.token_id().is_none() {
            (
                "octagon",
                ", fillcolor=\"#2F4F4F\", fontcolor=white, color=black, penwidth=2.0, fontsize=12"
                    .to_string(),
            )
        } else if node.is_endpoint() {
            (
                "diamond",
                format!(
                    ", fillcolor=\"{}\", color=\"{}\", penwidth=1.8",
                    color.background, color.border
                ),
            )
        } else {
            // Inner nodes cycle through shapes for visual variety.
            let shape = match id.index() % 3 {
                0 => "hexagon",
                1 => "pentagon",
                _ => "septagon",
            };
            (
                shape,
                format!(
                    ", fillcolor=\"{}\", color=\"{}\", penwidth=1.5",
                    color.background, color.border
                ),
            )
        };
        writeln!(
            out,
            "    n{} [label=\"{label}\", shape={shape}, style=filled{extra}];",
            id.index()
        )
        .unwrap();
    }
    out.push('\n');

    for id in tree.walk() {
        for (_, child_id) in tree.node(id).children() {
            let child = tree.node(child_id);
            let style = if child.is_endpoint() { "bold" } else { "solid" };
            let color = edge_color_hex(child.mean_score());
            writeln!(
                out,
                "    n{} -> n{} [style={style}, color=\"{color}\", penwidth=1.2, arrowsize=0.8];",
                id.index(),
                child_id.index()
            )
            .unwrap();
        }
    }

    out.push_str("}\n");
    Ok(out)
}

/// Pipe DOT source through `dot -Tpdf`.
fn run_dot(engine: &str, dot_source: &str, pdf_path: &Path) -> Result<()> {
    let mut child = Command::new(engine)
        .arg("-Tpdf")
        .arg("-o")
        .arg(pdf_path)
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CanopyError::RenderEngineUnavailable(format!("failed to run {engine}: {e}")))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(dot_source.as_bytes())?;
    }
    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(CanopyError::RenderEngineUnavailable(format!(
            "dot exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}

fn ensure_pdf_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".pdf");
            PathBuf::from(name)
        }
    }
}

/// Best-effort open with the platform viewer; failure only warns.
fn open_file(path: &Path) {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(target_os = "windows")]
    let opener = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let opener = "xdg-open";

    match Command::new(opener).arg(path).spawn() {
        Ok(_) => debug!(path = %path.display(), "opened viewer"),
        Err(e) => warn!(path = %path.display(), "could not open viewer: {e}"),
    }
}

fn escape_dot(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

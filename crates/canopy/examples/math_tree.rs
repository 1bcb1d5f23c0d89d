//! Math answer tree example.
//!
//! Builds a completion tree from a batch of (pre-generated) candidate
//! answers to a word problem and renders it as HTML and, when graphviz
//! is installed, as PDF. Generation itself is out of scope here; the
//! token sequences below stand in for sampled model outputs.

use anyhow::Result;
use canopy::prelude::*;

// The problem: the three next highest jumpers reach 23, 27 and 28
// inches; Ravi jumps 1.5x their average. Correct answer: 39 inches.
const VOCAB: &[&str] = &[
    "The",       // 0
    " average",  // 1
    " is",       // 2
    " 26",       // 3
    " 78",       // 4
    " so",       // 5
    " Ravi",     // 6
    " jumps",    // 7
    " 39",       // 8
    " 117",      // 9
    " inches",   // 10
    ".",         // 11
];

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Eight sampled answer paths: most find the average (26) and the
    // right answer (39); two sum instead of averaging and get 117.
    let completions: Vec<Vec<u32>> = vec![
        vec![0, 1, 2, 3, 5, 6, 7, 8, 10, 11],
        vec![0, 1, 2, 3, 5, 6, 7, 8, 10, 11],
        vec![0, 1, 2, 3, 6, 7, 8, 10, 11],
        vec![0, 1, 2, 4, 5, 6, 7, 9, 10, 11],
        vec![0, 1, 2, 4, 6, 7, 9, 10, 11],
        vec![6, 7, 8, 10, 11],
        vec![6, 7, 8, 10],
        vec![0, 1, 2, 3, 5, 6, 7, 9, 10, 11],
    ];
    let scores = vec![1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];

    let tree = CompletionTree::builder()
        .completions(completions)
        .scores(scores)
        .build()?;

    println!(
        "Built graph: {} nodes from {} completions",
        tree.node_count(),
        tree.get(tree.root()).map(|n| n.pass_count()).unwrap_or(0)
    );

    let decoder = |id: u32| VOCAB.get(id as usize).map(|s| s.to_string());

    render_html(&tree, &decoder, "math_tree.html")?;
    println!("Wrote math_tree.html");

    // PDF needs the graphviz `dot` binary; skip quietly if absent.
    let rendered = render_pdf(
        &tree,
        &decoder,
        "math_tree.pdf",
        &PdfOptions {
            view: false,
            fail_silently: true,
        },
    )?;
    if rendered {
        println!("Wrote math_tree.pdf");
    } else {
        println!("Skipped PDF (graphviz not installed)");
    }

    Ok(())
}

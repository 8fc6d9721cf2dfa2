//! Hands a graph description to the external `dot` renderer.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::*;

use crate::dot::DotGraph;
use crate::errors::QuizError;

pub const DEFAULT_BASENAME: &str = "tree_diagram";
pub const DEFAULT_FORMAT: &str = "pdf";

/// Pipes the graph's DOT source through `dot -T<format>` and writes the
/// rendered bytes to `<basename>.<format>`, returning that path.
pub fn render(graph: &DotGraph, basename: &str, format: &str) -> Result<PathBuf, QuizError> {
    let source = graph.source();
    debug!(
        "Rendering {} nodes and {} edges to {} output",
        graph.node_count(),
        graph.edge_count(),
        format,
    );

    let mut child = Command::new("dot")
        .arg(format!("-T{}", format))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| QuizError::Renderer(format!("failed to start dot: {}", err)))?;

    {
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| QuizError::Renderer("failed to open dot stdin".to_string()))?;
        stdin.write_all(source.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(QuizError::Renderer(stderr.trim().to_string()));
    }

    let path = PathBuf::from(format!("{}.{}", basename, format));
    let mut file = File::create(&path)?;
    file.write_all(&output.stdout)?;

    Ok(path)
}

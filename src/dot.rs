//! A small builder for Graphviz DOT graph descriptions.

/// An accumulated directed-graph description, serialized on demand by
/// [`DotGraph::source`].
#[derive(Debug, Default)]
pub struct DotGraph {
    comment: String,
    graph_attrs: Vec<(String, String)>,
    nodes: Vec<DotNode>,
    edges: Vec<DotEdge>,
}

#[derive(Debug)]
struct DotNode {
    id: String,
    label: String,
    shape: String,
}

#[derive(Debug)]
struct DotEdge {
    from: String,
    to: String,
    label: String,
}

impl DotGraph {
    pub fn new(comment: &str) -> Self {
        Self {
            comment: comment.to_string(),
            ..Self::default()
        }
    }

    /// Sets a graph-level attribute such as `dpi`.
    pub fn attr(&mut self, key: &str, value: &str) {
        self.graph_attrs.push((key.to_string(), value.to_string()));
    }

    pub fn node(&mut self, id: &str, label: &str, shape: &str) {
        self.nodes.push(DotNode {
            id: id.to_string(),
            label: label.to_string(),
            shape: shape.to_string(),
        });
    }

    pub fn edge(&mut self, from: &str, to: &str, label: &str) {
        self.edges.push(DotEdge {
            from: from.to_string(),
            to: to.to_string(),
            label: label.to_string(),
        });
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Emits the graph in DOT format.
    pub fn source(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("// {}", self.comment));
        lines.push("digraph {".to_string());

        for (key, value) in &self.graph_attrs {
            lines.push(format!("    {}=\"{}\";", key, escape_dot(value)));
        }

        for node in &self.nodes {
            lines.push(format!(
                "    \"{}\" [label=\"{}\" shape={}];",
                escape_dot(&node.id),
                escape_dot(&node.label),
                node.shape,
            ));
        }

        for edge in &self.edges {
            lines.push(format!(
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                escape_dot(&edge.from),
                escape_dot(&edge.to),
                escape_dot(&edge.label),
            ));
        }

        lines.push("}".to_string());
        lines.join("\n")
    }
}

/// Escape a string for use inside a double-quoted DOT value.
fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

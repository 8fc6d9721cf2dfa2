//! Maps a decision tree onto a graph description for rendering.
//!
//! One pass over the nodes emits a labeled, shaped graph node per tree node;
//! a second pass emits a labeled directed edge per option that has a `next`
//! target. Options without one are dead-end choices and produce nothing.

use crate::dot::DotGraph;
use crate::{QuizNode, QuizOption, Scenario};

/// Edge labels longer than this are cut and marked with an ellipsis.
pub const EDGE_LABEL_MAX: usize = 40;

const FINAL_SHAPE: &str = "doubleoctagon";
const QUESTION_SHAPE: &str = "box";

/// Derives the display label for a node.
///
/// Terminal nodes are labeled "Answer N" where N is the last two characters
/// of the key with '0' stripped from both ends. A key ending in "00" thus
/// yields a bare "Answer " label; that oddity is longstanding scenario-schema
/// behavior and is kept as is.
pub fn node_label(key: &str, node: &QuizNode) -> String {
    if node.is_final {
        let chars: Vec<char> = key.chars().collect();
        let start = chars.len().saturating_sub(2);
        let tail: String = chars[start..].iter().collect();
        format!("Answer {}", tail.trim_matches('0'))
    } else {
        format!("Question {}", node.question.as_deref().unwrap_or("None"))
    }
}

pub fn node_shape(node: &QuizNode) -> &'static str {
    if node.is_final {
        FINAL_SHAPE
    } else {
        QUESTION_SHAPE
    }
}

/// Derives the display label for an option edge: the choice text, followed by
/// the option's semicolon-separated effects joined with ", ", capped at
/// [`EDGE_LABEL_MAX`] characters.
pub fn edge_label(opt: &QuizOption) -> String {
    let mut label = opt.text.clone().unwrap_or_else(|| "None".to_string());
    if let Some(action) = &opt.action {
        label.push(' ');
        label.push_str(&action.split(';').collect::<Vec<_>>().join(", "));
    }
    truncate(&label, EDGE_LABEL_MAX)
}

/// A plain prefix cut, not word-aware. Counts characters, not bytes.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

/// Builds the full graph description for a scenario.
pub fn build_graph(scenario: &Scenario) -> DotGraph {
    let mut dot = DotGraph::new("Decision Tree");
    dot.attr("dpi", "600");

    for (key, node) in scenario.iter() {
        dot.node(key, &node_label(key, node), node_shape(node));
    }

    for (key, node) in scenario.iter() {
        for opt in &node.options {
            if let Some(next) = &opt.next {
                dot.edge(key, next, &edge_label(opt));
            }
        }
    }

    dot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn final_node() -> QuizNode {
        QuizNode {
            is_final: true,
            ..QuizNode::default()
        }
    }

    fn option(text: &str, action: Option<&str>) -> QuizOption {
        QuizOption {
            text: Some(text.to_string()),
            action: action.map(str::to_string),
            next: None,
        }
    }

    #[test]
    fn answer_label_strips_zeros() {
        assert_eq!(node_label("a07", &final_node()), "Answer 7");
        assert_eq!(node_label("a10", &final_node()), "Answer 1");
        assert_eq!(node_label("a00", &final_node()), "Answer ");
    }

    #[test]
    fn answer_label_uses_last_two_characters() {
        assert_eq!(node_label("12345", &final_node()), "Answer 45");
        assert_eq!(node_label("7", &final_node()), "Answer 7");
    }

    #[test]
    fn question_label_uses_question_text() {
        let node = QuizNode {
            question: Some("Is it raining?".to_string()),
            ..QuizNode::default()
        };
        assert_eq!(node_label("1", &node), "Question Is it raining?");
    }

    #[test]
    fn question_label_degrades_when_text_missing() {
        assert_eq!(node_label("1", &QuizNode::default()), "Question None");
    }

    #[test]
    fn shape_tracks_final_flag() {
        assert_eq!(node_shape(&final_node()), "doubleoctagon");
        assert_eq!(node_shape(&QuizNode::default()), "box");
    }

    #[test]
    fn edge_label_without_action() {
        assert_eq!(edge_label(&option("Yes", None)), "Yes");
    }

    #[test]
    fn edge_label_joins_action_pieces() {
        assert_eq!(edge_label(&option("Yes", Some("log;notify"))), "Yes log, notify");
    }

    #[test]
    fn edge_label_truncates_past_forty_characters() {
        let text: String = "x".repeat(41);
        assert_eq!(edge_label(&option(&text, None)), format!("{}...", "x".repeat(40)));

        let exact: String = "y".repeat(40);
        assert_eq!(edge_label(&option(&exact, None)), exact);
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let s: String = "ä".repeat(41);
        assert_eq!(truncate(&s, 40), format!("{}...", "ä".repeat(40)));
    }
}

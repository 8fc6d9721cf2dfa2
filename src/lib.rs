use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::fs;
use std::path::Path;

use log::*;
use serde::Deserialize;

pub use crate::{
    actions::AudioCue,
    errors::QuizError,
    graph::build_graph,
};

pub mod actions;
pub mod dot;
pub mod errors;
pub mod graph;
pub mod render;

/// The node the original scenarios start from.
pub const START_NODE_KEY: &str = "1";

/// One choice available at a question node.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizOption {
    pub text: Option<String>,
    /// Zero or more semicolon-separated effect descriptions, e.g. `"+drums;-bass"`.
    pub action: Option<String>,
    /// Key of the node this choice leads to. Absent for dead-end choices.
    pub next: Option<String>,
}

/// One entry in the decision tree: a branching question node or a terminal
/// answer node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizNode {
    pub question: Option<String>,
    pub subheader: Option<String>,
    /// Milliseconds to hold before presenting this node.
    pub delay: Option<u64>,
    #[serde(rename = "final", default)]
    pub is_final: bool,
    #[serde(default)]
    pub options: Vec<QuizOption>,
}

/// A warning produced by [`Scenario::lint`]. Never fatal; the binaries log
/// these and keep going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintWarning {
    DanglingNext { node: String, target: String },
    Unreachable { node: String },
    MissingStart,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingNext { node, target } => {
                write!(f, "node {} has an option pointing at missing node {}", node, target)
            }
            Self::Unreachable { node } => {
                write!(f, "node {} is unreachable from node {}", node, START_NODE_KEY)
            }
            Self::MissingStart => {
                write!(f, "scenario has no start node {}", START_NODE_KEY)
            }
        }
    }
}

/// A read-only decision tree, keyed by node id. Loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct Scenario {
    nodes: BTreeMap<String, QuizNode>,
}

impl Scenario {
    /// Parses a scenario document. The top-level JSON value is an array of
    /// trees; only the first tree is consumed.
    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        let mut trees: Vec<BTreeMap<String, QuizNode>> = serde_json::from_str(json)?;
        if trees.is_empty() {
            return Err(QuizError::EmptyScenario);
        }
        Ok(Self {
            nodes: trees.swap_remove(0),
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn get(&self, key: &str) -> Option<&QuizNode> {
        self.nodes.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// Iterates nodes in key order, so output derived from a scenario is
    /// deterministic across runs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &QuizNode)> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks cross-references without failing the run: dangling `next`
    /// targets and nodes that can never be visited.
    pub fn lint(&self) -> Vec<LintWarning> {
        let mut warnings = Vec::new();

        for (key, node) in &self.nodes {
            for opt in &node.options {
                if let Some(next) = &opt.next {
                    if !self.nodes.contains_key(next) {
                        warnings.push(LintWarning::DanglingNext {
                            node: key.clone(),
                            target: next.clone(),
                        });
                    }
                }
            }
        }

        if !self.nodes.contains_key(START_NODE_KEY) {
            warnings.push(LintWarning::MissingStart);
            return warnings;
        }

        let mut seen = BTreeSet::new();
        let mut stack = vec![START_NODE_KEY.to_string()];
        while let Some(key) = stack.pop() {
            if !seen.insert(key.clone()) {
                continue;
            }
            if let Some(node) = self.nodes.get(&key) {
                for opt in &node.options {
                    if let Some(next) = &opt.next {
                        if !seen.contains(next) {
                            stack.push(next.clone());
                        }
                    }
                }
            }
        }
        for key in self.nodes.keys() {
            if !seen.contains(key) {
                warnings.push(LintWarning::Unreachable { node: key.clone() });
            }
        }

        warnings
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExecutionState {
    Stopped,
    WaitingOnOptionSelection,
    Running,
}

/// A choice as presented to the client while the walker is suspended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOption {
    pub id: u32,
    pub text: Option<String>,
    pub destination: Option<String>,
}

/// Why [`TreeWalker::continue_walk`] handed control back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuspendReason {
    /// A node was entered. `delay_ms` is how long the original presentation
    /// holds before showing it.
    Node {
        key: String,
        question: Option<String>,
        subheader: Option<String>,
        delay_ms: u64,
    },
    /// An audio loop should start or stop, or the walk is restarting.
    Cue(AudioCue),
    /// The client must pick an option before the walk can continue.
    Options(Vec<WalkOption>),
    /// A terminal node was reached; carries the last node's key.
    Complete(String),
}

/// Walks a [`Scenario`] interactively, one suspension at a time.
///
/// The client drives every path the same way: call `set_node` once, then
/// loop on `continue_walk`, answering `Options` suspensions with
/// `set_selected_option`.
pub struct TreeWalker {
    pub scenario: Scenario,
    pub execution_state: ExecutionState,
    current_node: String,
    active_loops: BTreeSet<String>,
    queue: VecDeque<SuspendReason>,
}

impl TreeWalker {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            execution_state: ExecutionState::Stopped,
            current_node: String::new(),
            active_loops: BTreeSet::new(),
            queue: VecDeque::new(),
        }
    }

    /// Audio loops currently playing, by file name.
    pub fn active_loops(&self) -> &BTreeSet<String> {
        &self.active_loops
    }

    pub fn set_node(&mut self, key: &str) -> Result<(), QuizError> {
        let node = self
            .scenario
            .get(key)
            .ok_or_else(|| QuizError::UnknownNode(key.to_string()))?;

        debug!("Entering node {}", key);

        self.queue.push_back(SuspendReason::Node {
            key: key.to_string(),
            question: node.question.clone(),
            subheader: node.subheader.clone(),
            delay_ms: node.delay.unwrap_or(0),
        });

        if node.is_final || node.options.is_empty() {
            self.queue.push_back(SuspendReason::Complete(key.to_string()));
        } else {
            let options = node
                .options
                .iter()
                .enumerate()
                .map(|(i, opt)| WalkOption {
                    id: i as u32,
                    text: opt.text.clone(),
                    destination: opt.next.clone(),
                })
                .collect();
            self.queue.push_back(SuspendReason::Options(options));
        }

        self.current_node = key.to_string();
        self.execution_state = ExecutionState::Running;

        Ok(())
    }

    pub fn continue_walk(&mut self) -> Result<SuspendReason, QuizError> {
        if self.execution_state == ExecutionState::WaitingOnOptionSelection {
            return Err(QuizError::WaitingOnChoice);
        }

        let reason = self.queue.pop_front().ok_or(QuizError::NotRunning)?;

        self.execution_state = match &reason {
            SuspendReason::Options(_) => ExecutionState::WaitingOnOptionSelection,
            SuspendReason::Complete(_) => ExecutionState::Stopped,
            _ => ExecutionState::Running,
        };

        Ok(reason)
    }

    pub fn set_selected_option(&mut self, selected: u32) -> Result<(), QuizError> {
        if self.execution_state != ExecutionState::WaitingOnOptionSelection {
            return Err(QuizError::NotWaitingOnChoice);
        }

        let (option, available) = {
            let node = self
                .scenario
                .get(&self.current_node)
                .ok_or_else(|| QuizError::UnknownNode(self.current_node.clone()))?;
            (node.options.get(selected as usize).cloned(), node.options.len())
        };
        let option = option.ok_or(QuizError::InvalidChoice { selected, available })?;

        self.execution_state = ExecutionState::Running;
        debug!("Selected option: {}", selected);

        let mut refresh = false;
        if let Some(action) = &option.action {
            for cue in actions::parse_actions(action) {
                match &cue {
                    AudioCue::StartLoop(file) => {
                        // A loop that is already playing stays as it is.
                        if self.active_loops.insert(file.clone()) {
                            self.queue.push_back(SuspendReason::Cue(cue));
                        }
                    }
                    AudioCue::StopLoop(file) => {
                        if self.active_loops.remove(file) {
                            self.queue.push_back(SuspendReason::Cue(cue));
                        }
                    }
                    AudioCue::Refresh => {
                        refresh = true;
                        self.queue.push_back(SuspendReason::Cue(cue));
                    }
                }
            }
        }

        if refresh {
            // The original presentation reloads the page here, which kills
            // all running audio and lands back on the start node.
            self.active_loops.clear();
            return self.set_node(START_NODE_KEY);
        }

        match option.next {
            Some(next) if self.scenario.contains_key(&next) => self.set_node(&next),
            Some(next) => {
                warn!("Option {} points at missing node {}; ending walk", selected, next);
                self.queue
                    .push_back(SuspendReason::Complete(self.current_node.clone()));
                Ok(())
            }
            None => {
                self.queue
                    .push_back(SuspendReason::Complete(self.current_node.clone()));
                Ok(())
            }
        }
    }
}

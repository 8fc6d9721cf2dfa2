use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum QuizError {
    /// The scenario file could not be read or an output file written.
    Io(io::Error),
    /// The scenario document is not valid JSON of the expected shape.
    Json(serde_json::Error),
    /// The top-level array of trees is empty.
    EmptyScenario,
    /// A node key was requested that the scenario does not contain.
    UnknownNode(String),
    /// `continue_walk` was called while still waiting on an option selection.
    WaitingOnChoice,
    /// `set_selected_option` was called while not waiting on one.
    NotWaitingOnChoice,
    /// The selected option index is out of range for the current node.
    InvalidChoice { selected: u32, available: usize },
    /// The walker has nothing left to do; no node has been set.
    NotRunning,
    /// The external `dot` renderer could not be run or reported failure.
    Renderer(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Json(err) => write!(f, "malformed scenario json: {}", err),
            Self::EmptyScenario => write!(f, "scenario document contains no trees"),
            Self::UnknownNode(key) => write!(f, "no node named {} has been loaded", key),
            Self::WaitingOnChoice => {
                write!(f, "cannot continue the walk; still waiting on an option selection")
            }
            Self::NotWaitingOnChoice => {
                write!(f, "an option was selected, but the walker wasn't waiting for one")
            }
            Self::InvalidChoice { selected, available } => write!(
                f,
                "{} is not a valid option id (expected a number below {})",
                selected, available
            ),
            Self::NotRunning => write!(f, "the walker is not running; no node has been set"),
            Self::Renderer(msg) => write!(f, "renderer failed: {}", msg),
        }
    }
}

impl Error for QuizError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

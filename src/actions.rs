//! Parsing of option `action` strings into audio cues.
//!
//! An action string is a semicolon-separated list of effects: `+name` starts
//! the loop `name.wav`, `-name` schedules it to stop. The single word
//! `refresh` (the whole string, not one piece of it) restarts the scenario.

use log::*;

const SOUND_EXTENSION: &str = ".wav";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCue {
    /// Begin looping the named sound file.
    StartLoop(String),
    /// Let the named loop finish its current pass, then stop it.
    StopLoop(String),
    /// Restart the walk from the start node, silencing all loops.
    Refresh,
}

pub fn parse_actions(action: &str) -> Vec<AudioCue> {
    if action.trim() == "refresh" {
        return vec![AudioCue::Refresh];
    }

    let mut cues = Vec::new();
    for piece in action.split(';') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        if let Some(name) = piece.strip_prefix('+') {
            cues.push(AudioCue::StartLoop(format!("{}{}", name, SOUND_EXTENSION)));
        } else if let Some(name) = piece.strip_prefix('-') {
            cues.push(AudioCue::StopLoop(format!("{}{}", name, SOUND_EXTENSION)));
        } else {
            debug!("Ignoring unrecognized action piece: {}", piece);
        }
    }
    cues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_and_stop() {
        let cues = parse_actions("+drums;-bass");
        assert_eq!(
            cues,
            vec![
                AudioCue::StartLoop("drums.wav".to_string()),
                AudioCue::StopLoop("bass.wav".to_string()),
            ]
        );
    }

    #[test]
    fn trims_and_skips_empty_pieces() {
        let cues = parse_actions(" +a ; ;; -b ");
        assert_eq!(
            cues,
            vec![
                AudioCue::StartLoop("a.wav".to_string()),
                AudioCue::StopLoop("b.wav".to_string()),
            ]
        );
    }

    #[test]
    fn refresh_is_whole_string_only() {
        assert_eq!(parse_actions(" refresh "), vec![AudioCue::Refresh]);
        // A "refresh" piece inside a longer action is not a restart.
        assert_eq!(parse_actions("refresh;+a"), vec![AudioCue::StartLoop("a.wav".to_string())]);
    }

    #[test]
    fn unrecognized_pieces_are_skipped() {
        assert_eq!(parse_actions("log;notify"), vec![]);
    }
}

// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of the emotional-state annotation from model replies.
//!
//! The persona asks the model to finish every reply with a line such as
//! `#STATE {"comfort": 0.4, "trust": 0.7, "autonomy": 0.5}`. This crate finds
//! that trailing record and decodes it. A missing or unreadable annotation is
//! an ordinary outcome, never an error: the reply is still delivered and
//! stored verbatim.
//!
//! The fragment is matched with `\{[^}]+\}`, which stops at the first closing
//! brace. A nested payload such as `{"a": {"b": 1}}` is therefore cut short
//! and fails to decode. Nested payloads are not supported.

use std::sync::LazyLock;

use regex::Regex;
use seha_core::EmotionState;
use tracing::debug;

/// Marker the default persona asks the model to emit.
pub const DEFAULT_MARKER: &str = "#STATE";

/// First `{...}` fragment, ending at the first `}`.
static FRAGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]+\}").expect("fragment pattern is valid"));

/// What the parser found in a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// The marker does not occur in the reply.
    Absent,
    /// The marker occurs but no brace fragment follows it.
    NoFragment,
    /// A fragment was found but is not a JSON object.
    Malformed { fragment: String, error: String },
    /// A decoded emotional state.
    Parsed(EmotionState),
}

impl Annotation {
    /// The decoded state, if any.
    pub fn into_state(self) -> Option<EmotionState> {
        match self {
            Annotation::Parsed(state) => Some(state),
            _ => None,
        }
    }
}

/// Parser for marker-introduced annotations.
#[derive(Debug, Clone)]
pub struct AnnotationParser {
    marker: String,
}

impl Default for AnnotationParser {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl AnnotationParser {
    /// Creates a parser for the given marker token.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Inspects `reply` and reports what, if anything, was annotated.
    ///
    /// Only the text between the first marker and the next one (or the end
    /// of the reply) is searched.
    pub fn extract(&self, reply: &str) -> Annotation {
        let Some(after) = reply
            .split_once(self.marker.as_str())
            .map(|(_, rest)| rest)
        else {
            return Annotation::Absent;
        };

        let section = after
            .split_once(self.marker.as_str())
            .map_or(after, |(head, _)| head)
            .trim();

        let Some(fragment) = FRAGMENT_RE.find(section) else {
            debug!(marker = %self.marker, "annotation marker without a brace fragment");
            return Annotation::NoFragment;
        };

        match serde_json::from_str::<EmotionState>(fragment.as_str()) {
            Ok(state) => Annotation::Parsed(state),
            Err(e) => {
                debug!(
                    error = %e,
                    fragment = fragment.as_str(),
                    "annotation fragment did not decode"
                );
                Annotation::Malformed {
                    fragment: fragment.as_str().to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Shorthand for `extract(reply).into_state()`.
    pub fn parse(&self, reply: &str) -> Option<EmotionState> {
        self.extract(reply).into_state()
    }
}

//! Structured metadata recorded by the text processors.
//!
//! All indices are byte offsets into the clean text as it stood when the
//! recording processor built its output. Entries are kept in insertion
//! order; downstream renderers sort links by start index before drawing
//! anchors.

use serde::{Deserialize, Serialize};

/// How an emphasis span was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmphasisKind {
    /// Wrapped in one or more asterisks; markers are stripped from clean text.
    Asterisk,
    /// An uppercase word of three or more letters; clean text is untouched.
    Caps,
}

/// A stretch of text the speaker should stress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmphasisSpan {
    /// The emphasized words, without any markers.
    pub text: String,
    /// Byte offset of the span's first byte in the clean text.
    pub start: usize,
    /// Byte offset one past the span's last byte.
    pub end: usize,
    /// Whether the span came from asterisks or capitalization.
    pub kind: EmphasisKind,
}

/// An emoji removed from the clean text, with its optional avatar gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiMark {
    /// The emoji glyph (one grapheme cluster, possibly multiple codepoints).
    pub emoji: String,
    /// Byte offset in the clean text where the glyph used to sit.
    pub position: usize,
    /// Gesture name from the fixed lookup table, if the emoji has one.
    pub gesture: Option<String>,
}

/// A URL removed from the clean text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpan {
    /// Absolute URL; bare `www.` matches get an `https://` prefix, anything
    /// already carrying a scheme passes through byte for byte.
    pub url: String,
    /// The exact substring that matched, for on-screen anchor text.
    pub display_text: String,
    /// Byte offset in the clean text where the match used to start.
    pub start: usize,
    /// Byte offset one past where the match used to end.
    pub end: usize,
}

/// Everything the processors learned about one message.
///
/// Starts empty, grows as each processor appends its findings, and is
/// frozen inside [`PreprocessedText`] once the pipeline returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetadata {
    /// Emphasis spans, in detection order.
    pub emphasis: Vec<EmphasisSpan>,
    /// Removed emojis, in detection order.
    pub emojis: Vec<EmojiMark>,
    /// Removed links, in detection order.
    pub links: Vec<LinkSpan>,
}

impl TextMetadata {
    /// An empty metadata bundle, same as `Default`.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no processor recorded anything.
    pub fn is_empty(&self) -> bool {
        self.emphasis.is_empty() && self.emojis.is_empty() && self.links.is_empty()
    }
}

/// The pipeline's output bundle for one assistant message.
///
/// Produced once per message and read-only thereafter; the host attaches it
/// to the chat message so the renderer can rebuild links and gestures later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessedText {
    /// The input exactly as received.
    pub original: String,
    /// Trimmed, speech-ready text for the TTS engine.
    pub clean: String,
    /// Trimmed text with original formatting kept for on-screen display.
    pub display: String,
    /// What the processors found along the way.
    pub metadata: TextMetadata,
}

impl PreprocessedText {
    /// Bundle for text no processor changed.
    pub fn passthrough(original: impl Into<String>) -> Self {
        let original = original.into();
        let trimmed = original.trim().to_string();
        Self {
            original,
            clean: trimmed.clone(),
            display: trimmed,
            metadata: TextMetadata::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn empty_metadata_reports_empty() {
        let metadata = TextMetadata::new();
        assert!(metadata.is_empty());
    }

    #[test]
    fn any_entry_makes_metadata_non_empty() {
        let mut metadata = TextMetadata::new();
        metadata.emojis.push(EmojiMark {
            emoji: "😊".to_string(),
            position: 0,
            gesture: Some("smile".to_string()),
        });
        assert!(!metadata.is_empty());
    }

    #[test]
    fn emphasis_kind_serializes_lowercase() {
        let json = serde_json::to_string(&EmphasisKind::Asterisk).unwrap();
        assert_eq!(json, "\"asterisk\"");
        let back: EmphasisKind = serde_json::from_str("\"caps\"").unwrap();
        assert_eq!(back, EmphasisKind::Caps);
    }

    #[test]
    fn passthrough_trims_clean_and_display_only() {
        let bundle = PreprocessedText::passthrough("  hello there  ");
        assert_eq!(bundle.original, "  hello there  ");
        assert_eq!(bundle.clean, "hello there");
        assert_eq!(bundle.display, "hello there");
        assert!(bundle.metadata.is_empty());
    }

    #[test]
    fn bundle_round_trips_through_json() {
        let bundle = PreprocessedText {
            original: "Hello *world*".to_string(),
            clean: "Hello world".to_string(),
            display: "Hello *world*".to_string(),
            metadata: TextMetadata {
                emphasis: vec![EmphasisSpan {
                    text: "world".to_string(),
                    start: 6,
                    end: 11,
                    kind: EmphasisKind::Asterisk,
                }],
                emojis: Vec::new(),
                links: Vec::new(),
            },
        };
        let json = serde_json::to_string(&bundle).unwrap();
        let back: PreprocessedText = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bundle);
    }
}

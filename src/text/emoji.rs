//! Emoji removal and gesture lookup.
//!
//! Emojis are stripped from the speech text (a TTS engine would read them
//! out or stumble) and recorded with their position and, when the fixed
//! table knows one, an avatar gesture name the host can trigger.

use crate::text::metadata::EmojiMark;
use crate::text::pipeline::{ProcessorInput, ProcessorOutput, TextProcessor};

/// Strips emoji glyphs from clean text and records gesture marks.
#[derive(Debug, Default)]
pub struct EmojiProcessor;

impl TextProcessor for EmojiProcessor {
    fn name(&self) -> &'static str {
        "emoji"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn process(&self, input: ProcessorInput<'_>) -> ProcessorOutput {
        let mut metadata = input.metadata.clone();
        let found = emojito::find_emoji(input.text);
        if found.is_empty() {
            return ProcessorOutput {
                clean: input.text.to_string(),
                display: input.display.to_string(),
                metadata,
            };
        }

        let mut glyphs: Vec<&str> = found.iter().map(|e| e.glyph.as_ref()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        // Longest first, so a multi-codepoint sequence wins over any
        // shorter emoji it happens to start with.
        glyphs.sort_by_key(|glyph| std::cmp::Reverse(glyph.len()));

        let text = input.text;
        let mut clean = String::with_capacity(text.len());
        let mut i = 0;
        while i < text.len() {
            let rest = &text[i..];
            if let Some(&glyph) = glyphs.iter().find(|glyph| rest.starts_with(**glyph)) {
                metadata.emojis.push(EmojiMark {
                    emoji: glyph.to_string(),
                    position: clean.len(),
                    gesture: gesture_for_emoji(glyph).map(str::to_string),
                });
                i += glyph.len();
                continue;
            }
            let step = rest.chars().next().map_or(1, char::len_utf8);
            clean.push_str(&text[i..i + step]);
            i += step;
        }

        ProcessorOutput {
            clean,
            display: input.display.to_string(),
            metadata,
        }
    }
}

// ── Gesture table ───────────────────────────────────────────────────────

/// (emoji, gesture)
const GESTURE_TABLE: &[(&str, &str)] = &[
    ("😊", "smile"),
    ("🙂", "smile"),
    ("😀", "smile"),
    ("😁", "smile"),
    ("😂", "laugh"),
    ("🤣", "laugh"),
    ("😆", "laugh"),
    ("😉", "wink"),
    ("👋", "wave"),
    ("🤔", "think"),
    ("😢", "sad"),
    ("😭", "sad"),
    ("😞", "sad"),
    ("😮", "surprise"),
    ("😲", "surprise"),
    ("❤️", "love"),
    ("😍", "love"),
    ("🥰", "love"),
    ("👍", "nod"),
    ("🙏", "bow"),
];

/// Gesture name for an emoji glyph, if the fixed table maps it.
pub fn gesture_for_emoji(emoji: &str) -> Option<&'static str> {
    GESTURE_TABLE
        .iter()
        .find(|(glyph, _)| *glyph == emoji)
        .map(|(_, gesture)| *gesture)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::text::metadata::TextMetadata;

    fn run(text: &str) -> ProcessorOutput {
        let metadata = TextMetadata::new();
        EmojiProcessor.process(ProcessorInput {
            text,
            display: text,
            metadata: &metadata,
        })
    }

    #[test]
    fn emoji_is_removed_and_recorded() {
        let output = run("Hi 😊 there");
        assert_eq!(output.clean, "Hi  there");
        assert_eq!(output.display, "Hi 😊 there");
        assert_eq!(output.metadata.emojis.len(), 1);
        let mark = &output.metadata.emojis[0];
        assert_eq!(mark.emoji, "😊");
        assert_eq!(mark.position, 3);
        assert_eq!(mark.gesture.as_deref(), Some("smile"));
    }

    #[test]
    fn position_is_relative_to_clean_text() {
        let output = run("ok 😂!");
        assert_eq!(output.clean, "ok !");
        assert_eq!(output.metadata.emojis[0].position, 3);
    }

    #[test]
    fn adjacent_emojis_record_in_order() {
        let output = run("😊😂 done");
        assert_eq!(output.clean, " done");
        assert_eq!(output.metadata.emojis.len(), 2);
        assert_eq!(output.metadata.emojis[0].emoji, "😊");
        assert_eq!(output.metadata.emojis[0].position, 0);
        assert_eq!(output.metadata.emojis[1].emoji, "😂");
        assert_eq!(output.metadata.emojis[1].position, 0);
    }

    #[test]
    fn repeated_emoji_recorded_each_time() {
        let output = run("😊 and 😊");
        assert_eq!(output.clean, " and ");
        assert_eq!(output.metadata.emojis.len(), 2);
    }

    #[test]
    fn multi_codepoint_emoji_removed_whole() {
        let output = run("love ❤️ it");
        assert_eq!(output.clean, "love  it");
        assert_eq!(output.metadata.emojis[0].emoji, "❤️");
        assert_eq!(output.metadata.emojis[0].gesture.as_deref(), Some("love"));
    }

    #[test]
    fn unmapped_emoji_carries_no_gesture() {
        let output = run("rawr 🦖");
        assert_eq!(output.clean, "rawr ");
        assert_eq!(output.metadata.emojis[0].gesture, None);
    }

    #[test]
    fn text_without_emoji_passes_through() {
        let output = run("plain words only");
        assert_eq!(output.clean, "plain words only");
        assert!(output.metadata.is_empty());
    }

    #[test]
    fn gesture_lookup_hits_and_misses() {
        assert_eq!(gesture_for_emoji("😉"), Some("wink"));
        assert_eq!(gesture_for_emoji("🙏"), Some("bow"));
        assert_eq!(gesture_for_emoji("🦖"), None);
    }
}

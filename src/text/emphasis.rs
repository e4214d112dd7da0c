//! Emphasis detection: asterisk runs, heading markers, and caps words.
//!
//! Runs first in the pipeline (priority 10) so later processors see text
//! with emphasis markers already stripped. Three passes over the input:
//! heading markers are dropped outright, asterisk-wrapped stretches are
//! unwrapped and recorded, and uppercase words are recorded in place.

use crate::text::metadata::{EmphasisKind, EmphasisSpan, TextMetadata};
use crate::text::pipeline::{ProcessorInput, ProcessorOutput, TextProcessor};

/// Detects emphasis and strips speech-irrelevant markers.
#[derive(Debug, Default)]
pub struct EmphasisProcessor;

impl TextProcessor for EmphasisProcessor {
    fn name(&self) -> &'static str {
        "emphasis"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn process(&self, input: ProcessorInput<'_>) -> ProcessorOutput {
        let mut metadata = input.metadata.clone();
        let without_headings = strip_headings(input.text);
        let clean = strip_asterisk_runs(&without_headings, &mut metadata);
        detect_caps_words(&clean, &mut metadata);
        ProcessorOutput {
            clean,
            display: input.display.to_string(),
            metadata,
        }
    }
}

/// Remove markdown heading markers (1 to 6 `#` at line start followed by
/// whitespace) together with the whitespace run after them. No metadata is
/// recorded for headings.
fn strip_headings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(strip_heading_marker(line));
    }
    out
}

fn strip_heading_marker(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut hashes = 0;
    while hashes < bytes.len() && bytes[hashes] == b'#' {
        hashes += 1;
    }
    if !(1..=6).contains(&hashes) {
        return line;
    }
    let rest = &line[hashes..];
    let stripped = rest.trim_start_matches([' ', '\t']);
    if stripped.len() == rest.len() {
        // `#hashtag` or a bare hash run is not a heading.
        return line;
    }
    stripped
}

/// Unwrap asterisk-emphasized stretches, copying everything else through.
///
/// Matches a greedy run of `*`, one or more non-asterisk characters, then a
/// greedy closing run, scanning left to right without overlap. First valid
/// match wins; nested or unbalanced asterisks are not disambiguated, so
/// `*outer *inner* outer*` yields the spans `"outer "` and `" outer"`. A
/// run with no content or no closing run is copied through literally.
///
/// Span indices are recorded against the output buffer as it grows, so they
/// are valid for the clean text this function returns.
fn strip_asterisk_runs(text: &str, metadata: &mut TextMetadata) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'*' {
            // Copy the stretch up to the next asterisk in one go.
            let mut j = i;
            while j < bytes.len() && bytes[j] != b'*' {
                j += 1;
            }
            out.push_str(&text[i..j]);
            i = j;
            continue;
        }
        let open_end = asterisk_run_end(bytes, i);
        let mut content_end = open_end;
        while content_end < bytes.len() && bytes[content_end] != b'*' {
            content_end += 1;
        }
        if content_end == open_end || content_end == bytes.len() {
            // No content or no closing run anywhere in the rest of the
            // line; the whole asterisk run is literal text.
            out.push_str(&text[i..open_end]);
            i = open_end;
            continue;
        }
        let close_end = asterisk_run_end(bytes, content_end);
        let content = &text[open_end..content_end];
        let start = out.len();
        out.push_str(content);
        metadata.emphasis.push(EmphasisSpan {
            text: content.to_string(),
            start,
            end: out.len(),
            kind: EmphasisKind::Asterisk,
        });
        i = close_end;
    }
    out
}

fn asterisk_run_end(bytes: &[u8], from: usize) -> usize {
    let mut end = from;
    while end < bytes.len() && bytes[end] == b'*' {
        end += 1;
    }
    end
}

/// Record uppercase words of three or more letters as caps emphasis.
///
/// A word is a maximal run of ASCII uppercase letters whose neighbors are
/// not alphanumeric or underscore. Clean text is left untouched. A word
/// already recorded by an earlier span (asterisk or caps) is skipped, so
/// each distinct word appears at most once, first occurrence winning.
fn detect_caps_words(clean: &str, metadata: &mut TextMetadata) {
    let bytes = clean.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_uppercase() {
            i += 1;
            continue;
        }
        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_uppercase() {
            j += 1;
        }
        let bounded_left = i == 0 || !is_word_byte(bytes[i - 1]);
        let bounded_right = j == bytes.len() || !is_word_byte(bytes[j]);
        if j - i >= 3 && bounded_left && bounded_right {
            let word = &clean[i..j];
            if !metadata.emphasis.iter().any(|span| span.text == word) {
                metadata.emphasis.push(EmphasisSpan {
                    text: word.to_string(),
                    start: i,
                    end: j,
                    kind: EmphasisKind::Caps,
                });
            }
        }
        i = j;
    }
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn run(text: &str) -> ProcessorOutput {
        let metadata = TextMetadata::new();
        EmphasisProcessor.process(ProcessorInput {
            text,
            display: text,
            metadata: &metadata,
        })
    }

    // ── Asterisk runs ───────────────────────────────────────────────────

    #[test]
    fn single_asterisk_pair_unwraps_and_records() {
        let output = run("Hello *world*");
        assert_eq!(output.clean, "Hello world");
        assert_eq!(output.display, "Hello *world*");
        assert_eq!(
            output.metadata.emphasis,
            vec![EmphasisSpan {
                text: "world".to_string(),
                start: 6,
                end: 11,
                kind: EmphasisKind::Asterisk,
            }]
        );
    }

    #[test]
    fn double_asterisks_unwrap_the_same_way() {
        let output = run("**bold** move");
        assert_eq!(output.clean, "bold move");
        assert_eq!(output.metadata.emphasis[0].text, "bold");
        assert_eq!(output.metadata.emphasis[0].start, 0);
        assert_eq!(output.metadata.emphasis[0].end, 4);
    }

    #[test]
    fn closing_run_is_greedy() {
        let output = run("*a**b*");
        assert_eq!(output.clean, "ab*");
        assert_eq!(output.metadata.emphasis.len(), 1);
        assert_eq!(output.metadata.emphasis[0].text, "a");
    }

    #[test]
    fn nesting_is_not_disambiguated() {
        let output = run("*outer *inner* outer*");
        assert_eq!(output.clean, "outer inner outer");
        let texts: Vec<&str> = output
            .metadata
            .emphasis
            .iter()
            .map(|span| span.text.as_str())
            .collect();
        assert_eq!(texts, vec!["outer ", " outer"]);
    }

    #[test]
    fn unclosed_asterisk_is_literal() {
        let output = run("*abc");
        assert_eq!(output.clean, "*abc");
        assert!(output.metadata.emphasis.is_empty());
    }

    #[test]
    fn bare_asterisk_run_is_literal() {
        let output = run("***");
        assert_eq!(output.clean, "***");
        assert!(output.metadata.emphasis.is_empty());
    }

    #[test]
    fn plain_text_passes_through() {
        let output = run("nothing to see here");
        assert_eq!(output.clean, "nothing to see here");
        assert!(output.metadata.is_empty());
    }

    // ── Heading markers ─────────────────────────────────────────────────

    #[test]
    fn heading_marker_is_stripped_without_metadata() {
        let output = run("# Title");
        assert_eq!(output.clean, "Title");
        assert!(output.metadata.emphasis.is_empty());
    }

    #[test]
    fn deep_heading_markers_strip_up_to_six() {
        let output = run("###### Deep");
        assert_eq!(output.clean, "Deep");
        let output = run("####### Too deep");
        assert_eq!(output.clean, "####### Too deep");
    }

    #[test]
    fn hashtag_without_whitespace_is_kept() {
        let output = run("#winning");
        assert_eq!(output.clean, "#winning");
    }

    #[test]
    fn heading_strip_is_per_line() {
        let output = run("# Title\nbody text\n## Sub");
        assert_eq!(output.clean, "Title\nbody text\nSub");
    }

    // ── Caps words ──────────────────────────────────────────────────────

    #[test]
    fn caps_word_is_recorded_without_mutation() {
        let output = run("This is VERY important");
        assert_eq!(output.clean, "This is VERY important");
        assert_eq!(
            output.metadata.emphasis,
            vec![EmphasisSpan {
                text: "VERY".to_string(),
                start: 8,
                end: 12,
                kind: EmphasisKind::Caps,
            }]
        );
    }

    #[test]
    fn repeated_caps_word_recorded_once() {
        let output = run("VERY VERY loud");
        assert_eq!(output.metadata.emphasis.len(), 1);
        assert_eq!(output.metadata.emphasis[0].start, 0);
    }

    #[test]
    fn short_caps_words_are_ignored() {
        let output = run("it is OK");
        assert!(output.metadata.emphasis.is_empty());
        let output = run("in the USA");
        assert_eq!(output.metadata.emphasis.len(), 1);
    }

    #[test]
    fn caps_run_inside_a_word_is_ignored() {
        let output = run("McDONALDx and VERYlong");
        assert!(output.metadata.emphasis.is_empty());
    }

    #[test]
    fn asterisk_capture_suppresses_caps_duplicate() {
        let output = run("*VERY* and VERY again");
        assert_eq!(output.metadata.emphasis.len(), 1);
        assert_eq!(output.metadata.emphasis[0].kind, EmphasisKind::Asterisk);
    }

    #[test]
    fn caps_word_bounded_by_punctuation_counts() {
        let output = run("stop, NOW!");
        assert_eq!(output.metadata.emphasis.len(), 1);
        assert_eq!(output.metadata.emphasis[0].text, "NOW");
    }
}

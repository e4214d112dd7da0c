//! Link removal and URL normalization.
//!
//! URLs are stripped from the speech text (reading one aloud is noise) and
//! recorded so the UI can rebuild clickable anchors from the display text.

use crate::text::metadata::LinkSpan;
use crate::text::pipeline::{ProcessorInput, ProcessorOutput, TextProcessor};

/// Strips URLs from clean text and records link spans.
#[derive(Debug, Default)]
pub struct LinkProcessor;

impl TextProcessor for LinkProcessor {
    fn name(&self) -> &'static str {
        "link"
    }

    fn priority(&self) -> i32 {
        30
    }

    /// A link is `http://`, `https://`, or `www.` followed by at least one
    /// non-whitespace character; the match runs to the next whitespace, so
    /// trailing punctuation stuck to a URL is carried along with it. A bare
    /// prefix with nothing after it is left as ordinary text.
    fn process(&self, input: ProcessorInput<'_>) -> ProcessorOutput {
        let mut metadata = input.metadata.clone();
        let text = input.text;
        let mut clean = String::with_capacity(text.len());
        let mut i = 0;
        while i < text.len() {
            let rest = &text[i..];
            if let Some(prefix_len) = link_prefix_len(rest) {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                if end > prefix_len {
                    let matched = &rest[..end];
                    let start = clean.len();
                    metadata.links.push(LinkSpan {
                        url: normalize_url(matched),
                        display_text: matched.to_string(),
                        start,
                        end: start + matched.len(),
                    });
                    i += end;
                    continue;
                }
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

fn link_prefix_len(rest: &str) -> Option<usize> {
    ["http://", "https://", "www."]
        .into_iter()
        .find(|prefix| rest.starts_with(prefix))
        .map(str::len)
}

/// Prefix `https://` onto bare `www.` matches; anything already carrying a
/// scheme passes through byte for byte.
fn normalize_url(matched: &str) -> String {
    if matched.starts_with("www.") {
        format!("https://{matched}")
    } else {
        matched.to_string()
    }
}

//! Priority-ordered processor chain producing the speech/display bundle.
//!
//! The pipeline owns its processor registry (no global state) and folds
//! text through the registered processors in ascending priority order. Each
//! processor receives the previous processor's clean text plus the metadata
//! gathered so far, and hands back owned replacements for all three pieces
//! of working state.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::TextPipelineConfig;
use crate::text::emoji::EmojiProcessor;
use crate::text::emphasis::EmphasisProcessor;
use crate::text::link::LinkProcessor;
use crate::text::metadata::{PreprocessedText, TextMetadata};

/// Borrowed view handed to one processor during the fold.
#[derive(Debug, Clone, Copy)]
pub struct ProcessorInput<'a> {
    /// Clean text as the previous processor left it (not the original).
    pub text: &'a str,
    /// Display text as the previous processor left it.
    pub display: &'a str,
    /// Metadata gathered so far. Processors clone before appending; the
    /// pipeline's copy is never mutated in place.
    pub metadata: &'a TextMetadata,
}

/// Owned result of one processor; replaces the pipeline's working state
/// wholesale (last writer wins).
#[derive(Debug, Clone)]
pub struct ProcessorOutput {
    /// Speech text with this processor's removals applied.
    pub clean: String,
    /// Display text, usually echoed through untouched.
    pub display: String,
    /// The input metadata plus this processor's findings.
    pub metadata: TextMetadata,
}

/// A named, prioritized text transformation step.
///
/// Implementations are stateless across calls and never fail: malformed
/// input degrades to an absence of findings, not an error.
pub trait TextProcessor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Execution order; lower runs first.
    fn priority(&self) -> i32;

    /// Transform the text and record any findings.
    fn process(&self, input: ProcessorInput<'_>) -> ProcessorOutput;
}

/// Caller-owned processor chain.
///
/// Constructed once, registered processors are append-only afterwards, and
/// [`process`] is pure computation over its input, so one pipeline can be
/// shared freely across calls.
///
/// [`process`]: ProcessingPipeline::process
pub struct ProcessingPipeline {
    processors: Vec<Box<dyn TextProcessor>>,
    slow_warn: Duration,
}

impl ProcessingPipeline {
    /// Pipeline with the three default processors: emphasis (10), emoji
    /// (20), link (30).
    pub fn new(config: &TextPipelineConfig) -> Self {
        let mut pipeline = Self {
            processors: Vec::new(),
            slow_warn: Duration::from_millis(config.slow_processor_warn_ms),
        };
        pipeline.register(Box::new(EmphasisProcessor));
        pipeline.register(Box::new(EmojiProcessor));
        pipeline.register(Box::new(LinkProcessor));
        pipeline
    }

    /// Add a processor and re-sort the chain by priority. The sort is
    /// stable, so registration order breaks priority ties.
    pub fn register(&mut self, processor: Box<dyn TextProcessor>) {
        info!(
            processor = processor.name(),
            priority = processor.priority(),
            "text processor registered"
        );
        self.processors.push(processor);
        self.processors.sort_by_key(|p| p.priority());
    }

    /// Registered processors as `(name, priority)`, in execution order.
    pub fn processors(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.processors.iter().map(|p| (p.name(), p.priority()))
    }

    /// Run the full chain over one message.
    ///
    /// The input is trimmed once up front, so span indices recorded by the
    /// processors line up with the final clean text, and both output
    /// strings are trimmed again at the end in case a removal left edge
    /// whitespace behind. `original` is kept untouched.
    pub fn process(&self, text: &str) -> PreprocessedText {
        let trimmed = text.trim();
        let mut clean = trimmed.to_string();
        let mut display = trimmed.to_string();
        let mut metadata = TextMetadata::new();

        for processor in &self.processors {
            let started = Instant::now();
            let output = processor.process(ProcessorInput {
                text: &clean,
                display: &display,
                metadata: &metadata,
            });
            let elapsed = started.elapsed();
            if elapsed > self.slow_warn {
                // Performance signal only, never an error.
                warn!(
                    processor = processor.name(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "slow text processor"
                );
            }
            clean = output.clean;
            display = output.display;
            metadata = output.metadata;
        }

        PreprocessedText {
            original: text.to_string(),
            clean: clean.trim().to_string(),
            display: display.trim().to_string(),
            metadata,
        }
    }
}

impl Default for ProcessingPipeline {
    fn default() -> Self {
        Self::new(&TextPipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::text::metadata::EmphasisKind;

    /// Echo processor with a configurable name and priority.
    struct Tagger {
        name: &'static str,
        priority: i32,
    }

    impl TextProcessor for Tagger {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn process(&self, input: ProcessorInput<'_>) -> ProcessorOutput {
            ProcessorOutput {
                clean: input.text.to_string(),
                display: input.display.to_string(),
                metadata: input.metadata.clone(),
            }
        }
    }

    /// Uppercases the clean text, leaving display alone.
    struct Shouter;

    impl TextProcessor for Shouter {
        fn name(&self) -> &'static str {
            "shouter"
        }

        fn priority(&self) -> i32 {
            5
        }

        fn process(&self, input: ProcessorInput<'_>) -> ProcessorOutput {
            ProcessorOutput {
                clean: input.text.to_uppercase(),
                display: input.display.to_string(),
                metadata: input.metadata.clone(),
            }
        }
    }

    // ── Registration ────────────────────────────────────────────────────

    #[test]
    fn default_processors_run_in_priority_order() {
        let pipeline = ProcessingPipeline::default();
        let order: Vec<(&str, i32)> = pipeline.processors().collect();
        assert_eq!(order, vec![("emphasis", 10), ("emoji", 20), ("link", 30)]);
    }

    #[test]
    fn registered_processor_sorts_into_place() {
        let mut pipeline = ProcessingPipeline::default();
        pipeline.register(Box::new(Shouter));
        let names: Vec<&str> = pipeline.processors().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["shouter", "emphasis", "emoji", "link"]);
    }

    #[test]
    fn priority_ties_keep_registration_order() {
        let mut pipeline = ProcessingPipeline::new(&TextPipelineConfig::default());
        pipeline.register(Box::new(Tagger {
            name: "first",
            priority: 15,
        }));
        pipeline.register(Box::new(Tagger {
            name: "second",
            priority: 15,
        }));
        let names: Vec<&str> = pipeline.processors().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["emphasis", "first", "second", "emoji", "link"]);
    }

    // ── Folding ─────────────────────────────────────────────────────────

    #[test]
    fn later_processors_see_earlier_clean_text() {
        let mut pipeline = ProcessingPipeline::default();
        pipeline.register(Box::new(Shouter));
        // Shouter runs first and uppercases; the emphasis processor then
        // sees an all-caps word and records it.
        let result = pipeline.process("loud");
        assert_eq!(result.clean, "LOUD");
        assert_eq!(result.metadata.emphasis.len(), 1);
        assert_eq!(result.metadata.emphasis[0].kind, EmphasisKind::Caps);
    }

    #[test]
    fn output_strings_are_trimmed_original_is_not() {
        let pipeline = ProcessingPipeline::default();
        let result = pipeline.process("  hi there  ");
        assert_eq!(result.original, "  hi there  ");
        assert_eq!(result.clean, "hi there");
        assert_eq!(result.display, "hi there");
    }

    #[test]
    fn empty_input_yields_empty_bundle() {
        let pipeline = ProcessingPipeline::default();
        let result = pipeline.process("");
        assert_eq!(result.clean, "");
        assert_eq!(result.display, "");
        assert!(result.metadata.is_empty());
    }

    #[test]
    fn all_three_default_processors_contribute() {
        let pipeline = ProcessingPipeline::default();
        let result = pipeline.process("*hi* 😊 www.a.b");
        assert_eq!(result.metadata.emphasis.len(), 1);
        assert_eq!(result.metadata.emojis.len(), 1);
        assert_eq!(result.metadata.links.len(), 1);
    }
}

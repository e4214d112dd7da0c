//! Text transformation pipeline: speech text, display text, and metadata.
//!
//! Raw assistant text goes in; a [`PreprocessedText`] bundle comes out with
//! speech-ready clean text (markers, emojis, and URLs removed), display text
//! (formatting preserved), and structured metadata locating everything that
//! was detected or removed:
//!
//! - `pipeline`: the [`TextProcessor`] contract and the priority-ordered
//!   [`ProcessingPipeline`] fold
//! - `emphasis`: asterisk runs, heading markers, caps words (priority 10)
//! - `emoji`: emoji removal + gesture lookup (priority 20)
//! - `link`: URL removal + scheme normalization (priority 30)
//! - `metadata`: the span/mark types and the output bundle

pub mod emoji;
pub mod emphasis;
pub mod link;
pub mod metadata;
pub mod pipeline;

pub use emoji::{EmojiProcessor, gesture_for_emoji};
pub use emphasis::EmphasisProcessor;
pub use link::LinkProcessor;
pub use metadata::{
    EmojiMark, EmphasisKind, EmphasisSpan, LinkSpan, PreprocessedText, TextMetadata,
};
pub use pipeline::{ProcessingPipeline, ProcessorInput, ProcessorOutput, TextProcessor};

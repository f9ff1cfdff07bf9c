//! Pipeline state machine.

use std::fmt;

/// A stage that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Searching,
    ExtractingLyrics,
    ExtractingVocab,
    Storing,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Searching => "searching",
            Self::ExtractingLyrics => "extracting_lyrics",
            Self::ExtractingVocab => "extracting_vocab",
            Self::Storing => "storing",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a pipeline run is.
///
/// `Init -> Searching -> ExtractingLyrics -> ExtractingVocab -> Storing -> Done`,
/// with any stage able to jump to `Failed(stage)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Searching,
    ExtractingLyrics,
    ExtractingVocab,
    Storing,
    Done,
    Failed(PipelineStage),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }

    /// The running stage, if any.
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::Searching => Some(PipelineStage::Searching),
            Self::ExtractingLyrics => Some(PipelineStage::ExtractingLyrics),
            Self::ExtractingVocab => Some(PipelineStage::ExtractingVocab),
            Self::Storing => Some(PipelineStage::Storing),
            _ => None,
        }
    }

    /// Successor on success. Terminal states stay put.
    pub fn advance(self) -> Self {
        match self {
            Self::Init => Self::Searching,
            Self::Searching => Self::ExtractingLyrics,
            Self::ExtractingLyrics => Self::ExtractingVocab,
            Self::ExtractingVocab => Self::Storing,
            Self::Storing => Self::Done,
            terminal => terminal,
        }
    }

    /// Failure from the current stage. Only running stages can fail.
    pub fn fail(self) -> Self {
        match self.stage() {
            Some(stage) => Self::Failed(stage),
            None => self,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::Done => f.write_str("done"),
            Self::Failed(stage) => write!(f, "failed({})", stage),
            running => match running.stage() {
                Some(stage) => stage.fmt(f),
                None => Ok(()),
            },
        }
    }
}

//! Song processing pipeline.

pub mod agent;
pub mod state;

pub use agent::{PipelineAgent, PipelineOutcome};
pub use state::{PipelineStage, PipelineState};

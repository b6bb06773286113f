//! Pipeline state machine
//!
//! [`PipelineState`] is the single typed record threaded through the
//! stages of one user turn. [`PipelineStage`] tracks how far it has got.

pub mod params;
pub mod stage;
pub mod state;

pub use params::flatten_params;
pub use stage::PipelineStage;
pub use state::PipelineState;

use crate::llm::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The model could not be reached or did not answer in time
    #[error("Model call failed during {phase}: {source}")]
    Transport {
        phase: &'static str,
        #[source]
        source: BackendError,
    },

    #[error("{phase} needs the {missing} produced by an earlier phase")]
    MissingInput {
        phase: &'static str,
        missing: &'static str,
    },
}

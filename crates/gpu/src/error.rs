//! Error types for GPU object creation.
//!
//! Only composition-validity failures surface as errors; lifecycle guard
//! violations are logged and skipped instead (a render loop must survive a
//! missing uniform, but must never bind a half-built pipeline).

use thiserror::Error;

use crate::shader::ShaderStage;

/// Errors raised while creating GPU objects.
#[derive(Error, Debug)]
pub enum GpuError {
    #[error("shader '{name}': failed to read source: {source}")]
    SourceLoad {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("shader '{name}' failed to compile: {log}")]
    Compile { name: String, log: String },

    #[error("program pipeline '{name}' was configured with no stages")]
    EmptyPipeline { name: String },

    #[error("program pipeline '{name}' references a {stage:?} stage that is not live")]
    StageNotLive { name: String, stage: ShaderStage },
}

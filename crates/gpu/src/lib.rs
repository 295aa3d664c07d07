//! Lifecycle and state management for driver-level GPU objects.
//!
//! This crate wraps the handle-based objects of a native graphics API
//! (buffers, separable shader stages, program pipelines, textures) in a
//! shared three-state lifecycle (unallocated, live, freed) so nothing can
//! touch a handle before it exists or after it was deleted. Shader wrappers
//! cache their active-uniform locations at creation time; pipelines compose
//! already-created stages and refuse to build around a missing one.
//!
//! The driver itself is only a trait here ([`Driver`]); a backend crate
//! implements it once a graphics context is current on the calling thread.
//! Everything in this crate is synchronous and single-threaded by contract.

pub mod buffer;
pub mod driver;
pub mod error;
pub mod handle;
pub mod object;
pub mod pipeline;
pub mod shader;
pub mod texture;

#[cfg(test)]
mod testing;

pub use buffer::{create_buffers, free_buffers, BufferInit, GpuBuffer};
pub use driver::{
    Driver, Filter, IndexedTarget, PixelFormat, StageBits, StorageFlags, TextureFormat,
    TextureParameter, UsageHint, WrapMode,
};
pub use error::GpuError;
pub use handle::{BufferHandle, Handle, PipelineHandle, ShaderHandle, TextureHandle};
pub use object::{GpuObject, ObjectState};
pub use pipeline::{PipelineStages, ProgramPipeline};
pub use shader::{ShaderProgram, ShaderSources, ShaderStage, UniformValue};
pub use texture::{GpuTexture, TextureConfig};

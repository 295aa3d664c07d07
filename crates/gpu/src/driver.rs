//! The native driver capability surface.
//!
//! Everything the object wrappers need from the graphics API is collected in
//! the [`Driver`] trait: allocate and delete named objects, upload buffer
//! contents, compile separable single-stage programs and query their uniform
//! metadata, compose pipelines, and configure textures. A windowing/backend
//! crate implements it over the platform's bindings once a context is
//! current; the wrappers themselves never touch the API directly, which also
//! lets the whole lifecycle layer run against a recording fake in tests.
//!
//! All calls are synchronous driver round-trips on the context-owning thread.
//! Nothing here is re-entrant across threads.

use crate::handle::{BufferHandle, PipelineHandle, ShaderHandle, TextureHandle};
use crate::shader::ShaderStage;

bitflags::bitflags! {
    /// Storage-allocation flags for fixed-storage buffers.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct StorageFlags: u32 {
        const MAP_READ = 0x0001;
        const MAP_WRITE = 0x0002;
        const MAP_PERSISTENT = 0x0040;
        const MAP_COHERENT = 0x0080;
        const DYNAMIC_STORAGE = 0x0100;
        const CLIENT_STORAGE = 0x0200;
    }
}

bitflags::bitflags! {
    /// Stage bits used when composing a program pipeline.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct StageBits: u32 {
        const VERTEX = 0x01;
        const FRAGMENT = 0x02;
        const GEOMETRY = 0x04;
        const TESS_CONTROL = 0x08;
        const TESS_EVALUATION = 0x10;
        const COMPUTE = 0x20;
    }
}

/// Usage hint declared when allocating a streaming buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum UsageHint {
    StreamDraw = 0x88E0,
    StreamRead = 0x88E1,
    StreamCopy = 0x88E2,
    StaticDraw = 0x88E4,
    StaticRead = 0x88E5,
    StaticCopy = 0x88E6,
    DynamicDraw = 0x88E8,
    DynamicRead = 0x88E9,
    DynamicCopy = 0x88EA,
}

/// Indexed binding-point classes a buffer can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexedTarget {
    ShaderStorage,
    Uniform,
    AtomicCounter,
    TransformFeedback,
}

/// Sized internal formats supported for 2D texture storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    R8,
    Rg8,
    Rgb8,
    Rgba8,
    Srgb8Alpha8,
}

/// Channel layout of pixel data handed to a sub-image upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Red,
    Rg,
    Rgb,
    Rgba,
}

/// Integer-valued texture parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureParameter {
    MinFilter,
    MagFilter,
    WrapS,
    WrapT,
}

/// Sampling filter values, carrying the native constants so they can cross
/// the integer parameter contract unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum Filter {
    Nearest = 0x2600,
    Linear = 0x2601,
}

/// Wrap-mode values for the integer parameter contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum WrapMode {
    ClampToBorder = 0x812D,
    ClampToEdge = 0x812F,
    MirroredRepeat = 0x8370,
    Repeat = 0x2901,
}

/// Native driver entry points, one method per capability.
///
/// Implementations may assume every handle they are given was returned by one
/// of their own `create_*` calls and has not been deleted; the wrappers'
/// lifecycle guards uphold that.
pub trait Driver {
    // Buffers.
    fn create_buffer(&self) -> BufferHandle;
    fn create_buffers(&self, count: usize) -> Vec<BufferHandle>;
    fn delete_buffer(&self, buffer: BufferHandle);
    fn delete_buffers(&self, buffers: &[BufferHandle]);
    fn buffer_storage(&self, buffer: BufferHandle, data: &[u8], flags: StorageFlags);
    fn buffer_data(&self, buffer: BufferHandle, data: &[u8], usage: UsageHint);
    fn buffer_sub_data(&self, buffer: BufferHandle, offset: usize, data: &[u8]);
    fn bind_buffer_base(&self, target: IndexedTarget, index: u32, buffer: BufferHandle);

    // Separable single-stage shader programs. Compilation returns the info
    // log on failure.
    fn create_shader_program(
        &self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderHandle, String>;
    fn delete_shader_program(&self, program: ShaderHandle);
    fn active_uniform_count(&self, program: ShaderHandle) -> u32;
    fn active_uniform_max_name_len(&self, program: ShaderHandle) -> usize;
    fn active_uniform_name(&self, program: ShaderHandle, index: u32, max_name_len: usize)
        -> String;
    fn uniform_location(&self, program: ShaderHandle, name: &str) -> i32;
    fn set_uniform_i32(&self, program: ShaderHandle, location: i32, value: i32);
    fn set_uniform_f32(&self, program: ShaderHandle, location: i32, value: f32);
    fn set_uniform_vec2(&self, program: ShaderHandle, location: i32, value: [f32; 2]);
    fn set_uniform_vec3(&self, program: ShaderHandle, location: i32, value: [f32; 3]);
    fn set_uniform_vec4(&self, program: ShaderHandle, location: i32, value: [f32; 4]);
    fn set_uniform_mat4(
        &self,
        program: ShaderHandle,
        location: i32,
        transpose: bool,
        value: [f32; 16],
    );

    // Program pipelines.
    fn create_pipeline(&self) -> PipelineHandle;
    fn delete_pipeline(&self, pipeline: PipelineHandle);
    fn use_program_stages(&self, pipeline: PipelineHandle, stages: StageBits, program: ShaderHandle);
    fn bind_pipeline(&self, pipeline: PipelineHandle);

    // Textures.
    fn create_texture(&self) -> TextureHandle;
    fn delete_texture(&self, texture: TextureHandle);
    fn texture_storage_2d(
        &self,
        texture: TextureHandle,
        levels: u32,
        format: TextureFormat,
        width: u32,
        height: u32,
    );
    #[allow(clippy::too_many_arguments)]
    fn texture_sub_image_2d(
        &self,
        texture: TextureHandle,
        level: u32,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        format: PixelFormat,
        data: &[u8],
    );
    fn texture_parameter_i32(&self, texture: TextureHandle, parameter: TextureParameter, value: i32);
    fn bind_texture_unit(&self, unit: u32, texture: TextureHandle);
}

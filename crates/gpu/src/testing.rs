//! Test-only driver fake.
//!
//! [`RecordingDriver`] hands out sequential handles starting at 1 and records
//! every call it receives, so tests can assert both that guarded operations
//! never reach the driver and that live ones arrive in order with the right
//! arguments.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;

use crate::driver::{
    Driver, IndexedTarget, PixelFormat, StageBits, StorageFlags, TextureFormat, TextureParameter,
    UsageHint,
};
use crate::handle::{BufferHandle, PipelineHandle, ShaderHandle, TextureHandle};
use crate::shader::{ShaderSources, ShaderStage};

/// One recorded driver call, with handles flattened to their raw values.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    CreateBuffer(u32),
    CreateBuffers(Vec<u32>),
    DeleteBuffer(u32),
    DeleteBuffers(Vec<u32>),
    BufferStorage {
        buffer: u32,
        data: Vec<u8>,
        flags: StorageFlags,
    },
    BufferData {
        buffer: u32,
        data: Vec<u8>,
        usage: UsageHint,
    },
    BufferSubData {
        buffer: u32,
        offset: usize,
        data: Vec<u8>,
    },
    BindBufferBase {
        target: IndexedTarget,
        index: u32,
        buffer: u32,
    },
    CreateShaderProgram {
        stage: ShaderStage,
        program: u32,
        source: String,
    },
    DeleteShaderProgram(u32),
    SetUniformI32 {
        program: u32,
        location: i32,
        value: i32,
    },
    SetUniformF32 {
        program: u32,
        location: i32,
        value: f32,
    },
    SetUniformVec2 {
        program: u32,
        location: i32,
        value: [f32; 2],
    },
    SetUniformVec3 {
        program: u32,
        location: i32,
        value: [f32; 3],
    },
    SetUniformVec4 {
        program: u32,
        location: i32,
        value: [f32; 4],
    },
    SetUniformMat4 {
        program: u32,
        location: i32,
        transpose: bool,
        value: [f32; 16],
    },
    CreatePipeline(u32),
    DeletePipeline(u32),
    UseProgramStages {
        pipeline: u32,
        stages: StageBits,
        program: u32,
    },
    BindPipeline(u32),
    CreateTexture(u32),
    DeleteTexture(u32),
    TextureStorage2D {
        texture: u32,
        levels: u32,
        format: TextureFormat,
        width: u32,
        height: u32,
    },
    TextureSubImage2D {
        texture: u32,
        level: u32,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    },
    TextureParameterI32 {
        texture: u32,
        parameter: TextureParameter,
        value: i32,
    },
    BindTextureUnit {
        unit: u32,
        texture: u32,
    },
}

pub(crate) struct RecordingDriver {
    calls: RefCell<Vec<Call>>,
    next_handle: Cell<u32>,
    uniforms: Vec<(String, i32)>,
    compile_error: Option<String>,
}

impl RecordingDriver {
    pub(crate) fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_handle: Cell::new(1),
            uniforms: Vec::new(),
            compile_error: None,
        }
    }

    /// Report the given `(name, location)` pairs as the active uniforms of
    /// every program this driver compiles.
    pub(crate) fn with_uniforms(uniforms: &[(&str, i32)]) -> Self {
        Self {
            uniforms: uniforms
                .iter()
                .map(|(name, location)| ((*name).to_owned(), *location))
                .collect(),
            ..Self::new()
        }
    }

    /// Fail every compilation with the given info log.
    pub(crate) fn failing_compile(log: &str) -> Self {
        Self {
            compile_error: Some(log.to_owned()),
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn next(&self) -> u32 {
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        handle
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Driver for RecordingDriver {
    fn create_buffer(&self) -> BufferHandle {
        let raw = self.next();
        self.record(Call::CreateBuffer(raw));
        BufferHandle::from_raw(raw)
    }

    fn create_buffers(&self, count: usize) -> Vec<BufferHandle> {
        let raws: Vec<u32> = (0..count).map(|_| self.next()).collect();
        self.record(Call::CreateBuffers(raws.clone()));
        raws.into_iter().map(BufferHandle::from_raw).collect()
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        self.record(Call::DeleteBuffer(buffer.raw()));
    }

    fn delete_buffers(&self, buffers: &[BufferHandle]) {
        self.record(Call::DeleteBuffers(
            buffers.iter().map(|handle| handle.raw()).collect(),
        ));
    }

    fn buffer_storage(&self, buffer: BufferHandle, data: &[u8], flags: StorageFlags) {
        self.record(Call::BufferStorage {
            buffer: buffer.raw(),
            data: data.to_vec(),
            flags,
        });
    }

    fn buffer_data(&self, buffer: BufferHandle, data: &[u8], usage: UsageHint) {
        self.record(Call::BufferData {
            buffer: buffer.raw(),
            data: data.to_vec(),
            usage,
        });
    }

    fn buffer_sub_data(&self, buffer: BufferHandle, offset: usize, data: &[u8]) {
        self.record(Call::BufferSubData {
            buffer: buffer.raw(),
            offset,
            data: data.to_vec(),
        });
    }

    fn bind_buffer_base(&self, target: IndexedTarget, index: u32, buffer: BufferHandle) {
        self.record(Call::BindBufferBase {
            target,
            index,
            buffer: buffer.raw(),
        });
    }

    fn create_shader_program(
        &self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderHandle, String> {
        if let Some(log) = &self.compile_error {
            return Err(log.clone());
        }
        let raw = self.next();
        self.record(Call::CreateShaderProgram {
            stage,
            program: raw,
            source: source.to_owned(),
        });
        Ok(ShaderHandle::from_raw(raw))
    }

    fn delete_shader_program(&self, program: ShaderHandle) {
        self.record(Call::DeleteShaderProgram(program.raw()));
    }

    fn active_uniform_count(&self, _program: ShaderHandle) -> u32 {
        self.uniforms.len() as u32
    }

    fn active_uniform_max_name_len(&self, _program: ShaderHandle) -> usize {
        self.uniforms
            .iter()
            .map(|(name, _)| name.len() + 1)
            .max()
            .unwrap_or(0)
    }

    fn active_uniform_name(
        &self,
        _program: ShaderHandle,
        index: u32,
        _max_name_len: usize,
    ) -> String {
        self.uniforms[index as usize].0.clone()
    }

    fn uniform_location(&self, _program: ShaderHandle, name: &str) -> i32 {
        self.uniforms
            .iter()
            .find(|(uniform, _)| uniform == name)
            .map(|(_, location)| *location)
            .unwrap_or(-1)
    }

    fn set_uniform_i32(&self, program: ShaderHandle, location: i32, value: i32) {
        self.record(Call::SetUniformI32 {
            program: program.raw(),
            location,
            value,
        });
    }

    fn set_uniform_f32(&self, program: ShaderHandle, location: i32, value: f32) {
        self.record(Call::SetUniformF32 {
            program: program.raw(),
            location,
            value,
        });
    }

    fn set_uniform_vec2(&self, program: ShaderHandle, location: i32, value: [f32; 2]) {
        self.record(Call::SetUniformVec2 {
            program: program.raw(),
            location,
            value,
        });
    }

    fn set_uniform_vec3(&self, program: ShaderHandle, location: i32, value: [f32; 3]) {
        self.record(Call::SetUniformVec3 {
            program: program.raw(),
            location,
            value,
        });
    }

    fn set_uniform_vec4(&self, program: ShaderHandle, location: i32, value: [f32; 4]) {
        self.record(Call::SetUniformVec4 {
            program: program.raw(),
            location,
            value,
        });
    }

    fn set_uniform_mat4(
        &self,
        program: ShaderHandle,
        location: i32,
        transpose: bool,
        value: [f32; 16],
    ) {
        self.record(Call::SetUniformMat4 {
            program: program.raw(),
            location,
            transpose,
            value,
        });
    }

    fn create_pipeline(&self) -> PipelineHandle {
        let raw = self.next();
        self.record(Call::CreatePipeline(raw));
        PipelineHandle::from_raw(raw)
    }

    fn delete_pipeline(&self, pipeline: PipelineHandle) {
        self.record(Call::DeletePipeline(pipeline.raw()));
    }

    fn use_program_stages(
        &self,
        pipeline: PipelineHandle,
        stages: StageBits,
        program: ShaderHandle,
    ) {
        self.record(Call::UseProgramStages {
            pipeline: pipeline.raw(),
            stages,
            program: program.raw(),
        });
    }

    fn bind_pipeline(&self, pipeline: PipelineHandle) {
        self.record(Call::BindPipeline(pipeline.raw()));
    }

    fn create_texture(&self) -> TextureHandle {
        let raw = self.next();
        self.record(Call::CreateTexture(raw));
        TextureHandle::from_raw(raw)
    }

    fn delete_texture(&self, texture: TextureHandle) {
        self.record(Call::DeleteTexture(texture.raw()));
    }

    fn texture_storage_2d(
        &self,
        texture: TextureHandle,
        levels: u32,
        format: TextureFormat,
        width: u32,
        height: u32,
    ) {
        self.record(Call::TextureStorage2D {
            texture: texture.raw(),
            levels,
            format,
            width,
            height,
        });
    }

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
    ) {
        self.record(Call::TextureSubImage2D {
            texture: texture.raw(),
            level,
            x,
            y,
            width,
            height,
            format,
            data: data.to_vec(),
        });
    }

    fn texture_parameter_i32(
        &self,
        texture: TextureHandle,
        parameter: TextureParameter,
        value: i32,
    ) {
        self.record(Call::TextureParameterI32 {
            texture: texture.raw(),
            parameter,
            value,
        });
    }

    fn bind_texture_unit(&self, unit: u32, texture: TextureHandle) {
        self.record(Call::BindTextureUnit {
            unit,
            texture: texture.raw(),
        });
    }
}

/// In-memory [`ShaderSources`] keyed by `name.extension`.
pub(crate) struct MapSources(HashMap<String, String>);

impl MapSources {
    pub(crate) fn single(name: &str, stage: ShaderStage, text: &str) -> Self {
        let mut sources = HashMap::new();
        sources.insert(
            format!("{name}.{}", stage.file_extension()),
            text.to_owned(),
        );
        Self(sources)
    }
}

impl ShaderSources for MapSources {
    fn source(&self, name: &str, stage: ShaderStage) -> io::Result<String> {
        let key = format!("{name}.{}", stage.file_extension());
        self.0.get(&key).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no shader source '{key}'"))
        })
    }
}

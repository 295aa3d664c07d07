//! Separable shader stage programs and their uniform caches.
//!
//! Each [`ShaderProgram`] wraps one independently-compiled stage. Creation
//! compiles the stage's source text into a separable program and walks the
//! driver's active-uniform metadata exactly once, recording every uniform
//! name's location. Later `set_uniform` calls resolve against that cache
//! instead of round-tripping a location query per frame.

use std::collections::HashMap;
use std::io;

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::driver::{Driver, StageBits};
use crate::error::GpuError;
use crate::handle::ShaderKind;
use crate::object::{GpuObject, ObjectCore};

/// The stage a shader program is compiled as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
}

impl ShaderStage {
    /// Conventional source-file suffix for this stage.
    pub fn file_extension(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vert",
            ShaderStage::Fragment => "frag",
            ShaderStage::Geometry => "geom",
            ShaderStage::TessControl => "tesc",
            ShaderStage::TessEvaluation => "tese",
            ShaderStage::Compute => "comp",
        }
    }

    /// The stage bit used when composing this stage into a pipeline.
    pub fn bits(self) -> StageBits {
        match self {
            ShaderStage::Vertex => StageBits::VERTEX,
            ShaderStage::Fragment => StageBits::FRAGMENT,
            ShaderStage::Geometry => StageBits::GEOMETRY,
            ShaderStage::TessControl => StageBits::TESS_CONTROL,
            ShaderStage::TessEvaluation => StageBits::TESS_EVALUATION,
            ShaderStage::Compute => StageBits::COMPUTE,
        }
    }
}

/// Source-text lookup collaborator: given a logical name and the stage it
/// will be compiled as, produce the shader's source.
pub trait ShaderSources {
    fn source(&self, name: &str, stage: ShaderStage) -> io::Result<String>;
}

/// A uniform value of one of the supported shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl From<bool> for UniformValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<Vec2> for UniformValue {
    fn from(value: Vec2) -> Self {
        Self::Vec2(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        Self::Vec4(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        Self::Mat4(value)
    }
}

/// One independently-compiled shader stage.
#[derive(Debug)]
pub struct ShaderProgram {
    core: ObjectCore<ShaderKind>,
    stage: ShaderStage,
    source_name: String,
    uniforms: HashMap<String, i32>,
}

impl ShaderProgram {
    /// `source_name` is the logical name handed to the [`ShaderSources`]
    /// collaborator; the stage picks the file suffix.
    pub fn new(
        stage: ShaderStage,
        label: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            core: ObjectCore::new(label),
            stage,
            source_name: source_name.into(),
            uniforms: HashMap::new(),
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Compile the stage and populate the uniform cache.
    ///
    /// The cache is filled exactly once, here; it stays empty until the
    /// program is live and is immutable afterwards.
    pub fn create(&mut self, gl: &dyn Driver, sources: &dyn ShaderSources) -> Result<(), GpuError> {
        if !self.core.check_valid_for_creation() {
            return Ok(());
        }

        let text =
            sources
                .source(&self.source_name, self.stage)
                .map_err(|source| GpuError::SourceLoad {
                    name: self.core.label().to_owned(),
                    source,
                })?;

        let handle = gl
            .create_shader_program(self.stage, &text)
            .map_err(|log| GpuError::Compile {
                name: self.core.label().to_owned(),
                log,
            })?;
        self.core.adopt(handle);

        let count = gl.active_uniform_count(handle);
        let max_name_len = gl.active_uniform_max_name_len(handle);
        for index in 0..count {
            let name = gl.active_uniform_name(handle, index, max_name_len);
            let location = gl.uniform_location(handle, &name);
            self.uniforms.insert(name, location);
        }

        Ok(())
    }

    /// Cached location of an active uniform, if the compiled program has one
    /// by that name.
    pub fn uniform_location(&self, name: &str) -> Option<i32> {
        self.uniforms.get(name).copied()
    }

    /// Set a uniform by name.
    ///
    /// A name the compiled program does not use is logged and skipped; a
    /// shader is free to ignore uniforms its callers set every frame.
    pub fn set_uniform(&self, gl: &dyn Driver, name: &str, value: impl Into<UniformValue>) {
        if !self.core.check_valid_for_use("set uniform on") {
            return;
        }
        let Some(&location) = self.uniforms.get(name) else {
            tracing::warn!(
                "shader '{}' has no uniform named '{}'",
                self.core.label(),
                name
            );
            return;
        };

        let handle = self.core.handle();
        match value.into() {
            UniformValue::Bool(v) => gl.set_uniform_i32(handle, location, i32::from(v)),
            UniformValue::Int(v) => gl.set_uniform_i32(handle, location, v),
            UniformValue::Float(v) => gl.set_uniform_f32(handle, location, v),
            UniformValue::Vec2(v) => gl.set_uniform_vec2(handle, location, v.to_array()),
            UniformValue::Vec3(v) => gl.set_uniform_vec3(handle, location, v.to_array()),
            UniformValue::Vec4(v) => gl.set_uniform_vec4(handle, location, v.to_array()),
            // Matrices cross the driver boundary in row-major element order
            // with the transpose flag set; glam stores columns, so reorder
            // before upload.
            UniformValue::Mat4(v) => {
                gl.set_uniform_mat4(handle, location, true, v.transpose().to_cols_array());
            }
        }
    }
}

impl GpuObject for ShaderProgram {
    type Kind = ShaderKind;

    fn core(&self) -> &ObjectCore<ShaderKind> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore<ShaderKind> {
        &mut self.core
    }

    fn delete_handle(&self, gl: &dyn Driver) {
        gl.delete_shader_program(self.core.handle());
    }
}

//! GPU texture management.

use crate::driver::{Driver, Filter, PixelFormat, TextureFormat, TextureParameter, WrapMode};
use crate::handle::TextureKind;
use crate::object::{GpuObject, ObjectCore};

/// Storage format and sampling parameters, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct TextureConfig {
    pub format: TextureFormat,
    pub pixel_format: PixelFormat,
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            format: TextureFormat::Rgba8,
            pixel_format: PixelFormat::Rgba,
            min_filter: Filter::Linear,
            mag_filter: Filter::Linear,
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
        }
    }
}

/// A 2D texture with single-level immutable storage. No mipmaps, no resize.
#[derive(Debug)]
pub struct GpuTexture {
    core: ObjectCore<TextureKind>,
    config: TextureConfig,
    width: u32,
    height: u32,
}

impl GpuTexture {
    pub fn new(label: impl Into<String>, config: TextureConfig) -> Self {
        Self {
            core: ObjectCore::new(label),
            config,
            width: 0,
            height: 0,
        }
    }

    /// Allocate storage for `width` x `height` pixels and upload `data`,
    /// which must use the channel layout declared in the config.
    pub fn create(&mut self, gl: &dyn Driver, data: &[u8], width: u32, height: u32) {
        if !self.core.check_valid_for_creation() {
            return;
        }

        let handle = gl.create_texture();
        self.core.adopt(handle);

        self.set_parameter(gl, TextureParameter::MinFilter, self.config.min_filter as i32);
        self.set_parameter(gl, TextureParameter::MagFilter, self.config.mag_filter as i32);
        self.set_parameter(gl, TextureParameter::WrapS, self.config.wrap_s as i32);
        self.set_parameter(gl, TextureParameter::WrapT, self.config.wrap_t as i32);

        gl.texture_storage_2d(handle, 1, self.config.format, width, height);
        gl.texture_sub_image_2d(
            handle,
            0,
            0,
            0,
            width,
            height,
            self.config.pixel_format,
            data,
        );

        self.width = width;
        self.height = height;
    }

    pub fn config(&self) -> TextureConfig {
        self.config
    }

    /// Dimensions recorded at creation; (0, 0) until then.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Write an integer-valued texture parameter.
    pub fn set_parameter(&self, gl: &dyn Driver, parameter: TextureParameter, value: i32) {
        if !self.core.check_valid_for_use("set parameter on") {
            return;
        }
        gl.texture_parameter_i32(self.core.handle(), parameter, value);
    }

    /// Bind the texture to a texture unit.
    pub fn bind(&self, gl: &dyn Driver, unit: u32) {
        if !self.core.check_valid_for_use("bind") {
            return;
        }
        gl.bind_texture_unit(unit, self.core.handle());
    }
}

impl GpuObject for GpuTexture {
    type Kind = TextureKind;

    fn core(&self) -> &ObjectCore<TextureKind> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore<TextureKind> {
        &mut self.core
    }

    fn delete_handle(&self, gl: &dyn Driver) {
        gl.delete_texture(self.core.handle());
    }
}

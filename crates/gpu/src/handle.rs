//! Kind-tagged driver handles.

use std::fmt;
use std::marker::PhantomData;

/// Marker trait for the object kinds a handle can name.
pub trait HandleKind: Copy + Eq + fmt::Debug {
    /// Human-readable kind name used in diagnostics.
    const NAME: &'static str;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BufferKind;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ShaderKind;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PipelineKind;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TextureKind;

impl HandleKind for BufferKind {
    const NAME: &'static str = "buffer";
}

impl HandleKind for ShaderKind {
    const NAME: &'static str = "shader program";
}

impl HandleKind for PipelineKind {
    const NAME: &'static str = "program pipeline";
}

impl HandleKind for TextureKind {
    const NAME: &'static str = "texture";
}

/// Opaque identifier for a driver-side object of kind `K`.
///
/// The raw value 0 names no object. Handles are plain values: copying one
/// does not copy the GPU object, and dropping one does not delete it; the
/// wrapper types in this crate own the lifecycle.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle<K: HandleKind> {
    raw: u32,
    _kind: PhantomData<K>,
}

pub type BufferHandle = Handle<BufferKind>;
pub type ShaderHandle = Handle<ShaderKind>;
pub type PipelineHandle = Handle<PipelineKind>;
pub type TextureHandle = Handle<TextureKind>;

impl<K: HandleKind> Handle<K> {
    /// The null handle, naming no object.
    pub const NULL: Self = Self {
        raw: 0,
        _kind: PhantomData,
    };

    pub fn from_raw(raw: u32) -> Self {
        Self {
            raw,
            _kind: PhantomData,
        }
    }

    /// The raw driver identifier. There is no implicit conversion from a
    /// wrapper or handle to the raw value; call sites spell it out.
    pub fn raw(self) -> u32 {
        self.raw
    }

    pub fn is_null(self) -> bool {
        self.raw == 0
    }
}

impl<K: HandleKind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle<{}>({})", K::NAME, self.raw)
    }
}

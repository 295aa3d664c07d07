//! GPU buffer management.

use bytemuck::Pod;

use crate::driver::{Driver, IndexedTarget};
use crate::handle::{BufferHandle, BufferKind};
use crate::object::{GpuObject, ObjectCore, ObjectState};

pub use crate::driver::{StorageFlags, UsageHint};

/// Allocation policy chosen at construction.
///
/// The policy decides which driver allocation call the first upload goes
/// through; it cannot change afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferInit {
    /// Immutable backing storage allocated with the given flags.
    FixedStorage(StorageFlags),
    /// Re-uploadable storage declared with a usage hint.
    Streaming(UsageHint),
}

/// A driver-side memory buffer.
///
/// The size is fixed by the first upload under either policy; later uploads
/// go through [`GpuBuffer::edit_bytes`] into the existing range.
#[derive(Debug)]
pub struct GpuBuffer {
    core: ObjectCore<BufferKind>,
    init: BufferInit,
    size_in_bytes: usize,
}

impl GpuBuffer {
    pub fn new(label: impl Into<String>, init: BufferInit) -> Self {
        Self {
            core: ObjectCore::new(label),
            init,
            size_in_bytes: 0,
        }
    }

    /// Allocate the driver handle. No storage is reserved until the first
    /// upload.
    pub fn create(&mut self, gl: &dyn Driver) {
        if !self.core.check_valid_for_creation() {
            return;
        }
        self.core.adopt(gl.create_buffer());
    }

    pub fn init(&self) -> BufferInit {
        self.init
    }

    /// Size fixed by the first upload; 0 while no contents were ever set.
    pub fn size_in_bytes(&self) -> usize {
        self.size_in_bytes
    }

    /// Upload the buffer's contents from a typed slice.
    pub fn set_data<T: Pod>(&mut self, gl: &dyn Driver, data: &[T]) {
        self.set_bytes(gl, bytemuck::cast_slice(data));
    }

    /// Upload the buffer's contents, fixing its size.
    pub fn set_bytes(&mut self, gl: &dyn Driver, data: &[u8]) {
        if !self.core.check_valid_for_use("upload") {
            return;
        }
        if self.size_in_bytes != 0 {
            tracing::error!(
                "cannot upload buffer '{}' again: its size was fixed at {} bytes by the first upload",
                self.core.label(),
                self.size_in_bytes
            );
            return;
        }

        self.size_in_bytes = data.len();
        let handle = self.core.handle();
        match self.init {
            BufferInit::FixedStorage(flags) => gl.buffer_storage(handle, data, flags),
            BufferInit::Streaming(usage) => gl.buffer_data(handle, data, usage),
        }
    }

    /// Replace part of the buffer from a typed slice.
    pub fn edit_data<T: Pod>(&self, gl: &dyn Driver, data: &[T], offset: usize) {
        self.edit_bytes(gl, bytemuck::cast_slice(data), offset);
    }

    /// Replace `data.len()` bytes starting at `offset`.
    ///
    /// The target range must lie inside the size fixed by the first upload;
    /// an out-of-range edit is logged and skipped without reaching the
    /// driver.
    pub fn edit_bytes(&self, gl: &dyn Driver, data: &[u8], offset: usize) {
        if !self.core.check_valid_for_use("edit") {
            return;
        }
        if self.size_in_bytes == 0 {
            tracing::error!(
                "cannot edit buffer '{}': no contents were ever set",
                self.core.label()
            );
            return;
        }
        if offset + data.len() > self.size_in_bytes {
            tracing::error!(
                "cannot edit buffer '{}': {} bytes at offset {} overflow its {} bytes",
                self.core.label(),
                data.len(),
                offset,
                self.size_in_bytes
            );
            return;
        }
        gl.buffer_sub_data(self.core.handle(), offset, data);
    }

    /// Bind the buffer to an indexed shader-storage binding point.
    pub fn bind(&self, gl: &dyn Driver, index: u32) {
        if !self.core.check_valid_for_use("bind") {
            return;
        }
        gl.bind_buffer_base(IndexedTarget::ShaderStorage, index, self.core.handle());
    }
}

impl GpuObject for GpuBuffer {
    type Kind = BufferKind;

    fn core(&self) -> &ObjectCore<BufferKind> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore<BufferKind> {
        &mut self.core
    }

    fn delete_handle(&self, gl: &dyn Driver) {
        gl.delete_buffer(self.core.handle());
    }
}

/// Allocate handles for every still-unallocated buffer in `buffers` with one
/// bulk driver call. Buffers that fail the creation guard are skipped (and
/// logged) individually.
pub fn create_buffers(gl: &dyn Driver, buffers: &mut [GpuBuffer]) {
    let wanted: Vec<usize> = buffers
        .iter()
        .enumerate()
        .filter(|(_, buffer)| buffer.core.check_valid_for_creation())
        .map(|(slot, _)| slot)
        .collect();
    if wanted.is_empty() {
        return;
    }

    let handles = gl.create_buffers(wanted.len());
    for (slot, handle) in wanted.into_iter().zip(handles) {
        buffers[slot].core.adopt(handle);
    }
}

/// Tear down every buffer in `buffers`, deleting all live handles with one
/// bulk driver call.
pub fn free_buffers(gl: &dyn Driver, buffers: &mut [GpuBuffer]) {
    let live: Vec<BufferHandle> = buffers
        .iter()
        .filter(|buffer| buffer.state() == ObjectState::Live)
        .map(|buffer| buffer.handle())
        .collect();
    if !live.is_empty() {
        gl.delete_buffers(&live);
    }
    for buffer in buffers {
        buffer.free_without_delete();
    }
}

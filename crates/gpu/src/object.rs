//! Shared lifecycle state machine for driver-side objects.
//!
//! Every wrapper in this crate moves through the same three states:
//! `Unallocated` until its create operation succeeds, `Live` while it owns a
//! driver handle, and `Freed` forever after. The guards here centralize the
//! checks so each wrapper only supplies its kind-specific delete call.

use crate::driver::Driver;
use crate::handle::{Handle, HandleKind};

/// Lifecycle state of a driver-side object.
///
/// Transitions are monotonic: `Unallocated -> Live -> Freed`, each taken at
/// most once. There is no way back out of `Freed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectState {
    /// Constructed, but no driver handle has been allocated yet.
    Unallocated,
    /// Holds a driver handle and accepts use-operations.
    Live,
    /// Torn down; every further operation is rejected.
    Freed,
}

/// The state shared by every GPU object wrapper: a debug label, the driver
/// handle, and the freed flag.
#[derive(Debug)]
pub struct ObjectCore<K: HandleKind> {
    label: String,
    handle: Handle<K>,
    freed: bool,
}

impl<K: HandleKind> ObjectCore<K> {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            handle: Handle::NULL,
            freed: false,
        }
    }

    /// Debug label given at construction; appears in every diagnostic.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn handle(&self) -> Handle<K> {
        self.handle
    }

    pub fn state(&self) -> ObjectState {
        if self.freed {
            ObjectState::Freed
        } else if self.handle.is_null() {
            ObjectState::Unallocated
        } else {
            ObjectState::Live
        }
    }

    pub(crate) fn adopt(&mut self, handle: Handle<K>) {
        self.handle = handle;
    }

    pub(crate) fn clear_handle(&mut self) {
        self.handle = Handle::NULL;
    }

    pub(crate) fn mark_freed(&mut self) {
        self.freed = true;
    }

    /// Gate for create operations. Logs and returns `false` unless the
    /// object is still `Unallocated`; the caller must then do nothing.
    pub(crate) fn check_valid_for_creation(&self) -> bool {
        match self.state() {
            ObjectState::Freed => {
                tracing::warn!(
                    "cannot create {} '{}': object was already freed",
                    K::NAME,
                    self.label
                );
                false
            }
            ObjectState::Live => {
                tracing::warn!(
                    "cannot create {} '{}': it already has a handle",
                    K::NAME,
                    self.label
                );
                false
            }
            ObjectState::Unallocated => true,
        }
    }

    /// Gate for every operation that touches the driver handle. Logs the
    /// attempted operation and returns `false` unless the object is `Live`.
    pub(crate) fn check_valid_for_use(&self, operation: &str) -> bool {
        match self.state() {
            ObjectState::Freed => {
                tracing::warn!(
                    "cannot {} {} '{}': object was already freed",
                    operation,
                    K::NAME,
                    self.label
                );
                false
            }
            ObjectState::Unallocated => {
                tracing::warn!(
                    "cannot {} {} '{}': it has no handle yet",
                    operation,
                    K::NAME,
                    self.label
                );
                false
            }
            ObjectState::Live => true,
        }
    }
}

/// Common surface of every GPU object wrapper.
///
/// Implementors provide access to their [`ObjectCore`] and the kind-specific
/// driver delete call; the lifecycle logic itself lives in the provided
/// methods.
pub trait GpuObject {
    type Kind: HandleKind;

    fn core(&self) -> &ObjectCore<Self::Kind>;
    fn core_mut(&mut self) -> &mut ObjectCore<Self::Kind>;

    /// Issue the kind-specific driver delete call for the current handle.
    /// Only ever invoked while the object is `Live`.
    fn delete_handle(&self, gl: &dyn Driver);

    fn label(&self) -> &str {
        self.core().label()
    }

    fn handle(&self) -> Handle<Self::Kind> {
        self.core().handle()
    }

    fn state(&self) -> ObjectState {
        self.core().state()
    }

    /// Tear the object down, deleting the driver object if one is live.
    ///
    /// Freeing twice is an idempotent no-op: it logs, keeps the state at
    /// `Freed`, and issues no second driver call.
    fn free(&mut self, gl: &dyn Driver) {
        if self.state() == ObjectState::Freed {
            tracing::warn!(
                "ignoring repeated free of {} '{}'",
                <Self::Kind as HandleKind>::NAME,
                self.label()
            );
            return;
        }
        if self.state() == ObjectState::Live {
            self.delete_handle(gl);
            self.core_mut().clear_handle();
        }
        self.core_mut().mark_freed();
    }

    /// Transition to `Freed` without touching the driver, for handles an
    /// external owner already destroyed (e.g. a batched delete).
    fn free_without_delete(&mut self) {
        if self.state() == ObjectState::Freed {
            tracing::warn!(
                "ignoring repeated free of {} '{}'",
                <Self::Kind as HandleKind>::NAME,
                self.label()
            );
            return;
        }
        self.core_mut().mark_freed();
    }
}

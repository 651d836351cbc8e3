use std::sync::Arc;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::domain::scan::{ArPlane, DetectedPlane, LightingCondition};
use crate::error::EstimateResult;

/// A running AR tracking session supplied by a platform adapter.
pub trait ArSession: Send {
    /// Advance to the latest camera frame.
    ///
    /// Adapters return `EstimateError::SessionClosed` once the session can
    /// never produce frames again.
    fn update(&mut self) -> EstimateResult<()>;

    fn is_tracking(&self) -> bool;

    /// Currently tracked planes.
    fn planes(&self) -> Vec<ArPlane>;

    /// Tracked planes with pose information. Adapters without poses can
    /// rely on the default, which places every plane at the origin.
    fn detected_planes(&self) -> Vec<DetectedPlane> {
        self.planes().iter().map(DetectedPlane::from).collect()
    }

    fn light_estimate(&self) -> Option<LightingCondition> {
        None
    }

    fn pause(&mut self);

    fn resume(&mut self) -> EstimateResult<()>;

    fn close(&mut self);
}

/// Session shared between its owner and the scan loop.
///
/// Tracks which scan currently owns the session so a stale scan loop
/// never pauses a session a newer scan is driving.
pub struct SharedSession<S> {
    inner: Arc<Mutex<ScanSlot<S>>>,
}

pub(crate) struct ScanSlot<S> {
    pub(crate) session: S,
    /// Bumped by every `scan_room` call
    pub(crate) epoch: u64,
}

impl<S> Clone for SharedSession<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ArSession> SharedSession<S> {
    pub fn new(session: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ScanSlot { session, epoch: 0 })),
        }
    }

    pub fn lock(&self) -> MappedMutexGuard<'_, S> {
        MutexGuard::map(self.inner.lock(), |slot| &mut slot.session)
    }

    pub(crate) fn lock_slot(&self) -> MutexGuard<'_, ScanSlot<S>> {
        self.inner.lock()
    }
}

impl<S> std::fmt::Debug for SharedSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSession").finish_non_exhaustive()
    }
}

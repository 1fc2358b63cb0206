use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use crate::{
    surface::SurfaceError,
    tauri_shell::TauriShell,
    window_controller::{Shell, WindowController},
};

pub(crate) type DesktopController = WindowController<TauriShell>;

/// Managed state holding the single controller. Empty until `setup` ran.
#[derive(Default)]
pub(crate) struct ControllerState {
    pub(crate) controller: Mutex<Option<DesktopController>>,
}

/// Stores `controller` and starts it with the slot held. Work queued while
/// `start` runs (payload results, page loads) finds a busy controller and is
/// queued again instead of an empty slot. A failed start empties the slot.
pub(crate) fn start_in_slot<S: Shell>(
    slot: &Mutex<Option<WindowController<S>>>,
    controller: WindowController<S>,
) -> Result<(), SurfaceError> {
    let mut guard = match slot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let result = guard.insert(controller).start();
    if result.is_err() {
        *guard = None;
    }
    result
}

/// Set once the exit sequence starts. Shared between the controller and the
/// close-request hook, which must answer synchronously without locking the
/// controller.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExitFlag(Arc<AtomicBool>);

impl ExitFlag {
    pub(crate) fn is_exiting(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Returns `true` only for the caller that flipped the flag.
    pub(crate) fn try_begin(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

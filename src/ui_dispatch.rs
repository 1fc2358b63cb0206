use std::sync::{MutexGuard, TryLockError};

use tauri::{AppHandle, Manager};

use crate::{append_desktop_log, app_types::DesktopController, ControllerState};

pub(crate) fn run_on_main_thread_dispatch<F>(
    app_handle: &AppHandle,
    task_name: &str,
    task: F,
) -> Result<(), String>
where
    F: FnOnce(&AppHandle) + Send + 'static,
{
    let main_app = app_handle.clone();
    app_handle
        .run_on_main_thread(move || task(&main_app))
        .map_err(|error| format!("failed to dispatch {task_name} to main thread: {error}"))
}

/// Queues `task` against the controller on the main thread. If the controller
/// is busy (a nested platform event loop inside a controller call), the task
/// is queued again instead of blocking.
pub(crate) fn with_controller<F>(app_handle: &AppHandle, task_name: &'static str, task: F)
where
    F: FnOnce(&mut DesktopController) + Send + 'static,
{
    let result = run_on_main_thread_dispatch(app_handle, task_name, move |main_app| {
        let state = main_app.state::<ControllerState>();
        let Some(mut guard) = try_lock_state(&state, task_name) else {
            with_controller(main_app, task_name, task);
            return;
        };
        match guard.as_mut() {
            Some(controller) => task(controller),
            None => append_desktop_log(&format!("{task_name} skipped: controller not ready")),
        }
    });
    if let Err(error) = result {
        append_desktop_log(&error);
    }
}

/// Runs `task` right away, or returns `None` when the controller is missing or
/// busy. For commands and the final `RunEvent::Exit`.
pub(crate) fn lock_controller<F, T>(app_handle: &AppHandle, task_name: &str, task: F) -> Option<T>
where
    F: FnOnce(&mut DesktopController) -> T,
{
    let state = app_handle.state::<ControllerState>();
    let Some(mut guard) = try_lock_state(&state, task_name) else {
        append_desktop_log(&format!("{task_name} skipped: controller busy"));
        return None;
    };
    match guard.as_mut() {
        Some(controller) => Some(task(controller)),
        None => {
            append_desktop_log(&format!("{task_name} skipped: controller not ready"));
            None
        }
    }
}

fn try_lock_state<'a>(
    state: &'a ControllerState,
    task_name: &str,
) -> Option<MutexGuard<'a, Option<DesktopController>>> {
    match state.controller.try_lock() {
        Ok(guard) => Some(guard),
        Err(TryLockError::Poisoned(poisoned)) => {
            append_desktop_log(&format!("controller lock poisoned during {task_name}"));
            Some(poisoned.into_inner())
        }
        Err(TryLockError::WouldBlock) => None,
    }
}

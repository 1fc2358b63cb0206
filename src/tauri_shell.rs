use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_notification::NotificationExt;
use tokio::time::MissedTickBehavior;

use crate::{
    append_desktop_log, dark_mode_payload, menu_setup,
    preferences::{self, Preferences, PreferencesError},
    runtime_paths,
    scheduler::{ScheduledTask, TimerKind, Timing},
    surface::{SurfaceError, SurfaceOptions},
    tauri_surface::{self, TauriSurface},
    ui_dispatch,
    window_controller::Shell,
    DARK_READER_CDN_URL, DARK_READER_FETCH_TIMEOUT, DARK_READER_RESOURCE, TRAY_ID,
};

pub(crate) struct TauriShell {
    app_handle: AppHandle,
    preferences_path: Option<PathBuf>,
}

impl TauriShell {
    pub(crate) fn new(app_handle: AppHandle, preferences_path: Option<PathBuf>) -> Self {
        Self {
            app_handle,
            preferences_path,
        }
    }

    fn payload_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        match self.app_handle.path().resource_dir() {
            Ok(resource_dir) => candidates.push(resource_dir.join(DARK_READER_RESOURCE)),
            Err(error) => append_desktop_log(&format!("resource dir unavailable: {error}")),
        }
        candidates
    }
}

impl Shell for TauriShell {
    type Surface = TauriSurface;

    fn create_surface(&self, options: SurfaceOptions) -> Result<TauriSurface, SurfaceError> {
        tauri_surface::build_surface(&self.app_handle, options)
    }

    fn schedule(&self, kind: TimerKind, timing: Timing) -> ScheduledTask {
        spawn_timer(&self.app_handle, kind, timing)
    }

    fn save_preferences(&self, preferences: &Preferences) -> Result<(), PreferencesError> {
        let path = self
            .preferences_path
            .as_deref()
            .ok_or(PreferencesError::NoConfigDir)?;
        preferences::save(path, preferences)
    }

    fn request_dark_mode_payload(&self) {
        let app_handle = self.app_handle.clone();
        let candidates = self.payload_candidates();
        let cache_path = runtime_paths::dark_reader_cache_path();
        tauri::async_runtime::spawn_blocking(move || {
            let result = dark_mode_payload::resolve_payload(
                &candidates,
                cache_path.as_deref(),
                DARK_READER_CDN_URL,
                DARK_READER_FETCH_TIMEOUT,
            );
            ui_dispatch::with_controller(&app_handle, "dark mode payload", move |controller| {
                controller.on_dark_mode_payload(result)
            });
        });
    }

    fn refresh_menus(&self, dark_mode_enabled: bool) {
        if let Err(error) = menu_setup::refresh_app_menu(&self.app_handle, dark_mode_enabled) {
            append_desktop_log(&format!("failed to refresh app menu: {error}"));
        }
    }

    fn show_error(&self, title: &str, message: &str) {
        self.app_handle
            .dialog()
            .message(message)
            .title(title)
            .kind(MessageDialogKind::Error)
            .buttons(MessageDialogButtons::Ok)
            .show(|_| {});
    }

    fn notify(&self, title: &str, body: &str) {
        if let Err(error) = self
            .app_handle
            .notification()
            .builder()
            .title(title)
            .body(body)
            .show()
        {
            append_desktop_log(&format!("failed to show notification: {error}"));
        }
    }

    fn has_tray(&self) -> bool {
        self.app_handle.tray_by_id(TRAY_ID).is_some()
    }

    fn remove_tray(&self) {
        if self.app_handle.remove_tray_by_id(TRAY_ID).is_none() {
            append_desktop_log("tray already removed");
        }
    }

    fn terminate(&self, code: i32) {
        append_desktop_log(&format!("terminating with exit code {code}"));
        self.app_handle.exit(code);
    }
}

/// Runs timers on the async runtime and delivers ticks on the main thread.
/// The cancelled flag is re-checked there so a tick queued just before
/// cancellation never reaches the controller.
fn spawn_timer(app_handle: &AppHandle, kind: TimerKind, timing: Timing) -> ScheduledTask {
    let cancelled = Arc::new(AtomicBool::new(false));
    let task_cancelled = Arc::clone(&cancelled);
    let app_handle = app_handle.clone();

    let join = tauri::async_runtime::spawn(async move {
        match timing {
            Timing::Once(delay) => {
                tokio::time::sleep(delay).await;
                dispatch_tick(&app_handle, kind, &task_cancelled);
            }
            Timing::Every(period) => {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                // The first tick completes immediately.
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    if !dispatch_tick(&app_handle, kind, &task_cancelled) {
                        break;
                    }
                }
            }
        }
    });

    ScheduledTask::new(kind, move || {
        cancelled.store(true, Ordering::Release);
        join.abort();
    })
}

fn dispatch_tick(app_handle: &AppHandle, kind: TimerKind, cancelled: &Arc<AtomicBool>) -> bool {
    if cancelled.load(Ordering::Acquire) {
        return false;
    }
    let cancelled = Arc::clone(cancelled);
    ui_dispatch::with_controller(app_handle, "timer tick", move |controller| {
        if !cancelled.load(Ordering::Acquire) {
            controller.on_timer(kind);
        }
    });
    true
}

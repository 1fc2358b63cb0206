use serde::Serialize;
use tauri::{AppHandle, WebviewWindow};
use url::Url;

use crate::{
    preferences::{CustomStrings, CustomStringsUpdate},
    surface::SurfaceEvent,
    ui_dispatch, window_actions, CONFIRM_RESET_WINDOW_LABEL, MAIN_WINDOW_LABEL,
};

const MAX_CUSTOM_STRING_CHARS: usize = 120;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SettingsSnapshot {
    pub(crate) dark_mode_enabled: bool,
    pub(crate) custom_strings: CustomStrings,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) struct SettingsCommandResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl SettingsCommandResult {
    fn ok() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

fn validate_update(update: &CustomStringsUpdate) -> Result<(), String> {
    let fields = [
        ("title", &update.title),
        ("subtitle", &update.subtitle),
        ("loadingText", &update.loading_text),
        ("exitText", &update.exit_text),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            if value.chars().count() > MAX_CUSTOM_STRING_CHARS {
                return Err(format!(
                    "{name} is longer than {MAX_CUSTOM_STRING_CHARS} characters."
                ));
            }
        }
    }
    Ok(())
}

fn parse_navigated_url(raw_url: &str) -> Result<Url, String> {
    let parsed = Url::parse(raw_url.trim()).map_err(|error| format!("Invalid URL: {error}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(format!("Unsupported URL scheme '{scheme}'.")),
    }
}

#[tauri::command]
pub(crate) fn settings_get_preferences(app_handle: AppHandle) -> Option<SettingsSnapshot> {
    ui_dispatch::lock_controller(&app_handle, "read preferences", |controller| {
        let preferences = controller.preferences();
        SettingsSnapshot {
            dark_mode_enabled: preferences.dark_mode_enabled,
            custom_strings: preferences.custom_strings.clone(),
        }
    })
}

#[tauri::command]
pub(crate) fn settings_update_custom_strings(
    app_handle: AppHandle,
    update: CustomStringsUpdate,
) -> SettingsCommandResult {
    if let Err(reason) = validate_update(&update) {
        return SettingsCommandResult::failed(reason);
    }
    ui_dispatch::with_controller(&app_handle, "update custom strings", move |controller| {
        controller.update_custom_strings(update)
    });
    SettingsCommandResult::ok()
}

#[tauri::command]
pub(crate) fn settings_toggle_dark_mode(app_handle: AppHandle) -> SettingsCommandResult {
    ui_dispatch::with_controller(&app_handle, "toggle dark mode", |controller| {
        controller.toggle_dark_mode()
    });
    SettingsCommandResult::ok()
}

/// Answer from the session reset confirmation page.
#[tauri::command]
pub(crate) fn session_reset_answer(
    app_handle: AppHandle,
    window: WebviewWindow,
    confirmed: bool,
) -> SettingsCommandResult {
    if window.label() != CONFIRM_RESET_WINDOW_LABEL {
        return SettingsCommandResult::failed("Only the confirmation window can answer.");
    }
    ui_dispatch::with_controller(&app_handle, "session reset answer", move |controller| {
        controller.on_session_reset_answer(confirmed)
    });
    SettingsCommandResult::ok()
}

/// Called by the main surface's navigation hook. Other windows are ignored.
#[tauri::command]
pub(crate) fn surface_in_page_navigated(
    app_handle: AppHandle,
    window: WebviewWindow,
    url: String,
) -> SettingsCommandResult {
    if window.label() != MAIN_WINDOW_LABEL {
        return SettingsCommandResult::failed("Navigation reports are only accepted from main.");
    }
    match parse_navigated_url(&url) {
        Ok(parsed) => {
            window_actions::forward_surface_event(
                &app_handle,
                window.label(),
                SurfaceEvent::InPageNavigated(parsed.to_string()),
            );
            SettingsCommandResult::ok()
        }
        Err(reason) => SettingsCommandResult::failed(reason),
    }
}

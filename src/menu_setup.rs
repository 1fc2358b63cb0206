use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem, Submenu},
    AppHandle, Wry,
};
#[cfg(not(target_os = "macos"))]
use tauri::Manager;

use crate::{menu_actions, APP_DISPLAY_NAME};
#[cfg(not(target_os = "macos"))]
use crate::MAIN_WINDOW_LABEL;

pub fn dark_mode_toggle_label(dark_mode_enabled: bool) -> &'static str {
    if dark_mode_enabled {
        "Disable Dark Mode"
    } else {
        "Enable Dark Mode"
    }
}

fn menu_item(
    app_handle: &AppHandle,
    id: &str,
    text: &str,
    accelerator: Option<&str>,
) -> Result<MenuItem<Wry>, String> {
    MenuItem::with_id(app_handle, id, text, true, accelerator)
        .map_err(|error| format!("Failed to create menu item {id}: {error}"))
}

pub fn build_app_menu(app_handle: &AppHandle, dark_mode_enabled: bool) -> Result<Menu<Wry>, String> {
    let settings_item = menu_item(
        app_handle,
        menu_actions::APP_MENU_OPEN_SETTINGS,
        "Settings…",
        Some("CmdOrCtrl+,"),
    )?;
    let hide_item = menu_item(
        app_handle,
        menu_actions::APP_MENU_HIDE_WINDOW,
        "Hide",
        Some("CmdOrCtrl+H"),
    )?;
    let quit_item = menu_item(
        app_handle,
        menu_actions::APP_MENU_QUIT,
        "Quit",
        Some("CmdOrCtrl+Q"),
    )?;
    let reload_item = menu_item(
        app_handle,
        menu_actions::APP_MENU_RELOAD,
        "Reload",
        Some("CmdOrCtrl+R"),
    )?;
    let dark_mode_item = menu_item(
        app_handle,
        menu_actions::APP_MENU_TOGGLE_DARK_MODE,
        dark_mode_toggle_label(dark_mode_enabled),
        Some("CmdOrCtrl+D"),
    )?;
    let clear_session_item = menu_item(
        app_handle,
        menu_actions::APP_MENU_CLEAR_SESSION,
        "Clear Session Data…",
        None,
    )?;
    let separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create menu separator: {error}"))?;

    let app_menu = Submenu::with_items(
        app_handle,
        APP_DISPLAY_NAME,
        true,
        &[&settings_item, &separator, &hide_item, &quit_item],
    )
    .map_err(|error| format!("Failed to build app submenu: {error}"))?;
    let view_menu = Submenu::with_items(app_handle, "View", true, &[&reload_item, &dark_mode_item])
        .map_err(|error| format!("Failed to build view submenu: {error}"))?;
    let account_menu = Submenu::with_items(app_handle, "Account", true, &[&clear_session_item])
        .map_err(|error| format!("Failed to build account submenu: {error}"))?;

    Menu::with_items(app_handle, &[&app_menu, &view_menu, &account_menu])
        .map_err(|error| format!("Failed to build app menu: {error}"))
}

/// Rebuilds the menu so the dark mode item reflects the current state.
/// macOS hosts it on the application; elsewhere it belongs to the main
/// window only, keeping the splash and exit windows bare.
pub fn refresh_app_menu(app_handle: &AppHandle, dark_mode_enabled: bool) -> Result<(), String> {
    let menu = build_app_menu(app_handle, dark_mode_enabled)?;

    #[cfg(target_os = "macos")]
    app_handle
        .set_menu(menu)
        .map_err(|error| format!("Failed to install app menu: {error}"))?;

    #[cfg(not(target_os = "macos"))]
    {
        let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
            return Err("main window is not available".to_string());
        };
        window
            .set_menu(menu)
            .map_err(|error| format!("Failed to install window menu: {error}"))?;
    }

    Ok(())
}

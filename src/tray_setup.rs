use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, TrayIconBuilder, TrayIconEvent},
    AppHandle,
};

use crate::{menu_actions, menu_handler, window_actions, APP_DISPLAY_NAME, TRAY_ID};

pub fn setup_tray(app_handle: &AppHandle) -> Result<(), String> {
    let show_item = MenuItem::with_id(
        app_handle,
        menu_actions::TRAY_MENU_SHOW_WINDOW,
        format!("Show {APP_DISPLAY_NAME}"),
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray show menu item: {error}"))?;
    let hide_item = MenuItem::with_id(
        app_handle,
        menu_actions::TRAY_MENU_HIDE_WINDOW,
        format!("Hide {APP_DISPLAY_NAME}"),
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray hide menu item: {error}"))?;
    let quit_item = MenuItem::with_id(
        app_handle,
        menu_actions::TRAY_MENU_QUIT,
        "Quit",
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray quit menu item: {error}"))?;
    let separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create tray separator menu item: {error}"))?;

    let menu = Menu::with_items(app_handle, &[&show_item, &hide_item, &separator, &quit_item])
        .map_err(|error| format!("Failed to build tray menu: {error}"))?;

    let tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(APP_DISPLAY_NAME)
        .icon(tauri::include_image!("./icons/tray.png"))
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| menu_handler::handle_tray_menu_event(app, event.id().as_ref()))
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::DoubleClick {
                button: MouseButton::Left,
                ..
            } = event
            {
                window_actions::show_main_window(tray.app_handle());
            }
        });

    #[cfg(target_os = "macos")]
    let tray_builder = tray_builder.icon_as_template(true);

    tray_builder
        .build(app_handle)
        .map_err(|error| format!("Failed to create tray icon: {error}"))?;
    Ok(())
}

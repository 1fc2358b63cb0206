use tauri::AppHandle;

use crate::{
    append_desktop_log,
    menu_actions::{self, MenuAction},
    ui_dispatch,
    window_controller::{Shell, WindowController},
};

pub fn handle_tray_menu_event(app_handle: &AppHandle, menu_id: &str) {
    if let Some(action) = menu_actions::action_from_tray_menu_id(menu_id) {
        dispatch_action(app_handle, action);
    }
}

pub fn handle_app_menu_event(app_handle: &AppHandle, menu_id: &str) {
    if let Some(action) = menu_actions::action_from_app_menu_id(menu_id) {
        dispatch_action(app_handle, action);
    }
}

fn dispatch_action(app_handle: &AppHandle, action: MenuAction) {
    append_desktop_log(&format!("menu action: {action:?}"));
    ui_dispatch::with_controller(app_handle, "menu action", move |controller| {
        apply_menu_action(controller, action)
    });
}

pub(crate) fn apply_menu_action<S: Shell>(controller: &mut WindowController<S>, action: MenuAction) {
    match action {
        MenuAction::ShowWindow => controller.show_main(),
        MenuAction::HideWindow => controller.hide_main(),
        MenuAction::OpenSettings => controller.open_settings(),
        MenuAction::Reload => controller.reload_main(),
        MenuAction::ToggleDarkMode => controller.toggle_dark_mode(),
        MenuAction::ClearSession => controller.request_session_reset(),
        MenuAction::Quit => controller.request_quit(),
    }
}

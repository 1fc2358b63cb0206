use tauri::AppHandle;

use crate::{surface::SurfaceEvent, ui_dispatch};

pub fn show_main_window(app_handle: &AppHandle) {
    ui_dispatch::with_controller(app_handle, "show main window", |controller| {
        controller.show_main()
    });
}

pub fn hide_main_window(app_handle: &AppHandle) {
    ui_dispatch::with_controller(app_handle, "hide main window", |controller| {
        controller.hide_main()
    });
}

pub fn focus_existing_instance(app_handle: &AppHandle) {
    ui_dispatch::with_controller(app_handle, "focus existing instance", |controller| {
        controller.handle_second_instance()
    });
}

pub fn main_close_requested(app_handle: &AppHandle) {
    ui_dispatch::with_controller(app_handle, "main close request", |controller| {
        controller.on_main_close_requested()
    });
}

pub fn request_quit(app_handle: &AppHandle) {
    ui_dispatch::with_controller(app_handle, "quit", |controller| controller.request_quit());
}

pub fn forward_surface_event(app_handle: &AppHandle, label: &str, event: SurfaceEvent) {
    let label = label.to_string();
    ui_dispatch::with_controller(app_handle, "surface event", move |controller| {
        controller.handle_surface_event(&label, event)
    });
}

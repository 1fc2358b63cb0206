#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_config;
mod app_constants;
mod app_runtime;
mod app_types;
mod dark_mode;
mod dark_mode_payload;
mod logging;
mod menu_actions;
mod menu_handler;
mod menu_setup;
mod navigation_hook;
mod preferences;
mod runtime_paths;
mod scheduler;
mod settings_commands;
mod surface;
mod surface_specs;
mod tauri_shell;
mod tauri_surface;
#[cfg(test)]
mod test_support;
mod tray_setup;
mod ui_dispatch;
mod window_actions;
mod window_controller;

pub(crate) use app_constants::*;
pub(crate) use app_types::{ControllerState, ExitFlag};
pub(crate) use logging::{append_desktop_log, append_shutdown_log, append_startup_log};

fn main() {
    app_runtime::run();
}

use tauri::{Manager, RunEvent, WindowEvent};

use crate::{
    app_config, app_types, append_desktop_log, append_shutdown_log, append_startup_log, logging,
    menu_handler, preferences, runtime_paths, settings_commands,
    surface::SurfaceEvent,
    tauri_shell::TauriShell,
    tray_setup, ui_dispatch, window_actions,
    window_controller::WindowController,
    ControllerState, ExitFlag, MAIN_WINDOW_LABEL,
};

pub(crate) fn run() {
    let log_path = runtime_paths::desktop_log_path();
    logging::init(log_path.as_deref());
    append_startup_log("desktop process starting");
    if let Some(path) = &log_path {
        append_startup_log(&format!("desktop log path: {}", path.display()));
    }

    let preferences_path = runtime_paths::preferences_path();
    let preferences = preferences::load_or_default(preferences_path.as_deref());
    let target_url = app_config::resolve_target_url();

    tauri::Builder::default()
        // Must be registered first so a second launch exits before creating windows.
        .plugin(tauri_plugin_single_instance::init(|app_handle, _argv, _cwd| {
            append_startup_log("second instance launched, focusing existing window");
            window_actions::focus_existing_instance(app_handle);
        }))
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .manage(ControllerState::default())
        .manage(ExitFlag::default())
        .invoke_handler(tauri::generate_handler![
            settings_commands::settings_get_preferences,
            settings_commands::settings_update_custom_strings,
            settings_commands::settings_toggle_dark_mode,
            settings_commands::surface_in_page_navigated,
            settings_commands::session_reset_answer,
        ])
        .on_menu_event(|app_handle, event| {
            menu_handler::handle_app_menu_event(app_handle, event.id().as_ref())
        })
        .on_window_event(|window, event| match event {
            WindowEvent::CloseRequested { api, .. } if window.label() == MAIN_WINDOW_LABEL => {
                let app_handle = window.app_handle();
                if app_handle.state::<ExitFlag>().is_exiting() {
                    return;
                }
                api.prevent_close();
                window_actions::main_close_requested(app_handle);
            }
            WindowEvent::Destroyed => {
                window_actions::forward_surface_event(
                    window.app_handle(),
                    window.label(),
                    SurfaceEvent::Closed,
                );
            }
            _ => {}
        })
        .setup(move |app| {
            let app_handle = app.handle().clone();
            if let Err(error) = tray_setup::setup_tray(&app_handle) {
                append_startup_log(&format!("failed to initialize tray: {error}"));
            }

            let exit_flag = app_handle.state::<ExitFlag>().inner().clone();
            let shell = TauriShell::new(app_handle.clone(), preferences_path);
            let controller = WindowController::new(shell, preferences, target_url, exit_flag);
            let state = app_handle.state::<ControllerState>();
            if let Err(error) = app_types::start_in_slot(&state.controller, controller) {
                append_startup_log(&format!("failed to start: {error}"));
                app_handle.exit(1);
            }
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, api, .. } => {
                // Closing the last window is not a quit; only the exit sequence ends the app.
                if code.is_none() && !app_handle.state::<ExitFlag>().is_exiting() {
                    append_desktop_log("exit requested without quit, keeping app alive");
                    api.prevent_exit();
                }
            }
            RunEvent::Exit => {
                ui_dispatch::lock_controller(app_handle, "shutdown", |controller| {
                    controller.shutdown()
                });
                append_shutdown_log("desktop process exiting");
            }
            _ => {}
        });
}

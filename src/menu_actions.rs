pub const TRAY_MENU_SHOW_WINDOW: &str = "tray_show_window";
pub const TRAY_MENU_HIDE_WINDOW: &str = "tray_hide_window";
pub const TRAY_MENU_QUIT: &str = "tray_quit";

pub const APP_MENU_OPEN_SETTINGS: &str = "app_open_settings";
pub const APP_MENU_HIDE_WINDOW: &str = "app_hide_window";
pub const APP_MENU_QUIT: &str = "app_quit";
pub const APP_MENU_RELOAD: &str = "app_reload";
pub const APP_MENU_TOGGLE_DARK_MODE: &str = "app_toggle_dark_mode";
pub const APP_MENU_CLEAR_SESSION: &str = "app_clear_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ShowWindow,
    HideWindow,
    OpenSettings,
    Reload,
    ToggleDarkMode,
    ClearSession,
    Quit,
}

/// Tray and app menu handlers both see every menu event, so each only
/// resolves the ids it owns.
pub fn action_from_tray_menu_id(menu_id: &str) -> Option<MenuAction> {
    match menu_id {
        TRAY_MENU_SHOW_WINDOW => Some(MenuAction::ShowWindow),
        TRAY_MENU_HIDE_WINDOW => Some(MenuAction::HideWindow),
        TRAY_MENU_QUIT => Some(MenuAction::Quit),
        _ => None,
    }
}

pub fn action_from_app_menu_id(menu_id: &str) -> Option<MenuAction> {
    match menu_id {
        APP_MENU_OPEN_SETTINGS => Some(MenuAction::OpenSettings),
        APP_MENU_HIDE_WINDOW => Some(MenuAction::HideWindow),
        APP_MENU_QUIT => Some(MenuAction::Quit),
        APP_MENU_RELOAD => Some(MenuAction::Reload),
        APP_MENU_TOGGLE_DARK_MODE => Some(MenuAction::ToggleDarkMode),
        APP_MENU_CLEAR_SESSION => Some(MenuAction::ClearSession),
        _ => None,
    }
}

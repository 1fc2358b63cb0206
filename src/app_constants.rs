use std::time::Duration;

pub(crate) const APP_DISPLAY_NAME: &str = "BINUS LMS";
pub(crate) const DEFAULT_TARGET_URL: &str = "https://lms.binus.ac.id/";
pub(crate) const TARGET_URL_ENV: &str = "LMS_DESKTOP_TARGET_URL";
pub(crate) const CONFIG_DIR_ENV: &str = "LMS_DESKTOP_CONFIG_DIR";
pub(crate) const CONFIG_DIR_NAME: &str = "binus-lms-desktop";
pub(crate) const PREFERENCES_FILE: &str = "preferences.json";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const MAIN_SESSION_DIR: &str = "main-session";

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const SPLASH_WINDOW_LABEL: &str = "splash";
pub(crate) const EXIT_WINDOW_LABEL: &str = "exit";
pub(crate) const SETTINGS_WINDOW_LABEL: &str = "settings";
pub(crate) const CONFIRM_RESET_WINDOW_LABEL: &str = "confirm-reset";
pub(crate) const TRAY_ID: &str = "lms-tray";

pub(crate) const SPLASH_DOCUMENT: &str = "splash.html";
pub(crate) const EXIT_DOCUMENT: &str = "exit.html";
pub(crate) const SETTINGS_DOCUMENT: &str = "settings.html";
pub(crate) const CONFIRM_RESET_DOCUMENT: &str = "confirm-reset.html";

pub(crate) const MAIN_WINDOW_SIZE: (f64, f64) = (1280.0, 800.0);
pub(crate) const SPLASH_WINDOW_SIZE: (f64, f64) = (500.0, 400.0);
pub(crate) const EXIT_WINDOW_SIZE: (f64, f64) = (500.0, 400.0);
pub(crate) const SETTINGS_WINDOW_SIZE: (f64, f64) = (520.0, 460.0);
pub(crate) const CONFIRM_RESET_WINDOW_SIZE: (f64, f64) = (440.0, 200.0);

pub(crate) const LIGHT_BACKGROUND: &str = "#ffffff";
pub(crate) const DARK_BACKGROUND: &str = "#1e1e1e";

pub(crate) const SPLASH_MIN_DWELL: Duration = Duration::from_millis(2000);
pub(crate) const FADE_TICK: Duration = Duration::from_millis(16);
pub(crate) const FADE_STEP: f64 = 0.05;
pub(crate) const EXIT_DWELL: Duration = Duration::from_millis(2500);
pub(crate) const DARK_MODE_MONITOR_INTERVAL: Duration = Duration::from_secs(3);

pub(crate) const DARK_READER_RESOURCE: &str = "resources/darkreader.min.js";
pub(crate) const DARK_READER_CACHE_FILE: &str = "darkreader.min.js";
pub(crate) const DARK_READER_CDN_URL: &str =
    "https://cdn.jsdelivr.net/npm/darkreader@4.9.96/darkreader.min.js";
pub(crate) const DARK_READER_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

pub(crate) const DARK_MODE_EXCLUDED_SELECTORS: &[&str] = &[
    "img[src*=\"logo\"]",
    ".logo",
    ".navbar-brand img",
    "i[class*=\"icon\"]",
    "svg.icon",
    "input[type=\"date\"]",
    "input[type=\"datetime-local\"]",
    ".datepicker",
];

pub(crate) const SURFACE_IN_PAGE_NAVIGATED_COMMAND: &str = "surface_in_page_navigated";

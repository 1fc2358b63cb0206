//! Window lifecycle and dark-mode coordination.
//!
//! The controller owns every surface it creates together with the timers that
//! animate them. It never talks to Tauri directly: windows go through
//! [`HostSurface`], everything else (timers, dialogs, persistence, tray,
//! process exit) through [`Shell`]. All entry points are expected to run on
//! the GUI thread, one at a time.

use std::collections::BTreeMap;

use crate::{
    app_types::ExitFlag,
    dark_mode::{self, DarkModeOptions},
    dark_mode_payload::{PayloadError, PayloadState},
    preferences::{CustomStringsUpdate, Preferences, PreferencesError},
    scheduler::{ScheduledTask, TimerKind, Timing},
    surface::{
        is_internal_chrome_url, HostSurface, SurfaceError, SurfaceEvent, SurfaceOptions,
        SurfaceRole,
    },
    surface_specs, APP_DISPLAY_NAME, CONFIRM_RESET_WINDOW_LABEL, DARK_MODE_MONITOR_INTERVAL,
    EXIT_DWELL, EXIT_WINDOW_LABEL,
    FADE_STEP, FADE_TICK, MAIN_WINDOW_LABEL, SETTINGS_WINDOW_LABEL, SPLASH_MIN_DWELL,
    SPLASH_WINDOW_LABEL,
};

const FULL_OPACITY_TOLERANCE: f64 = 1e-6;

/// Platform services the controller depends on besides the windows.
pub trait Shell {
    type Surface: HostSurface;

    fn create_surface(&self, options: SurfaceOptions) -> Result<Self::Surface, SurfaceError>;
    fn schedule(&self, kind: TimerKind, timing: Timing) -> ScheduledTask;
    fn save_preferences(&self, preferences: &Preferences) -> Result<(), PreferencesError>;
    /// Starts resolving the dark-mode script; the outcome comes back through
    /// [`WindowController::on_dark_mode_payload`].
    fn request_dark_mode_payload(&self);
    fn refresh_menus(&self, dark_mode_enabled: bool);
    fn show_error(&self, title: &str, message: &str);
    fn notify(&self, title: &str, body: &str);
    fn has_tray(&self) -> bool;
    fn remove_tray(&self);
    fn terminate(&self, code: i32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    SplashVisible,
    MainFadingIn,
    MainActive,
    HiddenInTray,
    ExitAnimating,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    AllowClose,
    HideToTray,
    Quit,
}

pub fn decide_close(exit_in_progress: bool, tray_available: bool) -> CloseDecision {
    if exit_in_progress {
        CloseDecision::AllowClose
    } else if tray_available {
        CloseDecision::HideToTray
    } else {
        CloseDecision::Quit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApplyTrigger {
    Toggle,
    Reveal,
    ContentReady,
    PayloadResolved,
    Navigation,
    InPageNavigation,
    Monitor,
}

impl ApplyTrigger {
    /// Triggers after which the page may have dropped the transform without
    /// the controller noticing.
    fn may_have_lost_transform(self) -> bool {
        matches!(
            self,
            ApplyTrigger::Navigation | ApplyTrigger::InPageNavigation | ApplyTrigger::Monitor
        )
    }
}

struct WindowState<S> {
    role: SurfaceRole,
    surface: S,
    is_dark_mode_applied: bool,
    last_known_url: String,
}

impl<S> WindowState<S> {
    fn is_content_bearing(&self) -> bool {
        !self.role.is_internal_chrome() && !is_internal_chrome_url(&self.last_known_url)
    }
}

#[derive(Default)]
struct Timers {
    splash_dwell: Option<ScheduledTask>,
    fade: Option<ScheduledTask>,
    monitor: Option<ScheduledTask>,
    exit_dwell: Option<ScheduledTask>,
}

pub struct WindowController<S: Shell> {
    shell: S,
    preferences: Preferences,
    target_url: String,
    dark_mode: DarkModeOptions,
    payload: PayloadState,
    payload_requested: bool,
    pending_enable: bool,
    phase: Phase,
    windows: BTreeMap<String, WindowState<S::Surface>>,
    timers: Timers,
    content_ready: bool,
    splash_dwell_elapsed: bool,
    fade_opacity: f64,
    exit_flag: ExitFlag,
    hide_notice_shown: bool,
    session_reset_pending: bool,
}

impl<S: Shell> WindowController<S> {
    pub fn new(
        shell: S,
        preferences: Preferences,
        target_url: String,
        exit_flag: ExitFlag,
    ) -> Self {
        Self {
            shell,
            preferences,
            target_url,
            dark_mode: DarkModeOptions::default(),
            payload: PayloadState::Pending,
            payload_requested: false,
            pending_enable: false,
            phase: Phase::Starting,
            windows: BTreeMap::new(),
            timers: Timers::default(),
            content_ready: false,
            splash_dwell_elapsed: false,
            fade_opacity: 0.0,
            exit_flag,
            hide_notice_shown: false,
            session_reset_pending: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn payload_state(&self) -> &PayloadState {
        &self.payload
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn is_settings_open(&self) -> bool {
        self.windows.contains_key(SETTINGS_WINDOW_LABEL)
    }

    pub fn is_dark_mode_monitor_running(&self) -> bool {
        self.timers.monitor.is_some()
    }

    /// Creates the hidden main surface and the splash. Only a failure to
    /// create the main surface is reported; startup cannot continue without it.
    pub fn start(&mut self) -> Result<(), SurfaceError> {
        if self.phase != Phase::Starting {
            tracing::warn!("start ignored in phase {:?}", self.phase);
            return Ok(());
        }

        if self.preferences.dark_mode_enabled {
            self.ensure_payload_requested();
        }

        let main = self
            .shell
            .create_surface(surface_specs::main_options(&self.target_url, &self.preferences))?;
        self.insert_window(SurfaceRole::Main, main, self.target_url.clone());
        self.shell.refresh_menus(self.preferences.dark_mode_enabled);

        match self
            .shell
            .create_surface(surface_specs::splash_options(&self.preferences))
        {
            Ok(splash) => {
                self.insert_window(SurfaceRole::Splash, splash, String::new());
                self.timers.splash_dwell = Some(
                    self.shell
                        .schedule(TimerKind::SplashDwell, Timing::Once(SPLASH_MIN_DWELL)),
                );
            }
            Err(error) => {
                tracing::warn!("{error}; main window will be revealed without a splash");
                self.splash_dwell_elapsed = true;
            }
        }

        self.phase = Phase::SplashVisible;
        tracing::info!("startup choreography started for {}", self.target_url);
        Ok(())
    }

    pub fn handle_surface_event(&mut self, label: &str, event: SurfaceEvent) {
        if !self.windows.contains_key(label) {
            tracing::debug!("event {event:?} for untracked surface {label}");
            return;
        }

        match event {
            SurfaceEvent::Navigated(url) => {
                if let Some(state) = self.windows.get_mut(label) {
                    state.last_known_url = url;
                    state.is_dark_mode_applied = false;
                }
                self.apply_dark_mode_quietly(label, ApplyTrigger::Navigation);
            }
            SurfaceEvent::DomReady(url) => {
                if let Some(state) = self.windows.get_mut(label) {
                    state.last_known_url = url;
                }
                if label == MAIN_WINDOW_LABEL && !self.content_ready {
                    self.content_ready = true;
                    tracing::info!("main content ready");
                    self.maybe_reveal_main();
                }
                self.apply_dark_mode_quietly(label, ApplyTrigger::ContentReady);
            }
            SurfaceEvent::InPageNavigated(url) => {
                if let Some(state) = self.windows.get_mut(label) {
                    state.last_known_url = url;
                }
                self.apply_dark_mode_quietly(label, ApplyTrigger::InPageNavigation);
            }
            SurfaceEvent::Closed => self.on_surface_closed(label),
        }
    }

    pub fn on_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::SplashDwell => {
                if self.timers.splash_dwell.take().is_none() {
                    return;
                }
                self.splash_dwell_elapsed = true;
                self.maybe_reveal_main();
            }
            TimerKind::FadeStep => {
                if self.timers.fade.is_some() {
                    self.fade_tick();
                }
            }
            TimerKind::DarkModeMonitor => {
                if self.timers.monitor.is_some() {
                    self.reassert_dark_mode();
                }
            }
            TimerKind::ExitDwell => {
                if self.timers.exit_dwell.take().is_some() {
                    self.finish_exit();
                }
            }
        }
    }

    pub fn show_main(&mut self) {
        match self.phase {
            Phase::Starting | Phase::ExitAnimating | Phase::Terminated => {
                tracing::debug!("show_main ignored in phase {:?}", self.phase);
            }
            Phase::SplashVisible => {
                self.timers.splash_dwell = None;
                self.close_window(SPLASH_WINDOW_LABEL);
                self.complete_reveal();
            }
            Phase::MainFadingIn => self.complete_reveal(),
            Phase::MainActive | Phase::HiddenInTray => {
                if let Some(state) = self.windows.get(MAIN_WINDOW_LABEL) {
                    log_surface_result(state.surface.unminimize());
                    log_surface_result(state.surface.show());
                    log_surface_result(state.surface.focus());
                }
                self.phase = Phase::MainActive;
            }
        }
    }

    pub fn hide_main(&mut self) {
        match self.phase {
            Phase::MainFadingIn | Phase::MainActive => {
                if self.timers.fade.take().is_some() {
                    self.fade_opacity = 1.0;
                    self.set_main_opacity(1.0);
                    self.sync_dark_mode_monitor();
                }
                if let Some(state) = self.windows.get(MAIN_WINDOW_LABEL) {
                    log_surface_result(state.surface.hide());
                }
                self.phase = Phase::HiddenInTray;
                if !self.hide_notice_shown {
                    self.hide_notice_shown = true;
                    self.shell.notify(
                        &format!("{APP_DISPLAY_NAME} is still running"),
                        "The app keeps running in the system tray. Use the tray icon to open it again.",
                    );
                }
            }
            _ => tracing::debug!("hide_main ignored in phase {:?}", self.phase),
        }
    }

    /// A second process tried to start; bring the existing window forward.
    pub fn handle_second_instance(&mut self) {
        tracing::info!("second instance launch redirected to the running window");
        self.show_main();
    }

    pub fn on_main_close_requested(&mut self) {
        match decide_close(self.exit_flag.is_exiting(), self.shell.has_tray()) {
            CloseDecision::AllowClose => {}
            CloseDecision::HideToTray => self.hide_main(),
            CloseDecision::Quit => self.request_quit(),
        }
    }

    pub fn request_quit(&mut self) {
        if !self.exit_flag.try_begin() {
            tracing::debug!("quit ignored: exit sequence already running");
            return;
        }
        tracing::info!("exit sequence started");

        self.phase = Phase::ExitAnimating;
        self.timers.splash_dwell = None;
        self.timers.fade = None;
        self.timers.monitor = None;
        self.pending_enable = false;

        if let Some(state) = self.windows.get(MAIN_WINDOW_LABEL) {
            log_surface_result(state.surface.hide());
        }
        self.close_window(SPLASH_WINDOW_LABEL);
        self.close_window(SETTINGS_WINDOW_LABEL);
        self.close_window(CONFIRM_RESET_WINDOW_LABEL);
        self.session_reset_pending = false;

        match self
            .shell
            .create_surface(surface_specs::exit_options(&self.preferences))
        {
            Ok(exit) => self.insert_window(SurfaceRole::Exit, exit, String::new()),
            Err(error) => tracing::warn!("{error}; exiting without exit screen"),
        }

        self.timers.exit_dwell = Some(
            self.shell
                .schedule(TimerKind::ExitDwell, Timing::Once(EXIT_DWELL)),
        );
    }

    pub fn toggle_dark_mode(&mut self) {
        if self.exit_flag.is_exiting() {
            return;
        }

        if self.preferences.dark_mode_enabled {
            self.disable_dark_mode();
            return;
        }

        if self.pending_enable {
            tracing::info!("pending dark mode enable cancelled");
            self.pending_enable = false;
            return;
        }

        self.ensure_payload_requested();
        match &self.payload {
            PayloadState::Pending => {
                tracing::info!("dark mode will be enabled once the script is available");
                self.pending_enable = true;
            }
            PayloadState::Failed(reason) => {
                let message = format!("The dark mode script could not be loaded: {reason}");
                tracing::warn!("{message}");
                self.shell.show_error("Dark Mode", &message);
                self.payload_requested = false;
            }
            PayloadState::Ready(_) => self.confirm_enable(),
        }
    }

    pub fn on_dark_mode_payload(&mut self, result: Result<String, PayloadError>) {
        self.payload = PayloadState::from_result(result);
        match &self.payload {
            PayloadState::Ready(_) => {
                tracing::info!("dark mode script ready");
                if self.pending_enable {
                    self.pending_enable = false;
                    self.confirm_enable();
                } else if self.preferences.dark_mode_enabled {
                    self.apply_dark_mode_everywhere(ApplyTrigger::PayloadResolved);
                    self.sync_dark_mode_monitor();
                }
            }
            PayloadState::Failed(reason) => {
                tracing::warn!("dark mode script unavailable: {reason}");
                self.payload_requested = false;
                if self.pending_enable {
                    self.pending_enable = false;
                    self.shell.show_error(
                        "Dark Mode",
                        &format!("The dark mode script could not be loaded: {reason}"),
                    );
                }
            }
            PayloadState::Pending => {}
        }
    }

    pub fn open_settings(&mut self) {
        if self.phase != Phase::MainActive {
            tracing::debug!("settings ignored in phase {:?}", self.phase);
            return;
        }

        if let Some(state) = self.windows.get(SETTINGS_WINDOW_LABEL) {
            log_surface_result(state.surface.show());
            log_surface_result(state.surface.focus());
            return;
        }

        match self
            .shell
            .create_surface(surface_specs::settings_options(&self.preferences))
        {
            Ok(settings) => self.insert_window(SurfaceRole::Settings, settings, String::new()),
            Err(error) => {
                tracing::warn!("{error}");
                self.shell.show_error("Settings", &error.to_string());
            }
        }
    }

    pub fn update_custom_strings(&mut self, update: CustomStringsUpdate) {
        self.preferences.custom_strings.apply_update(update);
        self.persist_preferences();
    }

    pub fn reload_main(&mut self) {
        if let Some(state) = self.windows.get_mut(MAIN_WINDOW_LABEL) {
            state.is_dark_mode_applied = false;
            log_surface_result(state.surface.load_remote_url(&self.target_url));
        }
    }

    /// Opens the confirmation window. The answer comes back through
    /// [`WindowController::on_session_reset_answer`]; closing the window
    /// cancels.
    pub fn request_session_reset(&mut self) {
        if self.exit_flag.is_exiting() {
            return;
        }
        if self.session_reset_pending {
            if let Some(state) = self.windows.get(CONFIRM_RESET_WINDOW_LABEL) {
                log_surface_result(state.surface.focus());
            }
            return;
        }

        match self
            .shell
            .create_surface(surface_specs::confirm_reset_options(&self.preferences))
        {
            Ok(confirm) => {
                self.insert_window(SurfaceRole::ConfirmReset, confirm, String::new());
                self.session_reset_pending = true;
            }
            Err(error) => {
                tracing::warn!("{error}");
                self.shell.show_error("Clear Session Data", &error.to_string());
            }
        }
    }

    pub fn is_session_reset_pending(&self) -> bool {
        self.session_reset_pending
    }

    /// Only the first answer per request counts.
    pub fn on_session_reset_answer(&mut self, accepted: bool) {
        if !std::mem::take(&mut self.session_reset_pending) {
            return;
        }
        self.close_window(CONFIRM_RESET_WINDOW_LABEL);
        if !accepted {
            tracing::info!("session reset cancelled");
            return;
        }

        let Some(state) = self.windows.get_mut(MAIN_WINDOW_LABEL) else {
            self.shell
                .show_error("Clear Session Data", "The main window is not available.");
            return;
        };

        let result = state
            .surface
            .clear_browsing_data()
            .and_then(|()| state.surface.load_remote_url(&self.target_url));
        state.is_dark_mode_applied = false;
        match result {
            Ok(()) => tracing::info!("session data cleared"),
            Err(error) => {
                tracing::warn!("{error}");
                self.shell.show_error("Clear Session Data", &error.to_string());
            }
        }
    }

    /// Drops every timer. Called when the runtime is exiting for any reason.
    pub fn shutdown(&mut self) {
        self.timers = Timers::default();
        self.pending_enable = false;
        self.phase = Phase::Terminated;
    }

    fn insert_window(&mut self, role: SurfaceRole, surface: S::Surface, url: String) {
        let label = surface.label().to_string();
        self.windows.insert(
            label,
            WindowState {
                role,
                surface,
                is_dark_mode_applied: false,
                last_known_url: url,
            },
        );
    }

    fn close_window(&mut self, label: &str) {
        if let Some(state) = self.windows.remove(label) {
            log_surface_result(state.surface.close());
        }
    }

    fn on_surface_closed(&mut self, label: &str) {
        if self.windows.remove(label).is_none() {
            return;
        }
        tracing::debug!("surface {label} closed");

        match label {
            SPLASH_WINDOW_LABEL if self.phase == Phase::SplashVisible => {
                self.timers.splash_dwell = None;
                self.splash_dwell_elapsed = true;
                self.maybe_reveal_main();
            }
            MAIN_WINDOW_LABEL if !self.exit_flag.is_exiting() => {
                tracing::warn!("main window closed outside the exit sequence");
                self.request_quit();
            }
            CONFIRM_RESET_WINDOW_LABEL => self.on_session_reset_answer(false),
            _ => {}
        }
        self.sync_dark_mode_monitor();
    }

    fn maybe_reveal_main(&mut self) {
        if self.phase == Phase::SplashVisible && self.content_ready && self.splash_dwell_elapsed {
            self.reveal_main();
        }
    }

    fn reveal_main(&mut self) {
        tracing::info!("revealing main window");
        self.phase = Phase::MainFadingIn;
        self.timers.splash_dwell = None;
        self.close_window(SPLASH_WINDOW_LABEL);

        self.fade_opacity = 0.0;
        self.set_main_opacity(0.0);
        if let Some(state) = self.windows.get(MAIN_WINDOW_LABEL) {
            log_surface_result(state.surface.center());
            log_surface_result(state.surface.show());
            log_surface_result(state.surface.focus());
        }
        self.apply_dark_mode_quietly(MAIN_WINDOW_LABEL, ApplyTrigger::Reveal);

        self.timers.fade = Some(
            self.shell
                .schedule(TimerKind::FadeStep, Timing::Every(FADE_TICK)),
        );
    }

    fn fade_tick(&mut self) {
        let next = self.fade_opacity + FADE_STEP;
        if next >= 1.0 - FULL_OPACITY_TOLERANCE {
            self.complete_reveal();
        } else {
            self.fade_opacity = next;
            self.set_main_opacity(next);
        }
    }

    fn complete_reveal(&mut self) {
        self.timers.fade = None;
        self.fade_opacity = 1.0;
        self.set_main_opacity(1.0);
        if let Some(state) = self.windows.get(MAIN_WINDOW_LABEL) {
            log_surface_result(state.surface.show());
        }
        self.phase = Phase::MainActive;
        self.apply_dark_mode_quietly(MAIN_WINDOW_LABEL, ApplyTrigger::Reveal);
        self.sync_dark_mode_monitor();
    }

    fn set_main_opacity(&self, opacity: f64) {
        if let Some(state) = self.windows.get(MAIN_WINDOW_LABEL) {
            log_surface_result(state.surface.set_opacity(opacity));
        }
    }

    fn finish_exit(&mut self) {
        tracing::info!("exit dwell elapsed, terminating");
        self.close_window(EXIT_WINDOW_LABEL);
        if let Some(state) = self.windows.remove(MAIN_WINDOW_LABEL) {
            log_surface_result(state.surface.destroy());
        }
        for (_, state) in std::mem::take(&mut self.windows) {
            log_surface_result(state.surface.close());
        }
        self.shell.remove_tray();
        self.timers = Timers::default();
        self.phase = Phase::Terminated;
        self.shell.terminate(0);
    }

    fn ensure_payload_requested(&mut self) {
        if self.payload_requested || matches!(self.payload, PayloadState::Ready(_)) {
            return;
        }
        self.payload_requested = true;
        self.payload = PayloadState::Pending;
        self.shell.request_dark_mode_payload();
    }

    /// Enables the transform on every content surface and commits the flag
    /// only when the main surface accepted the script.
    fn confirm_enable(&mut self) {
        match self.apply_dark_mode_everywhere(ApplyTrigger::Toggle) {
            Ok(()) => self.commit_dark_mode(true),
            Err(error) => {
                tracing::warn!("{error}");
                self.shell.show_error(
                    "Dark Mode",
                    &format!("Dark mode could not be applied: {error}"),
                );
            }
        }
    }

    fn disable_dark_mode(&mut self) {
        self.pending_enable = false;
        let labels = self.content_labels();
        for label in labels {
            let Some(state) = self.windows.get_mut(&label) else {
                continue;
            };
            match state.surface.execute_script(dark_mode::disable_script()) {
                Ok(()) => state.is_dark_mode_applied = false,
                Err(error) => tracing::warn!("{error}"),
            }
        }
        self.commit_dark_mode(false);
    }

    fn commit_dark_mode(&mut self, enabled: bool) {
        self.preferences.dark_mode_enabled = enabled;
        tracing::info!(
            "dark mode {}",
            if enabled { "enabled" } else { "disabled" }
        );
        self.persist_preferences();
        self.shell.refresh_menus(enabled);
        self.sync_dark_mode_monitor();

        if let Some(state) = self.windows.get(SETTINGS_WINDOW_LABEL) {
            let document = surface_specs::settings_document(&self.preferences);
            log_surface_result(state.surface.load_local_document(&document));
        }
    }

    fn persist_preferences(&self) {
        if let Err(error) = self.shell.save_preferences(&self.preferences) {
            tracing::warn!("{error}; keeping in-memory preferences");
        }
    }

    fn content_labels(&self) -> Vec<String> {
        self.windows
            .iter()
            .filter(|(_, state)| state.is_content_bearing())
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// Returns the main surface's failure, if any; other surfaces only log.
    fn apply_dark_mode_everywhere(&mut self, trigger: ApplyTrigger) -> Result<(), SurfaceError> {
        let mut main_result = Ok(());
        for label in self.content_labels() {
            let result = self.apply_dark_mode(&label, trigger);
            if label == MAIN_WINDOW_LABEL {
                main_result = result;
            } else if let Err(error) = result {
                tracing::warn!("{error}");
            }
        }
        main_result
    }

    fn apply_dark_mode_quietly(&mut self, label: &str, trigger: ApplyTrigger) {
        if !self.preferences.dark_mode_enabled {
            return;
        }
        if let Err(error) = self.apply_dark_mode(label, trigger) {
            tracing::debug!("dark mode {trigger:?} on {label} failed: {error}");
        }
    }

    fn apply_dark_mode(&mut self, label: &str, trigger: ApplyTrigger) -> Result<(), SurfaceError> {
        let Some(state) = self.windows.get_mut(label) else {
            return Ok(());
        };
        if !state.is_content_bearing() {
            return Ok(());
        }
        let PayloadState::Ready(payload) = &self.payload else {
            return Ok(());
        };
        if state.is_dark_mode_applied && !trigger.may_have_lost_transform() {
            return Ok(());
        }

        // Client-side navigation keeps the page context, so the payload is
        // still there. Monitor ticks cannot know that and send the full
        // guarded script.
        let script = match trigger {
            ApplyTrigger::InPageNavigation if state.is_dark_mode_applied => {
                dark_mode::ensure_script(&self.dark_mode)
            }
            _ => dark_mode::enable_script(payload, &self.dark_mode),
        };
        state.surface.execute_script(&script)?;
        // At navigation start the script runs in the outgoing document; the
        // incoming one still needs it on content ready.
        state.is_dark_mode_applied = trigger != ApplyTrigger::Navigation;
        Ok(())
    }

    fn reassert_dark_mode(&mut self) {
        for label in self.content_labels() {
            if let Err(error) = self.apply_dark_mode(&label, ApplyTrigger::Monitor) {
                tracing::debug!("dark mode re-assertion on {label} failed: {error}");
            }
        }
    }

    /// Keeps at most one monitor alive, and only while it has work to do.
    fn sync_dark_mode_monitor(&mut self) {
        let should_run = self.preferences.dark_mode_enabled
            && matches!(self.payload, PayloadState::Ready(_))
            && !self.exit_flag.is_exiting()
            && self.windows.values().any(WindowState::is_content_bearing);

        if !should_run {
            if self.timers.monitor.take().is_some() {
                tracing::debug!("dark mode monitor stopped");
            }
            return;
        }
        if self.timers.monitor.is_none() {
            self.timers.monitor = Some(self.shell.schedule(
                TimerKind::DarkModeMonitor,
                Timing::Every(DARK_MODE_MONITOR_INTERVAL),
            ));
            tracing::debug!("dark mode monitor started");
        }
    }
}

fn log_surface_result(result: Result<(), SurfaceError>) {
    if let Err(error) = result {
        tracing::warn!("{error}");
    }
}

//! In-memory `Shell` and `HostSurface` used by controller tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

use crate::{
    preferences::{Preferences, PreferencesError},
    scheduler::{ScheduledTask, TimerKind, Timing},
    surface::{HostSurface, LocalDocument, SurfaceError, SurfaceOptions, SurfaceRole},
    window_controller::Shell,
};

#[derive(Debug, Clone, Default)]
pub struct SurfaceRecord {
    pub role: Option<SurfaceRole>,
    pub visible: bool,
    pub closed: bool,
    pub destroyed: bool,
    pub close_calls: usize,
    pub focus_calls: usize,
    pub unminimize_calls: usize,
    pub clear_calls: usize,
    pub opacity_history: Vec<f64>,
    pub scripts: Vec<String>,
    pub loaded_urls: Vec<String>,
    pub local_documents: Vec<LocalDocument>,
    pub fail_scripts: bool,
    pub fail_clear: Option<String>,
}

struct TimerRecord {
    kind: TimerKind,
    timing: Timing,
    live: Arc<AtomicBool>,
}

struct ShellRecord {
    created: Vec<SurfaceOptions>,
    fail_create: HashSet<SurfaceRole>,
    surfaces: HashMap<String, Arc<Mutex<SurfaceRecord>>>,
    timers: Vec<TimerRecord>,
    max_live: HashMap<TimerKind, usize>,
    saved: Vec<Preferences>,
    fail_saves: bool,
    payload_requests: usize,
    menu_refreshes: Vec<bool>,
    errors: Vec<(String, String)>,
    notifications: Vec<(String, String)>,
    has_tray: bool,
    tray_removed: bool,
    terminated: Option<i32>,
}

impl Default for ShellRecord {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            fail_create: HashSet::new(),
            surfaces: HashMap::new(),
            timers: Vec::new(),
            max_live: HashMap::new(),
            saved: Vec::new(),
            fail_saves: false,
            payload_requests: 0,
            menu_refreshes: Vec::new(),
            errors: Vec::new(),
            notifications: Vec::new(),
            has_tray: true,
            tray_removed: false,
            terminated: None,
        }
    }
}

impl ShellRecord {
    fn live_count(&self, kind: TimerKind) -> usize {
        self.timers
            .iter()
            .filter(|timer| timer.kind == kind && timer.live.load(Ordering::SeqCst))
            .count()
    }
}

#[derive(Clone, Default)]
pub struct FakeShell {
    record: Arc<Mutex<ShellRecord>>,
}

impl FakeShell {
    fn lock(&self) -> MutexGuard<'_, ShellRecord> {
        self.record.lock().expect("fake shell lock")
    }

    fn surface_record(&self, label: &str) -> Arc<Mutex<SurfaceRecord>> {
        Arc::clone(
            self.lock()
                .surfaces
                .get(label)
                .unwrap_or_else(|| panic!("surface {label} was never created")),
        )
    }

    pub fn surface(&self, label: &str) -> SurfaceRecord {
        self.surface_record(label)
            .lock()
            .expect("surface lock")
            .clone()
    }

    pub fn fail_create(&self, role: SurfaceRole) {
        self.lock().fail_create.insert(role);
    }

    pub fn fail_scripts(&self, label: &str, fail: bool) {
        self.surface_record(label)
            .lock()
            .expect("surface lock")
            .fail_scripts = fail;
    }

    pub fn fail_clear(&self, label: &str, message: &str) {
        self.surface_record(label)
            .lock()
            .expect("surface lock")
            .fail_clear = Some(message.to_string());
    }

    pub fn fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    pub fn set_tray_available(&self, available: bool) {
        self.lock().has_tray = available;
    }

    pub fn created_count(&self, role: SurfaceRole) -> usize {
        self.lock()
            .created
            .iter()
            .filter(|options| options.role == role)
            .count()
    }

    pub fn live_timers(&self, kind: TimerKind) -> usize {
        self.lock().live_count(kind)
    }

    pub fn scheduled_count(&self, kind: TimerKind) -> usize {
        self.lock()
            .timers
            .iter()
            .filter(|timer| timer.kind == kind)
            .count()
    }

    pub fn scheduled_timing(&self, kind: TimerKind) -> Option<Timing> {
        self.lock()
            .timers
            .iter()
            .rev()
            .find(|timer| timer.kind == kind)
            .map(|timer| timer.timing)
    }

    pub fn max_concurrent_live(&self, kind: TimerKind) -> usize {
        self.lock().max_live.get(&kind).copied().unwrap_or(0)
    }

    pub fn last_saved(&self) -> Option<Preferences> {
        self.lock().saved.last().cloned()
    }

    pub fn payload_requests(&self) -> usize {
        self.lock().payload_requests
    }

    pub fn menu_refreshes(&self) -> Vec<bool> {
        self.lock().menu_refreshes.clone()
    }

    pub fn error_count(&self) -> usize {
        self.lock().errors.len()
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().errors.last().map(|(_, message)| message.clone())
    }

    pub fn notification_count(&self) -> usize {
        self.lock().notifications.len()
    }

    pub fn tray_removed(&self) -> bool {
        self.lock().tray_removed
    }

    pub fn terminated(&self) -> Option<i32> {
        self.lock().terminated
    }
}

impl Shell for FakeShell {
    type Surface = FakeSurface;

    fn create_surface(&self, options: SurfaceOptions) -> Result<FakeSurface, SurfaceError> {
        let mut shell = self.lock();
        if shell.fail_create.contains(&options.role) {
            return Err(SurfaceError::Create {
                label: options.label.clone(),
                message: "simulated failure".to_string(),
            });
        }

        let record = Arc::new(Mutex::new(SurfaceRecord {
            role: Some(options.role),
            visible: options.visible,
            ..SurfaceRecord::default()
        }));
        shell
            .surfaces
            .insert(options.label.clone(), Arc::clone(&record));
        let surface = FakeSurface {
            label: options.label.clone(),
            record,
        };
        shell.created.push(options);
        Ok(surface)
    }

    fn schedule(&self, kind: TimerKind, timing: Timing) -> ScheduledTask {
        let live = Arc::new(AtomicBool::new(true));
        let mut shell = self.lock();
        shell.timers.push(TimerRecord {
            kind,
            timing,
            live: Arc::clone(&live),
        });
        let count = shell.live_count(kind);
        let max = shell.max_live.entry(kind).or_insert(0);
        *max = (*max).max(count);

        ScheduledTask::new(kind, move || live.store(false, Ordering::SeqCst))
    }

    fn save_preferences(&self, preferences: &Preferences) -> Result<(), PreferencesError> {
        let mut shell = self.lock();
        if shell.fail_saves {
            return Err(PreferencesError::NoConfigDir);
        }
        shell.saved.push(preferences.clone());
        Ok(())
    }

    fn request_dark_mode_payload(&self) {
        self.lock().payload_requests += 1;
    }

    fn refresh_menus(&self, dark_mode_enabled: bool) {
        self.lock().menu_refreshes.push(dark_mode_enabled);
    }

    fn show_error(&self, title: &str, message: &str) {
        self.lock()
            .errors
            .push((title.to_string(), message.to_string()));
    }

    fn notify(&self, title: &str, body: &str) {
        self.lock()
            .notifications
            .push((title.to_string(), body.to_string()));
    }

    fn has_tray(&self) -> bool {
        self.lock().has_tray
    }

    fn remove_tray(&self) {
        self.lock().tray_removed = true;
    }

    fn terminate(&self, code: i32) {
        self.lock().terminated = Some(code);
    }
}

pub struct FakeSurface {
    label: String,
    record: Arc<Mutex<SurfaceRecord>>,
}

impl FakeSurface {
    fn lock(&self) -> MutexGuard<'_, SurfaceRecord> {
        self.record.lock().expect("surface lock")
    }

    fn fail(&self, operation: &'static str, message: &str) -> SurfaceError {
        SurfaceError::Operation {
            label: self.label.clone(),
            operation,
            message: message.to_string(),
        }
    }
}

impl HostSurface for FakeSurface {
    fn label(&self) -> &str {
        &self.label
    }

    fn show(&self) -> Result<(), SurfaceError> {
        self.lock().visible = true;
        Ok(())
    }

    fn hide(&self) -> Result<(), SurfaceError> {
        self.lock().visible = false;
        Ok(())
    }

    fn close(&self) -> Result<(), SurfaceError> {
        let mut record = self.lock();
        record.close_calls += 1;
        record.closed = true;
        record.visible = false;
        Ok(())
    }

    fn destroy(&self) -> Result<(), SurfaceError> {
        let mut record = self.lock();
        record.destroyed = true;
        record.visible = false;
        Ok(())
    }

    fn focus(&self) -> Result<(), SurfaceError> {
        self.lock().focus_calls += 1;
        Ok(())
    }

    fn unminimize(&self) -> Result<(), SurfaceError> {
        self.lock().unminimize_calls += 1;
        Ok(())
    }

    fn center(&self) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn set_opacity(&self, opacity: f64) -> Result<(), SurfaceError> {
        self.lock().opacity_history.push(opacity);
        Ok(())
    }

    fn load_remote_url(&self, url: &str) -> Result<(), SurfaceError> {
        self.lock().loaded_urls.push(url.to_string());
        Ok(())
    }

    fn load_local_document(&self, document: &LocalDocument) -> Result<(), SurfaceError> {
        self.lock().local_documents.push(document.clone());
        Ok(())
    }

    fn execute_script(&self, source: &str) -> Result<(), SurfaceError> {
        let mut record = self.lock();
        if record.fail_scripts {
            return Err(SurfaceError::Script {
                label: self.label.clone(),
                message: "simulated script failure".to_string(),
            });
        }
        record.scripts.push(source.to_string());
        Ok(())
    }

    fn clear_browsing_data(&self) -> Result<(), SurfaceError> {
        let mut record = self.lock();
        if let Some(message) = record.fail_clear.clone() {
            return Err(self.fail("clear browsing data", &message));
        }
        record.clear_calls += 1;
        Ok(())
    }
}

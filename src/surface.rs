//! The window capability the controller is written against.
//!
//! A surface is a native window hosting web content. The Tauri implementation
//! lives in `tauri_surface`; tests use an in-memory fake.

use url::{form_urlencoded, Url};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceRole {
    Splash,
    Main,
    Settings,
    ConfirmReset,
    Exit,
}

impl SurfaceRole {
    /// Everything but main only ever shows bundled pages.
    pub fn is_internal_chrome(self) -> bool {
        !matches!(self, SurfaceRole::Main)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIsolation {
    /// Cookies and storage persist in the shell's own data directory.
    PersistentSession,
    /// Default engine profile; used for bundled pages.
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDocument {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl LocalDocument {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Relative app URL, e.g. `splash.html?title=BINUS+LMS`.
    pub fn to_relative_url(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceContent {
    Remote(String),
    Local(LocalDocument),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    pub role: SurfaceRole,
    pub label: String,
    pub title: String,
    pub size: (f64, f64),
    pub frameless: bool,
    pub always_on_top: bool,
    pub resizable: bool,
    pub visible: bool,
    pub centered: bool,
    pub background_color: String,
    pub isolation: ContentIsolation,
    pub content: SurfaceContent,
}

/// Events a surface reports back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// A full navigation started; injected page state is gone.
    Navigated(String),
    /// The document finished loading.
    DomReady(String),
    /// Client-side history change without a document reload.
    InPageNavigated(String),
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("failed to create {label} window: {message}")]
    Create { label: String, message: String },

    #[error("{operation} failed on {label}: {message}")]
    Operation {
        label: String,
        operation: &'static str,
        message: String,
    },

    #[error("script execution failed on {label}: {message}")]
    Script { label: String, message: String },
}

pub trait HostSurface {
    fn label(&self) -> &str;
    fn show(&self) -> Result<(), SurfaceError>;
    fn hide(&self) -> Result<(), SurfaceError>;
    fn close(&self) -> Result<(), SurfaceError>;
    fn destroy(&self) -> Result<(), SurfaceError>;
    fn focus(&self) -> Result<(), SurfaceError>;
    fn unminimize(&self) -> Result<(), SurfaceError>;
    fn center(&self) -> Result<(), SurfaceError>;
    fn set_opacity(&self, opacity: f64) -> Result<(), SurfaceError>;
    fn load_remote_url(&self, url: &str) -> Result<(), SurfaceError>;
    fn load_local_document(&self, document: &LocalDocument) -> Result<(), SurfaceError>;
    fn execute_script(&self, source: &str) -> Result<(), SurfaceError>;
    fn clear_browsing_data(&self) -> Result<(), SurfaceError>;
}

/// Bundled pages are served from the app's own origin and never receive the
/// dark-mode transform.
pub fn is_internal_chrome_url(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return true;
    };
    match url.scheme() {
        "tauri" | "asset" | "about" | "data" | "file" => true,
        "http" | "https" => matches!(url.host_str(), Some("tauri.localhost")),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_document_encodes_params() {
        let document = LocalDocument::new("splash.html")
            .param("title", "BINUS LMS")
            .param("theme", "dark");

        assert_eq!(
            document.to_relative_url(),
            "splash.html?title=BINUS+LMS&theme=dark"
        );
    }

    #[test]
    fn local_document_without_params_is_plain_path() {
        assert_eq!(LocalDocument::new("exit.html").to_relative_url(), "exit.html");
    }

    #[test]
    fn internal_chrome_url_detection() {
        assert!(is_internal_chrome_url("tauri://localhost/splash.html"));
        assert!(is_internal_chrome_url("http://tauri.localhost/settings.html"));
        assert!(is_internal_chrome_url("about:blank"));
        assert!(is_internal_chrome_url(""));
        assert!(!is_internal_chrome_url("https://lms.binus.ac.id/"));
    }

    #[test]
    fn only_main_role_carries_remote_content() {
        assert!(!SurfaceRole::Main.is_internal_chrome());
        assert!(SurfaceRole::Splash.is_internal_chrome());
        assert!(SurfaceRole::Settings.is_internal_chrome());
        assert!(SurfaceRole::ConfirmReset.is_internal_chrome());
        assert!(SurfaceRole::Exit.is_internal_chrome());
    }
}

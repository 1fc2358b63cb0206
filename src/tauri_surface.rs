use std::path::PathBuf;

use tauri::{
    webview::PageLoadEvent, window::Color, AppHandle, Manager, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder,
};
use url::Url;

use crate::{
    navigation_hook, runtime_paths,
    surface::{
        ContentIsolation, HostSurface, LocalDocument, SurfaceContent, SurfaceError, SurfaceEvent,
        SurfaceOptions,
    },
    window_actions,
};

pub(crate) struct TauriSurface {
    window: WebviewWindow,
}

impl TauriSurface {
    fn operation_error(&self, operation: &'static str, error: impl std::fmt::Display) -> SurfaceError {
        SurfaceError::Operation {
            label: self.window.label().to_string(),
            operation,
            message: error.to_string(),
        }
    }
}

pub(crate) fn build_surface(
    app_handle: &AppHandle,
    options: SurfaceOptions,
) -> Result<TauriSurface, SurfaceError> {
    let create_error = |message: String| SurfaceError::Create {
        label: options.label.clone(),
        message,
    };

    let url = match &options.content {
        SurfaceContent::Remote(raw) => WebviewUrl::External(
            Url::parse(raw).map_err(|error| create_error(format!("invalid url {raw}: {error}")))?,
        ),
        SurfaceContent::Local(document) => {
            WebviewUrl::App(PathBuf::from(document.to_relative_url()))
        }
    };

    let (width, height) = options.size;
    let mut builder = WebviewWindowBuilder::new(app_handle, &options.label, url)
        .title(&options.title)
        .inner_size(width, height)
        .decorations(!options.frameless)
        .skip_taskbar(options.frameless)
        .always_on_top(options.always_on_top)
        .resizable(options.resizable)
        .visible(options.visible)
        .on_page_load(|window, payload| {
            let url = payload.url().to_string();
            let event = match payload.event() {
                PageLoadEvent::Started => SurfaceEvent::Navigated(url),
                PageLoadEvent::Finished => SurfaceEvent::DomReady(url),
            };
            window_actions::forward_surface_event(window.app_handle(), window.label(), event);
        });

    if options.centered {
        builder = builder.center();
    }
    if let Some(color) = parse_hex_color(&options.background_color) {
        builder = builder.background_color(color);
    }
    if options.isolation == ContentIsolation::PersistentSession {
        match runtime_paths::main_session_dir() {
            Some(session_dir) => builder = builder.data_directory(session_dir),
            None => tracing::warn!(
                "no config directory; {} will use the default engine profile",
                options.label
            ),
        }
        builder = builder.initialization_script(navigation_hook::NAVIGATION_HOOK_SCRIPT);
    }

    let window = builder
        .build()
        .map_err(|error| create_error(error.to_string()))?;
    Ok(TauriSurface { window })
}

/// `#rrggbb` to an opaque `Color`.
pub(crate) fn parse_hex_color(raw: &str) -> Option<Color> {
    let hex = raw.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |start: usize| u8::from_str_radix(&hex[start..start + 2], 16).ok();
    Some(Color(channel(0)?, channel(2)?, channel(4)?, 255))
}

/// Tauri has no per-window alpha, so the fade drives the document's opacity.
fn opacity_script(opacity: f64) -> String {
    let opacity = opacity.clamp(0.0, 1.0);
    let value = if opacity >= 1.0 {
        String::new()
    } else {
        format!("{opacity:.2}")
    };
    format!(
        "(function(){{var root=document.documentElement;if(root){{root.style.opacity='{value}';}}}})();"
    )
}

impl HostSurface for TauriSurface {
    fn label(&self) -> &str {
        self.window.label()
    }

    fn show(&self) -> Result<(), SurfaceError> {
        self.window
            .show()
            .map_err(|error| self.operation_error("show", error))
    }

    fn hide(&self) -> Result<(), SurfaceError> {
        self.window
            .hide()
            .map_err(|error| self.operation_error("hide", error))
    }

    fn close(&self) -> Result<(), SurfaceError> {
        self.window
            .close()
            .map_err(|error| self.operation_error("close", error))
    }

    fn destroy(&self) -> Result<(), SurfaceError> {
        self.window
            .destroy()
            .map_err(|error| self.operation_error("destroy", error))
    }

    fn focus(&self) -> Result<(), SurfaceError> {
        self.window
            .set_focus()
            .map_err(|error| self.operation_error("focus", error))
    }

    fn unminimize(&self) -> Result<(), SurfaceError> {
        self.window
            .unminimize()
            .map_err(|error| self.operation_error("unminimize", error))
    }

    fn center(&self) -> Result<(), SurfaceError> {
        self.window
            .center()
            .map_err(|error| self.operation_error("center", error))
    }

    fn set_opacity(&self, opacity: f64) -> Result<(), SurfaceError> {
        self.execute_script(&opacity_script(opacity))
    }

    fn load_remote_url(&self, url: &str) -> Result<(), SurfaceError> {
        let parsed = Url::parse(url).map_err(|error| self.operation_error("navigate", error))?;
        self.window
            .navigate(parsed)
            .map_err(|error| self.operation_error("navigate", error))
    }

    fn load_local_document(&self, document: &LocalDocument) -> Result<(), SurfaceError> {
        let current = self
            .window
            .url()
            .map_err(|error| self.operation_error("navigate", error))?;
        let target = current
            .join(&document.to_relative_url())
            .map_err(|error| self.operation_error("navigate", error))?;
        self.window
            .navigate(target)
            .map_err(|error| self.operation_error("navigate", error))
    }

    fn execute_script(&self, source: &str) -> Result<(), SurfaceError> {
        self.window.eval(source).map_err(|error| SurfaceError::Script {
            label: self.window.label().to_string(),
            message: error.to_string(),
        })
    }

    fn clear_browsing_data(&self) -> Result<(), SurfaceError> {
        self.window
            .clear_all_browsing_data()
            .map_err(|error| self.operation_error("clear browsing data", error))
    }
}

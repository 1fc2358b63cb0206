//! Scripts that drive the Dark Reader transform inside arbitrary pages.
//!
//! Every script is guarded in-page: enabling an already enabled transform and
//! disabling an inactive one are no-ops, and exceptions never escape to the
//! host.

use serde_json::json;

use crate::DARK_MODE_EXCLUDED_SELECTORS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DarkModeOptions {
    pub brightness: u8,
    pub contrast: u8,
    pub sepia: u8,
    pub excluded_selectors: Vec<String>,
}

impl Default for DarkModeOptions {
    fn default() -> Self {
        Self {
            brightness: 100,
            contrast: 90,
            sepia: 10,
            excluded_selectors: DARK_MODE_EXCLUDED_SELECTORS
                .iter()
                .map(|selector| selector.to_string())
                .collect(),
        }
    }
}

impl DarkModeOptions {
    fn theme_json(&self) -> String {
        json!({
            "brightness": self.brightness,
            "contrast": self.contrast,
            "sepia": self.sepia,
        })
        .to_string()
    }

    fn fixes_json(&self) -> String {
        json!({
            "invert": [],
            "css": "",
            "ignoreInlineStyle": self.excluded_selectors,
            "ignoreImageAnalysis": self.excluded_selectors,
            "disableStyleSheetsProxy": false,
        })
        .to_string()
    }

    fn enable_call(&self) -> String {
        format!(
            "if (!reader.isEnabled()) {{ reader.setFetchMethod(window.fetch); reader.enable({}, {}); }}",
            self.theme_json(),
            self.fixes_json()
        )
    }
}

/// Full script: evaluates the payload when the page has no `DarkReader` yet,
/// then enables it unless already active. `define` is hidden while the
/// payload runs so AMD loaders on the page do not capture the UMD export.
pub fn enable_script(payload: &str, options: &DarkModeOptions) -> String {
    format!(
        r#"(function () {{
  try {{
    if (!window.DarkReader) {{
      var savedDefine = window.define;
      window.define = undefined;
      try {{
{payload}
      }} finally {{
        window.define = savedDefine;
      }}
    }}
    var reader = window.DarkReader;
    if (!reader) {{ return; }}
    {enable}
  }} catch (error) {{
    console.error('[lms-desktop] dark mode enable failed', error);
  }}
}})();"#,
        payload = payload,
        enable = options.enable_call()
    )
}

/// Lightweight re-assertion for pages that still hold the payload.
pub fn ensure_script(options: &DarkModeOptions) -> String {
    format!(
        r#"(function () {{
  try {{
    var reader = window.DarkReader;
    if (!reader) {{ return; }}
    {enable}
  }} catch (error) {{
    console.error('[lms-desktop] dark mode re-assertion failed', error);
  }}
}})();"#,
        enable = options.enable_call()
    )
}

pub fn disable_script() -> &'static str {
    r#"(function () {
  try {
    var reader = window.DarkReader;
    if (reader && reader.isEnabled()) { reader.disable(); }
  } catch (error) {
    console.error('[lms-desktop] dark mode disable failed', error);
  }
})();"#
}

//! Persisted user preferences.
//!
//! The file is a flat JSON object. Keys this version does not know about are
//! carried through `extra` so a newer build's settings survive a save from an
//! older one. Missing keys, `null`s and blank strings resolve to the built-in
//! defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::APP_DISPLAY_NAME;

#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("preferences path is unavailable")]
    NoConfigDir,

    #[error("failed to read preferences {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse preferences {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write preferences {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(
        rename = "isDarkModeEnabled",
        default,
        deserialize_with = "lenient"
    )]
    pub dark_mode_enabled: bool,

    #[serde(
        rename = "customStrings",
        default,
        deserialize_with = "lenient"
    )]
    pub custom_strings: CustomStrings,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode_enabled: false,
            custom_strings: CustomStrings::default(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawCustomStrings")]
pub struct CustomStrings {
    pub title: String,
    pub subtitle: String,
    pub loading_text: String,
    pub exit_text: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CustomStrings {
    fn default() -> Self {
        Self {
            title: APP_DISPLAY_NAME.to_string(),
            subtitle: "Learning Management System".to_string(),
            loading_text: "Loading...".to_string(),
            exit_text: "See you next time!".to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCustomStrings {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    loading_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    exit_text: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawCustomStrings> for CustomStrings {
    fn from(raw: RawCustomStrings) -> Self {
        let defaults = CustomStrings::default();
        Self {
            title: non_blank(raw.title).unwrap_or(defaults.title),
            subtitle: non_blank(raw.subtitle).unwrap_or(defaults.subtitle),
            loading_text: non_blank(raw.loading_text).unwrap_or(defaults.loading_text),
            exit_text: non_blank(raw.exit_text).unwrap_or(defaults.exit_text),
            extra: raw.extra,
        }
    }
}

/// Partial update coming from the settings window. `None` leaves a field as is;
/// a blank value resets it to the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStringsUpdate {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub loading_text: Option<String>,
    pub exit_text: Option<String>,
}

impl CustomStrings {
    pub fn apply_update(&mut self, update: CustomStringsUpdate) {
        let defaults = CustomStrings::default();
        if let Some(title) = update.title {
            self.title = non_blank(Some(title)).unwrap_or(defaults.title);
        }
        if let Some(subtitle) = update.subtitle {
            self.subtitle = non_blank(Some(subtitle)).unwrap_or(defaults.subtitle);
        }
        if let Some(loading_text) = update.loading_text {
            self.loading_text = non_blank(Some(loading_text)).unwrap_or(defaults.loading_text);
        }
        if let Some(exit_text) = update.exit_text {
            self.exit_text = non_blank(Some(exit_text)).unwrap_or(defaults.exit_text);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// `null` or a value of the wrong type reads as the default, so one bad field
/// does not discard the rest of the file.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(T::deserialize(&value).unwrap_or_else(|error| {
        tracing::warn!("ignoring malformed preference value {value}: {error}");
        T::default()
    }))
}

/// Reads preferences from `path`. A missing file is not an error.
pub fn load(path: &Path) -> Result<Preferences, PreferencesError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Preferences::default());
        }
        Err(source) => {
            return Err(PreferencesError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let parse_error = |message: String| PreferencesError::Parse {
        path: path.to_path_buf(),
        message,
    };
    let value: Value = serde_json::from_str(&raw).map_err(|error| parse_error(error.to_string()))?;
    if !value.is_object() {
        return Err(parse_error("root is not a JSON object".to_string()));
    }
    serde_json::from_value(value).map_err(|error| parse_error(error.to_string()))
}

/// Startup variant of [`load`]: any failure is logged and replaced by defaults.
pub fn load_or_default(path: Option<&Path>) -> Preferences {
    let Some(path) = path else {
        tracing::warn!("preferences path is unavailable, using defaults");
        return Preferences::default();
    };

    match load(path) {
        Ok(preferences) => preferences,
        Err(error) => {
            tracing::warn!("{error}; using default preferences");
            Preferences::default()
        }
    }
}

/// Overwrites the whole record, creating the parent directory when needed.
pub fn save(path: &Path, preferences: &Preferences) -> Result<(), PreferencesError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PreferencesError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let serialized = serde_json::to_string_pretty(preferences)?;
    fs::write(path, serialized).map_err(|source| PreferencesError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn temp_path() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("preferences.json");
        (dir, path)
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let (_dir, path) = temp_path();

        let preferences = load(&path).expect("missing file is not an error");

        assert!(!preferences.dark_mode_enabled);
        assert_eq!(preferences.custom_strings, CustomStrings::default());
        assert!(preferences.extra.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, path) = temp_path();
        let mut preferences = Preferences::default();
        preferences.dark_mode_enabled = true;
        preferences.custom_strings.title = "My Campus".to_string();

        save(&path, &preferences).expect("save");
        let loaded = load(&path).expect("load");

        assert_eq!(loaded, preferences);
    }

    #[test]
    fn partial_custom_strings_merge_with_defaults() {
        let (_dir, path) = temp_path();
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(
            &path,
            r#"{"isDarkModeEnabled": true, "customStrings": {"exitText": "Bye"}}"#,
        )
        .expect("write");

        let loaded = load(&path).expect("load");

        assert!(loaded.dark_mode_enabled);
        assert_eq!(loaded.custom_strings.exit_text, "Bye");
        assert_eq!(loaded.custom_strings.title, CustomStrings::default().title);

        save(&path, &loaded).expect("save");
        assert_eq!(load(&path).expect("reload"), loaded);
    }

    #[test]
    fn nulls_and_blank_strings_fall_back_to_defaults() {
        let (_dir, path) = temp_path();
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(
            &path,
            r#"{"isDarkModeEnabled": null, "customStrings": {"title": null, "subtitle": "   "}}"#,
        )
        .expect("write");

        let loaded = load(&path).expect("load");

        assert!(!loaded.dark_mode_enabled);
        assert_eq!(loaded.custom_strings, CustomStrings::default());
    }

    #[test]
    fn unknown_keys_survive_a_save() {
        let (_dir, path) = temp_path();
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(
            &path,
            r#"{"isDarkModeEnabled": false, "zoomLevel": 2, "customStrings": {"title": "X", "footer": "f"}}"#,
        )
        .expect("write");

        let mut loaded = load(&path).expect("load");
        loaded.dark_mode_enabled = true;
        save(&path, &loaded).expect("save");

        let raw: Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(raw["zoomLevel"], json!(2));
        assert_eq!(raw["customStrings"]["footer"], json!("f"));
        assert_eq!(raw["customStrings"]["title"], json!("X"));
        assert_eq!(raw["isDarkModeEnabled"], json!(true));
    }

    #[test]
    fn wrong_typed_fields_fall_back_without_losing_the_file() {
        let (_dir, path) = temp_path();
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(
            &path,
            r#"{"isDarkModeEnabled": "yes", "zoomLevel": 2, "customStrings": {"title": 5, "subtitle": "Kampus", "footer": "f"}}"#,
        )
        .expect("write");

        let loaded = load(&path).expect("wrong types are not fatal");
        assert!(!loaded.dark_mode_enabled);
        assert_eq!(loaded.custom_strings.title, CustomStrings::default().title);
        assert_eq!(loaded.custom_strings.subtitle, "Kampus");

        save(&path, &loaded).expect("save");
        let raw: Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(raw["zoomLevel"], json!(2));
        assert_eq!(raw["customStrings"]["footer"], json!("f"));
    }

    #[test]
    fn non_object_custom_strings_read_as_defaults() {
        let (_dir, path) = temp_path();
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, r#"{"isDarkModeEnabled": true, "customStrings": [1]}"#).expect("write");

        let loaded = load(&path).expect("load");

        assert!(loaded.dark_mode_enabled);
        assert_eq!(loaded.custom_strings, CustomStrings::default());
    }

    #[test]
    fn malformed_file_is_an_error_but_load_or_default_recovers() {
        let (_dir, path) = temp_path();
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, "{not json").expect("write");

        assert!(matches!(load(&path), Err(PreferencesError::Parse { .. })));
        assert_eq!(load_or_default(Some(&path)), Preferences::default());
    }

    #[test]
    fn non_object_root_is_rejected() {
        let (_dir, path) = temp_path();
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, "[1, 2, 3]").expect("write");

        assert!(matches!(load(&path), Err(PreferencesError::Parse { .. })));
    }

    #[test]
    fn apply_update_resets_blank_fields_and_keeps_untouched_ones() {
        let mut strings = CustomStrings {
            title: "Custom".to_string(),
            subtitle: "Sub".to_string(),
            ..CustomStrings::default()
        };

        strings.apply_update(CustomStringsUpdate {
            title: Some(String::new()),
            loading_text: Some(" Please wait ".to_string()),
            ..CustomStringsUpdate::default()
        });

        assert_eq!(strings.title, CustomStrings::default().title);
        assert_eq!(strings.subtitle, "Sub");
        assert_eq!(strings.loading_text, "Please wait");
    }
}

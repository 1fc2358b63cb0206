use crate::{
    preferences::Preferences,
    surface::{ContentIsolation, LocalDocument, SurfaceContent, SurfaceOptions, SurfaceRole},
    APP_DISPLAY_NAME, CONFIRM_RESET_DOCUMENT, CONFIRM_RESET_WINDOW_LABEL,
    CONFIRM_RESET_WINDOW_SIZE, DARK_BACKGROUND, EXIT_DOCUMENT, EXIT_WINDOW_LABEL, EXIT_WINDOW_SIZE,
    LIGHT_BACKGROUND, MAIN_WINDOW_LABEL, MAIN_WINDOW_SIZE, SETTINGS_DOCUMENT,
    SETTINGS_WINDOW_LABEL, SETTINGS_WINDOW_SIZE, SPLASH_DOCUMENT, SPLASH_WINDOW_LABEL,
    SPLASH_WINDOW_SIZE,
};

fn theme_name(dark_mode_enabled: bool) -> &'static str {
    if dark_mode_enabled {
        "dark"
    } else {
        "light"
    }
}

pub fn background_color(dark_mode_enabled: bool) -> &'static str {
    if dark_mode_enabled {
        DARK_BACKGROUND
    } else {
        LIGHT_BACKGROUND
    }
}

pub fn main_options(target_url: &str, preferences: &Preferences) -> SurfaceOptions {
    SurfaceOptions {
        role: SurfaceRole::Main,
        label: MAIN_WINDOW_LABEL.to_string(),
        title: preferences.custom_strings.title.clone(),
        size: MAIN_WINDOW_SIZE,
        frameless: false,
        always_on_top: false,
        resizable: true,
        visible: false,
        centered: true,
        background_color: background_color(preferences.dark_mode_enabled).to_string(),
        isolation: ContentIsolation::PersistentSession,
        content: SurfaceContent::Remote(target_url.to_string()),
    }
}

pub fn splash_options(preferences: &Preferences) -> SurfaceOptions {
    let strings = &preferences.custom_strings;
    let document = LocalDocument::new(SPLASH_DOCUMENT)
        .param("title", &strings.title)
        .param("subtitle", &strings.subtitle)
        .param("loadingText", &strings.loading_text)
        .param("theme", theme_name(preferences.dark_mode_enabled));
    transient_options(
        SurfaceRole::Splash,
        SPLASH_WINDOW_LABEL,
        SPLASH_WINDOW_SIZE,
        preferences,
        document,
    )
}

pub fn exit_options(preferences: &Preferences) -> SurfaceOptions {
    let strings = &preferences.custom_strings;
    let document = LocalDocument::new(EXIT_DOCUMENT)
        .param("title", &strings.title)
        .param("exitText", &strings.exit_text)
        .param("theme", theme_name(preferences.dark_mode_enabled));
    transient_options(
        SurfaceRole::Exit,
        EXIT_WINDOW_LABEL,
        EXIT_WINDOW_SIZE,
        preferences,
        document,
    )
}

pub fn settings_options(preferences: &Preferences) -> SurfaceOptions {
    SurfaceOptions {
        role: SurfaceRole::Settings,
        label: SETTINGS_WINDOW_LABEL.to_string(),
        title: format!("{APP_DISPLAY_NAME} Settings"),
        size: SETTINGS_WINDOW_SIZE,
        frameless: false,
        always_on_top: false,
        resizable: false,
        visible: true,
        centered: true,
        background_color: background_color(preferences.dark_mode_enabled).to_string(),
        isolation: ContentIsolation::Default,
        content: SurfaceContent::Local(settings_document(preferences)),
    }
}

pub fn settings_document(preferences: &Preferences) -> LocalDocument {
    LocalDocument::new(SETTINGS_DOCUMENT).param("theme", theme_name(preferences.dark_mode_enabled))
}

/// Session reset confirmation. The page focuses Cancel, and Escape or closing
/// the window counts as Cancel.
pub fn confirm_reset_options(preferences: &Preferences) -> SurfaceOptions {
    SurfaceOptions {
        role: SurfaceRole::ConfirmReset,
        label: CONFIRM_RESET_WINDOW_LABEL.to_string(),
        title: "Clear Session Data".to_string(),
        size: CONFIRM_RESET_WINDOW_SIZE,
        frameless: false,
        always_on_top: true,
        resizable: false,
        visible: true,
        centered: true,
        background_color: background_color(preferences.dark_mode_enabled).to_string(),
        isolation: ContentIsolation::Default,
        content: SurfaceContent::Local(
            LocalDocument::new(CONFIRM_RESET_DOCUMENT)
                .param("title", &preferences.custom_strings.title)
                .param("theme", theme_name(preferences.dark_mode_enabled)),
        ),
    }
}

fn transient_options(
    role: SurfaceRole,
    label: &str,
    size: (f64, f64),
    preferences: &Preferences,
    document: LocalDocument,
) -> SurfaceOptions {
    SurfaceOptions {
        role,
        label: label.to_string(),
        title: preferences.custom_strings.title.clone(),
        size,
        frameless: true,
        always_on_top: true,
        resizable: false,
        visible: true,
        centered: true,
        background_color: background_color(preferences.dark_mode_enabled).to_string(),
        isolation: ContentIsolation::Default,
        content: SurfaceContent::Local(document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splash_reflects_dark_mode_and_custom_strings() {
        let mut preferences = Preferences::default();
        preferences.dark_mode_enabled = true;
        preferences.custom_strings.loading_text = "Sabar ya".to_string();

        let options = splash_options(&preferences);

        assert_eq!(options.background_color, DARK_BACKGROUND);
        assert!(options.frameless && options.always_on_top && options.centered);
        let SurfaceContent::Local(document) = options.content else {
            panic!("splash must load a bundled page");
        };
        assert!(document
            .params
            .contains(&("loadingText".to_string(), "Sabar ya".to_string())));
        assert!(document
            .params
            .contains(&("theme".to_string(), "dark".to_string())));
    }

    #[test]
    fn main_starts_hidden_with_persistent_session() {
        let options = main_options("https://lms.binus.ac.id/", &Preferences::default());

        assert!(!options.visible);
        assert_eq!(options.isolation, ContentIsolation::PersistentSession);
        assert_eq!(options.background_color, LIGHT_BACKGROUND);
        assert_eq!(
            options.content,
            SurfaceContent::Remote("https://lms.binus.ac.id/".to_string())
        );
    }

    #[test]
    fn exit_carries_exit_text() {
        let options = exit_options(&Preferences::default());

        let SurfaceContent::Local(document) = options.content else {
            panic!("exit must load a bundled page");
        };
        assert_eq!(document.path, EXIT_DOCUMENT);
        assert!(document
            .params
            .iter()
            .any(|(key, value)| key == "exitText" && value == "See you next time!"));
    }
}

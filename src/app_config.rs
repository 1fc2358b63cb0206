use std::env;

use url::Url;

use crate::{DEFAULT_TARGET_URL, TARGET_URL_ENV};

pub fn resolve_target_url() -> String {
    let raw = env::var(TARGET_URL_ENV).unwrap_or_else(|_| DEFAULT_TARGET_URL.to_string());
    normalize_target_url(&raw, DEFAULT_TARGET_URL)
}

pub fn normalize_target_url(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    match Url::parse(trimmed) {
        Ok(mut parsed) if matches!(parsed.scheme(), "http" | "https") => {
            if parsed.path().is_empty() {
                parsed.set_path("/");
            }
            parsed.to_string()
        }
        _ => fallback.to_string(),
    }
}

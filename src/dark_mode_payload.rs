use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use ureq::{config::Config, Agent};

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("failed to read dark mode script {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to fetch dark mode script from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("dark mode script from {origin} is empty")]
    Empty { origin: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadState {
    Pending,
    Ready(Arc<str>),
    Failed(String),
}

impl PayloadState {
    pub fn from_result(result: Result<String, PayloadError>) -> Self {
        match result {
            Ok(script) => PayloadState::Ready(Arc::from(script)),
            Err(error) => PayloadState::Failed(error.to_string()),
        }
    }
}

/// Resolves the Dark Reader source: the first non-empty local candidate wins,
/// the CDN is only contacted when none exists. A fetched copy is written to
/// `cache_path` so later launches stay offline. The whole CDN request is
/// bounded by `fetch_timeout`.
pub fn resolve_payload(
    local_candidates: &[PathBuf],
    cache_path: Option<&Path>,
    cdn_url: &str,
    fetch_timeout: Duration,
) -> Result<String, PayloadError> {
    for candidate in local_candidates.iter().map(PathBuf::as_path).chain(cache_path) {
        if let Some(script) = read_local(candidate)? {
            tracing::info!("dark mode script loaded from {}", candidate.display());
            return Ok(script);
        }
    }

    tracing::info!("no local dark mode script found, fetching {cdn_url}");
    let script = fetch_remote(cdn_url, fetch_timeout)?;
    if let Some(cache_path) = cache_path {
        if let Err(error) = write_cache(cache_path, &script) {
            tracing::warn!(
                "failed to cache dark mode script at {}: {error}",
                cache_path.display()
            );
        }
    }
    Ok(script)
}

fn read_local(path: &Path) -> Result<Option<String>, PayloadError> {
    match fs::read_to_string(path) {
        Ok(script) if script.trim().is_empty() => {
            tracing::warn!("ignoring empty dark mode script at {}", path.display());
            Ok(None)
        }
        Ok(script) => Ok(Some(script)),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(PayloadError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn fetch_remote(url: &str, timeout: Duration) -> Result<String, PayloadError> {
    let fetch_error = |message: String| PayloadError::Fetch {
        url: url.to_string(),
        message,
    };
    let config = Config::builder().timeout_global(Some(timeout)).build();
    let agent = Agent::new_with_config(config);
    let mut response = agent
        .get(url)
        .call()
        .map_err(|error| fetch_error(error.to_string()))?;
    let script = response
        .body_mut()
        .read_to_string()
        .map_err(|error| fetch_error(error.to_string()))?;
    if script.trim().is_empty() {
        return Err(PayloadError::Empty {
            origin: url.to_string(),
        });
    }
    Ok(script)
}

fn write_cache(path: &Path, script: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, script)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 9 (discard) on loopback refuses connections, so a fetch attempt
    // fails fast instead of reaching the network.
    const UNREACHABLE_URL: &str = "http://127.0.0.1:9/darkreader.min.js";
    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn first_existing_local_candidate_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.js");
        let bundled = dir.path().join("bundled.js");
        fs::write(&bundled, "window.DarkReader = {};").expect("write");

        let script = resolve_payload(&[missing, bundled], None, UNREACHABLE_URL, TIMEOUT)
            .expect("local script resolves");

        assert_eq!(script, "window.DarkReader = {};");
    }

    #[test]
    fn cache_is_used_when_no_bundled_copy_exists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = dir.path().join("cache").join("darkreader.min.js");
        write_cache(&cache, "cached").expect("write cache");

        let script = resolve_payload(
            &[dir.path().join("missing.js")],
            Some(&cache),
            UNREACHABLE_URL,
            TIMEOUT,
        )
        .expect("cached script resolves");

        assert_eq!(script, "cached");
    }

    #[test]
    fn empty_bundled_file_falls_through_to_cache() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bundled = dir.path().join("bundled.js");
        fs::write(&bundled, "  \n").expect("write");
        let cache = dir.path().join("cache").join("darkreader.min.js");
        write_cache(&cache, "cached").expect("write cache");

        let script = resolve_payload(&[bundled], Some(&cache), UNREACHABLE_URL, TIMEOUT)
            .expect("cached script resolves");

        assert_eq!(script, "cached");
    }

    #[test]
    fn empty_local_files_fall_through_to_cdn() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bundled = dir.path().join("bundled.js");
        fs::write(&bundled, "").expect("write");

        let result = resolve_payload(&[bundled], None, UNREACHABLE_URL, TIMEOUT);

        assert!(matches!(result, Err(PayloadError::Fetch { .. })));
    }

    #[test]
    fn unreachable_cdn_reports_fetch_error() {
        let dir = tempfile::tempdir().expect("tempdir");

        let result =
            resolve_payload(&[dir.path().join("missing.js")], None, UNREACHABLE_URL, TIMEOUT);

        assert!(matches!(result, Err(PayloadError::Fetch { .. })));
    }

    #[test]
    fn stalled_cdn_times_out() {
        // Accepted into the backlog but never answered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let url = format!("http://{}/darkreader.min.js", listener.local_addr().expect("addr"));
        let dir = tempfile::tempdir().expect("tempdir");
        let started = std::time::Instant::now();

        let result = resolve_payload(
            &[dir.path().join("missing.js")],
            None,
            &url,
            Duration::from_millis(300),
        );

        assert!(matches!(result, Err(PayloadError::Fetch { .. })));
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }

    #[test]
    fn payload_state_from_result() {
        assert_eq!(
            PayloadState::from_result(Ok("x".to_string())),
            PayloadState::Ready(Arc::from("x"))
        );
        assert!(matches!(
            PayloadState::from_result(Err(PayloadError::Empty {
                origin: "cdn".to_string()
            })),
            PayloadState::Failed(_)
        ));
    }
}

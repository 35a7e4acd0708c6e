//! API key loading.
//!
//! The key comes from the `OUTAGE_API_KEY` environment variable when it is
//! set, otherwise from a key file (by default `./api-key.txt`).

use std::path::Path;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::error::FetchError;

/// Environment variable that overrides the key file.
pub const API_KEY_ENV: &str = "OUTAGE_API_KEY";

/// Header the upstream service reads the key from.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Reads and trims the API key stored in `path`.
///
/// # Errors
///
/// Returns [`FetchError::Credential`] if the file cannot be read or is blank.
pub fn load_api_key(path: &Path) -> Result<String, FetchError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        FetchError::Credential(format!("cannot read {}: {e}", path.display()))
    })?;
    non_blank(&content)
        .ok_or_else(|| FetchError::Credential(format!("{} is empty", path.display())))
}

/// Resolves the API key from the environment, falling back to `path`.
///
/// # Errors
///
/// See [`load_api_key`].
pub fn resolve_api_key(path: &Path) -> Result<String, FetchError> {
    resolve_api_key_from(std::env::var(API_KEY_ENV).ok(), path)
}

/// Resolution logic behind [`resolve_api_key`] with the environment value
/// passed in.
///
/// # Errors
///
/// See [`load_api_key`].
pub fn resolve_api_key_from(env_value: Option<String>, path: &Path) -> Result<String, FetchError> {
    if let Some(key) = env_value.as_deref().and_then(non_blank) {
        debug!(source = API_KEY_ENV, "Using API key from environment");
        return Ok(key);
    }
    debug!(path = %path.display(), "Reading API key file");
    load_api_key(path)
}

/// Builds the auth header map for `key`.
///
/// # Errors
///
/// Returns [`FetchError::Credential`] if the key is not a valid header value.
pub fn auth_headers(key: &str) -> Result<HeaderMap, FetchError> {
    let mut value = HeaderValue::from_str(key)
        .map_err(|_| FetchError::Credential("API key contains invalid characters".to_string()))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, value);
    Ok(headers)
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn key_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_trims_newline() {
        let file = key_file("secret-key\n");
        assert_eq!(load_api_key(file.path()).unwrap(), "secret-key");
    }

    #[test]
    fn test_load_blank_file() {
        let file = key_file("  \n");
        assert!(matches!(load_api_key(file.path()), Err(FetchError::Credential(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_api_key(&dir.path().join("api-key.txt")).unwrap_err();
        assert!(err.to_string().contains("api-key.txt"));
    }

    #[test]
    fn test_env_value_wins_over_file() {
        let file = key_file("from-file");
        let key = resolve_api_key_from(Some("from-env".to_string()), file.path()).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_blank_env_value_falls_back_to_file() {
        let file = key_file("from-file");
        let key = resolve_api_key_from(Some(String::new()), file.path()).unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn test_auth_headers() {
        let headers = auth_headers("abc123").unwrap();
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "abc123");
        assert!(headers.get(API_KEY_HEADER).unwrap().is_sensitive());

        assert!(auth_headers("bad\nkey").is_err());
    }
}

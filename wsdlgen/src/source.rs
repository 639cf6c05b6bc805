//! WSDL document sources.
//!
//! A source is given as a local path or a URL. Local paths are
//! canonicalized into `file://` URLs so every document has one locator.

use crate::error::SourceError;
use std::path::Path;
use url::Url;

/// HTTP basic-auth credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name.
    pub username: String,
    /// Password, if any.
    pub password: Option<String>,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// Turns a command-line source into a URL.
///
/// Strings that parse as `file`, `http` or `https` URLs are kept; anything
/// else is a local path and is canonicalized.
///
/// # Errors
/// Returns `SourceError::Io` if a local path does not exist.
pub fn locate(source: &str) -> Result<Url, SourceError> {
    match Url::parse(source) {
        Ok(url) if matches!(url.scheme(), "file" | "http" | "https") => return Ok(url),
        _ => {}
    }

    let path = Path::new(source);
    let absolute = path
        .canonicalize()
        .map_err(|e| SourceError::io(path, e))?;
    Url::from_file_path(&absolute).map_err(|()| SourceError::InvalidPath { path: absolute })
}

/// Reads the document a URL points at.
///
/// Credentials are only sent to `http` and `https` locations.
///
/// # Errors
/// Returns `SourceError` if the document cannot be read or downloaded.
pub fn fetch(url: &Url, credentials: Option<&Credentials>) -> Result<String, SourceError> {
    match url.scheme() {
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| SourceError::InvalidPath {
                    path: url.path().into(),
                })?;
            tracing::debug!("Reading {}", path.display());
            std::fs::read_to_string(&path).map_err(|e| SourceError::io(path, e))
        }
        "http" | "https" => {
            tracing::debug!("Downloading {}", url);
            let client = reqwest::blocking::Client::new();
            let mut request = client.get(url.clone());
            if let Some(credentials) = credentials {
                request = request.basic_auth(&credentials.username, credentials.password.as_ref());
            }
            let response = request.send()?.error_for_status()?;
            Ok(response.text()?)
        }
        scheme => Err(SourceError::UnsupportedScheme {
            scheme: scheme.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_locate_keeps_urls() {
        let url = locate("https://example.com/service?wsdl").expect("locate");
        assert_eq!(url.as_str(), "https://example.com/service?wsdl");

        let url = locate("file:///srv/service.wsdl").expect("locate");
        assert_eq!(url.scheme(), "file");
    }

    #[test]
    fn test_locate_local_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"<definitions/>").expect("write");

        let url = locate(file.path().to_str().expect("utf-8 path")).expect("locate");
        assert_eq!(url.scheme(), "file");
        let expected = file.path().canonicalize().expect("canonicalize");
        assert_eq!(url.to_file_path().expect("file path"), expected);
    }

    #[test]
    fn test_locate_missing_path() {
        let err = locate("does/not/exist.wsdl").unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn test_fetch_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"<definitions/>").expect("write");

        let url = locate(file.path().to_str().expect("utf-8 path")).expect("locate");
        let content = fetch(&url, None).expect("fetch");
        assert_eq!(content, "<definitions/>");
    }

    #[test]
    fn test_fetch_unsupported_scheme() {
        let url = Url::parse("ftp://example.com/service.wsdl").expect("url");
        let err = fetch(&url, None).unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedScheme { ref scheme } if scheme == "ftp"));
    }
}

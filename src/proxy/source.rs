//! CSV proxy source
//!
//! Loads the operator-supplied proxy list. Any malformed row is fatal: the
//! run must not start with a partially-loaded pool.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{ProxyDescriptor, ProxyPool, ProxyScheme};

/// Errors raised while loading the proxy source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read proxy source {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("malformed proxy row at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("proxy source {path} contains no rows")]
    Empty { path: String },
}

/// Raw CSV row. `login` is the legacy alias for `username`.
#[derive(Debug, Deserialize)]
struct ProxyRow {
    #[serde(rename = "type", default)]
    scheme: Option<String>,
    host: String,
    port: u16,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl ProxyRow {
    fn into_descriptor(self, line: u64) -> Result<ProxyDescriptor, SourceError> {
        let scheme = match self.scheme.as_deref() {
            None | Some("") => ProxyScheme::default(),
            Some("http") => ProxyScheme::Http,
            Some("https") => ProxyScheme::Https,
            Some("socks5") => ProxyScheme::Socks5,
            Some(other) => {
                return Err(SourceError::Malformed {
                    line,
                    reason: format!("unknown proxy type {other:?}"),
                })
            }
        };

        if self.host.is_empty() {
            return Err(SourceError::Malformed {
                line,
                reason: "empty host".to_string(),
            });
        }
        if self.port == 0 {
            return Err(SourceError::Malformed {
                line,
                reason: "port must be positive".to_string(),
            });
        }

        let username = self
            .username
            .filter(|u| !u.is_empty())
            .or(self.login.filter(|l| !l.is_empty()));

        Ok(ProxyDescriptor {
            scheme,
            host: self.host,
            port: self.port,
            username,
            password: self.password.filter(|p| !p.is_empty()),
        })
    }
}

/// Load the proxy pool from a CSV file.
///
/// Required columns: `host`, `port`. Optional: `type` (defaults to http),
/// `username` (with `login` as a legacy fallback), `password`.
pub fn load_pool(path: &Path) -> Result<ProxyPool, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| SourceError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let mut entries = Vec::new();
    for (index, result) in reader.deserialize::<ProxyRow>().enumerate() {
        // Line 1 is the header
        let line = index as u64 + 2;
        let row = result.map_err(|e| SourceError::Malformed {
            line,
            reason: e.to_string(),
        })?;
        entries.push(row.into_descriptor(line)?);
    }

    debug!("loaded {} proxies from {}", entries.len(), path.display());

    ProxyPool::new(entries).map_err(|_| SourceError::Empty {
        path: path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn source_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write source");
        file
    }

    #[test]
    fn test_load_pool_parses_full_rows() {
        let file = source_file(
            "type,host,port,username,password\n\
             socks5,10.0.0.1,1080,alice,secret\n\
             https,10.0.0.2,3128,,\n",
        );

        let pool = load_pool(file.path()).expect("pool loads");
        assert_eq!(pool.len(), 2);

        let first = pool.proxy_at(1);
        assert_eq!(first.scheme, ProxyScheme::Socks5);
        assert_eq!(first.host, "10.0.0.1");
        assert_eq!(first.port, 1080);
        assert_eq!(first.username.as_deref(), Some("alice"));
        assert_eq!(first.password.as_deref(), Some("secret"));

        let second = pool.proxy_at(2);
        assert_eq!(second.scheme, ProxyScheme::Https);
        assert_eq!(second.username, None);
        assert_eq!(second.password, None);
    }

    #[test]
    fn test_missing_type_column_defaults_to_http() {
        let file = source_file("host,port\nproxy.example.com,8080\n");

        let pool = load_pool(file.path()).expect("pool loads");
        assert_eq!(pool.proxy_at(1).scheme, ProxyScheme::Http);
    }

    #[test]
    fn test_legacy_login_column_used_when_username_absent() {
        let file = source_file("host,port,login\n10.0.0.1,8080,legacy-user\n");

        let pool = load_pool(file.path()).expect("pool loads");
        assert_eq!(pool.proxy_at(1).username.as_deref(), Some("legacy-user"));
    }

    #[test]
    fn test_username_preferred_over_legacy_login() {
        let file = source_file(
            "host,port,username,login\n10.0.0.1,8080,primary,legacy\n",
        );

        let pool = load_pool(file.path()).expect("pool loads");
        assert_eq!(pool.proxy_at(1).username.as_deref(), Some("primary"));
    }

    #[test]
    fn test_non_numeric_port_is_fatal() {
        let file = source_file("host,port\n10.0.0.1,eighty\n");

        let err = load_pool(file.path()).expect_err("must fail");
        assert!(matches!(err, SourceError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_zero_port_is_fatal() {
        let file = source_file("host,port\n10.0.0.1,0\n");

        let err = load_pool(file.path()).expect_err("must fail");
        assert!(matches!(err, SourceError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_unknown_scheme_is_fatal() {
        let file = source_file("type,host,port\nsocks4,10.0.0.1,1080\n");

        let err = load_pool(file.path()).expect_err("must fail");
        match err {
            SourceError::Malformed { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("socks4"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_source_with_no_rows_is_fatal() {
        let file = source_file("host,port\n");

        let err = load_pool(file.path()).expect_err("must fail");
        assert!(matches!(err, SourceError::Empty { .. }));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let err = load_pool(Path::new("/nonexistent/proxies.csv")).expect_err("must fail");
        assert!(matches!(err, SourceError::Unreadable { .. }));
    }
}

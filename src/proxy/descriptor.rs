//! Proxy descriptor types

use serde::{Deserialize, Serialize};

/// Proxy protocol understood by the remote service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyScheme {
    #[default]
    Http,
    Https,
    Socks5,
}

/// One proxy endpoint from the pool.
///
/// Immutable once loaded; creation requests receive clones by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyDescriptor {
    #[serde(rename = "type")]
    pub scheme: ProxyScheme,
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProxyDescriptor {
    /// `host:port` for log lines; never includes credentials.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_defaults_to_http() {
        assert_eq!(ProxyScheme::default(), ProxyScheme::Http);
    }

    #[test]
    fn test_descriptor_serializes_scheme_as_type() {
        let descriptor = ProxyDescriptor {
            scheme: ProxyScheme::Socks5,
            host: "10.0.0.1".to_string(),
            port: 1080,
            username: None,
            password: None,
        };

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["type"], "socks5");
        assert_eq!(json["host"], "10.0.0.1");
        assert_eq!(json["port"], 1080);
        // Absent credentials are omitted from the wire entirely
        assert!(json.get("username").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_endpoint_has_no_credentials() {
        let descriptor = ProxyDescriptor {
            scheme: ProxyScheme::Http,
            host: "proxy.example.com".to_string(),
            port: 8080,
            username: Some("user".to_string()),
            password: Some("hunter2".to_string()),
        };

        assert_eq!(descriptor.endpoint(), "proxy.example.com:8080");
        assert!(!descriptor.endpoint().contains("hunter2"));
    }
}

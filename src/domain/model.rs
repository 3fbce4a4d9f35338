use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// One instance as reported by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInstance {
    pub ip: String,
    #[serde(default)]
    pub status: i32,
    #[serde(rename = "port", default)]
    pub default_port: i32,
    #[serde(rename = "ports", default)]
    pub named_ports: Option<HashMap<String, String>>,
}

impl RawInstance {
    pub fn new(ip: impl Into<String>, status: i32, default_port: i32) -> Self {
        Self {
            ip: ip.into(),
            status,
            default_port,
            named_ports: None,
        }
    }

    pub fn with_named_port(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.named_ports
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// A dialable host/port pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: i32,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: i32) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Signature -> endpoints. `None` means no endpoints are available, which is
/// distinct from an empty list. Every `Some` in one result shares the same `Arc`.
pub type ResolvedEndpoints = HashMap<String, Option<Arc<Vec<Endpoint>>>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_instance_from_registry_json() {
        let json = r#"{"ip":"10.0.0.1","status":0,"port":9000,"ports":{"rpc":"8080","http":"8081"}}"#;
        let instance: RawInstance = serde_json::from_str(json).unwrap();

        assert_eq!(instance.ip, "10.0.0.1");
        assert_eq!(instance.default_port, 9000);
        let ports = instance.named_ports.unwrap();
        assert_eq!(ports.get("rpc").map(String::as_str), Some("8080"));
    }

    #[test]
    fn test_raw_instance_without_ports() {
        let json = r#"{"ip":"10.0.0.2","status":1,"port":9000,"ports":null}"#;
        let instance: RawInstance = serde_json::from_str(json).unwrap();
        assert_eq!(instance.status, 1);
        assert!(instance.named_ports.is_none());

        let json = r#"{"ip":"10.0.0.3","port":9000}"#;
        let instance: RawInstance = serde_json::from_str(json).unwrap();
        assert_eq!(instance.status, 0);
        assert!(instance.named_ports.is_none());
    }

    #[test]
    fn test_endpoint_display() {
        assert_eq!(Endpoint::new("10.0.0.1", 8080).to_string(), "10.0.0.1:8080");
    }
}

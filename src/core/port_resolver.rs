use crate::utils::lenient::ParseFallbacks;
use std::collections::HashMap;

/// Picks the port registered under `port_name`, falling back to
/// `default_port` when the instance has no named ports or not that one.
/// A malformed port value, including one padded with whitespace, resolves
/// to `0`.
pub fn resolve_port(
    port_name: &str,
    named_ports: Option<&HashMap<String, String>>,
    default_port: i32,
    fallbacks: &ParseFallbacks,
) -> i32 {
    let Some(ports) = named_ports.filter(|ports| !ports.is_empty()) else {
        return default_port;
    };

    match ports.get(port_name) {
        Some(value) => fallbacks.parse_or_zero("named_port", value),
        None => default_port,
    }
}

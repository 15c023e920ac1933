//! Display formatting for metric values.

/// Currency with two decimals, e.g. `$1234.50`.
pub fn currency(value: f64) -> String {
    format!("${value:.2}")
}

/// Order counts are shown as plain integers.
pub fn count(value: u64) -> String {
    value.to_string()
}

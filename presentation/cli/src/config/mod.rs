pub mod api_config;
pub mod app_config;
pub mod cart_config;
pub mod storage_config;

use std::str::FromStr;

/// Reads `key` through `lookup` and parses it, falling back to `default`
/// when the variable is unset or malformed.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring malformed setting, using default");
            default
        }),
        None => default,
    }
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

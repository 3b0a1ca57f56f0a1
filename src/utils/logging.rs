use serde::Serialize;

/// Pretty-prints `value` as JSON and hands it to `log` when debug logging is
/// enabled; otherwise does nothing and skips serialization.
pub(crate) fn with_pretty_json_debug<T, F>(value: &T, log: F)
where
    T: Serialize,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
    log(pretty.as_str());
}

pub const HELP: &str =
    "Please check the response headers for `x-request-id` and include it along with the datetime when reporting the problem.";

/// `{"error": ..., "help": ..., "datetime": ...}`
///
/// `datetime` is `null` if the current time cannot be formatted.
pub fn json_error_response(err: impl std::error::Error) -> serde_json::Value {
    use time::format_description::well_known::Iso8601;

    let now_iso8601 = time::OffsetDateTime::now_utc()
        .format(&Iso8601::DATE_TIME_OFFSET)
        .inspect_err(|_e| {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "unable to format OffsetDateTime::now_utc() as Iso8601 :: {:?}",
                _e
            );
        })
        .ok();

    serde_json::json!({
        "error": err.to_string(),
        "help": HELP,
        "datetime": now_iso8601
    })
}

//! Backend endpoint for daily uploads.
//!
//! # Payload compatibility
//!
//! - Field names are camelCase and must not be renamed without `#[serde(alias)]`.
//! - New fields must be optional with `#[serde(default)]` so older backends keep parsing.

/// Path on the backend that receives one [`crate::DailyAggregate`] per sync.
pub const RECEIVE_PATH: &str = "/hh/receive";

/// Joins a base URL and an absolute path without doubling or dropping the slash.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_handles_trailing_slash() {
        assert_eq!(
            join_url("http://localhost:8080/", RECEIVE_PATH),
            "http://localhost:8080/hh/receive"
        );
        assert_eq!(
            join_url("http://localhost:8080", RECEIVE_PATH),
            "http://localhost:8080/hh/receive"
        );
    }

    #[test]
    fn join_url_keeps_base_path_prefix() {
        assert_eq!(
            join_url("https://api.example.com/v1", "hh/receive"),
            "https://api.example.com/v1/hh/receive"
        );
    }
}

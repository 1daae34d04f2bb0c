use std::time::Duration;

pub(super) fn default_api_url() -> String {
    "http://localhost:3003".to_string()
}

pub(super) const fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

pub(super) const fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

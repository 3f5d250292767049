use std::time::Duration;

/// Floor for a relay-supplied heartbeat interval.
pub const MIN_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(1);

pub fn interval_from_hello(heartbeat_interval_ms: u64) -> Duration {
    Duration::from_millis(heartbeat_interval_ms).max(MIN_HEARTBEAT_INTERVAL)
}

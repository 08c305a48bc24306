//! Simulated network latency

use std::time::Duration;

/// Complete after `duration` has elapsed.
///
/// Every service operation awaits this before touching its store. A zero
/// duration returns without yielding to the runtime.
pub async fn delay(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    tokio::time::sleep(duration).await;
}

use std::time::Duration;

/// Suspends the current task for at least `duration`.
pub async fn delay(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// [`delay`] in milliseconds.
pub async fn delay_ms(ms: u64) {
    delay(Duration::from_millis(ms)).await;
}

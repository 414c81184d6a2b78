// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

#[cfg(target_arch = "wasm32")]
pub mod wasm32 {
    use chrono::Local;
    use chrono::NaiveDate;
    use std::time::Duration;

    pub async fn sleep(duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }

    /// The browser's local calendar date.
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm32 {
    use chrono::Local;
    use chrono::NaiveDate;
    use std::time::Duration;

    pub async fn sleep(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}

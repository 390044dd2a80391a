//! Timer abstraction shared by load timeouts and scroll restoration

use async_trait::async_trait;
use std::time::Duration;

/// Roughly one frame at 60 Hz, used when no real frame callback exists.
const FRAME: Duration = Duration::from_millis(16);

/// Something that can wait. Injected so tests can use tokio's paused clock
/// and the browser can use real animation frames.
#[async_trait(?Send)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);

    async fn next_frame(&self) {
        self.sleep(FRAME).await;
    }
}

/// `gloo-timers` on wasm, `tokio::time` natively
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformSleeper;

#[async_trait(?Send)]
impl Sleeper for PlatformSleeper {
    async fn sleep(&self, duration: Duration) {
        sleep_ms(duration.as_millis() as u64).await;
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

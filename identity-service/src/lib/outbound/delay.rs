use std::ops::Range;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::domain::auth::ports::FailureDelay;

/// Uniformly random sleep imposed before invalid-credential responses, so
/// failure latency does not leak whether an email exists.
pub struct RandomizedDelay {
    millis: Range<u64>,
}

impl RandomizedDelay {
    pub fn new(millis: Range<u64>) -> Self {
        Self { millis }
    }
}

impl Default for RandomizedDelay {
    fn default() -> Self {
        Self::new(200..1000)
    }
}

#[async_trait]
impl FailureDelay for RandomizedDelay {
    async fn delay(&self) {
        // Sample before awaiting: ThreadRng is not Send
        let millis = rand::thread_rng().gen_range(self.millis.clone());
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

use std::future::Future;

use api::ApiError;
use dioxus::prelude::*;

/// Somewhere to record whether a call is in flight.
pub trait PendingFlag {
    fn set_pending(&mut self, pending: bool);
}

impl PendingFlag for Signal<bool> {
    fn set_pending(&mut self, pending: bool) {
        self.set(pending);
    }
}

/// Awaits `call` with `flag` raised, and lowers it once the call resolves,
/// whatever the result.
pub async fn while_pending<T>(flag: &mut impl PendingFlag, call: impl Future<Output = T>) -> T {
    flag.set_pending(true);
    let result = call.await;
    flag.set_pending(false);
    result
}

/// Tracks whether a call to one escrow operation is in flight.
///
/// Each dialog panel owns its own `EscrowAction`, so a pending milestone
/// save never disables the worker panel and vice versa.
#[derive(Clone, Copy)]
pub struct EscrowAction {
    pending: Signal<bool>,
}

impl EscrowAction {
    /// Reactive read; subscribes the calling component.
    pub fn is_pending(&self) -> bool {
        (self.pending)()
    }

    /// Awaits `call`, holding the pending flag for its whole duration.
    /// There is no timeout: a call that never resolves stays pending.
    pub async fn run<T>(
        mut self,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        while_pending(&mut self.pending, call).await
    }
}

pub fn use_escrow_action() -> EscrowAction {
    let pending = use_signal(|| false);
    EscrowAction { pending }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedFlag(Rc<Cell<bool>>);

    impl PendingFlag for SharedFlag {
        fn set_pending(&mut self, pending: bool) {
            self.0.set(pending);
        }
    }

    #[tokio::test]
    async fn flag_is_raised_during_the_call_and_cleared_after_success() {
        let mut flag = SharedFlag::default();
        let seen = flag.clone();

        let result: Result<u32, ApiError> = while_pending(&mut flag, async move {
            assert!(seen.0.get());
            Ok(7)
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert!(!flag.0.get());
    }

    #[tokio::test]
    async fn flag_is_cleared_after_a_failed_call() {
        let mut flag = SharedFlag::default();
        let seen = flag.clone();

        let result: Result<(), ApiError> = while_pending(&mut flag, async move {
            assert!(seen.0.get());
            Err(ApiError::msg("worker already assigned"))
        })
        .await;

        assert_eq!(result.unwrap_err().to_string(), "worker already assigned");
        assert!(!flag.0.get());
    }
}

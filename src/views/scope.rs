use std::future::Future;
use tokio::sync::watch;

/// Lifetime of a view instance.
///
/// Network calls started by a view run through [`ViewScope::run`]; once the
/// scope is closed, pending calls are abandoned and their results never reach
/// the view's state.
#[derive(Debug)]
pub struct ViewScope {
    closed: watch::Sender<bool>,
}

impl ViewScope {
    pub fn new() -> Self {
        let (closed, _) = watch::channel(false);
        Self { closed }
    }

    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Drive `future` unless the scope closes first
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        let mut closed = self.closed.subscribe();

        let cancelled = async move {
            loop {
                let is_closed = *closed.borrow_and_update();
                if is_closed {
                    return;
                }
                if closed.changed().await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => None,
            output = future => Some(output),
        }
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

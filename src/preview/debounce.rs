// file: src/preview/debounce.rs
// description: trailing-edge debounce for preview refreshes
// reference: https://docs.rs/tokio/latest/tokio/time

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Trailing-edge debouncer running on a tokio task.
///
/// Every [`push`](Debouncer::push) restarts the window; once `delay` passes
/// with no newer value, the last value is emitted on the output channel.
/// Dropping the debouncer (or calling [`close`](Debouncer::close)) flushes
/// whatever is still pending.
pub struct Debouncer<T> {
    input: Option<mpsc::UnboundedSender<T>>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Must be called from within a tokio runtime.
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (output_tx, output_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run(delay, input_rx, output_tx));

        (
            Self {
                input: Some(input_tx),
                task: Some(task),
            },
            output_rx,
        )
    }

    /// Returns false once the debouncer has shut down.
    pub fn push(&self, value: T) -> bool {
        match &self.input {
            Some(tx) => tx.send(value).is_ok(),
            None => false,
        }
    }

    /// Stop accepting input and wait for the pending value to be flushed.
    pub async fn close(mut self) {
        self.input.take();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

async fn run<T>(
    delay: Duration,
    mut input: mpsc::UnboundedReceiver<T>,
    output: mpsc::UnboundedSender<T>,
) {
    let mut pending: Option<T> = None;

    loop {
        match pending.take() {
            None => match input.recv().await {
                Some(value) => pending = Some(value),
                None => break,
            },
            Some(value) => {
                tokio::select! {
                    next = input.recv() => match next {
                        Some(newer) => pending = Some(newer),
                        None => {
                            let _ = output.send(value);
                            break;
                        }
                    },
                    () = tokio::time::sleep(delay) => {
                        if output.send(value).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }

    debug!("Debouncer stopped");
}

use tokio::sync::watch;

/// A token that signals run cancellation across async tasks.
///
/// Clones observe the same signal. The pipeline checks it between units of
/// work: once cancelled, no new external calls are issued and the report is
/// assembled from units already completed.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    receiver: watch::Receiver<bool>,
}

/// Handle used to trigger cancellation.
#[derive(Debug)]
pub struct CancellationHandle {
    sender: watch::Sender<bool>,
}

impl CancellationToken {
    pub fn new() -> (Self, CancellationHandle) {
        let (tx, rx) = watch::channel(false);
        (Self { receiver: rx }, CancellationHandle { sender: tx })
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Wait asynchronously until cancellation is requested.
    pub async fn cancelled(&mut self) {
        while !*self.receiver.borrow() {
            if self.receiver.changed().await.is_err() {
                // Sender dropped, treat as cancellation.
                return;
            }
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new().0
    }
}

impl CancellationHandle {
    pub fn cancel(&self) {
        // Ignore the result: receivers may all be gone already.
        let _ = self.sender.send(true);
    }
}

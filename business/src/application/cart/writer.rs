use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::domain::cart::store::CartStore;
use crate::domain::logger::Logger;

enum WriteCommand {
    Save(Vec<u8>),
    Flush(oneshot::Sender<()>),
}

/// Coalesces bursts of cart snapshots into a single store write.
///
/// Every scheduled snapshot restarts the quiet period; only the latest one
/// is written once the period elapses. Write failures are logged, never
/// returned.
pub struct DebouncedCartWriter {
    sender: mpsc::UnboundedSender<WriteCommand>,
    task: Mutex<Option<JoinHandle<()>>>,
    logger: Arc<dyn Logger>,
}

impl DebouncedCartWriter {
    /// Spawns the writer task on the current tokio runtime.
    pub fn spawn(
        store: Arc<dyn CartStore>,
        key: &str,
        quiet_period: Duration,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(
            receiver,
            store,
            key.to_string(),
            quiet_period,
            logger.clone(),
        ));

        Self {
            sender,
            task: Mutex::new(Some(task)),
            logger,
        }
    }

    /// Queues `snapshot`; returns immediately.
    pub fn schedule(&self, snapshot: Vec<u8>) {
        if self.sender.send(WriteCommand::Save(snapshot)).is_err() {
            self.logger
                .warn("Cart writer is stopped, dropping cart snapshot");
        }
    }

    /// Writes any pending snapshot now and waits for it to land.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.sender.send(WriteCommand::Flush(ack)).is_err() {
            return;
        }
        let _ = done.await;
    }

    /// Flushes, then stops the writer task.
    pub async fn close(&self) {
        self.flush().await;
        let task = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.abort();
            let _ = task.await;
        }
    }
}

async fn run(
    mut receiver: mpsc::UnboundedReceiver<WriteCommand>,
    store: Arc<dyn CartStore>,
    key: String,
    quiet_period: Duration,
    logger: Arc<dyn Logger>,
) {
    let mut pending: Option<Vec<u8>> = None;

    loop {
        let next = if pending.is_some() {
            match tokio::time::timeout(quiet_period, receiver.recv()).await {
                Ok(command) => command,
                Err(_) => {
                    write(store.as_ref(), &key, pending.take(), logger.as_ref()).await;
                    continue;
                }
            }
        } else {
            receiver.recv().await
        };

        match next {
            Some(WriteCommand::Save(snapshot)) => pending = Some(snapshot),
            Some(WriteCommand::Flush(ack)) => {
                write(store.as_ref(), &key, pending.take(), logger.as_ref()).await;
                let _ = ack.send(());
            }
            None => {
                write(store.as_ref(), &key, pending.take(), logger.as_ref()).await;
                break;
            }
        }
    }
}

async fn write(store: &dyn CartStore, key: &str, snapshot: Option<Vec<u8>>, logger: &dyn Logger) {
    let Some(snapshot) = snapshot else {
        return;
    };

    match store.set(key, &snapshot).await {
        Ok(()) => logger.debug(&format!("Cart persisted ({} bytes)", snapshot.len())),
        Err(e) => logger.error(&format!("Failed to persist cart: {}", e)),
    }
}

use super::framer::LineFramer;
use crate::error::DeviceError;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

const READ_CHUNK: usize = 1024;

/// A device reader running on its own task.
///
/// The task owns the framing buffer and publishes the latest reading through a
/// watch channel. It stops at end of stream, on a read error, on [`DeviceStream::stop`],
/// or when the handle is dropped.
pub struct DeviceStream {
    value_rx: watch::Receiver<Option<String>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<(), DeviceError>>,
}

impl DeviceStream {
    /// Starts reading `reader` on the current tokio runtime.
    pub fn spawn<R>(reader: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (value_tx, value_rx) = watch::channel(None);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(read_loop(reader, value_tx, shutdown_rx));
        Self {
            value_rx,
            shutdown_tx: Some(shutdown_tx),
            task,
        }
    }

    /// The last reading, as received.
    pub fn value(&self) -> Option<String> {
        self.value_rx.borrow().clone()
    }

    /// The last reading as a number.
    pub fn reading(&self) -> Option<f64> {
        self.value_rx
            .borrow()
            .as_deref()
            .and_then(|v| v.parse().ok())
    }

    /// A receiver that observes every published reading.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.value_rx.clone()
    }

    /// Waits for the next reading. Returns `None` once the reader task has finished.
    pub async fn changed(&mut self) -> Option<String> {
        self.value_rx.changed().await.ok()?;
        self.value_rx.borrow_and_update().clone()
    }

    /// Signals the reader task to stop and waits for it.
    pub async fn stop(mut self) -> Result<(), DeviceError> {
        if let Some(tx) = self.shutdown_tx.take() {
            // The task may already have finished on its own.
            let _ = tx.send(());
        }
        self.join_task().await
    }

    /// Waits for the reader to reach end of stream.
    pub async fn finished(mut self) -> Result<(), DeviceError> {
        self.join_task().await
    }

    async fn join_task(&mut self) -> Result<(), DeviceError> {
        match (&mut self.task).await {
            Ok(result) => result,
            Err(e) => Err(DeviceError::Task(e.to_string())),
        }
    }
}

async fn read_loop<R>(
    mut reader: R,
    value_tx: watch::Sender<Option<String>>,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> Result<(), DeviceError>
where
    R: AsyncRead + Unpin,
{
    let mut framer = LineFramer::new();
    let mut chunk = vec![0u8; READ_CHUNK];

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                tracing::debug!("Device reader stopped");
                return Ok(());
            }
            read = reader.read(&mut chunk) => {
                let n = match read {
                    Ok(n) => n,
                    Err(e) => {
                        tracing::warn!(error = %e, "Device read failed");
                        return Err(e.into());
                    }
                };
                if n == 0 {
                    tracing::debug!(pending = framer.pending().len(), "Device stream closed");
                    return Ok(());
                }
                if framer.push_chunk(&chunk[..n]) {
                    tracing::trace!(value = ?framer.value(), "Device reading");
                    value_tx.send_replace(framer.value().map(str::to_string));
                }
            }
        }
    }
}

//! Channel sink
//!
//! Moves downstream I/O off the admitting thread. `write_async` only pushes
//! the event onto an unbounded `tokio::sync::mpsc` channel, which never
//! blocks, so the buffer's critical section stays short. A forwarding task
//! pulls events off the channel in order and awaits a [`LogWriter`] for each.
//!
//! Write failures are logged and dropped: once handed off, an event counts
//! as delivered from the buffer's point of view.

use relay_types::LogEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::{LogSink, LogWriter};

/// Sink that forwards events to an async writer through a channel.
#[derive(Debug)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<LogEvent>,
    /// Events that could not be handed off because the receiver was gone.
    rejected: AtomicU64,
}

impl ChannelSink {
    /// Create a sink and the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<LogEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
                rejected: AtomicU64::new(0),
            },
            receiver,
        )
    }

    /// Create a sink and spawn a task forwarding into `writer`.
    ///
    /// Must be called from within a Tokio runtime. The task ends once every
    /// clone of the sink's sender is dropped and the channel is drained.
    pub fn spawn<W>(writer: Arc<W>) -> (Self, JoinHandle<ForwardStats>)
    where
        W: LogWriter + 'static,
    {
        let (sink, receiver) = Self::channel();
        let handle = tokio::spawn(forward(receiver, writer));
        (sink, handle)
    }

    /// Number of events dropped because the forwarding side had shut down.
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }
}

impl LogSink for ChannelSink {
    fn write_async(&self, event: LogEvent) {
        if let Err(mpsc::error::SendError(event)) = self.sender.send(event) {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            warn!(event_id = %event.id, "Log writer gone, released event dropped");
        }
    }
}

/// Totals reported by a finished forwarding task.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ForwardStats {
    pub written: u64,
    pub failed: u64,
}

/// Drain `receiver` into `writer`, in order, until the channel closes.
pub async fn forward<W>(
    mut receiver: mpsc::UnboundedReceiver<LogEvent>,
    writer: Arc<W>,
) -> ForwardStats
where
    W: LogWriter + ?Sized,
{
    let mut stats = ForwardStats::default();

    while let Some(event) = receiver.recv().await {
        let id = event.id;
        match writer.write(event).await {
            Ok(()) => stats.written += 1,
            Err(e) => {
                stats.failed += 1;
                warn!(event_id = %id, error = %e, "Log writer failed, event dropped");
            }
        }
    }

    debug!(
        written = stats.written,
        failed = stats.failed,
        "Log forwarding finished"
    );
    stats
}

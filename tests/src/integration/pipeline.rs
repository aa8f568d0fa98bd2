//! # Buffer To Writer Pipeline
//!
//! Producer -> `TriggeredBufferService` -> sink adapter -> async `LogWriter`.
//!
//! Verifies that releases arrive downstream in arrival order, that writer
//! failures never reach the producer, and that pending events are lost when
//! the buffer is dropped without a trigger.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use relay_types::{LogEvent, LogLevel};
    use triggered_buffer::{
        BufferConfig, ChannelSink, ForwardStats, InMemorySink, LogSink, LogWriter, SinkError,
        TracingSink, TriggeredBufferApi, TriggeredBufferService,
    };
    use tracing_subscriber::fmt::MakeWriter;

    /// Writer that records messages and refuses anything tagged "reject".
    #[derive(Default)]
    struct RecordingWriter {
        messages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LogWriter for RecordingWriter {
        async fn write(&self, event: LogEvent) -> Result<(), SinkError> {
            if event.properties.contains_key("reject") {
                return Err(SinkError::Closed);
            }
            tokio::task::yield_now().await;
            self.messages.lock().push(event.message);
            Ok(())
        }
    }

    fn event(level: LogLevel, msg: &str) -> LogEvent {
        LogEvent::new(level, "pipeline", msg)
    }

    #[tokio::test]
    async fn test_release_reaches_async_writer_in_order() {
        let writer = Arc::new(RecordingWriter::default());
        let (sink, forwarder) = ChannelSink::spawn(writer.clone());
        let buffer =
            TriggeredBufferService::new(&BufferConfig::new(3, "Error"), Arc::new(sink)).unwrap();

        for msg in ["1", "2", "3", "4"] {
            buffer.admit(event(LogLevel::Debug, msg));
        }
        buffer.admit(event(LogLevel::Error, "5"));
        buffer.admit(event(LogLevel::Info, "6"));

        // Dropping the buffer closes the channel; "6" is never released.
        drop(buffer);
        let stats = forwarder.await.unwrap();

        assert_eq!(stats, ForwardStats { written: 4, failed: 0 });
        assert_eq!(*writer.messages.lock(), vec!["2", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn test_writer_failure_does_not_reach_producer() {
        let writer = Arc::new(RecordingWriter::default());
        let (sink, forwarder) = ChannelSink::spawn(writer.clone());
        let buffer =
            TriggeredBufferService::new(&BufferConfig::new(10, "Warn"), Arc::new(sink)).unwrap();

        buffer.admit(event(LogLevel::Info, "kept"));
        buffer.admit(event(LogLevel::Info, "dropped").with_property("reject", "yes"));
        buffer.admit(event(LogLevel::Warn, "trigger"));
        assert!(buffer.is_empty());

        drop(buffer);
        let stats = forwarder.await.unwrap();

        assert_eq!(stats, ForwardStats { written: 2, failed: 1 });
        assert_eq!(*writer.messages.lock(), vec!["kept", "trigger"]);
    }

    #[tokio::test]
    async fn test_multiple_releases_stay_ordered() {
        let writer = Arc::new(RecordingWriter::default());
        let (sink, forwarder) = ChannelSink::spawn(writer.clone());
        let buffer =
            TriggeredBufferService::new(&BufferConfig::new(2, "Error"), Arc::new(sink)).unwrap();

        buffer.admit(event(LogLevel::Info, "a"));
        buffer.admit(event(LogLevel::Fatal, "b"));
        buffer.admit(event(LogLevel::Info, "c"));
        buffer.admit(event(LogLevel::Info, "d"));
        buffer.admit(event(LogLevel::Info, "e"));
        buffer.admit(event(LogLevel::Error, "f"));

        drop(buffer);
        forwarder.await.unwrap();

        assert_eq!(*writer.messages.lock(), vec!["a", "b", "d", "e", "f"]);
    }

    #[test]
    fn test_boxed_sink_is_accepted() {
        let memory = Arc::new(InMemorySink::new());
        let boxed: Box<dyn LogSink> = Box::new(memory.clone());
        let buffer =
            TriggeredBufferService::new(&BufferConfig::default(), Arc::new(boxed)).unwrap();

        buffer.admit(event(LogLevel::Warn, "held"));
        assert!(memory.is_empty());

        buffer.admit(event(LogLevel::Error, "release"));
        assert_eq!(memory.len(), 2);
    }

    /// Shared buffer for formatted `tracing` output.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_tracing_sink_releases_through_subscriber() {
        let out = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(out.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let buffer = TriggeredBufferService::new(
                &BufferConfig::new(4, "Warn"),
                Arc::new(TracingSink::new()),
            )
            .unwrap();
            for (i, level) in LogLevel::ALL.into_iter().enumerate() {
                buffer.admit(event(level, &format!("msg-{i}")));
            }
            assert!(buffer.is_empty());
        });

        let output = String::from_utf8(out.0.lock().clone()).unwrap();
        let released: Vec<&str> = output
            .lines()
            .filter(|line| line.contains("log_relay::released"))
            .collect();

        // Trace..Warn leave on the Warn trigger; Error, Fatal and Off each trigger alone.
        let expected = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR", "ERROR", "ERROR"];
        assert_eq!(released.len(), expected.len(), "{output}");
        for (i, (line, level)) in released.iter().zip(expected).enumerate() {
            assert!(line.contains(&format!("msg-{i}")), "{line}");
            assert!(line.contains(level), "{line}");
            assert!(line.contains("logger=pipeline"), "{line}");
        }
    }
}

//! # Concurrent Admission
//!
//! Many threads admit into one buffer at once. Because every admission runs
//! under the buffer's lock, the outcome must look like some serial order of
//! the same admissions:
//!
//! - every admitted event is released, evicted or still pending, exactly once
//! - triggering events are always released
//! - each thread's events leave in the order that thread admitted them
//! - the capacity bound is never observed exceeded

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use std::thread;

    use rand::Rng;
    use relay_types::{LogEvent, LogLevel};
    use triggered_buffer::{
        BufferConfig, BufferMetrics, InMemorySink, TriggeredBufferApi, TriggeredBufferService,
    };
    use uuid::Uuid;

    const THREADS: usize = 8;
    const EVENTS_PER_THREAD: usize = 2_000;
    const QUEUE_SIZE: i64 = 16;

    fn random_level(rng: &mut impl Rng) -> LogLevel {
        // Mostly noise, with the occasional trigger.
        match rng.gen_range(0..100) {
            0..=29 => LogLevel::Trace,
            30..=59 => LogLevel::Debug,
            60..=84 => LogLevel::Info,
            85..=96 => LogLevel::Warn,
            97..=98 => LogLevel::Error,
            _ => LogLevel::Fatal,
        }
    }

    fn seq_of(event: &LogEvent) -> (usize, usize) {
        let thread = event.properties["thread"].parse().unwrap();
        let seq = event.properties["seq"].parse().unwrap();
        (thread, seq)
    }

    #[test]
    fn test_concurrent_admitters_conserve_events() {
        let sink = Arc::new(InMemorySink::new());
        let metrics = Arc::new(BufferMetrics::new());
        let buffer = Arc::new(
            TriggeredBufferService::with_metrics(
                &BufferConfig::new(QUEUE_SIZE, "Error"),
                sink.clone(),
                metrics.clone(),
            )
            .unwrap(),
        );

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let buffer = buffer.clone();
                thread::spawn(move || {
                    let mut rng = rand::thread_rng();
                    let mut triggers = Vec::new();

                    for seq in 0..EVENTS_PER_THREAD {
                        let level = random_level(&mut rng);
                        let event = LogEvent::new(level, format!("worker-{t}"), "work")
                            .with_property("thread", t.to_string())
                            .with_property("seq", seq.to_string());
                        if level >= LogLevel::Error {
                            triggers.push(event.id);
                        }

                        buffer.admit(event);
                        assert!(buffer.len() <= QUEUE_SIZE as usize);
                    }

                    triggers
                })
            })
            .collect();

        let triggers: Vec<Uuid> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        let delivered = sink.events();
        let pending = buffer.pending();
        let snapshot = metrics.snapshot();
        let total = (THREADS * EVENTS_PER_THREAD) as u64;

        // Conservation: delivered + evicted + pending == admitted
        assert_eq!(snapshot.admitted, total);
        assert_eq!(snapshot.drained, delivered.len() as u64);
        assert_eq!(
            delivered.len() as u64 + snapshot.evicted + pending.len() as u64,
            total
        );
        assert!(pending.len() <= QUEUE_SIZE as usize);

        // No duplicates between or within delivered and pending
        let mut seen = HashSet::new();
        for event in delivered.iter().chain(pending.iter()) {
            assert!(seen.insert(event.id), "event {} seen twice", event.id);
        }

        // Triggering events are never evicted
        let delivered_ids: HashSet<Uuid> = delivered.iter().map(|e| e.id).collect();
        for id in &triggers {
            assert!(delivered_ids.contains(id), "trigger {id} was not delivered");
        }
        assert_eq!(snapshot.triggers, triggers.len() as u64);

        // Per-thread arrival order survives interleaving
        let mut last_seq: HashMap<usize, usize> = HashMap::new();
        for event in delivered.iter().chain(pending.iter()) {
            let (thread, seq) = seq_of(event);
            if let Some(prev) = last_seq.insert(thread, seq) {
                assert!(prev < seq, "thread {thread}: seq {seq} after {prev}");
            }
        }
    }

    #[test]
    fn test_concurrent_admitters_with_zero_capacity() {
        let sink = Arc::new(InMemorySink::new());
        let buffer = Arc::new(
            TriggeredBufferService::new(&BufferConfig::new(0, "Warn"), sink.clone()).unwrap(),
        );

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let buffer = buffer.clone();
                thread::spawn(move || {
                    for i in 0..500 {
                        let level = if i % 5 == 0 { LogLevel::Warn } else { LogLevel::Info };
                        buffer.admit(LogEvent::new(level, format!("worker-{t}"), i.to_string()));
                        assert!(buffer.is_empty());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let delivered = sink.events();
        assert_eq!(delivered.len(), 4 * 100);
        assert!(delivered.iter().all(|e| e.level == LogLevel::Warn));
    }
}

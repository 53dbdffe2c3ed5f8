//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - Config file -> dispatcher construction -> emission
//! - Delivery ordering under concurrent subscription
//! - Fire-and-forget emission observed through a completion handle

#[cfg(test)]
mod config_tests {
    use std::io::Write;

    use config_loader::ConfigLoader;
    use contracts::{Context, DispatchStrategy, HandlerError, Priority};
    use dispatcher::{Dispatcher, EmitError};

    struct Job;

    fn failing(msg: &'static str) -> impl Fn(&Context, &Job) -> Result<(), HandlerError> + Send + Sync {
        move |_, _| Err(msg.into())
    }

    #[test]
    fn test_best_effort_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[dispatcher]\nstrategy = \"best_effort\"").unwrap();

        let config = ConfigLoader::load_from_path(file.path()).unwrap();
        let bus = Dispatcher::with_config(config.dispatcher);
        assert_eq!(bus.strategy(), DispatchStrategy::BestEffort);

        bus.subscribe_with_priority(failing("a"), Priority::HIGH);
        bus.subscribe_with_priority(failing("b"), Priority::LOW);

        let err = bus.emit(&Context::background(), Job).unwrap_err();
        assert!(matches!(err, EmitError::Joined(_)));
        assert_eq!(err.to_string(), "a\nb");
    }

    #[test]
    fn test_missing_dispatcher_section_is_fail_fast() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "observability": {{ "log_level": "debug" }} }}"#).unwrap();

        let config = ConfigLoader::load_from_path(file.path()).unwrap();
        let bus = Dispatcher::with_config(config.dispatcher);

        bus.subscribe_with_priority(failing("first"), Priority::HIGH);
        bus.subscribe_with_priority(failing("second"), Priority::LOW);

        let err = bus.emit(&Context::background(), Job).unwrap_err();
        assert_eq!(err.to_string(), "first");
        assert_eq!(bus.metrics().invocation_count, 1);
    }
}

#[cfg(test)]
mod dispatch_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc, Barrier, Mutex};
    use std::thread;
    use std::time::Duration;

    use contracts::{Context, HandlerError, Priority};
    use dispatcher::Dispatcher;

    #[derive(Debug)]
    struct OrderPlaced {
        id: u64,
    }

    trait Auditable: Send + Sync {
        fn audit_id(&self) -> u64;
    }

    impl Auditable for OrderPlaced {
        fn audit_id(&self) -> u64 {
            self.id
        }
    }

    #[test]
    fn test_shuffled_priorities_run_descending() {
        let bus = Dispatcher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for p in [3, -7, 42, 0, 100, -100, 8] {
            let seen = Arc::clone(&seen);
            bus.subscribe_with_priority(
                move |_: &Context, _: &OrderPlaced| -> Result<(), HandlerError> {
                    seen.lock().unwrap().push(p);
                    Ok(())
                },
                p,
            );
        }

        bus.emit(&Context::background(), OrderPlaced { id: 1 }).unwrap();
        assert_eq!(*seen.lock().unwrap(), [100, 42, 8, 3, 0, -7, -100]);
    }

    #[test]
    fn test_arc_trait_object_keys() {
        let bus = Dispatcher::new();
        let concrete = Arc::new(AtomicUsize::new(0));
        let abstract_ = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&concrete);
        bus.subscribe(move |_: &Context, _: &OrderPlaced| -> Result<(), HandlerError> {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let a = Arc::clone(&abstract_);
        bus.subscribe(
            move |_: &Context, e: &Arc<dyn Auditable>| -> Result<(), HandlerError> {
                assert_eq!(e.audit_id(), 9);
                a.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        );

        let handle: Arc<dyn Auditable> = Arc::new(OrderPlaced { id: 9 });
        bus.emit(&Context::background(), handle).unwrap();
        assert_eq!(concrete.load(Ordering::SeqCst), 0);
        assert_eq!(abstract_.load(Ordering::SeqCst), 1);

        bus.emit(&Context::background(), OrderPlaced { id: 9 }).unwrap();
        assert_eq!(concrete.load(Ordering::SeqCst), 1);
        assert_eq!(abstract_.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_subscribe_and_emit() {
        let bus = Dispatcher::new();
        let threads = 8;
        let per_thread = 25;
        let start = Arc::new(Barrier::new(threads * 2));
        let mut workers = Vec::new();

        for t in 0..threads {
            let sub_bus = bus.clone();
            let sub_start = Arc::clone(&start);
            workers.push(thread::spawn(move || {
                sub_start.wait();
                for i in 0..per_thread {
                    let priority = ((t * per_thread + i) % 13) as i32 - 6;
                    sub_bus.subscribe_with_priority(
                        move |_: &Context, seen: &Mutex<Vec<i32>>| -> Result<(), HandlerError> {
                            seen.lock().unwrap().push(priority);
                            Ok(())
                        },
                        priority,
                    );
                }
            }));

            let emit_bus = bus.clone();
            let emit_start = Arc::clone(&start);
            workers.push(thread::spawn(move || {
                emit_start.wait();
                for _ in 0..per_thread {
                    let seen = Mutex::new(Vec::<i32>::new());
                    emit_bus.emit_ref(&Context::background(), &seen).unwrap();
                    let seen = seen.into_inner().unwrap();
                    // every snapshot is fully sorted
                    assert!(seen.windows(2).all(|w| w[0] >= w[1]));
                }
            }));
        }

        for w in workers {
            w.join().unwrap();
        }
        assert_eq!(bus.subscriber_count::<Mutex<Vec<i32>>>(), threads * per_thread);
    }

    #[test]
    fn test_emit_async_signals_completion() {
        let bus = Dispatcher::new();
        let (done_tx, done_rx) = mpsc::channel();
        let done_tx = Mutex::new(done_tx);

        bus.subscribe(move |_: &Context, e: &OrderPlaced| -> Result<(), HandlerError> {
            thread::sleep(Duration::from_millis(20));
            done_tx.lock().unwrap().send(e.id)?;
            Ok(())
        });

        bus.emit_async(Context::background(), OrderPlaced { id: 77 });
        // returned before the handler finished sleeping
        assert!(done_rx.try_recv().is_err());

        let id = done_rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(id, 77);
    }

    #[tokio::test]
    async fn test_emit_async_from_runtime() {
        let bus = Dispatcher::new();
        let done = Arc::new(tokio::sync::Notify::new());
        let notifier = Arc::clone(&done);

        bus.subscribe_with_priority(
            move |_: &Context, _: &OrderPlaced| -> Result<(), HandlerError> {
                notifier.notify_one();
                Ok(())
            },
            Priority::HIGH,
        );

        bus.emit_async(Context::background(), OrderPlaced { id: 1 });
        tokio::time::timeout(Duration::from_secs(1), done.notified())
            .await
            .unwrap();
    }
}

#[cfg(test)]
mod default_dispatcher_tests {
    use std::sync::mpsc;
    use std::sync::Mutex;
    use std::time::Duration;

    use contracts::{Context, DispatchStrategy, HandlerError};

    struct DefaultBusPing;

    #[test]
    fn test_default_dispatcher_free_functions() {
        assert_eq!(
            dispatcher::default_dispatcher().strategy(),
            DispatchStrategy::StopOnFirstError
        );

        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        dispatcher::subscribe(move |_: &Context, _: &DefaultBusPing| -> Result<(), HandlerError> {
            tx.lock().unwrap().send(())?;
            Ok(())
        });

        dispatcher::emit(&Context::background(), DefaultBusPing).unwrap();
        rx.recv_timeout(Duration::from_secs(1)).unwrap();

        dispatcher::emit_async(Context::background(), DefaultBusPing);
        rx.recv_timeout(Duration::from_secs(1)).unwrap();
    }
}

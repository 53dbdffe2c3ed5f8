//! `run` command implementation.
//!
//! Registers a high priority logger and a slower normal priority worker for
//! [`LogEvent`], emits once synchronously and once asynchronously, and waits
//! for the background delivery to finish.

use anyhow::{Context as _, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use contracts::{Context, HandlerError, Priority};
use dispatcher::{Dispatcher, DispatcherBuilder, EmitError};

use super::load_config;
use crate::cli::RunArgs;

/// Demo payload
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub message: String,
}

impl LogEvent {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

const SYNC_MESSAGE: &str = "System booted";
const ASYNC_MESSAGE: &str = "Heavy background task";

/// Execute the `run` command
pub async fn run_demo(args: &RunArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let mut builder = DispatcherBuilder::from_config(config.dispatcher);
    if let Some(strategy) = args.strategy {
        info!(strategy = ?strategy, "Overriding dispatch strategy from CLI");
        builder = builder.strategy(strategy.into());
    }
    let dispatcher = builder.build();
    info!(strategy = %dispatcher.strategy(), "Dispatcher ready");

    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<String>();
    register_handlers(&dispatcher, args, done_tx);

    let ctx = Context::background();

    println!("--- Synchronous Emit ---");
    let sync_dispatcher = dispatcher.clone();
    let sync_ctx = ctx.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        sync_dispatcher.emit(&sync_ctx, LogEvent::new(SYNC_MESSAGE))
    })
    .await
    .context("Synchronous emit panicked")?;
    report_outcome(outcome);

    println!("\n--- Asynchronous Emit ---");
    dispatcher.emit_async(ctx.clone(), LogEvent::new(ASYNC_MESSAGE));
    println!("Main thread continues immediately...");

    let wait = async {
        while let Some(message) = done_rx.recv().await {
            if message == ASYNC_MESSAGE {
                return true;
            }
        }
        false
    };

    tokio::select! {
        finished = tokio::time::timeout(Duration::from_secs(args.timeout), wait) => {
            match finished {
                Ok(true) => println!("Done."),
                Ok(false) => warn!("Background worker channel closed early"),
                Err(_) => anyhow::bail!("Timed out after {}s waiting for async emit", args.timeout),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Received Ctrl+C, cancelling handlers");
            ctx.cancel();
        }
    }

    let metrics = dispatcher.metrics();
    info!(
        emits = metrics.emit_count,
        async_emits = metrics.async_emit_count,
        invocations = metrics.invocation_count,
        failures = metrics.failure_count,
        "Demo finished"
    );
    Ok(())
}

fn register_handlers(dispatcher: &Dispatcher, args: &RunArgs, done_tx: mpsc::UnboundedSender<String>) {
    dispatcher.subscribe_with_priority(
        |_: &Context, e: &LogEvent| -> Result<(), HandlerError> {
            println!("[Logger] Log received: {}", e.message);
            Ok(())
        },
        Priority::HIGH,
    );

    let work = Duration::from_millis(args.work_ms);
    dispatcher.subscribe(move |ctx: &Context, e: &LogEvent| -> Result<(), HandlerError> {
        simulate_work(ctx, work);
        if ctx.is_cancelled() {
            return Err(format!("worker cancelled before finishing '{}'", e.message).into());
        }
        println!("[Worker] Background worker finished: {}", e.message);
        done_tx.send(e.message.clone())?;
        Ok(())
    });

    for i in 0..args.failing_handlers {
        dispatcher.subscribe_with_priority(
            move |_: &Context, e: &LogEvent| -> Result<(), HandlerError> {
                Err(format!("failing handler #{i} rejected '{}'", e.message).into())
            },
            Priority::LOW,
        );
    }
}

/// Sleep in short slices so cancellation is noticed promptly
fn simulate_work(ctx: &Context, total: Duration) {
    let step = Duration::from_millis(10);
    let mut elapsed = Duration::ZERO;
    while elapsed < total && !ctx.is_cancelled() {
        std::thread::sleep(step);
        elapsed += step;
    }
}

fn report_outcome(outcome: Result<(), EmitError>) {
    match outcome {
        Ok(()) => println!("All handlers succeeded"),
        Err(e) => {
            println!("{} handler(s) failed:", e.failure_count());
            for cause in e.handler_errors() {
                println!("  - {cause}");
            }
        }
    }
}

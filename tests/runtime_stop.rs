// tests/runtime_stop.rs

mod common;
use crate::common::{DIR, WatchConfigBuilder, engine, init_tracing, mock_dir, path};

use std::error::Error;
use std::time::Duration;

use dirwatcher::engine::{RunPhase, Runtime, RuntimeOptions, WatchEvent, stop_channel};
use dirwatcher_test_utils::recording_sink::RecordingSink;
use dirwatcher_test_utils::with_timeout;

type TestResult = Result<(), Box<dyn Error>>;

fn options(poll_interval: Duration, max_cycles: Option<u64>) -> RuntimeOptions {
    RuntimeOptions {
        poll_interval,
        max_cycles,
    }
}

#[tokio::test]
async fn once_runs_a_single_cycle_and_reports_start_and_stop() -> TestResult {
    init_tracing();
    let fs = mock_dir();
    fs.add_file(path("a.txt"), "ERROR\n");

    let (_handle, stop) = stop_channel();
    let sink = RecordingSink::new();
    let runtime = Runtime::new(
        engine(&fs, "ERROR"),
        stop,
        sink.clone(),
        options(Duration::from_secs(60), Some(1)),
    );

    let summary = with_timeout(runtime.run()).await?;

    assert_eq!(summary.cycles, 1);
    assert_eq!(summary.matches, 1);
    assert_eq!(summary.phase, RunPhase::Stopped);

    let events = sink.events();
    assert!(matches!(events.first(), Some(WatchEvent::RunStarted { .. })));
    assert!(matches!(events.last(), Some(WatchEvent::RunStopped { .. })));
    assert_eq!(sink.magic_found(), vec![("a.txt".to_string(), 1)]);
    Ok(())
}

#[tokio::test]
async fn stop_during_long_sleep_ends_the_loop_promptly() -> TestResult {
    init_tracing();
    let fs = mock_dir();
    fs.add_file(path("a.txt"), "ok\n");

    let (handle, stop) = stop_channel();
    let sink = RecordingSink::new();
    let runtime = Runtime::new(
        engine(&fs, "ERROR"),
        stop,
        sink.clone(),
        options(Duration::from_secs(3600), None),
    );

    let task = tokio::spawn(runtime.run());

    // Wait for the first cycle to be reported, then interrupt the sleep.
    with_timeout(async {
        while sink.count(|e| matches!(e, WatchEvent::FileAdded { .. })) == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    handle.request_stop();

    let summary = with_timeout(task).await??;
    assert_eq!(summary.cycles, 1);
    assert_eq!(summary.phase, RunPhase::Stopped);
    assert!(summary.uptime < Duration::from_secs(5));
    assert_eq!(
        sink.count(|e| matches!(e, WatchEvent::RunStopped { .. })),
        1
    );
    Ok(())
}

#[tokio::test]
async fn stop_requested_before_start_runs_no_cycle() -> TestResult {
    init_tracing();
    let fs = mock_dir();
    fs.add_file(path("a.txt"), "ERROR\n");

    let (handle, stop) = stop_channel();
    handle.request_stop();
    let sink = RecordingSink::new();
    let runtime = Runtime::new(
        engine(&fs, "ERROR"),
        stop,
        sink.clone(),
        options(Duration::from_millis(10), None),
    );

    let summary = with_timeout(runtime.run()).await?;
    assert_eq!(summary.cycles, 0);
    assert!(sink.magic_found().is_empty());
    assert_eq!(sink.events().len(), 2);
    Ok(())
}

#[tokio::test]
async fn appended_lines_are_picked_up_across_cycles() -> TestResult {
    init_tracing();
    let fs = mock_dir();
    fs.add_file(path("a.txt"), "one\ntwo\n");

    let (handle, stop) = stop_channel();
    let sink = RecordingSink::new();
    let runtime = Runtime::new(
        engine(&fs, "ERROR"),
        stop,
        sink.clone(),
        options(Duration::from_millis(10), None),
    );
    let task = tokio::spawn(runtime.run());

    with_timeout(async {
        while sink.count(|e| matches!(e, WatchEvent::FileAdded { .. })) == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    fs.append(path("a.txt"), "ERROR here\n");

    with_timeout(async {
        while sink.magic_found().is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    // Let a few more cycles pass to show the line is not reported twice.
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.request_stop();

    let summary = with_timeout(task).await??;
    assert!(summary.cycles >= 2);
    assert_eq!(sink.magic_found(), vec![("a.txt".to_string(), 3)]);
    assert_eq!(summary.matches, 1);
    Ok(())
}

#[tokio::test]
async fn listing_errors_do_not_end_the_loop() -> TestResult {
    init_tracing();
    let fs = mock_dir();
    fs.fail(DIR, std::io::ErrorKind::Other);

    let (_handle, stop) = stop_channel();
    let sink = RecordingSink::new();
    let config = WatchConfigBuilder::new(DIR, "ERROR").build();
    let runtime = Runtime::new(
        common::engine_with(&fs, config),
        stop,
        sink.clone(),
        options(Duration::from_millis(1), Some(3)),
    );

    let summary = with_timeout(runtime.run()).await?;
    assert_eq!(summary.cycles, 3);
    assert_eq!(
        sink.count(|e| matches!(e, WatchEvent::CycleError { .. })),
        3
    );
    Ok(())
}

#[tokio::test]
async fn panicking_read_does_not_lose_add_events() -> TestResult {
    init_tracing();
    let fs = mock_dir();
    fs.add_file(path("a.txt"), "ok\n");
    fs.add_file(path("b.txt"), "ok\n");

    let (_handle, stop) = stop_channel();
    let sink = RecordingSink::new();
    let runtime = Runtime::new(
        common::panicking_engine(&fs, "ERROR", "b.txt"),
        stop,
        sink.clone(),
        options(Duration::from_millis(1), Some(2)),
    );

    let summary = with_timeout(runtime.run()).await?;
    assert_eq!(summary.cycles, 2);
    assert_eq!(sink.count(|e| matches!(e, WatchEvent::FileAdded { .. })), 2);
    assert_eq!(sink.count(|e| matches!(e, WatchEvent::ScanError { .. })), 2);
    assert_eq!(sink.count(|e| matches!(e, WatchEvent::CycleError { .. })), 0);
    Ok(())
}

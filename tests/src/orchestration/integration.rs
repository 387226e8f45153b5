use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use pingrid_common::catalog::builtin_hosts;
use pingrid_common::dialect::Diagnostic;
use pingrid_common::host::Host;
use pingrid_core::error::ProbeError;
use pingrid_core::orchestrator::Orchestrator;
use pingrid_core::table::{ResultTable, SlotStatus};

use super::support::{
    Delay, FailingRenderer, MockRunner, RecordingRenderer, path_trace_text, reachability_text,
};

fn hosts(n: usize) -> Vec<Host> {
    (0..n).map(|i| Host::new(format!("10.0.0.{i}"))).collect()
}

async fn run_with(
    runner: Arc<MockRunner>,
    hosts: Vec<Host>,
) -> (Result<ResultTable, ProbeError>, RecordingRenderer) {
    let renderer = RecordingRenderer::default();
    let orchestrator = Orchestrator::new(runner, Box::new(renderer.clone()));
    (orchestrator.run(hosts).await, renderer)
}

#[tokio::test]
async fn single_host_ends_with_both_outputs() {
    let runner = Arc::new(MockRunner::new(Delay::Fixed(Duration::from_millis(10))));
    let host = Host::with_dns("A", false);

    let start = Instant::now();
    let (result, renderer) = run_with(runner, vec![host.clone()]).await;
    let elapsed = start.elapsed();

    let table = result.expect("run failed");
    assert!(elapsed < Duration::from_secs(2), "run took {elapsed:?}");

    let snapshot = table.snapshot();
    assert_eq!(snapshot.len(), 1);
    let expected = format!("{}\n{}", reachability_text(&host), path_trace_text(&host));
    assert!(snapshot[0].contains(&expected), "unexpected slot text: {}", snapshot[0]);

    assert_eq!(renderer.frames().last(), Some(&snapshot));
}

#[tokio::test]
async fn every_slot_is_done_when_run_returns() {
    for n in [1, 5, 16] {
        let runner = Arc::new(MockRunner::new(Delay::RandomMs(1, 25)));
        let (result, _) = run_with(runner.clone(), hosts(n)).await;
        let table = result.expect("run failed");

        assert_eq!(table.len(), n);
        assert!(table.is_complete(), "not every slot finished for n = {n}");
        assert_eq!(runner.finished.load(Ordering::SeqCst), n);
    }
}

#[tokio::test]
async fn slot_index_matches_catalog_order_in_every_frame() {
    let mut catalog = builtin_hosts();
    catalog.push(Host::new("1.1.1.1"));
    let runner = Arc::new(MockRunner::new(Delay::RandomMs(1, 20)));

    let (result, renderer) = run_with(runner, catalog.clone()).await;
    let table = result.expect("run failed");

    for (idx, slot) in table.iter().enumerate() {
        assert_eq!(slot.index, idx);
        assert_eq!(slot.host, catalog[idx]);
        assert_eq!(slot.status, SlotStatus::Done);
    }

    let frames = renderer.frames();
    assert!(frames.len() >= 2, "expected progressive redraws");
    for frame in &frames {
        assert_eq!(frame.len(), catalog.len());
        for (idx, text) in frame.iter().enumerate() {
            assert!(text.starts_with(catalog[idx].address()), "slot {idx} moved: {text}");
        }
    }
}

#[tokio::test]
async fn first_frame_shows_every_slot_pending() {
    let runner = Arc::new(MockRunner::new(Delay::Fixed(Duration::from_millis(5))));
    let (result, renderer) = run_with(runner, hosts(3)).await;
    result.expect("run failed");

    let frames = renderer.frames();
    assert!(frames[0].iter().all(|text| text.ends_with("[pending]")));
}

#[tokio::test]
async fn reachability_runs_before_path_trace_for_each_host() {
    let runner = Arc::new(MockRunner::new(Delay::RandomMs(1, 10)));
    let (result, _) = run_with(runner.clone(), hosts(6)).await;
    result.expect("run failed");

    let calls = runner.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 12);
    for host in hosts(6) {
        let order: Vec<Diagnostic> = calls
            .iter()
            .filter(|(address, _)| address == host.address())
            .map(|(_, diagnostic)| *diagnostic)
            .collect();
        assert_eq!(order, vec![Diagnostic::Reachability, Diagnostic::PathTrace]);
    }
}

#[tokio::test]
async fn hosts_are_probed_concurrently() {
    let runner = Arc::new(MockRunner::new(Delay::Fixed(Duration::from_millis(100))));

    let start = Instant::now();
    let (result, _) = run_with(runner, hosts(10)).await;
    let elapsed = start.elapsed();

    result.expect("run failed");
    // Sequential probing would take about two seconds.
    assert!(elapsed < Duration::from_secs(1), "run took {elapsed:?}");
}

#[tokio::test]
async fn spawn_failure_aborts_remaining_hosts() {
    let runner = Arc::new(
        MockRunner::new(Delay::Fixed(Duration::from_millis(1)))
            .unspawnable("10.0.0.0")
            .slow_host("10.0.0.2", Duration::from_secs(30)),
    );

    let start = Instant::now();
    let (result, renderer) = run_with(runner.clone(), hosts(3)).await;

    match result {
        Err(ProbeError::Spawn { host, .. }) => assert_eq!(host, "10.0.0.0"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("run should fail when a host cannot be spawned"),
    }
    assert!(start.elapsed() < Duration::from_secs(5), "slow host was not cancelled");
    assert!(runner.finished.load(Ordering::SeqCst) < 3);

    let last = renderer.frames().pop().expect("no frame drawn");
    assert!(!last[2].contains("[done]"));
}

#[tokio::test]
async fn closed_terminal_stops_slow_hosts() {
    let runner = Arc::new(
        MockRunner::new(Delay::Fixed(Duration::from_millis(1)))
            .slow_host("10.0.0.1", Duration::from_secs(3)),
    );
    let orchestrator = Orchestrator::new(runner.clone(), Box::new(FailingRenderer));

    let start = Instant::now();
    let result = orchestrator.run(hosts(2)).await;

    assert!(matches!(result, Err(ProbeError::Render(_))), "unexpected result: {result:?}");
    assert!(start.elapsed() < Duration::from_secs(2), "slow host kept the run alive");
    assert!(runner.finished.load(Ordering::SeqCst) < 2);
}

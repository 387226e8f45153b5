use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pingrid_common::dialect::Diagnostic;
use pingrid_common::host::Host;
use pingrid_core::diagnostics::DiagnosticRunner;
use pingrid_core::error::ProbeError;
use pingrid_core::render::FrameRenderer;
use pingrid_core::table::SlotView;

pub enum Delay {
    Fixed(Duration),
    /// Uniformly random per call, in milliseconds.
    RandomMs(u64, u64),
}

/// Deterministic stand-in for the process-backed runner.
pub struct MockRunner {
    delay: Delay,
    slow: HashMap<String, Duration>,
    unspawnable: Option<String>,
    pub calls: Mutex<Vec<(String, Diagnostic)>>,
    pub finished: AtomicUsize,
}

impl MockRunner {
    pub fn new(delay: Delay) -> Self {
        Self {
            delay,
            slow: HashMap::new(),
            unspawnable: None,
            calls: Mutex::new(Vec::new()),
            finished: AtomicUsize::new(0),
        }
    }

    pub fn slow_host(mut self, address: &str, delay: Duration) -> Self {
        self.slow.insert(address.to_string(), delay);
        self
    }

    /// Every diagnostic for `address` fails as if the tool were missing.
    pub fn unspawnable(mut self, address: &str) -> Self {
        self.unspawnable = Some(address.to_string());
        self
    }

    fn delay_for(&self, host: &Host) -> Duration {
        if let Some(delay) = self.slow.get(host.address()) {
            return *delay;
        }
        match self.delay {
            Delay::Fixed(delay) => delay,
            Delay::RandomMs(low, high) => Duration::from_millis(rand::random_range(low..=high)),
        }
    }
}

pub fn reachability_text(host: &Host) -> String {
    format!("PING {host}\n3 packets transmitted, 3 received")
}

pub fn path_trace_text(host: &Host) -> String {
    format!("traceroute to {host}\n 1  gateway\n 2  {host}")
}

#[async_trait]
impl DiagnosticRunner for MockRunner {
    async fn run(&self, diagnostic: Diagnostic, host: &Host) -> Result<String, ProbeError> {
        self.calls
            .lock()
            .unwrap()
            .push((host.address().to_string(), diagnostic));

        if self.unspawnable.as_deref() == Some(host.address()) {
            return Err(ProbeError::Spawn {
                program: "ping".to_string(),
                host: host.address().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            });
        }

        tokio::time::sleep(self.delay_for(host)).await;

        match diagnostic {
            Diagnostic::Reachability => Ok(reachability_text(host)),
            Diagnostic::PathTrace => {
                self.finished.fetch_add(1, Ordering::SeqCst);
                Ok(path_trace_text(host))
            }
        }
    }
}

/// Keeps every frame it is asked to draw.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    frames: Arc<Mutex<Vec<Vec<String>>>>,
}

impl RecordingRenderer {
    pub fn frames(&self) -> Vec<Vec<String>> {
        self.frames.lock().unwrap().clone()
    }
}

impl FrameRenderer for RecordingRenderer {
    fn render(&mut self, frame: &[SlotView]) -> io::Result<()> {
        let texts = frame.iter().map(|slot| slot.text.clone()).collect();
        self.frames.lock().unwrap().push(texts);
        Ok(())
    }
}

/// Fails on the first frame, as a closed terminal would.
pub struct FailingRenderer;

impl FrameRenderer for FailingRenderer {
    fn render(&mut self, _frame: &[SlotView]) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal went away"))
    }
}

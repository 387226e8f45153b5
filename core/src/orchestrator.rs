//! # Probe Orchestration
//!
//! Every host gets its own task. Tasks never touch the table directly: they
//! report progress as [`SlotEvent`]s over a channel, and a single rendering
//! task owns both the [`ResultTable`] and the [`FrameRenderer`]. That keeps
//! the terminal single-writer and every frame consistent.
//!
//! The first failure wins, whether it comes from a probe task or from the
//! rendering task: the remaining probes are aborted (their child processes
//! are killed on drop) and that error is returned.

use std::sync::Arc;

use pingrid_common::dialect::Diagnostic;
use pingrid_common::host::Host;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::{JoinError, JoinSet};
use tracing::{Instrument, debug, error, info_span};

use crate::diagnostics::DiagnosticRunner;
use crate::error::ProbeError;
use crate::render::FrameRenderer;
use crate::table::{ResultTable, SlotEvent, SlotUpdate};

pub struct Orchestrator {
    diagnostics: Arc<dyn DiagnosticRunner>,
    renderer: Box<dyn FrameRenderer + Send>,
}

impl Orchestrator {
    pub fn new(
        diagnostics: Arc<dyn DiagnosticRunner>,
        renderer: Box<dyn FrameRenderer + Send>,
    ) -> Self {
        Self {
            diagnostics,
            renderer,
        }
    }

    /// Probes every host concurrently and returns the final table.
    ///
    /// Returns only once every probe task has finished and the last frame
    /// has been drawn, or as soon as any of them fails.
    pub async fn run(self, hosts: Vec<Host>) -> Result<ResultTable, ProbeError> {
        let table = ResultTable::new(&hosts);
        let (tx, rx) = mpsc::unbounded_channel::<SlotEvent>();
        let mut drawing = tokio::spawn(render_loop(table, self.renderer, rx));

        let mut probes: JoinSet<Result<(), ProbeError>> = JoinSet::new();
        for (index, host) in hosts.into_iter().enumerate() {
            let span = info_span!("probe", index, host = %host);
            let unit = probe_host(index, host, self.diagnostics.clone(), tx.clone());
            probes.spawn(unit.instrument(span));
        }
        drop(tx);

        let mut failure: Option<ProbeError> = None;
        let mut drawn: Option<ResultTable> = None;
        let mut drawing_done: bool = false;

        loop {
            tokio::select! {
                joined = probes.join_next() => {
                    let Some(joined) = joined else { break };
                    if let Err(e) = flatten(joined) {
                        record_failure(&mut probes, &mut failure, e);
                    }
                }
                finished = &mut drawing, if !drawing_done => {
                    drawing_done = true;
                    match flatten(finished) {
                        Ok(table) => drawn = Some(table),
                        Err(e) => record_failure(&mut probes, &mut failure, e),
                    }
                }
            }
        }

        if !drawing_done {
            match flatten(drawing.await) {
                Ok(table) => drawn = Some(table),
                Err(e) => record_failure(&mut probes, &mut failure, e),
            }
        }

        match (failure, drawn) {
            (Some(e), _) => Err(e),
            (None, Some(table)) => Ok(table),
            (None, None) => unreachable!("rendering task ended without a table or an error"),
        }
    }
}

fn flatten<T>(joined: Result<Result<T, ProbeError>, JoinError>) -> Result<T, ProbeError> {
    joined.map_err(ProbeError::from).and_then(|outcome| outcome)
}

fn record_failure(
    probes: &mut JoinSet<Result<(), ProbeError>>,
    failure: &mut Option<ProbeError>,
    e: ProbeError,
) {
    if failure.is_some() {
        debug!("further error after cancellation: {e}");
        return;
    }
    error!("{e}, cancelling remaining hosts");
    probes.abort_all();
    *failure = Some(e);
}

/// Drives one host through both diagnostics.
///
/// The runner is called once per diagnostic rather than through
/// [`DiagnosticRunner::run_all`] so the reachability result reaches the
/// grid before the path trace starts.
async fn probe_host(
    index: usize,
    host: Host,
    diagnostics: Arc<dyn DiagnosticRunner>,
    tx: UnboundedSender<SlotEvent>,
) -> Result<(), ProbeError> {
    // A closed channel means the renderer stopped; its error surfaces on join.
    let _ = tx.send(SlotEvent::new(index, SlotUpdate::Dispatched));

    let reachability: String = diagnostics.run(Diagnostic::Reachability, &host).await?;
    let _ = tx.send(SlotEvent::new(index, SlotUpdate::Reachability(reachability)));

    let path_trace: String = diagnostics.run(Diagnostic::PathTrace, &host).await?;
    let _ = tx.send(SlotEvent::new(index, SlotUpdate::PathTrace(path_trace)));

    debug!("probe finished");
    Ok(())
}

async fn render_loop(
    mut table: ResultTable,
    mut renderer: Box<dyn FrameRenderer + Send>,
    mut rx: UnboundedReceiver<SlotEvent>,
) -> Result<ResultTable, ProbeError> {
    renderer.render(&table.frame())?;

    while let Some(event) = rx.recv().await {
        table.apply(event);
        while let Ok(queued) = rx.try_recv() {
            table.apply(queued);
        }
        renderer.render(&table.frame())?;
    }

    Ok(table)
}

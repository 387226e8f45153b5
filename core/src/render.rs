use std::io;

use crate::table::SlotView;

/// Draws a full frame from the current table.
///
/// Implementations are only ever driven by the orchestrator's rendering task,
/// so they may own their output exclusively.
pub trait FrameRenderer {
    fn render(&mut self, frame: &[SlotView]) -> io::Result<()>;
}

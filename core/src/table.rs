//! # Result Table
//!
//! One slot per host, indexed in catalog order. The index of a host never
//! changes, so it doubles as its column position in the grid.

use std::fmt;

use pingrid_common::host::Host;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Pending,
    Running,
    Done,
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotStatus::Pending => f.write_str("pending"),
            SlotStatus::Running => f.write_str("running"),
            SlotStatus::Done => f.write_str("done"),
        }
    }
}

/// Progress reported by the task that owns a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotUpdate {
    /// The probe task for this slot has started.
    Dispatched,
    Reachability(String),
    PathTrace(String),
}

/// A [`SlotUpdate`] addressed to a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotEvent {
    pub index: usize,
    pub update: SlotUpdate,
}

impl SlotEvent {
    pub fn new(index: usize, update: SlotUpdate) -> Self {
        Self { index, update }
    }
}

/// What the renderer needs to draw one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub text: String,
    pub requires_dns: bool,
}

#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub index: usize,
    pub host: Host,
    pub status: SlotStatus,
    pub reachability: Option<String>,
    pub path_trace: Option<String>,
}

impl ProbeResult {
    fn new(index: usize, host: Host) -> Self {
        Self {
            index,
            host,
            status: SlotStatus::Pending,
            reachability: None,
            path_trace: None,
        }
    }

    fn apply(&mut self, update: SlotUpdate) {
        match update {
            SlotUpdate::Dispatched => {}
            SlotUpdate::Reachability(text) => self.reachability = Some(text),
            SlotUpdate::PathTrace(text) => self.path_trace = Some(text),
        }

        self.status = if self.reachability.is_some() && self.path_trace.is_some() {
            SlotStatus::Done
        } else {
            SlotStatus::Running
        };
    }

    /// Heading line followed by whatever output has been recorded so far.
    pub fn display_text(&self) -> String {
        let mut text: String = format!("{} [{}]", self.host.address(), self.status);

        for output in [&self.reachability, &self.path_trace].into_iter().flatten() {
            text.push('\n');
            text.push_str(output);
        }

        text
    }

    pub fn view(&self) -> SlotView {
        SlotView {
            text: self.display_text(),
            requires_dns: self.host.requires_dns(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResultTable {
    slots: Vec<ProbeResult>,
}

impl ResultTable {
    /// Creates one pending slot per host, in the given order.
    pub fn new(hosts: &[Host]) -> Self {
        let slots: Vec<ProbeResult> = hosts
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, host)| ProbeResult::new(index, host))
            .collect();
        Self { slots }
    }

    pub fn update(&mut self, index: usize, update: SlotUpdate) {
        match self.slots.get_mut(index) {
            Some(slot) => slot.apply(update),
            None => warn!("dropping update for unknown slot {index}"),
        }
    }

    pub fn apply(&mut self, event: SlotEvent) {
        self.update(event.index, event.update);
    }

    /// Display text of every slot, in index order.
    pub fn snapshot(&self) -> Vec<String> {
        self.slots.iter().map(ProbeResult::display_text).collect()
    }

    /// Same as [`snapshot`](Self::snapshot), with each slot's host kind attached.
    pub fn frame(&self) -> Vec<SlotView> {
        self.slots.iter().map(ProbeResult::view).collect()
    }

    pub fn get(&self, index: usize) -> Option<&ProbeResult> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbeResult> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| slot.status == SlotStatus::Done)
    }
}

//! Outbound notifications.

use lc_core::ParameterSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    Snapshot(ParameterSnapshot),
    ExportRequested,
}

/// Receiver for everything a panel publishes. Exactly one sink per panel.
pub trait PanelSink {
    /// Called after every state-affecting operation with the full current
    /// parameter set.
    fn on_snapshot(&mut self, snapshot: ParameterSnapshot);

    /// Called once per export request. Carries no data: the exporter is
    /// expected to use the most recent snapshot.
    fn on_export_requested(&mut self);
}

impl<F> PanelSink for F
where
    F: FnMut(PanelEvent),
{
    fn on_snapshot(&mut self, snapshot: ParameterSnapshot) {
        self(PanelEvent::Snapshot(snapshot))
    }

    fn on_export_requested(&mut self) {
        self(PanelEvent::ExportRequested)
    }
}

/// Sink that keeps every event in arrival order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<PanelEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PanelEvent] {
        &self.events
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &ParameterSnapshot> {
        self.events.iter().filter_map(|event| match event {
            PanelEvent::Snapshot(snapshot) => Some(snapshot),
            PanelEvent::ExportRequested => None,
        })
    }

    pub fn last_snapshot(&self) -> Option<&ParameterSnapshot> {
        self.snapshots().last()
    }

    pub fn export_requests(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PanelEvent::ExportRequested))
            .count()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn take(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }
}

impl PanelSink for EventLog {
    fn on_snapshot(&mut self, snapshot: ParameterSnapshot) {
        self.events.push(PanelEvent::Snapshot(snapshot));
    }

    fn on_export_requested(&mut self) {
        self.events.push(PanelEvent::ExportRequested);
    }
}

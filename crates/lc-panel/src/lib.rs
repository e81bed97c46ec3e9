//! Parameter panel for the laser-cut exporter.
//!
//! The panel owns the live parameter set and keeps it in step with a preset
//! catalog: selecting a preset overwrites the live values, manual edits
//! detach them from the preset, and every change is published to a sink as
//! an immutable snapshot. Front ends translate their own input events into
//! calls on [`ParameterPanel`].

pub mod choices;
pub mod config;
pub mod error;
pub mod events;
pub mod panel;

// Re-export key types for convenience
pub use choices::build_choices;
pub use config::{DetachPolicy, PanelConfig};
pub use error::{PanelError, PanelResult};
pub use events::{EventLog, PanelEvent, PanelSink};
pub use panel::{BindingState, ParameterPanel};

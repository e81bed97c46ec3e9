//! Preset/parameter synchronization engine.

use lc_catalog::PresetCatalog;
use lc_core::{CUSTOM, Field, FieldValue, ParameterSet, ParameterSnapshot, Selection};
use tracing::{debug, warn};

use crate::choices::build_choices;
use crate::config::{DetachPolicy, PanelConfig};
use crate::error::{PanelError, PanelResult};
use crate::events::PanelSink;

/// Whether the live parameters are tied to a catalog preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// The selection names a catalog preset and the values were produced by it.
    Bound,
    /// The selection is `custom` or names a preset the catalog no longer has.
    Custom,
}

/// Owns the live [`ParameterSet`] and publishes every change to its sink.
///
/// All operations run to completion, snapshot emission included, before
/// returning. Rejected operations leave the state untouched and emit nothing.
pub struct ParameterPanel<S: PanelSink> {
    detach_policy: DetachPolicy,
    catalog: PresetCatalog,
    choices: Vec<String>,
    params: ParameterSet,
    sink: S,
}

impl<S: PanelSink> ParameterPanel<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(PanelConfig::default(), sink)
    }

    pub fn with_config(config: PanelConfig, sink: S) -> Self {
        let catalog = PresetCatalog::empty();
        let mut params = config.defaults;
        params.selection = Selection::Custom;
        Self {
            detach_policy: config.detach_policy,
            choices: build_choices(&catalog),
            catalog,
            params,
            sink,
        }
    }

    /// Take over a new catalog. A non-empty catalog selects and applies its
    /// first preset; an empty one only resets the picker entries.
    pub fn on_catalog_replaced(&mut self, catalog: PresetCatalog) {
        self.choices = build_choices(&catalog);
        self.catalog = catalog;
        debug!(choices = ?self.choices, "preset catalog replaced");

        let Some(first) = self.catalog.first() else {
            debug!(selection = %self.params.selection, "empty catalog, keeping parameters");
            return;
        };
        self.params.apply_preset(first);
        debug!(preset = first.name(), "applied default preset");
        self.emit_snapshot();
    }

    /// Select `custom` or a catalog preset by name.
    pub fn select_preset(&mut self, name: &str) -> PanelResult<()> {
        if name == CUSTOM {
            self.params.selection = Selection::Custom;
            debug!("selection detached to custom");
            self.emit_snapshot();
            return Ok(());
        }

        let Some(preset) = self.catalog.get(name) else {
            warn!(name, "rejected unknown preset selection");
            return Err(PanelError::InvalidPresetSelection {
                name: name.to_string(),
                available: self.choices.clone(),
            });
        };
        self.params.apply_preset(preset);
        debug!(preset = name, "applied preset");
        self.emit_snapshot();
        Ok(())
    }

    /// Overwrite one field, then decide whether the selection survives.
    ///
    /// Values are not range checked. A value of the wrong kind for the field
    /// is rejected before anything changes.
    pub fn edit_field(&mut self, field: Field, value: impl Into<FieldValue>) -> PanelResult<()> {
        let value = value.into();
        debug!(%field, %value, "field edited");
        self.params.set(field, value)?;

        if field.is_preset_attribute() && self.edit_detaches() {
            debug!(from = %self.params.selection, "edit detached selection");
            self.params.selection = Selection::Custom;
        }
        self.emit_snapshot();
        Ok(())
    }

    /// Like [`edit_field`](Self::edit_field) for untyped input such as form
    /// text or command-line overrides.
    pub fn edit_field_raw(&mut self, name: &str, raw: &str) -> PanelResult<()> {
        let field: Field = name.parse()?;
        let value = FieldValue::parse(field, raw)?;
        self.edit_field(field, value)
    }

    /// Ask the exporter to run. The state is not touched.
    pub fn request_export(&mut self) {
        debug!(selection = %self.params.selection, "export requested");
        self.sink.on_export_requested();
    }

    fn edit_detaches(&self) -> bool {
        let Selection::Preset(name) = &self.params.selection else {
            return false;
        };
        match self.detach_policy {
            DetachPolicy::AnyEdit => true,
            DetachPolicy::OnDivergence => self
                .catalog
                .get(name)
                .is_none_or(|preset| !self.params.matches_preset(preset)),
        }
    }

    fn emit_snapshot(&mut self) {
        self.sink.on_snapshot(self.params.snapshot());
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn selection(&self) -> &Selection {
        &self.params.selection
    }

    /// `Bound` only while the selected preset still exists in the catalog.
    /// A selection left over from a replaced catalog reports `Custom`.
    pub fn binding_state(&self) -> BindingState {
        match &self.params.selection {
            Selection::Preset(name) if self.catalog.contains(name) => BindingState::Bound,
            _ => BindingState::Custom,
        }
    }

    /// Picker entries: `custom` followed by the catalog's preset names.
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    pub fn detach_policy(&self) -> DetachPolicy {
        self.detach_policy
    }

    pub fn snapshot(&self) -> ParameterSnapshot {
        self.params.snapshot()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

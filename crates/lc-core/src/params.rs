//! Preset and live parameter records.
//!
//! A [`Preset`] is a named, read-only bundle of cutting parameters. The live
//! [`ParameterSet`] has the same attributes plus a `scale` factor and the
//! current [`Selection`]. Every change to the live set is published as a
//! [`ParameterSnapshot`], an owned copy that can no longer be mutated.

use core::fmt;
use core::ops::Deref;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::field::{Field, FieldValue};
use crate::numeric::{Real, same_measure, sheet_measure};
use crate::{CoreError, CoreResult};

/// Style appended to rendered paths when nothing else is configured.
pub const DEFAULT_STYLE: &str = "stroke:#000000;stroke-width:1px;";

/// Selection sentinel for parameters not bound to any preset.
pub const CUSTOM: &str = "custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointKind {
    Box,
    Tab,
    Slot,
}

impl JointKind {
    pub const ALL: [JointKind; 3] = [JointKind::Box, JointKind::Tab, JointKind::Slot];

    pub fn key(self) -> &'static str {
        match self {
            JointKind::Box => "box",
            JointKind::Tab => "tab",
            JointKind::Slot => "slot",
        }
    }
}

impl FromStr for JointKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box" => Ok(JointKind::Box),
            "tab" | "tabslot" | "tab-and-slot" => Ok(JointKind::Tab),
            "slot" | "slotted" => Ok(JointKind::Slot),
            _ => Err(CoreError::UnknownJoint {
                name: s.to_string(),
            }),
        }
    }
}

/// One component of a joint-fit triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitComponent {
    Clearance,
    Length,
    Inset,
}

impl FitComponent {
    pub const ALL: [FitComponent; 3] = [
        FitComponent::Clearance,
        FitComponent::Length,
        FitComponent::Inset,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FitComponent::Clearance => "clearance",
            FitComponent::Length => "length",
            FitComponent::Inset => "inset",
        }
    }
}

/// How tightly two parts of a joint should mate.
///
/// Each class reads one component of the joint's fit triple:
/// clearance fit → `clearance`, friction fit → `length`, press fit → `inset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitClass {
    Clearance,
    Friction,
    Press,
}

impl FitClass {
    pub fn component(self) -> FitComponent {
        match self {
            FitClass::Clearance => FitComponent::Clearance,
            FitClass::Friction => FitComponent::Length,
            FitClass::Press => FitComponent::Inset,
        }
    }
}

impl FromStr for FitClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clearance" => Ok(FitClass::Clearance),
            "friction" => Ok(FitClass::Friction),
            "press" => Ok(FitClass::Press),
            _ => Err(CoreError::UnknownFit {
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JointFit {
    #[serde(with = "sheet_measure")]
    pub clearance: Real,
    #[serde(with = "sheet_measure")]
    pub length: Real,
    #[serde(with = "sheet_measure")]
    pub inset: Real,
}

impl JointFit {
    pub fn get(&self, component: FitComponent) -> Real {
        match component {
            FitComponent::Clearance => self.clearance,
            FitComponent::Length => self.length,
            FitComponent::Inset => self.inset,
        }
    }

    pub fn set(&mut self, component: FitComponent, value: Real) {
        match component {
            FitComponent::Clearance => self.clearance = value,
            FitComponent::Length => self.length = value,
            FitComponent::Inset => self.inset = value,
        }
    }

    fn same_as(&self, other: &JointFit) -> bool {
        FitComponent::ALL
            .iter()
            .all(|&c| same_measure(self.get(c), other.get(c)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointFits {
    #[serde(rename = "box", default)]
    pub box_joint: JointFit,
    #[serde(default)]
    pub tab: JointFit,
    #[serde(default)]
    pub slot: JointFit,
}

impl JointFits {
    pub fn get(&self, kind: JointKind) -> &JointFit {
        match kind {
            JointKind::Box => &self.box_joint,
            JointKind::Tab => &self.tab,
            JointKind::Slot => &self.slot,
        }
    }

    pub fn get_mut(&mut self, kind: JointKind) -> &mut JointFit {
        match kind {
            JointKind::Box => &mut self.box_joint,
            JointKind::Tab => &mut self.tab,
            JointKind::Slot => &mut self.slot,
        }
    }
}

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

/// Every preset attribute except its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetValues {
    #[serde(default)]
    pub notes: String,
    pub thickness: Real,
    pub sheet_width: Real,
    pub sheet_height: Real,
    pub kerf: Real,
    #[serde(flatten)]
    pub joints: JointFits,
    #[serde(default = "default_style")]
    pub style: String,
}

impl Default for PresetValues {
    fn default() -> Self {
        Self {
            notes: String::new(),
            thickness: 0.0,
            sheet_width: 0.0,
            sheet_height: 0.0,
            kerf: 0.0,
            joints: JointFits::default(),
            style: default_style(),
        }
    }
}

impl PresetValues {
    /// Field-wise exact comparison (NaN matches NaN).
    pub fn matches(&self, other: &PresetValues) -> bool {
        self.notes == other.notes
            && self.style == other.style
            && same_measure(self.thickness, other.thickness)
            && same_measure(self.sheet_width, other.sheet_width)
            && same_measure(self.sheet_height, other.sheet_height)
            && same_measure(self.kerf, other.kerf)
            && JointKind::ALL
                .iter()
                .all(|&k| self.joints.get(k).same_as(other.joints.get(k)))
    }

    /// Fit adjustment for a joint kind cut to the given fit class.
    pub fn fit(&self, kind: JointKind, class: FitClass) -> Real {
        self.joints.get(kind).get(class.component())
    }
}

/// Named, read-only parameter bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    name: String,
    #[serde(flatten)]
    values: PresetValues,
}

impl Preset {
    pub fn new(name: impl Into<String>, values: PresetValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &PresetValues {
        &self.values
    }
}

/// Which preset (if any) the live parameters are bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    Custom,
    Preset(String),
}

impl Selection {
    pub fn as_str(&self) -> &str {
        match self {
            Selection::Custom => CUSTOM,
            Selection::Preset(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Selection::Custom)
    }

    pub fn preset_name(&self) -> Option<&str> {
        match self {
            Selection::Custom => None,
            Selection::Preset(name) => Some(name),
        }
    }
}

impl From<&str> for Selection {
    fn from(name: &str) -> Self {
        if name == CUSTOM {
            Selection::Custom
        } else {
            Selection::Preset(name.to_string())
        }
    }
}

impl From<String> for Selection {
    fn from(name: String) -> Self {
        if name == CUSTOM {
            Selection::Custom
        } else {
            Selection::Preset(name)
        }
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Custom => CUSTOM.to_string(),
            Selection::Preset(name) => name,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_scale() -> Real {
    1.0
}

/// Live, editable parameter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    #[serde(flatten)]
    pub values: PresetValues,
    #[serde(default = "default_scale")]
    pub scale: Real,
    #[serde(rename = "selectedPresetName", default)]
    pub selection: Selection,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            values: PresetValues::default(),
            scale: default_scale(),
            selection: Selection::Custom,
        }
    }
}

impl ParameterSet {
    /// Overwrite every preset attribute and bind to the preset. `scale` is
    /// left alone.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.values = preset.values.clone();
        self.selection = Selection::Preset(preset.name.clone());
    }

    pub fn matches_preset(&self, preset: &Preset) -> bool {
        self.values.matches(&preset.values)
    }

    pub fn get(&self, field: Field) -> FieldValue {
        let v = &self.values;
        match field {
            Field::Notes => FieldValue::Text(v.notes.clone()),
            Field::Style => FieldValue::Text(v.style.clone()),
            Field::Thickness => FieldValue::Number(v.thickness),
            Field::SheetWidth => FieldValue::Number(v.sheet_width),
            Field::SheetHeight => FieldValue::Number(v.sheet_height),
            Field::Kerf => FieldValue::Number(v.kerf),
            Field::Joint(kind, component) => FieldValue::Number(v.joints.get(kind).get(component)),
            Field::Scale => FieldValue::Number(self.scale),
        }
    }

    /// Overwrite a single field. The selection is not touched; detaching
    /// from a preset is the caller's decision.
    pub fn set(&mut self, field: Field, value: FieldValue) -> CoreResult<()> {
        match (field, value) {
            (Field::Notes, FieldValue::Text(s)) => self.values.notes = s,
            (Field::Style, FieldValue::Text(s)) => self.values.style = s,
            (Field::Thickness, FieldValue::Number(x)) => self.values.thickness = x,
            (Field::SheetWidth, FieldValue::Number(x)) => self.values.sheet_width = x,
            (Field::SheetHeight, FieldValue::Number(x)) => self.values.sheet_height = x,
            (Field::Kerf, FieldValue::Number(x)) => self.values.kerf = x,
            (Field::Joint(kind, component), FieldValue::Number(x)) => {
                self.values.joints.get_mut(kind).set(component, x)
            }
            (Field::Scale, FieldValue::Number(x)) => self.scale = x,
            (field, _) => {
                return Err(CoreError::FieldType {
                    field: field.name(),
                    expected: field.kind_name(),
                });
            }
        }
        Ok(())
    }

    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot(self.clone())
    }
}

/// Immutable copy of the live parameters at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSnapshot(ParameterSet);

impl ParameterSnapshot {
    pub fn params(&self) -> &ParameterSet {
        &self.0
    }

    pub fn into_params(self) -> ParameterSet {
        self.0
    }

    /// Flat record in the layout the SVG processor reads.
    pub fn laser_params(&self) -> LaserParams {
        let p = &self.0;
        let j = &p.values.joints;
        LaserParams {
            thickness: p.values.thickness,
            width: p.values.sheet_width,
            height: p.values.sheet_height,
            kerf: p.values.kerf,
            box_c: j.box_joint.clearance,
            box_l: j.box_joint.length,
            box_i: j.box_joint.inset,
            tab_c: j.tab.clearance,
            tab_l: j.tab.length,
            tab_i: j.tab.inset,
            slot_c: j.slot.clearance,
            slot_l: j.slot.length,
            slot_i: j.slot.inset,
            style: p.values.style.clone(),
            preset: p.selection.as_str().to_string(),
            notes: p.values.notes.clone(),
            scale: p.scale,
        }
    }
}

impl Deref for ParameterSnapshot {
    type Target = ParameterSet;

    fn deref(&self) -> &ParameterSet {
        &self.0
    }
}

/// Flat parameter record handed to the downstream SVG processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserParams {
    pub thickness: Real,
    pub width: Real,
    pub height: Real,
    pub kerf: Real,
    #[serde(rename = "boxC", with = "sheet_measure")]
    pub box_c: Real,
    #[serde(rename = "boxL", with = "sheet_measure")]
    pub box_l: Real,
    #[serde(rename = "boxI", with = "sheet_measure")]
    pub box_i: Real,
    #[serde(rename = "tabC", with = "sheet_measure")]
    pub tab_c: Real,
    #[serde(rename = "tabL", with = "sheet_measure")]
    pub tab_l: Real,
    #[serde(rename = "tabI", with = "sheet_measure")]
    pub tab_i: Real,
    #[serde(rename = "slotC", with = "sheet_measure")]
    pub slot_c: Real,
    #[serde(rename = "slotL", with = "sheet_measure")]
    pub slot_l: Real,
    #[serde(rename = "slotI", with = "sheet_measure")]
    pub slot_i: Real,
    pub style: String,
    pub preset: String,
    pub notes: String,
    pub scale: Real,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ply() -> Preset {
        Preset::new(
            "ply3mm",
            PresetValues {
                notes: "birch ply".to_string(),
                thickness: 3.0,
                sheet_width: 450.0,
                sheet_height: 300.0,
                kerf: 0.1,
                joints: JointFits {
                    box_joint: JointFit {
                        clearance: 0.1,
                        length: 0.0,
                        inset: -0.05,
                    },
                    tab: JointFit::default(),
                    slot: JointFit {
                        clearance: Real::NAN,
                        length: 0.02,
                        inset: 0.0,
                    },
                },
                style: DEFAULT_STYLE.to_string(),
            },
        )
    }

    #[test]
    fn apply_preset_binds_and_keeps_scale() {
        let mut params = ParameterSet {
            scale: 2.5,
            ..ParameterSet::default()
        };
        params.apply_preset(&ply());
        assert_eq!(params.selection, Selection::Preset("ply3mm".to_string()));
        assert_eq!(params.values.thickness, 3.0);
        assert_eq!(params.scale, 2.5);
        assert!(params.matches_preset(&ply()));
    }

    #[test]
    fn set_rejects_mismatched_value_kind() {
        let mut params = ParameterSet::default();
        let err = params
            .set(Field::Thickness, FieldValue::Text("thick".into()))
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::FieldType {
                field: "thickness",
                expected: "number"
            }
        );
        assert_eq!(params, ParameterSet::default());
    }

    #[test]
    fn set_then_get_joint_component() {
        let mut params = ParameterSet::default();
        let field = Field::Joint(JointKind::Tab, FitComponent::Inset);
        params.set(field, FieldValue::Number(0.3)).unwrap();
        assert_eq!(params.get(field), FieldValue::Number(0.3));
        assert_eq!(params.values.joints.tab.inset, 0.3);
    }

    #[test]
    fn fit_class_reads_matching_component() {
        let preset = ply();
        let v = preset.values();
        assert_eq!(v.fit(JointKind::Box, FitClass::Clearance), 0.1);
        assert_eq!(v.fit(JointKind::Box, FitClass::Friction), 0.0);
        assert_eq!(v.fit(JointKind::Box, FitClass::Press), -0.05);
        assert!(v.fit(JointKind::Slot, FitClass::Clearance).is_nan());
    }

    #[test]
    fn selection_serializes_as_plain_string() {
        let json = serde_json::to_string(&Selection::Custom).unwrap();
        assert_eq!(json, "\"custom\"");
        let back: Selection = serde_json::from_str("\"ply3mm\"").unwrap();
        assert_eq!(back, Selection::Preset("ply3mm".to_string()));
    }

    #[test]
    fn snapshot_uses_camel_case_keys() {
        let mut params = ParameterSet::default();
        params.apply_preset(&ply());
        let value = serde_json::to_value(params.snapshot()).unwrap();
        assert_eq!(value["sheetWidth"], 450.0);
        assert_eq!(value["box"]["inset"], -0.05);
        assert_eq!(value["selectedPresetName"], "ply3mm");
        assert_eq!(value["scale"], 1.0);
    }

    #[test]
    fn laser_params_use_flat_keys() {
        let mut params = ParameterSet::default();
        params.apply_preset(&ply());
        let flat = params.snapshot().laser_params();
        assert_eq!(flat.width, 450.0);
        assert_eq!(flat.box_i, -0.05);
        assert_eq!(flat.preset, "ply3mm");

        let value = serde_json::to_value(&flat).unwrap();
        assert_eq!(value["boxI"], -0.05);
        assert_eq!(value["height"], 300.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn measure() -> impl Strategy<Value = Real> {
        prop_oneof![Just(Real::NAN), -50.0_f64..500.0_f64]
    }

    proptest! {
        #[test]
        fn applied_preset_always_matches(
            thickness in measure(),
            kerf in measure(),
            box_inset in measure(),
            slot_clearance in measure(),
            notes in "[a-z ]{0,12}",
        ) {
            let mut values = PresetValues {
                notes,
                thickness,
                kerf,
                ..PresetValues::default()
            };
            values.joints.box_joint.inset = box_inset;
            values.joints.slot.clearance = slot_clearance;
            let preset = Preset::new("p", values);

            let mut params = ParameterSet::default();
            params.apply_preset(&preset);
            prop_assert!(params.matches_preset(&preset));

            params.set(Field::Kerf, FieldValue::Number(1000.0)).unwrap();
            prop_assert!(!params.matches_preset(&preset));
        }
    }
}

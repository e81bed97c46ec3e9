use core::fmt;
use core::str::FromStr;

use crate::numeric::{Real, parse_fit_measure, parse_measure};
use crate::params::{FitComponent, JointKind};
use crate::CoreError;

/// An editable field of the live parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Notes,
    Thickness,
    SheetWidth,
    SheetHeight,
    Kerf,
    Joint(JointKind, FitComponent),
    Style,
    /// Output scale factor. Never part of a preset.
    Scale,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::Notes,
        Field::Thickness,
        Field::SheetWidth,
        Field::SheetHeight,
        Field::Kerf,
        Field::Joint(JointKind::Box, FitComponent::Clearance),
        Field::Joint(JointKind::Box, FitComponent::Length),
        Field::Joint(JointKind::Box, FitComponent::Inset),
        Field::Joint(JointKind::Tab, FitComponent::Clearance),
        Field::Joint(JointKind::Tab, FitComponent::Length),
        Field::Joint(JointKind::Tab, FitComponent::Inset),
        Field::Joint(JointKind::Slot, FitComponent::Clearance),
        Field::Joint(JointKind::Slot, FitComponent::Length),
        Field::Joint(JointKind::Slot, FitComponent::Inset),
        Field::Style,
        Field::Scale,
    ];

    pub fn name(self) -> &'static str {
        use FitComponent::*;
        use JointKind::*;
        match self {
            Field::Notes => "notes",
            Field::Thickness => "thickness",
            Field::SheetWidth => "sheetWidth",
            Field::SheetHeight => "sheetHeight",
            Field::Kerf => "kerf",
            Field::Style => "style",
            Field::Scale => "scale",
            Field::Joint(Box, Clearance) => "box.clearance",
            Field::Joint(Box, Length) => "box.length",
            Field::Joint(Box, Inset) => "box.inset",
            Field::Joint(Tab, Clearance) => "tab.clearance",
            Field::Joint(Tab, Length) => "tab.length",
            Field::Joint(Tab, Inset) => "tab.inset",
            Field::Joint(Slot, Clearance) => "slot.clearance",
            Field::Joint(Slot, Length) => "slot.length",
            Field::Joint(Slot, Inset) => "slot.inset",
        }
    }

    /// Column name used by preset sheets and the flat exporter record.
    pub fn sheet_column(self) -> &'static str {
        use FitComponent::*;
        use JointKind::*;
        match self {
            Field::SheetWidth => "width",
            Field::SheetHeight => "height",
            Field::Joint(Box, Clearance) => "boxC",
            Field::Joint(Box, Length) => "boxL",
            Field::Joint(Box, Inset) => "boxI",
            Field::Joint(Tab, Clearance) => "tabC",
            Field::Joint(Tab, Length) => "tabL",
            Field::Joint(Tab, Inset) => "tabI",
            Field::Joint(Slot, Clearance) => "slotC",
            Field::Joint(Slot, Length) => "slotL",
            Field::Joint(Slot, Inset) => "slotI",
            other => other.name(),
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Field::Notes | Field::Style)
    }

    pub fn kind_name(self) -> &'static str {
        if self.is_numeric() { "number" } else { "text" }
    }

    /// Whether presets carry this field. Only `scale` is panel-local.
    pub fn is_preset_attribute(self) -> bool {
        !matches!(self, Field::Scale)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s || f.sheet_column() == s)
            .ok_or_else(|| CoreError::UnknownField {
                name: s.to_string(),
            })
    }
}

/// A value written into a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(Real),
    Text(String),
}

impl FieldValue {
    /// Convert raw text input for `field`. Joint fits accept `NA` and blank
    /// cells like the preset sheets do.
    pub fn parse(field: Field, raw: &str) -> Result<FieldValue, CoreError> {
        match field {
            Field::Notes | Field::Style => Ok(FieldValue::Text(raw.to_string())),
            Field::Joint(..) => parse_fit_measure(raw, field.name()).map(FieldValue::Number),
            _ => parse_measure(raw, field.name()).map(FieldValue::Number),
        }
    }

    pub fn as_number(&self) -> Option<Real> {
        match self {
            FieldValue::Number(x) => Some(*x),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<Real> for FieldValue {
    fn from(x: Real) -> Self {
        FieldValue::Number(x)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(x) => write!(f, "{x}"),
            FieldValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
            assert_eq!(field.sheet_column().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn sheet_columns_resolve() {
        assert_eq!("width".parse::<Field>().unwrap(), Field::SheetWidth);
        assert_eq!(
            "slotL".parse::<Field>().unwrap(),
            Field::Joint(JointKind::Slot, FitComponent::Length)
        );
        assert!(matches!(
            "depth".parse::<Field>(),
            Err(CoreError::UnknownField { .. })
        ));
    }

    #[test]
    fn parse_value_by_field_kind() {
        assert_eq!(
            FieldValue::parse(Field::Style, "stroke:red;").unwrap(),
            FieldValue::Text("stroke:red;".into())
        );
        assert_eq!(
            FieldValue::parse(Field::Kerf, "0.15").unwrap(),
            FieldValue::Number(0.15)
        );
        let na = FieldValue::parse(Field::Joint(JointKind::Box, FitComponent::Inset), "NA")
            .unwrap()
            .as_number()
            .unwrap();
        assert!(na.is_nan());
        assert!(FieldValue::parse(Field::Thickness, "NA").is_err());
    }

    #[test]
    fn only_scale_is_panel_local() {
        let local: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|f| !f.is_preset_attribute())
            .collect();
        assert_eq!(local, vec![Field::Scale]);
    }
}

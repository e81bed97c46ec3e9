use crate::CoreError;

/// Floating point type used for every measurement (millimetres).
pub type Real = f64;

/// Exact equality for measurements, except that two NaNs compare equal.
///
/// Preset sheets use `NA` for joint fits that were never measured; those
/// load as NaN and must still count as "unchanged" when compared against
/// the preset they came from.
pub fn same_measure(a: Real, b: Real) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Parse a dimension cell. Surrounding whitespace is ignored, anything else
/// must be a plain float.
pub fn parse_measure(raw: &str, what: &'static str) -> Result<Real, CoreError> {
    raw.trim()
        .parse::<Real>()
        .map_err(|_| CoreError::InvalidNumber {
            field: what,
            raw: raw.to_string(),
        })
}

/// Parse a joint-fit cell using the preset sheet conventions:
/// `NA` is an unmeasured value (NaN) and a blank cell means zero.
pub fn parse_fit_measure(raw: &str, what: &'static str) -> Result<Real, CoreError> {
    match raw.trim() {
        "NA" => Ok(Real::NAN),
        "" => Ok(0.0),
        _ => parse_measure(raw, what),
    }
}

/// Serde adapter for joint-fit measures.
///
/// Unmeasured fits are written as the sheet token `"NA"` so they survive
/// formats without a NaN literal (JSON writes NaN as `null`). Reading
/// accepts numbers, `"NA"`, `null` and any string `f64` parses, such as `"inf"`.
pub mod sheet_measure {
    use core::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::Real;

    const NA: &str = "NA";

    pub fn serialize<S: Serializer>(value: &Real, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str(NA)
        } else if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "inf" } else { "-inf" })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Real, D::Error> {
        deserializer.deserialize_any(MeasureVisitor)
    }

    struct MeasureVisitor;

    impl<'de> Visitor<'de> for MeasureVisitor {
        type Value = Real;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number, \"NA\" or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Real, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Real, E> {
            Ok(v as Real)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Real, E> {
            Ok(v as Real)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Real, E> {
            match v.trim() {
                NA => Ok(Real::NAN),
                other => other
                    .parse::<Real>()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<Real, E> {
            Ok(Real::NAN)
        }

        fn visit_none<E: de::Error>(self) -> Result<Real, E> {
            Ok(Real::NAN)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Real, D::Error> {
            deserializer.deserialize_any(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_measure_treats_nan_as_equal() {
        assert!(same_measure(Real::NAN, Real::NAN));
        assert!(same_measure(0.1, 0.1));
        assert!(!same_measure(0.1, 0.1 + 1e-12));
        assert!(!same_measure(Real::NAN, 0.0));
    }

    #[test]
    fn fit_cells_follow_sheet_conventions() {
        assert!(parse_fit_measure("NA", "boxC").unwrap().is_nan());
        assert_eq!(parse_fit_measure("", "boxC").unwrap(), 0.0);
        assert_eq!(parse_fit_measure("  ", "boxC").unwrap(), 0.0);
        assert_eq!(parse_fit_measure(" -0.05 ", "boxC").unwrap(), -0.05);
    }

    #[test]
    fn dimension_cells_are_strict() {
        let err = parse_measure("", "thickness").unwrap_err();
        assert!(format!("{err}").contains("thickness"));
        assert!(parse_measure("NA", "kerf").is_err());
        assert_eq!(parse_measure("450", "width").unwrap(), 450.0);
    }

    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    struct Fit {
        #[serde(with = "sheet_measure")]
        c: Real,
    }

    #[test]
    fn unmeasured_fits_serialize_as_na() {
        let json = serde_json::to_string(&Fit { c: Real::NAN }).unwrap();
        assert_eq!(json, r#"{"c":"NA"}"#);
        let back: Fit = serde_json::from_str(&json).unwrap();
        assert!(back.c.is_nan());

        let from_null: Fit = serde_json::from_str(r#"{"c":null}"#).unwrap();
        assert!(from_null.c.is_nan());

        let plain: Fit = serde_json::from_str(r#"{"c":-0.05}"#).unwrap();
        assert_eq!(plain.c, -0.05);
        let int: Fit = serde_json::from_str(r#"{"c":2}"#).unwrap();
        assert_eq!(int.c, 2.0);

        let inf = serde_json::to_string(&Fit { c: Real::NEG_INFINITY }).unwrap();
        let back: Fit = serde_json::from_str(&inf).unwrap();
        assert_eq!(back.c, Real::NEG_INFINITY);

        assert!(serde_json::from_str::<Fit>(r#"{"c":"loose"}"#).is_err());
    }
}

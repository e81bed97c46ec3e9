use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown parameter field: {name}")]
    UnknownField { name: String },

    #[error("Field {field} expects a {expected} value")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid number for {field}: {raw:?}")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("Unknown joint kind: {name}")]
    UnknownJoint { name: String },

    #[error("Unknown fit class: {name}")]
    UnknownFit { name: String },
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("no script type named '{0}' is registered")]
    UnknownType(String),

    #[error("script type '{0}' has no reflected Default and cannot be constructed")]
    NotConstructible(String),

    #[error("script type '{0}' is not registered as a component")]
    NotAComponent(String),

    #[error("script type '{0}' has no named fields")]
    NotAStruct(String),

    #[error("'{type_name}' has no public field '{field}'")]
    UnknownField { type_name: String, field: String },

    #[error("field '{type_name}.{field}' is not of type {expected}")]
    FieldTypeMismatch {
        type_name: String,
        field: String,
        expected: &'static str,
    },

    #[error("'{type_name}' has no method '{method}'")]
    UnknownMethod { type_name: String, method: String },

    #[error("native method '{method}' only operates on {expected}")]
    MethodTargetMismatch {
        method: &'static str,
        expected: &'static str,
    },

    #[error("'{method}' takes {expected} argument(s), got {got}")]
    ArgumentCount {
        method: String,
        expected: usize,
        got: usize,
    },
}

pub type Result<T> = std::result::Result<T, ScriptError>;

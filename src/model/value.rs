//! Runtime values as shown by the debugger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded runtime value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuntimeValue {
    /// Booleans, integers of any width, addresses; always kept as text
    Scalar(String),

    /// Vectors and other homogeneous sequences
    Sequence(Vec<RuntimeValue>),

    /// Structs and enum variants
    Compound(CompoundValue),
}

/// A struct (no variant) or enum value (variant set)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundValue {
    /// Fields in declaration order
    pub fields: Vec<(String, RuntimeValue)>,

    /// Fully qualified type name
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_tag: Option<u64>,
}

impl RuntimeValue {
    /// Convenience constructor for scalars
    pub fn scalar(text: impl Into<String>) -> Self {
        RuntimeValue::Scalar(text.into())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            RuntimeValue::Scalar(s) => Some(s),
            _ => None,
        }
    }
}

impl CompoundValue {
    pub fn is_variant(&self) -> bool {
        self.variant_name.is_some()
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&RuntimeValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for RuntimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeValue::Scalar(s) => write!(f, "{}", s),
            RuntimeValue::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            RuntimeValue::Compound(compound) => {
                write!(f, "{}", compound.type_name)?;
                if let Some(variant) = &compound.variant_name {
                    write!(f, "::{}", variant)?;
                }
                write!(f, " {{ ")?;
                for (i, (name, value)) in compound.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                write!(f, " }}")
            }
        }
    }
}

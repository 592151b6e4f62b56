use crate::error::SettingsError;
use serde::Serialize;
use std::fmt;

/// A value held by, or written into, an [`Argument`](crate::Argument).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i32),
    UnsignedInteger(u32),
    Long(i64),
    UnsignedLong(u64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Text(String),
    /// Selected names of a multi-select or select-list.
    Texts(Vec<String>),
    /// Items of a free list.
    List(Vec<Self>),
}

impl Value {
    /// Short lowercase name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::UnsignedInteger(_) => "unsigned integer",
            Self::Long(_) => "long",
            Self::UnsignedLong(_) => "unsigned long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::Texts(_) => "text list",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::UnsignedInteger(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::UnsignedLong(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Texts(items) => write!(f, "[{}]", items.join(", ")),
            Self::List(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            },
        }
    }
}

/// Typed extraction out of a [`Value`].
pub trait FromValue: Sized {
    /// # Errors
    /// [`SettingsError::WrongShape`] when the value holds another variant.
    fn from_value(value: Value) -> Result<Self, SettingsError>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, SettingsError> {
        Ok(value)
    }
}

macro_rules! value_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, SettingsError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(SettingsError::wrong_shape(format!(
                            "expected {}, found {} `{other}`",
                            stringify!($variant),
                            other.type_name()
                        ))),
                    }
                }
            }
        )*
    };
}

value_conversions! {
    i32 => Integer,
    u32 => UnsignedInteger,
    i64 => Long,
    u64 => UnsignedLong,
    f32 => Float,
    f64 => Double,
    bool => Bool,
    String => Text,
    Vec<String> => Texts,
    Vec<Value> => List,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

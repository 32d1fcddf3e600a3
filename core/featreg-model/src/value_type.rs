use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive value type of an entity or feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Bytes,
    String,
    Int32,
    Int64,
    Double,
    Float,
    Bool,
    BytesList,
    StringList,
    Int32List,
    Int64List,
    DoubleList,
    FloatList,
    BoolList,
}

impl ValueType {
    /// Returns true for the `*_list` variants.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(
            self,
            Self::BytesList
                | Self::StringList
                | Self::Int32List
                | Self::Int64List
                | Self::DoubleList
                | Self::FloatList
                | Self::BoolList
        )
    }

    /// The snake_case name used in the wire form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Double => "double",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::BytesList => "bytes_list",
            Self::StringList => "string_list",
            Self::Int32List => "int32_list",
            Self::Int64List => "int64_list",
            Self::DoubleList => "double_list",
            Self::FloatList => "float_list",
            Self::BoolList => "bool_list",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

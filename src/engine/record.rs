use std::borrow::Cow;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A typed value attached to a field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(u64),
    Str(String),
    Bool(bool),
    Record(FieldRecord),
    List(Vec<FieldValue>),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&FieldRecord> {
        match self {
            FieldValue::Record(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(values) => Some(values),
            _ => None,
        }
    }
}

macro_rules! int_field_value {
    ($($ty:ty),*) => {
        $(impl From<$ty> for FieldValue {
            fn from(value: $ty) -> Self {
                FieldValue::Int(u64::from(value))
            }
        })*
    };
}

int_field_value!(u8, u16, u32, u64);

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Int(value as u64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_owned())
    }
}

impl From<FieldRecord> for FieldValue {
    fn from(value: FieldRecord) -> Self {
        FieldValue::Record(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(values: Vec<FieldValue>) -> Self {
        FieldValue::List(values)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Int(value) => serializer.serialize_u64(*value),
            FieldValue::Str(value) => serializer.serialize_str(value),
            FieldValue::Bool(value) => serializer.serialize_bool(*value),
            FieldValue::Record(record) => record.serialize(serializer),
            FieldValue::List(values) => values.serialize(serializer),
        }
    }
}

/// Ordered, append-only set of named fields for one packet.
///
/// Insertion order is preserved through serialization. A name can only be
/// written once: later writes under an existing name are refused so that a
/// deeper layer cannot replace what an outer layer reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
    fields: Vec<(Cow<'static, str>, FieldValue)>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `name`, returning `false` if the name was already present.
    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<FieldValue>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            tracing::debug!(field = %name, "refusing to overwrite existing field");
            return false;
        }
        self.fields.push((name, value.into()));
        true
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn get_int(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(FieldValue::as_int)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(existing, _)| existing == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_ref(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for FieldRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name.as_ref(), value)?;
        }
        map.end()
    }
}

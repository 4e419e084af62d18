use schemars::{gen::SchemaGenerator, schema::Schema, JsonSchema};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An optional field of a partial update.
///
/// Keeps a field that was not sent apart from a field that was sent as `null`.
/// Use with `#[serde(default, skip_serializing_if = "Patch::is_unset")]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not sent. Leave the stored value unchanged.
    Unset,
    /// The field was sent as `null`. Clear the stored value.
    Null,
    /// The field was sent with a value. Replace the stored value.
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }

    /// Applies the patch to `target`.
    pub fn apply(self, target: &mut Option<T>) {
        match self {
            Patch::Unset => {}
            Patch::Null => *target = None,
            Patch::Value(value) => *target = Some(value),
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unset
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Value(value) => serializer.serialize_some(value),
            Patch::Unset | Patch::Null => serializer.serialize_none(),
        }
    }
}

impl<T> JsonSchema for Patch<T>
where
    T: JsonSchema,
{
    fn schema_name() -> String {
        Option::<T>::schema_name()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        Option::<T>::json_schema(gen)
    }

    fn is_referenceable() -> bool {
        false
    }
}

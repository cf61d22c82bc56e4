//! A general-purpose value wrapper.

use std::fmt::{self, Display, Formatter};

use serde::Deserialize;

/// A general-purpose value wrapper.
///
/// Positional arguments and options are passed around as [`Value`]s, so that
/// their shape can be checked the same way whether they were built in code or
/// read from a data file.
#[derive(Clone, Debug)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    I64(i64),
    /// Unsigned integer.
    U64(u64),
    /// Float.
    F64(f64),
    /// String.
    Str(String),
    /// Null.
    Unit,
    /// Array.
    Seq(Vec<Self>),
    /// Plain object.
    Map(Map<String, Self>),
}

impl Value {
    /// Return the runtime kind of the value, as shown in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::I64(_) | Self::U64(_) | Self::F64(_) => "number",
            Self::Str(_) => "string",
            Self::Unit => "null",
            Self::Seq(_) => "array",
            Self::Map(_) => "object",
        }
    }

    /// If the value is a `bool`, returns the associated [`bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Check if the value is a `str`.
    pub fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// If the value is a `str`, returns the associated `&str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Check if the value is a plain object.
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// If the value is a plain object, returns the associated [`Map`].
    pub fn as_map(&self) -> Option<&Map<String, Self>> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Follow a path of object keys.
    ///
    /// Returns [`None`] as soon as a key is missing or a non-object is met.
    pub fn pointer<'a>(&self, path: impl IntoIterator<Item = &'a str>) -> Option<&Self> {
        path.into_iter()
            .try_fold(self, |value, key| value.as_map()?.get(key))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(u), Self::Bool(v)) => u == v,
            (Self::I64(u), Self::I64(v)) => u == v,
            (Self::U64(u), Self::U64(v)) => u == v,
            (Self::F64(u), Self::F64(v)) => u == v,
            (Self::Str(u), Self::Str(v)) => u == v,
            (Self::Unit, Self::Unit) => true,
            (Self::Seq(u), Self::Seq(v)) => u == v,
            (Self::Map(u), Self::Map(v)) => u == v,
            _ => false,
        }
    }
}

/// Render the value the way a REPL would inspect it.
///
/// Strings are single-quoted, floats follow JavaScript notation (`-0`,
/// `NaN`, `Infinity`) and objects list their keys unquoted when they are
/// valid identifiers.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F64(v) if v.is_nan() => f.write_str("NaN"),
            Self::F64(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "Infinity" } else { "-Infinity" })
            },
            Self::F64(v) => write!(f, "{v}"),
            Self::Str(v) => write_quoted(f, v),
            Self::Unit => f.write_str("null"),
            Self::Seq(v) if v.is_empty() => f.write_str("[]"),
            Self::Seq(v) => {
                f.write_str("[ ")?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(" ]")
            },
            Self::Map(v) if v.is_empty() => f.write_str("{}"),
            Self::Map(v) => {
                f.write_str("{ ")?;
                for (i, (key, item)) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if is_identifier(key) {
                        f.write_str(key)?;
                    } else {
                        write_quoted(f, key)?;
                    }
                    write!(f, ": {item}")?;
                }
                f.write_str(" }")
            },
        }
    }
}

fn write_quoted(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in s.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("'")
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Seq(v)
    }
}

impl From<Map<String, Value>> for Value {
    fn from(v: Map<String, Value>) -> Self {
        Self::Map(v)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> serde::de::IntoDeserializer<'de, ValueError> for Value {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> Self::Deserializer {
        ValueDeserializer(self)
    }
}

/// Type used for [`Value`] maps.
///
/// Keys keep their insertion order, like properties of a plain object.
pub type Map<K, V> = indexmap::IndexMap<K, V>;

/// Error related to [`Value`].
#[derive(Debug)]
pub struct ValueError(String);

impl std::error::Error for ValueError {}

impl Display for ValueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::de::Error for ValueError {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Self(msg.to_string())
    }
}

/// Convert a [`Value`] to a `T`.
pub fn from_value<'de, T>(value: Value) -> Result<T, ValueError>
where
    T: Deserialize<'de>,
{
    T::deserialize(ValueDeserializer(value))
}

/// Deserialize any data structure from [`Value`].
#[doc(hidden)]
pub struct ValueDeserializer(Value);

impl<'de> serde::de::Deserializer<'de> for ValueDeserializer {
    type Error = ValueError;

    serde::forward_to_deserialize_any! {
        bool
        i8 i16 i32 i64
        u8 u16 u32 u64
        f32 f64
        char
        str
        string
        bytes
        byte_buf
        unit
        unit_struct
        newtype_struct
        seq
        tuple
        tuple_struct
        map
        struct
        enum
        identifier
        ignored_any
    }

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: serde::de::Visitor<'de>,
    {
        use serde::de::value::{MapDeserializer, SeqDeserializer};
        match self.0 {
            Value::Bool(v) => visitor.visit_bool(v),
            Value::I64(v) => visitor.visit_i64(v),
            Value::U64(v) => visitor.visit_u64(v),
            Value::F64(v) => visitor.visit_f64(v),
            Value::Str(v) => visitor.visit_string(v),
            Value::Unit => visitor.visit_unit(),
            Value::Seq(v) => visitor.visit_seq(SeqDeserializer::new(v.into_iter())),
            Value::Map(v) => visitor.visit_map(MapDeserializer::new(v.into_iter())),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: serde::de::Visitor<'de>,
    {
        match self.0 {
            Value::Unit => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }
}

/// A visitor that implements [`serde::de::Visitor`] to deserialize [`Value`].
struct ValueVisitor;

impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = self::Value;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::I64(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::U64(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::F64(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Str(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Str(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Unit)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Unit)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut values = Vec::new();
        while let Some(v) = seq.next_element()? {
            values.push(v);
        }
        Ok(Value::Seq(values))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut pairs = Map::new();
        while let Some((k, v)) = map.next_entry()? {
            pairs.insert(k, v);
        }
        Ok(Value::Map(pairs))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::{from_value, Map, Value};

    #[derive(Debug, PartialEq, Deserialize)]
    struct Struct {
        bool: bool,
        i32: i32,
        f32: f32,
        string: String,
        vec: Vec<i64>,
        option_some: Option<i64>,
        option_none: Option<i64>,
    }

    #[test]
    fn deserialize_struct() {
        let foo = Value::Map(Map::from([
            ("bool".into(), Value::Bool(true)),
            ("i32".into(), Value::I64(1)),
            ("f32".into(), Value::F64(3.0)),
            ("string".into(), Value::Str("bar".into())),
            (
                "vec".into(),
                Value::Seq(vec![Value::I64(1), Value::I64(2), Value::I64(3)]),
            ),
            ("option_some".into(), Value::I64(1)),
            ("option_none".into(), Value::Unit),
        ]));

        let expected = Struct {
            bool: true,
            i32: 1,
            f32: 3.0,
            string: "bar".into(),
            vec: vec![1, 2, 3],
            option_some: Some(1),
            option_none: None,
        };

        let result: Struct = from_value(foo).unwrap();

        assert_eq!(result, expected);
    }

    #[test]
    fn display_primitives() {
        assert_eq!(Value::I64(1).to_string(), "1");
        assert_eq!(Value::F64(-0.0).to_string(), "-0");
        assert_eq!(Value::F64(1.5).to_string(), "1.5");
        assert_eq!(Value::F64(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::F64(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Unit.to_string(), "null");
        assert_eq!(Value::from("it's").to_string(), r"'it\'s'");
    }

    #[test]
    fn display_collections() {
        assert_eq!(Value::Seq(vec![]).to_string(), "[]");
        assert_eq!(Value::Map(Map::new()).to_string(), "{}");

        let value = Value::Map(Map::from([
            ("level".into(), Value::I64(2)),
            ("rebase-to".into(), Value::Seq(vec!["a".into(), Value::Unit])),
        ]));

        assert_eq!(value.to_string(), "{ level: 2, 'rebase-to': [ 'a', null ] }");
    }

    #[test]
    fn kinds() {
        assert_eq!(Value::Seq(vec![]).kind(), "array");
        assert_eq!(Value::Map(Map::new()).kind(), "object");
        assert_eq!(Value::F64(-0.0).kind(), "number");
        assert_eq!(Value::Unit.kind(), "null");
    }

    #[test]
    fn pointer() {
        let value = Value::Map(Map::from([(
            "compatibility".into(),
            Value::Map(Map::from([(
                "properties".into(),
                Value::Map(Map::from([("zeroUnits".into(), Value::Bool(false))])),
            )])),
        )]));

        assert_eq!(
            value.pointer(["compatibility", "properties", "zeroUnits"]),
            Some(&Value::Bool(false))
        );
        assert_eq!(value.pointer(["compatibility", "colors"]), None);
        assert_eq!(Value::Unit.pointer(["compatibility"]), None);
    }
}

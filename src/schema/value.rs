use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::{borrow::Cow, fmt};

/// Declared type of a schema field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum FieldKind {
    Bool,
    U8,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    DateTime,
    Uuid,
    Str,
    Record,
}

impl FieldKind {
    pub fn is_scalar(&self) -> bool {
        *self != FieldKind::Record
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Bool => "bool",
            FieldKind::U8 => "u8",
            FieldKind::I8 => "i8",
            FieldKind::I16 => "i16",
            FieldKind::I32 => "i32",
            FieldKind::I64 => "i64",
            FieldKind::F32 => "f32",
            FieldKind::F64 => "f64",
            FieldKind::DateTime => "datetime",
            FieldKind::Uuid => "uuid",
            FieldKind::Str => "string",
            FieldKind::Record => "record",
        };

        f.write_str(name)
    }
}

/// A scalar read off a row, or a literal coerced to a field's kind.
///
/// Ordering is only meaningful between values of the same variant. The
/// compiler guarantees that by coercing every literal to the kind of the
/// field it is compared with.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub enum Value<'a> {
    Bool(bool),
    U8(u8),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    DateTime(NaiveDateTime),
    Uuid(Uuid),
    Str(Cow<'a, str>),
}

impl<'a> Value<'a> {
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Bool(_) => FieldKind::Bool,
            Value::U8(_) => FieldKind::U8,
            Value::I8(_) => FieldKind::I8,
            Value::I16(_) => FieldKind::I16,
            Value::I32(_) => FieldKind::I32,
            Value::I64(_) => FieldKind::I64,
            Value::F32(_) => FieldKind::F32,
            Value::F64(_) => FieldKind::F64,
            Value::DateTime(_) => FieldKind::DateTime,
            Value::Uuid(_) => FieldKind::Uuid,
            Value::Str(_) => FieldKind::Str,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_ref()),
            _ => None,
        }
    }
}

/// Rust types that can back a scalar schema field.
pub trait FieldValue {
    const KIND: FieldKind;

    fn into_value(self) -> Value<'static>;
}

macro_rules! field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = FieldKind::$variant;

                fn into_value(self) -> Value<'static> {
                    Value::$variant(self)
                }
            }
        )*
    };
}

field_value! {
    bool => Bool,
    u8 => U8,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    NaiveDateTime => DateTime,
    Uuid => Uuid,
}

impl FieldValue for String {
    const KIND: FieldKind = FieldKind::Str;

    fn into_value(self) -> Value<'static> {
        Value::Str(Cow::Owned(self))
    }
}

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";
const HYPHENATED_UUID_LEN: usize = 36;

/// Converts literal text to a value of `kind`.
///
/// Returns `None` when the text does not parse or does not fit the width
/// of the kind. Records have no literal form.
pub fn coerce(kind: FieldKind, literal: &str) -> Option<Value<'static>> {
    let value = match kind {
        FieldKind::Bool => Value::Bool(parse_bool(literal)?),
        FieldKind::U8 => Value::U8(literal.parse().ok()?),
        FieldKind::I8 => Value::I8(literal.parse().ok()?),
        FieldKind::I16 => Value::I16(literal.parse().ok()?),
        FieldKind::I32 => Value::I32(literal.parse().ok()?),
        FieldKind::I64 => Value::I64(literal.parse().ok()?),
        FieldKind::F32 => Value::F32(literal.parse().ok()?),
        FieldKind::F64 => Value::F64(literal.parse().ok()?),
        FieldKind::DateTime => Value::DateTime(parse_datetime(literal)?),
        FieldKind::Uuid => Value::Uuid(parse_uuid(literal)?),
        FieldKind::Str => Value::Str(Cow::Owned(literal.to_string())),
        FieldKind::Record => return None,
    };

    Some(value)
}

fn parse_bool(literal: &str) -> Option<bool> {
    if literal.eq_ignore_ascii_case("true") {
        Some(true)
    } else if literal.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_datetime(literal: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS.iter() {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(literal, format) {
            return Some(datetime);
        }
    }

    NaiveDate::parse_from_str(literal, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn parse_uuid(literal: &str) -> Option<Uuid> {
    if literal.len() != HYPHENATED_UUID_LEN {
        return None;
    }

    Uuid::parse_str(literal).ok()
}

use std::any::{self, Any, TypeId};
use std::fmt::{self, Debug};
use std::{mem, ptr};

use indexmap::IndexMap;
use serde::ser::{Error as _, Serialize, Serializer};

use crate::{AccessError, AccessResult, FieldDescriptor, FieldKind};

/// Insertion-ordered mapping of output names to extracted values.
///
/// Re-inserting an existing key replaces its value and keeps the position of
/// the first insertion.
pub type FieldMap<'a> = IndexMap<String, Value<'a>>;

/// A borrowed, type-erased reference to a field's value.
///
/// Object-kind fields are stored in a [`FieldMap`] as-is: no copy and no
/// recursive conversion.
#[derive(Clone, Copy)]
pub struct ObjectRef<'a> {
    type_name: &'static str,
    value: &'a dyn Any,
}

impl<'a> ObjectRef<'a> {
    pub fn new<T: Any>(value: &'a T) -> Self {
        Self {
            type_name: any::type_name::<T>(),
            value,
        }
    }

    /// The Rust type name of the referenced value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        (*self.value).type_id()
    }

    pub fn as_any(&self) -> &'a dyn Any {
        self.value
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.value.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// The referenced text, when the value is a `String` or `&'static str`.
    pub fn as_str(&self) -> Option<&'a str> {
        if let Some(s) = self.value.downcast_ref::<String>() {
            return Some(s.as_str());
        }
        self.value.downcast_ref::<&'static str>().copied()
    }

    /// Whether both refer to the same value in memory.
    ///
    /// Zero-sized values have no distinct address, so any two of the same
    /// type are treated as the same value.
    pub fn ptr_eq(&self, other: &ObjectRef<'_>) -> bool {
        if self.type_id() != other.type_id() {
            return false;
        }
        mem::size_of_val(self.value) == 0
            || ptr::addr_eq(self.value as *const dyn Any, other.value as *const dyn Any)
    }
}

/// Text compares by content, everything else by identity.
impl PartialEq for ObjectRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_str(), other.as_str()) {
            (Some(a), Some(b)) => a == b,
            _ => self.ptr_eq(other),
        }
    }
}

impl Debug for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => Debug::fmt(s, f),
            None => write!(f, "<{}>", self.type_name),
        }
    }
}

/// A single entry of a [`FieldMap`].
///
/// Primitive fields are boxed into the variant matching their declared kind;
/// a 16-bit field is always `I16`, never widened.
///
/// Floats compare by bit pattern, so `NaN == NaN` and `0.0 != -0.0`.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    Object(ObjectRef<'a>),
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v:?}"),
            Value::I8(v) => write!(f, "{v:?}i8"),
            Value::I16(v) => write!(f, "{v:?}i16"),
            Value::I32(v) => write!(f, "{v:?}i32"),
            Value::I64(v) => write!(f, "{v:?}i64"),
            Value::U8(v) => write!(f, "{v:?}u8"),
            Value::U16(v) => write!(f, "{v:?}u16"),
            Value::U32(v) => write!(f, "{v:?}u32"),
            Value::U64(v) => write!(f, "{v:?}u64"),
            Value::F32(v) => write!(f, "{v:?}f32"),
            Value::F64(v) => write!(f, "{v:?}f64"),
            Value::Char(v) => write!(f, "{v:?}"),
            Value::Object(v) => Debug::fmt(v, f),
        }
    }
}

macro_rules! impl_as {
    ($fn:ident, $ty:ty, $variant:ident) => {
        pub fn $fn(&self) -> Option<$ty> {
            match self {
                Value::$variant(v) => Some(*v),
                _ => None,
            }
        }
    };
}

impl<'a> Value<'a> {
    /// Store `value` by reference.
    pub fn object<T: Any>(value: &'a T) -> Self {
        Value::Object(ObjectRef::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The kind this value was boxed as; `None` for `Null`.
    pub fn kind(&self) -> Option<FieldKind> {
        let kind = match self {
            Value::Null => return None,
            Value::Bool(_) => FieldKind::Bool,
            Value::I8(_) => FieldKind::I8,
            Value::I16(_) => FieldKind::I16,
            Value::I32(_) => FieldKind::I32,
            Value::I64(_) => FieldKind::I64,
            Value::U8(_) => FieldKind::U8,
            Value::U16(_) => FieldKind::U16,
            Value::U32(_) => FieldKind::U32,
            Value::U64(_) => FieldKind::U64,
            Value::F32(_) => FieldKind::F32,
            Value::F64(_) => FieldKind::F64,
            Value::Char(_) => FieldKind::Char,
            Value::Object(_) => FieldKind::Object,
        };
        Some(kind)
    }

    impl_as!(as_bool, bool, Bool);
    impl_as!(as_i8, i8, I8);
    impl_as!(as_i16, i16, I16);
    impl_as!(as_i32, i32, I32);
    impl_as!(as_i64, i64, I64);
    impl_as!(as_u8, u8, U8);
    impl_as!(as_u16, u16, U16);
    impl_as!(as_u32, u32, U32);
    impl_as!(as_u64, u64, U64);
    impl_as!(as_f32, f32, F32);
    impl_as!(as_f64, f64, F64);
    impl_as!(as_char, char, Char);
    impl_as!(as_object, ObjectRef<'a>, Object);

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Object(object) => object.as_str(),
            _ => None,
        }
    }

    /// Box a raw field value into the variant for `field`'s declared kind.
    pub(crate) fn boxed(field: &FieldDescriptor, raw: Option<ObjectRef<'a>>) -> AccessResult<Self> {
        let mismatch = || AccessError::KindMismatch {
            field: field.name(),
            expected: field.kind(),
        };
        let raw = raw.ok_or_else(mismatch)?;
        let value = match field.kind() {
            FieldKind::Bool => raw.downcast_ref::<bool>().map(|v| Value::Bool(*v)),
            FieldKind::I8 => raw.downcast_ref::<i8>().map(|v| Value::I8(*v)),
            FieldKind::I16 => raw.downcast_ref::<i16>().map(|v| Value::I16(*v)),
            FieldKind::I32 => raw.downcast_ref::<i32>().map(|v| Value::I32(*v)),
            FieldKind::I64 => raw.downcast_ref::<i64>().map(|v| Value::I64(*v)),
            FieldKind::U8 => raw.downcast_ref::<u8>().map(|v| Value::U8(*v)),
            FieldKind::U16 => raw.downcast_ref::<u16>().map(|v| Value::U16(*v)),
            FieldKind::U32 => raw.downcast_ref::<u32>().map(|v| Value::U32(*v)),
            FieldKind::U64 => raw.downcast_ref::<u64>().map(|v| Value::U64(*v)),
            FieldKind::F32 => raw.downcast_ref::<f32>().map(|v| Value::F32(*v)),
            FieldKind::F64 => raw.downcast_ref::<f64>().map(|v| Value::F64(*v)),
            FieldKind::Char => raw.downcast_ref::<char>().map(|v| Value::Char(*v)),
            FieldKind::Object => Some(Value::Object(raw)),
        };
        value.ok_or_else(mismatch)
    }
}

macro_rules! impl_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl PartialEq<$ty> for Value<'_> {
                fn eq(&self, other: &$ty) -> bool {
                    *self == Value::$variant(*other)
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    char => Char,
}

impl PartialEq<str> for Value<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// Shallow: object values serialize only when they hold text.
impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::U8(v) => serializer.serialize_u8(*v),
            Value::U16(v) => serializer.serialize_u16(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Char(v) => serializer.serialize_char(*v),
            Value::Object(object) => match object.as_str() {
                Some(s) => serializer.serialize_str(s),
                None => Err(S::Error::custom(format!(
                    "cannot serialize object of type {}",
                    object.type_name()
                ))),
            },
        }
    }
}

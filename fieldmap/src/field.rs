use std::any::{self, Any, TypeId};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AccessError, AccessResult, ObjectRef};

/// Reads the raw value of one field out of a type-erased source.
///
/// `Ok(None)` means the field holds an absent reference (an empty `Option`).
pub type Accessor = for<'a> fn(&'a dyn Any) -> AccessResult<Option<ObjectRef<'a>>>;

/// Registration-time metadata for one declared field of a type.
///
/// Tables of descriptors are normally generated by `#[derive(Reflect)]`, but
/// every constructor is `const` so a table can also be written by hand as a
/// `static`.
#[derive(Clone, Copy)]
pub struct FieldDescriptor {
    name: &'static str,
    kind: FieldKind,
    rename: Option<&'static str>,
    ignored: bool,
    accessor: Accessor,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind, accessor: Accessor) -> Self {
        Self {
            name,
            kind,
            rename: None,
            ignored: false,
            accessor,
        }
    }

    /// Shorthand for a reference-kind field.
    pub const fn object(name: &'static str, accessor: Accessor) -> Self {
        Self::new(name, FieldKind::Object, accessor)
    }

    /// Emit this field under `name` instead of its declared name.
    pub const fn rename(mut self, name: &'static str) -> Self {
        self.rename = Some(name);
        self
    }

    /// Exclude this field from generated maps.
    pub const fn ignore(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// The declared field name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    pub const fn renamed(&self) -> Option<&'static str> {
        self.rename
    }

    pub const fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// The key this field is emitted under: the rename if present, else the
    /// declared name.
    pub const fn output_name(&self) -> &'static str {
        match self.rename {
            Some(name) => name,
            None => self.name,
        }
    }

    /// Invoke the accessor against `source`.
    pub fn read<'a>(&self, source: &'a dyn Any) -> AccessResult<Option<ObjectRef<'a>>> {
        (self.accessor)(source)
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("rename", &self.rename)
            .field("ignored", &self.ignored)
            .finish_non_exhaustive()
    }
}

/// Recover the concrete source type inside an accessor.
pub fn downcast_source<T: Any>(source: &dyn Any) -> AccessResult<&T> {
    source
        .downcast_ref::<T>()
        .ok_or_else(|| AccessError::SourceMismatch {
            expected: any::type_name::<T>(),
        })
}

/// The declared kind of a field.
///
/// Every kind except `Object` is a fixed-size scalar that the mapper boxes
/// into the [`Value`](crate::Value) variant of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    /// Anything that is not a primitive: strings, options, structs, collections.
    Object,
}

impl FieldKind {
    /// The kind of a field declared with type `T`.
    ///
    /// Resolved by type identity, so aliases and qualified paths such as
    /// `std::primitive::i16` are primitives too. Wrappers like `Option<i32>`
    /// are objects.
    pub fn of<T: Any>() -> Self {
        let id = TypeId::of::<T>();
        let primitives = [
            (TypeId::of::<bool>(), FieldKind::Bool),
            (TypeId::of::<i8>(), FieldKind::I8),
            (TypeId::of::<i16>(), FieldKind::I16),
            (TypeId::of::<i32>(), FieldKind::I32),
            (TypeId::of::<i64>(), FieldKind::I64),
            (TypeId::of::<u8>(), FieldKind::U8),
            (TypeId::of::<u16>(), FieldKind::U16),
            (TypeId::of::<u32>(), FieldKind::U32),
            (TypeId::of::<u64>(), FieldKind::U64),
            (TypeId::of::<f32>(), FieldKind::F32),
            (TypeId::of::<f64>(), FieldKind::F64),
            (TypeId::of::<char>(), FieldKind::Char),
        ];
        primitives
            .into_iter()
            .find_map(|(primitive, kind)| (primitive == id).then_some(kind))
            .unwrap_or(FieldKind::Object)
    }

    pub const fn is_primitive(self) -> bool {
        !matches!(self, FieldKind::Object)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKind::Bool => "bool",
            FieldKind::I8 => "i8",
            FieldKind::I16 => "i16",
            FieldKind::I32 => "i32",
            FieldKind::I64 => "i64",
            FieldKind::U8 => "u8",
            FieldKind::U16 => "u16",
            FieldKind::U32 => "u32",
            FieldKind::U64 => "u64",
            FieldKind::F32 => "f32",
            FieldKind::F64 => "f64",
            FieldKind::Char => "char",
            FieldKind::Object => "object",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

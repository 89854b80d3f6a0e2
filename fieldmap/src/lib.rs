//! Flat, insertion-ordered field maps for Rust values.
//!
//! A type describes its declared fields once, in a static table of
//! [`FieldDescriptor`]s, and a [`Mapper`] walks that table to build a
//! [`FieldMap`]:
//! - [`Reflect`]: exposes the field table; usually `#[derive(Reflect)]`
//! - [`Mappable`]: opt-in hook for types that build their own map
//! - [`Mapper`]: the conversion, with every step overridable
//! - [`ConfiguredMapper`]: a mapper driven by [`MapperConfig`]
//!
//! Primitive fields are boxed into the [`Value`] variant of their declared
//! kind; every other field is stored by reference. Conversion is one level
//! deep: nested objects are never expanded.

mod config;
mod error;
mod field;
mod mapper;
mod reflect;
mod value;

pub use config::{ConfiguredMapper, MapperConfig, RenameRule};
pub use error::{AccessError, AccessResult};
pub use field::{Accessor, FieldDescriptor, FieldKind, downcast_source};
pub use fieldmap_derive::Reflect;
pub use mapper::{DefaultMapper, Mapper, NullPolicy};
pub use reflect::{Mappable, Reflect};
pub use value::{FieldMap, ObjectRef, Value};

/// Convert `source` with the [`DefaultMapper`].
pub fn to_map<T: Reflect>(source: Option<&T>) -> Option<FieldMap<'_>> {
    DefaultMapper.to_map(source.map(|s| s as &dyn Reflect))
}

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{error, trace};

use crate::{AccessError, FieldDescriptor, FieldMap, Reflect, Value};

/// Whether null values are written into the output map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Null entries are kept under their field's name.
    #[default]
    Include,
    /// Null entries are left out of the map.
    Skip,
}

/// Converts a [`Reflect`] source into a flat [`FieldMap`].
///
/// Every step of the conversion is a provided method, so a specialised mapper
/// overrides only the step it needs:
///
/// ```
/// use std::borrow::Cow;
/// use fieldmap::{FieldDescriptor, Mapper, Reflect};
///
/// struct Upper;
///
/// impl Mapper for Upper {
///     fn name(&self, field: &FieldDescriptor) -> Cow<'static, str> {
///         Cow::Owned(field.output_name().to_uppercase())
///     }
/// }
///
/// #[derive(Reflect)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let point = Point { x: 1, y: 2 };
/// let map = Upper.to_map(Some(&point)).unwrap();
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["X", "Y"]);
/// ```
pub trait Mapper: Send + Sync {
    /// Convert `source`, or return `None` for an absent source.
    ///
    /// Sources that opt into self-mapping are returned verbatim; everything
    /// else goes through [`map_fields`](Mapper::map_fields).
    fn to_map<'a>(&self, source: Option<&'a dyn Reflect>) -> Option<FieldMap<'a>> {
        let source = source?;
        if let Some(mappable) = source.as_mappable() {
            trace!(type_name = source.type_name(), "using self-supplied field map");
            return Some(mappable.to_map());
        }
        Some(self.map_fields(source))
    }

    /// Generic extraction over the source's declared fields.
    fn map_fields<'a>(&self, source: &'a dyn Reflect) -> FieldMap<'a> {
        let fields = source.fields();
        let mut map = FieldMap::with_capacity(fields.len());

        for field in fields {
            if self.ignore(field) {
                continue;
            }
            let name = self.name(field);
            let value = if field.kind().is_primitive() {
                self.extract_primitive(source, field)
            } else {
                self.extract_object(source, field)
            };
            let value = self.transform(field, value);
            if value.is_null() && self.null_policy() == NullPolicy::Skip {
                continue;
            }
            // Later fields win on a name collision.
            map.insert(name.into_owned(), value);
        }

        map
    }

    /// Read a primitive field and box it into the variant for its kind.
    fn extract_primitive<'a>(&self, source: &'a dyn Reflect, field: &FieldDescriptor) -> Value<'a> {
        match field.read(source).and_then(|raw| Value::boxed(field, raw)) {
            Ok(value) => value,
            Err(error) => read_failed(source, field, &error),
        }
    }

    /// Read a reference field as-is.
    fn extract_object<'a>(&self, source: &'a dyn Reflect, field: &FieldDescriptor) -> Value<'a> {
        match field.read(source) {
            Ok(Some(object)) => Value::Object(object),
            Ok(None) => Value::Null,
            Err(error) => read_failed(source, field, &error),
        }
    }

    fn ignore(&self, field: &FieldDescriptor) -> bool {
        field.is_ignored()
    }

    fn name(&self, field: &FieldDescriptor) -> Cow<'static, str> {
        Cow::Borrowed(field.output_name())
    }

    /// Post-process an extracted value before it is inserted. Identity by
    /// default.
    fn transform<'a>(&self, field: &FieldDescriptor, value: Value<'a>) -> Value<'a> {
        let _ = field;
        value
    }

    fn null_policy(&self) -> NullPolicy {
        NullPolicy::Include
    }
}

fn read_failed<'a>(
    source: &dyn Reflect,
    field: &FieldDescriptor,
    error: &AccessError,
) -> Value<'a> {
    error!(
        field = field.name(),
        type_name = source.type_name(),
        error = %error,
        "field read failed, recording null"
    );
    Value::Null
}

/// The mapper with every step left at its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMapper;

impl Mapper for DefaultMapper {}

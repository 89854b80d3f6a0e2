use std::any::{self, Any};

use crate::{FieldDescriptor, FieldMap};

/// A type whose declared fields can be enumerated by a [`Mapper`](crate::Mapper).
///
/// Usually derived:
///
/// ```
/// use fieldmap::Reflect;
///
/// #[derive(Reflect)]
/// struct Account {
///     id: i64,
///     #[fieldmap(rename = "displayName")]
///     display_name: String,
///     #[fieldmap(ignore)]
///     password_hash: String,
/// }
///
/// let account = Account {
///     id: 7,
///     display_name: "ada".into(),
///     password_hash: "x".into(),
/// };
/// let map = fieldmap::to_map(Some(&account)).unwrap();
/// assert_eq!(map["id"], 7i64);
/// assert_eq!(map["displayName"], "ada");
/// assert!(!map.contains_key("password_hash"));
/// ```
pub trait Reflect: Any + 'static {
    fn type_name(&self) -> &'static str {
        any::type_name::<Self>()
    }

    /// Descriptors for the fields declared directly on this type, in
    /// declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Opt into self-mapping. When this returns `Some`, mappers return
    /// [`Mappable::to_map`] verbatim and never read [`fields`](Reflect::fields).
    fn as_mappable(&self) -> Option<&dyn Mappable> {
        None
    }
}

/// A type that produces its own [`FieldMap`].
pub trait Mappable {
    fn to_map(&self) -> FieldMap<'_>;
}

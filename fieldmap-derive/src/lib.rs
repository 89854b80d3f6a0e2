//! Derive macro for `fieldmap`.
//!
//! Generates the static field table and the `Reflect` impl for a struct with
//! named fields.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod reflect_derive;

/// Derives `fieldmap::Reflect` for a struct.
///
/// # Attributes
///
/// ## Struct-level attributes
///
/// - `#[fieldmap(mappable)]` - Delegate to the struct's `fieldmap::Mappable`
///   impl instead of reading its fields
///
/// ## Field-level attributes
///
/// - `#[fieldmap(ignore)]` - Leave the field out of generated maps
/// - `#[fieldmap(rename = "name")]` - Emit the field under `name`
///
/// # Example
///
/// ```ignore
/// use fieldmap::Reflect;
///
/// #[derive(Reflect)]
/// pub struct User {
///     pub id: i64,
///
///     #[fieldmap(rename = "userName")]
///     pub user_name: String,
///
///     #[fieldmap(ignore)]
///     pub password_hash: String,
///
///     pub nickname: Option<String>,
/// }
/// ```
///
/// Fields whose type is `bool`, `char`, `i8` to `i64`, `u8` to `u64`, `f32`
/// or `f64` are registered with that primitive kind, however the type is
/// spelled (aliases included). `Option<T>` fields are object fields that read
/// as null when empty. Everything else is an object field.
#[proc_macro_derive(Reflect, attributes(fieldmap))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match reflect_derive::derive_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

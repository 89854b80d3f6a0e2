use proc_macro2::{Group, Ident, TokenStream, TokenTree};
use quote::{ToTokens, format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Error, Fields, GenericArgument, LitStr, PathArguments, Result, Type};

/// Configuration from a struct-level `#[fieldmap(...)]` attribute
#[derive(Debug, Default)]
struct StructAttr {
    mappable: bool,
}

impl StructAttr {
    fn from_attrs(attrs: &[syn::Attribute]) -> Result<Self> {
        let mut config = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("fieldmap") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("mappable") {
                    config.mappable = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported fieldmap struct attribute"))
                }
            })?;
        }

        Ok(config)
    }
}

/// Configuration from a field-level `#[fieldmap(...)]` attribute
#[derive(Debug, Default)]
struct FieldAttr {
    ignore: bool,
    rename: Option<LitStr>,
}

impl FieldAttr {
    fn from_attrs(attrs: &[syn::Attribute]) -> Result<Self> {
        let mut config = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("fieldmap") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("ignore") {
                    config.ignore = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    config.rename = Some(value);
                    Ok(())
                } else {
                    Err(meta.error("unsupported fieldmap field attribute"))
                }
            })?;

            if config.ignore {
                if let Some(rename) = &config.rename {
                    return Err(Error::new_spanned(
                        rename,
                        "an ignored field cannot also be renamed",
                    ));
                }
            }
        }

        Ok(config)
    }
}

pub(crate) fn derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Reflect cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new_spanned(
                    struct_name,
                    "Reflect can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                struct_name,
                "Reflect can only be derived for structs",
            ));
        }
    };

    let config = StructAttr::from_attrs(&input.attrs)?;

    let mut readers = Vec::with_capacity(fields.len());
    let mut descriptors = Vec::with_capacity(fields.len());

    for field in fields {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let attr = FieldAttr::from_attrs(&field.attrs)?;
        let name = field_ident.unraw().to_string();
        // The table is a `static`, where `Self` is not in scope.
        let ty = replace_self(field.ty.to_token_stream(), struct_name);
        let reader = format_ident!("__fieldmap_read_{}", name);

        let raw = if is_option(&field.ty) {
            quote! {
                source.#field_ident.as_ref().map(::fieldmap::ObjectRef::new)
            }
        } else {
            quote! {
                ::core::option::Option::Some(::fieldmap::ObjectRef::new(&source.#field_ident))
            }
        };

        readers.push(quote! {
            #[allow(non_snake_case)]
            fn #reader(
                source: &dyn ::core::any::Any,
            ) -> ::fieldmap::AccessResult<::core::option::Option<::fieldmap::ObjectRef<'_>>> {
                let source = ::fieldmap::downcast_source::<#struct_name>(source)?;
                ::core::result::Result::Ok(#raw)
            }
        });

        let mut descriptor = quote! {
            ::fieldmap::FieldDescriptor::new(#name, ::fieldmap::FieldKind::of::<#ty>(), #reader)
        };
        if attr.ignore {
            descriptor = quote! { #descriptor.ignore() };
        }
        if let Some(rename) = &attr.rename {
            descriptor = quote! { #descriptor.rename(#rename) };
        }
        descriptors.push(descriptor);
    }

    let as_mappable = if config.mappable {
        quote! {
            fn as_mappable(&self) -> ::core::option::Option<&dyn ::fieldmap::Mappable> {
                ::core::option::Option::Some(self)
            }
        }
    } else {
        TokenStream::new()
    };

    let expanded = quote! {
        impl ::fieldmap::Reflect for #struct_name {
            fn fields(&self) -> &'static [::fieldmap::FieldDescriptor] {
                #(#readers)*

                // Kinds come from `TypeId`, which is not usable in a const.
                static FIELDS: ::std::sync::LazyLock<::std::vec::Vec<::fieldmap::FieldDescriptor>> =
                    ::std::sync::LazyLock::new(|| ::std::vec![#(#descriptors),*]);
                FIELDS.as_slice()
            }

            #as_mappable
        }
    };

    Ok(expanded)
}

fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    if path.qself.is_some() {
        return false;
    }
    let Some(segment) = path.path.segments.last() else {
        return false;
    };
    if segment.ident != "Option" {
        return false;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => {
            args.args.len() == 1 && matches!(args.args.first(), Some(GenericArgument::Type(_)))
        }
        _ => false,
    }
}

fn replace_self(tokens: TokenStream, struct_name: &Ident) -> TokenStream {
    tokens
        .into_iter()
        .map(|token| match token {
            TokenTree::Ident(ident) if ident == "Self" => {
                let mut name = struct_name.clone();
                name.set_span(ident.span());
                TokenTree::Ident(name)
            }
            TokenTree::Group(group) => {
                let mut replaced =
                    Group::new(group.delimiter(), replace_self(group.stream(), struct_name));
                replaced.set_span(group.span());
                TokenTree::Group(replaced)
            }
            other => other,
        })
        .collect()
}

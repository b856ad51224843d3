//! Derive macro implementation for envstruct

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, FieldsNamed};

mod attrs;

use attrs::{ContainerAttrs, FieldAttrs};

/// `EnvStruct` derive macro
///
/// On a struct with named fields, implements `envstruct::Record` (the field
/// list walked by the binder) and `envstruct::EnvValue` (so the struct can be
/// nested in other structs, in `Option`, and in `Vec` as `{...}` tokens).
///
/// # Supported Attributes
///
/// **Container-level**:
/// - `#[envstruct(prefix = "PREFIX")]`: Prefix used by `from_env()`
/// - `#[envstruct(unmarshal)]`: Parse the type with its `Unmarshal` impl
///   instead of walking its fields. Also accepted on enums and tuple structs,
///   and the fields of such a type need not be bindable.
///
/// **Field-level**:
/// - `#[envstruct("raw,tag")]`: Raw tag string (`-`, `optional`, `default=...`, custom name)
/// - `#[envstruct(name = "KEY")]`: Read exactly this key
/// - `#[envstruct(optional)]`: A missing value is not an error
/// - `#[envstruct(default = "value")]`: Fallback when no key is set
/// - `#[envstruct(skip)]`: Never touch the field
///
/// Field names enter the key path as UpperCamel segments (`nb_workers` becomes
/// `NbWorkers`), so both `NB_WORKERS` and `NBWORKERS` are accepted.
///
/// Private fields are reported as unexported unless the bind allows them.
#[proc_macro_derive(EnvStruct, attributes(envstruct))]
pub fn derive_envstruct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let container = ContainerAttrs::from_attrs(&input.attrs)?;

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Some(fields),
            _ => None,
        },
        _ => None,
    };

    // An unmarshaled type is a leaf, its fields are never walked
    let record_impl = match named {
        _ if container.unmarshal => None,
        Some(fields) => Some(expand_record(input, fields, &container)?),
        None => {
            return Err(syn::Error::new_spanned(
                input,
                "EnvStruct only supports structs with named fields; \
                 use #[envstruct(unmarshal)] for other types",
            ));
        }
    };

    let value_impl = expand_value(input, &container, record_impl.is_some());

    Ok(quote! {
        #record_impl
        #value_impl
    })
}

fn expand_record(
    input: &DeriveInput,
    fields: &FieldsNamed,
    container: &ContainerAttrs,
) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let field_refs = fields
        .named
        .iter()
        .map(|field| {
            let field_ident = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            let name = path_segment(&field_ident.unraw().to_string());
            let tag = FieldAttrs::from_field(field)?.to_tag();
            let exported = !matches!(field.vis, syn::Visibility::Inherited);

            Ok(quote! {
                ::envstruct::FieldRef {
                    name: #name,
                    tag: #tag,
                    exported: #exported,
                    value: &mut self.#field_ident,
                }
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let prefix_fn = container.prefix.as_ref().map(|prefix| {
        quote! {
            fn prefix(&self) -> ::std::option::Option<&'static str> {
                ::std::option::Option::Some(#prefix)
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::envstruct::Record for #ident #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<::envstruct::FieldRef<'_>> {
                ::std::vec![#(#field_refs),*]
            }

            #prefix_fn
        }
    })
}

/// Convert a snake_case identifier into an UpperCamel path segment.
///
/// Words that do not start with a letter keep their `_`, since there is no
/// case change to mark the boundary (`shard_1` becomes `Shard_1`).
fn path_segment(ident: &str) -> String {
    let mut segment = String::with_capacity(ident.len());
    for word in ident.split('_').filter(|word| !word.is_empty()) {
        let mut chars = word.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        if !segment.is_empty() && !first.is_alphabetic() {
            segment.push('_');
        }
        segment.extend(first.to_uppercase());
        segment.push_str(chars.as_str());
    }
    segment
}

fn expand_value(input: &DeriveInput, container: &ContainerAttrs, is_record: bool) -> TokenStream2 {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let (kind, coerce_body) = if container.unmarshal {
        (
            quote!(::envstruct::Kind::Custom),
            quote! {
                ::envstruct::Unmarshal::unmarshal(self, raw)
                    .map_err(::envstruct::CoerceError::Unmarshal)
            },
        )
    } else {
        (
            quote!(::envstruct::Kind::Record),
            quote!(::envstruct::coerce::record(self, raw, coercion)),
        )
    };

    let as_record = is_record.then(|| {
        quote! {
            fn as_record(&mut self) -> ::std::option::Option<&mut dyn ::envstruct::Record> {
                ::std::option::Option::Some(self)
            }
        }
    });

    quote! {
        impl #impl_generics ::envstruct::EnvValue for #ident #ty_generics #where_clause {
            fn kind(&self) -> ::envstruct::Kind {
                #kind
            }

            #[allow(unused_variables)]
            fn coerce(
                &mut self,
                raw: &str,
                coercion: &::envstruct::Coercion,
            ) -> ::std::result::Result<(), ::envstruct::CoerceError> {
                #coerce_body
            }

            #as_record
        }
    }
}

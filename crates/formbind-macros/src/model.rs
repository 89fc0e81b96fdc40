//! Implementation of `#[derive(Model)]`.
//!
//! The derive emits a `Model` impl whose `descriptor()` returns a
//! `LazyLock`-backed `ModelDescriptor`, one `PropertyDescriptor` per
//! non-skipped field in declaration order.

use std::collections::HashSet;

use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident, Type};

use crate::string_list::StringList;

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(bind), supports(struct_named))]
struct ModelOpts {
    ident: Ident,
    generics: syn::Generics,
    data: darling::ast::Data<(), FieldOpts>,
    #[darling(default)]
    name: Option<String>,
    /// Path to `formbind_core`, for callers that only depend on the facade.
    #[darling(default, rename = "crate")]
    krate: Option<syn::Path>,
}

#[derive(Debug, FromField)]
#[darling(attributes(bind))]
struct FieldOpts {
    ident: Option<Ident>,
    ty: Type,
    #[darling(default)]
    rename: Option<String>,
    #[darling(default)]
    skip: bool,
    #[darling(default)]
    data_source: Option<StringList>,
}

impl FieldOpts {
    fn property_name(&self, ident: &Ident) -> String {
        self.rename.clone().unwrap_or_else(|| ident.to_string())
    }
}

pub fn derive_model_impl(input: DeriveInput) -> TokenStream {
    let opts = match ModelOpts::from_derive_input(&input) {
        Ok(o) => o,
        Err(e) => return e.write_errors(),
    };

    // The descriptor lives in a `static`, which cannot mention generic parameters.
    if !opts.generics.params.is_empty() {
        return syn::Error::new_spanned(&opts.generics, "#[derive(Model)] does not support generic types")
            .to_compile_error();
    }

    let Some(fields) = opts.data.as_ref().take_struct() else {
        return syn::Error::new_spanned(&opts.ident, "#[derive(Model)] only supports named structs")
            .to_compile_error();
    };

    let struct_name = &opts.ident;
    let core = opts
        .krate
        .as_ref()
        .map_or_else(|| quote!(::formbind_core), |path| quote!(#path));
    let type_name = opts.name.clone().unwrap_or_else(|| struct_name.to_string());

    let mut seen = HashSet::new();
    let mut properties = Vec::new();
    for field in fields.fields.iter().filter(|f| !f.skip) {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let name = field.property_name(ident);
        if !seen.insert(name.clone()) {
            return syn::Error::new_spanned(ident, format!("duplicate property name '{name}'"))
                .to_compile_error();
        }
        properties.push(generate_property(&core, struct_name, ident, field, &name));
    }

    quote! {
        impl #core::model::Model for #struct_name {
            fn descriptor() -> &'static #core::model::ModelDescriptor<Self> {
                static DESCRIPTOR: ::std::sync::LazyLock<#core::model::ModelDescriptor<#struct_name>> =
                    ::std::sync::LazyLock::new(|| {
                        #core::model::ModelDescriptor::new(
                            #type_name,
                            ::std::vec![#(#properties),*],
                        )
                    });
                &DESCRIPTOR
            }
        }
    }
}

fn generate_property(
    core: &TokenStream,
    struct_name: &Ident,
    ident: &Ident,
    field: &FieldOpts,
    name: &str,
) -> TokenStream {
    let ty = &field.ty;
    let data_source = field.data_source.as_ref().map(|list| {
        let items = list.iter();
        quote! {
            .with_data_source(#core::value::Value::list([#(#items),*]))
        }
    });

    quote! {
        #core::model::PropertyDescriptor::new::<#ty>(
            #name,
            |m: &#struct_name| &m.#ident,
            |m: &mut #struct_name| &mut m.#ident,
        )
        #data_source
    }
}

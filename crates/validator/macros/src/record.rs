use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, Field, parse_macro_input};

use crate::rename::RenameRule;
use crate::support::{attrs, diag, utils};

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(ts) => ts.into(),
        Err(e) => diag::to_compile_error(e),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    utils::require_no_generics(input)?;
    let fields = utils::require_named_fields(input)?;

    let rename_all = container_rename_rule(input)?;

    let mut entries = Vec::with_capacity(fields.named.len());
    for field in &fields.named {
        if let Some(entry) = field_entry(struct_name, field, rename_all)? {
            entries.push(entry);
        }
    }

    Ok(quote! {
        impl ::fieldrules::Record for #struct_name {
            fn schema() -> &'static ::fieldrules::Schema<Self> {
                static SCHEMA: ::std::sync::LazyLock<::fieldrules::Schema<#struct_name>> =
                    ::std::sync::LazyLock::new(|| {
                        ::fieldrules::Schema::builder()
                            #(#entries)*
                            .build()
                    });
                &SCHEMA
            }
        }
    })
}

/// `#[record(rename_all = ...)]` wins over `#[serde(rename_all = ...)]`.
fn container_rename_rule(input: &DeriveInput) -> syn::Result<Option<RenameRule>> {
    let record_attrs = attrs::parse_attrs(&input.attrs, "record")?;
    let serde_attrs = attrs::parse_foreign_attrs(&input.attrs, "serde");

    let Some(name) = record_attrs
        .get_string("rename_all")
        .or_else(|| serde_attrs.get_serialize_string("rename_all"))
    else {
        return Ok(None);
    };

    RenameRule::from_name(&name).map(Some).ok_or_else(|| {
        diag::error_spanned(
            &input.ident,
            format!("unknown rename_all rule `{name}`"),
        )
    })
}

/// One `.field(..)` / `.tagged(..)` builder call, or `None` for
/// `#[record(skip)]`.
fn field_entry(
    struct_name: &syn::Ident,
    field: &Field,
    rename_all: Option<RenameRule>,
) -> syn::Result<Option<TokenStream2>> {
    let record_attrs = attrs::parse_attrs(&field.attrs, "record")?;
    if record_attrs.has_flag("skip") {
        return Ok(None);
    }
    let serde_attrs = attrs::parse_foreign_attrs(&field.attrs, "serde");

    let Some(member) = field.ident.as_ref() else {
        return Err(diag::error_spanned(field, "Record requires named fields"));
    };
    let ident = member.unraw().to_string();

    let tag = if let Some(tag) = record_attrs.get_string("rename") {
        Some(tag)
    } else if serde_attrs.has_flag("skip") || serde_attrs.has_flag("skip_serializing") {
        None
    } else if let Some(name) = serde_attrs.get_serialize_string("rename") {
        Some(name)
    } else {
        rename_all.map(|rule| rule.apply_to_field(&ident))
    };

    let getter = quote! {
        |record: &#struct_name| ::fieldrules::record::to_field_value(&record.#member)
    };

    Ok(Some(match tag {
        Some(tag) => quote! { .tagged(#ident, #tag, #getter) },
        None => quote! { .field(#ident, #getter) },
    }))
}

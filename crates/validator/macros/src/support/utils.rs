use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, FieldsNamed};

/// Return the named fields of a struct; anything else is an error.
pub fn require_named_fields(input: &DeriveInput) -> syn::Result<&FieldsNamed> {
    let fields = match &input.data {
        Data::Struct(s) => &s.fields,
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "Record can only be derived for structs",
            ));
        }
    };

    match fields {
        Fields::Named(named) => Ok(named),
        Fields::Unnamed(_) => Err(syn::Error::new(
            fields.span(),
            "Record requires a struct with named fields (e.g. `struct X { ... }`)",
        )),
        Fields::Unit => Err(syn::Error::new(
            fields.span(),
            "Record requires a non-unit struct with fields",
        )),
    }
}

/// Reject generic structs: the derived schema lives in a `static`, which
/// cannot depend on type parameters.
pub fn require_no_generics(input: &DeriveInput) -> syn::Result<()> {
    if input.generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new(
            input.generics.span(),
            "Record cannot be derived for generic structs; implement it by hand",
        ))
    }
}

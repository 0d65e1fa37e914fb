//! # fieldrules-macros
//!
//! `#[derive(Record)]` for the `fieldrules` crate. Use it
//! through the `fieldrules` re-export rather than depending on this crate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod record;
mod rename;
mod support;

/// Derive macro for the `Record` trait.
///
/// Builds the type's field table once, on first use. Every named field is
/// looked up by its Rust name; its external name is taken from, in order:
///
/// 1. `#[record(rename = "...")]`
/// 2. nothing, if the field has `#[serde(skip)]` or `#[serde(skip_serializing)]`
/// 3. `#[serde(rename = "...")]`, or the `serialize` half of
///    `#[serde(rename(serialize = "...", deserialize = "..."))]`
/// 4. the container's `#[record(rename_all = "...")]` or
///    `#[serde(rename_all = "...")]` applied to the field name
///
/// Without any of these the field has no external name and errors use its
/// Rust name. Only the part of a name before the first `,` is kept, and `-`
/// means "no external name".
///
/// Field values reach predicates through `serde::Serialize`, so every field
/// in the table must implement it. `#[record(skip)]` leaves a field out of
/// the table entirely; rules naming it are then treated as naming an
/// unknown field.
///
/// Generic structs are not supported.
///
/// # Example
///
/// ```ignore
/// use fieldrules::Record;
/// use serde::Serialize;
///
/// #[derive(Serialize, Record)]
/// #[serde(rename_all = "camelCase")]
/// pub struct Signup {
///     first_name: String,
///     #[serde(rename = "mail")]
///     email: String,
///     #[serde(skip)]
///     #[record(skip)]
///     session: Session,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive(input)
}

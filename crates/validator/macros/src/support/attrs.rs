use syn::{
    Attribute, Expr, ExprLit, Ident, Lit, Meta, Result, Token,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

use crate::support::diag;

/// Parsed attribute arguments container.
#[derive(Debug, Clone, Default)]
pub struct AttrArgs {
    pub items: Vec<AttrItem>,
}

/// A single attribute item.
#[derive(Debug, Clone)]
pub enum AttrItem {
    /// A flag like `skip`
    Flag(Ident),
    /// Key-value pair like `rename = "value"`
    KeyValue { key: Ident, value: Expr },
    /// Nested list like `rename(serialize = "a", deserialize = "b")`
    Nested { key: Ident, args: AttrArgs },
}

impl AttrArgs {
    /// Find a key-value pair by key name.
    pub fn get_value(&self, key: &str) -> Option<&Expr> {
        self.items.iter().find_map(|item| match item {
            AttrItem::KeyValue { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }

    /// Get a string value by key.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_value(key).and_then(|expr| match expr {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => Some(s.value()),
            _ => None,
        })
    }

    /// Get the arguments of a nested list by key.
    pub fn get_nested(&self, key: &str) -> Option<&AttrArgs> {
        self.items.iter().find_map(|item| match item {
            AttrItem::Nested { key: k, args } if k == key => Some(args),
            _ => None,
        })
    }

    /// The serialization-side value of a serde-style key: either
    /// `key = "..."` or `key(serialize = "...")`.
    pub fn get_serialize_string(&self, key: &str) -> Option<String> {
        self.get_string(key)
            .or_else(|| self.get_nested(key)?.get_string("serialize"))
    }

    /// Check if a flag is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, AttrItem::Flag(f) if f == flag))
    }
}

/// Parse attribute like `#[record(...)]` (the whole Attribute, not only args).
pub fn parse_attr(attr: &Attribute, expected: &str) -> Result<Option<AttrArgs>> {
    if !attr.path().is_ident(expected) {
        return Ok(None);
    }

    match &attr.meta {
        Meta::Path(_) => Ok(Some(AttrArgs::default())),
        Meta::List(list) => {
            let args = syn::parse2::<AttrArgsParser>(list.tokens.clone())?;
            Ok(Some(args.0))
        }
        Meta::NameValue(nv) => Err(diag::error_spanned(
            nv,
            format!("#[{expected}] must be #[{expected}(...)] or #[{expected}] (not name-value)"),
        )),
    }
}

/// Parse all attributes of a given type and merge them.
pub fn parse_attrs(attrs: &[Attribute], name: &str) -> Result<AttrArgs> {
    let mut result = AttrArgs::default();

    for attr in attrs {
        if let Some(args) = parse_attr(attr, name)? {
            result.items.extend(args.items);
        }
    }

    Ok(result)
}

/// Like [`parse_attrs`] for attributes owned by another derive: anything this
/// grammar cannot read is left for that derive to report.
pub fn parse_foreign_attrs(attrs: &[Attribute], name: &str) -> AttrArgs {
    let mut result = AttrArgs::default();

    for attr in attrs {
        if let Ok(Some(args)) = parse_attr(attr, name) {
            result.items.extend(args.items);
        }
    }

    result
}

struct AttrArgsParser(AttrArgs);

impl Parse for AttrArgsParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let items = if input.is_empty() {
            vec![]
        } else {
            Punctuated::<AttrItemParser, Token![,]>::parse_terminated(input)?
                .into_iter()
                .map(|x| x.0)
                .collect()
        };
        Ok(Self(AttrArgs { items }))
    }
}

struct AttrItemParser(AttrItem);

impl Parse for AttrItemParser {
    fn parse(input: ParseStream) -> Result<Self> {
        // `parse_any` so keywords such as `crate` are accepted as keys.
        let key = Ident::parse_any(input)?;

        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            let value: Expr = input.parse()?;
            return Ok(Self(AttrItem::KeyValue { key, value }));
        }

        if input.peek(syn::token::Paren) {
            let content;
            syn::parenthesized!(content in input);
            let args = content.parse::<AttrArgsParser>()?.0;
            return Ok(Self(AttrItem::Nested { key, args }));
        }

        Ok(Self(AttrItem::Flag(key)))
    }
}

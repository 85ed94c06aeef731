use proc_macro2::Span;
use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta, Type, TypePath};

/// String literal for generated code, resolved at the derive's call site.
pub fn call_site_lit(value: &str) -> LitStr {
    LitStr::new(value, Span::call_site())
}

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}

/// Placeholder shown in usage text for a plain `FromStr` field, e.g. `usize` or `f64`.
pub fn placeholder_from_type(ty: &Type) -> String {
    if let Type::Path(TypePath { path, .. }) = ty
        && let Some(seg) = path.segments.last()
    {
        return seg.ident.to_string().to_ascii_lowercase();
    }
    String::from("value")
}

/// First non-empty line of the field's `///` docs.
pub fn doc_summary(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => Some(lit.value()),
                _ => None,
            },
            _ => None,
        })
        .map(|line| line.trim().to_string())
        .find(|line| !line.is_empty())
        .unwrap_or_default()
}

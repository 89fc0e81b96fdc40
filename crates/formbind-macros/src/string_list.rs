//! `StringList`, a darling-parsable list of string literals.
//!
//! Darling implements `FromMeta` for `Vec<LitStr>` but not for `Vec<String>`,
//! so data sources are parsed through this newtype. Both spellings work:
//! `data_source("a", "b")` and `data_source = ["a", "b"]`.

use darling::ast::NestedMeta;
use darling::FromMeta;
use syn::{Expr, ExprLit, Lit};

/// The literal strings of a `data_source` attribute, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct StringList(pub Vec<String>);

impl StringList {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromMeta for StringList {
    fn from_list(items: &[NestedMeta]) -> darling::Result<Self> {
        let mut errors = darling::Error::accumulator();
        let strings = items
            .iter()
            .filter_map(|item| {
                errors.handle(match item {
                    NestedMeta::Lit(Lit::Str(lit)) => Ok(lit.value()),
                    _ => Err(darling::Error::unexpected_type("non-string literal")),
                })
            })
            .collect();
        errors.finish_with(Self(strings))
    }

    fn from_expr(expr: &Expr) -> darling::Result<Self> {
        let Expr::Array(array) = expr else {
            return Err(darling::Error::unexpected_expr_type(expr));
        };
        let mut errors = darling::Error::accumulator();
        let strings = array
            .elems
            .iter()
            .filter_map(|elem| {
                errors.handle(match elem {
                    Expr::Lit(ExprLit { lit: Lit::Str(lit), .. }) => Ok(lit.value()),
                    other => Err(darling::Error::unexpected_type("non-string element").with_span(other)),
                })
            })
            .collect();
        errors.finish_with(Self(strings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_list_syntax() {
        let items = NestedMeta::parse_meta_list(quote::quote!("Post", "Courier")).unwrap();
        let list = StringList::from_list(&items).unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), ["Post", "Courier"]);
    }

    #[test]
    fn test_from_expr_syntax() {
        let expr: Expr = syn::parse_quote!(["Red", "Green"]);
        let list = StringList::from_expr(&expr).unwrap();
        assert_eq!(list.0, vec!["Red".to_string(), "Green".to_string()]);
    }

    #[test]
    fn test_rejects_non_strings() {
        let expr: Expr = syn::parse_quote!(["Red", 7]);
        assert!(StringList::from_expr(&expr).is_err());
        let expr: Expr = syn::parse_quote!("Red");
        assert!(StringList::from_expr(&expr).is_err());
    }
}

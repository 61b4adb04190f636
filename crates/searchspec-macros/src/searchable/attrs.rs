//! Attribute parsing for the Searchable derive macro.
//!
//! Parses the `#[search(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[search(...)]`.
#[derive(Debug, Clone)]
pub struct SearchAttr {
    /// Leave this field out of the shape.
    pub skip: bool,
    /// Mount the field's own shape under the field's path.
    pub nested: bool,
    /// Custom attribute path (default: field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for SearchAttr {
    fn default() -> Self {
        SearchAttr {
            skip: false,
            nested: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for SearchAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = SearchAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => {
                    attr.skip = true;
                    attr.span = p.span();
                }
                Meta::Path(p) if p.is_ident("nested") => {
                    attr.nested = true;
                    attr.span = p.span();
                }

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        attr.rename = Some(s.value());
                        attr.span = s.span();
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown search attribute. Expected: skip, nested, or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && (attr.nested || attr.rename.is_some()) {
            return Err(Error::new(
                attr.span,
                "skip cannot be combined with nested or rename",
            ));
        }

        Ok(attr)
    }
}

/// Extract `#[search(...)]` attributes from a field's attributes.
pub fn parse_search_attrs(attrs: &[Attribute]) -> Result<SearchAttr> {
    for attr in attrs {
        if attr.path().is_ident("search") {
            return attr.parse_args::<SearchAttr>();
        }
    }
    Ok(SearchAttr::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_search(tokens: &str) -> Result<SearchAttr> {
        syn::parse_str::<SearchAttr>(tokens)
    }

    #[test]
    fn test_search_skip() {
        let attr = parse_search("skip").unwrap();
        assert!(attr.skip);
        assert!(!attr.nested);
        assert_eq!(attr.rename, None);
    }

    #[test]
    fn test_search_nested() {
        let attr = parse_search("nested").unwrap();
        assert!(attr.nested);
        assert!(!attr.skip);
    }

    #[test]
    fn test_search_rename() {
        let attr = parse_search(r#"rename = "full_name""#).unwrap();
        assert_eq!(attr.rename, Some("full_name".to_string()));
    }

    #[test]
    fn test_search_nested_with_rename() {
        let attr = parse_search(r#"nested, rename = "expertise""#).unwrap();
        assert!(attr.nested);
        assert_eq!(attr.rename, Some("expertise".to_string()));
    }

    #[test]
    fn test_search_rename_requires_string() {
        let result = parse_search("rename = 3");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("rename must be a string literal"));
    }

    #[test]
    fn test_search_unknown() {
        let result = parse_search("String");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown search attribute"));
    }

    #[test]
    fn test_search_skip_conflicts() {
        assert!(parse_search("skip, nested").is_err());
        assert!(parse_search(r#"skip, rename = "x""#).is_err());
    }

    #[test]
    fn test_missing_attribute_is_default() {
        let attrs: Vec<Attribute> = vec![syn::parse_quote!(#[doc = "a field"])];
        let attr = parse_search_attrs(&attrs).unwrap();
        assert!(!attr.skip);
        assert!(!attr.nested);
    }
}

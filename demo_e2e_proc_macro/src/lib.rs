use proc_macro2::{Ident, Span, TokenStream, TokenTree};
use quote::quote;

/// Browsers a scenario can be generated for, in generation order.
const BROWSERS: [&str; 2] = ["firefox", "chrome"];

/// Turn an `async fn(Session) -> Result<(), ScenarioError>` into one `#[test]` per browser.
///
/// `#[scenario(firefox, chrome)]` (or no arguments, meaning both) expands to a module named
/// after the function, holding the function itself plus a `firefox` and/or `chrome` test. Tests
/// for the same browser are serialized, and all of them are ignored by default because they
/// need a running WebDriver server: run them with `cargo test -- --ignored`.
#[proc_macro_attribute]
pub fn scenario(
    attr: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    core(attr.into(), input.into()).into()
}

fn core(attr: TokenStream, input: TokenStream) -> TokenStream {
    let scenario: syn::ItemFn = match syn::parse2(input) {
        Ok(f) => f,
        Err(e) => return e.to_compile_error(),
    };
    if scenario.sig.asyncness.is_none() {
        return syn::Error::new_spanned(
            scenario.sig.fn_token,
            "#[scenario] can only be applied to an `async fn`",
        )
        .to_compile_error();
    }

    let browsers = match get_raw_args(attr).and_then(browsers) {
        Ok(browsers) => browsers,
        Err(e) => return e.to_compile_error(),
    };

    let fn_name = &scenario.sig.ident;
    let tests = browsers.iter().map(|browser| generate_test_fn(fn_name, browser));

    quote! {
        #[cfg(test)]
        pub mod #fn_name {
            use super::*;

            #scenario

            #(#tests)*
        }
    }
}

/// Validate the requested browsers; none means all of them.
fn browsers(requested: Vec<(String, Span)>) -> syn::Result<Vec<&'static str>> {
    if requested.is_empty() {
        return Ok(BROWSERS.to_vec());
    }
    let mut out = Vec::new();
    for (name, span) in requested {
        match BROWSERS.iter().find(|b| **b == name) {
            Some(b) if !out.contains(b) => out.push(*b),
            Some(_) => {
                return Err(syn::Error::new(span, format!("`{}` is listed twice", name)));
            }
            None => {
                return Err(syn::Error::new(
                    span,
                    format!("unknown browser `{}`, expected `firefox` or `chrome`", name),
                ));
            }
        }
    }
    Ok(out)
}

fn generate_test_fn(func: &Ident, browser: &str) -> TokenStream {
    let test_name = Ident::new(browser, Span::call_site());

    quote! {
        #[test]
        #[serial_test::serial(#test_name)]
        #[ignore = "live scenario: needs a running WebDriver server and network access"]
        fn #test_name() {
            if let Err(e) = ::demo_e2e::session::run_scenario(module_path!(), #browser, #func) {
                panic!("{} failed on {} ({:?}): {}", module_path!(), #browser, e.kind(), e);
            }
        }
    }
}

fn get_raw_args(attr: TokenStream) -> syn::Result<Vec<(String, Span)>> {
    let mut attrs = attr.into_iter().collect::<Vec<TokenTree>>();
    let mut raw_args = Vec::new();
    while !attrs.is_empty() {
        match attrs.remove(0) {
            TokenTree::Ident(id) => raw_args.push((id.to_string(), id.span())),
            TokenTree::Literal(literal) => {
                let s = literal.to_string();
                if s.len() < 2 || !s.starts_with('"') || !s.ends_with('"') {
                    return Err(syn::Error::new(
                        literal.span(),
                        format!("expected a string literal, got `{}`", s),
                    ));
                }
                raw_args.push((s[1..s.len() - 1].to_string(), literal.span()));
            }
            x => {
                return Err(syn::Error::new(
                    x.span(),
                    format!("expected a browser name, not `{}`", x),
                ));
            }
        }
        if !attrs.is_empty() {
            match attrs.remove(0) {
                TokenTree::Punct(p) if p.as_char() == ',' => {}
                x => {
                    return Err(syn::Error::new(
                        x.span(),
                        format!("expected `,` between browsers, not `{}`", x),
                    ));
                }
            }
        }
    }
    Ok(raw_args)
}


#[cfg(test)]
mod get_raw_args {
    use super::get_raw_args;
    use quote::quote;

    fn names(attr: proc_macro2::TokenStream) -> Vec<String> {
        get_raw_args(attr)
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    #[test]
    fn chrome_literal() {
        assert_eq!(names(quote! {"chrome"}), vec!["chrome"]);
    }

    #[test]
    fn chrome_ident_firefox_literal() {
        assert_eq!(names(quote! {chrome, "firefox"}), vec!["chrome", "firefox"]);
    }

    #[test]
    fn chrome_ident_firefox_ident() {
        assert_eq!(names(quote! {chrome, firefox}), vec!["chrome", "firefox"]);
    }

    #[test]
    fn trailing_comma() {
        assert_eq!(names(quote! {firefox,}), vec!["firefox"]);
    }

    #[test]
    fn missing_separator() {
        assert!(get_raw_args(quote! {firefox chrome}).is_err());
    }

    #[test]
    fn non_string_literal() {
        assert!(get_raw_args(quote! {42}).is_err());
    }
}

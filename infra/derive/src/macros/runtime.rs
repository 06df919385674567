//! `#[hbnb_runtime::main]`: runs an `async fn` on the server runtime of `hbnb-runtime`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Error, Expr, ExprLit, ItemFn, Lit, LitInt, LitStr, MetaNameValue, ReturnType, Token, Type};

#[must_use]
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    validate(&input)
        .and_then(|()| Overrides::parse(args))
        .map_or_else(Error::into_compile_error, |overrides| wrap(&input, &overrides))
}

/// `workers = <int>` and `thread_name = "<name>"`, each at most once.
#[derive(Default)]
struct Overrides {
    workers: Option<LitInt>,
    thread_name: Option<LitStr>,
}

impl Overrides {
    fn parse(args: TokenStream) -> syn::Result<Self> {
        let mut overrides = Self::default();
        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated.parse2(args)?;

        for pair in pairs {
            let Expr::Lit(ExprLit { lit, .. }) = &pair.value else {
                return Err(Error::new_spanned(&pair.value, "expected a literal value"));
            };
            let key = pair.path.get_ident().map(ToString::to_string);
            match (key.as_deref(), lit) {
                (Some("workers"), Lit::Int(workers)) if overrides.workers.is_none() => {
                    if workers.base10_parse::<usize>()? == 0 {
                        return Err(Error::new_spanned(workers, "`workers` must be at least 1"));
                    }
                    overrides.workers = Some(workers.clone());
                }
                (Some("thread_name"), Lit::Str(name)) if overrides.thread_name.is_none() => {
                    if name.value().trim().is_empty() {
                        return Err(Error::new_spanned(name, "`thread_name` must not be blank"));
                    }
                    overrides.thread_name = Some(name.clone());
                }
                _ => {
                    return Err(Error::new_spanned(
                        &pair,
                        "expected `workers = <int>` or `thread_name = \"<name>\"`, each at most once",
                    ));
                }
            }
        }
        Ok(overrides)
    }

    fn config(&self) -> TokenStream {
        let workers = self.workers.as_ref().map(|workers| quote! { .with_worker_threads(#workers) });
        let thread_name = self.thread_name.as_ref().map(|name| quote! { .with_thread_name(#name) });
        quote! { ::hbnb_runtime::RuntimeConfig::server() #workers #thread_name }
    }
}

fn validate(input: &ItemFn) -> syn::Result<()> {
    let sig = &input.sig;
    if sig.asyncness.is_none() {
        return Err(Error::new_spanned(sig.fn_token, "#[hbnb_runtime::main] needs an `async fn`"));
    }
    if !sig.inputs.is_empty() {
        return Err(Error::new_spanned(&sig.inputs, "#[hbnb_runtime::main] takes no arguments"));
    }
    if !sig.generics.params.is_empty() {
        return Err(Error::new_spanned(&sig.generics, "#[hbnb_runtime::main] cannot be generic"));
    }
    if !returns_result(&sig.output) {
        return Err(Error::new_spanned(
            &sig.output,
            "#[hbnb_runtime::main] needs a `Result` return type",
        ));
    }
    Ok(())
}

fn wrap(input: &ItemFn, overrides: &Overrides) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;
    let name = &sig.ident;
    let output = &sig.output;
    let config = overrides.config();

    quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let config = #config;
            let runtime = ::hbnb_runtime::build_runtime(&config)?;
            runtime.block_on(async move #block)
        }
    }
}

fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = &**ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|seg| seg.ident == "Result")
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(args: TokenStream, input: ItemFn) -> String {
        expand_main(args, input).to_string()
    }

    fn server_main() -> ItemFn {
        parse_quote! {
            async fn main() -> anyhow::Result<()> { Ok(()) }
        }
    }

    #[test]
    fn bare_attribute_uses_the_server_preset() {
        let out = expand(TokenStream::new(), server_main());
        assert!(out.contains("RuntimeConfig :: server ()"));
        assert!(out.contains("build_runtime (& config)"));
        assert!(!out.contains("with_worker_threads"));
    }

    #[test]
    fn overrides_are_chained_onto_the_preset() {
        let out = expand(quote! { workers = 2, thread_name = "hbnb-test" }, server_main());
        assert!(out.contains(". with_worker_threads (2)"));
        assert!(out.contains(". with_thread_name (\"hbnb-test\")"));
    }

    #[test]
    fn bad_arguments_are_compile_errors() {
        for args in [
            quote! { high_performance },
            quote! { workers = 0 },
            quote! { workers = "four" },
            quote! { workers = 2, workers = 3 },
            quote! { thread_name = " " },
            quote! { stack = 4 },
        ] {
            assert!(expand(args, server_main()).contains("compile_error"));
        }
    }

    #[test]
    fn signature_is_checked() {
        let blocking: ItemFn = parse_quote! { fn main() -> anyhow::Result<()> { Ok(()) } };
        let with_args: ItemFn = parse_quote! { async fn main(port: u16) -> anyhow::Result<()> { Ok(()) } };
        let unit: ItemFn = parse_quote! { async fn main() {} };

        for input in [blocking, with_args, unit] {
            assert!(expand(TokenStream::new(), input).contains("compile_error"));
        }
    }
}

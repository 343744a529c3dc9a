use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, FnArg, Ident, ItemFn, PatType, ReturnType, Type};

enum Params {
    Fixed(Vec<Ident>),
    Variadic(Ident),
}

fn is_f64(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "f64"),
        _ => false,
    }
}

fn is_f64_slice(ty: &Type) -> bool {
    match ty {
        Type::Reference(reference) => match &*reference.elem {
            Type::Slice(slice) => is_f64(&slice.elem),
            _ => false,
        },
        _ => false,
    }
}

fn returns_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Type(_, ty) => match &**ty {
            Type::Path(type_path) => type_path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Result"),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

fn collect_params(input: &ItemFn) -> syn::Result<Params> {
    let mut fixed = Vec::new();
    let inputs: Vec<&FnArg> = input.sig.inputs.iter().collect();

    for arg in &inputs {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return Err(syn::Error::new_spanned(arg, "builtin functions take no receiver"));
        };
        let ident = match &**pat {
            syn::Pat::Ident(pat_ident) => pat_ident.ident.clone(),
            other => return Err(syn::Error::new_spanned(other, "unsupported pattern")),
        };

        if is_f64_slice(ty) {
            if inputs.len() != 1 {
                return Err(syn::Error::new_spanned(
                    ty,
                    "a variadic builtin takes exactly one `&[f64]` parameter",
                ));
            }
            return Ok(Params::Variadic(ident));
        }
        if !is_f64(ty) {
            return Err(syn::Error::new_spanned(ty, "builtin parameters must be `f64`"));
        }
        fixed.push(ident);
    }

    Ok(Params::Fixed(fixed))
}

/// Turns `fn name(a: f64, b: f64) -> f64` into a registry callable
/// `fn name(args: &[f64]) -> Result<f64, ExprError>` that checks its argument
/// count first, and emits `NAME_ARITY: Arity` next to it.
///
/// A single `&[f64]` parameter makes the builtin variadic (at least one
/// argument). The expansion names `ExprError` and `Arity` unqualified, so both
/// must be in scope at the call site.
#[proc_macro_attribute]
pub fn builtin_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let params = match collect_params(&input) {
        Ok(params) => params,
        Err(err) => return err.to_compile_error().into(),
    };

    let attrs = &input.attrs;
    let vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_body = &input.block;
    let name_str = fn_name.to_string();
    let arity_ident = format_ident!("{}_ARITY", name_str.to_uppercase());

    let (arity, prelude): (TokenStream2, TokenStream2) = match params {
        Params::Fixed(idents) => {
            let count = idents.len();
            let indices = 0..count;
            (
                quote! { Arity::Exact(#count) },
                quote! {
                    if args.len() != #count {
                        return Err(ExprError::ArityMismatch {
                            name: #name_str.to_string(),
                            expected: #arity_ident,
                            actual: args.len(),
                        });
                    }
                    #(let #idents = args[#indices];)*
                },
            )
        }
        Params::Variadic(ident) => (
            quote! { Arity::Variadic },
            quote! {
                if args.is_empty() {
                    return Err(ExprError::ArityMismatch {
                        name: #name_str.to_string(),
                        expected: #arity_ident,
                        actual: 0,
                    });
                }
                let #ident: &[f64] = args;
            },
        ),
    };

    let body = if returns_result(&input.sig.output) {
        quote! { #fn_body }
    } else {
        quote! { Ok(#fn_body) }
    };

    let expanded = quote! {
        #vis const #arity_ident: Arity = #arity;

        #(#attrs)*
        #vis fn #fn_name(args: &[f64]) -> ::std::result::Result<f64, ExprError> {
            #prelude
            #body
        }
    };

    TokenStream::from(expanded)
}

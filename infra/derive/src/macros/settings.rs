use super::derived_traits;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ItemStruct, Lit, LitStr, Meta, MetaNameValue, Token};

const DEFAULT_RENAME: &str = "PascalCase";

#[derive(Default)]
struct SettingsArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
    default: Option<bool>,
}

/// Serde container attributes the author already wrote by hand.
#[derive(Default)]
struct ExistingSerde {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
    default: bool,
}

/// Expands `#[settings_model]`.
pub fn expand(args: TokenStream, input: ItemStruct) -> TokenStream {
    match try_expand(args, &input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn try_expand(args: TokenStream, input: &ItemStruct) -> syn::Result<TokenStream> {
    let args = parse_args(args)?;
    let existing = existing_serde(&input.attrs)?;

    let derive = derive_attr(&input.attrs);
    let rename = rename_attr(args.rename_all, &existing)?;
    let deny = flag_attr(
        args.deny_unknown_fields.unwrap_or(false),
        existing.deny_unknown_fields,
        quote! { #[serde(deny_unknown_fields)] },
    );
    let default = flag_attr(args.default.unwrap_or(false), existing.default, quote! {
        #[serde(default)]
    });

    Ok(quote! {
        #derive
        #rename
        #deny
        #default
        #input
    })
}

fn parse_args(args: TokenStream) -> syn::Result<SettingsArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;
    let mut parsed = SettingsArgs::default();

    for meta in metas {
        let Meta::NameValue(pair) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "expected name-value arguments like `rename_all = \"camelCase\"`",
            ));
        };

        if pair.path.is_ident("rename_all") {
            let value = string_literal(&pair)?;
            set_once(&mut parsed.rename_all, &pair, value)?;
        } else if pair.path.is_ident("deny_unknown_fields") {
            let value = bool_literal(&pair)?;
            set_once(&mut parsed.deny_unknown_fields, &pair, value)?;
        } else if pair.path.is_ident("default") {
            let value = bool_literal(&pair)?;
            set_once(&mut parsed.default, &pair, value)?;
        } else {
            return Err(syn::Error::new_spanned(
                &pair.path,
                "unsupported argument; expected rename_all, deny_unknown_fields or default",
            ));
        }
    }

    Ok(parsed)
}

fn set_once<T>(slot: &mut Option<T>, pair: &MetaNameValue, value: T) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new_spanned(pair, "duplicate argument"));
    }
    *slot = Some(value);
    Ok(())
}

fn literal<'a>(pair: &'a MetaNameValue) -> Option<&'a Lit> {
    match &pair.value {
        Expr::Lit(expr) => Some(&expr.lit),
        _ => None,
    }
}

fn string_literal(pair: &MetaNameValue) -> syn::Result<LitStr> {
    match literal(pair) {
        Some(Lit::Str(lit)) => Ok(lit.clone()),
        _ => Err(syn::Error::new_spanned(&pair.value, "expected a string literal")),
    }
}

fn bool_literal(pair: &MetaNameValue) -> syn::Result<bool> {
    match literal(pair) {
        Some(Lit::Bool(lit)) => Ok(lit.value),
        _ => Err(syn::Error::new_spanned(&pair.value, "expected a boolean literal")),
    }
}

fn existing_serde(attrs: &[Attribute]) -> syn::Result<ExistingSerde> {
    let mut existing = ExistingSerde::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                existing.rename_all = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("deny_unknown_fields") {
                existing.deny_unknown_fields = true;
            } else if meta.path.is_ident("default") {
                existing.default = true;
                if meta.input.peek(Token![=]) {
                    let _: LitStr = meta.value()?.parse()?;
                }
            } else if meta.input.peek(Token![=]) {
                let _: Expr = meta.value()?.parse()?;
            } else if meta.input.peek(syn::token::Paren) {
                let nested;
                syn::parenthesized!(nested in meta.input);
                let _: TokenStream = nested.parse()?;
            }
            Ok(())
        })?;
    }

    Ok(existing)
}

fn derive_attr(attrs: &[Attribute]) -> TokenStream {
    let present = derived_traits(attrs);
    let wanted = [
        ("Debug", quote! { Debug }),
        ("Clone", quote! { Clone }),
        ("PartialEq", quote! { PartialEq }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
    ];
    let missing: Vec<_> =
        wanted.into_iter().filter(|(name, _)| !present.contains(*name)).map(|(_, path)| path).collect();

    if missing.is_empty() { quote! {} } else { quote! { #[derive(#(#missing),*)] } }
}

fn rename_attr(requested: Option<LitStr>, existing: &ExistingSerde) -> syn::Result<TokenStream> {
    let requested = requested.unwrap_or_else(|| LitStr::new(DEFAULT_RENAME, Span::call_site()));

    match &existing.rename_all {
        Some(current) if current.value() != requested.value() => Err(syn::Error::new_spanned(
            current,
            "conflicting serde rename_all; remove it or pass the same value to settings_model",
        )),
        Some(_) => Ok(quote! {}),
        None => Ok(quote! { #[serde(rename_all = #requested)] }),
    }
}

fn flag_attr(requested: bool, already_set: bool, attr: TokenStream) -> TokenStream {
    if requested && !already_set { attr } else { quote! {} }
}

use super::derived_traits;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, FieldsNamed, GenericArgument, Ident,
    PathArguments, PathSegment, Type, Variant, Visibility,
};

/// What the expansion needs to know about a single error variant.
struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<&'a Field>,
    has_context: bool,
    cfg: Vec<&'a Attribute>,
}

impl ErrorVariant<'_> {
    fn is_internal(&self) -> bool {
        *self.ident == "Internal"
    }
}

/// Expands `#[apphost_error]`.
pub fn expand(input: DeriveInput) -> TokenStream {
    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "apphost_error can only be applied to enums")
            .to_compile_error();
    };

    let variants = match data.variants.iter().map(inspect_variant).collect::<syn::Result<Vec<_>>>()
    {
        Ok(variants) => variants,
        Err(err) => return err.to_compile_error(),
    };

    let name = &input.ident;
    let ext = format_ident!("{name}Ext");
    let derive = derive_attr(&input.attrs);
    let context_trait = context_trait(&input.vis, name, &ext, &variants);
    let conversions = variants
        .iter()
        .filter(|variant| !variant.is_internal())
        .filter_map(|variant| source_conversion(name, &ext, variant));
    let messages = variants
        .iter()
        .find(|variant| variant.is_internal())
        .map(|variant| message_conversions(name, variant));

    quote! {
        #derive
        #input

        #context_trait
        #(#conversions)*
        #messages

        #[allow(dead_code, clippy::ref_option)]
        fn format_context(
            context: &::std::option::Option<::std::borrow::Cow<'static, str>>,
        ) -> ::std::borrow::Cow<'static, str> {
            context.as_ref().map_or(::std::borrow::Cow::Borrowed(""), |c| {
                ::std::borrow::Cow::Owned(format!(" ({c})"))
            })
        }
    }
}

fn inspect_variant(variant: &Variant) -> syn::Result<ErrorVariant<'_>> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            variant,
            "apphost_error variants must use named fields so source and context can be wired",
        ));
    };

    let has_context = context_field(fields)?.is_some();
    let source = fields.named.iter().find(|field| is_source(field));

    if source.is_some() && !has_context {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "apphost_error variants with a source need `context: Option<Cow<'static, str>>`",
        ));
    }

    Ok(ErrorVariant {
        ident: &variant.ident,
        source,
        has_context,
        cfg: variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect(),
    })
}

fn context_field(fields: &FieldsNamed) -> syn::Result<Option<&Field>> {
    let Some(field) =
        fields.named.iter().find(|field| field.ident.as_ref().is_some_and(|id| id == "context"))
    else {
        return Ok(None);
    };

    if is_context_type(&field.ty) {
        Ok(Some(field))
    } else {
        Err(syn::Error::new_spanned(&field.ty, "context field must be Option<Cow<'static, str>>"))
    }
}

fn is_source(field: &Field) -> bool {
    field.ident.as_ref().is_some_and(|id| id == "source")
        || field.attrs.iter().any(|attr| attr.path().is_ident("source") || attr.path().is_ident("from"))
}

fn derive_attr(attrs: &[Attribute]) -> TokenStream {
    let present = derived_traits(attrs);
    let mut missing = Vec::new();
    if !present.contains("Debug") {
        missing.push(quote! { Debug });
    }
    if !present.contains("Error") {
        missing.push(quote! { ::thiserror::Error });
    }

    if missing.is_empty() { quote! {} } else { quote! { #[derive(#(#missing),*)] } }
}

fn context_trait(
    vis: &Visibility,
    name: &Ident,
    ext: &Ident,
    variants: &[ErrorVariant<'_>],
) -> TokenStream {
    let arms = variants.iter().filter(|variant| variant.has_context).map(|variant| {
        let ident = variant.ident;
        let cfg = &variant.cfg;
        quote! { #(#cfg)* #name::#ident { context, .. } => *context = Some(value.into()), }
    });

    quote! {
        /// Attaches human-readable context to the error branch of a result.
        #vis trait #ext<T> {
            fn context(
                self,
                value: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::std::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::std::result::Result<T, #name> {
            #[inline]
            #[allow(unreachable_patterns)]
            fn context(self, value: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut error| {
                    match &mut error {
                        #(#arms)*
                        _ => {},
                    }
                    error
                })
            }
        }
    }
}

fn source_conversion(name: &Ident, ext: &Ident, variant: &ErrorVariant<'_>) -> Option<TokenStream> {
    let field = variant.source?;
    let binding = field.ident.as_ref()?;
    let ty = &field.ty;
    let ident = variant.ident;
    let cfg = &variant.cfg;

    Some(quote! {
        #(#cfg)*
        #[automatically_derived]
        impl ::std::convert::From<#ty> for #name {
            #[inline]
            fn from(#binding: #ty) -> Self {
                Self::#ident { #binding, context: None }
            }
        }

        #(#cfg)*
        #[automatically_derived]
        impl<T> #ext<T> for ::std::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                value: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::std::result::Result<T, #name> {
                self.map_err(|#binding| #name::#ident { #binding, context: Some(value.into()) })
            }
        }
    })
}

fn message_conversions(name: &Ident, variant: &ErrorVariant<'_>) -> TokenStream {
    let ident = variant.ident;
    let cfg = &variant.cfg;
    let context = variant.has_context.then(|| quote! { context: None, });

    quote! {
        #(#cfg)*
        #[automatically_derived]
        impl ::std::convert::From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::#ident { message: ::std::borrow::Cow::Borrowed(message), #context }
            }
        }

        #(#cfg)*
        #[automatically_derived]
        impl ::std::convert::From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::#ident { message: ::std::borrow::Cow::Owned(message), #context }
            }
        }
    }
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    let Type::Path(path) = ty else {
        return None;
    };
    path.path.segments.last()
}

/// Accepts `Option<Cow<'static, str>>`, with or without path prefixes.
fn is_context_type(ty: &Type) -> bool {
    let Some(option) = last_segment(ty).filter(|seg| seg.ident == "Option") else {
        return false;
    };
    let PathArguments::AngleBracketed(option_args) = &option.arguments else {
        return false;
    };
    let Some(GenericArgument::Type(cow_ty)) = option_args.args.first() else {
        return false;
    };
    let Some(cow) = last_segment(cow_ty).filter(|seg| seg.ident == "Cow") else {
        return false;
    };
    let PathArguments::AngleBracketed(cow_args) = &cow.arguments else {
        return false;
    };

    let mut args = cow_args.args.iter();
    match (args.next(), args.next()) {
        (Some(GenericArgument::Lifetime(lt)), Some(GenericArgument::Type(inner))) => {
            lt.ident == "static" && last_segment(inner).is_some_and(|seg| seg.ident == "str")
        },
        _ => false,
    }
}

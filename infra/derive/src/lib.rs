#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate of the host.
//!
//! * [`apphost_error`] turns a named-field enum into a `thiserror` error with
//!   context support and upstream conversions.
//! * [`settings_model`] applies the serde policy used by `appsettings.json`
//!   documents (`PascalCase` keys, lenient unknown fields).
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! apphost-derive.workspace = true
//! thiserror.workspace = true   # required by `apphost_error`
//! serde.workspace = true       # required by `settings_model`
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro for domain error enums.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug` and `thiserror::Error` unless already present.
/// * **Context**: a companion `<Name>Ext` trait adding `.context(...)` to
///   `Result<T, Name>` and to `Result<T, Source>` for every wrapped source type.
/// * **Conversions**: `From<Source>` for each variant holding a `source` field
///   (or a field marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal fallback**: `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
/// * **Formatting helper**: a module-local `format_context` function for use
///   inside `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields.
/// 3. A variant with a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use apphost_derive::apphost_error;
/// use std::borrow::Cow;
///
/// #[apphost_error]
/// pub enum LoaderError {
///     #[error("Parse failure{}: {source}", format_context(.context))]
///     Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal loader error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> Result<serde_json::Value, LoaderError> {
///     serde_json::from_str(raw).context("Parsing appsettings.json")
/// }
/// ```
#[proc_macro_attribute]
pub fn apphost_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Attribute macro for settings documents deserialized from JSON assets.
///
/// * **Derives**: `Debug`, `Clone`, `PartialEq`, `Serialize` and `Deserialize`
///   unless already present.
/// * **Serde Policy**:
///     * `rename_all = "PascalCase"` by default (`ApiUrl`, `Timeout`).
///     * unknown fields are accepted unless `deny_unknown_fields = true`.
///     * `default = true` adds a container-level `#[serde(default)]`; the type
///       must implement `Default`.
///
/// # Example
///
/// ```rust,ignore
/// use apphost_derive::settings_model;
///
/// #[settings_model(default = true)]
/// pub struct CacheSettings {
///     pub capacity: u64,
///     pub enabled: bool,
/// }
/// ```
#[proc_macro_attribute]
pub fn settings_model(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::settings::expand(args.into(), input).into()
}

#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the management runtime crates.
//!
//! ## Usage
//! Every crate in the workspace declares its error enum with [`macro@mgmt_error`]:
//! ```toml
//! [dependencies]
//! mgmt-derive = { path = "../infra/derive" }
//! thiserror = "2"
//! ```
//!
//! Examples below are `ignore`d to avoid compiling in this crate; the UI tests under
//! `tests/ui` exercise the expansion.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring a crate's error enum.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context(..)`
///   to any `Result` that can be converted into this error type.
/// * **Source Conversions**: Implements `From<T>` for variants made of exactly a source
///   field and a `context` field, so `?` lifts upstream errors.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>` when an
///   `Internal` variant is present.
///
/// Variants that carry identifying fields next to their source (an object name, a member
/// name) keep the `#[source]` chain but get no `From` impl: the caller must name them.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants with a source must also carry `context`.
///
/// # Example
///
/// ```rust,ignore
/// use mgmt_derive::mgmt_error;
/// use std::borrow::Cow;
///
/// #[mgmt_error]
/// pub enum ConfigError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Settings, ConfigError> {
///     builder.build().context("Building layered config")?.try_deserialize().map_err(Into::into)
/// }
/// ```
#[proc_macro_attribute]
pub fn mgmt_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the GAP workspace.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! gap-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! The macro examples are `ignore`d because a proc-macro crate cannot use its own
//! macros in doctests; see `tests/` for compiled usages.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a workspace error type.
///
/// # Injected items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<Name>Ext` trait adding `.context(...)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant wrapping a `source`.
/// * `From<Source>` for every variant with a `source` field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * `Name::variant_name()` returning the variant identifier, handy as a
///   structured logging field.
/// * A module-level `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted, and every variant must use named fields.
/// 2. A `context` field must be `Option<Cow<'static, str>>`.
/// 3. Variants wrapping another error (`source` field, or `#[source]`/`#[from]`)
///    must also carry `context`.
///
/// # Example
///
/// ```rust,ignore
/// use gap_derive::gap_error;
/// use std::borrow::Cow;
///
/// #[gap_error]
/// pub enum LoadError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &std::path::Path) -> Result<String, LoadError> {
///     std::fs::read_to_string(path).context("Reading bundle manifest")
/// }
/// ```
#[proc_macro_attribute]
pub fn gap_error(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(args.into(), input).into()
}

#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the HBnB crates.
//! They remove the boilerplate around error enums, REST data models, handler
//! documentation and the runtime entry point.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! hbnb-derive = { path = "../infra/derive" }
//! ```
//!
//! The examples below are `ignore`d because a proc-macro crate cannot use its own macros.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Runs an `async fn` returning a `Result` on the server runtime of `hbnb-runtime`.
///
/// The function becomes synchronous: it builds the runtime and blocks on the body. It must take
/// no arguments. `workers = <int>` and `thread_name = "<name>"` override the server preset.
///
/// ```rust,ignore
/// #[hbnb_runtime::main]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro for request/response models of the REST API.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize` and `Deserialize` when missing.
/// * **`OpenAPI`**: `utoipa::ToSchema` when the consuming crate enables its `server` feature.
/// * **Serde Policy**:
///     * `rename_all = "snake_case"` by default, matching the wire format of every entity.
///     * Unknown keys are ignored by default; pass `deny_unknown_fields = true` to reject them.
///
/// # Example
///
/// ```rust,ignore
/// use hbnb_derive::api_model;
///
/// #[api_model]
/// pub struct NewState {
///     pub name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts the usual `utoipa::path` arguments (`get`, `post`, `path = "..."`,
/// `responses(...)`, `tag = "..."`) and only emits the `utoipa::path` attribute
/// when the `server` feature of the consuming crate is enabled.
///
/// # Example
///
/// ```rust,ignore
/// use hbnb_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/status",
///     responses((status = OK, body = StatusResponse)),
///     tag = "System"
/// )]
/// pub async fn status() -> Json<StatusResponse> {
///     Json(StatusResponse::ok())
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Attribute macro for the error enums of every HBnB crate.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&str>` and `From<String>` when an `Internal`
///   variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`), plus a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use hbnb_derive::hbnb_error;
/// use std::borrow::Cow;
///
/// #[hbnb_error]
/// pub enum StorageError {
///     #[error("Hardware I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal storage error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(path: &Path) -> Result<Vec<u8>, StorageError> {
///     std::fs::read(path).context("Loading snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn hbnb_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

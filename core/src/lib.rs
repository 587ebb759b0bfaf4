//! Typed async client for the public Roblox web APIs.
//!
//! # Overview
//! Wraps the users, groups, experiences and thumbnails endpoints. Responses
//! are normalized into stable snake_case records, list parameters are
//! deduplicated before they are sent, and every failure is reported as a
//! [`ClientError`].
//!
//! # Design
//! - `ClientCore::request` is the single request path: build an
//!   `HttpRequest`, execute it through a [`Transport`], decode the body into
//!   an [`Envelope`].
//! - Building and decoding are pure; only the transport performs I/O, so
//!   tests swap in an in-memory transport.
//! - [`RobloxApiClient`] composes the resource clients over one shared core
//!   and holds no mutable state.

pub mod client;
pub mod config;
pub mod error;
pub mod experiences;
pub mod groups;
pub mod http;
pub mod select;
pub mod thumbnails;
pub mod transport;
pub mod types;
pub mod users;
pub mod util;

#[cfg(test)]
mod testing;

pub use client::{ClientCore, Envelope, ResponseBody, RobloxApiClient};
pub use config::ClientConfig;
pub use error::ClientError;
pub use experiences::Experiences;
pub use groups::Groups;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Payload};
pub use thumbnails::map_thumbnails_to_images;
pub use transport::{ReqwestTransport, Transport};
pub use types::*;
pub use users::Users;

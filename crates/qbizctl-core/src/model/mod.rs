//! Typed request and response models for the Q Business API
//!
//! Requests only serialize the fields that travel in the JSON body. Path and
//! query parameters are marked `#[serde(skip)]` and placed by the transport.
//! Optional fields are never serialized when unset, so the service can tell
//! "absent" apart from "empty".
//!
//! Responses default every field so partial payloads still decode, and they
//! serialize every field (including nulls) so output selectors always see the
//! full response shape.

pub mod application;
pub mod common;
pub mod document;
pub mod index;
pub mod subscription;

pub use application::*;
pub use common::*;
pub use document::*;
pub use index::*;
pub use subscription::*;

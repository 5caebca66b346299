//! Named remote-method calls over HTTP.
//!
//! Every backend operation is a `POST /api/method/<dotted.name>` with
//! form-encoded arguments; file uploads go to the generic `upload_file`
//! method as multipart.

mod client;
mod envelope;
mod error;
mod methods;

pub use client::FrappeClient;
pub use error::RpcError;

//! Remote data access: fetch and mutation interfaces, payload decoding, and
//! the HTTP implementation against the admin API.

pub mod api;
pub mod decode;
pub mod http;

pub use api::{FetchPayload, MutationSink, PageQuery, RecordSource, RemoteResponse};
pub use http::HttpRemote;

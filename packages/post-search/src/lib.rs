//! Search session orchestration and result export.
//!
//! Ties the Apify client's submit/poll flow into a single owned session
//! ([`session::SearchSession`]) and turns the resulting records into
//! downloadable JSON or delimited text ([`export`]).

pub mod export;
pub mod session;

pub use apify_client::{Record, ResultSet, SearchRequest};
pub use session::{SearchSession, SessionState};

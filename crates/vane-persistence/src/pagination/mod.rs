//! Cursor-based pagination
//!
//! Listing is keyset-assisted offset pagination: the offset carried by a page
//! token drives positioning, while the key it carries is checked against the
//! current scope so a token cannot be replayed under another namespace.
//!
//! A token whose key was deleted since it was issued is still honoured by
//! offset; concurrent writes may cause skipped or repeated rows. Tokens do
//! not record the sort order, so a token issued under `asc` and replayed under
//! `desc` is accepted and resumes at the same offset in the reversed listing.

pub mod executor;
pub mod page_token;
pub mod query;

pub use executor::{Paginated, list};
pub use query::{NamespaceScope, Order, PageCursor, QueryOption, QueryParams, QueryPlan};

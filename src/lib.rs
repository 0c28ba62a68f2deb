//! zecx - Zcash Blockchain Explorer
//!
//! This library provides the core functionality for zecx, a command-line
//! explorer for a Zcash node's JSON-RPC interface.
//!
//! ## Architecture
//!
//! Two structurally identical resolution pipelines — chain status
//! (`getblockchaininfo`) and block details (`getblock`) — share one RPC
//! transport and one request-deduplication memo:
//!
//! - [`classify`]: decides whether a search identifier is a block height or
//!   a block hash (display framing and the search gate; never changes what
//!   is sent to the node)
//! - [`rpc`]: the `{method, params}` request, the verbatim `{result, error,
//!   id}` envelope, and the single-attempt HTTP transport
//! - [`cache`]: the explicitly-scoped fetch memo keyed by call identity,
//!   with attach-to-pending dedup and an abort capability
//! - [`resolve`]: the two resolvers plus their revalidation entry points
//! - [`types`], [`render`], [`util_text`], [`json_pretty`]: typed payload
//!   views and the text front end that consumes them

// Resolution core
pub mod cache;
pub mod classify;
pub mod resolve;
pub mod rpc;

// Typed payload views
pub mod types;

// Text front end
pub mod json_pretty;
pub mod render;
pub mod util_text;

// Configuration (CLI args > env > defaults)
pub mod config;

// Re-export commonly used types
pub use cache::{AbortFetch, CacheKey, Fetch, FetchCache};
pub use classify::{classify, search_target, Classification};
pub use config::Config;
pub use resolve::Resolver;
pub use rpc::{FetchError, FetchResult, HttpTransport, RpcEnvelope, RpcError, RpcRequest, RpcTransport};
pub use types::{BlockInfo, BlockchainInfo, ValuePool};

//! Chain-status and block resolvers.
//!
//! Two structurally identical pipelines over one transport: a zero-argument
//! call for chain metadata and a one-argument call for a block. The block
//! identifier is forwarded to the node unmodified — `getblock` accepts a
//! height or a hash for its first parameter, and classification is display
//! framing only.

use crate::cache::{CacheKey, Fetch, FetchCache};
use crate::rpc::{RpcRequest, RpcTransport};
use serde_json::Value;
use std::sync::Arc;

pub const METHOD_GET_BLOCKCHAIN_INFO: &str = "getblockchaininfo";
pub const METHOD_GET_BLOCK: &str = "getblock";

/// Issues RPC calls through a shared transport, memoized per call identity.
///
/// The memo handle is passed in at construction; its lifetime (one
/// navigational session, one watch loop, one test) is the caller's decision.
pub struct Resolver {
    transport: Arc<dyn RpcTransport>,
    cache: Arc<FetchCache>,
}

impl Resolver {
    pub fn new(transport: Arc<dyn RpcTransport>, cache: Arc<FetchCache>) -> Self {
        Self { transport, cache }
    }

    /// Resolve current chain metadata (`getblockchaininfo`, no params).
    pub fn chain_info(&self) -> Fetch {
        self.fetch(METHOD_GET_BLOCKCHAIN_INFO, Vec::new())
    }

    /// Resolve a block by height or hash (`getblock`, params `[identifier]`).
    pub fn block(&self, identifier: &str) -> Fetch {
        self.fetch(
            METHOD_GET_BLOCK,
            vec![Value::String(identifier.to_string())],
        )
    }

    /// Revalidation entry point: the next `chain_info` refetches.
    pub fn invalidate_chain_info(&self) {
        self.cache.invalidate(&CacheKey::new(METHOD_GET_BLOCKCHAIN_INFO, &[]));
    }

    /// Revalidation entry point: the next `block(identifier)` refetches.
    pub fn invalidate_block(&self, identifier: &str) {
        let params = [Value::String(identifier.to_string())];
        self.cache.invalidate(&CacheKey::new(METHOD_GET_BLOCK, &params));
    }

    fn fetch(&self, method: &str, params: Vec<Value>) -> Fetch {
        let key = CacheKey::new(method, &params);
        let transport = self.transport.clone();
        let request = RpcRequest::new(method, params);
        self.cache.get_or_spawn(key, move || async move {
            log::debug!("rpc {} {:?}", request.method, request.params);
            transport.post(&request).await
        })
    }
}

//! Search identifier classification for zecx
//!
//! A user-supplied identifier is either a block height (a base-10 integer),
//! a block hash (exactly 64 hex characters), or neither. Classification is
//! total and mutually exclusive: every string lands in exactly one bucket.
//!
//! The height check runs first. A digit-only string that does not fit in a
//! `u64` cannot be a real height; when it is exactly 64 characters long it is
//! still a syntactically valid hash and classifies as such, anything else is
//! invalid.
//!
//! Classification never changes what is sent to the node — `getblock`
//! accepts either form — it only drives display framing and the search-entry
//! gate.

/// How a search identifier was classified
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Non-negative base-10 integer (block height)
    Height(u64),
    /// Exactly 64 hexadecimal characters (block hash, case-insensitive)
    Hash,
    /// Anything else
    Invalid,
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_block_hash(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Classify an identifier as block height, block hash, or invalid.
///
/// Pure and idempotent; no I/O.
pub fn classify(input: &str) -> Classification {
    if is_all_digits(input) {
        if let Ok(height) = input.parse::<u64>() {
            return Classification::Height(height);
        }
        // Digit run too large for any height; a 64-char one is still a
        // syntactically valid hash.
        if is_block_hash(input) {
            return Classification::Hash;
        }
        return Classification::Invalid;
    }
    if is_block_hash(input) {
        return Classification::Hash;
    }
    Classification::Invalid
}

/// Search-entry gate: trim the query and return the identifier to navigate
/// to, or `None` when the query is neither a height nor a hash.
///
/// `None` is a silent no-op by contract — no error is surfaced and no RPC
/// call is issued.
pub fn search_target(query: &str) -> Option<String> {
    let query = query.trim();
    match classify(query) {
        Classification::Height(_) | Classification::Hash => Some(query.to_string()),
        Classification::Invalid => None,
    }
}

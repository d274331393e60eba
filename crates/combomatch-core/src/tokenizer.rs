//! Query tokenizer — splits a raw query into whitespace-delimited terms.

/// Split `query` on runs of whitespace, discarding empty pieces.
///
/// `"  albany   or "` yields `["albany", "or"]`; an empty or
/// whitespace-only query yields nothing.
pub fn tokenize(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}

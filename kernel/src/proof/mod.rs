//! Proof module: canonical JSON bytes and domain-separated content hashing.
//!
//! State digests computed here are how sessions prove that an undo restored
//! exactly the previous state and that two runs made identical decisions.

pub mod canon;
pub mod hash;
pub mod hash_domain;

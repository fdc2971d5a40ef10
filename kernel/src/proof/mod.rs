//! Proof module: canonical JSON and domain-separated content hashing.
//!
//! Depends on nothing else in the kernel. Used for plan fingerprints and
//! search report digests.

pub mod canon;
pub mod hash;
pub mod hash_domain;

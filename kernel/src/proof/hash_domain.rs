//! Typed domain separators for canonical hashing.
//!
//! Every hash computation selects a domain via [`HashDomain`]. Adding a
//! domain is a single change here: the enum, `as_bytes()`, `ALL`, and
//! `Display` all come from the same macro invocation.

/// Declares `HashDomain` enum, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used
        /// as a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Problem text commitment (initial facts + goal + object counts).
    Problem => b"SNLP::PROBLEM::V1\0",

    /// Partial plan fingerprint (variables renamed by first appearance).
    Plan => b"SNLP::PLAN::V1\0",

    /// Search report digest.
    SearchReport => b"SNLP::SEARCH_REPORT::V1\0",

    /// Rendered plan output (the `actions` / `constraints` text).
    PlanOutput => b"SNLP::PLAN_OUTPUT::V1\0",
}

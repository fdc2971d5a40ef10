//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. Canonical domain set has expected count (catches forgotten additions to ALL)
//! 2. All domain byte strings are unique
//! 3. All domains are null-terminated
//! 4. All domains follow the `SNLP::*::V1\0` naming convention
//! 5. No raw `SNLP::` domain literals in production source outside `hash_domain.rs`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use snlp_kernel::proof::hash_domain::HashDomain;

#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        4,
        "expected 4 domain variants; if you added a new domain, update this count"
    );
}

#[test]
fn hash_domain_all_unique_bytes() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(
            seen.insert(domain.as_bytes()),
            "duplicate domain bytes: {domain}"
        );
    }
}

#[test]
fn hash_domain_all_null_terminated() {
    for domain in HashDomain::ALL {
        assert_eq!(
            domain.as_bytes().last(),
            Some(&0u8),
            "{domain} is not null-terminated"
        );
    }
}

#[test]
fn hash_domain_naming_convention() {
    for domain in HashDomain::ALL {
        let text = std::str::from_utf8(domain.as_bytes()).expect("domain is ASCII");
        assert!(text.starts_with("SNLP::"), "{domain}: {text:?}");
        assert!(text.ends_with("::V1\0"), "{domain}: {text:?}");
    }
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("workspace root exists")
        .to_path_buf()
}

fn rust_sources(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            rust_sources(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            out.push(path);
        }
    }
}

#[test]
fn no_raw_domain_literals_outside_registry() {
    let root = workspace_root();
    let mut files = Vec::new();
    for krate in ["kernel", "search", "harness"] {
        rust_sources(&root.join(krate).join("src"), &mut files);
    }
    assert!(!files.is_empty(), "no sources found under {}", root.display());

    let needle = concat!("b\"", "SNLP::");
    for file in files {
        if file.ends_with("hash_domain.rs") {
            continue;
        }
        let text = std::fs::read_to_string(&file).expect("readable source");
        assert!(
            !text.contains(needle),
            "raw domain literal in {}",
            file.display()
        );
    }
}

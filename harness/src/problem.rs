//! Problem reader: the line-oriented problem file format.
//!
//! ```text
//! locations 2
//! robots 1
//! cranes 0
//! piles 0
//! containers 0
//! # comments and blank lines are skipped
//! at r0 l0
//! free l1
//! adjacent l0 l1
//! goal
//! at r0 l1
//! ```
//!
//! The five header lines come first, in that order. Predicate lines before
//! `goal` are initial facts; after it, goal conditions. A bare `initial`
//! line is accepted and ignored. Tokens after a predicate's arguments are
//! ignored.

use std::path::Path;

use snlp_kernel::carrier::ids::{IdError, IdSpace};
use snlp_kernel::carrier::predicate::Predicate;
use snlp_kernel::carrier::tags::{Category, PredicateKind};
use snlp_kernel::proof::canon::{canonical_json_bytes, CanonError};
use snlp_kernel::proof::hash::{canonical_hash, ContentHash};
use snlp_kernel::proof::hash_domain::HashDomain;
use snlp_search::plan::Plan;

/// Why a problem could not be read. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProblemError {
    #[error("cannot read {path}: {detail}")]
    Io { path: String, detail: String },
    #[error("line {line}: missing `{expected} <count>` header")]
    MissingHeader { line: usize, expected: Category },
    #[error("line {line}: bad `{expected}` header: {detail}")]
    BadHeader {
        line: usize,
        expected: Category,
        detail: String,
    },
    #[error("line {line}: unknown predicate {name:?}")]
    UnknownPredicate { line: usize, name: String },
    #[error("line {line}: {kind} takes {expected} arguments, found {found}")]
    IncompletePredicate {
        line: usize,
        kind: PredicateKind,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: {source}")]
    BadIdentifier {
        line: usize,
        #[source]
        source: IdError,
    },
}

/// A parsed planning problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub space: IdSpace,
    pub initial: Vec<Predicate>,
    pub goal: Vec<Predicate>,
}

impl Problem {
    /// Parse problem text.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProblemError`] encountered.
    pub fn parse(text: &str) -> Result<Self, ProblemError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

        let mut counts = [0u32; 5];
        let mut last_line = 0;
        for (slot, expected) in Category::HEADER_ORDER.into_iter().enumerate() {
            let Some((line, content)) = lines.next() else {
                return Err(ProblemError::MissingHeader {
                    line: last_line + 1,
                    expected,
                });
            };
            last_line = line;
            counts[slot] = parse_header(line, content, expected)?;
        }
        let [locations, robots, cranes, piles, containers] = counts;
        let space = IdSpace::try_new(locations, robots, cranes, piles, containers).ok_or_else(
            || ProblemError::BadHeader {
                line: last_line,
                expected: Category::Containers,
                detail: "object counts exceed the identifier space".to_string(),
            },
        )?;

        let mut problem = Self {
            space,
            initial: Vec::new(),
            goal: Vec::new(),
        };
        let mut in_goal = false;
        for (line, content) in lines {
            let mut tokens = content.split_whitespace();
            let Some(name) = tokens.next() else {
                continue;
            };
            match name {
                "initial" => continue,
                "goal" => {
                    in_goal = true;
                    continue;
                }
                _ => {}
            }
            let kind: PredicateKind = name.parse().map_err(|_| ProblemError::UnknownPredicate {
                line,
                name: name.to_string(),
            })?;
            let args: Vec<&str> = tokens.take(kind.arity()).collect();
            if args.len() < kind.arity() {
                return Err(ProblemError::IncompletePredicate {
                    line,
                    kind,
                    expected: kind.arity(),
                    found: args.len(),
                });
            }
            let mut ids = Vec::with_capacity(args.len());
            for token in args {
                ids.push(
                    space
                        .parse(token)
                        .map_err(|source| ProblemError::BadIdentifier { line, source })?,
                );
            }
            let predicate = match ids.as_slice() {
                [a] => Predicate::unary(kind, *a),
                [a, b] => Predicate::binary(kind, *a, *b),
                _ => unreachable!("predicate arity is 1 or 2"),
            };
            if in_goal {
                problem.goal.push(predicate);
            } else {
                problem.initial.push(predicate);
            }
        }
        Ok(problem)
    }

    /// Read and parse a problem file.
    ///
    /// # Errors
    ///
    /// [`ProblemError::Io`] if the file cannot be read, otherwise as
    /// [`Problem::parse`].
    pub fn read(path: &Path) -> Result<Self, ProblemError> {
        let text = std::fs::read_to_string(path).map_err(|e| ProblemError::Io {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        Self::parse(&text)
    }

    /// The root plan: START adds the initial facts, FINISH requires the goal.
    #[must_use]
    pub fn initial_plan(&self) -> Plan {
        Plan::new(self.space, self.initial.clone(), self.goal.clone())
    }

    /// Problem text that parses back to this problem.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for category in Category::HEADER_ORDER {
            out.push_str(&format!(
                "{category} {}\n",
                self.space.count(category.literal_kind())
            ));
        }
        for p in &self.initial {
            out.push_str(&p.display(&self.space));
            out.push('\n');
        }
        out.push_str("goal\n");
        for p in &self.goal {
            out.push_str(&p.display(&self.space));
            out.push('\n');
        }
        out
    }

    /// Content hash of the problem (object counts, facts, goal).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let facts = |list: &[Predicate]| -> Vec<String> {
            list.iter().map(|p| p.display(&self.space)).collect()
        };
        let counts: Vec<u32> = Category::HEADER_ORDER
            .iter()
            .map(|c| self.space.count(c.literal_kind()))
            .collect();
        let value = serde_json::json!({
            "counts": counts,
            "goal": facts(&self.goal),
            "initial": facts(&self.initial),
        });
        let bytes = canonical_json_bytes(&value)?;
        Ok(canonical_hash(HashDomain::Problem, &bytes))
    }
}

fn parse_header(line: usize, content: &str, expected: Category) -> Result<u32, ProblemError> {
    let bad = |detail: String| ProblemError::BadHeader {
        line,
        expected,
        detail,
    };
    let mut tokens = content.split_whitespace();
    let (Some(tag), Some(count)) = (tokens.next(), tokens.next()) else {
        return Err(bad(format!("expected `{expected} <count>`, got {content:?}")));
    };
    if tag != expected.name() {
        return Err(bad(format!("found tag {tag:?}")));
    }
    count
        .parse()
        .map_err(|_| bad(format!("count {count:?} is not a non-negative integer")))
}

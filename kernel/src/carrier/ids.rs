//! Identifier space: the flat integer space shared by ground literals and variables.
//!
//! # Layout
//!
//! | Range                          | Meaning              | Name        |
//! |--------------------------------|----------------------|-------------|
//! | `0 .. location_end`            | locations            | `l<n>`      |
//! | `location_end .. robot_end`    | robots               | `r<n>`      |
//! | `robot_end .. crane_end`       | cranes               | `k<n>`      |
//! | `crane_end .. pile_end`        | piles                | `p<n>`      |
//! | `pile_end .. container_end`    | containers           | `c<n>`      |
//! | `container_end`                | the ground literal   | `G`         |
//! | `ground_end ..`                | variables            | `x<n>`      |
//!
//! Every literal id is strictly smaller than every variable id. The unifier
//! relies on this: "bind the larger id to the smaller" always binds a
//! variable to a literal, never the reverse.

use std::fmt;

/// An identifier in the flat literal/variable space.
///
/// Whether an `Id` is a literal or a variable depends on the [`IdSpace`]
/// it was issued by; ask [`IdSpace::classify`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Exclusive upper bound on ids named by a problem. The range above it is
    /// left for fresh variables, so [`Id::next`] cannot overflow while a plan
    /// stays within the search's step limit.
    pub const LIMIT: u32 = 1 << 31;

    /// Construct from a raw integer.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id immediately after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of a ground literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LiteralKind {
    Location,
    Robot,
    Crane,
    Pile,
    Container,
    Ground,
}

impl LiteralKind {
    /// Name prefix used in problem files.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            Self::Location => 'l',
            Self::Robot => 'r',
            Self::Crane => 'k',
            Self::Pile => 'p',
            Self::Container => 'c',
            Self::Ground => 'G',
        }
    }
}

/// Classification of an [`Id`] within an [`IdSpace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// A ground literal of the given kind, with its index within that kind.
    Literal { kind: LiteralKind, index: u32 },
    /// A variable with its index within the variable range.
    Variable { index: u32 },
}

impl Term {
    #[must_use]
    pub const fn is_variable(self) -> bool {
        matches!(self, Self::Variable { .. })
    }
}

/// Failure to translate a name into an [`Id`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// Empty token.
    #[error("empty identifier")]
    Empty,
    /// The first character is not one of `l r k p c G x`.
    #[error("unknown identifier prefix in {token:?}")]
    UnknownPrefix { token: String },
    /// The index after the prefix is missing or not a number.
    #[error("malformed index in identifier {token:?}")]
    MalformedIndex { token: String },
    /// The index is outside the declared count for its kind.
    #[error("identifier {token:?} out of range: only {count} declared")]
    OutOfRange { token: String, count: u32 },
    /// A variable at or beyond [`Id::LIMIT`].
    #[error("variable {token:?} is too large")]
    VariableTooLarge { token: String },
}

/// Range boundaries of the identifier space for one problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSpace {
    location_end: u32,
    robot_end: u32,
    crane_end: u32,
    pile_end: u32,
    container_end: u32,
    ground_end: u32,
}

impl IdSpace {
    /// Build the space from per-kind object counts.
    ///
    /// Returns `None` if the literals would not fit below [`Id::LIMIT`].
    #[must_use]
    pub fn try_new(
        locations: u32,
        robots: u32,
        cranes: u32,
        piles: u32,
        containers: u32,
    ) -> Option<Self> {
        let location_end = locations;
        let robot_end = location_end.checked_add(robots)?;
        let crane_end = robot_end.checked_add(cranes)?;
        let pile_end = crane_end.checked_add(piles)?;
        let container_end = pile_end.checked_add(containers)?;
        let ground_end = container_end.checked_add(1)?;
        (ground_end <= Id::LIMIT).then_some(Self {
            location_end,
            robot_end,
            crane_end,
            pile_end,
            container_end,
            ground_end,
        })
    }

    /// [`IdSpace::try_new`] for counts known to fit.
    ///
    /// # Panics
    ///
    /// Panics if the literals would not fit below [`Id::LIMIT`].
    #[must_use]
    pub fn new(
        locations: u32,
        robots: u32,
        cranes: u32,
        piles: u32,
        containers: u32,
    ) -> Self {
        match Self::try_new(locations, robots, cranes, piles, containers) {
            Some(space) => space,
            None => panic!("object counts overflow the identifier space"),
        }
    }

    /// The first id of the variable range.
    #[must_use]
    pub const fn first_variable(&self) -> Id {
        Id(self.ground_end)
    }

    /// The id of the unique ground literal `G`.
    #[must_use]
    pub const fn ground(&self) -> Id {
        Id(self.container_end)
    }

    /// The `index`-th variable.
    #[must_use]
    pub const fn variable(&self, index: u32) -> Id {
        Id(self.ground_end + index)
    }

    #[must_use]
    pub const fn is_variable(&self, id: Id) -> bool {
        id.0 >= self.ground_end
    }

    #[must_use]
    pub const fn is_literal(&self, id: Id) -> bool {
        id.0 < self.ground_end
    }

    /// Number of declared objects of a literal kind.
    #[must_use]
    pub const fn count(&self, kind: LiteralKind) -> u32 {
        let (start, end) = self.bounds(kind);
        end - start
    }

    const fn bounds(&self, kind: LiteralKind) -> (u32, u32) {
        match kind {
            LiteralKind::Location => (0, self.location_end),
            LiteralKind::Robot => (self.location_end, self.robot_end),
            LiteralKind::Crane => (self.robot_end, self.crane_end),
            LiteralKind::Pile => (self.crane_end, self.pile_end),
            LiteralKind::Container => (self.pile_end, self.container_end),
            LiteralKind::Ground => (self.container_end, self.ground_end),
        }
    }

    /// The `index`-th literal of `kind`, if declared.
    #[must_use]
    pub fn literal(&self, kind: LiteralKind, index: u32) -> Option<Id> {
        let (start, end) = self.bounds(kind);
        let raw = start.checked_add(index)?;
        (raw < end).then_some(Id(raw))
    }

    /// Classify an id as a literal of some kind or a variable.
    #[must_use]
    pub fn classify(&self, id: Id) -> Term {
        let n = id.0;
        let (kind, start) = if n < self.location_end {
            (LiteralKind::Location, 0)
        } else if n < self.robot_end {
            (LiteralKind::Robot, self.location_end)
        } else if n < self.crane_end {
            (LiteralKind::Crane, self.robot_end)
        } else if n < self.pile_end {
            (LiteralKind::Pile, self.crane_end)
        } else if n < self.container_end {
            (LiteralKind::Container, self.pile_end)
        } else if n < self.ground_end {
            (LiteralKind::Ground, self.container_end)
        } else {
            return Term::Variable {
                index: n - self.ground_end,
            };
        };
        Term::Literal {
            kind,
            index: n - start,
        }
    }

    /// Human-readable name of an id (`l0`, `r3`, `G`, `x12`, ...).
    ///
    /// Total: every id has a name.
    #[must_use]
    pub fn name(&self, id: Id) -> String {
        match self.classify(id) {
            Term::Literal {
                kind: LiteralKind::Ground,
                ..
            } => "G".to_string(),
            Term::Literal { kind, index } => format!("{}{index}", kind.prefix()),
            Term::Variable { index } => format!("x{index}"),
        }
    }

    /// Translate a name (`l3`, `r0`, `G`, `x5`, ...) into an id.
    ///
    /// # Errors
    ///
    /// Returns [`IdError`] for an empty token, an unknown prefix, a missing or
    /// non-numeric index, a literal index beyond its declared count, or a
    /// variable at or beyond [`Id::LIMIT`].
    pub fn parse(&self, token: &str) -> Result<Id, IdError> {
        let mut chars = token.chars();
        let prefix = chars.next().ok_or(IdError::Empty)?;
        let rest = chars.as_str();

        if prefix == 'G' {
            if !rest.is_empty() {
                return Err(IdError::MalformedIndex {
                    token: token.to_string(),
                });
            }
            return Ok(self.ground());
        }

        let kind = match prefix {
            'l' => Some(LiteralKind::Location),
            'r' => Some(LiteralKind::Robot),
            'k' => Some(LiteralKind::Crane),
            'p' => Some(LiteralKind::Pile),
            'c' => Some(LiteralKind::Container),
            'x' => None,
            _ => {
                return Err(IdError::UnknownPrefix {
                    token: token.to_string(),
                })
            }
        };

        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::MalformedIndex {
                token: token.to_string(),
            });
        }
        let index: u32 = rest.parse().map_err(|_| IdError::MalformedIndex {
            token: token.to_string(),
        })?;

        match kind {
            Some(kind) => self.literal(kind, index).ok_or(IdError::OutOfRange {
                token: token.to_string(),
                count: self.count(kind),
            }),
            None => self
                .ground_end
                .checked_add(index)
                .filter(|&raw| raw < Id::LIMIT)
                .map(Id)
                .ok_or(IdError::VariableTooLarge {
                    token: token.to_string(),
                }),
        }
    }
}

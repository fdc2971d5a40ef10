//! Closed tag sets: predicate kinds, action kinds, and header categories.
//!
//! Both directions (tag → name, name → tag) are exhaustive matches. A name
//! that is not in the set is a [`TagError`], never a silent default.

use std::fmt;
use std::str::FromStr;

use crate::carrier::ids::LiteralKind;

/// Failure to look up a tag by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("unknown predicate {0:?}")]
    UnknownPredicate(String),
    #[error("unknown action {0:?}")]
    UnknownAction(String),
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
}

/// The kind tag of a [`Predicate`](crate::carrier::predicate::Predicate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PredicateKind {
    Adjacent,
    Attached,
    Belong,
    Occupied,
    At,
    Loaded,
    Unloaded,
    Holding,
    Empty,
    In,
    On,
    Top,
    Free,
}

impl PredicateKind {
    /// All kinds in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Adjacent,
        Self::Attached,
        Self::Belong,
        Self::Occupied,
        Self::At,
        Self::Loaded,
        Self::Unloaded,
        Self::Holding,
        Self::Empty,
        Self::In,
        Self::On,
        Self::Top,
        Self::Free,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Adjacent => "adjacent",
            Self::Attached => "attached",
            Self::Belong => "belong",
            Self::Occupied => "occupied",
            Self::At => "at",
            Self::Loaded => "loaded",
            Self::Unloaded => "unloaded",
            Self::Holding => "holding",
            Self::Empty => "empty",
            Self::In => "in",
            Self::On => "on",
            Self::Top => "top",
            Self::Free => "free",
        }
    }

    /// Number of arguments a predicate of this kind carries.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Occupied | Self::Unloaded | Self::Empty | Self::Free => 1,
            Self::Adjacent
            | Self::Attached
            | Self::Belong
            | Self::At
            | Self::Loaded
            | Self::Holding
            | Self::In
            | Self::On
            | Self::Top => 2,
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PredicateKind {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "adjacent" => Self::Adjacent,
            "attached" => Self::Attached,
            "belong" => Self::Belong,
            "occupied" => Self::Occupied,
            "at" => Self::At,
            "loaded" => Self::Loaded,
            "unloaded" => Self::Unloaded,
            "holding" => Self::Holding,
            "empty" => Self::Empty,
            "in" => Self::In,
            "on" => Self::On,
            "top" => Self::Top,
            "free" => Self::Free,
            other => return Err(TagError::UnknownPredicate(other.to_string())),
        })
    }
}

/// The type of an action instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionKind {
    Start,
    Finish,
    Move,
    Take,
    Put,
    Load,
    Unload,
}

impl ActionKind {
    /// The schema kinds a planner may instantiate, in declaration order.
    pub const SCHEMAS: [Self; 5] = [Self::Move, Self::Take, Self::Put, Self::Load, Self::Unload];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Finish => "finish",
            Self::Move => "move",
            Self::Take => "take",
            Self::Put => "put",
            Self::Load => "load",
            Self::Unload => "unload",
        }
    }

    /// Number of argument slots.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Start | Self::Finish => 0,
            Self::Move => 3,
            Self::Load | Self::Unload => 4,
            Self::Take | Self::Put => 5,
        }
    }

    /// Whether this schema's add list contains a predicate of `kind`.
    ///
    /// START is excluded: its adds come from the problem, not a template.
    #[must_use]
    pub const fn may_add(self, kind: PredicateKind) -> bool {
        use PredicateKind as P;
        match self {
            Self::Start | Self::Finish => false,
            Self::Move => matches!(kind, P::At | P::Occupied | P::Free),
            Self::Take => matches!(kind, P::Holding | P::Top),
            Self::Put => matches!(kind, P::Empty | P::In | P::Top | P::On),
            Self::Load => matches!(kind, P::Empty | P::Loaded),
            Self::Unload => matches!(kind, P::Holding | P::Unloaded),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "start" => Self::Start,
            "finish" => Self::Finish,
            "move" => Self::Move,
            "take" => Self::Take,
            "put" => Self::Put,
            "load" => Self::Load,
            "unload" => Self::Unload,
            other => return Err(TagError::UnknownAction(other.to_string())),
        })
    }
}

/// Problem header categories, in the order they must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Locations,
    Robots,
    Cranes,
    Piles,
    Containers,
}

impl Category {
    /// Header order of a problem file.
    pub const HEADER_ORDER: [Self; 5] = [
        Self::Locations,
        Self::Robots,
        Self::Cranes,
        Self::Piles,
        Self::Containers,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Locations => "locations",
            Self::Robots => "robots",
            Self::Cranes => "cranes",
            Self::Piles => "piles",
            Self::Containers => "containers",
        }
    }

    /// The literal kind this header declares.
    #[must_use]
    pub const fn literal_kind(self) -> LiteralKind {
        match self {
            Self::Locations => LiteralKind::Location,
            Self::Robots => LiteralKind::Robot,
            Self::Cranes => LiteralKind::Crane,
            Self::Piles => LiteralKind::Pile,
            Self::Containers => LiteralKind::Container,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "locations" => Self::Locations,
            "robots" => Self::Robots,
            "cranes" => Self::Cranes,
            "piles" => Self::Piles,
            "containers" => Self::Containers,
            other => return Err(TagError::UnknownCategory(other.to_string())),
        })
    }
}

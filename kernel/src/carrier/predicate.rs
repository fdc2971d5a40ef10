//! `Predicate`: an atomic fact, a kind tag plus one or two argument ids.

use crate::carrier::ids::{Id, IdSpace};
use crate::carrier::tags::PredicateKind;

/// An immutable atomic fact.
///
/// Unary kinds carry `None` in the second slot. Equality is structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Predicate {
    pub kind: PredicateKind,
    pub args: [Option<Id>; 2],
}

impl Predicate {
    #[must_use]
    pub const fn unary(kind: PredicateKind, a: Id) -> Self {
        Self {
            kind,
            args: [Some(a), None],
        }
    }

    #[must_use]
    pub const fn binary(kind: PredicateKind, a: Id, b: Id) -> Self {
        Self {
            kind,
            args: [Some(a), Some(b)],
        }
    }

    /// Iterate over the used argument slots.
    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.args.iter().flatten().copied()
    }

    /// Copy of this predicate with `former` replaced by `newval`.
    #[must_use]
    pub fn substituted(&self, former: Id, newval: Id) -> Self {
        let swap = |a: Option<Id>| a.map(|id| if id == former { newval } else { id });
        Self {
            kind: self.kind,
            args: [swap(self.args[0]), swap(self.args[1])],
        }
    }

    /// Whether any argument is a variable in `space`.
    #[must_use]
    pub fn has_variables(&self, space: &IdSpace) -> bool {
        self.ids().any(|id| space.is_variable(id))
    }

    /// Render as `kind arg0 [arg1]` using names from `space`.
    #[must_use]
    pub fn display(&self, space: &IdSpace) -> String {
        let mut out = self.kind.name().to_string();
        for id in self.ids() {
            out.push(' ');
            out.push_str(&space.name(id));
        }
        out
    }
}

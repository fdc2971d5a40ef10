//! Unifier: match a query predicate against an action's add list.
//!
//! Flat equality matching (no function symbols, so no occurs check). Bindings
//! are always directed from the larger id to the smaller one. Since every
//! literal id is below every variable id, this binds variables to literals,
//! and variable/variable pairs to the older (smaller) variable.
//!
//! Within one candidate effect, each new binding resolves both sides through
//! the bindings already made before choosing a direction. The emitted set maps
//! every bound variable straight to its final representative, so:
//!
//! - every binding satisfies `from > to`;
//! - no `to` is itself bound in the same set;
//! - the bindings can be applied in any order.

use std::collections::BTreeMap;

use crate::carrier::ids::{Id, IdSpace};
use crate::carrier::predicate::Predicate;
use crate::operators::action::Action;

/// "Replace `from` with `to`". Invariant: `from > to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Binding {
    pub from: Id,
    pub to: Id,
}

/// One complete alternative: a set of bindings sorted by `from`.
pub type Bindings = Vec<Binding>;

/// Apply a binding set to a predicate.
#[must_use]
pub fn apply_bindings(p: &Predicate, bindings: &[Binding]) -> Predicate {
    bindings
        .iter()
        .fold(*p, |acc, b| acc.substituted(b.from, b.to))
}

/// Union-find style accumulator for one candidate.
#[derive(Debug, Default)]
struct BindingSet {
    parent: BTreeMap<Id, Id>,
}

impl BindingSet {
    fn find(&self, mut id: Id) -> Id {
        while let Some(&up) = self.parent.get(&id) {
            id = up;
        }
        id
    }

    /// Make `a` and `b` equal. `None` when they resolve to distinct literals.
    fn unify(&mut self, a: Id, b: Id, space: &IdSpace) -> Option<()> {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return Some(());
        }
        let (hi, lo) = if ra > rb { (ra, rb) } else { (rb, ra) };
        if space.is_literal(hi) {
            return None;
        }
        self.parent.insert(hi, lo);
        Some(())
    }

    fn into_bindings(self) -> Bindings {
        self.parent
            .keys()
            .map(|&from| Binding {
                from,
                to: self.find(from),
            })
            .collect()
    }
}

/// Unify two predicates argument-wise.
///
/// Returns the binding set that makes them syntactically identical, or
/// `None` if no such set exists.
#[must_use]
pub fn unify(query: &Predicate, effect: &Predicate, space: &IdSpace) -> Option<Bindings> {
    if query.kind != effect.kind {
        return None;
    }
    let mut set = BindingSet::default();
    for (q, e) in query.args.iter().zip(effect.args.iter()) {
        match (q, e) {
            (Some(q), Some(e)) => set.unify(*q, *e, space)?,
            (None, None) => {}
            _ => return None,
        }
    }
    Some(set.into_bindings())
}

impl Action {
    /// Every distinct binding set under which some add-list entry becomes
    /// identical to `p`.
    ///
    /// An empty inner set means "already identical". An empty outer list
    /// means this action cannot add `p`.
    #[must_use]
    pub fn adds(&self, p: &Predicate, space: &IdSpace) -> Vec<Bindings> {
        let mut out: Vec<Bindings> = Vec::new();
        for effect in self.add_list() {
            if let Some(bindings) = unify(p, &effect, space) {
                if !out.contains(&bindings) {
                    out.push(bindings);
                }
            }
        }
        out
    }
}

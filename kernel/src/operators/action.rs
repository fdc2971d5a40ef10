//! Action schema instances and their effect tables.
//!
//! # Schemas (argument slots are 0-based)
//!
//! | Kind   | Args        | Preconditions                                            | Add                                   | Delete                                   |
//! |--------|-------------|----------------------------------------------------------|---------------------------------------|------------------------------------------|
//! | move   | r,l,m       | adjacent(l,m) at(r,l) free(m)                            | at(r,m) occupied(m) free(l)           | occupied(l) at(r,l) free(m)              |
//! | take   | k,l,c,d,p   | belong(k,l) attached(p,l) empty(k) top(c,p) on(c,d)      | holding(k,c) top(d,p)                 | empty(k) in(c,p) top(c,p) on(c,d)        |
//! | put    | k,l,c,d,p   | belong(k,l) attached(p,l) holding(k,c) top(d,p)          | empty(k) in(c,p) top(c,p) on(c,d)     | holding(k,c) top(d,p)                    |
//! | load   | k,l,c,r     | belong(k,l) holding(k,c) at(r,l) unloaded(r)             | empty(k) loaded(r,c)                  | holding(k,c) unloaded(r)                 |
//! | unload | k,l,c,r     | belong(k,l) at(r,l) loaded(r,c) empty(k)                 | holding(k,c) unloaded(r)              | empty(k) loaded(r,c)                     |
//!
//! START adds the problem's initial facts; FINISH requires the goal. Both
//! keep those lists in `seeded`.
//!
//! The three lists are recomputed from `(kind, args, seeded)` on every call.
//! There is no cache, so an instance whose arguments were substituted is
//! indistinguishable from one constructed with the substituted arguments.

use crate::carrier::ids::{Id, IdSpace};
use crate::carrier::predicate::Predicate;
use crate::carrier::tags::{ActionKind, PredicateKind as P};

/// An action schema instance (one plan step).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    pub kind: ActionKind,
    args: Vec<Id>,
    seeded: Vec<Predicate>,
}

impl Action {
    /// Construct a schema instance.
    ///
    /// # Panics
    ///
    /// Panics if `args.len()` does not match the kind's arity, or if `kind`
    /// is START/FINISH (use [`Action::start`] / [`Action::finish`]).
    #[must_use]
    pub fn new(kind: ActionKind, args: Vec<Id>) -> Self {
        assert!(
            !matches!(kind, ActionKind::Start | ActionKind::Finish),
            "{kind} is built with Action::start / Action::finish"
        );
        assert_eq!(
            args.len(),
            kind.arity(),
            "{kind} takes {} arguments",
            kind.arity()
        );
        Self {
            kind,
            args,
            seeded: Vec::new(),
        }
    }

    /// The synthetic start step, adding the initial facts.
    #[must_use]
    pub fn start(initial: Vec<Predicate>) -> Self {
        Self {
            kind: ActionKind::Start,
            args: Vec::new(),
            seeded: initial,
        }
    }

    /// The synthetic finish step, requiring the goal.
    #[must_use]
    pub fn finish(goal: Vec<Predicate>) -> Self {
        Self {
            kind: ActionKind::Finish,
            args: Vec::new(),
            seeded: goal,
        }
    }

    /// A schema instance whose arguments are the consecutive ids starting at
    /// `first_fresh`. Returns the instance and the next unused id.
    ///
    /// # Panics
    ///
    /// Panics for START/FINISH, which are never instantiated fresh.
    #[must_use]
    pub fn instantiate(kind: ActionKind, first_fresh: Id) -> (Self, Id) {
        let mut next = first_fresh;
        let args = (0..kind.arity())
            .map(|_| {
                let id = next;
                next = next.next();
                id
            })
            .collect();
        (Self::new(kind, args), next)
    }

    #[must_use]
    pub fn args(&self) -> &[Id] {
        &self.args
    }

    /// Initial facts (START) or goal conditions (FINISH); empty otherwise.
    #[must_use]
    pub fn seeded(&self) -> &[Predicate] {
        &self.seeded
    }

    /// Every id mentioned by this step: arguments, then seeded predicates.
    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.args
            .iter()
            .copied()
            .chain(self.seeded.iter().flat_map(Predicate::ids))
    }

    #[must_use]
    pub fn add_list(&self) -> Vec<Predicate> {
        let a = &self.args;
        match self.kind {
            ActionKind::Start => self.seeded.clone(),
            ActionKind::Finish => Vec::new(),
            ActionKind::Move => vec![
                Predicate::binary(P::At, a[0], a[2]),
                Predicate::unary(P::Occupied, a[2]),
                Predicate::unary(P::Free, a[1]),
            ],
            ActionKind::Take => vec![
                Predicate::binary(P::Holding, a[0], a[2]),
                Predicate::binary(P::Top, a[3], a[4]),
            ],
            ActionKind::Put => vec![
                Predicate::unary(P::Empty, a[0]),
                Predicate::binary(P::In, a[2], a[4]),
                Predicate::binary(P::Top, a[2], a[4]),
                Predicate::binary(P::On, a[2], a[3]),
            ],
            ActionKind::Load => vec![
                Predicate::unary(P::Empty, a[0]),
                Predicate::binary(P::Loaded, a[3], a[2]),
            ],
            ActionKind::Unload => vec![
                Predicate::binary(P::Holding, a[0], a[2]),
                Predicate::unary(P::Unloaded, a[3]),
            ],
        }
    }

    #[must_use]
    pub fn delete_list(&self) -> Vec<Predicate> {
        let a = &self.args;
        match self.kind {
            ActionKind::Start | ActionKind::Finish => Vec::new(),
            ActionKind::Move => vec![
                Predicate::unary(P::Occupied, a[1]),
                Predicate::binary(P::At, a[0], a[1]),
                Predicate::unary(P::Free, a[2]),
            ],
            ActionKind::Take => vec![
                Predicate::unary(P::Empty, a[0]),
                Predicate::binary(P::In, a[2], a[4]),
                Predicate::binary(P::Top, a[2], a[4]),
                Predicate::binary(P::On, a[2], a[3]),
            ],
            ActionKind::Put => vec![
                Predicate::binary(P::Holding, a[0], a[2]),
                Predicate::binary(P::Top, a[3], a[4]),
            ],
            ActionKind::Load => vec![
                Predicate::binary(P::Holding, a[0], a[2]),
                Predicate::unary(P::Unloaded, a[3]),
            ],
            ActionKind::Unload => vec![
                Predicate::unary(P::Empty, a[0]),
                Predicate::binary(P::Loaded, a[3], a[2]),
            ],
        }
    }

    #[must_use]
    pub fn prereq_list(&self) -> Vec<Predicate> {
        let a = &self.args;
        match self.kind {
            ActionKind::Start => Vec::new(),
            ActionKind::Finish => self.seeded.clone(),
            ActionKind::Move => vec![
                Predicate::binary(P::Adjacent, a[1], a[2]),
                Predicate::binary(P::At, a[0], a[1]),
                Predicate::unary(P::Free, a[2]),
            ],
            ActionKind::Take => vec![
                Predicate::binary(P::Belong, a[0], a[1]),
                Predicate::binary(P::Attached, a[4], a[1]),
                Predicate::unary(P::Empty, a[0]),
                Predicate::binary(P::Top, a[2], a[4]),
                Predicate::binary(P::On, a[2], a[3]),
            ],
            ActionKind::Put => vec![
                Predicate::binary(P::Belong, a[0], a[1]),
                Predicate::binary(P::Attached, a[4], a[1]),
                Predicate::binary(P::Holding, a[0], a[2]),
                Predicate::binary(P::Top, a[3], a[4]),
            ],
            ActionKind::Load => vec![
                Predicate::binary(P::Belong, a[0], a[1]),
                Predicate::binary(P::Holding, a[0], a[2]),
                Predicate::binary(P::At, a[3], a[1]),
                Predicate::unary(P::Unloaded, a[3]),
            ],
            ActionKind::Unload => vec![
                Predicate::binary(P::Belong, a[0], a[1]),
                Predicate::binary(P::At, a[3], a[1]),
                Predicate::binary(P::Loaded, a[3], a[2]),
                Predicate::unary(P::Empty, a[0]),
            ],
        }
    }

    /// Whether `p` appears in the delete list (structural equality only).
    #[must_use]
    pub fn deletes(&self, p: &Predicate) -> bool {
        self.delete_list().contains(p)
    }

    /// Replace every occurrence of `former` with `newval`.
    ///
    /// Returns `true` if anything changed.
    pub fn substitute(&mut self, former: Id, newval: Id) -> bool {
        let mut changed = false;
        for arg in &mut self.args {
            if *arg == former {
                *arg = newval;
                changed = true;
            }
        }
        for pred in &mut self.seeded {
            let next = pred.substituted(former, newval);
            if next != *pred {
                *pred = next;
                changed = true;
            }
        }
        changed
    }

    /// Render as `name arg0 arg1 ...` using names from `space`.
    #[must_use]
    pub fn display(&self, space: &IdSpace) -> String {
        let mut out = self.kind.name().to_string();
        for &id in &self.args {
            out.push(' ');
            out.push_str(&space.name(id));
        }
        out
    }
}

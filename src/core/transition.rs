//! Declared transition edges.

use super::guard::Guard;
use super::state::State;

/// An immutable edge toward `target`, optionally guarded and optionally
/// skippable.
///
/// A skippable transition lets resolution look *past* its target: states
/// declared after it become reachable even when its own guard fails.
///
/// Construct with [`Transition::to`] or with
/// [`TransitionBuilder`](crate::builder::TransitionBuilder), which also
/// rejects targets with an empty name.
pub struct Transition<T, S: State> {
    target: S,
    guard: Option<Guard<T>>,
    skippable: bool,
}

impl<T, S: State> Transition<T, S> {
    /// Unguarded, non-skippable transition to `target`.
    pub fn to(target: S) -> Self {
        Self {
            target,
            guard: None,
            skippable: false,
        }
    }

    /// Attach a guard predicate, replacing any previous one.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Attach an existing guard.
    pub fn with_guard(mut self, guard: Guard<T>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Mark the transition as skippable.
    pub fn skippable(mut self) -> Self {
        self.skippable = true;
        self
    }

    pub(crate) fn from_parts(target: S, guard: Option<Guard<T>>, skippable: bool) -> Self {
        Self {
            target,
            guard,
            skippable,
        }
    }

    /// True when there is no guard or the guard accepts `owner`.
    pub fn can_pass(&self, owner: &T) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check(owner))
    }

    pub fn is_skippable(&self) -> bool {
        self.skippable
    }

    pub fn target_state(&self) -> &S {
        &self.target
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }
}

impl<T, S: State> Clone for Transition<T, S> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            guard: self.guard.clone(),
            skippable: self.skippable,
        }
    }
}

impl<T, S: State> std::fmt::Debug for Transition<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target)
            .field("guarded", &self.guard.is_some())
            .field("skippable", &self.skippable)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ticket {
        assigned: bool,
    }

    fn s(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn unguarded_transition_always_passes() {
        let transition: Transition<Ticket, String> = Transition::to(s("open"));

        assert!(transition.can_pass(&Ticket { assigned: false }));
        assert!(!transition.is_skippable());
        assert!(!transition.is_guarded());
        assert_eq!(transition.target_state(), "open");
    }

    #[test]
    fn guard_controls_can_pass() {
        let transition: Transition<Ticket, String> =
            Transition::to(s("in_progress")).when(|t: &Ticket| t.assigned);

        assert!(transition.can_pass(&Ticket { assigned: true }));
        assert!(!transition.can_pass(&Ticket { assigned: false }));
    }

    #[test]
    fn skippable_flag_is_kept_through_clone() {
        let transition: Transition<Ticket, String> = Transition::to(s("review"))
            .skippable()
            .when(|_| false);
        let cloned = transition.clone();

        assert!(cloned.is_skippable());
        assert!(!cloned.can_pass(&Ticket { assigned: true }));
        assert_eq!(cloned.target_state(), transition.target_state());
    }
}

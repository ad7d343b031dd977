//! Generic lifecycle transition rules.
//!
//! Orders and bookings share one validator, parameterized by the entity's
//! terminal states and a short allow-list of explicit terminal-entry paths.

use crate::error::{DomainError, DomainResult};

/// Transition table for one lifecycle enumeration.
///
/// Rules, in priority order:
///
/// 1. `current == proposed` is always valid (no-op).
/// 2. A terminal `current` is absorbing: nothing else is valid.
/// 3. `proposed == completed` is valid from any non-terminal state.
/// 4. Otherwise valid iff `proposed` is non-terminal, or `(current, proposed)`
///    is one of the allowed terminal entries.
#[derive(Debug)]
pub struct TransitionRules<S: 'static> {
    terminal: &'static [S],
    completed: S,
    terminal_entries: &'static [(S, S)],
}

impl<S> TransitionRules<S>
where
    S: Copy + PartialEq + core::fmt::Display,
{
    pub const fn new(
        terminal: &'static [S],
        completed: S,
        terminal_entries: &'static [(S, S)],
    ) -> Self {
        Self {
            terminal,
            completed,
            terminal_entries,
        }
    }

    pub fn terminal_states(&self) -> &'static [S] {
        self.terminal
    }

    pub fn is_terminal(&self, status: S) -> bool {
        self.terminal.contains(&status)
    }

    /// Pure admissibility check. Never errors; callers decide how to surface
    /// a rejection.
    pub fn is_valid_transition(&self, current: S, proposed: S) -> bool {
        if current == proposed {
            return true;
        }
        if self.is_terminal(current) {
            return false;
        }
        if proposed == self.completed {
            return true;
        }
        !self.is_terminal(proposed) || self.terminal_entries.contains(&(current, proposed))
    }

    /// Like [`Self::is_valid_transition`], but as a `Result` for CRUD callers.
    pub fn check(&self, current: S, proposed: S) -> DomainResult<()> {
        if self.is_valid_transition(current, proposed) {
            Ok(())
        } else {
            Err(DomainError::invalid_transition(current, proposed))
        }
    }
}

/// A status enumeration governed by a static [`TransitionRules`] table.
pub trait LifecycleStatus:
    Copy + PartialEq + core::fmt::Debug + core::fmt::Display + Sized + 'static
{
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    fn rules() -> &'static TransitionRules<Self>;

    fn is_terminal(self) -> bool {
        Self::rules().is_terminal(self)
    }

    fn can_transition_to(self, proposed: Self) -> bool {
        Self::rules().is_valid_transition(self, proposed)
    }

    fn transition_to(self, proposed: Self) -> DomainResult<Self> {
        Self::rules().check(self, proposed)?;
        Ok(proposed)
    }
}

//! State machine trait for status enums.

use std::fmt;

/// A status enum with a fixed table of allowed moves.
///
/// Implementors list the exits of each state; `can_transition_to` and
/// `transition_to` are derived from that list.
pub trait StateMachine: Sized + Copy + PartialEq + fmt::Debug {
    /// Every state reachable in one move from `self`.
    fn valid_transitions(&self) -> Vec<Self>;

    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Returns `target` if the move is in the table.
    fn transition_to(&self, target: Self) -> Result<Self, TransitionRejected<Self>> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(TransitionRejected {
                from: *self,
                to: target,
            })
        }
    }

    /// No exits at all.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

/// A move that is not in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRejected<S> {
    pub from: S,
    pub to: S,
}

impl<S: fmt::Debug> fmt::Display for TransitionRejected<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot move from {:?} to {:?}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Door {
        Open,
        Closed,
        Bricked,
    }

    impl StateMachine for Door {
        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Door::Open => vec![Door::Closed],
                Door::Closed => vec![Door::Open, Door::Bricked],
                Door::Bricked => vec![],
            }
        }
    }

    #[test]
    fn allowed_move_returns_target() {
        assert_eq!(Door::Closed.transition_to(Door::Bricked), Ok(Door::Bricked));
    }

    #[test]
    fn rejected_move_names_both_ends() {
        let err = Door::Open.transition_to(Door::Bricked).unwrap_err();
        assert_eq!(
            err,
            TransitionRejected {
                from: Door::Open,
                to: Door::Bricked
            }
        );
        assert_eq!(err.to_string(), "cannot move from Open to Bricked");
    }

    #[test]
    fn terminal_state_has_no_exits() {
        assert!(Door::Bricked.is_terminal());
        assert!(!Door::Open.is_terminal());
    }
}

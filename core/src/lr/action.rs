use crate::RuleId;

use super::StateId;

/// An entry of the action table.
///
/// Acceptance is a shift on `<eos>`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Action {
    Shift(StateId),
    Reduce(RuleId),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Shift(to) => write!(f, "S {}", to),
            Action::Reduce(rule) => write!(f, "R {}", rule),
        }
    }
}

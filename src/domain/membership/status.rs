//! Membership status state machine.
//!
//! Stored statuses only; a user without a record is implicitly free and has
//! no status here.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::MembershipError;

/// Persisted subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    /// Paid and in good standing.
    Active,

    /// Renewal payment failed; the provider is retrying.
    PastDue,

    /// Subscription ended. Only a new checkout brings the member back.
    Cancelled,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "ACTIVE",
            MembershipStatus::PastDue => "PAST_DUE",
            MembershipStatus::Cancelled => "CANCELLED",
        }
    }
}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!(
            (self, target),
            (Active, Active)
                | (Active, PastDue)
                | (Active, Cancelled)
                | (PastDue, PastDue)
                | (PastDue, Active)
                | (PastDue, Cancelled)
                | (Cancelled, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            Active => vec![Active, PastDue, Cancelled],
            PastDue => vec![PastDue, Active, Cancelled],
            Cancelled => vec![Cancelled],
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipStatus {
    type Err = MembershipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(MembershipStatus::Active),
            "PAST_DUE" => Ok(MembershipStatus::PastDue),
            "CANCELLED" => Ok(MembershipStatus::Cancelled),
            other => Err(MembershipError::validation(
                "status",
                format!("unknown membership status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_status() -> impl Strategy<Value = MembershipStatus> {
        prop_oneof![
            Just(MembershipStatus::Active),
            Just(MembershipStatus::PastDue),
            Just(MembershipStatus::Cancelled),
        ]
    }

    #[test]
    fn active_and_past_due_alternate() {
        assert!(MembershipStatus::Active.can_transition_to(&MembershipStatus::PastDue));
        assert!(MembershipStatus::PastDue.can_transition_to(&MembershipStatus::Active));
    }

    #[test]
    fn cancelled_is_not_reopened_by_status_updates() {
        assert!(MembershipStatus::Cancelled
            .transition_to(MembershipStatus::Active)
            .is_err());
        assert!(MembershipStatus::Cancelled
            .transition_to(MembershipStatus::PastDue)
            .is_err());
    }

    #[test]
    fn no_status_is_terminal_because_replays_are_allowed() {
        assert!(!MembershipStatus::Cancelled.is_terminal());
    }

    #[test]
    fn parses_persisted_strings() {
        assert_eq!(
            "PAST_DUE".parse::<MembershipStatus>().unwrap(),
            MembershipStatus::PastDue
        );
        assert!("FREE".parse::<MembershipStatus>().is_err());
    }

    proptest! {
        #[test]
        fn every_status_may_repeat_itself(status in any_status()) {
            prop_assert!(status.can_transition_to(&status));
        }

        #[test]
        fn can_transition_matches_valid_transitions(from in any_status(), to in any_status()) {
            prop_assert_eq!(
                from.can_transition_to(&to),
                from.valid_transitions().contains(&to)
            );
        }

        #[test]
        fn string_form_round_trips(status in any_status()) {
            prop_assert_eq!(status.as_str().parse::<MembershipStatus>().unwrap(), status);
        }
    }
}

//! Property-based tests for the reservation lifecycle.

use super::{PartySize, ReservationStatus};
use proptest::prelude::*;

fn status_strategy() -> impl Strategy<Value = ReservationStatus> {
    prop::sample::select(ReservationStatus::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Walking any sequence of requested statuses, applying only the allowed
    // ones, never leaves the transition table and never leaves a terminal state.
    #[test]
    fn transitions_stay_within_table(requests in prop::collection::vec(status_strategy(), 0..32)) {
        let mut current = ReservationStatus::Awaiting;
        for next in requests {
            let was_terminal = current.is_terminal();
            if current.can_transition_to(next) {
                prop_assert!(current.allowed_transitions().contains(&next));
                current = next;
            }
            if was_terminal {
                prop_assert!(current.is_terminal());
            }
        }
    }

    // Nothing ever transitions back to awaiting, and no status loops to itself.
    #[test]
    fn no_edge_into_awaiting_or_self(from in status_strategy(), to in status_strategy()) {
        if from.can_transition_to(to) {
            prop_assert_ne!(to, ReservationStatus::Awaiting);
            prop_assert_ne!(from, to);
            prop_assert!(from.is_active());
        }
    }

    #[test]
    fn party_size_accepts_exactly_one_to_twenty(n in 0u32..64) {
        let result = PartySize::try_from(n);
        prop_assert_eq!(result.is_ok(), (1..=20).contains(&n));
        if let Ok(pax) = result {
            prop_assert_eq!(u32::from(pax), n);
        }
    }
}

//! Whole-table validation.
//!
//! Uses Stillwater's `Validation` to report every defect in one pass
//! instead of stopping at the first one.

use crate::builder::error::ConfigViolation;
use crate::core::{Event, State};
use crate::machine::Transition;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

fn check(ok: bool, violation: impl FnOnce() -> ConfigViolation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Validate an initial state and a list of transitions, accumulating ALL
/// violations.
pub fn validate_table(initial: &State, transitions: &[Transition]) -> Check {
    let mut checks: Vec<Check> = vec![check(!initial.is_blank(), || {
        ConfigViolation::BlankInitialState
    })];

    let mut seen: HashSet<(&State, &Event)> = HashSet::new();
    for (position, transition) in transitions.iter().enumerate() {
        checks.push(check(
            !transition.from.is_blank() && !transition.to.is_blank(),
            || ConfigViolation::BlankStateName { position },
        ));
        checks.push(check(!transition.event.is_blank(), || {
            ConfigViolation::BlankEventName { position }
        }));
        checks.push(check(
            seen.insert((&transition.from, &transition.event)),
            || ConfigViolation::DuplicateTransition {
                position,
                state: transition.from.name().to_string(),
                event: transition.event.name().to_string(),
            },
        ));
    }

    Validation::all_vec(checks).map(|_| ())
}

//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over a lifecycle state. The authorization
//! policy holds one guard per transition kind.

use super::state::State;
use std::fmt;
use std::marker::PhantomData;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use harvest_ledger::core::{BatchStage, Guard, State};
///
/// let before_delivery = Guard::new(|stage: &BatchStage| !stage.is_final());
///
/// assert!(before_delivery.check(&BatchStage::Picked));
/// assert!(!before_delivery.check(&BatchStage::Delivered));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
    _phantom: PhantomData<S>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Create a guard that passes exactly for the listed states.
    ///
    /// ```rust
    /// use harvest_ledger::core::{BatchStage, Guard};
    ///
    /// let guard = Guard::any_of(&[BatchStage::Created, BatchStage::Approved]);
    /// assert!(guard.check(&BatchStage::Approved));
    /// assert!(!guard.check(&BatchStage::Picked));
    /// ```
    pub fn any_of(states: &[S]) -> Self
    where
        S: 'static,
    {
        let allowed = states.to_vec();
        Self::new(move |state| allowed.contains(state))
    }

    /// Check if the guard allows transition from this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

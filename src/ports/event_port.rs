//! Event source port trait.

use crate::domain::error::AccrualError;
use crate::domain::event::ContributionEvent;

/// Supplies contribution events to the engine.
///
/// Implementations own parsing and date normalization; every event they return
/// must already satisfy [`ContributionEvent::validate`].
pub trait EventPort {
    fn fetch_events(&self) -> Result<Vec<ContributionEvent>, AccrualError>;
}

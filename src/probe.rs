//! Probe sequences used inside a bucket

/// Produces the next slot to try after `current` was found occupied.
///
/// `attempt` is the number of slots already probed past the start slot and
/// `capacity` is the size of the bucket being probed. Implementations must be
/// deterministic and return a value below `capacity`; a bucket only fills up
/// completely if the sequence reaches every slot within `capacity` attempts.
pub trait ProbeStrategy {
    /// Returns the slot probed after `current`
    fn next_slot(&self, current: usize, attempt: usize, capacity: usize) -> usize;
}

impl<F> ProbeStrategy for F
where
    F: Fn(usize, usize, usize) -> usize,
{
    fn next_slot(&self, current: usize, attempt: usize, capacity: usize) -> usize {
        self(current, attempt, capacity)
    }
}

/// Steps to the adjacent slot: `(current + 1) % capacity`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearProbe;

impl ProbeStrategy for LinearProbe {
    fn next_slot(&self, current: usize, _attempt: usize, capacity: usize) -> usize {
        wrap(current.saturating_add(1), capacity)
    }
}

/// Grows the step with every attempt: `(current + 1 + attempt) % capacity`.
///
/// Offsets from the start slot are the triangular numbers, which cover every
/// slot only when `capacity` is a power of two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadraticProbe;

impl ProbeStrategy for QuadraticProbe {
    fn next_slot(&self, current: usize, attempt: usize, capacity: usize) -> usize {
        wrap(current.saturating_add(1).saturating_add(attempt), capacity)
    }
}

/// Reduces `index` into `0..capacity`; a zero capacity maps everything to 0
fn wrap(index: usize, capacity: usize) -> usize {
    index.checked_rem(capacity).unwrap_or(0)
}

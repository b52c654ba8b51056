/// Receives events from a running simulation.
///
/// Observers see each event as it is produced. They cannot alter or stop a
/// run; a simulation always completes its full horizon.
///
/// Implemented for `()` (ignore everything) and for any `FnMut(&E)` closure.
///
/// # Example
///
/// ```
/// use loopsim_core::Observer;
///
/// let mut seen = Vec::new();
/// let mut record = |event: &u32| seen.push(*event);
///
/// record.observe(&1);
/// record.observe(&2);
/// assert_eq!(seen, vec![1, 2]);
/// ```
pub trait Observer<E> {
    /// Handles one event.
    fn observe(&mut self, event: &E);
}

impl<E> Observer<E> for () {
    fn observe(&mut self, _event: &E) {}
}

impl<E, F> Observer<E> for F
where
    F: FnMut(&E),
{
    fn observe(&mut self, event: &E) {
        self(event);
    }
}

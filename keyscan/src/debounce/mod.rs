use crate::state::MatrixState;

pub mod shift_register_debouncer;

/// Outcome of feeding one raw sample batch into the debouncer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// The key settled on a new stable state; the matrix bit was flipped.
    Debounced,
    /// The history window is still converging towards a stable run.
    InProgress,
    /// The key is stable and unchanged.
    Ignored,
    /// The window holds a non-converging pattern (mechanical chatter).
    /// Carries the masked history bits; the matrix bit is left untouched.
    Chatter(u8),
}

pub trait DebouncerTrait<const ROW: usize, const COL: usize> {
    /// Feed one raw sample for the key at (row, col).
    ///
    /// `elapsed_ticks` is the number of scan ticks since this row was last
    /// sampled (>= 1); the sample is replayed once per tick so the window
    /// keeps full coverage when the scheduler falls behind.
    ///
    /// Flips the matrix bit when, and only when, the window settles on a
    /// full run of identical samples.
    fn update(
        &mut self,
        row: usize,
        col: usize,
        raw_pressed: bool,
        elapsed_ticks: u16,
        matrix: &mut MatrixState<ROW, COL>,
    ) -> DebounceState;
}

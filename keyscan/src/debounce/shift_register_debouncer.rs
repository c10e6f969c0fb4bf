use super::{DebounceState, DebouncerTrait};
use crate::state::MatrixState;

/// Shift-register debouncer.
///
/// Each key keeps a history of its `DEBOUNCE_BITS` most recent raw samples,
/// newest in the low bit. A key turns on only when the whole window reads
/// pressed and off only when the whole window reads released; any mixed
/// window leaves the stable state alone. With the default 5-bit window and
/// a 1 ms scan tick a key must hold a level for 5 ms to register.
pub struct ShiftRegisterDebouncer<const ROW: usize, const COL: usize, const DEBOUNCE_BITS: usize = 5>
{
    history: [[u8; COL]; ROW],
}

impl<const ROW: usize, const COL: usize, const DEBOUNCE_BITS: usize> Default
    for ShiftRegisterDebouncer<ROW, COL, DEBOUNCE_BITS>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROW: usize, const COL: usize, const DEBOUNCE_BITS: usize>
    ShiftRegisterDebouncer<ROW, COL, DEBOUNCE_BITS>
{
    /// Window mask: `DEBOUNCE_BITS` ones. History bits above it are never
    /// interpreted.
    const MASK: u8 = ((1u16 << DEBOUNCE_BITS) - 1) as u8;

    pub const fn new() -> Self {
        const {
            assert!(
                DEBOUNCE_BITS >= 1 && DEBOUNCE_BITS <= 8,
                "debounce window must fit in the u8 history counter"
            );
        }
        ShiftRegisterDebouncer {
            history: [[0; COL]; ROW],
        }
    }
}

impl<const ROW: usize, const COL: usize, const DEBOUNCE_BITS: usize> DebouncerTrait<ROW, COL>
    for ShiftRegisterDebouncer<ROW, COL, DEBOUNCE_BITS>
{
    fn update(
        &mut self,
        row: usize,
        col: usize,
        raw_pressed: bool,
        elapsed_ticks: u16,
        matrix: &mut MatrixState<ROW, COL>,
    ) -> DebounceState {
        debug_assert!(row < ROW && col < COL);
        debug_assert!(elapsed_ticks >= 1);

        let counter = &mut self.history[row][col];
        // Replay the sample once per elapsed tick. Shifting past the window
        // width saturates the masked value, so the replay is clamped there.
        let replay = elapsed_ticks.clamp(1, DEBOUNCE_BITS as u16);
        for _ in 0..replay {
            *counter = (*counter << 1) | raw_pressed as u8;
        }

        let masked = *counter & Self::MASK;
        if masked == Self::MASK {
            if !matrix.is_on(row, col) {
                matrix.set_bit(row, col);
                DebounceState::Debounced
            } else {
                DebounceState::Ignored
            }
        } else if masked == 0 {
            if matrix.is_on(row, col) {
                matrix.clear_bit(row, col);
                DebounceState::Debounced
            } else {
                DebounceState::Ignored
            }
        } else if is_converging(masked, Self::MASK) {
            DebounceState::InProgress
        } else {
            DebounceState::Chatter(masked)
        }
    }
}

/// Whether a mixed window is still a single run filling in: a ones-suffix
/// (`0..01..1`, key going down) or a ones-prefix (`1..10..0`, key going up).
/// Anything else toggled mid-window.
fn is_converging(masked: u8, mask: u8) -> bool {
    // `x & (x + 1) == 0` iff x is all-ones from bit 0 up.
    let rising = masked & masked.wrapping_add(1) == 0;
    let inverted = !masked & mask;
    let falling = inverted & inverted.wrapping_add(1) == 0;
    rising || falling
}

//! Matrix scan scheduling.
//!
//! [`Matrix::scan`] strobes a single row per call and returns. Staggering
//! the rows keeps per-call latency bounded so a cooperative firmware loop
//! can interleave USB servicing or LED refresh without starving the scan.
//! A full cycle starts at most once per [`SCAN_TICK_MS`], however often
//! the loop calls in.

use embassy_time::Instant;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::debounce::{DebounceState, DebouncerTrait};
use crate::driver::gpio::{InputController, OutputController};
use crate::event::{ChatterEvent, EventSink, KeyEvent};
use crate::state::{MatrixState, RowWord};

/// Minimum time between successive full-cycle starts, in milliseconds.
pub const SCAN_TICK_MS: u64 = 1;

/// What a single [`Matrix::scan`] call did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanStatus {
    /// One row was strobed and debounced.
    Scanned { row: u8 },
    /// Less than one tick since the cycle started; no pin I/O happened.
    Throttled,
}

/// A row/column key matrix with per-key debouncing.
///
/// Rows are strobed via output pins, columns read via input pins; the
/// platform supplies any embedded-hal pin implementations and the physical
/// pin mapping. `low_active` selects the strobe/read polarity (classic
/// pull-up matrices are low-active on both).
pub struct Matrix<
    In: InputPin,
    Out: OutputPin,
    D: DebouncerTrait<ROW, COL>,
    S: EventSink,
    const ROW: usize,
    const COL: usize,
> {
    /// Row strobe lines.
    row_pins: [OutputController<Out>; ROW],
    /// Column read lines.
    col_pins: [InputController<In>; COL],
    /// Debouncer, sole mutator of the matrix state.
    debouncer: D,
    /// Debounced key state.
    state: MatrixState<ROW, COL>,
    /// Receives key transitions and chatter diagnostics.
    event_sink: S,
    /// Row to strobe on the next scan call.
    current_row: usize,
    /// When the current full cycle started.
    cycle_start: Instant,
    /// Ticks elapsed before this cycle, latched when entering row 0 and
    /// fed to the debouncer for every row of the cycle.
    elapsed_ticks: u16,
}

impl<
    In: InputPin,
    Out: OutputPin,
    D: DebouncerTrait<ROW, COL>,
    S: EventSink,
    const ROW: usize,
    const COL: usize,
> Matrix<In, Out, D, S, ROW, COL>
{
    /// Create a matrix from row strobe pins and column read pins.
    pub fn new(row_pins: [Out; ROW], col_pins: [In; COL], debouncer: D, event_sink: S, low_active: bool) -> Self {
        Matrix {
            row_pins: row_pins.map(|pin| OutputController::new(pin, low_active)),
            col_pins: col_pins.map(|pin| InputController::new(pin, low_active)),
            debouncer,
            state: MatrixState::new(),
            event_sink,
            current_row: 0,
            cycle_start: Instant::now(),
            elapsed_ticks: 0,
        }
    }

    /// Put the strobe lines into their quiescent state. Call once before
    /// the scan loop starts.
    pub fn init(&mut self) {
        self.unselect_all_rows();
    }

    /// Strobe and debounce the next row.
    ///
    /// Performs at most one row's worth of pin I/O, never blocks. When the
    /// call lands on row 0 before a full tick has elapsed, the whole call
    /// is a no-op and the cycle is retried next time.
    pub fn scan(&mut self) -> ScanStatus {
        if self.current_row == 0 {
            self.elapsed_ticks = self.ticks_since_cycle_start();
            if self.elapsed_ticks < 1 {
                return ScanStatus::Throttled;
            }
            self.cycle_start = Instant::now();
        }

        let row = self.current_row;
        self.row_pins[row].activate();
        for col in 0..COL {
            let raw_pressed = self.col_pins[col].is_active();
            match self
                .debouncer
                .update(row, col, raw_pressed, self.elapsed_ticks, &mut self.state)
            {
                DebounceState::Debounced => {
                    let pressed = self.state.is_on(row, col);
                    self.event_sink.key_event(KeyEvent {
                        row: row as u8,
                        col: col as u8,
                        pressed,
                    });
                }
                DebounceState::Chatter(history) => {
                    self.event_sink.chatter(ChatterEvent {
                        row: row as u8,
                        col: col as u8,
                        history,
                    });
                }
                DebounceState::InProgress | DebounceState::Ignored => {}
            }
        }
        self.unselect_all_rows();

        self.current_row += 1;
        if self.current_row >= ROW {
            self.current_row = 0;
        }
        ScanStatus::Scanned { row: row as u8 }
    }

    /// Whether any column line reads active while no row is strobed.
    ///
    /// Power-management probe for an asleep device. Reads the pins only;
    /// matrix state, debounce histories and the scan cursor are untouched.
    pub fn suspend_wakeup_condition(&mut self) -> bool {
        self.col_pins.iter_mut().any(|col| col.is_active())
    }

    /// Strobe every row at once. Diagnostic and test use only.
    pub fn select_all_rows(&mut self) {
        for row in self.row_pins.iter_mut() {
            row.activate();
        }
    }

    pub fn unselect_all_rows(&mut self) {
        for row in self.row_pins.iter_mut() {
            row.deactivate();
        }
    }

    pub const fn rows(&self) -> usize {
        ROW
    }

    pub const fn cols(&self) -> usize {
        COL
    }

    /// Whether the key at (row, col) is debounced-on.
    pub fn is_on(&self, row: usize, col: usize) -> bool {
        self.state.is_on(row, col)
    }

    /// The debounced bit-set for one row.
    pub fn get_row(&self, row: usize) -> RowWord {
        self.state.get_row(row)
    }

    /// Number of keys currently on.
    pub fn key_count(&self) -> u8 {
        self.state.key_count()
    }

    /// Log the debounced matrix as a grid. Diagnostic only.
    pub fn dump(&self) {
        self.state.dump();
    }

    /// The injected event sink, for draining queued transitions.
    pub fn event_sink_mut(&mut self) -> &mut S {
        &mut self.event_sink
    }

    fn ticks_since_cycle_start(&self) -> u16 {
        let elapsed_ms = self.cycle_start.elapsed().as_millis() / SCAN_TICK_MS;
        elapsed_ms.min(u16::MAX as u64) as u16
    }
}

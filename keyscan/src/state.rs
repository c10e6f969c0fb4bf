//! Stable key matrix state.
//!
//! One bit per key, packed into a word per row. Bits are flipped only by
//! the debounce engine once a key's history window has settled; everything
//! else reads.

/// Bit-set word holding one matrix row, bit `i` = key at column `i` is on.
pub type RowWord = u16;

/// Debounced on/off state of every key in a `ROW` x `COL` matrix.
///
/// All-zero at startup. Mutation is reserved to the debounce engine via the
/// `pub(crate)` bit setters.
pub struct MatrixState<const ROW: usize, const COL: usize> {
    rows: [RowWord; ROW],
}

impl<const ROW: usize, const COL: usize> Default for MatrixState<ROW, COL> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROW: usize, const COL: usize> MatrixState<ROW, COL> {
    pub const fn new() -> Self {
        const {
            assert!(COL <= RowWord::BITS as usize, "row word too narrow for COL");
        }
        MatrixState { rows: [0; ROW] }
    }

    /// Whether the key at (row, col) is on.
    ///
    /// Both indices must be in range; this is a caller contract, checked in
    /// debug builds.
    pub fn is_on(&self, row: usize, col: usize) -> bool {
        debug_assert!(row < ROW && col < COL);
        is_bit_set(self.rows[row], col)
    }

    /// The full bit-set for one row, for bulk consumers like HID report
    /// generation.
    pub fn get_row(&self, row: usize) -> RowWord {
        debug_assert!(row < ROW);
        self.rows[row]
    }

    /// Number of keys currently on, across the whole matrix.
    pub fn key_count(&self) -> u8 {
        self.rows
            .iter()
            .fold(0u8, |count, row| count.saturating_add(row.count_ones() as u8))
    }

    /// Log a human-readable grid of the matrix state, row index in hex,
    /// columns left-to-right. Diagnostic only.
    pub fn dump(&self) {
        info!("r/c 0123456789ABCDEF");
        for row in 0..ROW {
            info!("{:02x}: {:016b}", row as u8, self.rows[row].reverse_bits());
        }
    }

    pub(crate) fn set_bit(&mut self, row: usize, col: usize) {
        debug_assert!(row < ROW && col < COL);
        self.rows[row] = set_bit(self.rows[row], col);
    }

    pub(crate) fn clear_bit(&mut self, row: usize, col: usize) {
        debug_assert!(row < ROW && col < COL);
        self.rows[row] = clear_bit(self.rows[row], col);
    }
}

fn is_bit_set(word: RowWord, bit: usize) -> bool {
    word & (1 << bit) != 0
}

fn set_bit(word: RowWord, bit: usize) -> RowWord {
    word | (1 << bit)
}

fn clear_bit(word: RowWord, bit: usize) -> RowWord {
    word & !(1 << bit)
}

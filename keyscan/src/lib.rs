#![no_std]
#![allow(dead_code)]

//! Debounced key matrix scanner.
//!
//! `keyscan` turns raw, bouncing row/column switch readings into a stable
//! per-key on/off state. Rows are strobed one per [`Matrix::scan`] call so
//! the driving loop can interleave other periodic work; per-key shift
//! register histories decide when a key has settled.

#[macro_use]
mod fmt;

pub mod debounce;
pub mod event;
pub mod matrix;
pub mod state;

mod driver;

pub use matrix::{Matrix, ScanStatus};
pub use state::MatrixState;

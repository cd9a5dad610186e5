//! Dialog library - modal Yes/No and text-entry dialogs for a button-driven
//! display.
//!
//! This library contains the dialog state machines and their collaborators,
//! all testable on the host machine. The binary (`main.rs`) wires them to the
//! Pico 2 buttons and ST7789 display.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// === Pure logic modules (testable on host, no ARM dependencies) ===

// Configuration
pub mod config;
pub mod error;

// Input and dialogs
pub mod dialog;
pub mod input;

// Rendering
pub mod ui;

// Logging
pub mod log_buffer;

#[cfg(test)]
mod testing;

pub use error::Error;

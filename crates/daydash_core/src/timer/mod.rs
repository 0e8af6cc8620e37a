//! Focus (Pomodoro) timer.
//!
//! # Responsibility
//! - Model the work/break countdown as a pure state machine.
//! - Leave the wall clock to the caller: one `tick()` per elapsed second.
//!
//! # Invariants
//! - Only a running timer consumes ticks.
//! - Phase boundaries never pause the timer.
//! - Timer state is never persisted.

pub mod focus_timer;

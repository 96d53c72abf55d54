//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod workout_clock;

pub use workout_clock::spawn_workout_clock;

#![warn(missing_docs)]

//! Error types for the locomotion library.
//!
//! This module defines error types that can occur while constructing walker
//! configuration.

use core::fmt;

/// Errors that can occur in locomotion configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum LocomotionError {
    /// Error for an invalid leg duration.
    /// This variant is returned when a leg duration of zero time units is
    /// provided.
    InvalidLegDuration(&'static str),
    /// Error for an invalid frame interval.
    /// This variant is returned when the walk-cycle cadence is zero update
    /// calls per frame.
    InvalidFrameInterval(&'static str),
    /// Error for an invalid frame count.
    /// This variant is returned when the walk cycle has zero frames.
    InvalidFrameCount(&'static str),
}

impl fmt::Display for LocomotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocomotionError::InvalidLegDuration(msg) => write!(f, "Invalid leg duration: {}", msg),
            LocomotionError::InvalidFrameInterval(msg) => write!(f, "Invalid frame interval: {}", msg),
            LocomotionError::InvalidFrameCount(msg) => write!(f, "Invalid frame count: {}", msg),
        }
    }
}

impl std::error::Error for LocomotionError {}

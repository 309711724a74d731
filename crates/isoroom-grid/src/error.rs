//! This module defines the error types used by the `isoroom-grid` crate.

#![warn(missing_docs)]

/// Error type for room grid operations.
///
/// This enum encapsulates all possible errors that can occur while authoring
/// a room grid, such as invalid dimensions, malformed floorplans or
/// out-of-bounds edits.
#[derive(Debug, PartialEq)]
pub enum GridError {
    /// Error for invalid grid dimensions.
    /// This variant is returned when the grid width or depth is zero, or the
    /// requested tile count would overflow.
    InvalidDimensions(&'static str),
    /// Error for out-of-bounds access.
    /// This variant is returned when attempting to edit a tile outside the
    /// valid coordinate range.
    OutOfBounds(&'static str),
    /// Error for an invalid tile height.
    /// This variant is returned when a tile height above the supported
    /// maximum is authored.
    InvalidHeight(&'static str),
    /// Error for an invalid door placement.
    /// This variant is returned when the door is pointed at a tile that is
    /// not walkable.
    InvalidDoor(&'static str),
    /// Error for a malformed textual floorplan.
    /// This variant is returned when floorplan rows are ragged, empty or
    /// contain unrecognized characters.
    InvalidFloorplan(&'static str),
}

impl core::fmt::Display for GridError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GridError::InvalidDimensions(msg) => write!(f, "Invalid grid dimensions: {}", msg),
            GridError::OutOfBounds(msg) => write!(f, "Grid access out of bounds: {}", msg),
            GridError::InvalidHeight(msg) => write!(f, "Invalid tile height: {}", msg),
            GridError::InvalidDoor(msg) => write!(f, "Invalid door placement: {}", msg),
            GridError::InvalidFloorplan(msg) => write!(f, "Invalid floorplan: {}", msg),
        }
    }
}

impl core::error::Error for GridError {}

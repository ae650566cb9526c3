//! Defines the error types needed by the chess module
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by the `chess` and `board` modules
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Square identifier is malformed or out of range
    InvalidSquare,
    /// Attempt to move from a square that has no occupant
    EmptySource,
    /// Attempt to set up the starting position on a board that already holds pieces
    AlreadyInitialized,
    /// Board dimensions that can't give every square its own finite position
    InvalidGeometry,
    /// Cannot parse string
    ParseError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            InvalidSquare => "invalid square",
            EmptySource => "no piece on the source square",
            AlreadyInitialized => "board already holds pieces",
            InvalidGeometry => "invalid board geometry",
            ParseError => "cannot parse string",
        }.fmt(f)
    }
}

impl std::error::Error for Error { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` and `board` modules
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error returned when a `Color` cannot be parsed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseColorError;

/// Error returned when a `Piece` cannot be parsed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParsePieceError;

/// Error returned when a `File` cannot be parsed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseFileError;

/// Error returned when a `Rank` cannot be parsed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseRankError;

impl From<ParseColorError> for Error {
    fn from(_: ParseColorError) -> Error {
        Error::ParseError
    }
}

impl From<ParsePieceError> for Error {
    fn from(_: ParsePieceError) -> Error {
        Error::ParseError
    }
}

// a file or rank that doesn't parse can only mean a bad square identifier

impl From<ParseFileError> for Error {
    fn from(_: ParseFileError) -> Error {
        Error::InvalidSquare
    }
}

impl From<ParseRankError> for Error {
    fn from(_: ParseRankError) -> Error {
        Error::InvalidSquare
    }
}

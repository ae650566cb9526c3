//! Piece handles and the factories that create them
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use serde::Serialize;
use crate::chess::{Color, Piece};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Anything that can stand on a square of the [`Board`](../struct.Board.html).
///
/// The board only needs to know what a handle represents; whatever else the handle carries (a
/// scene-graph node, a model path, ...) belongs to the code that created it.
pub trait PieceHandle {
    /// The side the piece belongs to
    fn color(&self) -> Color;

    /// The kind of piece
    fn piece(&self) -> Piece;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Creates piece handles for the board's starting position.
pub trait PieceFactory {
    /// The type of handle produced
    type Handle: PieceHandle;

    /// Creates a handle for a piece of the given kind and color
    fn create(&mut self, color: Color, piece: Piece) -> Self::Handle;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A plain piece with no behavior, identified only by color and kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Occupant {
    /// The side the piece belongs to
    pub color: Color,
    /// The kind of piece
    pub piece: Piece,
}

impl Occupant {
    /// Creates a new occupant
    pub fn new(color: Color, piece: Piece) -> Self {
        Occupant { color, piece }
    }
}

impl PieceHandle for Occupant {
    fn color(&self) -> Color {
        self.color
    }

    fn piece(&self) -> Piece {
        self.piece
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.piece.name().to_lowercase())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Factory producing plain [`Occupant`](struct.Occupant.html) values
#[derive(Debug, Copy, Clone, Default)]
pub struct PlainPieces;

impl PieceFactory for PlainPieces {
    type Handle = Occupant;

    fn create(&mut self, color: Color, piece: Piece) -> Occupant {
        Occupant::new(color, piece)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn plain_pieces_keep_color_and_kind() {
        let occ = PlainPieces.create(Color::Black, Piece::Knight);
        assert_eq!(occ.color(), Color::Black);
        assert_eq!(occ.piece(), Piece::Knight);
        assert_eq!(occ, Occupant::new(Color::Black, Piece::Knight));
    }

    #[test]
    fn display() {
        assert_eq!(Occupant::new(Color::White, Piece::Queen).to_string(), "white queen");
        assert_eq!(Occupant::new(Color::Black, Piece::Pawn).to_string(), "black pawn");
    }
}

//! The board model: where each square sits in the scene and which piece, if any, stands on it.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use log::{debug, trace};
use crate::chess::{Color, Piece, File, Rank, Square, IntoSquare};
use crate::chess::error::{Error, Result};

pub use geometry::{Geometry, Vec3};
pub use factory::{PieceHandle, PieceFactory, Occupant, PlainPieces};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An 8×8 board of squares laid out in scene space, and the pieces standing on them.
///
/// The position of each square is computed once, when the board is created, and never changes.
/// Occupancy starts out empty and changes only through [`place`](#method.place),
/// [`move_piece`](#method.move_piece), [`clear`](#method.clear) and
/// [`setup_initial_position`](#method.setup_initial_position).
///
/// No rules of chess are enforced. Any piece may be placed on or moved to any square.
///
/// # Example
/// ```
/// use chessboard3d::board::{Board, Vec3};
///
/// let mut board: Board = Board::new();
/// board.setup().unwrap();
/// board.move_piece("E2", "E4").unwrap();
///
/// assert!(board.occupant_at("E2").unwrap().is_none());
/// assert_eq!(board.position_of("E4").unwrap(), Vec3::new(1.0, 2.0, 1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Board<T = Occupant> {
    geometry: Geometry,
    positions: [Vec3; Square::COUNT],
    occupants: Vec<Option<T>>,
}

impl<T: PieceHandle> Board<T> {
    /// Creates an empty board with the default geometry
    pub fn new() -> Self {
        Self::build(Geometry::default())
    }

    /// Creates an empty board with the given geometry.
    ///
    /// Fails with `InvalidGeometry` if the geometry can't give every square its own finite
    /// position.
    pub fn with_geometry(geometry: Geometry) -> Result<Self> {
        geometry.validate()?;
        Ok(Self::build(geometry))
    }

    fn build(geometry: Geometry) -> Self {
        let mut positions = [Vec3::ZERO; Square::COUNT];
        for sq in Square::all() {
            positions[sq.index()] = geometry.position_of(sq);
        }

        let mut occupants = Vec::with_capacity(Square::COUNT);
        occupants.resize_with(Square::COUNT, || None);

        Board { geometry, positions, occupants }
    }

    /// Returns the board's geometry
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns the point at which a piece standing on `square` is placed
    pub fn position_of<S: IntoSquare>(&self, square: S) -> Result<Vec3> {
        Ok(self.positions[square.into_square()?.index()])
    }

    /// Returns the center of `square`'s tile at floor level
    pub fn tile_position_of<S: IntoSquare>(&self, square: S) -> Result<Vec3> {
        Ok(self.geometry.tile_position_of(square.into_square()?))
    }

    /// Returns the piece standing on `square`, if any
    pub fn occupant_at<S: IntoSquare>(&self, square: S) -> Result<Option<&T>> {
        Ok(self.occupants[square.into_square()?.index()].as_ref())
    }

    /// Puts `occupant` on `square`. Whatever already stood there is removed from the board and
    /// returned.
    pub fn place<S: IntoSquare>(&mut self, square: S, occupant: T) -> Result<Option<T>> {
        let square = square.into_square()?;
        Ok(self.install(square, occupant))
    }

    /// Moves the piece on `from` to `to`, returning whatever it displaced on `to`.
    ///
    /// Fails with `EmptySource` if there is nothing on `from`. The board is left unchanged if the
    /// move fails. Moving a piece onto its own square does nothing.
    pub fn move_piece<S1, S2>(&mut self, from: S1, to: S2) -> Result<Option<T>>
        where S1: IntoSquare, S2: IntoSquare
    {
        let from = from.into_square()?;
        let to = to.into_square()?;

        if self.occupants[from.index()].is_none() {
            return Err(Error::EmptySource);
        }
        if from == to {
            return Ok(None);
        }

        let occupant = self.occupants[from.index()].take().ok_or(Error::EmptySource)?;
        trace!("move {}{}", from, to);
        Ok(self.install(to, occupant))
    }

    /// Removes and returns the piece on `square`, if any
    pub fn clear<S: IntoSquare>(&mut self, square: S) -> Result<Option<T>> {
        Ok(self.occupants[square.into_square()?.index()].take())
    }

    /// Sets up the standard starting position, creating each piece with `factory`.
    ///
    /// Fails with `AlreadyInitialized`, leaving the board unchanged, if any square is occupied.
    pub fn setup_initial_position<F>(&mut self, factory: &mut F) -> Result<()>
        where F: PieceFactory<Handle = T>
    {
        if !self.is_empty() {
            return Err(Error::AlreadyInitialized);
        }

        for &color in Color::ALL.iter() {
            for (&file, &piece) in File::ALL.iter().zip(Piece::BACK_RANK.iter()) {
                let sq = Square::from_coord(file, color.back_rank());
                self.occupants[sq.index()] = Some(factory.create(color, piece));
            }
            for &file in File::ALL.iter() {
                let sq = Square::from_coord(file, color.pawn_rank());
                self.occupants[sq.index()] = Some(factory.create(color, Piece::Pawn));
            }
        }

        debug!("initial position set up: {}", self);
        Ok(())
    }

    /// Returns an iterator over the occupied squares and their occupants, in square order
    pub fn occupants(&self) -> impl Iterator<Item = (Square, &T)> + '_ {
        Square::all().filter_map(move |sq| {
            self.occupants[sq.index()].as_ref().map(|occ| (sq, occ))
        })
    }

    /// Returns an iterator over every square and its position, in square order
    pub fn squares(&self) -> impl Iterator<Item = (Square, Vec3)> + '_ {
        Square::all().map(move |sq| (sq, self.positions[sq.index()]))
    }

    /// Returns the number of occupied squares
    pub fn len(&self) -> usize {
        self.occupants.iter().filter(|occ| occ.is_some()).count()
    }

    /// Returns true if no square is occupied
    pub fn is_empty(&self) -> bool {
        self.occupants.iter().all(Option::is_none)
    }

    fn install(&mut self, square: Square, occupant: T) -> Option<T> {
        trace!("place {} {} on {}", occupant.color(), occupant.piece().name(), square);
        let evicted = self.occupants[square.index()].replace(occupant);
        if let Some(old) = &evicted {
            debug!("{} {} evicted from {}", old.color(), old.piece().name(), square);
        }
        evicted
    }
}

impl Board<Occupant> {
    /// Sets up the standard starting position with plain occupants
    pub fn setup(&mut self) -> Result<()> {
        self.setup_initial_position(&mut PlainPieces)
    }

    /// Creates a board from the piece placement field of a FEN string (eg.
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`), using the default geometry.
    pub fn from_placement(s: &str) -> Result<Self> {
        let mut board: Board = Board::new();
        let rows: Vec<_> = s.trim().split('/').collect();
        if rows.len() != Rank::COUNT {
            return Err(Error::ParseError);
        }

        for (row, text) in rows.iter().enumerate() {
            let rank = Rank::ALL[Rank::COUNT - 1 - row];
            let mut f = 0;
            let mut after_digit = false;
            for c in text.chars() {
                match c {
                    '1' ..= '8' if !after_digit => {
                        f += c as usize - '0' as usize;
                        after_digit = true;
                    }
                    _ => {
                        after_digit = false;
                        let file = *File::ALL.get(f).ok_or(Error::ParseError)?;
                        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
                        let piece: Piece = c.to_string().parse()?;
                        board.place(Square::from_coord(file, rank), Occupant::new(color, piece))?;
                        f += 1;
                    }
                }
                if f > File::COUNT {
                    return Err(Error::ParseError);
                }
            }
            if f != File::COUNT {
                return Err(Error::ParseError);
            }
        }

        Ok(board)
    }
}

impl<T: PieceHandle> Default for Board<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board<Occupant> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Board::from_placement(s)
    }
}

/// Formats the board as the piece placement field of a FEN string
impl<T: PieceHandle> fmt::Display for Board<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();

        for &rank in Rank::ALL.iter().rev() {
            let mut empty = 0;
            for &file in File::ALL.iter() {
                match &self.occupants[Square::from_coord(file, rank).index()] {
                    Some(occ) => {
                        if empty > 0 {
                            s.push_str(&empty.to_string());
                            empty = 0;
                        }
                        s.push(occ.piece().fen_char(occ.color()));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                s.push_str(&empty.to_string());
            }
            if rank != Rank::R1 {
                s.push('/');
            }
        }

        s.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod geometry;
pub mod factory;

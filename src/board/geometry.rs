//! Physical dimensions of the board and the mapping from squares to scene coordinates
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::ops::{Add, Sub};
use serde::{Serialize, Deserialize};
use crate::chess::{File, Rank, Square};
use crate::chess::error::{Error, Result};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A point or extent in scene space. `y` is up; the board lies in the `x`/`z` plane.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// The origin
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    /// Creates a new vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The board's physical dimensions.
///
/// The grid is centered on the origin. Columns run along `x` from file `A` to file `H`; rows run
/// along `z` from rank 8 (row 0, the far side) to rank 1 (row 7).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Edge length of a single square
    pub square_size: f32,
    /// Height at which pieces stand
    pub height_offset: f32,
    /// Thickness of the border around the grid
    pub border_width: f32,
}

impl Geometry {
    /// The number of squares along each side
    pub const SQUARES_PER_SIDE: usize = 8;

    /// Edge length of the whole grid, not counting the border
    pub fn board_size(&self) -> f32 {
        self.square_size * Self::SQUARES_PER_SIDE as f32
    }

    /// Describes what keeps this geometry from giving all 64 squares distinct, finite positions,
    /// or returns `None` if nothing does.
    pub fn flaw(&self) -> Option<&'static str> {
        if !(self.square_size.is_finite() && self.square_size > 0.0) {
            return Some("square_size must be positive");
        }
        if !self.board_size().is_finite() {
            return Some("square_size is too large");
        }
        // neighbouring rows and columns must not round onto each other
        for i in 1..Self::SQUARES_PER_SIDE {
            let (near, far) = (self.offset(i - 1), self.offset(i));
            if !(near.is_finite() && far.is_finite() && near < far) {
                return Some("square_size is out of range");
            }
        }
        if !self.height_offset.is_finite() {
            return Some("height_offset must be finite");
        }
        if !(self.border_width.is_finite() && self.border_width >= 0.0) {
            return Some("border_width must not be negative");
        }
        None
    }

    /// Fails with `InvalidGeometry` if the geometry has a [`flaw`](#method.flaw)
    pub fn validate(&self) -> Result<()> {
        match self.flaw() {
            Some(_) => Err(Error::InvalidGeometry),
            None => Ok(()),
        }
    }

    /// The column a square lies in, `0` for file `A`
    pub fn column(square: Square) -> usize {
        usize::from(square.file())
    }

    /// The row a square lies in, `0` for rank 8
    pub fn row(square: Square) -> usize {
        Rank::COUNT - 1 - usize::from(square.rank())
    }

    /// Distance along an axis from the board's center to the center of the column or row `index`
    pub fn offset(&self, index: usize) -> f32 {
        index as f32 * self.square_size - self.board_size() / 2.0 + self.square_size / 2.0
    }

    /// The point at which a piece standing on `square` is placed
    pub fn position_of(&self, square: Square) -> Vec3 {
        self.tile_position_of(square) + Vec3::new(0.0, self.height_offset, 0.0)
    }

    /// The center of the tile for `square`, at floor level
    pub fn tile_position_of(&self, square: Square) -> Vec3 {
        Vec3::new(self.offset(Self::column(square)), 0.0, self.offset(Self::row(square)))
    }

    /// The square whose tile contains the point (`x`, `z`), if any. `y` is ignored.
    pub fn square_at(&self, point: Vec3) -> Option<Square> {
        let half = self.board_size() / 2.0;
        let from_corner = point - Vec3::new(-half, 0.0, -half);
        let col = (from_corner.x / self.square_size).floor();
        let row = (from_corner.z / self.square_size).floor();
        let n = Self::SQUARES_PER_SIDE as f32;

        if col >= 0.0 && col < n && row >= 0.0 && row < n {
            let file = File::ALL[col as usize];
            let rank = Rank::ALL[Rank::COUNT - 1 - row as usize];
            Some(Square::from_coord(file, rank))
        } else {
            None
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            square_size: 2.0,
            height_offset: 2.0,
            border_width: 1.8,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// ***************************************** UNIT TESTS ***************************************** //
////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod test {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn default_dimensions() {
        let g = Geometry::default();
        assert_eq!(g.board_size(), 16.0);
        assert_eq!(g.offset(0), -7.0);
        assert_eq!(g.offset(7), 7.0);
    }

    #[test]
    fn corners_of_the_default_board() {
        let g = Geometry::default();
        assert_eq!(g.position_of(sq("A8")), Vec3::new(-7.0, 2.0, -7.0));
        assert_eq!(g.position_of(sq("H8")), Vec3::new(7.0, 2.0, -7.0));
        assert_eq!(g.position_of(sq("A1")), Vec3::new(-7.0, 2.0, 7.0));
        assert_eq!(g.position_of(sq("H1")), Vec3::new(7.0, 2.0, 7.0));
        assert_eq!(g.position_of(sq("E4")), Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn tiles_sit_on_the_floor() {
        let g = Geometry::default();
        for s in Square::all() {
            let tile = g.tile_position_of(s);
            assert_eq!(tile.y, 0.0);
            assert_eq!(Vec3::new(tile.x, g.height_offset, tile.z), g.position_of(s));
        }
    }

    #[test]
    fn square_size_scales_positions() {
        let g = Geometry { square_size: 1.0, height_offset: 0.5, border_width: 0.0 };
        assert_eq!(g.position_of(sq("A8")), Vec3::new(-3.5, 0.5, -3.5));
        assert_eq!(g.position_of(sq("H1")), Vec3::new(3.5, 0.5, 3.5));
    }

    #[test]
    fn square_at_inverts_position_of() {
        let g = Geometry::default();
        for s in Square::all() {
            assert_eq!(g.square_at(g.position_of(s)), Some(s));
        }
        assert_eq!(g.square_at(Vec3::new(8.5, 0.0, 0.0)), None);
        assert_eq!(g.square_at(Vec3::new(0.0, 0.0, -8.5)), None);
    }

    #[test]
    fn default_geometry_is_valid() {
        assert_eq!(Geometry::default().flaw(), None);
        assert_eq!(Geometry::default().validate(), Ok(()));
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let base = Geometry::default();
        for &bad in &[
            Geometry { square_size: 0.0, ..base },
            Geometry { square_size: -1.0, ..base },
            Geometry { square_size: std::f32::NAN, ..base },
            Geometry { square_size: std::f32::INFINITY, ..base },
            Geometry { square_size: 1.0e38, ..base },
            Geometry { height_offset: std::f32::NAN, ..base },
            Geometry { height_offset: std::f32::INFINITY, ..base },
            Geometry { border_width: -0.5, ..base },
        ] {
            assert!(bad.flaw().is_some(), "{:?}", bad);
            assert_eq!(bad.validate(), Err(Error::InvalidGeometry), "{:?}", bad);
        }
    }

    #[test]
    fn large_but_finite_squares_stay_distinct() {
        let g = Geometry { square_size: 1.0e37, ..Geometry::default() };
        assert_eq!(g.validate(), Ok(()));
        let a1 = g.position_of(sq("A1"));
        let h8 = g.position_of(sq("H8"));
        assert!(a1.x.is_finite() && a1.z.is_finite());
        assert_ne!(a1, h8);
    }

    #[test]
    fn vector_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Vec3::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(a.to_string(), "(1, 2, 3)");
    }
}

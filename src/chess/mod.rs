//! The `chess` module defines the value types shared by the board model: sides, piece kinds,
//! files, ranks and squares.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Serializer};
use error::{ParseColorError, ParsePieceError, ParseFileError, ParseRankError};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece is on, based on the color of its material.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// Both colors, `White` first
    pub const ALL: [Color; Color::COUNT] = [Color::White, Color::Black];

    /// The rank holding this side's pieces in the starting position
    pub fn back_rank(self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }

    /// The rank holding this side's pawns in the starting position
    pub fn pawn_rank(self) -> Rank {
        match self {
            Color::White => Rank::R2,
            Color::Black => Rank::R7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => "white".fmt(f),
            Color::Black => "black".fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w"|"white" => Ok(Color::White),
            "b"|"black" => Ok(Color::Black),
            _           => Err(ParseColorError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The kind of a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// The number of piece types
    pub const COUNT: usize = Piece::King as usize + 1;

    /// Every piece kind, in discriminant order
    pub const ALL: [Piece; Piece::COUNT] = [
        Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King,
    ];

    /// The pieces on the back rank of the starting position, from file `A` to file `H`
    pub const BACK_RANK: [Piece; File::COUNT] = [
        Piece::Rook, Piece::Knight, Piece::Bishop, Piece::Queen,
        Piece::King, Piece::Bishop, Piece::Knight, Piece::Rook,
    ];

    /// Returns the full name of the piece, capitalized (eg. "Knight")
    pub fn name(self) -> &'static str {
        match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        }
    }

    /// Returns the single letter used for the piece in FEN, upper case for `White` and lower case
    /// for `Black`.
    pub fn fen_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        };

        match color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fen_char(Color::White).fmt(f)
    }
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p"|"pawn"   => Ok(Piece::Pawn),
            "n"|"knight" => Ok(Piece::Knight),
            "b"|"bishop" => Ok(Piece::Bishop),
            "r"|"rook"   => Ok(Piece::Rook),
            "q"|"queen"  => Ok(Piece::Queen),
            "k"|"king"   => Ok(Piece::King),
            _            => Err(ParsePieceError),
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::Pawn
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;

    /// Every file, from `A` to `H`
    pub const ALL: [File; File::COUNT] = [
        File::A, File::B, File::C, File::D, File::E, File::F, File::G, File::H,
    ];

    /// Returns the file's letter, upper case
    pub fn to_char(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_char().fmt(f)
    }
}

impl FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ 'a'..='h'), None) => Ok(File::ALL[(c as u8 - b'a') as usize]),
            (Some(c @ 'A'..='H'), None) => Ok(File::ALL[(c as u8 - b'A') as usize]),
            _ => Err(ParseFileError),
        }
    }
}

impl Default for File {
    fn default() -> Self {
        File::A
    }
}

impl From<File> for usize {
    fn from(value: File) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, labeled from nearest to farthest from `White`'s perspective
/// as `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    R1 = 0, R2 = 1, R3 = 2, R4 = 3, R5 = 4, R6 = 5, R7 = 6, R8 = 7,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;

    /// Every rank, from `R1` to `R8`
    pub const ALL: [Rank; Rank::COUNT] = [
        Rank::R1, Rank::R2, Rank::R3, Rank::R4, Rank::R5, Rank::R6, Rank::R7, Rank::R8,
    ];

    /// Returns the rank's digit
    pub fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_char().fmt(f)
    }
}

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ '1'..='8'), None) => Ok(Rank::ALL[(c as u8 - b'1') as usize]),
            _ => Err(ParseRankError),
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::R1
    }
}

impl From<Rank> for usize {
    fn from(value: Rank) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board, labeled using the `File` and `Rank` as coordinates.
///
/// Squares are ordered by file, then by rank (`A1`, `A2`, ..., `A8`, `B1`, ...), which is also the
/// order of their indices.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = File::COUNT * Rank::COUNT;

    /// Returns a square from its file and rank
    pub fn from_coord(file: File, rank: Rank) -> Square {
        Square { file, rank }
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        self.file
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        self.rank
    }

    /// Returns the square's index, in the range `0..Square::COUNT`
    pub fn index(self) -> usize {
        ((self.file as usize) << 3) + self.rank as usize
    }

    /// Returns an iterator over all 64 squares, in index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Square::COUNT).map(|i| Square::from_coord(File::ALL[i >> 3], Rank::ALL[i & 7]))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.file.to_string() + &self.rank.to_string()).fmt(f)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c: Vec<_> = s.trim().chars().collect();
        if c.len() == 2 {
            Ok(Square::from_coord(c[0].to_string().parse()?, c[1].to_string().parse()?))
        } else {
            Err(Error::InvalidSquare)
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Square::from_coord(File::A, Rank::R1)
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Conversion into a `Square` for methods that accept either a `Square` or a square identifier
/// such as `"E4"`.
pub trait IntoSquare {
    /// Converts `self` into a `Square`, failing with `Error::InvalidSquare` if it doesn't name one
    fn into_square(self) -> error::Result<Square>;
}

impl IntoSquare for Square {
    fn into_square(self) -> error::Result<Square> {
        Ok(self)
    }
}

impl IntoSquare for &Square {
    fn into_square(self) -> error::Result<Square> {
        Ok(*self)
    }
}

impl IntoSquare for &str {
    fn into_square(self) -> error::Result<Square> {
        self.parse()
    }
}

impl IntoSquare for &String {
    fn into_square(self) -> error::Result<Square> {
        self.parse()
    }
}

impl IntoSquare for (File, Rank) {
    fn into_square(self) -> error::Result<Square> {
        Ok(Square::from_coord(self.0, self.1))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod error;
pub use error::Error;

#[cfg(test)]
mod color_tests {
    use super::Color;
    use super::Rank;

    #[test]
    fn display_trait_works() {
        assert_eq!(format!("{}", Color::White), "white");
        assert_eq!(format!("{}", Color::Black), "black");
    }

    #[test]
    fn fromstr_trait_works() {
        assert_eq!("w".parse::<Color>().unwrap(), Color::White);
        assert_eq!("b".parse::<Color>().unwrap(), Color::Black);
        assert_eq!("White".parse::<Color>().unwrap(), Color::White);
        assert_eq!("BLACK".parse::<Color>().unwrap(), Color::Black);
        assert!("x".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn default_is_white() {
        assert_eq!(Color::White, Default::default());
    }

    #[test]
    fn starting_ranks() {
        assert_eq!(Color::White.back_rank(), Rank::R1);
        assert_eq!(Color::White.pawn_rank(), Rank::R2);
        assert_eq!(Color::Black.pawn_rank(), Rank::R7);
        assert_eq!(Color::Black.back_rank(), Rank::R8);
    }

}

#[cfg(test)]
mod piece_tests {
    use super::{Color, Piece};

    #[test]
    fn display_trait_works() {
        assert_eq!(format!("{}", Piece::Pawn), "P");
        assert_eq!(format!("{}", Piece::Knight), "N");
        assert_eq!(format!("{}", Piece::Bishop), "B");
        assert_eq!(format!("{}", Piece::Rook), "R");
        assert_eq!(format!("{}", Piece::Queen), "Q");
        assert_eq!(format!("{}", Piece::King), "K");
    }

    #[test]
    fn fen_char_depends_on_color() {
        assert_eq!(Piece::Knight.fen_char(Color::White), 'N');
        assert_eq!(Piece::Knight.fen_char(Color::Black), 'n');
    }

    #[test]
    fn fromstr_accepts_letters_and_names() {
        for &piece in Piece::ALL.iter() {
            assert_eq!(piece.to_string().parse::<Piece>().unwrap(), piece);
            assert_eq!(piece.to_string().to_lowercase().parse::<Piece>().unwrap(), piece);
            assert_eq!(piece.name().parse::<Piece>().unwrap(), piece);
        }
        assert!("X".parse::<Piece>().is_err());
        assert!("castle".parse::<Piece>().is_err());
    }

}

#[cfg(test)]
mod file_and_rank_tests {
    use super::{File, Rank};

    #[test]
    fn display_trait_works() {
        assert_eq!(format!("{}", File::A), "A");
        assert_eq!(format!("{}", File::H), "H");
        assert_eq!(format!("{}", Rank::R1), "1");
        assert_eq!(format!("{}", Rank::R8), "8");
    }

    #[test]
    fn fromstr_trait_works() {
        for &f in File::ALL.iter() {
            assert_eq!(f.to_string().parse::<File>().unwrap(), f);
            assert_eq!(f.to_string().to_lowercase().parse::<File>().unwrap(), f);
        }
        for &r in Rank::ALL.iter() {
            assert_eq!(r.to_string().parse::<Rank>().unwrap(), r);
        }
        assert!("i".parse::<File>().is_err());
        assert!("ab".parse::<File>().is_err());
        assert!("0".parse::<Rank>().is_err());
        assert!("9".parse::<Rank>().is_err());
        assert!("".parse::<Rank>().is_err());
    }

    #[test]
    fn usize_conversions_follow_all() {
        for (i, &f) in File::ALL.iter().enumerate() {
            assert_eq!(usize::from(f), i);
        }
        for (i, &r) in Rank::ALL.iter().enumerate() {
            assert_eq!(usize::from(r), i);
        }
    }
}

#[cfg(test)]
mod square_tests {
    use super::error::Error;
    use super::{File, Rank, Square};

    #[test]
    fn file_and_rank_methods_match_from_coord() {
        for &f in File::ALL.iter() {
            for &r in Rank::ALL.iter() {
                let s = Square::from_coord(f, r);
                assert_eq!(f, s.file());
                assert_eq!(r, s.rank());
            }
        }
    }

    #[test]
    fn display_and_fromstr_traits_match_file_and_rank() {
        for s in Square::all() {
            assert_eq!(format!("{}", s), format!("{}{}", s.file(), s.rank()));
            assert_eq!(format!("{}", s).parse::<Square>().unwrap(), s);
            assert_eq!(format!("{}", s).to_lowercase().parse::<Square>().unwrap(), s);
        }
    }

    #[test]
    fn fromstr_trait_produces_errors_when_it_should() {
        for bad in &["", "A", "1", "I9", "A0", "A9", "I1", "A10", "a1x", "1a", "??"] {
            assert_eq!(bad.parse::<Square>(), Err(Error::InvalidSquare), "{:?}", bad);
        }
    }

    #[test]
    fn all_yields_every_square_once_in_index_order() {
        let squares: Vec<_> = Square::all().collect();
        assert_eq!(squares.len(), Square::COUNT);
        for (i, s) in squares.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }


    #[test]
    fn default_is_a1() {
        assert_eq!("A1".parse::<Square>().unwrap(), Default::default());
    }
}

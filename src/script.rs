//! A line-oriented command language for arranging pieces on a board.
//!
//! Each line holds one command. Blank lines and lines starting with `#` are ignored. Commands
//! and their arguments are case insensitive.
//!
//! ```text
//! setup                       set up the starting position
//! place SQUARE COLOR PIECE    put a piece on a square, removing whatever stood there
//! move FROM TO                move a piece (also written FROMTO or FROM-TO, eg. e2e4)
//! clear SQUARE                remove the piece on a square
//! load PLACEMENT              replace the board with a FEN piece placement
//! where SQUARE                report the position of a square
//! what SQUARE                 report the piece on a square
//! show                        report the board as a FEN piece placement
//! ```
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
use lazy_static::lazy_static;
use log::info;
use regex::{RegexSet, Regex};
use crate::board::{Board, Occupant};
use crate::chess::{Color, Piece, Square};
use crate::chess::error::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A single script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sets up the starting position.
    ///
    /// ```text
    /// setup
    /// ```
    Setup,

    /// Puts a piece on a square.
    ///
    /// ```text
    /// place SQUARE COLOR PIECE
    /// ```
    ///
    /// COLOR is `white`, `black`, `w` or `b`. PIECE is a piece name or its letter.
    Place {
        /// The target square
        square: Square,
        /// The side the piece belongs to
        color: Color,
        /// The kind of piece
        piece: Piece,
    },

    /// Moves a piece with no regard for the rules of chess.
    ///
    /// ```text
    /// move FROM TO
    /// FROMTO
    /// FROM-TO
    /// ```
    Move {
        /// The square the piece leaves
        from: Square,
        /// The square the piece lands on
        to: Square,
    },

    /// Removes the piece on a square.
    ///
    /// ```text
    /// clear SQUARE
    /// ```
    Clear(Square),

    /// Replaces the contents of the board.
    ///
    /// ```text
    /// load PLACEMENT
    /// ```
    ///
    /// PLACEMENT is the piece placement field of a FEN string.
    Load(String),

    /// Reports the scene position of a square.
    ///
    /// ```text
    /// where SQUARE
    /// ```
    Where(Square),

    /// Reports the piece on a square.
    ///
    /// ```text
    /// what SQUARE
    /// ```
    What(Square),

    /// Reports the board as a FEN piece placement.
    ///
    /// ```text
    /// show
    /// ```
    Show,
}

impl Command {
    /// Carries out the command on `board`, returning the line to report, if any.
    ///
    /// `place` and `move` only report when they remove a piece from the board.
    pub fn apply(&self, board: &mut Board) -> Result<Option<String>, ScriptError> {
        use Command::*;

        let report = match self {
            Setup => {
                board.setup()?;
                None
            },
            Place{ square, color, piece } => {
                board.place(*square, Occupant::new(*color, *piece))?
                    .map(|old| format!("{}: captured {}", square, old))
            },
            Move{ from, to } => {
                board.move_piece(*from, *to)?
                    .map(|old| format!("{}: captured {}", to, old))
            },
            Clear(square) => {
                board.clear(*square)?;
                None
            },
            Load(placement) => {
                let loaded: Board = placement.parse()?;
                let mut fresh = Board::with_geometry(*board.geometry())?;
                for (square, occ) in loaded.occupants() {
                    fresh.place(square, *occ)?;
                }
                *board = fresh;
                None
            },
            Where(square) => Some(format!("{} {}", square, board.position_of(*square)?)),
            What(square) => match board.occupant_at(*square)? {
                Some(occ) => Some(format!("{} {}", square, occ)),
                None => Some(format!("{} empty", square)),
            },
            Show => Some(board.to_string()),
        };

        Ok(report)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Command::*;

        match self {
            Setup => "setup".fmt(f),
            Place{ square, color, piece } => {
                format!("place {} {} {}", square, color, piece.name().to_lowercase()).fmt(f)
            },
            Move{ from, to } => format!("move {} {}", from, to).fmt(f),
            Clear(square) => format!("clear {}", square).fmt(f),
            Load(placement) => format!("load {}", placement).fmt(f),
            Where(square) => format!("where {}", square).fmt(f),
            What(square) => format!("what {}", square).fmt(f),
            Show => "show".fmt(f),
        }
    }
}

impl FromStr for Command {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, ScriptError> {
        use Command::*;

        let s = s.trim();
        if let Some(ind) = COMMAND_SET.matches(s).iter().next() {
            let args = COMMAND_VEC[ind].captures(s).expect("INFALLIBLE");
            let arg = |i: usize| args.get(i).expect("INFALLIBLE").as_str();

            match ind {
                0 => Ok(Setup),
                1 => Ok(Place{
                    square: arg(1).parse()?,
                    color: arg(2).parse::<Color>().map_err(Error::from)?,
                    piece: arg(3).parse::<Piece>().map_err(Error::from)?,
                }),
                2 | 3 => Ok(Move{ from: arg(1).parse()?, to: arg(2).parse()? }),
                4 => Ok(Clear(arg(1).parse()?)),
                5 => Ok(Load(arg(1).to_string())),
                6 => Ok(Where(arg(1).parse()?)),
                7 => Ok(What(arg(1).parse()?)),
                8 => Ok(Show),
                _ => unreachable!(),
            }
        } else {
            Err(ScriptError::UnknownCommand(s.to_string()))
        }
    }
}

const COMMANDS: [&str; 9] = [
    r"(?i)^setup$",
    r"(?i)^place\s+(\S+)\s+(\S+)\s+(\S+)$",
    r"(?i)^move\s+(\S+)\s+(\S+)$",
    r"(?i)^([a-z]\d)-?([a-z]\d)$",
    r"(?i)^clear\s+(\S+)$",
    r"(?i)^load\s+(\S+)$",
    r"(?i)^where\s+(\S+)$",
    r"(?i)^what\s+(\S+)$",
    r"(?i)^show$",
];

lazy_static! {
    static ref COMMAND_SET: RegexSet = RegexSet::new(&COMMANDS).expect("INFALLIBLE");
    static ref COMMAND_VEC: Vec<Regex> = {
        let mut cmd_vec = Vec::new();
        for cmd in &COMMANDS {
            cmd_vec.push(Regex::new(cmd).expect("INFALLIBLE"));
        }
        cmd_vec
    };
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Runs every command in `script` against `board`, in order, and returns the reported lines.
///
/// Stops at the first command that fails. The error names the failing line, counting from 1.
/// Commands before the failing one stay applied.
pub fn run(board: &mut Board, script: &str) -> Result<Vec<String>, ScriptError> {
    let mut reports = Vec::new();

    for (i, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        info!("<script>: {}", line);
        let at_line = |err| ScriptError::AtLine(i + 1, Box::new(err));
        let cmd: Command = line.parse().map_err(at_line)?;
        if let Some(report) = cmd.apply(board).map_err(at_line)? {
            info!("<report>: {}", report);
            reports.push(report);
        }
    }

    Ok(reports)
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type for scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The line isn't a recognized command
    UnknownCommand(String),
    /// The board rejected the command or one of its arguments
    Board(Error),
    /// An error on the given line of a script
    AtLine(usize, Box<ScriptError>),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::UnknownCommand(cmd) => write!(f, "unknown command: {}", cmd),
            ScriptError::Board(err) => err.fmt(f),
            ScriptError::AtLine(line, err) => write!(f, "line {}: {}", line, err),
        }
    }
}

impl std::error::Error for ScriptError { }

impl From<Error> for ScriptError {
    fn from(err: Error) -> ScriptError {
        ScriptError::Board(err)
    }
}

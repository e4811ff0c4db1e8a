//! Board data model and the raw 9-byte interchange form.
//!
//! A `Board` is a 3x3 grid of `Square` in row-major order.  The raw form
//! stores one byte per square (0 = empty, 1 = X, 2 = O), 9 bytes per board,
//! which is the uncompressed representation the codec is measured against.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use crate::Error;

#[derive(FromPrimitive,Clone,Copy,PartialEq,Eq,Debug)]
pub enum Square {
    Empty = 0,
    X = 1,
    O = 2
}

impl Default for Square {
    fn default() -> Self {
        Square::Empty
    }
}

#[derive(Clone,Copy,PartialEq,Eq,Debug,Default)]
pub struct Board {
    pub squares: [[Square;3];3]
}

impl Board {
    /// number of non-empty squares
    pub fn occupied(&self) -> usize {
        self.squares.iter().flatten().filter(|s| **s != Square::Empty).count()
    }
}

/// A finite ordered sequence of boards, e.g. a self-play trace.
pub type BoardStream = Vec<Board>;

/// One game's boards in move order.
#[derive(Clone,PartialEq,Eq,Debug,Default)]
pub struct Game {
    pub boards: Vec<Board>
}

pub type GameList = Vec<Game>;

/// Expand a board stream into the raw form, 9 bytes per board.
pub fn boards_to_raw(boards: &[Board]) -> Vec<u8> {
    let mut ans = Vec::with_capacity(boards.len() * 9);
    for board in boards {
        for row in &board.squares {
            for square in row {
                ans.push(*square as u8);
            }
        }
    }
    ans
}

/// Parse the raw form back into a board stream.  The length must be a
/// multiple of 9 and every byte must be a legal square value.
pub fn raw_to_boards(raw: &[u8]) -> Result<BoardStream,Error> {
    if raw.len() % 9 != 0 {
        return Err(Error::FileFormatMismatch);
    }
    let mut ans = Vec::with_capacity(raw.len() / 9);
    for chunk in raw.chunks_exact(9) {
        let mut board = Board::default();
        for (i,byte) in chunk.iter().enumerate() {
            board.squares[i / 3][i % 3] = match Square::from_u8(*byte) {
                Some(square) => square,
                None => return Err(Error::FileFormatMismatch)
            };
        }
        ans.push(board);
    }
    Ok(ans)
}

#[test]
fn raw_round_trip() {
    let mut board = Board::default();
    board.squares[0][0] = Square::X;
    board.squares[1][1] = Square::O;
    board.squares[2][2] = Square::X;
    let boards = vec![Board::default(),board];
    let raw = boards_to_raw(&boards);
    assert_eq!(raw.len(),18);
    assert_eq!(raw[9..],[1,0,0,0,2,0,0,0,1]);
    assert_eq!(raw_to_boards(&raw),Ok(boards));
}

#[test]
fn raw_rejects_bad_input() {
    assert_eq!(raw_to_boards(&[0;10]),Err(Error::FileFormatMismatch));
    assert_eq!(raw_to_boards(&[3;9]),Err(Error::FileFormatMismatch));
}

#[test]
fn occupancy() {
    let mut board = Board::default();
    assert_eq!(board.occupied(),0);
    board.squares[0][2] = Square::O;
    board.squares[2][0] = Square::X;
    assert_eq!(board.occupied(),2);
}

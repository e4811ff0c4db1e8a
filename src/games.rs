//! Splitting a flat board stream into games and back.
//!
//! The codec itself is oblivious to game boundaries; they are recovered
//! from the stream by occupancy.  A board with exactly one occupied square
//! can only be a first move, so it opens a new game; two or more occupied
//! squares continue the current game; a fully empty board never appears in
//! a legal trace and is reported as such.

use crate::board::{Board,BoardStream,Game,GameList};
use crate::Error;

/// Concatenate games into one stream in move order.
pub fn boards_from_games(games: &[Game]) -> BoardStream {
    let mut ans = Vec::new();
    for game in games {
        ans.extend_from_slice(&game.boards);
    }
    ans
}

/// Recover game boundaries from a flat stream.
pub fn games_from_boards(boards: &[Board]) -> Result<GameList,Error> {
    let mut games = Vec::new();
    let mut game = Game::default();
    for board in boards {
        match board.occupied() {
            0 => return Err(Error::EmptyBoard),
            1 => {
                if !game.boards.is_empty() {
                    games.push(game);
                    game = Game::default();
                }
                game.boards.push(*board);
            },
            _ => game.boards.push(*board)
        }
    }
    if !game.boards.is_empty() {
        games.push(game);
    }
    Ok(games)
}

#[cfg(test)]
use crate::board::Square;

#[cfg(test)]
fn game_of_length(n: usize) -> Game {
    let mut game = Game::default();
    let mut board = Board::default();
    for i in 0..n {
        board.squares[i / 3][i % 3] = match i % 2 {
            0 => Square::X,
            _ => Square::O
        };
        game.boards.push(board);
    }
    game
}

#[test]
fn segmentation_round_trip() {
    let games = vec![game_of_length(5),game_of_length(1),game_of_length(9)];
    let boards = boards_from_games(&games);
    assert_eq!(boards.len(),15);
    assert_eq!(games_from_boards(&boards),Ok(games));
}

#[test]
fn empty_board_rejected() {
    let boards = vec![game_of_length(2).boards,vec![Board::default()]].concat();
    assert_eq!(games_from_boards(&boards),Err(Error::EmptyBoard));
}

#[test]
fn headless_stream_tolerated() {
    // a stream that starts mid-game still forms a game
    let game = game_of_length(4);
    let tail = &game.boards[2..];
    let games = games_from_boards(tail).expect("segmentation failed");
    assert_eq!(games.len(),1);
    assert_eq!(games[0].boards,tail);
}

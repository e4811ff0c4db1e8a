//! Self-play game generation for tests and benchmarks.
//!
//! The players are epsilon-greedy: a winning move is always taken, then a
//! block of the opponent's win, then with probability `epsilon` a random
//! legal move, then centre, then a random free corner, then anything.
//! This produces realistic, non-optimal traces.  The RNG is the thread's
//! own and deliberately unseeded; the codec under test is deterministic,
//! the data is not.

use rand::Rng;
use crate::board::{Board,BoardStream,Game,GameList,Square};

/// rows, columns, diagonals
const LINES: [[(usize,usize);3];8] = [
    [(0,0),(0,1),(0,2)],[(1,0),(1,1),(1,2)],[(2,0),(2,1),(2,2)],
    [(0,0),(1,0),(2,0)],[(0,1),(1,1),(2,1)],[(0,2),(1,2),(2,2)],
    [(0,0),(1,1),(2,2)],[(0,2),(1,1),(2,0)]
];

fn is_winner(board: &Board,player: Square) -> bool {
    LINES.iter().any(|line| line.iter().all(|(r,c)| board.squares[*r][*c] == player))
}

fn legal_moves(board: &Board) -> Vec<(usize,usize)> {
    let mut moves = Vec::new();
    for r in 0..3 {
        for c in 0..3 {
            if board.squares[r][c] == Square::Empty {
                moves.push((r,c));
            }
        }
    }
    moves
}

fn immediate_win(board: &Board,player: Square) -> Option<(usize,usize)> {
    let mut scratch = *board;
    for (r,c) in legal_moves(board) {
        scratch.squares[r][c] = player;
        if is_winner(&scratch,player) {
            return Some((r,c));
        }
        scratch.squares[r][c] = Square::Empty;
    }
    None
}

/// Play one game.  Every post-move board is recorded, so the first board
/// always has exactly one occupied square and the initial empty board is
/// never emitted.
pub fn simulate_game(epsilon: f64) -> Game {
    let mut rng = rand::thread_rng();
    let mut game = Game::default();
    let mut board = Board::default();
    let mut current = Square::X;
    loop {
        let moves = legal_moves(&board);
        if moves.is_empty() {
            break;
        }
        let opponent = match current {
            Square::X => Square::O,
            _ => Square::X
        };
        let mut chosen = immediate_win(&board,current);
        if chosen.is_none() {
            chosen = immediate_win(&board,opponent);
        }
        if chosen.is_none() && rng.gen::<f64>() < epsilon {
            chosen = Some(moves[rng.gen_range(0..moves.len())]);
        }
        if chosen.is_none() && board.squares[1][1] == Square::Empty {
            chosen = Some((1,1));
        }
        if chosen.is_none() {
            let corners: Vec<(usize,usize)> = [(0,0),(0,2),(2,0),(2,2)].into_iter()
                .filter(|(r,c)| board.squares[*r][*c] == Square::Empty)
                .collect();
            if !corners.is_empty() {
                chosen = Some(corners[rng.gen_range(0..corners.len())]);
            }
        }
        let (r,c) = match chosen {
            Some(mv) => mv,
            None => moves[rng.gen_range(0..moves.len())]
        };
        board.squares[r][c] = current;
        game.boards.push(board);
        if is_winner(&board,current) {
            break;
        }
        current = opponent;
    }
    game
}

/// Play many games.
pub fn simulate_games(count: usize,epsilon: f64) -> GameList {
    (0..count).map(|_i| simulate_game(epsilon)).collect()
}

/// Uniform random boards, every cell independent.  Most of these are not
/// reachable by play; they are adversarial input for the entropy coder.
pub fn random_boards(count: usize) -> BoardStream {
    let mut rng = rand::thread_rng();
    let mut boards = Vec::with_capacity(count);
    for _i in 0..count {
        let mut board = Board::default();
        for r in 0..3 {
            for c in 0..3 {
                board.squares[r][c] = match rng.gen_range(0..3) {
                    1 => Square::X,
                    2 => Square::O,
                    _ => Square::Empty
                };
            }
        }
        boards.push(board);
    }
    boards
}

#[test]
fn games_accumulate_one_move_at_a_time() {
    for game in simulate_games(25,0.3) {
        assert!(!game.boards.is_empty());
        for (i,board) in game.boards.iter().enumerate() {
            assert_eq!(board.occupied(),i + 1);
        }
    }
}

#[test]
fn games_end_decisively() {
    for game in simulate_games(25,1.0) {
        let last = game.boards.last().unwrap();
        assert!(last.occupied() == 9
            || is_winner(last,Square::X)
            || is_winner(last,Square::O));
    }
}

#[test]
fn random_boards_have_requested_count() {
    assert_eq!(random_boards(100).len(),100);
    assert_eq!(random_boards(0).len(),0);
}

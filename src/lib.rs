//! # Boardpack Library
//!
//! Compress, expand, and migrate streams of tic-tac-toe boards.
//! * `pack` turns a board stream into a dense bitstream, 15 bits per board
//! * `huffman` entropy-codes the packed stream and carries its own tree on the wire
//! * `frame` assembles the one-shot transmission unit (header + tree + payload)
//! * `games` splits a flat board stream back into individual games
//! * `net` ships complete frames over a blocking TCP channel
//! * `sim` generates self-play traces for testing and benchmarking
//!
//! The on-wire format is fully described by the packed bit layout (see `pack`)
//! and the frame layout (see `frame`).  A frame is self-contained: the receiver
//! needs nothing but the frame bytes to recover the original stream.
//!
//! ## Buffer Example
//!
//! ```rs
//! use boardpack::*;
//! let boards = sim::random_boards(1000);
//! let frame = frame::encode_frame(&boards).expect("encoding failed");
//! let recovered = frame::decode_frame(&frame).expect("decoding failed");
//! assert_eq!(boards,recovered);
//! ```
//!
//! ## Network Example
//!
//! ```rs
//! use boardpack::*;
//! let games = sim::simulate_games(100,0.2);
//! let boards = games::boards_from_games(&games);
//! net::stream_out_boards(&boards,"127.0.0.1",9000).expect("send failed");
//! ```

mod tools;
pub mod board;
pub mod pack;
pub mod huffman;
pub mod frame;
pub mod games;
pub mod net;
pub mod sim;

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// Codec Errors
#[derive(thiserror::Error,Debug,PartialEq)]
pub enum Error {
    #[error("frame length does not match header")]
    MalformedFrame,
    #[error("symbol has no leaf in the tree")]
    UnknownSymbol,
    #[error("buffer ended before the requested bits")]
    TruncatedBuffer,
    #[error("empty board inside a game stream")]
    EmptyBoard,
    #[error("file format mismatch")]
    FileFormatMismatch
}

//! One-shot frame assembly and parsing.
//!
//! A frame is the unit of transmission and carries everything the receiver
//! needs:
//!
//! ```text
//! offset  size  field
//!  0      8     tree byte count     (LE u64)
//!  8      8     payload byte count  (LE u64)
//! 16      8     board count         (LE u64)
//! 24      T     tree topology blob
//! 24+T    P     encoded payload
//! ```
//!
//! The header is always little endian.  A frame whose length disagrees
//! with the header sums is rejected as `MalformedFrame`; decoding is
//! otherwise atomic, there is no partial recovery.

use crate::board::{Board,BoardStream};
use crate::huffman::HuffmanTree;
use crate::pack;
use crate::Error;

const HEADER_BYTES: usize = 24;

fn read_u64_le(data: &[u8],offset: usize) -> u64 {
    u64::from_le_bytes([
        data[offset],data[offset+1],data[offset+2],data[offset+3],
        data[offset+4],data[offset+5],data[offset+6],data[offset+7]
    ])
}

/// Compress a board stream into a self-contained frame.
pub fn encode_frame(boards: &[Board]) -> Result<Vec<u8>,Error> {
    let packed = pack::pack(boards);
    let tree = HuffmanTree::build(&packed);
    let blob = tree.serialize();
    let payload = tree.encode(&packed)?;
    log::debug!("framed {} boards: {} packed, {} tree, {} payload bytes",
        boards.len(),packed.len(),blob.len(),payload.len());
    let mut frame = Vec::with_capacity(HEADER_BYTES + blob.len() + payload.len());
    frame.extend_from_slice(&(blob.len() as u64).to_le_bytes());
    frame.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    frame.extend_from_slice(&(boards.len() as u64).to_le_bytes());
    frame.extend_from_slice(&blob);
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Recover the board stream from a frame.
pub fn decode_frame(data: &[u8]) -> Result<BoardStream,Error> {
    if data.len() < HEADER_BYTES {
        return Err(Error::MalformedFrame);
    }
    let tree_bytes = read_u64_le(data,0) as usize;
    let payload_bytes = read_u64_le(data,8) as usize;
    let board_count = read_u64_le(data,16) as usize;
    let total = HEADER_BYTES.checked_add(tree_bytes)
        .and_then(|n| n.checked_add(payload_bytes));
    if total != Some(data.len()) {
        return Err(Error::MalformedFrame);
    }
    let tree = HuffmanTree::deserialize(&data[HEADER_BYTES..HEADER_BYTES+tree_bytes])?;
    let packed = tree.decode(&data[HEADER_BYTES+tree_bytes..],board_count);
    pack::unpack(&packed,board_count)
}

#[cfg(test)]
use crate::board::Square;

#[test]
fn empty_stream_is_24_zero_bytes() {
    let frame = encode_frame(&[]).expect("encoding failed");
    assert_eq!(frame,vec![0;24]);
    assert_eq!(decode_frame(&frame),Ok(Vec::new()));
}

#[test]
fn frame_round_trip() {
    let mut boards = Vec::new();
    for i in 0..50 {
        let mut board = Board::default();
        board.squares[i % 3][(i / 3) % 3] = Square::X;
        board.squares[(i + 1) % 3][(i / 5) % 3] = Square::O;
        boards.push(board);
    }
    let frame = encode_frame(&boards).expect("encoding failed");
    assert_eq!(decode_frame(&frame),Ok(boards));
}

#[test]
fn repeated_board_frame() {
    let boards = vec![Board::default();10_000];
    let frame = encode_frame(&boards).expect("encoding failed");
    // lone-leaf tree blob is 2 bytes and the payload is empty
    assert_eq!(frame.len(),26);
    assert_eq!(decode_frame(&frame),Ok(boards));
}

#[test]
fn malformed_frames_are_rejected() {
    assert_eq!(decode_frame(&[]),Err(Error::MalformedFrame));
    assert_eq!(decode_frame(&vec![0;23]),Err(Error::MalformedFrame));
    let mut frame = encode_frame(&vec![Board::default();5]).expect("encoding failed");
    frame.push(0);
    assert_eq!(decode_frame(&frame),Err(Error::MalformedFrame));
    frame.truncate(25);
    assert_eq!(decode_frame(&frame),Err(Error::MalformedFrame));
}

#[test]
fn undersized_payload_is_truncated() {
    // header promises more boards than the payload can deliver
    let mut boards = vec![Board { squares: [[Square::O;3];3] };4];
    boards.extend(vec![Board::default();4]);
    let mut frame = encode_frame(&boards).expect("encoding failed");
    let mut count = read_u64_le(&frame,16);
    count += 100;
    frame[16..24].copy_from_slice(&count.to_le_bytes());
    assert_eq!(decode_frame(&frame),Err(Error::TruncatedBuffer));
}

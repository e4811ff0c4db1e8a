//! Board stream packing, 15 bits per board.
//!
//! Each row of a board is reduced to a 5-bit code; three rows in row-major
//! order give 15 bits per board, packed LSB-first with no padding between
//! boards.  The row code is a bijection on the 27 legal row states:
//!
//! * bits 0-2 hold the occupancy mask, one bit per column, 1 = non-empty
//! * bits 3-4 hold meta bits whose meaning depends on occupancy
//!
//! With one or two squares occupied, the meta bits are consumed left to
//! right across the occupied columns, 1 = X and 0 = O.  A fully occupied
//! row cannot spare three flag bits, so it is coded by exception: occupancy
//! `111` means "all X, meta is the column of the single O, or 3 for none",
//! and occupancy `000` means "all O, meta is the column of the single X,
//! or 3 for none".  The fully empty row takes the reserved code `0b10001`,
//! which no other case produces; the decoder must test it before anything
//! else.

use crate::board::{Board,BoardStream,Square};
use crate::tools::bits::{BitReader,BitWriter};
use crate::Error;

/// reserved code for the fully empty row
pub const EMPTY_ROW_CODE: u8 = 0b10001;

/// first meta bit
const META_START: u8 = 1 << 3;

/// Encode one row into its 5-bit code.  The top three bits of the
/// returned byte are always zero.
pub fn row_to_code(row: &[Square;3]) -> u8 {
    let mut code: u8 = 0;
    let mut occupied: u8 = 0;
    let mut o_count: u8 = 0;
    let mut x_last: u8 = 3;
    let mut o_last: u8 = 3;
    for (i,square) in row.iter().enumerate() {
        if *square == Square::X {
            code |= META_START << occupied;
            x_last = i as u8;
        }
        if *square == Square::O {
            o_count += 1;
            o_last = i as u8;
        }
        if *square != Square::Empty {
            occupied += 1;
            code |= 1 << i;
        }
    }
    if occupied == 0 {
        return EMPTY_ROW_CODE;
    }
    if occupied == 3 {
        code = x_last << 3;
        if o_count <= 1 {
            code = 0b111 | o_last << 3;
        }
    }
    code & 0b11111
}

/// Decode a 5-bit code back into a row.
pub fn code_to_row(code: u8) -> [Square;3] {
    // the sentinel shares its bits with the dense encodings, test it first
    if code == EMPTY_ROW_CODE {
        return [Square::Empty;3];
    }
    if code & 0b111 == 0b111 {
        let mut row = [Square::X;3];
        let col = (code >> 3) & 0b11;
        if col < 3 {
            row[col as usize] = Square::O;
        }
        return row;
    }
    if code & 0b111 == 0b000 {
        let mut row = [Square::O;3];
        let col = (code >> 3) & 0b11;
        if col < 3 {
            row[col as usize] = Square::X;
        }
        return row;
    }
    let mut row = [Square::Empty;3];
    let mut meta = 0;
    for (i,square) in row.iter_mut().enumerate() {
        if code & 1 << i != 0 {
            *square = match code & META_START << meta != 0 {
                true => Square::X,
                false => Square::O
            };
            meta += 1;
        }
    }
    row
}

/// Pack a board stream into `ceil(15N/8)` bytes.  Unused high bits of the
/// final byte are zero.
pub fn pack(boards: &[Board]) -> Vec<u8> {
    let mut writer = BitWriter::new();
    for board in boards {
        for row in &board.squares {
            writer.push_lsb(row_to_code(row) as u16,5);
        }
    }
    writer.into_bytes()
}

/// Recover `board_count` boards from a packed buffer.  Fails with
/// `TruncatedBuffer` if the buffer holds fewer than `15 * board_count` bits.
pub fn unpack(data: &[u8],board_count: usize) -> Result<BoardStream,Error> {
    let mut reader = BitReader::from_bytes(data);
    let mut ans = Vec::with_capacity(board_count);
    for _b in 0..board_count {
        let mut board = Board::default();
        for row in board.squares.iter_mut() {
            let code = reader.get_lsb(5).ok_or(Error::TruncatedBuffer)?;
            *row = code_to_row(code as u8);
        }
        ans.push(board);
    }
    Ok(ans)
}

#[cfg(test)]
fn all_rows() -> Vec<[Square;3]> {
    let squares = [Square::Empty,Square::X,Square::O];
    let mut ans = Vec::new();
    for a in squares {
        for b in squares {
            for c in squares {
                ans.push([a,b,c]);
            }
        }
    }
    ans
}

#[test]
fn row_round_trip() {
    for row in all_rows() {
        assert_eq!(code_to_row(row_to_code(&row)),row);
    }
}

#[test]
fn row_codes_unique() {
    let mut seen = std::collections::HashSet::new();
    for row in all_rows() {
        let code = row_to_code(&row);
        assert!(code < 32);
        assert!(seen.insert(code));
        if code == EMPTY_ROW_CODE {
            assert_eq!(row,[Square::Empty;3]);
        }
    }
    assert_eq!(seen.len(),27);
}

#[test]
fn mixed_row_code() {
    let row = [Square::X,Square::Empty,Square::O];
    assert_eq!(row_to_code(&row),13);
    assert_eq!(code_to_row(13),row);
}

#[test]
fn dense_row_codes() {
    assert_eq!(row_to_code(&[Square::X;3]),0b11111);
    assert_eq!(row_to_code(&[Square::O;3]),0b11000);
    assert_eq!(row_to_code(&[Square::O,Square::X,Square::O]),0b01000);
    assert_eq!(row_to_code(&[Square::X,Square::O,Square::X]),0b01111);
}

#[test]
fn empty_board_bytes() {
    let packed = pack(&[Board::default()]);
    assert_eq!(packed,hex::decode("3146").unwrap());
}

#[test]
fn full_x_board_bytes() {
    let board = Board { squares: [[Square::X;3];3] };
    let packed = pack(&[board]);
    assert_eq!(packed,hex::decode("ff7f").unwrap());
}

#[test]
fn packed_size() {
    let board = Board { squares: [[Square::X;3];3] };
    for n in 0..20 {
        let boards = vec![board;n];
        let packed = pack(&boards);
        assert_eq!(packed.len(),(n * 15 + 7) / 8);
        let pad = packed.len() * 8 - n * 15;
        if pad > 0 {
            // padding bits of the last byte stay zero
            assert_eq!(packed[packed.len() - 1] >> (8 - pad as u32),0);
        }
    }
}

#[test]
fn board_round_trip() {
    let mut boards = Vec::new();
    for (i,row) in all_rows().into_iter().enumerate() {
        let mut board = Board::default();
        board.squares[i % 3] = row;
        board.squares[(i + 1) % 3] = row;
        boards.push(board);
    }
    let packed = pack(&boards);
    assert_eq!(unpack(&packed,boards.len()),Ok(boards));
}

#[test]
fn unpack_truncated() {
    assert_eq!(unpack(&[0x31],1),Err(Error::TruncatedBuffer));
    let packed = pack(&[Board::default();3]);
    assert_eq!(unpack(&packed[..packed.len()-1],3),Err(Error::TruncatedBuffer));
}

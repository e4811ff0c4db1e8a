//! Blocking TCP transport for complete frames.
//!
//! Strict request/response: the sender connects, writes a 4-byte length
//! prefix in network byte order, then the frame bytes.  The receiver binds,
//! accepts a single connection, and reads the advertised length.  There is
//! no streaming; a frame is delivered whole or not at all, and an abandoned
//! transfer leaves nothing behind.

use std::io::{Read,Write};
use std::net::{TcpListener,TcpStream};
use crate::board::{Board,BoardStream};
use crate::frame;
use crate::{DYNERR,STDRESULT};

/// Send a complete buffer to a listening peer.  An empty buffer is a no-op.
pub fn send_bytes(host: &str,port: u16,data: &[u8]) -> STDRESULT {
    if data.is_empty() {
        return Ok(());
    }
    let mut socket = TcpStream::connect((host,port))?;
    socket.write_all(&(data.len() as u32).to_be_bytes())?;
    socket.write_all(data)?;
    log::info!("sent {} bytes to {}:{}",data.len(),host,port);
    Ok(())
}

/// Accept one connection and read one complete buffer.
pub fn receive_bytes(host: &str,port: u16) -> Result<Vec<u8>,DYNERR> {
    let listener = TcpListener::bind((host,port))?;
    log::info!("listening on {}:{}",host,port);
    let (mut socket,peer) = listener.accept()?;
    log::info!("client connected from {}",peer);
    let mut prefix = [0u8;4];
    socket.read_exact(&mut prefix)?;
    let mut data = vec![0;u32::from_be_bytes(prefix) as usize];
    socket.read_exact(&mut data)?;
    Ok(data)
}

/// Frame a board stream and ship it in one shot.
pub fn stream_out_boards(boards: &[Board],host: &str,port: u16) -> STDRESULT {
    let buf = frame::encode_frame(boards)?;
    log::info!("streaming out {} boards as {} bytes",boards.len(),buf.len());
    send_bytes(host,port,&buf)
}

/// Receive one frame and recover the board stream.
pub fn stream_in_boards(host: &str,port: u16) -> Result<BoardStream,DYNERR> {
    let buf = receive_bytes(host,port)?;
    Ok(frame::decode_frame(&buf)?)
}

#[cfg(test)]
use crate::board::Square;

#[test]
fn loopback() {
    // boxed errors are not Send, stringify before crossing the thread
    let handle = std::thread::spawn(|| {
        stream_in_boards("127.0.0.1",38917).map_err(|e| e.to_string())
    });
    let mut board = Board::default();
    board.squares[1][1] = Square::X;
    let boards = vec![board;40];
    let mut sent = false;
    // give the receiver a moment to bind
    for _i in 0..100 {
        if stream_out_boards(&boards,"127.0.0.1",38917).is_ok() {
            sent = true;
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(20));
    }
    assert!(sent);
    let received = handle.join().expect("receiver panicked").expect("receive failed");
    assert_eq!(received,boards);
}

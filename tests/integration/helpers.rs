//! Shared test helpers: local servers and unused ports

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, UdpSocket};
use std::thread;

/// Serve every request on a fresh port with the same canned response.
///
/// The server thread lives for the rest of the test process.
pub fn serve_http(status: u16, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind HTTP listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            respond(stream, status, body);
        }
    });

    addr
}

fn respond(mut stream: TcpStream, status: u16, body: &str) {
    // Read until the end of the request headers; GET has no body
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let response = format!(
        "HTTP/1.1 {status} Test\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Accept connections and never answer. Accepted streams stay open for
/// the rest of the test process.
pub fn serve_silent() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind silent listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });

    addr
}

/// Answer every datagram with a short reply.
pub fn serve_udp_echo() -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("Failed to bind UDP socket");
    let addr = socket.local_addr().expect("Failed to read local address");

    thread::spawn(move || {
        let mut buf = [0u8; 64];
        while let Ok((_, peer)) = socket.recv_from(&mut buf) {
            let _ = socket.send_to(b"pong", peer);
        }
    });

    addr
}

/// A localhost port with nothing listening on it
pub fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    listener
        .local_addr()
        .expect("Failed to read local address")
        .port()
}

//! TCP and UDP conditions through the `Condition` enum

use std::net::TcpListener;
use std::time::{Duration, Instant};
use wfor::conditions::{Condition, Probe, TcpCondition, UdpCondition};
use wfor::poller::poll;

use super::helpers::{serve_udp_echo, unused_port};

#[test]
fn test_tcp_condition_holds_for_listener() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let condition = Condition::from(TcpCondition::new(listener.local_addr().unwrap().to_string()));

    assert!(condition.check().is_ok());
}

#[test]
fn test_tcp_condition_becomes_ready() {
    let port = unused_port();
    let condition = Condition::from(TcpCondition::new(format!("127.0.0.1:{port}")));

    // Start listening shortly after polling begins
    let server = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(150));
        let listener = TcpListener::bind(("127.0.0.1", port)).unwrap();
        std::thread::sleep(Duration::from_millis(500));
        drop(listener);
    });

    let outcome = poll(&condition, Duration::from_millis(50), Duration::from_millis(600));
    assert!(outcome.succeeded(), "got {outcome:?}");
    server.join().unwrap();
}

#[test]
fn test_udp_condition_holds_for_echo_server() {
    let addr = serve_udp_echo();
    let condition = Condition::from(UdpCondition::new(addr.to_string()));

    assert!(condition.check().is_ok());
}

#[test]
fn test_udp_condition_times_out_without_reply() {
    let condition = Condition::from(
        UdpCondition::new(format!("127.0.0.1:{}", unused_port()))
            .with_read_timeout(Duration::from_millis(50)),
    );

    let outcome = poll(&condition, Duration::from_millis(60), Duration::from_millis(120));
    assert!(!outcome.succeeded());
}

#[test]
fn test_tcp_connect_is_bounded() {
    // Not routable; the connect either hangs until the timeout or is
    // rejected right away, depending on the network
    let condition = Condition::from(
        TcpCondition::new("10.255.255.1:9").with_connect_timeout(Duration::from_millis(200)),
    );

    let started = Instant::now();
    assert!(condition.check().is_err());
    assert!(started.elapsed() < Duration::from_millis(1000), "took {:?}", started.elapsed());
}

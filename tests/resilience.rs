#![allow(unused_crate_dependencies)]

use std::io::{Read, Write};
use std::net::Shutdown;
use std::time::Duration;

#[allow(dead_code)]
mod support;

#[test]
fn server_survives_zero_byte_connection() {
    let addr = support::new_info_server();

    // connect and hang up without sending a single byte
    let client = support::create_client(addr, Some(Duration::from_secs(2)));
    client.shutdown(Shutdown::Write).unwrap();
    drop(client);

    // the next connection is still served
    let response = support::exchange(addr, b"GET /api HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
}

#[test]
fn server_survives_partial_request() {
    let addr = support::new_info_server();

    let mut client = support::create_client(addr, Some(Duration::from_secs(2)));
    client.write_all(b"GET / HT").unwrap();
    client.shutdown(Shutdown::Write).unwrap();

    let mut dropped = String::new();
    let _ = client.read_to_string(&mut dropped).unwrap();

    let response = support::exchange(addr, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
}

#[test]
fn malformed_request_line_is_bad_request() {
    let addr = support::new_info_server();
    let response = support::exchange(addr, b"garbage\r\n\r\n");

    assert!(response.starts_with("HTTP/1.0 400 Bad Request\r\n"));
}

#[test]
fn malformed_header_is_bad_request() {
    let addr = support::new_info_server();
    let response = support::exchange(addr, b"GET / HTTP/1.1\r\nno-colon-here\r\n\r\n");

    assert!(response.starts_with("HTTP/1.0 400 Bad Request\r\n"));
}

#[test]
fn oversized_request_line_is_uri_too_long() {
    let addr = support::new_info_server();

    let mut request = Vec::from(&b"GET /"[..]);
    request.extend(std::iter::repeat(b'a').take(3_000));
    request.extend(b" HTTP/1.1\r\n\r\n");

    let response = support::exchange(addr, &request);
    assert!(response.starts_with("HTTP/1.0 414 "));
}

#[test]
fn oversized_header_block_is_rejected() {
    let addr = support::new_info_server();

    let mut request = Vec::from(&b"GET / HTTP/1.1\r\nHost: localhost\r\n"[..]);
    for n in 0..8 {
        request.extend(format!("X-Filler-{n}: {}\r\n", "y".repeat(1_500)).into_bytes());
    }
    request.extend(b"\r\n");

    let response = support::exchange(addr, &request);
    assert!(response.starts_with("HTTP/1.0 431 "));
}

#[test]
fn unsupported_http_version_is_rejected() {
    let addr = support::new_info_server();
    let response = support::exchange(addr, b"GET / HTTP/2.0\r\nHost: localhost\r\n\r\n");

    assert!(response.starts_with("HTTP/1.0 505 HTTP Version Not Supported\r\n"));
}

#[test]
fn connection_is_single_shot() {
    let addr = support::new_info_server();

    let mut client = support::create_client(addr, Some(Duration::from_secs(2)));
    client
        .write_all(
            b"GET /api HTTP/1.1\r\nHost: localhost\r\n\r\n\
              GET /api HTTP/1.1\r\nHost: localhost\r\n\r\n",
        )
        .unwrap();

    let mut response = String::new();
    let _ = client.read_to_string(&mut response).unwrap();

    // one response, then the server closes the connection
    assert_eq!(response.matches("HTTP/1.1 200 OK\r\n").count(), 1);
    assert!(response.contains("Connection: close\r\n"));
}

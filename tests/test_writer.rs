use std::collections::HashMap;
use std::io::Cursor;

use httpwire::http::response::{self, StatusCode};
use httpwire::http::writer::{ResponseWriter, WriteError};

#[test]
fn test_headers_before_status_is_out_of_order() {
    let mut w = ResponseWriter::new();
    let result = w.write_headers(HashMap::new());

    assert_eq!(result, Err(WriteError::OutOfOrder("headers")));
}

#[test]
fn test_body_before_headers_is_out_of_order() {
    let mut w = ResponseWriter::new();
    w.write_status_line(StatusCode::OK).unwrap();

    assert_eq!(w.write_body(b"hi"), Err(WriteError::OutOfOrder("body")));
}

#[test]
fn test_status_line_is_write_once() {
    let mut w = ResponseWriter::new();
    w.write_status_line(StatusCode::OK).unwrap();

    assert_eq!(
        w.write_status_line(StatusCode::BAD_REQUEST),
        Err(WriteError::AlreadySet("status line"))
    );
}

#[test]
fn test_second_body_write_fails_and_first_survives() {
    let mut w = ResponseWriter::new();
    w.write_status_line(StatusCode::OK).unwrap();
    w.write_headers(HashMap::new()).unwrap();

    assert_eq!(w.write_body(b"first"), Ok(5));
    assert_eq!(w.write_body(b"second"), Err(WriteError::AlreadySet("body")));
}

#[tokio::test]
async fn test_flush_produces_ordered_wire_format() {
    let mut w = ResponseWriter::new();
    w.write_status_line(StatusCode::OK).unwrap();
    w.write_headers(HashMap::from([(
        "Content-Length".to_string(),
        "5".to_string(),
    )]))
    .unwrap();
    w.write_body(b"hello").unwrap();

    let mut sink = Cursor::new(Vec::new());
    w.flush(&mut sink).await.unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("Content-Length: 5\r\n"));
    assert!(text.ends_with("\r\n\r\nhello"));
}

#[tokio::test]
async fn test_flush_without_body_ends_at_terminator() {
    let mut w = ResponseWriter::new();
    w.write_status_line(StatusCode::BAD_REQUEST).unwrap();
    w.write_headers(HashMap::new()).unwrap();

    let mut sink = Cursor::new(Vec::new());
    w.flush(&mut sink).await.unwrap();

    assert_eq!(sink.into_inner(), b"HTTP/1.1 400 Bad Request\r\n\r\n");
}

#[tokio::test]
async fn test_free_standing_status_line_write() {
    let mut sink = Cursor::new(Vec::new());
    response::write_status_line(&mut sink, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();

    assert_eq!(sink.into_inner(), b"HTTP/1.1 500 Internal Server Error\r\n");
}

#[test]
fn test_unknown_status_code_gets_empty_reason() {
    assert_eq!(StatusCode(418).reason_phrase(), "");
    assert_eq!(response::status_line(StatusCode(418)), "HTTP/1.1 418 \r\n");
}

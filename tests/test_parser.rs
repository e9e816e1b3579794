use waterfall::http::parser::{parse_block, parse_request_header, parse_response_header, HeaderBlock, ParseError};

#[test]
fn test_parse_request_block() {
    let raw = "GET /a/b/c?x=1 HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request_header(raw).unwrap();

    assert_eq!(parsed.method.as_deref(), Some("GET"));
    assert_eq!(parsed.url.as_deref(), Some("/a/b/c?x=1"));
    assert_eq!(parsed.host.as_deref(), Some("example.com"));
    assert_eq!(parsed.path.as_deref(), Some("/a/b/c"));
    assert_eq!(parsed.file.as_deref(), Some("c"));
    assert_eq!(parsed.http_version.as_deref(), Some("HTTP/1.1"));
    assert_eq!(parsed.fields.len(), 1);
    assert_eq!(parsed.header("Host"), Some("example.com"));
}

#[test]
fn test_parse_response_block() {
    let raw = "HTTP/1.1 404 Not Found\r\n\r\n";
    let parsed = parse_response_header(raw).unwrap();

    assert_eq!(parsed.http_version.as_deref(), Some("HTTP/1.1"));
    assert_eq!(parsed.status, Some(404));
    assert_eq!(parsed.description.as_deref(), Some("Not Found"));
    assert!(parsed.fields.is_empty());
}

#[test]
fn test_classification_by_second_token() {
    assert!(matches!(
        parse_block("HTTP/1.0 200 OK\r\n\r\n"),
        Ok(HeaderBlock::Response(_))
    ));
    assert!(matches!(
        parse_block("POST /submit HTTP/1.0\r\n\r\n"),
        Ok(HeaderBlock::Request(_))
    ));
}

#[test]
fn test_absolute_url_host_wins_over_host_field() {
    let raw = "GET http://cdn.example.org/img/logo.png HTTP/1.1\r\nHost: other.example\r\n\r\n";
    let parsed = parse_request_header(raw).unwrap();

    assert_eq!(parsed.host.as_deref(), Some("cdn.example.org"));
    assert_eq!(parsed.file.as_deref(), Some("logo.png"));
}

#[test]
fn test_missing_separator_takes_whole_input() {
    let raw = "GET /index.html HTTP/1.1\r\nHost: example.com\r\nAccept: */*";
    let parsed = parse_request_header(raw).unwrap();

    assert_eq!(parsed.header("Accept"), Some("*/*"));
    assert_eq!(parsed.file.as_deref(), Some("index.html"));
}

#[test]
fn test_body_is_discarded() {
    let raw = "POST /api HTTP/1.1\r\nContent-Length: 17\r\n\r\nName: not-a-field";
    let parsed = parse_request_header(raw).unwrap();

    assert_eq!(parsed.fields.len(), 1);
    assert_eq!(parsed.header("Name"), None);
    assert_eq!(parsed.content_length, Some(17));
}

#[test]
fn test_duplicate_field_last_wins() {
    let raw = "HTTP/1.1 200 OK\r\nSet-Cookie: a=1\r\nSet-Cookie: b=2\r\n\r\n";
    let parsed = parse_response_header(raw).unwrap();

    assert_eq!(parsed.header("Set-Cookie"), Some("b=2"));
}

#[test]
fn test_field_names_keep_case() {
    let raw = "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\nContent-Type: text/plain\r\n\r\n";
    let parsed = parse_response_header(raw).unwrap();

    assert_eq!(parsed.header("content-type"), Some("text/html"));
    assert_eq!(parsed.header("Content-Type"), Some("text/plain"));
    assert_eq!(parsed.header("CONTENT-TYPE"), None);
}

#[test]
fn test_value_split_on_first_delimiter_only() {
    let raw = "GET / HTTP/1.1\r\nX-Note: a: b\r\n\r\n";
    let parsed = parse_request_header(raw).unwrap();

    assert_eq!(parsed.header("X-Note"), Some("a: b"));
}

#[test]
fn test_field_line_without_delimiter_is_skipped() {
    let raw = "GET / HTTP/1.1\r\nBrokenHeader\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request_header(raw).unwrap();

    assert_eq!(parsed.fields.len(), 1);
    assert_eq!(parsed.host.as_deref(), Some("example.com"));
}

#[test]
fn test_start_line_with_two_tokens_is_rejected() {
    let result = parse_block("GET /\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidStartLine(_))));
}

#[test]
fn test_request_line_with_extra_tokens_is_rejected() {
    let result = parse_block("GET /a b HTTP/1.1\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidStartLine(_))));
}

#[test]
fn test_empty_block_is_rejected() {
    assert_eq!(parse_block(""), Err(ParseError::EmptyBlock));
    assert_eq!(parse_block("\r\n\r\n"), Err(ParseError::EmptyBlock));
}

#[test]
fn test_wrong_kind_is_rejected() {
    assert_eq!(
        parse_request_header("HTTP/1.1 200 OK\r\n\r\n"),
        Err(ParseError::UnexpectedStartLine)
    );
    assert_eq!(
        parse_response_header("GET / HTTP/1.1\r\n\r\n"),
        Err(ParseError::UnexpectedStartLine)
    );
}

#[test]
fn test_non_numeric_content_length_is_ignored() {
    let raw = "HTTP/1.1 200 OK\r\nContent-Length: lots\r\n\r\n";
    let parsed = parse_response_header(raw).unwrap();

    assert_eq!(parsed.content_length, None);
    assert_eq!(parsed.header("Content-Length"), Some("lots"));
}

#[test]
fn test_zero_second_token_is_a_request_line() {
    let parsed = parse_request_header("X 0 Y\r\n\r\n").unwrap();

    assert_eq!(parsed.method.as_deref(), Some("X"));
    assert_eq!(parsed.url.as_deref(), Some("0"));
    assert_eq!(parsed.http_version.as_deref(), Some("Y"));
}

#[test]
fn test_signed_second_token_is_not_a_status() {
    assert!(matches!(
        parse_block("HTTP/1.1 +200 OK\r\n\r\n"),
        Ok(HeaderBlock::Request(_))
    ));
    assert!(matches!(
        parse_block("HTTP/1.1 99999 Too Big\r\n\r\n"),
        Err(ParseError::InvalidStartLine(_))
    ));
}

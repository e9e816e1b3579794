use crate::http::request::RequestHeader;
use crate::http::response::ResponseHeader;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing before the header terminator.
    EmptyBlock,
    /// Start-line does not split into three space-separated tokens.
    InvalidStartLine(String),
    /// A status-line where a request-line was expected, or the reverse.
    UnexpectedStartLine,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyBlock => write!(f, "empty header block"),
            ParseError::InvalidStartLine(line) => write!(f, "invalid start-line: {:?}", line),
            ParseError::UnexpectedStartLine => write!(f, "unexpected kind of start-line"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A parsed header block, classified by its start-line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderBlock {
    Request(RequestHeader),
    Response(ResponseHeader),
}

/// Parses a raw HTTP header block.
///
/// Anything after the first blank line (a body) is ignored, and a block
/// without the blank line is taken whole. Field lines are split on the first
/// `": "`; names keep their case and the last duplicate wins. Field lines
/// without the delimiter are skipped.
pub fn parse_block(raw: &str) -> Result<HeaderBlock, ParseError> {
    let header = match find_headers_end(raw) {
        Some(end) => &raw[..end],
        None => raw,
    };

    let mut lines = header.split("\r\n");

    let start_line = lines
        .next()
        .filter(|line| !line.is_empty())
        .ok_or(ParseError::EmptyBlock)?;

    // Fields
    let mut fields = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        match line.split_once(": ") {
            Some((name, value)) => {
                fields.insert(name.to_string(), value.to_string());
            }
            None => {
                tracing::debug!(line, "Skipping header line without delimiter");
            }
        }
    }

    // Start-line: the third token keeps the rest, so reason phrases may contain spaces
    let mut parts = start_line.splitn(3, ' ');
    let (first, second, third) = match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), Some(c)) if !a.is_empty() && !b.is_empty() && !c.is_empty() => (a, b, c),
        _ => return Err(ParseError::InvalidStartLine(start_line.to_string())),
    };

    if let Some(status) = parse_status(second) {
        return Ok(HeaderBlock::Response(ResponseHeader::from_status_line(
            first, status, third, fields,
        )));
    }

    if third.contains(' ') {
        return Err(ParseError::InvalidStartLine(start_line.to_string()));
    }

    Ok(HeaderBlock::Request(RequestHeader::from_request_line(
        first, second, third, fields,
    )))
}

/// Parses a block that must start with a request-line.
pub fn parse_request_header(raw: &str) -> Result<RequestHeader, ParseError> {
    match parse_block(raw)? {
        HeaderBlock::Request(header) => Ok(header),
        HeaderBlock::Response(_) => Err(ParseError::UnexpectedStartLine),
    }
}

/// Parses a block that must start with a status-line.
pub fn parse_response_header(raw: &str) -> Result<ResponseHeader, ParseError> {
    match parse_block(raw)? {
        HeaderBlock::Response(header) => Ok(header),
        HeaderBlock::Request(_) => Err(ParseError::UnexpectedStartLine),
    }
}

/// A status is a non-zero run of ASCII digits that fits in a `u16`.
/// Signs are not digits, and `0` never marks a status-line.
fn parse_status(token: &str) -> Option<u16> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    token.parse().ok().filter(|&status| status != 0)
}

fn find_headers_end(raw: &str) -> Option<usize> {
    raw.find("\r\n\r\n")
}

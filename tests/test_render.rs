use waterfall::conn::Connection;
use waterfall::render::{RenderUpdate, Renderer, TextRenderer};

fn render_text(conn: &Connection, scale_ms: u64) -> String {
    let mut renderer = TextRenderer::new(Vec::new(), scale_ms);
    renderer.render(&RenderUpdate::from(conn)).unwrap();
    String::from_utf8(renderer.into_inner()).unwrap()
}

#[test]
fn test_update_carries_labels() {
    let mut conn = Connection::new(4, Some("s1".to_string()));
    conn.set_request_header("GET /img/logo.png HTTP/1.1\r\nHost: example.com\r\n\r\n")
        .set_response_header("HTTP/1.1 200 OK\r\nContent-Length: 1500\r\n\r\n");

    let update = RenderUpdate::from(&conn);

    assert_eq!(update.id(), 4);
    assert_eq!(update.name, "logo.png");
    assert_eq!(update.host.as_deref(), Some("example.com"));
    assert_eq!(update.method.as_deref(), Some("GET"));
    assert_eq!(update.status, Some(200));
    assert_eq!(update.response_content_length, Some(1500));
}

#[test]
fn test_text_row_with_full_timing() {
    let mut conn = Connection::new(4, Some("s1".to_string()));
    conn.set_request_header("GET /app.js HTTP/1.1\r\nHost: example.com\r\n\r\n")
        .set_response_header("HTTP/1.1 200 OK\r\nContent-Length: 1500\r\n\r\n")
        .set_start_time(100)
        .set_response_start_time(300)
        .set_response_finish_time(600);

    let row = render_text(&conn, 100);

    assert!(row.starts_with("[s1] app.js"));
    assert!(row.contains("GET 200 1.5KB"));
    assert!(row.contains("|..===| 200/500ms"));
    assert!(row.ends_with('\n'));
}

#[test]
fn test_text_bars_never_vanish() {
    let mut conn = Connection::new(4, None);
    conn.set_response_finish_time(100);

    let row = render_text(&conn, 100);

    assert!(row.starts_with("[-] 4"));
    assert!(row.contains("|.=| 0/0ms"));
}

#[test]
fn test_text_row_with_unknown_timing() {
    let conn = Connection::new(8, None);

    let row = render_text(&conn, 100);

    assert!(row.contains("? - ?KB"));
    assert!(row.trim_end().ends_with("| ?"));
}

#[test]
fn test_text_row_waiting_for_response() {
    let mut conn = Connection::new(8, None);
    conn.set_start_time(0).set_response_start_time(250);

    let row = render_text(&conn, 100);

    assert!(row.contains("|...| 250/?ms"));
}

#[test]
fn test_text_row_indented_by_offset() {
    let mut first = Connection::new(1, None);
    first.set_start_time(1000).set_response_start_time(1100);
    let mut second = Connection::new(2, None);
    second.set_start_time(1300).set_response_start_time(1400);

    let mut renderer = TextRenderer::new(Vec::new(), 100);
    renderer.render(&RenderUpdate::from(&first).with_origin(Some(1000))).unwrap();
    renderer.render(&RenderUpdate::from(&second).with_origin(Some(1000))).unwrap();
    let output = String::from_utf8(renderer.into_inner()).unwrap();
    let rows: Vec<&str> = output.lines().collect();

    assert!(rows[0].ends_with(" |.| 100/?ms"));
    assert!(rows[1].ends_with("    |.| 100/?ms"));
    assert_eq!(rows[0].find('|').unwrap() + 3, rows[1].find('|').unwrap());
}

#[test]
fn test_offset_needs_start_and_origin() {
    let mut conn = Connection::new(3, None);

    assert_eq!(RenderUpdate::from(&conn).with_origin(Some(50)).offset, None);

    conn.set_start_time(80);
    assert_eq!(RenderUpdate::from(&conn).with_origin(None).offset, None);
    assert_eq!(RenderUpdate::from(&conn).with_origin(Some(50)).offset, Some(30));
    assert_eq!(RenderUpdate::from(&conn).offset, None);
}

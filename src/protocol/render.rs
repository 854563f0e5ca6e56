//! Flattening menus and text responses into displayable text.
//!
//! Output always uses bare `\n` line endings; the terminal writer is
//! responsible for translating them for raw mode.

use super::types::{ItemKind, Menu};

/// One line per record. Navigable records are prefixed with their selection
/// number, directories get a trailing slash, everything else is verbatim.
pub fn render_menu(menu: &Menu) -> String {
    let mut out = String::new();
    for record in menu.records() {
        match (record.index, record.kind) {
            (Some(index), ItemKind::Directory) => {
                out.push_str(&format!("({index}) {}/\n", record.display));
            }
            (Some(index), _) => {
                out.push_str(&format!("({index}) {}\n", record.display));
            }
            (None, _) => {
                out.push_str(&record.display);
                out.push('\n');
            }
        }
    }
    out
}

/// The parsed records as pretty-printed JSON, for scripting.
pub fn render_json(menu: &Menu) -> serde_json::Result<String> {
    serde_json::to_string_pretty(menu.records())
}

/// Decode a text-file response for display.
///
/// Invalid UTF-8 is replaced, CRLF becomes LF, the `.` terminator line ends
/// the document and a leading `..` is unstuffed to `.`.
pub fn render_text(raw: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(raw);
    let mut out = String::with_capacity(decoded.len());

    let mut lines = decoded.split('\n').peekable();
    while let Some(line) = lines.next() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line == "." {
            break;
        }
        // The final segment after a trailing newline is empty, not a line.
        if lines.peek().is_none() && line.is_empty() {
            break;
        }
        let line = match line.strip_prefix("..") {
            Some(rest) => {
                out.push('.');
                rest
            }
            None => line,
        };
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Menu;

    #[test]
    fn test_render_example_menu() {
        let menu = Menu::from_bytes(
            b"1Example dir\t/dir\tex.org\t70\r\ni---\t\t\t\r\n0A file\t/file.txt\tex.org\t70\r\n.\r\n",
        );
        let rendered = render_menu(&menu);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["(1) Example dir/", "---", "(2) A file"]);
    }

    #[test]
    fn test_render_unknown_kinds_verbatim() {
        let menu = Menu::from_bytes(b"3Error: not found\t\terror.host\t1\r\n");
        assert_eq!(render_menu(&menu), "Error: not found\n");
    }

    #[test]
    fn test_render_empty_menu() {
        assert_eq!(render_menu(&Menu::default()), "");
    }

    #[test]
    fn test_render_text_normalizes_line_endings() {
        assert_eq!(render_text(b"one\r\ntwo\r\n.\r\n"), "one\ntwo\n");
    }

    #[test]
    fn test_render_text_drops_content_after_terminator() {
        assert_eq!(render_text(b"body\n.\ntrailing junk\n"), "body\n");
    }

    #[test]
    fn test_render_text_unstuffs_dots() {
        assert_eq!(render_text(b"..hidden\r\n...\r\n"), ".hidden\n..\n");
    }

    #[test]
    fn test_render_text_without_trailing_newline() {
        assert_eq!(render_text(b"no newline"), "no newline\n");
    }

    #[test]
    fn test_render_text_keeps_inner_blank_lines() {
        assert_eq!(render_text(b"a\r\n\r\nb\r\n"), "a\n\nb\n");
    }

    #[test]
    fn test_render_text_replaces_invalid_utf8() {
        assert_eq!(render_text(b"caf\xff\n"), "caf\u{fffd}\n");
    }

    #[test]
    fn test_render_json_lists_records() {
        let menu = Menu::from_bytes(b"iHello\r\n1Docs\t/docs\tex.org\t70\r\n.\r\n");
        let json = render_json(&menu).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["display"], "Docs");
        assert_eq!(records[1]["selector"], "/docs");
        assert_eq!(records[1]["index"], 1);
        assert!(records[0]["index"].is_null());
    }
}

//! Menu response parser.
//!
//! A single forward scan over the raw bytes. Each line is split on tabs into
//! up to four fields:
//!
//! ```text
//! <kind><display> \t <selector> \t <host> \t <port> CRLF
//! ```
//!
//! Missing trailing fields are left empty and extra fields are ignored, so a
//! malformed line never stops the scan. A line holding only `.` ends the menu.

use super::types::{ItemKind, Record};

const FIELD_COUNT: usize = 4;

/// Field spans of the line currently being scanned.
struct LineFields<'a> {
    fields: [&'a [u8]; FIELD_COUNT],
    /// Number of fields captured so far (may exceed `FIELD_COUNT`).
    captured: usize,
}

impl<'a> LineFields<'a> {
    fn new() -> Self {
        Self {
            fields: [&[]; FIELD_COUNT],
            captured: 0,
        }
    }

    fn capture(&mut self, span: &'a [u8]) {
        if let Some(slot) = self.fields.get_mut(self.captured) {
            *slot = span;
        }
        self.captured += 1;
    }

    fn is_terminator(&self) -> bool {
        self.captured == 1 && self.fields[0] == b"."
    }
}

/// Parse a raw menu response into records, numbering the navigable ones.
pub fn parse(raw: &[u8]) -> Vec<Record> {
    let mut records = Vec::new();
    let mut next_index = 0usize;
    let mut line = LineFields::new();
    let mut start = 0usize;

    for (pos, &byte) in raw.iter().enumerate() {
        match byte {
            b'\t' => {
                line.capture(&raw[start..pos]);
                start = pos + 1;
            }
            b'\n' => {
                // CR only counts as part of the terminator when it sits right before LF
                let end = if pos > start && raw[pos - 1] == b'\r' {
                    pos - 1
                } else {
                    pos
                };
                line.capture(&raw[start..end]);
                start = pos + 1;

                if line.is_terminator() {
                    return records;
                }
                if let Some(record) = build_record(&line, &mut next_index) {
                    records.push(record);
                }
                line = LineFields::new();
            }
            _ => {}
        }
    }

    // Input ended mid-line: finalize whatever was accumulated.
    if start < raw.len() || line.captured > 0 {
        line.capture(&raw[start..]);
        if !line.is_terminator()
            && let Some(record) = build_record(&line, &mut next_index)
        {
            records.push(record);
        }
    }

    records
}

fn build_record(line: &LineFields<'_>, next_index: &mut usize) -> Option<Record> {
    let (&kind_byte, display) = line.fields[0].split_first()?;
    let kind = ItemKind::from_byte(kind_byte);
    let display = String::from_utf8_lossy(display).into_owned();

    if !kind.is_navigable() {
        return Some(Record {
            kind,
            display,
            selector: String::new(),
            host: String::new(),
            port: String::new(),
            index: None,
        });
    }

    *next_index += 1;
    let text = |i: usize| String::from_utf8_lossy(line.fields[i]).into_owned();
    Some(Record {
        kind,
        display,
        selector: text(1),
        host: text(2),
        port: text(3),
        index: Some(*next_index),
    })
}

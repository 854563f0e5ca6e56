use serde::Serialize;
use std::fmt;

/// The classifying character at the start of every menu line.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// `0`: a retrievable text file.
    TextFile,
    /// `1`: a sub-directory (another menu).
    Directory,
    /// `i`: informational text, never selectable.
    Info,
    /// Anything else. Displayed like `Info`.
    Other(char),
}

impl ItemKind {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'0' => ItemKind::TextFile,
            b'1' => ItemKind::Directory,
            b'i' => ItemKind::Info,
            other => ItemKind::Other(char::from(other)),
        }
    }

    /// Only directories and text files get a selection number.
    pub fn is_navigable(self) -> bool {
        matches!(self, ItemKind::TextFile | ItemKind::Directory)
    }
}

/// Where a request goes: endpoint plus the selector sent on the wire.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: String,
    pub selector: String,
}

impl Target {
    pub fn new(host: impl Into<String>, port: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            selector: selector.into(),
        }
    }

    /// `host:port`, used in messages and logs.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gopher://{}:{}/{}", self.host, self.port, self.selector)
    }
}

/// One parsed line of a menu response.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub kind: ItemKind,
    pub display: String,
    pub selector: String,
    pub host: String,
    pub port: String,
    /// 1-based selection number; `None` for everything that isn't navigable.
    pub index: Option<usize>,
}

impl Record {
    /// The request to make when this record is chosen.
    ///
    /// Returns `None` for non-navigable records and for navigable ones whose
    /// line was missing the host or port field.
    pub fn target(&self) -> Option<Target> {
        if !self.kind.is_navigable() || self.host.is_empty() || self.port.is_empty() {
            return None;
        }
        Some(Target::new(&self.host, &self.port, &self.selector))
    }
}

/// One parsed menu response. Immutable once built.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Menu {
    records: Vec<Record>,
    selectable: usize,
}

impl Menu {
    pub fn new(records: Vec<Record>) -> Self {
        let selectable = records.iter().filter(|r| r.index.is_some()).count();
        Self {
            records,
            selectable,
        }
    }

    /// Parse a raw response body into a menu.
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self::new(super::parser::parse(raw))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records carrying a selection number.
    pub fn selectable_count(&self) -> usize {
        self.selectable
    }

    /// Look up a record by its selection number.
    pub fn get(&self, index: usize) -> Option<&Record> {
        if index == 0 || index > self.selectable {
            return None;
        }
        self.records.iter().find(|r| r.index == Some(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: ItemKind, display: &str, index: Option<usize>) -> Record {
        Record {
            kind,
            display: display.to_string(),
            selector: "/sel".to_string(),
            host: "example.org".to_string(),
            port: "70".to_string(),
            index,
        }
    }

    #[test]
    fn test_item_kind_from_byte() {
        assert_eq!(ItemKind::from_byte(b'0'), ItemKind::TextFile);
        assert_eq!(ItemKind::from_byte(b'1'), ItemKind::Directory);
        assert_eq!(ItemKind::from_byte(b'i'), ItemKind::Info);
        assert_eq!(ItemKind::from_byte(b'h'), ItemKind::Other('h'));
        assert!(!ItemKind::Other('7').is_navigable());
    }

    #[test]
    fn test_menu_counts_selectable() {
        let menu = Menu::new(vec![
            record(ItemKind::Directory, "a", Some(1)),
            record(ItemKind::Info, "b", None),
            record(ItemKind::TextFile, "c", Some(2)),
        ]);
        assert_eq!(menu.selectable_count(), 2);
        assert_eq!(menu.records().len(), 3);
    }

    #[test]
    fn test_menu_get_by_index() {
        let menu = Menu::new(vec![
            record(ItemKind::Info, "hello", None),
            record(ItemKind::TextFile, "readme", Some(1)),
        ]);
        assert_eq!(menu.get(1).map(|r| r.display.as_str()), Some("readme"));
        assert!(menu.get(0).is_none());
        assert!(menu.get(2).is_none());
    }

    #[test]
    fn test_target_requires_host_and_port() {
        let mut rec = record(ItemKind::Directory, "dir", Some(1));
        assert_eq!(
            rec.target(),
            Some(Target::new("example.org", "70", "/sel"))
        );
        rec.host.clear();
        assert!(rec.target().is_none());
    }

    #[test]
    fn test_info_record_has_no_target() {
        let rec = record(ItemKind::Info, "text", None);
        assert!(rec.target().is_none());
    }

    #[test]
    fn test_target_display() {
        let target = Target::new("quux.org", "70", "/Archives");
        assert_eq!(target.to_string(), "gopher://quux.org:70//Archives");
        assert_eq!(target.endpoint(), "quux.org:70");
    }
}

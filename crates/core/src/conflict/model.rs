//! Conflict data model: files under merge and their conflict sections.
//!
//! These are plain values, shaped like the descriptors an external merge
//! backend produces. Selection state lives elsewhere (see
//! [`ResolutionSession`](super::ResolutionSession)) so the model can be
//! driven headlessly.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// How a conflict section was settled.
///
/// A section without a `Resolution` is unresolved; every variant here is
/// terminal and may be overwritten by another.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Keep the current ("ours") side.
    UseCurrent,
    /// Keep the incoming ("theirs") side.
    UseIncoming,
    /// Keep current followed by incoming.
    UseBoth,
    /// Use hand-written content.
    Manual,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UseCurrent => write!(f, "use_current"),
            Self::UseIncoming => write!(f, "use_incoming"),
            Self::UseBoth => write!(f, "use_both"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

// ---------------------------------------------------------------------------
// ConflictSection
// ---------------------------------------------------------------------------

/// One merge-conflict hunk within a file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConflictSection {
    /// Unique within the owning file.
    pub id: String,
    pub start_line: usize,
    pub end_line: usize,
    pub current_content: String,
    pub incoming_content: String,
    /// Common ancestor text. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    /// Only meaningful when `resolution` is [`Resolution::Manual`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_content: Option<String>,
}

impl ConflictSection {
    /// Create an unresolved section.
    pub fn new(
        id: impl Into<String>,
        start_line: usize,
        end_line: usize,
        current_content: impl Into<String>,
        incoming_content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_line,
            end_line,
            current_content: current_content.into(),
            incoming_content: incoming_content.into(),
            base_content: None,
            resolution: None,
            manual_content: None,
        }
    }

    /// Attach the common-ancestor text.
    pub fn with_base(mut self, base_content: impl Into<String>) -> Self {
        self.base_content = Some(base_content.into());
        self
    }

    /// Resolved iff a terminal resolution is set, even a `Manual` one with
    /// empty or missing text.
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    /// The merged text this section contributes under its resolution.
    pub fn render_resolution(&self) -> String {
        super::resolver::render_resolution(self)
    }
}

// ---------------------------------------------------------------------------
// ConflictFile
// ---------------------------------------------------------------------------

/// The descriptor shape as received; `resolved` is accepted but ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConflictFileRecord {
    path: String,
    #[serde(default)]
    conflicts: Vec<ConflictSection>,
}

impl From<ConflictFileRecord> for ConflictFile {
    fn from(record: ConflictFileRecord) -> Self {
        ConflictFile::new(record.path, record.conflicts)
    }
}

/// One file under merge.
///
/// `resolved` is derived from the sections and recomputed by every
/// mutation that goes through this type; it cannot be set directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", from = "ConflictFileRecord")]
pub struct ConflictFile {
    path: String,
    conflicts: Vec<ConflictSection>,
    resolved: bool,
}

impl ConflictFile {
    pub fn new(path: impl Into<String>, conflicts: Vec<ConflictSection>) -> Self {
        let mut file = Self {
            path: path.into(),
            conflicts,
            resolved: false,
        };
        file.recompute_resolved();
        file
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn conflicts(&self) -> &[ConflictSection] {
        &self.conflicts
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn section(&self, id: &str) -> Option<&ConflictSection> {
        self.conflicts.iter().find(|s| s.id == id)
    }

    /// Number of sections with a terminal resolution.
    pub fn resolved_count(&self) -> usize {
        self.conflicts.iter().filter(|s| s.is_resolved()).count()
    }

    /// Set a section's resolution.
    ///
    /// For [`Resolution::Manual`], `manual_content` replaces the stored text
    /// only when given; `None` keeps whatever was there. Returns `false`
    /// and changes nothing if no section has `section_id`.
    pub fn resolve(
        &mut self,
        section_id: &str,
        resolution: Resolution,
        manual_content: Option<String>,
    ) -> bool {
        let Some(section) = self.conflicts.iter_mut().find(|s| s.id == section_id) else {
            debug!(path = %self.path, section_id, "resolve: no such section");
            return false;
        };

        section.resolution = Some(resolution);
        if resolution == Resolution::Manual {
            if let Some(content) = manual_content {
                section.manual_content = Some(content);
            }
        }

        self.recompute_resolved();
        info!(
            path = %self.path,
            section_id,
            %resolution,
            file_resolved = self.resolved,
            "section resolved"
        );
        true
    }

    /// Return a section to the unresolved state, dropping manual text.
    ///
    /// Returns `false` and changes nothing if no section has `section_id`.
    pub fn clear_resolution(&mut self, section_id: &str) -> bool {
        let Some(section) = self.conflicts.iter_mut().find(|s| s.id == section_id) else {
            debug!(path = %self.path, section_id, "clear: no such section");
            return false;
        };

        section.resolution = None;
        section.manual_content = None;
        self.recompute_resolved();
        info!(path = %self.path, section_id, "section resolution cleared");
        true
    }

    fn recompute_resolved(&mut self) {
        self.resolved = self.conflicts.iter().all(ConflictSection::is_resolved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_section_file() -> ConflictFile {
        ConflictFile::new(
            "src/lib.rs",
            vec![
                ConflictSection::new("c1", 3, 9, "ours one", "theirs one"),
                ConflictSection::new("c2", 20, 26, "ours two", "theirs two").with_base("base"),
            ],
        )
    }

    #[test]
    fn test_new_file_is_unresolved() {
        let file = two_section_file();
        assert!(!file.is_resolved());
        assert_eq!(file.resolved_count(), 0);
        assert_eq!(file.section("c2").unwrap().base_content.as_deref(), Some("base"));
    }

    #[test]
    fn test_resolved_follows_sections() {
        let mut file = two_section_file();
        assert!(file.resolve("c1", Resolution::UseCurrent, None));
        assert!(!file.is_resolved());

        assert!(file.resolve("c2", Resolution::UseBoth, None));
        assert!(file.is_resolved());

        assert!(file.clear_resolution("c1"));
        assert!(!file.is_resolved());
        assert_eq!(file.resolved_count(), 1);
    }

    #[test]
    fn test_resolution_can_be_overwritten() {
        let mut file = two_section_file();
        file.resolve("c1", Resolution::UseCurrent, None);
        file.resolve("c1", Resolution::UseIncoming, None);
        assert_eq!(
            file.section("c1").unwrap().resolution,
            Some(Resolution::UseIncoming)
        );
    }

    #[test]
    fn test_manual_without_content_keeps_previous_text() {
        let mut file = two_section_file();
        file.resolve("c1", Resolution::Manual, Some("hand merged".into()));
        file.resolve("c1", Resolution::UseCurrent, None);
        file.resolve("c1", Resolution::Manual, None);

        let section = file.section("c1").unwrap();
        assert_eq!(section.resolution, Some(Resolution::Manual));
        assert_eq!(section.manual_content.as_deref(), Some("hand merged"));
    }

    #[test]
    fn test_non_manual_resolution_ignores_content() {
        let mut file = two_section_file();
        file.resolve("c1", Resolution::UseIncoming, Some("ignored".into()));
        assert_eq!(file.section("c1").unwrap().manual_content, None);
    }

    #[test]
    fn test_empty_manual_counts_as_resolved() {
        let mut file = ConflictFile::new("a.txt", vec![ConflictSection::new("c1", 1, 5, "a", "b")]);
        file.resolve("c1", Resolution::Manual, Some(String::new()));
        assert!(file.is_resolved());
    }

    #[test]
    fn test_unknown_section_is_noop() {
        let mut file = two_section_file();
        let before = file.clone();
        assert!(!file.resolve("missing", Resolution::UseCurrent, None));
        assert!(!file.clear_resolution("missing"));
        assert_eq!(file, before);
    }

    #[test]
    fn test_deserialize_recomputes_resolved() {
        let json = r#"{
            "path": "a.txt",
            "resolved": true,
            "conflicts": [
                {"id": "c1", "startLine": 1, "endLine": 5,
                 "currentContent": "a", "incomingContent": "b"}
            ]
        }"#;
        let file: ConflictFile = serde_json::from_str(json).unwrap();
        assert!(!file.is_resolved());
        assert_eq!(file.conflicts()[0].start_line, 1);
        assert_eq!(file.conflicts()[0].base_content, None);
    }

    #[test]
    fn test_serialize_includes_derived_flag() {
        let mut file = ConflictFile::new("a.txt", vec![ConflictSection::new("c1", 1, 5, "a", "b")]);
        file.resolve("c1", Resolution::UseCurrent, None);
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["resolved"], true);
        assert_eq!(json["conflicts"][0]["resolution"], "use_current");
        assert_eq!(json["conflicts"][0]["currentContent"], "a");
    }

    #[test]
    fn test_file_without_sections_is_resolved() {
        let file = ConflictFile::new("empty.txt", Vec::new());
        assert!(file.is_resolved());
    }
}

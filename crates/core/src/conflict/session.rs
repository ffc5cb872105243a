//! Interactive resolution state: the changeset plus the host's selection.
//!
//! A [`ResolutionSession`] owns a [`ConflictChangeset`] and two optional
//! pointers (active file, active section). Lookup misses never raise: an
//! unknown path or id clears the pointer or turns the operation into a
//! no-op, and the no-op is reported as `None`.

use tracing::{debug, info, warn};

use super::changeset::{ConflictChangeset, Progress};
use super::events::ResolutionEvent;
use super::model::{ConflictFile, ConflictSection, Resolution};

/// Selection and resolution state for one changeset.
#[derive(Debug, Clone, Default)]
pub struct ResolutionSession {
    changeset: ConflictChangeset,
    active_file: Option<String>,
    active_section: Option<String>,
}

impl ResolutionSession {
    pub fn new(changeset: ConflictChangeset) -> Self {
        info!(
            files = changeset.files().len(),
            sections = changeset.total_conflicts(),
            "starting resolution session"
        );
        Self {
            changeset,
            active_file: None,
            active_section: None,
        }
    }

    pub fn changeset(&self) -> &ConflictChangeset {
        &self.changeset
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Make `path` the active file and its first section the active section.
    ///
    /// An unknown path leaves no active file; a file without sections leaves
    /// no active section.
    pub fn select_file(&mut self, path: &str) {
        match self.changeset.file(path) {
            Some(file) => {
                self.active_file = Some(file.path().to_string());
                self.active_section = file.conflicts().first().map(|s| s.id.clone());
                debug!(path, section = ?self.active_section, "selected file");
            }
            None => {
                warn!(path, "select_file: unknown path");
                self.active_file = None;
                self.active_section = None;
            }
        }
    }

    /// Make `id` the active section within the active file, or clear the
    /// pointer if there is no such section.
    pub fn select_section(&mut self, id: &str) {
        let found = self
            .active_file()
            .and_then(|file| file.section(id))
            .map(|section| section.id.clone());
        if found.is_none() {
            warn!(section_id = id, "select_section: no such section in active file");
        }
        self.active_section = found;
    }

    pub fn active_file(&self) -> Option<&ConflictFile> {
        self.active_file
            .as_deref()
            .and_then(|path| self.changeset.file(path))
    }

    pub fn active_section(&self) -> Option<&ConflictSection> {
        let id = self.active_section.as_deref()?;
        self.active_file()?.section(id)
    }

    /// Rendered resolution of the active section.
    pub fn active_preview(&self) -> Option<String> {
        self.active_section().map(ConflictSection::render_resolution)
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    /// Resolve `section_id` in the active file.
    ///
    /// `manual_content` only matters for [`Resolution::Manual`], and `None`
    /// keeps any text already stored. Without an active file or with an
    /// unknown id nothing changes and `None` is returned.
    pub fn resolve(
        &mut self,
        section_id: &str,
        resolution: Resolution,
        manual_content: Option<String>,
    ) -> Option<ResolutionEvent> {
        let file = self.active_file_mut()?;
        if !file.resolve(section_id, resolution, manual_content) {
            return None;
        }
        Some(ResolutionEvent::ResolutionChanged {
            path: file.path().to_string(),
            section_id: section_id.to_string(),
            resolution: Some(resolution),
        })
    }

    /// Put `section_id` in the active file back to unresolved. Same lookup
    /// rules as [`resolve`](Self::resolve).
    pub fn clear_resolution(&mut self, section_id: &str) -> Option<ResolutionEvent> {
        let file = self.active_file_mut()?;
        if !file.clear_resolution(section_id) {
            return None;
        }
        Some(ResolutionEvent::ResolutionChanged {
            path: file.path().to_string(),
            section_id: section_id.to_string(),
            resolution: None,
        })
    }

    fn active_file_mut(&mut self) -> Option<&mut ConflictFile> {
        let Some(path) = self.active_file.as_deref() else {
            debug!("no active file");
            return None;
        };
        self.changeset.file_mut(path)
    }

    // -----------------------------------------------------------------------
    // Completion
    // -----------------------------------------------------------------------

    pub fn can_finalize(&self) -> bool {
        self.changeset.can_finalize()
    }

    pub fn progress(&self) -> Progress {
        self.changeset.progress()
    }

    /// The finalize event, carrying the resolved changeset, once every
    /// section is resolved; `None` before that.
    pub fn request_finalize(&self) -> Option<ResolutionEvent> {
        if !self.can_finalize() {
            let progress = self.progress();
            debug!(
                resolved = progress.resolved_count,
                total = progress.total_count,
                "finalize requested with unresolved sections"
            );
            return None;
        }
        info!("changeset fully resolved, finalize requested");
        Some(ResolutionEvent::FinalizeRequested {
            changeset: self.changeset.clone(),
        })
    }

    /// Abandon the session, discarding all in-memory resolutions.
    pub fn cancel(self) -> ResolutionEvent {
        let path_count = self.changeset.files().len();
        info!(path_count, "resolution session cancelled");
        ResolutionEvent::CancelRequested { path_count }
    }

    /// Hand back the changeset, resolved or not.
    pub fn into_changeset(self) -> ConflictChangeset {
        self.changeset
    }
}

//! Projection from a section's resolution to its merged text.

use super::model::{ConflictSection, Resolution};

/// The text a section contributes once merged.
///
/// | Resolution  | Output                           |
/// |-------------|----------------------------------|
/// | UseCurrent  | current content                  |
/// | UseIncoming | incoming content                 |
/// | UseBoth     | current, `\n`, incoming          |
/// | Manual      | manual content, or empty if none |
/// | unresolved  | empty                            |
pub fn render_resolution(section: &ConflictSection) -> String {
    match section.resolution {
        Some(Resolution::UseCurrent) => section.current_content.clone(),
        Some(Resolution::UseIncoming) => section.incoming_content.clone(),
        Some(Resolution::UseBoth) => {
            format!("{}\n{}", section.current_content, section.incoming_content)
        }
        Some(Resolution::Manual) => section.manual_content.clone().unwrap_or_default(),
        None => String::new(),
    }
}

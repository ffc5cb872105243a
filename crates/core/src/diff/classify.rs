//! File classification by extension, used to pick a display affordance.

use serde::{Deserialize, Serialize};

use crate::config::ClassifyConfig;

/// Display category of a file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Code,
    Document,
    Generic,
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code => write!(f, "code"),
            Self::Document => write!(f, "document"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

const CODE_EXTENSIONS: &[&str] = &[
    "rs", "js", "mjs", "cjs", "ts", "tsx", "jsx", "vue", "svelte", "py", "rb", "go", "java", "kt",
    "kts", "scala", "swift", "c", "h", "cc", "cpp", "cxx", "hpp", "cs", "php", "lua", "dart", "sh",
    "bash", "zsh", "ps1", "sql", "html", "htm", "css", "scss", "sass", "less", "json", "yaml",
    "yml", "toml", "xml",
];

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "md", "markdown", "mdx", "txt", "rst", "adoc", "tex", "rtf", "pdf", "doc", "docx", "odt",
];

/// The extension of `file_name`: the lowercased text after its last `.`.
///
/// A name without a dot is its own extension, so `Makefile` yields
/// `makefile`.
fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or(file_name)
        .to_ascii_lowercase()
}

/// Classify a file name using the built-in extension tables.
///
/// Unknown extensions are [`FileCategory::Generic`].
pub fn classify_file(file_name: &str) -> FileCategory {
    let ext = extension_of(file_name);
    if CODE_EXTENSIONS.contains(&ext.as_str()) {
        FileCategory::Code
    } else if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
        FileCategory::Document
    } else {
        FileCategory::Generic
    }
}

/// A classifier with user extensions layered over the built-ins.
#[derive(Debug, Clone, Default)]
pub struct FileClassifier {
    code: Vec<String>,
    document: Vec<String>,
}

impl FileClassifier {
    pub fn from_config(config: &ClassifyConfig) -> Self {
        let normalize = |exts: &[String]| -> Vec<String> {
            exts.iter().map(|e| e.trim().to_ascii_lowercase()).collect()
        };
        Self {
            code: normalize(&config.code_extensions),
            document: normalize(&config.document_extensions),
        }
    }

    /// Classify `file_name`, consulting user extensions before the built-ins.
    pub fn classify(&self, file_name: &str) -> FileCategory {
        let ext = extension_of(file_name);
        if self.code.contains(&ext) {
            FileCategory::Code
        } else if self.document.contains(&ext) {
            FileCategory::Document
        } else {
            classify_file(file_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_categories() {
        assert_eq!(classify_file("src/main.rs"), FileCategory::Code);
        assert_eq!(classify_file("app.component.tsx"), FileCategory::Code);
        assert_eq!(classify_file("README.md"), FileCategory::Document);
        assert_eq!(classify_file("notes.txt"), FileCategory::Document);
        assert_eq!(classify_file("logo.png"), FileCategory::Generic);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(classify_file("MAIN.RS"), FileCategory::Code);
        assert_eq!(classify_file("Guide.MarkDown"), FileCategory::Document);
    }

    #[test]
    fn test_names_without_known_extension() {
        assert_eq!(classify_file("Makefile"), FileCategory::Generic);
        assert_eq!(classify_file(""), FileCategory::Generic);
        assert_eq!(classify_file("archive."), FileCategory::Generic);
        // The text after the last dot is the extension.
        assert_eq!(classify_file(".json"), FileCategory::Code);
    }

    #[test]
    fn test_user_extensions_win() {
        let classifier = FileClassifier::from_config(&ClassifyConfig {
            code_extensions: vec!["ZIG".into()],
            document_extensions: vec!["org".into(), "txt".into()],
        });
        assert_eq!(classifier.classify("build.zig"), FileCategory::Code);
        assert_eq!(classifier.classify("todo.org"), FileCategory::Document);
        assert_eq!(classifier.classify("lib.rs"), FileCategory::Code);
        assert_eq!(classifier.classify("image.bmp"), FileCategory::Generic);
    }

    #[test]
    fn test_user_extension_overrides_builtin() {
        let classifier = FileClassifier::from_config(&ClassifyConfig {
            code_extensions: vec![],
            document_extensions: vec!["html".into()],
        });
        assert_eq!(classifier.classify("index.html"), FileCategory::Document);
    }

    #[test]
    fn test_display() {
        assert_eq!(FileCategory::Document.to_string(), "document");
    }
}

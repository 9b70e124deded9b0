use std::path::PathBuf;

use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::ScanSettings;
use crate::error::Result;
use crate::ingest::hasher;

/// Reason why a file is not a transcript candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// File extension is not one of the configured transcript extensions.
    UnsupportedExtension,
    /// File exceeds the configured `max_file_size_mb` limit.
    TooLarge,
    /// Path matches one of the configured exclude patterns.
    Excluded,
}

/// A transcript file found by [`Scanner::scan`].
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub relative_path: String,
}

/// A discovered file, transcript candidate or not.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredFile {
    /// Path relative to the scan root (forward slashes).
    pub relative_path: String,
    /// Lowercase extension without the dot.
    pub extension: String,
    pub size: u64,
    /// Whether the file would be extracted.
    pub supported: bool,
    /// SHA-256 of the contents (supported files only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
}

/// Gitignore-aware directory scanner for transcript files.
pub struct Scanner {
    root: PathBuf,
    extensions: Vec<String>,
    exclude_patterns: Vec<String>,
    /// Maximum file size in bytes (0 = unlimited).
    max_file_size_bytes: u64,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>, settings: &ScanSettings) -> Self {
        Self {
            root: root.into(),
            extensions: settings
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude_patterns: settings.exclude_patterns.clone(),
            max_file_size_bytes: settings.max_file_size_bytes(),
        }
    }

    /// Transcript files under the root, sorted by relative path.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        let mut files: Vec<ScannedFile> = self
            .scan_all()?
            .into_iter()
            .filter(|f| f.supported)
            .map(|f| ScannedFile {
                path: self.root.join(&f.relative_path),
                relative_path: f.relative_path,
            })
            .collect();
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }

    /// Every file under the root, with the reason non-candidates are skipped.
    pub fn scan_all(&self) -> Result<Vec<DiscoveredFile>> {
        let entries: Vec<PathBuf> = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .follow_links(false)
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                !matches!(name.as_ref(), ".quizx" | ".git")
            })
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .collect();

        let mut files: Vec<DiscoveredFile> = entries
            .par_iter()
            .filter_map(|path| {
                let size = path.metadata().ok()?.len();
                let relative = if path == &self.root {
                    path.file_name()?.to_string_lossy().into_owned()
                } else {
                    path.strip_prefix(&self.root)
                        .unwrap_or(path)
                        .to_string_lossy()
                        .replace('\\', "/")
                };
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_lowercase();

                let skip_reason = if self.is_excluded(&relative) {
                    Some(SkipReason::Excluded)
                } else if !self.is_supported_extension(&ext) {
                    Some(SkipReason::UnsupportedExtension)
                } else if self.max_file_size_bytes > 0 && size > self.max_file_size_bytes {
                    Some(SkipReason::TooLarge)
                } else {
                    None
                };
                let hash = if skip_reason.is_none() {
                    hasher::hash_file(path).ok()
                } else {
                    None
                };

                Some(DiscoveredFile {
                    relative_path: relative,
                    extension: ext,
                    size,
                    supported: skip_reason.is_none(),
                    hash,
                    skip_reason,
                })
            })
            .collect();

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }

    #[must_use]
    pub fn is_supported_extension(&self, ext: &str) -> bool {
        self.extensions.contains(&ext.to_lowercase())
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.exclude_patterns
            .iter()
            .map(|p| p.trim_end_matches('/'))
            .any(|p| !p.is_empty() && relative.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn settings() -> ScanSettings {
        ScanSettings::default()
    }

    #[test]
    fn scan_finds_text_files_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("quiz.txt"), "Đoạn văn câu hỏi").unwrap();
        fs::write(tmp.path().join("notes.md"), "# notes").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested/more.TXT"), "x").unwrap();

        let files = Scanner::new(tmp.path(), &settings()).scan().unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(names, vec!["nested/more.TXT", "quiz.txt"]);
    }

    #[test]
    fn scan_all_reports_skip_reasons() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("quiz.txt"), "text").unwrap();
        fs::write(tmp.path().join("image.png"), [0u8, 1, 2]).unwrap();

        let files = Scanner::new(tmp.path(), &settings()).scan_all().unwrap();
        assert_eq!(files.len(), 2);
        let png = files.iter().find(|f| f.extension == "png").unwrap();
        assert!(!png.supported);
        assert_eq!(png.skip_reason, Some(SkipReason::UnsupportedExtension));
        assert!(png.hash.is_none());
        let txt = files.iter().find(|f| f.extension == "txt").unwrap();
        assert!(txt.supported);
        assert_eq!(txt.hash.as_deref().map(str::len), Some(64));
    }

    #[test]
    fn exclude_patterns_apply() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("drafts")).unwrap();
        fs::write(tmp.path().join("drafts/old.txt"), "x").unwrap();
        let mut s = settings();
        s.exclude_patterns = vec!["drafts/".into()];

        let files = Scanner::new(tmp.path(), &s).scan_all().unwrap();
        assert_eq!(files[0].skip_reason, Some(SkipReason::Excluded));
    }

    #[test]
    fn size_limit_applies() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("big.txt"), vec![b'a'; 2 * 1024 * 1024]).unwrap();
        let mut s = settings();
        s.max_file_size_mb = 1;

        let files = Scanner::new(tmp.path(), &s).scan_all().unwrap();
        assert_eq!(files[0].skip_reason, Some(SkipReason::TooLarge));
        assert!(Scanner::new(tmp.path(), &s).scan().unwrap().is_empty());
    }

    #[test]
    fn extension_check_ignores_case_and_dot() {
        let mut s = settings();
        s.extensions = vec![".TXT".into()];
        let scanner = Scanner::new("/tmp", &s);
        assert!(scanner.is_supported_extension("txt"));
        assert!(scanner.is_supported_extension("Txt"));
        assert!(!scanner.is_supported_extension("md"));
    }

    #[test]
    fn only_state_directories_are_pruned() {
        let tmp = TempDir::new().unwrap();
        for dir in ["target", "node_modules", ".quizx", ".git"] {
            fs::create_dir(tmp.path().join(dir)).unwrap();
            fs::write(tmp.path().join(dir).join("quiz.txt"), "x").unwrap();
        }

        let files = Scanner::new(tmp.path(), &settings()).scan().unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(names, vec!["node_modules/quiz.txt", "target/quiz.txt"]);
    }

    #[test]
    fn discovered_files_serialize_with_full_names() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("scan.pdf"), [0u8; 4]).unwrap();

        let files = Scanner::new(tmp.path(), &settings()).scan_all().unwrap();
        let json = serde_json::to_value(&files[0]).unwrap();
        assert_eq!(json["relative_path"], "scan.pdf");
        assert_eq!(json["extension"], "pdf");
        assert_eq!(json["size"], 4);
        assert_eq!(json["supported"], false);
        assert_eq!(json["skip_reason"], "unsupported_extension");
        assert!(json.get("hash").is_none());
    }
}

//! Source scanning for layer-boundary checks.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// One offending source line.
pub struct Hit {
    pub file: String,
    pub line: usize,
    pub text: String,
}

impl fmt::Debug for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.text.trim())
    }
}

/// The `.rs` files under one directory of the crate, read once.
pub struct SourceTree {
    files: Vec<(String, String)>,
}

impl SourceTree {
    /// Load every `.rs` file below `dir` (relative to the crate root).
    pub fn load(dir: &str) -> Self {
        let mut paths = Vec::new();
        walk(&crate_root().join(dir), &mut paths);
        paths.sort();

        let files = paths
            .into_iter()
            .map(|path| {
                let source = fs::read_to_string(&path)
                    .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
                (relative(&path), source)
            })
            .collect();
        Self { files }
    }

    /// Lines containing any of `needles`.
    pub fn lines_containing(&self, needles: &[&str]) -> Vec<Hit> {
        self.lines_where(|_, text| needles.iter().any(|needle| text.contains(needle)))
    }

    /// Lines in `mod.rs` files that are neither module declarations,
    /// attributes nor comments.
    pub fn non_export_mod_lines(&self) -> Vec<Hit> {
        self.lines_where(|file, text| {
            if !file.ends_with("/mod.rs") {
                return false;
            }
            let text = text.trim();
            !(text.is_empty()
                || text.starts_with("//")
                || text.starts_with("#[")
                || text.starts_with("pub mod ")
                || text.starts_with("mod "))
        })
    }

    fn lines_where(&self, mut matches: impl FnMut(&str, &str) -> bool) -> Vec<Hit> {
        let mut hits = Vec::new();
        for (file, source) in &self.files {
            for (index, text) in source.lines().enumerate() {
                if matches(file, text) {
                    hits.push(Hit {
                        file: file.clone(),
                        line: index + 1,
                        text: text.to_string(),
                    });
                }
            }
        }
        hits
    }
}

/// Contents of one file, relative to the crate root.
pub fn read_source(path: &str) -> String {
    fs::read_to_string(crate_root().join(path))
        .unwrap_or_else(|e| panic!("cannot read {path}: {e}"))
}

pub fn crate_path_exists(path: &str) -> bool {
    crate_root().join(path).exists()
}

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn relative(path: &Path) -> String {
    path.strip_prefix(crate_root())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries =
        fs::read_dir(dir).unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()));
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

//! Input directory listing with pattern-based filtering.
//!
//! Lists the files directly inside the input directory (no
//! recursion), keeps those whose name matches the PDF pattern and
//! drops anything matching an exclude pattern. Files are only
//! inspected by name; their contents are never opened here.

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::{PdfVecError, Result};

/// File name pattern for documents picked up by a batch run
pub const PDF_PATTERN: &str = "*.pdf";

/// Directory walker that yields the PDF files of one directory
pub struct FileWalker {
    /// Pattern a file name must match (e.g., "*.pdf")
    include_pattern: Pattern,

    /// Patterns to exclude (e.g., "draft-*.pdf")
    exclude_patterns: Vec<Pattern>,
}

impl FileWalker {
    /// Create a walker for PDF files
    ///
    /// # Arguments
    ///
    /// * `exclude_patterns` - Glob patterns for file names to skip
    ///
    /// # Returns
    ///
    /// A new `FileWalker` instance or an error if a pattern is
    /// invalid
    pub fn new(exclude_patterns: Vec<String>) -> Result<Self> {
        let include_pattern = Pattern::new(PDF_PATTERN)
            .map_err(|e| PdfVecError::ConfigError(format!("Invalid include pattern: {e}")))?;

        let exclude = exclude_patterns
            .into_iter()
            .map(|p| {
                Pattern::new(&p).map_err(|e| {
                    PdfVecError::ConfigError(format!("Invalid exclude pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            include_pattern,
            exclude_patterns: exclude,
        })
    }

    /// Collect the matching files of `root`, sorted by file name
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `root` is not a readable directory.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(PdfVecError::InvalidPath(format!(
                "Input directory {root:?} does not exist or is not a directory"
            )));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let name = entry.file_name().to_string_lossy();

                    if self.matches(&name) {
                        files.push(entry.path().to_path_buf());
                    } else {
                        tracing::debug!("Ignoring {:?}", entry.path());
                    }
                }
                Err(e) => {
                    if e.depth() == 0 {
                        return Err(PdfVecError::InvalidPath(format!(
                            "Cannot read input directory {root:?}: {e}"
                        )));
                    }
                    tracing::warn!("Walk error: {}", e);
                }
            }
        }

        Ok(files)
    }

    /// Check a file name against the include/exclude patterns
    fn matches(&self, name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        self.include_pattern.matches_with(name, options)
            && !self
                .exclude_patterns
                .iter()
                .any(|p| p.matches_with(name, options))
    }
}

//! File pattern matcher for dictionary files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::EngineSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid dictionary include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid dictionary exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches workspace files against `dictionaryFiles` patterns.
#[derive(Debug, Clone)]
pub struct DictionaryFileMatcher {
    workspace_root: PathBuf,
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl DictionaryFileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(workspace_root: PathBuf, settings: &EngineSettings) -> Result<Self, MatcherError> {
        let files = &settings.dictionary_files;

        let include_set = Self::build_glob_set(&files.include_patterns, |pattern, source| {
            MatcherError::InvalidIncludePattern { pattern, source }
        })?;

        let exclude_set = Self::build_glob_set(&files.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { workspace_root, include_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// The path must be absolute and under the workspace root.
    #[must_use]
    pub fn is_dictionary_file(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.workspace_root).ok() else {
            return false;
        };

        self.is_dictionary_file_relative(relative_path)
    }

    /// The path must be relative to the workspace root.
    #[must_use]
    pub fn is_dictionary_file_relative(&self, relative_path: &Path) -> bool {
        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}

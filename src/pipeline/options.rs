//! Extraction options and configuration.

use crate::assemble::ShellOptions;
use crate::locate::{LocateOptions, Strategy};
use std::path::PathBuf;

/// Default base directory for written pages.
pub const DEFAULT_OUTPUT_DIR: &str = "page-backups";

/// Options for an extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Locator strategy
    pub strategy: Strategy,

    /// What page containers look like
    pub locate: LocateOptions,

    /// Wrapper markup for assembled pages
    pub shell: ShellOptions,

    /// Wrap regions in the shell (false writes the raw region)
    pub assemble: bool,

    /// Assemble and write pages in parallel
    pub parallel: bool,

    /// Base directory for written pages
    pub output_dir: PathBuf,

    /// Create missing slot directories
    pub create_dirs: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the locator strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set locate options.
    pub fn with_locate_options(mut self, options: LocateOptions) -> Self {
        self.locate = options;
        self
    }

    /// Set shell options.
    pub fn with_shell_options(mut self, options: ShellOptions) -> Self {
        self.shell = options;
        self
    }

    /// Write raw regions instead of assembled pages.
    pub fn raw(mut self) -> Self {
        self.assemble = false;
        self
    }

    /// Enable or disable assembly.
    pub fn with_assemble(mut self, assemble: bool) -> Self {
        self.assemble = assemble;
        self
    }

    /// Enable or disable parallel writes.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Create missing slot directories.
    pub fn with_create_dirs(mut self, create: bool) -> Self {
        self.create_dirs = create;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Structural,
            locate: LocateOptions::default(),
            shell: ShellOptions::default(),
            assemble: true,
            parallel: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            create_dirs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.strategy, Strategy::Structural);
        assert!(options.assemble);
        assert!(!options.parallel);
        assert!(!options.create_dirs);
        assert_eq!(options.output_dir, PathBuf::from("page-backups"));
    }

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new()
            .with_strategy(Strategy::Pattern)
            .raw()
            .with_parallel(true)
            .with_output_dir("out")
            .with_create_dirs(true);

        assert_eq!(options.strategy, Strategy::Pattern);
        assert!(!options.assemble);
        assert!(options.parallel);
        assert!(options.create_dirs);
        assert_eq!(options.output_dir, PathBuf::from("out"));
    }
}

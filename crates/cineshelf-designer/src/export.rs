//! Packaging the compiled stylesheet as a downloadable file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::css::compile;
use crate::tree::ConfigTree;
use crate::util::slugify;

/// Media type of exported stylesheets.
pub const CSS_MEDIA_TYPE: &str = "text/css";

/// A stylesheet ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub contents: String,
}

impl ExportArtifact {
    /// Writes the artifact into `dir` under its file name.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.contents)?;
        info!(path = %path.display(), bytes = self.contents.len(), "exported stylesheet");
        Ok(path)
    }
}

/// Produces export artifacts. Holds no state besides the product name.
#[derive(Debug, Clone)]
pub struct Exporter {
    product_name: String,
}

impl Exporter {
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
        }
    }

    /// `CineShelf` exports as `cineshelf-custom-styles.css`.
    pub fn file_name(&self) -> String {
        format!("{}-custom-styles.css", slugify(&self.product_name))
    }

    /// Compiles `tree` into an artifact. Equal trees give equal artifacts.
    pub fn export(&self, tree: &ConfigTree) -> ExportArtifact {
        ExportArtifact {
            file_name: self.file_name(),
            media_type: CSS_MEDIA_TYPE,
            contents: compile(tree),
        }
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new("CineShelf")
    }
}

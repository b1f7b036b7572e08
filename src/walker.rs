// Target-file discovery under a root directory.
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Which files a conversion pass applies to.
#[derive(Debug, Clone, Copy)]
pub enum FileSelector {
    /// Any file with the given extension, e.g. `*.lua`.
    Extension(&'static str),
    /// Files whose name starts with a prefix and carries an extension,
    /// e.g. `wrap_*.cpp`.
    PrefixAndExtension {
        prefix: &'static str,
        extension: &'static str,
    },
}

impl FileSelector {
    fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        match self {
            FileSelector::Extension(ext) => {
                path.extension().and_then(|e| e.to_str()) == Some(ext)
            }
            FileSelector::PrefixAndExtension { prefix, extension } => {
                name.starts_with(prefix)
                    && path.extension().and_then(|e| e.to_str()) == Some(extension)
            }
        }
    }
}

/// Recursively collect every file under `root` matching the selector.
/// Fresh traversal per call; order follows the walk and carries no meaning.
pub fn find_files(root: &Path, selector: FileSelector) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| selector.matches(p))
        .collect()
}

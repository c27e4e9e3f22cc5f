//! File system helpers for the HTML/CSS file convention and the
//! default dialog directories.

use std::path::{Path, PathBuf};

use directories::UserDirs;

/// Path of the CSS file associated with an HTML file by convention:
/// `<stem>.css` next to the HTML file.
pub fn sibling_css_path(html_path: &Path) -> PathBuf {
    html_path.with_extension("css")
}

/// Check if a file exists at the given path.
pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// The user's Documents directory, falling back to the current
/// directory when the platform has none.
pub fn documents_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// The user's Pictures directory, with the same fallback.
pub fn pictures_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.picture_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_css_path() {
        assert_eq!(
            sibling_css_path(Path::new("/pages/index.html")),
            PathBuf::from("/pages/index.css")
        );
        assert_eq!(
            sibling_css_path(Path::new("report.htm")),
            PathBuf::from("report.css")
        );
    }

    #[test]
    fn test_fallback_dirs_are_usable() {
        // Both helpers must always return something a dialog can open.
        assert!(!documents_dir().as_os_str().is_empty());
        assert!(!pictures_dir().as_os_str().is_empty());
    }
}

//! Static HTML viewer written next to an enhanced document

use anyhow::{Context, Result};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

const TEMPLATE: &str = include_str!("scalar.html");

/// Title used when the document has none
pub const FALLBACK_TITLE: &str = "API Reference";

/// What happened to the viewer file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerOutcome {
    Created(PathBuf),
    /// A file already existed and was left alone
    Skipped(PathBuf),
}

/// Default viewer location for an output document
pub fn default_viewer_path(output: &Path) -> PathBuf {
    output.with_extension("html")
}

/// Link from the viewer to the document.
///
/// A path relative to the viewer's directory, climbing with `..` where
/// needed. When no relative path can be formed lexically (one path absolute
/// and the other not, or `..` in the viewer's directory) the document's
/// absolute path is used.
pub fn document_href(viewer: &Path, document: &Path) -> String {
    let viewer_dir = viewer.parent().unwrap_or_else(|| Path::new(""));
    let target = relative_path(viewer_dir, document).unwrap_or_else(|| {
        document
            .canonicalize()
            .unwrap_or_else(|_| document.to_path_buf())
    });
    target
        .components()
        .map(|c| match c {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().into_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn relative_path(from_dir: &Path, to: &Path) -> Option<PathBuf> {
    if from_dir.is_absolute() != to.is_absolute() {
        return None;
    }

    fn significant(path: &Path) -> Vec<Component<'_>> {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }
    let from = significant(from_dir);
    let to = significant(to);
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut relative = PathBuf::new();
    for component in &from[common..] {
        match component {
            Component::Normal(_) => relative.push(".."),
            _ => return None,
        }
    }
    for component in &to[common..] {
        relative.push(component.as_os_str());
    }
    Some(relative)
}

/// Render the viewer page.
///
/// Placeholders are substituted in a single pass, so placeholder text inside
/// the title or href is emitted literally.
pub fn render_viewer(title: &str, href: &str) -> String {
    let title = html_escape::encode_text(title);
    let href = html_escape::encode_double_quoted_attribute(href);

    let mut html = String::with_capacity(TEMPLATE.len() + title.len() + href.len());
    let mut rest = TEMPLATE;
    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{{title}}") {
            html.push_str(&title);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{{document_url}}") {
            html.push_str(&href);
            rest = after;
        } else {
            html.push_str("{{");
            rest = &tail[2..];
        }
    }
    html.push_str(rest);
    html
}

/// Write the viewer for `document` at `viewer`, unless a file is already
/// there.
///
/// The page is written to a temporary file in the viewer's directory and
/// moved into place without replacing an existing file. A failed write
/// leaves no partial viewer behind.
pub fn write_viewer_if_absent(viewer: &Path, document: &Path, title: &str) -> Result<ViewerOutcome> {
    if viewer.exists() {
        debug!(path = %viewer.display(), "viewer already present, leaving it untouched");
        return Ok(ViewerOutcome::Skipped(viewer.to_path_buf()));
    }

    let dir = match viewer.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create viewer directory {}", dir.display()))?;

    let html = render_viewer(title, &document_href(viewer, document));
    let mut temp = tempfile::NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to create temporary viewer in {}", dir.display()))?;
    temp.write_all(html.as_bytes())
        .with_context(|| format!("Failed to write viewer {}", viewer.display()))?;

    match temp.persist_noclobber(viewer) {
        Ok(_) => {
            info!(path = %viewer.display(), "wrote companion viewer");
            Ok(ViewerOutcome::Created(viewer.to_path_buf()))
        }
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
            debug!(path = %viewer.display(), "viewer appeared concurrently, leaving it untouched");
            Ok(ViewerOutcome::Skipped(viewer.to_path_buf()))
        }
        Err(e) => Err(e.error).with_context(|| format!("Failed to create viewer {}", viewer.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_viewer_path() {
        assert_eq!(
            default_viewer_path(Path::new("out/sales.json")),
            PathBuf::from("out/sales.html")
        );
        assert_eq!(default_viewer_path(Path::new("api")), PathBuf::from("api.html"));
    }

    #[test]
    fn test_document_href() {
        assert_eq!(
            document_href(Path::new("out/sales.html"), Path::new("out/sales.json")),
            "sales.json"
        );
        assert_eq!(
            document_href(Path::new("sales.html"), Path::new("specs/v1/sales.json")),
            "specs/v1/sales.json"
        );
        assert_eq!(
            document_href(Path::new("docs/index.html"), Path::new("out/sales.json")),
            "../out/sales.json"
        );
        assert_eq!(
            document_href(Path::new("./site/api/index.html"), Path::new("sales.json")),
            "../../sales.json"
        );
        assert_eq!(
            document_href(Path::new("/srv/docs/index.html"), Path::new("/srv/out/sales.json")),
            "../out/sales.json"
        );
    }

    #[test]
    fn test_document_href_falls_back_to_absolute_path() {
        let temp_dir = TempDir::new().unwrap();
        let document = temp_dir.path().join("sales.json");
        std::fs::write(&document, "{}").unwrap();

        let href = document_href(Path::new("docs/index.html"), &document);
        assert!(href.starts_with('/'));
        assert!(href.ends_with("/sales.json"));
    }

    #[test]
    fn test_placeholders_in_values_are_not_expanded() {
        let html = render_viewer("{{document_url}}", "api.json");
        assert!(html.contains("<title>{{document_url}}</title>"));
        assert!(html.contains("data-url=\"api.json\""));

        let html = render_viewer("Sales", "{{title}}.json");
        assert!(html.contains("data-url=\"{{title}}.json\""));
    }

    #[test]
    fn test_render_escapes_title_and_href() {
        let html = render_viewer("Sales & <Orders>", "a\"b.json");
        assert!(html.contains("<title>Sales &amp; &lt;Orders&gt;</title>"));
        assert!(html.contains("data-url=\"a&quot;b.json\""));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_existing_viewer_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let viewer = temp_dir.path().join("sales.html");
        let document = temp_dir.path().join("sales.json");
        std::fs::write(&viewer, "custom").unwrap();

        let outcome = write_viewer_if_absent(&viewer, &document, "Sales").unwrap();
        assert_eq!(outcome, ViewerOutcome::Skipped(viewer.clone()));
        assert_eq!(std::fs::read_to_string(&viewer).unwrap(), "custom");
    }

    #[test]
    fn test_new_viewer_leaves_no_temporary_files() {
        let temp_dir = TempDir::new().unwrap();
        let viewer = temp_dir.path().join("docs").join("index.html");
        let document = temp_dir.path().join("out").join("sales.json");

        let outcome = write_viewer_if_absent(&viewer, &document, "Sales").unwrap();
        assert_eq!(outcome, ViewerOutcome::Created(viewer.clone()));

        let html = std::fs::read_to_string(&viewer).unwrap();
        assert!(html.contains("data-url=\"../out/sales.json\""));
        let entries: Vec<_> = std::fs::read_dir(viewer.parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }
}

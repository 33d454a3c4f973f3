use crate::types::{Attribute, Person, Roster};
use base64::Engine as _;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/120?text=No+Image";

const EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".PNG", ".JPG", ".JPEG"];
const HANDLE_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Where a person's picture comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// `http(s)://` or `data:` reference used as is
    Remote(String),
    /// Local file embedded as a data URL
    Embedded { path: PathBuf, data_url: String },
    /// Nothing found; the placeholder is shown
    Missing { reference: String },
}

impl ImageRef {
    pub fn url(&self) -> &str {
        match self {
            Self::Remote(url) => url,
            Self::Embedded { data_url, .. } => data_url,
            Self::Missing { .. } => PLACEHOLDER_IMAGE_URL,
        }
    }
}

/// Resolved pictures for a roster plus the misses
#[derive(Debug, Clone, Default)]
pub struct ImageReport {
    pub images: BTreeMap<String, ImageRef>,
    /// `name → reference` lines, sorted
    pub missing: Vec<String>,
}

impl ImageReport {
    pub fn url_for(&self, handle: &str) -> Option<&str> {
        self.images.get(handle).map(ImageRef::url)
    }
}

/// Looks up person pictures in a directory
#[derive(Debug, Clone)]
pub struct ImageResolver {
    dir: PathBuf,
}

impl ImageResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File names tried for a person, in order
    pub fn candidates(&self, person: &Person) -> Vec<PathBuf> {
        let mut names = Vec::new();

        if let Some(reference) = person.value(Attribute::Image) {
            let (base, ext) = split_extension(reference);
            names.push(format!("{base}{ext}"));
            names.push(format!("{}{}", base.to_lowercase(), ext.to_lowercase()));
            for e in EXTENSIONS {
                names.push(format!("{base}{e}"));
                names.push(format!("{}{e}", base.to_lowercase()));
            }
        }

        if let Some(handle) = person.value(Attribute::Handle) {
            for e in HANDLE_EXTENSIONS {
                names.push(format!("{handle}{e}"));
                names.push(format!("{}{e}", handle.to_lowercase()));
            }
        }

        names.into_iter().map(|name| self.dir.join(name)).collect()
    }

    pub fn resolve(&self, person: &Person) -> ImageRef {
        let reference = person.value(Attribute::Image).unwrap_or("").to_string();
        if ["http://", "https://", "data:"]
            .iter()
            .any(|prefix| reference.starts_with(prefix))
        {
            return ImageRef::Remote(reference);
        }

        for path in self.candidates(person) {
            if !path.is_file() {
                continue;
            }
            match to_data_url(&path) {
                Ok(data_url) => return ImageRef::Embedded { path, data_url },
                Err(err) => log::warn!("Failed to read image {}: {err}", path.display()),
            }
        }

        ImageRef::Missing { reference }
    }

    pub fn resolve_all(&self, roster: &Roster) -> ImageReport {
        let mut report = ImageReport::default();
        for person in roster.people() {
            let image = self.resolve(person);
            if let ImageRef::Missing { reference } = &image {
                report.missing.push(format!("{} → {reference}", person.name()));
            }
            report.images.insert(person.handle.clone(), image);
        }
        report.missing.sort();
        if !report.missing.is_empty() {
            log::warn!(
                "{} people have no image in {}",
                report.missing.len(),
                self.dir.display()
            );
        }
        report
    }
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    }
}

fn to_data_url(path: &Path) -> std::io::Result<String> {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    let mime = if is_png { "image/png" } else { "image/jpeg" };
    let bytes = fs::read(path)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn person(handle: &str, image: &str) -> Person {
        Person::with_values(1, handle, [(Attribute::Name, "Ann"), (Attribute::Image, image)])
    }

    #[test]
    fn remote_references_pass_through() {
        let resolver = ImageResolver::new("/nonexistent");
        let image = resolver.resolve(&person("ann", "https://example.com/a.png"));
        assert_eq!(image, ImageRef::Remote("https://example.com/a.png".to_string()));
    }

    #[test]
    fn finds_lowercased_file_with_other_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("ann.jpg"), b"\xff\xd8jpeg").unwrap();
        let resolver = ImageResolver::new(dir.path());

        let image = resolver.resolve(&person("x", "Ann.png"));
        match image {
            ImageRef::Embedded { path, data_url } => {
                assert!(path.to_string_lossy().to_lowercase().ends_with("ann.jpg"));
                assert!(data_url.starts_with("data:image/jpeg;base64,"));
            }
            other => panic!("expected embedded image, got {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_handle_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("ann.k.png"), b"png").unwrap();
        let resolver = ImageResolver::new(dir.path());
        let image = resolver.resolve(&person("ann.k", ""));
        assert!(image.url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn misses_are_reported_with_placeholder() {
        let dir = tempdir().unwrap();
        let resolver = ImageResolver::new(dir.path());
        let roster = Roster::new(vec![Attribute::Name], vec![person("ann", "ann.png")]).unwrap();
        let report = resolver.resolve_all(&roster);
        assert_eq!(report.missing, vec!["Ann → ann.png".to_string()]);
        assert_eq!(report.url_for("ann"), Some(PLACEHOLDER_IMAGE_URL));
    }
}

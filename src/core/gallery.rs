//! Colección de obras mostrada en la página y en el lightbox.
//!
//! La colección se construye una sola vez, a partir de `gallery.toml` si la
//! carpeta lo tiene o, en su defecto, escaneando las imágenes de la carpeta.

use crate::config::config::MANIFEST_FILE;
use crate::core::error::Result;
use crate::core::file_manager::FileManager;
use crate::i18n::en::TEXT_UNTITLED;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Una obra de la galería. Inmutable tras construirse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    image: PathBuf,
    title: String,
    material: String,
    year: String,
}

impl GalleryItem {
    /// Un título vacío se sustituye por "Untitled".
    pub fn new(
        image: impl Into<PathBuf>,
        title: impl Into<String>,
        material: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            TEXT_UNTITLED.to_string()
        } else {
            title
        };

        Self {
            image: image.into(),
            title,
            material: material.into(),
            year: year.into(),
        }
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn year(&self) -> &str {
        &self.year
    }
}

/// Secuencia ordenada y compartida de obras.
#[derive(Debug, Clone)]
pub struct GalleryCollection {
    items: Arc<[GalleryItem]>,
}

impl Default for GalleryCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl GalleryCollection {
    pub fn new(items: Vec<GalleryItem>) -> Self {
        Self {
            items: Arc::from(items),
        }
    }

    /// Carga la galería de una carpeta: manifiesto si existe, si no escaneo.
    pub fn load(dir: &Path) -> Result<Self> {
        let manifest = dir.join(MANIFEST_FILE);
        if manifest.is_file() {
            let content = fs::read_to_string(&manifest)?;
            let collection = Self::from_manifest(&content, dir)?;
            tracing::info!(
                manifest = %manifest.display(),
                items = collection.len(),
                "gallery loaded from manifest"
            );
            return Ok(collection);
        }

        let paths = FileManager::scan_directory(dir)?;
        let collection = Self::from_paths(paths);
        tracing::info!(
            dir = %dir.display(),
            items = collection.len(),
            "gallery loaded from folder scan"
        );
        Ok(collection)
    }

    /// Las rutas relativas del manifiesto se resuelven contra `base_dir`.
    pub fn from_manifest(content: &str, base_dir: &Path) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        let items = manifest
            .items
            .into_iter()
            .map(|entry| {
                let image = if entry.image.is_absolute() {
                    entry.image
                } else {
                    base_dir.join(entry.image)
                };
                GalleryItem::new(
                    image,
                    entry.title.unwrap_or_default(),
                    entry.material.unwrap_or_default(),
                    entry.year.map(YearField::into_string).unwrap_or_default(),
                )
            })
            .collect();
        Ok(Self::new(items))
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        let items = paths
            .into_iter()
            .map(|path| {
                let title = FileManager::title_from_path(&path);
                GalleryItem::new(path, title, "", "")
            })
            .collect();
        Self::new(items)
    }

    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GalleryItem> {
        self.items.iter()
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    items: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    image: PathBuf,
    title: Option<String>,
    material: Option<String>,
    year: Option<YearField>,
}

// `year = 2021` y `year = "c. 1990"` son ambos válidos.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YearField {
    Number(i64),
    Text(String),
}

impl YearField {
    fn into_string(self) -> String {
        match self {
            YearField::Number(n) => n.to_string(),
            YearField::Text(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    const MANIFEST: &str = r#"
[[items]]
image = "torso.jpg"
title = "Torso"
material = "Carrara marble"
year = 2019

[[items]]
image = "/abs/wave.png"
material = "Bronze"
year = "c. 2021"
"#;

    #[test]
    fn manifest_keeps_order_and_defaults() {
        let gallery = GalleryCollection::from_manifest(MANIFEST, Path::new("/art")).unwrap();
        assert_eq!(gallery.len(), 2);

        let first = gallery.get(0).unwrap();
        assert_eq!(first.image(), Path::new("/art/torso.jpg"));
        assert_eq!(first.title(), "Torso");
        assert_eq!(first.year(), "2019");

        let second = gallery.get(1).unwrap();
        assert_eq!(second.image(), Path::new("/abs/wave.png"));
        assert_eq!(second.title(), TEXT_UNTITLED);
        assert_eq!(second.year(), "c. 2021");
    }

    #[test]
    fn invalid_manifest_is_an_error() {
        let result = GalleryCollection::from_manifest("[[items]]\ntitle = 3", Path::new("."));
        assert!(result.is_err());
    }

    #[test]
    fn empty_manifest_gives_empty_gallery() {
        let gallery = GalleryCollection::from_manifest("", Path::new(".")).unwrap();
        assert!(gallery.is_empty());
    }

    #[test]
    fn load_prefers_manifest_over_scan() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.jpg")).unwrap();
        File::create(dir.path().join("b.jpg")).unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            "[[items]]\nimage = \"b.jpg\"\ntitle = \"Only one\"\n",
        )
        .unwrap();

        let gallery = GalleryCollection::load(dir.path()).unwrap();
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery.get(0).unwrap().title(), "Only one");
    }

    #[test]
    fn load_falls_back_to_folder_scan() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("b_reclining_figure.png")).unwrap();
        File::create(dir.path().join("a-head.jpg")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();

        let gallery = GalleryCollection::load(dir.path()).unwrap();
        let titles: Vec<_> = gallery.iter().map(GalleryItem::title).collect();
        assert_eq!(titles, vec!["a head", "b reclining figure"]);
    }

    #[test]
    fn blank_title_becomes_untitled() {
        let item = GalleryItem::new("x.jpg", "   ", "", "");
        assert_eq!(item.title(), TEXT_UNTITLED);
    }
}

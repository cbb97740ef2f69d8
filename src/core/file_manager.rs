use crate::core::image_format::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileManager;

impl FileManager {
    pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
        let mut image_paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && ImageFormat::is_supported(p))
            .collect();

        image_paths.sort();
        Ok(image_paths)
    }

    /// "b_reclining-figure.png" -> "b reclining figure"
    pub fn title_from_path(path: &Path) -> String {
        path.file_stem()
            .map(|stem| {
                stem.to_string_lossy()
                    .replace(['_', '-'], " ")
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }
}

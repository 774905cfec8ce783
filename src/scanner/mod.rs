//! 画像入力モジュール
//!
//! トレー写真（JPEG/PNG）を読み込んでデコードし、
//! 検出器に渡すための情報をまとめる。

use crate::error::{Result, TrayPriceError};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// デコード済みのトレー写真
#[derive(Debug, Clone)]
pub struct TrayImage {
    pub path: PathBuf,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// 画像ファイル候補（未デコード）
#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Check if a file extension is a supported image format
pub fn is_image_extension(ext: &str) -> bool {
    let lower = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&lower.as_str())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// 画像を読み込んでデコード
pub fn load_tray_image(path: &Path) -> Result<TrayImage> {
    if !path.is_file() {
        return Err(TrayPriceError::FileNotFound(path.display().to_string()));
    }

    let supported = path
        .extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false);
    if !supported {
        return Err(TrayPriceError::UnsupportedImage(path.display().to_string()));
    }

    let decoded = image::open(path)
        .map_err(|e| TrayPriceError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    debug!(
        path = %path.display(),
        width = decoded.width(),
        height = decoded.height(),
        "decoded tray image"
    );

    Ok(TrayImage {
        path: path.to_path_buf(),
        file_name: file_name_of(path),
        width: decoded.width(),
        height: decoded.height(),
    })
}

/// フォルダ直下の画像を列挙（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(TrayPriceError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            if is_image_extension(&ext.to_string_lossy()) {
                images.push(ImageInfo {
                    path: path.to_path_buf(),
                    file_name: file_name_of(path),
                });
            }
        }
    }

    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("jpeg"));
        assert!(is_image_extension("png"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("gif"));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(TrayPriceError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_with_images() {
        let dir = tempdir().unwrap();

        File::create(dir.path().join("b.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("a.PNG")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("menu.txt")).unwrap().write_all(b"text").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("c.jpg")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].file_name, "a.PNG");
        assert_eq!(result[1].file_name, "b.jpg");
    }

    #[test]
    fn test_load_tray_image_decodes_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tray.png");
        image::RgbImage::new(8, 6).save(&path).unwrap();

        let img = load_tray_image(&path).unwrap();
        assert_eq!(img.file_name, "tray.png");
        assert_eq!((img.width, img.height), (8, 6));
    }

    #[test]
    fn test_load_tray_image_rejects_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tray.gif");
        fs::write(&path, b"GIF89a").unwrap();

        assert!(matches!(
            load_tray_image(&path),
            Err(TrayPriceError::UnsupportedImage(_))
        ));
    }

    #[test]
    fn test_load_tray_image_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        fs::write(&path, b"not really a jpeg").unwrap();

        assert!(matches!(load_tray_image(&path), Err(TrayPriceError::ImageLoad(_))));
    }

    #[test]
    fn test_load_tray_image_missing() {
        assert!(matches!(
            load_tray_image(Path::new("/nonexistent/tray.jpg")),
            Err(TrayPriceError::FileNotFound(_))
        ));
    }
}

//! 検出結果キャッシュモジュール
//!
//! 画像のSHA-256ハッシュをキーにして検出ラベルをキャッシュし、
//! 同じ画像の再検出をスキップする。エントリには検出したモデルの
//! 重みハッシュを記録し、モデルが変わったら使わない。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use tracing::warn;

const CACHE_FILE_NAME: &str = ".tray-detect-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionCache {
    /// バージョン（互換性チェック用）
    version: u32,
    /// ファイルハッシュ → 検出結果のマップ
    entries: HashMap<String, CacheEntry>,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// 検出に使ったモデルの重みハッシュ
    pub model: String,
    pub file_name: String,
    pub file_size: u64,
    /// 検出ラベル（名前順）
    pub labels: Vec<String>,
}

impl DetectionCache {
    const CURRENT_VERSION: u32 = 2;

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み（無い・壊れている場合は空）
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        match serde_json::from_reader::<_, DetectionCache>(BufReader::new(file)) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(_) => {
                warn!(path = %cache_path.display(), "cache version mismatch, rebuilding");
                Self::default()
            }
            Err(e) => {
                warn!(path = %cache_path.display(), error = %e, "cache unreadable, rebuilding");
                Self::default()
            }
        }
    }

    pub fn save(&self, folder: &Path) -> Result<()> {
        let file = File::create(Self::cache_path(folder))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// 削除（存在した場合true）
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// 同じモデルで検出した結果のみ返す
    pub fn get(&self, hash: &str, model: &str) -> Option<&[String]> {
        self.entries
            .get(hash)
            .filter(|e| e.model == model)
            .map(|e| e.labels.as_slice())
    }

    pub fn insert(
        &mut self,
        hash: String,
        model: String,
        file_name: String,
        file_size: u64,
        labels: Vec<String>,
    ) {
        self.entries.insert(hash, CacheEntry {
            model,
            file_name,
            file_size,
            labels,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DetectionCache {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// 画像ファイルのSHA-256（16進）
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

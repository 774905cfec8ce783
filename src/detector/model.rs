//! モデルハンドル
//!
//! 重みファイルと検出器コマンドをまとめたもの。
//! プロセス内で一度だけロードし、以後は共有参照を返す。

use super::cache::compute_file_hash;
use crate::config::Config;
use crate::error::{Result, TrayPriceError};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

static SHARED_MODEL: OnceLock<ModelHandle> = OnceLock::new();

/// ロード済みモデル
#[derive(Debug, Clone)]
pub struct ModelHandle {
    weights: PathBuf,
    /// 重みファイルのSHA-256（検出キャッシュのキー）
    fingerprint: String,
    command: String,
    args: Vec<String>,
}

impl ModelHandle {
    /// 設定からロード
    ///
    /// 重みファイルが存在しない・空の場合は `ModelLoad`。
    pub fn load(config: &Config) -> Result<Self> {
        let weights = &config.model_path;

        let meta = std::fs::metadata(weights)
            .map_err(|e| TrayPriceError::ModelLoad(format!("{}: {}", weights.display(), e)))?;
        if !meta.is_file() {
            return Err(TrayPriceError::ModelLoad(format!(
                "{} bukan file",
                weights.display()
            )));
        }
        if meta.len() == 0 {
            return Err(TrayPriceError::ModelLoad(format!(
                "{} kosong",
                weights.display()
            )));
        }
        if config.detector_command.trim().is_empty() {
            return Err(TrayPriceError::ModelLoad("detector_command kosong".into()));
        }

        let fingerprint = compute_file_hash(weights)
            .map_err(|e| TrayPriceError::ModelLoad(format!("{}: {}", weights.display(), e)))?;

        info!(weights = %weights.display(), command = %config.detector_command, "model loaded");

        Ok(Self {
            weights: weights.clone(),
            fingerprint,
            command: config.detector_command.clone(),
            args: config.detector_args.clone(),
        })
    }

    pub fn weights(&self) -> &Path {
        &self.weights
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// `{model}` / `{image}` を置換した引数
    ///
    /// `{image}` を含まない場合は末尾に画像パスを付ける。
    pub fn args_for(&self, image: &Path) -> Vec<String> {
        let model = self.weights.display().to_string();
        let image_str = image.display().to_string();

        let mut has_image = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains("{image}") {
                    has_image = true;
                }
                arg.replace("{model}", &model).replace("{image}", &image_str)
            })
            .collect();

        if !has_image {
            args.push(image_str);
        }
        args
    }
}

/// プロセス共有のモデルを取得（初回のみロード）
///
/// 同時に初回ロードが走った場合は先に登録された方を使い、他は捨てる。
/// 一度登録されたハンドルは設定が変わっても差し替えない。
pub fn load_shared(config: &Config) -> Result<&'static ModelHandle> {
    if let Some(handle) = SHARED_MODEL.get() {
        return Ok(handle);
    }
    let handle = ModelHandle::load(config)?;
    Ok(SHARED_MODEL.get_or_init(|| handle))
}

/// ロード済みなら共有モデル
pub fn shared() -> Option<&'static ModelHandle> {
    SHARED_MODEL.get()
}

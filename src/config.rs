use crate::error::{Result, TrayPriceError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// パスワードを上書きする環境変数
pub const PASSWORD_ENV: &str = "TRAY_PRICE_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 学習済みモデルの重みファイル
    pub model_path: PathBuf,
    /// 検出器の実行コマンド
    pub detector_command: String,
    /// 検出器の引数（`{model}` と `{image}` を置換）
    pub detector_args: Vec<String>,
    /// アクセス用パスワード
    pub access_password: Option<String>,
    /// 常にパスワードを要求する
    pub require_password: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TrayPriceError::Config("Direktori home tidak ditemukan".into()))?;
        Ok(home.join(".config").join("tray-price").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            model_path: PathBuf::from("best.pt"),
            detector_command: "python3".into(),
            detector_args: vec![
                "scripts/yolo_detect.py".into(),
                "{model}".into(),
                "{image}".into(),
            ],
            access_password: None,
            require_password: false,
        }
    }

    /// シークレットストアからパスワードを取得（環境変数を優先）
    pub fn access_secret(&self) -> Result<String> {
        if let Ok(secret) = std::env::var(PASSWORD_ENV) {
            if !secret.is_empty() {
                return Ok(secret);
            }
        }

        self.access_password
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or(TrayPriceError::MissingSecret)
    }

    pub fn set_password(&mut self, password: String) -> Result<()> {
        self.access_password = Some(password);
        self.save()
    }

    pub fn set_model_path(&mut self, path: PathBuf) -> Result<()> {
        self.model_path = path;
        self.save()
    }

    pub fn set_require_password(&mut self, required: bool) -> Result<()> {
        self.require_password = required;
        self.save()
    }
}

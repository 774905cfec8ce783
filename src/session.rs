//! セッションコンテキスト
//!
//! 1回のコマンド実行で共有する状態。グローバル変数は使わず、
//! 各コマンドの実行関数へ明示的に渡す。

use crate::config::Config;
use crate::error::{Result, TrayPriceError};
use crate::gate::AccessGate;

#[derive(Debug, Clone)]
pub struct Session {
    gate: Option<AccessGate>,
    pub verbose: bool,
}

impl Session {
    /// ゲートなし
    pub fn open(verbose: bool) -> Self {
        Self { gate: None, verbose }
    }

    /// ゲートあり（未認証で開始）
    pub fn gated(secret: impl Into<String>, verbose: bool) -> Self {
        Self {
            gate: Some(AccessGate::new(secret)),
            verbose,
        }
    }

    /// 設定とフラグからセッションを作る
    ///
    /// ゲートが必要なのにパスワード未設定なら `MissingSecret`。
    pub fn from_config(config: &Config, force_gate: bool, verbose: bool) -> Result<Self> {
        if force_gate || config.require_password {
            let secret = config.access_secret()?;
            Ok(Self::gated(secret, verbose))
        } else {
            Ok(Self::open(verbose))
        }
    }

    /// 設定変更用のセッション
    ///
    /// パスワードが設定済みなら、フラグに関係なくゲートを通す。
    /// 未設定（初回セットアップ）ならゲートなし。
    pub fn for_config_change(config: &Config, verbose: bool) -> Self {
        match config.access_secret() {
            Ok(secret) => Self::gated(secret, verbose),
            Err(_) => Self::open(verbose),
        }
    }

    pub fn requires_auth(&self) -> bool {
        self.gate.is_some()
    }

    pub fn is_authorized(&self) -> bool {
        self.gate.as_ref().map(|g| g.is_open()).unwrap_or(true)
    }

    /// 資格情報を提出（ゲートなしなら常に成功）
    pub fn authenticate(&mut self, credential: &str) -> Result<()> {
        match self.gate.as_mut() {
            Some(gate) => gate.submit(credential).map(|_| ()),
            None => Ok(()),
        }
    }

    /// 認可済みでなければエラー
    pub fn ensure_authorized(&self) -> Result<()> {
        if self.is_authorized() {
            Ok(())
        } else {
            Err(TrayPriceError::InvalidCredential)
        }
    }
}

//! アクセスゲート
//!
//! 入力された文字列を設定済みパスワードと平文比較するだけの簡易ゲート。
//! ロックアウト・回数制限・ハッシュ化は行わない。

use crate::error::{Result, TrayPriceError};
use tracing::{info, warn};

/// ゲート状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// 初期状態
    Unauthenticated,
    /// 認証済み（セッション終了まで戻らない）
    Authenticated,
}

#[derive(Debug, Clone)]
pub struct AccessGate {
    secret: String,
    state: GateState,
}

impl AccessGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            state: GateState::Unauthenticated,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == GateState::Authenticated
    }

    /// 資格情報を提出
    ///
    /// 一致すれば `Authenticated` へ遷移。不一致なら状態はそのままで `InvalidCredential`。
    /// 認証済みの場合は何もしない。
    pub fn submit(&mut self, credential: &str) -> Result<GateState> {
        if self.is_open() {
            return Ok(self.state);
        }

        if credential == self.secret {
            self.state = GateState::Authenticated;
            info!("access gate opened");
            Ok(self.state)
        } else {
            warn!("access gate rejected credential");
            Err(TrayPriceError::InvalidCredential)
        }
    }
}

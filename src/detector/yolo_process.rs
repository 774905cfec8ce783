//! 外部検出プロセス連携
//!
//! 学習済みYOLOモデルを外部コマンドとして実行し、
//! 標準出力のJSON（Ultralytics `Results.to_json()` 形式）を読む。

use super::model::ModelHandle;
use super::Detector;
use crate::error::{Result, TrayPriceError};
use crate::scanner::TrayImage;
use tokio::process::Command;
use tracing::{debug, warn};
use tray_price_common::{parse_detections, Detection};

/// 外部プロセスで検出する検出器
pub struct YoloProcessDetector<'a> {
    model: &'a ModelHandle,
}

impl<'a> YoloProcessDetector<'a> {
    pub fn new(model: &'a ModelHandle) -> Self {
        Self { model }
    }
}

impl Detector for YoloProcessDetector<'_> {
    async fn detect(&self, image: &TrayImage) -> Result<Vec<Detection>> {
        let args = self.model.args_for(&image.path);
        debug!(command = %self.model.command(), ?args, "running detector");

        let output = Command::new(self.model.command())
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                TrayPriceError::Detection(format!("{} gagal dijalankan: {}", self.model.command(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(code = ?output.status.code(), "detector exited with failure");
            return Err(TrayPriceError::Detection(format!(
                "detektor gagal (code {:?}): {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let detections = parse_detections(&stdout)
            .map_err(|e| TrayPriceError::DetectorParse(e.to_string()))?;
        debug!(count = detections.len(), "detector finished");

        Ok(detections)
    }
}

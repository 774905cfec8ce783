//! 物体検出アダプタ
//!
//! 外部の学習済み検出器を呼び出し、検出ラベルの集合にまとめる。
//! 信頼度・矩形・件数は捨てる。

pub mod cache;
pub mod model;
mod yolo_process;

pub use cache::DetectionCache;
pub use model::ModelHandle;
pub use yolo_process::YoloProcessDetector;

use crate::error::Result;
use crate::scanner::TrayImage;
use std::collections::BTreeSet;
use tracing::debug;
use tray_price_common::{collect_labels, Detection};

/// 検出器
#[allow(async_fn_in_trait)]
pub trait Detector {
    /// 画像1枚を検出し、生の検出結果を返す
    async fn detect(&self, image: &TrayImage) -> Result<Vec<Detection>>;
}

/// 検出してラベル集合を返す
pub async fn detect_labels<D: Detector>(detector: &D, image: &TrayImage) -> Result<BTreeSet<String>> {
    let detections = detector.detect(image).await?;
    let labels = collect_labels(&detections);
    debug!(
        image = %image.file_name,
        detections = detections.len(),
        labels = labels.len(),
        "collapsed detections into labels"
    );
    Ok(labels)
}

/// キャッシュを使って検出
///
/// 同じモデル（`model_key`）の結果がキャッシュにあれば検出器を呼ばない。
/// 新しい結果はキャッシュに追加する（保存は呼び出し側）。
pub async fn detect_labels_with_cache<D: Detector>(
    detector: &D,
    image: &TrayImage,
    model_key: &str,
    cache: &mut DetectionCache,
) -> Result<BTreeSet<String>> {
    let hash = match cache::compute_file_hash(&image.path) {
        Ok(h) => h,
        Err(e) => {
            debug!(image = %image.file_name, error = %e, "hash failed, skipping cache");
            return detect_labels(detector, image).await;
        }
    };

    if let Some(labels) = cache.get(&hash, model_key) {
        debug!(image = %image.file_name, "detection cache hit");
        return Ok(labels.iter().cloned().collect());
    }

    let labels = detect_labels(detector, image).await?;
    let file_size = std::fs::metadata(&image.path).map(|m| m.len()).unwrap_or(0);
    cache.insert(
        hash,
        model_key.to_string(),
        image.file_name.clone(),
        file_size,
        labels.iter().cloned().collect(),
    );
    Ok(labels)
}

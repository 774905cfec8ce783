//! 検出器出力パーサー
//!
//! 外部の物体検出プロセスの標準出力からJSONを抽出し、
//! 検出結果（ラベル・信頼度・矩形）をパースする。

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 検出矩形（ピクセル座標）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// 検出1件
///
/// Ultralytics `Results.to_json()` の1要素と同じ形。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Detection {
    #[serde(alias = "label")]
    pub name: String,
    #[serde(rename = "class")]
    pub class_id: Option<u32>,
    pub confidence: f32,
    #[serde(rename = "box")]
    pub bbox: Option<BoundingBox>,
}

impl Detection {
    pub fn labeled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// 出力からJSON配列部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 検出結果の配列としてパースできる最初の `[` 位置（`[INFO]` などのログ行は飛ばす）
/// 3. 最初の `[` から最後の `]` まで
///
/// # Examples
/// ```
/// use tray_price_common::extract_json;
///
/// let stdout = "loading best.pt\n[{\"name\": \"ayam\"}]";
/// assert_eq!(extract_json(stdout).unwrap(), "[{\"name\": \"ayam\"}]");
/// ```
pub fn extract_json(output: &str) -> Result<&str> {
    if let Some(start_marker) = output.find("```json") {
        let start = start_marker + 7;
        if let Some(end_offset) = output[start..].find("```") {
            let end = start + end_offset;
            return Ok(output[start..end].trim());
        }
    }

    for (start, _) in output.match_indices('[') {
        let mut stream =
            serde_json::Deserializer::from_str(&output[start..]).into_iter::<Vec<Detection>>();
        if let Some(Ok(_)) = stream.next() {
            return Ok(&output[start..start + stream.byte_offset()]);
        }
    }

    // パースエラーの内容を返せるよう、最大範囲を渡す
    if let Some(start) = output.find('[') {
        if let Some(end) = output.rfind(']') {
            if end >= start {
                return Ok(&output[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 検出器の標準出力をパース
pub fn parse_detections(output: &str) -> Result<Vec<Detection>> {
    let json_str = extract_json(output)?;
    let detections: Vec<Detection> = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("検出結果JSONパースエラー: {}", e)))?;
    Ok(detections)
}

/// ラベル表記を価格表のキー形式に揃える
///
/// 前後空白除去・小文字化・空白/ハイフンの連続を `_` に置換。
pub fn normalize_label(label: &str) -> String {
    lazy_static::lazy_static! {
        static ref SEPARATOR_RE: Regex = Regex::new(r"[\s\-]+").unwrap();
    }

    SEPARATOR_RE
        .replace_all(label.trim(), "_")
        .to_lowercase()
}

/// 検出結果からラベル集合を作る
///
/// 信頼度・矩形・件数は捨て、同じラベルは1つにまとめる。
pub fn collect_labels(detections: &[Detection]) -> BTreeSet<String> {
    detections
        .iter()
        .map(|d| normalize_label(&d.name))
        .filter(|label| !label.is_empty())
        .collect()
}

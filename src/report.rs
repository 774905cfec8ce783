//! 見積りレポート
//!
//! 検出・選択・集計・比較の結果をまとめ、端末表示用のテキストに整形する。

use crate::scanner::TrayImage;
use chrono::{DateTime, Local};
use serde::Serialize;
use tray_price_common::{
    classify, format_rupiah, Comparison, LabelSplit, PriceTable, Selection, Totals, TARGET_PRICE,
};

/// 画像の概要
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

impl From<&TrayImage> for ImageSummary {
    fn from(image: &TrayImage) -> Self {
        Self {
            file_name: image.file_name.clone(),
            width: image.width,
            height: image.height,
        }
    }
}

/// 見積り結果1件
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub image: Option<ImageSummary>,
    /// 自動検出された既知ラベル（検出を行わなかった場合None）
    pub detected: Option<Vec<String>>,
    /// 価格表にない検出ラベル
    pub unknown_labels: Vec<String>,
    /// 最終選択（価格表の定義順）
    pub selection: Vec<String>,
    /// 集計（選択が空ならNone）
    pub totals: Option<Totals>,
    pub comparison: Option<Comparison>,
    pub created_at: DateTime<Local>,
}

impl EstimateReport {
    pub fn build(
        image: Option<&TrayImage>,
        split: Option<&LabelSplit>,
        selection: &Selection,
        table: &PriceTable,
    ) -> Self {
        let totals = selection.totals(table);
        let comparison = totals.as_ref().map(|t| classify(t.total, t.target));

        Self {
            image: image.map(ImageSummary::from),
            detected: split.map(|s| s.known.clone()),
            unknown_labels: split.map(|s| s.unknown.clone()).unwrap_or_default(),
            selection: selection.ordered_names(table),
            totals,
            comparison,
            created_at: Local::now(),
        }
    }

    /// 表示するメッセージ
    pub fn notices(&self) -> Vec<Notice> {
        let mut notices: Vec<Notice> = self
            .detected
            .as_ref()
            .map(|known| detection_notice(known, &self.unknown_labels))
            .into_iter()
            .collect();
        notices.extend(self.review_notices());
        notices
    }

    /// 検出結果の通知を除いたメッセージ（対話修正の後に使う）
    pub fn review_notices(&self) -> Vec<Notice> {
        let mut notices = Vec::new();

        if !self.unknown_labels.is_empty() {
            notices.push(Notice::Warning(format!(
                "Label tidak dikenal (tidak dihitung): {}",
                self.unknown_labels.join(", ")
            )));
        }

        if self.totals.is_none() {
            notices.push(Notice::Warning(
                "Tidak ada makanan yang dipilih untuk dianalisis.".into(),
            ));
        }

        notices
    }

    /// 比較結果のメッセージ
    pub fn comparison_notice(&self) -> Option<Notice> {
        let totals = self.totals.as_ref()?;
        let comparison = self.comparison?;
        let total = format_rupiah(totals.total as i64);

        let notice = match comparison {
            Comparison::MoreExpensive { difference } => Notice::Error(format!(
                "{}. Estimasi harga ({}) lebih mahal {} dari target.",
                comparison.label(),
                total,
                format_rupiah(difference as i64)
            )),
            Comparison::OnTarget => Notice::Success(format!(
                "{}. Estimasi harga ({}) tepat sama dengan target harga.",
                comparison.label(),
                total
            )),
            Comparison::Cheaper { difference } => Notice::Success(format!(
                "{}. Estimasi harga ({}) lebih murah {} dari target.",
                comparison.label(),
                total,
                format_rupiah(difference as i64)
            )),
        };
        Some(notice)
    }
}

/// 表示メッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Success(msg) => write!(f, "✔ {}", msg),
            Notice::Info(msg) => write!(f, "ℹ {}", msg),
            Notice::Warning(msg) => write!(f, "⚠ {}", msg),
            Notice::Error(msg) => write!(f, "✖ {}", msg),
        }
    }
}

/// 検出結果の通知
///
/// 価格表にないラベルも「検出された」として扱う。何も検出されなかった場合だけ Info。
pub fn detection_notice(known: &[String], unknown: &[String]) -> Notice {
    if known.is_empty() && unknown.is_empty() {
        return Notice::Info(
            "Model tidak mendeteksi item apapun. Silakan tambahkan secara manual.".into(),
        );
    }

    let labels: Vec<&str> = known.iter().chain(unknown).map(String::as_str).collect();
    Notice::Success(format!("Otomatis terdeteksi: {}", labels.join(", ")))
}

/// 明細テーブル
pub fn render_items_table(items: &[tray_price_common::PriceEntry]) -> String {
    let width = items
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0)
        .max("nama_makanan".len());

    let mut out = String::new();
    out.push_str(&format!("  {:<width$}  {:>17}\n", "nama_makanan", "estimasi_harga_rp", width = width));
    for item in items {
        out.push_str(&format!("  {:<width$}  {:>17}\n", item.name, item.price, width = width));
    }
    out
}

/// 端末表示用テキスト
pub fn render(report: &EstimateReport) -> String {
    render_with_notices(report, &report.notices())
}

/// 対話修正の後の表示（検出結果の通知は修正前に出しているので省く）
pub fn render_reviewed(report: &EstimateReport) -> String {
    render_with_notices(report, &report.review_notices())
}

fn render_with_notices(report: &EstimateReport, notices: &[Notice]) -> String {
    let mut out = String::new();

    if let Some(image) = &report.image {
        out.push_str(&format!(
            "🖼  {} ({}x{})\n\n",
            image.file_name, image.width, image.height
        ));
    }

    for notice in notices {
        out.push_str(&format!("{}\n", notice));
    }

    if let Some(totals) = &report.totals {
        out.push_str("\n📊 Estimasi Total Harga Porsi\n");
        out.push_str(&render_items_table(&totals.items));
        out.push_str(&format!(
            "\n  Total Estimasi Harga: {}\n",
            format_rupiah(totals.total as i64)
        ));

        out.push_str(&format!(
            "\n📈 Perbandingan dengan Target Harga ({})\n",
            format_rupiah(TARGET_PRICE as i64)
        ));
        if let Some(notice) = report.comparison_notice() {
            out.push_str(&format!("  {}\n", notice));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tray_price_common::split_labels;

    fn report_for(labels: &[&str]) -> EstimateReport {
        let table = PriceTable::standard();
        let labels: BTreeSet<String> = labels.iter().map(|s| s.to_string()).collect();
        let split = split_labels(&labels, table);
        let selection = Selection::from_detected(&split);
        EstimateReport::build(None, Some(&split), &selection, table)
    }

    #[test]
    fn test_report_cheaper() {
        let report = report_for(&["nasi_putih", "ayam"]);
        assert_eq!(report.totals.as_ref().unwrap().total, 6500);
        assert_eq!(report.comparison, Some(Comparison::Cheaper { difference: 3500 }));

        let notice = report.comparison_notice().unwrap();
        assert_eq!(
            notice,
            Notice::Success(
                "Lebih Murah. Estimasi harga (Rp 6,500) lebih murah Rp 3,500 dari target.".into()
            )
        );
    }

    #[test]
    fn test_report_more_expensive() {
        let report = report_for(&["burger", "nasi_kuning", "nasi_liwet"]);
        match report.comparison_notice().unwrap() {
            Notice::Error(msg) => {
                assert!(msg.starts_with("Lebih Mahal."));
                assert!(msg.contains("Rp 11,000"));
                assert!(msg.contains("Rp 1,000"));
            }
            other => panic!("unexpected notice: {:?}", other),
        }
    }

    #[test]
    fn test_report_on_target() {
        // 6000 + 4000 を持つ価格表で一致ケースを作る
        let table = PriceTable::from_pairs(&[("nasi_box", 6000), ("ayam", 4000)]);
        let selection = Selection::from_names(&table, ["nasi_box", "ayam"]).unwrap();
        let report = EstimateReport::build(None, None, &selection, &table);

        assert_eq!(report.comparison, Some(Comparison::OnTarget));
        assert!(matches!(report.comparison_notice(), Some(Notice::Success(msg)) if msg.contains("tepat sama")));
    }

    #[test]
    fn test_report_no_detection() {
        let report = report_for(&[]);
        let notices = report.notices();
        assert!(notices.iter().any(|n| matches!(n, Notice::Info(_))));
        assert!(notices.iter().any(|n| matches!(n, Notice::Warning(m) if m.contains("Tidak ada makanan"))));
        assert!(report.totals.is_none());
        assert!(report.comparison_notice().is_none());
    }

    #[test]
    fn test_report_unknown_labels_warned() {
        let report = report_for(&["ayam", "rendang"]);
        assert_eq!(report.unknown_labels, vec!["rendang"]);
        assert!(report
            .notices()
            .iter()
            .any(|n| matches!(n, Notice::Warning(m) if m.contains("rendang"))));
        assert_eq!(report.selection, vec!["ayam"]);
    }

    #[test]
    fn test_report_only_unknown_labels_counts_as_detected() {
        let report = report_for(&["rendang"]);
        let notices = report.notices();

        assert!(!notices.iter().any(|n| matches!(n, Notice::Info(_))));
        assert!(notices
            .iter()
            .any(|n| matches!(n, Notice::Success(m) if m == "Otomatis terdeteksi: rendang")));
        assert!(notices.iter().any(|n| matches!(n, Notice::Warning(m) if m.contains("rendang"))));
        assert!(report.totals.is_none());

        let text = render(&report);
        assert!(!text.contains("tidak mendeteksi"));
    }

    #[test]
    fn test_detection_notice_lists_all_labels() {
        let known = vec!["ayam".to_string()];
        let unknown = vec!["rendang".to_string()];
        assert_eq!(
            detection_notice(&known, &unknown),
            Notice::Success("Otomatis terdeteksi: ayam, rendang".into())
        );
        assert!(matches!(detection_notice(&[], &[]), Notice::Info(_)));
    }

    #[test]
    fn test_render_reviewed_omits_detection_notice() {
        let report = report_for(&["nasi_putih", "ayam"]);
        assert_eq!(render(&report).matches("Otomatis terdeteksi").count(), 1);

        let reviewed = render_reviewed(&report);
        assert!(!reviewed.contains("Otomatis terdeteksi"));
        assert!(reviewed.contains("Total Estimasi Harga: Rp 6,500"));
    }

    #[test]
    fn test_manual_quote_has_no_detection_notice() {
        let table = PriceTable::standard();
        let selection = Selection::from_names(table, ["susu"]).unwrap();
        let report = EstimateReport::build(None, None, &selection, table);
        assert!(report.notices().is_empty());
    }

    #[test]
    fn test_render_contains_table_and_total() {
        let text = render(&report_for(&["nasi_kuning", "ayam_kecap", "susu"]));
        assert!(text.contains("nasi_kuning"));
        assert!(text.contains("ayam_kecap"));
        assert!(text.contains("Total Estimasi Harga: Rp 9,500"));
        assert!(text.contains("Rp 10,000"));
        assert!(text.contains("lebih murah Rp 500"));
    }
}

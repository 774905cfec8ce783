//! 価格表モジュール
//!
//! 料理名 → 1人前の概算価格（IDR）の静的マスタ。
//! プロセス起動時に一度だけ構築し、以後は変更しない。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 価格表の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// 料理名（検出ラベルと同じ表記）
    pub name: String,
    /// 概算価格（IDR）
    pub price: u64,
}

impl PriceEntry {
    pub fn new(name: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// 地域（Banjarbaru）での1人前概算価格
const STANDARD_PRICES: &[(&str, u64)] = &[
    ("nasi_putih", 2500),          // 1人前
    ("ayam", 4000),                // おかず1切れ
    ("nasi_kuning", 3000),
    ("nasi_liwet", 3000),
    ("buah_jeruk", 1500),          // 1個
    ("buah_melon", 1000),          // 1切れ
    ("buah_pisang", 1000),
    ("buah_duku", 1500),           // 小皿
    ("sayur_capcay", 2000),
    ("sayur_wortel_kacang", 1500),
    ("sayur", 1500),               // 野菜一般
    ("wortel", 500),               // 付け合わせ
    ("susu", 2500),                // 小パック
    ("tahu", 1000),
    ("tempe", 1000),
    ("tempe_bacem", 1500),
    ("ayam_kecap", 4000),
    ("buah_semangka", 1000),
    ("buah_kelengkeng", 1500),     // 3粒程度
    ("mie_goreng", 2000),          // 付け合わせ量
    ("daging_slice", 4500),
    ("burger", 5000),              // ミニバーガー
    ("lontong_labu", 3500),
    ("sayur_gori", 1500),
    ("buah_rambutan", 1000),       // 2粒程度
];

lazy_static::lazy_static! {
    static ref STANDARD_TABLE: PriceTable = PriceTable::from_pairs(STANDARD_PRICES);
}

/// 価格表全体
///
/// 行の並びは定義順を保持する。集計結果の明細もこの順で返す。
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    entries: Vec<PriceEntry>,
    index: HashMap<String, usize>,
}

impl PriceTable {
    /// 組み込みの標準価格表
    pub fn standard() -> &'static PriceTable {
        &*STANDARD_TABLE
    }

    /// (名前, 価格) の組から構築
    ///
    /// 名前が重複した場合は先に出現した行を残す。
    pub fn from_pairs(pairs: &[(&str, u64)]) -> Self {
        let mut entries = Vec::with_capacity(pairs.len());
        let mut index = HashMap::with_capacity(pairs.len());

        for &(name, price) in pairs {
            if index.contains_key(name) {
                continue;
            }
            index.insert(name.to_string(), entries.len());
            entries.push(PriceEntry::new(name, price));
        }

        Self { entries, index }
    }

    /// 全行（定義順）
    pub fn entries(&self) -> &[PriceEntry] {
        &self.entries
    }

    /// 既知の料理名一覧（定義順）
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&PriceEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn price_of(&self, name: &str) -> Option<u64> {
        self.get(name).map(|e| e.price)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// 定義順での位置
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

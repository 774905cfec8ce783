//! 価格集計モジュール
//!
//! 選択された料理名の集合から明細と合計を求める。
//! 価格表にない名前は黙って除外する。

use crate::comparison::TARGET_PRICE;
use crate::price_table::{PriceEntry, PriceTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 集計結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// 明細（価格表の定義順）
    pub items: Vec<PriceEntry>,
    /// 合計（IDR）
    pub total: u64,
    /// 目標価格
    pub target: u64,
    /// total - target
    pub delta: i64,
}

impl Totals {
    /// 標準の目標価格で集計
    pub fn compute<'a, I>(table: &PriceTable, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::compute_with_target(table, names, TARGET_PRICE)
    }

    pub fn compute_with_target<'a, I>(table: &PriceTable, names: I, target: u64) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let (items, total) = lookup(table, names);
        Self {
            items,
            total,
            target,
            delta: total as i64 - target as i64,
        }
    }
}

/// 名前集合に該当する行と価格合計を返す
///
/// 同じ名前が複数回渡されても1回として数える。
pub fn lookup<'a, I>(table: &PriceTable, names: I) -> (Vec<PriceEntry>, u64)
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted: HashSet<&str> = names.into_iter().collect();

    let items: Vec<PriceEntry> = table
        .entries()
        .iter()
        .filter(|e| wanted.contains(e.name.as_str()))
        .cloned()
        .collect();
    let total = items.iter().map(|e| e.price).sum();

    (items, total)
}

/// 合計のみ
pub fn lookup_total<'a, I>(table: &PriceTable, names: I) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    lookup(table, names).1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static PriceTable {
        PriceTable::standard()
    }

    #[test]
    fn test_lookup_empty() {
        let (items, total) = lookup(table(), Vec::<&str>::new());
        assert!(items.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn test_lookup_nasi_putih_ayam() {
        assert_eq!(lookup_total(table(), ["nasi_putih", "ayam"]), 6500);
    }

    #[test]
    fn test_lookup_ignores_unknown_names() {
        let (items, total) = lookup(table(), ["ayam", "rendang", "sate"]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "ayam");
        assert_eq!(total, 4000);
    }

    #[test]
    fn test_lookup_duplicate_names_count_once() {
        assert_eq!(lookup_total(table(), ["susu", "susu", "susu"]), 2500);
    }

    #[test]
    fn test_items_follow_table_order() {
        let (items, _) = lookup(table(), ["susu", "nasi_kuning", "ayam_kecap"]);
        let names: Vec<&str> = items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["nasi_kuning", "susu", "ayam_kecap"]);
    }

    #[test]
    fn test_lookup_all_items_matches_sum() {
        let expected: u64 = table().entries().iter().map(|e| e.price).sum();
        assert_eq!(lookup_total(table(), table().names()), expected);
    }

    #[test]
    fn test_every_subset_of_small_vocabulary() {
        let small = PriceTable::from_pairs(&[("a", 100), ("b", 250), ("c", 4000), ("d", 5)]);
        let names = small.names();
        for mask in 0u32..(1 << names.len()) {
            let subset: Vec<&str> = names
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, n)| *n)
                .collect();
            let expected: u64 = subset.iter().filter_map(|n| small.price_of(n)).sum();
            assert_eq!(lookup_total(&small, subset.iter().copied()), expected);
        }
    }

    #[test]
    fn test_totals_delta() {
        let totals = Totals::compute(table(), ["nasi_kuning", "ayam_kecap", "susu"]);
        assert_eq!(totals.total, 9500);
        assert_eq!(totals.target, 10000);
        assert_eq!(totals.delta, -500);
        assert_eq!(totals.items.len(), 3);
    }

    #[test]
    fn test_totals_over_target() {
        let totals = Totals::compute(table(), ["burger", "nasi_kuning", "nasi_liwet"]);
        assert_eq!(totals.total, 11000);
        assert_eq!(totals.delta, 1000);
    }
}

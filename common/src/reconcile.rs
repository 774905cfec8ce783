//! 検出結果と手動修正の突き合わせ
//!
//! 検出ラベル集合を価格表の語彙と照合して初期選択を作り、
//! ユーザーの追加・削除を反映した最終選択から集計する。

use crate::error::{Error, Result};
use crate::price_table::PriceTable;
use crate::totals::Totals;
use std::collections::BTreeSet;

/// 検出ラベルを既知/未知に分けた結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSplit {
    /// 価格表にあるラベル（定義順）
    pub known: Vec<String>,
    /// 価格表にないラベル（名前順）
    pub unknown: Vec<String>,
}

/// 検出ラベルを価格表の語彙で振り分ける
pub fn split_labels(labels: &BTreeSet<String>, table: &PriceTable) -> LabelSplit {
    let mut known: Vec<String> = Vec::new();
    let mut unknown: Vec<String> = Vec::new();

    for label in labels {
        if table.contains(label) {
            known.push(label.clone());
        } else {
            unknown.push(label.clone());
        }
    }

    known.sort_by_key(|name| table.position(name));

    LabelSplit { known, unknown }
}

/// 最終選択（常に価格表の語彙の部分集合）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 検出結果の既知ラベルを初期選択にする
    pub fn from_detected(split: &LabelSplit) -> Self {
        Self {
            names: split.known.iter().cloned().collect(),
        }
    }

    /// 名前の列から作る（未知の名前はエラー）
    pub fn from_names<'a, I>(table: &PriceTable, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut selection = Self::new();
        for name in names {
            selection.add(table, name)?;
        }
        Ok(selection)
    }

    /// 価格表の各行に対するチェック状態から作る
    pub fn from_mask(table: &PriceTable, checked: &[bool]) -> Self {
        Self {
            names: table
                .entries()
                .iter()
                .zip(checked.iter())
                .filter(|(_, on)| **on)
                .map(|(e, _)| e.name.clone())
                .collect(),
        }
    }

    /// 価格表の各行に対するチェック状態
    pub fn to_mask(&self, table: &PriceTable) -> Vec<bool> {
        table
            .entries()
            .iter()
            .map(|e| self.names.contains(&e.name))
            .collect()
    }

    /// 追加（正規化後に価格表にない名前は拒否）
    pub fn add(&mut self, table: &PriceTable, name: &str) -> Result<()> {
        let key = crate::parser::normalize_label(name);
        if !table.contains(&key) {
            return Err(Error::UnknownItem(name.to_string()));
        }
        self.names.insert(key);
        Ok(())
    }

    /// 削除（選択に含まれていた場合true）
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(&crate::parser::normalize_label(name))
    }

    /// 追加と削除をまとめて反映
    ///
    /// 追加を先に検証するので、未知の名前があれば選択は変更されない。
    pub fn apply_edits(&mut self, table: &PriceTable, add: &[String], remove: &[String]) -> Result<()> {
        let mut next = self.clone();
        for name in add {
            next.add(table, name)?;
        }
        for name in remove {
            next.remove(name);
        }
        *self = next;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 価格表の定義順に並べた名前
    pub fn ordered_names(&self, table: &PriceTable) -> Vec<String> {
        table
            .entries()
            .iter()
            .filter(|e| self.names.contains(&e.name))
            .map(|e| e.name.clone())
            .collect()
    }

    /// 集計（選択が空ならNone）
    pub fn totals(&self, table: &PriceTable) -> Option<Totals> {
        if self.is_empty() {
            return None;
        }
        Some(Totals::compute(table, self.names.iter().map(|s| s.as_str())))
    }
}

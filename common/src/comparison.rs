//! 目標価格との比較

use serde::{Deserialize, Serialize};

/// 比較対象の目標価格（IDR）
pub const TARGET_PRICE: u64 = 10_000;

/// 比較結果
///
/// 合計と目標価格の大小で必ずどれか1つに分類される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Comparison {
    /// 目標より高い
    MoreExpensive { difference: u64 },
    /// 目標と一致
    OnTarget,
    /// 目標より安い
    Cheaper { difference: u64 },
}

impl Comparison {
    /// 目標との差の絶対値
    pub fn difference(&self) -> u64 {
        match self {
            Comparison::MoreExpensive { difference } | Comparison::Cheaper { difference } => {
                *difference
            }
            Comparison::OnTarget => 0,
        }
    }

    /// 見出し
    pub fn label(&self) -> &'static str {
        match self {
            Comparison::MoreExpensive { .. } => "Lebih Mahal",
            Comparison::OnTarget => "Sesuai Target",
            Comparison::Cheaper { .. } => "Lebih Murah",
        }
    }
}

/// 合計を目標価格と比較して分類
pub fn classify(total: u64, target: u64) -> Comparison {
    use std::cmp::Ordering;

    match total.cmp(&target) {
        Ordering::Greater => Comparison::MoreExpensive {
            difference: total - target,
        },
        Ordering::Equal => Comparison::OnTarget,
        Ordering::Less => Comparison::Cheaper {
            difference: target - total,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cheaper() {
        let c = classify(6500, TARGET_PRICE);
        assert_eq!(c, Comparison::Cheaper { difference: 3500 });
        assert_eq!(c.difference(), 3500);
    }

    #[test]
    fn test_more_expensive() {
        let c = classify(11000, TARGET_PRICE);
        assert_eq!(c, Comparison::MoreExpensive { difference: 1000 });
    }

    #[test]
    fn test_exact_boundary() {
        let c = classify(10000, TARGET_PRICE);
        assert_eq!(c, Comparison::OnTarget);
        assert_eq!(c.difference(), 0);
    }

    #[test]
    fn test_one_off_boundaries() {
        assert_eq!(classify(9999, TARGET_PRICE), Comparison::Cheaper { difference: 1 });
        assert_eq!(classify(10001, TARGET_PRICE), Comparison::MoreExpensive { difference: 1 });
    }

    #[test]
    fn test_zero_total() {
        assert_eq!(classify(0, TARGET_PRICE), Comparison::Cheaper { difference: 10000 });
    }

    #[test]
    fn test_partition_is_exclusive() {
        for total in (0..=20_000).step_by(250) {
            let c = classify(total, TARGET_PRICE);
            let over = matches!(c, Comparison::MoreExpensive { .. });
            let exact = matches!(c, Comparison::OnTarget);
            let under = matches!(c, Comparison::Cheaper { .. });
            assert_eq!([over, exact, under].iter().filter(|b| **b).count(), 1);
            assert_eq!(c.difference(), total.abs_diff(TARGET_PRICE));
        }
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&Comparison::Cheaper { difference: 500 }).unwrap();
        assert_eq!(json, r#"{"outcome":"cheaper","difference":500}"#);
    }
}

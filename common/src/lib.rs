//! Tray Price Common Library
//!
//! CLIと他のフロントエンドで共有される価格表・集計・判定ロジック

pub mod error;
pub mod price_table;
pub mod totals;
pub mod comparison;
pub mod currency;
pub mod parser;
pub mod reconcile;

pub use error::{Error, Result};
pub use price_table::{PriceEntry, PriceTable};
pub use totals::{lookup, lookup_total, Totals};
pub use comparison::{classify, Comparison, TARGET_PRICE};
pub use currency::format_rupiah;
pub use parser::{collect_labels, extract_json, normalize_label, parse_detections, BoundingBox, Detection};
pub use reconcile::{split_labels, LabelSplit, Selection};

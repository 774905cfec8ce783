use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tray-price")]
#[command(about = "Analisis estimasi harga porsi MBG dari foto nampan makanan", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// パスワードゲートを有効化
    #[arg(long, global = true)]
    pub gate: bool,

    /// ゲート用パスワード（省略時は対話入力）
    #[arg(long, global = true)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// トレー写真を解析して価格を見積もる
    Analyze {
        /// 画像ファイル (jpg/jpeg/png)
        #[arg(required = true)]
        image: PathBuf,

        /// 手動で追加する料理
        #[arg(short, long)]
        add: Vec<String>,

        /// 検出結果から外す料理
        #[arg(short, long)]
        remove: Vec<String>,

        /// 対話的に検出結果を修正
        #[arg(short, long)]
        interactive: bool,

        /// レポートJSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// レポートExcelの出力先
        #[arg(long)]
        excel: Option<PathBuf>,

        /// 検出キャッシュを使用
        #[arg(long)]
        use_cache: bool,
    },

    /// フォルダ内の写真をまとめて見積もる（検出結果のみ）
    Batch {
        /// 写真フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// レポートJSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// レポートExcelの出力先
        #[arg(long)]
        excel: Option<PathBuf>,

        /// 検出キャッシュを使用
        #[arg(long)]
        use_cache: bool,
    },

    /// 画像なしで料理名を指定して見積もる
    Quote {
        /// 料理名
        items: Vec<String>,

        /// レポートJSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 価格表を表示
    Prices,

    /// 設定を表示/編集
    Config {
        /// パスワードを設定
        #[arg(long)]
        set_password: Option<String>,

        /// モデル重みファイルを設定
        #[arg(long)]
        set_model: Option<PathBuf>,

        /// 常にパスワードを要求するか
        #[arg(long)]
        require_password: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 検出キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_with_edits() {
        let cli = Cli::try_parse_from([
            "tray-price", "analyze", "tray.jpg", "--add", "susu", "-a", "tahu", "-r", "ayam",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { image, add, remove, interactive, .. } => {
                assert_eq!(image, PathBuf::from("tray.jpg"));
                assert_eq!(add, vec!["susu", "tahu"]);
                assert_eq!(remove, vec!["ayam"]);
                assert!(!interactive);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_global_gate_flags() {
        let cli = Cli::try_parse_from(["tray-price", "prices", "--gate", "--password", "rahasia"]).unwrap();
        assert!(cli.gate);
        assert_eq!(cli.password.as_deref(), Some("rahasia"));
        assert!(matches!(cli.command, Commands::Prices));
    }

    #[test]
    fn test_parse_config_require_password() {
        let cli = Cli::try_parse_from(["tray-price", "config", "--require-password", "true"]).unwrap();
        match cli.command {
            Commands::Config { require_password, show, .. } => {
                assert_eq!(require_password, Some(true));
                assert!(!show);
            }
            _ => panic!("expected config"),
        }
    }

    #[test]
    fn test_analyze_requires_image() {
        assert!(Cli::try_parse_from(["tray-price", "analyze"]).is_err());
    }
}

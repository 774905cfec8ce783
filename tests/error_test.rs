//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use std::path::Path;
use tempfile::tempdir;
use tray_price_rust::error::TrayPriceError;
use tray_price_rust::scanner;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(matches!(result, Err(TrayPriceError::FolderNotFound(_))));
}

/// 画像のないフォルダは空のVec
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("menu.txt"), "nasi").unwrap();

    let result = scanner::scan_folder(dir.path()).unwrap();
    assert!(result.is_empty());
}

/// Display実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        TrayPriceError::Config("x".to_string()),
        TrayPriceError::MissingSecret,
        TrayPriceError::InvalidCredential,
        TrayPriceError::FileNotFound("tray.jpg".to_string()),
        TrayPriceError::ModelLoad("best.pt".to_string()),
        TrayPriceError::Detection("exit 1".to_string()),
        TrayPriceError::UnknownItem("rendang".to_string()),
        TrayPriceError::NoImagesFound("folder".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// モデル読み込みエラーのメッセージ
#[test]
fn test_model_load_message() {
    let display = TrayPriceError::ModelLoad("best.pt: No such file".into()).to_string();
    assert!(display.starts_with("Error memuat model"));
    assert!(display.contains("best.pt"));
}

/// 未設定パスワードの案内
#[test]
fn test_missing_secret_message() {
    let display = TrayPriceError::MissingSecret.to_string();
    assert!(display.contains("tray-price config"));
    assert!(display.contains("TRAY_PRICE_PASSWORD"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: TrayPriceError = io_err.into();
    assert!(matches!(err, TrayPriceError::Io(_)));
}

/// common::Errorからの変換
#[test]
fn test_common_error_conversion() {
    let err: TrayPriceError = tray_price_common::Error::UnknownItem("sate".into()).into();
    assert!(matches!(err, TrayPriceError::UnknownItem(ref n) if n == "sate"));

    let err: TrayPriceError = tray_price_common::Error::Parse("JSONが見つかりません".into()).into();
    assert!(matches!(err, TrayPriceError::DetectorParse(_)));

    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
    let err: TrayPriceError = tray_price_common::Error::Io(io).into();
    assert!(matches!(err, TrayPriceError::Common(_)));
    assert!(err.to_string().contains("disk"));
}

//! サブコマンドの実行
//!
//! 各関数はセッションを明示的に受け取り、ゲートが開いていることを確認してから動く。

use crate::config::Config;
use crate::detector::{self, DetectionCache, Detector, YoloProcessDetector};
use crate::error::{Result, TrayPriceError};
use crate::report::{self, EstimateReport};
use crate::scanner::{self, ImageInfo, TrayImage};
use crate::session::Session;
use crate::{export, interactive};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tray_price_common::{format_rupiah, split_labels, PriceTable, Selection, TARGET_PRICE};

/// analyze の入力
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub image: PathBuf,
    pub add: Vec<String>,
    pub remove: Vec<String>,
    pub interactive: bool,
    pub output: Option<PathBuf>,
    pub excel: Option<PathBuf>,
    pub use_cache: bool,
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn cache_folder(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// 1枚の画像を検出（キャッシュ対応）
async fn detect_one<D: Detector>(
    detector: &D,
    model_key: &str,
    image: &TrayImage,
    cache: Option<&mut DetectionCache>,
) -> Result<BTreeSet<String>> {
    match cache {
        Some(cache) => detector::detect_labels_with_cache(detector, image, model_key, cache).await,
        None => detector::detect_labels(detector, image).await,
    }
}

/// バッチで処理できなかった画像
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub file_name: String,
    pub error: String,
}

/// バッチ処理の結果
#[derive(Debug, Default)]
pub struct BatchResult {
    pub reports: Vec<EstimateReport>,
    pub failures: Vec<BatchFailure>,
}

/// 画像1枚を読み込み、検出して見積もる（手動修正なし）
async fn estimate_image<D: Detector>(
    detector: &D,
    model_key: &str,
    path: &Path,
    cache: Option<&mut DetectionCache>,
    table: &PriceTable,
) -> Result<EstimateReport> {
    let image = scanner::load_tray_image(path)?;
    let labels = detect_one(detector, model_key, &image, cache).await?;

    let split = split_labels(&labels, table);
    let selection = Selection::from_detected(&split);
    Ok(EstimateReport::build(Some(&image), Some(&split), &selection, table))
}

/// 画像を順に見積もる
///
/// 1枚の失敗では止めず、失敗として記録して次へ進む。
pub async fn estimate_images<D: Detector>(
    detector: &D,
    model_key: &str,
    images: &[ImageInfo],
    mut cache: Option<&mut DetectionCache>,
    table: &PriceTable,
) -> BatchResult {
    let pb = ProgressBar::new(images.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut result = BatchResult::default();
    for entry in images {
        pb.set_message(entry.file_name.clone());

        match estimate_image(detector, model_key, &entry.path, cache.as_deref_mut(), table).await {
            Ok(report) => result.reports.push(report),
            Err(e) => {
                warn!(image = %entry.file_name, error = %e, "skipping image");
                result.failures.push(BatchFailure {
                    file_name: entry.file_name.clone(),
                    error: e.to_string(),
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    result
}

/// 写真1枚の見積り
pub async fn run_analyze(session: &Session, config: &Config, opts: &AnalyzeOptions) -> Result<EstimateReport> {
    session.ensure_authorized()?;
    let table = PriceTable::standard();

    // 1. モデル（検出より前に失敗を表示する）
    println!("[1/3] Memuat model...");
    let model = detector::model::load_shared(config)?;
    println!("✔ Model: {}\n", model.weights().display());

    // 2. 画像 + 検出
    println!("[2/3] Menganalisis gambar...{}", if opts.use_cache { " (cache aktif)" } else { "" });
    let image = scanner::load_tray_image(&opts.image)?;
    let detector = YoloProcessDetector::new(model);

    let pb = spinner("Model sedang menganalisis gambar...");
    let labels = if opts.use_cache {
        let folder = cache_folder(&image.path);
        let mut cache = DetectionCache::load(&folder);
        let labels = detect_one(&detector, model.fingerprint(), &image, Some(&mut cache)).await;
        pb.finish_and_clear();
        let labels = labels?;
        cache.save(&folder)?;
        labels
    } else {
        let labels = detect_one(&detector, model.fingerprint(), &image, None).await;
        pb.finish_and_clear();
        labels?
    };
    info!(image = %image.file_name, labels = ?labels, "detection done");
    println!("✔ Analisis selesai\n");

    // 3. 手動修正
    println!("[3/3] Koreksi & Konfirmasi Manual");
    let split = split_labels(&labels, table);
    let mut selection = Selection::from_detected(&split);
    selection.apply_edits(table, &opts.add, &opts.remove)?;

    if opts.interactive {
        println!("{}", report::detection_notice(&split.known, &split.unknown));
        selection = interactive::select_items(table, &selection)?;
    }

    let report = EstimateReport::build(Some(&image), Some(&split), &selection, table);
    let text = if opts.interactive {
        report::render_reviewed(&report)
    } else {
        report::render(&report)
    };
    println!("\n{}", text);

    export::export_reports(
        std::slice::from_ref(&report),
        opts.output.as_deref(),
        opts.excel.as_deref(),
    )?;

    Ok(report)
}

/// フォルダ内の写真をまとめて見積もる
///
/// 読み込み・検出に失敗した画像は飛ばし、最後にまとめて表示する。
pub async fn run_batch(
    session: &Session,
    config: &Config,
    folder: &Path,
    output: Option<&Path>,
    excel: Option<&Path>,
    use_cache: bool,
) -> Result<BatchResult> {
    session.ensure_authorized()?;
    let table = PriceTable::standard();

    println!("[1/3] Memuat model...");
    let model = detector::model::load_shared(config)?;
    println!("✔ Model: {}\n", model.weights().display());

    println!("[2/3] Memindai folder...");
    let images = scanner::scan_folder(folder)?;
    if images.is_empty() {
        return Err(TrayPriceError::NoImagesFound(folder.display().to_string()));
    }
    println!("✔ {} gambar ditemukan\n", images.len());

    println!("[3/3] Menganalisis...{}", if use_cache { " (cache aktif)" } else { "" });
    let detector = YoloProcessDetector::new(model);
    let mut cache = if use_cache { Some(DetectionCache::load(folder)) } else { None };

    let result = estimate_images(&detector, model.fingerprint(), &images, cache.as_mut(), table).await;

    if let Some(cache) = &cache {
        cache.save(folder)?;
    }

    for report in &result.reports {
        println!("{}", report::render(report));
        println!("---");
    }
    for failure in &result.failures {
        println!("✖ {}: {}", failure.file_name, failure.error);
    }
    println!(
        "✔ {} berhasil, {} gagal",
        result.reports.len(),
        result.failures.len()
    );

    export::export_reports(&result.reports, output, excel)?;

    Ok(result)
}

/// 料理名を直接指定して見積もる
pub fn run_quote(session: &Session, items: &[String], output: Option<&Path>) -> Result<EstimateReport> {
    session.ensure_authorized()?;
    let table = PriceTable::standard();

    let selection = Selection::from_names(table, items.iter().map(|s| s.as_str()))?;
    let report = EstimateReport::build(None, None, &selection, table);
    println!("{}", report::render(&report));

    export::export_reports(std::slice::from_ref(&report), output, None)?;

    Ok(report)
}

/// 価格表の表示
pub fn run_prices(session: &Session) -> Result<()> {
    session.ensure_authorized()?;
    let table = PriceTable::standard();

    println!("Catatan: Harga di bawah ini adalah estimasi kasar (kira-kira) per porsi untuk wilayah Banjarbaru dan dapat bervariasi.\n");
    print!("{}", report::render_items_table(table.entries()));
    println!("\nTarget harga: {}", format_rupiah(TARGET_PRICE as i64));

    Ok(())
}

/// 設定の表示/編集
///
/// 変更を伴う場合はゲートが開いていること（パスワード設定済みならその確認）が必要。
pub fn run_config(
    session: &Session,
    mut config: Config,
    set_password: Option<String>,
    set_model: Option<PathBuf>,
    require_password: Option<bool>,
    show: bool,
) -> Result<()> {
    if set_password.is_some() || set_model.is_some() || require_password.is_some() {
        session.ensure_authorized()?;
    }

    if let Some(password) = set_password {
        config.set_password(password)?;
        println!("✔ Kata sandi disimpan");
    }

    if let Some(path) = set_model {
        config.set_model_path(path)?;
        println!("✔ Path model disimpan");
    }

    if let Some(required) = require_password {
        config.set_require_password(required)?;
        println!("✔ require_password = {}", required);
    }

    if show {
        println!("Konfigurasi:");
        println!("  File: {}", Config::config_path()?.display());
        println!("  Model: {}", config.model_path.display());
        println!("  Detektor: {} {}", config.detector_command, config.detector_args.join(" "));
        println!(
            "  Kata sandi: {}",
            if config.access_secret().is_ok() { "diatur" } else { "belum diatur" }
        );
        println!("  Wajib kata sandi: {}", config.require_password);
    }

    Ok(())
}

/// キャッシュ管理
pub fn run_cache(folder: Option<PathBuf>, clear: bool, info: bool) -> Result<()> {
    let target = folder.unwrap_or_else(|| PathBuf::from("."));
    let cache_path = DetectionCache::cache_path(&target);

    if info || !clear {
        if cache_path.exists() {
            let cache = DetectionCache::load(&target);
            println!("Info cache:");
            println!("  Path: {}", cache_path.display());
            println!("  Jumlah: {}", cache.len());
            if let Ok(meta) = std::fs::metadata(&cache_path) {
                println!("  Ukuran: {} bytes", meta.len());
            }
        } else {
            println!("File cache tidak ada: {}", cache_path.display());
        }
    }

    if clear {
        if DetectionCache::clear(&target)? {
            println!("✔ Cache dihapus: {}", cache_path.display());
        } else {
            println!("File cache tidak ada");
        }
    }

    Ok(())
}

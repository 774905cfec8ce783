use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrayPriceError {
    #[error("Kesalahan konfigurasi: {0}")]
    Config(String),

    #[error("Kata sandi belum diatur. Jalankan `tray-price config --set-password ...` atau set TRAY_PRICE_PASSWORD")]
    MissingSecret,

    #[error("Kata sandi salah.")]
    InvalidCredential,

    #[error("File tidak ditemukan: {0}")]
    FileNotFound(String),

    #[error("Folder tidak ditemukan: {0}")]
    FolderNotFound(String),

    #[error("Format gambar tidak didukung (jpg/jpeg/png): {0}")]
    UnsupportedImage(String),

    #[error("Gagal membaca gambar: {0}")]
    ImageLoad(String),

    #[error("Error memuat model: {0}. Pastikan file bobot model tersedia di path yang dikonfigurasi")]
    ModelLoad(String),

    #[error("Deteksi gagal: {0}")]
    Detection(String),

    #[error("Gagal membaca keluaran detektor: {0}")]
    DetectorParse(String),

    #[error("Item tidak dikenal: {0}. Lihat daftar dengan `tray-price prices`")]
    UnknownItem(String),

    #[error("Tidak ada gambar di: {0}")]
    NoImagesFound(String),

    #[error("Gagal membuat Excel: {0}")]
    ExcelGeneration(String),

    #[error("Input dibatalkan: {0}")]
    Prompt(String),

    #[error("Kesalahan JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Kesalahan IO: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(tray_price_common::Error),
}

impl From<tray_price_common::Error> for TrayPriceError {
    fn from(err: tray_price_common::Error) -> Self {
        match err {
            tray_price_common::Error::UnknownItem(name) => TrayPriceError::UnknownItem(name),
            tray_price_common::Error::Parse(msg) => TrayPriceError::DetectorParse(msg),
            other => TrayPriceError::Common(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrayPriceError>;

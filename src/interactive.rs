//! 対話入力モジュール
//!
//! パスワード入力と、検出結果の手動修正（複数選択）。

use crate::error::{Result, TrayPriceError};
use crate::session::Session;
use dialoguer::{MultiSelect, Password};
use tray_price_common::{PriceTable, Selection};

/// ゲートが開くまでパスワードを尋ねる
///
/// 空入力で中断。誤りは表示して再入力（回数制限なし）。
pub fn prompt_password(session: &mut Session) -> Result<()> {
    while !session.is_authorized() {
        let input = Password::new()
            .with_prompt("Masukkan Kata Sandi")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| TrayPriceError::Prompt(e.to_string()))?;

        if input.is_empty() {
            return Err(TrayPriceError::Prompt("kata sandi kosong".into()));
        }

        match session.authenticate(&input) {
            Ok(()) => println!("✔ Akses diberikan\n"),
            Err(TrayPriceError::InvalidCredential) => println!("✖ Kata sandi salah."),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// 検出結果を初期値にして、価格表から手動で選び直す
pub fn select_items(table: &PriceTable, current: &Selection) -> Result<Selection> {
    let names = table.names();
    let defaults = current.to_mask(table);

    let chosen = MultiSelect::new()
        .with_prompt("Periksa hasil deteksi. Tambah/hapus item (spasi: pilih, enter: konfirmasi)")
        .items(&names)
        .defaults(&defaults)
        .interact()
        .map_err(|e| TrayPriceError::Prompt(e.to_string()))?;

    let mut mask = vec![false; names.len()];
    for idx in chosen {
        if let Some(slot) = mask.get_mut(idx) {
            *slot = true;
        }
    }

    Ok(Selection::from_mask(table, &mask))
}

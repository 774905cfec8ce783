//! Excel出力
//!
//! 「Ringkasan」シートに1画像1行の集計、「Rincian」シートに明細を書く。

use crate::error::{Result, TrayPriceError};
use crate::report::EstimateReport;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tray_price_common::TARGET_PRICE;

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> TrayPriceError {
    TrayPriceError::ExcelGeneration(e.to_string())
}

pub fn generate_excel(reports: &[EstimateReport], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, reports)?;

    let items_sheet = workbook.add_worksheet();
    write_items_sheet(items_sheet, reports)?;

    workbook.save(output_path).map_err(xlsx_err)?;

    Ok(())
}

fn image_name(report: &EstimateReport) -> &str {
    report
        .image
        .as_ref()
        .map(|i| i.file_name.as_str())
        .unwrap_or("-")
}

fn write_summary_sheet(sheet: &mut Worksheet, reports: &[EstimateReport]) -> Result<()> {
    sheet.set_name("Ringkasan").map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("#,##0");

    sheet
        .write_string_with_format(0, 0, "Estimasi Harga Porsi MBG", &header_format)
        .map_err(xlsx_err)?;
    sheet.write_string(1, 0, "Target harga").map_err(xlsx_err)?;
    sheet
        .write_number_with_format(1, 1, TARGET_PRICE as f64, &money_format)
        .map_err(xlsx_err)?;

    let headers = ["Gambar", "Item", "Total (Rp)", "Selisih (Rp)", "Hasil"];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(3, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    for (i, report) in reports.iter().enumerate() {
        let row = 4 + i as u32;
        sheet.write_string(row, 0, image_name(report)).map_err(xlsx_err)?;
        sheet
            .write_string(row, 1, report.selection.join(", "))
            .map_err(xlsx_err)?;

        match (&report.totals, report.comparison) {
            (Some(totals), Some(comparison)) => {
                sheet
                    .write_number_with_format(row, 2, totals.total as f64, &money_format)
                    .map_err(xlsx_err)?;
                sheet
                    .write_number_with_format(row, 3, totals.delta as f64, &money_format)
                    .map_err(xlsx_err)?;
                sheet.write_string(row, 4, comparison.label()).map_err(xlsx_err)?;
            }
            _ => {
                sheet
                    .write_string(row, 4, "Tidak ada makanan yang dipilih")
                    .map_err(xlsx_err)?;
            }
        }
    }

    sheet.set_column_width(0, 24).map_err(xlsx_err)?;
    sheet.set_column_width(1, 48).map_err(xlsx_err)?;
    sheet.set_column_width(4, 16).map_err(xlsx_err)?;

    Ok(())
}

fn write_items_sheet(sheet: &mut Worksheet, reports: &[EstimateReport]) -> Result<()> {
    sheet.set_name("Rincian").map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("#,##0");

    for (col, header) in ["Gambar", "nama_makanan", "estimasi_harga_rp"].iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    let mut row = 1u32;
    for report in reports {
        let Some(totals) = &report.totals else {
            continue;
        };
        for item in &totals.items {
            sheet.write_string(row, 0, image_name(report)).map_err(xlsx_err)?;
            sheet.write_string(row, 1, &item.name).map_err(xlsx_err)?;
            sheet
                .write_number_with_format(row, 2, item.price as f64, &money_format)
                .map_err(xlsx_err)?;
            row += 1;
        }
    }

    sheet.set_column_width(0, 24).map_err(xlsx_err)?;
    sheet.set_column_width(1, 24).map_err(xlsx_err)?;

    Ok(())
}

pub mod excel;

use crate::error::Result;
use crate::report::EstimateReport;
use std::path::Path;

/// レポートをJSONで保存
pub fn write_json(reports: &[EstimateReport], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(reports)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// 指定された形式で出力
pub fn export_reports(
    reports: &[EstimateReport],
    json_path: Option<&Path>,
    excel_path: Option<&Path>,
) -> Result<()> {
    if let Some(path) = json_path {
        write_json(reports, path)?;
        println!("✔ Laporan JSON disimpan: {}", path.display());
    }

    if let Some(path) = excel_path {
        excel::generate_excel(reports, path)?;
        println!("✔ Laporan Excel disimpan: {}", path.display());
    }

    Ok(())
}

//! File exports: JSON, CSV and XLSX, all in the fixed column order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jobboards_lib::{JobRecord, JOB_FIELDS};
use rust_xlsxwriter::Workbook;

/// Longest string an XLSX cell accepts.
const XLSX_CELL_LIMIT: usize = 32_767;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// `xls` is accepted as an alias for `xlsx`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

/// Parses a comma-separated format list. Unknown names are logged and
/// ignored; repeats collapse.
pub fn parse_formats(list: &str) -> Vec<ExportFormat> {
    let mut formats = Vec::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match ExportFormat::parse(name) {
            Some(format) if !formats.contains(&format) => formats.push(format),
            Some(_) => {}
            None => tracing::warn!("ignoring unknown export format {:?}", name),
        }
    }
    formats
}

/// Writes one `jobs_<UTC timestamp>.<ext>` file per format into `outdir`,
/// creating the directory if needed. Returns the written paths.
pub fn export_all(
    records: &[JobRecord],
    outdir: &Path,
    formats: &[ExportFormat],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(outdir)
        .with_context(|| format!("failed to create {}", outdir.display()))?;
    let stem = format!("jobs_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"));

    let mut written = Vec::new();
    for format in formats {
        let path = outdir.join(format!("{}.{}", stem, format.extension()));
        match format {
            ExportFormat::Json => write_json(records, &path)?,
            ExportFormat::Csv => write_csv(records, &path)?,
            ExportFormat::Xlsx => write_xlsx(records, &path)?,
        }
        tracing::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

pub fn write_json(records: &[JobRecord], path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// The header row is written even when there are no records.
pub fn write_csv(records: &[JobRecord], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    wtr.write_record(JOB_FIELDS)?;
    for record in records {
        wtr.write_record(record.values())?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_xlsx(records: &[JobRecord], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Jobs")?;

    for (col, name) in JOB_FIELDS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (row, record) in records.iter().enumerate() {
        for (col, value) in record.values().iter().enumerate() {
            sheet.write_string(row as u32 + 1, col as u16, truncate_cell(value))?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn truncate_cell(value: &str) -> &str {
    match value.char_indices().nth(XLSX_CELL_LIMIT) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use calamine::{open_workbook, Reader, Xlsx};

    use super::*;

    fn sample() -> Vec<JobRecord> {
        vec![
            JobRecord {
                job_title: "Backend Engineer".into(),
                company_name: "Acme, Ltd".into(),
                location: "London".into(),
                job_url: "https://www.totaljobs.com/job/101".into(),
                job_description: "Build APIs.\nOwn services.".into(),
                employment_type: "Contract".into(),
                date_posted: "2024-03-03".into(),
                source: "https://www.totaljobs.com".into(),
                ..Default::default()
            },
            JobRecord {
                job_title: "Koch (m/w/d)".into(),
                job_url: "https://www.stepstone.de/job/7".into(),
                source: "https://www.stepstone.de".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn parses_format_lists() {
        assert_eq!(
            parse_formats("json, CSV,xls,pdf,json"),
            vec![ExportFormat::Json, ExportFormat::Csv, ExportFormat::Xlsx]
        );
        assert!(parse_formats(" , ").is_empty());
    }

    #[test]
    fn json_is_an_ordered_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        write_json(&sample(), &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<JobRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, sample());

        let title = raw.find("\"jobTitle\"").unwrap();
        let url = raw.find("\"jobUrl\"").unwrap();
        let source = raw.find("\"source\"").unwrap();
        assert!(title < url && url < source);
    }

    #[test]
    fn csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        write_csv(&sample(), &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let header: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, JOB_FIELDS);
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "Acme, Ltd");
        assert_eq!(&rows[0][4], "Build APIs.\nOwn services.");
        assert_eq!(&rows[1][0], "Koch (m/w/d)");
    }

    #[test]
    fn csv_without_records_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        write_csv(&[], &path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.trim_end(), JOB_FIELDS.join(","));
    }

    #[test]
    fn xlsx_sheet_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.xlsx");
        write_xlsx(&sample(), &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let sheets = workbook.worksheets();
        let (name, range) = &sheets[0];
        assert_eq!(name, "Jobs");

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], JOB_FIELDS);
        assert_eq!(rows[1][0], "Backend Engineer");
        assert_eq!(rows[2][3], "https://www.stepstone.de/job/7");
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "é".repeat(XLSX_CELL_LIMIT + 10);
        assert_eq!(truncate_cell(&long).chars().count(), XLSX_CELL_LIMIT);
        assert_eq!(truncate_cell("short"), "short");
    }

    #[test]
    fn export_all_names_files_by_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = dir.path().join("nested/output");
        let written = export_all(
            &sample(),
            &outdir,
            &[ExportFormat::Json, ExportFormat::Csv],
        )
        .unwrap();

        assert_eq!(written.len(), 2);
        for path in &written {
            assert!(path.exists());
            let name = path.file_name().unwrap().to_str().unwrap();
            assert!(name.starts_with("jobs_"));
            // jobs_YYYYMMDD_HHMMSS.ext
            let stem = path.file_stem().unwrap().to_str().unwrap();
            assert_eq!(stem.len(), "jobs_20240303_120000".len());
        }
        assert_eq!(written[0].extension().unwrap(), "json");
        assert_eq!(written[1].extension().unwrap(), "csv");
    }
}

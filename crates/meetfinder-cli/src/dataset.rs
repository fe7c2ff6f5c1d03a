//! Locating and decoding competition datasets on disk.
//!
//! The newest file in the data directory wins. CSV is decoded directly; for
//! `.xlsx`/`.xls` workbooks the first worksheet is read.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;
use calamine::{open_workbook_auto, Data, Reader};
use meetfinder_core::{AppConfig, CellValue, CompetitionTable};

const DATASET_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls"];

#[derive(Debug, Clone)]
pub(crate) struct DatasetFile {
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
}

fn has_dataset_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DATASET_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// Dataset files in `dir`, newest first. A missing directory yields an empty
/// list.
pub(crate) fn list_datasets(dir: &Path) -> anyhow::Result<Vec<DatasetFile>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read data directory {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !has_dataset_extension(&path) {
            continue;
        }
        let metadata = entry.metadata()?;
        files.push(DatasetFile {
            path,
            size: metadata.len(),
            modified: metadata.modified()?,
        });
    }

    files.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(files)
}

/// The explicit `data` path, or the most recently modified dataset in the
/// configured data directory.
pub(crate) fn resolve_dataset(config: &AppConfig, data: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = data {
        return Ok(path.to_path_buf());
    }
    list_datasets(&config.data_dir)?
        .into_iter()
        .next()
        .map(|f| f.path)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no spreadsheet files found in {}; download the competitions sheet there or pass --data",
                config.data_dir.display()
            )
        })
}

/// Decode bytes as UTF-8, falling back to Latin-1. A leading BOM is dropped.
pub(crate) fn decode_text(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("dataset is not valid UTF-8; decoding as Latin-1");
            e.into_bytes().into_iter().map(char::from).collect()
        }
    };
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_owned(),
        None => text,
    }
}

/// Parse CSV text whose first row is the header row.
///
/// Fully blank rows are skipped. Trailing blank cells beyond the header width
/// are tolerated; any other overflow is an error.
pub(crate) fn parse_csv(text: &str) -> anyhow::Result<CompetitionTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("failed to read CSV header row")?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();
    let mut table = CompetitionTable::new(headers);

    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read CSV row {}", i + 2))?;
        push_data_row(&mut table, record.iter().map(CellValue::from_raw).collect(), i + 2)?;
    }

    Ok(table)
}

/// Skips fully blank rows and trims blank overflow before appending.
/// `line` is the 1-based source row, for error messages.
fn push_data_row(
    table: &mut CompetitionTable,
    mut cells: Vec<CellValue>,
    line: usize,
) -> anyhow::Result<()> {
    if cells.iter().all(CellValue::is_blank) {
        return Ok(());
    }
    let width = table.headers().len();
    if cells.len() > width && cells[width..].iter().all(CellValue::is_blank) {
        cells.truncate(width);
    }
    table
        .push_row(cells)
        .with_context(|| format!("malformed row {line}"))
}

#[allow(clippy::cast_precision_loss)]
fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(text) => CellValue::from_raw(text),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::DateTime(serial) => match serial.as_datetime() {
            Some(dt) if dt.time() == chrono::NaiveTime::MIN => {
                CellValue::Text(dt.format("%Y-%m-%d").to_string())
            }
            Some(dt) => CellValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::from_raw(&cell.to_string()),
        },
        other => CellValue::from_raw(&other.to_string()),
    }
}

/// Read the first worksheet of a workbook; its first row is the header row.
pub(crate) fn parse_workbook(path: &Path) -> anyhow::Result<CompetitionTable> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow::anyhow!("workbook {} has no worksheets", path.display()))?
        .with_context(|| format!("failed to read first worksheet of {}", path.display()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        anyhow::bail!("first worksheet of {} is empty", path.display());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_owned())
        .collect();
    let mut table = CompetitionTable::new(headers);

    for (i, row) in rows.enumerate() {
        push_data_row(&mut table, row.iter().map(workbook_cell).collect(), i + 2)?;
    }

    Ok(table)
}

/// Load a dataset file into a table.
pub(crate) fn load_table(path: &Path) -> anyhow::Result<CompetitionTable> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    tracing::info!(file = %path.display(), "parsing dataset");
    let table = match extension.as_str() {
        "csv" => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_csv(&decode_text(bytes))
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        "xlsx" | "xls" => parse_workbook(path)?,
        other => anyhow::bail!("unsupported dataset format '.{other}' for {}", path.display()),
    };
    tracing::info!(
        rows = table.len(),
        columns = table.headers().len(),
        "dataset loaded"
    );
    Ok(table)
}

/// Print the available dataset files, newest first.
pub(crate) fn run_datasets(config: &AppConfig) -> anyhow::Result<()> {
    let files = list_datasets(&config.data_dir)?;
    if files.is_empty() {
        println!("no spreadsheet files found in {}", config.data_dir.display());
        return Ok(());
    }

    println!("Found {} spreadsheet file(s):", files.len());
    for (i, file) in files.iter().enumerate() {
        let name = file
            .path
            .file_name()
            .map_or_else(|| file.path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let modified = chrono::DateTime::<chrono::Local>::from(file.modified);
        println!(
            "  {}. {} ({} bytes, modified: {})",
            i + 1,
            name,
            file.size,
            modified.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

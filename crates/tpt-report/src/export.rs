//! File exports of a metrics bundle.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tpt_model::{CountTable, MetricsBundle};
use tracing::info;

use crate::error::{ReportError, Result};

/// Write the whole bundle as pretty JSON. Undefined percentages are `null`.
pub fn write_metrics_json(metrics: &MetricsBundle, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, metrics).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), "metrics written");
    Ok(())
}

/// Write a two-column `key,count` CSV.
pub fn write_count_table<W: Write>(writer: W, key_header: &str, table: &CountTable) -> csv::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([key_header, "count"])?;
    for row in &table.rows {
        csv.write_record([row.key.as_str(), row.count.to_string().as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Write one CSV per grouped table into `dir`, creating it if needed.
///
/// Returns the written paths in a fixed order.
pub fn write_count_csvs(metrics: &MetricsBundle, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let tables: [(&str, &str, &CountTable); 9] = [
        ("by_year.csv", "year", &metrics.by_year),
        ("by_quarter.csv", "quarter", &metrics.by_quarter),
        ("by_region.csv", "region", &metrics.by_region),
        ("by_sex.csv", "sex", &metrics.by_sex),
        ("by_age_group.csv", "age_group", &metrics.by_age_group),
        ("by_age_group_detail.csv", "age_group_detail", &metrics.by_age_group_detail),
        ("by_regimen.csv", "regimen", &metrics.by_regimen),
        ("by_hiv.csv", "hiv", &metrics.by_hiv),
        ("by_outcome.csv", "outcome", &metrics.by_outcome),
    ];

    let mut written = Vec::with_capacity(tables.len() + 2);
    for (file_name, key_header, table) in tables {
        let path = dir.join(file_name);
        let file = create(&path)?;
        write_count_table(BufWriter::new(file), key_header, table)
            .map_err(|source| csv_error(&path, source))?;
        written.push(path);
    }

    let path = dir.join("by_facility.csv");
    write_csv_file(&path, |csv| {
        csv.write_record(["serial", "facility", "count"])?;
        for row in &metrics.by_facility.rows {
            csv.write_record([row.serial.to_string(), row.key.clone(), row.count.to_string()])?;
        }
        Ok(())
    })?;
    written.push(path);

    let path = dir.join("by_region_sex.csv");
    write_csv_file(&path, |csv| {
        csv.write_record(["region", "sex", "count"])?;
        for row in &metrics.by_region_sex {
            csv.write_record([row.group.as_str(), row.key.as_str(), row.count.to_string().as_str()])?;
        }
        Ok(())
    })?;
    written.push(path);

    info!(dir = %dir.display(), files = written.len(), "count tables written");
    Ok(written)
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_error(path: &Path, source: csv::Error) -> ReportError {
    ReportError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn write_csv_file<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut csv::Writer<BufWriter<File>>) -> csv::Result<()>,
{
    let mut csv = csv::Writer::from_writer(BufWriter::new(create(path)?));
    body(&mut csv)
        .and_then(|()| csv.flush().map_err(csv::Error::from))
        .map_err(|source| csv_error(path, source))
}

use crate::domain::model::{DateAdded, Dataset, Runtime, Title};
use crate::domain::ports::Storage;
use crate::utils::error::{EdaError, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use std::io::{Cursor, Read};
use std::sync::LazyLock;

pub const REQUIRED_COLUMNS: [&str; 4] = ["date_added", "release_year", "country", "listed_in"];
pub const DATE_COLUMN: &str = "date_added";

/// 依序嘗試的日期格式，第一個能解析首筆資料者即為推斷格式
pub const DATE_FORMATS: [&str; 6] = [
    "%B %d, %Y",
    "%b %d, %Y",
    "%Y-%m-%d",
    "%d-%b-%y",
    "%m/%d/%Y",
    "%d/%m/%Y",
];

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s*(min|Seasons?)$").expect("duration pattern is valid")
});

#[derive(Debug, Deserialize)]
struct RawTitle {
    #[serde(default)]
    show_id: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    director: Option<String>,
    #[serde(default)]
    cast: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    date_added: Option<String>,
    release_year: i32,
    #[serde(default)]
    rating: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    listed_in: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Reads the archive through `storage` and parses its first file.
pub async fn load_dataset<S: Storage>(storage: &S, archive_path: &str) -> Result<Dataset> {
    let bytes = match storage.read_file(archive_path).await {
        Ok(bytes) => bytes,
        Err(EdaError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(EdaError::FileNotFound {
                path: archive_path.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    tracing::debug!("Read {} bytes from {}", bytes.len(), archive_path);
    parse_archive(&bytes, archive_path)
}

pub fn parse_archive(bytes: &[u8], archive_path: &str) -> Result<Dataset> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    // 取第一個非目錄的檔案
    let index = (0..archive.len())
        .find(|&i| archive.by_index(i).map(|f| f.is_file()).unwrap_or(false))
        .ok_or_else(|| EdaError::EmptyArchive {
            path: archive_path.to_string(),
        })?;

    let mut file = archive.by_index(index)?;
    tracing::info!("📂 Reading dataset '{}' from {}", file.name(), archive_path);

    let mut content = Vec::new();
    file.read_to_end(&mut content)?;

    parse_csv(content.as_slice())
}

pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();

    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(EdaError::MissingColumn {
                column: required.to_string(),
            });
        }
    }

    let mut missing: IndexMap<String, usize> = columns.iter().map(|c| (c.clone(), 0)).collect();
    let mut raw_titles = Vec::new();

    for record in reader.records() {
        let record = record?;
        for (column, value) in columns.iter().zip(record.iter()) {
            if value.is_empty() {
                if let Some(count) = missing.get_mut(column) {
                    *count += 1;
                }
            }
        }
        let raw: RawTitle = record.deserialize(Some(&headers))?;
        raw_titles.push(raw);
    }

    let date_format = infer_date_format(raw_titles.iter().filter_map(|r| r.date_added.as_deref()));
    match date_format {
        Some(format) => tracing::debug!("Inferred date format for {}: {}", DATE_COLUMN, format),
        None => tracing::warn!("Could not infer a date format for {}", DATE_COLUMN),
    }

    let mut unparsed = 0;
    let titles: Vec<Title> = raw_titles
        .into_iter()
        .map(|raw| {
            let date_added = match raw.date_added.as_deref() {
                Some(value) => {
                    let parsed = parse_date(value, date_format);
                    if parsed.is_none() {
                        unparsed += 1;
                        tracing::debug!("Unparseable {} value: '{}'", DATE_COLUMN, value);
                    }
                    parsed.map(DateAdded::Date)
                }
                None => None,
            };

            Title {
                show_id: raw.show_id,
                kind: raw.kind,
                title: raw.title,
                director: raw.director,
                cast: raw.cast,
                country: raw.country,
                date_added,
                release_year: raw.release_year,
                rating: raw.rating,
                duration: raw.duration.as_deref().and_then(parse_runtime),
                listed_in: raw.listed_in,
                description: raw.description,
            }
        })
        .collect();

    if unparsed > 0 {
        tracing::warn!(
            "⚠️ {} {} values could not be parsed and are treated as missing",
            unparsed,
            DATE_COLUMN
        );
        if let Some(count) = missing.get_mut(DATE_COLUMN) {
            *count += unparsed;
        }
    }

    tracing::info!("Loaded {} records with {} columns", titles.len(), columns.len());

    Ok(Dataset {
        columns,
        titles,
        missing,
        date_format: date_format.map(str::to_string),
    })
}

/// Picks the first candidate format that parses the first value.
pub fn infer_date_format<'a, I>(mut values: I) -> Option<&'static str>
where
    I: Iterator<Item = &'a str>,
{
    let first = values.next()?;
    DATE_FORMATS
        .iter()
        .copied()
        .find(|format| NaiveDate::parse_from_str(first, format).is_ok())
}

pub fn parse_date(value: &str, preferred: Option<&str>) -> Option<NaiveDate> {
    let value = value.trim();
    if let Some(date) = preferred.and_then(|format| NaiveDate::parse_from_str(value, format).ok()) {
        return Some(date);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

pub fn parse_runtime(value: &str) -> Option<Runtime> {
    let caps = DURATION_PATTERN.captures(value.trim())?;
    let amount: u32 = caps[1].parse().ok()?;
    if &caps[2] == "min" {
        Some(Runtime::Minutes(amount))
    } else {
        Some(Runtime::Seasons(amount))
    }
}

//! Loading people records
//!
//! The whole payload is fetched and parsed before the aggregation pass starts;
//! the engine never sees a partially loaded sequence. Sources beginning with
//! `http://` or `https://` are downloaded, anything else is read from disk.

use crate::error::LoadError;
use crate::record::Record;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Where the people JSON comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(String),
}

impl Source {
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Source::Url(source.to_string())
        } else {
            Source::File(source.to_string())
        }
    }
}

/// Load every record from `source`, blocking until the data is complete
pub fn load(source: &str, timeout: Duration) -> Result<Vec<Record>, LoadError> {
    match Source::parse(source) {
        Source::File(path) => load_file(Path::new(&path)),
        Source::Url(url) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(LoadError::Runtime)?;
            runtime.block_on(fetch_url(&url, timeout))
        }
    }
}

/// Read and parse a local JSON file
pub fn load_file(path: &Path) -> Result<Vec<Record>, LoadError> {
    tracing::debug!(path = %path.display(), "reading people file");
    let contents = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_records(&contents, &path.display().to_string())
}

/// Download and parse a remote JSON document
pub async fn fetch_url(url: &str, timeout: Duration) -> Result<Vec<Record>, LoadError> {
    tracing::debug!(url, timeout_secs = timeout.as_secs(), "fetching people JSON");
    let http_error = |e: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        source: e,
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(http_error)?;
    let response = client.get(url).send().await.map_err(http_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(http_error)?;
    parse_records(&body, url)
}

/// Parse a JSON array of objects into records
pub fn parse_records(contents: &str, origin: &str) -> Result<Vec<Record>, LoadError> {
    let value: Value = serde_json::from_str(contents).map_err(|e| LoadError::Parse {
        origin: origin.to_string(),
        source: e,
    })?;
    records_from_value(value, origin)
}

/// Convert an already parsed JSON array into records
pub fn records_from_value(value: Value, origin: &str) -> Result<Vec<Record>, LoadError> {
    let items = match value {
        Value::Array(items) => items,
        _ => {
            return Err(LoadError::NotAnArray {
                origin: origin.to_string(),
            })
        }
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(Record::new(index, fields)),
            _ => Err(LoadError::NotAnObject {
                origin: origin.to_string(),
                index,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(records = records.len(), origin, "loaded people records");
    Ok(records)
}

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::error::{CacheError, CacheErrorKind};
use crate::model::Step;

#[derive(Debug, Deserialize)]
struct TraceRow {
    op: String,
    key: Option<i64>,
    value: Option<i64>,
}

/// Parses a CSV access trace with the header `op,key,value`.
///
/// `value` is only read for `put`. For `resize` the `key` column carries the
/// new capacity. `clear` needs neither column.
pub fn parse_trace_csv(input: &str) -> Result<Vec<Step>, CacheError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input.as_bytes());

    let mut steps = Vec::new();
    for (index, row) in reader.deserialize::<TraceRow>().enumerate() {
        let row = row?;
        let path = format!("rows[{}]", index);
        steps.push(row_to_step(row, &path)?);
    }
    Ok(steps)
}

fn row_to_step(row: TraceRow, path: &str) -> Result<Step, CacheError> {
    let op = row.op.to_ascii_lowercase();
    let step = match op.as_str() {
        "put" => Step::Put {
            key: require(row.key, "key", path)?,
            value: require(row.value, "value", path)?,
        },
        "get" => Step::Get {
            key: require(row.key, "key", path)?,
        },
        "remove" => Step::Remove {
            key: require(row.key, "key", path)?,
        },
        "resize" => Step::Resize {
            capacity: require(row.key, "key", path)?,
        },
        "clear" => Step::Clear,
        other => {
            return Err(CacheError::new(
                CacheErrorKind::InvalidTrace,
                format!("unknown op '{}'", other),
            )
            .with_path(path));
        }
    };
    Ok(step)
}

fn require(value: Option<i64>, column: &str, path: &str) -> Result<i64, CacheError> {
    value.ok_or_else(|| {
        CacheError::new(
            CacheErrorKind::InvalidTrace,
            format!("missing '{}' column", column),
        )
        .with_path(path)
    })
}

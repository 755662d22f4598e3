use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use trace_slicer_core::log::{LogSource, RecordLog};
use trace_slicer_core::model::{LogRecord, RecordId};

#[derive(Debug, Serialize)]
pub struct DumpedRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: LogRecord,
}

fn load_log(path: &Path) -> Result<RecordLog> {
    RecordLog::load(path).with_context(|| format!("Failed to load log at {}", path.display()))
}

/// Print the number of records in a log.
pub fn count_command(log_path: &Path) -> Result<()> {
    let log = load_log(log_path)?;
    println!("{}", log.len());
    Ok(())
}

/// Select records with ids in `from..=to` (both bounds optional).
pub fn collect_records(
    log: &RecordLog,
    from: Option<RecordId>,
    to: Option<RecordId>,
) -> Result<Vec<DumpedRecord>> {
    if let (Some(lo), Some(hi)) = (from, to) {
        if lo > hi {
            return Err(anyhow!("--from ({lo}) must not be greater than --to ({hi})"));
        }
    }
    Ok(log
        .iter()
        .filter(|(id, _)| from.map_or(true, |lo| *id >= lo) && to.map_or(true, |hi| *id <= hi))
        .map(|(id, record)| DumpedRecord { id, record: *record })
        .collect())
}

/// Print records with their ids, so start records for `slice` can be chosen.
pub fn dump_command(
    log_path: &Path,
    from: Option<RecordId>,
    to: Option<RecordId>,
    json: bool,
) -> Result<()> {
    let log = load_log(log_path)?;
    let records = collect_records(&log, from, to)?;

    if json {
        let serialized =
            serde_json::to_string_pretty(&records).context("Failed to serialize records to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    if records.is_empty() {
        println!("(no records)");
        return Ok(());
    }
    for entry in records {
        println!("{}\t{}", entry.id, entry.record);
    }
    Ok(())
}

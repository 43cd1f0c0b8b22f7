//! Implementation of the `dblease status` command.

use crate::cli::StatusArgs;
use crate::config::Config;
use crate::error::{LeaseError, Result};
use crate::exit_codes;
use crate::store::{LockRecord, SqliteStore};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One line of `status` output.
#[derive(Debug, Serialize)]
struct StatusEntry<'a> {
    #[serde(flatten)]
    record: &'a LockRecord,
    expired: bool,
}

/// Execute the `dblease status` command.
pub fn cmd_status(config: &Config, args: StatusArgs) -> Result<i32> {
    let store = SqliteStore::open(config)?;
    let records = store.list_records()?;
    let now = Utc::now();

    if args.json {
        println!("{}", render_json(&records, now)?);
    } else {
        print!("{}", render_text(&records, now));
    }

    Ok(exit_codes::SUCCESS)
}

fn render_json(records: &[LockRecord], now: DateTime<Utc>) -> Result<String> {
    let entries: Vec<StatusEntry<'_>> = records
        .iter()
        .map(|record| StatusEntry {
            record,
            expired: record.is_expired(now),
        })
        .collect();

    serde_json::to_string_pretty(&entries)
        .map_err(|e| LeaseError::UserError(format!("failed to serialize status: {}", e)))
}

fn render_text(records: &[LockRecord], now: DateTime<Utc>) -> String {
    if records.is_empty() {
        return "No locks.\n".to_string();
    }

    let mut out = format!("Locks ({}):\n\n", records.len());
    for record in records {
        out.push_str(&format!("  {}:\n", record.name));
        out.push_str(&format!("    Owner:      {}\n", record.owner));
        out.push_str(&format!(
            "    Expiry:     {}\n",
            record.expiry.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if record.is_expired(now) {
            out.push_str(&format!(
                "    Status:     EXPIRED ({})\n",
                record.remaining_string(now)
            ));
        } else {
            out.push_str(&format!(
                "    Remaining:  {}\n",
                record.remaining_string(now)
            ));
        }
        out.push('\n');
    }

    let expired = records.iter().filter(|r| r.is_expired(now)).count();
    if expired > 0 {
        out.push_str(&format!(
            "Note: {} lease(s) expired and can be claimed by any owner.\n",
            expired
        ));
    }

    out
}

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::chart::{Figures, PieChart, ScatterChart};

use super::model::{
    COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE, COL_PAYLOAD_MASS, LaunchRecord,
};

// ---------------------------------------------------------------------------
// Export of the current view
// ---------------------------------------------------------------------------

/// Write launch records as CSV using the canonical column headers.
///
/// The header row is written even when `records` is empty.
pub fn write_records_csv<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer
        .write_record([COL_LAUNCH_SITE, COL_PAYLOAD_MASS, COL_CLASS, COL_BOOSTER_CATEGORY])
        .context("writing CSV header")?;
    for rec in records {
        csv_writer.serialize(rec).context("writing CSV record")?;
    }
    csv_writer.flush().context("flushing CSV output")?;
    Ok(())
}

/// Save launch records to a CSV file.
pub fn save_records_csv<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_records_csv(file, records)
}

/// Save both chart descriptions as pretty-printed JSON.
pub fn save_figures_json(path: &Path, pie: &PieChart, scatter: &ScatterChart) -> Result<()> {
    let text = serde_json::to_string_pretty(&Figures { pie, scatter })
        .context("serializing chart descriptions")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

//! Report sinks for finalized VWAP rows.
//!
//! Rows arrive already sorted; a sink only formats and writes them. Hour
//! buckets are rendered as clock labels (market open + offset hours) and
//! VWAPs with four decimal places. A sink may receive both hourly and daily
//! rows; call [`ReportSink::finish`] once after the last write.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use itch_core::config::ReportFormat;
use itch_core::error::{ItchError, Result};
use itch_core::time_util::SessionClock;
use itch_core::{DailyVwapRow, VwapRow};
use serde::Serialize;

/// Consumer of finalized rows.
pub trait ReportSink {
    fn write_hourly(&mut self, rows: &[VwapRow]) -> Result<()>;
    fn write_daily(&mut self, rows: &[DailyVwapRow]) -> Result<()>;

    /// Complete the output. Nothing may be written afterwards.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

fn report_err(e: impl std::fmt::Display) -> ItchError {
    ItchError::Report(e.to_string())
}

#[inline]
fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// `Stock,Hour,VWAP` rows (hourly) or `Stock,Volume,Notional,VWAP` (daily).
/// Each section carries its own header, so records are written flexibly.
pub struct CsvReportSink<W: Write> {
    writer: csv::Writer<W>,
    clock: SessionClock,
}

impl<W: Write> CsvReportSink<W> {
    pub fn new(inner: W, clock: SessionClock) -> Self {
        let writer = csv::WriterBuilder::new().flexible(true).from_writer(inner);
        Self { writer, clock }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(report_err)
    }
}

impl<W: Write> ReportSink for CsvReportSink<W> {
    fn write_hourly(&mut self, rows: &[VwapRow]) -> Result<()> {
        self.writer.write_record(["Stock", "Hour", "VWAP"]).map_err(report_err)?;
        for row in rows {
            let label = self.clock.hour_label(row.hour);
            let vwap = format!("{:.4}", row.vwap);
            self.writer
                .write_record([row.symbol.as_str(), label.as_str(), vwap.as_str()])
                .map_err(report_err)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_daily(&mut self, rows: &[DailyVwapRow]) -> Result<()> {
        self.writer.write_record(["Stock", "Volume", "Notional", "VWAP"]).map_err(report_err)?;
        for row in rows {
            let volume = row.volume.to_string();
            let notional = format!("{:.4}", row.notional);
            let vwap = format!("{:.4}", row.vwap);
            self.writer
                .write_record([row.symbol.as_str(), volume.as_str(), notional.as_str(), vwap.as_str()])
                .map_err(report_err)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HourlyRecord {
    stock: String,
    hour: String,
    hour_offset: i64,
    vwap: f64,
}

#[derive(Serialize)]
struct DailyRecord {
    stock: String,
    volume: u64,
    notional: f64,
    vwap: f64,
}

#[derive(Serialize, Default)]
struct JsonDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    hourly: Option<Vec<HourlyRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    daily: Option<Vec<DailyRecord>>,
}

/// One pretty-printed JSON object, `{ "hourly": [...], "daily": [...] }`.
/// Rows are buffered and the document is written by [`ReportSink::finish`];
/// a section that was never written is omitted.
pub struct JsonReportSink<W: Write> {
    writer: W,
    clock: SessionClock,
    doc: JsonDocument,
    finished: bool,
}

impl<W: Write> JsonReportSink<W> {
    pub fn new(writer: W, clock: SessionClock) -> Self {
        Self { writer, clock, doc: JsonDocument::default(), finished: false }
    }

    /// Finish (if not done yet) and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.finish()?;
        Ok(self.writer)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.finished {
            return Err(ItchError::Report("JSON report already finished".to_string()));
        }
        Ok(())
    }
}

impl<W: Write> ReportSink for JsonReportSink<W> {
    fn write_hourly(&mut self, rows: &[VwapRow]) -> Result<()> {
        self.ensure_open()?;
        let clock = self.clock;
        let section = self.doc.hourly.get_or_insert_with(Vec::new);
        section.extend(rows.iter().map(|r| HourlyRecord {
            stock: r.symbol.as_str().to_string(),
            hour: clock.hour_label(r.hour),
            hour_offset: r.hour,
            vwap: round4(r.vwap),
        }));
        Ok(())
    }

    fn write_daily(&mut self, rows: &[DailyVwapRow]) -> Result<()> {
        self.ensure_open()?;
        let section = self.doc.daily.get_or_insert_with(Vec::new);
        section.extend(rows.iter().map(|r| DailyRecord {
            stock: r.symbol.as_str().to_string(),
            volume: r.volume,
            notional: round4(r.notional),
            vwap: round4(r.vwap),
        }));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        serde_json::to_writer_pretty(&mut self.writer, &self.doc).map_err(report_err)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Keeps rows for inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub hourly: Vec<VwapRow>,
    pub daily: Vec<DailyVwapRow>,
}

impl ReportSink for MemorySink {
    fn write_hourly(&mut self, rows: &[VwapRow]) -> Result<()> {
        self.hourly.extend_from_slice(rows);
        Ok(())
    }

    fn write_daily(&mut self, rows: &[DailyVwapRow]) -> Result<()> {
        self.daily.extend_from_slice(rows);
        Ok(())
    }
}

/// Create a file-backed sink in the configured format. The file is created
/// (or truncated) immediately.
pub fn create_file_sink(
    path: &Path,
    format: ReportFormat,
    clock: SessionClock,
) -> Result<Box<dyn ReportSink>> {
    let file = BufWriter::new(File::create(path)?);
    let sink: Box<dyn ReportSink> = match format {
        ReportFormat::Csv => Box::new(CsvReportSink::new(file, clock)),
        ReportFormat::Json => Box::new(JsonReportSink::new(file, clock)),
    };
    Ok(sink)
}

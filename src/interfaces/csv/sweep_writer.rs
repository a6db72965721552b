use crate::application::engine::SweepReport;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct SweepRow<'a> {
    kind: &'a str,
    id: u32,
    status: &'a str,
}

/// Writes a sweep report as `kind,id,status` rows.
pub struct SweepWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SweepWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink),
        }
    }

    pub fn write_report(&mut self, report: &SweepReport) -> Result<()> {
        // Header first so an empty sweep still produces a parseable file.
        self.writer.write_record(["kind", "id", "status"])?;
        let clicks = report.expired_clicks.iter().map(|id| ("click", *id));
        let offers = report.expired_offers.iter().map(|id| ("offer", *id));
        for (kind, id) in clicks.chain(offers) {
            self.writer.serialize(SweepRow {
                kind,
                id,
                status: "expired",
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_report() {
        let report = SweepReport {
            expired_clicks: vec![3, 8],
            expired_offers: vec![21],
        };
        let mut out = Vec::new();
        SweepWriter::new(&mut out).write_report(&report).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "kind,id,status\nclick,3,expired\nclick,8,expired\noffer,21,expired\n"
        );
    }

    #[test]
    fn test_write_empty_report() {
        let mut out = Vec::new();
        SweepWriter::new(&mut out)
            .write_report(&SweepReport::default())
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "kind,id,status\n");
    }
}

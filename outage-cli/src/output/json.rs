//! JSON output formatting.

use anyhow::Result;
use outage_core::{Anomaly, Clock, SiteOutage, detect_anomalies};
use serde::Serialize;

/// JSON output for one site outage.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutageOutput<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub begin: &'a str,
    pub end: &'a str,
    pub duration_seconds: i64,
    pub warnings: Vec<Anomaly>,
}

/// JSON formatter.
pub struct JsonFormatter<'a> {
    pretty: bool,
    clock: &'a dyn Clock,
}

impl<'a> JsonFormatter<'a> {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool, clock: &'a dyn Clock) -> Self {
        Self { pretty, clock }
    }

    /// Formats site outages, in input order, with their anomaly tags.
    pub fn format_report(&self, outages: &[SiteOutage]) -> Result<String> {
        let entries = outages
            .iter()
            .map(|outage| self.entry(outage))
            .collect::<Result<Vec<_>>>()?;

        self.to_json(&entries)
    }

    fn entry<'o>(&self, outage: &'o SiteOutage) -> Result<OutageOutput<'o>> {
        let begin = outage.begin_at()?;
        let end = outage.end_at()?;
        Ok(OutageOutput {
            id: &outage.id,
            name: &outage.name,
            begin: &outage.begin,
            end: &outage.end,
            duration_seconds: (end - begin).num_seconds(),
            warnings: detect_anomalies(begin, end, self.clock).into_iter().collect(),
        })
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

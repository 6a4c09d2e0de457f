//! Timing-log aggregation: grouped means and quartiles.
//!
//! The executor emits one line per physical trial. Repeated trials share
//! identical descriptive columns, so grouping on those columns and
//! averaging `TimeNS` collapses the repeat amplification introduced at
//! configuration time back into one statistic per scenario combination.

use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Descriptive columns forming the group key, in key order.
pub const GROUP_COLUMNS: [&str; 6] = [
    "DatasetSize",
    "Distribution",
    "Parameter",
    "#threads",
    "SearchAlgorithm",
    "RecordSizeBytes",
];

/// Column holding the measured duration in nanoseconds.
pub const DURATION_COLUMN: &str = "TimeNS";

/// Ordering of groups in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupOrder {
    /// Sort groups lexicographically by key tuple.
    #[default]
    Sorted,
    /// Preserve the order in which group keys first appear in the log.
    /// The combination order of a scenario can itself be meaningful.
    FirstSeen,
}

/// Five-number distribution of one group's durations.
///
/// Quartiles use linear interpolation between the closest ranks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quartiles {
    /// Smallest duration
    pub min: f64,
    /// 25th percentile
    pub q1: f64,
    /// 50th percentile
    pub median: f64,
    /// 75th percentile
    pub q3: f64,
    /// Largest duration
    pub max: f64,
}

/// Summary statistics for one group of timing records.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    /// Group key values, in [`GROUP_COLUMNS`] order
    pub key: Vec<String>,
    /// Number of timing records in the group
    pub samples: usize,
    /// Arithmetic mean duration in nanoseconds
    pub mean_ns: f64,
    /// Per-group duration distribution
    pub quartiles: Quartiles,
}

/// Grouped summary of one result artifact.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    groups: Vec<GroupSummary>,
}

impl Summary {
    /// All groups, in the requested order.
    #[must_use]
    pub fn groups(&self) -> &[GroupSummary] {
        &self.groups
    }

    /// Mean duration for an exact group key, if present.
    #[must_use]
    pub fn mean_ns(&self, key: &[&str]) -> Option<f64> {
        self.groups
            .iter()
            .find(|g| g.key.iter().map(String::as_str).eq(key.iter().copied()))
            .map(|g| g.mean_ns)
    }

    /// Render the summary as a console table. With `detail` the per-group
    /// distribution is included alongside the mean.
    #[must_use]
    pub fn render(&self, detail: bool) -> String {
        use fmt::Write;

        let mut out = String::new();
        let _ = write!(
            out,
            "{:<12} {:<8} {:<30} {:<9} {:<16} {:<16} {:>8} {:>12}",
            GROUP_COLUMNS[0],
            GROUP_COLUMNS[1],
            GROUP_COLUMNS[2],
            GROUP_COLUMNS[3],
            GROUP_COLUMNS[4],
            GROUP_COLUMNS[5],
            "Samples",
            "MeanNS"
        );
        if detail {
            let _ = write!(
                out,
                " {:>10} {:>10} {:>10} {:>10} {:>10}",
                "Min", "P25", "Median", "P75", "Max"
            );
        }
        out.push('\n');

        for group in &self.groups {
            let _ = write!(
                out,
                "{:<12} {:<8} {:<30} {:<9} {:<16} {:<16} {:>8} {:>12.2}",
                group.key[0],
                group.key[1],
                group.key[2],
                group.key[3],
                group.key[4],
                group.key[5],
                group.samples,
                group.mean_ns
            );
            if detail {
                let q = &group.quartiles;
                let _ = write!(
                    out,
                    " {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                    q.min, q.q1, q.median, q.q3, q.max
                );
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Summarize a result artifact on disk.
///
/// # Errors
///
/// Returns [`Error::MalformedLog`] for a missing required column, a short
/// record, or a non-numeric duration; no partial summary is produced.
pub fn summarize(path: impl AsRef<Path>, order: GroupOrder) -> Result<Summary> {
    let file = File::open(path.as_ref())?;
    summarize_reader(BufReader::new(file), order)
}

/// Summarize a timing log from any buffered reader.
///
/// Fields are split on any run of whitespace or tab characters so that
/// formatting drift between executor versions does not break parsing.
/// Columns beyond the required ones (such as the `Run` iteration index)
/// are ignored.
///
/// # Errors
///
/// Same conditions as [`summarize`].
pub fn summarize_reader<R: BufRead>(reader: R, order: GroupOrder) -> Result<Summary> {
    let mut header: Option<Header> = None;
    let mut groups: Vec<(Vec<String>, Vec<f64>)> = Vec::new();
    let mut index: HashMap<Vec<String>, usize> = HashMap::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        let hdr = match &header {
            Some(hdr) => hdr,
            None => {
                header = Some(Header::parse(&fields, line_no)?);
                continue;
            }
        };

        if fields.len() != hdr.field_count {
            return Err(Error::MalformedLog {
                line: line_no,
                reason: format!(
                    "expected {} fields, found {}",
                    hdr.field_count,
                    fields.len()
                ),
            });
        }
        let key: Vec<String> = hdr
            .group_indices
            .iter()
            .map(|&idx| fields[idx].to_string())
            .collect();
        let duration: f64 = fields[hdr.duration_index].parse().map_err(|_| {
            Error::MalformedLog {
                line: line_no,
                reason: format!(
                    "non-numeric {DURATION_COLUMN} value '{}'",
                    fields[hdr.duration_index]
                ),
            }
        })?;

        if let Some(&slot) = index.get(&key) {
            groups[slot].1.push(duration);
        } else {
            index.insert(key.clone(), groups.len());
            groups.push((key, vec![duration]));
        }
    }

    if header.is_none() {
        return Err(Error::MalformedLog {
            line: 1,
            reason: "empty timing log".to_string(),
        });
    }

    if order == GroupOrder::Sorted {
        groups.sort_by(|a, b| a.0.cmp(&b.0));
    }

    let groups = groups
        .into_iter()
        .map(|(key, durations)| summarize_group(key, durations))
        .collect();
    Ok(Summary { groups })
}

struct Header {
    group_indices: [usize; 6],
    duration_index: usize,
    field_count: usize,
}

impl Header {
    fn parse(fields: &[&str], line_no: usize) -> Result<Self> {
        let position = |name: &str| -> Result<usize> {
            fields.iter().position(|f| *f == name).ok_or_else(|| {
                Error::MalformedLog {
                    line: line_no,
                    reason: format!("missing required column '{name}'"),
                }
            })
        };

        let mut group_indices = [0usize; 6];
        for (slot, name) in group_indices.iter_mut().zip(GROUP_COLUMNS) {
            *slot = position(name)?;
        }
        Ok(Self {
            group_indices,
            duration_index: position(DURATION_COLUMN)?,
            field_count: fields.len(),
        })
    }
}

fn summarize_group(key: Vec<String>, mut durations: Vec<f64>) -> GroupSummary {
    durations.sort_by(f64::total_cmp);
    let samples = durations.len();
    let mean_ns = durations.iter().sum::<f64>() / samples as f64;
    let quartiles = Quartiles {
        min: durations[0],
        q1: percentile(&durations, 0.25),
        median: percentile(&durations, 0.50),
        q3: percentile(&durations, 0.75),
        max: durations[samples - 1],
    };
    GroupSummary {
        key,
        samples,
        mean_ns,
        quartiles,
    }
}

fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let fraction = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER_LINE: &str =
        "Run\tDatasetSize\tDistribution\tParameter\t#threads\tSearchAlgorithm\tRecordSizeBytes\tTimeNS";

    fn record(run: usize, algorithm: &str, time_ns: u64) -> String {
        format!("{run}\t1000\tuniform\t42\t1\t{algorithm}\t8\t{time_ns}")
    }

    fn log(lines: &[String]) -> String {
        let mut out = String::from(HEADER_LINE);
        for line in lines {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_mean_over_repeat_amplification() {
        let mut lines: Vec<String> = (0..9).map(|run| record(run, "bs", 100)).collect();
        lines.push(record(9, "bs", 1000));
        let summary = summarize_reader(Cursor::new(log(&lines)), GroupOrder::Sorted).unwrap();

        assert_eq!(summary.groups().len(), 1);
        let mean = summary
            .mean_ns(&["1000", "uniform", "42", "1", "bs", "8"])
            .unwrap();
        assert!((mean - 190.0).abs() < f64::EPSILON);
        assert_eq!(summary.groups()[0].samples, 10);
    }

    #[test]
    fn test_sorted_and_first_seen_orders_diverge() {
        // "zz" appears before "aa": lexicographic order must flip them,
        // first-seen order must not.
        let lines = vec![record(0, "zz", 10), record(1, "aa", 20)];

        let sorted = summarize_reader(Cursor::new(log(&lines)), GroupOrder::Sorted).unwrap();
        let stable = summarize_reader(Cursor::new(log(&lines)), GroupOrder::FirstSeen).unwrap();

        assert_eq!(sorted.groups()[0].key[4], "aa");
        assert_eq!(sorted.groups()[1].key[4], "zz");
        assert_eq!(stable.groups()[0].key[4], "zz");
        assert_eq!(stable.groups()[1].key[4], "aa");
    }

    #[test]
    fn test_non_numeric_duration_is_fatal() {
        let lines = vec![record(0, "bs", 100), "0\t1000\tuniform\t42\t1\tbs\t8\tfast".to_string()];
        let err = summarize_reader(Cursor::new(log(&lines)), GroupOrder::Sorted).unwrap_err();
        assert!(matches!(err, Error::MalformedLog { line: 3, .. }));
    }

    #[test]
    fn test_short_record_is_fatal() {
        let lines = vec!["0\t1000\tuniform\t42\t1\tbs".to_string()];
        let err = summarize_reader(Cursor::new(log(&lines)), GroupOrder::Sorted).unwrap_err();
        assert!(matches!(err, Error::MalformedLog { line: 2, .. }));
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let input = "Run\tDatasetSize\tDistribution\tParameter\t#threads\tSearchAlgorithm\tTimeNS\n";
        let err = summarize_reader(Cursor::new(input), GroupOrder::Sorted).unwrap_err();
        match err {
            Error::MalformedLog { line, reason } => {
                assert_eq!(line, 1);
                assert!(reason.contains("RecordSizeBytes"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_log_is_fatal() {
        let err = summarize_reader(Cursor::new(""), GroupOrder::Sorted).unwrap_err();
        assert!(matches!(err, Error::MalformedLog { .. }));
    }

    #[test]
    fn test_whitespace_tolerant_splitting() {
        let input = "Run  DatasetSize Distribution\tParameter #threads SearchAlgorithm RecordSizeBytes  TimeNS\n\
                     0  1000 uniform\t42 1 bs 8  150\n\
                     1  1000 uniform 42\t1 bs 8  250\n";
        let summary = summarize_reader(Cursor::new(input), GroupOrder::Sorted).unwrap();
        let mean = summary
            .mean_ns(&["1000", "uniform", "42", "1", "bs", "8"])
            .unwrap();
        assert!((mean - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_quartiles_interpolate_between_ranks() {
        let lines: Vec<String> = [1u64, 2, 3, 4]
            .iter()
            .enumerate()
            .map(|(run, &t)| record(run, "bs", t))
            .collect();
        let summary = summarize_reader(Cursor::new(log(&lines)), GroupOrder::Sorted).unwrap();
        let q = &summary.groups()[0].quartiles;

        assert!((q.min - 1.0).abs() < f64::EPSILON);
        assert!((q.q1 - 1.75).abs() < f64::EPSILON);
        assert!((q.median - 2.5).abs() < f64::EPSILON);
        assert!((q.q3 - 3.25).abs() < f64::EPSILON);
        assert!((q.max - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let lines = vec![record(0, "bs", 100)];
        let summary = summarize_reader(Cursor::new(log(&lines)), GroupOrder::Sorted).unwrap();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"mean_ns\":100.0"));
    }
}

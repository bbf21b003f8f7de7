//! Payment record parsing.
//!
//! Input files carry one record per line in the form
//! `time, id1, id2, amount, message`, preceded by a single header line.
//! Fields are separated by `", "`; the trailing message field may itself
//! contain that separator, so the line is split at most four times.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::{PayTrustError, Result};
use crate::types::AccountId;

const FIELD_SEPARATOR: &str = ", ";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// PaymentRecord
// ---------------------------------------------------------------------------

/// One parsed payment.
///
/// Only the two account ids drive the graph; timestamp and amount are
/// carried for reporting and tolerated when malformed (a record with a
/// garbled timestamp is still a payment between two real accounts).
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub time: Option<NaiveDateTime>,
    pub payer: AccountId,
    pub payee: AccountId,
    pub amount: Option<f64>,
    pub message: Option<String>,
}

/// Parse a single record line. `line_no` is 1-based and only used for
/// error reporting.
pub fn parse_record(line: &str, line_no: usize) -> Result<PaymentRecord> {
    let fields: Vec<&str> = line.splitn(5, FIELD_SEPARATOR).collect();
    if fields.len() < 4 {
        return Err(PayTrustError::MalformedRecord {
            line: line_no,
            reason: format!("expected at least 4 fields, found {}", fields.len()),
        });
    }

    let payer = fields[1].trim();
    let payee = fields[2].trim();
    if payer.is_empty() || payee.is_empty() {
        return Err(PayTrustError::MalformedRecord {
            line: line_no,
            reason: "empty account id".to_string(),
        });
    }

    Ok(PaymentRecord {
        time: NaiveDateTime::parse_from_str(fields[0].trim(), TIME_FORMAT).ok(),
        payer: AccountId::from(payer),
        payee: AccountId::from(payee),
        amount: fields[3].trim().parse::<f64>().ok(),
        message: fields.get(4).map(|m| m.trim_end().to_string()),
    })
}

// ---------------------------------------------------------------------------
// RecordReader
// ---------------------------------------------------------------------------

/// Iterator over the records of a payment file.
///
/// Consumes the header line up front; blank lines are skipped. Each item
/// is either a parsed record or the error for that line, so callers choose
/// their own skip/abort policy.
pub struct RecordReader<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
}

impl RecordReader<BufReader<File>> {
    /// Open a payment file and position past its header.
    pub fn open(path: &Path) -> Result<Self> {
        Self::new(BufReader::new(File::open(path)?))
    }
}

impl<R: BufRead> RecordReader<R> {
    /// Wrap any buffered reader, consuming the header line.
    pub fn new(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        if let Some(header) = lines.next() {
            header?;
        }
        Ok(Self { lines, line_no: 1 })
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<PaymentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(parse_record(&line, self.line_no));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
use anyhow::Context;
use anyhow::{Result, bail};

use crate::args::Cli;
use mailboxlayer::{SyntaxReport, ValidationResult, ValidatorError};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
pub struct OutputRow {
    pub email: String,
    pub valid: bool,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub result: Option<ValidationResult>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub syntax: Option<SyntaxReport>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error_code: Option<i64>,
}

impl OutputRow {
    pub fn from_result(email: &str, result: &ValidationResult) -> Self {
        Self {
            email: email.to_string(),
            valid: result.is_valid(),
            result: Some(result.clone()),
            syntax: None,
            error: None,
            error_code: None,
        }
    }

    pub fn from_syntax(email: &str, report: SyntaxReport) -> Self {
        Self {
            email: email.to_string(),
            valid: report.ok,
            result: None,
            syntax: Some(report),
            error: None,
            error_code: None,
        }
    }

    pub fn from_error(email: &str, err: &ValidatorError) -> Self {
        Self {
            email: email.to_string(),
            valid: false,
            result: None,
            syntax: None,
            error: Some(err.to_string()),
            error_code: err.code(),
        }
    }
}

pub fn write_reports(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => {
            write_human(rows);
            Ok(())
        }
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

pub fn any_invalid(rows: &[OutputRow]) -> bool {
    rows.iter().any(|row| !row.valid)
}

fn write_human(rows: &[OutputRow]) {
    for row in rows {
        if let Some(err) = error_text(row) {
            println!("[ERROR]   {} :: {}", row.email, err);
            continue;
        }
        if let Some(report) = &row.syntax {
            if report.ok {
                println!("[OK]      {}", row.email);
            } else {
                println!("[INVALID] {} :: {}", row.email, report.reasons.join("; "));
            }
            continue;
        }
        if let Some(result) = &row.result {
            let status = if row.valid { "[OK]     " } else { "[INVALID]" };
            println!(
                "{status} {} :: format={} mx={} smtp={} score={:.2}",
                row.email,
                result.is_format_valid(),
                result.is_mx_found(),
                result.is_smtp_valid(),
                result.quality_score()
            );
            if let Some(suggestion) = result.suggestion() {
                println!("          did you mean: {suggestion}");
            }
            let flags = classification_flags(result);
            if !flags.is_empty() {
                println!("          flags: {}", flags.join(", "));
            }
        }
    }
}

/// Error message, suffixed with the provider code when there is one.
fn error_text(row: &OutputRow) -> Option<String> {
    let err = row.error.as_ref()?;
    Some(match row.error_code {
        Some(code) => format!("{err} (code {code})"),
        None => err.clone(),
    })
}

fn classification_flags(result: &ValidationResult) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if result.is_role() {
        flags.push("role");
    }
    if result.is_disposable() {
        flags.push("disposable");
    }
    if result.is_free() {
        flags.push("free");
    }
    if result.is_catch_all() == Some(true) {
        flags.push("catch-all");
    }
    flags
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes()).context("write JSON report")?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_rows: &[OutputRow], _cli: &Cli) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf).context("write NDJSON report")?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_rows: &[OutputRow], _cli: &Cli) -> Result<()> {
    bail!("format=ndjson nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-csv")]
const CSV_HEADER: [&str; 12] = [
    "email",
    "valid",
    "format_valid",
    "mx_found",
    "smtp_check",
    "catch_all",
    "role",
    "disposable",
    "free",
    "score",
    "did_you_mean",
    "error",
];

#[cfg(feature = "with-csv")]
fn csv_record(row: &OutputRow) -> Vec<String> {
    let flag = |value: bool| value.to_string();
    let mut record = vec![row.email.clone(), flag(row.valid)];
    match &row.result {
        Some(result) => {
            record.push(flag(result.is_format_valid()));
            record.push(flag(result.is_mx_found()));
            record.push(flag(result.is_smtp_valid()));
            record.push(result.is_catch_all().map(flag).unwrap_or_default());
            record.push(flag(result.is_role()));
            record.push(flag(result.is_disposable()));
            record.push(flag(result.is_free()));
            record.push(format!("{}", result.quality_score()));
            record.push(result.suggestion().unwrap_or_default().to_string());
        }
        None => record.extend(std::iter::repeat_n(String::new(), 9)),
    }
    let error = match (error_text(row), &row.syntax) {
        (Some(err), _) => err,
        (None, Some(report)) => report.reasons.join("|"),
        (None, None) => String::new(),
    };
    record.push(error);
    record
}

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data).context("write CSV report")?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_rows: &[OutputRow], _cli: &Cli) -> Result<()> {
    bail!("format=csv nécessite la feature 'with-csv'")
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    let written = std::fs::File::create(&tmp).and_then(|mut f| {
        f.write_all(bytes)?;
        f.sync_all()
    });
    if let Err(err) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("write {tmp}"));
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_row(email: &str, valid: bool) -> OutputRow {
        let fields = json!({
            "email": email,
            "format_valid": true,
            "mx_found": valid,
            "smtp_check": valid,
            "catch_all": null,
            "score": 0.5
        });
        let fields = fields.as_object().cloned().unwrap_or_default();
        OutputRow::from_result(email, &ValidationResult::from_response(&fields))
    }

    fn api_error() -> ValidatorError {
        ValidatorError::Api {
            code: 101,
            error_type: "invalid_access_key".to_string(),
            info: "You have not supplied a valid API Access Key.".to_string(),
        }
    }

    #[test]
    fn any_invalid_on_mixed_rows() {
        let ok = result_row("paul@company.com", true);
        let syntax_ok =
            OutputRow::from_syntax("a@b.com", mailboxlayer::check_syntax("a@b.com", Default::default()));
        assert!(!any_invalid(&[ok, syntax_ok]));

        let rows = vec![
            result_row("paul@company.com", true),
            result_row("nobody@company.com", false),
        ];
        assert!(any_invalid(&rows));

        let syntax_bad =
            OutputRow::from_syntax("bad", mailboxlayer::check_syntax("bad", Default::default()));
        assert!(any_invalid(&[syntax_bad]));
    }

    #[test]
    fn error_row_keeps_provider_code() {
        let row = OutputRow::from_error("paul@company.com", &api_error());
        assert!(!row.valid);
        assert_eq!(row.error_code, Some(101));
        assert_eq!(
            error_text(&row).as_deref(),
            Some("You have not supplied a valid API Access Key. (invalid_access_key) (code 101)")
        );
    }

    #[test]
    fn transport_error_row_has_no_code() {
        let err = ValidatorError::Transport {
            source: mailboxlayer::TransportError::other("connection refused"),
        };
        let row = OutputRow::from_error("paul@company.com", &err);
        assert_eq!(row.error_code, None);
        assert_eq!(
            error_text(&row).as_deref(),
            Some("transport error: connection refused")
        );
    }

    #[cfg(feature = "with-csv")]
    #[test]
    fn csv_record_matches_header() {
        let record = csv_record(&result_row("paul@company.com", true));
        assert_eq!(record.len(), CSV_HEADER.len());
        assert_eq!(record[0], "paul@company.com");
        assert_eq!(record[1], "true");
        assert_eq!(record[5], "");
        assert_eq!(record[9], "0.5");
        assert_eq!(record[11], "");
    }

    #[cfg(feature = "with-csv")]
    #[test]
    fn csv_error_row_is_padded() {
        let record = csv_record(&OutputRow::from_error("paul@company.com", &api_error()));
        assert_eq!(record.len(), CSV_HEADER.len());
        assert_eq!(record[1], "false");
        assert!(record[2..11].iter().all(String::is_empty));
        assert!(record[11].ends_with("(code 101)"));
    }

    #[cfg(any(feature = "with-serde", feature = "with-csv"))]
    #[test]
    fn atomic_write_leaves_no_tmp_file() {
        let dir = std::env::temp_dir().join(format!("mailboxlayer-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("report.json");
        let path = path.to_str().expect("utf-8 path");

        write_all_atomically(path, b"[]").expect("write report");
        assert_eq!(std::fs::read(path).expect("read report"), b"[]");
        assert!(!std::path::Path::new(&format!("{path}.tmp")).exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(any(feature = "with-serde", feature = "with-csv"))]
    #[test]
    fn failed_write_reports_path() {
        let dir = std::env::temp_dir().join(format!("mailboxlayer-cli-missing-{}", std::process::id()));
        let path = dir.join("nested").join("report.json");
        let path = path.to_str().expect("utf-8 path");

        let err = write_all_atomically(path, b"[]").expect_err("parent dir is missing");
        assert!(format!("{err:#}").contains("report.json.tmp"));
        assert!(!std::path::Path::new(&format!("{path}.tmp")).exists());
    }
}

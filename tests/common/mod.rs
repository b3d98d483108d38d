use std::io::Write;
use tempfile::NamedTempFile;

/// Writes a gateway config with zero latency and the given failure rates.
pub fn instant_config(payment: f64, status: f64, refund: f64) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create config file");
    write!(
        file,
        r#"{{
            "payment": {{"latency": {{"min_ms": 0, "max_ms": 0}}, "failure_rate": {payment}}},
            "status": {{"latency": {{"min_ms": 0, "max_ms": 0}}, "failure_rate": {status}}},
            "refund": {{"latency": {{"min_ms": 0, "max_ms": 0}}, "failure_rate": {refund}}}
        }}"#
    )
    .expect("Failed to write config file");
    file
}

pub fn batch_csv(rows: &[(&str, &str)]) -> NamedTempFile {
    let file = NamedTempFile::new().expect("Failed to create CSV file");
    let mut wtr = csv::Writer::from_path(file.path()).expect("Failed to open CSV writer");
    wtr.write_record(["id", "amount"]).expect("Failed to write header");
    for (id, amount) in rows {
        wtr.write_record([id, amount]).expect("Failed to write row");
    }
    wtr.flush().expect("Failed to flush CSV");
    file
}

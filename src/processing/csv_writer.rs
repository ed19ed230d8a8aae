use crate::models::moscap::cv::CvCurve;
use crate::models::moscap::family::FamilyEntry;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Write named columns of equal length to a CSV file.
pub fn write_columns<P: AsRef<Path>>(
    path: P,
    headers: &[&str],
    columns: &[Vec<f64>],
) -> io::Result<()> {
    if headers.len() != columns.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Headers count ({}) doesn't match data columns ({})",
                headers.len(),
                columns.len()
            ),
        ));
    }

    let mut file = File::create(path)?;
    writeln!(file, "{}", headers.join(","))?;

    let n_rows = columns.iter().map(|col| col.len()).max().unwrap_or(0);
    for i in 0..n_rows {
        let row: Vec<String> = columns
            .iter()
            .map(|col| {
                col.get(i)
                    .map(|v| format!("{v:.15e}"))
                    .unwrap_or_default()
            })
            .collect();
        writeln!(file, "{}", row.join(","))?;
    }

    Ok(())
}

/// Write one C-V curve: gate voltage, capacitance, sheet charge and the
/// per-point convergence flag (as 0/1, so the file stays purely numeric).
pub fn write_cv_curve<P: AsRef<Path>>(path: P, curve: &CvCurve) -> io::Result<()> {
    let converged: Vec<f64> = curve
        .points
        .iter()
        .map(|p| if p.converged { 1.0 } else { 0.0 })
        .collect();
    let charges: Vec<f64> = curve.points.iter().map(|p| p.sheet_charge).collect();

    write_columns(
        path,
        &["vg", "c_uf_cm2", "qs_c_m2", "converged"],
        &[
            curve.gate_voltages(),
            curve.capacitances(),
            charges,
            converged,
        ],
    )
}

/// Write a C-V family as one voltage column plus one capacitance column per
/// entry, labeled by the swept value.
pub fn write_cv_family<P: AsRef<Path>>(path: P, family: &[FamilyEntry]) -> io::Result<()> {
    let mut headers = vec!["vg".to_string()];
    let mut columns = Vec::with_capacity(family.len() + 1);

    columns.push(
        family
            .first()
            .map(|e| e.curve.gate_voltages())
            .unwrap_or_default(),
    );
    for entry in family {
        headers.push(format!("c_uf_cm2 [{}]", entry.value));
        columns.push(entry.curve.capacitances());
    }

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    write_columns(path, &header_refs, &columns)
}

//! Fixed-width text table rendering and report file output
//!
//! Reports are one file per lookup, not one file per row: the whole result
//! set renders as a single pipe-delimited table whose column widths are the
//! maximum of the header length and every cell's length, so all lines come
//! out the same length.

use std::path::{Path, PathBuf};

use tracing::info;

use scriptsync_common::Result;

use crate::domain::entities::{CompanyRecord, ReferenceCode};

/// A rectangular result set ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append one record; the cell count must match the header count
    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column widths: max of header length and every cell's length
    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|header| header.chars().count())
            .collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    /// Render the table: header row, dash separator, one line per record
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        out.push_str(&render_line(&self.headers, &widths));
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&render_line(&separator, &widths));
        for row in &self.rows {
            out.push_str(&render_line(row, &widths));
        }
        out
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - cell.chars().count();
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    format!("| {} |\n", padded.join(" | "))
}

/// Table for a document-type reference lookup
pub fn reference_code_table(rows: &[ReferenceCode]) -> TextTable {
    let mut table = TextTable::new(vec!["KOD".to_string(), "ACIKLAMA".to_string()]);
    for row in rows {
        table.push_row(vec![row.code.to_string(), row.description.clone()]);
    }
    table
}

/// Table for the company listing
pub fn company_table(rows: &[CompanyRecord]) -> TextTable {
    let mut table = TextTable::new(vec![
        "COMPANYNO".to_string(),
        "COMPANYNAME".to_string(),
        "SERVERNAME".to_string(),
        "DATABASENAME".to_string(),
    ]);
    for row in rows {
        table.push_row(vec![
            row.company_no.to_string(),
            row.company_name.clone(),
            row.server_name.clone(),
            row.database_name.clone(),
        ]);
    }
    table
}

/// Write a rendered table under the configured output folder, overwriting
/// any prior report of the same name. An empty result set writes nothing
/// and returns `None`, silently.
pub async fn write_report(
    workspace_root: &Path,
    output_folder: &str,
    file_name: &str,
    table: &TextTable,
) -> Result<Option<PathBuf>> {
    if table.is_empty() {
        return Ok(None);
    }

    let dir = workspace_root.join(output_folder);
    tokio::fs::create_dir_all(&dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, table.render()).await?;

    info!("Output: {}/{}", output_folder, file_name);
    Ok(Some(path))
}

//! Import of spreadsheet-exported preset sheets.
//!
//! The sheet has one header row and one preset per row. Columns are named
//! after the flat exporter keys (`preset`, `notes`, `thickness`, `width`,
//! `height`, `kerf`, `boxC` .. `slotI`, `style`); anything else is ignored.
//! Rows that cannot be read are skipped and reported, the rest still load.
//! Only a missing `preset` column rejects the whole sheet; a missing
//! attribute column makes every row unreadable instead.

use std::collections::HashSet;

use lc_core::{Field, FieldValue, ParameterSet, Preset};
use tracing::{debug, warn};

use crate::catalog::PresetCatalog;
use crate::validate::validate_name;
use crate::{CatalogError, CatalogResult};

const NAME_COLUMN: &str = "preset";

/// A row that was left out of the imported catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line where the record starts.
    pub line: usize,
    pub name: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct CsvImport {
    pub catalog: PresetCatalog,
    pub skipped: Vec<SkippedRow>,
}

pub fn parse_presets_csv(text: &str) -> CatalogResult<CsvImport> {
    let mut records = split_records(text)?.into_iter();
    let Some((header_line, header)) = records.next() else {
        return Err(CatalogError::Csv {
            line: 1,
            what: "missing header row".to_string(),
        });
    };

    let header: Vec<String> = header.into_iter().map(|h| h.trim().to_string()).collect();
    let column = |name: &str| header.iter().position(|h| h == name);

    let name_idx = column(NAME_COLUMN).ok_or_else(|| CatalogError::Csv {
        line: header_line,
        what: format!("no '{NAME_COLUMN}' column"),
    })?;

    let field_columns: Vec<(Field, Option<usize>)> = Field::ALL
        .into_iter()
        .filter(|f| f.is_preset_attribute())
        .map(|field| (field, column(field.sheet_column())))
        .collect();
    for (field, _) in field_columns.iter().filter(|(_, idx)| idx.is_none()) {
        warn!(column = field.sheet_column(), "preset sheet has no such column");
    }

    let mut presets = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped = Vec::new();

    for (line, cells) in records {
        let name = cells.get(name_idx).map(|s| s.trim().to_string());
        let outcome = match &name {
            None => Err("missing preset name".to_string()),
            Some(n) if seen.contains(n) => Err(format!("duplicate of an earlier '{n}' row")),
            Some(n) => read_row(n, &cells, &field_columns, presets.len()),
        };

        match outcome {
            Ok(preset) => {
                seen.insert(preset.name().to_string());
                presets.push(preset);
            }
            Err(reason) => {
                warn!(line, name = ?name, %reason, "skipping preset row");
                skipped.push(SkippedRow { line, name, reason });
            }
        }
    }

    debug!(
        loaded = presets.len(),
        skipped = skipped.len(),
        "imported preset sheet"
    );

    Ok(CsvImport {
        catalog: PresetCatalog::new(presets)?,
        skipped,
    })
}

fn read_row(
    name: &str,
    cells: &[String],
    columns: &[(Field, Option<usize>)],
    position: usize,
) -> Result<Preset, String> {
    validate_name(position, name).map_err(|e| e.to_string())?;

    let mut params = ParameterSet::default();
    for &(field, idx) in columns {
        let idx = idx.ok_or_else(|| format!("no '{}' column", field.sheet_column()))?;
        let raw = cells
            .get(idx)
            .ok_or_else(|| format!("missing '{}' cell", field.sheet_column()))?;
        let value = FieldValue::parse(field, raw).map_err(|e| e.to_string())?;
        params.set(field, value).map_err(|e| e.to_string())?;
    }
    Ok(Preset::new(name, params.values))
}

/// Split CSV text into records of unquoted cells, keeping the starting line
/// of each record. Blank lines are dropped.
fn split_records(text: &str) -> CatalogResult<Vec<(usize, Vec<String>)>> {
    let mut records = Vec::new();
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut quote_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    cell.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    cell.push('\n');
                }
                _ => cell.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => cells.push(std::mem::take(&mut cell)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                cells.push(std::mem::take(&mut cell));
                push_record(&mut records, record_line, std::mem::take(&mut cells));
                line += 1;
                record_line = line;
            }
            _ => cell.push(c),
        }
    }

    if in_quotes {
        return Err(CatalogError::Csv {
            line: quote_line,
            what: "unterminated quoted field".to_string(),
        });
    }
    if !cell.is_empty() || !cells.is_empty() {
        cells.push(cell);
        push_record(&mut records, record_line, cells);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<(usize, Vec<String>)>, line: usize, cells: Vec<String>) {
    let blank = cells.iter().all(|c| c.trim().is_empty());
    if !blank {
        records.push((line, cells));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "preset,notes,thickness,width,height,kerf,boxC,boxL,boxI,tabC,tabL,tabI,slotC,slotL,slotI,style";

    #[test]
    fn splits_quoted_cells() {
        let records = split_records("a,\"b,c\",\"say \"\"hi\"\"\"\r\nd,e,f\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].1, vec!["a", "b,c", "say \"hi\""]);
        assert_eq!(records[1], (2, vec!["d".into(), "e".into(), "f".into()]));
    }

    #[test]
    fn quoted_newline_keeps_record_start_line() {
        let records = split_records("h\n\"two\nlines\"\nnext\n").unwrap();
        assert_eq!(records[1].0, 2);
        assert_eq!(records[1].1, vec!["two\nlines"]);
        assert_eq!(records[2].0, 4);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = split_records("a,b\nc,\"oops\n").unwrap_err();
        assert!(matches!(err, CatalogError::Csv { line: 2, .. }));
    }

    #[test]
    fn applies_sheet_cell_conventions() {
        let text = format!(
            "{HEADER}\nply3mm,birch,3,450,300,0.1,NA,,0.05,0,0,0,0,0,0,stroke:#f00;\n"
        );
        let import = parse_presets_csv(&text).unwrap();
        assert!(import.skipped.is_empty());
        let preset = import.catalog.get("ply3mm").unwrap();
        let v = preset.values();
        assert!(v.joints.box_joint.clearance.is_nan());
        assert_eq!(v.joints.box_joint.length, 0.0);
        assert_eq!(v.joints.box_joint.inset, 0.05);
        assert_eq!(v.sheet_width, 450.0);
        assert_eq!(v.style, "stroke:#f00;");
    }

    #[test]
    fn header_without_preset_column_fails() {
        let err = parse_presets_csv("name,thickness\nx,3\n").unwrap_err();
        assert!(matches!(err, CatalogError::Csv { line: 1, .. }));
    }

    #[test]
    fn missing_attribute_column_skips_rows() {
        let text = "preset,thickness,width,height,kerf\nply3mm,3,450,300,0.1\n";
        let import = parse_presets_csv(text).unwrap();
        assert!(import.catalog.is_empty());
        assert_eq!(import.skipped.len(), 1);
        assert_eq!(import.skipped[0].line, 2);
        assert_eq!(import.skipped[0].name.as_deref(), Some("ply3mm"));
        assert!(import.skipped[0].reason.contains("no 'notes' column"));
    }
}

//! Export the merged table as delimited text or JSON.

use std::io::Write;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::join::MergedTable;
use crate::schema::MergedRecord;

/// Write the merged table as delimited text with a header row, columns in
/// the table's layout order.
pub fn write_delimited(table: &MergedTable, delimiter: u8, out: impl Write) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    writer.write_record(&table.columns)?;
    for record in &table.records {
        let row: Vec<String> = table
            .columns
            .iter()
            .map(|column| cell(record, column))
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the merged table as a JSON array of objects keyed by column
/// name. Numeric columns stay numbers; missing optionals become null.
pub fn write_json(table: &MergedTable, out: impl Write) -> Result<()> {
    let rows: Vec<Map<String, Value>> = table
        .records
        .iter()
        .map(|record| {
            table
                .columns
                .iter()
                .map(|column| (column.clone(), cell_value(record, column)))
                .collect()
        })
        .collect();

    serde_json::to_writer_pretty(out, &rows)?;
    Ok(())
}

/// String rendering of one cell, resolving collision-suffixed names.
pub fn cell(record: &MergedRecord, column: &str) -> String {
    match cell_value(record, column) {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// JSON rendering of one cell.
///
/// Suffixed extras were stored under their final names at join time, so
/// the extra map is checked first; a `_match`/`_weather` suffix that is
/// not an extra must then be a collision-suffixed named field.
fn cell_value(record: &MergedRecord, column: &str) -> Value {
    if let Some(value) = record.extra.get(column) {
        return Value::String(value.clone());
    }
    if let Some(value) = named_value(record, column) {
        return value;
    }
    column
        .strip_suffix("_match")
        .or_else(|| column.strip_suffix("_weather"))
        .and_then(|base| named_value(record, base))
        .unwrap_or(Value::Null)
}

fn named_value(record: &MergedRecord, column: &str) -> Option<Value> {
    let value = match column {
        "date" | "date_str" => Value::String(record.date_str.clone()),
        "city" => Value::String(record.city.clone()),
        "total_runs" => number(record.total_runs),
        "season" => option_string(&record.season),
        "team1" => option_string(&record.team1),
        "team2" => option_string(&record.team2),
        "temp_c" => number(record.temp_c),
        "humidity" => record.humidity.map(number).unwrap_or(Value::Null),
        "weather_type" => Value::String(record.weather_type.clone()),
        "temp_bucket" => Value::String(record.temp_bucket.label().to_string()),
        _ => return None,
    };
    Some(value)
}

fn option_string(value: &Option<String>) -> Value {
    value
        .as_ref()
        .map(|s| Value::String(s.clone()))
        .unwrap_or(Value::Null)
}

/// Whole-valued floats render without a trailing `.0`.
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;
    use crate::join::join_match_weather;
    use crate::load::{load_match_table, load_weather_table};

    fn merged() -> MergedTable {
        let parser = Parser::new();
        let m = parser
            .parse_bytes(
                b"date,city,total_runs\n2021-04-10,Mumbai,180\n",
                b',',
            )
            .unwrap();
        let w = parser
            .parse_bytes(
                b"date,city,temp_c,humidity\n2021-04-10,Mumbai,32.5,60\n",
                b',',
            )
            .unwrap();
        join_match_weather(
            &load_match_table(&m).unwrap(),
            &load_weather_table(&w).unwrap(),
        )
    }

    #[test]
    fn delimited_output_has_header_and_derived_columns() {
        let mut out = Vec::new();
        write_delimited(&merged(), b',', &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,city,total_runs,temp_c,humidity,weather_type,date_str,temp_bucket"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2021-04-10,Mumbai,180,32.5,60,Unknown,2021-04-10,Hot (31-35)"
        );
    }

    #[test]
    fn json_output_keeps_numbers_numeric() {
        let mut out = Vec::new();
        write_json(&merged(), &mut out).unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["total_runs"], 180);
        assert_eq!(rows[0]["temp_c"], 32.5);
        assert_eq!(rows[0]["temp_bucket"], "Hot (31-35)");
    }

    #[test]
    fn export_is_deterministic() {
        let table = merged();
        let mut a = Vec::new();
        let mut b = Vec::new();
        write_delimited(&table, b'\t', &mut a).unwrap();
        write_delimited(&table, b'\t', &mut b).unwrap();
        assert_eq!(a, b);
    }
}

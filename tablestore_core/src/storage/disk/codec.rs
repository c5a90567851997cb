//! Line codec for table files.
//!
//! The first line is a JSON header describing the schema. Every following
//! line is one row of tab-separated, type-tagged tokens (`i:`, `t:`, `n:`).

use serde::{Deserialize, Serialize};

use crate::storage::{Column, Schema};
use crate::types::Row;
use crate::types::datatype::{DataType, parse_datatype};
use crate::types::value::{Value, parse_value};

pub(crate) const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct TableHeader {
    version: u32,
    columns: Vec<ColumnHeader>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ColumnHeader {
    name: String,
    #[serde(rename = "type")]
    dtype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    length: Option<usize>,
}

pub(crate) fn encode_header(schema: &Schema) -> Result<String, String> {
    let header = TableHeader {
        version: FORMAT_VERSION,
        columns: schema
            .columns
            .iter()
            .map(|c| ColumnHeader {
                name: c.name.clone(),
                dtype: c.dtype.name().to_string(),
                length: c.dtype.length(),
            })
            .collect(),
    };
    serde_json::to_string(&header).map_err(|e| format!("Failed to serialize table header: {e}"))
}

pub(crate) fn decode_header(line: &str) -> Result<Schema, String> {
    let header: TableHeader =
        serde_json::from_str(line).map_err(|e| format!("Malformed table header: {e}"))?;
    if header.version != FORMAT_VERSION {
        return Err(format!(
            "Unsupported table format version {} (expected {})",
            header.version, FORMAT_VERSION
        ));
    }
    let mut columns: Vec<Column> = Vec::with_capacity(header.columns.len());
    for c in header.columns {
        let dtype = parse_datatype(&c.dtype, c.length)?;
        columns.push(Column::new(c.name, dtype));
    }
    let schema = Schema::new(columns);
    schema.validate().map_err(|e| e.to_string())?;
    Ok(schema)
}

pub(crate) fn encode_row(row: &Row) -> String {
    row.iter().map(encode_value).collect::<Vec<_>>().join("\t")
}

pub(crate) fn decode_row(line: &str, schema: &Schema) -> Result<Row, String> {
    let tokens: Vec<&str> = line.split('\t').collect();
    if tokens.len() != schema.column_count() {
        return Err(format!(
            "expected {} values, got {}",
            schema.column_count(),
            tokens.len()
        ));
    }
    tokens
        .iter()
        .zip(&schema.columns)
        .map(|(tok, col)| {
            decode_token(tok, &col.dtype).map_err(|e| format!("column '{}': {e}", col.name))
        })
        .collect()
}

fn encode_value(v: &Value) -> String {
    match v {
        Value::Null => "n:".to_string(),
        Value::Int(n) => format!("i:{n}"),
        Value::Text(s) => format!("t:{}", escape_text(s)),
    }
}

fn decode_token(token: &str, dtype: &DataType) -> Result<Value, String> {
    let (prefix, raw) = token
        .split_once(':')
        .ok_or_else(|| format!("Malformed value token '{token}'"))?;
    if prefix == "n" {
        if !raw.is_empty() {
            return Err(format!("Malformed null token '{token}'"));
        }
        return Ok(Value::Null);
    }
    match dtype {
        DataType::Int => {
            if prefix != "i" {
                return Err(format!("Expected int token prefix 'i:' but got '{token}'"));
            }
            parse_value(dtype, raw)
        }
        DataType::VarChar(_) => {
            if prefix != "t" {
                return Err(format!("Expected text token prefix 't:' but got '{token}'"));
            }
            parse_value(dtype, &unescape_text(raw)?)
        }
    }
}

fn escape_text(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('\t', "\\t")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

fn unescape_text(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => return Err(format!("Unsupported escape sequence '\\{other}'")),
            None => return Err("Dangling escape at end of text token".to_string()),
        }
    }
    Ok(out)
}

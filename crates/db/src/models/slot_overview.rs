//! Schema-less rows read from `parking.vw_slot_overview`.
//!
//! The view's column set belongs to the database, not to this crate, so each
//! row is decoded column by column from the type the driver reports.
//! Enums, domains and one-dimensional arrays are resolved through their
//! type kind; everything else by type name.

use std::fmt::Write as _;
use std::net::IpAddr;

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use parking_core::types::Timestamp;
use serde::Serialize;
use sqlx::postgres::types::{Oid, PgInterval, PgMoney};
use sqlx::postgres::{PgColumn, PgRow, PgTypeInfo, PgTypeKind, PgValueFormat};
use sqlx::{Column, Decode, Postgres, Row, Type, TypeInfo, ValueRef};

/// One overview row: column name to value, in the view's column order.
pub type SlotRow = IndexMap<String, SlotValue>;

/// Fractional digits of the `money` type under the default `lc_monetary`.
const MONEY_FRAC_DIGITS: i64 = 2;

/// A single column value of dynamic type.
///
/// Serialized untagged, so a row renders as a flat JSON object of scalars
/// (arrays render as JSON arrays).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SlotValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Always finite; NaN and infinities are carried as `Text`.
    Float(f64),
    Decimal(BigDecimal),
    Text(String),
    Timestamp(Timestamp),
    LocalTimestamp(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    Uuid(uuid::Uuid),
    Json(serde_json::Value),
    List(Vec<SlotValue>),
}

/// Decode every column of `row` into a [`SlotRow`].
pub fn decode_row(row: &PgRow) -> Result<SlotRow, sqlx::Error> {
    row.columns()
        .iter()
        .map(|column| {
            let value = decode_column(row, column)?;
            Ok::<_, sqlx::Error>((column.name().to_string(), value))
        })
        .collect()
}

fn decode_column(row: &PgRow, column: &PgColumn) -> Result<SlotValue, sqlx::Error> {
    let index = column.ordinal();
    if row.try_get_raw(index)?.is_null() {
        return Ok(SlotValue::Null);
    }
    decode_value(row, column, column.type_info())
}

/// Decode a non-null value as `ty`. Domains recurse into their base type,
/// so every getter here is unchecked: the dispatch already matched the type.
fn decode_value(
    row: &PgRow,
    column: &PgColumn,
    ty: &PgTypeInfo,
) -> Result<SlotValue, sqlx::Error> {
    let index = column.ordinal();

    match ty.kind() {
        PgTypeKind::Enum(_) => return Ok(SlotValue::Text(row.try_get_unchecked(index)?)),
        PgTypeKind::Domain(base) => return decode_value(row, column, base),
        PgTypeKind::Array(element) => return decode_array(row, column, element),
        _ => {}
    }

    let value = match ty.name() {
        "BOOL" => SlotValue::Bool(row.try_get_unchecked(index)?),
        "INT2" => SlotValue::Int(i64::from(row.try_get_unchecked::<i16, _>(index)?)),
        "INT4" => SlotValue::Int(i64::from(row.try_get_unchecked::<i32, _>(index)?)),
        "INT8" => SlotValue::Int(row.try_get_unchecked(index)?),
        "OID" => SlotValue::Int(i64::from(row.try_get_unchecked::<Oid, _>(index)?.0)),
        "FLOAT4" => float_value(f64::from(row.try_get_unchecked::<f32, _>(index)?)),
        "FLOAT8" => float_value(row.try_get_unchecked(index)?),
        "NUMERIC" => decode_numeric(row, column)?,
        "MONEY" => SlotValue::Decimal(
            row.try_get_unchecked::<PgMoney, _>(index)?
                .to_bigdecimal(MONEY_FRAC_DIGITS),
        ),
        "TEXT" | "VARCHAR" | "CHAR" | "NAME" | "UNKNOWN" | "xml" | "citext" => {
            SlotValue::Text(row.try_get_unchecked(index)?)
        }
        "\"CHAR\"" => {
            let byte = row.try_get_unchecked::<i8, _>(index)?;
            SlotValue::Text(char::from(byte as u8).to_string())
        }
        "BYTEA" => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            SlotValue::Text(format_bytea(&bytes))
        }
        "TIMESTAMPTZ" => SlotValue::Timestamp(row.try_get_unchecked(index)?),
        "TIMESTAMP" => SlotValue::LocalTimestamp(row.try_get_unchecked(index)?),
        "DATE" => SlotValue::Date(row.try_get_unchecked(index)?),
        "TIME" => SlotValue::Time(row.try_get_unchecked(index)?),
        "INTERVAL" => {
            SlotValue::Text(format_interval(row.try_get_unchecked::<PgInterval, _>(index)?))
        }
        "INET" | "CIDR" => SlotValue::Text(decode_inet(row, column)?),
        "UUID" => SlotValue::Uuid(row.try_get_unchecked(index)?),
        "JSON" | "JSONB" => SlotValue::Json(row.try_get_unchecked(index)?),
        other => return Err(unsupported(column, other)),
    };
    Ok(value)
}

fn decode_array(
    row: &PgRow,
    column: &PgColumn,
    element: &PgTypeInfo,
) -> Result<SlotValue, sqlx::Error> {
    let element = match element.kind() {
        PgTypeKind::Domain(base) => base,
        _ => element,
    };
    if matches!(element.kind(), PgTypeKind::Enum(_)) {
        return list(row, column, SlotValue::Text);
    }

    match element.name() {
        "BOOL" => list(row, column, SlotValue::Bool),
        "INT2" => list(row, column, |v: i16| SlotValue::Int(i64::from(v))),
        "INT4" => list(row, column, |v: i32| SlotValue::Int(i64::from(v))),
        "INT8" => list(row, column, SlotValue::Int),
        "FLOAT4" => list(row, column, |v: f32| float_value(f64::from(v))),
        "FLOAT8" => list(row, column, float_value),
        "NUMERIC" => list(row, column, SlotValue::Decimal),
        "TEXT" | "VARCHAR" | "CHAR" | "NAME" | "citext" => list(row, column, SlotValue::Text),
        "TIMESTAMPTZ" => list(row, column, SlotValue::Timestamp),
        "TIMESTAMP" => list(row, column, SlotValue::LocalTimestamp),
        "DATE" => list(row, column, SlotValue::Date),
        "TIME" => list(row, column, SlotValue::Time),
        "UUID" => list(row, column, SlotValue::Uuid),
        "JSON" | "JSONB" => list(row, column, SlotValue::Json),
        other => Err(unsupported(column, &format!("{other}[]"))),
    }
}

fn list<T, F>(row: &PgRow, column: &PgColumn, wrap: F) -> Result<SlotValue, sqlx::Error>
where
    T: for<'r> Decode<'r, Postgres> + Type<Postgres>,
    F: Fn(T) -> SlotValue,
{
    let items: Vec<Option<T>> = row.try_get_unchecked(column.ordinal())?;
    Ok(SlotValue::List(
        items
            .into_iter()
            .map(|item| item.map_or(SlotValue::Null, &wrap))
            .collect(),
    ))
}

/// Binary numeric header: ndigits, weight, sign, display scale (all 16-bit).
/// The driver's `BigDecimal` drops the display scale and rejects NaN, so
/// both are read from the header here.
fn decode_numeric(row: &PgRow, column: &PgColumn) -> Result<SlotValue, sqlx::Error> {
    const NUMERIC_NAN: u16 = 0xC000;
    const NUMERIC_PINF: u16 = 0xD000;
    const NUMERIC_NINF: u16 = 0xF000;

    let index = column.ordinal();
    let raw = row.try_get_raw(index)?;
    let header = match raw.format() {
        PgValueFormat::Binary => raw.as_bytes().ok().filter(|b| b.len() >= 8),
        PgValueFormat::Text => None,
    };
    let Some(header) = header else {
        return Ok(SlotValue::Decimal(row.try_get_unchecked(index)?));
    };

    let sign = u16::from_be_bytes([header[4], header[5]]);
    let display_scale = u16::from_be_bytes([header[6], header[7]]);
    let value = match sign {
        NUMERIC_NAN => SlotValue::Text("NaN".to_string()),
        NUMERIC_PINF => SlotValue::Text("Infinity".to_string()),
        NUMERIC_NINF => SlotValue::Text("-Infinity".to_string()),
        _ => {
            let decimal: BigDecimal = row.try_get_unchecked(index)?;
            SlotValue::Decimal(decimal.with_scale(i64::from(display_scale)))
        }
    };
    Ok(value)
}

/// JSON has no NaN or infinities; carry them in PostgreSQL's spelling.
fn float_value(value: f64) -> SlotValue {
    if value.is_finite() {
        SlotValue::Float(value)
    } else if value.is_nan() {
        SlotValue::Text("NaN".to_string())
    } else if value.is_sign_positive() {
        SlotValue::Text("Infinity".to_string())
    } else {
        SlotValue::Text("-Infinity".to_string())
    }
}

/// Render bytes the way PostgreSQL's `hex` bytea output does.
fn format_bytea(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("\\x");
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Render an interval as an ISO 8601 duration, e.g. `P1DT2H30M`.
/// Components keep their own sign, as in PostgreSQL's `iso_8601` style.
fn format_interval(interval: PgInterval) -> String {
    let mut out = String::from("P");
    let years = interval.months / 12;
    let months = interval.months % 12;
    if years != 0 {
        let _ = write!(out, "{years}Y");
    }
    if months != 0 {
        let _ = write!(out, "{months}M");
    }
    if interval.days != 0 {
        let _ = write!(out, "{}D", interval.days);
    }

    let micros = interval.microseconds;
    let hours = micros / 3_600_000_000;
    let minutes = (micros % 3_600_000_000) / 60_000_000;
    let second_micros = micros % 60_000_000;
    if micros != 0 {
        out.push('T');
        if hours != 0 {
            let _ = write!(out, "{hours}H");
        }
        if minutes != 0 {
            let _ = write!(out, "{minutes}M");
        }
        if second_micros != 0 {
            let sign = if second_micros < 0 { "-" } else { "" };
            let whole = (second_micros / 1_000_000).abs();
            let frac = (second_micros % 1_000_000).abs();
            if frac == 0 {
                let _ = write!(out, "{sign}{whole}S");
            } else {
                let frac = format!("{frac:06}");
                let _ = write!(out, "{sign}{whole}.{}S", frac.trim_end_matches('0'));
            }
        }
    }

    if out == "P" {
        out.push_str("T0S");
    }
    out
}

fn decode_inet(row: &PgRow, column: &PgColumn) -> Result<String, sqlx::Error> {
    let raw = row.try_get_raw(column.ordinal())?;
    let decoded = match raw.format() {
        PgValueFormat::Text => raw.as_str().ok().map(str::to_string),
        PgValueFormat::Binary => raw.as_bytes().ok().and_then(format_inet),
    };
    decoded.ok_or_else(|| sqlx::Error::ColumnDecode {
        index: column.name().to_string(),
        source: "malformed inet value".into(),
    })
}

/// Binary `inet`/`cidr`: family, prefix bits, is-cidr flag, address length,
/// then the address bytes.
fn format_inet(bytes: &[u8]) -> Option<String> {
    if bytes.len() < 4 {
        return None;
    }
    let (family, bits, is_cidr) = (bytes[0], bytes[1], bytes[2] != 0);
    let addr = &bytes[4..];
    let (ip, max_bits) = match family {
        2 => (IpAddr::from(<[u8; 4]>::try_from(addr).ok()?), 32),
        3 => (IpAddr::from(<[u8; 16]>::try_from(addr).ok()?), 128),
        _ => return None,
    };
    if bits == max_bits && !is_cidr {
        Some(ip.to_string())
    } else {
        Some(format!("{ip}/{bits}"))
    }
}

fn unsupported(column: &PgColumn, type_name: &str) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.name().to_string(),
        source: format!("unsupported column type {type_name}").into(),
    }
}

//! Speed-test result records and their strict JSON mapping
//!
//! A result file holds one JSON object describing a single measurement: the
//! measured throughput and latency, the server that was measured against and
//! the client that ran the test. Decoding is deliberately strict. Every field
//! must be present with the expected JSON type and nothing is defaulted, so a
//! record either decodes completely or the whole file is rejected.
//!
//! Several numeric client and server attributes are transmitted as strings by
//! the upstream tool. They are type-checked as strings first and then parsed
//! as integers, and written back as strings by the `to_dict` functions.

use crate::error::{AppError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};
use serde_json::{Map, Value};

/// Naive date-time layouts accepted for the `timestamp` field, tried in order
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

/// Network subscriber identity as reported by the measurement service
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub ip: String,
    pub lat: String,
    pub lon: String,
    pub isp: String,
    pub isprating: String,
    pub rating: i64,
    pub ispdlavg: i64,
    pub ispulavg: i64,
    pub loggedin: i64,
    pub country: String,
}

impl Client {
    pub fn from_dict(value: Option<&Value>) -> Result<Self> {
        let obj = as_object(value, "client")?;
        Ok(Self {
            ip: from_str(obj.get("ip"), "client.ip")?,
            lat: from_str(obj.get("lat"), "client.lat")?,
            lon: from_str(obj.get("lon"), "client.lon")?,
            isp: from_str(obj.get("isp"), "client.isp")?,
            isprating: from_str(obj.get("isprating"), "client.isprating")?,
            rating: from_numeric_str(obj.get("rating"), "client.rating")?,
            ispdlavg: from_numeric_str(obj.get("ispdlavg"), "client.ispdlavg")?,
            ispulavg: from_numeric_str(obj.get("ispulavg"), "client.ispulavg")?,
            loggedin: from_numeric_str(obj.get("loggedin"), "client.loggedin")?,
            country: from_str(obj.get("country"), "client.country")?,
        })
    }

    pub fn to_dict(&self) -> Value {
        let mut result = Map::new();
        result.insert("ip".into(), Value::from(self.ip.as_str()));
        result.insert("lat".into(), Value::from(self.lat.as_str()));
        result.insert("lon".into(), Value::from(self.lon.as_str()));
        result.insert("isp".into(), Value::from(self.isp.as_str()));
        result.insert("isprating".into(), Value::from(self.isprating.as_str()));
        result.insert("rating".into(), Value::from(self.rating.to_string()));
        result.insert("ispdlavg".into(), Value::from(self.ispdlavg.to_string()));
        result.insert("ispulavg".into(), Value::from(self.ispulavg.to_string()));
        result.insert("loggedin".into(), Value::from(self.loggedin.to_string()));
        result.insert("country".into(), Value::from(self.country.as_str()));
        Value::Object(result)
    }
}

/// Measurement endpoint the test ran against
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub url: String,
    pub lat: String,
    pub lon: String,
    pub name: String,
    pub country: String,
    pub cc: String,
    pub sponsor: String,
    pub id: i64,
    pub host: String,
    /// Distance to the server in kilometres
    pub d: f64,
    pub latency: f64,
}

impl Server {
    pub fn from_dict(value: Option<&Value>) -> Result<Self> {
        let obj = as_object(value, "server")?;
        Ok(Self {
            url: from_str(obj.get("url"), "server.url")?,
            lat: from_str(obj.get("lat"), "server.lat")?,
            lon: from_str(obj.get("lon"), "server.lon")?,
            name: from_str(obj.get("name"), "server.name")?,
            country: from_str(obj.get("country"), "server.country")?,
            cc: from_str(obj.get("cc"), "server.cc")?,
            sponsor: from_str(obj.get("sponsor"), "server.sponsor")?,
            id: from_numeric_str(obj.get("id"), "server.id")?,
            host: from_str(obj.get("host"), "server.host")?,
            d: from_float(obj.get("d"), "server.d")?,
            latency: from_float(obj.get("latency"), "server.latency")?,
        })
    }

    pub fn to_dict(&self) -> Value {
        let mut result = Map::new();
        result.insert("url".into(), Value::from(self.url.as_str()));
        result.insert("lat".into(), Value::from(self.lat.as_str()));
        result.insert("lon".into(), Value::from(self.lon.as_str()));
        result.insert("name".into(), Value::from(self.name.as_str()));
        result.insert("country".into(), Value::from(self.country.as_str()));
        result.insert("cc".into(), Value::from(self.cc.as_str()));
        result.insert("sponsor".into(), Value::from(self.sponsor.as_str()));
        result.insert("id".into(), Value::from(self.id.to_string()));
        result.insert("host".into(), Value::from(self.host.as_str()));
        result.insert("d".into(), Value::from(self.d));
        result.insert("latency".into(), Value::from(self.latency));
        Value::Object(result)
    }
}

/// One measurement event
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTest {
    /// Download throughput in bits per second
    pub download: f64,
    /// Upload throughput in bits per second
    pub upload: f64,
    /// Round-trip latency in milliseconds
    pub ping: f64,
    pub server: Server,
    pub timestamp: DateTime<FixedOffset>,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    /// Reserved by the upstream schema, always `None`
    pub share: Option<()>,
    pub client: Client,
}

impl SpeedTest {
    pub fn from_dict(value: &Value) -> Result<Self> {
        let obj = as_object(Some(value), "<root>")?;
        Ok(Self {
            download: from_float(obj.get("download"), "download")?,
            upload: from_float(obj.get("upload"), "upload")?,
            ping: from_float(obj.get("ping"), "ping")?,
            server: Server::from_dict(obj.get("server"))?,
            timestamp: from_datetime(obj.get("timestamp"), "timestamp")?,
            bytes_sent: from_int(obj.get("bytes_sent"), "bytes_sent")?,
            bytes_received: from_int(obj.get("bytes_received"), "bytes_received")?,
            share: from_none(obj.get("share"), "share")?,
            client: Client::from_dict(obj.get("client"))?,
        })
    }

    /// Decode a record from the text of a result file
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_dict(&value)
    }

    pub fn to_dict(&self) -> Value {
        let mut result = Map::new();
        result.insert("download".into(), Value::from(self.download));
        result.insert("upload".into(), Value::from(self.upload));
        result.insert("ping".into(), Value::from(self.ping));
        result.insert("server".into(), self.server.to_dict());
        result.insert("timestamp".into(), Value::from(to_datetime_string(&self.timestamp)));
        result.insert("bytes_sent".into(), Value::from(self.bytes_sent));
        result.insert("bytes_received".into(), Value::from(self.bytes_received));
        result.insert("share".into(), Value::Null);
        result.insert("client".into(), self.client.to_dict());
        Value::Object(result)
    }
}

pub fn speed_test_from_dict(value: &Value) -> Result<SpeedTest> {
    SpeedTest::from_dict(value)
}

pub fn speed_test_to_dict(record: &SpeedTest) -> Value {
    record.to_dict()
}

/// JSON type name used in error messages
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Present and non-null, or a missing-field error
fn require<'a>(value: Option<&'a Value>, field: &str) -> Result<&'a Value> {
    match value {
        None | Some(Value::Null) => Err(AppError::field_missing(field)),
        Some(v) => Ok(v),
    }
}

fn as_object<'a>(value: Option<&'a Value>, field: &str) -> Result<&'a Map<String, Value>> {
    let value = require(value, field)?;
    value
        .as_object()
        .ok_or_else(|| AppError::field_type(field, "object", type_name(value)))
}

pub fn from_str(value: Option<&Value>, field: &str) -> Result<String> {
    let value = require(value, field)?;
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(AppError::field_type(field, "string", type_name(other))),
    }
}

/// Any JSON number, integer or float, as `f64`
pub fn from_float(value: Option<&Value>, field: &str) -> Result<f64> {
    let value = require(value, field)?;
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| AppError::field_type(field, "number", "unrepresentable number")),
        other => Err(AppError::field_type(field, "number", type_name(other))),
    }
}

/// A non-negative JSON integer; fractions, exponents and negative values are rejected
pub fn from_int(value: Option<&Value>, field: &str) -> Result<u64> {
    let value = require(value, field)?;
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(count) => Ok(count),
            None if n.is_i64() => Err(AppError::field_type(field, "non-negative integer", "negative integer")),
            None => Err(AppError::field_type(field, "integer", type_name(value))),
        },
        other => Err(AppError::field_type(field, "integer", type_name(other))),
    }
}

/// A JSON string holding a base-10 integer, e.g. `"3"`
pub fn from_numeric_str(value: Option<&Value>, field: &str) -> Result<i64> {
    let text = from_str(value, field)?;
    text.trim()
        .parse::<i64>()
        .map_err(|_| AppError::field_type(field, "numeric string", format!("string {:?}", text)))
}

/// Absent or null; any other value fails validation
pub fn from_none(value: Option<&Value>, field: &str) -> Result<Option<()>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(other) => Err(AppError::validation(format!(
            "`{}` must be null, found {}",
            field,
            type_name(other)
        ))),
    }
}

pub fn from_datetime(value: Option<&Value>, field: &str) -> Result<DateTime<FixedOffset>> {
    let text = from_str(value, field)?;
    parse_timestamp(&text)
        .map_err(|e| AppError::date_parse(format!("`{}` value {:?}: {}", field, text, e)))
}

/// Parse an ISO-8601-like timestamp.
///
/// Accepts RFC 3339, extended (`2020-05-20T18:24:51`) and basic
/// (`20200520T182451`) layouts with a `T` or space separator, optional
/// seconds and fractional seconds, and bare dates. A zone suffix may be `Z`
/// or an offset written `+HH`, `+HHMM` or `+HH:MM`. Values without a zone are
/// taken as UTC.
pub fn parse_timestamp(text: &str) -> std::result::Result<DateTime<FixedOffset>, chrono::ParseError> {
    let text = text.trim();

    let rfc3339 = DateTime::parse_from_rfc3339(text);
    if rfc3339.is_ok() {
        return rfc3339;
    }

    let (local, zone) = split_zone(text);
    let naive = parse_naive(local)?;
    match zone {
        None => Ok(naive.and_utc().fixed_offset()),
        Some(zone) => DateTime::parse_from_rfc3339(&format!("{}{}", naive.format("%Y-%m-%dT%H:%M:%S%.f"), zone)),
    }
}

fn parse_naive(text: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive);
        }
    }

    // Bare dates are midnight
    NaiveDate::parse_from_str(text, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Split a trailing zone designator off the time part, normalized to `Z` or
/// `+HH:MM`. Unrecognized suffixes are left in place.
fn split_zone(text: &str) -> (&str, Option<String>) {
    let Some(time_start) = text.find(|c: char| matches!(c, 'T' | 't' | ' ')) else {
        return (text, None);
    };
    let time = &text[time_start + 1..];

    if let Some(local) = time.strip_suffix(|c: char| matches!(c, 'Z' | 'z')) {
        return (text[..time_start + 1 + local.len()].trim_end(), Some("Z".to_string()));
    }

    let Some(sign_idx) = time.rfind(|c: char| matches!(c, '+' | '-')) else {
        return (text, None);
    };
    let (sign, digits) = time[sign_idx..].split_at(1);
    let digits: String = digits.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return (text, None);
    }
    let zone = match digits.len() {
        2 => format!("{}{}:00", sign, digits),
        4 => format!("{}{}:{}", sign, &digits[..2], &digits[2..]),
        _ => return (text, None),
    };

    (text[..time_start + 1 + sign_idx].trim_end(), Some(zone))
}

pub fn to_datetime_string(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    /// A complete, valid result document
    pub fn sample_value() -> Value {
        json!({
            "download": 104857600.0,
            "upload": 20971520.5,
            "ping": 14.7,
            "server": {
                "url": "http://speedtest.example.net:8080/speedtest/upload.php",
                "lat": "37.7749",
                "lon": "-122.4194",
                "name": "San Francisco, CA",
                "country": "United States",
                "cc": "US",
                "sponsor": "Example Fiber",
                "id": "18531",
                "host": "speedtest.example.net:8080",
                "d": 3.2174,
                "latency": 12.345
            },
            "timestamp": "2020-05-20T18:24:51.123456Z",
            "bytes_sent": 27262976,
            "bytes_received": 131530420,
            "share": null,
            "client": {
                "ip": "203.0.113.7",
                "lat": "37.7697",
                "lon": "-122.3933",
                "isp": "Example ISP",
                "isprating": "3.7",
                "rating": "0",
                "ispdlavg": "0",
                "ispulavg": "0",
                "loggedin": "0",
                "country": "US"
            }
        })
    }
}

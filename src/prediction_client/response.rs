use serde::de::Error as _;
use serde::Deserialize;
use serde_json::{Number, Value};

const MISSING: &str = "undefined";

/// The decoded `/predict` body. Fields stay loose JSON because servers
/// disagree on types (an integer class id is a valid `prediction`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub prediction: Option<Value>,
    #[serde(default)]
    pub confidence: Option<Value>,
    #[serde(default)]
    pub image_path: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Prediction {
        label: String,
        confidence: String,
        score: Option<f64>,
        image_path: Option<String>,
    },
    /// The server answered but reported a failure of its own.
    Rejected(String),
}

impl PredictionResponse {
    /// Any JSON document other than `null` is accepted. Arrays and scalars
    /// carry no fields, so every field reads as missing.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(bytes)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            Value::Null => Err(serde_json::Error::custom(
                "Cannot read properties of null (reading 'error')",
            )),
            _ => Ok(Self::default()),
        }
    }

    pub fn into_outcome(self) -> Outcome {
        if let Some(error) = self.error.as_ref().filter(|error| is_truthy(error)) {
            return Outcome::Rejected(display_value(error));
        }

        Outcome::Prediction {
            label: display_optional(self.prediction.as_ref()),
            confidence: display_optional(self.confidence.as_ref()),
            score: self.confidence.as_ref().and_then(Value::as_f64),
            image_path: self
                .image_path
                .as_ref()
                .filter(|path| is_truthy(path))
                .map(display_value),
        }
    }
}

impl Outcome {
    pub fn result_text(&self) -> String {
        match self {
            Outcome::Prediction {
                label, confidence, ..
            } => format!("Prediction: {} (Confidence: {})", label, confidence),
            Outcome::Rejected(message) => format!("Error: {}", message),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_optional(value: Option<&Value>) -> String {
    value.map_or_else(|| MISSING.to_string(), display_value)
}

/// String conversion as a template literal does it.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => display_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                item => display_value(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn display_number(n: &Number) -> String {
    n.as_f64().map_or_else(|| n.to_string(), format_number)
}

/// Shortest round-tripping digits, laid out the way `Number#toString`
/// does: plain notation for exponents in [-7, 21), `1e-7` / `1.5e+21`
/// outside it.
fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value < 0.0 {
        return format!("-{}", format_number(-value));
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    // `point` is where the decimal point falls relative to `digits`.
    let len = digits.len() as i32;
    let point = exponent + 1;

    if len <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{}.{}", whole, fraction)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat(-point as usize), digits)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, exponent.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, exponent.abs())
        }
    }
}

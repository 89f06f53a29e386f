use crate::models::Product;
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use service_core::error::AppError;

/// The product attributes carried by a create or update body.
///
/// Each attribute is tri-state: `None` when the body does not mention it,
/// `Some(None)` for an explicit `null`, `Some(Some(v))` for a value.
/// Fields other than `name`, `price` and `description` are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFields {
    pub name: Option<Option<String>>,
    pub price: Option<Option<f64>>,
    pub description: Option<Option<String>>,
}

impl ProductFields {
    pub fn new(name: &str, price: f64, description: &str) -> Self {
        Self {
            name: Some(Some(name.to_string())),
            price: Some(Some(price)),
            description: Some(Some(description.to_string())),
        }
    }

    /// Coerce an arbitrary JSON body into product fields.
    ///
    /// Non-object bodies carry no fields. Values of the wrong JSON type are
    /// converted where a loose conversion exists and rejected otherwise.
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let Some(object) = body.as_object() else {
            return Ok(Self::default());
        };

        Ok(Self {
            name: string_field(object, "name")?,
            price: number_field(object, "price")?,
            description: string_field(object, "description")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.description.is_none()
    }
}

fn string_field(object: &Map<String, Value>, path: &str) -> Result<Option<Option<String>>, AppError> {
    let Some(value) = object.get(path) else {
        return Ok(None);
    };

    let coerced = match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_to_string(n)),
        other => return Err(cast_error("string", other, path)),
    };

    Ok(Some(coerced))
}

fn number_field(object: &Map<String, Value>, path: &str) -> Result<Option<Option<f64>>, AppError> {
    let Some(value) = object.get(path) else {
        return Ok(None);
    };

    let coerced = match value {
        Value::Null => None,
        Value::Number(n) => match n.as_f64() {
            Some(f) => Some(f),
            None => return Err(cast_error("Number", value, path)),
        },
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Some(f),
            _ => return Err(cast_error("Number", value, path)),
        },
        other => return Err(cast_error("Number", other, path)),
    };

    Ok(Some(coerced))
}

fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

fn cast_error(kind: &str, value: &Value, path: &str) -> AppError {
    let shown = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    AppError::BadRequest(anyhow::anyhow!(
        "Cast to {} failed for value \"{}\" at path \"{}\"",
        kind,
        shown,
        path
    ))
}

/// Largest integer an IEEE double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// JSON shape of a product returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_price"
    )]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name,
            price: product.price,
            description: product.description,
        }
    }
}

/// Integral prices go out as JSON integers (`20`, not `20.0`).
fn serialize_price<S>(price: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match price {
        Some(p) if p.fract() == 0.0 && p.abs() < MAX_SAFE_INTEGER => {
            serializer.serialize_i64(*p as i64)
        }
        Some(p) => serializer.serialize_f64(*p),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

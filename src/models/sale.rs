use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Number, Value};

use crate::entities::sales;
use crate::error::SaleError;

/// Body of `POST /sales`.
///
/// Every field is optional so that a missing field is reported as a
/// validation failure instead of a deserialization rejection.
/// `transactionId` may be sent as a number and amounts as numeric strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    #[serde(default, deserialize_with = "text_or_number")]
    pub transaction_id: Option<String>,
    pub timestamp: Option<String>,
    pub items: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "number_or_numeric_text")]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "number_or_numeric_text")]
    pub payment_received: Option<f64>,
    #[serde(default, deserialize_with = "number_or_numeric_text")]
    pub change: Option<f64>,
    #[serde(default, deserialize_with = "number_or_numeric_text")]
    pub debt_amount: Option<f64>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(Number),
}

/// Numbers are kept in their decimal text form.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|raw| match raw {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }),
    )
}

/// An empty string counts as absent; other text must parse as a finite number.
fn number_or_numeric_text<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<TextOrNumber>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(TextOrNumber::Number(number)) => {
            return number
                .as_f64()
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("number {} out of range", number)));
        }
        Some(TextOrNumber::Text(text)) => text,
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(de::Error::custom(format!("invalid amount {:?}", text))),
    }
}

/// A create payload with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub transaction_id: String,
    pub timestamp: String,
    pub items: Vec<Value>,
    pub total_amount: f64,
    pub payment_received: f64,
    pub change_amount: f64,
    pub debt_amount: f64,
    pub status: String,
}

impl TryFrom<CreateSaleRequest> for NewSale {
    type Error = SaleError;

    fn try_from(request: CreateSaleRequest) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();

        // Text fields must be non-empty; amounts only need to be defined, so zero is valid
        let transaction_id = non_empty(request.transaction_id, "transactionId", &mut missing);
        let timestamp = non_empty(request.timestamp, "timestamp", &mut missing);
        let items = defined(request.items, "items", &mut missing);
        let total_amount = defined(request.total_amount, "totalAmount", &mut missing);
        let payment_received =
            defined(request.payment_received, "paymentReceived", &mut missing);
        let change_amount = defined(request.change, "change", &mut missing);
        let debt_amount = defined(request.debt_amount, "debtAmount", &mut missing);
        let status = non_empty(request.status, "status", &mut missing);

        match (
            transaction_id,
            timestamp,
            items,
            total_amount,
            payment_received,
            change_amount,
            debt_amount,
            status,
        ) {
            (
                Some(transaction_id),
                Some(timestamp),
                Some(items),
                Some(total_amount),
                Some(payment_received),
                Some(change_amount),
                Some(debt_amount),
                Some(status),
            ) => Ok(NewSale {
                transaction_id,
                timestamp,
                items,
                total_amount,
                payment_received,
                change_amount,
                debt_amount,
                status,
            }),
            _ => Err(SaleError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

fn defined<T>(
    value: Option<T>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<T> {
    if value.is_none() {
        missing.push(field);
    }
    value
}

fn non_empty(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    defined(value.filter(|v| !v.is_empty()), field, missing)
}

/// A stored sale as returned by `GET /sales`, with `items` expanded back to JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i32,
    pub transaction_id: String,
    pub timestamp: String,
    pub items: Vec<Value>,
    pub total_amount: f64,
    pub payment_received: f64,
    pub change_amount: f64,
    pub debt_amount: f64,
    pub status: String,
}

impl TryFrom<sales::Model> for Sale {
    type Error = serde_json::Error;

    fn try_from(row: sales::Model) -> Result<Self, Self::Error> {
        Ok(Sale {
            items: serde_json::from_str(&row.items)?,
            id: row.id,
            transaction_id: row.transaction_id,
            timestamp: row.timestamp,
            total_amount: row.total_amount,
            payment_received: row.payment_received,
            change_amount: row.change_amount,
            debt_amount: row.debt_amount,
            status: row.status,
        })
    }
}

pub type SalesResponse = Vec<Sale>;

#[derive(Debug, Clone, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_request() -> CreateSaleRequest {
        serde_json::from_value(json!({
            "transactionId": "T1",
            "timestamp": "2024-01-01T00:00:00Z",
            "items": [{"name": "Widget", "qty": 2}],
            "totalAmount": 10.0,
            "paymentReceived": 10.0,
            "change": 0,
            "debtAmount": 0,
            "status": "paid"
        }))
        .unwrap()
    }

    #[test]
    fn test_zero_amounts_are_present() {
        let sale = NewSale::try_from(full_request()).unwrap();
        assert_eq!(sale.change_amount, 0.0);
        assert_eq!(sale.debt_amount, 0.0);
        assert_eq!(sale.items, vec![json!({"name": "Widget", "qty": 2})]);
    }

    #[test]
    fn test_empty_items_are_present() {
        let request = CreateSaleRequest {
            items: Some(vec![]),
            ..full_request()
        };
        assert!(NewSale::try_from(request).is_ok());
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let request = CreateSaleRequest {
            transaction_id: Some(String::new()),
            total_amount: None,
            ..full_request()
        };

        match NewSale::try_from(request) {
            Err(SaleError::Validation(detail)) => {
                assert!(detail.contains("transactionId"));
                assert!(detail.contains("totalAmount"));
                assert!(!detail.contains("status"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_null_amount_is_missing() {
        let request: CreateSaleRequest = serde_json::from_value(json!({
            "transactionId": "T1",
            "timestamp": "now",
            "items": [],
            "totalAmount": null,
            "paymentReceived": 1,
            "change": 0,
            "debtAmount": 0,
            "status": "paid"
        }))
        .unwrap();

        assert!(matches!(
            NewSale::try_from(request),
            Err(SaleError::Validation(_))
        ));
    }

    #[test]
    fn test_numeric_transaction_id_kept_as_text() {
        let request: CreateSaleRequest = serde_json::from_value(json!({
            "transactionId": 1717171717,
            "timestamp": "now",
            "items": [],
            "totalAmount": "10",
            "paymentReceived": " 12.5 ",
            "change": 2.5,
            "debtAmount": "0",
            "status": "paid"
        }))
        .unwrap();

        let sale = NewSale::try_from(request).unwrap();
        assert_eq!(sale.transaction_id, "1717171717");
        assert_eq!(sale.total_amount, 10.0);
        assert_eq!(sale.payment_received, 12.5);
        assert_eq!(sale.debt_amount, 0.0);
    }

    #[test]
    fn test_empty_amount_text_is_missing() {
        let request: CreateSaleRequest = serde_json::from_value(json!({
            "transactionId": "T1",
            "timestamp": "now",
            "items": [],
            "totalAmount": "",
            "paymentReceived": 1,
            "change": 0,
            "debtAmount": 0,
            "status": "paid"
        }))
        .unwrap();

        match NewSale::try_from(request) {
            Err(SaleError::Validation(detail)) => assert!(detail.contains("totalAmount")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_amount_text_is_rejected() {
        for bad in ["ten", "NaN", "inf"] {
            let result = serde_json::from_value::<CreateSaleRequest>(json!({
                "transactionId": "T1",
                "totalAmount": bad
            }));
            assert!(result.is_err(), "{} should not decode", bad);
        }

        assert!(serde_json::from_value::<CreateSaleRequest>(json!({"transactionId": true})).is_err());
    }

    #[test]
    fn test_sale_from_row_expands_items() {
        let row = sales::Model {
            id: 7,
            transaction_id: "T7".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            items: r#"[{"name":"Widget","qty":2}]"#.to_string(),
            total_amount: 10.0,
            payment_received: 5.0,
            change_amount: 0.0,
            debt_amount: 5.0,
            status: "debt".to_string(),
        };

        let sale = Sale::try_from(row).unwrap();
        assert_eq!(sale.items, vec![json!({"name": "Widget", "qty": 2})]);

        let body = serde_json::to_value(&sale).unwrap();
        assert_eq!(body["transactionId"], "T7");
        assert_eq!(body["changeAmount"], 0.0);
        assert_eq!(body["debtAmount"], 5.0);
    }

    #[test]
    fn test_sale_from_row_rejects_corrupt_items() {
        let row = sales::Model {
            id: 1,
            transaction_id: "T1".to_string(),
            timestamp: "t".to_string(),
            items: "not json".to_string(),
            total_amount: 0.0,
            payment_received: 0.0,
            change_amount: 0.0,
            debt_amount: 0.0,
            status: "paid".to_string(),
        };

        assert!(Sale::try_from(row).is_err());
    }
}

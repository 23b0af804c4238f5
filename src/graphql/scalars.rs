//! Custom scalar types

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::{DateTime, TimeZone, Utc};

/// Date custom scalar type
///
/// Integer milliseconds since the Unix epoch on the wire; RFC 3339 strings
/// are also accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub DateTime<Utc>);

#[Scalar]
impl ScalarType for Date {
    fn parse(value: Value) -> InputValueResult<Self> {
        match value {
            Value::Number(n) => {
                let millis = n.as_i64().ok_or_else(|| {
                    InputValueError::custom("Date must be an integer millisecond timestamp")
                })?;
                Utc.timestamp_millis_opt(millis)
                    .single()
                    .map(Date)
                    .ok_or_else(|| InputValueError::custom("millisecond timestamp out of range"))
            }
            Value::String(s) => s
                .parse::<DateTime<Utc>>()
                .map(Date)
                .map_err(|e| InputValueError::custom(format!("invalid datetime: {e}"))),
            other => Err(InputValueError::expected_type(other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Number(self.0.timestamp_millis().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_millisecond_timestamps() {
        let parsed = <Date as ScalarType>::parse(Value::Number(1_700_000_000_000i64.into()))
            .expect("valid millis");
        assert_eq!(parsed.0.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn parses_rfc3339_strings() {
        let parsed =
            <Date as ScalarType>::parse(Value::String("2024-01-02T03:04:05Z".to_string()))
                .expect("valid datetime string");
        assert_eq!(parsed.0.to_rfc3339(), "2024-01-02T03:04:05+00:00");
    }

    #[test]
    fn serializes_to_millis() {
        let date = Date(Utc.timestamp_millis_opt(1_700_000_000_000).single().unwrap());
        assert_eq!(date.to_value(), Value::Number(1_700_000_000_000i64.into()));
    }

    #[test]
    fn rejects_non_temporal_values() {
        assert!(<Date as ScalarType>::parse(Value::Boolean(true)).is_err());
    }
}

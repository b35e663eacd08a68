use crate::error::CriteriaParseError;
use crate::llm::CriteriaExtractor;
use crate::models::{Criteria, ANY_PROPERTY_TYPE};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Instructions handed to the text-understanding service with every query
pub const EXTRACTION_INSTRUCTIONS: &str = r#"Extract housing search criteria from the query.
Return a JSON object with:
- location: city name
- max_price: maximum price in DKK (number only)
- min_bedrooms: number of rooms (number only)
- property_type: apartment

Example: "apartment in copenhagen 2 rooms under 19000dkk per month"
Should return: {
    "location": "copenhagen",
    "max_price": 19000,
    "min_bedrooms": 2,
    "property_type": "apartment"
}"#;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CriteriaPayload {
    location: String,
    max_price: u64,
    min_bedrooms: u32,
    property_type: Option<String>,
    min_size_m2: Option<u32>,
    max_size_m2: Option<u32>,
    furnished: Option<bool>,
    immediate_availability: Option<bool>,
    pets_allowed: Option<bool>,
}

/// Validate a structured payload into criteria; no partial result is ever returned
pub fn parse_criteria(payload: &str) -> Result<Criteria, CriteriaParseError> {
    let parsed: CriteriaPayload = serde_json::from_str(payload.trim())
        .map_err(|e| CriteriaParseError::invalid(format!("malformed payload: {}", e)))?;

    let criteria = Criteria {
        location: parsed.location.trim().to_string(),
        max_price: parsed.max_price,
        min_bedrooms: parsed.min_bedrooms,
        property_type: parsed
            .property_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| ANY_PROPERTY_TYPE.to_string()),
        min_size_m2: parsed.min_size_m2,
        max_size_m2: parsed.max_size_m2,
        furnished: parsed.furnished,
        immediate_availability: parsed.immediate_availability,
        pets_allowed: parsed.pets_allowed,
    };
    criteria.validate()?;
    Ok(criteria)
}

/// Turn a free-text request into validated criteria
pub async fn interpret(
    extractor: &dyn CriteriaExtractor,
    query: &str,
) -> Result<Criteria, CriteriaParseError> {
    let payload = extractor
        .extract_criteria(EXTRACTION_INSTRUCTIONS, query)
        .await
        .map_err(|e| {
            CriteriaParseError::invalid(format!("{} failed: {:#}", extractor.service_name(), e))
        })?;

    let criteria = parse_criteria(&payload)?;
    debug!(?criteria, "Interpreted query");
    Ok(criteria)
}

/// Whatever could be read from the conversation so far; every field optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialCriteria {
    pub location: Option<String>,
    pub max_price: Option<u64>,
    pub min_bedrooms: Option<u32>,
    pub property_type: Option<String>,
    pub min_size_m2: Option<u32>,
    pub max_size_m2: Option<u32>,
    pub furnished: Option<bool>,
    pub immediate_availability: Option<bool>,
    pub pets_allowed: Option<bool>,
}

impl PartialCriteria {
    /// Read every well-typed field from a payload, ignoring the rest
    pub fn from_payload(payload: &str) -> Self {
        let value: Value = match serde_json::from_str(payload.trim()) {
            Ok(value) => value,
            Err(e) => {
                debug!("Unreadable intake payload: {}", e);
                return Self::default();
            }
        };

        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let number = |key: &str| value.get(key).and_then(Value::as_u64);
        let small = |key: &str| number(key).and_then(|n| u32::try_from(n).ok());
        let flag = |key: &str| value.get(key).and_then(Value::as_bool);

        Self {
            location: text("location"),
            max_price: number("max_price").filter(|p| *p > 0),
            min_bedrooms: small("min_bedrooms"),
            property_type: text("property_type"),
            min_size_m2: small("min_size_m2"),
            max_size_m2: small("max_size_m2"),
            furnished: flag("furnished"),
            immediate_availability: flag("immediate_availability"),
            pets_allowed: flag("pets_allowed"),
        }
    }

    /// Overlay newer answers on top of what was already collected
    pub fn merge(&mut self, newer: PartialCriteria) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.location, newer.location);
        take(&mut self.max_price, newer.max_price);
        take(&mut self.min_bedrooms, newer.min_bedrooms);
        take(&mut self.property_type, newer.property_type);
        take(&mut self.min_size_m2, newer.min_size_m2);
        take(&mut self.max_size_m2, newer.max_size_m2);
        take(&mut self.furnished, newer.furnished);
        take(&mut self.immediate_availability, newer.immediate_availability);
        take(&mut self.pets_allowed, newer.pets_allowed);
    }

    /// Human names of the required fields still missing
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.location.is_none() {
            missing.push("location");
        }
        if self.min_bedrooms.is_none() {
            missing.push("number of rooms");
        }
        if self.max_price.is_none() {
            missing.push("maximum monthly rent in DKK");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn to_criteria(&self) -> Result<Criteria, CriteriaParseError> {
        let (Some(location), Some(max_price), Some(min_bedrooms)) =
            (&self.location, self.max_price, self.min_bedrooms)
        else {
            return Err(CriteriaParseError::invalid(format!(
                "missing {}",
                self.missing().join(", ")
            )));
        };

        let criteria = Criteria {
            location: location.clone(),
            max_price,
            min_bedrooms,
            property_type: self
                .property_type
                .clone()
                .unwrap_or_else(|| ANY_PROPERTY_TYPE.to_string()),
            min_size_m2: self.min_size_m2,
            max_size_m2: self.max_size_m2,
            furnished: self.furnished,
            immediate_availability: self.immediate_availability,
            pets_allowed: self.pets_allowed,
        };
        criteria.validate()?;
        Ok(criteria)
    }
}

/// Best-effort reading of one intake turn; collaborator failures yield nothing
pub async fn interpret_partial(extractor: &dyn CriteriaExtractor, text: &str) -> PartialCriteria {
    match extractor.extract_criteria(EXTRACTION_INSTRUCTIONS, text).await {
        Ok(payload) => PartialCriteria::from_payload(&payload),
        Err(e) => {
            warn!("{} failed during intake: {:#}", extractor.service_name(), e);
            PartialCriteria::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    struct Canned(Result<String, String>);

    #[async_trait]
    impl CriteriaExtractor for Canned {
        async fn extract_criteria(&self, _instructions: &str, _query: &str) -> Result<String> {
            self.0.clone().map_err(|e| anyhow::anyhow!(e))
        }

        fn service_name(&self) -> &'static str {
            "canned"
        }
    }

    #[test]
    fn parses_complete_payload() {
        let criteria = parse_criteria(
            r#"{"location": "copenhagen", "max_price": 19000, "min_bedrooms": 2, "property_type": "apartment"}"#,
        )
        .unwrap();
        assert_eq!(criteria.location, "copenhagen");
        assert_eq!(criteria.max_price, 19000);
        assert_eq!(criteria.min_bedrooms, 2);
        assert_eq!(criteria.property_type, "apartment");
    }

    #[test]
    fn property_type_defaults_to_all() {
        let criteria =
            parse_criteria(r#"{"location": "aarhus", "max_price": 9000, "min_bedrooms": 1}"#).unwrap();
        assert_eq!(criteria.property_type, "all");
    }

    #[test]
    fn optional_filters_are_carried() {
        let criteria = parse_criteria(
            r#"{"location": "odense", "max_price": 9000, "min_bedrooms": 1,
                "min_size_m2": 50, "pets_allowed": true, "furnished": null}"#,
        )
        .unwrap();
        assert_eq!(criteria.min_size_m2, Some(50));
        assert_eq!(criteria.pets_allowed, Some(true));
        assert_eq!(criteria.furnished, None);
    }

    #[test]
    fn rejects_missing_wrong_typed_or_unknown_fields() {
        for payload in [
            r#"{"max_price": 19000, "min_bedrooms": 2}"#,
            r#"{"location": "copenhagen", "max_price": "19000", "min_bedrooms": 2}"#,
            r#"{"location": "copenhagen", "max_price": 19000, "min_bedrooms": -1}"#,
            r#"{"location": "copenhagen", "max_price": 19000, "min_bedrooms": 2, "garden": true}"#,
            r#"{"location": "copenhagen", "max_price": 0, "min_bedrooms": 2}"#,
            "Sure! Here is the JSON you asked for",
            "",
        ] {
            let err = parse_criteria(payload).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Please specify location, number of rooms, and maximum monthly rent."
            );
        }
    }

    #[tokio::test]
    async fn interpret_wraps_collaborator_failure() {
        let extractor = Canned(Err("rate limited".into()));
        let err = interpret(&extractor, "2 rooms in copenhagen").await.unwrap_err();
        assert!(err.cause().contains("rate limited"));
    }

    #[tokio::test]
    async fn interpret_returns_criteria() {
        let extractor = Canned(Ok(
            r#"{"location": "Copenhagen", "max_price": 19000, "min_bedrooms": 2}"#.into(),
        ));
        let criteria = interpret(&extractor, "anything").await.unwrap();
        assert_eq!(criteria, Criteria::new("Copenhagen", 19000, 2).unwrap());
    }

    #[test]
    fn partial_payload_keeps_good_fields() {
        let partial =
            PartialCriteria::from_payload(r#"{"location": "Aalborg", "max_price": "lots", "min_bedrooms": null}"#);
        assert_eq!(partial.location.as_deref(), Some("Aalborg"));
        assert_eq!(partial.max_price, None);
        assert_eq!(partial.missing(), vec!["number of rooms", "maximum monthly rent in DKK"]);
    }

    #[test]
    fn partial_merge_accumulates_answers() {
        let mut collected = PartialCriteria::from_payload(r#"{"location": "Aarhus"}"#);
        collected.merge(PartialCriteria::from_payload(r#"{"min_bedrooms": 3}"#));
        assert!(!collected.is_complete());

        collected.merge(PartialCriteria::from_payload(r#"{"location": null, "max_price": 12000}"#));
        assert!(collected.is_complete());

        let criteria = collected.to_criteria().unwrap();
        assert_eq!(criteria.location, "Aarhus");
        assert_eq!(criteria.min_bedrooms, 3);
        assert_eq!(criteria.max_price, 12000);
    }

    #[test]
    fn garbage_payload_yields_empty_partial() {
        assert_eq!(PartialCriteria::from_payload("not json"), PartialCriteria::default());
    }

    #[tokio::test]
    async fn interpret_partial_swallows_failures() {
        let extractor = Canned(Err("down".into()));
        assert_eq!(interpret_partial(&extractor, "hi").await, PartialCriteria::default());
    }
}

// 3rd party crates
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Document introducing goods into circulation.
///
/// Absent or `null` fields decode to their empty value, so partial API
/// responses still parse.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Document {
    pub participant_inn: Option<String>,
    pub doc_id: Option<String>,
    pub doc_status: Option<String>,
    pub doc_type: Option<String>,
    pub import_request: bool,
    pub owner_inn: Option<String>,
    pub producer_inn: Option<String>,
    #[serde(with = "optional_date")]
    pub production_date: Option<NaiveDate>,
    pub production_type: Option<String>,
    pub products: Vec<Product>,
    #[serde(with = "optional_date")]
    pub reg_date: Option<NaiveDate>,
    pub reg_number: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Product {
    pub certificate_document: Option<String>,
    #[serde(with = "optional_date")]
    pub certificate_document_date: Option<NaiveDate>,
    pub certificate_document_number: Option<String>,
    pub owner_inn: Option<String>,
    pub producer_inn: Option<String>,
    #[serde(with = "optional_date")]
    pub production_date: Option<NaiveDate>,
    pub tnved_code: Option<String>,
    pub uit_code: Option<String>,
    pub uitu_code: Option<String>,
}

impl Document {
    /// Identifier used in logs and errors.
    pub fn label(&self) -> &str {
        self.doc_id.as_deref().unwrap_or("<unidentified>")
    }
}

/// `yyyy-MM-dd` encoding for optional dates.
pub mod optional_date {
    // 3rd party crates
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    // Project imports
    use crate::providers::crpt::constants::DATE_FORMAT;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{json, Value};

    fn sample_document() -> Document {
        Document {
            participant_inn: Some("7700000001".into()),
            doc_id: Some("doc-1".into()),
            doc_status: Some("DRAFT".into()),
            doc_type: Some("LP_INTRODUCE_GOODS".into()),
            import_request: true,
            owner_inn: Some("7700000002".into()),
            producer_inn: Some("7700000003".into()),
            production_date: NaiveDate::from_ymd_opt(2024, 1, 5),
            production_type: Some("OWN_PRODUCTION".into()),
            products: vec![Product {
                certificate_document: Some("CONFORMITY_CERTIFICATE".into()),
                certificate_document_date: NaiveDate::from_ymd_opt(2023, 12, 31),
                certificate_document_number: Some("RU-123".into()),
                owner_inn: Some("7700000002".into()),
                producer_inn: Some("7700000003".into()),
                production_date: NaiveDate::from_ymd_opt(2024, 1, 5),
                tnved_code: Some("6401100000".into()),
                uit_code: Some("010460".into()),
                uitu_code: None,
            }],
            reg_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            reg_number: Some("42".into()),
        }
    }

    #[test]
    fn test_document_uses_wire_names_and_date_format() {
        let value: Value = serde_json::to_value(sample_document()).unwrap();

        assert_eq!(value["participant_inn"], "7700000001");
        assert_eq!(value["import_request"], true);
        assert_eq!(value["production_date"], "2024-01-05");
        assert_eq!(value["reg_date"], "2024-02-01");

        let product = &value["products"][0];
        assert_eq!(product["certificate_document_date"], "2023-12-31");
        assert_eq!(product["tnved_code"], "6401100000");
        assert_eq!(product["uitu_code"], Value::Null);
    }

    #[test]
    fn test_partial_response_decodes_leniently() {
        let body = json!({
            "doc_id": "doc-1",
            "doc_status": null,
            "reg_date": "2024-02-01"
        });

        let document: Document = serde_json::from_value(body).unwrap();

        assert_eq!(document.label(), "doc-1");
        assert_eq!(document.doc_status, None);
        assert_eq!(document.reg_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert!(document.products.is_empty());
        assert!(!document.import_request);
    }

    #[test]
    fn test_rejects_malformed_date() {
        let body = json!({ "production_date": "05.01.2024" });
        assert!(serde_json::from_value::<Document>(body).is_err());
    }
}

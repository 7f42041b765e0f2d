use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Top-level shape of the source file: `{ "data": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct InputDocument {
    pub data: Vec<InputRecord>,
}

/// One raw disbursement entry, field names as they appear in the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    #[serde(rename = "Constituency")]
    pub constituency: String,
    pub category: String,
    #[serde(rename = "Sub category")]
    pub sub_category: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}

/// One normalized disbursement entry as written to the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub constituency: String,
    pub category: String,
    pub sub_category: String,
    pub amount: Amount,
}

/// Disbursed value.
///
/// `Blank` covers source cells that were empty, whitespace or a bare `"0"`
/// and is written as the integer `0`. `Parsed` is written with the JSON
/// float formatter, so whole values keep their trailing `.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Blank,
    Parsed(f64),
}

impl Amount {
    pub fn value(&self) -> f64 {
        match self {
            Amount::Blank => 0.0,
            Amount::Parsed(v) => *v,
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Amount::Blank => serializer.serialize_u64(0),
            Amount::Parsed(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        if number.as_u64() == Some(0) {
            return Ok(Amount::Blank);
        }
        number
            .as_f64()
            .map(Amount::Parsed)
            .ok_or_else(|| serde::de::Error::custom(format!("amount {} is out of range", number)))
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<OutputRecord>,
    pub artifact: String,
}

use serde::{Deserialize, Deserializer};

use super::pagination::first_page;

// the page query argument never fails the request, garbage means the first page
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or_else(first_page))
}

// previous_questions is sent by the client as a list of ids, sometimes stringified
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StrOrI64 {
    Int(i64),
    Str(String),
}

impl TryFrom<StrOrI64> for i64 {
    type Error = String;

    fn try_from(value: StrOrI64) -> Result<Self, Self::Error> {
        match value {
            StrOrI64::Int(v) => Ok(v),
            StrOrI64::Str(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("Wrong value {s}, can not parse to i64")),
        }
    }
}

pub fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<StrOrI64>>::deserialize(deserializer)?;
    values
        .unwrap_or_default()
        .into_iter()
        .map(|v| i64::try_from(v).map_err(serde::de::Error::custom))
        .collect()
}

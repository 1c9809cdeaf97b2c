//! Core data structures for the Tian API content sensors

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider status code for a successful response
pub const CODE_SUCCESS: i64 = 200;

/// Provider status code for rate limiting (transient)
pub const CODE_RATE_LIMIT: i64 = 130;

/// Provider status code for an invalid API key (persistent)
pub const CODE_INVALID_KEY: i64 = 100;

/// Content category enumeration
///
/// Each category maps to one provider endpoint. The string key doubles as the
/// cache key shared by all sensors in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Morning,
    Evening,
    Maxim,
    Joke,
    Sentence,
    Couplet,
    History,
    PoetryTang,
    PoetrySong,
    PoetryYuan,
    Riddle,
}

impl Category {
    /// Get the cache key / string identifier
    pub fn key(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Evening => "evening",
            Self::Maxim => "maxim",
            Self::Joke => "joke",
            Self::Sentence => "sentence",
            Self::Couplet => "couplet",
            Self::History => "history",
            Self::PoetryTang => "poetry",
            Self::PoetrySong => "songci",
            Self::PoetryYuan => "yuanqu",
            Self::Riddle => "riddle",
        }
    }

    /// Get the endpoint path on the provider host
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Self::Morning => "zaoan/index",
            Self::Evening => "wanan/index",
            Self::Maxim => "enmaxim/index",
            Self::Joke => "joke/index",
            Self::Sentence => "gjmj/index",
            Self::Couplet => "duilian/index",
            Self::History => "phistory/index",
            Self::PoetryTang => "poetries/index",
            Self::PoetrySong => "zmsc/index",
            Self::PoetryYuan => "yuanqu/index",
            Self::Riddle => "caizimi/index",
        }
    }

    /// Extra query parameters required by the endpoint
    pub fn query_params(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Joke => &[("num", "1")],
            Self::PoetryYuan => &[("num", "1"), ("page", "1")],
            _ => &[],
        }
    }

    /// Get Chinese name for logs and display
    pub fn chinese_name(&self) -> &'static str {
        match self {
            Self::Morning => "早安心语",
            Self::Evening => "晚安心语",
            Self::Maxim => "英文格言",
            Self::Joke => "每日笑话",
            Self::Sentence => "古籍名句",
            Self::Couplet => "经典对联",
            Self::History => "简说历史",
            Self::PoetryTang => "唐诗鉴赏",
            Self::PoetrySong => "最美宋词",
            Self::PoetryYuan => "精选元曲",
            Self::Riddle => "每日谜语",
        }
    }

    /// Create from string key
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "morning" | "zaoan" => Some(Self::Morning),
            "evening" | "wanan" => Some(Self::Evening),
            "maxim" => Some(Self::Maxim),
            "joke" => Some(Self::Joke),
            "sentence" | "gjmj" => Some(Self::Sentence),
            "couplet" | "duilian" => Some(Self::Couplet),
            "history" => Some(Self::History),
            "poetry" | "tangshi" => Some(Self::PoetryTang),
            "songci" => Some(Self::PoetrySong),
            "yuanqu" => Some(Self::PoetryYuan),
            "riddle" | "caizimi" => Some(Self::Riddle),
            _ => None,
        }
    }

    /// Get all categories
    pub fn all() -> Vec<Self> {
        vec![
            Self::Morning,
            Self::Evening,
            Self::Maxim,
            Self::Joke,
            Self::Sentence,
            Self::Couplet,
            Self::History,
            Self::PoetryTang,
            Self::PoetrySong,
            Self::PoetryYuan,
            Self::Riddle,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A single keyed record from a provider result
///
/// The provider returns loosely-shaped JSON objects whose field sets differ
/// per category, so records stay schemaless and are read by field name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// Get a string field, if present and non-empty
    pub fn field(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Get a string field with a fallback default
    pub fn field_or(&self, name: &str, default: &str) -> String {
        self.field(name).unwrap_or(default).to_string()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw `result` payload as returned by the provider
///
/// Some endpoints return a single object, others wrap an ordered list in a
/// `list` key or return a bare array. `first_or_empty` normalizes all shapes
/// at the fetch boundary so downstream code only ever sees one [`Record`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    /// `{"list": [{...}, ...]}`
    Listed { list: Vec<Record> },
    /// `[{...}, ...]`
    Many(Vec<Record>),
    /// `{...}`
    Single(Record),
}

impl ResultPayload {
    /// Normalize to the first record, or an empty record if none exists
    pub fn first_or_empty(self) -> Record {
        match self {
            Self::Single(record) => record,
            Self::Listed { list } | Self::Many(list) => {
                list.into_iter().next().unwrap_or_default()
            }
        }
    }
}

/// Wire shape of one provider response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    /// Provider-defined status code (not the HTTP status)
    pub code: i64,

    /// Provider error message, present on failures
    #[serde(default)]
    pub msg: Option<String>,

    /// Result payload, absent on failures
    #[serde(default)]
    pub result: Option<ResultPayload>,
}

/// Result of one successful fetch for one category, normalized to a single
/// record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPayload {
    /// Provider status code the payload was accepted with
    pub code: i64,

    /// First (or only) result record
    pub record: Record,
}

impl CategoryPayload {
    /// Create from a raw response, normalizing the result shape
    pub fn from_response(response: ApiResponse) -> Self {
        Self {
            code: response.code,
            record: response
                .result
                .map(ResultPayload::first_or_empty)
                .unwrap_or_default(),
        }
    }

    /// Check whether this payload may be stored in the cache
    pub fn is_cache_eligible(&self) -> bool {
        self.code == CODE_SUCCESS && !self.record.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_roundtrip() {
        for category in Category::all() {
            assert_eq!(Category::parse(category.key()), Some(category));
        }
        assert_eq!(Category::parse("unknown"), None);
    }

    #[test]
    fn test_category_query_params() {
        assert!(Category::Morning.query_params().is_empty());
        assert_eq!(Category::Joke.query_params(), &[("num", "1")]);
        assert_eq!(
            Category::PoetryYuan.query_params(),
            &[("num", "1"), ("page", "1")]
        );
    }

    #[test]
    fn test_result_payload_single() {
        let response: ApiResponse = serde_json::from_value(json!({
            "code": 200,
            "result": {"content": "甲", "source": "乙"}
        }))
        .unwrap();

        let payload = CategoryPayload::from_response(response);
        assert_eq!(payload.record.field("content"), Some("甲"));
        assert!(payload.is_cache_eligible());
    }

    #[test]
    fn test_result_payload_listed() {
        let response: ApiResponse = serde_json::from_value(json!({
            "code": 200,
            "result": {"list": [{"title": "一"}, {"title": "二"}]}
        }))
        .unwrap();

        let payload = CategoryPayload::from_response(response);
        assert_eq!(payload.record.field("title"), Some("一"));
    }

    #[test]
    fn test_result_payload_bare_array() {
        let response: ApiResponse = serde_json::from_value(json!({
            "code": 200,
            "result": [{"content": "丙"}]
        }))
        .unwrap();

        let payload = CategoryPayload::from_response(response);
        assert_eq!(payload.record.field("content"), Some("丙"));
    }

    #[test]
    fn test_empty_result_not_cache_eligible() {
        let response: ApiResponse = serde_json::from_value(json!({
            "code": 200,
            "result": {"list": []}
        }))
        .unwrap();

        let payload = CategoryPayload::from_response(response);
        assert!(payload.record.is_empty());
        assert!(!payload.is_cache_eligible());
    }

    #[test]
    fn test_error_code_not_cache_eligible() {
        let response: ApiResponse = serde_json::from_value(json!({
            "code": 130,
            "msg": "API rate limit"
        }))
        .unwrap();

        let payload = CategoryPayload::from_response(response);
        assert!(!payload.is_cache_eligible());
    }

    #[test]
    fn test_record_field_access() {
        let record: Record =
            serde_json::from_value(json!({"content": "诗句", "count": 3, "empty": ""})).unwrap();

        assert_eq!(record.field("content"), Some("诗句"));
        assert_eq!(record.field("count"), None); // not a string
        assert_eq!(record.field("empty"), None); // empty string counts as absent
        assert_eq!(record.field_or("missing", "暂无内容"), "暂无内容");
    }
}

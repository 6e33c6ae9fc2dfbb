use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ErrorPayload;

// 服务端可能返回 null 的列表/对象字段按缺省值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// 请求体
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub input_method: u8,
    #[serde(rename = "g_ver")]
    pub g_ver: &'a str,
    #[serde(rename = "g_os")]
    pub g_os: &'a str,
    pub text: &'a str,
    pub highlight: bool,
    pub types: &'a [&'a str],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDetailRequest<'a> {
    pub skip_accessories: bool,
    pub object_id: &'a str,
    #[serde(rename = "g_os")]
    pub g_os: &'a str,
    pub is_verb3: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequest<'a> {
    pub voice_id: &'a str,
    #[serde(rename = "g_os")]
    pub g_os: &'a str,
    pub tar_id: &'a str,
    pub tar_type: u16,
}

// ---------------------------------------------------------------------------
// 响应体
// ---------------------------------------------------------------------------

/// Parse 云函数统一外壳：`{"result": ...}`
#[derive(Debug, Deserialize)]
pub struct ParseResponse<T> {
    pub result: Option<T>,
}

/// 非 2xx 响应体，只取其中的 `error` 文本
#[derive(Debug, Default, Deserialize)]
pub struct ServiceErrorBody {
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchData {
    pub result: Option<SearchGroups>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchGroups {
    pub word: Option<WordSearch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSearch {
    #[serde(default, deserialize_with = "null_as_default")]
    pub search_result: Vec<SearchCandidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCandidate {
    pub target_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordDetailData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: Vec<WordEntry>,
    pub thesaurus: Option<Thesaurus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conjugate: Conjugate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub word: Word,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: Vec<Detail>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subdetails: Vec<Subdetail>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Word {
    #[serde(default, deserialize_with = "null_as_default")]
    pub spell: String,
    pub accent: Option<String>,
    pub pron: Option<String>,
    pub romaji: Option<String>,
    pub tags: Option<String>,
    pub excerpt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detail {
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subdetail {
    pub object_id: Option<String>,
    pub details_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub subdetails_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub trans: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thesaurus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub synonyms: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Conjugate {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub type_label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forms: Vec<Vec<ConjugateForm>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConjugateForm {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub form: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TtsData {
    pub code: Option<i64>,
    pub result: Option<TtsUrl>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TtsUrl {
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// 返回给宿主的结构
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DictionaryResult {
    pub word: String,
    pub parts: Vec<Part>,
    pub exchanges: Vec<Exchange>,
    pub additions: Vec<Addition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    pub part: String,
    pub means: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    pub name: String,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Addition {
    pub name: String,
    pub value: String,
}

/// 发音引用，没有可用音频时序列化为 `{}`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TtsReference {
    Url(String),
    #[default]
    Unavailable,
}

impl Serialize for TtsReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TtsReference::Url(url) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "url")?;
                map.serialize_entry("value", url)?;
                map.end()
            }
            TtsReference::Unavailable => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResult {
    pub from: String,
    pub to: String,
    pub to_paragraphs: Vec<String>,
    pub to_dict: DictionaryResult,
    #[serde(rename = "toTTS")]
    pub to_tts: TtsReference,
}

/// 每次查询唯一一次的终止回调内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Completion {
    Result(TranslateResult),
    Error(ErrorPayload),
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_bodies_use_service_field_names() {
        let search = SearchRequest {
            input_method: 0,
            g_ver: "v8.9.0",
            g_os: "iOS",
            text: "猫",
            highlight: true,
            types: &["102", "103"],
        };
        assert_eq!(
            serde_json::to_value(&search).unwrap(),
            json!({
                "inputMethod": 0,
                "g_ver": "v8.9.0",
                "g_os": "iOS",
                "text": "猫",
                "highlight": true,
                "types": ["102", "103"]
            })
        );

        let tts = TtsRequest {
            voice_id: "f000",
            g_os: "iOS",
            tar_id: "id1",
            tar_type: 102,
        };
        assert_eq!(
            serde_json::to_value(&tts).unwrap(),
            json!({"voiceId": "f000", "g_os": "iOS", "tarId": "id1", "tarType": 102})
        );
    }

    #[test]
    fn null_collections_deserialize_as_empty() {
        let data: WordDetailData = serde_json::from_value(json!({
            "result": [{
                "word": {"spell": "猫"},
                "details": null,
                "subdetails": null
            }],
            "thesaurus": {"synonyms": null},
            "conjugate": null
        }))
        .unwrap();

        let entry = &data.result[0];
        assert_eq!(entry.word.spell, "猫");
        assert!(entry.details.is_empty());
        assert!(entry.examples.is_empty());
        assert!(data.thesaurus.unwrap().synonyms.is_empty());
        assert_eq!(data.conjugate.type_label, "");
        assert!(data.conjugate.forms.is_empty());
    }

    #[test]
    fn records_without_join_ids_still_decode() {
        let entry: WordEntry = serde_json::from_value(json!({
            "word": {"spell": "猫"},
            "details": [{"objectId": null, "title": "名"}],
            "subdetails": [{"objectId": "s1", "title": "猫。"}],
            "examples": [{"subdetailsId": null, "title": "free", "trans": "x"}]
        }))
        .unwrap();

        assert_eq!(entry.details[0].object_id, None);
        assert_eq!(entry.subdetails[0].details_id, None);
        assert_eq!(entry.examples[0].subdetails_id, None);
    }

    #[test]
    fn tts_reference_serializes_to_host_shape() {
        assert_eq!(
            serde_json::to_value(TtsReference::Url("http://x".into())).unwrap(),
            json!({"type": "url", "value": "http://x"})
        );
        assert_eq!(serde_json::to_value(TtsReference::Unavailable).unwrap(), json!({}));
    }

    #[test]
    fn completion_is_tagged_by_outcome() {
        let result = TranslateResult {
            from: "ja".into(),
            to: "zh-Hans".into(),
            to_paragraphs: vec!["p".into()],
            to_dict: DictionaryResult::default(),
            to_tts: TtsReference::Unavailable,
        };
        let value = serde_json::to_value(Completion::Result(result)).unwrap();
        assert_eq!(value["result"]["toParagraphs"], json!(["p"]));
        assert_eq!(value["result"]["toTTS"], json!({}));
        assert_eq!(value["result"]["toDict"]["parts"], json!([]));

        assert_eq!(serde_json::to_value(Completion::Cancelled).unwrap(), json!("cancelled"));
    }
}

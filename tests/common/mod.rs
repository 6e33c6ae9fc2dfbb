#![allow(dead_code)]

use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

use moji_dictionary::{ApiClient, Config, MojiPlugin};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    config
}

pub fn test_client(server: &MockServer) -> ApiClient {
    ApiClient::new(test_config(server)).expect("Failed to build api client")
}

pub fn test_plugin(server: &MockServer) -> MojiPlugin {
    MojiPlugin::new(test_config(server)).expect("Failed to build plugin")
}

pub fn search_body(target_ids: &[&str]) -> Value {
    let candidates: Vec<Value> = target_ids
        .iter()
        .map(|id| json!({"targetId": id}))
        .collect();
    json!({"result": {"result": {"word": {"searchResult": candidates}}}})
}

pub fn detail_body() -> Value {
    json!({
        "result": {
            "result": [{
                "word": {
                    "objectId": "w1",
                    "spell": "食べる",
                    "accent": "②",
                    "pron": "たべる",
                    "romaji": "taberu",
                    "tags": "JLPT#N5",
                    "excerpt": "[他动·一段]#吃。"
                },
                "details": [
                    {"objectId": "d1", "title": "他动#一段"},
                    {"objectId": "d2", "title": "他动"}
                ],
                "subdetails": [
                    {"objectId": "s1", "detailsId": "d1", "title": "吃。"},
                    {"objectId": "s2", "detailsId": "d2", "title": "生活。"}
                ],
                "examples": [
                    {"subdetailsId": "s1", "title": "ご飯を食べる。", "trans": "吃饭。"}
                ]
            }],
            "thesaurus": {"synonyms": ["食う"], "antonyms": null},
            "conjugate": {
                "type": "一段动词",
                "forms": [
                    [{"name": "ます形", "form": "食べます"}],
                    [{"name": "て形", "form": "食べて"}, {"name": "た形", "form": "食べた"}]
                ]
            }
        }
    })
}

pub fn tts_body(code: i64, url: &str) -> Value {
    json!({"result": {"code": code, "result": {"url": url}}})
}

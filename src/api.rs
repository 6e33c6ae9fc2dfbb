use anyhow::Result;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{KnownError, QueryError};
use crate::models::*;

const SEARCH_ENDPOINT: &str = "search-all";
const WORD_DETAIL_ENDPOINT: &str = "ui-union-apis-word";
const TTS_ENDPOINT: &str = "tts-fetch";

// 搜索时只查询这几类词条
const SEARCH_TYPES: &[&str] = &["102", "103", "106", "431"];
const TTS_TARGET_TYPE: u16 = 102;

const SEARCH_LABEL: &str = "API 搜索接口";
const WORD_DETAIL_LABEL: &str = "API 单词详情接口";
const TTS_LABEL: &str = "API 发音接口";

pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.api.user_agent)?);
        headers.insert(
            "X-Parse-Application-Id",
            HeaderValue::from_str(&config.api.application_id)?,
        );

        let client = ClientBuilder::new()
            .timeout(config.processing.request_timeout())
            .default_headers(headers)
            .build()?;

        Ok(ApiClient { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.api.base_url.trim_end_matches('/'), endpoint)
    }

    // 发送请求并读取响应文本；传输层错误与服务端错误在这里区分
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        label: &str,
        body: &B,
    ) -> Result<String, QueryError> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(%url, "发送请求");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(e, label))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| transport_error(e, label))?;

        if !status.is_success() {
            return Err(service_error(status, &text, label).into());
        }
        Ok(text)
    }

    /// 搜索文本，返回最匹配词条的 targetId
    pub async fn search(&self, text: &str) -> Result<String, QueryError> {
        tracing::info!(text, "搜索请求");

        let request = SearchRequest {
            input_method: 0,
            g_ver: &self.config.api.client_version,
            g_os: &self.config.api.client_os,
            text,
            highlight: true,
            types: SEARCH_TYPES,
        };
        let body = self.post_json(SEARCH_ENDPOINT, SEARCH_LABEL, &request).await?;

        let response = parse_body::<Option<ParseResponse<SearchData>>>(&body)
            .ok()
            .flatten()
            .ok_or_else(|| {
                KnownError::api(format!("{}返回数据为空", SEARCH_LABEL))
                    .with_addition("请检查网络连接或 API 接口状态")
            })?;

        let candidates = response
            .result
            .and_then(|data| data.result)
            .and_then(|groups| groups.word)
            .map(|word| word.search_result)
            .unwrap_or_default();
        tracing::debug!(count = candidates.len(), "搜索结果");

        let first = candidates
            .into_iter()
            .next()
            .ok_or_else(|| KnownError::not_found("未找到结果"))?;

        first.target_id.filter(|id| !id.is_empty()).ok_or_else(|| {
            KnownError::api("搜索结果格式错误")
                .with_addition("返回数据中缺少 targetId")
                .into()
        })
    }

    /// 获取词条详情（释义、例句、同反义词、活用）
    pub async fn fetch_word_details(&self, target_id: &str) -> Result<WordDetailData, QueryError> {
        let request = WordDetailRequest {
            skip_accessories: false,
            object_id: target_id,
            g_os: &self.config.api.client_os,
            is_verb3: true,
        };
        let body = self
            .post_json(WORD_DETAIL_ENDPOINT, WORD_DETAIL_LABEL, &request)
            .await?;

        let empty = || KnownError::api(format!("{}返回数据为空", WORD_DETAIL_LABEL));
        let response = parse_body::<ParseResponse<WordDetailData>>(&body)
            .map_err(|e| empty().with_addition(e.to_string()))?;

        match response.result {
            Some(data) if !data.result.is_empty() => Ok(data),
            _ => Err(empty().into()),
        }
    }

    /// 获取发音地址，任何失败都只返回空引用
    pub async fn fetch_tts(&self, target_id: &str) -> TtsReference {
        let request = TtsRequest {
            voice_id: &self.config.api.voice_id,
            g_os: &self.config.api.client_os,
            tar_id: target_id,
            tar_type: TTS_TARGET_TYPE,
        };

        let body = match self.post_json(TTS_ENDPOINT, TTS_LABEL, &request).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "获取发音失败");
                return TtsReference::Unavailable;
            }
        };

        let data = match parse_body::<ParseResponse<TtsData>>(&body) {
            Ok(response) => response.result.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "发音数据解析失败");
                return TtsReference::Unavailable;
            }
        };

        match (data.code, data.result.and_then(|r| r.url)) {
            (Some(200), Some(url)) => TtsReference::Url(url),
            (code, _) => {
                tracing::warn!(?code, "发音不可用");
                TtsReference::Unavailable
            }
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> serde_json::Result<T> {
    serde_json::from_str(body)
}

fn transport_error(err: reqwest::Error, label: &str) -> QueryError {
    if err.is_builder() {
        return anyhow::Error::new(err)
            .context(format!("{}请求构造失败", label))
            .into();
    }
    let message = if err.is_timeout() {
        format!("{}请求超时", label)
    } else {
        format!("{}网络请求失败", label)
    };
    KnownError::network(message).with_addition(err.to_string()).into()
}

fn service_error(status: StatusCode, body: &str, label: &str) -> KnownError {
    let reason = parse_body::<ServiceErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| body.to_string());
    KnownError::api(format!("{}响应错误 - {}", label, status)).with_addition(reason)
}

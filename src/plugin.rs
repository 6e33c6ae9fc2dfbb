use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{KnownError, QueryError, normalize};
use crate::language;
use crate::models::*;
use crate::transform::{build_dictionary, excerpt_paragraph};

pub type CompletionHandler = Box<dyn FnOnce(Completion) + Send + Sync>;
pub type StreamHandler = Box<dyn Fn(&TranslateResult) + Send + Sync>;

/// 宿主发起的一次查询
///
/// 完成回调是 `FnOnce`，查询被消费时恰好调用一次。
pub struct Query {
    pub text: String,
    pub from: String,
    pub to: String,
    pub detect_from: String,
    pub detect_to: String,
    pub cancel: CancellationToken,
    /// 流式回调，词典查询不会使用
    pub on_stream: Option<StreamHandler>,
    on_completion: CompletionHandler,
}

impl Query {
    pub fn new(
        text: impl Into<String>,
        on_completion: impl FnOnce(Completion) + Send + Sync + 'static,
    ) -> Self {
        Self {
            text: text.into(),
            from: "auto".to_string(),
            to: "auto".to_string(),
            detect_from: "ja".to_string(),
            detect_to: "zh-Hans".to_string(),
            cancel: CancellationToken::new(),
            on_stream: None,
            on_completion: Box::new(on_completion),
        }
    }

    pub fn with_languages(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from = from.into();
        self.to = to.into();
        self
    }

    pub fn with_detected(mut self, detect_from: impl Into<String>, detect_to: impl Into<String>) -> Self {
        self.detect_from = detect_from.into();
        self.detect_to = detect_to.into();
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_stream(mut self, on_stream: impl Fn(&TranslateResult) + Send + Sync + 'static) -> Self {
        self.on_stream = Some(Box::new(on_stream));
        self
    }

    fn complete(self, completion: Completion) {
        (self.on_completion)(completion);
    }
}

/// 宿主驱动插件的接口
#[async_trait]
pub trait TranslatePlugin: Send + Sync {
    /// 支持的语言列表
    fn supported_languages(&self) -> Vec<&'static str>;

    /// 整次查询的超时时间
    fn timeout_interval(&self) -> Duration;

    /// 执行查询，结束时调用一次 `query` 的完成回调
    async fn translate(&self, query: Query);
}

pub struct MojiPlugin {
    api_client: ApiClient,
}

impl MojiPlugin {
    pub fn new(config: Config) -> Result<Self> {
        let api_client = ApiClient::new(config)?;
        Ok(MojiPlugin { api_client })
    }

    pub fn config(&self) -> &Config {
        self.api_client.config()
    }

    // 搜索 -> 详情 -> 发音 -> 转换，任何一步失败立即返回
    pub async fn lookup(&self, query: &Query) -> Result<TranslateResult, QueryError> {
        if query.cancel.is_cancelled() {
            return Err(QueryError::Cancelled);
        }
        validate(query)?;

        let cancel = &query.cancel;
        let target_id = cancellable(cancel, self.api_client.search(&query.text)).await??;
        let data = cancellable(cancel, self.api_client.fetch_word_details(&target_id)).await??;
        let to_tts = cancellable(cancel, self.api_client.fetch_tts(&target_id)).await?;

        let entry = data
            .result
            .first()
            .ok_or_else(|| KnownError::api("API 单词详情接口返回数据为空"))?;
        let to_dict = build_dictionary(&data, entry);
        tracing::info!(
            to_dict = %serde_json::to_string(&to_dict).unwrap_or_default(),
            "单词详情请求结果"
        );

        Ok(TranslateResult {
            from: query.detect_from.clone(),
            to: query.detect_to.clone(),
            to_paragraphs: vec![excerpt_paragraph(entry)],
            to_dict,
            to_tts,
        })
    }
}

#[async_trait]
impl TranslatePlugin for MojiPlugin {
    fn supported_languages(&self) -> Vec<&'static str> {
        language::supported_languages()
    }

    fn timeout_interval(&self) -> Duration {
        self.config().processing.plugin_timeout()
    }

    async fn translate(&self, query: Query) {
        let outcome = match tokio::time::timeout(self.timeout_interval(), self.lookup(&query)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(KnownError::network("查询超时").into()),
        };

        let completion = match outcome {
            Ok(result) => Completion::Result(result),
            Err(e) => normalize(e, &self.config().support.issues_url),
        };
        query.complete(completion);
    }
}

fn validate(query: &Query) -> Result<(), KnownError> {
    if query.text.trim().is_empty() {
        return Err(KnownError::param("查询内容为空"));
    }
    if !language::is_supported(&query.from) {
        return Err(KnownError::unsupported_language(format!("不支持的语言: {}", query.from)));
    }
    Ok(())
}

// 取消信号优先，收到后丢弃正在进行的请求
async fn cancellable<T>(cancel: &CancellationToken, fut: impl Future<Output = T>) -> Result<T, QueryError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(QueryError::Cancelled),
        value = fut => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn query(text: &str) -> Query {
        Query::new(text, |_| {})
    }

    #[test]
    fn rejects_blank_text() {
        let err = validate(&query("  \n")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Param);
    }

    #[test]
    fn rejects_unsupported_source_language() {
        let err = validate(&query("猫").with_languages("fr", "zh-Hans")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedLanguage);
        assert_eq!(err.message, "不支持的语言: fr");
    }

    #[test]
    fn accepts_auto_source() {
        assert!(validate(&query("猫")).is_ok());
    }

    #[tokio::test]
    async fn cancellable_prefers_cancel_signal() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = cancellable(&cancel, async { 1 }).await;
        assert!(matches!(outcome, Err(QueryError::Cancelled)));
    }

    #[tokio::test]
    async fn cancellable_passes_value_through() {
        let cancel = CancellationToken::new();
        assert_eq!(cancellable(&cancel, async { 7 }).await.unwrap(), 7);
    }

    #[test]
    fn advertises_languages_and_timeout() {
        let plugin = MojiPlugin::new(Config::default()).unwrap();
        assert_eq!(plugin.supported_languages(), vec!["auto", "zh-Hans", "zh-Hant", "en", "ja"]);
        assert_eq!(plugin.timeout_interval(), Duration::from_secs(30));
    }
}

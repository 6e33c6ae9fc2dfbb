use serde::Serialize;
use thiserror::Error;

use crate::models::Completion;

/// 宿主约定的错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Unknown,
    Param,
    UnsupportedLanguage,
    SecretKey,
    Network,
    Api,
    NotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Unknown => "unknown",
            ErrorKind::Param => "param",
            ErrorKind::UnsupportedLanguage => "unsupportedLanguage",
            ErrorKind::SecretKey => "secretKey",
            ErrorKind::Network => "network",
            ErrorKind::Api => "api",
            ErrorKind::NotFound => "notFound",
        }
    }
}

/// 在出错位置创建、由 [`normalize`] 统一处理的已知错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct KnownError {
    pub kind: ErrorKind,
    pub message: String,
    pub addition: Option<String>,
    pub troubleshooting_link: Option<String>,
}

impl KnownError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            addition: None,
            troubleshooting_link: None,
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    pub fn param(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Param, message)
    }

    pub fn unsupported_language(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedLanguage, message)
    }

    pub fn secret_key(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SecretKey, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn with_addition(mut self, addition: impl Into<String>) -> Self {
        self.addition = Some(addition.into());
        self
    }

    pub fn with_troubleshooting_link(mut self, link: impl Into<String>) -> Self {
        self.troubleshooting_link = Some(link.into());
        self
    }
}

/// 查询流水线中任意阶段可能返回的错误
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Known(#[from] KnownError),

    #[error("查询已取消")]
    Cancelled,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QueryError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            QueryError::Known(e) => Some(e.kind),
            _ => None,
        }
    }
}

/// 交给宿主的错误结构，字段名沿用宿主约定（包括 `addtion` 的拼写）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    #[serde(rename = "addtion", skip_serializing_if = "Option::is_none")]
    pub addition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub troubleshooting_link: Option<String>,
}

const MESSAGE_PREFIX: &str = "出现错误: ";

/// 将任意失败归一为宿主的完成结果
///
/// 未识别的错误归为 `unknown`，并在消息后附上反馈地址。
pub fn normalize(err: QueryError, issues_url: &str) -> Completion {
    let known = match err {
        QueryError::Cancelled => return Completion::Cancelled,
        QueryError::Known(known) => known,
        QueryError::Other(other) => KnownError::unknown(format!(
            "{:#}\n\n请尝试重新查询或联系我们。\n{}",
            other, issues_url
        )),
    };

    tracing::warn!(kind = known.kind.as_str(), message = %known.message, "查询失败");

    Completion::Error(ErrorPayload {
        kind: known.kind,
        message: format!("{}{}", MESSAGE_PREFIX, known.message),
        addition: known.addition,
        troubleshooting_link: known.troubleshooting_link,
    })
}

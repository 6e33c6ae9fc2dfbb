use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// 配置文件结构，所有字段缺省时回落到内置默认值
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub processing: ProcessingConfig,
    pub support: SupportConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub application_id: String,
    pub user_agent: String,
    pub client_version: String,
    pub client_os: String,
    pub voice_id: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mojidict.com/parse/functions".to_string(),
            application_id: "E62VyFVLMiW7kvbtVq3p".to_string(),
            user_agent: "MOJiDict/20241212 CFNetwork/1568.300.101 Darwin/24.2.0".to_string(),
            client_version: "v8.9.0".to_string(),
            client_os: "iOS".to_string(),
            voice_id: "f000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProcessingConfig {
    /// 单个接口请求的超时时间
    pub request_timeout_seconds: u64,
    /// 向宿主声明的整次查询超时时间
    pub plugin_timeout_seconds: u64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 10,
            plugin_timeout_seconds: 30,
        }
    }
}

impl ProcessingConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn plugin_timeout(&self) -> Duration {
        Duration::from_secs(self.plugin_timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SupportConfig {
    pub issues_url: String,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            issues_url: "https://github.com/Ukenn2112/MOJiBobPlugin/issues/new".to_string(),
        }
    }
}

impl Config {
    /// 读取当前目录下的 config.toml，文件不存在时使用默认配置
    pub fn load() -> Result<Config> {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("配置文件 {} 无法读取: {}", path.display(), e))?;
        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("配置文件解析失败: {}", e))?;
        Ok(config)
    }
}

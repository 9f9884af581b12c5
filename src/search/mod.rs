//! 搜索服务边界 - 面向Tavily风格HTTP搜索API的检索客户端

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::SearchConfig;

/// 搜索服务返回的单条原始命中，字段已拉平为统一形态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub published_at: Option<String>,
    pub source: Option<String>,
}

/// 搜索客户端，一次调用执行一条查询
#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// 解析搜索API密钥。优先级：配置内密钥 → TAVILY_API_KEY环境变量
    fn resolve_api_key(&self) -> Result<String> {
        if !self.config.api_key.trim().is_empty() {
            return Ok(self.config.api_key.trim().to_string());
        }

        std::env::var("TAVILY_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .context("未配置搜索API密钥，请设置 search.api_key 或 TAVILY_API_KEY 环境变量")
    }

    /// 执行单条查询，最多请求max_results条结果。
    /// 传输层错误向上传播；响应形态不符合预期时退化为空结果，不视为错误
    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawSearchHit>> {
        let api_key = self.resolve_api_key()?;

        let response = self
            .http
            .post(&self.config.api_base_url)
            .header("api-key", api_key)
            .json(&json!({
                "query": query,
                "max_results": max_results,
            }))
            .send()
            .await
            .context(format!("搜索请求发送失败: {}", query))?
            .error_for_status()
            .context("搜索服务返回错误状态")?;

        let payload: Value = response.json().await.context("搜索响应解析失败")?;
        Ok(normalize_response(&payload))
    }
}

/// 将搜索API的宽松响应归一为统一命中结构。
/// 缺少results数组、或数组中出现非对象条目时静默跳过
pub(crate) fn normalize_response(payload: &Value) -> Vec<RawSearchHit> {
    let Some(results) = payload.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|entry| {
            let record = entry.as_object()?;
            let text = |key: &str| {
                record
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            let optional = |key: &str| record.get(key).and_then(Value::as_str).map(str::to_string);

            let content = text("content");
            let snippet = if content.is_empty() {
                text("snippet")
            } else {
                content
            };

            Some(RawSearchHit {
                title: text("title"),
                url: text("url"),
                snippet,
                published_at: optional("published_date").or_else(|| optional("published_at")),
                source: optional("source"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::normalize_response;
    use serde_json::json;

    #[test]
    fn test_normalize_well_formed_response() {
        let payload = json!({
            "results": [
                {
                    "title": "Rust 1.80 release notes",
                    "url": "https://blog.rust-lang.org/1.80",
                    "content": "LazyCell and friends",
                    "published_date": "2024-07-25",
                    "source": "rust-lang.org"
                },
                {
                    "title": "Second",
                    "url": "https://example.com/2",
                    "snippet": "fallback snippet field"
                }
            ]
        });

        let hits = normalize_response(&payload);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://blog.rust-lang.org/1.80");
        assert_eq!(hits[0].published_at.as_deref(), Some("2024-07-25"));
        assert_eq!(hits[1].snippet, "fallback snippet field");
        assert!(hits[1].published_at.is_none());
    }

    #[test]
    fn test_normalize_missing_results_key() {
        let payload = json!({ "answer": "no results array here" });
        assert!(normalize_response(&payload).is_empty());
    }

    #[test]
    fn test_normalize_results_not_an_array() {
        let payload = json!({ "results": "oops" });
        assert!(normalize_response(&payload).is_empty());
    }

    #[test]
    fn test_normalize_skips_non_object_entries() {
        let payload = json!({
            "results": [
                42,
                "just a string",
                { "title": "kept", "url": "https://example.com", "content": "ok" }
            ]
        });

        let hits = normalize_response(&payload);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "kept");
    }

    #[test]
    fn test_normalize_published_at_alias() {
        let payload = json!({
            "results": [
                { "title": "t", "url": "https://example.com", "published_at": "2024-01-01" }
            ]
        });

        let hits = normalize_response(&payload);
        assert_eq!(hits[0].published_at.as_deref(), Some("2024-01-01"));
    }
}

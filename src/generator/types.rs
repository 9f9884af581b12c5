use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 生成请求 - 一次用户提交对应一次流水线执行，执行期间不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
}

/// 资料接地模式，决定章节写作能否以及如何使用外部证据
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum GroundingMode {
    /// 常青主题，正确性不依赖新近事实
    #[default]
    ClosedBook,
    /// 主体常青，但需要新近的示例、工具或模型信息
    Hybrid,
    /// 易变主题：周报、排行、定价、政策等
    OpenBook,
}

impl Display for GroundingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GroundingMode::ClosedBook => write!(f, "closed_book"),
            GroundingMode::Hybrid => write!(f, "hybrid"),
            GroundingMode::OpenBook => write!(f, "open_book"),
        }
    }
}

/// 路由决策 - 由Router产出，消费一次后丢弃
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RouterDecision {
    /// 规划之前是否需要联网调研
    pub needs_research: bool,
    pub mode: GroundingMode,
    /// needs_research为true时的2-3条高信号搜索查询
    #[serde(default)]
    pub queries: Vec<String>,
}

/// 单条标准化的外部证据
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EvidenceItem {
    pub title: String,
    /// 证据的唯一键，空url的条目不允许存在
    pub url: String,
    /// 结果中明确出现的发布日期，格式YYYY-MM-DD；缺失或不明确时为null，禁止推测
    #[serde(default)]
    pub published_at: Option<String>,
    /// 简短摘录
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// 按url去重的有序证据集合
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct EvidencePack {
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
}

impl EvidencePack {
    /// 丢弃空url条目并按url去重：保留首次出现的位置，取最后一次出现的值
    pub fn deduped(self) -> Self {
        let mut order: Vec<String> = Vec::new();
        let mut by_url: HashMap<String, EvidenceItem> = HashMap::new();

        for item in self.evidence {
            if item.url.trim().is_empty() {
                continue;
            }
            if !by_url.contains_key(&item.url) {
                order.push(item.url.clone());
            }
            by_url.insert(item.url.clone(), item);
        }

        Self {
            evidence: order
                .into_iter()
                .filter_map(|url| by_url.remove(&url))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.evidence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evidence.is_empty()
    }
}

/// 规划出的单个章节任务
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Task {
    /// 章节顺序键，在计划内唯一；最终文档按其升序排列，编号不要求连续
    pub id: u32,
    pub title: String,
    /// 一句话描述读者读完本节后应当理解或能够做到的事情
    pub goal: String,
    /// 3-6条具体且互不重叠的子要点，写作时按顺序逐条覆盖
    #[schemars(length(min = 3, max = 6))]
    pub bullets: Vec<String>,
    /// 本节的目标字数预算（字符串形式）
    pub target_words: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// 本节是否依赖联网调研得到的证据
    #[serde(default)]
    pub requires_research: bool,
    /// 本节中涉及外部世界的论断是否需要给出引用
    #[serde(default)]
    pub requires_citations: bool,
    /// 本节是否需要包含最小可用的代码示例
    #[serde(default)]
    pub requires_code: bool,
}

/// 文体类型
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum BlogKind {
    #[default]
    Explainer,
    Tutorial,
    NewsRoundup,
    Comparison,
    SystemDesign,
}

impl Display for BlogKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BlogKind::Explainer => write!(f, "explainer"),
            BlogKind::Tutorial => write!(f, "tutorial"),
            BlogKind::NewsRoundup => write!(f, "news_roundup"),
            BlogKind::Comparison => write!(f, "comparison"),
            BlogKind::SystemDesign => write!(f, "system_design"),
        }
    }
}

/// 结构化大纲 - 由Planner产出，此后只读
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Plan {
    pub blog_title: String,
    pub audience: String,
    pub tone: String,
    #[serde(default)]
    pub blog_kind: BlogKind,
    #[serde(default)]
    pub constraints: Vec<String>,
    /// 章节任务列表，数量必须与配置的章节数一致
    pub tasks: Vec<Task>,
}

/// 单个章节的写作产物，产出后不再变更
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResult {
    pub task_id: u32,
    pub markdown: String,
}

/// 汇编完成的最终文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalDocument {
    pub title: String,
    pub markdown: String,
    /// 由标题确定性派生的文件名
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(url: &str, title: &str) -> EvidenceItem {
        EvidenceItem {
            title: title.to_string(),
            url: url.to_string(),
            published_at: None,
            snippet: None,
            source: None,
        }
    }

    #[test]
    fn test_dedup_drops_empty_urls() {
        let pack = EvidencePack {
            evidence: vec![item("", "no url"), item("   ", "blank url"), item("https://a", "a")],
        };

        let deduped = pack.deduped();
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped.evidence[0].url, "https://a");
    }

    #[test]
    fn test_dedup_last_value_wins_first_position_kept() {
        let pack = EvidencePack {
            evidence: vec![
                item("https://a", "first"),
                item("https://b", "middle"),
                item("https://a", "updated"),
            ],
        };

        let deduped = pack.deduped();
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped.evidence[0].url, "https://a");
        assert_eq!(deduped.evidence[0].title, "updated");
        assert_eq!(deduped.evidence[1].url, "https://b");
    }

    #[test]
    fn test_no_two_items_share_url() {
        let pack = EvidencePack {
            evidence: vec![
                item("https://a", "1"),
                item("https://a", "2"),
                item("https://a", "3"),
            ],
        }
        .deduped();

        let mut urls: Vec<_> = pack.evidence.iter().map(|e| e.url.clone()).collect();
        urls.dedup();
        assert_eq!(urls.len(), pack.len());
    }

    #[test]
    fn test_grounding_mode_serde_uses_snake_case() {
        let json = serde_json::to_string(&GroundingMode::OpenBook).unwrap();
        assert_eq!(json, "\"open_book\"");

        let parsed: GroundingMode = serde_json::from_str("\"closed_book\"").unwrap();
        assert_eq!(parsed, GroundingMode::ClosedBook);
    }

    #[test]
    fn test_plan_deserializes_with_defaults() {
        let json = r#"{
            "blog_title": "Photosynthesis Explained",
            "audience": "students",
            "tone": "educational",
            "tasks": [
                {
                    "id": 1,
                    "title": "What it is",
                    "goal": "Define photosynthesis.",
                    "bullets": ["definition", "inputs", "outputs"],
                    "target_words": "300"
                }
            ]
        }"#;

        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.blog_kind, BlogKind::Explainer);
        assert!(plan.constraints.is_empty());
        assert_eq!(plan.tasks.len(), 1);
        assert!(!plan.tasks[0].requires_code);
        assert_eq!(plan.tasks[0].bullets.len(), 3);
    }
}

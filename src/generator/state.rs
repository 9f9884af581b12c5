use crate::generator::types::{EvidencePack, GroundingMode, Plan, SectionResult};

/// 贯穿流水线各阶段的可变累加器。
/// 字段随阶段推进单调填充，不会回退；归属于单次执行，结束即丢弃，
/// 持久化交由外部协作方完成
#[derive(Debug, Clone)]
pub struct PipelineState {
    pub topic: String,
    pub mode: GroundingMode,
    pub needs_research: bool,
    pub queries: Vec<String>,
    pub evidence: EvidencePack,
    pub plan: Option<Plan>,
    /// 以完成顺序累积的章节结果，最终排序交由Assembler按task_id完成
    pub sections: Vec<SectionResult>,
    pub final_markdown: Option<String>,
}

impl PipelineState {
    /// 创建只填充了topic的初始状态
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            mode: GroundingMode::default(),
            needs_research: false,
            queries: Vec::new(),
            evidence: EvidencePack::default(),
            plan: None,
            sections: Vec::new(),
            final_markdown: None,
        }
    }
}

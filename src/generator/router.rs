use anyhow::Result;

use crate::config::DepthLevel;
use crate::generator::{
    context::GeneratorContext,
    prompts,
    types::{GroundingMode, RouterDecision},
};

/// 路由阶段：决定主题是否需要联网调研以及使用哪种资料接地模式。
/// 失败不在本地恢复，错误原样上抛给流水线调用方
pub async fn decide(context: &GeneratorContext, topic: &str) -> Result<RouterDecision> {
    match context.config.generation.depth_level {
        // Quick档直接短路，不发起任何模型调用
        DepthLevel::Quick => Ok(RouterDecision {
            needs_research: false,
            mode: GroundingMode::ClosedBook,
            queries: Vec::new(),
        }),
        // Exhaustive档仍然请模型产出高质量查询，但模式与调研开关被强制覆盖
        DepthLevel::Exhaustive => {
            let decision: RouterDecision = context
                .llm_client
                .extract(prompts::ROUTER_SYSTEM, &format!("Topic: {topic}"))
                .await?;
            Ok(force_exhaustive(decision, topic))
        }
        // Balanced / Deep档由模型在既定模式语义下自由裁量
        _ => {
            context
                .llm_client
                .extract(prompts::ROUTER_SYSTEM, &format!("Topic: {topic}"))
                .await
        }
    }
}

/// Exhaustive档的决策修正：无论模型怎么判定都强制open_book联网调研，
/// 模型未给出查询时以主题本身兜底
pub(crate) fn force_exhaustive(decision: RouterDecision, topic: &str) -> RouterDecision {
    let queries = if decision.queries.is_empty() {
        vec![topic.to_string()]
    } else {
        decision.queries
    };

    RouterDecision {
        needs_research: true,
        mode: GroundingMode::OpenBook,
        queries,
    }
}

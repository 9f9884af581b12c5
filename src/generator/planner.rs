use std::collections::HashSet;

use anyhow::{Result, anyhow};

use crate::generator::{
    context::GeneratorContext,
    prompts,
    types::{BlogKind, EvidencePack, GroundingMode, Plan},
};

/// 规划阶段：把主题、模式、证据与生成配置转化为结构化大纲。
/// 模型输出由绑定层做schema约束，本地只做事后不变量校验
pub async fn plan(
    context: &GeneratorContext,
    topic: &str,
    mode: GroundingMode,
    evidence: &EvidencePack,
) -> Result<Plan> {
    let generation = &context.config.generation;
    let system_prompt = prompts::build_planner_system(generation);
    let user_prompt = prompts::build_planner_user(topic, mode, generation, evidence);

    let mut plan: Plan = context.llm_client.extract(&system_prompt, &user_prompt).await?;
    validate_plan(&mut plan, mode, generation.section_count)?;

    Ok(plan)
}

/// 计划的事后校验：
/// - 章节数必须与配置完全一致
/// - 章节id必须在计划内唯一
/// - open_book模式下文体归一为news_roundup
///
/// “全部章节中至少覆盖两类（代码/边界情况/性能/调试）”只是提示词层面的
/// 约定，无法机械判定，这里不做检查
pub(crate) fn validate_plan(
    plan: &mut Plan,
    mode: GroundingMode,
    section_count: usize,
) -> Result<()> {
    if plan.tasks.len() != section_count {
        return Err(anyhow!(
            "计划章节数({})与配置的章节数({})不一致",
            plan.tasks.len(),
            section_count
        ));
    }

    let mut seen = HashSet::new();
    for task in &plan.tasks {
        if !seen.insert(task.id) {
            return Err(anyhow!("计划中存在重复的章节id: {}", task.id));
        }
    }

    if mode == GroundingMode::OpenBook && plan.blog_kind != BlogKind::NewsRoundup {
        eprintln!(
            "⚠️ open_book计划的文体为{}，已归一为news_roundup",
            plan.blog_kind
        );
        plan.blog_kind = BlogKind::NewsRoundup;
    }

    Ok(())
}

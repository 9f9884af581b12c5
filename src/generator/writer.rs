use anyhow::Result;

use crate::generator::{
    context::GeneratorContext,
    prompts,
    types::{EvidencePack, GroundingMode, Plan, SectionResult, Task},
};

/// 章节写作：对输入而言是纯函数，与兄弟任务之间不共享任何可变状态，
/// 因此可以乱序并发执行。输出为自由文本，不做schema约束；
/// “±15%字数预算”只是提示词层面的约定，运行时不做校验。
/// 模型调用失败原样上抛给扇出协调方
pub async fn write_section(
    context: &GeneratorContext,
    task: &Task,
    topic: &str,
    mode: GroundingMode,
    plan: &Plan,
    evidence: &EvidencePack,
) -> Result<SectionResult> {
    let system_prompt = prompts::build_writer_system(&context.config.generation);
    let user_prompt = prompts::build_writer_user(task, plan, topic, mode, evidence);

    let markdown = context.llm_client.prompt(&system_prompt, &user_prompt).await?;

    Ok(SectionResult {
        task_id: task.id,
        markdown: markdown.trim().to_string(),
    })
}

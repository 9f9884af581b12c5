use anyhow::Result;

use crate::generator::{context::GeneratorContext, prompts, state::PipelineState, types::EvidencePack};
use crate::search::RawSearchHit;

/// 调研阶段：逐条执行搜索查询，把跨查询拼接的原始命中
/// 合成为按url去重的证据集写入状态
pub async fn execute(context: &GeneratorContext, state: &mut PipelineState) -> Result<()> {
    let max_results = context
        .config
        .generation
        .depth_level
        .max_results_per_query();

    let mut raw_hits: Vec<RawSearchHit> = Vec::new();
    for query in &state.queries {
        let hits = context.search_client.search(query, max_results).await?;
        if context.config.verbose {
            println!("   🔍 查询“{}”返回{}条结果", query, hits.len());
        }
        raw_hits.extend(hits);
    }

    state.evidence = synthesize(context, &raw_hits).await?;
    Ok(())
}

/// 证据合成：空输入直接短路为空集，不发起模型调用。
/// 模型输出不保证按url唯一，本地再做一次兜底去重；
/// 畸形输入只会让证据变少，不会让本阶段失败
pub async fn synthesize(
    context: &GeneratorContext,
    raw_hits: &[RawSearchHit],
) -> Result<EvidencePack> {
    if raw_hits.is_empty() {
        return Ok(EvidencePack::default());
    }

    let payload = serde_json::to_string_pretty(raw_hits)?;
    let pack: EvidencePack = context
        .llm_client
        .extract(prompts::RESEARCH_SYSTEM, &format!("Raw Results:\n{payload}"))
        .await?;

    Ok(pack.deduped())
}

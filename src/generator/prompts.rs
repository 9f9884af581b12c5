//! 各阶段的提示词定义 - 静态指令为常量，动态指令由配置现场拼装

use crate::config::{GenerationConfig, OutputType, Tone};
use crate::generator::types::{EvidenceItem, EvidencePack, GroundingMode, Plan, Task};

/// 路由阶段系统提示词
pub const ROUTER_SYSTEM: &str = r#"You are a routing module for a content planner.

Decide whether web research is needed BEFORE planning.

Modes:
- closed_book (needs_research=false):
  Evergreen topics where correctness does not depend on recent facts (concepts, fundamentals).
- hybrid (needs_research=true):
  Mostly evergreen but needs up-to-date examples/tools/models to be useful.
- open_book (needs_research=true):
  Mostly volatile: weekly roundups, "this week", "latest", rankings, pricing, policy/regulation.

If needs_research=true:
- Output 2-3 high-signal queries.
- Queries should be scoped and specific (avoid generic queries like just "AI" or "LLM").
- If user asked for "last week/this week/latest", reflect that constraint IN THE QUERIES.
"#;

/// 证据合成阶段系统提示词
pub const RESEARCH_SYSTEM: &str = r#"You are a research synthesizer for technical writing.

Given raw web search results, produce a deduplicated list of evidence items.

Rules:
- Only include items with a non-empty url.
- Prefer relevant + authoritative sources (company blogs, docs, reputable outlets).
- If a published date is explicitly present in the result payload, keep it as YYYY-MM-DD.
  If missing or unclear, set published_at=null. Do NOT guess.
- Keep snippets short.
- Deduplicate by URL.
"#;

/// 规划阶段系统提示词，按配置的内容形态、章节数、语气与字数预算现场拼装
pub fn build_planner_system(generation: &GenerationConfig) -> String {
    let output_guidance = match generation.output_type {
        OutputType::StudyGuide => {
            "Structure content as a STUDY GUIDE: definitions first, then concepts, \
             then worked examples, then practice/review questions in a final section. \
             Include a 'Key Takeaways' or 'Summary' section as the last task."
        }
        OutputType::BlogPost => {
            "Structure content as a BLOG POST: compelling introduction section, \
             2-N body sections with clear narrative flow, strong conclusion with takeaways. \
             Use engaging subheadings."
        }
        OutputType::DeepResearch => {
            "Structure content as a RESEARCH DOCUMENT: abstract/overview first, \
             then background, methodology/analysis, findings, and conclusions. \
             Include a 'References & Further Reading' section as the last task."
        }
        OutputType::QuickSummary => {
            "Keep it BRIEF. Produce only 3 sections max: Overview, Key Points, Takeaways. \
             No tutorials, no deep dives. Bullets only, minimal prose."
        }
    };

    format!(
        r#"You are a senior technical writer and developer advocate.
Your job is to produce a highly actionable outline for a {output_type}.

{output_guidance}

Hard requirements:
- Create exactly {section_count} sections (tasks).
- Each task must include:
  1) goal (1 sentence)
  2) 3-6 bullets that are concrete, specific, and non-overlapping
  3) target_words: "{words_per_section}" (string, this is the per-section word budget)
- Audience tone: {tone}

Quality bar:
- Assume the reader wants to understand deeply; use correct terminology.
- Bullets must be actionable: build/compare/measure/verify/debug/explain/summarise.
- Across all sections, include at least 2 of:
  * minimal code sketch / MWE (set requires_code=true)
  * edge cases / failure modes
  * performance / cost considerations
  * debugging / observability tips

Grounding rules:
- Mode closed_book : keep evergreen; do not depend on evidence.
- Mode hybrid      : use evidence for up-to-date examples; mark those sections requires_research=true.
- Mode open_book   : set blog_kind="news_roundup"; every section summarises events + implications.
  If evidence is empty, create a plan that transparently says "insufficient sources".

Output MUST strictly match the Plan schema."#,
        output_type = generation.output_type.label(),
        output_guidance = output_guidance,
        section_count = generation.section_count,
        words_per_section = generation.words_per_section,
        tone = generation.tone,
    )
}

/// 规划阶段用户提示词，证据最多展示16条
pub fn build_planner_user(
    topic: &str,
    mode: GroundingMode,
    generation: &GenerationConfig,
    evidence: &EvidencePack,
) -> String {
    let shown: Vec<&EvidenceItem> = evidence.evidence.iter().take(16).collect();
    let evidence_json = serde_json::to_string_pretty(&shown).unwrap_or_default();

    format!(
        "Topic: {topic}\n\
         Mode: {mode}\n\
         Output type: {output_type}\n\
         Tone: {tone}\n\
         Total word target: {total} ({sections} sections x {words} words each)\n\n\
         Evidence (ONLY use for fresh claims; may be empty):\n{evidence_json}",
        topic = topic,
        mode = mode,
        output_type = generation.output_type.label(),
        tone = generation.tone,
        total = generation.total_word_target(),
        sections = generation.section_count,
        words = generation.words_per_section,
        evidence_json = evidence_json,
    )
}

/// 写作阶段系统提示词，语气与内容形态指引随配置拼装，
/// 额外自由指令逐字注入
pub fn build_writer_system(generation: &GenerationConfig) -> String {
    let tone_guidance = match generation.tone {
        Tone::Educational => {
            "Use clear, accessible language. Define jargon when introduced. Include analogies."
        }
        Tone::Academic => {
            "Use formal language, precise terminology, and structured argumentation."
        }
        Tone::Casual => {
            "Write conversationally. Use contractions. Keep sentences short and punchy."
        }
        Tone::Professional => "Be precise and structured. Avoid filler. No marketing language.",
        Tone::Socratic => {
            "Frame ideas as questions that lead the reader to the answer. Pose rhetorical questions."
        }
    };

    let output_type_guidance = match generation.output_type {
        OutputType::StudyGuide => {
            "Include definitions, examples, and a mini-quiz or practice prompt at the end of each section."
        }
        OutputType::BlogPost => {
            "Write with narrative flow. Hook the reader in the first sentence of each section."
        }
        OutputType::DeepResearch => {
            "Cite evidence for every major claim. Be exhaustive. Prefer depth over breadth."
        }
        OutputType::QuickSummary => {
            "Be as concise as possible. Bullet points preferred over prose. No padding."
        }
    };

    let extra = if generation.extra_instruction.trim().is_empty() {
        String::new()
    } else {
        format!("\nSPECIAL INSTRUCTIONS: {}", generation.extra_instruction)
    };

    format!(
        r#"You are a senior technical writer and developer advocate.
Write ONE section of a {output_type} in Markdown.

TONE: {tone_guidance}
OUTPUT TYPE RULES: {output_type_guidance}{extra}

Hard constraints:
- Follow the provided Goal and cover ALL Bullets in order (do not skip or merge bullets).
- Stay close to Target words (±15%).
- Output ONLY the section content in Markdown (no blog title H1, no extra commentary).
- Start with a '## <Section Title>' heading.

Scope guard:
- If blog_kind == "news_roundup": focus on summarising events and implications only.
  Do NOT turn this into a how-to tutorial unless bullets explicitly ask for it.

Grounding policy:
- If mode == open_book:
  - Do NOT introduce any specific event/company/model/claim unless supported by provided Evidence.
  - Cite as Markdown links: ([Source](URL)). Only use URLs from Evidence.
  - If not supported: write "Not found in provided sources."
- If requires_citations == true: cite Evidence URLs for outside-world claims.

Code:
- If requires_code == true, include at least one minimal, correct, well-commented code snippet.

Style:
- Short paragraphs, bullets where helpful, code fences for code.
- Avoid fluff and marketing language. Be precise and implementation-oriented."#,
        output_type = generation.output_type.label(),
        tone_guidance = tone_guidance,
        output_type_guidance = output_type_guidance,
        extra = extra,
    )
}

/// 写作阶段用户提示词，证据最多展示20条
pub fn build_writer_user(
    task: &Task,
    plan: &Plan,
    topic: &str,
    mode: GroundingMode,
    evidence: &EvidencePack,
) -> String {
    let bullets_text = format!("\n - {}", task.bullets.join("\n - "));

    let evidence_text = evidence
        .evidence
        .iter()
        .take(20)
        .map(|e| {
            format!(
                "- {} | {} | {}",
                e.title,
                e.url,
                e.published_at.as_deref().unwrap_or("date:unknown")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Blog title: {blog_title}\n\
         Audience: {audience}\n\
         Tone: {tone}\n\
         Blog kind: {blog_kind}\n\
         Constraints: {constraints:?}\n\
         Topic: {topic}\n\
         Mode: {mode}\n\n\
         Section title: {title}\n\
         Goal: {goal}\n\
         Target words: {target_words}\n\
         Tags: {tags:?}\n\
         requires_research: {requires_research}\n\
         requires_citations: {requires_citations}\n\
         requires_code: {requires_code}\n\
         Bullets:{bullets_text}\n\n\
         Evidence (ONLY use these URLs when citing):\n{evidence_text}\n",
        blog_title = plan.blog_title,
        audience = plan.audience,
        tone = plan.tone,
        blog_kind = plan.blog_kind,
        constraints = plan.constraints,
        topic = topic,
        mode = mode,
        title = task.title,
        goal = task.goal,
        target_words = task.target_words,
        tags = task.tags,
        requires_research = task.requires_research,
        requires_citations = task.requires_citations,
        requires_code = task.requires_code,
        bullets_text = bullets_text,
        evidence_text = evidence_text,
    )
}

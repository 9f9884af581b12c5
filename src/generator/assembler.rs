use crate::generator::types::{FinalDocument, Plan, SectionResult};

/// 汇编阶段：整次执行唯一的串行化点。
/// 章节按task_id升序重排（并发写作的完成顺序不参与排序），
/// 以空行拼接正文，冠以计划标题的一级标题。
/// 纯函数，相同输入产出字节级一致的文档
pub fn assemble(plan: &Plan, sections: &[SectionResult]) -> FinalDocument {
    let mut ordered: Vec<&SectionResult> = sections.iter().collect();
    ordered.sort_by_key(|section| section.task_id);

    let body = ordered
        .iter()
        .map(|section| section.markdown.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let markdown = format!("# {}\n\n{}\n", plan.blog_title, body.trim());

    FinalDocument {
        title: plan.blog_title.clone(),
        filename: derive_filename(&plan.blog_title),
        markdown,
    }
}

/// 由标题确定性派生文件系统安全的文件名：
/// 仅保留字母数字/空格/下划线/连字符，折叠空白，转小写，空格替换为下划线
pub fn derive_filename(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_' || *c == '-')
        .collect();

    let stem = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    if stem.is_empty() {
        return "untitled.md".to_string();
    }
    format!("{stem}.md")
}

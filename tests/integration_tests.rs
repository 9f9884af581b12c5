use tempfile::TempDir;

use ace_rs::config::{Config, DepthLevel, GenerationConfig, OutputType, Tone};
use ace_rs::generator::assembler::{assemble, derive_filename};
use ace_rs::generator::types::{BlogKind, Plan, SectionResult};
use ace_rs::outlet::{DiskOutlet, Outlet, RunMetadata};
use ace_rs::generator::types::GroundingMode;

/// 构造一个三章节的计划，用于离线验证汇编与落盘链路
fn sample_plan() -> Plan {
    Plan {
        blog_title: "Define photosynthesis".to_string(),
        audience: "students".to_string(),
        tone: "educational".to_string(),
        blog_kind: BlogKind::Explainer,
        constraints: vec![],
        tasks: vec![],
    }
}

fn sample_sections() -> Vec<SectionResult> {
    vec![
        SectionResult {
            task_id: 3,
            markdown: "## Why it matters\nBecause energy.".to_string(),
        },
        SectionResult {
            task_id: 1,
            markdown: "## Overview\nPlants make sugar from light.".to_string(),
        },
        SectionResult {
            task_id: 2,
            markdown: "## The reactions\nLight and dark reactions.".to_string(),
        },
    ]
}

#[tokio::test]
async fn test_assemble_then_save_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("output");

    let plan = sample_plan();
    let sections = sample_sections();
    let document = assemble(&plan, &sections);

    // 章节按task_id排序，文档含三个二级标题
    let headings: Vec<_> = document
        .markdown
        .lines()
        .filter(|line| line.starts_with("## "))
        .collect();
    assert_eq!(
        headings,
        vec!["## Overview", "## The reactions", "## Why it matters"]
    );
    assert!(document.markdown.starts_with("# Define photosynthesis\n\n"));
    assert_eq!(document.filename, "define_photosynthesis.md");

    let generation = GenerationConfig {
        output_type: OutputType::StudyGuide,
        section_count: 3,
        words_per_section: 300,
        depth_level: DepthLevel::Quick,
        tone: Tone::Educational,
        extra_instruction: String::new(),
    };
    let metadata = RunMetadata::new(
        "Define photosynthesis",
        GroundingMode::ClosedBook,
        &generation,
    );

    let outlet = DiskOutlet::new(output_dir.clone());
    let saved = outlet.save(&document, &metadata).await.unwrap();

    let on_disk = std::fs::read_to_string(&saved).unwrap();
    assert_eq!(on_disk, document.markdown);

    let meta_raw =
        std::fs::read_to_string(output_dir.join("define_photosynthesis.meta.json")).unwrap();
    let meta: RunMetadata = serde_json::from_str(&meta_raw).unwrap();
    assert_eq!(meta.depth_level, "quick");
    assert_eq!(meta.section_count, 3);
}

#[test]
fn test_assembly_is_deterministic_across_runs() {
    let plan = sample_plan();
    let sections = sample_sections();

    let first = assemble(&plan, &sections);
    let second = assemble(&plan, &sections);

    assert_eq!(first.markdown, second.markdown);
    assert_eq!(first.filename, second.filename);
}

#[test]
fn test_filename_derivation_examples() {
    assert_eq!(derive_filename("C++ & Rust: A Guide!"), "c_rust_a_guide.md");
    assert_eq!(derive_filename("Define photosynthesis"), "define_photosynthesis.md");
    assert_eq!(derive_filename("LLM news (August 2026)"), "llm_news_august_2026.md");
}

#[test]
fn test_config_defaults_are_valid() {
    let config = Config::default();
    assert!(config.generation.validate().is_ok());
    assert_eq!(config.generation.total_word_target(), 1500);
}

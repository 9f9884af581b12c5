use crate::config::{
    Config, ConfigError, DepthLevel, GenerationConfig, LLMProvider, OutputType, Tone,
};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.output_path, std::path::PathBuf::from("./ace.out"));
    assert_eq!(config.generation.output_type, OutputType::StudyGuide);
    assert_eq!(config.generation.section_count, 5);
    assert_eq!(config.generation.words_per_section, 300);
    assert_eq!(config.generation.depth_level, DepthLevel::Balanced);
    assert_eq!(config.generation.tone, Tone::Educational);
    assert!(config.generation.extra_instruction.is_empty());
    assert!(!config.verbose);
}

#[test]
fn test_default_llm_config() {
    let config = Config::default();

    assert_eq!(config.llm.provider, LLMProvider::Gemini);
    assert!(!config.llm.model_efficient.is_empty());
    assert!(!config.llm.model_powerful.is_empty());
    assert_eq!(config.llm.max_tokens, 65536);
    assert_eq!(config.llm.retry_attempts, 3);
    assert_eq!(config.llm.max_parallels, 4);
}

#[test]
fn test_total_word_target_is_derived() {
    let generation = GenerationConfig {
        section_count: 4,
        words_per_section: 250,
        ..Default::default()
    };

    assert_eq!(generation.total_word_target(), 1000);
}

#[test]
fn test_validate_accepts_range_boundaries() {
    for (sections, words) in [(3, 100), (10, 1000), (5, 300)] {
        let generation = GenerationConfig {
            section_count: sections,
            words_per_section: words,
            ..Default::default()
        };
        assert!(generation.validate().is_ok());
    }
}

#[test]
fn test_validate_rejects_section_count_out_of_range() {
    for sections in [0, 2, 11] {
        let generation = GenerationConfig {
            section_count: sections,
            ..Default::default()
        };
        assert!(matches!(
            generation.validate(),
            Err(ConfigError::SectionCountOutOfRange(n)) if n == sections
        ));
    }
}

#[test]
fn test_validate_rejects_words_per_section_out_of_range() {
    for words in [0, 99, 1001] {
        let generation = GenerationConfig {
            words_per_section: words,
            ..Default::default()
        };
        assert!(matches!(
            generation.validate(),
            Err(ConfigError::WordsPerSectionOutOfRange(w)) if w == words
        ));
    }
}

#[test]
fn test_resolve_api_key_prefers_configured_key() {
    let mut config = Config::default();
    config.llm.api_key = "  user-key  ".to_string();

    // The configured (per-user) key wins regardless of environment variables
    assert_eq!(config.llm.resolve_api_key().unwrap(), "user-key");
}

#[test]
fn test_depth_level_max_results_scale() {
    assert_eq!(DepthLevel::Quick.max_results_per_query(), 2);
    assert_eq!(DepthLevel::Balanced.max_results_per_query(), 2);
    assert_eq!(DepthLevel::Deep.max_results_per_query(), 3);
    assert_eq!(DepthLevel::Exhaustive.max_results_per_query(), 4);
}

#[test]
fn test_enum_display_and_parse_roundtrip() {
    for output_type in [
        OutputType::StudyGuide,
        OutputType::BlogPost,
        OutputType::DeepResearch,
        OutputType::QuickSummary,
    ] {
        let parsed: OutputType = output_type.to_string().parse().unwrap();
        assert_eq!(parsed, output_type);
    }

    for depth in [
        DepthLevel::Quick,
        DepthLevel::Balanced,
        DepthLevel::Deep,
        DepthLevel::Exhaustive,
    ] {
        let parsed: DepthLevel = depth.to_string().parse().unwrap();
        assert_eq!(parsed, depth);
    }

    for tone in [
        Tone::Educational,
        Tone::Academic,
        Tone::Casual,
        Tone::Professional,
        Tone::Socratic,
    ] {
        let parsed: Tone = tone.to_string().parse().unwrap();
        assert_eq!(parsed, tone);
    }

    assert!("bogus".parse::<OutputType>().is_err());
    assert!("bogus".parse::<DepthLevel>().is_err());
    assert!("bogus".parse::<Tone>().is_err());
}

#[test]
fn test_from_file_with_partial_config() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
output_path = "/tmp/ace-output"

[generation]
output_type = "blog_post"
section_count = 7
depth_level = "deep"
tone = "casual"

[llm]
provider = "openai"
model_efficient = "gpt-4o-mini"
"#
    )
    .unwrap();

    let config = Config::from_file(&file.path().to_path_buf()).unwrap();

    assert_eq!(config.output_path, std::path::PathBuf::from("/tmp/ace-output"));
    assert_eq!(config.generation.output_type, OutputType::BlogPost);
    assert_eq!(config.generation.section_count, 7);
    assert_eq!(config.generation.depth_level, DepthLevel::Deep);
    assert_eq!(config.generation.tone, Tone::Casual);
    assert_eq!(config.llm.provider, LLMProvider::OpenAI);
    assert_eq!(config.llm.model_efficient, "gpt-4o-mini");
    // 未出现在文件中的字段保持默认值
    assert_eq!(config.generation.words_per_section, 300);
    assert_eq!(config.llm.max_parallels, 4);
}

#[test]
fn test_from_file_missing_file() {
    let result = Config::from_file(&std::path::PathBuf::from("/nonexistent/ace.toml"));
    assert!(result.is_err());
}

use crate::config::{Config, DepthLevel, LLMProvider, OutputType, Tone};
use clap::Parser;
use std::path::PathBuf;

/// Ace (ace-rs) - 由Rust与AI驱动的长文内容生成引擎
#[derive(Parser, Debug)]
#[command(name = "Ace (ace-rs)")]
#[command(
    about = "AI-based generation engine for long-form written content. It routes a topic, optionally researches the live web, plans a structured outline, writes sections in parallel and assembles the final Markdown document."
)]
#[command(version)]
pub struct Args {
    /// 生成主题
    pub topic: String,

    /// 输出路径
    #[arg(short, long, default_value = "./ace.out")]
    pub output_path: PathBuf,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 内容形态 (study_guide, blog_post, deep_research, quick_summary)
    #[arg(long)]
    pub output_type: Option<String>,

    /// 章节数量 (3-10)
    #[arg(long)]
    pub section_count: Option<usize>,

    /// 单节目标字数 (100-1000)
    #[arg(long)]
    pub words_per_section: Option<u32>,

    /// 调研深度档位 (quick, balanced, deep, exhaustive)
    #[arg(long)]
    pub depth_level: Option<String>,

    /// 行文语气 (educational, academic, casual, professional, socratic)
    #[arg(long)]
    pub tone: Option<String>,

    /// 注入写作阶段的额外自由指令
    #[arg(long)]
    pub extra_instruction: Option<String>,

    /// LLM Provider (openai, anthropic, gemini, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 高能效模型，优先用于常规推理任务
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型，优先用于复杂推理任务，以及作为efficient失效情况下的兜底
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 写作阶段的最大并发数
    #[arg(long)]
    pub max_parallels: Option<usize>,

    /// 搜索服务API KEY
    #[arg(long)]
    pub search_api_key: Option<String>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置：先取配置文件（显式路径或当前目录的ace.toml），
    /// 再以CLI参数逐项覆盖
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            Config::from_file(config_path).unwrap_or_else(|e| {
                panic!("⚠️ 无法读取配置文件 {:?}: {}", config_path, e)
            })
        } else {
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("ace.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|e| {
                    panic!(
                        "⚠️ 无法读取默认配置文件 {:?}: {}",
                        default_config_path, e
                    )
                })
            } else {
                Config::default()
            }
        };

        config.output_path = self.output_path;

        // 生成配置覆盖
        if let Some(output_type_str) = self.output_type {
            match output_type_str.parse::<OutputType>() {
                Ok(output_type) => config.generation.output_type = output_type,
                Err(_) => eprintln!(
                    "⚠️ 警告: 未知的内容形态: {}，保持原有配置",
                    output_type_str
                ),
            }
        }
        if let Some(section_count) = self.section_count {
            config.generation.section_count = section_count;
        }
        if let Some(words_per_section) = self.words_per_section {
            config.generation.words_per_section = words_per_section;
        }
        if let Some(depth_level_str) = self.depth_level {
            match depth_level_str.parse::<DepthLevel>() {
                Ok(depth_level) => config.generation.depth_level = depth_level,
                Err(_) => eprintln!(
                    "⚠️ 警告: 未知的调研深度档位: {}，保持原有配置",
                    depth_level_str
                ),
            }
        }
        if let Some(tone_str) = self.tone {
            match tone_str.parse::<Tone>() {
                Ok(tone) => config.generation.tone = tone,
                Err(_) => eprintln!("⚠️ 警告: 未知的行文语气: {}，保持原有配置", tone_str),
            }
        }
        if let Some(extra_instruction) = self.extra_instruction {
            config.generation.extra_instruction = extra_instruction;
        }

        // LLM配置覆盖
        if let Some(provider_str) = self.llm_provider {
            match provider_str.parse::<LLMProvider>() {
                Ok(provider) => config.llm.provider = provider,
                Err(_) => eprintln!("⚠️ 警告: 未知的provider: {}，保持原有配置", provider_str),
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_parallels) = self.max_parallels {
            config.llm.max_parallels = max_parallels;
        }

        // 搜索配置覆盖
        if let Some(search_api_key) = self.search_api_key {
            config.search.api_key = search_api_key;
        }

        config.verbose = self.verbose;

        config
    }
}

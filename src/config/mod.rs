use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// 配置错误 - 在任何模型调用发生之前被同步检出
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "未配置模型API密钥，请在配置文件中设置 llm.api_key，或设置 ACE_LLM_API_KEY / GEMINI_API_KEY 环境变量"
    )]
    MissingApiKey,

    #[error("章节数量 {0} 超出允许范围 (3-10)")]
    SectionCountOutOfRange(usize),

    #[error("单节目标字数 {0} 超出允许范围 (100-1000)")]
    WordsPerSectionOutOfRange(u32),
}

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "gemini")]
    #[default]
    Gemini,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "gemini" => Ok(LLMProvider::Gemini),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 内容形态
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    #[default]
    StudyGuide,
    BlogPost,
    DeepResearch,
    QuickSummary,
}

impl OutputType {
    /// 提示词中使用的人类可读名称
    pub fn label(&self) -> &'static str {
        match self {
            OutputType::StudyGuide => "Study Guide",
            OutputType::BlogPost => "Blog Post",
            OutputType::DeepResearch => "Deep Research",
            OutputType::QuickSummary => "Quick Summary",
        }
    }
}

impl std::fmt::Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputType::StudyGuide => write!(f, "study_guide"),
            OutputType::BlogPost => write!(f, "blog_post"),
            OutputType::DeepResearch => write!(f, "deep_research"),
            OutputType::QuickSummary => write!(f, "quick_summary"),
        }
    }
}

impl std::str::FromStr for OutputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "study_guide" => Ok(OutputType::StudyGuide),
            "blog_post" => Ok(OutputType::BlogPost),
            "deep_research" => Ok(OutputType::DeepResearch),
            "quick_summary" => Ok(OutputType::QuickSummary),
            _ => Err(format!("Unknown output type: {}", s)),
        }
    }
}

/// 调研深度档位，决定路由与检索行为
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DepthLevel {
    Quick,
    #[default]
    Balanced,
    Deep,
    Exhaustive,
}

impl DepthLevel {
    /// 单条查询的最大检索结果数，随深度档位递增。
    /// Quick档在路由阶段就跳过了调研，这里按最小值兜底
    pub fn max_results_per_query(&self) -> usize {
        match self {
            DepthLevel::Quick | DepthLevel::Balanced => 2,
            DepthLevel::Deep => 3,
            DepthLevel::Exhaustive => 4,
        }
    }
}

impl std::fmt::Display for DepthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepthLevel::Quick => write!(f, "quick"),
            DepthLevel::Balanced => write!(f, "balanced"),
            DepthLevel::Deep => write!(f, "deep"),
            DepthLevel::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

impl std::str::FromStr for DepthLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quick" => Ok(DepthLevel::Quick),
            "balanced" => Ok(DepthLevel::Balanced),
            "deep" => Ok(DepthLevel::Deep),
            "exhaustive" => Ok(DepthLevel::Exhaustive),
            _ => Err(format!("Unknown depth level: {}", s)),
        }
    }
}

/// 行文语气
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Educational,
    Academic,
    Casual,
    Professional,
    Socratic,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tone::Educational => write!(f, "educational"),
            Tone::Academic => write!(f, "academic"),
            Tone::Casual => write!(f, "casual"),
            Tone::Professional => write!(f, "professional"),
            Tone::Socratic => write!(f, "socratic"),
        }
    }
}

impl std::str::FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "educational" => Ok(Tone::Educational),
            "academic" => Ok(Tone::Academic),
            "casual" => Ok(Tone::Casual),
            "professional" => Ok(Tone::Professional),
            "socratic" => Ok(Tone::Socratic),
            _ => Err(format!("Unknown tone: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 输出路径
    pub output_path: PathBuf,

    /// 内容生成配置
    pub generation: GenerationConfig,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 搜索服务配置
    pub search: SearchConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// 内容生成配置 - 每次执行时构造一次快照，传引用给各阶段
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    /// 内容形态
    pub output_type: OutputType,

    /// 章节数量 (3-10)
    pub section_count: usize,

    /// 单节目标字数 (100-1000)
    pub words_per_section: u32,

    /// 调研深度档位
    pub depth_level: DepthLevel,

    /// 行文语气
    pub tone: Tone,

    /// 逐字注入写作阶段系统提示词的额外自由指令
    pub extra_instruction: String,
}

impl GenerationConfig {
    /// 派生的全文目标字数 = 章节数 x 单节字数
    pub fn total_word_target(&self) -> u32 {
        self.section_count as u32 * self.words_per_section
    }

    /// 范围校验，越界视为配置错误
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(3..=10).contains(&self.section_count) {
            return Err(ConfigError::SectionCountOutOfRange(self.section_count));
        }
        if !(100..=1000).contains(&self.words_per_section) {
            return Err(ConfigError::WordsPerSectionOutOfRange(
                self.words_per_section,
            ));
        }
        Ok(())
    }
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY，留空时回退到环境变量
    pub api_key: String,

    /// LLM API基地址（OpenAI兼容provider使用）
    pub api_base_url: String,

    /// 高能效模型，优先用于常规推理任务
    pub model_efficient: String,

    /// 高质量模型，优先用于复杂推理任务，以及作为efficient失效情况下的兜底
    pub model_powerful: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,

    /// 写作阶段的最大并发数
    pub max_parallels: usize,
}

impl LLMConfig {
    /// 解析模型API密钥。
    /// 优先级：配置内密钥（用户自有） → ACE_LLM_API_KEY → 旧别名GEMINI_API_KEY
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        if !self.api_key.trim().is_empty() {
            return Ok(self.api_key.trim().to_string());
        }

        for var in ["ACE_LLM_API_KEY", "GEMINI_API_KEY"] {
            if let Ok(key) = std::env::var(var)
                && !key.trim().is_empty()
            {
                return Ok(key.trim().to_string());
            }
        }

        Err(ConfigError::MissingApiKey)
    }
}

/// 搜索服务配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// 搜索API KEY，留空时回退到TAVILY_API_KEY环境变量
    pub api_key: String,

    /// 搜索API地址
    pub api_base_url: String,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("./ace.out"),
            generation: GenerationConfig::default(),
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            verbose: false,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            output_type: OutputType::default(),
            section_count: 5,
            words_per_section: 300,
            depth_level: DepthLevel::default(),
            tone: Tone::default(),
            extra_instruction: String::new(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: String::new(),
            api_base_url: String::from("https://api.openai.com/v1"),
            model_efficient: String::from("gemini-2.5-flash"),
            model_powerful: String::from("gemini-2.5-pro"),
            max_tokens: 65536,
            temperature: 0.7,
            retry_attempts: 3,
            retry_delay_ms: 2000,
            timeout_seconds: 300,
            max_parallels: 4,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: String::from("https://api.tavily.com/search"),
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;

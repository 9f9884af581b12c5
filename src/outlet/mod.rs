use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use crate::config::GenerationConfig;
use crate::generator::types::{FinalDocument, GroundingMode};

/// 单次生成的运行元数据，随文档一并交给持久化协作方
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: String,
    pub topic: String,
    /// 本次实际使用的资料接地模式
    pub mode: GroundingMode,
    pub output_type: String,
    pub section_count: usize,
    pub words_per_section: u32,
    pub depth_level: String,
    pub tone: String,
    pub created_at: DateTime<Utc>,
}

impl RunMetadata {
    pub fn new(topic: &str, mode: GroundingMode, generation: &GenerationConfig) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            mode,
            output_type: generation.output_type.to_string(),
            section_count: generation.section_count,
            words_per_section: generation.words_per_section,
            depth_level: generation.depth_level.to_string(),
            tone: generation.tone.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// 文档持久化出口。存储、列表与删除都属于协作方的职责，
/// 流水线核心只负责把文档与元数据交出去
#[async_trait]
pub trait Outlet {
    async fn save(&self, document: &FinalDocument, metadata: &RunMetadata) -> Result<PathBuf>;
}

/// 本地磁盘出口：写入Markdown文档及同名的元数据侧文件
pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

#[async_trait]
impl Outlet for DiskOutlet {
    async fn save(&self, document: &FinalDocument, metadata: &RunMetadata) -> Result<PathBuf> {
        println!("\n🖊️ 文档存储中...");

        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir)?;
        }

        let document_path = self.output_dir.join(&document.filename);
        fs::write(&document_path, &document.markdown)?;
        println!("💾 已保存文档: {}", document_path.display());

        let meta_filename = format!("{}.meta.json", document.filename.trim_end_matches(".md"));
        let meta_path = self.output_dir.join(meta_filename);
        fs::write(&meta_path, serde_json::to_string_pretty(metadata)?)?;
        println!("💾 已保存运行元数据: {}", meta_path.display());

        Ok(document_path)
    }
}

use anyhow::Result;

use crate::{
    config::Config, generator::events::ProgressSink, llm::client::LLMClient, search::SearchClient,
};

/// 单次生成执行的共享上下文。
/// 配置在请求开始时构造一次快照，之后以引用传入各阶段，
/// 阶段之间不做任何环境级的全局查找
#[derive(Clone)]
pub struct GeneratorContext {
    /// LLM调用器，用于与模型服务通信
    pub llm_client: LLMClient,
    /// 搜索调用器，用于联网检索证据
    pub search_client: SearchClient,
    /// 配置
    pub config: Config,
    /// 进度事件发送端
    pub progress: ProgressSink,
}

impl GeneratorContext {
    /// 创建新的生成器上下文。
    /// 生成参数越界与模型密钥缺失都在这里被提前检出
    pub fn new(config: Config, progress: ProgressSink) -> Result<Self> {
        config.generation.validate()?;
        let llm_client = LLMClient::new(config.clone())?;
        let search_client = SearchClient::new(config.search.clone());

        Ok(Self {
            llm_client,
            search_client,
            config,
            progress,
        })
    }
}

use serde::Serialize;
use tokio::sync::mpsc;

use crate::generator::types::GroundingMode;

/// 阶段完成时向调用方发出的进度事件，一次执行过程中
/// 除最终结果外唯一的对外可观测行为
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum ProgressEvent {
    RouterCompleted {
        mode: GroundingMode,
        needs_research: bool,
    },
    /// 路由判定无需调研时发出；Research阶段被跳过，而不是以空输入运行
    ResearchSkipped,
    ResearchCompleted {
        evidence_count: usize,
    },
    PlannerCompleted {
        blog_title: String,
        section_count: usize,
    },
    SectionCompleted {
        task_id: u32,
    },
    WorkersCompleted {
        section_count: usize,
    },
    AssemblerCompleted {
        filename: String,
    },
    /// 整次执行的唯一终止性错误事件
    Failed {
        #[serde(rename = "failed_stage")]
        stage: String,
        message: String,
    },
}

/// 进度事件发送端，与具体展示层解耦。
/// 无接收方时事件被静默丢弃，不影响流水线执行
#[derive(Clone, Default)]
pub struct ProgressSink {
    tx: Option<mpsc::UnboundedSender<ProgressEvent>>,
}

impl ProgressSink {
    pub fn new(tx: mpsc::UnboundedSender<ProgressEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// 不连接任何接收方的空实现
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn emit(&self, event: ProgressEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_flow_through_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = ProgressSink::new(tx);

        sink.emit(ProgressEvent::RouterCompleted {
            mode: GroundingMode::Hybrid,
            needs_research: true,
        });
        sink.emit(ProgressEvent::ResearchCompleted { evidence_count: 4 });

        match rx.recv().await.unwrap() {
            ProgressEvent::RouterCompleted {
                mode,
                needs_research,
            } => {
                assert_eq!(mode, GroundingMode::Hybrid);
                assert!(needs_research);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        match rx.recv().await.unwrap() {
            ProgressEvent::ResearchCompleted { evidence_count } => assert_eq!(evidence_count, 4),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_disabled_sink_drops_events() {
        let sink = ProgressSink::disabled();
        // 没有接收方时emit不报错也不阻塞
        sink.emit(ProgressEvent::ResearchSkipped);
    }

    #[test]
    fn test_event_serializes_with_stage_tag() {
        let event = ProgressEvent::AssemblerCompleted {
            filename: "demo.md".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["stage"], "assembler_completed");
        assert_eq!(json["filename"], "demo.md");
    }
}

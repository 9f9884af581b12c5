use anyhow::{Result, anyhow};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::generator::{
    assembler, planner, research, router,
    context::GeneratorContext,
    events::{ProgressEvent, ProgressSink},
    state::PipelineState,
    types::{FinalDocument, GenerationRequest},
    writer,
};
use crate::outlet::{DiskOutlet, Outlet, RunMetadata};
use crate::utils::threads::do_parallel_with_limit;

/// 流水线阶段状态机。
/// router之后的条件边只取决于needs_research；
/// fan_out是唯一的并行区域，reducer之前存在汇合屏障
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Router,
    Research,
    Planner,
    FanOut,
    Reducer,
    Done,
}

/// 启动一次完整的内容生成：执行流水线，把进度事件渲染到控制台，
/// 并将最终文档连同运行元数据交给磁盘出口
pub async fn launch(config: &Config, topic: &str) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            print_event(&event);
        }
    });

    // 配置与密钥问题在这里同步暴露，不会进入流水线
    let context = GeneratorContext::new(config.clone(), ProgressSink::new(tx))?;
    let request = GenerationRequest {
        topic: topic.to_string(),
    };

    match run(&context, request).await {
        Ok((document, state)) => {
            let metadata = RunMetadata::new(topic, state.mode, &config.generation);
            let outlet = DiskOutlet::new(config.output_path.clone());
            let saved_path = outlet.save(&document, &metadata).await?;

            drop(context);
            let _ = printer.await;
            println!("🎉 生成完成：{}", saved_path.display());
            Ok(())
        }
        Err(e) => {
            context.progress.emit(ProgressEvent::Failed {
                stage: "pipeline".to_string(),
                message: e.to_string(),
            });
            drop(context);
            let _ = printer.await;
            Err(e.context("生成流水线执行失败"))
        }
    }
}

/// 执行一次流水线：start → router → {research → planner | planner}
/// → fan_out(worker×N) → reducer → end。
/// 状态随阶段单调填充，任何阶段的失败都会中止整次执行
pub async fn run(
    context: &GeneratorContext,
    request: GenerationRequest,
) -> Result<(FinalDocument, PipelineState)> {
    let mut state = PipelineState::new(request.topic);
    let mut stage = Stage::Router;
    let mut document: Option<FinalDocument> = None;

    loop {
        match stage {
            Stage::Router => {
                let decision = router::decide(context, &state.topic).await?;
                state.needs_research = decision.needs_research;
                state.mode = decision.mode;
                state.queries = decision.queries;
                context.progress.emit(ProgressEvent::RouterCompleted {
                    mode: state.mode,
                    needs_research: state.needs_research,
                });

                stage = if state.needs_research {
                    Stage::Research
                } else {
                    // 跳过而不是空跑：Research阶段不会被进入
                    context.progress.emit(ProgressEvent::ResearchSkipped);
                    Stage::Planner
                };
            }
            Stage::Research => {
                research::execute(context, &mut state).await?;
                context.progress.emit(ProgressEvent::ResearchCompleted {
                    evidence_count: state.evidence.len(),
                });
                stage = Stage::Planner;
            }
            Stage::Planner => {
                let plan = planner::plan(context, &state.topic, state.mode, &state.evidence).await?;
                context.progress.emit(ProgressEvent::PlannerCompleted {
                    blog_title: plan.blog_title.clone(),
                    section_count: plan.tasks.len(),
                });
                state.plan = Some(plan);
                stage = Stage::FanOut;
            }
            Stage::FanOut => {
                fan_out(context, &mut state).await?;
                context.progress.emit(ProgressEvent::WorkersCompleted {
                    section_count: state.sections.len(),
                });
                stage = Stage::Reducer;
            }
            Stage::Reducer => {
                let plan = state
                    .plan
                    .as_ref()
                    .ok_or_else(|| anyhow!("计划缺失，无法汇编文档"))?;
                let assembled = assembler::assemble(plan, &state.sections);
                context.progress.emit(ProgressEvent::AssemblerCompleted {
                    filename: assembled.filename.clone(),
                });
                state.final_markdown = Some(assembled.markdown.clone());
                document = Some(assembled);
                stage = Stage::Done;
            }
            Stage::Done => break,
        }
    }

    let document = document.ok_or_else(|| anyhow!("流水线在产出文档前终止"))?;
    Ok((document, state))
}

/// 扇出阶段：为计划中的每个章节任务派生一个独立的并发写作单元。
/// 每个单元持有自己那份{task, topic, mode, plan, evidence}拷贝，
/// 互相观测不到对方的状态；结果按完成顺序累积。
/// 所有单元结束后才继续，若有失败则在屏障之后上抛第一个错误
async fn fan_out(context: &GeneratorContext, state: &mut PipelineState) -> Result<()> {
    let plan = state
        .plan
        .as_ref()
        .ok_or_else(|| anyhow!("计划缺失，无法派发写作任务"))?;
    let max_parallels = context.config.llm.max_parallels;

    if context.config.verbose {
        println!(
            "🚀 并发写作{}个章节，最大并发数：{}",
            plan.tasks.len(),
            max_parallels
        );
    }

    let write_futures: Vec<_> = plan
        .tasks
        .iter()
        .map(|task| {
            let task = task.clone();
            let topic = state.topic.clone();
            let mode = state.mode;
            let plan = plan.clone();
            let evidence = state.evidence.clone();
            let context = context.clone();

            Box::pin(async move {
                let result =
                    writer::write_section(&context, &task, &topic, mode, &plan, &evidence).await;
                if result.is_ok() {
                    context
                        .progress
                        .emit(ProgressEvent::SectionCompleted { task_id: task.id });
                }
                result
            })
        })
        .collect();

    let results = do_parallel_with_limit(write_futures, max_parallels).await;

    let mut sections = Vec::with_capacity(results.len());
    let mut first_error = None;
    for result in results {
        match result {
            Ok(section) => sections.push(section),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }
    if let Some(e) = first_error {
        return Err(e);
    }

    state.sections.extend(sections);
    Ok(())
}

/// 默认的控制台进度渲染，仅消费事件通道，不反向影响流水线
fn print_event(event: &ProgressEvent) {
    match event {
        ProgressEvent::RouterCompleted {
            mode,
            needs_research,
        } => println!("🔀 路由完成：mode={}，需要调研={}", mode, needs_research),
        ProgressEvent::ResearchSkipped => println!("🔍 调研阶段已跳过（closed_book）"),
        ProgressEvent::ResearchCompleted { evidence_count } => {
            println!("🔍 调研完成：获得{}条证据", evidence_count)
        }
        ProgressEvent::PlannerCompleted {
            blog_title,
            section_count,
        } => println!("📐 规划完成：《{}》，共{}个章节", blog_title, section_count),
        ProgressEvent::SectionCompleted { task_id } => {
            println!("   ✍️ 章节 #{} 写作完成", task_id)
        }
        ProgressEvent::WorkersCompleted { section_count } => {
            println!("✍️ 全部{}个章节写作完成", section_count)
        }
        ProgressEvent::AssemblerCompleted { filename } => {
            println!("🗜️ 文档汇编完成：{}", filename)
        }
        ProgressEvent::Failed { stage, message } => {
            eprintln!("❌ 流水线中止（{}）：{}", stage, message)
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;

//! `Session`：对上层（浏览器扩展/CLI/GUI）提供的会话对象。
//!
//! `Session` 自身不做业务逻辑判断，而是：
//! - 持有 `Context`（状态）
//! - 持有 processors 链（可插拔）
//! - 把每次 `InputEvent` 依次交给 processors，直到被消费
//! - 最后输出 `UiState` + `Action`
//!
//! 每个编辑器一个 `Session`，互不共享状态。

use crate::{
    catalog::Catalog,
    context::Context,
    detector::Detector,
    engine::Engine,
    key_event::{Action, InputEvent},
    model::UiState,
    processor::{
        CommitProcessor, FocusProcessor, NavigationProcessor, ProcessStatus, Processor,
        TypingProcessor,
    },
    surface::EditorSurface,
};

/// 短码补全会话（一次编辑过程的状态机容器）。
pub struct Session<C, T> {
    /// 引擎（包含目录、前缀索引、检测器）
    engine: Engine<C, T>,
    /// 会话上下文（processors 共享）
    ctx: Context,
    /// processors 链（可配置/可扩展）
    processors: Vec<Box<dyn Processor>>,
}

impl<C, T> Session<C, T>
where
    C: Catalog,
    T: Detector,
{
    /// 创建会话，并组装默认 processors 链。
    pub fn new(engine: Engine<C, T>) -> Self {
        Self {
            engine,
            ctx: Context::default(),
            processors: vec![
                Box::new(TypingProcessor),
                Box::new(NavigationProcessor),
                Box::new(CommitProcessor),
                Box::new(FocusProcessor),
            ],
        }
    }

    pub fn engine(&self) -> &Engine<C, T> {
        &self.engine
    }

    /// 获取当前 UI 快照（只读）。
    pub fn ui_state(&self) -> UiState {
        self.ctx.ui_state()
    }

    pub fn is_typing(&self) -> bool {
        self.ctx.is_typing()
    }

    /// 处理一个输入事件，返回最新 UI 快照与动作列表。
    pub fn handle(&mut self, editor: &dyn EditorSurface, ev: InputEvent) -> (UiState, Vec<Action>) {
        let _span = tracing::debug_span!("handle", event = ?ev).entered();
        let mut actions = Vec::new();
        for p in &mut self.processors {
            let (status, mut a) = p.process(&self.engine, editor, &mut self.ctx, &ev);
            actions.append(&mut a);
            if status == ProcessStatus::Consume {
                break;
            }
        }
        (self.ctx.ui_state(), actions)
    }
}

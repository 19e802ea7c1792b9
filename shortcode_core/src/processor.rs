//! `processor`：输入事件处理链。
//!
//! Processor 按顺序处理 `InputEvent`，对 `Context` 做状态变更，
//! 并可产生 `Action`（例如 Show/Hide/Replace）。
//!
//! 当前链路（`Session::new` 默认组装）：
//! - `TypingProcessor`：文本变化 -> 重新检测并刷新候选
//! - `NavigationProcessor`：上/下移动高亮
//! - `CommitProcessor`：回车或点击提交候选
//! - `FocusProcessor`：焦点切换时结束本次输入

use crate::{
    context::Context,
    detector::TypingState,
    key_event::{Action, InputEvent},
    model::Suggestion,
    surface::EditorSurface,
};

/// 给 processors 的对象安全引擎接口（避免在 processors 层引入泛型爆炸）。
pub trait EngineFacade {
    /// 检测：(text, cursor) -> TypingState
    fn detect(&self, text: &str, cursor: usize) -> TypingState;
    /// 候选：部分名称 -> 去重后的候选列表
    fn suggestions(&self, partial_name: &str) -> Vec<Suggestion>;
}

/// Processor 执行结果：是否“消费”了本次事件。
///
/// - `Consume`：本 processor 已处理该事件，后续 processor 不再执行
/// - `Continue`：本 processor 不处理该事件，交给下一个 processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Consume,
    Continue,
}

/// Processor：处理输入事件并改变 Context；必要时产生输出动作。
pub trait Processor: Send + Sync {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        editor: &dyn EditorSurface,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>);
}

pub struct TypingProcessor;

impl Processor for TypingProcessor {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        editor: &dyn EditorSurface,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::TextChanged => {
                (ProcessStatus::Consume, context.text_changed(engine, editor))
            }
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct NavigationProcessor;

impl Processor for NavigationProcessor {
    fn process(
        &mut self,
        _engine: &dyn EngineFacade,
        _editor: &dyn EditorSurface,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::NavigateUp => (ProcessStatus::Consume, context.navigate_up()),
            InputEvent::NavigateDown => (ProcessStatus::Consume, context.navigate_down()),
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct CommitProcessor;

impl Processor for CommitProcessor {
    fn process(
        &mut self,
        _engine: &dyn EngineFacade,
        _editor: &dyn EditorSurface,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match input_event {
            InputEvent::Commit => (ProcessStatus::Consume, context.commit_selected()),
            InputEvent::Pick(s) => (ProcessStatus::Consume, context.commit_pick(s)),
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct FocusProcessor;

impl Processor for FocusProcessor {
    fn process(
        &mut self,
        _engine: &dyn EngineFacade,
        _editor: &dyn EditorSurface,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::FocusChanged => (ProcessStatus::Consume, context.reset()),
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

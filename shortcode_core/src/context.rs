//! `Context`：processor 链共享的唯一状态容器。
//!
//! 约定：
//! - `typing`：最近一次 `TextChanged` 的检测结果
//! - `selection`：当前候选列表与高亮下标
//! - `typing` 回到 `NotTyping` 时，`selection` 一并清空为 `(空, None)`
use crate::{
    detector::TypingState,
    key_event::Action,
    model::{Suggestion, UiState},
    processor::EngineFacade,
    surface::EditorSurface,
};

/// 候选列表与高亮下标。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub suggestions: Vec<Suggestion>,
    pub selected: Option<usize>,
}

impl SelectionState {
    /// 新列表：有候选时高亮第一个，否则不高亮。
    pub fn refresh(&mut self, suggestions: Vec<Suggestion>) {
        self.selected = if suggestions.is_empty() { None } else { Some(0) };
        self.suggestions = suggestions;
    }

    /// 上移：未高亮时跳到 0，否则减一并夹在 0；不回绕。
    pub fn up(&mut self) -> Option<usize> {
        if self.suggestions.is_empty() {
            return None;
        }
        let next = match self.selected {
            None => 0,
            Some(i) => i.saturating_sub(1),
        };
        self.selected = Some(next);
        self.selected
    }

    /// 下移：未高亮时跳到末尾，否则加一并夹在末尾；不回绕。
    pub fn down(&mut self) -> Option<usize> {
        let last = self.suggestions.len().checked_sub(1)?;
        let next = match self.selected {
            None => last,
            Some(i) => (i + 1).min(last),
        };
        self.selected = Some(next);
        self.selected
    }

    pub fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.selected.and_then(|i| self.suggestions.get(i))
    }
}

/// 输入会话上下文：processor 链共享的唯一状态。
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// 当前输入状态
    pub typing: TypingState,
    /// 候选与高亮
    pub selection: SelectionState,
}

impl Context {
    /// 回到 `NotTyping`；若之前在输入，请求隐藏弹窗。
    pub fn reset(&mut self) -> Vec<Action> {
        let was_typing = self.typing.is_typing();
        *self = Self::default();
        if was_typing {
            tracing::debug!("typing -> not typing");
            vec![Action::Hide]
        } else {
            Vec::new()
        }
    }

    pub fn is_typing(&self) -> bool {
        self.typing.is_typing()
    }

    /// 文本变化：重新检测，必要时重新生成候选并重新定位弹窗。
    pub fn text_changed(
        &mut self,
        engine: &dyn EngineFacade,
        editor: &dyn EditorSurface,
    ) -> Vec<Action> {
        let text = editor.text();
        let state = engine.detect(&text, editor.cursor_offset());
        let TypingState::TypingToken {
            partial_name,
            marker_offset,
        } = &state
        else {
            return self.reset();
        };

        if !self.typing.is_typing() {
            tracing::debug!(partial_name = %partial_name, "not typing -> typing");
        }
        // 每次刷新列表都重置高亮，不沿用旧下标
        self.selection.refresh(engine.suggestions(partial_name));
        let mut actions = vec![Action::Show {
            suggestions: self.selection.suggestions.clone(),
            highlighted: self.selection.selected,
        }];
        if let Some(rect) = editor.marker_rect(*marker_offset) {
            actions.push(Action::PositionNear(rect));
        }
        self.typing = state;
        actions
    }

    pub fn navigate_up(&mut self) -> Vec<Action> {
        if !self.is_typing() {
            return Vec::new();
        }
        self.selection.up().map(Action::Highlight).into_iter().collect()
    }

    pub fn navigate_down(&mut self) -> Vec<Action> {
        if !self.is_typing() {
            return Vec::new();
        }
        self.selection.down().map(Action::Highlight).into_iter().collect()
    }

    /// 回车：提交高亮候选；没有高亮时什么都不做。
    pub fn commit_selected(&mut self) -> Vec<Action> {
        if !self.is_typing() {
            return Vec::new();
        }
        let Some(s) = self.selection.selected_suggestion() else {
            return Vec::new();
        };
        let glyph = s.glyph.clone();
        self.commit_glyph(glyph)
    }

    /// 点击：提交指定候选；不在当前列表里（过期点击）则忽略。
    pub fn commit_pick(&mut self, pick: &Suggestion) -> Vec<Action> {
        if !self.is_typing() || !self.selection.suggestions.contains(pick) {
            return Vec::new();
        }
        self.commit_glyph(pick.glyph.clone())
    }

    fn commit_glyph(&mut self, glyph: String) -> Vec<Action> {
        let Some((start, end)) = self.typing.token_range() else {
            return Vec::new();
        };
        tracing::debug!(glyph = %glyph, start, end, "commit");
        let mut actions = vec![Action::Replace {
            start,
            end,
            replacement: glyph,
        }];
        actions.append(&mut self.reset());
        actions
    }

    /// 生成 UI 层只读快照。
    pub fn ui_state(&self) -> UiState {
        UiState {
            partial_name: self.typing.partial_name().map(str::to_owned),
            suggestions: self.selection.suggestions.clone(),
            selected: self.selection.selected,
        }
    }
}

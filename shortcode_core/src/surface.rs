//! `surface`：与宿主交互的两个表面。
//!
//! - `EditorSurface`：富文本编辑器（读全文/光标、替换区间、取标记字符坐标）
//! - `SuggestionSurface`：候选弹窗（展示、高亮、隐藏、定位）
//!
//! core 只通过这两个 trait 接触宿主，从不直接碰屏幕坐标或选区对象。
use crate::{
    key_event::Action,
    model::{MarkerRect, Suggestion},
};

/// 编辑器表面。所有偏移都按 `char` 计，换行计 1。
pub trait EditorSurface {
    /// 全文：每个逻辑行一段，用 `\n` 连接。
    fn text(&self) -> String;
    /// 光标前的字符个数。
    fn cursor_offset(&self) -> usize;
    /// 把 [start, end) 替换为 `replacement`。
    fn replace_range(&mut self, start: usize, end: usize, replacement: &str);
    /// 标记字符的屏幕锚点；宿主无法计算时返回 `None`。
    fn marker_rect(&self, offset: usize) -> Option<MarkerRect>;
}

/// 候选弹窗表面。点击某项时，宿主以 `InputEvent::Pick` 回报该项。
pub trait SuggestionSurface {
    fn show(&mut self, suggestions: &[Suggestion], highlighted: Option<usize>);
    fn update_highlight(&mut self, index: usize);
    fn hide(&mut self);
    fn position_near(&mut self, rect: MarkerRect);
}

/// 按顺序把动作落到两个表面上。
pub fn apply_actions(
    actions: &[Action],
    editor: &mut dyn EditorSurface,
    popup: &mut dyn SuggestionSurface,
) {
    for action in actions {
        match action {
            Action::Show {
                suggestions,
                highlighted,
            } => popup.show(suggestions, *highlighted),
            Action::Highlight(i) => popup.update_highlight(*i),
            Action::PositionNear(rect) => popup.position_near(*rect),
            Action::Hide => popup.hide(),
            Action::Replace {
                start,
                end,
                replacement,
            } => editor.replace_range(*start, *end, replacement),
        }
    }
}

/// 单字符宽、单行高（`BufferSurface` 计算坐标用）。
const CELL_WIDTH: f32 = 8.0;
const LINE_HEIGHT: f32 = 16.0;

/// 内存里的编辑器：纯文本 + 光标。CLI 与测试用。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSurface {
    text: String,
    /// 光标前字符数
    cursor: usize,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用已有文本初始化，光标放在末尾。
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// 在光标处插入一个字符。
    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    /// 删除光标前一个字符。
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.char_len());
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

impl EditorSurface for BufferSurface {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn cursor_offset(&self) -> usize {
        self.cursor
    }

    /// 替换后光标落在替换文本之后。
    fn replace_range(&mut self, start: usize, end: usize, replacement: &str) {
        let len = self.char_len();
        let end = end.min(len);
        let start = start.min(end);
        let (a, b) = (self.byte_index(start), self.byte_index(end));
        self.text.replace_range(a..b, replacement);
        self.cursor = start + replacement.chars().count();
    }

    fn marker_rect(&self, offset: usize) -> Option<MarkerRect> {
        if offset >= self.char_len() {
            return None;
        }
        let before: String = self.text.chars().take(offset).collect();
        let line = before.matches('\n').count();
        let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count());
        let y_top = line as f32 * LINE_HEIGHT;
        Some(MarkerRect {
            x: (column + 1) as f32 * CELL_WIDTH,
            y_top,
            y_bottom: y_top + LINE_HEIGHT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace_track_the_cursor() {
        let mut buf = BufferSurface::new();
        for ch in "a😀b".chars() {
            buf.insert_char(ch);
        }
        assert_eq!(buf.cursor_offset(), 3);
        buf.move_left();
        buf.backspace();
        assert_eq!(buf.as_str(), "ab");
        assert_eq!(buf.cursor_offset(), 1);
        buf.move_right();
        buf.move_right();
        assert_eq!(buf.cursor_offset(), 2);
    }

    #[test]
    fn replace_range_counts_chars() {
        let mut buf = BufferSurface::with_text("é :sm x");
        buf.replace_range(2, 5, "😄");
        assert_eq!(buf.as_str(), "é 😄 x");
        assert_eq!(buf.cursor_offset(), 3);
    }

    #[test]
    fn marker_rect_uses_line_and_column() {
        let buf = BufferSurface::with_text("ab\nc:d");
        let rect = buf.marker_rect(4).unwrap();
        assert_eq!(rect.x, 2.0 * CELL_WIDTH);
        assert_eq!(rect.y_top, LINE_HEIGHT);
        assert_eq!(rect.y_bottom, 2.0 * LINE_HEIGHT);
        assert!(buf.marker_rect(6).is_none());
    }
}

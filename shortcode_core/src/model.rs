/// 候选：一个 `(glyph, name)` 对，可被 UI 展示与用户选择。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Suggestion {
    /// 提交到编辑器的字形
    pub glyph: String,
    /// 首个引入该字形的目录名称
    pub name: String,
}

impl Suggestion {
    pub fn new(glyph: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            name: name.into(),
        }
    }
}

/// 标记字符在屏幕上的锚点矩形（只用于弹窗定位）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerRect {
    pub x: f32,
    pub y_top: f32,
    pub y_bottom: f32,
}

/// 会话给 UI 的“快照视图”。
///
/// UI 层只读 `UiState`，不直接读写 `Context`。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    /// 正在输入的部分名称；`None` 表示没有在输入短码
    pub partial_name: Option<String>,
    /// 当前候选列表
    pub suggestions: Vec<Suggestion>,
    /// 高亮候选下标
    pub selected: Option<usize>,
}

impl UiState {
    pub fn is_typing(&self) -> bool {
        self.partial_name.is_some()
    }

    pub fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.selected.and_then(|i| self.suggestions.get(i))
    }
}

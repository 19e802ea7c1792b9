use crate::model::{MarkerRect, Suggestion};

/// 输入事件（宿主按顺序投递的语义事件）。
///
/// 说明：
/// - `Session`/processor 只关心“语义事件”，不关心 DOM/平台键值
/// - 宿主负责把按键、点击、焦点变化转换成这些事件
/// - 没有在输入短码时，导航与提交事件会被忽略；宿主应照常放行按键
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// 编辑器内容或光标发生变化
    TextChanged,
    /// 上方向键
    NavigateUp,
    /// 下方向键
    NavigateDown,
    /// 回车：提交高亮候选
    Commit,
    /// 指针点击某个候选：直接提交该候选，与高亮位置无关
    Pick(Suggestion),
    /// 焦点切换到另一个编辑器（或离开）
    FocusChanged,
}

/// 会话输出动作（对编辑器/弹窗的“副作用”请求）。
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// 展示（或刷新）候选列表
    Show {
        suggestions: Vec<Suggestion>,
        highlighted: Option<usize>,
    },
    /// 仅更新高亮位置
    Highlight(usize),
    /// 把弹窗定位到标记字符附近
    PositionNear(MarkerRect),
    /// 隐藏弹窗
    Hide,
    /// 用 `replacement` 替换编辑器中的 [start, end)
    Replace {
        start: usize,
        end: usize,
        replacement: String,
    },
}

//! `detector`：判断光标是否位于一个未闭合的短码（token）内。
//!
//! 约定：
//! - `text` 为编辑器全文，行与行之间用单个 `\n` 连接
//! - `cursor` 为光标前的字符个数（按 `char` 计，换行计 1）
//! - 纯函数：每次文本变化都从头计算，不保留任何状态

/// 默认标记字符。
pub const DEFAULT_MARKER: char = ':';

/// 默认边界字符（遇到即视为不在 token 内）。
pub const DEFAULT_BOUNDARIES: [char; 2] = [' ', '\n'];

/// 输入状态：要么没有在输入短码，要么正在输入某个短码。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypingState {
    #[default]
    NotTyping,
    TypingToken {
        /// 标记字符与光标之间的部分名称（非空）
        partial_name: String,
        /// 标记字符在全文中的字符偏移
        marker_offset: usize,
    },
}

impl TypingState {
    pub fn is_typing(&self) -> bool {
        matches!(self, TypingState::TypingToken { .. })
    }

    pub fn partial_name(&self) -> Option<&str> {
        match self {
            TypingState::NotTyping => None,
            TypingState::TypingToken { partial_name, .. } => Some(partial_name),
        }
    }

    /// token 覆盖的范围：[标记字符, 光标)。
    pub fn token_range(&self) -> Option<(usize, usize)> {
        match self {
            TypingState::NotTyping => None,
            TypingState::TypingToken {
                partial_name,
                marker_offset,
            } => Some((*marker_offset, marker_offset + 1 + partial_name.chars().count())),
        }
    }
}

/// Detector：把 (text, cursor) 转成 `TypingState`。
pub trait Detector: Send + Sync {
    fn detect(&self, text: &str, cursor: usize) -> TypingState;
}

/// 基于标记字符的向后扫描检测器。
#[derive(Debug, Clone)]
pub struct MarkerDetector {
    marker: char,
    boundaries: Vec<char>,
}

impl Default for MarkerDetector {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            boundaries: DEFAULT_BOUNDARIES.to_vec(),
        }
    }
}

impl MarkerDetector {
    pub fn new(marker: char) -> Self {
        Self::default().with_marker(marker)
    }

    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_boundaries(mut self, boundaries: &[char]) -> Self {
        self.boundaries = boundaries.to_vec();
        self
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    pub fn boundaries(&self) -> &[char] {
        &self.boundaries
    }
}

impl Detector for MarkerDetector {
    fn detect(&self, text: &str, cursor: usize) -> TypingState {
        if cursor == 0 {
            return TypingState::NotTyping;
        }
        let before: Vec<char> = text.chars().take(cursor).collect();
        // 光标越界：视为无效上下文
        if before.len() < cursor {
            return TypingState::NotTyping;
        }
        // 刚输入标记字符、后面什么都没有：暂不弹出候选
        if before[cursor - 1] == self.marker {
            return TypingState::NotTyping;
        }

        for (i, &ch) in before.iter().enumerate().rev() {
            if ch == self.marker {
                return TypingState::TypingToken {
                    partial_name: before[i + 1..].iter().collect(),
                    marker_offset: i,
                };
            }
            if self.boundaries.contains(&ch) {
                return TypingState::NotTyping;
            }
        }
        TypingState::NotTyping
    }
}

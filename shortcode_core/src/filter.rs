//! `filter`：候选后处理。

use crate::model::Suggestion;

/// Filter：对候选列表做后处理（去重、裁剪等）。
pub trait Filter: Send + Sync {
    fn apply(&self, suggestions: Vec<Suggestion>) -> Vec<Suggestion>;
}

/// 默认 filter：按 glyph 去重，保留首次出现的那一条，不改变相对顺序。
pub struct DedupByGlyph;

impl Filter for DedupByGlyph {
    fn apply(&self, suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
        let mut out: Vec<Suggestion> = Vec::with_capacity(suggestions.len());
        for s in suggestions {
            if !out.iter().any(|e| e.glyph == s.glyph) {
                out.push(s);
            }
        }
        out
    }
}

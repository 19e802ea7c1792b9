use crate::catalog::Catalog;
use crate::detector::{DEFAULT_BOUNDARIES, Detector, MarkerDetector, TypingState};
use crate::filter::{DedupByGlyph, Filter};
use crate::model::Suggestion;
use crate::translator::{CatalogTranslator, Translator};
use crate::trie::PrefixIndex;

/// 引擎：负责把输入状态（text/cursor 或部分名称）转成检测结果与候选。
///
/// 流水线：
/// - engine（编排） -> detector（找 token） -> trie（前缀检索） -> translator（展开 glyph） -> filter（去重） -> 候选
pub struct Engine<C, T = MarkerDetector> {
    /// 名称目录（前缀索引的唯一来源）
    catalog: C,
    /// 由目录全部名称构建，之后只读
    index: PrefixIndex,
    /// token 检测器
    detector: T,
}

impl<C> Engine<C, MarkerDetector>
where
    C: Catalog,
{
    /// 用目录构建引擎（默认标记字符 `:`，边界为空格和换行）。
    pub fn new(catalog: C) -> Self {
        Self::with_detector(catalog, MarkerDetector::default())
    }

    /// 设置标记字符。
    pub fn marker(mut self, marker: char) -> Self {
        self.detector = self.detector.with_marker(marker);
        self
    }

    /// 设置边界字符；空列表回退到默认值（空格与换行），
    /// 否则 token 会一直延伸到文本开头。
    pub fn boundaries(mut self, boundaries: &[char]) -> Self {
        let boundaries: &[char] = if boundaries.is_empty() {
            &DEFAULT_BOUNDARIES
        } else {
            boundaries
        };
        self.detector = self.detector.with_boundaries(boundaries);
        self
    }
}

impl<C, T> Engine<C, T>
where
    C: Catalog,
    T: Detector,
{
    pub fn with_detector(catalog: C, detector: T) -> Self {
        let index = PrefixIndex::from_names(catalog.names());
        tracing::debug!(names = index.len(), "prefix index built");
        Self {
            catalog,
            index,
            detector,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }

    /// 检测光标是否位于未闭合的 token 内。
    pub fn detect(&self, text: &str, cursor: usize) -> TypingState {
        self.detector.detect(text, cursor)
    }

    /// 部分名称 -> 有序、按 glyph 去重的候选列表。
    pub fn suggestions(&self, partial_name: &str) -> Vec<Suggestion> {
        let names = self.index.search(partial_name);
        if names.is_empty() {
            return Vec::new();
        }
        let translator = CatalogTranslator {
            catalog: &self.catalog,
        };
        let out = DedupByGlyph.apply(translator.translate(&names));
        tracing::trace!(
            partial_name,
            names = names.len(),
            suggestions = out.len(),
            "suggestions"
        );
        out
    }
}

impl<C, T> crate::processor::EngineFacade for Engine<C, T>
where
    C: Catalog,
    T: Detector,
{
    fn detect(&self, text: &str, cursor: usize) -> TypingState {
        Engine::<C, T>::detect(self, text, cursor)
    }

    fn suggestions(&self, partial_name: &str) -> Vec<Suggestion> {
        Engine::<C, T>::suggestions(self, partial_name)
    }
}

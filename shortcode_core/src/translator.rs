//! `translator`：把前缀检索命中的名称翻译成候选。
//!
//! 当前实现：
//! - `CatalogTranslator`：对每个名称，按目录声明顺序展开它的全部 glyph
//! - 不做去重（交给 `filter`）

use crate::{catalog::Catalog, model::Suggestion};

/// Translator：把名称列表转成候选。
pub trait Translator: Send + Sync {
    fn translate(&self, names: &[String]) -> Vec<Suggestion>;
}

/// 目录翻译器（基于 `Catalog::glyphs`）。
pub struct CatalogTranslator<'a, C> {
    /// 目录引用（查 glyph 发生在这里）
    pub catalog: &'a C,
}

impl<'a, C> Translator for CatalogTranslator<'a, C>
where
    C: Catalog,
{
    fn translate(&self, names: &[String]) -> Vec<Suggestion> {
        let mut out = Vec::new();
        for name in names {
            // 索引只由目录构建，这里理论上不会 miss；miss 时该名称不贡献候选。
            let Some(glyphs) = self.catalog.glyphs(name) else {
                tracing::warn!(name = %name, "indexed name missing from catalog");
                continue;
            };
            out.extend(
                glyphs
                    .iter()
                    .map(|g| Suggestion::new(g.as_str(), name.as_str())),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn expands_glyphs_in_declared_order() {
        let mut catalog: BTreeMap<String, Vec<String>> = BTreeMap::new();
        catalog.insert("heart".into(), vec!["❤️".into(), "♥️".into()]);
        catalog.insert("hearts".into(), vec!["♥️".into()]);
        let t = CatalogTranslator { catalog: &catalog };
        let out = t.translate(&["heart".to_owned(), "hearts".to_owned()]);
        assert_eq!(
            out,
            vec![
                Suggestion::new("❤️", "heart"),
                Suggestion::new("♥️", "heart"),
                Suggestion::new("♥️", "hearts"),
            ]
        );
    }

    #[test]
    fn missing_name_contributes_nothing() {
        let mut catalog: BTreeMap<String, Vec<String>> = BTreeMap::new();
        catalog.insert("cat".into(), vec!["🐱".into()]);
        let t = CatalogTranslator { catalog: &catalog };
        let out = t.translate(&["dog".to_owned(), "cat".to_owned()]);
        assert_eq!(out, vec![Suggestion::new("🐱", "cat")]);
    }
}

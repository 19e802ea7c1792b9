use std::collections::BTreeMap;

/// 名称目录抽象：core 不关心目录来自文件/内存/网络。
///
/// 约定：
/// - 每个名称对应一个或多个 glyph，顺序即声明顺序
/// - 名称集合在构建 `Engine` 之后不再变化
pub trait Catalog: Send + Sync {
    /// 查询名称对应的 glyph 列表；未知名称返回 `None`。
    fn glyphs(&self, name: &str) -> Option<&[String]>;

    /// 全部名称（用于构建前缀索引）。
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// 名称个数。
    fn len(&self) -> usize {
        self.names().count()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Catalog for BTreeMap<String, Vec<String>> {
    fn glyphs(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(Vec::as_slice)
    }

    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.keys().map(String::as_str))
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}


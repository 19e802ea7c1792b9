//! `trie`：名称前缀索引（PrefixIndex）。
//!
//! 约定：
//! - 按字符（`char`）建树，根节点不携带字符，也不会是终止节点
//! - 子节点用 `BTreeMap` 保存，`search` 的返回顺序即字典序（按码点）
//! - 启动时一次性构建，之后只读；不支持删除
use std::collections::BTreeMap;

/// 前缀树节点：独占其全部子节点。
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    /// 节点字符；根节点为 `None`
    value: Option<char>,
    /// 是否有某个名称恰好在此结束
    terminal: bool,
    children: BTreeMap<char, TrieNode>,
}

impl TrieNode {
    fn with_value(ch: char) -> Self {
        Self {
            value: Some(ch),
            terminal: false,
            children: BTreeMap::new(),
        }
    }

    pub fn value(&self) -> Option<char> {
        self.value
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    /// 深度优先收集子树里的所有名称；`path` 是从根到本节点（含）的字符串。
    fn collect(&self, path: &mut String, out: &mut Vec<String>) {
        if self.terminal {
            out.push(path.clone());
        }
        for (ch, child) in &self.children {
            path.push(*ch);
            child.collect(path, out);
            path.pop();
        }
    }
}

/// 名称前缀索引。
#[derive(Debug, Clone, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    len: usize,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用一组名称构建索引。
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for name in names {
            index.insert(name.as_ref());
        }
        index
    }

    /// 插入名称；重复插入不改变可观察行为。空串忽略。
    pub fn insert(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        let mut current = &mut self.root;
        for ch in name.chars() {
            current = current
                .children
                .entry(ch)
                .or_insert_with(|| TrieNode::with_value(ch));
        }
        if !current.terminal {
            current.terminal = true;
            self.len += 1;
        }
    }

    /// 已插入的不同名称个数。
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// 精确包含判断。
    pub fn contains(&self, name: &str) -> bool {
        self.walk(name).is_some_and(TrieNode::is_terminal)
    }

    /// 返回所有以 `query` 为前缀的名称（严格按路径匹配）。
    ///
    /// - 路径在任一字符处断开则返回空
    /// - 命中节点本身若是终止节点，`query` 自身也在结果中
    /// - 空 `query` 不是合法输入，返回空
    pub fn search(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }
        let Some(node) = self.walk(query) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut path = query.to_owned();
        node.collect(&mut path, &mut out);
        tracing::trace!(query, matched = out.len(), "prefix search");
        out
    }

    fn walk(&self, query: &str) -> Option<&TrieNode> {
        let mut current = &self.root;
        for ch in query.chars() {
            current = current.child(ch)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> PrefixIndex {
        PrefixIndex::from_names(["smile", "smiley", "smirk", "sad", "cat", "smile"])
    }

    #[test]
    fn search_returns_all_names_under_prefix() {
        let idx = index();
        assert_eq!(idx.search("sm"), vec!["smile", "smiley", "smirk"]);
        assert_eq!(idx.search("s"), vec!["sad", "smile", "smiley", "smirk"]);
    }

    #[test]
    fn exact_name_is_included() {
        let idx = index();
        assert_eq!(idx.search("smile"), vec!["smile", "smiley"]);
        assert_eq!(idx.search("cat"), vec!["cat"]);
    }

    #[test]
    fn broken_path_yields_nothing() {
        let idx = index();
        assert!(idx.search("smx").is_empty());
        assert!(idx.search("dog").is_empty());
        assert!(idx.search("smileys").is_empty());
        assert!(idx.search("").is_empty());
    }

    #[test]
    fn duplicate_insert_is_idempotent() {
        let mut idx = index();
        assert_eq!(idx.len(), 5);
        idx.insert("cat");
        assert_eq!(idx.len(), 5);
        assert_eq!(idx.search("ca"), vec!["cat"]);
    }

    #[test]
    fn root_is_sentinel() {
        let idx = index();
        assert_eq!(idx.root().value(), None);
        assert!(!idx.root().is_terminal());
        assert_eq!(idx.root().child('c').and_then(TrieNode::value), Some('c'));
        assert!(idx.contains("smirk"));
        assert!(!idx.contains("smi"));
    }

    #[test]
    fn multibyte_characters_follow_char_edges() {
        let idx = PrefixIndex::from_names(["café", "cafe", "ça_va"]);
        assert_eq!(idx.search("caf"), vec!["cafe", "café"]);
        assert_eq!(idx.search("ç"), vec!["ça_va"]);
    }
}

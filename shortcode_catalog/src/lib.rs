use std::{collections::BTreeMap, fs, io, path::Path};

use serde::Deserialize;
use shortcode_core::{catalog::Catalog, detector::DEFAULT_MARKER};

/// 目录加载错误。
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TSV 第 {line} 行缺少 glyph/name")]
    MissingField { line: usize },

    #[error("TSV 第 {line} 行的名称包含空白或标记字符 `{marker}`")]
    InvalidName { line: usize, marker: char },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

/// JSON 里一个名称可以对应单个 glyph，也可以对应一组。
#[derive(Deserialize)]
#[serde(untagged)]
enum GlyphList {
    One(String),
    Many(Vec<String>),
}

/// 文件目录：名称 -> glyph 列表（保持声明顺序）。
///
/// TSV 格式：
///
/// - `glyph<TAB>name`，每行一个 glyph
/// - 同一名称出现多行时，按文件顺序追加 glyph
/// - 允许 `#` 开头注释行与空行
///
/// JSON 格式：`{"name": ["glyph", ...], "other": "glyph"}`。
///
/// 名称不能包含空白或标记字符；不带 `_with_marker` 的入口按默认标记 `:` 校验。
#[derive(Debug, Clone, Default)]
pub struct FileCatalog {
    map: BTreeMap<String, Vec<String>>,
}

impl FileCatalog {
    /// 按扩展名选择解析方式（`.tsv` / `.json`）。
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::from_path_with_marker(path, DEFAULT_MARKER)
    }

    /// 同 `from_path`，名称按给定标记字符校验（与 `Engine::marker` 保持一致）。
    pub fn from_path_with_marker(
        path: impl AsRef<Path>,
        marker: char,
    ) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)?;
        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("tsv") | Some("txt") => Self::from_tsv_str_with_marker(&s, marker)?,
            Some("json") => Self::from_json_str_with_marker(&s, marker)?,
            other => {
                let ext = other.unwrap_or("<none>").to_owned();
                return Err(CatalogError::UnsupportedFormat(ext));
            }
        };
        tracing::info!(
            path = %path.display(),
            names = catalog.map.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_tsv_str(s: &str) -> Result<Self, CatalogError> {
        Self::from_tsv_str_with_marker(s, DEFAULT_MARKER)
    }

    pub fn from_tsv_str_with_marker(s: &str, marker: char) -> Result<Self, CatalogError> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (idx, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut it = line.split('\t');
            let glyph = it.next().unwrap_or("").trim();
            let name = it.next().unwrap_or("").trim();
            if glyph.is_empty() || name.is_empty() {
                return Err(CatalogError::MissingField { line: idx + 1 });
            }
            if !is_valid_name(name, marker) {
                return Err(CatalogError::InvalidName {
                    line: idx + 1,
                    marker,
                });
            }
            push_glyph(&mut map, name, glyph);
        }

        Ok(Self { map })
    }

    pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
        Self::from_json_str_with_marker(s, DEFAULT_MARKER)
    }

    pub fn from_json_str_with_marker(s: &str, marker: char) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, GlyphList> = serde_json::from_str(s)?;
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, glyphs) in raw {
            if !is_valid_name(&name, marker) {
                tracing::warn!(name = %name, "skipping invalid catalog name");
                continue;
            }
            let glyphs = match glyphs {
                GlyphList::One(g) => vec![g],
                GlyphList::Many(v) => v,
            };
            for g in glyphs.iter().filter(|g| !g.is_empty()) {
                push_glyph(&mut map, &name, g);
            }
            if !map.contains_key(&name) {
                tracing::warn!(name = %name, "catalog name without glyphs");
            }
        }
        Ok(Self { map })
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.map
    }
}

/// 名称不能为空，也不能包含空白或标记字符（否则永远无法被检测器整段取出）。
fn is_valid_name(name: &str, marker: char) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_whitespace() || c == marker)
}

fn push_glyph(map: &mut BTreeMap<String, Vec<String>>, name: &str, glyph: &str) {
    let glyphs = map.entry(name.to_string()).or_default();
    if !glyphs.iter().any(|g| g == glyph) {
        glyphs.push(glyph.to_string());
    }
}

impl Catalog for FileCatalog {
    fn glyphs(&self, name: &str) -> Option<&[String]> {
        self.map.get(name).map(Vec::as_slice)
    }

    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.map.keys().map(String::as_str))
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

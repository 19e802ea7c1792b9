//! `shortcode_core`：纯逻辑层，不做任何 I/O。
//!
//! 设计目标：
//! - **核心可复用**：浏览器扩展/CLI/GUI 都能复用同一套逻辑
//! - **分层清晰**：session -> processor -> detector -> trie -> translator -> filter -> 输出（`UiState` + `Action`）
//! - **宿主无关**：编辑器与弹窗只通过 `surface` 里的 trait 接入
pub mod catalog;
pub mod context;
pub mod detector;
pub mod engine;
pub mod filter;
pub mod key_event;
pub mod model;
pub mod processor;
pub mod session;
pub mod surface;
pub mod translator;
pub mod trie;

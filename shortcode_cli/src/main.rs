use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;
use shortcode_catalog::FileCatalog;
use shortcode_core::{
    detector::{DEFAULT_MARKER, MarkerDetector},
    engine::Engine,
    key_event::InputEvent,
    model::{MarkerRect, Suggestion},
    session::Session,
    surface::{BufferSurface, EditorSurface, SuggestionSurface, apply_actions},
};
use tracing_subscriber::EnvFilter;

/// 短码补全演示：终端扮演编辑器与候选弹窗。
#[derive(Debug, Parser)]
#[command(name = "shortcode_cli", version)]
struct Args {
    /// 目录文件（.tsv 或 .json）
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// 标记字符
    #[arg(long, default_value_t = DEFAULT_MARKER)]
    marker: char,

    /// 日志过滤（覆盖 RUST_LOG），例如 `debug` 或 `shortcode_core=trace`
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let catalog_path = args.catalog.clone().unwrap_or_else(default_catalog_path);
    let mut session = load_session(&catalog_path, args.marker)?;
    repl(&mut session, &catalog_path, args.marker).context("交互循环异常退出")?;
    Ok(())
}

/// 目录名称按同一个标记字符校验，与检测器保持一致。
fn load_session(
    catalog_path: &Path,
    marker: char,
) -> anyhow::Result<Session<FileCatalog, MarkerDetector>> {
    let catalog = FileCatalog::from_path_with_marker(catalog_path, marker)
        .with_context(|| format!("加载目录失败：{}", catalog_path.display()))?;
    Ok(Session::new(Engine::new(catalog).marker(marker)))
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(l) => EnvFilter::new(l),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("asset").join("emoji.tsv")
}

/// 终端“弹窗”：记录当前列表，并在每次变化后打印。
#[derive(Default)]
struct TerminalPopup {
    visible: bool,
    items: Vec<Suggestion>,
    highlighted: Option<usize>,
    anchor: Option<MarkerRect>,
    dirty: bool,
}

impl SuggestionSurface for TerminalPopup {
    fn show(&mut self, suggestions: &[Suggestion], highlighted: Option<usize>) {
        self.visible = true;
        self.items = suggestions.to_vec();
        self.highlighted = highlighted;
        self.dirty = true;
    }

    fn update_highlight(&mut self, index: usize) {
        self.highlighted = Some(index);
        self.dirty = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.items.clear();
        self.highlighted = None;
        self.anchor = None;
        self.dirty = true;
    }

    fn position_near(&mut self, rect: MarkerRect) {
        self.anchor = Some(rect);
    }
}

impl TerminalPopup {
    fn render(&mut self, out: &mut impl Write) -> io::Result<()> {
        if !std::mem::take(&mut self.dirty) {
            return Ok(());
        }
        if !self.visible {
            return writeln!(out, "  (popup hidden)");
        }
        if let Some(a) = self.anchor {
            writeln!(out, "  popup @ x={} y={}..{}", a.x, a.y_top, a.y_bottom)?;
        }
        if self.items.is_empty() {
            return writeln!(out, "  (无候选)");
        }
        for (i, s) in self.items.iter().enumerate() {
            let mark = if self.highlighted == Some(i) { '>' } else { ' ' };
            writeln!(out, " {mark}{}. {} :{}:", i + 1, s.glyph, s.name)?;
        }
        Ok(())
    }
}

fn print_help(out: &mut impl Write, marker: char) -> io::Result<()> {
    writeln!(out, "普通输入：逐字符键入编辑器（以 `{marker}` 开始一个短码）")?;
    writeln!(
        out,
        "命令：/up /down /enter /pick <n> /nl /back /left /right /focus /clear /text /help /quit"
    )
}

fn repl(
    session: &mut Session<FileCatalog, MarkerDetector>,
    catalog_path: &Path,
    marker: char,
) -> io::Result<()> {
    let mut out = io::stdout();
    let mut editor = BufferSurface::new();
    let mut popup = TerminalPopup::default();
    let mut line = String::new();

    writeln!(
        out,
        "shortcode demo | catalog: {} ({} names)",
        catalog_path.display(),
        session.engine().index().len()
    )?;
    print_help(&mut out, marker)?;

    loop {
        line.clear();
        print!("editor>");
        out.flush()?;
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\r', '\n']);
        if input.is_empty() {
            continue;
        }

        let mut words = input.split_whitespace();
        let events: Vec<InputEvent> = match (input.starts_with('/'), words.next()) {
            (true, Some("/quit")) => break,
            (true, Some("/help")) => {
                print_help(&mut out, marker)?;
                continue;
            }
            (true, Some("/text")) => {
                writeln!(out, "{:?} (cursor {})", editor.as_str(), editor.cursor_offset())?;
                continue;
            }
            (true, Some("/up")) => vec![InputEvent::NavigateUp],
            (true, Some("/down")) => vec![InputEvent::NavigateDown],
            (true, Some("/enter")) => vec![InputEvent::Commit],
            (true, Some("/focus")) => vec![InputEvent::FocusChanged],
            (true, Some("/pick")) => {
                let ui = session.ui_state();
                let picked = words
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| ui.suggestions.get(i).cloned());
                match picked {
                    Some(s) => vec![InputEvent::Pick(s)],
                    None => {
                        writeln!(out, "无效选择，请输入 1-{}", ui.suggestions.len())?;
                        continue;
                    }
                }
            }
            (true, Some("/nl")) => {
                editor.insert_char('\n');
                vec![InputEvent::TextChanged]
            }
            (true, Some("/back")) => {
                editor.backspace();
                vec![InputEvent::TextChanged]
            }
            (true, Some("/left")) => {
                editor.move_left();
                vec![InputEvent::TextChanged]
            }
            (true, Some("/right")) => {
                editor.move_right();
                vec![InputEvent::TextChanged]
            }
            (true, Some("/clear")) => {
                editor.clear();
                vec![InputEvent::TextChanged]
            }
            (true, Some(other)) => {
                writeln!(out, "未知命令：{other}（/help 查看帮助）")?;
                continue;
            }
            _ => {
                // 逐字符键入：每个字符都是一次 TextChanged
                for ch in input.chars() {
                    editor.insert_char(ch);
                    let (_ui, actions) = session.handle(&editor, InputEvent::TextChanged);
                    apply_actions(&actions, &mut editor, &mut popup);
                }
                Vec::new()
            }
        };

        for ev in events {
            let (_ui, actions) = session.handle(&editor, ev);
            apply_actions(&actions, &mut editor, &mut popup);
        }

        writeln!(out, "text: {}", editor.as_str())?;
        popup.render(&mut out)?;
    }

    Ok(())
}

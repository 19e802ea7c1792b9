//! 会话状态机的端到端场景：BufferSurface + 记录型弹窗

use std::collections::BTreeMap;

use shortcode_core::{
    detector::MarkerDetector,
    engine::Engine,
    key_event::{Action, InputEvent},
    model::{MarkerRect, Suggestion},
    session::Session,
    surface::{BufferSurface, SuggestionSurface, apply_actions},
};

#[derive(Debug, Default)]
struct RecordingPopup {
    visible: bool,
    items: Vec<Suggestion>,
    highlighted: Option<usize>,
    anchor: Option<MarkerRect>,
}

impl SuggestionSurface for RecordingPopup {
    fn show(&mut self, suggestions: &[Suggestion], highlighted: Option<usize>) {
        self.visible = true;
        self.items = suggestions.to_vec();
        self.highlighted = highlighted;
    }

    fn update_highlight(&mut self, index: usize) {
        self.highlighted = Some(index);
    }

    fn hide(&mut self) {
        self.visible = false;
        self.items.clear();
        self.highlighted = None;
    }

    fn position_near(&mut self, rect: MarkerRect) {
        self.anchor = Some(rect);
    }
}

fn catalog() -> BTreeMap<String, Vec<String>> {
    let mut m = BTreeMap::new();
    m.insert("smile".to_owned(), vec!["😄".to_owned()]);
    m.insert("smiley".to_owned(), vec!["😃".to_owned()]);
    m.insert("smirk".to_owned(), vec!["😏".to_owned()]);
    m.insert("heart".to_owned(), vec!["❤️".to_owned(), "💖".to_owned()]);
    m
}

struct Harness {
    session: Session<BTreeMap<String, Vec<String>>, MarkerDetector>,
    editor: BufferSurface,
    popup: RecordingPopup,
}

impl Harness {
    fn new() -> Self {
        Self {
            session: Session::new(Engine::new(catalog())),
            editor: BufferSurface::new(),
            popup: RecordingPopup::default(),
        }
    }

    fn send(&mut self, ev: InputEvent) -> Vec<Action> {
        let (_ui, actions) = self.session.handle(&self.editor, ev);
        apply_actions(&actions, &mut self.editor, &mut self.popup);
        actions
    }

    fn type_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.editor.insert_char(ch);
            self.send(InputEvent::TextChanged);
        }
    }
}

#[test]
fn typing_a_token_shows_suggestions() {
    let mut h = Harness::new();
    h.type_str("I love :");
    assert!(!h.session.is_typing());
    assert!(!h.popup.visible);

    h.type_str("sm");
    let ui = h.session.ui_state();
    assert_eq!(ui.partial_name.as_deref(), Some("sm"));
    assert_eq!(ui.suggestions.len(), 3);
    assert_eq!(ui.selected, Some(0));
    assert!(h.popup.visible);
    assert_eq!(h.popup.highlighted, Some(0));
    assert!(h.popup.anchor.is_some());
}

#[test]
fn navigation_clamps_without_wrapping() {
    let mut h = Harness::new();
    h.type_str(":sm");
    h.send(InputEvent::NavigateDown);
    h.send(InputEvent::NavigateDown);
    h.send(InputEvent::NavigateDown);
    assert_eq!(h.session.ui_state().selected, Some(2));
    assert_eq!(h.popup.highlighted, Some(2));
    h.send(InputEvent::NavigateUp);
    h.send(InputEvent::NavigateUp);
    h.send(InputEvent::NavigateUp);
    assert_eq!(h.session.ui_state().selected, Some(0));
}

#[test]
fn enter_replaces_the_token_with_the_highlighted_glyph() {
    let mut h = Harness::new();
    h.type_str("hi :smi");
    h.send(InputEvent::NavigateDown);
    let actions = h.send(InputEvent::Commit);
    assert_eq!(
        actions,
        vec![
            Action::Replace {
                start: 3,
                end: 7,
                replacement: "😃".to_owned(),
            },
            Action::Hide,
        ]
    );
    assert_eq!(h.editor.as_str(), "hi 😃");
    assert!(!h.session.is_typing());
    assert!(!h.popup.visible);

    // 宿主随后会再发一次 TextChanged：字形后面不再是 token
    h.send(InputEvent::TextChanged);
    assert!(!h.session.is_typing());
}

#[test]
fn click_commits_that_entry_regardless_of_highlight() {
    let mut h = Harness::new();
    h.type_str("x :he");
    assert_eq!(h.popup.items.len(), 2);
    h.send(InputEvent::Pick(Suggestion::new("💖", "heart")));
    assert_eq!(h.editor.as_str(), "x 💖");
}

#[test]
fn leaving_the_token_resets_selection() {
    let mut h = Harness::new();
    h.type_str(":sm");
    h.send(InputEvent::NavigateDown);
    h.send(InputEvent::NavigateDown);
    assert_eq!(h.session.ui_state().selected, Some(2));

    h.type_str(" ");
    let ui = h.session.ui_state();
    assert!(!ui.is_typing());
    assert!(ui.suggestions.is_empty());
    assert_eq!(ui.selected, None);
    assert!(!h.popup.visible);

    h.type_str(":smi");
    assert_eq!(h.session.ui_state().selected, Some(0));
}

#[test]
fn every_keystroke_refreshes_and_resets_highlight() {
    let mut h = Harness::new();
    h.type_str(":s");
    h.send(InputEvent::NavigateDown);
    h.type_str("m");
    assert_eq!(h.session.ui_state().selected, Some(0));
}

#[test]
fn keys_are_ignored_when_not_typing() {
    let mut h = Harness::new();
    h.type_str("plain text");
    assert!(h.send(InputEvent::NavigateDown).is_empty());
    assert!(h.send(InputEvent::NavigateUp).is_empty());
    assert!(h.send(InputEvent::Commit).is_empty());
    // 名称在目录里，但当前不在输入状态
    assert!(h.send(InputEvent::Pick(Suggestion::new("😄", "smile"))).is_empty());
    assert_eq!(h.editor.as_str(), "plain text");
    assert!(!h.popup.visible);
}

#[test]
fn unknown_prefix_shows_empty_list_and_enter_is_noop() {
    let mut h = Harness::new();
    h.type_str(":zz");
    let ui = h.session.ui_state();
    assert!(ui.is_typing());
    assert!(ui.suggestions.is_empty());
    assert_eq!(ui.selected, None);
    assert!(h.send(InputEvent::NavigateDown).is_empty());
    assert!(h.send(InputEvent::Commit).is_empty());
    assert_eq!(h.editor.as_str(), ":zz");
}

#[test]
fn backspace_to_the_marker_hides_the_popup() {
    let mut h = Harness::new();
    h.type_str(":s");
    assert!(h.popup.visible);
    h.editor.backspace();
    h.send(InputEvent::TextChanged);
    assert!(!h.popup.visible);
    assert!(!h.session.is_typing());
}

#[test]
fn focus_change_ends_the_session() {
    let mut h = Harness::new();
    h.type_str(":he");
    let actions = h.send(InputEvent::FocusChanged);
    assert_eq!(actions, vec![Action::Hide]);
    assert!(!h.session.is_typing());
}

#[test]
fn token_on_a_later_line() {
    let mut h = Harness::new();
    h.type_str("first line\n:hea");
    assert_eq!(h.session.ui_state().partial_name.as_deref(), Some("hea"));
    h.send(InputEvent::Commit);
    assert_eq!(h.editor.as_str(), "first line\n❤️");
}

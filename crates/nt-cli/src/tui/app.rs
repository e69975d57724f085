// crates/nt-cli/src/tui/app.rs - Interactive browser state machine
//
// The browser is always in exactly one mode, and each mode carries only the
// data it needs:
//
//   List                       highlighted row lives in `list_state`
//   View { note }              the opened note
//   Add  { stage, draft, input }  two-stage capture: title, then body
//   Edit { note, input }       body editor seeded from the opened note
//
// TRANSITIONS:
//   List --enter--> View            List --a--> Add(Title)
//   List --c--> List (toggle)       View --c--> View (toggle)
//   View --e--> Edit                View --d--> List (delete)
//   View --esc--> List
//   Add(Title) --enter--> Add(Body) Add(Title) --esc--> List
//   Add(Body) --ctrl+s--> List      Add(Body) --esc, body empty--> Add(Title)
//   Edit --ctrl+s--> View           Edit --esc--> View
//   Add/Edit --ctrl+x--> List/View (discard)
//
// `transition` is the single dispatch point: it maps (mode, action) to the
// next mode plus an optional storage effect. Effects are applied afterwards
// by `apply`, which always re-reads the full note list from the store. The
// list on screen is never patched from the mutation itself.
//
// Failed mutations do not stop the browser: they are logged, shown in the
// status line, and the refresh still runs so the screen reflects what is
// actually stored.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nt_core::config::DisplayConfig;
use nt_core::{Note, NoteId, NoteStore, StoreResult, title_from_body};
use ratatui::widgets::ListState;
use tracing::warn;
use tui_textarea::TextArea;

use super::input::{self, Action, InputContext};
use super::layout::Viewport;

/// Which half of a new note is being typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Title,
    Body,
}

/// Transient buffer for a note that has not been saved yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub body: String,
}

pub enum Mode {
    List,
    View {
        note: Note,
    },
    Add {
        stage: Stage,
        draft: Draft,
        input: TextArea<'static>,
    },
    Edit {
        note: Note,
        input: TextArea<'static>,
    },
}

/// Storage work requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Create { title: String, body: String },
    Update(Note),
    Delete(NoteId),
}

/// One-line message under the current screen, cleared by the next key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl Status {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Case-insensitive title filter for the list
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub query: String,
    pub typing: bool,
}

impl Filter {
    pub fn is_active(&self) -> bool {
        self.typing || !self.query.is_empty()
    }

    fn matches(&self, note: &Note) -> bool {
        self.query.is_empty() || note.title.to_lowercase().contains(&self.query.to_lowercase())
    }

    fn clear(&mut self) {
        self.query.clear();
        self.typing = false;
    }
}

pub struct App<'s> {
    store: &'s mut NoteStore,
    display: DisplayConfig,
    /// Every stored note, newest first
    notes: Vec<Note>,
    list_state: ListState,
    mode: Mode,
    filter: Filter,
    viewport: Viewport,
    status: Option<Status>,
    should_quit: bool,
}

impl<'s> App<'s> {
    /// Load the initial note list; a store that cannot be read is fatal here
    pub fn new(store: &'s mut NoteStore, display: DisplayConfig) -> StoreResult<Self> {
        let mut notes = store.list()?;
        sort_newest_first(&mut notes);

        let mut app = Self {
            store,
            display,
            notes,
            list_state: ListState::default(),
            mode: Mode::List,
            filter: Filter::default(),
            viewport: Viewport::default(),
            status: None,
            should_quit: false,
        };
        app.reselect(None);
        Ok(app)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Notes shown in the list, after the filter
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.notes.iter().filter(|n| self.filter.matches(n)).collect()
    }

    /// The row under the cursor in list mode
    pub fn highlighted(&self) -> Option<&Note> {
        let index = self.list_state.selected()?;
        self.visible_notes().get(index).copied()
    }

    /// Rendering needs the selection state and the mode at the same time
    pub fn render_parts(&mut self) -> (&Mode, &mut ListState) {
        (&self.mode, &mut self.list_state)
    }

    pub fn input_context(&self) -> InputContext {
        match &self.mode {
            Mode::List if self.filter.typing => InputContext::Filter,
            Mode::List => InputContext::List,
            Mode::View { .. } => InputContext::View,
            Mode::Add {
                stage: Stage::Title,
                ..
            } => InputContext::AddTitle,
            Mode::Add {
                stage: Stage::Body,
                ..
            } => InputContext::AddBody,
            Mode::Edit { .. } => InputContext::Edit,
        }
    }

    /// Feed one terminal event through the state machine
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(width, height) => self.viewport = Viewport::new(width, height),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;

        let action = input::map_key(self.input_context(), key);
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }

        let mode = std::mem::replace(&mut self.mode, Mode::List);
        let (next, effect) = self.transition(mode, action);
        self.mode = next;

        if let Some(effect) = effect {
            self.apply(effect);
        }
    }

    /// Map (mode, action) to the next mode and the storage work it needs
    fn transition(&mut self, mode: Mode, action: Action) -> (Mode, Option<Effect>) {
        match mode {
            Mode::List if self.filter.typing => {
                self.filter_key(action);
                (Mode::List, None)
            }

            Mode::List => match action {
                Action::Up => self.list_step(-1),
                Action::Down => self.list_step(1),
                Action::PageUp => self.list_step(-self.page_size()),
                Action::PageDown => self.list_step(self.page_size()),
                Action::Top => self.list_step(isize::MIN),
                Action::Bottom => self.list_step(isize::MAX),
                Action::Open => match self.highlighted() {
                    Some(note) => (Mode::View { note: note.clone() }, None),
                    None => (Mode::List, None),
                },
                Action::New => (new_add_mode(), None),
                Action::ToggleComplete => match self.highlighted() {
                    Some(note) => {
                        let mut toggled = note.clone();
                        toggled.toggle_completed();
                        (Mode::List, Some(Effect::Update(toggled)))
                    }
                    None => (Mode::List, None),
                },
                Action::StartFilter => {
                    self.filter.typing = true;
                    (Mode::List, None)
                }
                Action::Back => {
                    self.filter.clear();
                    self.reselect(None);
                    (Mode::List, None)
                }
                _ => (Mode::List, None),
            },

            Mode::View { note } => match action {
                Action::Edit => {
                    let input = body_input(&note.body);
                    (Mode::Edit { note, input }, None)
                }
                Action::Delete => (Mode::List, Some(Effect::Delete(note.id))),
                Action::ToggleComplete => {
                    let mut toggled = note;
                    toggled.toggle_completed();
                    (
                        Mode::View {
                            note: toggled.clone(),
                        },
                        Some(Effect::Update(toggled)),
                    )
                }
                Action::Back => (Mode::List, None),
                _ => (Mode::View { note }, None),
            },

            Mode::Add {
                stage: Stage::Title,
                mut draft,
                mut input,
            } => match action {
                Action::Confirm => {
                    draft.title = input.lines().join(" ");
                    let input = body_input(&draft.body);
                    (
                        Mode::Add {
                            stage: Stage::Body,
                            draft,
                            input,
                        },
                        None,
                    )
                }
                Action::Back | Action::Discard => (Mode::List, None),
                Action::Input(key) => {
                    input.input(key);
                    (
                        Mode::Add {
                            stage: Stage::Title,
                            draft,
                            input,
                        },
                        None,
                    )
                }
                _ => (
                    Mode::Add {
                        stage: Stage::Title,
                        draft,
                        input,
                    },
                    None,
                ),
            },

            Mode::Add {
                stage: Stage::Body,
                mut draft,
                mut input,
            } => match action {
                Action::Save => {
                    draft.body = input.lines().join("\n");
                    (Mode::List, finish_draft(draft))
                }
                Action::Back if input_is_empty(&input) => {
                    let input = title_input(&draft.title);
                    (
                        Mode::Add {
                            stage: Stage::Title,
                            draft,
                            input,
                        },
                        None,
                    )
                }
                Action::Back => {
                    self.status = Some(Status::info(
                        "Body is not empty: Ctrl+S saves, Ctrl+X discards",
                    ));
                    (
                        Mode::Add {
                            stage: Stage::Body,
                            draft,
                            input,
                        },
                        None,
                    )
                }
                Action::Discard => (Mode::List, None),
                Action::Input(key) => {
                    input.input(key);
                    (
                        Mode::Add {
                            stage: Stage::Body,
                            draft,
                            input,
                        },
                        None,
                    )
                }
                _ => (
                    Mode::Add {
                        stage: Stage::Body,
                        draft,
                        input,
                    },
                    None,
                ),
            },

            Mode::Edit { note, mut input } => match action {
                Action::Save => {
                    let mut edited = note.clone();
                    edited.body = input.lines().join("\n");
                    if edited.title.is_empty() {
                        edited.title = title_from_body(&edited.body);
                    }

                    if edited.is_blank() {
                        self.status = Some(Status::info("Note cannot be empty, nothing saved"));
                        (Mode::View { note }, None)
                    } else {
                        (
                            Mode::View {
                                note: edited.clone(),
                            },
                            Some(Effect::Update(edited)),
                        )
                    }
                }
                Action::Back | Action::Discard => (Mode::View { note }, None),
                Action::Input(key) => {
                    input.input(key);
                    (Mode::Edit { note, input }, None)
                }
                _ => (Mode::Edit { note, input }, None),
            },
        }
    }

    /// Perform a storage effect, then refresh from the store
    fn apply(&mut self, effect: Effect) {
        let mut focus = self.highlighted().map(|n| n.id);

        let outcome = match &effect {
            Effect::Create { title, body } => self.store.add(title, body).map(|note| {
                focus = Some(note.id);
                format!("Added note {}", note.id)
            }),
            Effect::Update(note) => self
                .store
                .update(note)
                .map(|saved| format!("Saved note {}", saved.id)),
            Effect::Delete(id) => self
                .store
                .delete(*id)
                .map(|_| format!("Deleted note {id}")),
        };

        match outcome {
            Ok(message) => self.status = Some(Status::info(message)),
            Err(err) => {
                warn!(?effect, error = %err, "note mutation failed");
                self.status = Some(Status::error(err.to_string()));
            }
        }

        self.refresh(focus);
    }

    /// Re-read every note from the store and resync what is on screen
    fn refresh(&mut self, focus: Option<NoteId>) {
        match self.store.list() {
            Ok(mut notes) => {
                sort_newest_first(&mut notes);
                self.notes = notes;
            }
            Err(err) => {
                warn!(error = %err, "failed to refresh note list");
                self.status = Some(Status::error(format!("Refresh failed: {err}")));
            }
        }

        // An opened note shows the stored version, or closes if it is gone
        if let Mode::View { note } = &self.mode {
            let id = note.id;
            self.mode = match self.notes.iter().find(|n| n.id == id) {
                Some(fresh) => Mode::View {
                    note: fresh.clone(),
                },
                None => Mode::List,
            };
        }

        self.reselect(focus);
    }

    /// Keep the cursor on `focus` if visible, otherwise clamp it
    fn reselect(&mut self, focus: Option<NoteId>) {
        let visible: Vec<NoteId> = self.visible_notes().iter().map(|n| n.id).collect();
        if visible.is_empty() {
            self.list_state.select(None);
            return;
        }

        let index = focus
            .and_then(|id| visible.iter().position(|v| *v == id))
            .unwrap_or_else(|| {
                self.list_state
                    .selected()
                    .unwrap_or(0)
                    .min(visible.len() - 1)
            });
        self.list_state.select(Some(index));
    }

    fn list_step(&mut self, delta: isize) -> (Mode, Option<Effect>) {
        let len = self.visible_notes().len();
        if len > 0 {
            let current = self.list_state.selected().unwrap_or(0) as isize;
            let target = current.saturating_add(delta).clamp(0, len as isize - 1);
            self.list_state.select(Some(target as usize));
        }
        (Mode::List, None)
    }

    fn page_size(&self) -> isize {
        (self.viewport.list_rows() as isize).max(1)
    }

    fn filter_key(&mut self, action: Action) {
        match action {
            Action::Confirm => self.filter.typing = false,
            Action::Back => self.filter.clear(),
            Action::Up => {
                self.list_step(-1);
                return;
            }
            Action::Down => {
                self.list_step(1);
                return;
            }
            Action::Input(KeyEvent {
                code: KeyCode::Backspace,
                ..
            }) => {
                self.filter.query.pop();
            }
            Action::Input(KeyEvent {
                code: KeyCode::Char(c),
                modifiers,
                ..
            }) if !modifiers.contains(KeyModifiers::CONTROL) => self.filter.query.push(c),
            _ => return,
        }
        self.list_state.select(Some(0));
        self.reselect(None);
    }
}

fn new_add_mode() -> Mode {
    Mode::Add {
        stage: Stage::Title,
        draft: Draft::default(),
        input: title_input(""),
    }
}

/// Decide what a finished draft turns into
///
/// An empty title is taken from the body's first line. A draft with no
/// visible text at all is dropped without creating anything.
fn finish_draft(mut draft: Draft) -> Option<Effect> {
    if draft.title.is_empty() {
        draft.title = title_from_body(&draft.body);
    }

    if draft.title.trim().is_empty() && draft.body.trim().is_empty() {
        return None;
    }

    Some(Effect::Create {
        title: draft.title,
        body: draft.body,
    })
}

fn title_input(text: &str) -> TextArea<'static> {
    let mut input = TextArea::from([text.to_string()]);
    input.set_placeholder_text("Title");
    input.set_cursor_line_style(ratatui::style::Style::default());
    input.move_cursor(tui_textarea::CursorMove::End);
    input
}

fn body_input(text: &str) -> TextArea<'static> {
    let mut input = TextArea::from(text.split('\n').map(str::to_string));
    input.set_placeholder_text("Body (multiline). Enter inserts a newline, Ctrl+S saves.");
    input.set_cursor_line_style(ratatui::style::Style::default());
    input.move_cursor(tui_textarea::CursorMove::Bottom);
    input.move_cursor(tui_textarea::CursorMove::End);
    input
}

fn input_is_empty(input: &TextArea<'_>) -> bool {
    input.lines().iter().all(|line| line.is_empty())
}

fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

//! Input modes and key dispatch.
//!
//! The event loop hands every key press to [`App::handle_key`], which maps it
//! to a `Dashboard` action depending on the current mode. Controller futures
//! run to completion on the shared runtime before the next frame, so each
//! action's reload lands before the UI re-renders.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::runtime::Runtime;
use tutodash_core::controller::{Answer, CREATE_TITLE_REQUIRED, UPDATE_TITLE_REQUIRED};
use tutodash_core::{Dashboard, TutorialDraft};

/// Which line of a form the keyboard is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Published,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Published,
            FormField::Published => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Published,
            FormField::Description => FormField::Title,
            FormField::Published => FormField::Description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// List navigation and single-key commands.
    Browse,
    /// Typing into the search input.
    Search,
    /// Editing the create buffer.
    Create(FormField),
    /// Editing the edit buffer of the selected tutorial.
    Edit(FormField),
    ConfirmDelete,
    ConfirmDeleteAll,
}

pub struct App {
    pub dashboard: Dashboard,
    pub mode: Mode,
    /// List row under the cursor; independent of the controller's selection.
    pub cursor: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            mode: Mode::Browse,
            cursor: 0,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, rt: &Runtime, key: KeyEvent) {
        match self.mode {
            Mode::Browse => self.handle_browse(rt, key.code),
            Mode::Search => self.handle_search(rt, key.code),
            Mode::Create(field) => self.handle_form(rt, key.code, field, true),
            Mode::Edit(field) => self.handle_form(rt, key.code, field, false),
            Mode::ConfirmDelete => self.handle_confirm(rt, key.code, false),
            Mode::ConfirmDeleteAll => self.handle_confirm(rt, key.code, true),
        }
        self.clamp_cursor();
    }

    fn handle_browse(&mut self, rt: &Runtime, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.dashboard.tutorials.len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
            KeyCode::Enter => {
                if let Some(id) = self.dashboard.tutorials.get(self.cursor).map(|t| t.id) {
                    self.dashboard.select(id);
                }
            }
            KeyCode::Esc => self.dashboard.clear_selection(),
            KeyCode::Char('/') => {
                if self.dashboard.search_enabled() {
                    self.mode = Mode::Search;
                }
            }
            KeyCode::Char('p') => {
                let on = !self.dashboard.show_published_only;
                rt.block_on(self.dashboard.set_published_only(on));
            }
            KeyCode::Char('x') => rt.block_on(self.dashboard.clear_filters()),
            KeyCode::Char('r') => {
                if !self.dashboard.loading {
                    rt.block_on(self.dashboard.refresh());
                }
            }
            KeyCode::Char('c') => self.mode = Mode::Create(FormField::Title),
            KeyCode::Char('e') => {
                if self.dashboard.selected_id.is_some() {
                    self.mode = Mode::Edit(FormField::Title);
                }
            }
            KeyCode::Char('d') => {
                if self.dashboard.selected_id.is_some() {
                    self.mode = Mode::ConfirmDelete;
                }
            }
            KeyCode::Char('D') => {
                if !self.dashboard.tutorials.is_empty() {
                    self.mode = Mode::ConfirmDeleteAll;
                }
            }
            _ => {}
        }
    }

    fn handle_search(&mut self, rt: &Runtime, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.dashboard.search_term.push(c),
            KeyCode::Backspace => {
                self.dashboard.search_term.pop();
            }
            KeyCode::Enter => {
                rt.block_on(self.dashboard.submit_search());
                self.mode = Mode::Browse;
            }
            KeyCode::Esc => self.mode = Mode::Browse,
            _ => {}
        }
    }

    fn handle_form(&mut self, rt: &Runtime, code: KeyCode, field: FormField, creating: bool) {
        match code {
            KeyCode::Tab => self.set_field(field.next(), creating),
            KeyCode::BackTab => self.set_field(field.prev(), creating),
            KeyCode::Esc => {
                if !creating {
                    self.dashboard.clear_selection();
                }
                self.mode = Mode::Browse;
            }
            KeyCode::Enter => {
                if creating {
                    rt.block_on(self.dashboard.create());
                } else {
                    rt.block_on(self.dashboard.update());
                }
                // Only a validation error keeps the form open for correction;
                // anything else (including a failed follow-up reload after the
                // mutation landed) is surfaced in the feedback line instead.
                if !is_validation_error(self.dashboard.error.as_deref()) {
                    self.mode = Mode::Browse;
                }
            }
            KeyCode::Char(' ') if field == FormField::Published => {
                let form = self.form_mut(creating);
                form.published = !form.published;
            }
            KeyCode::Char(c) => match field {
                FormField::Title => self.form_mut(creating).title.push(c),
                FormField::Description => self.form_mut(creating).description.push(c),
                FormField::Published => {}
            },
            KeyCode::Backspace => match field {
                FormField::Title => {
                    self.form_mut(creating).title.pop();
                }
                FormField::Description => {
                    self.form_mut(creating).description.pop();
                }
                FormField::Published => {}
            },
            _ => {}
        }
    }

    fn handle_confirm(&mut self, rt: &Runtime, code: KeyCode, all: bool) {
        let answer = match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
            _ => None,
        };
        // The answer passes through the controller's Confirm capability, so a
        // decline still exercises the same silent-abort path as in tests.
        if let Some(answer) = answer {
            if all {
                rt.block_on(self.dashboard.delete_all(&Answer(answer)));
            } else {
                rt.block_on(self.dashboard.delete(&Answer(answer)));
            }
            self.mode = Mode::Browse;
        }
    }

    fn set_field(&mut self, field: FormField, creating: bool) {
        self.mode = if creating {
            Mode::Create(field)
        } else {
            Mode::Edit(field)
        };
    }

    fn form_mut(&mut self, creating: bool) -> &mut TutorialDraft {
        if creating {
            &mut self.dashboard.create_form
        } else {
            &mut self.dashboard.edit_form
        }
    }

    fn clamp_cursor(&mut self) {
        let last = self.dashboard.tutorials.len().saturating_sub(1);
        self.cursor = self.cursor.min(last);
    }
}

/// True for the client-side title-required errors, which never fire a
/// request. Server-side failures close the form; the buffer is retained
/// either way.
fn is_validation_error(error: Option<&str>) -> bool {
    matches!(error, Some(e) if e == CREATE_TITLE_REQUIRED || e == UPDATE_TITLE_REQUIRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_title_required_errors_count_as_validation() {
        assert!(is_validation_error(Some(CREATE_TITLE_REQUIRED)));
        assert!(is_validation_error(Some(UPDATE_TITLE_REQUIRED)));
        assert!(!is_validation_error(Some("backend down")));
        assert!(!is_validation_error(None));
    }

    #[test]
    fn form_fields_cycle_both_ways() {
        assert_eq!(FormField::Title.next(), FormField::Description);
        assert_eq!(FormField::Published.next(), FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Published);
        assert_eq!(FormField::Description.prev(), FormField::Title);
    }
}

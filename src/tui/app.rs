use crate::todo::controller::{EventError, TodoController};
use crate::todo::models::{self, EditSession, Item};
use crate::todo::store::Change;
use crate::tui::handlers::{HelpModeAction, InputModeAction, KeyHandler, ListModeAction};
use anyhow::Result;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

pub struct App {
    pub controller: TodoController,
    pub focus: Focus,
    pub selected_index: usize,
    pub should_quit: bool,
    pub help_mode: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(controller: TodoController) -> Self {
        let status_message = controller.load_warning().map(str::to_string);
        Self {
            controller,
            focus: Focus::Input,
            selected_index: 0,
            should_quit: false,
            help_mode: false,
            status_message,
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if self.help_mode {
            self.handle_help_mode_key(key_event);
        } else {
            match self.focus {
                Focus::Input => self.handle_input_mode_key(key_event),
                Focus::List => self.handle_list_mode_key(key_event),
            }
        }
        Ok(())
    }

    fn handle_help_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_help_mode_key(key_event) {
            HelpModeAction::ExitHelpMode => self.help_mode = false,
            HelpModeAction::None => {}
        }
    }

    fn handle_input_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_input_mode_key(key_event) {
            InputModeAction::Quit => self.should_quit = true,
            InputModeAction::Submit => self.submit_with_enter(),
            InputModeAction::Cancel => {
                if self.is_editing() {
                    self.cancel_edit();
                } else {
                    self.focus = Focus::List;
                }
            }
            InputModeAction::FocusList => self.focus = Focus::List,
            InputModeAction::Backspace => {
                let mut title = self.draft().title.clone();
                title.pop();
                self.set_draft_title(title);
            }
            InputModeAction::InsertChar(c) => {
                let mut title = self.draft().title.clone();
                title.push(c);
                self.set_draft_title(title);
            }
            InputModeAction::None => {}
        }
    }

    fn handle_list_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_list_mode_key(key_event) {
            ListModeAction::Quit => self.should_quit = true,
            ListModeAction::CancelEdit => {
                if self.is_editing() {
                    self.cancel_edit();
                }
            }
            ListModeAction::MoveSelectionUp => self.move_selection_up(),
            ListModeAction::MoveSelectionDown => self.move_selection_down(),
            ListModeAction::ToggleChecked => self.toggle_selected_item(),
            ListModeAction::EditItem => self.edit_selected_item(),
            ListModeAction::DeleteItem => self.delete_selected_item(),
            ListModeAction::FocusInput => self.focus = Focus::Input,
            ListModeAction::ToggleHelpMode => self.help_mode = true,
            ListModeAction::None => {}
        }
    }

    pub fn items(&self) -> &[Item] {
        self.controller.items()
    }

    pub fn draft(&self) -> &Item {
        self.controller.store().draft()
    }

    pub fn is_editing(&self) -> bool {
        self.controller.session().is_editing()
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.controller.session().index()
    }

    pub fn total_items(&self) -> usize {
        self.controller.store().len()
    }

    pub fn completed_items(&self) -> usize {
        models::completed_items(self.items())
    }

    fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.items().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.items().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    fn set_draft_title(&mut self, title: String) {
        let result = self.controller.on_title_input(title);
        self.report(result);
    }

    fn submit_with_enter(&mut self) {
        let result = self.controller.on_enter_key_pressed();
        let applied = match &result {
            Ok(change) => Some(*change),
            Err(e) => e.applied_change(),
        };
        match applied {
            Some(Change::ItemAdded) => self.selected_index = 0,
            Some(Change::ItemUpdated(index)) => self.selected_index = index,
            _ => {}
        }
        self.report(result);
    }

    fn cancel_edit(&mut self) {
        let result = self.controller.on_cancel_requested();
        self.report(result);
    }

    fn toggle_selected_item(&mut self) {
        let result = self.controller.on_checkbox_toggled(self.selected_index);
        self.report(result);
    }

    fn edit_selected_item(&mut self) {
        let result = self.controller.on_edit_requested(self.selected_index);
        if result.is_ok() {
            self.focus = Focus::Input;
        }
        self.report(result);
    }

    fn delete_selected_item(&mut self) {
        let result = self.controller.on_delete_requested(self.selected_index);
        self.clamp_selection();
        self.report(result);
    }

    fn report(&mut self, result: Result<Change, EventError>) {
        match result {
            Ok(Change::DraftEdited) => {}
            Ok(_) => self.status_message = None,
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    pub fn input_title(&self) -> String {
        match self.controller.session() {
            EditSession::Editing(index) => format!("Edit #{}", index + 1),
            EditSession::Idle => "Add".to_string(),
        }
    }
}

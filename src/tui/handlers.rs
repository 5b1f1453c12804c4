use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    pub fn handle_list_mode_key(key_event: KeyEvent) -> ListModeAction {
        if is_ctrl_c(&key_event) {
            return ListModeAction::Quit;
        }

        match key_event.code {
            KeyCode::Char('q') => ListModeAction::Quit,
            KeyCode::Esc => ListModeAction::CancelEdit,
            KeyCode::Up | KeyCode::Char('k') => ListModeAction::MoveSelectionUp,
            KeyCode::Down | KeyCode::Char('j') => ListModeAction::MoveSelectionDown,
            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
                ListModeAction::ToggleChecked
            }
            KeyCode::Char('e') => ListModeAction::EditItem,
            KeyCode::Char('d') | KeyCode::Delete => ListModeAction::DeleteItem,
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => ListModeAction::FocusInput,
            KeyCode::Char('?') => ListModeAction::ToggleHelpMode,
            _ => ListModeAction::None,
        }
    }

    pub fn handle_input_mode_key(key_event: KeyEvent) -> InputModeAction {
        if is_ctrl_c(&key_event) {
            return InputModeAction::Quit;
        }

        match key_event.code {
            KeyCode::Enter => InputModeAction::Submit,
            KeyCode::Esc => InputModeAction::Cancel,
            KeyCode::Tab => InputModeAction::FocusList,
            KeyCode::Backspace => InputModeAction::Backspace,
            KeyCode::Char(c) => InputModeAction::InsertChar(c),
            _ => InputModeAction::None,
        }
    }

    pub fn handle_help_mode_key(key_event: KeyEvent) -> HelpModeAction {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
                HelpModeAction::ExitHelpMode
            }
            _ => HelpModeAction::None,
        }
    }
}

fn is_ctrl_c(key_event: &KeyEvent) -> bool {
    key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
}

#[derive(Debug, PartialEq)]
pub enum ListModeAction {
    None,
    Quit,
    CancelEdit,
    MoveSelectionUp,
    MoveSelectionDown,
    ToggleChecked,
    EditItem,
    DeleteItem,
    FocusInput,
    ToggleHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum InputModeAction {
    None,
    Quit,
    Submit,
    Cancel,
    FocusList,
    Backspace,
    InsertChar(char),
}

#[derive(Debug, PartialEq)]
pub enum HelpModeAction {
    None,
    ExitHelpMode,
}

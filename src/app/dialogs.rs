use super::text_edit::InputField;
use super::*;
use crate::ui::components::{help_row_count, InputPurpose};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl App {
    /// 다이얼로그 모드 키 처리
    pub fn handle_dialog_key(&mut self, key: KeyEvent) {
        let Some(dialog) = &self.dialog else {
            return;
        };

        if dialog.is_informational() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.close_dialog();
            }
            return;
        }

        match dialog {
            DialogKind::Input { .. } => self.handle_input_key(key),
            DialogKind::Confirm { .. } => self.handle_confirm_key(key),
            DialogKind::Help { .. } => self.handle_help_key(key),
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Enter) => {
                let Some(DialogKind::Input {
                    value,
                    selected_button,
                    purpose,
                    ..
                }) = &self.dialog
                else {
                    return;
                };
                if *selected_button == 0 {
                    let (value, purpose) = (value.clone(), *purpose);
                    self.confirm_input(purpose, &value);
                } else {
                    self.cancel_dialog();
                }
            }
            (_, KeyCode::Esc) => self.cancel_dialog(),
            (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                self.toggle_dialog_button();
            }
            _ => {
                if let Some(DialogKind::Input {
                    value, cursor_pos, ..
                }) = &mut self.dialog
                {
                    InputField::new(value, cursor_pos).apply_key(key);
                }
            }
        }
    }

    /// 입력 확정: 목적별로 다음 단계로
    pub(crate) fn confirm_input(&mut self, purpose: InputPurpose, value: &str) {
        match purpose {
            InputPurpose::Destination => self.confirm_destination(value),
            InputPurpose::TargetName => self.confirm_target_name(value),
            InputPurpose::FolderName => self.confirm_folder_name(value),
            InputPurpose::Search => self.run_search(value),
            InputPurpose::GoToPath => {
                self.dialog = None;
                self.go_to_path(value);
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.toggle_dialog_button();
            }
            KeyCode::Char('y') => self.confirm_dialog_accepted(),
            KeyCode::Char('n') | KeyCode::Esc => self.cancel_dialog(),
            KeyCode::Enter => {
                let accepted = matches!(
                    self.dialog,
                    Some(DialogKind::Confirm {
                        selected_button: 0,
                        ..
                    })
                );
                if accepted {
                    self.confirm_dialog_accepted();
                } else {
                    self.cancel_dialog();
                }
            }
            _ => {}
        }
    }

    /// OK/Cancel 버튼 전환
    fn toggle_dialog_button(&mut self) {
        if let Some(
            DialogKind::Input {
                selected_button, ..
            }
            | DialogKind::Confirm {
                selected_button, ..
            },
        ) = &mut self.dialog
        {
            *selected_button = 1 - *selected_button;
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        let max_scroll = help_row_count().saturating_sub(1);
        let Some(DialogKind::Help { scroll_offset }) = &mut self.dialog else {
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.close_dialog();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                *scroll_offset = (*scroll_offset + 1).min(max_scroll);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                *scroll_offset = scroll_offset.saturating_sub(1);
            }
            _ => {}
        }
    }
}

//! 한 줄 입력 편집
//!
//! 커서는 바이트 인덱스이며 항상 문자 경계에 놓인다.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 입력 다이얼로그의 값/커서를 빌려서 편집
pub(super) struct InputField<'a> {
    value: &'a mut String,
    cursor: &'a mut usize,
}

impl<'a> InputField<'a> {
    pub(super) fn new(value: &'a mut String, cursor: &'a mut usize) -> Self {
        // 외부에서 잘못된 위치가 들어와도 경계로 맞춘다
        if *cursor > value.len() || !value.is_char_boundary(*cursor) {
            *cursor = value.len();
        }
        Self { value, cursor }
    }

    /// 편집 키 처리. 값이나 커서를 다루는 키였으면 true.
    pub(super) fn apply_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => self.delete_prev_word(),
            (KeyModifiers::CONTROL, KeyCode::Char('a')) => self.home(),
            (KeyModifiers::CONTROL, KeyCode::Char('e')) => self.end(),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => self.clear(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => self.insert_char(c),
            (_, KeyCode::Backspace) => self.backspace(),
            (_, KeyCode::Delete) => self.delete(),
            (_, KeyCode::Left) => self.left(),
            (_, KeyCode::Right) => self.right(),
            (_, KeyCode::Home) => self.home(),
            (_, KeyCode::End) => self.end(),
            _ => return false,
        }
        true
    }

    pub(super) fn insert_char(&mut self, c: char) {
        self.value.insert(*self.cursor, c);
        *self.cursor += c.len_utf8();
    }

    pub(super) fn backspace(&mut self) {
        if *self.cursor == 0 {
            return;
        }
        let prev = prev_char_start(self.value, *self.cursor);
        self.value.remove(prev);
        *self.cursor = prev;
    }

    pub(super) fn delete(&mut self) {
        if *self.cursor < self.value.len() {
            self.value.remove(*self.cursor);
        }
    }

    pub(super) fn left(&mut self) {
        *self.cursor = prev_char_start(self.value, *self.cursor);
    }

    pub(super) fn right(&mut self) {
        if let Some(c) = self.value[*self.cursor..].chars().next() {
            *self.cursor += c.len_utf8();
        }
    }

    pub(super) fn home(&mut self) {
        *self.cursor = 0;
    }

    pub(super) fn end(&mut self) {
        *self.cursor = self.value.len();
    }

    pub(super) fn clear(&mut self) {
        self.value.clear();
        *self.cursor = 0;
    }

    /// 커서 앞 단어 삭제 (경로 구분자에서 멈춤)
    pub(super) fn delete_prev_word(&mut self) {
        let end = *self.cursor;
        let before = &self.value[..end];

        let trimmed = before.trim_end_matches(is_word_delimiter);
        let start = trimmed
            .char_indices()
            .rev()
            .find(|&(_, ch)| is_word_delimiter(ch))
            .map(|(i, ch)| i + ch.len_utf8())
            .unwrap_or(0);

        self.value.replace_range(start..end, "");
        *self.cursor = start;
    }
}

fn prev_char_start(value: &str, cursor: usize) -> usize {
    value[..cursor]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn is_word_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '/' | '\\' | '.' | '-' | '_' | ':' | ',')
}

#[cfg(test)]
mod tests {
    use super::InputField;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_insert_and_backspace_on_multibyte_text() {
        let mut value = "문서".to_string();
        let mut cursor = "문".len();
        let mut field = InputField::new(&mut value, &mut cursor);

        field.insert_char('x');
        field.backspace();
        field.backspace();

        assert_eq!(value, "서");
        assert_eq!(cursor, 0);
    }

    #[test]
    fn test_cursor_movement_stays_on_char_boundaries() {
        let mut value = "a한b".to_string();
        let mut cursor = value.len();
        let mut field = InputField::new(&mut value, &mut cursor);

        field.left();
        field.left();
        field.right();
        assert_eq!(*field.cursor, "a한".len());

        field.home();
        field.left();
        assert_eq!(*field.cursor, 0);

        field.end();
        field.right();
        assert_eq!(*field.cursor, "a한b".len());
    }

    #[test]
    fn test_delete_prev_word_stops_at_separator() {
        let mut value = "/home/user/report draft".to_string();
        let mut cursor = value.len();
        let mut field = InputField::new(&mut value, &mut cursor);

        field.delete_prev_word();
        assert_eq!(*field.value, "/home/user/report ");

        field.delete_prev_word();
        assert_eq!(*field.value, "/home/user/");
        assert_eq!(*field.cursor, "/home/user/".len());
    }

    #[test]
    fn test_invalid_cursor_is_clamped() {
        let mut value = "é".to_string();
        let mut cursor = 1;
        InputField::new(&mut value, &mut cursor);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_apply_key_reports_unhandled_keys() {
        let mut value = String::new();
        let mut cursor = 0;
        let mut field = InputField::new(&mut value, &mut cursor);

        assert!(field.apply_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)));
        assert!(field.apply_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)));
        assert!(!field.apply_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
        assert!(!field.apply_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert_eq!(value, "");
    }
}

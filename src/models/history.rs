use crate::utils::error::{DirscopeError, Result};
use std::path::{Path, PathBuf};

/// 뒤로/앞으로 탐색 기록
///
/// `back`/`forward`의 마지막 원소가 스택 top입니다.
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    back: Vec<PathBuf>,
    forward: Vec<PathBuf>,
    current: PathBuf,
    /// back 스택 최대 길이 (0이면 무제한)
    limit: usize,
}

impl NavigationHistory {
    pub fn new(initial: PathBuf, limit: usize) -> Self {
        Self {
            back: Vec::new(),
            forward: Vec::new(),
            current: initial,
            limit,
        }
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    /// 새 디렉토리로 이동 기록
    ///
    /// 현재와 같은 경로면 아무것도 하지 않는다.
    pub fn navigate_to(&mut self, path: PathBuf) {
        if path == self.current {
            return;
        }

        let previous = std::mem::replace(&mut self.current, path);
        self.push_back(previous);
        self.forward.clear();
    }

    /// 뒤로 가기
    ///
    /// 현재가 back top과 같으면 forward에 쌓지 않는다.
    pub fn go_back(&mut self) -> Result<&Path> {
        let Some(top) = self.back.last() else {
            return Err(DirscopeError::EmptyHistory);
        };

        if *top != self.current {
            self.forward.push(self.current.clone());
        }
        if let Some(target) = self.back.pop() {
            self.current = target;
        }
        Ok(&self.current)
    }

    /// 앞으로 가기
    ///
    /// 꺼낸 경로가 현재와 다를 때만 현재를 back에 쌓고 forward를 비운다.
    pub fn go_forward(&mut self) -> Result<&Path> {
        let Some(target) = self.forward.pop() else {
            return Err(DirscopeError::EmptyHistory);
        };

        if target != self.current {
            let previous = std::mem::replace(&mut self.current, target);
            self.push_back(previous);
            self.forward.clear();
        }
        Ok(&self.current)
    }

    /// 기록 없이 현재 위치만 교체 (삭제/이동으로 현재 디렉토리가 사라진 경우)
    pub fn replace_current(&mut self, path: PathBuf) {
        self.current = path;
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    fn push_back(&mut self, path: PathBuf) {
        self.back.push(path);
        if self.limit > 0 && self.back.len() > self.limit {
            let overflow = self.back.len() - self.limit;
            self.back.drain(..overflow);
        }
    }
}

#[cfg(test)]
impl NavigationHistory {
    pub fn back_entries(&self) -> &[PathBuf] {
        &self.back
    }

    pub fn forward_entries(&self) -> &[PathBuf] {
        &self.forward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn test_navigate_clears_forward() {
        let mut history = NavigationHistory::new(p("/a"), 0);
        history.navigate_to(p("/b"));
        history.go_back().unwrap();
        assert!(history.can_go_forward());

        history.navigate_to(p("/c"));
        assert!(!history.can_go_forward());
        assert_eq!(history.back_entries(), &[p("/a")]);
    }

    #[test]
    fn test_navigate_same_path_is_noop() {
        let mut history = NavigationHistory::new(p("/a"), 0);
        history.navigate_to(p("/a"));
        assert!(!history.can_go_back());
        assert_eq!(history.current(), Path::new("/a"));
    }

    #[test]
    fn test_back_then_forward_round_trip() {
        let mut history = NavigationHistory::new(p("/a"), 0);
        history.navigate_to(p("/b"));

        assert_eq!(history.go_back().unwrap(), Path::new("/a"));
        assert_eq!(history.forward_entries(), &[p("/b")]);

        assert_eq!(history.go_forward().unwrap(), Path::new("/b"));
        assert_eq!(history.back_entries(), &[p("/a")]);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_go_back_empty_keeps_current() {
        let mut history = NavigationHistory::new(p("/a"), 0);
        assert!(matches!(history.go_back(), Err(DirscopeError::EmptyHistory)));
        assert_eq!(history.current(), Path::new("/a"));
    }

    #[test]
    fn test_go_forward_empty() {
        let mut history = NavigationHistory::new(p("/a"), 0);
        history.navigate_to(p("/b"));
        assert!(matches!(
            history.go_forward(),
            Err(DirscopeError::EmptyHistory)
        ));
        assert_eq!(history.current(), Path::new("/b"));
    }

    #[test]
    fn test_back_skips_forward_push_when_current_on_back_top() {
        let mut history = NavigationHistory::new(p("/b"), 0);
        history.navigate_to(p("/a"));
        history.navigate_to(p("/b"));
        history.replace_current(p("/a"));

        // back = [/b, /a], current = /a → /a는 forward에 쌓지 않음
        assert_eq!(history.go_back().unwrap(), Path::new("/a"));
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_forward_to_current_path_does_not_duplicate() {
        let mut history = NavigationHistory::new(p("/a"), 0);
        history.navigate_to(p("/b"));
        history.go_back().unwrap();
        history.replace_current(p("/b"));

        assert_eq!(history.go_forward().unwrap(), Path::new("/b"));
        assert_eq!(history.back_entries(), &[] as &[PathBuf]);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = NavigationHistory::new(p("/0"), 2);
        history.navigate_to(p("/1"));
        history.navigate_to(p("/2"));
        history.navigate_to(p("/3"));

        assert_eq!(history.back_entries(), &[p("/1"), p("/2")]);
    }
}

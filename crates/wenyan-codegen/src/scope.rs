//! Two-tier scope: a chain of block frames plus the module's public names.

use crate::names::mangle;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// One block: its bindings and its pending answers.
#[derive(Debug, Default)]
struct Frame {
    bindings: FxHashMap<SmolStr, String>,
    answers: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct Scope {
    frames: Vec<Frame>,
    public: FxHashMap<SmolStr, String>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
            public: FxHashMap::default(),
        }
    }

    pub fn push(&mut self) {
        self.frames.push(Frame::default());
    }

    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    fn frame(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// The generated name for `name`, innermost frame first.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.bindings.get(name))
            .or_else(|| self.public.get(name))
            .map(String::as_str)
    }

    /// Bind a private name in the current frame. Returns the generated name
    /// and whether it is new to this frame.
    pub fn bind(&mut self, name: &SmolStr) -> (String, bool) {
        let frame = self.frame();
        if let Some(existing) = frame.bindings.get(name) {
            return (existing.clone(), false);
        }
        let binding = mangle(name);
        frame.bindings.insert(name.clone(), binding.clone());
        (binding, true)
    }

    /// Bind a module-level public name.
    pub fn bind_public(&mut self, name: &SmolStr) -> String {
        let target = format!("__public__.{}", mangle(name));
        for frame in &mut self.frames {
            frame.bindings.remove(name);
        }
        self.public.insert(name.clone(), target.clone());
        target
    }

    pub fn push_answer(&mut self, temp: String) {
        self.frame().answers.push(temp);
    }

    /// The `offset`-th pending answer from the top, or the number pending.
    pub fn answer(&self, offset: usize) -> Result<&str, usize> {
        let answers = &self.frames[self.frames.len() - 1].answers;
        answers
            .len()
            .checked_sub(offset + 1)
            .map(|index| answers[index].as_str())
            .ok_or(answers.len())
    }

    /// Drop the `count` most recent answers.
    pub fn consume_answers(&mut self, count: usize) {
        let answers = &mut self.frame().answers;
        let keep = answers.len().saturating_sub(count);
        answers.truncate(keep);
    }

    /// Take every pending answer, oldest first.
    pub fn take_answers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.frame().answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_frames_shadow() {
        let mut scope = Scope::new();
        assert_eq!(scope.bind(&"甲".into()), ("甲".to_string(), true));
        assert_eq!(scope.bind(&"甲".into()), ("甲".to_string(), false));
        scope.push();
        assert_eq!(scope.resolve("甲"), Some("甲"));
        assert!(scope.bind(&"甲".into()).1);
        scope.pop();
        assert_eq!(scope.resolve("乙"), None);
    }

    #[test]
    fn test_public_names_outlive_frames() {
        let mut scope = Scope::new();
        scope.push();
        assert_eq!(scope.bind_public(&"甲".into()), "__public__.甲");
        scope.pop();
        assert_eq!(scope.resolve("甲"), Some("__public__.甲"));
    }

    #[test]
    fn test_answers_are_per_frame() {
        let mut scope = Scope::new();
        scope.push_answer("$ans0".into());
        scope.push_answer("$ans1".into());
        assert_eq!(scope.answer(0), Ok("$ans1"));
        assert_eq!(scope.answer(1), Ok("$ans0"));
        assert_eq!(scope.answer(2), Err(2));

        scope.push();
        assert_eq!(scope.answer(0), Err(0));
        scope.pop();

        scope.consume_answers(1);
        assert_eq!(scope.take_answers(), vec!["$ans0".to_string()]);
        assert_eq!(scope.answer(0), Err(0));
    }
}

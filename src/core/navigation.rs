//! LIFO navigation stack.
//!
//! The stack owns its entries: popping hands the screen back to the caller,
//! and once that value is dropped its local state is gone.

#[derive(Debug)]
pub struct NavStack<T> {
    entries: Vec<T>,
}

impl<T> Default for NavStack<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> NavStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
    }

    /// Remove and return the top entry, revealing the one beneath it.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop()
    }

    pub fn top(&self) -> Option<&T> {
        self.entries.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.entries.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry (back to the root view).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_is_lifo() {
        let mut nav = NavStack::new();
        nav.push("a");
        nav.push("b");
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.top(), Some(&"b"));
        assert_eq!(nav.pop(), Some("b"));
        assert_eq!(nav.top(), Some(&"a"));
        assert_eq!(nav.pop(), Some("a"));
        assert_eq!(nav.pop(), None);
        assert!(nav.is_empty());
    }

    #[test]
    fn top_mut_edits_only_the_top() {
        let mut nav = NavStack::new();
        nav.push(1);
        nav.push(2);
        if let Some(top) = nav.top_mut() {
            *top = 20;
        }
        assert_eq!(nav.pop(), Some(20));
        assert_eq!(nav.pop(), Some(1));
    }

    #[test]
    fn clear_empties_the_stack() {
        let mut nav = NavStack::new();
        nav.push(());
        nav.push(());
        nav.clear();
        assert!(nav.is_empty());
        assert_eq!(nav.depth(), 0);
    }
}

/// Tracks source block nesting by indentation depth.
///
/// Each open block records the indent of its opening line; a dedent pops
/// every level at or above the new indent, and the caller emits one closing
/// brace per popped level in LIFO order. The stack never goes negative:
/// popping an empty tracker is a no-op.
#[derive(Debug, Default)]
pub struct IndentTracker {
    levels: Vec<usize>,
}

impl IndentTracker {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    pub fn open(&mut self, indent: usize) {
        self.levels.push(indent);
    }

    pub fn top(&self) -> Option<usize> {
        self.levels.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Pop every level opened at or deeper than `indent`. Returns the popped
    /// opener indents, innermost first.
    pub fn close_at_or_above(&mut self, indent: usize) -> Vec<usize> {
        let mut closed = Vec::new();
        while self.levels.last().is_some_and(|&top| top >= indent) {
            closed.push(self.levels.pop().unwrap_or_default());
        }
        closed
    }

    /// Pop every level opened strictly deeper than `indent`. Used before
    /// continuation constructs (`else`, `except`, `finally`), which reuse
    /// the block at their own indent.
    pub fn close_above(&mut self, indent: usize) -> Vec<usize> {
        let mut closed = Vec::new();
        while self.levels.last().is_some_and(|&top| top > indent) {
            closed.push(self.levels.pop().unwrap_or_default());
        }
        closed
    }

    /// Pop all remaining levels, innermost first.
    pub fn drain_all(&mut self) -> Vec<usize> {
        let mut closed = Vec::with_capacity(self.levels.len());
        while let Some(level) = self.levels.pop() {
            closed.push(level);
        }
        closed
    }
}

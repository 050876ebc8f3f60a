use game_types::Line;

/// Append-only record of the strokes drawn during the current turn.
/// Cleared exactly once per turn start.
#[derive(Debug, Default)]
pub struct LineStore {
    lines: Vec<Line>,
}

impl LineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn all(&self) -> &[Line] {
        &self.lines
    }

    pub fn snapshot(&self) -> Vec<Line> {
        self.lines.clone()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

//! Positional `$n` placeholder numbering.

/// Hands out 1-based placeholder indices. One counter is shared by every
/// fragment of a statement so literal-only fragments never shift numbering.
#[derive(Debug)]
pub struct Placeholders {
    next: usize,
}

impl Placeholders {
    pub fn new() -> Self {
        Placeholders { next: 1 }
    }

    /// Take the next index and render it as `$n`.
    pub fn next(&mut self) -> String {
        let n = self.next;
        self.next += 1;
        format!("${}", n)
    }
}

impl Default for Placeholders {
    fn default() -> Self {
        Self::new()
    }
}

//! Tag edit expressions
//!
//! `"Vermont, summer"` adds tags, `"-summer"` removes one, `"--"` clears
//! all existing tags before the remaining edits are applied.

/// Parsed tag edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEdit {
    pub clear: bool,
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

impl TagEdit {
    pub fn parse(expr: &str) -> Self {
        let mut edit = TagEdit::default();
        for part in expr.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if part == "--" {
                edit.clear = true;
            } else if let Some(tag) = part.strip_prefix('-') {
                let tag = tag.trim();
                if !tag.is_empty() {
                    edit.remove.push(tag.to_string());
                }
            } else {
                edit.add.push(part.to_string());
            }
        }
        edit
    }

    /// Tags to set on a new item (removals are meaningless there).
    pub fn initial_tags(&self) -> Vec<String> {
        self.apply(&[])
    }

    /// Apply the edit to an existing tag list, keeping order and dropping duplicates.
    pub fn apply(&self, existing: &[String]) -> Vec<String> {
        let mut result: Vec<String> = if self.clear {
            Vec::new()
        } else {
            existing.to_vec()
        };
        result.retain(|t| !self.remove.contains(t));
        for tag in &self.add {
            if !result.contains(tag) {
                result.push(tag.clone());
            }
        }
        result
    }
}

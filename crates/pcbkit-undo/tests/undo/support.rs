//! Minimal document and commands for exercising the undo engine.

use pcbkit_core::{Error, Result, ValidationError};
use pcbkit_undo::UndoCommand;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Doc {
    pub values: Vec<i32>,
    pub log: Vec<String>,
}

/// Appends a value.
pub struct Push(pub i32);

impl UndoCommand<Doc> for Push {
    fn text(&self) -> &str {
        "Push"
    }

    fn perform_execute(&mut self, doc: &mut Doc) -> Result<bool> {
        doc.values.push(self.0);
        doc.log.push(format!("exec {}", self.0));
        Ok(true)
    }

    fn perform_undo(&mut self, doc: &mut Doc) -> Result<()> {
        doc.values.pop();
        doc.log.push(format!("undo {}", self.0));
        Ok(())
    }

    fn perform_redo(&mut self, doc: &mut Doc) -> Result<()> {
        doc.values.push(self.0);
        doc.log.push(format!("redo {}", self.0));
        Ok(())
    }
}

/// Sets the value at an index, reporting a change only if it differs.
pub struct SetAt {
    pub index: usize,
    pub new: i32,
    pub old: Option<i32>,
}

impl SetAt {
    pub fn new(index: usize, new: i32) -> Self {
        Self {
            index,
            new,
            old: None,
        }
    }
}

impl UndoCommand<Doc> for SetAt {
    fn text(&self) -> &str {
        "Set"
    }

    fn perform_execute(&mut self, doc: &mut Doc) -> Result<bool> {
        let slot = doc
            .values
            .get_mut(self.index)
            .ok_or_else(|| Error::invalid_value("index", "out of range"))?;
        let old = *slot;
        *slot = self.new;
        self.old = Some(old);
        Ok(old != self.new)
    }

    fn perform_undo(&mut self, doc: &mut Doc) -> Result<()> {
        if let (Some(old), Some(slot)) = (self.old, doc.values.get_mut(self.index)) {
            *slot = old;
        }
        Ok(())
    }

    fn perform_redo(&mut self, doc: &mut Doc) -> Result<()> {
        if let Some(slot) = doc.values.get_mut(self.index) {
            *slot = self.new;
        }
        Ok(())
    }
}

/// Always fails to execute.
pub struct Fail;

impl UndoCommand<Doc> for Fail {
    fn text(&self) -> &str {
        "Fail"
    }

    fn perform_execute(&mut self, _doc: &mut Doc) -> Result<bool> {
        Err(ValidationError::InvalidGeometry {
            reason: "rejected".into(),
        }
        .into())
    }

    fn perform_undo(&mut self, _doc: &mut Doc) -> Result<()> {
        Ok(())
    }

    fn perform_redo(&mut self, _doc: &mut Doc) -> Result<()> {
        Ok(())
    }
}

/// Executes fine but cannot be undone.
pub struct BrokenUndo;

impl UndoCommand<Doc> for BrokenUndo {
    fn text(&self) -> &str {
        "Broken"
    }

    fn perform_execute(&mut self, doc: &mut Doc) -> Result<bool> {
        doc.values.push(-1);
        Ok(true)
    }

    fn perform_undo(&mut self, _doc: &mut Doc) -> Result<()> {
        Err(Error::other("storage vanished"))
    }

    fn perform_redo(&mut self, _doc: &mut Doc) -> Result<()> {
        Ok(())
    }
}

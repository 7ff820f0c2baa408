use crate::context::BoardEditorContext;
use pcbkit_core::{Error, Result};
use pcbkit_model::board::BoardItem;
use pcbkit_model::cmd::{CmdBoardItemAdd, CmdBoardItemEdit};
use uuid::Uuid;

/// An item being placed inside an open command group.
///
/// A state holds `Option<Placement<T>>`: `Some` exactly while its transaction
/// is open. Consuming methods end the transaction, so a finished or aborted
/// placement cannot be touched again.
pub(crate) struct Placement<T: BoardItem> {
    uuid: Uuid,
    text: String,
    edit: Option<CmdBoardItemEdit<T>>,
}

impl<T: BoardItem> Placement<T> {
    /// Opens a group, adds `item` to the board and stages an edit for it.
    pub(crate) fn start(ctx: &mut BoardEditorContext, text: &str, item: T) -> Result<Self> {
        let uuid = item.uuid();
        ctx.begin_cmd_group(text)?;
        let edit = ctx
            .append_to_cmd_group(CmdBoardItemAdd::new(item))
            .and_then(|_| CmdBoardItemEdit::new(ctx.project(), uuid));
        match edit {
            Ok(edit) => Ok(Self {
                uuid,
                text: text.to_string(),
                edit: Some(edit),
            }),
            Err(err) => {
                ctx.abort_cmd_group()?;
                Err(err)
            }
        }
    }

    pub(crate) fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// The item as currently shown on the board.
    pub(crate) fn item<'a>(&self, ctx: &'a BoardEditorContext) -> Result<&'a T> {
        ctx.project()
            .board()
            .item::<T>(self.uuid)
            .ok_or_else(|| Error::not_found(T::KIND.name(), self.uuid))
    }

    pub(crate) fn edit_mut(&mut self) -> Result<&mut CmdBoardItemEdit<T>> {
        self.edit
            .as_mut()
            .ok_or_else(|| Error::logic(format!("No pending edit for {} {}", T::KIND, self.uuid)))
    }

    /// Records the staged edit and commits the group.
    pub(crate) fn finish(mut self, ctx: &mut BoardEditorContext) -> Result<()> {
        let result = self.record(ctx).and_then(|_| ctx.commit_cmd_group());
        if let Err(err) = result {
            self.abort(ctx)?;
            return Err(err);
        }
        Ok(())
    }

    /// Commits everything placed so far and reopens a group to keep
    /// editing the same item.
    pub(crate) fn checkpoint(&mut self, ctx: &mut BoardEditorContext) -> Result<()> {
        self.record(ctx)?;
        ctx.commit_cmd_group()?;
        ctx.begin_cmd_group(&self.text)?;
        self.edit = Some(CmdBoardItemEdit::new(ctx.project(), self.uuid)?);
        Ok(())
    }

    /// Reverts the preview and the open group. The item disappears if it
    /// was added in this group.
    pub(crate) fn abort(mut self, ctx: &mut BoardEditorContext) -> Result<()> {
        if let Some(mut edit) = self.edit.take() {
            edit.discard(ctx.project_mut())?;
        }
        if ctx.is_command_group_active() {
            ctx.abort_cmd_group()?;
        }
        Ok(())
    }

    fn record(&mut self, ctx: &mut BoardEditorContext) -> Result<()> {
        if let Some(mut edit) = self.edit.take() {
            // The command writes the staged state itself; a rejected edit
            // must not leave its preview behind.
            edit.discard(ctx.project_mut())?;
            ctx.append_to_cmd_group(edit)?;
        }
        Ok(())
    }
}

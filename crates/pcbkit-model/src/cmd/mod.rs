//! Undoable commands on a [`Project`](crate::Project)

pub mod component;
pub mod item_add;
pub mod item_edit;
pub mod move_selected;

pub use component::{
    validate_identifier, CmdComponentInstanceAdd, CmdComponentInstanceEdit, CmdNetSignalAdd,
};
pub use item_add::{remove_command_for, CmdBoardItemAdd, CmdBoardItemRemove};
pub use item_edit::{edit_command_for, BoardItemEdit, CmdBoardItemEdit};
pub use move_selected::CmdMoveSelectedBoardItems;

use crate::board::{
    BoardDevice, BoardHole, BoardNetLine, BoardPlane, BoardPolygon, BoardStrokeText, BoardVia,
    BoardZone,
};

pub type CmdBoardHoleAdd = CmdBoardItemAdd<BoardHole>;
pub type CmdBoardViaAdd = CmdBoardItemAdd<BoardVia>;
pub type CmdBoardPolygonAdd = CmdBoardItemAdd<BoardPolygon>;
pub type CmdBoardPlaneAdd = CmdBoardItemAdd<BoardPlane>;
pub type CmdBoardZoneAdd = CmdBoardItemAdd<BoardZone>;
pub type CmdBoardStrokeTextAdd = CmdBoardItemAdd<BoardStrokeText>;
pub type CmdBoardDeviceAdd = CmdBoardItemAdd<BoardDevice>;
pub type CmdBoardNetLineAdd = CmdBoardItemAdd<BoardNetLine>;

pub type CmdBoardHoleRemove = CmdBoardItemRemove<BoardHole>;
pub type CmdBoardViaRemove = CmdBoardItemRemove<BoardVia>;
pub type CmdBoardPolygonRemove = CmdBoardItemRemove<BoardPolygon>;
pub type CmdBoardPlaneRemove = CmdBoardItemRemove<BoardPlane>;
pub type CmdBoardZoneRemove = CmdBoardItemRemove<BoardZone>;
pub type CmdBoardStrokeTextRemove = CmdBoardItemRemove<BoardStrokeText>;
pub type CmdBoardDeviceRemove = CmdBoardItemRemove<BoardDevice>;
pub type CmdBoardNetLineRemove = CmdBoardItemRemove<BoardNetLine>;

pub type CmdBoardHoleEdit = CmdBoardItemEdit<BoardHole>;
pub type CmdBoardViaEdit = CmdBoardItemEdit<BoardVia>;
pub type CmdBoardPolygonEdit = CmdBoardItemEdit<BoardPolygon>;
pub type CmdBoardPlaneEdit = CmdBoardItemEdit<BoardPlane>;
pub type CmdBoardZoneEdit = CmdBoardItemEdit<BoardZone>;
pub type CmdBoardStrokeTextEdit = CmdBoardItemEdit<BoardStrokeText>;
pub type CmdBoardDeviceEdit = CmdBoardItemEdit<BoardDevice>;
pub type CmdBoardNetLineEdit = CmdBoardItemEdit<BoardNetLine>;

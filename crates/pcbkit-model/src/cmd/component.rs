//! Circuit commands

use crate::circuit::{AssemblyOption, ComponentInstance, NetSignal};
use crate::project::{ChangeKind, ItemKind, Project, ProjectEvent};
use pcbkit_core::{Error, Result, ValidationError};
use pcbkit_undo::UndoCommand;
use uuid::Uuid;

const MAX_IDENTIFIER_LEN: usize = 32;

/// Checks a circuit identifier (component or net name).
pub fn validate_identifier(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name.chars().count() > MAX_IDENTIFIER_LEN {
        Some("is longer than 32 characters")
    } else if name.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ValidationError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

/// Edits the attributes of a component instance.
///
/// Only the fields touched through a setter change; everything else is
/// written back exactly as it was captured.
pub struct CmdComponentInstanceEdit {
    old: ComponentInstance,
    new: ComponentInstance,
}

impl CmdComponentInstanceEdit {
    pub fn new(doc: &Project, uuid: Uuid) -> Result<Self> {
        let component = doc
            .circuit()
            .component_instance(uuid)
            .ok_or_else(|| Error::not_found(ItemKind::ComponentInstance.name(), uuid))?;
        Ok(Self {
            old: component.clone(),
            new: component.clone(),
        })
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.new.name = name.into();
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.new.value = value.into();
    }

    pub fn set_assembly_options(&mut self, options: Vec<AssemblyOption>) {
        self.new.assembly_options = options;
    }

    pub fn set_lock_assembly(&mut self, lock: bool) {
        self.new.lock_assembly = lock;
    }

    fn write(&self, doc: &mut Project, state: &ComponentInstance) -> Result<()> {
        let uuid = self.old.uuid;
        let slot = doc
            .circuit_mut()
            .component_instance_mut(uuid)
            .ok_or_else(|| Error::not_found(ItemKind::ComponentInstance.name(), uuid))?;
        *slot = state.clone();
        if self.old != self.new {
            doc.notify(ProjectEvent::new(
                ItemKind::ComponentInstance,
                uuid,
                ChangeKind::Edited,
            ));
        }
        Ok(())
    }
}

impl UndoCommand<Project> for CmdComponentInstanceEdit {
    fn text(&self) -> &str {
        "Edit component"
    }

    fn perform_execute(&mut self, doc: &mut Project) -> Result<bool> {
        if self.new.name != self.old.name {
            validate_identifier(&self.new.name)?;
            let taken = doc
                .circuit()
                .component_instance_by_name(&self.new.name)
                .is_some_and(|c| c.uuid != self.old.uuid);
            if taken {
                return Err(ValidationError::InvalidName {
                    name: self.new.name.clone(),
                    reason: "there is already a component with this name".into(),
                }
                .into());
            }
        }
        self.write(doc, &self.new)?;
        Ok(self.old != self.new)
    }

    fn perform_undo(&mut self, doc: &mut Project) -> Result<()> {
        self.write(doc, &self.old)
    }

    fn perform_redo(&mut self, doc: &mut Project) -> Result<()> {
        self.write(doc, &self.new)
    }
}

/// Adds a component instance to the circuit.
pub struct CmdComponentInstanceAdd {
    uuid: Uuid,
    component: Option<ComponentInstance>,
    index: Option<usize>,
}

impl CmdComponentInstanceAdd {
    pub fn new(component: ComponentInstance) -> Self {
        Self {
            uuid: component.uuid,
            component: Some(component),
            index: None,
        }
    }

    fn insert(&mut self, doc: &mut Project) -> Result<()> {
        let component = self
            .component
            .take()
            .ok_or_else(|| Error::logic("Component is already in the circuit"))?;
        let index = self
            .index
            .unwrap_or_else(|| doc.circuit().component_instances().len());
        doc.circuit_mut().insert_component_instance(index, component);
        self.index = Some(index);
        doc.notify(ProjectEvent::new(
            ItemKind::ComponentInstance,
            self.uuid,
            ChangeKind::Added,
        ));
        Ok(())
    }
}

impl UndoCommand<Project> for CmdComponentInstanceAdd {
    fn text(&self) -> &str {
        "Add component"
    }

    fn perform_execute(&mut self, doc: &mut Project) -> Result<bool> {
        if let Some(component) = &self.component {
            validate_identifier(&component.name)?;
            if doc.circuit().component_instance_by_name(&component.name).is_some() {
                return Err(ValidationError::InvalidName {
                    name: component.name.clone(),
                    reason: "there is already a component with this name".into(),
                }
                .into());
            }
        }
        self.insert(doc)?;
        Ok(true)
    }

    fn perform_undo(&mut self, doc: &mut Project) -> Result<()> {
        let (index, component) = doc
            .circuit_mut()
            .remove_component_instance(self.uuid)
            .ok_or_else(|| Error::not_found(ItemKind::ComponentInstance.name(), self.uuid))?;
        self.index = Some(index);
        self.component = Some(component);
        doc.notify(ProjectEvent::new(
            ItemKind::ComponentInstance,
            self.uuid,
            ChangeKind::Removed,
        ));
        Ok(())
    }

    fn perform_redo(&mut self, doc: &mut Project) -> Result<()> {
        self.insert(doc)
    }
}

/// Adds a net signal to the circuit.
pub struct CmdNetSignalAdd {
    uuid: Uuid,
    net: Option<NetSignal>,
    index: Option<usize>,
}

impl CmdNetSignalAdd {
    pub fn new(net: NetSignal) -> Self {
        Self {
            uuid: net.uuid,
            net: Some(net),
            index: None,
        }
    }

    fn insert(&mut self, doc: &mut Project) -> Result<()> {
        let net = self
            .net
            .take()
            .ok_or_else(|| Error::logic("Net signal is already in the circuit"))?;
        let index = self.index.unwrap_or_else(|| doc.circuit().net_signals().len());
        doc.circuit_mut().insert_net_signal(index, net);
        self.index = Some(index);
        doc.notify(ProjectEvent::new(ItemKind::NetSignal, self.uuid, ChangeKind::Added));
        Ok(())
    }
}

impl UndoCommand<Project> for CmdNetSignalAdd {
    fn text(&self) -> &str {
        "Add net signal"
    }

    fn perform_execute(&mut self, doc: &mut Project) -> Result<bool> {
        if let Some(net) = &self.net {
            validate_identifier(&net.name)?;
            if doc.circuit().net_signal_by_name(&net.name).is_some() {
                return Err(ValidationError::InvalidName {
                    name: net.name.clone(),
                    reason: "there is already a net signal with this name".into(),
                }
                .into());
            }
        }
        self.insert(doc)?;
        Ok(true)
    }

    fn perform_undo(&mut self, doc: &mut Project) -> Result<()> {
        let (index, net) = doc
            .circuit_mut()
            .remove_net_signal(self.uuid)
            .ok_or_else(|| Error::not_found(ItemKind::NetSignal.name(), self.uuid))?;
        self.index = Some(index);
        self.net = Some(net);
        doc.notify(ProjectEvent::new(ItemKind::NetSignal, self.uuid, ChangeKind::Removed));
        Ok(())
    }

    fn perform_redo(&mut self, doc: &mut Project) -> Result<()> {
        self.insert(doc)
    }
}

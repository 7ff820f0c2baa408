//! Circuit: net signals and component instances

use crate::board::Board;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Electrical net
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetSignal {
    pub uuid: Uuid,
    pub name: String,
}

impl NetSignal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Device choice for a component in an assembly variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyOption {
    pub device: Uuid,
    pub variants: Vec<String>,
}

/// Component placed in the circuit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInstance {
    pub uuid: Uuid,
    pub name: String,
    pub value: String,
    pub assembly_options: Vec<AssemblyOption>,
    pub lock_assembly: bool,
}

impl ComponentInstance {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            value: value.into(),
            assembly_options: Vec::new(),
            lock_assembly: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    net_signals: Vec<NetSignal>,
    component_instances: Vec<ComponentInstance>,
}

impl Circuit {
    pub fn net_signals(&self) -> &[NetSignal] {
        &self.net_signals
    }

    pub fn net_signal(&self, uuid: Uuid) -> Option<&NetSignal> {
        self.net_signals.iter().find(|n| n.uuid == uuid)
    }

    pub fn net_signal_by_name(&self, name: &str) -> Option<&NetSignal> {
        self.net_signals.iter().find(|n| n.name == name)
    }

    pub fn component_instances(&self) -> &[ComponentInstance] {
        &self.component_instances
    }

    pub fn component_instance(&self, uuid: Uuid) -> Option<&ComponentInstance> {
        self.component_instances.iter().find(|c| c.uuid == uuid)
    }

    pub fn component_instance_by_name(&self, name: &str) -> Option<&ComponentInstance> {
        self.component_instances.iter().find(|c| c.name == name)
    }

    pub(crate) fn component_instance_mut(&mut self, uuid: Uuid) -> Option<&mut ComponentInstance> {
        self.component_instances.iter_mut().find(|c| c.uuid == uuid)
    }

    pub(crate) fn insert_net_signal(&mut self, index: usize, net: NetSignal) {
        let index = index.min(self.net_signals.len());
        self.net_signals.insert(index, net);
    }

    pub(crate) fn remove_net_signal(&mut self, uuid: Uuid) -> Option<(usize, NetSignal)> {
        let index = self.net_signals.iter().position(|n| n.uuid == uuid)?;
        Some((index, self.net_signals.remove(index)))
    }

    pub(crate) fn insert_component_instance(&mut self, index: usize, component: ComponentInstance) {
        let index = index.min(self.component_instances.len());
        self.component_instances.insert(index, component);
    }

    pub(crate) fn remove_component_instance(
        &mut self,
        uuid: Uuid,
    ) -> Option<(usize, ComponentInstance)> {
        let index = self.component_instances.iter().position(|c| c.uuid == uuid)?;
        Some((index, self.component_instances.remove(index)))
    }

    /// The net signal used by the most vias, net lines and planes on `board`.
    ///
    /// Ties resolve to the net signal listed first in the circuit.
    pub fn net_signal_with_most_elements(&self, board: &Board) -> Option<Uuid> {
        let mut counts: HashMap<Uuid, usize> = HashMap::new();
        let nets = board
            .vias()
            .iter()
            .filter_map(|v| v.net_signal)
            .chain(board.net_lines().iter().filter_map(|l| l.net_signal))
            .chain(board.planes().iter().filter_map(|p| p.net_signal));
        for net in nets {
            *counts.entry(net).or_default() += 1;
        }
        let mut best: Option<(Uuid, usize)> = None;
        for net in &self.net_signals {
            let count = counts.get(&net.uuid).copied().unwrap_or(0);
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((net.uuid, count));
            }
        }
        best.map(|(uuid, _)| uuid)
    }
}

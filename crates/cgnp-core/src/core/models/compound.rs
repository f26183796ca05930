use super::bead::{Bead, BeadKind};
use super::ids::{BeadId, PortId};
use super::port::Port;
use super::topology::{Bond, BondKind};
use nalgebra::{Isometry3, Point3, Vector3};
use slotmap::{SecondaryMap, SlotMap};

/// A generic container of beads, attachment ports and bonds.
///
/// Every structure produced by the builders is a `Compound`. Structures are combined
/// by absorbing one compound into another, which moves all beads, ports and bonds
/// across and re-keys them. Ports form the live pool of unused bonding sites: fusing
/// two structures removes one port from each.
#[derive(Debug, Clone, Default)]
pub struct Compound {
    /// Primary storage for beads.
    beads: SlotMap<BeadId, Bead>,
    /// Live, unconsumed attachment ports.
    ports: SlotMap<PortId, Port>,
    /// List of all bonds in the compound.
    bonds: Vec<Bond>,
    /// Cached adjacency list for bond connectivity, indexed by bead ID.
    bond_adjacency: SecondaryMap<BeadId, Vec<BeadId>>,
}

/// Key translation produced when one compound is absorbed into another.
#[derive(Debug, Clone, Default)]
pub struct Merged {
    pub beads: SecondaryMap<BeadId, BeadId>,
    pub ports: SecondaryMap<PortId, PortId>,
}

impl Compound {
    /// Creates a new, empty compound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves a bead by its ID.
    pub fn bead(&self, id: BeadId) -> Option<&Bead> {
        self.beads.get(id)
    }

    /// Returns an iterator over all beads in insertion order.
    pub fn beads_iter(&self) -> impl Iterator<Item = (BeadId, &Bead)> {
        self.beads.iter()
    }

    /// Returns the number of beads in the compound.
    pub fn bead_count(&self) -> usize {
        self.beads.len()
    }

    /// Returns an iterator over the beads of a given kind.
    pub fn beads_by_kind(&self, kind: BeadKind) -> impl Iterator<Item = (BeadId, &Bead)> {
        self.beads.iter().filter(move |(_, bead)| bead.kind == kind)
    }

    /// Retrieves a live port by its ID.
    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(id)
    }

    /// Returns the number of live (unconsumed) ports.
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Returns a slice of all bonds in the compound.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Retrieves the beads directly bonded to `bead_id`.
    pub fn bonded_neighbors(&self, bead_id: BeadId) -> Option<&[BeadId]> {
        self.bond_adjacency.get(bead_id).map(|v| v.as_slice())
    }

    /// Adds a bead and returns its ID.
    pub fn add_bead(&mut self, bead: Bead) -> BeadId {
        let bead_id = self.beads.insert(bead);
        self.bond_adjacency.insert(bead_id, Vec::new());
        bead_id
    }

    /// Adds a port. Returns `None` if the port's anchor bead is not part of this compound.
    pub fn add_port(&mut self, port: Port) -> Option<PortId> {
        if !self.beads.contains_key(port.anchor) {
            return None;
        }
        Some(self.ports.insert(port))
    }

    /// Removes a port from the live pool, returning it.
    pub fn remove_port(&mut self, port_id: PortId) -> Option<Port> {
        self.ports.remove(port_id)
    }

    /// Adds a bond between two distinct beads.
    ///
    /// Adding an existing bond succeeds without creating a duplicate. Returns `None`
    /// if either bead is missing or both IDs refer to the same bead.
    pub fn add_bond(&mut self, bead1_id: BeadId, bead2_id: BeadId, kind: BondKind) -> Option<()> {
        if bead1_id == bead2_id
            || !self.beads.contains_key(bead1_id)
            || !self.beads.contains_key(bead2_id)
        {
            return None;
        }

        if self.bond_adjacency[bead1_id].contains(&bead2_id) {
            return Some(());
        }

        self.link(bead1_id, bead2_id, kind);
        Some(())
    }

    fn link(&mut self, bead1_id: BeadId, bead2_id: BeadId, kind: BondKind) {
        self.bonds.push(Bond::new(bead1_id, bead2_id, kind));
        self.bond_adjacency[bead1_id].push(bead2_id);
        self.bond_adjacency[bead2_id].push(bead1_id);
    }

    /// Inserts a port without checking that its anchor belongs to this compound.
    #[cfg(test)]
    pub(crate) fn insert_port_unchecked(&mut self, port: Port) -> PortId {
        self.ports.insert(port)
    }

    /// Applies a rigid transform to every bead and port.
    pub fn transform(&mut self, isometry: &Isometry3<f64>) {
        for bead in self.beads.values_mut() {
            bead.position = isometry * bead.position;
        }
        for port in self.ports.values_mut() {
            port.transform(isometry);
        }
    }

    /// Returns the centroid of all bead positions, or `None` for an empty compound.
    pub fn center(&self) -> Option<Point3<f64>> {
        if self.beads.is_empty() {
            return None;
        }
        let sum = self
            .beads
            .values()
            .fold(Vector3::zeros(), |acc, bead| acc + bead.position.coords);
        Some(Point3::from(sum / self.beads.len() as f64))
    }

    /// Sets the structural unit index of every bead.
    pub fn assign_unit(&mut self, unit: usize) {
        for bead in self.beads.values_mut() {
            bead.unit = unit;
        }
    }

    /// Marks every bead of `kind` as belonging to rigid body `body_id`.
    ///
    /// Returns the number of beads labeled. Positions are left untouched.
    pub fn label_rigid_bodies(&mut self, kind: BeadKind, body_id: usize) -> usize {
        let mut labeled = 0;
        for bead in self.beads.values_mut().filter(|bead| bead.kind == kind) {
            bead.rigid_body = Some(body_id);
            labeled += 1;
        }
        labeled
    }

    /// Moves all beads, ports and bonds of `other` into this compound.
    ///
    /// Returns the mapping from `other`'s keys to the new keys in `self`.
    pub fn absorb(&mut self, other: Compound) -> Merged {
        let mut merged = Merged::default();

        for (old_id, bead) in other.beads {
            let new_id = self.add_bead(bead);
            merged.beads.insert(old_id, new_id);
        }

        for (old_id, mut port) in other.ports {
            port.anchor = merged.beads[port.anchor];
            let new_id = self.ports.insert(port);
            merged.ports.insert(old_id, new_id);
        }

        // `other` already holds each bond once, between two of its own beads.
        for bond in other.bonds {
            self.link(
                merged.beads[bond.bead1_id],
                merged.beads[bond.bead2_id],
                bond.kind,
            );
        }

        merged
    }
}

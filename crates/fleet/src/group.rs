use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use evpool_core::{DomainError, DomainResult, GroupId, VehicleId};

/// A group of riders travelling together.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    id: GroupId,
    people: u32,
}

impl Group {
    /// Groups always carry at least one rider.
    pub fn new(id: GroupId, people: u32) -> DomainResult<Self> {
        if people == 0 {
            return Err(DomainError::validation("people must be at least 1"));
        }
        Ok(Self { id, people })
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn people(&self) -> u32 {
        self.people
    }
}

/// A group currently riding, and the vehicle serving it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct RidingGroup {
    pub group: Group,
    pub vehicle_id: VehicleId,
}

/// Waiting queue plus the group → vehicle assignment table.
///
/// A group id is either queued or assigned, never both.
pub trait GroupLedger: Send {
    /// Append to the tail of the waiting queue.
    fn enqueue(&mut self, group: Group);

    /// Remove the first queued group with this id. The assignment table is not searched.
    fn dequeue_by_id(&mut self, group_id: GroupId) -> bool;

    /// Look up a queued group (the assignment table is not searched).
    fn find(&self, group_id: GroupId) -> Option<Group>;

    /// Head of the waiting queue, left in place.
    fn peek_next(&self) -> Option<Group>;

    /// Snapshot of the waiting queue, head first.
    fn waiting(&self) -> Vec<Group>;

    /// Record that `group` rides `vehicle_id`. Any queued entry for the group is removed.
    fn assign(&mut self, group: Group, vehicle_id: VehicleId);

    /// Remove and return the group's assignment.
    fn unassign(&mut self, group_id: GroupId) -> Option<RidingGroup>;

    fn riding(&self, group_id: GroupId) -> Option<RidingGroup>;

    fn riding_count(&self) -> usize;

    /// Empty both the queue and the assignment table.
    fn clear(&mut self);

    fn assignment_of(&self, group_id: GroupId) -> Option<VehicleId> {
        self.riding(group_id).map(|r| r.vehicle_id)
    }

    /// Whether the id is known to the ledger at all (waiting or riding).
    fn is_active(&self, group_id: GroupId) -> bool {
        self.find(group_id).is_some() || self.riding(group_id).is_some()
    }
}

/// In-memory ledger backed by a `VecDeque` and a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGroupLedger {
    queue: VecDeque<Group>,
    assignments: HashMap<GroupId, RidingGroup>,
}

impl InMemoryGroupLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupLedger for InMemoryGroupLedger {
    fn enqueue(&mut self, group: Group) {
        self.queue.push_back(group);
    }

    fn dequeue_by_id(&mut self, group_id: GroupId) -> bool {
        match self.queue.iter().position(|g| g.id == group_id) {
            Some(idx) => self.queue.remove(idx).is_some(),
            None => false,
        }
    }

    fn find(&self, group_id: GroupId) -> Option<Group> {
        self.queue.iter().find(|g| g.id == group_id).copied()
    }

    fn peek_next(&self) -> Option<Group> {
        self.queue.front().copied()
    }

    fn waiting(&self) -> Vec<Group> {
        self.queue.iter().copied().collect()
    }

    fn assign(&mut self, group: Group, vehicle_id: VehicleId) {
        self.dequeue_by_id(group.id);
        self.assignments
            .insert(group.id, RidingGroup { group, vehicle_id });
    }

    fn unassign(&mut self, group_id: GroupId) -> Option<RidingGroup> {
        self.assignments.remove(&group_id)
    }

    fn riding(&self, group_id: GroupId) -> Option<RidingGroup> {
        self.assignments.get(&group_id).copied()
    }

    fn riding_count(&self) -> usize {
        self.assignments.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
        self.assignments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: i64, people: u32) -> Group {
        Group::new(GroupId::new(id), people).unwrap()
    }

    #[test]
    fn empty_groups_are_rejected() {
        let err = Group::new(GroupId::new(1), 0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn queue_is_fifo() {
        let mut ledger = InMemoryGroupLedger::new();
        ledger.enqueue(group(1, 2));
        ledger.enqueue(group(2, 5));

        assert_eq!(ledger.peek_next(), Some(group(1, 2)));
        assert!(ledger.dequeue_by_id(GroupId::new(1)));
        assert_eq!(ledger.peek_next(), Some(group(2, 5)));
    }

    #[test]
    fn dequeue_by_id_removes_from_the_middle() {
        let mut ledger = InMemoryGroupLedger::new();
        for id in 1..=3 {
            ledger.enqueue(group(id, 1));
        }

        assert!(ledger.dequeue_by_id(GroupId::new(2)));
        assert!(!ledger.dequeue_by_id(GroupId::new(2)));

        let ids: Vec<i64> = ledger.waiting().iter().map(|g| g.id().get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn find_and_dequeue_do_not_look_at_assignments() {
        let mut ledger = InMemoryGroupLedger::new();
        ledger.assign(group(7, 3), VehicleId::new(1));

        assert_eq!(ledger.find(GroupId::new(7)), None);
        assert!(!ledger.dequeue_by_id(GroupId::new(7)));
        assert_eq!(ledger.assignment_of(GroupId::new(7)), Some(VehicleId::new(1)));
    }

    #[test]
    fn assigning_a_queued_group_moves_it_out_of_the_queue() {
        let mut ledger = InMemoryGroupLedger::new();
        ledger.enqueue(group(4, 2));

        ledger.assign(group(4, 2), VehicleId::new(9));

        assert_eq!(ledger.find(GroupId::new(4)), None);
        assert_eq!(ledger.riding_count(), 1);
        assert!(ledger.is_active(GroupId::new(4)));
    }

    #[test]
    fn unassign_returns_the_riding_group() {
        let mut ledger = InMemoryGroupLedger::new();
        ledger.assign(group(4, 2), VehicleId::new(9));

        let riding = ledger.unassign(GroupId::new(4)).unwrap();
        assert_eq!(riding.group.people(), 2);
        assert_eq!(riding.vehicle_id, VehicleId::new(9));

        assert_eq!(ledger.unassign(GroupId::new(4)), None);
        assert_eq!(ledger.assignment_of(GroupId::new(4)), None);
        assert!(!ledger.is_active(GroupId::new(4)));
    }

    #[test]
    fn clear_empties_queue_and_assignments() {
        let mut ledger = InMemoryGroupLedger::new();
        ledger.enqueue(group(1, 1));
        ledger.assign(group(2, 1), VehicleId::new(1));

        ledger.clear();

        assert!(ledger.waiting().is_empty());
        assert_eq!(ledger.riding_count(), 0);
        assert_eq!(ledger.peek_next(), None);
    }
}

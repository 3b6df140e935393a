//! In-memory progression service.
//!
//! Stands in for the game mode that owns progression: it keeps one record
//! per connected slot, the level table, and the warmup flag. Records are
//! created on join and dropped on leave; the purchase path only ever reaches
//! them through [`ProgressionPort`].

use std::sync::atomic::{AtomicBool, Ordering};

use buylevel_domain::{Level, LevelDefinition, PlayerSlot, PointBalance, ProgressionRecord};
use dashmap::DashMap;

use crate::infrastructure::ports::{ProgressionError, ProgressionPort};

use super::level_table::LevelTable;

const RECORD: &str = "ProgressionRecord";

pub struct InMemoryProgression {
    table: LevelTable,
    records: DashMap<PlayerSlot, ProgressionRecord>,
    warmup: AtomicBool,
}

impl InMemoryProgression {
    pub fn new(table: LevelTable) -> Self {
        Self {
            table,
            records: DashMap::new(),
            warmup: AtomicBool::new(false),
        }
    }

    pub fn table(&self) -> &LevelTable {
        &self.table
    }

    /// Create the starting record for `slot`, keeping any existing one.
    pub fn join(&self, slot: PlayerSlot) -> ProgressionRecord {
        let record = *self.records.entry(slot).or_default();
        tracing::debug!(slot = %slot, level = record.level().value(), "Progression record ready");
        record
    }

    pub fn leave(&self, slot: PlayerSlot) -> Option<ProgressionRecord> {
        self.records.remove(&slot).map(|(_, record)| record)
    }

    pub fn snapshot(&self, slot: PlayerSlot) -> Option<ProgressionRecord> {
        self.records.get(&slot).map(|r| *r)
    }

    /// Credit kill points earned in play.
    pub fn award_points(
        &self,
        slot: PlayerSlot,
        points: u32,
    ) -> Result<PointBalance, ProgressionError> {
        let mut record = self
            .records
            .get_mut(&slot)
            .ok_or_else(|| ProgressionError::not_found(RECORD, slot))?;
        let balance = record.points().credit(points);
        *record = record.with_points(balance);
        Ok(balance)
    }

    pub fn set_warmup(&self, in_progress: bool) {
        self.warmup.store(in_progress, Ordering::SeqCst);
        tracing::info!(warmup = in_progress, "Warmup state changed");
    }
}

impl ProgressionPort for InMemoryProgression {
    fn player_level(&self, slot: PlayerSlot) -> Result<Level, ProgressionError> {
        self.records
            .get(&slot)
            .map(|r| r.level())
            .ok_or_else(|| ProgressionError::not_found(RECORD, slot))
    }

    fn max_level(&self) -> Result<Level, ProgressionError> {
        Ok(self.table.max_level())
    }

    fn is_warmup_in_progress(&self) -> Result<bool, ProgressionError> {
        Ok(self.warmup.load(Ordering::SeqCst))
    }

    fn record(&self, slot: PlayerSlot) -> Result<Option<ProgressionRecord>, ProgressionError> {
        Ok(self.snapshot(slot))
    }

    fn level_definition(
        &self,
        index: usize,
    ) -> Result<Option<LevelDefinition>, ProgressionError> {
        Ok(self.table.definition(index))
    }

    fn set_record_level(&self, slot: PlayerSlot, level: Level) -> Result<(), ProgressionError> {
        let max = self.table.max_level();
        if level > max {
            return Err(ProgressionError::fault(
                "set_record_level",
                format!("level {} is beyond max level {}", level, max),
            ));
        }
        let mut record = self
            .records
            .get_mut(&slot)
            .ok_or_else(|| ProgressionError::not_found(RECORD, slot))?;
        *record = record.with_level(level);
        Ok(())
    }

    fn set_record_points(
        &self,
        slot: PlayerSlot,
        points: PointBalance,
    ) -> Result<(), ProgressionError> {
        let mut record = self
            .records
            .get_mut(&slot)
            .ok_or_else(|| ProgressionError::not_found(RECORD, slot))?;
        *record = record.with_points(points);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> InMemoryProgression {
        InMemoryProgression::new(
            LevelTable::from_names(["weapon_glock", "weapon_deagle", "weapon_knife"]).unwrap(),
        )
    }

    fn slot(n: u32) -> PlayerSlot {
        PlayerSlot::new(n)
    }

    #[test]
    fn join_creates_starting_record_once() {
        let service = service();
        service.join(slot(1));
        service.award_points(slot(1), 4).unwrap();

        let again = service.join(slot(1));

        assert_eq!(again.points().value(), 4);
        assert_eq!(service.player_level(slot(1)).unwrap(), Level::FIRST);
    }

    #[test]
    fn unknown_slot_is_not_found() {
        let service = service();
        assert!(service.player_level(slot(9)).unwrap_err().is_not_found());
        assert_eq!(service.record(slot(9)).unwrap(), None);
        assert!(service.award_points(slot(9), 1).is_err());
        assert!(service
            .set_record_points(slot(9), PointBalance::ZERO)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn leave_drops_record() {
        let service = service();
        service.join(slot(2));
        assert!(service.leave(slot(2)).is_some());
        assert!(service.snapshot(slot(2)).is_none());
    }

    #[test]
    fn set_level_beyond_table_faults() {
        let service = service();
        service.join(slot(1));

        let result = service.set_record_level(slot(1), Level::new(4).unwrap());

        assert!(matches!(result, Err(ProgressionError::Fault { .. })));
        assert_eq!(service.player_level(slot(1)).unwrap(), Level::FIRST);
    }

    #[test]
    fn writes_are_visible_to_next_read() {
        let service = service();
        service.join(slot(1));
        service
            .set_record_level(slot(1), Level::new(2).unwrap())
            .unwrap();
        service
            .set_record_points(slot(1), PointBalance::new(7))
            .unwrap();

        let record = service.record(slot(1)).unwrap().unwrap();
        assert_eq!(record.level().value(), 2);
        assert_eq!(record.points().value(), 7);
    }

    #[test]
    fn warmup_flag_round_trips() {
        let service = service();
        assert!(!service.is_warmup_in_progress().unwrap());
        service.set_warmup(true);
        assert!(service.is_warmup_in_progress().unwrap());
    }

    #[test]
    fn max_level_and_definitions_come_from_table() {
        let service = service();
        assert_eq!(service.max_level().unwrap().value(), 3);
        assert_eq!(
            service
                .level_definition(2)
                .unwrap()
                .unwrap()
                .item_name()
                .as_str(),
            "weapon_knife"
        );
        assert!(service.level_definition(3).unwrap().is_none());
    }
}

//! Buy level use case.
//!
//! Converts a player's kill points into an immediate level-up on the
//! progression service, then swaps their weapon for the new level's item.
//!
//! Guards run in a fixed order and never write anything. Once they pass,
//! points are debited and the level is raised before the equipment swap:
//! a failed swap is cosmetic and recoverable, a half-applied debit is not.

mod equipment;
mod outcome;

use std::sync::Arc;

use buylevel_domain::{
    DomainError, Level, PlayerSlot, ProgressionRecord, PurchaseCost, PurchasedRecord,
    RestrictedLevelPolicy, WeaponName,
};

use crate::infrastructure::correlation::CorrelationId;
use crate::infrastructure::ports::{PlayerEntityPort, ProgressionError, ProgressionPort};
use crate::infrastructure::settings::PurchaseSettings;

pub use equipment::EquipmentSync;
pub use outcome::{
    EquipmentReport, InvalidPlayer, MissingData, PurchaseOutcome, PurchaseReceipt, Rejection,
};

/// Short-circuits a guard with the outcome to report.
type Guard<T> = Result<T, PurchaseOutcome>;

/// Everything the guards established about a purchase that may proceed.
struct Eligible {
    slot: PlayerSlot,
    purchase: PurchasedRecord,
    /// Next level's item, when it was looked up before the debit.
    next_weapon: Option<WeaponName>,
}

/// Buy level use case.
///
/// Orchestrates: player validation, eligibility guards, debit, level-up,
/// equipment sync.
pub struct BuyLevel {
    progression: Option<Arc<dyn ProgressionPort>>,
    equipment: EquipmentSync,
    cost: PurchaseCost,
    policy: RestrictedLevelPolicy,
    verify_next_item_before_debit: bool,
}

impl BuyLevel {
    /// `progression` is `None` when the service could not be bound at load;
    /// every attempt then reports [`PurchaseOutcome::ServiceUnavailable`].
    pub fn new(progression: Option<Arc<dyn ProgressionPort>>, settings: &PurchaseSettings) -> Self {
        Self {
            progression,
            equipment: EquipmentSync::new(),
            cost: settings.cost_per_level,
            policy: settings.restricted_policy(),
            verify_next_item_before_debit: settings.verify_next_item_before_debit,
        }
    }

    pub fn cost(&self) -> PurchaseCost {
        self.cost
    }

    pub fn is_available(&self) -> bool {
        self.progression.is_some()
    }

    /// Execute one purchase attempt for `player`.
    ///
    /// `None` stands for a command issued without a player (e.g. from the
    /// server console). Always returns an outcome; never panics on a
    /// misbehaving progression service.
    pub fn execute(&self, player: Option<&dyn PlayerEntityPort>) -> PurchaseOutcome {
        let correlation_id = CorrelationId::new();
        let span = tracing::info_span!(
            "buy_level",
            correlation_id = %correlation_id.short(),
            slot = tracing::field::Empty,
        );
        let _entered = span.enter();

        if let Some(player) = player {
            span.record("slot", player.slot().as_u32());
        }

        let outcome = match self.check(player) {
            Ok((player, progression, eligible)) => self.commit(player, progression, eligible),
            Err(outcome) => outcome,
        };

        log_outcome(player, &outcome);
        outcome
    }

    /// Guards 1-8. No writes happen in here.
    fn check<'a>(
        &'a self,
        player: Option<&'a dyn PlayerEntityPort>,
    ) -> Guard<(&'a dyn PlayerEntityPort, &'a dyn ProgressionPort, Eligible)> {
        let player = player
            .filter(|p| p.is_valid())
            .ok_or(PurchaseOutcome::Invalid(InvalidPlayer::NoPlayer))?;
        if !player.is_alive() {
            return Err(PurchaseOutcome::Invalid(InvalidPlayer::NotAlive));
        }

        let progression = self
            .progression
            .as_deref()
            .ok_or(PurchaseOutcome::ServiceUnavailable)?;
        let slot = player.slot();

        if progression
            .is_warmup_in_progress()
            .map_err(|e| service_error("is_warmup_in_progress", None, e))?
        {
            return Err(PurchaseOutcome::Rejected(Rejection::Warmup));
        }

        let current = progression
            .player_level(slot)
            .map_err(|e| service_error("player_level", Some(MissingData::Record), e))?;
        let max = progression
            .max_level()
            .map_err(|e| service_error("max_level", Some(MissingData::LevelTable), e))?;
        let Some(next) = current.next_within(max) else {
            return Err(PurchaseOutcome::Rejected(Rejection::MaxLevel));
        };

        let record = progression
            .record(slot)
            .map_err(|e| service_error("record", Some(MissingData::Record), e))?
            .ok_or(PurchaseOutcome::DataMissing(MissingData::Record))?;

        let current_weapon = self.weapon_at(progression, current)?;
        if self.policy.is_restricted(&current_weapon) {
            return Err(PurchaseOutcome::Rejected(Rejection::RestrictedLevel {
                weapon: current_weapon,
            }));
        }

        if !record.points().covers(self.cost) {
            return Err(PurchaseOutcome::InsufficientPoints {
                have: record.points().value(),
                need: self.cost.value(),
            });
        }

        let next_weapon = self.check_next_level(progression, next)?;

        // The service's level accessor is authoritative over the record's copy.
        let purchase = ProgressionRecord::new(current, record.points())
            .purchase(self.cost, max)
            .map_err(purchase_refused)?;

        Ok((
            player,
            progression,
            Eligible {
                slot,
                purchase,
                next_weapon,
            },
        ))
    }

    /// Optional pre-debit look at the level being bought.
    fn check_next_level(
        &self,
        progression: &dyn ProgressionPort,
        next: Level,
    ) -> Guard<Option<WeaponName>> {
        if !self.verify_next_item_before_debit && !self.policy.guards_entry() {
            return Ok(None);
        }

        let next_weapon = if self.verify_next_item_before_debit {
            Some(self.weapon_at(progression, next)?)
        } else {
            progression
                .level_definition(next.table_index())
                .map_err(|e| {
                    service_error(
                        "level_definition",
                        Some(MissingData::LevelDefinition { level: next }),
                        e,
                    )
                })?
                .map(|def| def.into_item_name())
        };

        if let Some(weapon) = &next_weapon {
            if self.policy.blocks_entry_into(weapon) {
                return Err(PurchaseOutcome::Rejected(Rejection::RestrictedTarget {
                    weapon: weapon.clone(),
                }));
            }
        }
        Ok(next_weapon)
    }

    fn weapon_at(&self, progression: &dyn ProgressionPort, level: Level) -> Guard<WeaponName> {
        progression
            .level_definition(level.table_index())
            .map_err(|e| {
                service_error(
                    "level_definition",
                    Some(MissingData::LevelDefinition { level }),
                    e,
                )
            })?
            .map(|def| def.into_item_name())
            .ok_or(PurchaseOutcome::DataMissing(MissingData::LevelDefinition {
                level,
            }))
    }

    /// Debit, level-up, equip. Points and level are one unit: if the level
    /// write fails the debit is refunded.
    fn commit(
        &self,
        player: &dyn PlayerEntityPort,
        progression: &dyn ProgressionPort,
        eligible: Eligible,
    ) -> PurchaseOutcome {
        let Eligible {
            slot,
            purchase,
            next_weapon,
        } = eligible;
        let PurchasedRecord {
            before,
            after,
            cost,
        } = purchase;

        if let Err(e) = progression.set_record_points(slot, after.points()) {
            return service_error("set_record_points", Some(MissingData::Record), e);
        }

        if let Err(e) = progression.set_record_level(slot, after.level()) {
            match progression.set_record_points(slot, before.points()) {
                Ok(()) => tracing::warn!(
                    slot = %slot,
                    balance = before.points().value(),
                    "Level write failed, debit refunded"
                ),
                Err(refund_error) => tracing::error!(
                    slot = %slot,
                    expected_balance = before.points().value(),
                    error = %refund_error,
                    "Level write failed and refund failed; balance is short by the purchase cost"
                ),
            }
            return service_error("set_record_level", Some(MissingData::Record), e);
        }

        let weapon = match next_weapon {
            Some(weapon) => weapon,
            None => match progression.level_definition(after.level().table_index()) {
                Ok(Some(def)) => def.into_item_name(),
                Ok(None) => {
                    return PurchaseOutcome::CommittedWithoutItem {
                        new_level: after.level(),
                        new_balance: after.points(),
                        cost,
                    }
                }
                Err(e) => {
                    tracing::error!(
                        slot = %slot,
                        level = after.level().value(),
                        error = %e,
                        "Could not resolve weapon for purchased level"
                    );
                    return PurchaseOutcome::CommittedWithoutItem {
                        new_level: after.level(),
                        new_balance: after.points(),
                        cost,
                    };
                }
            },
        };

        let equipment = self.equipment.sync(player, &weapon);

        PurchaseOutcome::Success(PurchaseReceipt {
            old_level: before.level(),
            new_level: after.level(),
            old_balance: before.points(),
            new_balance: after.points(),
            cost,
            weapon,
            equipment,
        })
    }
}

/// Outcome for a purchase the domain record refused.
fn purchase_refused(error: DomainError) -> PurchaseOutcome {
    match error {
        DomainError::InsufficientPoints { have, need } => {
            PurchaseOutcome::InsufficientPoints { have, need }
        }
        DomainError::LevelOutOfRange { .. } => PurchaseOutcome::Rejected(Rejection::MaxLevel),
        other => {
            tracing::error!(error = %other, "Purchase computation failed");
            PurchaseOutcome::Fault {
                operation: "purchase",
            }
        }
    }
}

/// Map a progression port failure to the outcome reported for it.
///
/// `missing` is what a `NotFound` from `operation` means for the purchase;
/// `None` for calls that have nothing to look up, where it is a fault.
fn service_error(
    operation: &'static str,
    missing: Option<MissingData>,
    error: ProgressionError,
) -> PurchaseOutcome {
    match (error, missing) {
        (ProgressionError::Unavailable, _) => PurchaseOutcome::ServiceUnavailable,
        (ProgressionError::NotFound { entity_type, id }, Some(missing)) => {
            tracing::error!(
                operation,
                entity_type,
                id = %id,
                missing = ?missing,
                "Progression service is missing data needed for the purchase"
            );
            PurchaseOutcome::DataMissing(missing)
        }
        (error, _) => {
            tracing::error!(operation, error = %error, "Progression service fault");
            PurchaseOutcome::Fault { operation }
        }
    }
}

/// One server log line per outcome, at the severity its category calls for.
fn log_outcome(player: Option<&dyn PlayerEntityPort>, outcome: &PurchaseOutcome) {
    let name = player
        .filter(|p| p.is_valid())
        .map(|p| p.name())
        .unwrap_or_else(|| "<none>".to_string());

    match outcome {
        PurchaseOutcome::Success(receipt) => tracing::info!(
            player = %name,
            level = receipt.new_level.value(),
            balance = receipt.new_balance.value(),
            weapon = %receipt.weapon,
            equipped = receipt.equipment.is_equipped(),
            "{} bought level {}",
            name,
            receipt.new_level
        ),
        PurchaseOutcome::CommittedWithoutItem {
            new_level,
            new_balance,
            ..
        } => tracing::error!(
            player = %name,
            level = new_level.value(),
            balance = new_balance.value(),
            "Level purchased but level table has no weapon for it"
        ),
        PurchaseOutcome::Invalid(reason) => {
            tracing::info!(player = %name, reason = ?reason, "Invalid or dead player attempted to buy a level")
        }
        PurchaseOutcome::ServiceUnavailable => {
            tracing::debug!(player = %name, "Buy level ignored, progression service unavailable")
        }
        PurchaseOutcome::Rejected(rejection) => {
            tracing::info!(player = %name, rejection = ?rejection, "Buy level rejected")
        }
        PurchaseOutcome::InsufficientPoints { have, need } => tracing::info!(
            player = %name,
            have,
            need,
            "Buy level rejected, not enough points"
        ),
        PurchaseOutcome::DataMissing(missing) => {
            tracing::error!(player = %name, missing = ?missing, "Buy level aborted, progression data missing")
        }
        PurchaseOutcome::Fault { operation } => {
            tracing::error!(player = %name, operation, "Buy level aborted by progression fault")
        }
    }
}

//! Console host flows: chat triggers reaching the plugin.

use std::sync::Arc;

use super::{level, slot, TEST_WEAPON_ORDER};
use crate::api::{ConsoleCommand, ConsoleHost};
use crate::app::BuyLevelPlugin;
use crate::infrastructure::ports::ProgressionPort;
use crate::infrastructure::progression::{InMemoryProgression, LevelTable};
use crate::infrastructure::settings::PurchaseSettings;

fn host() -> ConsoleHost {
    let table = LevelTable::from_names(TEST_WEAPON_ORDER.iter().copied()).unwrap();
    let progression = Arc::new(InMemoryProgression::new(table));
    let bound: Arc<dyn ProgressionPort> = progression.clone();
    let plugin = BuyLevelPlugin::load(Some(bound), PurchaseSettings::default());
    ConsoleHost::new(plugin, progression)
}

fn run(host: &ConsoleHost, line: &str) -> Vec<String> {
    host.run(line.parse::<ConsoleCommand>().unwrap())
}

#[test]
fn test_join_spawns_with_first_weapon() {
    let host = host();

    run(&host, "join 1 Gabe");

    let pawn = host.roster().pawn(slot(1)).unwrap();
    assert_eq!(pawn.active_item.as_deref(), Some("weapon_glock"));
    assert_eq!(
        host.progression().snapshot(slot(1)).unwrap().level(),
        level(1)
    );
}

#[test]
fn test_chat_trigger_buys_level() {
    let host = host();
    run(&host, "join 1 Gabe");
    run(&host, "kill 1 12");

    let out = run(&host, "say 1 !buylevel");

    assert_eq!(
        out,
        vec!["[chat -> 1] You spent 10 kills to upgrade to level 2 (p250)!".to_string()]
    );
    let record = host.progression().snapshot(slot(1)).unwrap();
    assert_eq!(record.level(), level(2));
    assert_eq!(record.points().value(), 2);
    assert_eq!(
        host.roster().pawn(slot(1)).unwrap().active_item.as_deref(),
        Some("weapon_p250")
    );
}

#[test]
fn test_slash_trigger_is_equivalent() {
    let host = host();
    run(&host, "join 1 Gabe");

    let out = run(&host, "say 1 /buylevel");

    assert_eq!(
        out,
        vec!["[chat -> 1] You need 10 kills to buy a level. You have 0 kills.".to_string()]
    );
}

#[test]
fn test_plain_chat_is_echoed() {
    let host = host();
    run(&host, "join 1 Gabe");

    assert_eq!(run(&host, "say 1 gg"), vec!["Gabe: gg".to_string()]);
}

#[test]
fn test_unknown_trigger_is_reported() {
    let host = host();
    run(&host, "join 1 Gabe");

    assert_eq!(
        run(&host, "say 1 !rtv"),
        vec!["unknown command css_rtv".to_string()]
    );
}

#[test]
fn test_dead_player_respawns_with_current_weapon() {
    let host = host();
    run(&host, "join 1 Gabe");
    run(&host, "kill 1 10");
    run(&host, "die 1");

    let dead = run(&host, "say 1 !buylevel");
    assert_eq!(
        dead,
        vec!["[chat -> 1] You must be alive to buy a level.".to_string()]
    );

    run(&host, "spawn 1");
    run(&host, "say 1 !buylevel");
    run(&host, "die 1");
    run(&host, "spawn 1");

    assert_eq!(
        host.roster().pawn(slot(1)).unwrap().active_item.as_deref(),
        Some("weapon_p250")
    );
}

#[test]
fn test_warmup_toggle_reaches_purchase() {
    let host = host();
    run(&host, "join 1 Gabe");
    run(&host, "kill 1 10");
    run(&host, "warmup on");

    assert_eq!(
        run(&host, "say 1 !buylevel"),
        vec!["[chat -> 1] You cannot buy levels during warmup.".to_string()]
    );
}

#[test]
fn test_status_reports_progress() {
    let host = host();
    run(&host, "join 4 Gabe");
    run(&host, "kill 4 3");

    assert_eq!(
        run(&host, "status 4"),
        vec!["slot 4: level 1, kills 3, holding weapon_glock, alive".to_string()]
    );
    assert_eq!(
        run(&host, "status 5"),
        vec!["slot 5 has no progression record".to_string()]
    );
}

#[test]
fn test_leave_drops_player_and_record() {
    let host = host();
    run(&host, "join 1 Gabe");

    run(&host, "leave 1");

    assert!(host.roster().player(slot(1)).is_none());
    assert!(host.progression().snapshot(slot(1)).is_none());
    assert_eq!(
        run(&host, "kill 1"),
        vec!["cannot award kills: ProgressionRecord not found: 1".to_string()]
    );
}

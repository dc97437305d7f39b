use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use bayonet_core::driver::{AutoPolicy, EncounterReport, run_encounter};
use bayonet_core::log::{LogEntry, LogKind, StrikeOutcome};
use bayonet_core::presets::{preset_by_name, preset_npcs};
use bayonet_core::{BattleState, MeleeConfig, MeleeOutcome, SurvivalRule};

/// Options for one simulation run.
pub struct SimulateArgs<'a> {
    pub preset: &'a str,
    pub encounter: Option<&'a Path>,
    pub seed: u64,
    pub rounds: u32,
    pub stance: &'a str,
    pub grace: u32,
    pub survival: bool,
    pub json: bool,
    pub verbose: bool,
    pub output: Option<&'a Path>,
}

pub fn run(args: SimulateArgs<'_>) -> Result<(), String> {
    let stance = super::parse_stance(args.stance)?;
    let (mut battle, source) = match args.encounter {
        Some(path) => (super::load_encounter(path)?, path.display().to_string()),
        None => (
            preset_by_name(args.preset).map_err(|e| e.to_string())?,
            args.preset.to_string(),
        ),
    };

    let config = MeleeConfig::default()
        .with_seed(args.seed)
        .with_max_rounds(args.rounds)
        .with_grace_charges(args.grace)
        .with_survival(args.survival.then(SurvivalRule::default));

    let mut policy = AutoPolicy::new(stance);
    let report = run_encounter(&mut battle, &mut policy, &preset_npcs(), &config)
        .map_err(|e| format!("simulation error: {e}"))?;

    if let Some(path) = args.output {
        let json = battle
            .to_json()
            .map_err(|e| format!("cannot serialize battle: {e}"))?;
        std::fs::write(path, json)
            .map_err(|e| format!("cannot write '{}': {e}", path.display()))?;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("cannot serialize report: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    print_report(&battle, &report, &source, &args, stance.to_string());
    Ok(())
}

fn print_report(
    battle: &BattleState,
    report: &EncounterReport,
    source: &str,
    args: &SimulateArgs<'_>,
    stance: String,
) {
    println!(
        "  {} '{}' {}",
        "Melee".bold(),
        source,
        format!("(seed={}, stance={stance}, max {} rounds)", args.seed, args.rounds).dimmed()
    );
    let outcome = match report.outcome {
        Some(MeleeOutcome::Victory) => "VICTORY".green().bold(),
        Some(MeleeOutcome::Survived) => "SURVIVED".yellow().bold(),
        Some(MeleeOutcome::Defeat) => "DEFEAT".red().bold(),
        None => "UNDECIDED".dimmed(),
    };
    println!(
        "  {outcome} after {} rounds, {} kills, {} health left",
        report.rounds, report.kill_count, report.player_health
    );
    if report.graces_used > 0 {
        println!("  {} grace spent", report.graces_used);
    }
    println!();

    if args.verbose {
        println!("  {}", "Round Log".bold().underline());
        println!();
        for entry in &report.log {
            let label = format!("[round {:>2}]", entry.round).dimmed();
            println!("  {label} {}", colorize_entry(entry));
        }
        if report.log.is_empty() {
            println!("  {}", "(no entries)".dimmed());
        }
        println!();
    } else {
        let notable: Vec<_> = report
            .log
            .iter()
            .filter(|e| {
                matches!(
                    e.kind,
                    LogKind::OpponentDefeated { .. }
                        | LogKind::AllyFell { .. }
                        | LogKind::PlayerFell
                        | LogKind::AllyJoined { .. }
                )
            })
            .collect();
        if !notable.is_empty() {
            println!("  {}", "Notable Events".bold().underline());
            for entry in notable {
                let label = format!("[round {:>2}]", entry.round).dimmed();
                println!("  {label} {}", colorize_entry(entry));
            }
            println!();
        }
    }

    println!("  {}", "Combatants".bold().underline());
    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Side", "Health", "Stamina", "Status"]);

    table.add_row(vec![
        battle.player.name.clone(),
        "player".to_string(),
        battle.player.health.to_string(),
        battle.player.stamina.to_string(),
        if battle.player.is_alive() { "fighting" } else { "fallen" }.to_string(),
    ]);
    for ally in &battle.melee.allies {
        table.add_row(vec![
            ally.name.clone(),
            format!("ally ({})", ally.personality),
            ally.health.to_string(),
            ally.stamina.to_string(),
            if ally.is_active() { "fighting" } else { "fallen" }.to_string(),
        ]);
    }
    for (index, opponent) in battle.melee.opponents.iter().enumerate() {
        let status = if opponent.is_routed() {
            "routed"
        } else if opponent.is_defeated() {
            "dead"
        } else if battle.melee.active_enemies.contains(&index) {
            "engaged"
        } else {
            "waiting"
        };
        table.add_row(vec![
            opponent.name.clone(),
            format!("enemy ({})", opponent.kind),
            opponent.health.to_string(),
            opponent.stamina.to_string(),
            status.to_string(),
        ]);
    }
    println!("{table}");
    println!();
    println!("  Morale change: {:+}", report.morale_total);
}

fn colorize_entry(entry: &LogEntry) -> colored::ColoredString {
    let description = entry.description.as_str();
    match &entry.kind {
        LogKind::Attack(record) => match record.outcome {
            StrikeOutcome::Hit | StrikeOutcome::BlockFailed => description.normal(),
            StrikeOutcome::Blocked => description.cyan(),
            StrikeOutcome::Missed => description.dimmed(),
        },
        LogKind::OpponentDefeated { .. } => description.green().bold(),
        LogKind::AllyFell { .. } | LogKind::PlayerFell => description.red().bold(),
        LogKind::AllyJoined { .. } | LogKind::EnemyArrived { .. } => description.blue(),
        LogKind::MaxEnemiesRaised { .. } => description.yellow(),
        LogKind::WaveSkipped { .. } | LogKind::StunnedTurn { .. } => description.dimmed(),
        LogKind::Guard { .. }
        | LogKind::Respite { .. }
        | LogKind::Reload { .. }
        | LogKind::Feint { .. }
        | LogKind::StanceChanged { .. } => description.normal(),
    }
}

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use bayonet_core::presets::opponent;
use bayonet_core::state::OpponentType;
use bayonet_core::{BodyPart, MeleeAction, Stance};

const TABLES: [&str; 4] = ["stances", "actions", "body", "opponents"];

pub fn run(only: Option<&str>) -> Result<(), String> {
    let selected: Vec<&str> = match only {
        Some(name) => {
            let key = name.trim().to_lowercase();
            let found = TABLES
                .iter()
                .find(|t| **t == key)
                .ok_or_else(|| {
                    format!("unknown table '{name}'. Use: {}", TABLES.join(", "))
                })?;
            vec![*found]
        }
        None => TABLES.to_vec(),
    };

    for (i, name) in selected.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("  {}", name.bold().underline());
        println!();
        let table = match *name {
            "stances" => stances(),
            "actions" => actions(),
            "body" => body_parts(),
            _ => opponents(),
        };
        println!("{table}");
    }

    Ok(())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn signed(value: f64) -> String {
    format!("{value:+.2}")
}

fn stances() -> Table {
    let mut table = new_table(vec!["Stance", "Attack", "Defense", "Stamina x"]);
    for stance in Stance::ALL {
        let def = stance.def();
        table.add_row(vec![
            stance.to_string(),
            signed(def.attack),
            signed(def.defense),
            format!("{:.1}", def.stamina_cost),
        ]);
    }
    table
}

fn actions() -> Table {
    let mut table = new_table(vec!["Action", "Stamina", "Hit", "Damage x", "Stun", "Attack"]);
    for action in MeleeAction::ALL {
        let def = action.def();
        table.add_row(vec![
            action.to_string(),
            def.stamina.to_string(),
            signed(def.hit_bonus),
            format!("{:.1}", def.damage_mod),
            signed(def.stun_bonus),
            if def.is_attack { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}

fn body_parts() -> Table {
    let mut table = new_table(vec!["Body part", "Hit", "Damage"]);
    for part in BodyPart::ALL {
        let def = part.def();
        table.add_row(vec![
            part.to_string(),
            signed(def.hit_mod),
            format!("{}-{}", def.damage_min, def.damage_max),
        ]);
    }
    table
}

fn opponents() -> Table {
    let mut table = new_table(vec![
        "Type", "Health", "Stamina", "Strength", "Base hit", "Breaks at",
    ]);
    for kind in OpponentType::ALL {
        let sample = opponent("", kind);
        let breaks = kind
            .break_threshold()
            .map_or_else(|| "never".to_string(), |t| format!("{:.0}%", t * 100.0));
        table.add_row(vec![
            kind.to_string(),
            sample.health.max.to_string(),
            sample.stamina.max.to_string(),
            sample.strength.to_string(),
            format!("{:.2}", kind.base_hit_rate()),
            breaks,
        ]);
    }
    table
}

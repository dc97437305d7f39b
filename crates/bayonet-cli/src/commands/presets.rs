use comfy_table::{ContentArrangement, Table};

use bayonet_core::presets::PRESETS;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Opponents", "Cap", "Allies", "Waves", "Description"]);

    for preset in &PRESETS {
        let battle = preset.build();
        let melee = &battle.melee;
        table.add_row(vec![
            preset.name.to_string(),
            melee.opponents.len().to_string(),
            melee.max_active_enemies.to_string(),
            melee.allies.len().to_string(),
            melee.wave_events.len().to_string(),
            preset.description.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} presets", PRESETS.len());

    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use cave_core::{CaveParameters, GeneratedRoom, generate_playable_room, preset_for_room};
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for reproducible generation; omit to draw runtime entropy
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 50)]
    width: usize,
    #[arg(long, default_value_t = 37)]
    height: usize,
    /// Room index selecting a built-in parameter preset
    #[arg(short, long, default_value_t = 0)]
    room: usize,
    /// Path to a JSON parameter file overriding the preset
    #[arg(short, long)]
    params: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let params: CaveParameters = match &args.params {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("Failed to read parameter file: {path}"))?;
            serde_json::from_str(&data).with_context(|| "Failed to deserialize parameter JSON")?
        }
        None => preset_for_room(args.room),
    };

    let room = generate_playable_room(args.width, args.height, &params, args.seed)
        .map_err(|e| anyhow::anyhow!("Generation failed: {:?}", e))?;

    print_room(&room);
    println!("Kind: {:?}", params.kind);
    println!("Open cells: {}", room.grid.open_cell_count());
    println!("Wall rects: {}", room.walls.len());
    println!("Spawn candidates: {}", room.open_spaces.len());
    println!("Fingerprint: {:016x}", room.fingerprint());

    Ok(())
}

fn print_room(room: &GeneratedRoom) {
    for y in 0..room.height() {
        let mut line = String::with_capacity(room.width());
        for x in 0..room.width() {
            line.push(if room.grid.get(x, y) { '#' } else { '.' });
        }
        println!("{line}");
    }
}

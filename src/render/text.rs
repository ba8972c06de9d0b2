//! Plain-text renderer: an ASCII map plus a survivor status table

use std::io::Write;

use crate::core::error::Result;
use crate::core::types::Position;
use crate::ecs::snapshot::WorldSnapshot;
use crate::render::RenderSink;
use crate::world::grid::Tile;

/// Log lines printed under the status table
const LOG_LINES: usize = 5;

pub fn tile_glyph(tile: Tile) -> char {
    match tile {
        Tile::Water => '~',
        Tile::Sand => '.',
        Tile::Grass => ',',
        Tile::Forest => 'T',
        Tile::WoodenFloor => '_',
        Tile::WoodenWall => '#',
        Tile::Bed => 'b',
        Tile::Chest => 'C',
    }
}

/// One character per cell. Survivors show their initial, mobs an `M`.
pub fn render_map(snapshot: &WorldSnapshot) -> String {
    let size = snapshot.grid.size();
    let mut out = String::with_capacity(size * (size + 1));

    for (y, row) in snapshot.grid.rows().enumerate() {
        for (x, tile) in row.iter().enumerate() {
            let pos = Position::new(x as i32, y as i32);
            let glyph = if let Some(s) = snapshot.survivors.iter().find(|s| s.position == pos) {
                s.name.chars().next().unwrap_or('@').to_ascii_uppercase()
            } else if snapshot.mobs.iter().any(|m| m.position == pos) {
                'M'
            } else {
                tile_glyph(*tile)
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Header line, one row per survivor, then the newest log lines
pub fn render_status(snapshot: &WorldSnapshot) -> String {
    let phase = if snapshot.is_night { "night" } else { "day" };
    let mut out = format!(
        "Day {} ({:.0}% {}) | tick {} | mobs {} | chests {}\n",
        snapshot.day + 1,
        snapshot.day_progress * 100.0,
        phase,
        snapshot.tick,
        snapshot.mobs.len(),
        snapshot.chests.len()
    );

    for s in &snapshot.survivors {
        let thinking = if snapshot.thinking == Some(s.id) { " (thinking...)" } else { "" };
        out.push_str(&format!(
            "{:<8} HP {:>5.1} HU {:>5.1} EN {:>5.1}  {:<16} {}{}\n",
            s.name,
            s.stats.health,
            s.stats.hunger,
            s.stats.energy,
            s.action.kind().as_str(),
            s.inventory,
            thinking
        ));
        if let Some(bubble) = &s.bubble {
            out.push_str(&format!("         \"{}\"\n", bubble.text));
        }
    }

    let skip = snapshot.log.len().saturating_sub(LOG_LINES);
    for entry in snapshot.log.iter().skip(skip) {
        out.push_str(&format!("[{:>5}] {}\n", entry.tick, entry.message));
    }
    out
}

/// Writes map and status every `every` ticks
pub struct TextRenderer<W: Write + Send> {
    out: W,
    every: u64,
}

impl<W: Write + Send> TextRenderer<W> {
    pub fn new(out: W, every: u64) -> Self {
        Self {
            out,
            every: every.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextRenderer<std::io::Stdout> {
    pub fn stdout(every: u64) -> Self {
        Self::new(std::io::stdout(), every)
    }
}

impl<W: Write + Send> RenderSink for TextRenderer<W> {
    fn render(&mut self, snapshot: &WorldSnapshot) -> Result<()> {
        if snapshot.tick % self.every != 0 {
            return Ok(());
        }
        writeln!(self.out, "{}", render_map(snapshot))?;
        writeln!(self.out, "{}", render_status(snapshot))?;
        self.out.flush()?;
        Ok(())
    }
}

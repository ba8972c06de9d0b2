//! Gather colony context for LLM prompts
//!
//! Builds the per-survivor situation report sent with every decision
//! request: time of day, own state, surroundings, team, storage, threats
//! and recent chat.

use crate::core::error::Result;
use crate::decision::oracle::DecisionRequest;
use crate::world::grid::Tile;

/// Radius of the square of tiles a survivor "sees"
pub const VIEW_RADIUS: i32 = 3;

/// Chat lines included in the prompt
pub const CHAT_LINES: usize = 5;

/// A teammate as seen by the deciding survivor
pub struct TeammateInfo {
    pub name: String,
    pub action: String,
    /// Offset from the deciding survivor
    pub offset: (i32, i32),
    pub inventory: String,
}

/// Situation report for one decision
pub struct ColonyContext {
    pub name: String,
    pub day_progress: u32,
    pub is_night: bool,
    pub health: f32,
    pub hunger: f32,
    pub energy: f32,
    pub inventory: String,
    pub current_action: String,
    /// `(dx, dy): TILE` entries around the survivor, row-major
    pub surroundings: Vec<String>,
    pub beds: usize,
    pub team_size: usize,
    pub teammates: Vec<TeammateInfo>,
    pub chests: Vec<String>,
    pub threats: Vec<String>,
    pub chat: Vec<String>,
    pub recipes: Vec<String>,
}

impl ColonyContext {
    /// Build the context for the survivor named in `request`
    pub fn from_request(request: &DecisionRequest, threat_radius: u32) -> Result<Self> {
        let snapshot = &request.snapshot;
        let me = request.subject()?;
        let pos = me.position;

        let mut surroundings = Vec::new();
        for dy in -VIEW_RADIUS..=VIEW_RADIUS {
            for dx in -VIEW_RADIUS..=VIEW_RADIUS {
                if let Some(tile) = snapshot.tile_at(pos.offset(dx, dy)) {
                    surroundings.push(format!("({dx}, {dy}): {}", tile.as_str()));
                }
            }
        }

        let teammates = snapshot
            .survivors
            .iter()
            .filter(|s| s.id != me.id)
            .map(|s| TeammateInfo {
                name: s.name.clone(),
                action: s.action.kind().to_string(),
                offset: (s.position.x - pos.x, s.position.y - pos.y),
                inventory: s.inventory.to_string(),
            })
            .collect();

        let chests = snapshot
            .chests
            .iter()
            .enumerate()
            .map(|(i, c)| format!("Chest {i} at {}: {}", c.position, c.inventory))
            .collect();

        let threats = snapshot
            .mobs
            .iter()
            .filter(|m| m.position.chebyshev(&pos) < threat_radius)
            .map(|m| format!("Mob at {} with {:.0} HP", m.position, m.health))
            .collect();

        let skip = snapshot.chat.len().saturating_sub(CHAT_LINES);
        let chat = snapshot
            .chat
            .iter()
            .skip(skip)
            .map(|m| format!("{}: \"{}\"", m.survivor_name, m.text))
            .collect();

        Ok(Self {
            name: me.name.clone(),
            day_progress: (snapshot.day_progress * 100.0).round() as u32,
            is_night: snapshot.is_night,
            health: me.stats.health,
            hunger: me.stats.hunger,
            energy: me.stats.energy,
            inventory: me.inventory.to_string(),
            current_action: me.action.kind().to_string(),
            surroundings,
            beds: snapshot.grid.count(Tile::Bed),
            team_size: snapshot.survivors.len(),
            teammates,
            chests,
            threats,
            chat,
            recipes: snapshot.recipes.clone(),
        })
    }

    pub fn has_threats(&self) -> bool {
        !self.threats.is_empty()
    }

    /// Text block for the user turn of the prompt
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str(&format!(
            "Time: day progress {}%, it is {}.\n",
            self.day_progress,
            if self.is_night { "NIGHT" } else { "DAY" }
        ));
        s.push_str(&format!(
            "You: {} | Health={:.0} Energy={:.0} Hunger={:.0} | Action={}\n",
            self.name, self.health, self.energy, self.hunger, self.current_action
        ));
        s.push_str(&format!("Inventory: {}\n", self.inventory));

        s.push_str(&format!("\nTeam (beds built: {} of {}):\n", self.beds, self.team_size));
        for mate in &self.teammates {
            s.push_str(&format!(
                "- {} ({}) at ({}, {}) Inv: {}\n",
                mate.name, mate.action, mate.offset.0, mate.offset.1, mate.inventory
            ));
        }

        s.push_str("\nShared chests:\n");
        if self.chests.is_empty() {
            s.push_str("  None\n");
        }
        for chest in &self.chests {
            s.push_str(&format!("- {chest}\n"));
        }

        s.push_str(&format!(
            "\nSurroundings (relative to you): {}\n",
            self.surroundings.join(", ")
        ));

        s.push_str("\nNearby mobs (DANGER!):\n");
        if self.threats.is_empty() {
            s.push_str("  None\n");
        }
        for threat in &self.threats {
            s.push_str(&format!("- {threat}\n"));
        }

        s.push_str("\nRecent chat:\n");
        if self.chat.is_empty() {
            s.push_str("  No recent messages.\n");
        }
        for line in &self.chat {
            s.push_str(&format!("- {line}\n"));
        }

        s.push_str(&format!("\nKnown recipes: {}\n", self.recipes.join(", ")));
        s
    }
}

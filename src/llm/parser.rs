//! Decision prompt and response parsing
//!
//! The model answers in free text that should contain one JSON object
//! matching [`DecisionResponse`]. Anything around the object is ignored.

use crate::core::error::{ColonyError, Result};
use crate::decision::oracle::DecisionResponse;
use crate::llm::client::LlmClient;
use crate::llm::context::ColonyContext;

/// Ask the model for a decision given a prepared context
pub async fn request_decision(client: &LlmClient, context: &ColonyContext) -> Result<DecisionResponse> {
    let system_prompt = system_prompt(&context.name);
    let user_prompt = format!(
        "{}\nBased on all this information, what is your next action and why? Reply with JSON only.",
        context.summary()
    );

    let response = client.complete(&system_prompt, &user_prompt).await?;
    parse_decision(&response)
}

/// Parse a model reply into a decision
pub fn parse_decision(response: &str) -> Result<DecisionResponse> {
    let json_str = extract_json(response)?;
    serde_json::from_str(json_str).map_err(|e| {
        ColonyError::OracleFailure(format!("Failed to parse decision: {e} - Response: {response}"))
    })
}

/// Extract JSON object from LLM response (handles surrounding text)
pub fn extract_json(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| ColonyError::OracleFailure("No JSON found in response".into()))?;
    let end = response
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| ColonyError::OracleFailure("No closing brace found in response".into()))?;
    Ok(&response[start..=end])
}

fn system_prompt(name: &str) -> String {
    format!("You are {name}, a survivor on a deserted island. {DECISION_RULES}")
}

/// Rules of the island and the reply format
const DECISION_RULES: &str = r#"Survive by cooperating with your team to build a shelter and by fighting the mobs that appear at night.

PRIORITIES:
- COMBAT: if mobs are nearby, especially at NIGHT, choose FIGHTING. A WOODEN_SWORD deals far more damage.
- LOW STATS: below 40 health or 20 energy, REST on a BED. With no bed, work toward one.
- Before nightfall, make sure you hold a WOODEN_SWORD (WOOD -> Wooden Planks -> Wooden Sword).
- With planks in hand, build next to existing WOODEN_FLOOR: floors first, then walls around them.
- Furnish the base: craft and place beds for everyone, and chests for shared storage.
- Otherwise gather wood in a FOREST. Deposit spare resources in a chest.

ACTIONS:
IDLE, GATHERING_WOOD, BUILDING_FLOOR, BUILDING_WALL, PLACING_ITEM, CRAFTING, EXPLORING,
RESTING, FIGHTING, DEPOSITING_ITEM, WITHDRAWING_ITEM, GIVING_ITEM, FISHING, GATHERING_STRING

ITEMS:
WOOD, WOODEN_PLANK, BED, WOODEN_SWORD, CHEST_ITEM, STRING, FISHING_ROD, FISH

OUTPUT FORMAT (JSON only, no explanation):
{
  "action": "ACTION",
  "reasoning": "short explanation from your perspective",
  "message": "optional short message to the team, or null",
  "craftingRecipeName": "recipe name if CRAFTING, else null",
  "itemToPlace": "BED or CHEST_ITEM if PLACING_ITEM, else null",
  "depositItem": "item if DEPOSITING_ITEM, else null",
  "withdrawItem": "item if WITHDRAWING_ITEM, else null",
  "giveItem": "item if GIVING_ITEM, else null",
  "targetSurvivorName": "teammate name if GIVING_ITEM, else null"
}

Examples:
{"action": "GATHERING_WOOD", "reasoning": "We need wood for planks.", "message": null}
{"action": "CRAFTING", "reasoning": "I have wood.", "craftingRecipeName": "Wooden Planks"}
{"action": "FIGHTING", "reasoning": "A mob is right next to me!", "message": "Mob at camp, help!"}
"#;

//! Shared components, resources, events, and states for Witherford.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

/// The outer shell owns the main menu; the core starts in `Loading`,
/// moves to `Playing` once the data registries are populated, and toggles
/// into `Shop` / `Paused` from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Shop,
    Paused,
}

// ═══════════════════════════════════════════════════════════════════════
// SEASONS & FACING
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    /// Lowercase name as used in the save schema.
    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "autumn" => Some(Season::Autumn),
            "winter" => Some(Season::Winter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// Suffixes that animation status strings append to a base direction.
/// `"leftAxe"`, `"downIdle"`, `"upWater"` all normalize to their base.
const STATUS_SUFFIXES: [&str; 5] = ["Idle", "Hoe", "Axe", "Water", "Pickaxe"];

impl Facing {
    /// Grid delta for the tile one step in this direction.
    /// Y grows downward, matching pixel coordinates.
    pub fn offset(self) -> IVec2 {
        match self {
            Facing::Up => IVec2::new(0, -1),
            Facing::Down => IVec2::new(0, 1),
            Facing::Left => IVec2::new(-1, 0),
            Facing::Right => IVec2::new(1, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }

    /// Normalize a compound animation status (`"leftAxe"`, `"downIdle"`)
    /// to its base direction by stripping the known suffix vocabulary.
    ///
    /// Panics on anything that doesn't reduce to a cardinal direction:
    /// an unrecognized status is a logic defect upstream, not something
    /// to silently coerce to a default.
    pub fn from_status(status: &str) -> Facing {
        let mut base = status;
        for suffix in STATUS_SUFFIXES {
            if let Some(stripped) = base.strip_suffix(suffix) {
                base = stripped;
                break;
            }
        }
        match base {
            "up" => Facing::Up,
            "down" => Facing::Down,
            "left" => Facing::Left,
            "right" => Facing::Right,
            _ => panic!("unrecognized actor status '{status}'"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TOOLS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Hoe,
    WateringCan,
    Axe,
    Pickaxe,
}

impl ToolKind {
    /// Status-string suffix this tool appends while in use.
    pub fn status_suffix(self) -> &'static str {
        match self {
            ToolKind::Hoe => "Hoe",
            ToolKind::WateringCan => "Water",
            ToolKind::Axe => "Axe",
            ToolKind::Pickaxe => "Pickaxe",
        }
    }
}

/// The ordered list of tools for cycling.
pub const TOOL_ORDER: [ToolKind; 4] = [
    ToolKind::Hoe,
    ToolKind::WateringCan,
    ToolKind::Axe,
    ToolKind::Pickaxe,
];

// ═══════════════════════════════════════════════════════════════════════
// ITEMS & REGISTRIES
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every item type in the game.
/// String IDs keep the catalogs data-driven.
pub type ItemId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Seed,
    Crop,
    Material,
    Tool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    /// Atlas index the external renderer uses for the item icon.
    pub icon_index: u32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ItemRegistry {
    pub items: HashMap<ItemId, ItemDef>,
}

impl ItemRegistry {
    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    /// Icon for an item, or the deterministic placeholder index when the
    /// item (or its art) is unknown. Missing art must never crash.
    pub fn icon_or_placeholder(&self, id: &str) -> u32 {
        self.get(id)
            .map(|def| def.icon_index)
            .unwrap_or(PLACEHOLDER_ICON_INDEX)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropDef {
    pub id: ItemId,
    pub name: String,
    /// Total growth time in in-game seconds.
    pub growth_time: f32,
    /// Number of visual growth stages (indices `0..stages`).
    pub stages: u8,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct CropRegistry {
    pub crops: HashMap<ItemId, CropDef>,
}

impl CropRegistry {
    pub fn get(&self, id: &str) -> Option<&CropDef> {
        self.crops.get(id)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySlot {
    pub item_id: ItemId,
    pub quantity: u32,
    /// Icon reference carried with the slot so the hotbar can render
    /// without a registry lookup.
    pub icon_index: u32,
}

/// Bounded slot collection with unconditional stacking: a kind already in
/// the bag always stacks, capacity only limits *distinct* kinds.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub capacity: usize,
    pub items: Vec<InventorySlot>,
    pub selected_index: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            capacity: INVENTORY_CAPACITY,
            items: Vec::new(),
            selected_index: 0,
        }
    }
}

impl Inventory {
    /// Add `quantity` of an item. Stacking onto an existing slot always
    /// succeeds; a new kind only fits while there is a free slot.
    /// Returns false (with no mutation) when the inventory is full.
    pub fn add_item(&mut self, item_id: &str, quantity: u32, icon_index: u32) -> bool {
        if let Some(slot) = self.items.iter_mut().find(|s| s.item_id == item_id) {
            slot.quantity += quantity;
            return true;
        }
        if self.items.len() < self.capacity {
            self.items.push(InventorySlot {
                item_id: item_id.to_string(),
                quantity,
                icon_index,
            });
            return true;
        }
        false
    }

    /// Decrement a slot by `quantity`; the slot is removed once it hits
    /// zero and later slots shift down. Indices are NOT stable across a
    /// removal, so callers must not cache them.
    pub fn remove_item(&mut self, slot_index: usize, quantity: u32) {
        if let Some(slot) = self.items.get_mut(slot_index) {
            slot.quantity = slot.quantity.saturating_sub(quantity);
            if slot.quantity == 0 {
                self.items.remove(slot_index);
            }
        }
    }

    /// Cursor cycles over `capacity`, not over occupied slots, so it can
    /// rest on an empty slot. Intentional hotbar behavior.
    pub fn select_next(&mut self) {
        self.selected_index = (self.selected_index + 1) % self.capacity;
    }

    pub fn select_prev(&mut self) {
        self.selected_index = (self.selected_index + self.capacity - 1) % self.capacity;
    }

    pub fn selected_slot(&self) -> Option<&InventorySlot> {
        self.items.get(self.selected_index)
    }

    pub fn count(&self, item_id: &str) -> u32 {
        self.items
            .iter()
            .filter(|s| s.item_id == item_id)
            .map(|s| s.quantity)
            .sum()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

/// Marker component for the player entity.
#[derive(Component, Debug, Clone, Default)]
pub struct Player;

#[derive(Component, Debug, Clone)]
pub struct PlayerMovement {
    pub facing: Facing,
    pub speed: f32,
    /// Animation status string (`"down"`, `"leftIdle"`, `"rightAxe"`, …).
    /// The renderer consumes it; tile targeting normalizes it back to a
    /// base direction.
    pub status: String,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            facing: Facing::Down,
            speed: 200.0,
            status: "downIdle".to_string(),
        }
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub money: u32,
    pub tool_index: usize,
    pub seed_index: usize,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            money: PLAYER_START_MONEY,
            tool_index: 0,
            seed_index: 0,
        }
    }
}

impl PlayerState {
    pub fn equipped_tool(&self) -> ToolKind {
        TOOL_ORDER[self.tool_index % TOOL_ORDER.len()]
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FARM STATE — soil and crops, keyed by tile
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SoilTile {
    pub tilled: bool,
    /// Carried and persisted, currently inert for growth.
    pub watered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub kind: ItemId,
    pub stage: u8,
    pub elapsed_growth: f32,
    pub fully_grown: bool,
    pub harvested: bool,
}

impl Crop {
    pub fn new(kind: impl Into<ItemId>) -> Self {
        Self {
            kind: kind.into(),
            stage: 0,
            elapsed_growth: 0.0,
            fully_grown: false,
            harvested: false,
        }
    }

    /// Advance growth by `delta` in-game seconds and re-derive the stage:
    /// `stage = min(N-1, elapsed / (total / (N-1)))`. Monotonic by
    /// construction, since elapsed time only accumulates.
    pub fn advance(&mut self, delta: f32, def: &CropDef) {
        if self.fully_grown {
            return;
        }
        self.elapsed_growth += delta;
        let last_stage = def.stages.saturating_sub(1).max(1);
        let per_stage = def.growth_time / last_stage as f32;
        let target = (self.elapsed_growth / per_stage) as u8;
        // max() keeps the stage monotone even for state loaded from a
        // snapshot whose elapsed time disagrees with its stage.
        self.stage = target.min(last_stage).max(self.stage);
        self.fully_grown = self.elapsed_growth >= def.growth_time;
        if self.fully_grown {
            self.stage = last_stage;
        }
    }
}

/// Tilled-soil and crop state for the farm map. The tile-coordinate key
/// makes "at most one per tile" hold by construction. Persistence goes
/// through the save schema's entry lists, not through this type.
#[derive(Resource, Debug, Clone, Default)]
pub struct FarmState {
    pub soil: HashMap<(i32, i32), SoilTile>,
    pub crops: HashMap<(i32, i32), Crop>,
}

// ═══════════════════════════════════════════════════════════════════════
// GAME CLOCK
// ═══════════════════════════════════════════════════════════════════════

/// In-game time within the current day, measured in game-seconds.
/// One real second advances the clock by `TIME_RATE` game-seconds.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    pub current_time: f32,
    pub day_count: u32,
    pub season: Season,
    /// One-shot autosave guard: armed while outside the trigger minute,
    /// disarmed after firing until the clock leaves it again.
    pub autosave_armed: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            current_time: 6.0 * TIME_RATE, // days start at 6:00 AM
            day_count: 1,
            season: Season::Spring,
            autosave_armed: true,
        }
    }
}

impl GameClock {
    pub fn hour(&self) -> u32 {
        (self.current_time / TIME_RATE) as u32
    }

    pub fn minute(&self) -> u32 {
        (self.current_time % TIME_RATE) as u32
    }

    pub fn time_string(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }

    pub fn day_string(&self) -> String {
        let season = self.season.name();
        let mut label: String = season.chars().take(1).flat_map(char::to_uppercase).collect();
        label.push_str(&season[1..]);
        format!("Day {} - {}", self.day_count, label)
    }
}

/// Ambient tint the external renderer composites over the scene.
/// Pure presentation data derived from the clock.
#[derive(Resource, Debug, Clone)]
pub struct DayNightTint {
    pub color: Color,
}

impl Default for DayNightTint {
    fn default() -> Self {
        Self { color: Color::NONE }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ECONOMY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopListing {
    pub item_id: ItemId,
    pub price: u32,
}

/// Items available for purchase, in display order.
#[derive(Resource, Debug, Clone, Default)]
pub struct ShopCatalog {
    pub listings: Vec<ShopListing>,
}

/// Sell prices by item kind. Anything unlisted sells for 1.
#[derive(Resource, Debug, Clone, Default)]
pub struct PriceTable {
    pub sell_prices: HashMap<ItemId, u32>,
}

impl PriceTable {
    pub fn sell_price(&self, item_id: &str) -> u32 {
        self.sell_prices.get(item_id).copied().unwrap_or(1)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD ENTITY CONTRACT
// ═══════════════════════════════════════════════════════════════════════

/// Simulation-space position in pixels. The renderer maps it to screen
/// space; nothing in the core touches a transform.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LogicalPosition(pub Vec2);

/// Draw-order layer index. See the `LAYER_*` constants.
#[derive(Component, Debug, Clone, Copy)]
pub struct RenderLayer(pub i32);

/// Axis-aligned footprint used for both render placement and collision
/// queries.
#[derive(Component, Debug, Clone, Copy)]
pub struct BoundingBox(pub Rect);

/// Blocks movement. Explicit flag component instead of group membership.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Collider;

/// Can be picked up into the inventory.
#[derive(Component, Debug, Clone)]
pub struct Pickupable {
    pub item_id: ItemId,
    pub icon_index: u32,
}

/// Decoration that expires after `remaining` seconds; `None` is permanent.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TimedDecoration {
    pub remaining: Option<f32>,
}

/// A choppable tree. Persisted (position/health/alive) in the save
/// schema, so the component lives in the shared contract.
#[derive(Component, Debug, Clone)]
pub struct Tree {
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    /// Terminal: once set, further chop calls have no effect.
    pub is_chopped: bool,
    /// Seconds left in the invulnerability window after a hit.
    pub invulnerable_for: f32,
    /// Gate that makes the wood payout exactly-once.
    pub has_dropped_resources: bool,
}

impl Default for Tree {
    fn default() -> Self {
        Self {
            health: TREE_MAX_HEALTH,
            max_health: TREE_MAX_HEALTH,
            alive: true,
            is_chopped: false,
            invulnerable_for: 0.0,
            has_dropped_resources: false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RNG — injectable so drops and yields are deterministic under test
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// A tool application resolved to a target tile. Fired by the player
/// domain when the tool-use lock elapses; consumed by farming and world.
#[derive(Event, Debug, Clone)]
pub struct ToolUseEvent {
    pub tool: ToolKind,
    pub target_tile: IVec2,
}

#[derive(Event, Debug, Clone)]
pub struct PlantSeedEvent {
    pub tile: IVec2,
    pub seed_id: ItemId,
    /// Inventory slot the seed is drawn from on success.
    pub slot_index: usize,
}

#[derive(Event, Debug, Clone)]
pub struct HarvestAttemptEvent {
    pub tile: IVec2,
}

#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day_count: u32,
    pub season: Season,
}

#[derive(Event, Debug, Clone)]
pub struct SeasonChangeEvent {
    pub new_season: Season,
}

/// One-shot save trigger from the clock (07:00 crossing or day rollover).
#[derive(Event, Debug, Clone)]
pub struct AutosaveEvent;

#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Event, Debug, Clone)]
pub struct GoldChangeEvent {
    pub amount: i64, // positive = gain, negative = spend
    pub reason: String,
}

/// Transient, non-blocking player feedback ("Cannot plant here").
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

/// One transient visual particle for the external renderer. Descriptors
/// only; particles are never simulation state.
#[derive(Debug, Clone, Copy)]
pub struct ParticleSpec {
    pub position: Vec2,
    pub velocity: Vec2,
    pub lifetime_secs: f32,
}

#[derive(Event, Debug, Clone)]
pub struct ParticleBurstEvent {
    pub particles: Vec<ParticleSpec>,
}

#[derive(Event, Debug, Clone)]
pub struct BuyRequestEvent {
    pub catalog_index: usize,
}

#[derive(Event, Debug, Clone)]
pub struct SellRequestEvent {
    pub slot_index: usize,
}

#[derive(Event, Debug, Clone)]
pub struct SaveRequestEvent {
    pub slot: u8,
}

#[derive(Event, Debug, Clone)]
pub struct LoadRequestEvent {
    pub slot: u8,
}

#[derive(Event, Debug, Clone)]
pub struct SaveCompleteEvent {
    pub slot: u8,
    pub success: bool,
    pub error_message: Option<String>,
}

#[derive(Event, Debug, Clone)]
pub struct LoadCompleteEvent {
    pub slot: u8,
    pub success: bool,
    pub error_message: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 32.0;

/// Game-seconds that pass per real second.
pub const TIME_RATE: f32 = 60.0;
/// Game-seconds in a full day.
pub const DAY_LENGTH: f32 = 24.0 * TIME_RATE;
pub const DAYS_PER_SEASON: u32 = 28;
/// Hour of day at which the one-shot autosave fires.
pub const AUTOSAVE_HOUR: u32 = 7;

pub const INVENTORY_CAPACITY: usize = 10;
pub const PLAYER_START_MONEY: u32 = 200;

pub const TREE_MAX_HEALTH: i32 = 5;
/// Cooldown after a chop during which further chops are ignored.
pub const TREE_INVULN_SECS: f32 = 0.5;
/// Duration of the tool-use lock; movement is ignored while it runs.
pub const TOOL_USE_SECS: f32 = 0.35;
/// Debounce for tool/seed cycling inputs.
pub const CYCLE_DEBOUNCE_SECS: f32 = 0.2;

/// Tree-fragment clustering (map preprocessing).
pub const CLUSTER_RADIUS_PX: f32 = 32.0;
pub const CLUSTER_MIN_FRAGMENTS: usize = 8;
pub const CLUSTER_MAX_FRAGMENTS: usize = 16;

/// Render layers, back to front.
pub const LAYER_WATER: i32 = 0;
pub const LAYER_GROUND: i32 = 1;
pub const LAYER_SOIL: i32 = 2;
pub const LAYER_CROPS: i32 = 3;
pub const LAYER_MAIN: i32 = 4;
pub const LAYER_ABOVE_PLAYER: i32 = 5;

/// Atlas index of the deterministic placeholder icon used when an asset
/// is missing.
pub const PLACEHOLDER_ICON_INDEX: u32 = 0;

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_normalizes_compound_statuses() {
        assert_eq!(Facing::from_status("left"), Facing::Left);
        assert_eq!(Facing::from_status("leftIdle"), Facing::Left);
        assert_eq!(Facing::from_status("downAxe"), Facing::Down);
        assert_eq!(Facing::from_status("upWater"), Facing::Up);
        assert_eq!(Facing::from_status("rightHoe"), Facing::Right);
        assert_eq!(Facing::from_status("rightPickaxe"), Facing::Right);
    }

    #[test]
    #[should_panic(expected = "unrecognized actor status")]
    fn facing_panics_on_unknown_status() {
        Facing::from_status("northIdle");
    }

    #[test]
    fn season_cycle_wraps() {
        assert_eq!(Season::Winter.next(), Season::Spring);
        assert_eq!(Season::from_name("autumn"), Some(Season::Autumn));
        assert_eq!(Season::from_name("fall"), None);
    }

    #[test]
    fn inventory_stacks_existing_kind_past_capacity() {
        let mut inv = Inventory::default();
        for i in 0..INVENTORY_CAPACITY {
            assert!(inv.add_item(&format!("item_{i}"), 1, 0));
        }
        // Full of distinct kinds, but stacking still succeeds.
        assert!(inv.add_item("item_0", 5, 0));
        assert_eq!(inv.count("item_0"), 6);
    }

    #[test]
    fn inventory_rejects_new_kind_when_full() {
        let mut inv = Inventory::default();
        for i in 0..INVENTORY_CAPACITY {
            inv.add_item(&format!("item_{i}"), 1, 0);
        }
        let before = inv.items.clone();
        assert!(!inv.add_item("one_too_many", 1, 0));
        assert_eq!(inv.items, before);
    }

    #[test]
    fn inventory_removal_shifts_slots_down() {
        let mut inv = Inventory::default();
        inv.add_item("wood", 3, 0);
        inv.add_item("stone", 2, 0);
        inv.remove_item(0, 3);
        assert_eq!(inv.items.len(), 1);
        assert_eq!(inv.items[0].item_id, "stone");
    }

    #[test]
    fn inventory_cursor_cycles_over_capacity() {
        let mut inv = Inventory::default();
        inv.add_item("wood", 1, 0);
        for _ in 0..INVENTORY_CAPACITY {
            inv.select_next();
        }
        assert_eq!(inv.selected_index, 0);
        inv.select_prev();
        // Cursor rests on the last (empty) slot: intended hotbar behavior.
        assert_eq!(inv.selected_index, INVENTORY_CAPACITY - 1);
        assert!(inv.selected_slot().is_none());
    }

    #[test]
    fn crop_stage_derivation_is_clamped() {
        let def = CropDef {
            id: "beans".into(),
            name: "Beans".into(),
            growth_time: 100.0,
            stages: 6,
        };
        let mut crop = Crop::new("beans");
        crop.advance(250.0, &def);
        assert_eq!(crop.stage, 5);
        assert!(crop.fully_grown);
    }
}

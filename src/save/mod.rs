//! Save domain — the versioned snapshot schema and slot management.
//!
//! The schema (and its validation) is the load-bearing part; the file
//! I/O is a thin shim around it. A load only touches in-memory state
//! after the whole file has parsed AND validated — a corrupt slot leaves
//! the running game exactly as it was.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::shared::*;

pub const NUM_SAVE_SLOTS: u8 = 3;
/// Footprint given to trees rebuilt from a save (the schema persists
/// position only; cluster-derived sizes don't survive).
const RESTORED_TREE_SIZE: Vec2 = Vec2::new(50.0, 70.0);

// ═══════════════════════════════════════════════════════════════════════
// SCHEMA — field names match the on-disk JSON exactly
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointData {
    pub x: i32,
    pub y: i32,
}

impl PointData {
    fn from_vec(v: Vec2) -> Self {
        Self {
            x: v.x.round() as i32,
            y: v.y.round() as i32,
        }
    }

    fn to_vec(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    fn from_tile(tile: (i32, i32)) -> Self {
        Self {
            x: tile.0 * TILE_SIZE as i32,
            y: tile.1 * TILE_SIZE as i32,
        }
    }

    fn to_tile(self) -> (i32, i32) {
        (
            self.x.div_euclid(TILE_SIZE as i32),
            self.y.div_euclid(TILE_SIZE as i32),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSection {
    pub position: PointData,
    pub money: u32,
    pub inventory: Vec<InventoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilEntry {
    pub position: PointData,
    pub tilled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropEntry {
    pub position: PointData,
    #[serde(rename = "type")]
    pub kind: String,
    pub stage: u8,
    #[serde(rename = "growthProgress")]
    pub growth_progress: f32,
    #[serde(rename = "fullyGrown")]
    pub fully_grown: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    pub position: PointData,
    pub health: i32,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundItemEntry {
    pub position: PointData,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmSection {
    #[serde(rename = "soilTiles")]
    pub soil_tiles: Vec<SoilEntry>,
    pub crops: Vec<CropEntry>,
    pub trees: Vec<TreeEntry>,
    pub items: Vec<GroundItemEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSection {
    #[serde(rename = "currentTime")]
    pub current_time: f32,
    #[serde(rename = "dayCount")]
    pub day_count: u32,
    pub season: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataSection {
    pub slot: u8,
    pub timestamp: u64,
    #[serde(rename = "dayCount")]
    pub day_count: u32,
    pub season: String,
}

/// One full save slot. Versioned by field presence: a file missing any
/// required section fails to parse and the load aborts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    pub player: PlayerSection,
    pub farm: FarmSection,
    pub time: TimeSection,
    pub metadata: MetadataSection,
}

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not write save file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize save data: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// The non-fatal "slot empty" case, distinct from corruption.
    #[error("save slot {0} is empty")]
    SlotEmpty(u8),
    #[error("could not read save file: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("save file is inconsistent: {0}")]
    Invalid(String),
}

// ═══════════════════════════════════════════════════════════════════════
// VALIDATION
// ═══════════════════════════════════════════════════════════════════════

/// Reject internally inconsistent files before anything is applied.
pub fn validate_save(
    file: &SaveFile,
    items: &ItemRegistry,
    crops: &CropRegistry,
) -> Result<(), LoadError> {
    Season::from_name(&file.time.season)
        .ok_or_else(|| LoadError::Invalid(format!("unknown season '{}'", file.time.season)))?;
    if !(0.0..DAY_LENGTH).contains(&file.time.current_time) {
        return Err(LoadError::Invalid(format!(
            "currentTime {} outside the day",
            file.time.current_time
        )));
    }
    if file.time.day_count == 0 {
        return Err(LoadError::Invalid("dayCount must be at least 1".into()));
    }

    let mut seen_soil = HashSet::new();
    for soil in &file.farm.soil_tiles {
        if !seen_soil.insert(soil.position.to_tile()) {
            return Err(LoadError::Invalid(format!(
                "duplicate soil tile at {:?}",
                soil.position
            )));
        }
    }

    let mut seen_crops = HashSet::new();
    for crop in &file.farm.crops {
        let def = crops.get(&crop.kind).ok_or_else(|| {
            LoadError::Invalid(format!("crop references unknown kind '{}'", crop.kind))
        })?;
        if crop.stage >= def.stages {
            return Err(LoadError::Invalid(format!(
                "crop stage {} out of range for '{}'",
                crop.stage, crop.kind
            )));
        }
        if !seen_crops.insert(crop.position.to_tile()) {
            return Err(LoadError::Invalid(format!(
                "two crops share the tile at {:?}",
                crop.position
            )));
        }
    }

    for entry in &file.farm.items {
        if items.get(&entry.kind).is_none() {
            return Err(LoadError::Invalid(format!(
                "ground item references unknown kind '{}'",
                entry.kind
            )));
        }
    }
    for entry in &file.player.inventory {
        if items.get(&entry.name).is_none() {
            return Err(LoadError::Invalid(format!(
                "inventory references unknown kind '{}'",
                entry.name
            )));
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// FILESYSTEM SHIMS
// ═══════════════════════════════════════════════════════════════════════

fn saves_directory() -> PathBuf {
    PathBuf::from("saves")
}

fn slot_path(slot: u8) -> PathBuf {
    saves_directory().join(format!("save_slot_{slot}.json"))
}

fn write_save(slot: u8, file: &SaveFile) -> Result<(), SaveError> {
    let dir = saves_directory();
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    let json = serde_json::to_string_pretty(file)?;
    // Temp file first, then rename, so a crash can't truncate a slot.
    let path = slot_path(slot);
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)?;
    fs::rename(&tmp_path, &path)?;
    Ok(())
}

fn read_save(slot: u8) -> Result<SaveFile, LoadError> {
    let path = slot_path(slot);
    if !path.exists() {
        return Err(LoadError::SlotEmpty(slot));
    }
    let json = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&json)?)
}

pub fn delete_save(slot: u8) -> bool {
    let path = slot_path(slot);
    path.exists() && fs::remove_file(path).is_ok()
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES & SLOT METADATA
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct ActiveSaveSlot {
    pub slot: u8,
}

impl Default for ActiveSaveSlot {
    fn default() -> Self {
        Self { slot: 1 }
    }
}

/// Info about a save slot shown on the load screen.
#[derive(Debug, Clone)]
pub struct SaveSlotInfo {
    pub slot: u8,
    pub exists: bool,
    pub day_count: u32,
    pub season: Option<Season>,
    pub timestamp: u64,
}

impl SaveSlotInfo {
    fn empty(slot: u8) -> Self {
        Self {
            slot,
            exists: false,
            day_count: 1,
            season: None,
            timestamp: 0,
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SaveSlotInfoCache {
    pub slots: Vec<SaveSlotInfo>,
}

fn peek_save(slot: u8) -> SaveSlotInfo {
    match read_save(slot) {
        Ok(file) => SaveSlotInfo {
            slot,
            exists: true,
            day_count: file.metadata.day_count,
            season: Season::from_name(&file.metadata.season),
            timestamp: file.metadata.timestamp,
        },
        Err(_) => SaveSlotInfo::empty(slot),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveSaveSlot>()
            .init_resource::<SaveSlotInfoCache>()
            .add_systems(Startup, scan_save_slots)
            .add_systems(
                Update,
                (
                    autosave_trigger,
                    quicksave_keybind,
                    handle_save_request,
                    handle_load_request,
                )
                    .run_if(in_state(GameState::Playing).or(in_state(GameState::Paused))),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn scan_save_slots(mut cache: ResMut<SaveSlotInfoCache>) {
    cache.slots = (1..=NUM_SAVE_SLOTS).map(peek_save).collect();
    info!("[Save] Slot scan complete ({NUM_SAVE_SLOTS} slots)");
}

/// The clock's one-shot trigger (07:00 crossing or day rollover) saves to
/// the active slot.
fn autosave_trigger(
    mut autosave_events: EventReader<AutosaveEvent>,
    active_slot: Res<ActiveSaveSlot>,
    mut save_writer: EventWriter<SaveRequestEvent>,
) {
    for _ in autosave_events.read() {
        info!("[Save] Autosave to slot {}", active_slot.slot);
        save_writer.send(SaveRequestEvent {
            slot: active_slot.slot,
        });
    }
}

fn quicksave_keybind(
    input: Res<crate::input::PlayerInput>,
    active_slot: Res<ActiveSaveSlot>,
    mut save_writer: EventWriter<SaveRequestEvent>,
    mut load_writer: EventWriter<LoadRequestEvent>,
) {
    if input.quicksave {
        save_writer.send(SaveRequestEvent {
            slot: active_slot.slot,
        });
    }
    if input.quickload {
        load_writer.send(LoadRequestEvent {
            slot: active_slot.slot,
        });
    }
}

/// Gather the whole world into a `SaveFile`.
#[allow(clippy::too_many_arguments)]
pub fn capture_save(
    slot: u8,
    clock: &GameClock,
    player_state: &PlayerState,
    inventory: &Inventory,
    farm: &FarmState,
    player_position: Vec2,
    trees: &[(Vec2, &Tree)],
    drops: &[(Vec2, &Pickupable)],
) -> SaveFile {
    let mut soil_tiles: Vec<SoilEntry> = farm
        .soil
        .iter()
        .map(|(tile, soil)| SoilEntry {
            position: PointData::from_tile(*tile),
            tilled: soil.tilled,
        })
        .collect();
    soil_tiles.sort_by_key(|entry| (entry.position.y, entry.position.x));

    let mut crops: Vec<CropEntry> = farm
        .crops
        .iter()
        .map(|(tile, crop)| CropEntry {
            position: PointData::from_tile(*tile),
            kind: crop.kind.clone(),
            stage: crop.stage,
            growth_progress: crop.elapsed_growth,
            fully_grown: crop.fully_grown,
        })
        .collect();
    crops.sort_by_key(|entry| (entry.position.y, entry.position.x));

    SaveFile {
        player: PlayerSection {
            position: PointData::from_vec(player_position),
            money: player_state.money,
            inventory: inventory
                .items
                .iter()
                .map(|slot| InventoryEntry {
                    name: slot.item_id.clone(),
                    quantity: slot.quantity,
                })
                .collect(),
        },
        farm: FarmSection {
            soil_tiles,
            crops,
            trees: trees
                .iter()
                .map(|(position, tree)| TreeEntry {
                    position: PointData::from_vec(*position),
                    health: tree.health,
                    alive: tree.alive,
                })
                .collect(),
            items: drops
                .iter()
                .map(|(position, pickup)| GroundItemEntry {
                    position: PointData::from_vec(*position),
                    kind: pickup.item_id.clone(),
                })
                .collect(),
        },
        time: TimeSection {
            current_time: clock.current_time,
            day_count: clock.day_count,
            season: clock.season.name().to_string(),
        },
        metadata: MetadataSection {
            slot,
            timestamp: current_timestamp(),
            day_count: clock.day_count,
            season: clock.season.name().to_string(),
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_save_request(
    mut save_events: EventReader<SaveRequestEvent>,
    mut complete_writer: EventWriter<SaveCompleteEvent>,
    mut active_slot: ResMut<ActiveSaveSlot>,
    mut cache: ResMut<SaveSlotInfoCache>,
    clock: Res<GameClock>,
    player_state: Res<PlayerState>,
    inventory: Res<Inventory>,
    farm: Res<FarmState>,
    player: Query<&LogicalPosition, With<Player>>,
    trees: Query<(&LogicalPosition, &Tree)>,
    drops: Query<(&LogicalPosition, &Pickupable)>,
) {
    for event in save_events.read() {
        let slot = event.slot;
        active_slot.slot = slot;

        let player_position = player
            .get_single()
            .map(|position| position.0)
            .unwrap_or_default();
        let tree_list: Vec<(Vec2, &Tree)> = trees
            .iter()
            .map(|(position, tree)| (position.0, tree))
            .collect();
        let drop_list: Vec<(Vec2, &Pickupable)> = drops
            .iter()
            .map(|(position, pickup)| (position.0, pickup))
            .collect();

        let file = capture_save(
            slot,
            &clock,
            &player_state,
            &inventory,
            &farm,
            player_position,
            &tree_list,
            &drop_list,
        );

        match write_save(slot, &file) {
            Ok(()) => {
                info!("[Save] Saved slot {slot}");
                if let Some(cached) = cache.slots.iter_mut().find(|info| info.slot == slot) {
                    *cached = peek_save(slot);
                }
                complete_writer.send(SaveCompleteEvent {
                    slot,
                    success: true,
                    error_message: None,
                });
            }
            Err(err) => {
                warn!("[Save] Save to slot {slot} failed: {err}");
                complete_writer.send(SaveCompleteEvent {
                    slot,
                    success: false,
                    error_message: Some(err.to_string()),
                });
            }
        }
    }
}

/// Apply a parsed, validated save file to the world. Existing trees and
/// ground drops are replaced wholesale; despawns go through `Commands`
/// and land after this system finishes.
#[allow(clippy::too_many_arguments)]
pub fn apply_save(
    file: &SaveFile,
    commands: &mut Commands,
    clock: &mut GameClock,
    player_state: &mut PlayerState,
    inventory: &mut Inventory,
    farm: &mut FarmState,
    item_registry: &ItemRegistry,
    player: &mut Query<(&mut LogicalPosition, &mut BoundingBox), With<Player>>,
    existing_trees: &Query<Entity, With<Tree>>,
    existing_drops: &Query<Entity, With<Pickupable>>,
) {
    // Season validity was checked in validate_save.
    let season = Season::from_name(&file.time.season).unwrap_or(Season::Spring);
    clock.current_time = file.time.current_time;
    clock.day_count = file.time.day_count;
    clock.season = season;
    clock.autosave_armed = true;

    player_state.money = file.player.money;

    inventory.items.clear();
    inventory.selected_index = 0;
    for entry in &file.player.inventory {
        inventory.add_item(
            &entry.name,
            entry.quantity,
            item_registry.icon_or_placeholder(&entry.name),
        );
    }

    farm.soil.clear();
    for soil in &file.farm.soil_tiles {
        farm.soil.insert(
            soil.position.to_tile(),
            SoilTile {
                tilled: soil.tilled,
                watered: false,
            },
        );
    }
    farm.crops.clear();
    for entry in &file.farm.crops {
        farm.crops.insert(
            entry.position.to_tile(),
            Crop {
                kind: entry.kind.clone(),
                stage: entry.stage,
                elapsed_growth: entry.growth_progress,
                fully_grown: entry.fully_grown,
                harvested: false,
            },
        );
    }

    if let Ok((mut position, mut bounds)) = player.get_single_mut() {
        position.0 = file.player.position.to_vec();
        bounds.0 = Rect::from_center_size(position.0, crate::player::PLAYER_HITBOX);
    }

    for entity in existing_trees.iter().chain(existing_drops.iter()) {
        commands.entity(entity).despawn();
    }

    for entry in &file.farm.trees {
        if !entry.alive {
            continue;
        }
        let min = entry.position.to_vec();
        commands.spawn((
            LogicalPosition(min),
            BoundingBox(Rect::from_corners(min, min + RESTORED_TREE_SIZE)),
            RenderLayer(LAYER_MAIN),
            Collider,
            Tree {
                health: entry.health,
                ..Default::default()
            },
        ));
    }

    for entry in &file.farm.items {
        let position = entry.position.to_vec();
        commands.spawn((
            LogicalPosition(position),
            BoundingBox(Rect::from_center_size(position, Vec2::splat(16.0))),
            RenderLayer(LAYER_MAIN),
            Pickupable {
                item_id: entry.kind.clone(),
                icon_index: item_registry.icon_or_placeholder(&entry.kind),
            },
        ));
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_load_request(
    mut load_events: EventReader<LoadRequestEvent>,
    mut complete_writer: EventWriter<LoadCompleteEvent>,
    mut commands: Commands,
    mut active_slot: ResMut<ActiveSaveSlot>,
    mut clock: ResMut<GameClock>,
    mut player_state: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
    mut farm: ResMut<FarmState>,
    item_registry: Res<ItemRegistry>,
    crop_registry: Res<CropRegistry>,
    mut player: Query<(&mut LogicalPosition, &mut BoundingBox), With<Player>>,
    existing_trees: Query<Entity, With<Tree>>,
    existing_drops: Query<Entity, With<Pickupable>>,
) {
    for event in load_events.read() {
        let slot = event.slot;
        let result = read_save(slot)
            .and_then(|file| {
                validate_save(&file, &item_registry, &crop_registry)?;
                Ok(file)
            });

        match result {
            Ok(file) => {
                apply_save(
                    &file,
                    &mut commands,
                    &mut clock,
                    &mut player_state,
                    &mut inventory,
                    &mut farm,
                    &item_registry,
                    &mut player,
                    &existing_trees,
                    &existing_drops,
                );
                active_slot.slot = slot;
                info!("[Save] Loaded slot {slot}");
                complete_writer.send(LoadCompleteEvent {
                    slot,
                    success: true,
                    error_message: None,
                });
            }
            Err(err) => {
                // Prior in-memory state is untouched on any failure.
                warn!("[Save] Load from slot {slot} failed: {err}");
                complete_writer.send(LoadCompleteEvent {
                    slot,
                    success: false,
                    error_message: Some(err.to_string()),
                });
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

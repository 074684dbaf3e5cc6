//! Game state and core simulation types
//!
//! `GameState` owns every entity in a match. All of it is plain data so a
//! snapshot can be cloned, serialized and handed to the network layer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::area::AreaBoosterSpawnerState;
use super::arena;
use super::collision::Circle;
use super::effect::Effect;
use super::shuffler::BoostShufflerState;
use super::spawner::BoostSpawnerState;
use crate::consts::{ARENA_CENTER, INITIAL_DIRECTION};
use crate::error::{SetupError, UnknownEffect};
use crate::tuning::Tuning;

/// Packed `0xRRGGBB` color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// CSS-style hex string
    pub fn hex(&self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// Colors handed out to players in seating order
pub const PLAYER_PALETTE: [Color; 8] = [
    Color(0xe53935),
    Color(0x1e88e5),
    Color(0x43a047),
    Color(0xfdd835),
    Color(0x8e24aa),
    Color(0xfb8c00),
    Color(0x00acc1),
    Color(0xd81b60),
];

/// A player on the ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub pos: Vec2,
    /// Diameter
    pub size: f32,
    pub color: Color,
    /// Kept in sync with `pos` and `size`
    pub collider: Circle,
    /// Current angular speed multiplier
    pub speed: f32,
    pub dead: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, pos: Vec2, size: f32, color: Color, speed: f32) -> Self {
        Self {
            name: name.into(),
            pos,
            size,
            color,
            collider: Circle::new(pos, size / 2.0),
            speed,
            dead: false,
        }
    }

    pub fn radius(&self) -> f32 {
        self.collider.radius
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.collider.pos = pos;
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
        self.collider.radius = size / 2.0;
    }

    /// Move along the ring by `angle` radians
    pub fn rotate(&mut self, angle: f32) {
        self.set_position(arena::rotate_about_center(self.pos, angle));
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Diameter
    pub size: f32,
    /// Kept in sync with `pos` and `size`
    pub collider: Circle,
}

impl Ball {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size,
            collider: Circle::new(pos, size / 2.0),
        }
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.collider.pos = pos;
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
        self.collider.radius = size / 2.0;
    }
}

/// A pickup that triggers an effect on contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booster {
    /// Stable id, unique within a match
    pub id: u32,
    pub effect: Effect,
    pub color: Color,
    pub collider: Circle,
}

/// Ball deflector that wears out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub collider: Circle,
    /// Ball hits left before removal
    pub life_counter: u32,
}

/// Time-limited speed zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaBooster {
    pub collider: Circle,
    /// Only players of this color are sped up
    pub color: Color,
    /// Seconds remaining
    pub duration: f32,
}

impl AreaBooster {
    pub fn is_expired(&self) -> bool {
        self.duration <= 0.0
    }
}

/// What happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    BallCaught { player: String },
    ObstacleCreated { obstacle_id: u32 },
    ObstacleHit { obstacle_id: u32, lives_left: u32 },
    ObstacleDestroyed { obstacle_id: u32 },
    BoosterSpawned { booster_id: u32, effect: Effect },
    BoosterConsumed {
        booster_id: u32,
        effect: Effect,
        /// Player the effect was applied to
        target: Option<String>,
    },
    RequestedEffectApplied { effect: Effect, target: Option<String> },
    ShuffleStarted,
    AreaRingStarted { owner: String },
    PlayerEliminated { player: String },
    OwnerReassigned { player: String },
    /// Last player eliminated; nobody holds the ball
    OwnerLost,
}

/// Complete game state (deterministic given the injected RNG, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Seats at match start (drives ring topology)
    pub number_of_players: usize,
    /// Live players in seating order
    pub players: Vec<Player>,
    /// Name of the player holding the ball
    pub ball_owner: Option<String>,
    pub ball: Ball,
    /// Ball heading (unit vector)
    pub direction: Vec2,
    pub boosters: Vec<Booster>,
    pub obstacles: Vec<Obstacle>,
    pub area_boosters: Vec<AreaBooster>,
    pub area_spawners: Vec<AreaBoosterSpawnerState>,
    pub boost_spawner: BoostSpawnerState,
    pub boost_shuffler: BoostShufflerState,
    /// Effects queued for the ball owner, applied last-in first-out
    pub requested_boosters: Vec<Effect>,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds
    pub elapsed: f32,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
    /// Players seated so far (palette index)
    seated: usize,
}

impl GameState {
    /// Seat `names` around the ring; the first player starts with the ball
    pub fn new<S: AsRef<str>>(names: &[S], tuning: Tuning) -> Result<Self, SetupError> {
        let mut state = Self::empty(tuning);
        state.number_of_players = names.len();
        for name in names {
            state.seat_player(name.as_ref(), names.len())?;
        }
        state.ball_owner = state.players.first().map(|p| p.name.clone());
        log::info!(
            "New match: {} players, owner {:?}",
            state.players.len(),
            state.ball_owner
        );
        Ok(state)
    }

    /// Arena with no players
    pub fn empty(tuning: Tuning) -> Self {
        Self {
            number_of_players: 0,
            players: Vec::new(),
            ball_owner: None,
            ball: Ball::new(ARENA_CENTER, tuning.ball_size),
            direction: INITIAL_DIRECTION.normalize(),
            boosters: Vec::new(),
            obstacles: Vec::new(),
            area_boosters: Vec::new(),
            area_spawners: Vec::new(),
            boost_spawner: BoostSpawnerState::new(tuning.spawn_delay),
            boost_shuffler: BoostShufflerState::dormant(),
            requested_boosters: Vec::new(),
            tuning,
            time_ticks: 0,
            elapsed: 0.0,
            events: Vec::new(),
            next_id: 1,
            seated: 0,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn seat_player(&mut self, name: &str, seats: usize) -> Result<(), SetupError> {
        if name.is_empty() {
            return Err(SetupError::EmptyName);
        }
        if self.player(name).is_some() {
            return Err(SetupError::DuplicateName(name.to_string()));
        }
        let pos = arena::seat_position(self.players.len(), seats, self.tuning.ring_radius);
        let color = PLAYER_PALETTE[self.seated % PLAYER_PALETTE.len()];
        self.players.push(Player::new(
            name,
            pos,
            self.tuning.player_size,
            color,
            self.tuning.player_base_speed,
        ));
        self.seated += 1;
        Ok(())
    }

    /// Add a player mid-match at the next free seat
    pub fn add_player(&mut self, name: &str) -> Result<(), SetupError> {
        let seats = self.number_of_players.max(self.players.len() + 1);
        self.seat_player(name, seats)?;
        self.number_of_players = seats;
        if self.ball_owner.is_none() {
            self.ball_owner = Some(name.to_string());
        }
        Ok(())
    }

    /// Remove a player (disconnect); the ball passes to the first remaining player
    pub fn remove_player(&mut self, name: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.name != name);
        if self.players.len() == before {
            return false;
        }
        if self.ball_owner.as_deref() == Some(name) {
            self.ball_owner = self.players.first().map(|p| p.name.clone());
        }
        true
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// The player currently holding the ball
    pub fn owner(&self) -> Option<&Player> {
        self.ball_owner.as_deref().and_then(|name| self.player(name))
    }

    /// Queue an effect for the ball owner
    pub fn request_effect(&mut self, effect: Effect) {
        self.requested_boosters.push(effect);
    }

    /// Queue an effect by its wire name
    pub fn request_effect_by_name(&mut self, name: &str) -> Result<(), UnknownEffect> {
        let effect = name.parse()?;
        self.request_effect(effect);
        Ok(())
    }

    /// Every collider a new booster must avoid
    pub fn colliders(&self) -> impl Iterator<Item = Circle> + '_ {
        std::iter::once(self.ball.collider)
            .chain(self.players.iter().map(|p| p.collider))
            .chain(self.boosters.iter().map(|b| b.collider))
            .chain(self.obstacles.iter().map(|o| o.collider))
    }

    /// Wall layout for the seats at match start
    pub fn arena(&self) -> arena::Arena {
        arena::Arena::for_players(self.number_of_players, self.tuning.ring_radius)
    }

    /// Whether the ball currently touches the arena walls
    pub fn ball_touches_wall(&self) -> bool {
        self.arena().touches_wall(&self.ball.collider)
    }

    /// Owner names a live player, or there are no players and no owner
    pub fn owner_is_consistent(&self) -> bool {
        match &self.ball_owner {
            Some(name) => self.players.iter().any(|p| &p.name == name),
            None => self.players.is_empty(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Two players on opposite seats, alice holding the ball
    pub fn two_player_state() -> GameState {
        GameState::new(&["alice", "bob"], Tuning::default()).expect("valid setup")
    }
}

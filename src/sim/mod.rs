//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One frame per `tick`, with wall-clock time passed in explicitly
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering, audio, or file I/O

pub mod aabb;
pub mod body;
pub mod collision;
pub mod monster;
pub mod player;
pub mod projectile;
pub mod state;
pub mod sword;
pub mod tick;
pub mod timer;
pub mod world;

pub use aabb::Aabb;
pub use body::Body;
pub use monster::{Dragon, Hostile, HostileContext, HostileKind, Monster};
pub use player::{Player, PlayerAction};
pub use projectile::Projectile;
pub use state::{Facing, GameEvent, GameState, Scene};
pub use sword::{SwingState, Sword};
pub use tick::{TickInput, tick};
pub use timer::{AnimationTicks, Cooldown};
pub use world::{Coin, Environment, Platform, Tree};

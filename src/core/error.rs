//! Error taxonomy for every engine operation.
//!
//! Operations validate first and only then mutate, so an `Err` always means
//! the hero is exactly as it was before the call.

use crate::items::MaterialKind;
use std::fmt;
use thiserror::Error;

/// Entity kinds that can be looked up by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Hero,
    Recipe,
    CraftingItem,
    Equipment,
    ShopItem,
    Opponent,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Hero => "hero",
            Entity::Recipe => "recipe",
            Entity::CraftingItem => "crafting item",
            Entity::Equipment => "equipment",
            Entity::ShopItem => "shop item",
            Entity::Opponent => "arena opponent",
        };
        f.write_str(name)
    }
}

/// A spendable resource that can run short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Gold,
    Honor,
    Material(MaterialKind),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Gold => f.write_str("gold"),
            Resource::Honor => f.write_str("honor"),
            Resource::Material(kind) => write!(f, "{}", kind.name()),
        }
    }
}

/// Wrong-state reasons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("idle combat is already active")]
    IdleCombatActive,
    #[error("hero is recovering from defeat")]
    HeroRecovering,
    #[error("crafting is not finished yet ({remaining_ms} ms remaining)")]
    CraftingNotFinished { remaining_ms: i64 },
    #[error("equipment is already at the maximum enhancement level ({max})")]
    MaxEnhancement { max: u8 },
    #[error("an arena battle is already in progress")]
    BattleInProgress,
    #[error("no arena opponent has been found yet")]
    NoOpponent,
    #[error("offline time of {seconds} s exceeds the {max_seconds} s window")]
    OfflineWindowExceeded { seconds: i64, max_seconds: i64 },
    #[error("an ad bonus claim is already pending")]
    AdBonusPending,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("insufficient {resource}: need {needed}, have {available}")]
    InsufficientResource {
        resource: Resource,
        needed: u64,
        available: u64,
    },
    #[error("precondition failed: {0}")]
    PreconditionFailed(#[from] Precondition),
}

impl GameError {
    pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        GameError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn insufficient(resource: Resource, needed: u64, available: u64) -> Self {
        GameError::InsufficientResource {
            resource,
            needed,
            available,
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;

mod body;
mod collision;
mod physics;
mod quests;
mod scene_impl;
mod world;

pub(crate) use body::PlayerTuning;
pub(crate) use quests::JUMP_CLEARANCE;
pub(crate) use scene_impl::{PlatformerScene, SceneSettings};
pub(crate) use world::CameraMode;

#[cfg(test)]
mod tests;

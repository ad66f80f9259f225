use engine::{
    Announcer, Camera2D, DrawList, InputAction, InputSnapshot, Rect, Rgba, Scene, SceneCommand,
    StatusText, Viewport,
};
use tracing::{debug, info};

use super::body::{Ground, PlayerBody, PlayerTuning};
use super::collision::resolve_ground;
use super::physics::integrate;
use super::quests::{QuestGoal, QuestLog};
use super::world::{follow_camera, CameraMode, WorldScroll};

const SKY_COLOR: Rgba = [92, 148, 214, 255];
const HILL_COLOR: Rgba = [70, 112, 170, 255];
const PLAYER_COLOR: Rgba = [214, 64, 58, 255];
const GROUND_COLOR: Rgba = [74, 150, 72, 255];
const COLLECTIBLE_COLOR: Rgba = [242, 196, 48, 255];

const HILL_SPACING: f32 = 200.0;
const HILL_WIDTH: f32 = 120.0;
const HILL_HEIGHT: f32 = 60.0;
const COLLECTIBLE_SIZE: f32 = 20.0;

/// Everything the scene needs to build a fresh run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SceneSettings {
    pub viewport: Viewport,
    pub world_width: f32,
    pub ground_thickness: f32,
    pub tuning: PlayerTuning,
    pub scroll_speed: f32,
    pub camera_mode: CameraMode,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            world_width: 2400.0,
            ground_thickness: 50.0,
            tuning: PlayerTuning::default(),
            scroll_speed: 1.0,
            camera_mode: CameraMode::Follow,
        }
    }
}

/// Mutable simulation state, owned by the scene and lent to each step.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SimulationState {
    pub player: PlayerBody,
    pub ground: Ground,
    pub world: WorldScroll,
    pub camera: Camera2D,
    pub quests: QuestLog,
    pub frame: u64,
}

impl SimulationState {
    fn new(settings: &SceneSettings) -> Self {
        let ground = Ground::new(
            settings.viewport.height as f32,
            settings.ground_thickness,
            settings.world_width,
        );
        let player = PlayerBody::spawn(settings.tuning, &ground);
        let camera = follow_camera(
            player.x,
            settings.viewport.width as f32,
            settings.world_width,
            settings.camera_mode,
        );
        Self {
            player,
            quests: QuestLog::standard(&ground, &settings.tuning),
            ground,
            world: WorldScroll::new(settings.world_width, settings.scroll_speed),
            camera,
            frame: 0,
        }
    }
}

/// Run/stop switch for the frame loop. A stopped simulation ignores steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SimulationControl {
    running: bool,
}

impl SimulationControl {
    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn run(&mut self) {
        self.running = true;
    }

    pub(crate) fn stop(&mut self) {
        self.running = false;
    }
}

impl Default for SimulationControl {
    fn default() -> Self {
        Self { running: true }
    }
}

pub(crate) struct PlatformerScene {
    settings: SceneSettings,
    state: SimulationState,
    control: SimulationControl,
}

impl PlatformerScene {
    pub(crate) fn new(settings: SceneSettings) -> Self {
        Self {
            state: SimulationState::new(&settings),
            settings,
            control: SimulationControl::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &SimulationState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    #[cfg(test)]
    pub(crate) fn control_mut(&mut self) -> &mut SimulationControl {
        &mut self.control
    }

    /// One frame: physics, collision, quest evaluation, background scroll,
    /// then the camera. Completion rewards go to `announcer` exactly once.
    pub(crate) fn step(&mut self, input: &InputSnapshot, announcer: &mut dyn Announcer) {
        if !self.control.is_running() {
            return;
        }

        let state = &mut self.state;
        integrate(&mut state.player, input, &state.ground);
        resolve_ground(&mut state.player, &state.ground);

        if let Some(completion) = state.quests.evaluate(&state.player) {
            info!(
                quest_index = completion.index,
                quest = completion.name.as_str(),
                frame = state.frame,
                player_x = state.player.x,
                "quest_completed"
            );
            announcer.announce(&completion.reward);
            if let Some(next) = state.quests.active().filter(|quest| !quest.completed()) {
                info!(
                    quest_index = state.quests.cursor(),
                    quest = next.name.as_str(),
                    kind = next.goal.kind_name(),
                    "quest_active"
                );
            } else {
                info!(frame = state.frame, "all_quests_complete");
            }
        }

        state.world.advance();
        state.camera = follow_camera(
            state.player.x,
            self.settings.viewport.width as f32,
            state.world.world_width(),
            self.settings.camera_mode,
        );
        state.frame += 1;
    }

    fn draw_background(&self, draw_list: &mut DrawList) {
        let viewport_width = self.settings.viewport.width as f32;
        let surface_y = self.state.ground.surface_y();
        draw_list.fill_screen_rect(SKY_COLOR, Rect::new(0.0, 0.0, viewport_width, surface_y));

        // Two copies of the strip so the wrap point is never visible.
        let strip_width = self.state.world.world_width();
        let offset = self.state.world.background_offset();
        let hill_y = surface_y - HILL_HEIGHT;
        for copy in 0..2 {
            let strip_x = offset + copy as f32 * strip_width;
            let mut hill_x = 0.0;
            while hill_x < strip_width {
                let left = strip_x + hill_x;
                if left + HILL_WIDTH > 0.0 && left < viewport_width {
                    draw_list.fill_screen_rect(
                        HILL_COLOR,
                        Rect::new(left, hill_y, HILL_WIDTH, HILL_HEIGHT),
                    );
                }
                hill_x += HILL_SPACING;
            }
        }
    }

    fn collectible_rect(&self) -> Option<Rect> {
        let quest = self.state.quests.active()?;
        if quest.completed() {
            return None;
        }
        match quest.goal {
            QuestGoal::Collect { target_x, .. } => Some(Rect::new(
                target_x,
                self.state.ground.surface_y() - COLLECTIBLE_SIZE,
                COLLECTIBLE_SIZE,
                COLLECTIBLE_SIZE,
            )),
            _ => None,
        }
    }
}

impl Scene for PlatformerScene {
    fn load(&mut self, viewport: Viewport) {
        self.settings.viewport = viewport;
        self.state = SimulationState::new(&self.settings);
        self.control.run();
        info!(
            viewport_width = viewport.width,
            viewport_height = viewport.height,
            world_width = self.settings.world_width,
            camera_mode = ?self.settings.camera_mode,
            quest_count = self.state.quests.quests().len(),
            "scene_loaded"
        );
    }

    fn update(&mut self, input: &InputSnapshot, announcer: &mut dyn Announcer) -> SceneCommand {
        if input.is_down(InputAction::Quit) {
            self.control.stop();
            info!(frame = self.state.frame, "quit_requested");
            return SceneCommand::Quit;
        }
        self.step(input, announcer);
        SceneCommand::None
    }

    fn render(&self, draw_list: &mut DrawList) {
        draw_list.set_camera(self.state.camera);
        self.draw_background(draw_list);
        draw_list.fill_rect(PLAYER_COLOR, self.state.player.rect());
        draw_list.fill_rect(GROUND_COLOR, self.state.ground.rect());
        if let Some(item) = self.collectible_rect() {
            draw_list.fill_rect(COLLECTIBLE_COLOR, item);
        }
    }

    fn status_text(&self) -> StatusText {
        let quests = &self.state.quests;
        match quests.active() {
            Some(quest) if !quests.all_complete() => StatusText {
                title: quest.name.clone(),
                detail: format!("Progress: {}%", quest.progress()),
            },
            _ => StatusText {
                title: "All quests complete".to_string(),
                detail: "Progress: 100%".to_string(),
            },
        }
    }

    fn unload(&mut self) {
        self.control.stop();
        debug!(
            frame = self.state.frame,
            quests_completed = self
                .state
                .quests
                .quests()
                .iter()
                .filter(|quest| quest.completed())
                .count(),
            "scene_unloaded"
        );
    }

    fn debug_title(&self) -> Option<String> {
        let player = &self.state.player;
        let objective = self
            .state
            .quests
            .active()
            .filter(|quest| !quest.completed())
            .map_or("Run complete", |quest| quest.description.as_str());
        Some(format!(
            "Questrun | {objective} | x {:.0} y {:.0}",
            player.x, player.y
        ))
    }
}

use super::body::{Ground, PlayerBody, PlayerTuning};

/// How far above the grounded top edge the player must rise for a jump quest.
pub(crate) const JUMP_CLEARANCE: f32 = 40.0;
const COLLECT_TOLERANCE: f32 = 1.0;

/// Completion condition of one quest. Each variant carries only the targets it uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum QuestGoal {
    /// Reach or pass `target_x`.
    Reach { target_x: f32 },
    /// Be past `target_x` with the body's top edge strictly above `below_y`.
    Jump { target_x: f32, below_y: f32 },
    /// Be past `target_x` with the body's top edge within `tolerance` of `target_y`.
    Collect {
        target_x: f32,
        target_y: f32,
        tolerance: f32,
    },
}

impl QuestGoal {
    pub(crate) fn target_x(&self) -> f32 {
        match *self {
            QuestGoal::Reach { target_x }
            | QuestGoal::Jump { target_x, .. }
            | QuestGoal::Collect { target_x, .. } => target_x,
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            QuestGoal::Reach { .. } => "location",
            QuestGoal::Jump { .. } => "jump",
            QuestGoal::Collect { .. } => "collect",
        }
    }

    pub(crate) fn is_met(&self, player: &PlayerBody) -> bool {
        match *self {
            QuestGoal::Reach { target_x } => player.x >= target_x,
            QuestGoal::Jump { target_x, below_y } => player.x >= target_x && player.y < below_y,
            QuestGoal::Collect {
                target_x,
                target_y,
                tolerance,
            } => player.x >= target_x && (player.y - target_y).abs() <= tolerance,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Quest {
    pub name: String,
    pub description: String,
    pub goal: QuestGoal,
    pub reward: String,
    progress: u8,
    completed: bool,
}

impl Quest {
    pub(crate) fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        goal: QuestGoal,
        reward: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            goal,
            reward: reward.into(),
            progress: 0,
            completed: false,
        }
    }

    pub(crate) fn progress(&self) -> u8 {
        self.progress
    }

    pub(crate) fn completed(&self) -> bool {
        self.completed
    }
}

/// Percentage of the way from x = 0 to `target_x`, floored and clamped.
///
/// Scaled before dividing, in f64, so positions on an exact percentage stay exact.
pub(crate) fn progress_toward(target_x: f32, x: f32) -> u8 {
    let percent = (f64::from(x) * 100.0 / f64::from(target_x)).floor();
    if !percent.is_finite() {
        return if x >= target_x { 100 } else { 0 };
    }
    percent.clamp(0.0, 100.0) as u8
}

/// Emitted once when the active quest completes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuestCompletion {
    pub index: usize,
    pub name: String,
    pub reward: String,
}

/// Ordered quest list with a cursor that only moves forward.
///
/// Only the quest under the cursor is evaluated. After the last quest
/// completes the cursor stays on it and evaluation becomes a no-op.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuestLog {
    quests: Vec<Quest>,
    cursor: usize,
}

impl QuestLog {
    pub(crate) fn new(quests: Vec<Quest>) -> Self {
        Self { quests, cursor: 0 }
    }

    /// The three-quest run used by the game, with targets placed relative to
    /// the grounded player height.
    pub(crate) fn standard(ground: &Ground, tuning: &PlayerTuning) -> Self {
        let grounded_y = ground.surface_y() - tuning.height;
        Self::new(vec![
            Quest::new(
                "Reach the Old Tower",
                "Head east until you reach the old tower.",
                QuestGoal::Reach { target_x: 700.0 },
                "Reward: Tower Map",
            ),
            Quest::new(
                "Leap the Broken Bridge",
                "Jump high once you are past the broken bridge.",
                QuestGoal::Jump {
                    target_x: 1100.0,
                    below_y: grounded_y - JUMP_CLEARANCE,
                },
                "Reward: Feather Boots",
            ),
            Quest::new(
                "Collect the Sun Relic",
                "Walk over the relic resting on the ground.",
                QuestGoal::Collect {
                    target_x: 1500.0,
                    target_y: grounded_y,
                    tolerance: COLLECT_TOLERANCE,
                },
                "Reward: Sun Relic",
            ),
        ])
    }

    pub(crate) fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn active(&self) -> Option<&Quest> {
        self.quests.get(self.cursor)
    }

    pub(crate) fn all_complete(&self) -> bool {
        self.quests.iter().all(Quest::completed)
    }

    /// Checks the active quest against the player. Completion freezes progress
    /// at 100 and advances the cursor when a later quest exists.
    pub(crate) fn evaluate(&mut self, player: &PlayerBody) -> Option<QuestCompletion> {
        let index = self.cursor;
        let quest = self.quests.get_mut(index)?;
        if quest.completed {
            return None;
        }

        if !quest.goal.is_met(player) {
            quest.progress = progress_toward(quest.goal.target_x(), player.x);
            return None;
        }

        quest.progress = 100;
        quest.completed = true;
        let completion = QuestCompletion {
            index,
            name: quest.name.clone(),
            reward: quest.reward.clone(),
        };
        if index + 1 < self.quests.len() {
            self.cursor += 1;
        }
        Some(completion)
    }
}

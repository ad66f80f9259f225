use engine::{
    Camera2D, DrawCommand, DrawList, DrawSpace, InputAction, InputSnapshot, ModalBanner, Rect,
    Scene, SceneCommand, Viewport,
};

use super::body::PlayerTuning;
use super::quests::{QuestGoal, JUMP_CLEARANCE};
use super::scene_impl::{PlatformerScene, SceneSettings};
use super::world::CameraMode;

fn loaded_scene() -> PlatformerScene {
    let mut scene = PlatformerScene::new(SceneSettings::default());
    scene.load(Viewport::default());
    scene
}

fn input(actions: &[InputAction]) -> InputSnapshot {
    actions.iter().fold(InputSnapshot::empty(), |snapshot, action| {
        snapshot.with_action_down(*action, true)
    })
}

fn world_rects(draw_list: &DrawList) -> Vec<Rect> {
    draw_list
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::FillRect {
                rect,
                space: DrawSpace::World,
                ..
            } => Some(*rect),
            _ => None,
        })
        .collect()
}

fn rendered(scene: &PlatformerScene) -> DrawList {
    let mut draw_list = DrawList::default();
    scene.render(&mut draw_list);
    draw_list
}

#[test]
fn holding_right_for_300_frames_walks_1500_units_on_the_ground() {
    let mut scene = loaded_scene();
    let mut banner = ModalBanner::default();
    let right = input(&[InputAction::MoveRight]);

    for _ in 0..300 {
        scene.step(&right, &mut banner);
        let player = &scene.state().player;
        assert!(player.grounded);
        assert_eq!(player.y, 300.0);
    }

    assert_eq!(scene.state().player.x, 1550.0);
    assert_eq!(scene.state().frame, 300);
}

#[test]
fn jump_arc_decelerates_by_gravity_and_lands_exactly_on_the_surface() {
    let mut scene = loaded_scene();
    let mut banner = ModalBanner::default();
    let jump = input(&[InputAction::Jump]);
    let idle = InputSnapshot::empty();

    scene.step(&jump, &mut banner);
    assert!(!scene.state().player.grounded);
    assert_eq!(scene.state().player.y, 288.0);

    let mut expected_vy = -12.0 + 0.8;
    let mut frames = 1;
    while !scene.state().player.grounded {
        let player = &scene.state().player;
        assert!((player.vy - expected_vy).abs() < 1e-3, "frame {frames}");
        assert!(player.bottom() <= 350.0);
        assert!(frames < 40, "player never landed");

        scene.step(&idle, &mut banner);
        expected_vy += 0.8;
        frames += 1;
    }

    let player = &scene.state().player;
    assert!((31..=32).contains(&frames), "landed after {frames} frames");
    assert_eq!(player.y, 300.0);
    assert_eq!(player.vy, 0.0);
}

#[test]
fn holding_jump_does_not_reapply_impulse_midair() {
    let mut scene = loaded_scene();
    let mut banner = ModalBanner::default();
    let jump = input(&[InputAction::Jump]);

    scene.step(&jump, &mut banner);
    let vy_after_first = scene.state().player.vy;
    scene.step(&jump, &mut banner);

    assert!((scene.state().player.vy - (vy_after_first + 0.8)).abs() < 1e-5);
}

#[test]
fn location_progress_climbs_to_completion_and_advances_once() {
    let mut scene = loaded_scene();
    let mut banner = ModalBanner::default();
    let idle = InputSnapshot::empty();

    let mut last_progress = None;
    for step in 0..=50 {
        scene.state_mut().player.x = step as f32 * 14.0;
        scene.step(&idle, &mut banner);

        let quests = &scene.state().quests;
        let progress = quests.quests()[0].progress();
        if let Some(previous) = last_progress {
            assert!(progress > previous, "step {step}: {progress} <= {previous}");
        }
        last_progress = Some(progress);

        if step < 50 {
            assert_eq!(quests.cursor(), 0);
        }
    }

    let quests = &scene.state().quests;
    assert_eq!(last_progress, Some(100));
    assert!(quests.quests()[0].completed());
    assert_eq!(quests.cursor(), 1);
    assert_eq!(banner.pending(), 1);
    assert_eq!(banner.current(), Some("Reward: Tower Map"));
}

#[test]
fn completed_quest_progress_stays_at_100_when_player_walks_back() {
    let mut scene = loaded_scene();
    let mut banner = ModalBanner::default();

    scene.state_mut().player.x = 700.0;
    scene.step(&InputSnapshot::empty(), &mut banner);
    assert_eq!(scene.state().quests.cursor(), 1);

    let left = input(&[InputAction::MoveLeft]);
    for _ in 0..200 {
        scene.step(&left, &mut banner);
        let quests = &scene.state().quests;
        assert_eq!(quests.quests()[0].progress(), 100);
        assert_eq!(quests.cursor(), 1);
    }
    assert_eq!(banner.pending(), 1);
}

#[test]
fn camera_keeps_player_centered_every_frame() {
    let mut scene = loaded_scene();
    let mut banner = ModalBanner::default();
    let inputs = [
        input(&[InputAction::MoveRight]),
        input(&[InputAction::MoveRight, InputAction::Jump]),
        input(&[InputAction::MoveLeft]),
        InputSnapshot::empty(),
    ];

    for frame in 0..400 {
        scene.step(&inputs[(frame / 50) % inputs.len()], &mut banner);
        let state = scene.state();
        assert_eq!(
            state.camera,
            Camera2D {
                x: state.player.x - 400.0
            }
        );
    }
}

#[test]
fn full_run_announces_each_reward_exactly_once_in_order() {
    let mut scene = loaded_scene();
    let mut banner = ModalBanner::default();
    let right = input(&[InputAction::MoveRight]);
    let right_and_jump = input(&[InputAction::MoveRight, InputAction::Jump]);

    let mut frames = 0;
    while !scene.state().quests.all_complete() {
        let state = scene.state();
        let wants_jump = state.quests.cursor() == 1 && state.player.x >= 1100.0;
        scene.step(if wants_jump { &right_and_jump } else { &right }, &mut banner);
        frames += 1;
        assert!(frames < 1000, "quests did not complete");
    }

    for _ in 0..120 {
        scene.step(&right, &mut banner);
    }

    let mut rewards = Vec::new();
    while let Some(reward) = banner.dismiss() {
        rewards.push(reward);
    }
    assert_eq!(
        rewards,
        vec![
            "Reward: Tower Map".to_string(),
            "Reward: Feather Boots".to_string(),
            "Reward: Sun Relic".to_string(),
        ]
    );
    assert_eq!(scene.state().quests.cursor(), 2);

    let status = scene.status_text();
    assert_eq!(status.title, "All quests complete");
    assert_eq!(status.detail, "Progress: 100%");
}

#[test]
fn lowest_accepted_jump_still_clears_the_bridge_quest() {
    let tuning = PlayerTuning {
        jump_impulse: -8.5,
        ..PlayerTuning::default()
    };
    assert!(tuning.jump_apex_height() > JUMP_CLEARANCE);

    let mut scene = PlatformerScene::new(SceneSettings {
        tuning,
        ..SceneSettings::default()
    });
    scene.load(Viewport::default());
    let mut banner = ModalBanner::default();
    let right_and_jump = input(&[InputAction::MoveRight, InputAction::Jump]);

    for _ in 0..400 {
        scene.step(&right_and_jump, &mut banner);
    }

    assert!(scene.state().quests.quests()[1].completed());
}

#[test]
fn status_text_shows_active_quest_and_progress() {
    let mut scene = loaded_scene();
    let status = scene.status_text();
    assert_eq!(status.title, "Reach the Old Tower");
    assert_eq!(status.detail, "Progress: 0%");

    scene.step(&InputSnapshot::empty(), &mut ModalBanner::default());
    assert_eq!(scene.status_text().detail, "Progress: 7%");
}

#[test]
fn render_draws_player_before_floor_and_uses_scene_camera() {
    let scene = loaded_scene();
    let draw_list = rendered(&scene);

    assert_eq!(*draw_list.camera(), Camera2D { x: -350.0 });
    assert!(matches!(
        draw_list.commands().first(),
        Some(DrawCommand::FillRect {
            space: DrawSpace::Screen,
            ..
        })
    ));
    assert_eq!(
        world_rects(&draw_list),
        vec![
            Rect::new(50.0, 300.0, 50.0, 50.0),
            Rect::new(0.0, 350.0, 2400.0, 50.0),
        ]
    );
}

#[test]
fn collectible_is_drawn_only_while_collect_quest_is_active() {
    let mut scene = loaded_scene();
    let mut banner = ModalBanner::default();

    scene.state_mut().player.x = 700.0;
    scene.step(&InputSnapshot::empty(), &mut banner);
    scene.state_mut().player.x = 1100.0;
    scene.state_mut().player.y = 200.0;
    scene.state_mut().player.grounded = false;
    scene.step(&InputSnapshot::empty(), &mut banner);
    assert_eq!(scene.state().quests.cursor(), 2);
    assert!(matches!(
        scene.state().quests.active().map(|quest| quest.goal),
        Some(QuestGoal::Collect { .. })
    ));

    let rects = world_rects(&rendered(&scene));
    assert_eq!(rects.len(), 3);
    assert_eq!(rects[2], Rect::new(1500.0, 330.0, 20.0, 20.0));

    let state = scene.state_mut();
    state.player.x = 1500.0;
    state.player.y = 300.0;
    state.player.vy = 0.0;
    state.player.grounded = true;
    scene.step(&InputSnapshot::empty(), &mut banner);
    assert!(scene.state().quests.all_complete());
    assert_eq!(world_rects(&rendered(&scene)).len(), 2);
}

#[test]
fn background_strips_scroll_left_over_time() {
    let mut scene = loaded_scene();
    let mut banner = ModalBanner::default();
    for _ in 0..10 {
        scene.step(&InputSnapshot::empty(), &mut banner);
    }
    assert_eq!(scene.state().world.background_offset(), -10.0);

    let draw_list = rendered(&scene);
    let first_hill = draw_list.commands().iter().find_map(|command| match command {
        DrawCommand::FillRect {
            rect,
            space: DrawSpace::Screen,
            ..
        } if rect.height == 60.0 => Some(*rect),
        _ => None,
    });
    assert_eq!(first_hill.map(|rect| rect.x), Some(-10.0));
}

#[test]
fn quit_intent_stops_simulation() {
    let mut scene = loaded_scene();
    let mut banner = ModalBanner::default();
    let before = scene.state().clone();

    let command = scene.update(
        &input(&[InputAction::Quit, InputAction::MoveRight]),
        &mut banner,
    );

    assert_eq!(command, SceneCommand::Quit);
    assert_eq!(scene.state(), &before);
    assert!(!scene.control_mut().is_running());
}

#[test]
fn stopped_simulation_ignores_steps_until_resumed() {
    let mut scene = loaded_scene();
    let mut banner = ModalBanner::default();
    let right = input(&[InputAction::MoveRight]);

    scene.control_mut().stop();
    scene.step(&right, &mut banner);
    assert_eq!(scene.state().player.x, 50.0);
    assert_eq!(scene.state().frame, 0);

    scene.control_mut().run();
    assert_eq!(scene.update(&right, &mut banner), SceneCommand::None);
    assert_eq!(scene.state().player.x, 55.0);
}

#[test]
fn load_rebuilds_state_for_new_viewport() {
    let mut scene = loaded_scene();
    let mut banner = ModalBanner::default();
    for _ in 0..20 {
        scene.step(&input(&[InputAction::MoveRight]), &mut banner);
    }

    scene.load(Viewport {
        width: 640,
        height: 480,
    });

    let state = scene.state();
    assert_eq!(state.frame, 0);
    assert_eq!(state.player.x, 50.0);
    assert_eq!(state.player.y, 380.0);
    assert_eq!(state.ground.surface_y(), 430.0);
    assert_eq!(state.camera, Camera2D { x: -270.0 });
    assert_eq!(state.quests.cursor(), 0);
}

#[test]
fn clamped_camera_mode_keeps_view_inside_world() {
    let mut scene = PlatformerScene::new(SceneSettings {
        camera_mode: CameraMode::ClampToWorld,
        ..SceneSettings::default()
    });
    scene.load(Viewport::default());
    let mut banner = ModalBanner::default();

    scene.step(&InputSnapshot::empty(), &mut banner);
    assert_eq!(scene.state().camera, Camera2D { x: 0.0 });

    scene.state_mut().player.x = 5000.0;
    scene.step(&InputSnapshot::empty(), &mut banner);
    assert_eq!(scene.state().camera, Camera2D { x: 1600.0 });
}

#[test]
fn debug_title_names_current_objective() {
    let scene = loaded_scene();
    let title = scene.debug_title().expect("title");
    assert!(title.starts_with("Questrun | Head east"));
    assert!(title.ends_with("x 50 y 300"));
}

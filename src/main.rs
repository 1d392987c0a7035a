//! Demo: a capsule character walking over uneven ground with foot IK.
//!
//! WASD to move, mouse to look, Shift to run, Space to jump, Tab to release
//! the cursor.

use std::f32::consts::TAU;

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use footfall::host::{
    AudioCueMessage, GroundLayer, LocomotionAgent, LocomotionPlugin, PlayerCamera, agent_body,
    agent_collider,
};
use footfall::LocomotionConfig;
use footfall::locomotion::{
    AnimParam, AnimationEvent, Foot, LocomotionController, PoseRig, SurfaceKind,
};

const AGENT_MASS: f32 = 65.0;
const HIP_HEIGHT: f32 = 0.95;
const FOOT_HEIGHT: f32 = 0.08;
const FOOT_SPREAD: f32 = 0.12;
const STRIDE_LENGTH: f32 = 0.35;
const STEP_LIFT: f32 = 0.12;

/// Procedural walk cycle standing in for an animation graph.
#[derive(Component, Debug, Default)]
struct Gait {
    phase: f32,
    was_grounded: bool,
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Footfall".to_string(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(LocomotionPlugin)
        .insert_resource(Time::<Fixed>::from_hz(50.0))
        .add_systems(Startup, (spawn_level, spawn_player))
        .add_systems(Update, (animate_pose, log_audio_cues))
        .run();
}

fn spawn_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_layers = CollisionLayers::new(GroundLayer::Ground, [GroundLayer::Player]);

    // Floor
    commands.spawn((
        SurfaceKind::Ground,
        RigidBody::Static,
        Collider::cuboid(40.0, 1.0, 40.0),
        ground_layers,
        Mesh3d(meshes.add(Cuboid::new(40.0, 1.0, 40.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.45, 0.3))),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));

    // Tiled steps of increasing height
    let tile = materials.add(Color::srgb(0.6, 0.6, 0.65));
    for (i, height) in [0.1_f32, 0.2, 0.3].into_iter().enumerate() {
        commands.spawn((
            SurfaceKind::Tile,
            RigidBody::Static,
            Collider::cuboid(2.0, height, 1.0),
            ground_layers,
            Mesh3d(meshes.add(Cuboid::new(2.0, height, 1.0))),
            MeshMaterial3d(tile.clone()),
            Transform::from_xyz(0.0, height / 2.0, -2.0 - i as f32),
        ));
    }

    // Ramp
    commands.spawn((
        SurfaceKind::Ground,
        RigidBody::Static,
        Collider::cuboid(3.0, 0.2, 6.0),
        ground_layers,
        Mesh3d(meshes.add(Cuboid::new(3.0, 0.2, 6.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.5, 0.4, 0.3))),
        Transform::from_xyz(4.0, 0.6, -3.0).with_rotation(Quat::from_rotation_x(0.2)),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        PlayerCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 1.6, 4.0),
    ));
}

fn spawn_player(
    mut commands: Commands,
    config: Res<LocomotionConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let transform = Transform::from_xyz(0.0, 0.05, 4.0);
    let mut rig = PoseRig::default();
    rig.bind_ik_goals();
    write_pose(&mut rig, &transform, 0.0, true);

    let controller = match LocomotionController::new(config.clone(), &rig) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Cannot spawn player: {}", e);
            return;
        }
    };

    let shape = config.capsule_shape();
    commands.spawn((
        LocomotionAgent(controller),
        Gait::default(),
        agent_body(AGENT_MASS),
        rig,
        transform,
        Visibility::default(),
        children![(
            agent_collider(&config),
            Mesh3d(meshes.add(Capsule3d::new(shape.radius, shape.segment_length()))),
            MeshMaterial3d(materials.add(Color::srgb(0.85, 0.85, 0.9))),
        )],
    ));
    info!("Spawned player at {:?}", transform.translation);
}

/// Write the animated pose for gait `phase`. Feet swing along body forward
/// and lift only while grounded.
fn write_pose(rig: &mut PoseRig, transform: &Transform, phase: f32, grounded: bool) {
    for (foot, side, offset) in [(Foot::Left, -1.0, 0.0), (Foot::Right, 1.0, TAU / 2.0)] {
        let swing = (phase + offset).sin();
        let lift = if grounded {
            (phase + offset).cos().max(0.0) * STEP_LIFT
        } else {
            STEP_LIFT
        };
        let local = Vec3::new(
            side * FOOT_SPREAD,
            FOOT_HEIGHT + lift,
            -swing * STRIDE_LENGTH / 2.0,
        );
        rig.set_animated_foot(foot, transform.transform_point(local), transform.rotation);
    }
    rig.animated_body_position = transform.transform_point(Vec3::Y * HIP_HEIGHT);
}

fn animate_pose(
    time: Res<Time>,
    mut agents: Query<(&mut LocomotionAgent, &Transform, &mut PoseRig, &mut Gait)>,
) {
    let dt = time.delta_secs();

    for (mut agent, transform, mut rig, mut gait) in &mut agents {
        let planar = Vec2::new(
            rig.float(AnimParam::HorizontalVelocity),
            rig.float(AnimParam::VerticalVelocity),
        );
        let speed = planar.length();
        let grounded = rig.is_grounded;

        let previous = gait.phase;
        if grounded {
            gait.phase = (gait.phase + speed / STRIDE_LENGTH * dt * TAU / 2.0) % TAU;
        }
        // A foot plants each time the swing crosses zero.
        let stepped = previous.sin().signum() != gait.phase.sin().signum();
        if stepped && speed > 0.1 {
            let weight = (speed / agent.0.config().run_speed).clamp(0.0, 1.0);
            agent
                .0
                .handle_animation_event(AnimationEvent::Footstep { weight });
        }
        if grounded && !gait.was_grounded {
            agent.0.handle_animation_event(AnimationEvent::Land);
        }
        gait.was_grounded = grounded;

        write_pose(&mut rig, transform, gait.phase, grounded);
    }
}

fn log_audio_cues(mut cue_events: MessageReader<AudioCueMessage>) {
    for event in cue_events.read() {
        debug!(
            "Play {:?} for {:?} ({:?})",
            event.cue.bank, event.agent, event.cue.kind
        );
    }
}

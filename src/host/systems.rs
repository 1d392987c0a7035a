//! Host domain: systems driving the controller through the frame.

use avian3d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::host::AudioCueMessage;
use crate::host::adapters::{AvianBody, AvianGround, BodySnapshot, FollowCamera};
use crate::host::components::{CameraMount, LocomotionAgent, PlayerCamera};
use crate::input::LocomotionInput;
use crate::locomotion::{PoseRig, SurfaceKind, TickContext};

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut input: ResMut<LocomotionInput>,
) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.move_axis = Vec2::new(x, y);
    // Screen y grows downward; look y is pitch up.
    input.look_axis = Vec2::new(mouse_motion.delta.x, -mouse_motion.delta.y);
    input.run_held = keyboard.pressed(KeyCode::ShiftLeft);
    // Rising edges for this frame.
    input.jump_just_pressed = keyboard.just_pressed(KeyCode::Space);
    input.interact_just_pressed = keyboard.just_pressed(KeyCode::KeyE);
    input.inventory_just_pressed = keyboard.just_pressed(KeyCode::Tab);
}

pub(crate) fn apply_cursor_lock(cursor: &mut CursorOptions, locked: bool) {
    cursor.grab_mode = if locked {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
    cursor.visible = !locked;
}

pub(crate) fn lock_cursor_on_start(mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    for mut cursor in &mut cursors {
        apply_cursor_lock(&mut cursor, true);
    }
}

/// Consume this frame's edges. Inventory toggles the input lock.
pub(crate) fn advance_frame(
    input: Res<LocomotionInput>,
    mut agents: Query<&mut LocomotionAgent>,
    mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    for mut agent in &mut agents {
        let controller = &mut agent.0;
        let was_queued = controller.is_jump_queued();
        let events = controller.advance_frame(&input);

        if !was_queued && controller.is_jump_queued() {
            debug!("Jump queued");
        }

        if events.interact {
            debug!("Interact pressed");
        }
        if events.inventory {
            let locked = !controller.is_input_locked();
            controller.set_input_locked(locked);
            for mut cursor in &mut cursors {
                apply_cursor_lock(&mut cursor, locked);
            }
        }
    }
}

pub(crate) fn simulation_tick(
    time: Res<Time>,
    input: Res<LocomotionInput>,
    spatial_query: SpatialQuery,
    surfaces: Query<&SurfaceKind>,
    mut agents: Query<(
        Entity,
        &mut LocomotionAgent,
        &mut Transform,
        &mut LinearVelocity,
        &ComputedMass,
        &ComputedCenterOfMass,
        &mut PoseRig,
    )>,
) {
    let dt = time.delta_secs();
    let surface_of = |entity: Entity| surfaces.get(entity).copied().unwrap_or_default();

    for (entity, mut agent, mut transform, mut velocity, mass, center_of_mass, mut rig) in
        &mut agents
    {
        let world = AvianGround::new(&spatial_query, &surface_of, entity);
        let mut body = AvianBody::new(&mut transform, &mut velocity, mass, center_of_mass, dt);

        agent.0.advance_simulation_tick(
            TickContext {
                input: &input,
                world: &world,
                body: &mut body,
                rig: &mut *rig,
            },
            dt,
        );
    }
}

pub(crate) fn evaluate_ik(
    time: Res<Time>,
    mut agents: Query<(&mut LocomotionAgent, &Transform, &LinearVelocity, &mut PoseRig)>,
) {
    let dt = time.delta_secs();

    for (mut agent, transform, velocity, mut rig) in &mut agents {
        let body = BodySnapshot {
            transform: *transform,
            velocity: velocity.0,
        };
        agent.0.evaluate_ik(&body, &mut *rig, dt);
    }
}

pub(crate) fn resolve_camera_late(
    time: Res<Time>,
    input: Res<LocomotionInput>,
    mut agents: Query<
        (
            &mut LocomotionAgent,
            &mut Transform,
            &mut LinearVelocity,
            &ComputedMass,
            &ComputedCenterOfMass,
            &CameraMount,
        ),
        Without<PlayerCamera>,
    >,
    mut cameras: Query<&mut Transform, (With<PlayerCamera>, Without<LocomotionAgent>)>,
) {
    let Ok(mut camera_transform) = cameras.single_mut() else {
        return;
    };
    let dt = time.delta_secs();

    for (mut agent, mut transform, mut velocity, mass, center_of_mass, mount) in &mut agents {
        // A released cursor belongs to the UI, not the camera.
        let look_axis = if agent.0.is_input_locked() {
            input.look_axis
        } else {
            Vec2::ZERO
        };
        let root = transform.translation + Vec3::Y * mount.height * transform.scale.y;
        let mut camera = FollowCamera {
            transform: &mut *camera_transform,
            root,
            look_target: None,
        };
        let mut body = AvianBody::new(&mut transform, &mut velocity, mass, center_of_mass, dt);
        agent.0.resolve_camera_late(look_axis, &mut body, &mut camera, dt);
    }
}

pub(crate) fn forward_audio_cues(
    mut agents: Query<(Entity, &mut LocomotionAgent)>,
    mut cue_messages: MessageWriter<AudioCueMessage>,
) {
    for (entity, mut agent) in &mut agents {
        let sim_time = agent.0.sim_time();
        for cue in agent.0.drain_audio_cues() {
            debug!("Audio cue {:?} on {:?} at t={:.3}", cue.kind, cue.surface, sim_time);
            cue_messages.write(AudioCueMessage { agent: entity, cue });
        }
    }
}

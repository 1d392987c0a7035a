//! Host domain: debug gizmos for foot targets, ground normals, and the pelvis.

use bevy::prelude::*;

use crate::host::components::LocomotionAgent;
use crate::locomotion::{Foot, PoseRig};

const GROUNDED_COLOR: Color = Color::srgb(0.2, 0.9, 0.3);
const DANGLING_COLOR: Color = Color::srgb(0.9, 0.3, 0.2);
const PELVIS_COLOR: Color = Color::srgb(0.3, 0.5, 0.95);
const LOOK_COLOR: Color = Color::srgb(0.95, 0.85, 0.2);

pub(crate) fn draw_locomotion_gizmos(
    agents: Query<(&LocomotionAgent, &PoseRig)>,
    mut gizmos: Gizmos,
) {
    for (agent, rig) in &agents {
        let controller = &agent.0;

        for foot in Foot::ALL {
            let target = controller.foot(foot).target;
            let color = if target.grounded {
                GROUNDED_COLOR
            } else {
                DANGLING_COLOR
            };
            gizmos.sphere(Isometry3d::from_translation(target.position), 0.04, color);
            gizmos.arrow(target.position, target.position + target.normal * 0.25, color);
            gizmos.line(target.position, rig.goal(foot).position, color);
        }

        gizmos.sphere(Isometry3d::from_translation(rig.body_position), 0.06, PELVIS_COLOR);
        gizmos.line(
            rig.animated_body_position,
            rig.body_position,
            PELVIS_COLOR,
        );

        if let Some((target, _)) = rig.look_at {
            gizmos.sphere(Isometry3d::from_translation(target), 0.1, LOOK_COLOR);
        }
    }
}

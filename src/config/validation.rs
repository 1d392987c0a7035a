//! Validation for locomotion config values.

use super::LocomotionConfig;

/// A single rejected config field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f32,
    pub reason: &'static str,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' = {} {}", self.field, self.value, self.reason)
    }
}

macro_rules! check_positive {
    ($errors:expr, $config:expr, $($field:ident),+ $(,)?) => {
        $(
            if !($config.$field.is_finite() && $config.$field > 0.0) {
                $errors.push(ValidationError {
                    field: stringify!($field),
                    value: $config.$field,
                    reason: "must be a finite value greater than zero",
                });
            }
        )+
    };
}

macro_rules! check_finite {
    ($errors:expr, $config:expr, $($field:ident),+ $(,)?) => {
        $(
            if !$config.$field.is_finite() {
                $errors.push(ValidationError {
                    field: stringify!($field),
                    value: $config.$field,
                    reason: "must be finite",
                });
            }
        )+
    };
}

macro_rules! check_unit_range {
    ($errors:expr, $config:expr, $($field:ident),+ $(,)?) => {
        $(
            if !(0.0..=1.0).contains(&$config.$field) {
                $errors.push(ValidationError {
                    field: stringify!($field),
                    value: $config.$field,
                    reason: "must lie in [0, 1]",
                });
            }
        )+
    };
}

/// Validate a config. Returns every violation, empty if the config is usable.
pub fn validate_config(config: &LocomotionConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_positive!(
        errors,
        config,
        look_sensitivity,
        camera_look_at_distance,
        ground_check_distance,
        jump_check_distance,
        walk_speed,
        run_speed,
        velocity_blend_rate,
        aerial_ramp_duration,
        jump_impulse,
        capsule_height,
        capsule_center,
        capsule_radius,
        float_distance,
        step_reach_force,
        max_step_height,
        foot_radius,
        hips_position_speed,
        feet_position_speed,
        feet_rotation_speed_degrees,
        falloff_increase_rate,
        falloff_decrease_rate,
    );

    check_unit_range!(
        errors,
        config,
        step_height,
        look_at_weight,
        body_look_at_weight,
        head_look_at_weight,
        eyes_look_at_weight,
        clamp_look_at_weight,
        foot_ik_weight,
        hips_weight,
        foot_position_weight,
        foot_rotation_weight,
        jump_voice_chance,
        footstep_min_weight,
    );

    check_finite!(
        errors,
        config,
        upper_look_limit,
        lower_look_limit,
        max_aerial_velocity,
        float_disable_duration,
        ground_offset,
    );

    if config.max_aerial_velocity < 0.0 {
        errors.push(ValidationError {
            field: "max_aerial_velocity",
            value: config.max_aerial_velocity,
            reason: "must not be negative",
        });
    }

    if config.float_disable_duration < 0.0 {
        errors.push(ValidationError {
            field: "float_disable_duration",
            value: config.float_disable_duration,
            reason: "must not be negative",
        });
    }

    if config.upper_look_limit >= config.lower_look_limit {
        errors.push(ValidationError {
            field: "upper_look_limit",
            value: config.upper_look_limit,
            reason: "must be below lower_look_limit",
        });
    }

    if config.jump_check_distance > config.ground_check_distance {
        errors.push(ValidationError {
            field: "jump_check_distance",
            value: config.jump_check_distance,
            reason: "must not exceed ground_check_distance",
        });
    }

    errors
}

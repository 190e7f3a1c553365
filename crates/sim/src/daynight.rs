//! # Day/Night Cycle
//!
//! Two-state machine toggled by the user. Day shows sun, sky and clouds;
//! Night shows moon and stars and dims the key light. No guard conditions,
//! no time-driven transitions.

use bevy::prelude::*;
use tracing::info;

// ============================================================================
// Parameters
// ============================================================================

/// Key-light intensity during the day, in lumens.
pub const DAY_LIGHT_LUMENS: f32 = 13_000_000.0;

/// Key-light intensity at night. Same 1.3 : 0.3 ratio as the day value.
pub const NIGHT_LIGHT_LUMENS: f32 = 3_000_000.0;

// ============================================================================
// State & Markers
// ============================================================================

/// Current phase of the cycle. Exactly one is active; Day at startup.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayNightState {
    #[default]
    Day,
    Night,
}

impl DayNightState {
    pub fn flipped(self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }
}

/// Which celestial prop an entity plays. Governs visibility per phase.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyRole {
    Sun,
    Moon,
    Sky,
    Star,
    Cloud,
}

/// Visibility a prop should have in the given phase.
///
/// Day and Night configurations are exact inverses, so applying the toggle
/// twice restores every prop.
pub fn visibility_for(role: SkyRole, state: DayNightState) -> Visibility {
    let shown = match role {
        SkyRole::Sun | SkyRole::Sky | SkyRole::Cloud => state == DayNightState::Day,
        SkyRole::Moon | SkyRole::Star => state == DayNightState::Night,
    };
    if shown {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

/// Key-light intensity for the given phase.
pub fn light_lumens_for(state: DayNightState) -> f32 {
    match state {
        DayNightState::Day => DAY_LIGHT_LUMENS,
        DayNightState::Night => NIGHT_LIGHT_LUMENS,
    }
}

/// User action: flip between Day and Night.
#[derive(Message, Clone)]
pub struct ToggleDayNight;

// ============================================================================
// Systems
// ============================================================================

/// Flip the state once per queued toggle. Unconditional, no guards.
fn handle_toggle(
    mut messages: MessageReader<ToggleDayNight>,
    state: Res<State<DayNightState>>,
    mut next: ResMut<NextState<DayNightState>>,
) {
    let presses = messages.read().count();
    if presses == 0 {
        return;
    }
    let mut target = *state.get();
    for _ in 0..presses {
        target = target.flipped();
    }
    if target != *state.get() {
        info!(?target, "day/night toggled");
        next.set(target);
    }
}

/// Apply the entered phase's visibility and light configuration.
fn apply_phase(
    state: Res<State<DayNightState>>,
    mut props: Query<(&SkyRole, &mut Visibility)>,
    mut lights: Query<&mut SpotLight>,
) {
    let phase = *state.get();
    for (role, mut visibility) in &mut props {
        *visibility = visibility_for(*role, phase);
    }
    for mut light in &mut lights {
        light.intensity = light_lumens_for(phase);
    }
}

// ============================================================================
// Plugin
// ============================================================================

pub struct DayNightPlugin;

impl Plugin for DayNightPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<DayNightState>()
            .add_message::<ToggleDayNight>()
            .add_systems(Update, handle_toggle)
            .add_systems(OnEnter(DayNightState::Day), apply_phase)
            .add_systems(OnEnter(DayNightState::Night), apply_phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [SkyRole; 5] = [
        SkyRole::Sun,
        SkyRole::Moon,
        SkyRole::Sky,
        SkyRole::Star,
        SkyRole::Cloud,
    ];

    #[test]
    fn day_and_night_are_exact_inverses() {
        for role in ALL_ROLES {
            let day = visibility_for(role, DayNightState::Day);
            let night = visibility_for(role, DayNightState::Night);
            assert_ne!(day, night, "{role:?} must flip between phases");
        }
    }

    #[test]
    fn toggle_twice_is_identity() {
        let start = DayNightState::Day;
        assert_eq!(start.flipped().flipped(), start);
        for role in ALL_ROLES {
            assert_eq!(
                visibility_for(role, start),
                visibility_for(role, start.flipped().flipped()),
            );
        }
        assert_eq!(
            light_lumens_for(start),
            light_lumens_for(start.flipped().flipped()),
        );
    }

    #[test]
    fn night_shows_moon_and_stars_only() {
        assert_eq!(
            visibility_for(SkyRole::Moon, DayNightState::Night),
            Visibility::Visible
        );
        assert_eq!(
            visibility_for(SkyRole::Star, DayNightState::Night),
            Visibility::Visible
        );
        assert_eq!(
            visibility_for(SkyRole::Sun, DayNightState::Night),
            Visibility::Hidden
        );
        assert_eq!(
            visibility_for(SkyRole::Sky, DayNightState::Night),
            Visibility::Hidden
        );
        assert_eq!(
            visibility_for(SkyRole::Cloud, DayNightState::Night),
            Visibility::Hidden
        );
    }
}

//! Debug HUD: two labeled buttons (day/night toggle, box reset) and the
//! firework counter text. The buttons only dispatch simulation messages;
//! all handling lives in the sim crate.

use bevy::prelude::*;
use ringwood_sim::firework::FireworkTally;
use ringwood_sim::registry::ResetBoxes;
use ringwood_sim::ToggleDayNight;

const PANEL_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);
const BUTTON_NORMAL: Color = Color::srgb(0.18, 0.18, 0.18);
const BUTTON_HOVER: Color = Color::srgb(0.28, 0.28, 0.28);
const BUTTON_PRESSED: Color = Color::srgb(0.38, 0.38, 0.38);

/// Which simulation message a HUD button dispatches.
#[derive(Component, Clone, Copy)]
enum HudAction {
    ToggleDayNight,
    ResetBoxes,
}

impl HudAction {
    fn label(self) -> &'static str {
        match self {
            Self::ToggleDayNight => "Toggle Day/Night",
            Self::ResetBoxes => "Reset Boxes",
        }
    }
}

/// Marker for the counter text node.
#[derive(Component)]
struct TallyText;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
            .add_systems(Update, (handle_buttons, refresh_tally));
    }
}

fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                right: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
            Name::new("HudPanel"),
        ))
        .with_children(|panel| {
            for action in [HudAction::ToggleDayNight, HudAction::ResetBoxes] {
                panel
                    .spawn((
                        Button,
                        action,
                        Node {
                            padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(BUTTON_NORMAL),
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new(action.label()),
                            TextFont {
                                font_size: 14.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    });
            }
            panel.spawn((
                Text::new("Fireworks set off: 0"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                TallyText,
            ));
        });
}

fn handle_buttons(
    mut interactions: Query<
        (&Interaction, &HudAction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut toggles: MessageWriter<ToggleDayNight>,
    mut resets: MessageWriter<ResetBoxes>,
) {
    for (interaction, action, mut background) in &mut interactions {
        match interaction {
            Interaction::Pressed => {
                match action {
                    HudAction::ToggleDayNight => {
                        toggles.write(ToggleDayNight);
                    }
                    HudAction::ResetBoxes => {
                        resets.write(ResetBoxes);
                    }
                }
                background.0 = BUTTON_PRESSED;
            }
            Interaction::Hovered => {
                background.0 = BUTTON_HOVER;
            }
            Interaction::None => {
                background.0 = BUTTON_NORMAL;
            }
        }
    }
}

fn refresh_tally(tally: Res<FireworkTally>, mut texts: Query<&mut Text, With<TallyText>>) {
    if !tally.is_changed() {
        return;
    }
    for mut text in &mut texts {
        text.0 = format!("Fireworks set off: {}", tally.0);
    }
}

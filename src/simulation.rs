//! Simulation plugin and systems for Bevy ECS
//!
//! ## System Responsibilities
//!
//! | System                        | Schedule   | Purpose                                  |
//! |-------------------------------|------------|------------------------------------------|
//! | `init_disc_pool`              | Startup    | Shared disc mesh for filled circles      |
//! | `mount_backdrop_system`       | Startup    | Build and mount the selected backdrop    |
//! | `sync_window_system::<B>`     | Update     | Resize, pointer-move and click capture   |
//! | `tick_backdrop_system::<B>`   | Update     | One backdrop tick into the `DrawList`    |
//! | `present_draw_list_system`    | PostUpdate | Hand the recorded frame to the renderer  |
//! | `teardown_on_close_system::<B>` | Last     | Tear down once the primary window closes |
//!
//! Backdrop systems only run while their resource exists, so after teardown
//! nothing ticks and no input is forwarded.

use crate::backdrop::{Backdrop, BackdropKind};
use crate::config::{self, FieldConfig};
use crate::drift::DriftField;
use crate::field::CircleField;
use crate::graphics;
use crate::rendering::present_draw_list_system;
use crate::surface::DrawList;
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

pub struct SimulationPlugin {
    pub kind: BackdropKind,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

/// Which backdrop to mount, as configured on the plugin.
#[derive(Resource, Debug, Clone, Copy)]
pub struct BackdropSelection {
    pub kind: BackdropKind,
    pub seed: Option<u64>,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldConfig>()
            .init_resource::<DrawList>()
            .insert_resource(BackdropSelection {
                kind: self.kind,
                seed: self.seed,
            })
            .add_systems(
                Startup,
                (
                    graphics::init_disc_pool,
                    mount_backdrop_system.after(config::load_field_config),
                ),
            )
            .add_systems(
                Update,
                (
                    (
                        sync_window_system::<CircleField>,
                        tick_backdrop_system::<CircleField>,
                    )
                        .chain()
                        .run_if(resource_exists::<CircleField>),
                    (
                        sync_window_system::<DriftField>,
                        tick_backdrop_system::<DriftField>,
                    )
                        .chain()
                        .run_if(resource_exists::<DriftField>),
                ),
            )
            .add_systems(PostUpdate, present_draw_list_system)
            .add_systems(
                Last,
                (
                    teardown_on_close_system::<CircleField>
                        .run_if(resource_exists::<CircleField>),
                    teardown_on_close_system::<DriftField>.run_if(resource_exists::<DriftField>),
                ),
            );
    }
}

/// Build the selected backdrop from the loaded config and mount it at the
/// primary window's size.
pub fn mount_backdrop_system(
    mut commands: Commands,
    selection: Res<BackdropSelection>,
    config: Res<FieldConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let size = windows
        .single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::ZERO);
    let config = config.clone();

    match selection.kind {
        BackdropKind::Circles => {
            let mut field = match selection.seed {
                Some(seed) => CircleField::with_seed(config, seed),
                None => CircleField::new(config),
            };
            field.mount(size);
            commands.insert_resource(field);
        }
        BackdropKind::Drift => {
            let mut field = match selection.seed {
                Some(seed) => DriftField::with_seed(config, seed),
                None => DriftField::new(config),
            };
            field.mount(size);
            commands.insert_resource(field);
        }
    }
    eprintln!("[SETUP] {:?} backdrop mounted", selection.kind);
}

/// Forward window resizes, cursor movement and left clicks to the backdrop.
///
/// Cursor positions are window-local with the origin at the top-left, which
/// is exactly the backdrop's surface space.
pub fn sync_window_system<B: Backdrop + Resource>(
    mut backdrop: ResMut<B>,
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time<Real>>,
    mut last_cursor: Local<Option<Vec2>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let now = time.elapsed();

    let size = Vec2::new(window.width(), window.height());
    if size != backdrop.size() {
        backdrop.resize(size);
    }

    if let Some(cursor) = window.cursor_position() {
        if *last_cursor != Some(cursor) {
            backdrop.pointer_moved(cursor, now);
            *last_cursor = Some(cursor);
        }
        if buttons.just_pressed(MouseButton::Left) {
            backdrop.click(cursor, now);
        }
    }
}

/// Record one backdrop frame into the [`DrawList`].
pub fn tick_backdrop_system<B: Backdrop + Resource>(
    mut backdrop: ResMut<B>,
    mut list: ResMut<DrawList>,
    time: Res<Time<Real>>,
) {
    list.begin(backdrop.size());
    backdrop.tick(time.elapsed(), &mut *list);
}

/// Tear the backdrop down and drop it once there is no primary window.
pub fn teardown_on_close_system<B: Backdrop + Resource>(
    mut commands: Commands,
    mut backdrop: ResMut<B>,
    windows: Query<(), With<PrimaryWindow>>,
) {
    if windows.is_empty() {
        backdrop.teardown();
        commands.remove_resource::<B>();
    }
}

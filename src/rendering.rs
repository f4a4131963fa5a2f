//! Presentation of the recorded frame.
//!
//! ## Layer Model
//!
//! | Command         | Technology        | Notes                                  |
//! |-----------------|-------------------|----------------------------------------|
//! | `FillRect`      | `ClearColor`      | Background only; alpha is dropped      |
//! | `FillCircle`    | pooled `Mesh2d`   | Bodies, motes, stardust                |
//! | `StrokeCircle`  | Gizmos            | Click and explosion waves              |
//! | `StrokeLine`    | Gizmos            | Collision streaks                      |
//!
//! Discs are layered by recording order so later fills sit on top.

use crate::graphics::{surface_to_world, Disc, DiscPool, PooledDisc};
use crate::surface::{DrawCommand, DrawList};
use bevy::prelude::*;

/// Depth added per recorded command.
const DEPTH_STEP: f32 = 1e-4;

/// Present the current [`DrawList`]: update the clear colour, place pooled
/// discs, and emit gizmo strokes.  Unused discs are hidden.
pub fn present_draw_list_system(
    mut commands: Commands,
    list: Res<DrawList>,
    pool: Option<ResMut<DiscPool>>,
    mut clear: ResMut<ClearColor>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut discs: Query<(&mut Transform, &mut Visibility), With<Disc>>,
    mut gizmos: Gizmos,
) {
    let Some(mut pool) = pool else {
        return;
    };
    let size = list.size();
    let mut used = 0;

    for (order, command) in list.commands().iter().enumerate() {
        match *command {
            DrawCommand::FillRect { color, .. } => {
                clear.0 = color.with_alpha(1.0);
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                let transform = Transform::from_translation(
                    surface_to_world(center, size).extend(order as f32 * DEPTH_STEP),
                )
                .with_scale(Vec3::splat(radius.max(f32::EPSILON)));

                if used < pool.discs.len() {
                    let disc = &pool.discs[used];
                    if let Ok((mut t, mut visibility)) = discs.get_mut(disc.entity) {
                        *t = transform;
                        *visibility = Visibility::Visible;
                    }
                    if let Some(material) = materials.get_mut(&disc.material) {
                        material.color = color;
                    }
                } else {
                    let material = materials.add(ColorMaterial::from_color(color));
                    let entity = commands
                        .spawn((
                            Disc,
                            Mesh2d(pool.mesh.clone()),
                            MeshMaterial2d(material.clone()),
                            transform,
                            Visibility::Visible,
                        ))
                        .id();
                    pool.discs.push(PooledDisc { entity, material });
                }
                used += 1;
            }
            DrawCommand::StrokeCircle {
                center,
                radius,
                color,
                ..
            } => {
                gizmos.circle_2d(surface_to_world(center, size), radius, color);
            }
            DrawCommand::StrokeLine {
                from, to, color, ..
            } => {
                gizmos.line_2d(
                    surface_to_world(from, size),
                    surface_to_world(to, size),
                    color,
                );
            }
        }
    }

    for disc in pool.discs.iter().skip(used) {
        if let Ok((_, mut visibility)) = discs.get_mut(disc.entity) {
            *visibility = Visibility::Hidden;
        }
    }
}

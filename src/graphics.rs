//! Camera, disc pool and coordinate mapping for presenting backdrop frames.
//!
//! Backdrops draw in surface pixels (origin top-left, `y` down).  The 2-D
//! camera sits at the window centre with `y` up, so every recorded point is
//! mapped through [`surface_to_world`] before it reaches the renderer.

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

/// Rim vertices of the shared disc mesh.
const DISC_SIDES: u32 = 24;

/// Marker for pooled filled-circle entities.
#[derive(Component)]
pub struct Disc;

#[derive(Debug, Clone)]
pub struct PooledDisc {
    pub entity: Entity,
    /// Unique per disc so each can carry its own colour.
    pub material: Handle<ColorMaterial>,
}

/// Reusable `Mesh2d` discs sharing one unit-circle mesh.
///
/// Filled circles are drawn by rescaling and recolouring pooled entities; the
/// pool only grows, and discs beyond the current frame's count are hidden.
#[derive(Resource)]
pub struct DiscPool {
    pub mesh: Handle<Mesh>,
    pub discs: Vec<PooledDisc>,
}

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    eprintln!("[SETUP] Camera spawned");
}

/// Create the shared unit-circle mesh and an empty [`DiscPool`].
pub fn init_disc_pool(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let mesh = meshes.add(circle_mesh(1.0, DISC_SIDES));
    commands.insert_resource(DiscPool {
        mesh,
        discs: Vec::new(),
    });
}

/// Map a surface point to world space for a surface of `size` pixels.
pub fn surface_to_world(p: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(p.x - size.x / 2.0, size.y / 2.0 - p.y)
}

/// Build a filled circle mesh approximated by an `n`-sided regular polygon.
///
/// Uses a triangle fan from the centre: `(0, i, i+1 mod n)`.
fn circle_mesh(radius: f32, sides: u32) -> Mesh {
    let n = sides as usize;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(n + 1);

    positions.push([0.0, 0.0, 0.0]);
    normals.push([0.0, 0.0, 1.0]);
    uvs.push([0.5, 0.5]);

    for i in 0..n {
        let angle = std::f32::consts::TAU * i as f32 / n as f32;
        let (y, x) = angle.sin_cos();
        positions.push([radius * x, radius * y, 0.0]);
        normals.push([0.0, 0.0, 1.0]);
        uvs.push([x / 2.0 + 0.5, y / 2.0 + 0.5]);
    }

    let mut indices: Vec<u32> = Vec::with_capacity(n * 3);
    for i in 0..n as u32 {
        let v1 = i + 1;
        let v2 = (i + 1) % n as u32 + 1;
        indices.extend_from_slice(&[0, v1, v2]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_corners_map_to_window_edges() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(surface_to_world(Vec2::ZERO, size), Vec2::new(-400.0, 300.0));
        assert_eq!(surface_to_world(size, size), Vec2::new(400.0, -300.0));
        assert_eq!(surface_to_world(size / 2.0, size), Vec2::ZERO);
    }

    #[test]
    fn disc_mesh_is_a_closed_fan() {
        let mesh = circle_mesh(1.0, 8);
        assert_eq!(mesh.count_vertices(), 9);
        match mesh.indices() {
            Some(Indices::U32(idx)) => {
                assert_eq!(idx.len(), 24);
                assert_eq!(&idx[21..], &[0, 8, 1]);
            }
            other => panic!("unexpected indices {other:?}"),
        }
    }
}

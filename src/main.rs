use bevy::prelude::*;
use bevy::window::WindowResolution;
use orbfield::backdrop::{BackdropKind, BACKGROUND};
use orbfield::config::{self, FieldConfig};
use orbfield::graphics;
use orbfield::simulation::SimulationPlugin;
use std::env;

fn main() {
    // Backdrop selection and optional fixed seed
    let kind = match env::var("ORBFIELD_BACKDROP") {
        Ok(name) => name.parse::<BackdropKind>().unwrap_or_else(|e| {
            eprintln!("[SETUP] {e}; falling back to circles");
            BackdropKind::default()
        }),
        Err(_) => BackdropKind::default(),
    };
    let seed = env::var("ORBFIELD_SEED")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok());

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orbfield".into(),
                resolution: WindowResolution::new(1280, 720),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(BACKGROUND))
        // Compiled defaults; load_field_config overwrites them from
        // assets/field.toml (if present) before the backdrop is mounted.
        .insert_resource(FieldConfig::default())
        .add_plugins(SimulationPlugin { kind, seed })
        .add_systems(
            Startup,
            (
                config::load_field_config,
                graphics::setup_camera.after(config::load_field_config),
            ),
        )
        .run();
}

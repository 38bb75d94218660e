use crate::config::GameConfig;
use crate::physics::{board_origin, Bubble};
use bevy::prelude::*;

/// Marker for the translucent deadline strip.
#[derive(Component)]
pub struct DeadlineMarker;

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Unit scale: one window pixel per world unit, which pointer input relies on.
    commands.spawn(Camera2d);
    info!("Camera spawned");
}

/// Draw a thin red strip across the box at the deadline height.
///
/// Purely visual; it has no collider and survives restarts.
pub fn setup_deadline_marker(mut commands: Commands, config: Res<GameConfig>) {
    let origin = board_origin(&config);
    let inner_width = config.board_width - 2.0 * config.wall_thickness;
    commands.spawn((
        DeadlineMarker,
        Sprite::from_color(Color::srgba(1.0, 0.2, 0.2, 0.35), Vec2::new(inner_width, 2.0)),
        Transform::from_xyz(0.0, origin.y + config.deadline_height, -1.0),
    ));
}

/// Attach a filled circle mesh to every newly spawned bubble.
///
/// Uses [`Added<Bubble>`] so only bubbles spawned since the previous frame are
/// touched.  Releasing a pending bubble re-inserts `Bubble`, which counts as
/// a change rather than an addition, so the mesh is not rebuilt.
pub fn attach_bubble_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &Bubble), Added<Bubble>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, bubble) in query.iter() {
        let mesh = meshes.add(Circle::new(bubble.tier.radius()));
        let material = materials.add(ColorMaterial::from_color(bubble.tier.color()));
        commands
            .entity(entity)
            .try_insert((Mesh2d(mesh), MeshMaterial2d(material)));
    }
}

use bevy_ecs::prelude::*;
use raylib::ffi;
use raylib::prelude::*;

use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::tag::Tag;
use crate::components::tint::Tint;
use crate::components::translation::Translation;
use crate::resources::camera3d::Camera3DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::scalestate::ScaleState;

type DrawableQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Translation,
        &'static Rotation,
        &'static Scale,
        Option<&'static Tint>,
        Option<&'static Tag>,
    ),
>;

/// Draw the scene, the HUD, and (when [`DebugMode`] exists) the overlay.
///
/// Every object is drawn as a unit cube transformed by its translation,
/// rotation (X, then Y, then Z) and scale.
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    camera: Res<Camera3DRes>,
    state: Res<ScaleState>,
    debug: Option<Res<DebugMode>>,
    objects: DrawableQuery,
) {
    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::RAYWHITE);

    {
        let mut d3 = d.begin_mode3D(camera.0);
        d3.draw_grid(10, 1.0);
        for (translation, rotation, scale, tint, _) in objects.iter() {
            let tint = tint.copied().unwrap_or_default();
            draw_object(&mut d3, translation, rotation, scale, &tint);
        }
    }

    d.draw_text(&hud_text(&state), 10, 10, 20, Color::DARKGRAY);
    d.draw_text(
        "I/K: scale tagged objects   WASD: move camera   F11: debug",
        10,
        36,
        10,
        Color::GRAY,
    );

    if debug.is_some() {
        let fps = d.get_fps();
        d.draw_text(&format!("FPS: {}", fps), 10, 56, 10, Color::BLACK);
        let mut y = 72;
        for (_, _, scale, _, tag) in objects.iter() {
            let name = tag.map(Tag::name).unwrap_or("<untagged>");
            d.draw_text(&object_line(name, scale), 10, y, 10, Color::BLACK);
            y += 14;
        }
    }
}

fn draw_object(
    d3: &mut RaylibMode3D<RaylibDrawHandle>,
    translation: &Translation,
    rotation: &Rotation,
    scale: &Scale,
    tint: &Tint,
) {
    let origin = Vector3::new(0.0, 0.0, 0.0);
    unsafe {
        ffi::rlPushMatrix();
        ffi::rlTranslatef(translation.pos.x, translation.pos.y, translation.pos.z);
        ffi::rlRotatef(rotation.degrees.x, 1.0, 0.0, 0.0);
        ffi::rlRotatef(rotation.degrees.y, 0.0, 1.0, 0.0);
        ffi::rlRotatef(rotation.degrees.z, 0.0, 0.0, 1.0);
        ffi::rlScalef(scale.scale.x, scale.scale.y, scale.scale.z);
    }
    d3.draw_cube(origin, 1.0, 1.0, 1.0, tint.color);
    d3.draw_cube_wires(origin, 1.0, 1.0, 1.0, tint.edge());
    unsafe {
        ffi::rlPopMatrix();
    }
}

fn hud_text(state: &ScaleState) -> String {
    format!("scale: {:.2}", state.x)
}

fn object_line(tag: &str, scale: &Scale) -> String {
    format!(
        "{}: ({:.2}, {:.2}, {:.2})",
        tag, scale.scale.x, scale.scale.y, scale.scale.z
    )
}

// Scene assembly: desert environment plus the three creatures

use std::sync::Arc;

use glam::Mat4;

use crate::camera::OrbitView;
use crate::creatures::{antlion, dragonfly, wyvern};
use crate::gen::environment;
use crate::math;
use crate::scene::SceneNode;

/// Build the whole scene tree. The dune terrain doubles as the root node;
/// sky, sun and clouds come first in paint order, then the creatures so
/// their translucent parts blend over the backdrop.
pub fn build() -> SceneNode {
    let mut root = SceneNode::new(
        "terrain",
        Arc::new(environment::desert_terrain(200.0, 200.0, 50)),
    );

    // Sky shell large enough to wrap the zoomed-out camera, small enough
    // to stay inside the far plane.
    let sky = SceneNode::new("sky", Arc::new(environment::sky_dome(60.0, 32)));
    root.add_child(sky);

    let mut sun = SceneNode::new("sun", Arc::new(environment::sun(4.0, 20)));
    sun.placement = math::translated(Mat4::IDENTITY, -18.0, 22.0, -40.0);
    root.add_child(sun);

    let cloud_mesh = Arc::new(environment::cloud(9.0, 2.5, 7.0));
    let cloud_spots: [(&str, f32, f32, f32); 3] = [
        ("cloud_a", -25.0, 18.0, -30.0),
        ("cloud_b", 12.0, 24.0, -38.0),
        ("cloud_c", 30.0, 16.0, -20.0),
    ];
    for (name, x, y, z) in cloud_spots {
        let mut cloud = SceneNode::new(name, cloud_mesh.clone());
        cloud.placement = math::translated(Mat4::IDENTITY, x, y, z);
        cloud.opacity = 0.85;
        root.add_child(cloud);
    }

    let mut crawler = antlion::build();
    crawler.placement = math::translated(Mat4::IDENTITY, -4.5, 0.0, 0.0);
    root.add_child(crawler);

    let mut flyer = dragonfly::build();
    flyer.placement = math::translated(Mat4::IDENTITY, 4.0, 1.0, 0.5);
    root.add_child(flyer);

    let winged = wyvern::build();
    root.add_child(winged);

    root
}

/// Per-frame animation dispatch. `t` is seconds since start.
pub fn animate(root: &mut SceneNode, t: f32, view: &OrbitView) {
    if let Some(node) = root.find_mut("antlion") {
        antlion::animate(node, t, view);
    }
    if let Some(node) = root.find_mut("dragonfly") {
        dragonfly::animate(node, t, view);
    }
    if let Some(node) = root.find_mut("wyvern") {
        wyvern::animate(node, t, view);
    }
}

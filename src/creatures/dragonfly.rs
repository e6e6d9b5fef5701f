// Dragonfly: a slim hovering flyer
//
// Striped tapered body swept along a gentle curve, round head with big
// translucent eyes, two bent antenna horns, four tucked legs hanging off
// the thorax, pale wing-attachment posts and four diamond wings. Hovers
// with a bob and a fast wing flap.

use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::camera::OrbitView;
use crate::gen::{bezier, ellipsoid, polygon, tube};
use crate::math;
use crate::scene::SceneNode;

const BODY_BASE: [f32; 3] = [0.93, 0.97, 0.72];
const STRIPE: [f32; 3] = [0.42, 0.78, 0.27];
const HORN: [f32; 3] = [102.0 / 255.0, 172.0 / 255.0, 85.0 / 255.0];
const EYE: [f32; 3] = [0.85, 0.35, 0.25];
const LEG: [f32; 3] = [0.25, 0.25, 0.2];
const POST: [f32; 3] = [0.9, 0.9, 0.9];

/// Wing roots along the thorax: (name, z offset, near-side).
const WINGS: [(&str, f32, bool); 4] = [
    ("dfly_wing_rf", 0.25, false),
    ("dfly_wing_rb", -0.15, false),
    ("dfly_wing_lf", 0.25, true),
    ("dfly_wing_lb", -0.15, true),
];

/// Leg sockets under the thorax: (thigh, shin, toes, z offset, side sign).
const LEG_SOCKETS: [(&str, &str, [&str; 2], f32, f32); 4] = [
    ("dfly_leg_rf", "dfly_leg_rf_shin", ["dfly_leg_rf_toe_0", "dfly_leg_rf_toe_1"], 0.45, 1.0),
    ("dfly_leg_rb", "dfly_leg_rb_shin", ["dfly_leg_rb_toe_0", "dfly_leg_rb_toe_1"], -0.05, 1.0),
    ("dfly_leg_lf", "dfly_leg_lf_shin", ["dfly_leg_lf_toe_0", "dfly_leg_lf_toe_1"], 0.45, -1.0),
    ("dfly_leg_lb", "dfly_leg_lb_shin", ["dfly_leg_lb_toe_0", "dfly_leg_lb_toe_1"], -0.05, -1.0),
];

pub fn build() -> SceneNode {
    // Body: head end fat, tail end thin, banded green stripes.
    let spine = [
        Vec3::new(0.0, 0.0, 0.9),
        Vec3::new(0.0, 0.05, 0.3),
        Vec3::new(0.0, 0.1, -0.5),
        Vec3::new(0.0, 0.35, -1.4),
    ];
    let body_mesh = Arc::new(bezier::swept_tube(
        &spine,
        0.24,
        0.19,
        60,
        24,
        |t| 1.0 - 0.8 * t,
        |ring, _| if (ring / 5) % 2 == 0 { BODY_BASE } else { STRIPE },
    ));
    let head_mesh = Arc::new(ellipsoid::ellipsoid(0.26, 0.24, 0.26, 14, 20, BODY_BASE));
    let eye_mesh = Arc::new(ellipsoid::ellipsoid(0.16, 0.18, 0.16, 12, 16, EYE));
    let horn_mesh = Arc::new(tube::bent_cone(&tube::BentCone {
        length: 0.5,
        base_radius: 0.035,
        tip_radius: 0.008,
        stacks: 16,
        slices: 10,
        bend_angle: std::f32::consts::FRAC_PI_3,
        bend_axis: tube::BendAxis::Z,
        base_color: HORN,
        tip_color: HORN,
        cap_base: true,
        cap_tip: false,
    }));
    let thigh_mesh = Arc::new(tube::tapered_tube(0.05, 0.05, 0.04, 0.04, 0.28, 8, 8, LEG));
    let shin_mesh = Arc::new(tube::tapered_tube(0.022, 0.022, 0.016, 0.016, 0.32, 8, 8, LEG));
    let toe_mesh = Arc::new(tube::tapered_tube(0.01, 0.01, 0.005, 0.005, 0.1, 6, 6, LEG));
    let post_mesh = Arc::new(tube::hourglass(0.06, 0.035, 0.055, 0.14, 4, 12, POST));
    let wing_mesh = Arc::new(polygon::layered_diamond(
        1.1,
        &polygon::DiamondStyle {
            center_color: [0.85, 0.95, 0.85],
            mid_color: [0.75, 0.9, 0.75],
            edge_color: [0.35, 0.6, 0.3],
            border_width: 0.15,
            two_sided: true,
        },
    ));

    let mut root = SceneNode::new("dragonfly", body_mesh);

    let mut head = SceneNode::new("dfly_head", head_mesh);
    head.placement = math::translated(Mat4::IDENTITY, 0.0, 0.02, 1.05);
    for (name, side) in [("dfly_eye_r", 1.0f32), ("dfly_eye_l", -1.0)] {
        let mut eye = SceneNode::new(name, eye_mesh.clone());
        eye.placement = math::translated(Mat4::IDENTITY, side * 0.17, 0.06, 0.08);
        // Compound eyes read better slightly translucent.
        eye.opacity = 0.85;
        head.add_child(eye);
    }
    for (name, side) in [("dfly_horn_r", 1.0f32), ("dfly_horn_l", -1.0)] {
        let mut horn = SceneNode::new(name, horn_mesh.clone());
        horn.placement = {
            let m = math::rotated_y(Mat4::IDENTITY, side * math::deg_to_rad(25.0));
            let m = math::rotated_z(m, side * math::deg_to_rad(35.0));
            math::translated(m, side * 0.1, 0.2, 0.05)
        };
        head.add_child(horn);
    }
    root.add_child(head);

    // Four tucked legs: thigh flipped downward and sprawled outward, shin
    // bent back at the knee, two spread toes at the tip. All four chains
    // share the three segment meshes.
    for (thigh_name, shin_name, toe_names, z, side) in LEG_SOCKETS {
        let mut thigh = SceneNode::new(thigh_name, thigh_mesh.clone());
        thigh.placement = {
            let m = math::rotated_x(Mat4::IDENTITY, std::f32::consts::PI);
            let m = math::rotated_z(m, side * math::deg_to_rad(-40.0));
            math::translated(m, side * 0.18, -0.12, z)
        };

        let mut shin = SceneNode::new(shin_name, shin_mesh.clone());
        shin.placement = {
            let m = math::rotated_z(Mat4::IDENTITY, side * math::deg_to_rad(65.0));
            math::translated(m, 0.0, 0.26, 0.0)
        };

        for (i, toe_name) in toe_names.into_iter().enumerate() {
            let mut toe = SceneNode::new(toe_name, toe_mesh.clone());
            let spread = math::deg_to_rad(if i == 0 { -30.0 } else { 30.0 });
            toe.placement = {
                let m = math::rotated_x(Mat4::IDENTITY, spread);
                math::translated(m, 0.0, 0.3, 0.0)
            };
            shin.add_child(toe);
        }
        thigh.add_child(shin);
        root.add_child(thigh);
    }

    // Pale posts the wings hinge from, one per side.
    for (name, side) in [("dfly_wing_post_r", 1.0f32), ("dfly_wing_post_l", -1.0)] {
        let mut post = SceneNode::new(name, post_mesh.clone());
        post.placement = {
            let m = math::rotated_z(Mat4::IDENTITY, side * math::deg_to_rad(-65.0));
            math::translated(m, side * 0.16, 0.1, 0.05)
        };
        root.add_child(post);
    }

    // Wings hang off the thorax; flapped around their root edge each frame.
    for (name, z, _) in WINGS {
        let mut wing = SceneNode::new(name, wing_mesh.clone());
        wing.placement = math::translated(Mat4::IDENTITY, 0.0, 0.12, z);
        wing.opacity = 0.65;
        root.add_child(wing);
    }

    root
}

pub fn animate(root: &mut SceneNode, t: f32, view: &OrbitView) {
    // Hover: bob plus a slow pitch wobble, then the user's spin.
    let bob = (t * 2.4).sin() * 0.12;
    let pitch = (t * 1.1).sin() * 0.05;

    let m = math::rotated_x(Mat4::IDENTITY, pitch);
    let m = math::rotated_y(m, view.theta);
    let m = math::rotated_x(m, view.phi);
    root.movement = math::translated(m, 0.0, 1.1 + bob, 0.0);

    // Fast flap; back pair lags the front pair slightly.
    for (name, _, near_side) in WINGS {
        let phase = if name.ends_with('b') { 0.35 } else { 0.0 };
        let flap = ((t * 14.0) - phase).sin() * math::deg_to_rad(38.0);
        let side = if near_side { -1.0 } else { 1.0 };

        // Wing points outward along X; rotate around the body axis (Z)
        // so the tip beats up and down.
        let m = math::rotated_z(Mat4::IDENTITY, side * math::deg_to_rad(90.0));
        let m = math::rotated_z(m, side * flap);
        if let Some(wing) = root.find_mut(name) {
            wing.movement = m;
        }
    }
}

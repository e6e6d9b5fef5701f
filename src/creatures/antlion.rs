// Antlion: a squat, big-headed desert crawler
//
// Ellipsoid body and head, hourglass neck, four sagging Bezier legs with
// rounded tips, bulging eyes with pupils and a zigzag crack pattern drawn
// on the head surface. Idles with a breathing pulse, a bob and a
// diagonal-gait walk cycle.

use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::camera::OrbitView;
use crate::gen::{bezier, detail, ellipsoid, tube};
use crate::math;
use crate::scene::SceneNode;

const HIDE: [f32; 3] = [240.0 / 255.0, 150.0 / 255.0, 70.0 / 255.0];
const HIDE_DARK: [f32; 3] = [0.90, 0.53, 0.22];
const TIP: [f32; 3] = [220.0 / 255.0, 140.0 / 255.0, 80.0 / 255.0];
const CRACK: [f32; 3] = [40.0 / 255.0, 25.0 / 255.0, 10.0 / 255.0];

const HEAD_RADII: [f32; 3] = [1.0, 0.9, 1.2];

/// Leg sockets on the body underside: (name, tip name, x, z, mirrored).
const LEG_SOCKETS: [(&str, &str, f32, f32, bool); 4] = [
    ("leg_rf", "leg_rf_tip", 0.55, 0.4, false),
    ("leg_rb", "leg_rb_tip", 0.55, -0.3, false),
    ("leg_lf", "leg_lf_tip", -0.55, 0.4, true),
    ("leg_lb", "leg_lb_tip", -0.55, -0.3, true),
];

pub fn build() -> SceneNode {
    let body_mesh = Arc::new(ellipsoid::ellipsoid(0.8, 0.65, 0.9, 14, 20, HIDE));
    let head_mesh = Arc::new(ellipsoid::ellipsoid(
        HEAD_RADII[0],
        HEAD_RADII[1],
        HEAD_RADII[2],
        30,
        30,
        HIDE,
    ));
    let eye_mesh = Arc::new(ellipsoid::ellipsoid(0.05, 0.2, 0.2, 10, 12, [0.0; 3]));
    let pupil_mesh = Arc::new(ellipsoid::ellipsoid(0.01, 0.08, 0.06, 8, 10, [1.0; 3]));
    let neck_mesh = Arc::new(tube::hourglass(0.325, 0.2, 0.6, 1.2, 8, 16, HIDE_DARK));
    let crack_mesh = Arc::new(detail::surface_cracks(
        HEAD_RADII,
        &crack_paths(),
        7.0,
        30,
        CRACK,
    ));
    let leg_path = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.2, -0.2, 0.2),
        Vec3::new(0.1, -0.3, 0.1),
        Vec3::new(0.0, -0.5, 0.0),
    ];
    let leg_mesh = Arc::new(bezier::limb_tube(&leg_path, 0.22, 25, 10, HIDE_DARK));
    let tip_mesh = Arc::new(ellipsoid::ellipsoid(0.22, 0.05, 0.22, 10, 12, TIP));

    let mut root = SceneNode::new("antlion", body_mesh);

    // Neck -> head -> face details.
    let mut neck = SceneNode::new("antlion_neck", neck_mesh);
    neck.placement = {
        let m = math::rotated_x(Mat4::IDENTITY, std::f32::consts::FRAC_PI_4);
        math::translated(m, 0.0, 0.55, 1.02)
    };

    let mut head = SceneNode::new("antlion_head", head_mesh);
    head.placement = {
        let m = math::rotated_x(Mat4::IDENTITY, -std::f32::consts::PI / 3.0);
        math::translated(m, 0.0, 0.75, 0.4)
    };

    for (name, pupil_name, side) in [
        ("antlion_eye_r", "antlion_pupil_r", 1.0f32),
        ("antlion_eye_l", "antlion_pupil_l", -1.0),
    ] {
        let mut eye = SceneNode::new(name, eye_mesh.clone());
        eye.placement = {
            let m = math::rotated_z(Mat4::IDENTITY, side * std::f32::consts::PI / 8.0);
            math::translated(m, side * 0.9, 0.3, 0.0)
        };
        let mut pupil = SceneNode::new(pupil_name, pupil_mesh.clone());
        pupil.placement = math::translated(Mat4::IDENTITY, side * 0.08, 0.0, 0.0);
        eye.add_child(pupil);
        head.add_child(eye);
    }

    let mut cracks = SceneNode::new("antlion_cracks", crack_mesh);
    cracks.placement = {
        let m = math::rotated_z(Mat4::IDENTITY, -std::f32::consts::FRAC_PI_2);
        let m = math::rotated_y(m, std::f32::consts::PI / 9.0);
        let m = math::rotated_x(m, std::f32::consts::PI / 9.0);
        math::translated(m, -0.1, 0.0, 0.05)
    };
    head.add_child(cracks);

    neck.add_child(head);
    root.add_child(neck);

    // Four legs sharing one mesh, each with a rounded tip.
    for (name, tip_name, _, _, _) in LEG_SOCKETS {
        let mut leg = SceneNode::new(name, leg_mesh.clone());
        let mut tip = SceneNode::new(tip_name, tip_mesh.clone());
        tip.placement = math::translated(Mat4::IDENTITY, 0.0, -0.5, 0.0);
        leg.add_child(tip);
        root.add_child(leg);
    }

    root
}

/// Rebuild the animated joints from scratch each frame. `t` in seconds.
pub fn animate(root: &mut SceneNode, t: f32, view: &OrbitView) {
    // Whole-body idle: breathing pulse, bob, slight sway, user spin.
    let breathe = 1.0 + (t * 1.0).sin() * 0.03;
    let bob = (t * 2.0).sin() * 0.08;
    let sway = (t * 3.0).sin() * 0.02;

    let m = math::scaled(Mat4::IDENTITY, breathe, breathe, breathe);
    let m = math::rotated_x(m, math::deg_to_rad(20.0));
    let m = math::rotated_z(m, sway);
    let m = math::rotated_y(m, view.theta);
    let m = math::rotated_x(m, view.phi);
    root.movement = math::translated(m, 0.0, -0.2 + bob, 0.0);

    // Diagonal gait: RF+LB swing together, LF+RB in counter-phase.
    let swing = (t * 3.0).sin() * 0.1;
    let lift = (t * 3.0).sin().max(0.0) * 0.15;
    let counter_lift = (-(t * 3.0).sin()).max(0.0) * 0.15;

    for (name, _, x, z, mirrored) in LEG_SOCKETS {
        let in_phase = name.ends_with("rf") || name.ends_with("lb");
        let (dz, dy, rot) = if in_phase {
            (swing, lift, swing * 0.5)
        } else {
            (-swing, counter_lift, -swing * 0.5)
        };

        let mut m = Mat4::IDENTITY;
        if mirrored {
            m = math::rotated_y(m, -std::f32::consts::FRAC_PI_2);
        }
        let m = math::rotated_x(m, rot);
        let m = math::translated(m, x, -0.2 + dy, z + dz);
        if let Some(leg) = root.find_mut(name) {
            leg.movement = m;
        }
    }
}

/// Zigzag crack pattern authored near the head's front-left, in head space.
fn crack_paths() -> Vec<[Vec3; 4]> {
    let [rx, ry, rz] = HEAD_RADII;
    // Waypoints of the zigzag; consecutive pairs become one Bezier each,
    // with control points pulled sideways for the kinks.
    let way = [
        (-0.50, 0.70, 0.85),
        (-0.42, 0.56, 0.95),
        (-0.62, 0.42, 0.90),
        (-0.38, 0.28, 0.90),
        (-0.62, 0.15, 0.86),
        (-0.40, 0.02, 0.86),
        (-0.62, -0.12, 0.83),
        (-0.42, -0.25, 0.81),
        (-0.61, -0.38, 0.76),
        (-0.50, -0.47, 0.74),
        (-0.68, -0.60, 0.69),
        (-0.48, -0.72, 0.66),
        (-0.68, -0.84, 0.60),
        (-0.50, -0.94, 0.56),
        (-0.68, -1.03, 0.50),
    ];

    way.windows(2)
        .map(|pair| {
            let a = Vec3::new(pair[0].0 * rx, pair[0].1 * ry, pair[0].2 * rz);
            let d = Vec3::new(pair[1].0 * rx, pair[1].1 * ry, pair[1].2 * rz);
            // Kink the midpoints outward so each segment stays jagged.
            let kink = Vec3::new(-0.06 * rx, 0.0, 0.0);
            [a, a.lerp(d, 0.33) + kink, a.lerp(d, 0.66) - kink, d]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_has_all_joints() {
        let mut root = build();
        for name in [
            "antlion_neck",
            "antlion_head",
            "antlion_eye_r",
            "antlion_pupil_l",
            "antlion_cracks",
            "leg_rf",
            "leg_lb",
        ] {
            assert!(root.find_mut(name).is_some(), "missing joint {name}");
        }
    }

    #[test]
    fn each_leg_tip_is_individually_addressable() {
        // The tips share one mesh but carry distinct names, so find_mut
        // reaches every one rather than only the first sibling.
        let mut root = build();
        for (leg_name, tip_name, _, _, _) in LEG_SOCKETS {
            let leg = root.find_mut(leg_name).unwrap();
            assert_eq!(leg.children.len(), 1);
            assert_eq!(leg.children[0].name, tip_name);
        }
    }

    #[test]
    fn animate_moves_the_legs() {
        let mut root = build();
        let view = OrbitView { theta: 0.0, phi: 0.0, distance: 20.0 };
        animate(&mut root, 0.4, &view);
        let a = root.find_mut("leg_rf").unwrap().movement;
        animate(&mut root, 0.9, &view);
        let b = root.find_mut("leg_rf").unwrap().movement;
        assert_ne!(a.to_cols_array(), b.to_cols_array());
    }

    #[test]
    fn animate_is_a_pure_function_of_time() {
        // Rebuilding from identity every frame means no state leaks
        // between frames: the same t always yields the same pose.
        let mut root = build();
        let view = OrbitView { theta: 0.3, phi: -0.1, distance: 20.0 };
        animate(&mut root, 1.7, &view);
        let first = root.find_mut("antlion").unwrap().movement;
        animate(&mut root, 55.0, &view);
        animate(&mut root, 1.7, &view);
        let again = root.find_mut("antlion").unwrap().movement;
        assert_eq!(first.to_cols_array(), again.to_cols_array());
    }
}

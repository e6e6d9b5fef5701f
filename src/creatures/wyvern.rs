// Wyvern: the tall winged centerpiece
//
// S-curved swept body, green head with red-rimmed eyes, two back-swept
// horns, a pale belly plate, jointed arms ending in three claws each,
// stubby thighs and feet, a long striped tail fanning out into layered
// fins, and two big diamond wings. Flaps, sways its tail and bobs.

use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::camera::OrbitView;
use crate::gen::{bezier, ellipsoid, polygon, tube};
use crate::math;
use crate::scene::SceneNode;

const SCALE: [f32; 3] = [0.45, 0.82, 0.35];
const SCALE_DARK: [f32; 3] = [0.32, 0.62, 0.25];
const BELLY: [f32; 3] = [0.88, 0.86, 0.70];
const RIM: [f32; 3] = [0.85, 0.25, 0.25];
const CLAW: [f32; 3] = [0.92, 0.90, 0.84];

const BODY_SPINE: [Vec3; 4] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.0, 1.2, 1.0),
    Vec3::new(0.0, 2.2, -0.2),
    Vec3::new(0.0, 3.5, 0.0),
];

const TAIL_SPINE: [Vec3; 4] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.0, -0.6, -1.0),
    Vec3::new(0.0, -0.4, -2.2),
    Vec3::new(0.0, 0.4, -3.2),
];

/// Arm chains: (shoulder, forearm, hand, claw names, side sign).
const ARMS: [(&str, &str, &str, [&str; 3], f32); 2] = [
    (
        "wyv_arm_r",
        "wyv_arm_r_fore",
        "wyv_arm_r_hand",
        ["wyv_arm_r_claw_0", "wyv_arm_r_claw_1", "wyv_arm_r_claw_2"],
        1.0,
    ),
    (
        "wyv_arm_l",
        "wyv_arm_l_fore",
        "wyv_arm_l_hand",
        ["wyv_arm_l_claw_0", "wyv_arm_l_claw_1", "wyv_arm_l_claw_2"],
        -1.0,
    ),
];
const WINGS: [(&str, f32); 2] = [("wyv_wing_r", 1.0), ("wyv_wing_l", -1.0)];
const LEGS: [(&str, &str, f32); 2] = [
    ("wyv_thigh_r", "wyv_thigh_r_foot", 1.0),
    ("wyv_thigh_l", "wyv_thigh_l_foot", -1.0),
];

pub fn build() -> SceneNode {
    let body_mesh = Arc::new(bezier::swept_tube(
        &BODY_SPINE,
        0.55,
        0.45,
        60,
        24,
        |t| 1.0 - 0.35 * t,
        |_, _| SCALE,
    ));
    let head_mesh = Arc::new(ellipsoid::ellipsoid(0.55, 0.48, 0.62, 20, 24, SCALE));
    let eye_mesh = Arc::new(ellipsoid::ellipsoid(0.16, 0.2, 0.1, 12, 14, RIM));
    let pupil_mesh = Arc::new(ellipsoid::ellipsoid(0.09, 0.12, 0.05, 10, 12, [0.05; 3]));
    let horn_mesh = Arc::new(tube::bent_cone(&tube::BentCone {
        length: 0.9,
        base_radius: 0.12,
        tip_radius: 0.02,
        stacks: 24,
        slices: 14,
        bend_angle: std::f32::consts::FRAC_PI_3,
        bend_axis: tube::BendAxis::Z,
        base_color: SCALE_DARK,
        tip_color: CLAW,
        cap_base: true,
        cap_tip: false,
    }));
    let belly_mesh = Arc::new(ellipsoid::ellipsoid(0.42, 0.95, 0.28, 16, 20, BELLY));
    let thigh_mesh = Arc::new(ellipsoid::ellipsoid(0.3, 0.4, 0.3, 12, 16, SCALE));
    let foot_mesh = Arc::new(ellipsoid::ellipsoid(0.28, 0.12, 0.42, 10, 14, SCALE_DARK));
    let upper_arm_mesh = Arc::new(tube::tapered_tube(0.14, 0.11, 0.1, 0.08, 0.52, 24, 20, SCALE));
    let forearm_mesh = Arc::new(tube::tapered_tube(0.1, 0.08, 0.07, 0.06, 0.45, 24, 20, SCALE));
    let hand_mesh = Arc::new(ellipsoid::ellipsoid(0.11, 0.08, 0.13, 10, 12, SCALE_DARK));
    let claw_mesh = Arc::new(tube::bent_cone(&tube::BentCone {
        length: 0.22,
        base_radius: 0.035,
        tip_radius: 0.005,
        stacks: 12,
        slices: 8,
        bend_angle: std::f32::consts::FRAC_PI_4,
        bend_axis: tube::BendAxis::Z,
        base_color: CLAW,
        tip_color: CLAW,
        cap_base: true,
        cap_tip: false,
    }));
    // Tail: tapering sweep with six dark ring stripes near the tip.
    let tail_mesh = Arc::new(bezier::swept_tube(
        &TAIL_SPINE,
        0.3,
        0.3,
        60,
        20,
        |t| 1.0 - 0.9 * t,
        |ring, _| {
            let striped = ring > 24 && (ring / 6) % 2 == 1;
            if striped { SCALE_DARK } else { SCALE }
        },
    ));
    let fin_mesh = Arc::new(polygon::fin_fan(
        1.2,
        3,
        50.0,
        0.9,
        &polygon::DiamondStyle {
            center_color: [0.55, 0.95, 0.55],
            mid_color: [0.45, 0.85, 0.45],
            edge_color: RIM,
            border_width: 0.5,
            two_sided: true,
        },
    ));
    let wing_mesh = Arc::new(polygon::layered_diamond(
        2.3,
        &polygon::DiamondStyle {
            center_color: [0.6, 1.0, 0.6],
            mid_color: [0.45, 0.9, 0.45],
            edge_color: RIM,
            border_width: 0.2,
            two_sided: true,
        },
    ));

    let mut root = SceneNode::new("wyvern", body_mesh);

    let mut belly = SceneNode::new("wyv_belly", belly_mesh);
    belly.placement = {
        let m = math::rotated_x(Mat4::IDENTITY, math::deg_to_rad(-8.0));
        math::translated(m, 0.0, 1.5, 0.32)
    };
    root.add_child(belly);

    // Head sits at the top of the S-curve, looking forward.
    let mut head = SceneNode::new("wyv_head", head_mesh);
    head.placement = math::translated(Mat4::IDENTITY, 0.0, 3.6, 0.25);
    for (eye_name, pupil_name, side) in [
        ("wyv_eye_r", "wyv_pupil_r", 1.0f32),
        ("wyv_eye_l", "wyv_pupil_l", -1.0),
    ] {
        let mut eye = SceneNode::new(eye_name, eye_mesh.clone());
        eye.placement = {
            let m = math::rotated_y(Mat4::IDENTITY, side * math::deg_to_rad(30.0));
            math::translated(m, side * 0.3, 0.12, 0.45)
        };
        let mut pupil = SceneNode::new(pupil_name, pupil_mesh.clone());
        pupil.placement = math::translated(Mat4::IDENTITY, 0.0, 0.0, 0.05);
        eye.add_child(pupil);
        head.add_child(eye);
    }
    for (name, side) in [("wyv_horn_r", 1.0f32), ("wyv_horn_l", -1.0)] {
        let mut horn = SceneNode::new(name, horn_mesh.clone());
        horn.placement = {
            // Cone points along +X; aim it up and back, mirrored per side.
            let m = math::rotated_z(Mat4::IDENTITY, math::deg_to_rad(70.0));
            let m = math::rotated_y(m, side * math::deg_to_rad(-35.0));
            math::translated(m, side * 0.22, 0.35, -0.2)
        };
        head.add_child(horn);
    }
    root.add_child(head);

    // Arm chain: upper arm -> forearm -> hand -> three claws. Both sides
    // share the segment meshes and the claw mesh.
    for (shoulder, fore, hand_name, claw_names, side) in ARMS {
        let mut upper = SceneNode::new(shoulder, upper_arm_mesh.clone());
        upper.placement = {
            // Tube grows along +Y; tip it outward and down from the shoulder.
            let m = math::rotated_z(Mat4::IDENTITY, side * math::deg_to_rad(125.0));
            math::translated(m, side * 0.5, 2.9, 0.1)
        };

        let mut forearm = SceneNode::new(fore, forearm_mesh.clone());
        forearm.placement = {
            let m = math::rotated_z(Mat4::IDENTITY, side * math::deg_to_rad(-55.0));
            math::translated(m, 0.0, 0.52, 0.0)
        };

        let mut hand = SceneNode::new(hand_name, hand_mesh.clone());
        hand.placement = math::translated(Mat4::IDENTITY, 0.0, 0.48, 0.0);
        for (k, claw_name) in claw_names.into_iter().enumerate() {
            let mut claw = SceneNode::new(claw_name, claw_mesh.clone());
            claw.placement = {
                let spread = math::deg_to_rad(-25.0 + 25.0 * k as f32);
                let m = math::rotated_z(Mat4::IDENTITY, math::deg_to_rad(80.0));
                let m = math::rotated_y(m, spread);
                math::translated(m, 0.0, 0.06, 0.1)
            };
            hand.add_child(claw);
        }
        forearm.add_child(hand);
        upper.add_child(forearm);
        root.add_child(upper);
    }

    for (name, foot_name, side) in LEGS {
        let mut thigh = SceneNode::new(name, thigh_mesh.clone());
        thigh.placement = math::translated(Mat4::IDENTITY, side * 0.45, 0.35, 0.1);
        let mut foot = SceneNode::new(foot_name, foot_mesh.clone());
        foot.placement = math::translated(Mat4::IDENTITY, 0.0, -0.4, 0.18);
        thigh.add_child(foot);
        root.add_child(thigh);
    }

    // Tail hangs off the base of the spine; fins fan out past its tip.
    let mut tail = SceneNode::new("wyv_tail", tail_mesh);
    tail.placement = math::translated(Mat4::IDENTITY, 0.0, 0.1, -0.3);
    let mut fins = SceneNode::new("wyv_tail_fins", fin_mesh);
    fins.placement = {
        let m = math::rotated_x(Mat4::IDENTITY, math::deg_to_rad(-60.0));
        math::translated(m, 0.0, 0.5, -3.3)
    };
    tail.add_child(fins);
    root.add_child(tail);

    // Wings last: translucent membranes draw after the opaque body.
    for (name, side) in WINGS {
        let mut wing = SceneNode::new(name, wing_mesh.clone());
        wing.placement = math::translated(Mat4::IDENTITY, side * 0.35, 3.1, -0.3);
        wing.opacity = 0.9;
        root.add_child(wing);
    }

    root
}

pub fn animate(root: &mut SceneNode, t: f32, view: &OrbitView) {
    // Airborne idle: bob with the flap beat, lean into the user's spin.
    let flap = (t * 4.0).sin();
    let bob = flap * 0.15;

    let m = math::rotated_x(Mat4::IDENTITY, math::deg_to_rad(6.0));
    let m = math::rotated_y(m, view.theta);
    let m = math::rotated_x(m, view.phi);
    root.movement = math::translated(m, 0.0, -1.4 + bob, 0.0);

    // Wings beat around the shoulder line.
    for (name, side) in WINGS {
        let angle = side * (math::deg_to_rad(95.0) + flap * math::deg_to_rad(30.0));
        let m = math::rotated_z(Mat4::IDENTITY, angle);
        if let Some(wing) = root.find_mut(name) {
            wing.movement = m;
        }
    }

    // Tail sways side to side, slower than the wings.
    if let Some(tail) = root.find_mut("wyv_tail") {
        tail.movement = math::rotated_y(Mat4::IDENTITY, (t * 1.3).sin() * 0.25);
    }

    // Arms swing gently in counter-phase.
    for (shoulder, _, _, _, side) in ARMS {
        let swing = (t * 1.8 + side).sin() * 0.08;
        if let Some(arm) = root.find_mut(shoulder) {
            arm.movement = math::rotated_x(Mat4::IDENTITY, swing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_has_all_joints() {
        let mut root = build();
        for name in [
            "wyv_head",
            "wyv_pupil_r",
            "wyv_horn_l",
            "wyv_belly",
            "wyv_arm_r",
            "wyv_arm_r_fore",
            "wyv_arm_r_hand",
            "wyv_arm_l_hand",
            "wyv_thigh_l_foot",
            "wyv_tail",
            "wyv_tail_fins",
            "wyv_wing_r",
            "wyv_wing_l",
        ] {
            assert!(root.find_mut(name).is_some(), "missing joint {name}");
        }
    }

    #[test]
    fn hands_carry_three_individually_named_claws() {
        // Claws share one mesh but keep distinct names, so each stays
        // reachable through find_mut.
        let mut root = build();
        for (_, _, hand_name, claw_names, _) in ARMS {
            let hand = root.find_mut(hand_name).unwrap();
            assert_eq!(hand.children.len(), 3);
            for (child, expected) in hand.children.iter().zip(claw_names) {
                assert_eq!(child.name, expected);
            }
        }
    }

    #[test]
    fn wings_mirror_each_other() {
        let mut root = build();
        let view = OrbitView { theta: 0.0, phi: 0.0, distance: 20.0 };
        animate(&mut root, 0.7, &view);
        let right = root.find_mut("wyv_wing_r").unwrap().movement;
        let left = root.find_mut("wyv_wing_l").unwrap().movement;
        // Mirrored flap: the left wing rotates by the opposite angle, and
        // for a pure Z rotation that is the right wing's transpose.
        let mirrored = right.transpose().to_cols_array();
        for (a, b) in left.to_cols_array().into_iter().zip(mirrored) {
            approx::assert_relative_eq!(a, b, epsilon = 1e-5);
        }
        assert_ne!(left.to_cols_array(), right.to_cols_array());
    }

    #[test]
    fn tail_sways_over_time() {
        let mut root = build();
        let view = OrbitView { theta: 0.0, phi: 0.0, distance: 20.0 };
        animate(&mut root, 0.0, &view);
        let a = root.find_mut("wyv_tail").unwrap().movement;
        animate(&mut root, 0.6, &view);
        let b = root.find_mut("wyv_tail").unwrap().movement;
        assert_ne!(a.to_cols_array(), b.to_cols_array());
    }
}

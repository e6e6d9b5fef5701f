// Creature assembly and per-frame animation
//
// Each module builds one character: generate meshes, wrap them in named
// scene nodes, wire the joint hierarchy and static placements, and rebuild
// the animated joints' movement matrices every frame from closed-form trig
// of the elapsed time. Pose constants are data tables local to each module.

pub mod antlion;
pub mod dragonfly;
pub mod wyvern;

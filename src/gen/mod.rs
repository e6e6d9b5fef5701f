// Procedural mesh generators
//
// Every function here is pure: shape parameters in, `MeshData` out. The
// renderer never sees these directly; creatures and the environment wrap the
// results in scene nodes.

pub mod bezier;
pub mod detail;
pub mod ellipsoid;
pub mod environment;
pub mod polygon;
pub mod tube;

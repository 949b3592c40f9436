//! Fixed attribute and connection tables for source-driven deformers.

/// Attributes written on every new shrinkWrap, in order.
pub const SHRINK_WRAP_ATTRIBUTES: &[(&str, i64)] = &[
    ("projection", 2),
    ("closestIfNoIntersection", 1),
    ("reverse", 0),
    ("bidirectional", 1),
    ("boundingBoxCenter", 1),
    ("axisReference", 1),
    ("alongX", 0),
    ("alongY", 0),
    ("alongZ", 1),
    ("offset", 0),
    ("targetInflation", 0),
    ("targetSmoothLevel", 0),
    ("falloff", 0),
    ("falloffIterations", 1),
    ("shapePreservationEnable", 0),
    ("shapePreservationSteps", 1),
];

/// `(source shape attribute, shrinkWrap attribute)` topology plugs.
pub const SHRINK_WRAP_CONNECTIONS: &[(&str, &str)] = &[
    ("worldMesh", "targetGeom"),
    ("continuity", "continuity"),
    ("smoothUVs", "smoothUVs"),
    ("keepBorder", "keepBorder"),
    ("boundaryRule", "boundaryRule"),
    ("keepHardEdge", "keepHardEdge"),
    ("propagateEdgeHardness", "propagateEdgeHardness"),
    ("keepMapBorders", "keepMapBorders"),
];

pub const WRAP_ATTRIBUTES: &[(&str, i64)] = &[("maxDistance", 1), ("autoWeightThreshold", 1)];

pub const ENVELOPE: &str = "envelope";

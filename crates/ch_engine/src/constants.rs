/// Edge weight type
pub type Weight = f32;
/// Vertex identifier. Ids are 1-based, see [`NO_VERTEX`].
pub type VertexId = u32;
/// Opaque reference into an external tag table
pub type TagsRef = u32;

/// Reserved id meaning "no vertex", e.g. the contracted vertex of an original edge
pub const NO_VERTEX: VertexId = 0;
/// Tag reference of an edge without tags
pub const NO_TAGS: TagsRef = 0;

//! Per-arc metadata of the contraction hierarchy.
//!
//! The direction of an arc combines two orthogonal properties, which way the
//! arc may be traversed and how the ranks of its endpoints relate. Together
//! they form 16 codes, laid out as 4 blocks of 4:
//!
//! | band          | both | forward | backward | neither |
//! |---------------|------|---------|----------|---------|
//! | to higher     | 0    | 1       | 2        | 3       |
//! | to lower      | 4    | 5       | 6        | 7       |
//! | rank unknown  | 8    | 9       | 10       | 11      |
//! | informative   | 12   | 13      | 14       | 15      |
use std::fmt;

use crate::{
    constants::{TagsRef, VertexId, Weight, NO_TAGS, NO_VERTEX},
    error::{ChError, Result},
};

/// Which way an arc `u -> v` may be traversed. `Forward` means from `u` to
/// `v`, `Backward` from `v` to `u`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traversability {
    Both,
    Forward,
    Backward,
    Neither,
}

impl Traversability {
    pub fn new(forward: bool, backward: bool) -> Self {
        match (forward, backward) {
            (true, true) => Traversability::Both,
            (true, false) => Traversability::Forward,
            (false, true) => Traversability::Backward,
            (false, false) => Traversability::Neither,
        }
    }

    #[inline]
    pub fn forward(self) -> bool {
        matches!(self, Traversability::Both | Traversability::Forward)
    }

    #[inline]
    pub fn backward(self) -> bool {
        matches!(self, Traversability::Both | Traversability::Backward)
    }

    /// Same arc seen from its target
    pub fn reversed(self) -> Self {
        Traversability::new(self.backward(), self.forward())
    }

    fn offset(self) -> u8 {
        match self {
            Traversability::Both => 0,
            Traversability::Forward => 1,
            Traversability::Backward => 2,
            Traversability::Neither => 3,
        }
    }
}

/// Relation between the contraction ranks of an arc's endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HierarchyBand {
    /// Target has a higher rank than the source
    ToHigher,
    /// Target has a lower rank than the source
    ToLower,
    /// Ranks are not assigned yet
    Unknown,
    /// Kept for metadata only, never traversed
    Informative,
}

impl HierarchyBand {
    fn offset(self) -> u8 {
        match self {
            HierarchyBand::ToHigher => 0,
            HierarchyBand::ToLower => 4,
            HierarchyBand::Unknown => 8,
            HierarchyBand::Informative => 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub traversability: Traversability,
    pub band: HierarchyBand,
}

impl Direction {
    pub fn new(forward: bool, backward: bool, band: HierarchyBand) -> Self {
        Direction {
            traversability: Traversability::new(forward, backward),
            band,
        }
    }

    /// The byte code of this direction (0..=15).
    pub fn code(self) -> u8 {
        self.band.offset() + self.traversability.offset()
    }

    pub fn from_code(code: u8) -> Result<Self> {
        let band = match code / 4 {
            0 => HierarchyBand::ToHigher,
            1 => HierarchyBand::ToLower,
            2 => HierarchyBand::Unknown,
            3 => HierarchyBand::Informative,
            _ => {
                return Err(ChError::MalformedGraph(format!(
                    "invalid direction code {code}"
                )))
            }
        };
        let traversability = match code % 4 {
            0 => Traversability::Both,
            1 => Traversability::Forward,
            2 => Traversability::Backward,
            _ => Traversability::Neither,
        };
        Ok(Direction {
            traversability,
            band,
        })
    }
}

/// Metadata of a single arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeData {
    pub weight: Weight,
    pub direction: Direction,
    /// Vertex this arc shortcuts over, [`NO_VERTEX`] for original edges
    pub contracted: VertexId,
    pub tags: TagsRef,
}

impl EdgeData {
    /// Original edge without rank information.
    pub fn new(weight: Weight, forward: bool, backward: bool) -> Self {
        EdgeData {
            weight,
            direction: Direction::new(forward, backward, HierarchyBand::Unknown),
            contracted: NO_VERTEX,
            tags: NO_TAGS,
        }
    }

    pub fn with_rank(weight: Weight, forward: bool, backward: bool, to_higher: bool) -> Self {
        let band = if to_higher {
            HierarchyBand::ToHigher
        } else {
            HierarchyBand::ToLower
        };
        EdgeData {
            weight,
            direction: Direction::new(forward, backward, band),
            contracted: NO_VERTEX,
            tags: NO_TAGS,
        }
    }

    pub fn with_details(
        weight: Weight,
        forward: bool,
        backward: bool,
        to_higher: bool,
        contracted: VertexId,
        tags: TagsRef,
    ) -> Self {
        EdgeData {
            contracted,
            tags,
            ..EdgeData::with_rank(weight, forward, backward, to_higher)
        }
    }

    /// Shortcut over `contracted`, inserted while ranks are still unknown.
    pub fn shortcut(weight: Weight, forward: bool, backward: bool, contracted: VertexId) -> Self {
        EdgeData {
            contracted,
            ..EdgeData::new(weight, forward, backward)
        }
    }

    pub fn tagged(mut self, tags: TagsRef) -> Self {
        self.tags = tags;
        self
    }

    /// True if the arc may be travelled from its source to its target.
    /// Informative arcs are never travelled, their original flags stay in
    /// `direction.traversability`.
    #[inline]
    pub fn forward(&self) -> bool {
        !self.is_informative() && self.direction.traversability.forward()
    }

    #[inline]
    pub fn backward(&self) -> bool {
        !self.is_informative() && self.direction.traversability.backward()
    }

    #[inline]
    pub fn band(&self) -> HierarchyBand {
        self.direction.band
    }

    #[inline]
    pub fn is_to_higher(&self) -> bool {
        self.direction.band == HierarchyBand::ToHigher
    }

    #[inline]
    pub fn is_to_lower(&self) -> bool {
        self.direction.band == HierarchyBand::ToLower
    }

    #[inline]
    pub fn is_shortcut(&self) -> bool {
        self.contracted != NO_VERTEX
    }

    #[inline]
    pub fn is_informative(&self) -> bool {
        self.direction.band == HierarchyBand::Informative
    }

    /// True if the arc links two direct neighbours, i.e. it is not a shortcut.
    pub fn represents_neighbour_relation(&self) -> bool {
        !self.is_shortcut()
    }

    /// Same arc stored at the other endpoint: forward and backward swap, the
    /// band is kept.
    pub fn reversed(&self) -> Self {
        EdgeData {
            direction: Direction {
                traversability: self.direction.traversability.reversed(),
                band: self.direction.band,
            },
            ..*self
        }
    }

    pub(crate) fn with_band(mut self, band: HierarchyBand) -> Self {
        self.direction.band = band;
        self
    }

    /// Returns a copy moved into the informative band. Weight, shortcut vertex
    /// and tags are kept. There is no way back.
    pub fn convert_to_informative(&self) -> Result<Self> {
        if self.is_informative() {
            return Err(ChError::InvalidState(
                "edge is already informative".to_string(),
            ));
        }
        Ok(self.with_band(HierarchyBand::Informative))
    }
}

impl fmt::Display for EdgeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} d{}", self.weight, self.direction.code())?;
        if self.is_shortcut() {
            write!(f, " via {}", self.contracted)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_block_layout() {
        assert_eq!(EdgeData::with_rank(1.0, true, true, true).direction.code(), 0);
        assert_eq!(EdgeData::with_rank(1.0, true, false, true).direction.code(), 1);
        assert_eq!(EdgeData::with_rank(1.0, false, true, true).direction.code(), 2);
        assert_eq!(EdgeData::with_rank(1.0, false, false, true).direction.code(), 3);
        assert_eq!(EdgeData::with_rank(1.0, true, true, false).direction.code(), 4);
        assert_eq!(EdgeData::with_rank(1.0, false, false, false).direction.code(), 7);
        assert_eq!(EdgeData::new(1.0, true, true).direction.code(), 8);
        assert_eq!(EdgeData::new(1.0, true, false).direction.code(), 9);
        assert_eq!(EdgeData::new(1.0, false, true).direction.code(), 10);
        assert_eq!(EdgeData::new(1.0, false, false).direction.code(), 11);
    }

    #[test]
    fn every_code_decodes_to_itself() {
        for code in 0..16u8 {
            let direction = Direction::from_code(code).unwrap();
            assert_eq!(code, direction.code());
        }
        assert!(matches!(
            Direction::from_code(16),
            Err(ChError::MalformedGraph(_))
        ));
    }

    #[test]
    fn predicates() {
        let up = EdgeData::with_rank(2.0, true, false, true);
        assert!(up.forward());
        assert!(!up.backward());
        assert!(up.is_to_higher());
        assert!(!up.is_to_lower());
        assert!(!up.is_shortcut());
        assert!(up.represents_neighbour_relation());

        let down = EdgeData::with_details(2.0, false, true, false, 7, 3);
        assert!(down.backward());
        assert!(down.is_to_lower());
        assert!(down.is_shortcut());
        assert_eq!(down.tags, 3);

        let unknown = EdgeData::new(1.0, true, true);
        assert!(!unknown.is_to_higher());
        assert!(!unknown.is_to_lower());
        assert!(!unknown.is_informative());
    }

    #[test]
    fn informative_codes_are_not_traversable() {
        for code in 0..16u8 {
            let edge = EdgeData {
                direction: Direction::from_code(code).unwrap(),
                ..EdgeData::new(1.0, true, true)
            };
            assert_eq!(edge.forward(), [0, 1, 4, 5, 8, 9].contains(&code), "code {code}");
            assert_eq!(edge.backward(), [0, 2, 4, 6, 8, 10].contains(&code), "code {code}");
        }

        let informative = EdgeData::with_rank(1.0, true, false, true)
            .convert_to_informative()
            .unwrap();
        assert_eq!(informative.direction.code(), 13);
        assert!(!informative.forward());
        assert!(!informative.backward());
        assert!(informative.direction.traversability.forward());
    }

    #[test]
    fn convert_to_informative_shifts_band() {
        let cases = [
            (EdgeData::with_rank(1.0, true, true, true), 12),
            (EdgeData::with_rank(1.0, false, true, true), 14),
            (EdgeData::with_rank(1.0, true, false, false), 13),
            (EdgeData::with_rank(1.0, false, false, false), 15),
            (EdgeData::new(1.0, false, true), 14),
            (EdgeData::new(1.0, true, true), 12),
        ];

        for (edge, expected) in cases {
            let informative = edge.convert_to_informative().unwrap();
            assert_eq!(expected, informative.direction.code());
            assert!(informative.is_informative());
            assert!(!informative.is_to_higher());
            assert_eq!(edge.direction.traversability, informative.direction.traversability);
            assert!(!informative.forward());
            assert!(!informative.backward());
        }
    }

    #[test]
    fn convert_to_informative_keeps_payload() {
        let edge = EdgeData::with_details(4.5, true, false, true, 9, 21);
        let informative = edge.convert_to_informative().unwrap();

        assert_eq!(edge.weight, informative.weight);
        assert_eq!(edge.contracted, informative.contracted);
        assert_eq!(edge.tags, informative.tags);
    }

    #[test]
    fn convert_to_informative_is_one_way() {
        for code in 0..16u8 {
            let edge = EdgeData {
                direction: Direction::from_code(code).unwrap(),
                ..EdgeData::new(1.0, true, true)
            };
            let result = edge
                .convert_to_informative()
                .and_then(|e| e.convert_to_informative());
            assert!(matches!(result, Err(ChError::InvalidState(_))));
        }
    }

    #[test]
    fn reversed_swaps_flags() {
        let edge = EdgeData::with_details(3.0, true, false, true, 2, 5);
        let reversed = edge.reversed();

        assert!(!reversed.forward());
        assert!(reversed.backward());
        assert!(reversed.is_to_higher());
        assert_eq!(reversed.contracted, 2);
        assert_eq!(reversed.tags, 5);
        assert_eq!(edge, reversed.reversed());
    }
}

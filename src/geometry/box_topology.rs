//! Edges and faces of an axis aligned box, and the boolean formulas that
//! turn per-edge orientation signs into the face a ray line passes through.

use std::fmt::Display;

use crate::util::bit_iter;

use super::Axis;

/// Box edge, named by its two corner indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    E01,
    E12,
    E23,
    E30,
    E67,
    E74,
    E45,
    E56,
    E36,
    E50,
    E14,
    E72,
}

impl Edge {
    pub const ALL: [Edge; 12] = [
        Edge::E01,
        Edge::E12,
        Edge::E23,
        Edge::E30,
        Edge::E67,
        Edge::E74,
        Edge::E45,
        Edge::E56,
        Edge::E36,
        Edge::E50,
        Edge::E14,
        Edge::E72,
    ];

    /// Corner indices of the edge, in the direction used for the orientation tests.
    pub fn corners(self) -> (usize, usize) {
        match self {
            Edge::E01 => (0, 1),
            Edge::E12 => (1, 2),
            Edge::E23 => (2, 3),
            Edge::E30 => (3, 0),
            Edge::E67 => (6, 7),
            Edge::E74 => (7, 4),
            Edge::E45 => (4, 5),
            Edge::E56 => (5, 6),
            Edge::E36 => (3, 6),
            Edge::E50 => (5, 0),
            Edge::E14 => (1, 4),
            Edge::E72 => (7, 2),
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// One orientation bit per edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeSigns(u16);

impl EdgeSigns {
    pub fn from_fn(mut f: impl FnMut(Edge) -> bool) -> Self {
        EdgeSigns(
            Edge::ALL
                .into_iter()
                .filter(|&edge| f(edge))
                .fold(0, |bits, edge| bits | edge.bit()),
        )
    }

    pub fn get(self, edge: Edge) -> bool {
        self.0 & edge.bit() != 0
    }

    pub fn bits(self) -> u16 {
        self.0
    }
}

/// Box face. Faces are labeled by the corners they contain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    /// v0 v1 v2 v3, the maximum z face
    A,
    /// v3 v0 v5 v6, the maximum y face
    B,
    /// v0 v1 v4 v5, the maximum x face
    C,
    /// v1 v2 v7 v4, the minimum y face
    D,
    /// v2 v3 v6 v7, the minimum x face
    E,
    /// v4 v5 v6 v7, the minimum z face
    F,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::A, Face::B, Face::C, Face::D, Face::E, Face::F];

    /// Axis perpendicular to the face and whether the face lies at the maximum (`v0`) side.
    pub fn plane(self) -> (Axis, bool) {
        match self {
            Face::A => (Axis::Z, true),
            Face::B => (Axis::Y, true),
            Face::C => (Axis::X, true),
            Face::D => (Axis::Y, false),
            Face::E => (Axis::X, false),
            Face::F => (Axis::Z, false),
        }
    }

    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Set of faces.
/// For a ray line that isn't grazing an edge, at most one face is set: the one it enters through.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceMask(u8);

impl FaceMask {
    pub const EMPTY: FaceMask = FaceMask(0);

    pub fn from_faces(faces: impl IntoIterator<Item = Face>) -> Self {
        FaceMask(faces.into_iter().fold(0, |bits, face| bits | 1 << (face as u8)))
    }

    /// Face formulas for edge signs that pass when the ray circles the edge
    /// in the direction of the geometric (volume) orientation test.
    pub fn from_volume_signs(signs: EdgeSigns) -> Self {
        let t = |edge| signs.get(edge);
        use Edge::*;
        Self::from_flags([
            t(E01) & t(E12) & t(E23) & t(E30),
            !t(E50) & !t(E30) & !t(E36) & !t(E56),
            t(E14) & !t(E01) & t(E50) & !t(E45),
            !t(E72) & !t(E12) & !t(E14) & !t(E74),
            t(E36) & !t(E23) & t(E72) & !t(E67),
            t(E45) & t(E56) & t(E67) & t(E74),
        ])
    }

    /// Face formulas for Plücker side signs.
    /// The four edges between the A and F faces are oriented the other way than in the volume test.
    pub fn from_plucker_signs(signs: EdgeSigns) -> Self {
        let t = |edge| signs.get(edge);
        use Edge::*;
        Self::from_flags([
            t(E01) & t(E12) & t(E23) & t(E30),
            t(E50) & !t(E30) & t(E36) & !t(E56),
            !t(E14) & !t(E01) & !t(E50) & !t(E45),
            t(E72) & !t(E12) & t(E14) & !t(E74),
            !t(E36) & !t(E23) & !t(E72) & !t(E67),
            t(E45) & t(E56) & t(E67) & t(E74),
        ])
    }

    fn from_flags(flags: [bool; 6]) -> Self {
        FaceMask(
            flags
                .into_iter()
                .enumerate()
                .fold(0, |bits, (i, flag)| bits | (flag as u8) << i),
        )
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, face: Face) -> bool {
        self.0 & 1 << (face as u8) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// First face in label order.
    pub fn first(self) -> Option<Face> {
        self.iter().next()
    }

    pub fn iter(self) -> impl Iterator<Item = Face> {
        bit_iter(self.0).map(|i| Face::ALL[i])
    }

    /// Letter of the first face, `'0'` for a miss.
    pub fn label(self) -> char {
        self.first().map_or('0', Face::letter)
    }
}

impl Display for FaceMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }
        for face in self.iter() {
            write!(f, "{face}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;
    use itertools::Itertools as _;

    #[test]
    fn edges_close_the_faces() {
        // Every face is bounded by exactly four edges with both corners on it
        let face_corners = [
            [0, 1, 2, 3],
            [3, 0, 5, 6],
            [0, 1, 4, 5],
            [1, 2, 7, 4],
            [2, 3, 6, 7],
            [4, 5, 6, 7],
        ];
        for corners in face_corners {
            let count = Edge::ALL
                .iter()
                .filter(|edge| {
                    let (a, b) = edge.corners();
                    corners.contains(&a) && corners.contains(&b)
                })
                .count();
            assert!(count == 4);
        }
        assert!(Edge::ALL.iter().map(|e| e.corners()).all_unique());
    }

    #[test]
    fn edge_signs_round_trip() {
        let signs = EdgeSigns::from_fn(|e| matches!(e, Edge::E12 | Edge::E72));
        assert!(signs.get(Edge::E12));
        assert!(signs.get(Edge::E72));
        assert!(!signs.get(Edge::E01));
        assert!(signs.bits().count_ones() == 2);
    }

    #[test]
    fn all_set_signs() {
        let all = EdgeSigns::from_fn(|_| true);
        assert!(FaceMask::from_volume_signs(all) == FaceMask::from_faces([Face::A, Face::F]));
        assert!(FaceMask::from_plucker_signs(all) == FaceMask::from_faces([Face::A, Face::F]));
        assert!(FaceMask::from_volume_signs(EdgeSigns::default()) == FaceMask::from_faces([Face::B, Face::D]));
        assert!(FaceMask::from_plucker_signs(EdgeSigns::default()) == FaceMask::from_faces([Face::C, Face::E]));
    }

    #[test]
    fn mask_accessors() {
        let mask = FaceMask::from_faces([Face::D, Face::B]);
        assert!(mask.len() == 2);
        assert!(mask.contains(Face::B));
        assert!(!mask.contains(Face::C));
        assert!(mask.first() == Some(Face::B));
        assert!(mask.iter().collect_vec() == vec![Face::B, Face::D]);
        assert!(mask.label() == 'B');
        assert!(mask.to_string() == "BD");
    }

    #[test]
    fn empty_mask() {
        assert!(FaceMask::EMPTY.is_empty());
        assert!(FaceMask::EMPTY.first() == None);
        assert!(FaceMask::EMPTY.label() == '0');
        assert!(FaceMask::EMPTY.to_string() == "0");
    }

    #[test]
    fn face_letters() {
        let letters: String = Face::ALL.iter().map(|f| f.letter()).collect();
        assert!(letters == "ABCDEF");
        assert!(Face::E.plane() == (Axis::X, false));
    }
}

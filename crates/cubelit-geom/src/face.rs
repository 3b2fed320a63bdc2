/// Coordinate axis.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One of the six axis-aligned face directions.
///
/// The discriminant doubles as the visibility-mask bit, the vertex direction
/// tag, and the region index within a transparency pass.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    /// +Z
    Front = 0,
    /// -Z
    Back = 1,
    /// +Y
    Top = 2,
    /// -Y
    Bottom = 3,
    /// -X
    Left = 4,
    /// +X
    Right = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Top,
        Face::Bottom,
        Face::Left,
        Face::Right,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a face index `[0..6)` back into a `Face` value.
    #[inline]
    pub fn from_index(i: usize) -> Option<Face> {
        Face::ALL.get(i).copied()
    }

    /// Bit for this face in a visibility or draw mask.
    #[inline]
    pub fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::Front => (0, 0, 1),
            Face::Back => (0, 0, -1),
            Face::Top => (0, 1, 0),
            Face::Bottom => (0, -1, 0),
            Face::Left => (-1, 0, 0),
            Face::Right => (1, 0, 0),
        }
    }

    /// Axis the face normal points along.
    #[inline]
    pub fn normal_axis(self) -> Axis {
        match self {
            Face::Front | Face::Back => Axis::Z,
            Face::Top | Face::Bottom => Axis::Y,
            Face::Left | Face::Right => Axis::X,
        }
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        matches!(self, Face::Front | Face::Top | Face::Right)
    }

    /// In-plane `(u, v)` axes used when slicing along this face's normal.
    #[inline]
    pub fn plane_axes(self) -> (Axis, Axis) {
        match self {
            Face::Front | Face::Back => (Axis::X, Axis::Y),
            Face::Top | Face::Bottom => (Axis::X, Axis::Z),
            Face::Left | Face::Right => (Axis::Z, Axis::Y),
        }
    }

    /// True when `u × v` points against the face normal, so corner order
    /// `(u,v) → (u+1,v) → (u+1,v+1)` would wind clockwise seen from outside.
    #[inline]
    pub fn flips_winding(self) -> bool {
        matches!(self, Face::Back | Face::Top | Face::Right)
    }
}

/// Set of faces packed into the low six bits of a byte.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FaceMask(pub u8);

impl FaceMask {
    pub const NONE: FaceMask = FaceMask(0);
    pub const ALL: FaceMask = FaceMask(0x3f);

    #[inline]
    pub fn contains(self, face: Face) -> bool {
        self.0 & face.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, face: Face) {
        self.0 |= face.bit();
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 & 0x3f == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// Faces of a chunk at relative chunk offset `rel` (chunk minus camera
    /// chunk) that can point toward the camera. A `+Z` face is only visible
    /// when the chunk is not ahead of the camera along Z, and so on; the
    /// camera's own chunk row sees both directions.
    pub fn facing_camera(rel: (i32, i32, i32)) -> FaceMask {
        let (x, y, z) = rel;
        let mut m = FaceMask::NONE;
        if z <= 0 {
            m.insert(Face::Front);
        }
        if z >= 0 {
            m.insert(Face::Back);
        }
        if y <= 0 {
            m.insert(Face::Top);
        }
        if y >= 0 {
            m.insert(Face::Bottom);
        }
        if x >= 0 {
            m.insert(Face::Left);
        }
        if x <= 0 {
            m.insert(Face::Right);
        }
        m
    }
}

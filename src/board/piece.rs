//! Unit types, sides, and the carry-capability model.
//!
//! Every unit is a single `Piece` struct keyed by `PieceType`; a piece may
//! hold at most one same-side passenger, and passengers may themselves
//! carry, forming a chain (AirForce carrying a Tank carrying an Infantry).

/// The two players. Red moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    /// Returns the opposing side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    /// Returns the lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::Blue => "blue",
        }
    }

    /// Parses a side from its lowercase name.
    pub fn from_name(name: &str) -> Option<Side> {
        match name {
            "red" => Some(Side::Red),
            "blue" => Some(Side::Blue),
            _ => None,
        }
    }
}

/// The number of distinct unit types.
pub const PIECE_TYPE_COUNT: usize = 11;

/// A unit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Commander,
    Infantry,
    Tank,
    Militia,
    Engineer,
    Artillery,
    AntiAircraftGun,
    Rocket,
    AirForce,
    Navy,
    Headquarter,
}

/// All unit types in declaration order.
pub const ALL_PIECE_TYPES: [PieceType; PIECE_TYPE_COUNT] = [
    PieceType::Commander,
    PieceType::Infantry,
    PieceType::Tank,
    PieceType::Militia,
    PieceType::Engineer,
    PieceType::Artillery,
    PieceType::AntiAircraftGun,
    PieceType::Rocket,
    PieceType::AirForce,
    PieceType::Navy,
    PieceType::Headquarter,
];

impl PieceType {
    /// Returns the lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            PieceType::Commander => "commander",
            PieceType::Infantry => "infantry",
            PieceType::Tank => "tank",
            PieceType::Militia => "militia",
            PieceType::Engineer => "engineer",
            PieceType::Artillery => "artillery",
            PieceType::AntiAircraftGun => "antiair",
            PieceType::Rocket => "rocket",
            PieceType::AirForce => "airforce",
            PieceType::Navy => "navy",
            PieceType::Headquarter => "headquarter",
        }
    }

    /// Parses a piece type from its lowercase name.
    pub fn from_name(name: &str) -> Option<PieceType> {
        ALL_PIECE_TYPES.iter().find(|t| t.name() == name).copied()
    }

    /// Returns the single-character abbreviation used for rendering.
    pub const fn abbr(self) -> char {
        match self {
            PieceType::Commander => 'C',
            PieceType::Infantry => 'I',
            PieceType::Tank => 'T',
            PieceType::Militia => 'M',
            PieceType::Engineer => 'E',
            PieceType::Artillery => 'A',
            PieceType::AntiAircraftGun => 'G',
            PieceType::Rocket => 'R',
            PieceType::AirForce => 'F',
            PieceType::Navy => 'N',
            PieceType::Headquarter => 'H',
        }
    }

    /// Returns true for the indirect-fire types blocked by deep river.
    pub const fn is_heavy(self) -> bool {
        matches!(
            self,
            PieceType::Artillery | PieceType::Rocket | PieceType::AntiAircraftGun
        )
    }

    /// Material value of a single unit of this type.
    pub const fn point_value(self) -> u32 {
        match self {
            PieceType::Commander => 0,
            PieceType::Headquarter => 0,
            PieceType::Militia => 5,
            PieceType::Infantry => 10,
            PieceType::Engineer => 10,
            PieceType::Tank => 20,
            PieceType::AntiAircraftGun => 20,
            PieceType::Artillery => 30,
            PieceType::AirForce => 40,
            PieceType::Rocket => 50,
            PieceType::Navy => 60,
        }
    }
}

/// A unit on the board, possibly carrying one passenger.
///
/// Cloning duplicates the whole carry chain; two board cells never share a
/// passenger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceType,
    pub side: Side,
    pub has_moved: bool,
    pub passenger: Option<Box<Piece>>,
}

impl Piece {
    /// Creates a new piece that has not yet moved and carries nothing.
    pub fn new(kind: PieceType, side: Side) -> Self {
        Piece {
            kind,
            side,
            has_moved: false,
            passenger: None,
        }
    }

    /// Returns whether this piece may take `other` aboard.
    ///
    /// Requires an empty passenger slot, matching sides, and one of the
    /// allowed type pairs:
    ///
    /// | Carrier     | Passengers                                   |
    /// |-------------|----------------------------------------------|
    /// | Headquarter | Commander                                    |
    /// | Navy        | AirForce, Tank, Infantry, Militia, Commander |
    /// | Tank        | Infantry, Militia, Commander                 |
    /// | AirForce    | Infantry, Militia, Commander                 |
    /// | Engineer    | AntiAircraftGun, Artillery, Rocket           |
    pub fn can_carry(&self, other: &Piece) -> bool {
        if self.passenger.is_some() {
            return false;
        }
        if self.side != other.side {
            return false;
        }
        use PieceType::*;
        matches!(
            (self.kind, other.kind),
            (Headquarter, Commander)
                | (Navy, AirForce | Tank | Infantry | Militia | Commander)
                | (Tank, Infantry | Militia | Commander)
                | (AirForce, Infantry | Militia | Commander)
                | (Engineer, AntiAircraftGun | Artillery | Rocket)
        )
    }

    /// Material value of this piece plus everything it carries.
    pub fn total_value(&self) -> u32 {
        let mut total = self.kind.point_value();
        let mut link = &self.passenger;
        while let Some(p) = link {
            total += p.kind.point_value();
            link = &p.passenger;
        }
        total
    }
}

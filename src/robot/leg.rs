use core::fmt::Display;
use core::ops::{Index, IndexMut};

/// Body corner a leg is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

impl Leg {
    /// Leg-then-joint traversal starts from this order.
    pub const ALL: [Leg; 4] = [Leg::FrontLeft, Leg::FrontRight, Leg::BackLeft, Leg::BackRight];

    /// The corner reached by turning the body 180 degrees.
    pub const fn opposite(self) -> Leg {
        match self {
            Leg::FrontLeft => Leg::BackRight,
            Leg::FrontRight => Leg::BackLeft,
            Leg::BackLeft => Leg::FrontRight,
            Leg::BackRight => Leg::FrontLeft,
        }
    }
}

impl Display for Leg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Leg::FrontLeft => f.write_str("Front left"),
            Leg::FrontRight => f.write_str("Front right"),
            Leg::BackLeft => f.write_str("Back left"),
            Leg::BackRight => f.write_str("Back right"),
        }
    }
}

impl From<usize> for Leg {
    fn from(value: usize) -> Self {
        match value {
            0 => Leg::FrontLeft,
            1 => Leg::FrontRight,
            2 => Leg::BackLeft,
            3 => Leg::BackRight,
            _ => unreachable!(),
        }
    }
}

/// One value per leg, indexed by [`Leg`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegMap<T>([T; 4]);

impl<T> LegMap<T> {
    /// Values given in [`Leg::ALL`] order: front left, front right, back left, back right.
    pub const fn new(front_left: T, front_right: T, back_left: T, back_right: T) -> Self {
        Self([front_left, front_right, back_left, back_right])
    }

    pub fn from_fn(mut f: impl FnMut(Leg) -> T) -> Self {
        Self(core::array::from_fn(|i| f(Leg::from(i))))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Leg, &T)> {
        self.0.iter().enumerate().map(|(i, v)| (Leg::from(i), v))
    }
}

impl<T: Copy> LegMap<T> {
    pub const fn splat(value: T) -> Self {
        Self([value; 4])
    }
}

impl<T> Index<Leg> for LegMap<T> {
    type Output = T;

    fn index(&self, leg: Leg) -> &Self::Output {
        &self.0[leg as usize]
    }
}

impl<T> IndexMut<Leg> for LegMap<T> {
    fn index_mut(&mut self, leg: Leg) -> &mut Self::Output {
        &mut self.0[leg as usize]
    }
}

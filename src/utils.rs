use std::ops::Add;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        Pos { x: $x, y: $y }
    };
}

impl Pos {
    /// clamps into the rectangle `[0, width) x [0, height)`.
    pub fn clamped(self, width: i32, height: i32) -> Self {
        pos!(self.x.clamp(0, width - 1), self.y.clamp(0, height - 1))
    }
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.x + rhs.x, self.y + rhs.y)
    }
}

#[test]
fn test_clamped() {
    assert_eq!(pos!(-3, 5).clamped(10, 10), pos!(0, 5));
    assert_eq!(pos!(12, -1).clamped(10, 10), pos!(9, 0));
    assert_eq!(pos!(4, 7).clamped(10, 10), pos!(4, 7));
}

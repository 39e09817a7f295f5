use std::str::FromStr;

/// Keys the tree list reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
}

impl FromStr for NavKey {
    type Err = ();

    /// Parse a DOM `KeyboardEvent.key` value (also accepts short lowercase names)
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "ArrowUp" | "up" => Ok(NavKey::Up),
            "ArrowDown" | "down" => Ok(NavKey::Down),
            "ArrowLeft" | "left" => Ok(NavKey::Left),
            "ArrowRight" | "right" => Ok(NavKey::Right),
            "Enter" | "enter" => Ok(NavKey::Enter),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!("ArrowUp".parse(), Ok(NavKey::Up));
        assert_eq!("ArrowDown".parse(), Ok(NavKey::Down));
        assert_eq!("left".parse(), Ok(NavKey::Left));
        assert_eq!("ArrowRight".parse(), Ok(NavKey::Right));
        assert_eq!("Enter".parse(), Ok(NavKey::Enter));
        assert_eq!("Tab".parse::<NavKey>(), Err(()));
        assert_eq!("arrowup".parse::<NavKey>(), Err(()));
    }
}

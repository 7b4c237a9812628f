use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Name,
    RollNo,
    Percentage,
}

impl SortKey {
    pub const ALL: &[SortKey] = &[SortKey::Name, SortKey::RollNo, SortKey::Percentage];
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::RollNo => write!(f, "roll-no"),
            SortKey::Percentage => write!(f, "percentage"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "roll-no" | "roll_no" | "rollno" => Ok(SortKey::RollNo),
            "percentage" | "pct" => Ok(SortKey::Percentage),
            other => Err(format!(
                "Sort key must be one of: name, roll-no, percentage, got '{other}'"
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Active column sort in the roster table.
///
/// Clicking the active column flips the order; clicking another column
/// switches to it in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.order.flipped())
        } else {
            Self::new(key, SortOrder::Asc)
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(SortKey::Name, SortOrder::Asc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_is_name_ascending() {
        assert_eq!(
            SortState::default(),
            SortState::new(SortKey::Name, SortOrder::Asc)
        );
    }

    #[test]
    fn test_toggle_same_key_flips_order() {
        let s = SortState::default().toggle(SortKey::Name);
        assert_eq!(s.order, SortOrder::Desc);
        let s = s.toggle(SortKey::Name);
        assert_eq!(s.order, SortOrder::Asc);
    }

    #[test]
    fn test_toggle_new_key_resets_to_ascending() {
        let s = SortState::new(SortKey::Name, SortOrder::Desc).toggle(SortKey::Percentage);
        assert_eq!(s, SortState::new(SortKey::Percentage, SortOrder::Asc));
    }

    #[rstest]
    #[case("name", SortKey::Name)]
    #[case("roll-no", SortKey::RollNo)]
    #[case("roll_no", SortKey::RollNo)]
    #[case("Percentage", SortKey::Percentage)]
    fn test_parse_sort_key(#[case] input: &str, #[case] expected: SortKey) {
        assert_eq!(input.parse::<SortKey>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_sort_key() {
        let err = "grade".parse::<SortKey>().unwrap_err();
        assert!(err.contains("grade"));
    }

    #[test]
    fn test_display_round_trips() {
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), *key);
        }
    }
}

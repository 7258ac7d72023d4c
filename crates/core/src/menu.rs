#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

pub const MAX_ALTERNATES: usize = 3;

/// Menu slot, doubling as the meal catalog `type` discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Course {
    Starter,
    Main,
    Dessert,
    Cheese,
    Wine,
}

impl Course {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Main => "main",
            Self::Dessert => "dessert",
            Self::Cheese => "cheese",
            Self::Wine => "wine",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "starter" => Some(Self::Starter),
            "main" => Some(Self::Main),
            "dessert" => Some(Self::Dessert),
            "cheese" => Some(Self::Cheese),
            "wine" => Some(Self::Wine),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diet {
    #[default]
    Omnivore,
    Vegetarian,
    Vegan,
}

impl Diet {
    /// Unknown values fall back to omnivore, matching the stored default.
    pub fn parse(value: &str) -> Self {
        match value {
            "vegetarian" => Self::Vegetarian,
            "vegan" => Self::Vegan,
            _ => Self::Omnivore,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Omnivore => "omnivore",
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Budget {
    Low,
    Medium,
    High,
}

impl Budget {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Uniform random source for menu draws. Injectable so selection is
/// deterministic under test; production wraps a seedable RNG.
pub trait CoursePicker {
    /// Returns an index in `0..bound`. `bound` is always non-zero.
    fn pick(&mut self, bound: usize) -> usize;
}

/// Draws the chosen index plus up to three alternate indices in random
/// order. An empty candidate set yields `None`; callers turn that into an
/// empty menu slot, not an error.
pub fn draw_with_alternates(
    candidates: usize,
    picker: &mut dyn CoursePicker,
) -> Option<(usize, Vec<usize>)> {
    if candidates == 0 {
        return None;
    }
    let chosen = picker.pick(candidates);

    let mut rest: Vec<usize> = (0..candidates).filter(|index| *index != chosen).collect();
    let take = rest.len().min(MAX_ALTERNATES);
    // Partial Fisher-Yates: only the prefix we keep needs shuffling.
    for slot in 0..take {
        let offset = picker.pick(rest.len() - slot);
        rest.swap(slot, slot + offset);
    }
    rest.truncate(take);
    Some((chosen, rest))
}

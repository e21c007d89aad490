//! Pet Type Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of pet categories a listing may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum PetType {
    Dog = 0,
    Cat = 1,
    Rabbit = 2,
    Parrot = 3,
    Fish = 4,
    Turtle = 5,
    Bear = 6,
    #[default]
    Other = 7,
}

impl PetType {
    /// All accepted type codes, in declaration order
    pub const CODES: [&'static str; 8] = [
        "Dog", "Cat", "Rabbit", "Parrot", "Fish", "Turtle", "Bear", "Other",
    ];

    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use PetType::*;
        match self {
            Dog => "Dog",
            Cat => "Cat",
            Rabbit => "Rabbit",
            Parrot => "Parrot",
            Fish => "Fish",
            Turtle => "Turtle",
            Bear => "Bear",
            Other => "Other",
        }
    }

    /// Parse a stored id; `None` for values outside the enumerated set
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        use PetType::*;
        match id {
            0 => Some(Dog),
            1 => Some(Cat),
            2 => Some(Rabbit),
            3 => Some(Parrot),
            4 => Some(Fish),
            5 => Some(Turtle),
            6 => Some(Bear),
            7 => Some(Other),
            _ => None,
        }
    }

    /// Parse a client-supplied code; `None` for anything outside the set
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use PetType::*;
        match code {
            "Dog" => Some(Dog),
            "Cat" => Some(Cat),
            "Rabbit" => Some(Rabbit),
            "Parrot" => Some(Parrot),
            "Fish" => Some(Fish),
            "Turtle" => Some(Turtle),
            "Bear" => Some(Bear),
            "Other" => Some(Other),
            _ => None,
        }
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_type_roundtrip() {
        for code in PetType::CODES {
            let pet_type = PetType::from_code(code).unwrap();
            assert_eq!(pet_type.code(), code);
            assert_eq!(PetType::from_id(pet_type.id()), Some(pet_type));
        }
    }

    #[test]
    fn test_pet_type_rejects_unknown_codes() {
        assert_eq!(PetType::from_code("Dragon"), None);
        assert_eq!(PetType::from_code("dog"), None); // case-sensitive
        assert_eq!(PetType::from_code(""), None);
    }

    #[test]
    fn test_pet_type_rejects_unknown_ids() {
        assert_eq!(PetType::from_id(-1), None);
        assert_eq!(PetType::from_id(8), None);
    }

    #[test]
    fn test_pet_type_default() {
        assert_eq!(PetType::default(), PetType::Other);
    }
}

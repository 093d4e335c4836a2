//! Heavenly Stems, Earthly Branches and their static associations.

use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Serializer};

use crate::fmt::{BRANCHES, BRANCHES_PINYIN, STEMS, STEMS_PINYIN};

/// One of the ten Heavenly Stems. Serializes as its character.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

impl Stem {
    pub const ALL: [Stem; 10] = {
        use Stem::*;
        [Jia, Yi, Bing, Ding, Wu, Ji, Geng, Xin, Ren, Gui]
    };

    /// Returns the stem at `index`, counted cyclically from 甲 (`0`).
    ///
    /// ```
    /// use bazi::Stem;
    ///
    /// assert_eq!(Stem::Gui, Stem::from_index(-1));
    /// assert_eq!(Stem::Jia, Stem::from_index(10));
    /// ```
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(10) as usize]
    }
    /// Position in the cycle, `0..=9`.
    pub fn index(self) -> usize {
        self as usize
    }
    /// Looks a stem up by its character.
    pub fn from_hanzi(hanzi: &str) -> Option<Self> {
        STEMS.iter().position(|&s| s == hanzi).map(|i| Self::ALL[i])
    }
    pub fn hanzi(self) -> &'static str {
        STEMS[self.index()]
    }
    pub fn pinyin(self) -> &'static str {
        STEMS_PINYIN[self.index()]
    }
    /// Stems pair up per element, Yang first.
    pub fn element(self) -> Element {
        Element::ALL[self.index() / 2]
    }
    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanzi())
    }
}

impl Serialize for Stem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hanzi())
    }
}

/// One of the twelve Earthly Branches. Serializes as its character.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl Branch {
    pub const ALL: [Branch; 12] = {
        use Branch::*;
        [Zi, Chou, Yin, Mao, Chen, Si, Wu, Wei, Shen, You, Xu, Hai]
    };

    /// Returns the branch at `index`, counted cyclically from 子 (`0`).
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }
    /// Position in the cycle, `0..=11`.
    pub fn index(self) -> usize {
        self as usize
    }
    pub fn hanzi(self) -> &'static str {
        BRANCHES[self.index()]
    }
    pub fn pinyin(self) -> &'static str {
        BRANCHES_PINYIN[self.index()]
    }
    pub fn animal(self) -> Animal {
        Animal::ALL[self.index()]
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanzi())
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hanzi())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = {
        use Element::*;
        [Wood, Fire, Earth, Metal, Water]
    };
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub enum Polarity {
    Yang,
    Yin,
}

impl Display for Polarity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Zodiac animal of a branch.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub enum Animal {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl Animal {
    pub const ALL: [Animal; 12] = {
        use Animal::*;
        [
            Rat, Ox, Tiger, Rabbit, Dragon, Snake, Horse, Goat, Monkey, Rooster, Dog, Pig,
        ]
    };
}

impl Display for Animal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems() {
        for (i, stem) in Stem::ALL.into_iter().enumerate() {
            assert_eq!(i, stem.index());
            assert_eq!(Some(stem), Stem::from_hanzi(stem.hanzi()));
        }
        assert_eq!(None, Stem::from_hanzi("子"));
        assert_eq!("丙", Stem::Bing.to_string());
        assert_eq!("Geng", Stem::Geng.pinyin());
    }

    #[test]
    fn stem_elements() {
        use Element::*;
        use Polarity::*;
        let dataset = [
            (Stem::Jia, Wood, Yang),
            (Stem::Yi, Wood, Yin),
            (Stem::Bing, Fire, Yang),
            (Stem::Ji, Earth, Yin),
            (Stem::Xin, Metal, Yin),
            (Stem::Ren, Water, Yang),
            (Stem::Gui, Water, Yin),
        ];
        for (stem, element, polarity) in dataset {
            assert_eq!((element, polarity), (stem.element(), stem.polarity()), "{stem}");
        }
        assert_eq!("Metal", Metal.to_string());
        assert_eq!("Yin", Yin.to_string());
    }

    #[test]
    fn branches() {
        for (i, branch) in Branch::ALL.into_iter().enumerate() {
            assert_eq!(i, branch.index());
            assert_eq!(branch, Branch::from_index(i as i64 + 12));
        }
        assert_eq!(Animal::Tiger, Branch::Yin.animal());
        assert_eq!(Animal::Pig, Branch::Hai.animal());
        assert_eq!("Rooster", Branch::You.animal().to_string());
        assert_eq!("午", Branch::Wu.to_string());
        assert_eq!("Chen", Branch::Chen.pinyin());
    }

    #[test]
    fn serialize_as_characters() {
        assert_eq!("\"庚\"", serde_json::to_string(&Stem::Geng).unwrap());
        assert_eq!("\"亥\"", serde_json::to_string(&Branch::Hai).unwrap());
        assert_eq!("\"Water\"", serde_json::to_string(&Element::Water).unwrap());
    }
}

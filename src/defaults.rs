//! Built-in roster and rank set used for a fresh session

use crate::color::COLOR_OPTIONS;
use crate::types::{Character, Rank, RankId};

const ROSTER: [(&str, &str); 9] = [
    ("Artanis", "images/artanis.png"),
    ("Blaze", "images/blaze.png"),
    ("Chen", "images/chen.png"),
    ("D.Va", "images/dva.png"),
    ("Dehaka", "images/dehaka.png"),
    ("Imperius", "images/imperius.png"),
    ("Johanna", "images/johanna.png"),
    ("Leoric", "images/leoric.png"),
    ("Malthael", "images/malthael.png"),
];

/// (name, description, palette index); ids are 1-based positions
const RANKS: [(&str, &str, usize); 5] = [
    ("Hard Counter", "You will lose this lane without help", 0),
    ("Unfavored", "Play safe and wait for rotations", 1),
    ("Even", "Skill matchup", 3),
    ("Favored", "You should win trades", 4),
    ("Hard Win", "Punish every mistake", 5),
];

pub fn roster() -> Vec<Character> {
    ROSTER
        .iter()
        .map(|(name, image)| Character::new(name, image))
        .collect()
}

pub fn ranks() -> Vec<Rank> {
    RANKS
        .iter()
        .enumerate()
        .map(|(index, (name, description, color))| {
            let option = &COLOR_OPTIONS[*color];
            Rank {
                id: RankId::Num(index as i64 + 1),
                name: name.to_string(),
                description: description.to_string(),
                color_tag: option.color_tag.to_string(),
                selected_color_tag: option.selected_color_tag.to_string(),
            }
        })
        .collect()
}

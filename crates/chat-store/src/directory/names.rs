//! Display names for anonymous authors

use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "Quiet", "Brave", "Clever", "Gentle", "Lucky", "Swift", "Calm", "Bright", "Curious", "Merry",
];

const ANIMALS: &[&str] = &[
    "Fox", "Otter", "Heron", "Lynx", "Badger", "Falcon", "Panda", "Wren", "Koala", "Marten",
];

/// Generate a random "Adjective Animal" name
pub fn random_author_name() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("Anonymous");
    let animal = ANIMALS.choose(&mut rng).copied().unwrap_or("Author");
    format!("{adjective} {animal}")
}

//! Mock user generation.

use rand::{
    Rng, SeedableRng,
    rngs::StdRng,
    seq::{IndexedRandom, SliceRandom},
};
use roster_model::User;

/// Nationality pool.
pub const NATIONALITIES: &[&str] = &[
    "American", "British", "Canadian", "Australian", "German", "French",
    "Italian", "Spanish", "Japanese", "Chinese", "Korean", "Indian",
    "Brazilian", "Mexican", "Russian", "Swedish", "Dutch", "Swiss",
    "Norwegian", "Danish", "Finnish", "Polish", "Czech", "Hungarian",
    "Romanian", "Bulgarian", "Greek", "Turkish", "Portuguese", "Irish",
    "Scottish", "Welsh", "New Zealander", "South African",
];

/// Hobby pool; each user draws distinct entries.
pub const HOBBIES: &[&str] = &[
    "Reading", "Writing", "Photography", "Cooking", "Baking", "Gardening",
    "Painting", "Drawing", "Sculpting", "Knitting", "Crocheting", "Sewing",
    "Woodworking", "Metalworking", "Pottery", "Jewelry Making",
    "Calligraphy", "Origami", "Paper Crafting", "Scrapbooking", "Collecting",
    "Gaming", "Puzzle Solving", "Chess", "Board Games", "Card Games",
    "Magic Tricks", "Juggling", "Dancing", "Singing", "Playing Music",
    "Composing Music", "Acting", "Stand-up Comedy", "Poetry", "Blogging",
    "Vlogging", "Podcasting", "Streaming", "Coding", "Web Design",
    "Graphic Design", "Animation", "Video Editing", "Sound Design",
    "Film Making", "Astronomy", "Bird Watching", "Hiking", "Camping",
    "Fishing", "Hunting", "Rock Climbing", "Mountain Biking", "Cycling",
    "Running", "Swimming", "Yoga", "Meditation", "Martial Arts", "Boxing",
    "Wrestling", "Tennis", "Golf", "Basketball", "Soccer", "Baseball",
    "Volleyball", "Badminton", "Table Tennis", "Bowling", "Skating",
    "Skiing", "Snowboarding", "Surfing", "Scuba Diving", "Sailing",
    "Kayaking", "Canoeing", "Rafting", "Paragliding", "Skydiving",
    "Bungee Jumping", "Caving", "Geocaching", "Urban Exploration",
];

const FIRST_NAMES: &[&str] = &[
    "Aaliyah", "Aiden", "Amara", "Benjamin", "Bianca", "Caleb", "Camila",
    "Daniel", "Delia", "Elias", "Elena", "Felix", "Freya", "Gabriel",
    "Greta", "Hamza", "Hana", "Isaac", "Ingrid", "Jonas", "Julia", "Kenji",
    "Keira", "Liam", "Lucia", "Mateo", "Maya", "Nikolai", "Nora", "Oscar",
    "Olivia", "Pavel", "Priya", "Quentin", "Rafael", "Rosa", "Samuel",
    "Sofia", "Tobias", "Tara", "Umar", "Valentina", "Wei", "Xavier",
    "Yara", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Andersen", "Baker", "Becker", "Castillo", "Chen", "Dubois",
    "Dvorak", "Eriksson", "Fischer", "Garcia", "Gonzalez", "Hansen",
    "Horvat", "Ivanova", "Jensen", "Kowalski", "Kim", "Lambert", "Larsen",
    "Martin", "Moreau", "Nakamura", "Novak", "O'Brien", "Okafor", "Patel",
    "Popescu", "Quinn", "Rossi", "Russo", "Schmidt", "Silva", "Tanaka",
    "Thompson", "Ueda", "Van Dijk", "Walker", "Weber", "Xu", "Yilmaz",
    "Zimmermann",
];

/// Inclusive age bounds.
pub const AGE_RANGE: std::ops::RangeInclusive<u8> = 18..=99;
/// Upper bound on hobbies per user.
pub const MAX_HOBBIES: usize = 10;

/// Generates `count` users with ids `1..=count`.
///
/// With a seed the output is fully deterministic.
pub fn generate_users(count: usize, seed: Option<u64>) -> Vec<User> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    (1..=count as u32).map(|id| generate_user(&mut rng, id)).collect()
}

fn generate_user<R: Rng>(rng: &mut R, id: u32) -> User {
    let hobby_count = rng.random_range(0..=MAX_HOBBIES);
    let mut pool: Vec<&str> = HOBBIES.to_vec();
    pool.shuffle(rng);

    User {
        id,
        avatar: avatar_url(id),
        first_name: pick(rng, FIRST_NAMES),
        last_name: pick(rng, LAST_NAMES),
        age: rng.random_range(AGE_RANGE),
        nationality: pick(rng, NATIONALITIES),
        hobbies: pool
            .into_iter()
            .take(hobby_count)
            .map(str::to_string)
            .collect(),
    }
}

fn pick<R: Rng>(rng: &mut R, from: &[&str]) -> String {
    from.choose(rng).copied().unwrap_or_default().to_string()
}

fn avatar_url(id: u32) -> String {
    format!("https://i.pravatar.cc/150?img={}", id % 70 + 1)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn users_have_sequential_ids_and_valid_fields() {
        let users = generate_users(250, Some(3));
        assert_eq!(users.len(), 250);

        for (index, user) in users.iter().enumerate() {
            assert_eq!(user.id as usize, index + 1);
            assert!(AGE_RANGE.contains(&user.age));
            assert!(NATIONALITIES.contains(&user.nationality.as_str()));
            assert!(user.hobbies.len() <= MAX_HOBBIES);

            let distinct: HashSet<_> = user.hobbies.iter().collect();
            assert_eq!(distinct.len(), user.hobbies.len());
        }
    }

    #[test]
    fn seed_makes_generation_repeatable() {
        assert_eq!(generate_users(20, Some(9)), generate_users(20, Some(9)));
    }

    #[test]
    fn hobby_list_has_no_duplicates() {
        let distinct: HashSet<_> = HOBBIES.iter().collect();
        assert_eq!(distinct.len(), HOBBIES.len());
    }
}

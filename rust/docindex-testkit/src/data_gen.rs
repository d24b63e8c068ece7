//! Synthetic movie documents.
//!
//! Every movie carries a random 8-character alphanumeric `id`, which occurs in
//! no other field, so a query for the id finds exactly that movie.

use serde_json::{Value, json};

const ADJECTIVES: &[&str] = &[
    "Silent", "Crimson", "Lost", "Electric", "Hidden", "Broken", "Golden", "Last", "Frozen",
    "Savage", "Distant", "Midnight",
];

const NOUNS: &[&str] = &[
    "Harbor", "Empire", "Signal", "Garden", "Frontier", "Circuit", "Orchard", "Comet", "Labyrinth",
    "Lantern", "Canyon", "Monarch",
];

const DIRECTORS: &[&str] = &[
    "Wachowski", "Mann", "Scott", "Cameron", "Fincher", "Bigelow", "Villeneuve", "Gerwig", "Nolan",
    "Kurosawa",
];

const GENRES: &[&str] = &["drama", "thriller", "comedy", "western", "noir", "animation"];

/// Generates `count` movies, reproducibly for a given `seed`.
pub fn generate_movies(count: usize, seed: u64) -> Vec<Value> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count)
        .map(|i| {
            let title = format!(
                "The {} {} {}",
                pick(&mut rng, ADJECTIVES),
                pick(&mut rng, NOUNS),
                roman(i % 12 + 1)
            );
            json!({
                "id": random_id(&mut rng),
                "title": title,
                "director": pick(&mut rng, DIRECTORS),
                "genre": pick(&mut rng, GENRES),
                "year": rng.u32(1920..2025),
            })
        })
        .collect()
}

/// A random 8-character alphanumeric identifier.
pub fn random_id(rng: &mut fastrand::Rng) -> String {
    std::iter::repeat_with(|| rng.alphanumeric()).take(8).collect()
}

fn pick<'a>(rng: &mut fastrand::Rng, items: &[&'a str]) -> &'a str {
    items[rng.usize(..items.len())]
}

fn roman(n: usize) -> &'static str {
    const NUMERALS: [&str; 12] = [
        "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
    ];
    NUMERALS[(n - 1) % NUMERALS.len()]
}

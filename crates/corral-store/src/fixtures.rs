//! Demo fixture data seeded at process start.
//!
//! Both collections exist only for the lifetime of the process; every
//! restart begins from these records. Birthyears are expressed as ages
//! relative to the current year so the fixtures stay plausible.

use chrono::{Datelike, Utc};
use corral_types::{Capacity, Unicorn};

/// The four seeded capacities, ids 1 through 4.
pub fn capacities() -> Vec<Capacity> {
    [(1, "Strong"), (2, "Speed"), (3, "Sweet"), (4, "Telepath")]
        .into_iter()
        .map(|(id, label)| Capacity {
            id,
            label: String::from(label),
        })
        .collect()
}

/// Seed parameters for one fixture unicorn.
struct Seed {
    id: u64,
    name: &'static str,
    age: i32,
    weight: f64,
    photo_ext: &'static str,
    hobbies: &'static [&'static str],
    capacities: &'static [u64],
}

/// The ten seeded unicorns, ids 1 through 10.
///
/// Photo links point at the static photo route under `base_url`.
pub fn unicorns(base_url: &str) -> Vec<Unicorn> {
    let current_year = Utc::now().year();

    let seeds = [
        Seed {
            id: 1,
            name: "Baby",
            age: 0,
            weight: 10.0,
            photo_ext: "jpg",
            hobbies: &["Sleep", "Cry"],
            capacities: &[1, 2],
        },
        Seed {
            id: 2,
            name: "Dylan",
            age: 1,
            weight: 32.0,
            photo_ext: "jpg",
            hobbies: &["Coffee", "Sing", "Cinema"],
            capacities: &[1],
        },
        Seed {
            id: 3,
            name: "Charly",
            age: 12,
            weight: 45.0,
            photo_ext: "png",
            hobbies: &["Read", "Photography"],
            capacities: &[2],
        },
        Seed {
            id: 4,
            name: "John",
            age: 17,
            weight: 54.0,
            photo_ext: "jpg",
            hobbies: &["Sport", "Music"],
            capacities: &[],
        },
        Seed {
            id: 5,
            name: "Freddy",
            age: 49,
            weight: 90.0,
            photo_ext: "jpg",
            hobbies: &["Cut wood", "Hockey"],
            capacities: &[3],
        },
        Seed {
            id: 6,
            name: "Cindy",
            age: 15,
            weight: 46.0,
            photo_ext: "jpg",
            hobbies: &[
                "Vampire Diaries",
                "Gossip Girl",
                "Justin Bieber",
                "One Direction",
            ],
            capacities: &[1, 2, 3],
        },
        Seed {
            id: 7,
            name: "Hervé",
            age: 9,
            weight: 21.0,
            photo_ext: "jpg",
            hobbies: &["Drink", "Football", "cycling"],
            capacities: &[3],
        },
        Seed {
            id: 8,
            name: "Christian",
            age: 35,
            weight: 75.0,
            photo_ext: "png",
            hobbies: &["Horsing", "Gymnastic", "Parties"],
            capacities: &[2, 4],
        },
        Seed {
            id: 9,
            name: "Gandalf",
            age: 150,
            weight: 65.0,
            photo_ext: "png",
            hobbies: &["Dragons", "Magic"],
            capacities: &[4],
        },
        Seed {
            id: 10,
            name: "Donatello, Raphael, Michelangelo & leonardo",
            age: 21,
            weight: 300.0,
            photo_ext: "jpg",
            hobbies: &["Pizzas", "Martial arts"],
            capacities: &[1, 2],
        },
    ];

    seeds
        .into_iter()
        .map(|seed| Unicorn {
            id: seed.id,
            name: String::from(seed.name),
            birthyear: current_year - seed.age,
            weight: seed.weight,
            photo: format!(
                "{base_url}/unicorns/photos/unicorn-{}.{}",
                seed.id, seed.photo_ext
            ),
            hobbies: seed.hobbies.iter().map(|h| String::from(*h)).collect(),
            capacities: seed.capacities.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use validator::Validate as _;

    use super::*;

    #[test]
    fn capacity_ids_run_from_one_to_four() {
        let records = capacities();
        let ids: Vec<u64> = records.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(records.iter().map(|c| c.label.as_str()).nth(1), Some("Speed"));
    }

    #[test]
    fn unicorn_fixtures_pass_their_own_validation() {
        for unicorn in unicorns("http://localhost:3000") {
            assert!(unicorn.validate().is_ok(), "fixture {} invalid", unicorn.id);
        }
    }

    #[test]
    fn unicorn_photos_point_at_the_photo_route() {
        let records = unicorns("http://localhost:3000");
        assert_eq!(records.len(), 10);
        for unicorn in &records {
            assert!(
                unicorn
                    .photo
                    .starts_with("http://localhost:3000/unicorns/photos/unicorn-")
            );
        }
    }
}

//! # Recommendations
//!
//! Interest overlap between users, scored by Jaccard similarity.
//!
//! ## Structures
//! - Users (**name** -> set of interests), kept in registration order
//! - Inverted index (**interest** -> set of names), used to skip users sharing nothing
//!
//! ## Ordering
//! Peers are ranked by similarity, highest first. Ties fall back to the peer name so
//! the same roster always produces the same lists.
use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
};

use indexmap::IndexMap;
use tracing::info;

use crate::models::{Recommendation, Recommendations, User};

#[derive(Debug, Default)]
pub struct Recommender {
    users: IndexMap<String, HashSet<String>>,
    inverted_index: HashMap<String, HashSet<String>>,
}

impl Recommender {
    pub fn new(users: &[User]) -> Self {
        let mut recommender = Self::default();
        recommender.load(users);

        recommender
    }

    pub fn load(&mut self, users: &[User]) {
        self.users.clear();
        self.inverted_index.clear();

        for user in users {
            let interests: HashSet<String> = user
                .interests
                .split(',')
                .map(str::to_lowercase)
                .collect();

            if let Some(previous) = self.users.get(&user.name) {
                for interest in previous {
                    if let Some(names) = self.inverted_index.get_mut(interest) {
                        names.remove(&user.name);
                    }
                }
            }

            for interest in &interests {
                self.inverted_index
                    .entry(interest.clone())
                    .or_default()
                    .insert(user.name.clone());
            }

            self.users.insert(user.name.clone(), interests);
        }

        info!("Loaded {} users for recommendation", self.users.len());
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    /// Every other user for every user, ranked. Empty below two users.
    pub fn recommend_all(&self) -> Recommendations {
        if self.users.len() < 2 {
            return Recommendations::new();
        }

        self.users
            .iter()
            .map(|(name, interests)| {
                let peers = self
                    .users
                    .iter()
                    .filter(|(other, _)| *other != name)
                    .map(|(other, other_interests)| {
                        Recommendation(other.clone(), jaccard(interests, other_interests))
                    })
                    .collect();

                (name.clone(), ranked(peers))
            })
            .collect()
    }

    /// Peers sharing at least one interest, at or above `threshold`, best `top_n` only.
    pub fn recommend(&self, threshold: f64, top_n: usize) -> Recommendations {
        self.users
            .keys()
            .map(|name| (name.clone(), self.recommend_for(name, threshold, top_n)))
            .collect()
    }

    pub fn recommend_for(&self, name: &str, threshold: f64, top_n: usize) -> Vec<Recommendation> {
        let Some(interests) = self.users.get(name) else {
            return Vec::new();
        };

        let peers = self
            .candidates(interests)
            .into_iter()
            .filter(|candidate| *candidate != name)
            .filter_map(|candidate| {
                let similarity = jaccard(interests, &self.users[candidate]);
                (similarity >= threshold)
                    .then(|| Recommendation(candidate.to_string(), similarity))
            })
            .collect();

        let mut peers = ranked(peers);
        peers.truncate(top_n);

        peers
    }

    fn candidates(&self, interests: &HashSet<String>) -> HashSet<&str> {
        interests
            .iter()
            .filter_map(|interest| self.inverted_index.get(interest))
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }

    a.intersection(b).count() as f64 / union as f64
}

fn ranked(mut peers: Vec<Recommendation>) -> Vec<Recommendation> {
    peers.sort_by(|a, b| {
        b.similarity()
            .partial_cmp(&a.similarity())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.peer().cmp(b.peer()))
    });

    peers
}

use rand::{Rng, seq::SliceRandom};
use roster::{Recommendations, User};

use crate::models::INTEREST_POOL;

/// `user1..=userN`, each with distinct interests sampled from the pool.
pub fn generate_users<R: Rng + ?Sized>(
    count: usize,
    interests_per_user: usize,
    rng: &mut R,
) -> Vec<User> {
    (1..=count)
        .map(|i| {
            let interests: Vec<&str> = INTEREST_POOL
                .choose_multiple(rng, interests_per_user)
                .copied()
                .collect();

            User::new(format!("user{i}"), interests.join(","))
        })
        .collect()
}

pub fn format_report(recommendations: &Recommendations) -> String {
    let mut report = String::new();

    for (user, peers) in recommendations {
        report.push_str(&format!("{user} recommendations:\n"));
        for peer in peers {
            report.push_str(&format!(
                "  - {} (similarity: {:.2})\n",
                peer.peer(),
                peer.similarity()
            ));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};
    use roster::Recommendation;

    use super::*;

    #[test]
    fn test_generate_users() {
        let mut rng = StdRng::seed_from_u64(7);

        let users = generate_users(4, 10, &mut rng);

        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["user1", "user2", "user3", "user4"]);

        for user in &users {
            let interests: HashSet<&str> = user.interests.split(',').collect();
            assert_eq!(interests.len(), 10);
            assert!(interests.iter().all(|i| INTEREST_POOL.contains(i)));
        }
    }

    #[test]
    fn test_interest_count_capped_by_pool() {
        let mut rng = StdRng::seed_from_u64(7);

        let users = generate_users(1, 100, &mut rng);

        assert_eq!(users[0].interests.split(',').count(), INTEREST_POOL.len());
    }

    #[test]
    fn test_format_report() {
        let mut recommendations = Recommendations::new();
        recommendations.insert(
            "user1".to_string(),
            vec![Recommendation("user2".to_string(), 0.4286)],
        );
        recommendations.insert("user2".to_string(), Vec::new());

        assert_eq!(
            format_report(&recommendations),
            "user1 recommendations:\n  - user2 (similarity: 0.43)\nuser2 recommendations:\n"
        );
    }
}

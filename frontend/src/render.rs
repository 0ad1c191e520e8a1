//! Rebuilds the user and recommendation regions from a server reply.
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use roster::models::{Recommendations, SubmitResponse, User};

use crate::{
    dom::{Element, Node, Page},
    error::PageError,
    page::{RECOMMENDATIONS_SECTION, USERS_LIST},
};

pub const AVATAR_ENDPOINT: &str = "https://ui-avatars.com/api/";

pub const NO_USERS: &str = "No users yet!";
pub const NOT_ENOUGH_USERS: &str = "At least 2 users are required for recommendations.";
pub const NO_RECOMMENDATIONS: &str = "No recommendations yet! Add more users.";

// Same reserved set as `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn avatar_url(name: &str) -> String {
    format!(
        "{AVATAR_ENDPOINT}?name={}&size=50&background=random",
        utf8_percent_encode(name, URI_COMPONENT)
    )
}

pub fn avatar(name: &str) -> Element {
    Element::new("img")
        .attr("src", &avatar_url(name))
        .attr("alt", &format!("{name} Avatar"))
        .attr("class", "avatar")
}

/// Score with two decimals, rounding exact halves up like `Number.prototype.toFixed(2)`.
///
/// `{:.2}` alone rounds ties to even, so 1/8 would print as `0.12`.
pub fn format_similarity(value: f64) -> String {
    // A two decimal tie is an odd multiple of 1/200, which as an f64 is always k/8 exactly.
    let eighths = value.abs() * 8.0;
    let tie = eighths.fract() == 0.0 && (eighths * 12.5).fract() == 0.5;

    if !tie {
        return format!("{value:.2}");
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{:.2}", (value.abs() * 100.0).ceil() / 100.0)
}

/// Rebuilds both list regions. Stops at the first region missing from the page.
pub fn render_lists<P: Page>(page: &mut P, response: &SubmitResponse) -> Result<(), PageError> {
    if !page.replace_children(USERS_LIST, users_content(&response.users)) {
        return Err(PageError::MissingElement(USERS_LIST));
    }

    let recommendations = recommendations_content(&response.users, response.recommendations.as_ref());
    if !page.replace_children(RECOMMENDATIONS_SECTION, recommendations) {
        return Err(PageError::MissingElement(RECOMMENDATIONS_SECTION));
    }

    Ok(())
}

pub fn render_users(list: &mut Element, users: &[User]) {
    list.replace_children(users_content(users));
}

pub fn render_recommendations(
    section: &mut Element,
    users: &[User],
    recommendations: Option<&Recommendations>,
) {
    section.replace_children(recommendations_content(users, recommendations));
}

pub fn users_content(users: &[User]) -> Vec<Node> {
    if users.is_empty() {
        return vec![Element::new("p").child(NO_USERS).into()];
    }

    users
        .iter()
        .map(|user| {
            Node::from(
                Element::new("li")
                    .child(avatar(&user.name))
                    .child(format!(" {}: {}", user.name, user.interests)),
            )
        })
        .collect()
}

pub fn recommendations_content(
    users: &[User],
    recommendations: Option<&Recommendations>,
) -> Vec<Node> {
    if users.len() < 2 {
        return vec![Element::new("p").child(NOT_ENOUGH_USERS).into()];
    }

    let Some(recommendations) = recommendations.filter(|r| !r.is_empty()) else {
        return vec![Element::new("p").child(NO_RECOMMENDATIONS).into()];
    };

    let mut content: Vec<Node> = Vec::with_capacity(recommendations.len() * 2);
    for (user, peers) in recommendations {
        content.push(Element::new("h3").child(user.as_str()).into());

        let mut list = Element::new("ul");
        for peer in peers {
            list.append_child(
                Element::new("li")
                    .child(avatar(peer.peer()))
                    .child(format!(
                        " {} (Similarity: {})",
                        peer.peer(),
                        format_similarity(peer.similarity())
                    )),
            );
        }
        content.push(list.into());
    }

    content
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use roster::models::Recommendation;

    use super::*;

    fn users(names: &[&str]) -> Vec<User> {
        names.iter().map(|name| User::new(*name, "x")).collect()
    }

    #[test]
    fn test_avatar_url_escapes_like_uri_component() {
        assert_eq!(
            avatar_url("Mary Ann"),
            "https://ui-avatars.com/api/?name=Mary%20Ann&size=50&background=random"
        );
        assert_eq!(
            avatar_url("a&b=c/d"),
            "https://ui-avatars.com/api/?name=a%26b%3Dc%2Fd&size=50&background=random"
        );
        assert!(avatar_url("o'neil(jr)!").contains("name=o'neil(jr)!&"));
        assert!(avatar_url("José").contains("name=Jos%C3%A9&"));
    }

    #[test]
    fn test_avatar_element() {
        let img = avatar("Bob");

        assert_eq!(img.tag(), "img");
        assert_eq!(img.attribute("alt"), Some("Bob Avatar"));
        assert_eq!(img.attribute("class"), Some("avatar"));
    }

    #[test]
    fn test_render_users() {
        let mut list = Element::new("ul").child(Element::new("li").child("stale"));

        render_users(&mut list, &[User::new("A", "x,y")]);

        let items: Vec<&Element> = list.child_elements().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].tag(), "li");
        assert_eq!(items[0].text_content(), " A: x,y");
        assert_eq!(items[0].descendants_by_tag("img").len(), 1);
    }

    #[test]
    fn test_similarity_rounds_halves_up() {
        assert_eq!(format_similarity(1.0 / 8.0), "0.13");
        assert_eq!(format_similarity(3.0 / 8.0), "0.38");
        assert_eq!(format_similarity(5.0 / 8.0), "0.63");
        assert_eq!(format_similarity(7.0 / 8.0), "0.88");
        assert_eq!(format_similarity(-1.0 / 8.0), "-0.13");
    }

    #[test]
    fn test_similarity_without_ties() {
        assert_eq!(format_similarity(0.8765), "0.88");
        assert_eq!(format_similarity(2.0 / 3.0), "0.67");
        assert_eq!(format_similarity(0.5), "0.50");
        assert_eq!(format_similarity(1.0), "1.00");
        assert_eq!(format_similarity(0.0), "0.00");
        // 1.005 is stored just below the half, toFixed gives 1.00 too.
        assert_eq!(format_similarity(1.005), "1.00");
    }

    #[test]
    fn test_eighth_scores_render_like_to_fixed() {
        let mut section = Element::new("div");
        let mut recommendations = IndexMap::new();
        recommendations.insert(
            "A".to_string(),
            vec![
                Recommendation("C".to_string(), 5.0 / 8.0),
                Recommendation("B".to_string(), 1.0 / 8.0),
            ],
        );

        render_recommendations(&mut section, &users(&["A", "B", "C"]), Some(&recommendations));

        let items: Vec<String> = section
            .descendants_by_tag("li")
            .iter()
            .map(|li| li.text_content())
            .collect();
        assert_eq!(items, [" C (Similarity: 0.63)", " B (Similarity: 0.13)"]);
    }

    #[test]
    fn test_render_no_users() {
        let mut list = Element::new("ul");

        render_users(&mut list, &[]);

        assert_eq!(list.to_html(), "<ul><p>No users yet!</p></ul>");
    }

    #[test]
    fn test_recommendations_need_two_users() {
        let mut section = Element::new("div");
        let mut recommendations = IndexMap::new();
        recommendations.insert("A".to_string(), vec![Recommendation("B".to_string(), 1.0)]);

        render_recommendations(&mut section, &users(&["A"]), Some(&recommendations));

        assert_eq!(section.text_content(), NOT_ENOUGH_USERS);
    }

    #[test]
    fn test_missing_and_empty_recommendations_match() {
        let mut missing = Element::new("div");
        let mut empty = Element::new("div");

        render_recommendations(&mut missing, &users(&["A", "B"]), None);
        render_recommendations(&mut empty, &users(&["A", "B"]), Some(&IndexMap::new()));

        assert_eq!(missing.text_content(), NO_RECOMMENDATIONS);
        assert_eq!(missing, empty);
    }

    #[test]
    fn test_render_recommendations_keeps_server_order() {
        let mut section = Element::new("div");
        let mut recommendations = IndexMap::new();
        recommendations.insert(
            "B".to_string(),
            vec![
                Recommendation("A".to_string(), 0.1),
                Recommendation("C".to_string(), 0.9),
            ],
        );
        recommendations.insert("A".to_string(), vec![Recommendation("B".to_string(), 0.8765)]);

        render_recommendations(&mut section, &users(&["A", "B", "C"]), Some(&recommendations));

        let headings: Vec<String> = section
            .descendants_by_tag("h3")
            .iter()
            .map(|h| h.text_content())
            .collect();
        assert_eq!(headings, ["B", "A"]);

        let items: Vec<String> = section
            .descendants_by_tag("li")
            .iter()
            .map(|li| li.text_content())
            .collect();
        assert_eq!(
            items,
            [
                " A (Similarity: 0.10)",
                " C (Similarity: 0.90)",
                " B (Similarity: 0.88)"
            ]
        );
    }
}
